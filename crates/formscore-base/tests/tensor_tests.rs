use formscore_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1u8, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.len(), 6);
    assert_eq!(tensor.ndim(), 2);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1.0f32, 2.0, 3.0]);
    assert_eq!(
        result.err(),
        Some(TensorError::ShapeMismatch {
            expected: 6,
            got: 3
        })
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<u8>::zeros(vec![4, 5, 3]).unwrap();
    assert_eq!(tensor.data, vec![0u8; 60]);
    assert!(!tensor.is_empty());
}

#[test]
fn test_tensor_hwc() {
    let tensor = Tensor::<u8>::zeros(vec![4, 5, 3]).unwrap();
    assert_eq!(tensor.hwc(), Ok((4, 5, 3)));

    let flat = Tensor::<u8>::zeros(vec![60]).unwrap();
    assert_eq!(flat.hwc(), Err(TensorError::Rank { expected: 3, got: 1 }));
}

#[test]
fn test_tensor_debug_omits_data() {
    let tensor = Tensor::<u8>::zeros(vec![2, 2, 3]).unwrap();
    let text = format!("{:?}", tensor);
    assert!(text.contains("shape: [2, 2, 3]"));
    assert!(text.contains("len: 12"));
}
