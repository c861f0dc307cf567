use crate::InferError;
use formscore_base::Tensor;

/// Letterbox transformation parameters for coordinate rescaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Scale factor applied to the source image
    pub scale: f32,
    /// Horizontal padding added (in model input pixels)
    pub pad_x: f32,
    /// Vertical padding added (in model input pixels)
    pub pad_y: f32,
    /// Side of the square model input
    pub input_size: usize,
    pub source_width: usize,
    pub source_height: usize,
}

/// Preprocess an RGB frame for MoveNet inference
///
/// Takes an image tensor in HWC format (height, width, 3 channels) and returns
/// a tensor in NHWC format `(1, S, S, 3)` with values in [0.0, 255.0], where
/// `S` is `input_size`. The frame is resized keeping its aspect ratio
/// (nearest neighbor) and centered on a black square.
///
/// Returns the preprocessed tensor and letterbox info for coordinate rescaling.
pub fn preprocess(
    image: &Tensor<u8>,
    input_size: usize,
) -> Result<(Tensor<f32>, LetterboxInfo), InferError> {
    let (h, w, c) = image.hwc().map_err(|_| InferError::ShapeMismatch {
        expected: "[H, W, 3]".to_string(),
        got: format!("{:?}", image.shape),
    })?;
    if c != 3 {
        return Err(InferError::ShapeMismatch {
            expected: "3 channels".to_string(),
            got: format!("{} channels", c),
        });
    }
    if h == 0 || w == 0 || input_size == 0 {
        return Err(InferError::InvalidInput(format!(
            "cannot letterbox a {}x{} image into {}x{}",
            w, h, input_size, input_size
        )));
    }

    let target = input_size as f32;
    let scale = (target / w as f32).min(target / h as f32);
    let new_w = ((w as f32 * scale) as usize).clamp(1, input_size);
    let new_h = ((h as f32 * scale) as usize).clamp(1, input_size);
    let pad_x = (input_size - new_w) / 2;
    let pad_y = (input_size - new_h) / 2;

    let mut nhwc = vec![0.0f32; input_size * input_size * 3];
    for out_y in 0..new_h {
        let src_y = ((out_y as f32 / scale).floor() as usize).min(h - 1);
        for out_x in 0..new_w {
            let src_x = ((out_x as f32 / scale).floor() as usize).min(w - 1);
            let src = (src_y * w + src_x) * 3;
            let dst = ((out_y + pad_y) * input_size + out_x + pad_x) * 3;
            for ch in 0..3 {
                nhwc[dst + ch] = image.data[src + ch] as f32;
            }
        }
    }

    let tensor = Tensor::new(vec![1, input_size, input_size, 3], nhwc)?;
    let letterbox = LetterboxInfo {
        scale,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
        input_size,
        source_width: w,
        source_height: h,
    };

    Ok((tensor, letterbox))
}
