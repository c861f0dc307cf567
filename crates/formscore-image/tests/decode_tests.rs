use crates_image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use formscore_image::{decode_rgb, load_rgb, ImageError};
use std::io::Cursor;

fn png_bytes(image: &crates_image::DynamicImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer.into_inner()
}

#[test]
fn test_decode_rgb_png() {
    let mut img = RgbImage::new(4, 2);
    img.put_pixel(3, 1, Rgb([10, 20, 30]));
    let bytes = png_bytes(&crates_image::DynamicImage::ImageRgb8(img));

    let tensor = decode_rgb(&bytes).expect("decode failed");
    assert_eq!(tensor.shape, vec![2, 4, 3]);
    let idx = (1 * 4 + 3) * 3;
    assert_eq!(&tensor.data[idx..idx + 3], &[10, 20, 30]);
}

#[test]
fn test_decode_rgba_drops_alpha() {
    let img = RgbaImage::from_pixel(3, 3, Rgba([200, 100, 50, 7]));
    let bytes = png_bytes(&crates_image::DynamicImage::ImageRgba8(img));

    let tensor = decode_rgb(&bytes).expect("decode failed");
    assert_eq!(tensor.shape, vec![3, 3, 3]);
    assert_eq!(&tensor.data[0..3], &[200, 100, 50]);
}

#[test]
fn test_decode_garbage_is_decode_error() {
    let result = decode_rgb(b"definitely not an image");
    assert!(matches!(result, Err(ImageError::Decode(_))));
}

#[tokio::test]
async fn test_load_rgb_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame_000001.png");
    RgbImage::from_pixel(8, 6, Rgb([1, 2, 3])).save(&path).unwrap();

    let tensor = load_rgb(&path).await.expect("load failed");
    assert_eq!(tensor.hwc().unwrap(), (6, 8, 3));
}

#[tokio::test]
async fn test_load_rgb_missing_file_is_io_error() {
    let result = load_rgb("/nonexistent/frame_000001.png").await;
    assert!(matches!(result, Err(ImageError::Io(_))));
}
