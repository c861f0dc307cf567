//! Frame image decoding for formscore.
//!
//! Wraps the `image` crate to turn one extracted frame file into a
//! 3-channel RGB `Tensor<u8>` in HWC layout: `[height, width, 3]`.

pub mod error;

pub use error::ImageError;

use formscore_base::Tensor;
use std::path::Path;

/// Number of channels in every decoded frame.
pub const RGB_CHANNELS: usize = 3;

/// Decodes an encoded image into an RGB8 tensor.
///
/// The format is auto-detected. Grayscale, alpha and 16-bit inputs are
/// converted to 8-bit RGB so the pose model always sees the same layout.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.into_rgb8();
    let (width, height) = rgb.dimensions();
    let shape = vec![height as usize, width as usize, RGB_CHANNELS];
    Ok(Tensor::new(shape, rgb.into_raw())?)
}

/// Reads and decodes one frame file.
///
/// The CPU-bound decoding work runs on tokio's blocking thread pool. The
/// encoded bytes are dropped as soon as decoding finishes.
pub async fn load_rgb(path: impl AsRef<Path>) -> Result<Tensor<u8>, ImageError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    tokio::task::spawn_blocking(move || decode_rgb(&bytes))
        .await
        .map_err(|e| ImageError::Decode(format!("decode task failed: {e}")))?
}
