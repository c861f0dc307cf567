//! Frame sampling for pose comparison.
//!
//! Videos are decoded by an external `ffmpeg` process into numbered PNG
//! stills inside a private temporary directory. The directory lives as long
//! as the returned [`ExtractedFrames`] value.

pub mod config;
pub mod error;
pub mod extractor;

pub use config::{default_program, ExtractorConfig, FFMPEG_PATH_ENV};
pub use error::VideoError;
pub use extractor::{ffmpeg_args, ExtractedFrames, FrameExtractor, FRAME_PATTERN};
