use formscore_infer::InferError;
use formscore_video::VideoError;
use std::{fmt, time::Duration};

/// Which of the two compared videos an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSlot {
    /// The reference performance.
    A,
    /// The attempt being graded.
    B,
}

impl fmt::Display for VideoSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSlot::A => write!(f, "reference video"),
            VideoSlot::B => write!(f, "attempt video"),
        }
    }
}

#[derive(Debug)]
pub enum CompareError {
    InvalidConfiguration(String),
    Extraction {
        video: VideoSlot,
        source: VideoError,
    },
    Estimation {
        video: VideoSlot,
        frame: usize,
        source: InferError,
    },
    /// The shared detector could not be created.
    Detector(InferError),
    /// The whole comparison exceeded its time bound.
    Timeout(Duration),
    Task(String),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            CompareError::Extraction { video, source } => {
                write!(f, "frame extraction failed for {video}: {source}")
            }
            CompareError::Estimation {
                video,
                frame,
                source,
            } => write!(
                f,
                "pose estimation failed for {video} at frame {frame}: {source}"
            ),
            CompareError::Detector(err) => write!(f, "pose detector unavailable: {err}"),
            CompareError::Timeout(after) => {
                write!(f, "comparison did not finish within {:.1}s", after.as_secs_f64())
            }
            CompareError::Task(msg) => write!(f, "worker task failed: {msg}"),
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Extraction { source, .. } => Some(source),
            CompareError::Estimation { source, .. } => Some(source),
            CompareError::Detector(err) => Some(err),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for CompareError {
    fn from(err: tokio::task::JoinError) -> Self {
        CompareError::Task(err.to_string())
    }
}
