//! Pose estimation for formscore.
//!
//! The [`PoseEstimator`] trait is the narrow capability the comparison
//! pipeline depends on. [`MoveNetEstimator`] implements it over any
//! [`Session`]; with the `onnx` feature, [`OnnxBackend`] loads MoveNet
//! models through ONNX Runtime.

pub mod backend;
pub mod backends;
pub mod error;
pub mod estimator;
pub mod modelsource;
pub mod options;
pub mod pose;
pub mod session;
pub mod shared;

pub use backend::Backend;
#[cfg(feature = "onnx")]
pub use backends::{OnnxBackend, OnnxSession};
pub use error::InferError;
pub use estimator::{KeypointIndex, PoseEstimator, RawKeypoint, COCO_KEYPOINT_COUNT};
pub use modelsource::ModelSource;
pub use options::{DetectorOptions, MoveNetVariant, MODEL_PATH_ENV};
pub use pose::{postprocess, preprocess, LetterboxInfo, MoveNetEstimator};
pub use session::Session;
pub use shared::{shared_detector, SharedDetector};

use std::sync::Arc;

/// Build the configured detector. Blocks while the model loads.
pub fn load_detector(options: &DetectorOptions) -> Result<Arc<dyn PoseEstimator>, InferError> {
    if !options.model_path.is_file() {
        return Err(InferError::ModelLoad(format!(
            "pose model not found at {} (set {} to its location)",
            options.model_path.display(),
            MODEL_PATH_ENV
        )));
    }
    log::info!(
        "loading {:?} pose detector from {}",
        options.variant,
        options.model_path.display()
    );

    #[cfg(feature = "onnx")]
    {
        let backend = OnnxBackend::new();
        let estimator = MoveNetEstimator::from_options(options, &backend)?;
        Ok(Arc::new(estimator))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(InferError::Backend(
            "formscore-infer was built without the `onnx` feature".to_string(),
        ))
    }
}
