use crate::estimator::{PoseEstimator, RawKeypoint};
use crate::options::{DetectorOptions, MoveNetVariant};
use crate::{Backend, InferError, ModelSource, Session};
use formscore_base::Tensor;
use std::sync::Mutex;

use super::postprocess::postprocess;
use super::preprocess::preprocess;

/// MoveNet single-pose estimation pipeline
///
/// Integrates letterboxing, inference, and coordinate rescaling into a single
/// `estimate()` call. The session sits behind a mutex, so concurrent callers
/// take turns on the one loaded model.
pub struct MoveNetEstimator {
    session: Mutex<Box<dyn Session>>,
    input_name: String,
    output_name: String,
    variant: MoveNetVariant,
    min_pose_score: f32,
}

impl MoveNetEstimator {
    /// Wrap an already loaded session.
    pub fn new(session: Box<dyn Session>, variant: MoveNetVariant) -> Result<Self, InferError> {
        let input_name = session
            .input_names()
            .first()
            .ok_or_else(|| InferError::Backend("model has no inputs".to_string()))?
            .clone();
        let output_name = session
            .output_names()
            .first()
            .ok_or_else(|| InferError::Backend("model has no outputs".to_string()))?
            .clone();

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            variant,
            min_pose_score: crate::options::DEFAULT_DETECTOR_MIN_POSE_SCORE,
        })
    }

    /// Load the model named by `options` through `backend`.
    pub fn from_options(
        options: &DetectorOptions,
        backend: &dyn Backend,
    ) -> Result<Self, InferError> {
        let session = backend.load_model(ModelSource::File(options.model_path.clone()))?;
        Ok(Self::new(session, options.variant)?.with_min_pose_score(options.min_pose_score))
    }

    /// Set the no-person threshold on mean keypoint score (builder pattern)
    pub fn with_min_pose_score(mut self, score: f32) -> Self {
        self.min_pose_score = score;
        self
    }

    pub fn min_pose_score(&self) -> f32 {
        self.min_pose_score
    }

    pub fn variant(&self) -> MoveNetVariant {
        self.variant
    }
}

impl PoseEstimator for MoveNetEstimator {
    fn estimate(
        &self,
        image: &Tensor<u8>,
        flip_horizontal: bool,
    ) -> Result<Option<Vec<RawKeypoint>>, InferError> {
        let (input, letterbox) = preprocess(image, self.variant.input_size())?;

        let mut outputs = {
            let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
            session.run(&[(self.input_name.as_str(), input)])?
        };

        let output = outputs.remove(&self.output_name).ok_or_else(|| {
            InferError::Backend(format!("model produced no '{}' output", self.output_name))
        })?;

        postprocess(&output, &letterbox, flip_horizontal, self.min_pose_score)
    }
}
