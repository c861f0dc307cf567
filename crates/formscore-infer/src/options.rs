use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the pose model file.
pub const MODEL_PATH_ENV: &str = "FORMSCORE_MODEL_PATH";

pub const DEFAULT_MODEL_PATH: &str = "models/movenet-singlepose-lightning.onnx";

/// Mean keypoint score below which the detector reports no person.
pub const DEFAULT_DETECTOR_MIN_POSE_SCORE: f32 = 0.25;

/// Single-person MoveNet model size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveNetVariant {
    /// Fastest variant, 192x192 input.
    #[default]
    Lightning,
    /// More accurate variant, 256x256 input.
    Thunder,
}

impl MoveNetVariant {
    /// Side length of the square model input in pixels.
    pub fn input_size(&self) -> usize {
        match self {
            MoveNetVariant::Lightning => 192,
            MoveNetVariant::Thunder => 256,
        }
    }
}

fn default_model_path() -> PathBuf {
    std::env::var_os(MODEL_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Options used when the shared detector is first created.
///
/// Later changes have no effect on an already initialized detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    pub model_path: PathBuf,
    pub variant: MoveNetVariant,
    pub min_pose_score: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            variant: MoveNetVariant::default(),
            min_pose_score: DEFAULT_DETECTOR_MIN_POSE_SCORE,
        }
    }
}

impl DetectorOptions {
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_variant(mut self, variant: MoveNetVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_min_pose_score(mut self, score: f32) -> Self {
        self.min_pose_score = score;
        self
    }
}
