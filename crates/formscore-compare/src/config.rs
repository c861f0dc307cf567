use crate::CompareError;
use formscore_infer::DetectorOptions;
use formscore_video::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FRAME_RATE: f64 = 4.0;
pub const DEFAULT_MAX_FRAMES: u32 = 240;
pub const DEFAULT_MIN_POSE_SCORE: f32 = 0.3;
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 120;

/// Settings for one comparison.
///
/// Timeouts are written as seconds in JSON, e.g. `"extract_timeout": 90`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub ffmpeg_path: PathBuf,
    /// Samples per second of source video.
    pub frame_rate: f64,
    /// Per-video frame cap; `None` or `0` keeps every sampled frame.
    pub max_frames: Option<u32>,
    /// Keypoints scoring below this are treated as missing.
    pub min_pose_score: f32,
    #[serde(with = "secs")]
    pub extract_timeout: Duration,
    #[serde(with = "opt_secs")]
    pub compare_timeout: Option<Duration>,
    /// Only used by the call that first creates the shared detector.
    pub detector: DetectorOptions,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: formscore_video::default_program(),
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: Some(DEFAULT_MAX_FRAMES),
            min_pose_score: DEFAULT_MIN_POSE_SCORE,
            extract_timeout: Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS),
            compare_timeout: None,
            detector: DetectorOptions::default(),
        }
    }
}

impl CompareConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CompareError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CompareError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            CompareError::InvalidConfiguration(format!("cannot parse {}: {e}", path.display()))
        })
    }

    /// Check the settings before any work starts.
    pub fn validate(&self) -> Result<(), CompareError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(CompareError::InvalidConfiguration(format!(
                "frame_rate must be a positive number, got {}",
                self.frame_rate
            )));
        }
        if !self.min_pose_score.is_finite() {
            return Err(CompareError::InvalidConfiguration(format!(
                "min_pose_score must be a finite number, got {}",
                self.min_pose_score
            )));
        }
        if self.extract_timeout.is_zero() {
            return Err(CompareError::InvalidConfiguration(
                "extract_timeout must be greater than zero".to_string(),
            ));
        }
        if self.compare_timeout.is_some_and(|t| t.is_zero()) {
            return Err(CompareError::InvalidConfiguration(
                "compare_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
            .with_program(self.ffmpeg_path.clone())
            .with_timeout(self.extract_timeout)
    }

    pub fn with_ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_max_frames(mut self, max_frames: Option<u32>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn with_min_pose_score(mut self, score: f32) -> Self {
        self.min_pose_score = score;
        self
    }

    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extract_timeout = timeout;
        self
    }

    pub fn with_compare_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.compare_timeout = timeout;
        self
    }

    pub fn with_detector(mut self, detector: DetectorOptions) -> Self {
        self.detector = detector;
        self
    }
}

mod secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

mod opt_secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}
