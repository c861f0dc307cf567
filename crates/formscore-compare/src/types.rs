use serde::{Deserialize, Serialize};

/// A named landmark that passed the confidence floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32, score: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }
}

/// One detected person: a slot per landmark of the model topology.
///
/// A `None` slot is a keypoint that was detected below the confidence
/// floor. Slot order follows the model and is the same for every frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: Vec<Option<Keypoint>>,
}

impl Pose {
    pub fn new(keypoints: Vec<Option<Keypoint>>) -> Self {
        Self { keypoints }
    }

    pub fn valid_keypoints(&self) -> impl Iterator<Item = &Keypoint> {
        self.keypoints.iter().flatten()
    }

    pub fn valid_count(&self) -> usize {
        self.valid_keypoints().count()
    }
}

/// A sampled frame's pose; `None` when no person was detected or the
/// frame image could not be decoded.
pub type PoseFrame = Option<Pose>;

/// Per-video poses in temporal order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseSequence {
    pub frames: Vec<PoseFrame>,
    /// Indices of frames whose image failed to decode.
    pub unreadable_frames: Vec<usize>,
}

impl PoseSequence {
    pub fn new(frames: Vec<PoseFrame>) -> Self {
        Self {
            frames,
            unreadable_frames: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames holding at least one valid keypoint.
    pub fn detected_frames(&self) -> usize {
        self.frames
            .iter()
            .flatten()
            .filter(|pose| pose.valid_count() > 0)
            .count()
    }
}

/// Extent of all valid keypoints of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Outcome of comparing two videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    /// 0 to 100, rounded to two decimals.
    pub score: f64,
    pub compared_frames: usize,
    pub matched_frames: usize,
    pub frame_rate: f64,
    pub min_pose_score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_camel_case() {
        let result = SimilarityResult {
            score: 87.5,
            compared_frames: 12,
            matched_frames: 10,
            frame_rate: 4.0,
            min_pose_score: 0.5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 87.5);
        assert_eq!(json["comparedFrames"], 12);
        assert_eq!(json["matchedFrames"], 10);
        assert_eq!(json["frameRate"], 4.0);
        assert_eq!(json["minPoseScore"], 0.5);
    }

    #[test]
    fn test_detected_frames_ignores_empty_poses() {
        let sequence = PoseSequence::new(vec![
            Some(Pose::new(vec![Some(Keypoint::new("nose", 1.0, 1.0, 0.9))])),
            Some(Pose::new(vec![None])),
            None,
        ]);
        assert_eq!(sequence.detected_frames(), 1);
    }
}
