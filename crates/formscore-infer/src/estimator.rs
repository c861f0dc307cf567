use crate::InferError;
use formscore_base::Tensor;

/// Number of landmarks in the COCO body topology.
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// COCO keypoint slots in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    /// Snake-case landmark name, e.g. `left_shoulder`.
    pub fn name(&self) -> &'static str {
        match self {
            KeypointIndex::Nose => "nose",
            KeypointIndex::LeftEye => "left_eye",
            KeypointIndex::RightEye => "right_eye",
            KeypointIndex::LeftEar => "left_ear",
            KeypointIndex::RightEar => "right_ear",
            KeypointIndex::LeftShoulder => "left_shoulder",
            KeypointIndex::RightShoulder => "right_shoulder",
            KeypointIndex::LeftElbow => "left_elbow",
            KeypointIndex::RightElbow => "right_elbow",
            KeypointIndex::LeftWrist => "left_wrist",
            KeypointIndex::RightWrist => "right_wrist",
            KeypointIndex::LeftHip => "left_hip",
            KeypointIndex::RightHip => "right_hip",
            KeypointIndex::LeftKnee => "left_knee",
            KeypointIndex::RightKnee => "right_knee",
            KeypointIndex::LeftAnkle => "left_ankle",
            KeypointIndex::RightAnkle => "right_ankle",
        }
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = InferError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL.get(value).copied().ok_or_else(|| {
            InferError::InvalidInput(format!(
                "keypoint index {value} out of range 0-{}",
                COCO_KEYPOINT_COUNT - 1
            ))
        })
    }
}

/// One landmark as reported by a detector, in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawKeypoint {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

/// Single-person keypoint detection over one decoded frame.
///
/// Implementations must tolerate concurrent calls; the shared detector is
/// used from several blocking tasks at once.
pub trait PoseEstimator: Send + Sync {
    /// Detect one person in an RGB `[H, W, 3]` image.
    ///
    /// `Ok(None)` means no person was found, which is different from a
    /// person whose keypoints all have low confidence.
    fn estimate(
        &self,
        image: &Tensor<u8>,
        flip_horizontal: bool,
    ) -> Result<Option<Vec<RawKeypoint>>, InferError>;
}
