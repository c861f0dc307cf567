//! Pose-based similarity between a reference exercise video and an attempt.
//!
//! Each video is sampled into frames, every frame runs through a
//! [`PoseEstimator`], low-confidence keypoints are dropped, and the
//! sequence is normalized into its own unit square. The two sequences are
//! then compared frame by frame, by index, into a 0 to 100 score.
//!
//! Frames are paired strictly by position: no time warping or resampling
//! compensates for videos of different speed or start offset.

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod sequence;
pub mod types;

pub use config::CompareConfig;
pub use error::{CompareError, VideoSlot};
pub use formscore_infer::{DetectorOptions, MoveNetVariant, PoseEstimator};
pub use normalize::{compute_bounds, normalize};
pub use pipeline::{compare_videos, compare_videos_detailed, compare_with, process_video};
pub use score::{score, SequenceScore};
pub use sequence::{build_sequence, filter_pose};
pub use types::{Bounds, Keypoint, Pose, PoseFrame, PoseSequence, SimilarityResult};
