use crate::types::{Keypoint, Pose, PoseSequence};
use crate::{CompareError, VideoSlot};
use formscore_infer::{PoseEstimator, RawKeypoint};
use std::path::PathBuf;
use std::sync::Arc;

/// Keep keypoints scoring at least `min_pose_score`; others become empty slots.
pub fn filter_pose(raw: &[RawKeypoint], min_pose_score: f32) -> Pose {
    let keypoints = raw
        .iter()
        .map(|kp| {
            (kp.score >= min_pose_score).then(|| Keypoint::new(kp.name, kp.x, kp.y, kp.score))
        })
        .collect();
    Pose::new(keypoints)
}

/// Run the estimator over every frame image in order.
///
/// A frame whose image cannot be decoded becomes an absent pose and its
/// index is recorded, so the sequence keeps one entry per sampled frame.
/// Estimator failures abort the sequence.
pub async fn build_sequence(
    estimator: Arc<dyn PoseEstimator>,
    frames: &[PathBuf],
    min_pose_score: f32,
    video: VideoSlot,
) -> Result<PoseSequence, CompareError> {
    let mut sequence = PoseSequence::new(Vec::with_capacity(frames.len()));

    for (index, path) in frames.iter().enumerate() {
        let image = match formscore_image::load_rgb(path).await {
            Ok(image) => image,
            Err(e) => {
                log::warn!(
                    "{video}: frame {index} ({}) unreadable, treating as no pose: {e}",
                    path.display()
                );
                sequence.frames.push(None);
                sequence.unreadable_frames.push(index);
                continue;
            }
        };

        let estimator = estimator.clone();
        // the decoded frame is dropped inside the task whether or not estimation succeeds
        let raw = tokio::task::spawn_blocking(move || estimator.estimate(&image, false))
            .await?
            .map_err(|source| CompareError::Estimation {
                video,
                frame: index,
                source,
            })?;

        sequence
            .frames
            .push(raw.map(|keypoints| filter_pose(&keypoints, min_pose_score)));
    }

    Ok(sequence)
}
