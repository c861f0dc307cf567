use crate::config::CompareConfig;
use crate::normalize::normalize;
use crate::score::{round_score, score};
use crate::sequence::build_sequence;
use crate::types::{PoseSequence, SimilarityResult};
use crate::{CompareError, VideoSlot};
use formscore_infer::PoseEstimator;
use formscore_video::FrameExtractor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Extract, estimate and normalize one video.
///
/// The frame directory is removed before this returns, on every path.
pub async fn process_video(
    estimator: Arc<dyn PoseEstimator>,
    extractor: &FrameExtractor,
    video: &Path,
    slot: VideoSlot,
    config: &CompareConfig,
) -> Result<PoseSequence, CompareError> {
    let frames = extractor
        .extract(video, config.frame_rate, config.max_frames)
        .await
        .map_err(|source| CompareError::Extraction {
            video: slot,
            source,
        })?;

    let sequence =
        build_sequence(estimator, frames.frames(), config.min_pose_score, slot).await?;
    drop(frames);

    log::debug!(
        "{slot}: {} frames, {} with a pose, {} unreadable",
        sequence.len(),
        sequence.detected_frames(),
        sequence.unreadable_frames.len()
    );
    Ok(normalize(sequence))
}

/// Compare two videos using the given estimator.
///
/// The configuration is validated before any file or process is touched.
/// Both videos are processed concurrently; the first failure cancels the
/// other video's work.
pub async fn compare_with(
    estimator: Arc<dyn PoseEstimator>,
    video_a: impl AsRef<Path>,
    video_b: impl AsRef<Path>,
    config: &CompareConfig,
) -> Result<SimilarityResult, CompareError> {
    config.validate()?;
    let (video_a, video_b) = (video_a.as_ref(), video_b.as_ref());

    let run = async {
        let start = Instant::now();
        let extractor = FrameExtractor::new(config.extractor_config());
        let (sequence_a, sequence_b) = tokio::try_join!(
            process_video(estimator.clone(), &extractor, video_a, VideoSlot::A, config),
            process_video(estimator.clone(), &extractor, video_b, VideoSlot::B, config)
        )?;

        let summary = score(&sequence_a, &sequence_b);
        let result = SimilarityResult {
            score: round_score(summary.score),
            compared_frames: summary.compared_frames,
            matched_frames: summary.matched_frames,
            frame_rate: config.frame_rate,
            min_pose_score: config.min_pose_score,
        };
        log::info!(
            "{} vs {}: score {:.2} ({} of {} frames matched) in {:.2}s",
            video_a.display(),
            video_b.display(),
            result.score,
            result.matched_frames,
            result.compared_frames,
            start.elapsed().as_secs_f64()
        );
        Ok::<_, CompareError>(result)
    };

    match config.compare_timeout {
        Some(limit) => tokio::time::timeout(limit, run)
            .await
            .map_err(|_| CompareError::Timeout(limit))?,
        None => run.await,
    }
}

/// Compare two videos with the process-wide pose detector.
///
/// The detector is created from `config.detector` on the first call in the
/// process. Later calls reuse it and ignore their own detector options.
pub async fn compare_videos_detailed(
    video_a: impl AsRef<Path>,
    video_b: impl AsRef<Path>,
    config: &CompareConfig,
) -> Result<SimilarityResult, CompareError> {
    config.validate()?;
    let estimator = formscore_infer::shared_detector(&config.detector)
        .await
        .map_err(CompareError::Detector)?;
    compare_with(estimator, video_a, video_b, config).await
}

/// Like [`compare_videos_detailed`], returning only the score.
pub async fn compare_videos(
    video_a: impl AsRef<Path>,
    video_b: impl AsRef<Path>,
    config: &CompareConfig,
) -> Result<f64, CompareError> {
    Ok(compare_videos_detailed(video_a, video_b, config)
        .await?
        .score)
}
