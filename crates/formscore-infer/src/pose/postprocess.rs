use crate::estimator::{KeypointIndex, RawKeypoint, COCO_KEYPOINT_COUNT};
use crate::InferError;
use formscore_base::Tensor;

use super::preprocess::LetterboxInfo;

/// Post-process single-pose MoveNet output
///
/// The model emits `[1, 1, 17, 3]` rows of `(y, x, score)` with coordinates
/// normalized to the square model input. Coordinates are mapped back to
/// source image pixels through `letterbox`; `flip_horizontal` mirrors x.
///
/// Returns `Ok(None)` when the mean keypoint score is below `min_pose_score`,
/// i.e. no person was detected.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    flip_horizontal: bool,
    min_pose_score: f32,
) -> Result<Option<Vec<RawKeypoint>>, InferError> {
    if output.shape != [1, 1, COCO_KEYPOINT_COUNT, 3] {
        return Err(InferError::ShapeMismatch {
            expected: format!("[1, 1, {}, 3]", COCO_KEYPOINT_COUNT),
            got: format!("{:?}", output.shape),
        });
    }

    let size = letterbox.input_size as f32;
    let mut keypoints = Vec::with_capacity(COCO_KEYPOINT_COUNT);
    let mut total_score = 0.0;

    for (kind, row) in KeypointIndex::ALL.iter().zip(output.data.chunks_exact(3)) {
        let (y, x, score) = (row[0], row[1], row[2]);

        let mut px = (x * size - letterbox.pad_x) / letterbox.scale;
        let py = (y * size - letterbox.pad_y) / letterbox.scale;
        if flip_horizontal {
            px = letterbox.source_width as f32 - 1.0 - px;
        }

        total_score += score;
        keypoints.push(RawKeypoint {
            name: kind.name(),
            x: px,
            y: py,
            score,
        });
    }

    let mean_score = total_score / COCO_KEYPOINT_COUNT as f32;
    if mean_score.is_nan() || mean_score < min_pose_score {
        return Ok(None);
    }
    Ok(Some(keypoints))
}
