use crate::types::{Keypoint, Pose, PoseSequence};
use std::f64::consts::SQRT_2;

/// Unrounded comparison of two normalized sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceScore {
    /// Mean frame similarity scaled to 0..=100.
    pub score: f64,
    pub compared_frames: usize,
    pub matched_frames: usize,
}

/// `1 - d / sqrt(2)` clamped at zero; sqrt(2) is the unit-square diagonal.
pub fn keypoint_similarity(a: &Keypoint, b: &Keypoint) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    let distance = dx.hypot(dy);
    (1.0 - distance / SQRT_2).max(0.0)
}

/// Mean similarity over slots valid in both poses, or `None` if there are none.
pub fn frame_similarity(a: &Pose, b: &Pose) -> Option<f64> {
    let (sum, count) = a
        .keypoints
        .iter()
        .zip(&b.keypoints)
        .filter_map(|pair| match pair {
            (Some(ka), Some(kb)) => Some(keypoint_similarity(ka, kb)),
            _ => None,
        })
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Compare two sequences frame by frame, by index.
///
/// Only the first `min(len(a), len(b))` frames are paired. Pairs where
/// either frame is absent, or that share no valid keypoint slot, are skipped
/// and do not count as matched.
pub fn score(a: &PoseSequence, b: &PoseSequence) -> SequenceScore {
    let compared_frames = a.len().min(b.len());

    let (total, matched_frames) = a
        .frames
        .iter()
        .zip(&b.frames)
        .filter_map(|pair| match pair {
            (Some(pa), Some(pb)) => frame_similarity(pa, pb),
            _ => None,
        })
        .fold((0.0, 0usize), |(total, matched), s| (total + s, matched + 1));

    let score = if matched_frames > 0 {
        total / matched_frames as f64 * 100.0
    } else {
        0.0
    };

    SequenceScore {
        score,
        compared_frames,
        matched_frames,
    }
}

/// Round to two decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
