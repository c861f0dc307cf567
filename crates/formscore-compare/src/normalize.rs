use crate::types::{Bounds, PoseSequence};

/// Bounding box over every valid keypoint of every frame, or `None` when
/// the sequence has no valid keypoint at all.
pub fn compute_bounds(sequence: &PoseSequence) -> Option<Bounds> {
    sequence
        .frames
        .iter()
        .flatten()
        .flat_map(|pose| pose.valid_keypoints())
        .fold(None, |bounds: Option<Bounds>, kp| {
            Some(match bounds {
                None => Bounds {
                    x_min: kp.x,
                    x_max: kp.x,
                    y_min: kp.y,
                    y_max: kp.y,
                },
                Some(b) => Bounds {
                    x_min: b.x_min.min(kp.x),
                    x_max: b.x_max.max(kp.x),
                    y_min: b.y_min.min(kp.y),
                    y_max: b.y_max.max(kp.y),
                },
            })
        })
}

// zero extent divides by one, so a single point lands on the origin
fn extent(span: f32) -> f32 {
    if span == 0.0 { 1.0 } else { span }
}

/// Rescale a whole sequence into its own unit square.
///
/// Bounds are global to the sequence, so every frame shares one origin and
/// scale. Names, scores and empty slots are preserved. With no valid
/// keypoints anywhere every frame becomes absent.
pub fn normalize(sequence: PoseSequence) -> PoseSequence {
    let Some(bounds) = compute_bounds(&sequence) else {
        return PoseSequence {
            frames: vec![None; sequence.len()],
            unreadable_frames: sequence.unreadable_frames,
        };
    };

    let width = extent(bounds.width());
    let height = extent(bounds.height());

    let PoseSequence {
        mut frames,
        unreadable_frames,
    } = sequence;
    for kp in frames
        .iter_mut()
        .flatten()
        .flat_map(|pose| pose.keypoints.iter_mut().flatten())
    {
        kp.x = (kp.x - bounds.x_min) / width;
        kp.y = (kp.y - bounds.y_min) / height;
    }

    PoseSequence {
        frames,
        unreadable_frames,
    }
}
