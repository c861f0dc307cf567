use formscore_compare::{compute_bounds, normalize, Keypoint, Pose, PoseSequence};

fn kp(name: &str, x: f32, y: f32, score: f32) -> Option<Keypoint> {
    Some(Keypoint::new(name, x, y, score))
}

#[test]
fn test_single_point_maps_to_origin() {
    let sequence = PoseSequence::new(vec![
        None,
        Some(Pose::new(vec![None, kp("nose", 120.0, 45.0, 0.8), None])),
    ]);

    let normalized = normalize(sequence);
    let pose = normalized.frames[1].as_ref().unwrap();
    let nose = pose.keypoints[1].as_ref().unwrap();
    assert_eq!((nose.x, nose.y), (0.0, 0.0));
    assert!(normalized.frames[0].is_none());
    assert!(pose.keypoints[0].is_none());
}

#[test]
fn test_coordinates_scale_into_unit_square() {
    let sequence = PoseSequence::new(vec![
        Some(Pose::new(vec![kp("a", 100.0, 200.0, 0.9), kp("b", 300.0, 250.0, 0.6)])),
        Some(Pose::new(vec![kp("a", 200.0, 300.0, 0.7), None])),
    ]);

    let normalized = normalize(sequence);
    let first = normalized.frames[0].as_ref().unwrap();
    let second = normalized.frames[1].as_ref().unwrap();

    let b = first.keypoints[1].as_ref().unwrap();
    assert_eq!((b.x, b.y), (1.0, 0.5));
    assert_eq!(b.name, "b");
    assert_eq!(b.score, 0.6);

    let a = second.keypoints[0].as_ref().unwrap();
    assert_eq!((a.x, a.y), (0.5, 1.0));
    assert!(second.keypoints[1].is_none());
}

#[test]
fn test_zero_width_keeps_height_scaling() {
    // vertical line: width 0 is guarded, height 10 is used as-is
    let sequence = PoseSequence::new(vec![Some(Pose::new(vec![
        kp("a", 5.0, 0.0, 0.9),
        kp("b", 5.0, 10.0, 0.9),
    ]))]);

    let normalized = normalize(sequence);
    let pose = normalized.frames[0].as_ref().unwrap();
    let b = pose.keypoints[1].as_ref().unwrap();
    assert_eq!((b.x, b.y), (0.0, 1.0));
}

#[test]
fn test_no_valid_keypoints_makes_every_frame_absent() {
    let mut sequence = PoseSequence::new(vec![
        Some(Pose::new(vec![None, None])),
        None,
        Some(Pose::new(vec![None])),
    ]);
    sequence.unreadable_frames = vec![1];

    assert!(compute_bounds(&sequence).is_none());
    let normalized = normalize(sequence);
    assert_eq!(normalized.frames, vec![None, None, None]);
    assert_eq!(normalized.unreadable_frames, vec![1]);
}

#[test]
fn test_empty_sequence_stays_empty() {
    let normalized = normalize(PoseSequence::default());
    assert!(normalized.is_empty());
}
