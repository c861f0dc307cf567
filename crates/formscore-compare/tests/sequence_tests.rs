mod common;

use common::{triangle, write_png, ColorEstimator, BLUE, RED};
use formscore_compare::{build_sequence, filter_pose, CompareError, VideoSlot};
use formscore_infer::{PoseEstimator, RawKeypoint};
use std::sync::Arc;

#[test]
fn test_filter_pose_nulls_low_scores() {
    let raw = vec![
        RawKeypoint { name: "nose", x: 1.0, y: 2.0, score: 0.9 },
        RawKeypoint { name: "left_eye", x: 3.0, y: 4.0, score: 0.1 },
        RawKeypoint { name: "right_eye", x: 5.0, y: 6.0, score: 0.3 },
    ];
    let pose = filter_pose(&raw, 0.3);

    assert_eq!(pose.keypoints.len(), 3);
    assert_eq!(pose.keypoints[0].as_ref().unwrap().name, "nose");
    assert!(pose.keypoints[1].is_none());
    // the floor is inclusive
    assert_eq!(pose.keypoints[2].as_ref().unwrap().x, 5.0);
}

#[tokio::test]
async fn test_sequence_keeps_frame_order_and_absences() {
    let dir = tempfile::tempdir().unwrap();
    let frames: Vec<_> = [RED, BLUE, RED]
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let path = dir.path().join(format!("frame_{:06}.png", i + 1));
            write_png(&path, *color);
            path
        })
        .collect();

    let estimator = Arc::new(ColorEstimator::new().with_pose(RED, triangle(0.9)).with_pose(BLUE, None));
    let sequence = build_sequence(estimator.clone(), &frames, 0.3, VideoSlot::A)
        .await
        .unwrap();

    assert_eq!(sequence.len(), 3);
    assert!(sequence.frames[0].is_some());
    assert!(sequence.frames[1].is_none());
    assert!(sequence.frames[2].is_some());
    assert!(sequence.unreadable_frames.is_empty());
    assert_eq!(estimator.calls(), 3);
}

#[tokio::test]
async fn test_low_confidence_pose_keeps_empty_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame_000001.png");
    write_png(&path, RED);

    let estimator: Arc<dyn PoseEstimator> = Arc::new(ColorEstimator::new().with_pose(RED, triangle(0.1)));
    let sequence = build_sequence(estimator, &[path], 0.3, VideoSlot::B).await.unwrap();

    let pose = sequence.frames[0].as_ref().unwrap();
    assert_eq!(pose.keypoints, vec![None, None, None]);
    assert_eq!(sequence.detected_frames(), 0);
}

#[tokio::test]
async fn test_undecodable_frame_becomes_absent() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("frame_000001.png");
    let bad = dir.path().join("frame_000002.png");
    let missing = dir.path().join("frame_000003.png");
    write_png(&good, RED);
    std::fs::write(&bad, b"truncated").unwrap();

    let estimator = Arc::new(ColorEstimator::new().with_pose(RED, triangle(0.9)));
    let sequence = build_sequence(
        estimator.clone(),
        &[good, bad, missing],
        0.3,
        VideoSlot::A,
    )
    .await
    .unwrap();

    assert_eq!(sequence.len(), 3);
    assert!(sequence.frames[0].is_some());
    assert!(sequence.frames[1].is_none());
    assert!(sequence.frames[2].is_none());
    assert_eq!(sequence.unreadable_frames, vec![1, 2]);
    assert_eq!(estimator.calls(), 1);
}

#[tokio::test]
async fn test_estimator_failure_names_video_and_frame() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("frame_000001.png");
    let second = dir.path().join("frame_000002.png");
    write_png(&first, RED);
    write_png(&second, BLUE);

    // no answer registered for blue, so the mock fails on frame 1
    let estimator = Arc::new(ColorEstimator::new().with_pose(RED, triangle(0.9)));
    let result = build_sequence(estimator, &[first, second], 0.3, VideoSlot::B).await;

    match result {
        Err(CompareError::Estimation { video, frame, .. }) => {
            assert_eq!(video, VideoSlot::B);
            assert_eq!(frame, 1);
        }
        other => panic!("Expected Estimation error, got {:?}", other),
    }
}
