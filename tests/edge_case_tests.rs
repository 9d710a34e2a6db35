//! Edge case tests for malformed and degenerate frames


use kick_detection::{
    detector::KickDetector,
    limb::{LimbSide, Phase},
    pose::{Keypoint, KeypointName, PoseFrame},
};
use std::f64::consts::PI;
use test_helpers::{feed_leg, frame_with_deviations, warm_up, FRAME_MS};

#[test]
fn test_empty_frame_is_a_no_op() {
    let mut detector = KickDetector::default();
    for t in 0..10 {
        assert!(detector.detect(&PoseFrame::new(t * FRAME_MS)).is_empty());
    }
    for side in LimbSide::ALL {
        assert_eq!(detector.limb(side).baseline_value(), None);
    }
}

#[test]
fn test_non_finite_coordinates_are_ignored() {
    let mut detector = KickDetector::default();
    let extreme_values = vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

    for (i, value) in extreme_values.into_iter().enumerate() {
        let frame = PoseFrame::from_keypoints(
            i as u64 * FRAME_MS,
            vec![
                Keypoint::new(KeypointName::LeftHip, 300.0, 260.0, 0.9),
                Keypoint::new(KeypointName::LeftAnkle, value, 460.0, 0.9),
                Keypoint::new(KeypointName::RightHip, value, value, 0.9),
                Keypoint::new(KeypointName::RightAnkle, 340.0, 460.0, 0.9),
            ],
        )
        .unwrap();
        assert!(detector.detect(&frame).is_empty());
    }
    assert_eq!(detector.limb(LimbSide::Left).baseline_value(), None);
    assert_eq!(detector.limb(LimbSide::Right).baseline_value(), None);
}

#[test]
fn test_missing_nose_uses_screen_vertical() {
    let mut detector = KickDetector::default();
    let frame = PoseFrame::from_keypoints(
        0,
        vec![
            Keypoint::new(KeypointName::LeftHip, 300.0, 260.0, 0.9),
            Keypoint::new(KeypointName::LeftAnkle, 300.0, 460.0, 0.9),
        ],
    )
    .unwrap();
    detector.detect(&frame);

    let baseline = detector.limb(LimbSide::Left).baseline_value().unwrap();
    assert!(baseline.abs() < 1e-12, "straight leg under screen-vertical is zero deviation");
}

#[test]
fn test_dropout_mid_kick_resumes() {
    let mut detector = KickDetector::default();
    let mut clock = 0;
    warm_up(&mut detector, &mut clock, LimbSide::Left, 0.1);
    feed_leg(&mut detector, &mut clock, LimbSide::Left, &[0.6, 0.9]);
    assert_eq!(detector.limb(LimbSide::Left).phase(), Phase::Extended);

    // Ankle lost for a few frames
    for _ in 0..3 {
        assert!(detector.detect(&frame_with_deviations(clock, None, None)).is_empty());
        clock += FRAME_MS;
    }
    assert_eq!(detector.limb(LimbSide::Left).phase(), Phase::Extended);

    let events = feed_leg(&mut detector, &mut clock, LimbSide::Left, &[0.7]);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_timestamps_going_backwards_do_not_panic() {
    let mut detector = KickDetector::default();
    let mut clock = 10_000;
    warm_up(&mut detector, &mut clock, LimbSide::Right, 0.1);
    let events = feed_leg(&mut detector, &mut clock, LimbSide::Right, &[0.6, 0.9, 0.7]);
    assert_eq!(events.len(), 1);

    // A clock reset keeps the cooldown pending rather than wrapping
    let mut rewound = 0;
    let events = feed_leg(&mut detector, &mut rewound, LimbSide::Right, &[0.1, 0.6, 0.9, 0.7]);
    assert!(events.is_empty());
}

#[test]
fn test_legs_are_independent() {
    let mut detector = KickDetector::default();
    let mut clock = 0;
    warm_up(&mut detector, &mut clock, LimbSide::Left, 0.1);

    let right_before = detector.limb(LimbSide::Right).clone();
    feed_leg(&mut detector, &mut clock, LimbSide::Left, &[0.6, 0.9, 0.7]);
    assert_eq!(detector.limb(LimbSide::Right), &right_before);
}

#[test]
fn test_extreme_deviation_values() {
    let mut detector = KickDetector::default();
    let mut clock = 0;
    let in_range = |b: f64| (0.0..=PI + 1e-12).contains(&b);

    // Leg pointing straight up is the maximum possible deviation (π)
    let script = [
        (0.0, Phase::Waiting, false),
        (PI, Phase::Extended, false),
        (0.0, Phase::Retracting, true),
    ];
    for (deviation, phase, fires) in script {
        let events = feed_leg(&mut detector, &mut clock, LimbSide::Left, &[deviation]);
        assert_eq!(detector.limb(LimbSide::Left).phase(), phase);
        assert_eq!(events.len(), usize::from(fires));
        if fires {
            assert!((events[0].peak_deviation - PI).abs() < 1e-9);
        }
        assert!(in_range(detector.limb(LimbSide::Left).baseline_value().unwrap()));
    }

    // Outlast the cooldown, settle, then the same swing fires again
    let events = feed_leg(&mut detector, &mut clock, LimbSide::Left, &[0.0; 10]);
    assert!(events.is_empty());
    assert_eq!(detector.limb(LimbSide::Left).phase(), Phase::Waiting);

    let events = feed_leg(&mut detector, &mut clock, LimbSide::Left, &[PI, 0.0]);
    assert_eq!(events.len(), 1);
    assert!(in_range(detector.limb(LimbSide::Left).baseline_value().unwrap()));
}
