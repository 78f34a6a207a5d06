//! Built-in demo capture: a synthetic 120-frame walk cycle over 17 joints.
//!
//! Deterministic; used at session start and by "reset to sample".

use std::f64::consts::PI;

use crate::data::{Capture, CaptureInfo, Frame, JointPose};
use crate::rotation::RotationKind;

pub const SAMPLE_FRAME_COUNT: usize = 120;
pub const SAMPLE_ID: &str = "sample-001";
pub const SAMPLE_NAME: &str = "Sample Walking Motion";

/// Seconds between sample timestamps (display only).
const SAMPLE_TIMESTAMP_STEP: f64 = 0.033;
/// Phase advance per frame.
const SAMPLE_PHASE_STEP: f64 = 0.05;

fn joint(kind: RotationKind, position: [f64; 3], rotations: &[f64]) -> JointPose {
    let arity = rotations.len();
    let position = position.map(|v| v as f32);
    let rotations = rotations.iter().map(|v| *v as f32).collect();
    JointPose::new(position, kind, Some(rotations))
        .and_then(|p| p.with_torques(vec![0.0; arity]))
        .expect("sample joint kinds match their rotation arity")
        .with_reaction_force(0.0)
}

fn sample_frame(index: usize) -> Frame {
    use RotationKind::{EulerX, EulerXyz, EulerZyx};

    let t = index as f64 * SAMPLE_PHASE_STEP;
    let s = f64::sin;
    let timestamp = (index as f64 * SAMPLE_TIMESTAMP_STEP) as f32;

    Frame::new(timestamp)
        .with_joint(
            "Root",
            joint(
                EulerXyz,
                [s(t) * 0.2, 0.9 + s(t * 2.0) * 0.05, index as f64 * 0.01],
                &[0.0, s(t) * 0.1, 0.0],
            ),
        )
        .with_joint("Left_hip", joint(EulerXyz, [-0.1, 0.7, 0.0], &[s(t) * 0.4, 0.0, 0.0]))
        .with_joint("Left_knee", joint(EulerX, [-0.12, 0.4, 0.0], &[s(t + 2.0) * 0.7]))
        .with_joint(
            "Left_ankle",
            joint(EulerXyz, [-0.12, 0.05, s(t) * 0.1], &[s(t) * 0.2, 0.0, 0.0]),
        )
        .with_joint(
            "Right_hip",
            joint(EulerXyz, [0.1, 0.7, 0.0], &[s(t + PI) * 0.4, 0.0, 0.0]),
        )
        .with_joint(
            "Right_knee",
            joint(EulerX, [0.12, 0.4, 0.0], &[s(t + PI + 2.0) * 0.7]),
        )
        .with_joint(
            "Right_ankle",
            joint(EulerXyz, [0.12, 0.05, s(t + PI) * 0.1], &[s(t + PI) * 0.2, 0.0, 0.0]),
        )
        .with_joint("Spine1", joint(EulerXyz, [0.0, 1.1, 0.0], &[s(t * 2.0) * 0.05, 0.0, 0.0]))
        .with_joint("Spine2", joint(EulerXyz, [0.0, 1.3, 0.0], &[s(t * 2.0) * 0.03, 0.0, 0.0]))
        .with_joint("Neck", joint(EulerXyz, [0.0, 1.5, 0.0], &[s(t * 1.5) * 0.05, 0.0, 0.0]))
        .with_joint(
            "Head",
            joint(EulerXyz, [0.0, 1.65, 0.0], &[s(t * 1.2) * 0.05, s(t) * 0.05, 0.0]),
        )
        .with_joint(
            "Left_shoulder",
            joint(EulerXyz, [-0.2, 1.4, 0.0], &[0.0, 0.0, s(t + 1.0) * 0.1]),
        )
        .with_joint("Left_elbow", joint(EulerX, [-0.4, 1.2, 0.0], &[s(t + 0.5) * 0.5]))
        .with_joint(
            "Left_wrist",
            joint(EulerZyx, [-0.5, 0.9, s(t) * 0.1], &[0.0, 0.0, s(t) * 0.1]),
        )
        .with_joint(
            "Right_shoulder",
            joint(EulerXyz, [0.2, 1.4, 0.0], &[0.0, 0.0, s(t + PI + 1.0) * 0.1]),
        )
        .with_joint(
            "Right_elbow",
            joint(EulerX, [0.4, 1.2, 0.0], &[s(t + PI + 0.5) * 0.5]),
        )
        .with_joint(
            "Right_wrist",
            joint(EulerZyx, [0.5, 0.7, s(t + PI) * 0.1], &[0.0, 0.0, s(t + PI) * 0.1]),
        )
}

/// Generate the demo capture.
pub fn sample_capture() -> Capture {
    let frames = (0..SAMPLE_FRAME_COUNT).map(sample_frame).collect();
    let info = CaptureInfo {
        id: Some(SAMPLE_ID.into()),
        name: Some(SAMPLE_NAME.into()),
        description: Some("Computer-generated walking motion for demonstration".into()),
        capture_date: Some("2025-04-18".into()),
        metadata: None,
    };
    Capture::with_info(info, frames).expect("sample capture is non-empty")
}
