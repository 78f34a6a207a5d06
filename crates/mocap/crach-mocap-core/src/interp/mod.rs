//! Sub-frame interpolation between captured frames.
//!
//! `interpolate(capture, i, t)` blends `frame[i mod n]` toward
//! `frame[(i + 1) mod n]`, so the last frame blends into the first and playback
//! loops without a seam. All components blend linearly; rotation angles get no
//! angular or shortest-path treatment.
//!
//! Joints missing from the next frame hold the current pose.

pub mod functions;

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::data::{Capture, Frame, JointPose};
use functions::{lerp_f32, lerp_optional, lerp_vec3};

/// Resolve `(frame_index, sub_frame)` into a concrete frame.
///
/// Returns the captured frame itself when `sub_frame` is 0 or the capture has a
/// single frame. `sub_frame` is clamped into `[0, 1]`; NaN counts as 0.
pub fn interpolate(capture: &Capture, frame_index: usize, sub_frame: f32) -> Cow<'_, Frame> {
    let n = capture.frame_count();
    let t = if sub_frame.is_nan() {
        0.0
    } else {
        sub_frame.clamp(0.0, 1.0)
    };
    let current = capture.frame_wrapped(frame_index);
    if n == 1 || t == 0.0 {
        return Cow::Borrowed(current);
    }
    let next = capture.frame_wrapped((frame_index % n) + 1);
    Cow::Owned(blend_frames(current, next, t))
}

/// Blend two frames; the joint set and order come from `current`.
pub fn blend_frames(current: &Frame, next: &Frame, t: f32) -> Frame {
    let mut joints = IndexMap::with_capacity(current.joints.len());
    for (name, pose) in &current.joints {
        let blended = match next.joints.get(name) {
            Some(other) => blend_pose(pose, other, t),
            None => {
                log::trace!("interp: joint '{name}' missing from next frame; holding current pose");
                pose.clone()
            }
        };
        joints.insert(name.clone(), blended);
    }
    Frame {
        timestamp: lerp_f32(current.timestamp, next.timestamp, t),
        joints,
        motion_analysis: current.motion_analysis.clone(),
    }
}

/// Blend one joint. Optional fields survive only when both poses carry them.
pub fn blend_pose(a: &JointPose, b: &JointPose, t: f32) -> JointPose {
    let reaction_force = match (a.reaction_force(), b.reaction_force()) {
        (Some(x), Some(y)) => Some(lerp_f32(x, y, t)),
        _ => None,
    };
    JointPose::blended(
        a,
        lerp_vec3(a.position(), b.position(), t),
        lerp_optional(a.rotations(), b.rotations(), t),
        lerp_optional(a.torques(), b.torques(), t),
        reaction_force,
        lerp_optional(a.velocity(), b.velocity(), t),
        lerp_optional(a.acceleration(), b.acceleration(), t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotationKind;

    fn pose(x: f32) -> JointPose {
        JointPose::new([x, 0.0, 0.0], RotationKind::EulerX, Some(vec![x]))
            .unwrap()
            .with_torques(vec![x * 10.0])
            .unwrap()
            .with_reaction_force(x)
    }

    fn capture(xs: &[f32]) -> Capture {
        let frames = xs
            .iter()
            .enumerate()
            .map(|(i, x)| Frame::new(i as f32).with_joint("Root", pose(*x)))
            .collect();
        Capture::new(frames).unwrap()
    }

    #[test]
    fn zero_sub_frame_borrows_the_captured_frame() {
        let c = capture(&[0.0, 1.0]);
        assert!(matches!(interpolate(&c, 1, 0.0), Cow::Borrowed(_)));
        assert!(matches!(interpolate(&c, 3, 0.0), Cow::Borrowed(f) if f.timestamp == 1.0));
    }

    #[test]
    fn single_frame_capture_never_blends() {
        let c = capture(&[5.0]);
        let f = interpolate(&c, 0, 0.7);
        assert!(matches!(f, Cow::Borrowed(_)));
        assert_eq!(f.joint("Root").unwrap().position(), [5.0, 0.0, 0.0]);
    }

    #[test]
    fn blends_every_optional_component() {
        let c = capture(&[0.0, 2.0]);
        let f = interpolate(&c, 0, 0.25);
        let root = f.joint("Root").unwrap();
        assert_eq!(f.timestamp, 0.25);
        assert_eq!(root.position(), [0.5, 0.0, 0.0]);
        assert_eq!(root.rotations(), Some(&[0.5][..]));
        assert_eq!(root.torques(), Some(&[5.0][..]));
        assert_eq!(root.reaction_force(), Some(0.5));
        assert_eq!(root.kind(), &RotationKind::EulerX);
    }

    #[test]
    fn optional_field_missing_on_one_side_is_omitted() {
        let a = JointPose::new([0.0; 3], RotationKind::EulerX, Some(vec![0.0]))
            .unwrap()
            .with_reaction_force(1.0);
        let b = JointPose::new([1.0; 3], RotationKind::EulerX, None).unwrap();
        let p = blend_pose(&a, &b, 0.5);
        assert!(p.rotations().is_none());
        assert!(p.reaction_force().is_none());
        assert_eq!(p.position(), [0.5; 3]);
    }

    #[test]
    fn sub_frame_out_of_range_is_clamped() {
        let c = capture(&[0.0, 1.0]);
        let f = interpolate(&c, 0, 3.0);
        assert_eq!(f.joint("Root").unwrap().position(), [1.0, 0.0, 0.0]);
        assert!(matches!(interpolate(&c, 0, f32::NAN), Cow::Borrowed(_)));
    }
}
