//! Plain-text description of the current playback position, used as the
//! "data context" an analysis assistant receives alongside a question.
//!
//! Values come from the raw captured frames (not the interpolated pose).
//! Velocity and acceleration are finite differences per frame.

use std::fmt::Write;

use crate::data::{Capture, JointPose};

fn fmt_vec3(out: &mut String, label: &str, v: [f32; 3]) {
    let _ = writeln!(
        out,
        "- {label}: x={:.2}, y={:.2}, z={:.2}",
        v[0], v[1], v[2]
    );
}

#[inline]
fn sub3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn joint_at<'a>(capture: &'a Capture, index: usize, joint: &str) -> Option<&'a JointPose> {
    capture.frame(index)?.joint(joint)
}

/// Build the context string for `frame_index`/`sub_frame`, focusing on
/// `selected` when given, otherwise summarizing the first `joint_limit` joints.
pub fn describe(
    capture: &Capture,
    frame_index: usize,
    sub_frame: f32,
    selected: Option<&str>,
    joint_limit: usize,
) -> String {
    let mut out = String::from("Motion data analysis context:\n");
    let _ = writeln!(out, "- Total frames: {}", capture.frame_count());
    let _ = writeln!(
        out,
        "- Current frame: {frame_index} (subframe position: {sub_frame:.2})"
    );
    out.push_str("- Capture type: Motion capture data\n");

    let Some(frame) = capture.frame(frame_index) else {
        out.push_str("\nFrame data not available.\n");
        return out;
    };

    match selected {
        Some(name) => {
            if let Some(joint) = frame.joint(name) {
                describe_joint(&mut out, capture, frame_index, name, joint);
            }
        }
        None => {
            out.push_str("\n## Summary of Key Joints\n");
            for (name, joint) in frame.joints.iter().take(joint_limit) {
                let _ = writeln!(out, "### {name} Joint");
                fmt_vec3(&mut out, "Position", joint.position());
                if let Some([x, y, z, ..]) = joint.velocity() {
                    fmt_vec3(&mut out, "Velocity", [*x, *y, *z]);
                }
            }
            if frame.joints.len() > joint_limit {
                let _ = writeln!(
                    out,
                    "\n*Note: Data for {} additional joints is available but not shown here for brevity.*",
                    frame.joints.len() - joint_limit
                );
            }
            if let Some(analysis) = &frame.motion_analysis {
                out.push_str("\n## Motion Analysis\n");
                for (key, value) in analysis {
                    match value {
                        serde_json::Value::String(s) => {
                            let _ = writeln!(out, "- {key}: {s}");
                        }
                        other => {
                            let _ = writeln!(out, "- {key}: {other}");
                        }
                    }
                }
            }
        }
    }
    out
}

fn describe_joint(
    out: &mut String,
    capture: &Capture,
    frame_index: usize,
    name: &str,
    joint: &JointPose,
) {
    let position = joint.position();
    let _ = writeln!(out, "\nSelected joint: {name}");
    fmt_vec3(out, "Position", position);
    let _ = writeln!(out, "- Rotation type: {}", joint.kind());

    let prev = frame_index
        .checked_sub(1)
        .and_then(|i| joint_at(capture, i, name));
    if let Some(prev) = prev {
        let velocity = sub3(position, prev.position());
        let speed = (velocity[0].powi(2) + velocity[1].powi(2) + velocity[2].powi(2)).sqrt();
        fmt_vec3(out, "Velocity", velocity);
        let _ = writeln!(out, "- Speed: {speed:.2} units per frame");

        let prev_prev = frame_index
            .checked_sub(2)
            .and_then(|i| joint_at(capture, i, name));
        if let Some(prev_prev) = prev_prev {
            let prev_velocity = sub3(prev.position(), prev_prev.position());
            fmt_vec3(out, "Acceleration", sub3(velocity, prev_velocity));
        }
    }

    if let Some(parent) = joint.parent_joint() {
        let _ = writeln!(out, "- Parent joint: {parent}");
    }
    if let Some(children) = joint.child_joints().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "- Child joints: {}", children.join(", "));
    }
}
