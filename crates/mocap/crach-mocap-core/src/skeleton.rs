//! Skeleton topology and the pose hand-off to the renderer.
//!
//! Connectivity is a static table of (parent, child) joint names that lives
//! outside any capture. Joints without a matching entry are drawn unconnected.

use serde::{Deserialize, Serialize};

use crate::data::Frame;

/// Bones of the default humanoid, matching the sample capture's joint names.
pub const HUMANOID_CONNECTIONS: &[(&str, &str)] = &[
    ("Root", "Spine1"),
    ("Spine1", "Spine2"),
    ("Spine2", "Neck"),
    ("Neck", "Head"),
    ("Spine2", "Left_shoulder"),
    ("Left_shoulder", "Left_elbow"),
    ("Left_elbow", "Left_wrist"),
    ("Spine2", "Right_shoulder"),
    ("Right_shoulder", "Right_elbow"),
    ("Right_elbow", "Right_wrist"),
    ("Root", "Left_hip"),
    ("Left_hip", "Left_knee"),
    ("Left_knee", "Left_ankle"),
    ("Root", "Right_hip"),
    ("Right_hip", "Right_knee"),
    ("Right_knee", "Right_ankle"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub parent: String,
    pub child: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointConnections {
    pairs: Vec<Connection>,
}

impl JointConnections {
    pub fn new<P, C>(pairs: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(parent, child)| Connection {
                    parent: parent.into(),
                    child: child.into(),
                })
                .collect(),
        }
    }

    pub fn humanoid() -> Self {
        Self::new(HUMANOID_CONNECTIONS.iter().copied())
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.pairs.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for JointConnections {
    fn default() -> Self {
        Self::humanoid()
    }
}

/// One joint marker to draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointMarker {
    pub name: String,
    pub position: [f32; 3],
    pub highlighted: bool,
}

/// One connector between two present joints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub parent: String,
    pub child: String,
    pub start: [f32; 3],
    pub end: [f32; 3],
}

/// Everything the renderer needs for one displayed frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonPose {
    pub markers: Vec<JointMarker>,
    pub bones: Vec<Bone>,
}

#[inline]
fn scaled(p: [f32; 3], scale: f32) -> [f32; 3] {
    [p[0] * scale, p[1] * scale, p[2] * scale]
}

impl SkeletonPose {
    /// Markers in frame order; bones only where both endpoints exist in `frame`.
    pub fn resolve(
        frame: &Frame,
        connections: &JointConnections,
        scale: f32,
        highlighted: Option<&str>,
    ) -> Self {
        let markers = frame
            .joints
            .iter()
            .map(|(name, pose)| JointMarker {
                name: name.clone(),
                position: scaled(pose.position(), scale),
                highlighted: highlighted == Some(name.as_str()),
            })
            .collect();

        let bones = connections
            .iter()
            .filter_map(|c| {
                let start = frame.joint(&c.parent)?;
                let end = frame.joint(&c.child)?;
                Some(Bone {
                    parent: c.parent.clone(),
                    child: c.child.clone(),
                    start: scaled(start.position(), scale),
                    end: scaled(end.position(), scale),
                })
            })
            .collect();

        Self { markers, bones }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::JointPose;
    use crate::rotation::RotationKind;

    fn at(x: f32) -> JointPose {
        JointPose::new([x, 1.0, 0.0], RotationKind::EulerXyz, Some(vec![0.0; 3])).unwrap()
    }

    #[test]
    fn bones_need_both_endpoints() {
        let frame = Frame::new(0.0)
            .with_joint("Root", at(0.0))
            .with_joint("Spine1", at(1.0))
            .with_joint("Tail", at(2.0));
        let pose = SkeletonPose::resolve(&frame, &JointConnections::humanoid(), 1.0, None);
        assert_eq!(pose.markers.len(), 3);
        assert_eq!(pose.bones.len(), 1);
        assert_eq!(pose.bones[0].parent, "Root");
        assert_eq!(pose.bones[0].child, "Spine1");
    }

    #[test]
    fn scale_and_highlight_apply_to_markers_and_bones() {
        let frame = Frame::new(0.0)
            .with_joint("a", at(1.0))
            .with_joint("b", at(2.0));
        let connections = JointConnections::new([("a", "b")]);
        let pose = SkeletonPose::resolve(&frame, &connections, 2.0, Some("b"));
        assert_eq!(pose.markers[0].position, [2.0, 2.0, 0.0]);
        assert!(!pose.markers[0].highlighted);
        assert!(pose.markers[1].highlighted);
        assert_eq!(pose.bones[0].end, [4.0, 2.0, 0.0]);
    }

    #[test]
    fn humanoid_table_has_sixteen_bones() {
        assert_eq!(JointConnections::default().len(), 16);
    }
}
