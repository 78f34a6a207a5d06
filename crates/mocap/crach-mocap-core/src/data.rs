//! Capture data model: Capture → Frame → JointPose.
//!
//! Serde shapes follow the capture file format (`mocap_data`, `joint_data`,
//! `type`, `reaction_forces`) so a frame can be handed back to a host as-is.
//! Deserialization goes through raw shapes and the same validating
//! constructors used by Rust callers.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CaptureError;
use crate::rotation::RotationKind;

/// One joint's sampled state within a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJointPose")]
pub struct JointPose {
    position: [f32; 3],
    #[serde(rename = "type")]
    kind: RotationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotations: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    torques: Option<Vec<f32>>,
    #[serde(rename = "reaction_forces", skip_serializing_if = "Option::is_none")]
    reaction_force: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    velocity: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    acceleration: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_joint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    child_joints: Option<Vec<String>>,
}

impl JointPose {
    /// Build a pose, checking the rotation component count against `kind`.
    pub fn new(
        position: [f32; 3],
        kind: RotationKind,
        rotations: Option<Vec<f32>>,
    ) -> Result<Self, CaptureError> {
        if let Some(r) = &rotations {
            if !kind.accepts(r.len()) {
                return Err(CaptureError::malformed(format!(
                    "rotation type '{kind}' expects {} components, got {}",
                    kind.arity().unwrap_or_default(),
                    r.len()
                )));
            }
        }
        Ok(Self {
            position,
            kind,
            rotations,
            torques: None,
            reaction_force: None,
            velocity: None,
            acceleration: None,
            parent_joint: None,
            child_joints: None,
        })
    }

    /// Attach torques. Their count must match the rotation components.
    pub fn with_torques(mut self, torques: Vec<f32>) -> Result<Self, CaptureError> {
        let expected = match &self.rotations {
            Some(r) => Some(r.len()),
            None => self.kind.arity(),
        };
        if let Some(n) = expected {
            if torques.len() != n {
                return Err(CaptureError::malformed(format!(
                    "torques must have {n} components for rotation type '{}', got {}",
                    self.kind,
                    torques.len()
                )));
            }
        }
        self.torques = Some(torques);
        Ok(self)
    }

    pub fn with_reaction_force(mut self, force: f32) -> Self {
        self.reaction_force = Some(force);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec<f32>) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec<f32>) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    pub fn with_hierarchy(mut self, parent: Option<String>, children: Option<Vec<String>>) -> Self {
        self.parent_joint = parent;
        self.child_joints = children;
        self
    }

    #[inline]
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    #[inline]
    pub fn kind(&self) -> &RotationKind {
        &self.kind
    }

    #[inline]
    pub fn rotations(&self) -> Option<&[f32]> {
        self.rotations.as_deref()
    }

    #[inline]
    pub fn torques(&self) -> Option<&[f32]> {
        self.torques.as_deref()
    }

    #[inline]
    pub fn reaction_force(&self) -> Option<f32> {
        self.reaction_force
    }

    #[inline]
    pub fn velocity(&self) -> Option<&[f32]> {
        self.velocity.as_deref()
    }

    #[inline]
    pub fn acceleration(&self) -> Option<&[f32]> {
        self.acceleration.as_deref()
    }

    #[inline]
    pub fn parent_joint(&self) -> Option<&str> {
        self.parent_joint.as_deref()
    }

    #[inline]
    pub fn child_joints(&self) -> Option<&[String]> {
        self.child_joints.as_deref()
    }

    /// Assemble a blended pose. Callers guarantee the optional vectors came
    /// from a validated pose of the same kind.
    pub(crate) fn blended(
        template: &JointPose,
        position: [f32; 3],
        rotations: Option<Vec<f32>>,
        torques: Option<Vec<f32>>,
        reaction_force: Option<f32>,
        velocity: Option<Vec<f32>>,
        acceleration: Option<Vec<f32>>,
    ) -> Self {
        Self {
            position,
            kind: template.kind.clone(),
            rotations,
            torques,
            reaction_force,
            velocity,
            acceleration,
            parent_joint: template.parent_joint.clone(),
            child_joints: template.child_joints.clone(),
        }
    }
}

/// Frame-level analysis annotations carried from the file (opaque to the engine).
pub type MotionAnalysis = IndexMap<String, serde_json::Value>;

/// One sampled instant: timestamp plus joint poses keyed by joint name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds; display-only. Files store it as a numeric string.
    #[serde(serialize_with = "ser_timestamp", deserialize_with = "de_timestamp")]
    pub timestamp: f32,
    /// Joint poses in file order.
    #[serde(rename = "joint_data")]
    pub joints: IndexMap<String, JointPose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_analysis: Option<MotionAnalysis>,
}

impl Frame {
    pub fn new(timestamp: f32) -> Self {
        Self {
            timestamp,
            joints: IndexMap::new(),
            motion_analysis: None,
        }
    }

    pub fn with_joint(mut self, name: impl Into<String>, pose: JointPose) -> Self {
        self.joints.insert(name.into(), pose);
        self
    }

    #[inline]
    pub fn joint(&self, name: &str) -> Option<&JointPose> {
        self.joints.get(name)
    }
}

/// Descriptive fields of a capture file (unused by playback, preserved).
///
/// A text field holding a non-string value is dropped rather than failing
/// the whole capture.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureInfo {
    #[serde(
        default,
        deserialize_with = "de_lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub capture_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A loaded recording: non-empty, immutable sequence of frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCapture")]
pub struct Capture {
    #[serde(flatten)]
    info: CaptureInfo,
    #[serde(rename = "mocap_data")]
    frames: Vec<Frame>,
}

impl Capture {
    pub fn new(frames: Vec<Frame>) -> Result<Self, CaptureError> {
        Self::with_info(CaptureInfo::default(), frames)
    }

    pub fn with_info(info: CaptureInfo, frames: Vec<Frame>) -> Result<Self, CaptureError> {
        if frames.is_empty() {
            return Err(CaptureError::malformed("capture must contain at least one frame"));
        }
        Ok(Self { info, frames })
    }

    #[inline]
    pub fn info(&self) -> &CaptureInfo {
        &self.info
    }

    /// Always ≥ 1.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Direct frame access. No clamping or wraparound.
    #[inline]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Frame at `index mod frame_count`.
    #[inline]
    pub fn frame_wrapped(&self, index: usize) -> &Frame {
        &self.frames[index % self.frames.len()]
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Joint names of the first frame, in file order.
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.frames[0].joints.keys().map(String::as_str)
    }

    pub fn has_joint(&self, name: &str) -> bool {
        self.frames[0].joints.contains_key(name)
    }
}

// ----- serde raw shapes -----

#[derive(Deserialize)]
struct RawJointPose {
    position: Vec<f32>,
    #[serde(rename = "type")]
    kind: RotationKind,
    #[serde(default)]
    rotations: Option<Vec<f32>>,
    #[serde(default)]
    torques: Option<Vec<f32>>,
    #[serde(default)]
    reaction_forces: Option<f32>,
    #[serde(default)]
    velocity: Option<Vec<f32>>,
    #[serde(default)]
    acceleration: Option<Vec<f32>>,
    #[serde(default)]
    parent_joint: Option<String>,
    #[serde(default)]
    child_joints: Option<Vec<String>>,
}

impl TryFrom<RawJointPose> for JointPose {
    type Error = CaptureError;

    fn try_from(raw: RawJointPose) -> Result<Self, Self::Error> {
        let position = match raw.position.as_slice() {
            [x, y, z, ..] => [*x, *y, *z],
            short => {
                return Err(CaptureError::malformed(format!(
                    "position needs at least 3 components, got {}",
                    short.len()
                )))
            }
        };
        let mut pose = JointPose::new(position, raw.kind, raw.rotations)?;
        if let Some(torques) = raw.torques {
            pose = pose.with_torques(torques)?;
        }
        pose.reaction_force = raw.reaction_forces;
        pose.velocity = raw.velocity;
        pose.acceleration = raw.acceleration;
        pose.parent_joint = raw.parent_joint;
        pose.child_joints = raw.child_joints;
        Ok(pose)
    }
}

#[derive(Deserialize)]
struct RawCapture {
    #[serde(flatten)]
    info: CaptureInfo,
    mocap_data: Vec<Frame>,
}

impl TryFrom<RawCapture> for Capture {
    type Error = CaptureError;

    fn try_from(raw: RawCapture) -> Result<Self, Self::Error> {
        Capture::with_info(raw.info, raw.mocap_data)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Number(f64),
    Text(String),
}

fn de_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Number(n) => Ok(n as f32),
        RawTimestamp::Text(s) => s.trim().parse::<f32>().map_err(|_| {
            serde::de::Error::custom(format!("timestamp '{s}' is not a number"))
        }),
    }
}

fn de_lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Null => Ok(None),
        other => {
            log::warn!("capture info: ignoring non-text value {other}");
            Ok(None)
        }
    }
}

fn ser_timestamp<S: Serializer>(timestamp: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pose_rejects_rotation_cardinality_mismatch() {
        let err = JointPose::new([0.0; 3], RotationKind::EulerX, Some(vec![0.0, 1.0, 2.0]));
        assert!(err.is_err());
        let ok = JointPose::new([0.0; 3], RotationKind::EulerZyx, Some(vec![0.0, 1.0, 2.0]));
        assert!(ok.is_ok());
    }

    #[test]
    fn pose_rejects_torque_cardinality_mismatch() {
        let pose = JointPose::new([0.0; 3], RotationKind::EulerXyz, Some(vec![0.0; 3])).unwrap();
        assert!(pose.clone().with_torques(vec![0.0]).is_err());
        assert!(pose.with_torques(vec![0.0; 3]).is_ok());
    }

    #[test]
    fn empty_capture_is_rejected() {
        assert!(Capture::new(Vec::new()).is_err());
    }

    #[test]
    fn frame_access_does_not_clamp_but_wrapped_access_wraps() {
        let capture = Capture::new(vec![Frame::new(0.0), Frame::new(1.0)]).unwrap();
        assert!(capture.frame(2).is_none());
        assert_eq!(capture.frame_wrapped(3).timestamp, 1.0);
    }

    #[test]
    fn deserializes_file_shape_and_keeps_joint_order() {
        let doc = json!({
            "name": "walk",
            "mocap_data": [{
                "timestamp": "0.5",
                "joint_data": {
                    "Zeta": { "position": [1, 2, 3, 9], "type": "euler_x", "rotations": [0.1] },
                    "Alpha": { "position": [0, 0, 0], "type": "euler_xyz",
                               "rotations": [0, 0, 0], "torques": [1, 2, 3], "reaction_forces": 4.5 }
                }
            }],
            "frame_data": []
        });
        let capture: Capture = serde_json::from_value(doc).unwrap();
        assert_eq!(capture.info().name.as_deref(), Some("walk"));
        let names: Vec<&str> = capture.joint_names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        let frame = capture.frame(0).unwrap();
        assert_eq!(frame.timestamp, 0.5);
        assert_eq!(frame.joint("Zeta").unwrap().position(), [1.0, 2.0, 3.0]);
        assert_eq!(frame.joint("Alpha").unwrap().reaction_force(), Some(4.5));
    }

    #[test]
    fn serializes_back_to_file_shape() {
        let pose = JointPose::new([1.0, 0.0, 0.0], RotationKind::EulerX, Some(vec![0.25]))
            .unwrap()
            .with_reaction_force(2.0);
        let frame = Frame::new(0.25).with_joint("Root", pose);
        let v = serde_json::to_value(&frame).unwrap();
        assert_eq!(v["timestamp"], json!("0.25"));
        assert_eq!(v["joint_data"]["Root"]["type"], json!("euler_x"));
        assert_eq!(v["joint_data"]["Root"]["reaction_forces"], json!(2.0));
        assert!(v["joint_data"]["Root"].get("torques").is_none());
    }

    #[test]
    fn non_numeric_timestamp_is_rejected() {
        let doc = json!({ "timestamp": "noon", "joint_data": {} });
        assert!(serde_json::from_value::<Frame>(doc).is_err());
    }
}
