//! Rotation kind tags carried by each joint.
//!
//! The tag names how many angle components a joint stores and their axis order.
//! The engine never interprets the angles; unknown tags are kept verbatim.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// Single-axis rotation (`euler_x`).
    EulerX,
    /// Three-axis rotation, XYZ order (`euler_xyz`).
    EulerXyz,
    /// Three-axis rotation, ZYX order (`euler_zyx`).
    EulerZyx,
    /// Any other tag found in a capture file.
    Other(String),
}

impl RotationKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "euler_x" => Self::EulerX,
            "euler_xyz" => Self::EulerXyz,
            "euler_zyx" => Self::EulerZyx,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::EulerX => "euler_x",
            Self::EulerXyz => "euler_xyz",
            Self::EulerZyx => "euler_zyx",
            Self::Other(tag) => tag,
        }
    }

    /// Number of rotation components the tag prescribes. `None` for unknown tags.
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        match self {
            Self::EulerX => Some(1),
            Self::EulerXyz | Self::EulerZyx => Some(3),
            Self::Other(_) => None,
        }
    }

    /// Check a rotation component count against the tag.
    pub fn accepts(&self, len: usize) -> bool {
        self.arity().map_or(true, |n| n == len)
    }
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for RotationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for RotationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}
