//! crach.Move mocap playback core (engine-agnostic)
//!
//! Capture data model, sub-frame interpolation, the playback clock and the
//! capture loader, plus the session controller that ties them together for
//! a host render loop. Rendering itself lives outside this crate; it consumes
//! [`SkeletonPose`] values.

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod interp;
pub mod loader;
pub mod rotation;
pub mod sample;
pub mod session;
pub mod skeleton;
pub mod summary;

// Re-exports for consumers (adapters)
pub use clock::{ClockState, PlaybackClock, Speed};
pub use config::Config;
pub use data::{Capture, CaptureInfo, Frame, JointPose};
pub use error::{CaptureError, PlaybackError, SessionError};
pub use interp::interpolate;
pub use loader::{parse_capture_json, parse_capture_slice, parse_capture_value};
pub use rotation::RotationKind;
pub use sample::sample_capture;
pub use session::{CaptureSource, Session};
pub use skeleton::{Bone, JointConnections, JointMarker, SkeletonPose};
