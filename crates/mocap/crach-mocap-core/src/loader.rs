//! Capture loader: untyped JSON in, validated [`Capture`] out.
//!
//! Structural checks run on the first frame only, in this order, stopping at
//! the first failure:
//! 1. top level is an object with a `mocap_data` array
//! 2. `mocap_data` is non-empty
//! 3. frame 0 has a `timestamp` and a non-empty `joint_data` object
//! 4. the first joint has a numeric `position` (≥3 items), a string `type`
//!    and a numeric `rotations` array
//!
//! Every frame is then converted into the typed model. A later frame that
//! cannot be represented is reported with its index.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::{Capture, CaptureInfo, Frame};
use crate::error::CaptureError;

/// Parse capture JSON text.
pub fn parse_capture_json(s: &str) -> Result<Capture, CaptureError> {
    let value: Value = serde_json::from_str(s)?;
    parse_capture_value(value)
}

/// Parse capture JSON bytes (e.g. an uploaded file).
pub fn parse_capture_slice(bytes: &[u8]) -> Result<Capture, CaptureError> {
    let value: Value = serde_json::from_slice(bytes)?;
    parse_capture_value(value)
}

/// Validate and convert an already-parsed JSON document.
pub fn parse_capture_value(value: Value) -> Result<Capture, CaptureError> {
    let frames_json = validate_structure(&value)?;

    let mut frames = Vec::with_capacity(frames_json.len());
    for (idx, raw) in frames_json.iter().enumerate() {
        let frame = Frame::deserialize(raw)
            .map_err(|e| CaptureError::malformed(format!("frame {idx}: {e}")))?;
        frames.push(frame);
    }
    let info = CaptureInfo::deserialize(&value)
        .map_err(|e| CaptureError::malformed(format!("capture metadata: {e}")))?;

    let capture = Capture::with_info(info, frames)?;
    log::debug!(
        "loader: parsed capture {:?} with {} frames",
        capture.info().name,
        capture.frame_count()
    );
    Ok(capture)
}

/// Run the first-frame checks and return the frame array.
pub fn validate_structure(value: &Value) -> Result<&Vec<Value>, CaptureError> {
    // 1
    let root = value
        .as_object()
        .ok_or_else(|| CaptureError::malformed("top-level value must be an object"))?;
    let frames = root
        .get("mocap_data")
        .and_then(Value::as_array)
        .ok_or_else(|| CaptureError::malformed("missing 'mocap_data' frame array"))?;

    // 2
    let first = frames
        .first()
        .ok_or_else(|| CaptureError::malformed("'mocap_data' contains no frames"))?;

    // 3
    let first = first
        .as_object()
        .ok_or_else(|| CaptureError::malformed("frame 0 is not an object"))?;
    if !has_timestamp(first) {
        return Err(CaptureError::malformed("frame 0 has no 'timestamp'"));
    }
    let joints = first
        .get("joint_data")
        .and_then(Value::as_object)
        .ok_or_else(|| CaptureError::malformed("frame 0 has no 'joint_data' object"))?;
    let (joint_name, joint) = joints
        .iter()
        .next()
        .ok_or_else(|| CaptureError::malformed("frame 0 'joint_data' is empty"))?;

    // 4
    let joint = joint.as_object().ok_or_else(|| {
        CaptureError::malformed(format!("joint '{joint_name}' in frame 0 is not an object"))
    })?;
    match numeric_array(joint, "position") {
        Some(n) if n >= 3 => {}
        _ => {
            return Err(CaptureError::malformed(format!(
                "joint '{joint_name}' needs a numeric 'position' with at least 3 components"
            )))
        }
    }
    if !joint.get("type").is_some_and(Value::is_string) {
        return Err(CaptureError::malformed(format!(
            "joint '{joint_name}' has no rotation 'type'"
        )));
    }
    if numeric_array(joint, "rotations").is_none() {
        return Err(CaptureError::malformed(format!(
            "joint '{joint_name}' needs a numeric 'rotations' array"
        )));
    }
    Ok(frames)
}

fn has_timestamp(frame: &Map<String, Value>) -> bool {
    match frame.get("timestamp") {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    }
}

/// Length of `obj[key]` when it is an array of numbers.
fn numeric_array(obj: &Map<String, Value>, key: &str) -> Option<usize> {
    let items = obj.get(key)?.as_array()?;
    items.iter().all(Value::is_number).then_some(items.len())
}
