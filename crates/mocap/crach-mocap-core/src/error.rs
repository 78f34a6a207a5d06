//! Error types for capture loading, playback control and the session.

/// Rejection raised while building a [`Capture`](crate::data::Capture).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CaptureError {
    /// Structural validation failed.
    #[error("Malformed capture: {reason}")]
    Malformed { reason: String },

    /// The input was not valid JSON.
    #[error("Capture JSON error: {reason}")]
    Json { reason: String },
}

impl CaptureError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn category(&self) -> &'static str {
        "capture"
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            Self::Malformed {
                reason: err.to_string(),
            }
        } else {
            Self::Json {
                reason: err.to_string(),
            }
        }
    }
}

/// Rejected control-surface input. The clock keeps its previous state.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("Invalid playback speed: {speed} (must be finite and > 0)")]
    InvalidSpeed { speed: f32 },

    #[error("Invalid seek position: {position}")]
    InvalidSeek { position: f32 },
}

impl PlaybackError {
    #[inline]
    pub fn category(&self) -> &'static str {
        "playback"
    }
}

/// Errors surfaced by [`Session`](crate::session::Session).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("Joint not found in current capture: {name}")]
    UnknownJoint { name: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl SessionError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Capture(e) => e.category(),
            Self::Playback(e) => e.category(),
            Self::UnknownJoint { .. } | Self::InvalidConfig { .. } => "session",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_syntax_errors_are_not_reported_as_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        assert!(matches!(CaptureError::from(err), CaptureError::Json { .. }));
    }

    #[test]
    fn session_categories_follow_inner_error() {
        let e: SessionError = PlaybackError::InvalidSpeed { speed: 0.0 }.into();
        assert_eq!(e.category(), "playback");
        let e: SessionError = CaptureError::malformed("x").into();
        assert_eq!(e.category(), "capture");
        let e = SessionError::UnknownJoint { name: "Tail".into() };
        assert_eq!(e.category(), "session");
    }

    #[test]
    fn display_carries_reason() {
        let e = CaptureError::malformed("mocap_data is empty");
        assert_eq!(e.to_string(), "Malformed capture: mocap_data is empty");
    }
}
