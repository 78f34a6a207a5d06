//! Core configuration for crach-mocap-core.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Nominal capture period used by the playback clock (30 Hz).
pub const DEFAULT_FRAME_INTERVAL: f32 = 1.0 / 30.0;

/// Playback and presentation settings.
/// Every field has a default so hosts can pass a partial object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds per captured frame at speed 1.0. Independent of capture timestamps.
    pub base_frame_interval: f32,
    /// Speed multiplier applied to a fresh session.
    pub default_speed: f32,
    /// Discrete speed choices offered by the host UI. The clock accepts any positive speed.
    pub speed_presets: Vec<f32>,
    /// Uniform scale handed to the renderer with each pose.
    pub render_scale: f32,
    /// How many joints the data-context summary lists when nothing is selected.
    pub summary_joint_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_frame_interval: DEFAULT_FRAME_INTERVAL,
            default_speed: 1.0,
            speed_presets: vec![0.25, 0.5, 1.0, 1.5, 2.0],
            render_scale: 1.0,
            summary_joint_limit: 5,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(self.base_frame_interval.is_finite() && self.base_frame_interval > 0.0) {
            return Err(SessionError::InvalidConfig {
                reason: format!(
                    "base_frame_interval must be finite and > 0, got {}",
                    self.base_frame_interval
                ),
            });
        }
        if !(self.default_speed.is_finite() && self.default_speed > 0.0) {
            return Err(SessionError::InvalidConfig {
                reason: format!(
                    "default_speed must be finite and > 0, got {}",
                    self.default_speed
                ),
            });
        }
        if let Some(bad) = self
            .speed_presets
            .iter()
            .find(|s| !(s.is_finite() && **s > 0.0))
        {
            return Err(SessionError::InvalidConfig {
                reason: format!("speed preset must be finite and > 0, got {bad}"),
            });
        }
        if !self.render_scale.is_finite() {
            return Err(SessionError::InvalidConfig {
                reason: "render_scale must be finite".into(),
            });
        }
        Ok(())
    }
}
