//! Session: the single owner of playback state.
//!
//! Holds the current capture behind an `Arc`, the playback clock, the joint
//! selection and the connectivity table. All mutation goes through the
//! methods below; a capture swap replaces the `Arc` so snapshots handed out
//! earlier stay intact.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::{ClockState, PlaybackClock, Speed};
use crate::config::Config;
use crate::data::{Capture, Frame};
use crate::error::{PlaybackError, SessionError};
use crate::interp::interpolate;
use crate::loader;
use crate::sample::sample_capture;
use crate::skeleton::{JointConnections, SkeletonPose};
use crate::summary;

/// Where the current capture came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureSource {
    Sample,
    Uploaded,
}

#[derive(Debug)]
pub struct Session {
    cfg: Config,
    capture: Arc<Capture>,
    source: CaptureSource,
    clock: PlaybackClock,
    selected_joint: Option<String>,
    connections: JointConnections,
}

impl Session {
    /// Start a session on the built-in sample capture.
    pub fn new(cfg: Config) -> Result<Self, SessionError> {
        let mut session = Self::with_capture(cfg, sample_capture())?;
        session.source = CaptureSource::Sample;
        Ok(session)
    }

    /// Start a session on a caller-provided capture.
    pub fn with_capture(cfg: Config, capture: Capture) -> Result<Self, SessionError> {
        cfg.validate()?;
        let speed = Speed::new(cfg.default_speed)?;
        let clock = PlaybackClock::new(capture.frame_count(), cfg.base_frame_interval, speed);
        Ok(Self {
            cfg,
            capture: Arc::new(capture),
            source: CaptureSource::Uploaded,
            clock,
            selected_joint: None,
            connections: JointConnections::default(),
        })
    }

    pub fn with_connections(mut self, connections: JointConnections) -> Self {
        self.connections = connections;
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Snapshot of the current capture.
    #[inline]
    pub fn capture(&self) -> Arc<Capture> {
        Arc::clone(&self.capture)
    }

    #[inline]
    pub fn source(&self) -> CaptureSource {
        self.source
    }

    #[inline]
    pub fn connections(&self) -> &JointConnections {
        &self.connections
    }

    #[inline]
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    #[inline]
    pub fn selected_joint(&self) -> Option<&str> {
        self.selected_joint.as_deref()
    }

    // ----- capture swaps -----

    /// Parse and swap in an uploaded capture. On error nothing changes.
    pub fn load_json(&mut self, s: &str) -> Result<ClockState, SessionError> {
        let capture = loader::parse_capture_json(s).inspect_err(|e| {
            log::warn!("session: rejected capture upload: {e}");
        })?;
        Ok(self.replace_capture(capture, CaptureSource::Uploaded))
    }

    /// Validate and swap in an already-parsed JSON document. On error nothing changes.
    pub fn load_value(&mut self, value: serde_json::Value) -> Result<ClockState, SessionError> {
        let capture = loader::parse_capture_value(value).inspect_err(|e| {
            log::warn!("session: rejected capture upload: {e}");
        })?;
        Ok(self.replace_capture(capture, CaptureSource::Uploaded))
    }

    /// Restore the built-in sample capture.
    pub fn reset_to_sample(&mut self) -> ClockState {
        self.replace_capture(sample_capture(), CaptureSource::Sample)
    }

    /// Swap in `capture`, stop at frame 0 and clear the selection.
    pub fn replace_capture(&mut self, capture: Capture, source: CaptureSource) -> ClockState {
        log::debug!(
            "session: swapping in {:?} capture ({} frames)",
            source,
            capture.frame_count()
        );
        self.capture = Arc::new(capture);
        self.source = source;
        self.selected_joint = None;
        self.clock.reset(self.capture.frame_count())
    }

    // ----- control surface -----

    pub fn play(&mut self) -> ClockState {
        self.clock.play()
    }

    pub fn pause(&mut self) -> ClockState {
        self.clock.pause()
    }

    pub fn toggle(&mut self) -> ClockState {
        self.clock.toggle()
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<ClockState, SessionError> {
        Ok(self.clock.set_speed(speed).inspect_err(log_rejected)?)
    }

    pub fn seek(&mut self, position: f32) -> Result<ClockState, SessionError> {
        Ok(self.clock.seek(position).inspect_err(log_rejected)?)
    }

    pub fn step_forward(&mut self) -> ClockState {
        self.clock.step_forward()
    }

    pub fn step_backward(&mut self) -> ClockState {
        self.clock.step_backward()
    }

    pub fn seek_start(&mut self) -> ClockState {
        self.clock.seek_start()
    }

    pub fn seek_end(&mut self) -> ClockState {
        self.clock.seek_end()
    }

    /// Advance by `dt` seconds (render-loop driver).
    pub fn tick(&mut self, dt: f32) -> ClockState {
        self.clock.tick(dt)
    }

    /// Advance to host timestamp `now` in seconds (render-loop driver).
    pub fn tick_at(&mut self, now: f64) -> ClockState {
        self.clock.tick_at(now)
    }

    // ----- selection -----

    pub fn select_joint(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.capture.has_joint(name) {
            return Err(SessionError::UnknownJoint {
                name: name.to_string(),
            });
        }
        self.selected_joint = Some(name.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_joint = None;
    }

    // ----- outputs -----

    /// Interpolated frame at the clock's position.
    pub fn current_frame(&self) -> Cow<'_, Frame> {
        interpolate(&self.capture, self.clock.frame_index(), self.clock.sub_frame())
    }

    /// Renderer hand-off for the current position.
    pub fn pose(&self, scale: f32) -> SkeletonPose {
        let frame = self.current_frame();
        SkeletonPose::resolve(&frame, &self.connections, scale, self.selected_joint())
    }

    /// Renderer hand-off at the configured `render_scale`.
    pub fn default_pose(&self) -> SkeletonPose {
        self.pose(self.cfg.render_scale)
    }

    /// Text context for an analysis assistant.
    pub fn data_context(&self) -> String {
        summary::describe(
            &self.capture,
            self.clock.frame_index(),
            self.clock.sub_frame(),
            self.selected_joint(),
            self.cfg.summary_joint_limit,
        )
    }
}

fn log_rejected(e: &PlaybackError) {
    log::warn!("session: rejected control input: {e}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_stopped_on_sample() {
        let s = Session::new(Config::default()).unwrap();
        assert_eq!(s.source(), CaptureSource::Sample);
        assert_eq!(s.capture().frame_count(), 120);
        let st = s.state();
        assert_eq!((st.frame_index, st.sub_frame, st.is_playing), (0, 0.0, false));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = Config {
            default_speed: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            Session::new(cfg),
            Err(SessionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn select_unknown_joint_fails() {
        let mut s = Session::new(Config::default()).unwrap();
        assert!(s.select_joint("Tail").is_err());
        s.select_joint("Head").unwrap();
        assert_eq!(s.selected_joint(), Some("Head"));
        assert!(s.pose(1.0).markers.iter().any(|m| m.name == "Head" && m.highlighted));
    }

    #[test]
    fn snapshots_survive_a_swap() {
        let mut s = Session::new(Config::default()).unwrap();
        let before = s.capture();
        s.load_json(
            r#"{ "mocap_data": [ { "timestamp": "0", "joint_data": { "Root": { "position": [0,0,0], "type": "euler_x", "rotations": [0] } } } ] }"#,
        )
        .unwrap();
        assert_eq!(before.frame_count(), 120);
        assert_eq!(s.capture().frame_count(), 1);
        assert_eq!(s.source(), CaptureSource::Uploaded);
    }
}
