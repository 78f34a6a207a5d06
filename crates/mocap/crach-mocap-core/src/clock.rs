//! Playback clock: turns host ticks into `(frame_index, sub_frame)`.
//!
//! Time math:
//! - frame_duration = base_frame_interval / speed
//! - progress += dt / frame_duration; whole frames move `frame_index` (wrapping),
//!   the remainder is the sub-frame
//! - the first tick after `play` only establishes the time origin
//!
//! Manual navigation (`step_*`, `seek_start`, `seek_end`) clamps instead of
//! wrapping and always lands on a whole frame.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_FRAME_INTERVAL;
use crate::error::PlaybackError;

/// Progress within this many frames of a whole frame counts as that frame.
const PROGRESS_SNAP: f64 = 1e-6;

/// Validated speed multiplier (finite, > 0).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Speed(f32);

impl Speed {
    pub const NORMAL: Speed = Speed(1.0);

    pub fn new(speed: f32) -> Result<Self, PlaybackError> {
        if speed.is_finite() && speed > 0.0 {
            Ok(Self(speed))
        } else {
            Err(PlaybackError::InvalidSpeed { speed })
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl<'de> Deserialize<'de> for Speed {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f32::deserialize(deserializer)?;
        Speed::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Snapshot returned by every control-surface operation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    pub frame_index: usize,
    pub sub_frame: f32,
    pub is_playing: bool,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct PlaybackClock {
    frame_count: usize,
    frame_index: usize,
    /// Fractional progress toward the next frame, in [0, 1).
    progress: f64,
    playing: bool,
    speed: Speed,
    base_frame_interval: f32,
    awaiting_reference: bool,
    last_timestamp: Option<f64>,
}

impl PlaybackClock {
    /// Create a stopped clock at frame 0. A `frame_count` of 0 is treated as 1.
    pub fn new(frame_count: usize, base_frame_interval: f32, speed: Speed) -> Self {
        let base_frame_interval = if base_frame_interval.is_finite() && base_frame_interval > 0.0
        {
            base_frame_interval
        } else {
            DEFAULT_FRAME_INTERVAL
        };
        Self {
            frame_count: frame_count.max(1),
            frame_index: 0,
            progress: 0.0,
            playing: false,
            speed,
            base_frame_interval,
            awaiting_reference: true,
            last_timestamp: None,
        }
    }

    pub fn with_frame_count(frame_count: usize) -> Self {
        Self::new(frame_count, DEFAULT_FRAME_INTERVAL, Speed::NORMAL)
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        ClockState {
            frame_index: self.frame_index,
            sub_frame: self.progress as f32,
            is_playing: self.playing,
            speed: self.speed.get(),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[inline]
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    #[inline]
    pub fn sub_frame(&self) -> f32 {
        self.progress as f32
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Normalized timeline position of the current whole frame, in [0, 1].
    pub fn progress(&self) -> f32 {
        let span = self.frame_count.saturating_sub(1).max(1);
        self.frame_index as f32 / span as f32
    }

    /// Seconds one frame lasts at the current speed.
    #[inline]
    pub fn frame_duration(&self) -> f32 {
        self.base_frame_interval / self.speed.get()
    }

    /// Return to `(0, 0, stopped)` for a capture of `frame_count` frames. Speed is kept.
    pub fn reset(&mut self, frame_count: usize) -> ClockState {
        self.frame_count = frame_count.max(1);
        self.frame_index = 0;
        self.progress = 0.0;
        self.playing = false;
        self.awaiting_reference = true;
        self.last_timestamp = None;
        self.state()
    }

    pub fn play(&mut self) -> ClockState {
        if !self.playing {
            self.playing = true;
            self.awaiting_reference = true;
            self.last_timestamp = None;
        }
        self.state()
    }

    pub fn pause(&mut self) -> ClockState {
        self.playing = false;
        self.state()
    }

    pub fn toggle(&mut self) -> ClockState {
        if self.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<ClockState, PlaybackError> {
        self.speed = Speed::new(speed)?;
        Ok(self.state())
    }

    /// Advance by `dt` seconds of host time.
    pub fn tick(&mut self, dt: f32) -> ClockState {
        if !self.playing {
            return self.state();
        }
        if self.awaiting_reference {
            self.awaiting_reference = false;
            return self.state();
        }
        self.accumulate(dt as f64);
        self.state()
    }

    /// Advance to host timestamp `now` (seconds), deriving `dt` from the previous call.
    pub fn tick_at(&mut self, now: f64) -> ClockState {
        if !self.playing {
            return self.state();
        }
        let previous = self.last_timestamp.replace(now);
        match previous {
            Some(prev) if !self.awaiting_reference => self.accumulate(now - prev),
            _ => self.awaiting_reference = false,
        }
        self.state()
    }

    fn accumulate(&mut self, dt: f64) {
        if self.frame_count <= 1 {
            self.frame_index = 0;
            self.progress = 0.0;
            return;
        }
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let frame_duration = self.base_frame_interval as f64 / self.speed.get() as f64;
        let mut progress = self.progress + dt / frame_duration;
        if !progress.is_finite() {
            log::warn!("clock: dropping tick of {dt}s; progress over {frame_duration}s frames overflows");
            return;
        }
        // f32 interval against f64 host deltas: snap near-whole frames.
        let nearest = progress.round();
        if nearest >= 1.0 && (progress - nearest).abs() < PROGRESS_SNAP {
            progress = nearest;
        }
        if progress >= 1.0 {
            let advance = progress.floor();
            let steps = (advance % self.frame_count as f64) as usize;
            self.frame_index = (self.frame_index + steps) % self.frame_count;
            progress -= advance;
        }
        self.progress = progress;
    }

    /// Jump to normalized timeline position `position` (clamped to [0, 1]).
    pub fn seek(&mut self, position: f32) -> Result<ClockState, PlaybackError> {
        if !position.is_finite() {
            return Err(PlaybackError::InvalidSeek { position });
        }
        let p = position.clamp(0.0, 1.0) as f64;
        let last = self.frame_count - 1;
        let exact = p * last as f64;
        let index = (exact.floor() as usize).min(last);
        self.frame_index = index;
        self.progress = (exact - index as f64).max(0.0);
        Ok(self.state())
    }

    pub fn step_forward(&mut self) -> ClockState {
        let target = (self.frame_index + 1).min(self.frame_count - 1);
        self.jump_to(target)
    }

    pub fn step_backward(&mut self) -> ClockState {
        let target = self.frame_index.saturating_sub(1);
        self.jump_to(target)
    }

    pub fn seek_start(&mut self) -> ClockState {
        self.jump_to(0)
    }

    pub fn seek_end(&mut self) -> ClockState {
        self.jump_to(self.frame_count - 1)
    }

    fn jump_to(&mut self, index: usize) -> ClockState {
        self.frame_index = index.min(self.frame_count - 1);
        self.progress = 0.0;
        self.state()
    }
}
