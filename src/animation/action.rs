use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;
use crate::animation::settings::PlaybackSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Frame clock for one clip.
///
/// Converts elapsed seconds into the clip's frame units and wraps at the
/// clip's last frame. It only produces a frame number; feed it to
/// [`Binding::evaluate`](crate::animation::Binding::evaluate).
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    last_frame: f32,
    frame: f32,
    paused: bool,
    pub settings: PlaybackSettings,
}

impl ClipPlayer {
    #[must_use]
    pub fn new(last_frame: f32, settings: PlaybackSettings) -> Self {
        Self {
            last_frame,
            frame: 0.0,
            paused: false,
            settings,
        }
    }

    #[must_use]
    pub fn for_clip(clip: &AnimationClip, settings: PlaybackSettings) -> Self {
        Self::new(clip.last_frame(), settings)
    }

    #[inline]
    #[must_use]
    pub fn frame(&self) -> f32 {
        self.frame
    }

    #[inline]
    #[must_use]
    pub fn last_frame(&self) -> f32 {
        self.last_frame
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Rewinds to frame 0 and pauses.
    pub fn stop(&mut self) {
        self.frame = 0.0;
        self.paused = true;
    }

    /// Jumps to `frame`, clamped into the clip.
    pub fn seek(&mut self, frame: f32) {
        self.frame = frame.clamp(0.0, self.last_frame.max(0.0));
    }

    /// Advances by `dt` seconds and returns the new frame.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.paused {
            return self.frame;
        }

        let duration = self.last_frame;
        if duration <= 0.0 {
            return self.frame;
        }

        // 1. Accumulate time
        self.frame += dt * self.settings.speed * self.settings.frame_rate;

        // 2. Handle loop mode
        match self.settings.loop_mode {
            LoopMode::Once => {
                // Play once, stop at end or start
                if self.frame >= duration {
                    self.frame = duration;
                    self.paused = true;
                } else if self.frame < 0.0 {
                    self.frame = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.frame = self.frame.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let period = duration * 2.0;
                // Normalize into [0, 2 * duration), mirror the second half
                let t = self.frame.rem_euclid(period);
                self.frame = if t > duration { period - t } else { t };
            }
        }

        self.frame
    }
}
