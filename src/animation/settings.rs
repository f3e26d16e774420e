//! Playback Settings
//!
//! Configuration for [`ClipPlayer`](crate::animation::ClipPlayer).
//!
//! ```rust,ignore
//! use kinema::animation::{LoopMode, PlaybackSettings};
//!
//! // Default: loop forever at 24 frames per second
//! let settings = PlaybackSettings::default();
//!
//! // Play once at half speed on a 30 fps rig
//! let settings = PlaybackSettings {
//!     speed: 0.5,
//!     loop_mode: LoopMode::Once,
//!     frame_rate: 30.0,
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::action::LoopMode;

/// Frame rate clips are authored at unless stated otherwise.
pub const DEFAULT_FRAME_RATE: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Multiplier on elapsed time. Negative values play backwards.
    pub speed: f32,
    /// What happens at either end of the clip.
    pub loop_mode: LoopMode,
    /// Keyframe units per second of wall-clock time.
    pub frame_rate: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            loop_mode: LoopMode::Loop,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}
