use crate::animation::channel::KeyframeChannel;
use crate::animation::values::{BlendMode, ChannelCurve, ValueKind};
use crate::assets::descriptor::{ChannelDescriptor, ClipDescriptor};
use crate::errors::{KinemaError, Result};
use crate::math::RotationOrder;

/// A named, immutable bundle of channels plus its last frame.
///
/// Only obtainable through validating constructors; a failed load never
/// yields a clip.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    last_frame: f32,
    channels: Vec<KeyframeChannel>,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        last_frame: f32,
        channels: Vec<KeyframeChannel>,
    ) -> Result<Self> {
        let name = name.into();
        if !last_frame.is_finite() || last_frame < 0.0 {
            return Err(KinemaError::InvalidLastFrame {
                clip: name,
                last_frame,
            });
        }

        log::debug!(
            "Clip '{}' loaded: {} channels, last frame {}",
            name,
            channels.len(),
            last_frame
        );

        Ok(Self {
            name,
            last_frame,
            channels,
        })
    }

    /// Validates a descriptor and builds the clip from it.
    ///
    /// Channel errors are reported as [`KinemaError::InClip`] naming the clip.
    pub fn from_descriptor(desc: &ClipDescriptor) -> Result<Self> {
        let channels = desc
            .channels
            .iter()
            .map(channel_from_descriptor)
            .collect::<Result<Vec<_>>>()
            .map_err(|source| KinemaError::InClip {
                clip: desc.name.clone(),
                source: Box::new(source),
            })?;

        Self::new(desc.name.clone(), desc.last_frame, channels)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_descriptor(&ClipDescriptor::from_json_str(json)?)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn last_frame(&self) -> f32 {
        self.last_frame
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[KeyframeChannel] {
        &self.channels
    }

    #[inline]
    #[must_use]
    pub fn channel(&self, index: usize) -> Option<&KeyframeChannel> {
        self.channels.get(index)
    }

    /// First channel driving `name`/`subname`.
    #[must_use]
    pub fn find_channel(&self, name: &str, subname: &str) -> Option<&KeyframeChannel> {
        self.channels
            .iter()
            .find(|c| c.name() == name && c.subname() == subname)
    }

    /// `(first, last)` keyed frame over all channels, `None` for an empty clip.
    #[must_use]
    pub fn keyed_range(&self) -> Option<(f32, f32)> {
        if self.channels.is_empty() {
            return None;
        }
        let first = self
            .channels
            .iter()
            .map(KeyframeChannel::first_frame)
            .fold(f32::INFINITY, f32::min);
        let last = self
            .channels
            .iter()
            .map(KeyframeChannel::last_frame)
            .fold(f32::NEG_INFINITY, f32::max);
        Some((first, last))
    }
}

fn channel_from_descriptor(desc: &ChannelDescriptor) -> Result<KeyframeChannel> {
    let kind = ValueKind::from_code(desc.value_kind)?;
    let blend = BlendMode::from_code(desc.blend_mode)?;
    let order = RotationOrder::from_code(desc.rotation_order)?;
    let curve = ChannelCurve::new(kind, blend, order)?;

    let used = match desc.size {
        Some(declared) if declared > desc.components.len() => {
            return Err(KinemaError::ComponentCountMismatch {
                channel: desc.name.clone(),
                declared,
                actual: desc.components.len(),
            });
        }
        Some(declared) => &desc.components[..declared],
        None => &desc.components[..],
    };

    KeyframeChannel::new(desc.name.clone(), desc.subname.clone(), curve, used)
}
