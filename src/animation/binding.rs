use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::animation::library::ClipLibrary;
use crate::animation::values::ChannelValue;
use crate::scene::{SkeletonDefinition, SkeletonInstance};

/// Defines the target property for animation data.
///
/// Scale is deliberately absent: joint scale is carried by the transform but
/// never animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
}

impl TargetPath {
    /// Resolves a channel subname by its leading letter: `t…` translation,
    /// `r…` rotation. Anything else is not a recognised target.
    #[must_use]
    pub fn from_subname(subname: &str) -> Option<Self> {
        match subname.bytes().next().map(|b| b.to_ascii_lowercase()) {
            Some(b't') => Some(Self::Translation),
            Some(b'r') => Some(Self::Rotation),
            _ => None,
        }
    }
}

/// Maps channel `channel_index` of the clip to the `target` property of joint
/// `joint_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLink {
    pub channel_index: usize,
    pub joint_index: usize,
    pub target: TargetPath,
}

/// A clip matched against a skeleton by channel / joint name.
///
/// Channels naming no joint are dropped silently: that is the policy, not an
/// error, and [`dropped_count`](Self::dropped_count) reports how many.
/// Channels that do match a joint but drive a field this engine does not
/// animate (an unknown subname, or a vector on a rotation) are counted
/// separately by [`ignored_count`](Self::ignored_count).
#[derive(Debug, Clone)]
pub struct Binding {
    clip: Arc<AnimationClip>,
    links: Vec<ChannelLink>,
    dropped: usize,
    ignored: usize,
}

impl Binding {
    #[must_use]
    pub fn build(clip: Arc<AnimationClip>, skeleton: &SkeletonDefinition) -> Self {
        let mut links = Vec::with_capacity(clip.channels().len());
        let mut dropped = 0;
        let mut ignored = 0;

        for (channel_index, channel) in clip.channels().iter().enumerate() {
            let Some(joint_index) = skeleton.find_joint(channel.name()) else {
                log::debug!(
                    "Clip '{}': no joint named '{}' for channel '{}'",
                    clip.name(),
                    channel.name(),
                    channel.subname()
                );
                dropped += 1;
                continue;
            };

            let target = TargetPath::from_subname(channel.subname()).filter(|target| {
                channel.curve().is_rotation() == (*target == TargetPath::Rotation)
            });
            let Some(target) = target else {
                log::warn!(
                    "Clip '{}': '{}.{}' ({:?}) drives no translation or rotation",
                    clip.name(),
                    channel.name(),
                    channel.subname(),
                    channel.curve().value_kind()
                );
                ignored += 1;
                continue;
            };

            links.push(ChannelLink {
                channel_index,
                joint_index,
                target,
            });
        }

        log::debug!(
            "Clip '{}' bound: {} links, {} channels without a joint, {} ignored",
            clip.name(),
            links.len(),
            dropped,
            ignored
        );

        Self {
            clip,
            links,
            dropped,
            ignored,
        }
    }

    /// Samples every linked channel at `frame` and writes the result into the
    /// bound joint's position or rotation.
    ///
    /// Lanes a channel does not animate keep the joint's current value. The
    /// caller still has to recompute local matrices, propagate and export.
    pub fn evaluate(&self, instance: &mut SkeletonInstance, frame: f32) {
        let channels = self.clip.channels();

        for link in &self.links {
            let channel = &channels[link.channel_index];
            let Some(transform) = instance.transform_mut(link.joint_index) else {
                log::warn!(
                    "Clip '{}': joint {} is outside the skeleton instance, link skipped",
                    self.clip.name(),
                    link.joint_index
                );
                continue;
            };

            match link.target {
                TargetPath::Translation => {
                    let current = ChannelValue::Vector(transform.position);
                    if let Some(v) = channel.sample_over(current, frame).as_vector() {
                        transform.position = v;
                    }
                }
                TargetPath::Rotation => {
                    let current = ChannelValue::Rotation(transform.rotation);
                    if let Some(q) = channel.sample_over(current, frame).as_rotation() {
                        transform.rotation = q;
                    }
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.clip.name()
    }

    #[inline]
    #[must_use]
    pub fn last_frame(&self) -> f32 {
        self.clip.last_frame()
    }

    #[inline]
    #[must_use]
    pub fn links(&self) -> &[ChannelLink] {
        &self.links
    }

    /// Channels whose name matched no joint.
    #[inline]
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Channels that matched a joint but target nothing this engine animates.
    #[inline]
    #[must_use]
    pub fn ignored_count(&self) -> usize {
        self.ignored
    }
}

/// Every clip of a library bound to one skeleton, in library order.
#[derive(Debug, Clone, Default)]
pub struct BindingSet {
    bindings: Vec<Binding>,
    index: FxHashMap<String, usize>,
}

impl BindingSet {
    #[must_use]
    pub fn build(library: &ClipLibrary, skeleton: &SkeletonDefinition) -> Self {
        let bindings: Vec<Binding> = library
            .iter()
            .map(|clip| Binding::build(Arc::clone(clip), skeleton))
            .collect();
        let index = bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name().to_string(), i))
            .collect();
        Self { bindings, index }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Binding> {
        self.bindings.get(index)
    }

    #[inline]
    #[must_use]
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Binding> {
        self.find_index(name).and_then(|i| self.bindings.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }
}
