//! Keyframe animation: channels, clips, and their binding to skeletons.
//!
//! - [`KeyframeChannel`]: one sampled curve of up to four components
//! - [`AnimationClip`] / [`ClipLibrary`]: immutable, named channel bundles
//! - [`Binding`] / [`BindingSet`]: clip channels matched to skeleton joints
//! - [`ClipPlayer`]: frame clock with loop handling

pub mod action;
pub mod binding;
pub mod channel;
pub mod clip;
pub mod library;
pub mod settings;
pub mod values;

pub use action::{ClipPlayer, LoopMode};
pub use binding::{Binding, BindingSet, ChannelLink, TargetPath};
pub use channel::{Bracket, KeySpan, Keyframe, KeyframeChannel, MAX_COMPONENTS};
pub use clip::AnimationClip;
pub use library::ClipLibrary;
pub use settings::PlaybackSettings;
pub use values::{BlendMode, ChannelCurve, ChannelValue, RotationBlend, ValueKind, VectorBlend};
