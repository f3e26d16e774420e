//! Skeletal animation evaluation.
//!
//! Samples keyframe channels at an arbitrary frame, writes the results into a
//! joint hierarchy and produces world matrices and GPU-ready skinning
//! matrices.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kinema::{AnimationClip, Binding, SkeletonDefinition, SkeletonInstance};
//!
//! let skeleton = Arc::new(SkeletonDefinition::from_json_str(&rig_json)?);
//! let clip = Arc::new(AnimationClip::from_json_str(&anim_json)?);
//!
//! let mut pose = SkeletonInstance::from_definition(Arc::clone(&skeleton));
//! let binding = Binding::build(clip, &skeleton);
//!
//! binding.evaluate(&mut pose, frame);
//! let palette = pose.update_pose();
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod math;
pub mod scene;

pub use animation::{
    AnimationClip, Binding, BindingSet, ChannelValue, ClipLibrary, ClipPlayer, Keyframe,
    KeyframeChannel, LoopMode, PlaybackSettings,
};
pub use assets::{ClipDescriptor, SkeletonDescriptor};
pub use errors::{KinemaError, Result};
pub use math::RotationOrder;
pub use scene::{SkeletonDefinition, SkeletonInstance, Transform};
