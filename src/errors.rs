//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`KinemaError`] covers the load-time failure modes:
//! - Schema errors while turning a clip descriptor into an [`AnimationClip`]
//! - Topology errors while building a [`SkeletonDefinition`]
//!
//! Runtime sampling and name matching never fail: frames outside the keyed
//! range clamp to the boundary keyframe and unmatched channels are dropped
//! from the binding.
//!
//! # Usage
//!
//! All fallible constructors return [`Result<T>`], an alias for
//! `std::result::Result<T, KinemaError>`.
//!
//! ```rust,ignore
//! use kinema::errors::Result;
//!
//! fn load(desc: &ClipDescriptor) -> Result<AnimationClip> {
//!     AnimationClip::from_descriptor(desc)
//! }
//! ```
//!
//! [`AnimationClip`]: crate::animation::AnimationClip
//! [`SkeletonDefinition`]: crate::scene::SkeletonDefinition

use thiserror::Error;

/// The main error type for the crate.
///
/// Construction is all-or-nothing: whenever one of these is returned, no
/// partially built clip, library or skeleton exists.
#[derive(Error, Debug)]
pub enum KinemaError {
    // ========================================================================
    // Schema Errors (clip descriptors)
    // ========================================================================
    /// A channel declares no components at all.
    #[error("Channel '{channel}' has no components")]
    EmptyChannel { channel: String },

    /// One component of a channel carries no keyframes.
    #[error("Channel '{channel}': component {component} has no keyframes")]
    EmptyComponent { channel: String, component: usize },

    /// More components than the channel's value kind has lanes.
    #[error("Channel '{channel}' has {count} components (at most {max} allowed)")]
    TooManyComponents {
        channel: String,
        count: usize,
        max: usize,
    },

    /// The declared component count exceeds the component arrays present.
    #[error("Channel '{channel}' declares {declared} components but carries {actual}")]
    ComponentCountMismatch {
        channel: String,
        declared: usize,
        actual: usize,
    },

    /// Keyframe frames must be non-decreasing within a component.
    #[error("Channel '{channel}': component {component} keyframe {index} goes back in time")]
    UnsortedKeyframes {
        channel: String,
        component: usize,
        index: usize,
    },

    /// A keyframe holds NaN or infinity.
    #[error("Channel '{channel}': component {component} keyframe {index} is not finite")]
    NonFiniteKeyframe {
        channel: String,
        component: usize,
        index: usize,
    },

    /// Unknown value kind code.
    #[error("Unknown channel value kind code: {0}")]
    UnknownValueKind(i32),

    /// Unknown blend mode code.
    #[error("Unknown channel blend mode code: {0}")]
    UnknownBlendMode(i32),

    /// Unknown rotation order code.
    #[error("Unknown rotation order code: {0}")]
    UnknownRotationOrder(i32),

    /// Spherical blending requested for a channel that is not a quaternion.
    #[error("Blend mode {blend} is not legal for {kind} channels")]
    IllegalBlend { kind: String, blend: String },

    /// A channel failed to load; wraps the channel-level cause.
    #[error("Clip '{clip}': {source}")]
    InClip {
        clip: String,
        #[source]
        source: Box<KinemaError>,
    },

    /// The clip's last frame is negative or not finite.
    #[error("Clip '{clip}' has an invalid last frame: {last_frame}")]
    InvalidLastFrame { clip: String, last_frame: f32 },

    /// Matrix arrays whose length disagrees with the joint table.
    #[error("Matrix count mismatch: {context} (expected {expected}, got {actual})")]
    MatrixCountMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Topology Errors (skeleton definitions)
    // ========================================================================
    /// A joint record names an index outside the joint table.
    #[error("Joint '{joint}' has index {index}, but the skeleton only has {count} joints")]
    JointIndexOutOfRange {
        joint: String,
        index: usize,
        count: usize,
    },

    /// Two joint records claim the same index.
    #[error("Joint index {index} is used by both '{first}' and '{second}'")]
    DuplicateJointIndex {
        index: usize,
        first: String,
        second: String,
    },

    /// A joint refers to a parent outside the joint table.
    #[error("Joint '{joint}' refers to parent {parent}, which does not exist")]
    ParentOutOfRange { joint: String, parent: usize },

    /// A parent must come before its children so one forward pass suffices.
    #[error("Joint '{joint}' (index {index}) has parent {parent}, which does not precede it")]
    ParentNotBeforeChild {
        joint: String,
        index: usize,
        parent: usize,
    },

    /// A skin slot outside the inverse-bind matrix array.
    #[error("Joint '{joint}' uses skin slot {slot}, but only {count} inverse bind matrices exist")]
    SkinSlotOutOfRange {
        joint: String,
        slot: usize,
        count: usize,
    },

    /// Two joints share a skin slot.
    #[error("Skin slot {slot} is used by both '{first}' and '{second}'")]
    DuplicateSkinSlot {
        slot: usize,
        first: String,
        second: String,
    },

    /// Two clips in one library share a name.
    #[error("Clip name '{0}' appears more than once in the library")]
    DuplicateClipName(String),
}

/// Alias for `Result<T, KinemaError>`.
pub type Result<T> = std::result::Result<T, KinemaError>;
