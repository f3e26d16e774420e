//! Plain descriptor structures handed over by asset loaders.
//!
//! Loaders for scene formats, rig exporters and the like produce these; the
//! animation core only ever consumes them. Field names accept both the
//! camel-case spelling and the short keys used by the `.anim` / `.rig` JSON
//! exports (`subName`, `rord`, `expr`, `comp`, `idx`, `parIdx`, `skinIdx`,
//! `mtx`, `imtx`).

use glam::{Affine3A, Mat4};
use serde::{Deserialize, Serialize};

use crate::animation::channel::Keyframe;
use crate::errors::Result;

/// A column-major 4x4 matrix, translation in elements 12..=14.
pub type MatrixDescriptor = [f32; 16];

#[must_use]
pub fn affine_from_descriptor(m: &MatrixDescriptor) -> Affine3A {
    Affine3A::from_mat4(Mat4::from_cols_array(m))
}

#[must_use]
pub fn affine_to_descriptor(a: &Affine3A) -> MatrixDescriptor {
    Mat4::from(*a).to_cols_array()
}

// ============================================================================
// Clips
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipDescriptor {
    pub name: String,
    pub last_frame: f32,
    pub channels: Vec<ChannelDescriptor>,
}

impl ClipDescriptor {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Target joint name.
    pub name: String,
    #[serde(rename = "subName", alias = "subname")]
    pub subname: String,
    /// Value kind code: 0 vector, 1 Euler, 2 quaternion.
    #[serde(rename = "type", alias = "valueKind")]
    pub value_kind: i32,
    /// Rotation order code, see [`RotationOrder`](crate::math::RotationOrder).
    #[serde(rename = "rord", alias = "rotationOrder")]
    pub rotation_order: i32,
    /// Blend code: 0 constant, 1 linear, 2 cubic, 3 spherical-linear.
    #[serde(rename = "expr", alias = "blendMode")]
    pub blend_mode: i32,
    /// Number of components in use. When absent, every entry of
    /// `components` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// One keyframe run per component.
    #[serde(rename = "comp", alias = "components")]
    pub components: Vec<Vec<Keyframe>>,
}

// ============================================================================
// Skeletons
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDescriptor {
    pub joints: Vec<JointDescriptor>,
    /// Bind-pose local matrix per joint, indexed by joint index.
    #[serde(rename = "mtx", alias = "localMatrices")]
    pub local_matrices: Vec<MatrixDescriptor>,
    /// Inverse bind matrix per skin slot.
    #[serde(rename = "imtx", alias = "inverseBindMatrices")]
    pub inverse_bind_matrices: Vec<MatrixDescriptor>,
}

impl SkeletonDescriptor {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointDescriptor {
    pub name: String,
    #[serde(rename = "idx", alias = "index")]
    pub index: usize,
    /// Negative or null for the root.
    #[serde(
        rename = "parIdx",
        alias = "parentIndex",
        default,
        with = "optional_index"
    )]
    pub parent_index: Option<usize>,
    /// Negative, null or absent for joints that do not deform geometry.
    #[serde(rename = "skinIdx", alias = "skinSlot", default, with = "optional_index")]
    pub skin_slot: Option<usize>,
}

/// Exporters write `-1` for "none"; accept that as well as `null`.
mod optional_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(i) => s.serialize_u64(*i as u64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        let raw = Option::<i64>::deserialize(d)?;
        Ok(raw.and_then(|i| usize::try_from(i).ok()))
    }
}
