//! Joint hierarchy:
//! - SkeletonDefinition: shared, validated joint table and bind pose
//! - SkeletonInstance: per-character runtime pose and skin palette
//! - Transform: joint position, rotation and scale
//! - transform_system: the per-frame matrix kernels

pub mod rig;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use rig::SkeletonInstance;
pub use skeleton::{JointRecord, SkeletonDefinition};
pub use transform::Transform;
