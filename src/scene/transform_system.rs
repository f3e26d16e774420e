//! Transform System
//!
//! Per-frame matrix kernels for a joint hierarchy, decoupled from the
//! skeleton instance that owns the arrays so each stage only borrows what it
//! touches.
//!
//! # Ordering
//!
//! Joints are stored with every parent ahead of its children. A single
//! ascending pass therefore always reads a parent world matrix that has
//! already been refreshed this frame; no recursion, no explicit stack and no
//! level batching is needed.
//!
//! The caller runs the stages in order, once per frame:
//! [`recompute_local`] → [`propagate_world`] → [`export_skin`].

use glam::{Affine3A, Mat4};

use crate::scene::skeleton::JointRecord;
use crate::scene::transform::Transform;

/// Recomposes every local matrix from its transform.
pub fn recompute_local(transforms: &[Transform], locals: &mut [Affine3A]) {
    for (local, transform) in locals.iter_mut().zip(transforms) {
        *local = transform.compute_matrix();
    }
}

/// Refreshes world matrices top-down in one forward pass.
///
/// Roots take their local matrix unchanged; every other joint is its parent's
/// world matrix times its own local matrix.
pub fn propagate_world(joints: &[JointRecord], locals: &[Affine3A], worlds: &mut [Affine3A]) {
    debug_assert_eq!(joints.len(), locals.len());
    debug_assert_eq!(joints.len(), worlds.len());

    for (i, joint) in joints.iter().enumerate() {
        worlds[i] = match joint.parent {
            Some(parent) => {
                debug_assert!(parent < i, "parent {parent} does not precede joint {i}");
                worlds[parent] * locals[i]
            }
            None => locals[i],
        };
    }
}

/// Writes skinning matrices for every joint that owns a skin slot.
///
/// Slots without an owning joint, or beyond `out`, are left untouched.
pub fn export_skin(
    joints: &[JointRecord],
    worlds: &[Affine3A],
    inverse_binds: &[Affine3A],
    out: &mut [Mat4],
) {
    for (joint, world) in joints.iter().zip(worlds) {
        let Some(slot) = joint.skin_slot else {
            continue;
        };
        let (Some(dst), Some(inverse_bind)) = (out.get_mut(slot), inverse_binds.get(slot)) else {
            continue;
        };
        *dst = Mat4::from(*world * *inverse_bind);
    }
}
