use std::sync::Arc;

use glam::{Affine3A, Mat4};

use crate::scene::skeleton::SkeletonDefinition;
use crate::scene::transform::Transform;
use crate::scene::transform_system;

/// Mutable runtime pose bound to one shared [`SkeletonDefinition`].
///
/// Joints live in flat arrays addressed by joint index; a joint reaches its
/// parent's world matrix and its inverse bind matrix through the definition's
/// indices, never through stored references.
///
/// Per frame, after a binding has written the transforms, call
/// [`recompute_local`](Self::recompute_local),
/// [`propagate_world`](Self::propagate_world) and
/// [`export_skin`](Self::export_skin) in that order (or
/// [`update_pose`](Self::update_pose) for all three). The order is not
/// enforced.
#[derive(Debug, Clone)]
pub struct SkeletonInstance {
    definition: Arc<SkeletonDefinition>,

    // === Per-joint data ===
    transforms: Vec<Transform>,
    local_matrices: Vec<Affine3A>,
    world_matrices: Vec<Affine3A>,

    // === Output ===
    // Indexed by skin slot; slots no joint owns keep their last value.
    skin_matrices: Vec<Mat4>,
}

impl SkeletonInstance {
    /// Creates an instance in bind pose.
    ///
    /// Local matrices are copied from the definition and world matrices are
    /// propagated once, so the bind pose is reproduced exactly. Transforms are
    /// seeded by decomposing the bind matrices with unit scale.
    #[must_use]
    pub fn from_definition(definition: Arc<SkeletonDefinition>) -> Self {
        let joint_count = definition.joint_count();
        let skin_count = definition.skin_slot_count();

        let mut instance = Self {
            transforms: definition
                .bind_locals()
                .iter()
                .map(Transform::from_bind_matrix)
                .collect(),
            local_matrices: definition.bind_locals().to_vec(),
            world_matrices: vec![Affine3A::IDENTITY; joint_count],
            skin_matrices: vec![Mat4::IDENTITY; skin_count],
            definition,
        };
        instance.propagate_world();

        log::debug!(
            "Skeleton instance created: {} joints, {} skin slots",
            joint_count,
            skin_count
        );

        instance
    }

    /// Puts every joint back in bind pose and refreshes world matrices.
    pub fn reset_to_bind_pose(&mut self) {
        let bind = self.definition.bind_locals();
        for ((transform, local), bind_local) in self
            .transforms
            .iter_mut()
            .zip(&mut self.local_matrices)
            .zip(bind)
        {
            *transform = Transform::from_bind_matrix(bind_local);
            *local = *bind_local;
        }
        self.propagate_world();
    }

    // ========================================================================
    // Frame stages
    // ========================================================================

    /// local := compose(position, rotation, scale) for every joint.
    pub fn recompute_local(&mut self) {
        transform_system::recompute_local(&self.transforms, &mut self.local_matrices);
    }

    /// Refreshes world matrices in ascending joint order.
    pub fn propagate_world(&mut self) {
        transform_system::propagate_world(
            self.definition.joints(),
            &self.local_matrices,
            &mut self.world_matrices,
        );
    }

    /// Refreshes the skin palette from the current world matrices and returns
    /// it. Only slots owned by a joint are written.
    pub fn export_skin(&mut self) -> &[Mat4] {
        transform_system::export_skin(
            self.definition.joints(),
            &self.world_matrices,
            self.definition.inverse_binds(),
            &mut self.skin_matrices,
        );
        &self.skin_matrices
    }

    /// Writes skin matrices into a caller-owned buffer indexed by skin slot.
    ///
    /// Entries without an owning joint, and slots past the end of `out`, are
    /// not touched.
    pub fn export_skin_into(&self, out: &mut [Mat4]) {
        transform_system::export_skin(
            self.definition.joints(),
            &self.world_matrices,
            self.definition.inverse_binds(),
            out,
        );
    }

    /// Runs recompute → propagate → export and returns the palette.
    pub fn update_pose(&mut self) -> &[Mat4] {
        self.recompute_local();
        self.propagate_world();
        self.export_skin()
    }

    // ========================================================================
    // Getters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn definition(&self) -> &Arc<SkeletonDefinition> {
        &self.definition
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    #[must_use]
    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.definition.find_joint(name)
    }

    #[inline]
    #[must_use]
    pub fn transform(&self, joint: usize) -> Option<&Transform> {
        self.transforms.get(joint)
    }

    #[inline]
    pub fn transform_mut(&mut self, joint: usize) -> Option<&mut Transform> {
        self.transforms.get_mut(joint)
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self, joint: usize) -> Option<&Affine3A> {
        self.local_matrices.get(joint)
    }

    /// World matrix of a joint, e.g. for parenting a prop to a hand.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self, joint: usize) -> Option<&Affine3A> {
        self.world_matrices.get(joint)
    }

    #[inline]
    #[must_use]
    pub fn world_matrices(&self) -> &[Affine3A] {
        &self.world_matrices
    }

    /// Last exported palette, indexed by skin slot.
    #[inline]
    #[must_use]
    pub fn skin_matrices(&self) -> &[Mat4] {
        &self.skin_matrices
    }

    /// The palette as raw bytes for a GPU upload.
    #[inline]
    #[must_use]
    pub fn skin_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.skin_matrices)
    }
}
