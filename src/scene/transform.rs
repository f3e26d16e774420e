use glam::{Affine3A, Quat, Vec3};

use crate::math::{self, RotationOrder};

/// Joint transform component.
///
/// Position, rotation and scale of a joint relative to its parent. Composed
/// into a local matrix as translation * rotation * scale; scale is assumed
/// axis-aligned (no shear).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Seeds a runtime transform from a bind-pose matrix.
    ///
    /// Keeps translation and rotation; scale is reset to one, so a bind matrix
    /// carrying scale does not survive a recompose.
    #[must_use]
    pub fn from_bind_matrix(mat: &Affine3A) -> Self {
        let (_scale, rotation, translation) = mat.to_scale_rotation_translation();
        Self {
            position: translation,
            rotation: rotation.normalize(),
            scale: Vec3::ONE,
        }
    }

    /// Composes the local matrix.
    #[inline]
    #[must_use]
    pub fn compute_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Sets the rotation from Euler angles (radians) applied in `order`.
    pub fn set_rotation_euler(&mut self, angles: Vec3, order: RotationOrder) {
        self.rotation = math::euler_to_quat(angles, order);
    }

    /// Current rotation as Euler angles in `order`.
    #[must_use]
    pub fn rotation_euler(&self, order: RotationOrder) -> Vec3 {
        math::quat_to_euler(self.rotation, order)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn compose_applies_scale_then_rotation_then_translation() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_z(FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        let p = t.compute_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 4.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn bind_matrix_decomposes_to_unit_scale() {
        let bind = Affine3A::from_scale_rotation_translation(
            Vec3::splat(3.0),
            Quat::from_rotation_y(0.4),
            Vec3::new(5.0, 0.0, -1.0),
        );
        let t = Transform::from_bind_matrix(&bind);
        assert_eq!(t.scale, Vec3::ONE);
        assert!((t.position - Vec3::new(5.0, 0.0, -1.0)).length() < 1e-5);
        assert!(t.rotation.dot(Quat::from_rotation_y(0.4)).abs() > 1.0 - 1e-6);
    }

    #[test]
    fn euler_helpers_round_trip() {
        let mut t = Transform::new();
        let angles = Vec3::new(0.1, 0.2, 0.3);
        t.set_rotation_euler(angles, RotationOrder::Zxy);
        assert!((t.rotation_euler(RotationOrder::Zxy) - angles).length() < 1e-4);
    }
}
