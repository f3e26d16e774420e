//! Interpolation and rotation helpers shared by the channel evaluator.
//!
//! Everything here works on four-lane [`Vec4`] values: a channel animates up
//! to four scalars and the evaluator keeps them packed in one vector so the
//! blend functions apply lane-wise.

use glam::{EulerRot, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::errors::{KinemaError, Result};

// ============================================================================
// Blend kernels
// ============================================================================

/// Lane-wise cubic Hermite spline between `a` and `b`.
///
/// `left` is the outgoing tangent at `a`, `right` the incoming tangent at `b`.
/// Each lane uses its own blend parameter from `t`. The basis is
/// `h00 = 2t³ - 3t² + 1`, `h10 = t³ - 2t² + t`, `h01 = -2t³ + 3t²`,
/// `h11 = t³ - t²`.
#[must_use]
pub fn hermite(a: Vec4, left: Vec4, b: Vec4, right: Vec4, t: Vec4) -> Vec4 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h01 = t3 * -2.0 + t2 * 3.0;
    let h11 = t3 - t2;
    let h00 = Vec4::ONE - h01;
    let h10 = h11 - t2 + t;

    h00 * a + h10 * left + h01 * b + h11 * right
}

/// Lane-wise linear interpolation. `t` is not clamped.
#[inline]
#[must_use]
pub fn lerp(a: Vec4, b: Vec4, t: Vec4) -> Vec4 {
    a + (b - a) * t
}

/// Shortest-arc spherical interpolation between two rotations.
///
/// Inputs are normalized first; keyframed quaternions are frequently stored
/// with a few ulps of drift.
#[must_use]
pub fn slerp(a: Quat, b: Quat, t: f32) -> Quat {
    a.normalize().slerp(b.normalize(), t)
}

/// Reinterprets packed `x, y, z, w` lanes as a unit quaternion.
///
/// A zero-length input maps to identity instead of producing NaNs.
#[must_use]
pub fn quat_from_lanes(lanes: Vec4) -> Quat {
    if lanes.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_vec4(lanes.normalize())
}

// ============================================================================
// Euler angles
// ============================================================================

/// Order in which the three axis rotations of an Euler triple are applied.
///
/// `Xyz` rotates about X first, then Y, then Z, all about the parent axes.
/// The numeric codes (0..=5) are the ones used by clip descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub const ALL: [Self; 6] = [
        Self::Xyz,
        Self::Xzy,
        Self::Yxz,
        Self::Yzx,
        Self::Zxy,
        Self::Zyx,
    ];

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Xyz),
            1 => Ok(Self::Xzy),
            2 => Ok(Self::Yxz),
            3 => Ok(Self::Yzx),
            4 => Ok(Self::Zxy),
            5 => Ok(Self::Zyx),
            other => Err(KinemaError::UnknownRotationOrder(other)),
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Xyz => 0,
            Self::Xzy => 1,
            Self::Yxz => 2,
            Self::Yzx => 3,
            Self::Zxy => 4,
            Self::Zyx => 5,
        }
    }

    /// Axis indices (0 = X, 1 = Y, 2 = Z) in application order.
    #[must_use]
    pub fn axes(self) -> [usize; 3] {
        match self {
            Self::Xyz => [0, 1, 2],
            Self::Xzy => [0, 2, 1],
            Self::Yxz => [1, 0, 2],
            Self::Yzx => [1, 2, 0],
            Self::Zxy => [2, 0, 1],
            Self::Zyx => [2, 1, 0],
        }
    }

    /// The glam intrinsic sequence that composes the same quaternion.
    ///
    /// Applying a, b, c about fixed axes equals the intrinsic sequence c, b, a.
    fn intrinsic(self) -> EulerRot {
        match self {
            Self::Xyz => EulerRot::ZYX,
            Self::Xzy => EulerRot::YZX,
            Self::Yxz => EulerRot::ZXY,
            Self::Yzx => EulerRot::XZY,
            Self::Zxy => EulerRot::YXZ,
            Self::Zyx => EulerRot::XYZ,
        }
    }
}

fn axis_rotation(axis: usize, angle: f32) -> Quat {
    match axis {
        0 => Quat::from_rotation_x(angle),
        1 => Quat::from_rotation_y(angle),
        _ => Quat::from_rotation_z(angle),
    }
}

/// Converts Euler angles (radians, one per axis in `x, y, z` lanes) to a
/// quaternion, applying the axis rotations in `order`.
#[must_use]
pub fn euler_to_quat(angles: Vec3, order: RotationOrder) -> Quat {
    order
        .axes()
        .iter()
        .fold(Quat::IDENTITY, |q, &axis| axis_rotation(axis, angles[axis]) * q)
}

/// Inverse of [`euler_to_quat`] for the same `order`.
///
/// Away from gimbal lock, `quat_to_euler(euler_to_quat(e, o), o) ≈ e`.
#[must_use]
pub fn quat_to_euler(q: Quat, order: RotationOrder) -> Vec3 {
    let (first, second, third) = q.normalize().to_euler(order.intrinsic());
    // The intrinsic triple lists the axes in reverse application order.
    let [a, b, c] = order.axes();
    let mut angles = Vec3::ZERO;
    angles[c] = first;
    angles[b] = second;
    angles[a] = third;
    angles
}
