use glam::{Quat, Vec3, Vec4};

use crate::errors::{KinemaError, Result};
use crate::math::{self, RotationOrder};

/// What the components of a channel represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Plain vector, e.g. a translation.
    Vector,
    /// Euler angle triple in radians, converted to a quaternion on sampling.
    Euler,
    /// Quaternion `x, y, z, w`.
    Quaternion,
}

impl ValueKind {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Vector),
            1 => Ok(Self::Euler),
            2 => Ok(Self::Quaternion),
            other => Err(KinemaError::UnknownValueKind(other)),
        }
    }

    /// Maximum number of keyed components for this kind.
    #[must_use]
    pub fn max_components(self) -> usize {
        match self {
            Self::Vector | Self::Euler => 3,
            Self::Quaternion => 4,
        }
    }
}

/// How two bracketing keyframes are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Constant,
    Linear,
    Cubic,
    SphericalLinear,
}

impl BlendMode {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Constant),
            1 => Ok(Self::Linear),
            2 => Ok(Self::Cubic),
            3 => Ok(Self::SphericalLinear),
            other => Err(KinemaError::UnknownBlendMode(other)),
        }
    }
}

/// Blend functions available to vector and Euler channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorBlend {
    Constant,
    Linear,
    Cubic,
}

/// Blend functions available to quaternion channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationBlend {
    Constant,
    Linear,
    Cubic,
    Spherical,
}

/// Value representation and blend function of a channel.
///
/// Spherical blending only exists on the quaternion arm, so an illegal
/// combination cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelCurve {
    Vector(VectorBlend),
    Euler {
        blend: VectorBlend,
        order: RotationOrder,
    },
    Quaternion(RotationBlend),
}

impl ChannelCurve {
    /// Combines the two descriptor axes, rejecting spherical blending on
    /// anything but quaternions.
    pub fn new(kind: ValueKind, blend: BlendMode, order: RotationOrder) -> Result<Self> {
        let vector_blend = || match blend {
            BlendMode::Constant => Ok(VectorBlend::Constant),
            BlendMode::Linear => Ok(VectorBlend::Linear),
            BlendMode::Cubic => Ok(VectorBlend::Cubic),
            BlendMode::SphericalLinear => Err(KinemaError::IllegalBlend {
                kind: format!("{kind:?}"),
                blend: format!("{blend:?}"),
            }),
        };

        Ok(match kind {
            ValueKind::Vector => Self::Vector(vector_blend()?),
            ValueKind::Euler => Self::Euler {
                blend: vector_blend()?,
                order,
            },
            ValueKind::Quaternion => Self::Quaternion(match blend {
                BlendMode::Constant => RotationBlend::Constant,
                BlendMode::Linear => RotationBlend::Linear,
                BlendMode::Cubic => RotationBlend::Cubic,
                BlendMode::SphericalLinear => RotationBlend::Spherical,
            }),
        })
    }

    #[must_use]
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Vector(_) => ValueKind::Vector,
            Self::Euler { .. } => ValueKind::Euler,
            Self::Quaternion(_) => ValueKind::Quaternion,
        }
    }

    #[must_use]
    pub fn blend_mode(self) -> BlendMode {
        match self {
            Self::Vector(blend) | Self::Euler { blend, .. } => match blend {
                VectorBlend::Constant => BlendMode::Constant,
                VectorBlend::Linear => BlendMode::Linear,
                VectorBlend::Cubic => BlendMode::Cubic,
            },
            Self::Quaternion(blend) => match blend {
                RotationBlend::Constant => BlendMode::Constant,
                RotationBlend::Linear => BlendMode::Linear,
                RotationBlend::Cubic => BlendMode::Cubic,
                RotationBlend::Spherical => BlendMode::SphericalLinear,
            },
        }
    }

    /// Whether sampling yields a rotation (Euler and quaternion channels).
    #[must_use]
    pub fn is_rotation(self) -> bool {
        !matches!(self, Self::Vector(_))
    }
}

/// A sampled channel value.
///
/// Euler channels are delivered as rotations: the triple is converted before
/// blending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    Vector(Vec3),
    Rotation(Quat),
}

impl ChannelValue {
    #[must_use]
    pub fn as_vector(self) -> Option<Vec3> {
        match self {
            Self::Vector(v) => Some(v),
            Self::Rotation(_) => None,
        }
    }

    #[must_use]
    pub fn as_rotation(self) -> Option<Quat> {
        match self {
            Self::Rotation(q) => Some(q),
            Self::Vector(_) => None,
        }
    }

    pub(crate) fn rotation_from_lanes(lanes: Vec4) -> Self {
        Self::Rotation(math::quat_from_lanes(lanes))
    }
}
