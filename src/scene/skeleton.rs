use glam::Affine3A;
use rustc_hash::FxHashMap;

use crate::assets::descriptor::{self, SkeletonDescriptor};
use crate::errors::{KinemaError, Result};

/// Static description of one joint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointRecord {
    pub name: String,
    pub index: usize,
    /// `None` for a root. Always smaller than `index` once validated.
    pub parent: Option<usize>,
    /// Slot in the inverse-bind / skin-palette arrays, if the joint deforms
    /// geometry.
    pub skin_slot: Option<usize>,
}

/// Shared, immutable description of a joint hierarchy.
///
/// Joints are stored in index order with every parent ahead of its children,
/// so world matrices can be produced by one ascending pass.
#[derive(Debug, Clone)]
pub struct SkeletonDefinition {
    joints: Vec<JointRecord>,
    bind_locals: Vec<Affine3A>,
    inverse_binds: Vec<Affine3A>,
    names: FxHashMap<String, usize>,
}

impl SkeletonDefinition {
    /// Validates and builds a definition.
    ///
    /// `joints` may arrive in any order; each record's `index` decides its
    /// slot. `bind_locals` is indexed by joint index, `inverse_binds` by skin
    /// slot.
    pub fn build(
        joints: Vec<JointRecord>,
        bind_locals: Vec<Affine3A>,
        inverse_binds: Vec<Affine3A>,
    ) -> Result<Self> {
        let count = joints.len();
        if bind_locals.len() != count {
            return Err(KinemaError::MatrixCountMismatch {
                context: "bind-pose local matrices per joint",
                expected: count,
                actual: bind_locals.len(),
            });
        }

        let mut slots: Vec<Option<JointRecord>> = vec![None; count];
        for joint in joints {
            if joint.index >= count {
                return Err(KinemaError::JointIndexOutOfRange {
                    joint: joint.name,
                    index: joint.index,
                    count,
                });
            }
            if let Some(existing) = &slots[joint.index] {
                return Err(KinemaError::DuplicateJointIndex {
                    index: joint.index,
                    first: existing.name.clone(),
                    second: joint.name,
                });
            }
            let index = joint.index;
            slots[index] = Some(joint);
        }
        // Every index in 0..count is now filled exactly once.
        let joints: Vec<JointRecord> = slots.into_iter().flatten().collect();

        let mut slot_owner: Vec<Option<usize>> = vec![None; inverse_binds.len()];
        for joint in &joints {
            if let Some(parent) = joint.parent {
                if parent >= count {
                    return Err(KinemaError::ParentOutOfRange {
                        joint: joint.name.clone(),
                        parent,
                    });
                }
                if parent >= joint.index {
                    return Err(KinemaError::ParentNotBeforeChild {
                        joint: joint.name.clone(),
                        index: joint.index,
                        parent,
                    });
                }
            }

            if let Some(slot) = joint.skin_slot {
                let Some(owner) = slot_owner.get_mut(slot) else {
                    return Err(KinemaError::SkinSlotOutOfRange {
                        joint: joint.name.clone(),
                        slot,
                        count: inverse_binds.len(),
                    });
                };
                if let Some(first) = *owner {
                    return Err(KinemaError::DuplicateSkinSlot {
                        slot,
                        first: joints[first].name.clone(),
                        second: joint.name.clone(),
                    });
                }
                *owner = Some(joint.index);
            }
        }

        let mut names = FxHashMap::default();
        for joint in &joints {
            // First joint wins on duplicate names.
            names.entry(joint.name.clone()).or_insert(joint.index);
        }

        log::debug!(
            "Skeleton built: {} joints, {} skin slots",
            joints.len(),
            inverse_binds.len()
        );

        Ok(Self {
            joints,
            bind_locals,
            inverse_binds,
            names,
        })
    }

    pub fn from_descriptor(desc: &SkeletonDescriptor) -> Result<Self> {
        let joints = desc
            .joints
            .iter()
            .map(|j| JointRecord {
                name: j.name.clone(),
                index: j.index,
                parent: j.parent_index,
                skin_slot: j.skin_slot,
            })
            .collect();
        let bind_locals = desc
            .local_matrices
            .iter()
            .map(descriptor::affine_from_descriptor)
            .collect();
        let inverse_binds = desc
            .inverse_bind_matrices
            .iter()
            .map(descriptor::affine_from_descriptor)
            .collect();

        Self::build(joints, bind_locals, inverse_binds)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_descriptor(&SkeletonDescriptor::from_json_str(json)?)
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Length of the inverse-bind array, and of the exported skin palette.
    #[inline]
    #[must_use]
    pub fn skin_slot_count(&self) -> usize {
        self.inverse_binds.len()
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[JointRecord] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&JointRecord> {
        self.joints.get(index)
    }

    /// Joint index by name.
    #[inline]
    #[must_use]
    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn bind_locals(&self) -> &[Affine3A] {
        &self.bind_locals
    }

    #[inline]
    #[must_use]
    pub fn inverse_binds(&self) -> &[Affine3A] {
        &self.inverse_binds
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind(&self, slot: usize) -> Option<&Affine3A> {
        self.inverse_binds.get(slot)
    }
}
