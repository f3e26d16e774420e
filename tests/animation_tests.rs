//! Animation System Tests
//!
//! Tests for:
//! - Bracket clamping before the first / after the last keyframe
//! - Constant, linear, cubic Hermite and spherical blending
//! - Euler channels delivered as rotations
//! - Partial channels sampled over the current value
//! - Binding name matching and per-frame evaluation

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};
use std::sync::Arc;

use glam::{Affine3A, Quat, Vec3};

use kinema::animation::{
    AnimationClip, Binding, BindingSet, BlendMode, ChannelCurve, ChannelValue, ClipLibrary,
    Keyframe, KeyframeChannel, TargetPath, ValueKind,
};
use kinema::math::RotationOrder;
use kinema::scene::{JointRecord, SkeletonDefinition, SkeletonInstance};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Same rotation up to sign.
fn same_rotation(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - 1e-6
}

fn curve(kind: ValueKind, blend: BlendMode) -> ChannelCurve {
    ChannelCurve::new(kind, blend, RotationOrder::Xyz).unwrap()
}

fn scalar_channel(blend: BlendMode, keys: Vec<Keyframe>) -> KeyframeChannel {
    KeyframeChannel::new("joint", "t", curve(ValueKind::Vector, blend), [keys]).unwrap()
}

fn x_of(value: ChannelValue) -> f32 {
    value.as_vector().unwrap().x
}

// ============================================================================
// Out-of-range sampling
// ============================================================================

#[test]
fn before_first_keyframe_is_exact() {
    let ch = scalar_channel(
        BlendMode::Cubic,
        vec![Keyframe::new(2.0, 3.7, 5.0, -4.0), Keyframe::new(8.0, -1.25, 1.0, 1.0)],
    );
    for frame in [-1000.0, -1.0, 0.0, 1.999, 2.0] {
        assert_eq!(x_of(ch.sample(frame)).to_bits(), 3.7_f32.to_bits(), "frame {frame}");
    }
}

#[test]
fn after_last_keyframe_is_exact() {
    let ch = scalar_channel(
        BlendMode::Linear,
        vec![Keyframe::flat(2.0, 3.7), Keyframe::flat(8.0, -1.25)],
    );
    for frame in [8.0, 8.001, 100.0, 1e9] {
        assert_eq!(x_of(ch.sample(frame)).to_bits(), (-1.25_f32).to_bits(), "frame {frame}");
    }
}

// ============================================================================
// Blend modes
// ============================================================================

#[test]
fn linear_midpoint() {
    let ch = scalar_channel(
        BlendMode::Linear,
        vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, 10.0)],
    );
    assert_eq!(x_of(ch.sample(5.0)), 5.0);
    assert!(approx(x_of(ch.sample(2.5)), 2.5));
}

#[test]
fn linear_exact_keyframes() {
    let ch = scalar_channel(
        BlendMode::Linear,
        vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(1.0, 10.0), Keyframe::flat(2.0, 20.0)],
    );
    assert!(approx(x_of(ch.sample(0.0)), 0.0));
    assert!(approx(x_of(ch.sample(1.0)), 10.0));
    assert!(approx(x_of(ch.sample(2.0)), 20.0));
    assert!(approx(x_of(ch.sample(1.5)), 15.0));
}

#[test]
fn constant_holds_low_keyframe() {
    let ch = scalar_channel(
        BlendMode::Constant,
        vec![Keyframe::flat(0.0, 1.0), Keyframe::flat(10.0, 2.0)],
    );
    assert_eq!(x_of(ch.sample(9.9)), 1.0);
    assert_eq!(x_of(ch.sample(10.0)), 2.0);
}

#[test]
fn cubic_with_secant_slopes_matches_linear_at_midpoint() {
    // Secant slope of (0, 0) -> (10, 10) is 1.
    let keys = vec![Keyframe::new(0.0, 0.0, 1.0, 1.0), Keyframe::new(10.0, 10.0, 1.0, 1.0)];
    let cubic = scalar_channel(BlendMode::Cubic, keys.clone());
    let linear = scalar_channel(BlendMode::Linear, keys);

    let c = x_of(cubic.sample(5.0));
    let l = x_of(linear.sample(5.0));
    assert!(approx(c, l), "cubic {c} != linear {l}");
}

#[test]
fn cubic_hits_keyframes() {
    let ch = scalar_channel(
        BlendMode::Cubic,
        vec![Keyframe::new(0.0, 0.0, 0.0, 3.0), Keyframe::new(1.0, 10.0, -2.0, 0.0)],
    );
    assert!(approx(x_of(ch.sample(0.0)), 0.0));
    assert!(approx(x_of(ch.sample(1.0)), 10.0));
}

#[test]
fn vector_components_blend_independently() {
    let x = vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, 10.0)];
    let y = vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(4.0, 4.0)];
    let z = vec![Keyframe::flat(5.0, 7.0)];
    let ch = KeyframeChannel::new(
        "hip",
        "t",
        curve(ValueKind::Vector, BlendMode::Linear),
        [x, y, z],
    )
    .unwrap();

    let v = ch.sample(2.0).as_vector().unwrap();
    assert!(approx(v.x, 2.0));
    assert!(approx(v.y, 2.0));
    assert_eq!(v.z, 7.0);
}

#[test]
fn slerp_halfway_between_zero_and_ninety_degrees() {
    let half = FRAC_PI_4.sin();
    let ch = KeyframeChannel::new(
        "head",
        "r",
        curve(ValueKind::Quaternion, BlendMode::SphericalLinear),
        [
            vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, half)],
            vec![Keyframe::flat(0.0, 1.0), Keyframe::flat(10.0, SQRT_2 / 2.0)],
        ],
    )
    .unwrap();

    let q = ch.sample(5.0).as_rotation().unwrap();
    let expected = Quat::from_rotation_z(FRAC_PI_4);
    assert!(same_rotation(q, expected), "got {q:?}");
}

#[test]
fn quaternion_on_key_is_returned_untouched() {
    let lanes = [0.1_f32, 0.2, 0.3, 0.9];
    let runs: Vec<Vec<Keyframe>> = lanes.iter().map(|&v| vec![Keyframe::flat(0.0, v)]).collect();
    let ch = KeyframeChannel::new(
        "head",
        "r",
        curve(ValueKind::Quaternion, BlendMode::Linear),
        &runs,
    )
    .unwrap();

    let q = ch.sample(3.0).as_rotation().unwrap();
    assert_eq!(q.to_array(), lanes);
}

#[test]
fn euler_channel_yields_rotation() {
    let ch = KeyframeChannel::new(
        "spine",
        "r",
        curve(ValueKind::Euler, BlendMode::Linear),
        [
            vec![Keyframe::flat(0.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, FRAC_PI_2)],
            vec![Keyframe::flat(0.0, 0.0)],
        ],
    )
    .unwrap();

    // All components on a key: converted, not blended.
    let end = ch.sample(10.0).as_rotation().unwrap();
    assert!(same_rotation(end, Quat::from_rotation_y(FRAC_PI_2)), "{end:?}");

    // Blending happens between the converted quaternions.
    let mid = ch.sample(5.0).as_rotation().unwrap();
    assert!(same_rotation(mid, Quat::from_rotation_y(FRAC_PI_4)), "{mid:?}");
    assert!(approx(mid.length(), 1.0));
}

#[test]
fn euler_linear_blend_follows_keyed_angles() {
    // 0 -> 6 rad about Z: the endpoint quaternions sit on opposite
    // hemispheres, the midpoint must still be the keyed 3 rad.
    let ch = KeyframeChannel::new(
        "spine",
        "r",
        curve(ValueKind::Euler, BlendMode::Linear),
        [
            vec![Keyframe::flat(0.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, 6.0)],
        ],
    )
    .unwrap();

    let mid = ch.sample(5.0).as_rotation().unwrap();
    assert!(same_rotation(mid, Quat::from_rotation_z(3.0)), "got {mid:?}");
}

#[test]
fn quaternion_linear_blend_is_componentwise() {
    let end = Quat::from_rotation_z(4.0);
    assert!(Quat::IDENTITY.dot(end) < 0.0);

    let runs: Vec<Vec<Keyframe>> = Quat::IDENTITY
        .to_array()
        .iter()
        .zip(end.to_array())
        .map(|(&from, to)| vec![Keyframe::flat(0.0, from), Keyframe::flat(10.0, to)])
        .collect();
    let ch = KeyframeChannel::new(
        "head",
        "r",
        curve(ValueKind::Quaternion, BlendMode::Linear),
        &runs,
    )
    .unwrap();

    // Normalised lerp of identity and a 4 rad turn lands on the 2 rad turn,
    // not on the short way round.
    let mid = ch.sample(5.0).as_rotation().unwrap();
    assert!(same_rotation(mid, Quat::from_rotation_z(2.0)), "got {mid:?}");
    assert!(approx(mid.length(), 1.0));
}

#[test]
fn spherical_blend_is_rejected_for_vectors() {
    let spherical = |kind| ChannelCurve::new(kind, BlendMode::SphericalLinear, RotationOrder::Xyz);
    assert!(spherical(ValueKind::Vector).is_err());
    assert!(spherical(ValueKind::Euler).is_err());
    assert!(spherical(ValueKind::Quaternion).is_ok());
}

#[test]
fn partial_channel_keeps_current_lanes() {
    let ch = scalar_channel(
        BlendMode::Linear,
        vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, 10.0)],
    );
    let v = ch
        .sample_over(ChannelValue::Vector(Vec3::new(-1.0, 2.0, 3.0)), 5.0)
        .as_vector()
        .unwrap();
    assert_eq!(v, Vec3::new(5.0, 2.0, 3.0));
}

// ============================================================================
// Binding
// ============================================================================

fn chain_skeleton() -> Arc<SkeletonDefinition> {
    let joints = ["root", "mid", "tip"]
        .iter()
        .enumerate()
        .map(|(i, name)| JointRecord {
            name: (*name).to_string(),
            index: i,
            parent: i.checked_sub(1),
            skin_slot: Some(i),
        })
        .collect();
    let bind = vec![
        Affine3A::IDENTITY,
        Affine3A::from_translation(Vec3::new(0.0, 1.0, 0.0)),
        Affine3A::from_translation(Vec3::new(0.0, 1.0, 0.0)),
    ];
    Arc::new(SkeletonDefinition::build(joints, bind, vec![Affine3A::IDENTITY; 3]).unwrap())
}

fn translation_channel(joint: &str, from: Vec3, to: Vec3) -> KeyframeChannel {
    let runs: Vec<Vec<Keyframe>> = (0..3)
        .map(|i| vec![Keyframe::flat(0.0, from[i]), Keyframe::flat(10.0, to[i])])
        .collect();
    KeyframeChannel::new(joint, "t", curve(ValueKind::Vector, BlendMode::Linear), &runs).unwrap()
}

#[test]
fn unmatched_channel_is_dropped() {
    let skeleton = chain_skeleton();
    let clip = AnimationClip::new(
        "wag",
        10.0,
        vec![translation_channel("tail", Vec3::ZERO, Vec3::ONE)],
    )
    .unwrap();

    let binding = Binding::build(Arc::new(clip), &skeleton);
    assert!(binding.links().is_empty());
    assert_eq!(binding.dropped_count(), 1);

    let mut pose = SkeletonInstance::from_definition(skeleton);
    let before: Vec<_> = (0..pose.joint_count()).map(|i| *pose.transform(i).unwrap()).collect();
    binding.evaluate(&mut pose, 5.0);
    let after: Vec<_> = (0..pose.joint_count()).map(|i| *pose.transform(i).unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
fn evaluate_writes_position_and_rotation() {
    let skeleton = chain_skeleton();
    let rotation = KeyframeChannel::new(
        "root",
        "r",
        curve(ValueKind::Euler, BlendMode::Linear),
        [
            vec![Keyframe::flat(0.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0)],
            vec![Keyframe::flat(0.0, 0.0), Keyframe::flat(10.0, FRAC_PI_2)],
        ],
    )
    .unwrap();
    let clip = AnimationClip::new(
        "reach",
        10.0,
        vec![
            translation_channel("mid", Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 3.0, 0.0)),
            rotation,
        ],
    )
    .unwrap();

    let binding = Binding::build(Arc::new(clip), &skeleton);
    assert_eq!(binding.links().len(), 2);
    assert_eq!(binding.links()[0].target, TargetPath::Translation);
    assert_eq!(binding.links()[1].target, TargetPath::Rotation);

    let mut pose = SkeletonInstance::from_definition(Arc::clone(&skeleton));
    binding.evaluate(&mut pose, 10.0);
    pose.update_pose();

    let mid = pose.joint_index("mid").unwrap();
    assert_eq!(pose.transform(mid).unwrap().position, Vec3::new(0.0, 3.0, 0.0));

    // Root turned 90 degrees about Z: +Y maps to -X.
    let tip: Vec3 = pose.world_matrix(2).unwrap().translation.into();
    assert!((tip - Vec3::new(-4.0, 0.0, 0.0)).length() < 1e-4, "tip at {tip:?}");
}

#[test]
fn mismatched_targets_are_ignored() {
    let skeleton = chain_skeleton();
    let scale = KeyframeChannel::new(
        "mid",
        "s",
        curve(ValueKind::Vector, BlendMode::Linear),
        [vec![Keyframe::flat(0.0, 2.0)]],
    )
    .unwrap();
    let vector_on_rotation = KeyframeChannel::new(
        "mid",
        "r",
        curve(ValueKind::Vector, BlendMode::Linear),
        [vec![Keyframe::flat(0.0, 2.0)]],
    )
    .unwrap();
    let clip = AnimationClip::new("odd", 1.0, vec![scale, vector_on_rotation]).unwrap();

    let binding = Binding::build(Arc::new(clip), &skeleton);
    assert!(binding.links().is_empty());
    assert_eq!(binding.ignored_count(), 2);
    assert_eq!(binding.dropped_count(), 0);
}

#[test]
fn binding_on_smaller_instance_does_not_panic() {
    let skeleton = chain_skeleton();
    let clip = AnimationClip::new(
        "reach",
        10.0,
        vec![translation_channel("tip", Vec3::ZERO, Vec3::ONE)],
    )
    .unwrap();
    let binding = Binding::build(Arc::new(clip), &skeleton);

    let single = SkeletonDefinition::build(
        vec![JointRecord {
            name: "root".to_string(),
            index: 0,
            parent: None,
            skin_slot: None,
        }],
        vec![Affine3A::IDENTITY],
        Vec::new(),
    )
    .unwrap();
    let mut pose = SkeletonInstance::from_definition(Arc::new(single));
    binding.evaluate(&mut pose, 5.0);
    assert_eq!(pose.transform(0).unwrap().position, Vec3::ZERO);
}

#[test]
fn binding_set_follows_library_order() {
    let skeleton = chain_skeleton();
    let mut library = ClipLibrary::new();
    library
        .insert(AnimationClip::new("idle", 1.0, Vec::new()).unwrap())
        .unwrap();
    library
        .insert(
            AnimationClip::new(
                "reach",
                10.0,
                vec![translation_channel("mid", Vec3::ZERO, Vec3::ONE)],
            )
            .unwrap(),
        )
        .unwrap();

    let set = BindingSet::build(&library, &skeleton);
    assert_eq!(set.len(), 2);
    assert_eq!(set.get(0).unwrap().name(), "idle");
    assert_eq!(set.find("reach").unwrap().links().len(), 1);
    assert_eq!(set.find_index("reach"), library.find_index("reach"));
    assert!(set.find("jump").is_none());
}
