//! Plays a small clip on a three-joint arm and prints where the hand ends up.
//!
//! `RUST_LOG=debug cargo run --example play_clip`

use std::sync::Arc;

use kinema::animation::{Binding, ClipPlayer, LoopMode, PlaybackSettings};
use kinema::{AnimationClip, SkeletonDefinition, SkeletonInstance};

const RIG: &str = r#"{
    "joints": [
        { "name": "shoulder", "idx": 0, "parIdx": -1, "skinIdx": 0 },
        { "name": "elbow",    "idx": 1, "parIdx": 0,  "skinIdx": 1 },
        { "name": "hand",     "idx": 2, "parIdx": 1,  "skinIdx": 2 }
    ],
    "mtx": [
        [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1],
        [1,0,0,0, 0,1,0,0, 0,0,1,0, 1,0,0,1],
        [1,0,0,0, 0,1,0,0, 0,0,1,0, 1,0,0,1]
    ],
    "imtx": [
        [1,0,0,0, 0,1,0,0, 0,0,1,0,  0,0,0,1],
        [1,0,0,0, 0,1,0,0, 0,0,1,0, -1,0,0,1],
        [1,0,0,0, 0,1,0,0, 0,0,1,0, -2,0,0,1]
    ]
}"#;

const WAVE: &str = r#"{
    "name": "wave",
    "lastFrame": 24,
    "channels": [
        {
            "name": "shoulder", "subName": "r", "type": 1, "rord": 0, "expr": 2,
            "comp": [
                [[0, 0, 0, 0]],
                [[0, 0, 0, 0]],
                [[0, 0, 0, 0], [12, 1.2, 0, 0], [24, 0, 0, 0]]
            ]
        },
        {
            "name": "elbow", "subName": "r", "type": 1, "rord": 0, "expr": 1,
            "comp": [
                [[0, 0, 0, 0]],
                [[0, 0, 0, 0]],
                [[0, 0, 0, 0], [6, 0.8, 0, 0], [18, -0.8, 0, 0], [24, 0, 0, 0]]
            ]
        },
        {
            "name": "prop", "subName": "t", "type": 0, "rord": 0, "expr": 0,
            "comp": [[[0, 0, 0, 0]]]
        }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let skeleton = Arc::new(SkeletonDefinition::from_json_str(RIG)?);
    let clip = Arc::new(AnimationClip::from_json_str(WAVE)?);

    let binding = Binding::build(Arc::clone(&clip), &skeleton);
    println!(
        "Bound '{}': {} links, {} channels without a joint",
        binding.name(),
        binding.links().len(),
        binding.dropped_count()
    );

    let mut pose = SkeletonInstance::from_definition(Arc::clone(&skeleton));
    let mut player = ClipPlayer::for_clip(
        &clip,
        PlaybackSettings {
            loop_mode: LoopMode::PingPong,
            ..Default::default()
        },
    );

    let hand = pose
        .joint_index("hand")
        .ok_or_else(|| anyhow::anyhow!("rig has no hand joint"))?;

    // Two seconds at 60 Hz, reported every tenth of a second.
    let dt = 1.0 / 60.0;
    for step in 0..120 {
        let frame = player.advance(dt);
        binding.evaluate(&mut pose, frame);
        pose.update_pose();

        if step % 6 == 0
            && let Some(world) = pose.world_matrix(hand)
        {
            let p = world.translation;
            println!("frame {frame:6.2}  hand ({:+.3}, {:+.3}, {:+.3})", p.x, p.y, p.z);
        }
    }

    println!("Skin palette: {} bytes", pose.skin_bytes().len());
    Ok(())
}
