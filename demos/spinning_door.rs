//! Headless walkthrough: a door opens on an event, pauses, closes, then a
//! fan spins continuously. Run with `RUST_LOG=debug` to see routing.

use std::thread;
use std::time::Duration;

use glam::Vec3;
use serde_json::json;

use transform_animator::{AnimationKind, ControllerConfig, Node, Transform, World};

const FRAME: Duration = Duration::from_millis(16);

fn door_config() -> anyhow::Result<ControllerConfig> {
    let mut config = ControllerConfig::from_json(
        r#"{
            "id": "door-1",
            "nodeName": "door",
            "kind": "rotation",
            "animation": { "speed": 0.02 },
            "transition": { "useDelay": true, "delay": 0.25 }
        }"#,
    )?;
    config.receivers = json!([
        { "id": "open", "actions": [{ "type": "set-rotation", "params": { "rotationY": 90 } }] },
        {
            "id": "close",
            "actions": [{ "type": "reset-rotation", "params": { "resetSpeed": 0.04 } }]
        }
    ])
    .to_string();
    Ok(config)
}

fn fan_config() -> ControllerConfig {
    let mut config = ControllerConfig::new("fan-1", "fan", AnimationKind::Rotation);
    config.receivers = json!([
        {
            "id": "power",
            "actions": [{ "type": "continuous-rotation", "params": { "continuousSpeedZ": 0.15 } }]
        }
    ])
    .to_string();
    config
}

fn run_frames(world: &mut World, frames: usize) {
    for _ in 0..frames {
        world.update();
        thread::sleep(FRAME);
    }
}

fn log_node(world: &World, name: &str) {
    if let Some(node) = world
        .scene()
        .find_by_name(name)
        .and_then(|h| world.scene().get_node(h))
    {
        let r = node.transform.rotation;
        log::info!(
            "frame {:>4} {name:>5}: rotation ({:.3}, {:.3}, {:.3})",
            world.frame_count(),
            r.x,
            r.y,
            r.z
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = World::new();
    let fan = Transform::from_position(Vec3::new(0.0, 2.5, 0.0));
    world.scene_mut().add_node(Node::new("door"));
    world.scene_mut().add_node(Node::new("fan").with_transform(fan));

    let door = world.spawn_controller(door_config()?)?;
    world.spawn_controller(fan_config())?;

    world.emit("open", json!({}));
    run_frames(&mut world, 60);
    log_node(&world, "door");

    world.dispatch(door, "pause-rotation", &json!({}))?;
    run_frames(&mut world, 10);
    log_node(&world, "door");

    world.dispatch(door, "resume-rotation", &json!({}))?;
    run_frames(&mut world, 60);
    log_node(&world, "door");

    world.emit("close", json!({}));
    world.emit("power", json!({}));
    run_frames(&mut world, 60);
    log_node(&world, "door");
    log_node(&world, "fan");

    Ok(())
}
