//! Integration tests for spawn assembly and the scheduler-driven graph
//!
//! The factory here is always pointed at a missing sprite sheet: every
//! entity must still assemble, animate, and draw via the generated
//! checkerboard placeholder.

use std::collections::VecDeque;

use storefront_siege::behaviours::{Behaviour, CreepFactory};
use storefront_siege::core::config::SimulationConfig;
use storefront_siege::core::types::{CreepKind, Rect, TowerKind, Vec2};
use storefront_siege::creep::sprite::{DrawSurface, SpriteSheet};
use storefront_siege::creep::SpawnRequest;
use storefront_siege::events::{timestamp_now, Broadcast, Event, EventKind};
use storefront_siege::signals::Signal;
use storefront_siege::simulation::Scheduler;

const DT: f32 = 0.1;

fn factory(channel: &Broadcast) -> CreepFactory {
    CreepFactory::new(
        channel,
        Signal::new(Vec2::new(32.0, 32.0)).reader(),
        Box::new(Broadcast::new()),
        "assets/does-not-exist.png",
        SimulationConfig::default(),
    )
}

fn request(waypoints: Option<VecDeque<Vec2>>, goal: Vec2) -> SpawnRequest {
    SpawnRequest {
        kind: CreepKind::Customer,
        position: Vec2::new(0.0, 0.0),
        waypoints,
        goal,
    }
}

#[test]
fn test_scheduler_drives_spawned_graph_to_goal() {
    let channel = Broadcast::new();
    let mut scheduler = Scheduler::subscribe(&channel);
    let mut factory = factory(&channel);

    channel.publish(Event::targeted(
        EventKind::Spawn(request(
            Some(VecDeque::from([Vec2::new(1.0, 0.0)])),
            Vec2::new(2.0, 0.0),
        )),
        factory.sink(),
        timestamp_now(),
    ));
    factory.run(DT);

    scheduler.run(DT);
    assert_eq!(scheduler.len(), 6, "all six behaviours adopted");

    let track = factory.tracks().read().remove(0);
    let mut last_x = track.position.read().x;

    for _ in 0..400 {
        scheduler.run(DT);
        let p = track.position.read();
        assert!(p.x >= last_x, "graph walk should never move backwards");
        assert_eq!(p.y, 0.0);
        last_x = p.x;
    }

    // Past the waypoint and closing on the goal
    assert!(last_x > 1.0);
    assert!(Vec2::new(last_x, 0.0).distance(&Vec2::new(2.0, 0.0)) < 0.5);
}

#[test]
fn test_lethal_damage_retires_health_behaviour() {
    let channel = Broadcast::new();
    let mut scheduler = Scheduler::subscribe(&channel);
    let mut factory = factory(&channel);

    factory.spawn(&request(None, Vec2::new(100.0, 0.0)));
    scheduler.run(DT);
    assert_eq!(scheduler.len(), 6);

    let track = factory.tracks().read().remove(0);
    track.stream.publish(Event::broadcast(
        EventKind::Damage {
            source: TowerKind::Clerk,
            amount: 1e6,
        },
        timestamp_now(),
    ));

    scheduler.run(DT);
    assert_eq!(scheduler.len(), 5, "dead entity's health tracking retires");
}

struct RecordingSurface {
    blits: Vec<(u32, u32, Rect, Rect)>,
}

impl DrawSurface for RecordingSurface {
    fn blit(&mut self, sheet: &SpriteSheet, source: Rect, dest: Rect) {
        self.blits
            .push((sheet.image().width(), sheet.image().height(), source, dest));
    }
}

#[test]
fn test_draw_uses_placeholder_without_raising() {
    let channel = Broadcast::new();
    let mut factory = factory(&channel);

    factory.spawn(&request(None, Vec2::new(5.0, 5.0)));
    let creeps = factory.take_spawned();
    let creep = &creeps[0];

    let bounds = creep.bounds();
    assert_eq!(bounds, Rect::new(-0.25, -0.25, 0.5, 0.5));
    assert_eq!(bounds.center(), creep.position());

    let mut surface = RecordingSurface { blits: Vec::new() };
    let tile = Rect::new(0.0, 0.0, 32.0, 32.0);
    creep.draw(&mut surface, tile);

    assert_eq!(surface.blits.len(), 1);
    let (width, height, source, dest) = surface.blits[0];
    assert_eq!((width, height), (16, 16), "placeholder checkerboard sheet");
    assert_eq!(source, Rect::new(0.0, 0.0, 16.0, 16.0));
    assert_eq!(dest, tile.inner_half());
}

#[test]
fn test_two_entities_have_isolated_streams() {
    let channel = Broadcast::new();
    let mut factory = factory(&channel);

    factory.spawn(&request(None, Vec2::new(100.0, 0.0)));
    factory.spawn(&request(None, Vec2::new(100.0, 0.0)));
    let mut creeps = factory.take_spawned();

    let tracks = factory.tracks().read();
    tracks[0].stream.publish(Event::broadcast(
        EventKind::Damage {
            source: TowerKind::Clerk,
            amount: 30.0,
        },
        timestamp_now(),
    ));

    struct NullManager;
    impl storefront_siege::creep::CreepManager for NullManager {
        fn on_spawn(&mut self, _creep: storefront_siege::creep::Creep) {}
        fn on_death(&mut self, _id: storefront_siege::core::types::CreepId) {}
        fn checkpoint_reached(&mut self, _id: storefront_siege::core::types::CreepId) {}
        fn goal_reached(&mut self, _id: storefront_siege::core::types::CreepId) {}
    }

    let mut manager = NullManager;
    for creep in creeps.iter_mut() {
        creep.update(&mut manager, DT);
    }

    assert_eq!(creeps[0].attributes().health, 70.0);
    assert_eq!(creeps[1].attributes().health, 100.0);
}
