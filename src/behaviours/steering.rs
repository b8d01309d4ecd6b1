//! Steering velocity computation

use crate::behaviours::{Behaviour, BehaviourKind};
use crate::core::types::{BehaviourId, Vec2};
use crate::creep::{seek_velocity, Attributes};
use crate::events::{EventQueue, Stream};
use crate::signals::{InputSignal, Signal};

/// Owns the velocity signal: seeks the current checkpoint, or the goal once
/// the waypoint queue is exhausted, clamped to the entity's speed
pub struct SteeringBehaviour {
    id: BehaviourId,
    velocity: Signal<Vec2>,
    position: InputSignal<Vec2>,
    checkpoint: InputSignal<Option<Vec2>>,
    goal: Vec2,
    attributes: InputSignal<Attributes>,
    events: EventQueue,
}

impl SteeringBehaviour {
    pub fn new(
        velocity: Signal<Vec2>,
        position: InputSignal<Vec2>,
        checkpoint: InputSignal<Option<Vec2>>,
        goal: Vec2,
        attributes: InputSignal<Attributes>,
        stream: &Stream,
    ) -> Self {
        Self {
            id: BehaviourId::new(),
            velocity,
            position,
            checkpoint,
            goal,
            attributes,
            events: stream.subscribe(),
        }
    }
}

impl Behaviour for SteeringBehaviour {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Steering
    }

    fn run(&mut self, _dt: f32) -> bool {
        let _ = self.events.drain();
        let target = self.checkpoint.read().unwrap_or(self.goal);
        let speed = self.attributes.read().speed;
        self.velocity
            .write(seek_velocity(self.position.read(), target, speed));
        true
    }
}
