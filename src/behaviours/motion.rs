//! Position integration

use crate::behaviours::{Behaviour, BehaviourKind};
use crate::core::types::{BehaviourId, Vec2};
use crate::events::{EventQueue, Stream};
use crate::signals::{InputSignal, Signal};

/// Integrates velocity into the owned position signal once per tick
pub struct MoveBehaviour {
    id: BehaviourId,
    position: Signal<Vec2>,
    velocity: InputSignal<Vec2>,
    events: EventQueue,
}

impl MoveBehaviour {
    pub fn new(position: Signal<Vec2>, velocity: InputSignal<Vec2>, stream: &Stream) -> Self {
        Self {
            id: BehaviourId::new(),
            position,
            velocity,
            events: stream.subscribe(),
        }
    }
}

impl Behaviour for MoveBehaviour {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Motion
    }

    fn run(&mut self, dt: f32) -> bool {
        // No motion commands exist yet; the queue is drained to honor the
        // full-drain contract.
        let _ = self.events.drain();
        let position = self.position.read() + self.velocity.read() * dt;
        self.position.write(position);
        true
    }
}
