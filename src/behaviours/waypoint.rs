//! Waypoint advancement

use std::collections::VecDeque;

use crate::behaviours::{Behaviour, BehaviourKind};
use crate::core::types::{BehaviourId, Vec2};
use crate::events::{EventKind, EventQueue, Stream};
use crate::signals::Signal;

/// Owns the current-checkpoint signal and the queue of remaining waypoints
///
/// Advances on every `CheckpointReached` event from the entity's collision
/// tracking; once the queue is exhausted the signal holds `None` and
/// steering falls through to the goal.
pub struct WaypointBehaviour {
    id: BehaviourId,
    checkpoint: Signal<Option<Vec2>>,
    remaining: VecDeque<Vec2>,
    events: EventQueue,
}

impl WaypointBehaviour {
    /// `checkpoint` must be seeded with the first waypoint (or `None` for a
    /// waypoint-less spawn); `remaining` holds the rest in visit order.
    pub fn new(checkpoint: Signal<Option<Vec2>>, remaining: VecDeque<Vec2>, stream: &Stream) -> Self {
        Self {
            id: BehaviourId::new(),
            checkpoint,
            remaining,
            events: stream.subscribe(),
        }
    }
}

impl Behaviour for WaypointBehaviour {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Waypoint
    }

    fn run(&mut self, _dt: f32) -> bool {
        for event in self.events.drain() {
            match event.kind {
                EventKind::CheckpointReached => {
                    let next = self.remaining.pop_front();
                    tracing::debug!(?next, "waypoint advanced");
                    self.checkpoint.write(next);
                }
                _ => {}
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;

    #[test]
    fn test_advances_through_queue_to_none() {
        let stream = Stream::new();
        let checkpoint = Signal::new(Some(Vec2::new(1.0, 0.0)));
        let reader = checkpoint.reader();
        let remaining = VecDeque::from([Vec2::new(2.0, 0.0)]);
        let mut behaviour = WaypointBehaviour::new(checkpoint, remaining, &stream);

        stream.publish(Event::broadcast(EventKind::CheckpointReached, 0));
        behaviour.run(0.1);
        assert_eq!(reader.read(), Some(Vec2::new(2.0, 0.0)));

        stream.publish(Event::broadcast(EventKind::CheckpointReached, 1));
        behaviour.run(0.1);
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_unrelated_events_do_not_advance() {
        let stream = Stream::new();
        let checkpoint = Signal::new(Some(Vec2::new(1.0, 0.0)));
        let reader = checkpoint.reader();
        let mut behaviour = WaypointBehaviour::new(checkpoint, VecDeque::new(), &stream);

        stream.publish(Event::broadcast(
            EventKind::Damage {
                source: crate::core::types::TowerKind::Clerk,
                amount: 1.0,
            },
            0,
        ));
        behaviour.run(0.1);
        assert_eq!(reader.read(), Some(Vec2::new(1.0, 0.0)));
    }
}
