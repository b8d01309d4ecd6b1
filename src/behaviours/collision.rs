//! Checkpoint arrival detection

use crate::behaviours::{Behaviour, BehaviourKind};
use crate::core::types::{BehaviourId, Vec2};
use crate::events::{Event, EventKind, EventQueue, Stream};
use crate::signals::{InputSignal, Signal};

/// Owns the collided flag and publishes `CheckpointReached` onto the entity
/// stream on the tick the entity closes within the arrival radius
///
/// The event fires on the rising edge only, so lingering inside the radius
/// while the waypoint signal catches up does not re-trigger advancement.
pub struct CollisionBehaviour {
    id: BehaviourId,
    collided: Signal<bool>,
    position: InputSignal<Vec2>,
    checkpoint: InputSignal<Option<Vec2>>,
    arrival_radius_sq: f32,
    stream: Stream,
    events: EventQueue,
}

impl CollisionBehaviour {
    pub fn new(
        collided: Signal<bool>,
        position: InputSignal<Vec2>,
        checkpoint: InputSignal<Option<Vec2>>,
        arrival_radius_sq: f32,
        stream: Stream,
    ) -> Self {
        let events = stream.subscribe();
        Self {
            id: BehaviourId::new(),
            collided,
            position,
            checkpoint,
            arrival_radius_sq,
            stream,
            events,
        }
    }
}

impl Behaviour for CollisionBehaviour {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Collision
    }

    fn run(&mut self, _dt: f32) -> bool {
        let _ = self.events.drain();

        let within = match self.checkpoint.read() {
            Some(checkpoint) => {
                self.position.read().distance_squared(&checkpoint) < self.arrival_radius_sq
            }
            None => false,
        };

        let was_within = self.collided.read();
        if within && !was_within {
            self.stream.publish(Event::broadcast(
                EventKind::CheckpointReached,
                crate::events::timestamp_now(),
            ));
        }
        self.collided.write(within);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(checkpoint: Option<Vec2>) -> (CollisionBehaviour, Signal<Vec2>, Signal<Option<Vec2>>, EventQueue) {
        let stream = Stream::new();
        let observer = stream.subscribe();
        let position = Signal::new(Vec2::default());
        let checkpoint_signal = Signal::new(checkpoint);
        let behaviour = CollisionBehaviour::new(
            Signal::new(false),
            position.reader(),
            checkpoint_signal.reader(),
            0.25,
            stream,
        );
        (behaviour, position, checkpoint_signal, observer)
    }

    #[test]
    fn test_emits_on_arrival() {
        let (mut behaviour, position, _checkpoint, observer) = setup(Some(Vec2::new(1.0, 0.0)));

        behaviour.run(0.1);
        assert!(observer.is_empty());

        position.write(Vec2::new(0.9, 0.0));
        behaviour.run(0.1);
        let arrived: Vec<_> = observer
            .drain()
            .into_iter()
            .filter(|e| matches!(e.kind, EventKind::CheckpointReached))
            .collect();
        assert_eq!(arrived.len(), 1);
    }

    #[test]
    fn test_rising_edge_only() {
        let (mut behaviour, position, _checkpoint, observer) = setup(Some(Vec2::new(1.0, 0.0)));

        position.write(Vec2::new(1.0, 0.1));
        behaviour.run(0.1);
        behaviour.run(0.1);
        behaviour.run(0.1);

        let arrived: Vec<_> = observer
            .drain()
            .into_iter()
            .filter(|e| matches!(e.kind, EventKind::CheckpointReached))
            .collect();
        assert_eq!(arrived.len(), 1);
    }

    #[test]
    fn test_no_checkpoint_no_event() {
        let (mut behaviour, _position, _checkpoint, observer) = setup(None);
        behaviour.run(0.1);
        assert!(observer.is_empty());
    }
}
