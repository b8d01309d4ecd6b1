//! Two-tier event routing
//!
//! The process-wide [`Broadcast`] channel announces behaviour lifecycle to
//! whatever scheduler drives the graph, and carries targeted spawn requests
//! to the creep factory. Each entity additionally gets its own [`Stream`]
//! scoping damage and command events to the behaviours composing that one
//! entity.
//!
//! Delivery is fire-and-forget: no acknowledgement, no backpressure. Queues
//! are FIFO per recipient, unbounded within a tick, and fully drained on the
//! recipient's next drain. Event kinds a recipient does not understand are
//! skipped, never reported.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use ahash::AHashMap;

use crate::behaviours::{BehaviourHandle, BehaviourKind};
use crate::core::types::SinkId;
use crate::creep::SpawnRequest;

/// Nanosecond wall-clock timestamp for event correlation
///
/// All behaviours of one entity are announced with a single shared spawn
/// timestamp so they can be grouped downstream.
pub fn timestamp_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// How an event is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Enqueued only into the named recipient's queue
    Targeted(SinkId),
    /// Fanned out to every current subscriber of the channel
    Broadcast,
}

/// Event payloads understood somewhere in the core
#[derive(Clone)]
pub enum EventKind {
    /// Request to assemble a new creep (consumed by the factory)
    Spawn(SpawnRequest),
    /// A tower hit a creep (consumed by health tracking)
    Damage {
        source: crate::core::types::TowerKind,
        amount: f32,
    },
    /// The entity closed within the arrival radius of its checkpoint
    CheckpointReached,
    /// A freshly built behaviour, announced for scheduler registration
    NewBehaviour {
        behaviour: BehaviourHandle,
        kind: BehaviourKind,
    },
}

impl std::fmt::Debug for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Spawn(req) => f.debug_tuple("Spawn").field(req).finish(),
            EventKind::Damage { source, amount } => f
                .debug_struct("Damage")
                .field("source", source)
                .field("amount", amount)
                .finish(),
            EventKind::CheckpointReached => write!(f, "CheckpointReached"),
            EventKind::NewBehaviour { kind, .. } => {
                f.debug_struct("NewBehaviour").field("kind", kind).finish()
            }
        }
    }
}

/// A routed message with its delivery mode and correlation timestamp
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub delivery: Delivery,
    pub timestamp: u64,
}

impl Event {
    pub fn targeted(kind: EventKind, recipient: SinkId, timestamp: u64) -> Self {
        Self {
            kind,
            delivery: Delivery::Targeted(recipient),
            timestamp,
        }
    }

    pub fn broadcast(kind: EventKind, timestamp: u64) -> Self {
        Self {
            kind,
            delivery: Delivery::Broadcast,
            timestamp,
        }
    }
}

/// Anything events can be pushed into
pub trait EventSink {
    fn deliver(&self, event: Event);
}

/// FIFO queue of pending events for one recipient
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: Rc<RefCell<VecDeque<Event>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Remove and return every pending event, in arrival order
    pub fn drain(&self) -> Vec<Event> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Clone for EventQueue {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl EventSink for EventQueue {
    fn deliver(&self, event: Event) {
        self.push(event);
    }
}

/// Per-entity event channel
///
/// Every behaviour composing one entity subscribes its queue here; events
/// published on the stream reach only those queues, isolating the entity's
/// internals from the rest of the population.
#[derive(Debug, Default)]
pub struct Stream {
    subscribers: Rc<RefCell<Vec<EventQueue>>>,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh queue on this stream and return it
    pub fn subscribe(&self) -> EventQueue {
        let queue = EventQueue::new();
        self.subscribers.borrow_mut().push(queue.clone());
        queue
    }

    /// Fan the event out to every subscriber
    pub fn publish(&self, event: Event) {
        for queue in self.subscribers.borrow().iter() {
            queue.push(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl Clone for Stream {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl EventSink for Stream {
    fn deliver(&self, event: Event) {
        self.publish(event);
    }
}

/// Process-wide broadcast channel with a named-subscriber registry
///
/// Targeted events are looked up by recipient key; broadcast events fan out
/// to every subscriber. A targeted event addressed to an unknown sink is
/// dropped with a warning, consistent with fire-and-forget delivery.
#[derive(Debug, Default)]
pub struct Broadcast {
    subscribers: Rc<RefCell<AHashMap<SinkId, EventQueue>>>,
}

impl Broadcast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new named subscriber, returning its key and queue
    pub fn subscribe(&self) -> (SinkId, EventQueue) {
        let id = SinkId::new();
        let queue = EventQueue::new();
        self.subscribers.borrow_mut().insert(id, queue.clone());
        (id, queue)
    }

    pub fn unsubscribe(&self, id: SinkId) {
        let _ = self.subscribers.borrow_mut().remove(&id);
    }

    pub fn publish(&self, event: Event) {
        match event.delivery {
            Delivery::Targeted(recipient) => {
                if let Some(queue) = self.subscribers.borrow().get(&recipient) {
                    queue.push(event);
                } else {
                    tracing::warn!(?recipient, "dropping event for unknown sink");
                }
            }
            Delivery::Broadcast => {
                for queue in self.subscribers.borrow().values() {
                    queue.push(event.clone());
                }
            }
        }
    }
}

impl Clone for Broadcast {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl EventSink for Broadcast {
    fn deliver(&self, event: Event) {
        self.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TowerKind;

    fn damage(amount: f32) -> EventKind {
        EventKind::Damage {
            source: TowerKind::Clerk,
            amount,
        }
    }

    #[test]
    fn test_queue_drains_fifo() {
        let queue = EventQueue::new();
        queue.push(Event::broadcast(damage(1.0), 1));
        queue.push(Event::broadcast(damage(2.0), 2));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].timestamp, 1);
        assert_eq!(drained[1].timestamp, 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stream_fans_out_to_all_subscribers() {
        let stream = Stream::new();
        let a = stream.subscribe();
        let b = stream.subscribe();

        stream.publish(Event::broadcast(EventKind::CheckpointReached, 0));

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_streams_are_isolated() {
        let ours = Stream::new();
        let theirs = Stream::new();
        let our_queue = ours.subscribe();
        let their_queue = theirs.subscribe();

        ours.publish(Event::broadcast(damage(5.0), 0));

        assert_eq!(our_queue.len(), 1);
        assert!(their_queue.is_empty());
    }

    #[test]
    fn test_broadcast_targeted_reaches_only_recipient() {
        let channel = Broadcast::new();
        let (id_a, queue_a) = channel.subscribe();
        let (_id_b, queue_b) = channel.subscribe();

        channel.publish(Event::targeted(damage(1.0), id_a, 0));

        assert_eq!(queue_a.len(), 1);
        assert!(queue_b.is_empty());
    }

    #[test]
    fn test_broadcast_fans_out() {
        let channel = Broadcast::new();
        let (_, queue_a) = channel.subscribe();
        let (_, queue_b) = channel.subscribe();

        channel.publish(Event::broadcast(EventKind::CheckpointReached, 0));

        assert_eq!(queue_a.len(), 1);
        assert_eq!(queue_b.len(), 1);
    }

    #[test]
    fn test_targeted_to_unknown_sink_is_dropped() {
        let channel = Broadcast::new();
        let (_, queue) = channel.subscribe();

        channel.publish(Event::targeted(damage(1.0), SinkId::new(), 0));

        assert!(queue.is_empty());
    }
}
