//! Cooperative behaviour scheduler
//!
//! Subscribes to the global channel, adopts behaviours from new-behaviour
//! announcements, and drives each one once per tick in registration order.
//! Single-threaded and non-preemptive: a behaviour runs to completion before
//! the next starts, which is what lets signals get away without locks.

use crate::behaviours::BehaviourHandle;
use crate::core::types::SinkId;
use crate::events::{Broadcast, EventKind, EventQueue};

pub struct Scheduler {
    sink: SinkId,
    intake: EventQueue,
    behaviours: Vec<BehaviourHandle>,
}

impl Scheduler {
    pub fn subscribe(channel: &Broadcast) -> Self {
        let (sink, intake) = channel.subscribe();
        Self {
            sink,
            intake,
            behaviours: Vec::new(),
        }
    }

    pub fn sink(&self) -> SinkId {
        self.sink
    }

    /// Number of behaviours currently driven
    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    /// Adopt newly announced behaviours, then run every behaviour once.
    /// Behaviours whose run returns false are retired.
    pub fn run(&mut self, dt: f32) {
        assert!(dt >= 0.0, "elapsed time must be non-negative, got {dt}");

        for event in self.intake.drain() {
            match event.kind {
                EventKind::NewBehaviour { behaviour, kind } => {
                    tracing::debug!(?kind, "behaviour adopted");
                    self.behaviours.push(behaviour);
                }
                _ => {}
            }
        }

        self.behaviours.retain(|handle| handle.borrow_mut().run(dt));
    }
}
