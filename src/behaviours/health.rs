//! Health tracking for one entity

use crate::behaviours::{Behaviour, BehaviourKind};
use crate::core::types::BehaviourId;
use crate::creep::Attributes;
use crate::events::{EventKind, EventQueue, Stream};
use crate::signals::Signal;

/// Applies incoming tower damage to the entity's attributes
///
/// Owns the attributes signal; everything else (steering speed, scoring
/// value) reads it. Retires itself once health is exhausted.
pub struct HealthBehaviour {
    id: BehaviourId,
    attributes: Signal<Attributes>,
    events: EventQueue,
}

impl HealthBehaviour {
    pub fn new(attributes: Signal<Attributes>, stream: &Stream) -> Self {
        Self {
            id: BehaviourId::new(),
            attributes,
            events: stream.subscribe(),
        }
    }
}

impl Behaviour for HealthBehaviour {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Health
    }

    fn run(&mut self, _dt: f32) -> bool {
        let mut attributes = self.attributes.read();
        for event in self.events.drain() {
            match event.kind {
                EventKind::Damage { source, amount } => {
                    attributes.resolve_damage(source, amount);
                }
                _ => {}
            }
        }
        self.attributes.write(attributes);
        attributes.health > 0.0
    }
}
