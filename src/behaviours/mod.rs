//! Schedulable behaviour units
//!
//! An entity is assembled at runtime from independent behaviours wired
//! together over signals, rather than through a type hierarchy. Every
//! variant implements the one capability that matters: given current inputs
//! and pending events, produce the next output. Each behaviour owns exactly
//! one output signal and one event queue; input signals are read-only
//! handles fixed at graph-build time.

pub mod collision;
pub mod factory;
pub mod health;
pub mod motion;
pub mod render;
pub mod steering;
pub mod waypoint;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::types::BehaviourId;

pub use collision::CollisionBehaviour;
pub use factory::{CreepFactory, CreepTrack};
pub use health::HealthBehaviour;
pub use motion::MoveBehaviour;
pub use render::RenderBehaviour;
pub use steering::SteeringBehaviour;
pub use waypoint::WaypointBehaviour;

/// What a behaviour does, carried on lifecycle announcements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviourKind {
    Health,
    Motion,
    Waypoint,
    Steering,
    Collision,
    Render,
    Factory,
}

/// A unit the scheduler can drive once per tick
///
/// `run` drains the behaviour's event queue completely, in arrival order,
/// then recomputes and writes its owned output from current input reads.
/// Event kinds the behaviour does not recognize are skipped. Returning
/// `false` retires the behaviour from its scheduler.
pub trait Behaviour {
    fn id(&self) -> BehaviourId;
    fn kind(&self) -> BehaviourKind;
    fn run(&mut self, dt: f32) -> bool;
}

/// Shared ownership handle; behaviours travel inside lifecycle events to
/// whatever scheduler adopts them
pub type BehaviourHandle = Rc<RefCell<dyn Behaviour>>;
