//! Creep entity state machine
//!
//! A creep walks its waypoint queue toward a terminal goal, taking damage
//! from towers along the way. Population add/remove goes through the
//! lifecycle coordinator's buffers; the only mutation a creep performs
//! directly during the update pass is on its own internal state (position,
//! velocity, waypoint advancement).

pub mod sprite;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{CreepId, CreepKind, Rect, TowerKind, Vec2};
use crate::events::{EventKind, EventQueue, Stream};
use sprite::{DirectionSequences, DrawSurface, Facing, Sprite};

/// Parameters of a spawn request as carried on the global channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub kind: CreepKind,
    pub position: Vec2,
    /// Ordered intermediate targets; `None` means go straight to the goal
    pub waypoints: Option<VecDeque<Vec2>>,
    pub goal: Vec2,
}

/// Mutable per-creep stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub kind: CreepKind,
    pub health: f32,
    pub value: f32,
    pub damage: f32,
    pub speed: f32,
}

impl Attributes {
    pub fn new(kind: CreepKind, health: f32, value: f32, damage: f32, speed: f32) -> Self {
        Self {
            kind,
            health,
            value,
            damage,
            speed,
        }
    }

    /// Damage resolution matrix, keyed by (creep kind, tower kind)
    ///
    /// Adverts talk customers into spending (value up, resolve down) but can
    /// never finish one off: health is floored just above zero. Security
    /// removes auditors outright and only costs customers money. Each row is
    /// exclusive; a hit resolves against exactly one kind's rules.
    pub fn resolve_damage(&mut self, source: TowerKind, amount: f32) {
        match self.kind {
            CreepKind::Auditor => match source {
                TowerKind::Advert => {}
                TowerKind::Clerk => self.health -= amount,
                TowerKind::Security => self.health = 0.0,
            },
            CreepKind::Customer => match source {
                TowerKind::Advert => {
                    self.value += amount;
                    self.health -= amount;
                    if self.health <= 0.0 {
                        self.health = f32::MIN_POSITIVE;
                    }
                }
                TowerKind::Clerk => self.health -= amount,
                TowerKind::Security => self.value -= amount,
            },
            CreepKind::Hobo => match source {
                TowerKind::Advert => {}
                TowerKind::Clerk | TowerKind::Security => self.health -= amount,
            },
        }
    }
}

/// Desired velocity toward a target, clamped to the creep's speed
///
/// Direction is preserved when clamping; within one speed-length of the
/// target the raw offset is used so the creep does not overshoot.
pub fn seek_velocity(position: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let desired = target - position;
    if desired.length() > speed {
        desired.normalize() * speed
    } else {
        desired
    }
}

/// Steering states a creep can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreepState {
    /// Heading for the current waypoint
    SeekingCheckpoint,
    /// Waypoint queue exhausted, heading for the goal
    SeekingGoal,
    /// Health exhausted; terminal
    Dead,
}

/// Callbacks through which a creep hands population transitions to the
/// lifecycle coordinator
///
/// Death and goal arrival only buffer the removal; checkpoint advancement
/// has already happened synchronously when `checkpoint_reached` fires.
pub trait CreepManager {
    fn on_spawn(&mut self, creep: Creep);
    fn on_death(&mut self, id: CreepId);
    fn checkpoint_reached(&mut self, id: CreepId);
    fn goal_reached(&mut self, id: CreepId);
}

/// One mobile unit in the live population
#[derive(Debug)]
pub struct Creep {
    id: CreepId,
    position: Vec2,
    velocity: Vec2,
    checkpoint: Option<Vec2>,
    checkpoints: VecDeque<Vec2>,
    goal: Vec2,
    attributes: Attributes,
    sprite: Sprite,
    sequences: DirectionSequences,
    stream: Stream,
    events: EventQueue,
    arrival_radius_sq: f32,
}

impl Creep {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CreepId,
        sprite: Sprite,
        sequences: DirectionSequences,
        position: Vec2,
        waypoints: Option<VecDeque<Vec2>>,
        goal: Vec2,
        attributes: Attributes,
        stream: Stream,
        arrival_radius_sq: f32,
    ) -> Self {
        let mut checkpoints = waypoints.unwrap_or_default();
        let checkpoint = checkpoints.pop_front();
        let events = stream.subscribe();
        let mut creep = Self {
            id,
            position,
            velocity: Vec2::default(),
            checkpoint,
            checkpoints,
            goal,
            attributes,
            sprite,
            sequences,
            stream,
            events,
            arrival_radius_sq,
        };
        creep.steer();
        creep
    }

    pub fn id(&self) -> CreepId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn checkpoint(&self) -> Option<Vec2> {
        self.checkpoint
    }

    /// Waypoints still queued behind the current checkpoint
    pub fn remaining_waypoints(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn value(&self) -> f32 {
        self.attributes.value
    }

    /// The per-entity event channel damage is delivered on
    pub fn stream(&self) -> Stream {
        self.stream.clone()
    }

    pub fn state(&self) -> CreepState {
        if self.attributes.health <= 0.0 {
            CreepState::Dead
        } else if self.checkpoint.is_some() {
            CreepState::SeekingCheckpoint
        } else {
            CreepState::SeekingGoal
        }
    }

    /// Half-tile bounding box centered on the creep
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x - 0.25, self.position.y - 0.25, 0.5, 0.5)
    }

    /// Render into the center half of the destination tile; pixel work is
    /// delegated to the surface
    pub fn draw(&self, surface: &mut dyn DrawSurface, tile: Rect) {
        self.sprite.draw(surface, tile.inner_half());
    }

    /// Recompute velocity toward checkpoint-else-goal and pick the matching
    /// walk cycle by dominant axis
    fn steer(&mut self) {
        let target = self.checkpoint.unwrap_or(self.goal);
        self.velocity = seek_velocity(self.position, target, self.attributes.speed);
        let facing = Facing::from_velocity(self.velocity);
        self.sprite.set_sequence(self.sequences.for_facing(facing));
    }

    /// Pop the next waypoint; `None` when the queue is exhausted, at which
    /// point steering targets the goal
    fn advance_checkpoint(&mut self) {
        self.checkpoint = self.checkpoints.pop_front();
    }

    /// Apply every pending event on this creep's queue, in arrival order.
    /// Kinds other than damage are not meant for the state machine and are
    /// skipped.
    fn drain_events(&mut self) {
        for event in self.events.drain() {
            match event.kind {
                EventKind::Damage { source, amount } => {
                    self.attributes.resolve_damage(source, amount);
                }
                _ => {}
            }
        }
    }

    /// One simulation step
    ///
    /// Order: drain damage events, death check, steering recomputation,
    /// position integration, checkpoint arrival (advanced synchronously),
    /// goal arrival. Death and goal arrival are handed to the manager and
    /// end the step; the creep itself never leaves the population directly.
    pub fn update(&mut self, manager: &mut dyn CreepManager, dt: f32) {
        self.sprite.update(dt);
        self.drain_events();

        if self.attributes.health <= 0.0 {
            manager.on_death(self.id);
            return;
        }

        self.steer();
        self.position = self.position + self.velocity * dt;

        if let Some(checkpoint) = self.checkpoint {
            if self.position.distance_squared(&checkpoint) < self.arrival_radius_sq {
                self.advance_checkpoint();
                manager.checkpoint_reached(self.id);
                return;
            }
        }

        if self.position.distance_squared(&self.goal) < self.arrival_radius_sq {
            manager.goal_reached(self.id);
        }
    }
}
