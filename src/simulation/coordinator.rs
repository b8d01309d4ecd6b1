//! Lifecycle coordination - the per-tick driver
//!
//! Population changes requested during a tick are buffered and committed at
//! tick boundaries, never applied while the live list is being iterated.
//! Tick phase order, fixed:
//!
//! (a) commit pending spawns into the live list, so a creep spawned at the
//!     boundary participates in this tick's update pass;
//! (b) run the spawn factory: spawn requests drained now become pending
//!     creeps and commit at the next boundary;
//! (c) update every live creep's state machine; damage events already
//!     delivered to entity streams are drained here, checkpoint advancement
//!     happens synchronously, death and goal arrival only buffer removals;
//! (d) commit pending removals and adjust the score: a death credits the
//!     creep's value, a goal arrival debits it.
//!
//! A creep that dies in (c) stays in the live list until (d) of the same
//! tick - a renderer drawing between those phases still sees the corpse for
//! the rest of that tick, and it is never updated or drawn again afterwards.

use crate::behaviours::{Behaviour, CreepFactory, CreepTrack};
use crate::core::error::{GameError, Result};
use crate::core::types::{CreepId, Tick, TowerKind};
use crate::creep::{Creep, CreepManager, SpawnRequest};
use crate::events::{timestamp_now, Broadcast, Event, EventKind};
use crate::signals::InputSignal;

/// Live population, pending-change buffers, and the aggregate score
pub struct Coordinator {
    channel: Broadcast,
    factory: CreepFactory,
    creeps: Vec<Creep>,
    pending_spawns: Vec<Creep>,
    pending_deaths: Vec<CreepId>,
    pending_goals: Vec<CreepId>,
    score: f32,
    current_tick: Tick,
}

impl Coordinator {
    pub fn new(channel: Broadcast, factory: CreepFactory) -> Self {
        Self {
            channel,
            factory,
            creeps: Vec::new(),
            pending_spawns: Vec::new(),
            pending_deaths: Vec::new(),
            pending_goals: Vec::new(),
            score: 0.0,
            current_tick: 0,
        }
    }

    /// Publish a spawn request to the factory over the global channel
    pub fn request_spawn(&self, request: SpawnRequest) {
        tracing::debug!(kind = ?request.kind, "spawn requested");
        self.channel.publish(Event::targeted(
            EventKind::Spawn(request),
            self.factory.sink(),
            timestamp_now(),
        ));
    }

    /// Deliver one tower hit to a creep's event stream
    ///
    /// The event is drained by the target at its next update. Collision and
    /// range detection are the caller's concern.
    pub fn apply_damage(&self, target: CreepId, source: TowerKind, amount: f32) -> Result<()> {
        let creep = self
            .creeps
            .iter()
            .chain(self.pending_spawns.iter())
            .find(|c| c.id() == target)
            .ok_or(GameError::CreepNotFound(target))?;
        creep.stream().publish(Event::broadcast(
            EventKind::Damage { source, amount },
            timestamp_now(),
        ));
        Ok(())
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Zero is a valid no-op step; negative elapsed time is a wiring bug.
    pub fn tick(&mut self, dt: f32) {
        assert!(dt >= 0.0, "elapsed time must be non-negative, got {dt}");

        // (a) commit spawns
        for creep in self.pending_spawns.drain(..) {
            tracing::debug!(id = ?creep.id(), "spawn committed");
            self.creeps.push(creep);
        }

        // (b) drain spawn requests into the pending buffer
        self.factory.run(dt);
        for creep in self.factory.take_spawned() {
            self.on_spawn(creep);
        }

        // (c) update pass; the live list itself is never mutated here
        let mut creeps = std::mem::take(&mut self.creeps);
        for creep in creeps.iter_mut() {
            creep.update(self, dt);
        }
        self.creeps = creeps;

        // (d) commit removals, retire tracks, and settle the score
        for id in std::mem::take(&mut self.pending_deaths) {
            if let Some(index) = self.creeps.iter().position(|c| c.id() == id) {
                let creep = self.creeps.remove(index);
                self.factory.retire_track(id);
                self.score += creep.value();
                tracing::info!(?id, value = creep.value(), score = self.score, "creep died");
            }
        }
        for id in std::mem::take(&mut self.pending_goals) {
            if let Some(index) = self.creeps.iter().position(|c| c.id() == id) {
                let creep = self.creeps.remove(index);
                self.factory.retire_track(id);
                self.score -= creep.value();
                tracing::info!(?id, value = creep.value(), score = self.score, "creep reached goal");
            }
        }

        self.current_tick += 1;
    }

    /// Aggregate score after the last commit
    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn creeps(&self) -> &[Creep] {
        &self.creeps
    }

    pub fn population(&self) -> usize {
        self.creeps.len()
    }

    pub fn pending_spawn_count(&self) -> usize {
        self.pending_spawns.len()
    }

    /// Active creep tracks registered by the factory
    pub fn tracks(&self) -> InputSignal<Vec<CreepTrack>> {
        self.factory.tracks()
    }
}

impl CreepManager for Coordinator {
    fn on_spawn(&mut self, creep: Creep) {
        self.pending_spawns.push(creep);
    }

    fn on_death(&mut self, id: CreepId) {
        self.pending_deaths.push(id);
    }

    fn checkpoint_reached(&mut self, id: CreepId) {
        tracing::debug!(?id, "checkpoint reached");
    }

    fn goal_reached(&mut self, id: CreepId) {
        self.pending_goals.push(id);
    }
}
