//! Creep spawn assembly
//!
//! The factory listens for targeted spawn requests on the global channel.
//! For each request it builds the full graph of cooperating behaviours for
//! one new creep (health, motion, waypoint, steering, collision, render)
//! wired through fresh signals and a fresh per-entity stream, announces
//! every behaviour for scheduler registration, and assembles the compact
//! state-machine record the lifecycle coordinator buffers as a pending
//! spawn. Record and graph share the entity's stream, so damage published
//! there reaches both renditions.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::behaviours::{
    Behaviour, BehaviourHandle, BehaviourKind, CollisionBehaviour, HealthBehaviour, MoveBehaviour,
    RenderBehaviour, SteeringBehaviour, WaypointBehaviour,
};
use crate::core::config::{base_attributes, SimulationConfig};
use crate::core::types::{BehaviourId, CreepId, SinkId, Vec2};
use crate::creep::sprite::{DirectionSequences, Sprite, SpriteSheet};
use crate::creep::{Attributes, Creep, SpawnRequest};
use crate::events::{timestamp_now, Broadcast, Event, EventKind, EventQueue, EventSink, Stream};
use crate::signals::{InputSignal, Signal};

/// Position/event-stream pair registered for every spawned entity, through
/// which towers find targets and deliver damage
#[derive(Debug, Clone)]
pub struct CreepTrack {
    pub id: CreepId,
    pub position: InputSignal<Vec2>,
    pub stream: Stream,
}

/// Spawn behaviour: drains spawn requests, emits assembled creeps
pub struct CreepFactory {
    id: BehaviourId,
    sink: SinkId,
    events: EventQueue,
    config: SimulationConfig,
    sheet_path: PathBuf,
    sheet: Option<SpriteSheet>,
    tracks: Signal<Vec<CreepTrack>>,
    tile_size: InputSignal<Vec2>,
    behaviour_watcher: Box<dyn EventSink>,
    draw_watcher: Box<dyn EventSink>,
    spawned: Vec<Creep>,
}

impl CreepFactory {
    /// Subscribes onto the global channel; spawn requests must be targeted
    /// at [`CreepFactory::sink`]. New-behaviour announcements go back out on
    /// the same channel; render behaviours are additionally announced to the
    /// draw watcher.
    pub fn new(
        channel: &Broadcast,
        tile_size: InputSignal<Vec2>,
        draw_watcher: Box<dyn EventSink>,
        sheet_path: impl Into<PathBuf>,
        config: SimulationConfig,
    ) -> Self {
        let (sink, events) = channel.subscribe();
        Self {
            id: BehaviourId::new(),
            sink,
            events,
            config,
            sheet_path: sheet_path.into(),
            sheet: None,
            tracks: Signal::new(Vec::new()),
            tile_size,
            behaviour_watcher: Box::new(channel.clone()),
            draw_watcher,
            spawned: Vec::new(),
        }
    }

    /// Key for targeting spawn requests at this factory
    pub fn sink(&self) -> SinkId {
        self.sink
    }

    /// Read handle onto the active creep tracks collection
    pub fn tracks(&self) -> InputSignal<Vec<CreepTrack>> {
        self.tracks.reader()
    }

    /// Creeps assembled since the last call, for the coordinator's
    /// pending-spawn buffer
    pub fn take_spawned(&mut self) -> Vec<Creep> {
        std::mem::take(&mut self.spawned)
    }

    /// Resolve the sprite sheet, caching the result
    ///
    /// A missing or unreadable sheet degrades to the generated checkerboard;
    /// spawning never fails over presentation resources.
    fn sheet(&mut self) -> SpriteSheet {
        if let Some(sheet) = &self.sheet {
            return sheet.clone();
        }
        let sheet = match SpriteSheet::load(&self.sheet_path, self.config.sheet_grid) {
            Ok(sheet) => sheet,
            Err(err) => {
                tracing::warn!(
                    path = %self.sheet_path.display(),
                    %err,
                    "sprite sheet unavailable, substituting placeholder"
                );
                SpriteSheet::placeholder(self.config.placeholder_size)
            }
        };
        self.sheet = Some(sheet.clone());
        sheet
    }

    fn announce(&self, handle: BehaviourHandle, kind: BehaviourKind, birth: u64) {
        self.behaviour_watcher
            .deliver(Event::broadcast(EventKind::NewBehaviour { behaviour: handle, kind }, birth));
    }

    fn register_track(&self, track: CreepTrack) {
        let mut tracks = self.tracks.read();
        tracks.push(track);
        self.tracks.write(tracks);
    }

    /// Drop a removed creep's track so towers stop targeting it
    pub fn retire_track(&self, id: CreepId) {
        let mut tracks = self.tracks.read();
        tracks.retain(|track| track.id != id);
        self.tracks.write(tracks);
    }

    /// Build one entity: behaviour graph plus state-machine record
    ///
    /// All six behaviours are announced with a single shared spawn
    /// timestamp so downstream consumers can correlate them.
    pub fn spawn(&mut self, request: &SpawnRequest) -> Vec<BehaviourHandle> {
        let birth = timestamp_now();
        let id = CreepId::new();
        let stream = Stream::new();
        let sheet = self.sheet();
        let sequences = DirectionSequences::standard(self.config.frame_duration);

        let (health, value, damage, speed) = base_attributes(request.kind);
        let attributes = Signal::new(Attributes::new(request.kind, health, value, damage, speed));
        let attributes_reader = attributes.reader();

        let position = Signal::new(request.position);
        let position_reader = position.reader();
        let velocity = Signal::new(Vec2::default());
        let velocity_reader = velocity.reader();

        let mut waypoints = request.waypoints.clone().unwrap_or_default();
        let checkpoint = Signal::new(waypoints.pop_front());
        let checkpoint_reader = checkpoint.reader();

        let health_behaviour: BehaviourHandle =
            Rc::new(RefCell::new(HealthBehaviour::new(attributes, &stream)));
        self.announce(health_behaviour.clone(), BehaviourKind::Health, birth);

        let motion: BehaviourHandle = Rc::new(RefCell::new(MoveBehaviour::new(
            position,
            velocity_reader.clone(),
            &stream,
        )));
        self.announce(motion.clone(), BehaviourKind::Motion, birth);

        let waypoint: BehaviourHandle = Rc::new(RefCell::new(WaypointBehaviour::new(
            checkpoint,
            waypoints,
            &stream,
        )));
        self.announce(waypoint.clone(), BehaviourKind::Waypoint, birth);

        let steering: BehaviourHandle = Rc::new(RefCell::new(SteeringBehaviour::new(
            velocity,
            position_reader.clone(),
            checkpoint_reader.clone(),
            request.goal,
            attributes_reader,
            &stream,
        )));
        self.announce(steering.clone(), BehaviourKind::Steering, birth);

        let collision: BehaviourHandle = Rc::new(RefCell::new(CollisionBehaviour::new(
            Signal::new(false),
            position_reader.clone(),
            checkpoint_reader,
            self.config.arrival_radius_sq,
            stream.clone(),
        )));
        self.announce(collision.clone(), BehaviourKind::Collision, birth);

        let render: BehaviourHandle = Rc::new(RefCell::new(RenderBehaviour::new(
            Signal::new(false),
            position_reader.clone(),
            velocity_reader,
            self.tile_size.clone(),
            Sprite::new(sheet.clone(), &sequences.south),
            sequences.clone(),
            &stream,
        )));
        self.announce(render.clone(), BehaviourKind::Render, birth);
        self.draw_watcher.deliver(Event::broadcast(
            EventKind::NewBehaviour {
                behaviour: render.clone(),
                kind: BehaviourKind::Render,
            },
            birth,
        ));

        self.register_track(CreepTrack {
            id,
            position: position_reader,
            stream: stream.clone(),
        });

        let record = Creep::new(
            id,
            Sprite::new(sheet, &sequences.south),
            sequences,
            request.position,
            request.waypoints.clone(),
            request.goal,
            Attributes::new(request.kind, health, value, damage, speed),
            stream,
            self.config.arrival_radius_sq,
        );
        tracing::info!(kind = ?request.kind, id = ?record.id(), "creep spawned");
        self.spawned.push(record);

        vec![health_behaviour, motion, waypoint, steering, collision, render]
    }
}

impl Behaviour for CreepFactory {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Factory
    }

    fn run(&mut self, _dt: f32) -> bool {
        for event in self.events.drain() {
            match event.kind {
                EventKind::Spawn(request) => {
                    let _ = self.spawn(&request);
                }
                _ => {}
            }
        }
        true
    }
}
