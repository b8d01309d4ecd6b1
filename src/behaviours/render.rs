//! Presentation and animation state

use crate::behaviours::{Behaviour, BehaviourKind};
use crate::core::types::{BehaviourId, Rect, Vec2};
use crate::creep::sprite::{DirectionSequences, DrawSurface, Facing, Sprite};
use crate::events::{EventQueue, Stream};
use crate::signals::{InputSignal, Signal};

/// Advances the walk-cycle animation and selects the facing sequence from
/// the current velocity's dominant axis
///
/// Owns the visible flag and the sprite playhead. The flag starts false and
/// is raised on the first run, so an entity is never drawn before its graph
/// has been driven once. Pixel drawing stays with the host renderer via
/// [`DrawSurface`].
pub struct RenderBehaviour {
    id: BehaviourId,
    visible: Signal<bool>,
    position: InputSignal<Vec2>,
    velocity: InputSignal<Vec2>,
    tile_size: InputSignal<Vec2>,
    sprite: Sprite,
    sequences: DirectionSequences,
    events: EventQueue,
}

impl RenderBehaviour {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        visible: Signal<bool>,
        position: InputSignal<Vec2>,
        velocity: InputSignal<Vec2>,
        tile_size: InputSignal<Vec2>,
        sprite: Sprite,
        sequences: DirectionSequences,
        stream: &Stream,
    ) -> Self {
        Self {
            id: BehaviourId::new(),
            visible,
            position,
            velocity,
            tile_size,
            sprite,
            sequences,
            events: stream.subscribe(),
        }
    }

    pub fn current_frame(&self) -> usize {
        self.sprite.current_frame()
    }

    /// Blit the current frame into the tile under the entity's position,
    /// inset to the center half of the tile; skipped while not visible
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.visible.read() {
            return;
        }
        let tile = self.tile_size.read();
        let position = self.position.read();
        let dest = Rect::new(
            position.x * tile.x,
            position.y * tile.y,
            tile.x,
            tile.y,
        );
        self.sprite.draw(surface, dest.inner_half());
    }
}

impl Behaviour for RenderBehaviour {
    fn id(&self) -> BehaviourId {
        self.id
    }

    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Render
    }

    fn run(&mut self, dt: f32) -> bool {
        let _ = self.events.drain();
        let facing = Facing::from_velocity(self.velocity.read());
        self.sprite.set_sequence(self.sequences.for_facing(facing));
        self.sprite.update(dt);
        self.visible.write(true);
        true
    }
}
