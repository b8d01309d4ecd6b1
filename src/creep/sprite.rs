//! Sprite sheets and animation state for creep presentation
//!
//! The core never draws pixels itself. A [`Sprite`] tracks which frame of
//! which sheet is current; actual blitting is delegated through the
//! [`DrawSurface`] trait to whatever renderer hosts the simulation.

use std::path::Path;
use std::rc::Rc;

use image::RgbaImage;

use crate::core::error::{GameError, Result};
use crate::core::types::{Rect, Vec2};

/// Shared handle onto a loaded sprite-sheet image split into a frame grid
#[derive(Clone)]
pub struct SpriteSheet {
    image: Rc<RgbaImage>,
    cols: u32,
    rows: u32,
}

impl std::fmt::Debug for SpriteSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteSheet")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .finish()
    }
}

impl SpriteSheet {
    /// Load the primary sheet from disk, split into a `grid` x `grid` layout
    pub fn load(path: impl AsRef<Path>, grid: u32) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|err| GameError::ResourceUnavailable(format!("{}: {err}", path.display())))?
            .to_rgba8();
        Ok(Self {
            image: Rc::new(image),
            cols: grid,
            rows: grid,
        })
    }

    /// Generated black/white checkerboard stand-in, one frame
    ///
    /// Substituted when the primary sheet is unavailable; spawning degrades
    /// to this pattern rather than failing.
    pub fn placeholder(size: u32) -> Self {
        let mut image = RgbaImage::new(size, size);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let lum = if (x % 2 == 0) != (y % 2 == 0) { 255 } else { 0 };
            *pixel = image::Rgba([lum, lum, lum, 255]);
        }
        Self {
            image: Rc::new(image),
            cols: 1,
            rows: 1,
        }
    }

    pub fn frame_count(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Pixel source rect of a frame; indices wrap so single-frame
    /// placeholder sheets accept any sequence
    pub fn frame_rect(&self, frame: usize) -> Rect {
        let frame = frame % self.frame_count();
        let frame_width = self.image.width() as f32 / self.cols as f32;
        let frame_height = self.image.height() as f32 / self.rows as f32;
        let col = (frame as u32 % self.cols) as f32;
        let row = (frame as u32 / self.cols) as f32;
        Rect::new(col * frame_width, row * frame_height, frame_width, frame_height)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// External rendering seam: the host blits the selected frame
pub trait DrawSurface {
    fn blit(&mut self, sheet: &SpriteSheet, source: Rect, dest: Rect);
}

/// One step of an animation sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencePoint {
    pub frame: usize,
    pub duration: f32,
}

/// Which way the creep is visually facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    /// Dominant-axis direction selection: ties on |dx| == |dy| go to the
    /// horizontal axis, and non-positive dy selects north
    pub fn from_velocity(v: Vec2) -> Self {
        if v.x.abs() >= v.y.abs() {
            if v.x >= 0.0 {
                Facing::East
            } else {
                Facing::West
            }
        } else if v.y <= 0.0 {
            Facing::North
        } else {
            Facing::South
        }
    }
}

/// The four per-direction walk cycles cut from one sheet
///
/// Sheet layout: frames 0-3 south, 4-7 north, 8-11 west, 12-15 east.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSequences {
    pub south: [SequencePoint; 4],
    pub north: [SequencePoint; 4],
    pub west: [SequencePoint; 4],
    pub east: [SequencePoint; 4],
}

impl DirectionSequences {
    pub fn standard(frame_duration: f32) -> Self {
        let run = |base: usize| {
            [0, 1, 2, 3].map(|i| SequencePoint {
                frame: base + i,
                duration: frame_duration,
            })
        };
        Self {
            south: run(0),
            north: run(4),
            west: run(8),
            east: run(12),
        }
    }

    pub fn for_facing(&self, facing: Facing) -> &[SequencePoint; 4] {
        match facing {
            Facing::North => &self.north,
            Facing::South => &self.south,
            Facing::East => &self.east,
            Facing::West => &self.west,
        }
    }
}

/// Animation playhead over a sprite sheet
#[derive(Debug, Clone)]
pub struct Sprite {
    sheet: SpriteSheet,
    sequence: Vec<SequencePoint>,
    index: usize,
    elapsed: f32,
}

impl Sprite {
    pub fn new(sheet: SpriteSheet, sequence: &[SequencePoint]) -> Self {
        Self {
            sheet,
            sequence: sequence.to_vec(),
            index: 0,
            elapsed: 0.0,
        }
    }

    /// Switch walk cycles; a no-op when the sequence is already playing,
    /// so steering recomputation does not restart the animation
    pub fn set_sequence(&mut self, sequence: &[SequencePoint]) {
        if self.sequence != sequence {
            self.sequence = sequence.to_vec();
            self.index = 0;
            self.elapsed = 0.0;
        }
    }

    /// Advance the playhead by elapsed seconds, wrapping at the end
    pub fn update(&mut self, dt: f32) {
        if self.sequence.is_empty() {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.sequence[self.index].duration {
            self.elapsed -= self.sequence[self.index].duration;
            self.index = (self.index + 1) % self.sequence.len();
        }
    }

    pub fn current_frame(&self) -> usize {
        self.sequence.get(self.index).map(|p| p.frame).unwrap_or(0)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, dest: Rect) {
        let source = self.sheet.frame_rect(self.current_frame());
        surface.blit(&self.sheet, source, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_sheet_reports_resource_unavailable() {
        let result = SpriteSheet::load("assets/does-not-exist.png", 8);
        assert!(matches!(result, Err(GameError::ResourceUnavailable(_))));
    }

    #[test]
    fn test_placeholder_is_checkerboard() {
        let sheet = SpriteSheet::placeholder(16);
        let image = sheet.image();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 16);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_frame_rect_wraps_on_placeholder() {
        let sheet = SpriteSheet::placeholder(16);
        assert_eq!(sheet.frame_rect(0), sheet.frame_rect(13));
    }

    #[test]
    fn test_facing_dominant_axis() {
        assert_eq!(Facing::from_velocity(Vec2::new(1.0, 0.5)), Facing::East);
        assert_eq!(Facing::from_velocity(Vec2::new(-1.0, 0.5)), Facing::West);
        assert_eq!(Facing::from_velocity(Vec2::new(0.1, -0.5)), Facing::North);
        assert_eq!(Facing::from_velocity(Vec2::new(0.1, 0.5)), Facing::South);
        // Horizontal wins ties
        assert_eq!(Facing::from_velocity(Vec2::new(1.0, 1.0)), Facing::East);
        // Stationary reads as east (x tie at zero, non-negative)
        assert_eq!(Facing::from_velocity(Vec2::default()), Facing::East);
    }

    #[test]
    fn test_sprite_advances_and_wraps() {
        let sheet = SpriteSheet::placeholder(16);
        let sequences = DirectionSequences::standard(0.25);
        let mut sprite = Sprite::new(sheet, &sequences.south);

        assert_eq!(sprite.current_frame(), 0);
        sprite.update(0.25);
        assert_eq!(sprite.current_frame(), 1);
        sprite.update(0.75);
        assert_eq!(sprite.current_frame(), 0);
    }

    #[test]
    fn test_set_sequence_keeps_playhead_when_unchanged() {
        let sheet = SpriteSheet::placeholder(16);
        let sequences = DirectionSequences::standard(0.25);
        let mut sprite = Sprite::new(sheet, &sequences.east);

        sprite.update(0.3);
        let frame = sprite.current_frame();
        sprite.set_sequence(&sequences.east);
        assert_eq!(sprite.current_frame(), frame);

        sprite.set_sequence(&sequences.west);
        assert_eq!(sprite.current_frame(), sequences.west[0].frame);
    }
}
