//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for creeps in the live population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreepId(pub Uuid);

impl CreepId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreepId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for behaviours (one per schedulable unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BehaviourId(pub Uuid);

impl BehaviourId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BehaviourId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for named event sinks on the broadcast channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinkId(pub Uuid);

impl SinkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SinkId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Creep variants, each with its own damage-resolution row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreepKind {
    Customer,
    Hobo,
    Auditor,
}

/// Damage-source categories (the tower types that can hit a creep)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    Advert,
    Clerk,
    Security,
}

/// 2D position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Axis-aligned rectangle (world or pixel units depending on context)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The rect of half this size sharing the same center
    pub fn inner_half(&self) -> Self {
        let c = self.center();
        Self::new(
            c.x - self.width / 4.0,
            c.y - self.height / 4.0,
            self.width / 2.0,
            self.height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 2.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(a - b, Vec2::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
        assert_eq!(a.length(), 5.0);
    }

    #[test]
    fn test_vec2_distance_squared() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.3, 0.4);
        assert!((a.distance_squared(&b) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec2::default().normalize(), Vec2::default());
    }

    #[test]
    fn test_rect_inner_half() {
        let tile = Rect::new(2.0, 2.0, 4.0, 4.0);
        let inner = tile.inner_half();
        assert_eq!(inner, Rect::new(3.0, 3.0, 2.0, 2.0));
        assert_eq!(inner.center(), tile.center());
    }

    #[test]
    fn test_creep_id_uniqueness() {
        assert_ne!(CreepId::new(), CreepId::new());
    }
}
