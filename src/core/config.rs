//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::types::CreepKind;

/// Configuration for the simulation core
///
/// These values set the shopfront level tuning. Changing them will affect
/// pacing and feel, not correctness.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    // === STEERING ===
    /// Squared distance at which a checkpoint or the goal counts as reached
    ///
    /// 0.25 corresponds to a radius of half a tile. Checked against squared
    /// distances so the hot path never takes a square root.
    pub arrival_radius_sq: f32,

    // === PRESENTATION ===
    /// Seconds each animation frame is held before advancing
    pub frame_duration: f32,

    /// Number of frame columns and rows the sprite sheet is split into
    pub sheet_grid: u32,

    /// Edge length in pixels of the generated checkerboard placeholder
    ///
    /// Used whenever the primary sprite sheet cannot be loaded. Spawning
    /// must degrade to this pattern rather than fail.
    pub placeholder_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_radius_sq: 0.25,
            frame_duration: 0.25,
            sheet_grid: 8,
            placeholder_size: 16,
        }
    }
}

/// Base attributes for a creep kind: (health, value, damage, speed)
///
/// Customers are the baseline. Hobos are fragile but fast, auditors are
/// slow and tough but worth the most when stopped.
pub fn base_attributes(kind: CreepKind) -> (f32, f32, f32, f32) {
    match kind {
        CreepKind::Customer => (100.0, 10.0, 1.0, 1.0),
        CreepKind::Hobo => (50.0, 5.0, 2.0, 1.5),
        CreepKind::Auditor => (200.0, 25.0, 5.0, 0.75),
    }
}
