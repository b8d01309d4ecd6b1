//! Storefront Siege - reactive simulation core for a shopfront tower defence

pub mod behaviours;
pub mod core;
pub mod creep;
pub mod events;
pub mod signals;
pub mod simulation;
