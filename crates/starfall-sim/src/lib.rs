//! Simulation engine for STARFALL.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod level;
pub mod steering;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use starfall_core as core;

#[cfg(test)]
mod tests;
