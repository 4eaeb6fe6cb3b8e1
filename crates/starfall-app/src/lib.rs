//! STARFALL host process.
//!
//! Hosts the simulation engine on a dedicated thread at the fixed tick
//! rate and exposes a small handle for embedders: commands in over a
//! channel, whole-tick snapshots out of a shared slot, high scores
//! persisted when a session ends.

pub mod game_loop;
pub mod state;

pub use starfall_core as core;
