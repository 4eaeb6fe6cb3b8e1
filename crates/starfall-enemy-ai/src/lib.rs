//! Enemy AI for STARFALL.
//!
//! Implements enemy behavior state selection, movement-pattern steering,
//! and kind-driven stat profiles.

pub mod fsm;
pub mod profiles;

pub use starfall_core as core;
