//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for the
//! snapshot). They hold no state of their own — everything lives in
//! components, the level state, or the engine's session fields.

pub mod boss;
pub mod bullets;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod enemy_spawn;
pub mod particles;
pub mod player;
pub mod powerups;
pub mod progression;
pub mod snapshot;
