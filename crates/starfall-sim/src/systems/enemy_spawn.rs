//! Enemy spawner: trickles wave quota onto the field.
//!
//! Advances the level's wave pacing, then spawns at most one enemy per
//! elapsed spawn interval while the wave has budget and the field is under
//! the enemy cap. The interval shrinks with the level.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::Enemy;
use starfall_core::constants::{ENEMY_SPAWN_INTERVAL, LEVEL_SPAWN_FACTOR, MAX_ENEMIES};

use crate::level::LevelState;
use crate::world_setup;

/// Run the spawner for one tick. `spawn_timer` is engine state so pacing
/// survives across ticks.
pub fn run(
    world: &mut World,
    level: &mut LevelState,
    rng: &mut ChaCha8Rng,
    spawn_timer: &mut f32,
    dt: f32,
) {
    let active = world
        .query_mut::<&Enemy>()
        .into_iter()
        .filter(|(_, e)| e.health > 0.0)
        .count();

    // Wave pacing sees one consistent count for the whole tick.
    level.update(dt, active as u32);

    *spawn_timer += dt;
    let interval = ENEMY_SPAWN_INTERVAL * LEVEL_SPAWN_FACTOR.powi(level.level as i32 - 1);
    if *spawn_timer >= interval && active < MAX_ENEMIES && level.should_spawn_wave() {
        let kind = world_setup::choose_enemy_kind(rng, level.level);
        world_setup::spawn_enemy(world, rng, kind, level.level);
        level.note_spawned();
        *spawn_timer = 0.0;
    }
}
