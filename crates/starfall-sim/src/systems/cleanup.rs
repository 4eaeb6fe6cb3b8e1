//! Cleanup sweep: despawns entities deactivated earlier in the tick.
//!
//! The despawn buffer arrives already holding what the collision pass
//! buffered. This sweep appends spent bullets, escaped enemies, stale
//! power-ups, and dead particles, then despawns the lot. Everything
//! deactivated this tick is gone before the next tick's collision pass.

use hecs::{Entity, World};

use starfall_core::components::{Body, Bullet, Enemy, Particle, PowerUp};
use starfall_core::constants::{ENEMY_BOTTOM_MARGIN, FIELD_HEIGHT, PARTICLE_CULL_MARGIN};
use starfall_core::types::outside_field;

use crate::level::LevelState;

pub fn run(world: &mut World, level: &mut LevelState, despawn_buffer: &mut Vec<Entity>) {
    // Spent bullets. Hits, expiry, and field exits all set the flag in the
    // flight system or the collision pass.
    for (entity, bullet) in world.query_mut::<&Bullet>() {
        if bullet.spent {
            despawn_buffer.push(entity);
        }
    }

    // Enemies that slipped off the bottom. Escapes count toward the level
    // quota so a runaway can never stall progression, but they award no
    // score and make no sound.
    let mut escaped = 0;
    for (entity, (enemy, body)) in world.query_mut::<(&Enemy, &Body)>() {
        if enemy.health > 0.0 && body.pos.y > FIELD_HEIGHT + ENEMY_BOTTOM_MARGIN {
            despawn_buffer.push(entity);
            escaped += 1;
        }
    }
    if escaped > 0 {
        level.note_defeated(escaped);
    }

    // Collected or stale power-ups.
    for (entity, (powerup, body)) in world.query_mut::<(&PowerUp, &Body)>() {
        if powerup.collected || powerup.age >= powerup.lifetime || body.pos.y > FIELD_HEIGHT + 50.0
        {
            despawn_buffer.push(entity);
        }
    }

    // Expired or escaped particles.
    for (entity, (particle, body)) in world.query_mut::<(&Particle, &Body)>() {
        if particle.age >= particle.lifetime || outside_field(body.pos, PARTICLE_CULL_MARGIN) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
