//! Power-up drift and effect application.
//!
//! Power-ups fall at a constant speed and age out; the collision pass calls
//! `apply` exactly once per pickup. Re-collecting an active effect refreshes
//! its value and timer rather than compounding.

use hecs::World;

use starfall_core::components::{Body, Player, PowerUp};
use starfall_core::constants::*;
use starfall_core::enums::PowerUpKind;

/// Advance power-up age and position for one tick.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (powerup, body)) in world.query_mut::<(&mut PowerUp, &mut Body)>() {
        if powerup.collected {
            continue;
        }
        powerup.age += dt;
        body.pos += body.vel * dt;
    }
}

/// Apply a collected power-up to the player.
pub fn apply(player: &mut Player, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health => {
            player.health = (player.health + POWERUP_HEAL_AMOUNT).min(player.max_health);
        }
        PowerUpKind::Speed => {
            player.speed_mult = POWERUP_SPEED_MULT;
            player.speed_secs = POWERUP_DURATION;
        }
        PowerUpKind::Damage => {
            player.damage_mult = POWERUP_DAMAGE_MULT;
            player.damage_secs = POWERUP_DURATION;
        }
        PowerUpKind::Shield => {
            player.shield_charge = SHIELD_CHARGE;
            player.shield_secs = POWERUP_DURATION;
        }
        PowerUpKind::RapidFire => {
            player.rapid_fire = true;
            player.rapid_secs = POWERUP_DURATION;
        }
        PowerUpKind::MultiShot => {
            player.multi_shot = true;
            player.multi_secs = POWERUP_DURATION;
        }
    }
}
