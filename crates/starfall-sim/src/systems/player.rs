//! Player control: movement, effect timers, and firing.
//!
//! Reads the engine's held-input snapshot. Movement accelerates toward the
//! held direction and decays on released axes; firing is cooldown-gated and
//! routes through the bullet spawners. `take_damage` is the single entry
//! point for every damage source, so the invulnerability and shield rules
//! live in exactly one place.

use glam::Vec2;
use hecs::World;

use starfall_core::commands::HeldInput;
use starfall_core::components::{Body, Player};
use starfall_core::constants::*;
use starfall_core::enums::BulletOwner;
use starfall_core::events::AudioEvent;
use starfall_core::types::clamp_to_field;

use crate::systems::bullets;

struct FireRequest {
    origin: Vec2,
    damage: f32,
    weapon_level: u32,
    multi: bool,
}

/// Run the player system for one tick.
pub fn run(world: &mut World, input: HeldInput, dt: f32, events: &mut Vec<AudioEvent>) {
    let mut fire = None;

    for (_entity, (player, body)) in world.query_mut::<(&mut Player, &mut Body)>() {
        tick_timers(player, dt);

        // Step 1: steer toward the held direction, decay released axes.
        let axis_x = (input.right as i32 - input.left as i32) as f32;
        let axis_y = (input.down as i32 - input.up as i32) as f32;
        let max_speed = PLAYER_SPEED * player.speed_mult;
        let blend = dt * PLAYER_ACCEL / PLAYER_SPEED;

        if axis_x != 0.0 {
            body.vel.x += (axis_x * max_speed - body.vel.x) * blend;
        } else {
            body.vel.x *= PLAYER_FRICTION;
        }
        if axis_y != 0.0 {
            body.vel.y += (axis_y * max_speed - body.vel.y) * blend;
        } else {
            body.vel.y *= PLAYER_FRICTION;
        }

        // Step 2: integrate and keep the ship on the field.
        body.pos += body.vel * dt;
        body.pos = clamp_to_field(body.pos, body.size * 0.5);

        // Step 3: trigger check. Damage and cooldown scale from the weapon
        // level here at fire time, never through stored stats.
        if input.shoot && player.alive && player.fire_cooldown <= 0.0 {
            let base = if player.rapid_fire {
                RAPID_FIRE_COOLDOWN
            } else {
                BULLET_COOLDOWN
            };
            let level_steps = player.weapon_level.saturating_sub(1) as i32;
            player.fire_cooldown = base * WEAPON_COOLDOWN_FACTOR.powi(level_steps);

            fire = Some(FireRequest {
                origin: body.pos - Vec2::new(0.0, body.size.y * 0.5),
                damage: BULLET_DAMAGE * player.damage_mult * WEAPON_DAMAGE_FACTOR.powi(level_steps),
                weapon_level: player.weapon_level,
                multi: player.multi_shot,
            });
        }
    }

    if let Some(req) = fire {
        if req.multi {
            bullets::spawn_spread(
                world,
                BulletOwner::Player,
                req.origin,
                -std::f32::consts::FRAC_PI_2,
                MULTI_SHOT_COUNT,
                MULTI_SHOT_SPREAD_DEG,
                BULLET_SPEED,
                req.damage,
                req.weapon_level,
            );
        } else {
            bullets::spawn_player_bullet(
                world,
                req.origin,
                Vec2::new(0.0, -BULLET_SPEED),
                req.damage,
                req.weapon_level,
            );
        }
        // One event per volley, however many bullets it fans into.
        events.push(AudioEvent::PlayerShoot);
    }
}

/// Advance the cooldown, invulnerability, and power-up effect timers.
/// Timed effects revert to their neutral values at expiry.
fn tick_timers(player: &mut Player, dt: f32) {
    player.fire_cooldown = (player.fire_cooldown - dt).max(0.0);
    player.invuln_secs = (player.invuln_secs - dt).max(0.0);

    if player.speed_secs > 0.0 {
        player.speed_secs -= dt;
        if player.speed_secs <= 0.0 {
            player.speed_secs = 0.0;
            player.speed_mult = 1.0;
        }
    }
    if player.damage_secs > 0.0 {
        player.damage_secs -= dt;
        if player.damage_secs <= 0.0 {
            player.damage_secs = 0.0;
            player.damage_mult = 1.0;
        }
    }
    if player.rapid_secs > 0.0 {
        player.rapid_secs -= dt;
        if player.rapid_secs <= 0.0 {
            player.rapid_secs = 0.0;
            player.rapid_fire = false;
        }
    }
    if player.multi_secs > 0.0 {
        player.multi_secs -= dt;
        if player.multi_secs <= 0.0 {
            player.multi_secs = 0.0;
            player.multi_shot = false;
        }
    }
    if player.shield_secs > 0.0 {
        player.shield_secs -= dt;
        if player.shield_secs <= 0.0 {
            player.shield_secs = 0.0;
            player.shield_charge = 0.0;
        }
    }
}

/// Apply damage to the player.
///
/// Invulnerable or dead: complete no-op. Otherwise the shield absorbs
/// first and any remainder comes out of health. Only a surviving hit that
/// reached health grants the invulnerability window; a fully-absorbed hit
/// and the lethal hit grant none.
pub fn take_damage(player: &mut Player, amount: f32) {
    if !player.alive || player.invuln_secs > 0.0 {
        return;
    }

    let mut remaining = amount;
    if player.shield_charge > 0.0 {
        let absorbed = remaining.min(player.shield_charge);
        player.shield_charge -= absorbed;
        remaining -= absorbed;
        if player.shield_charge <= 0.0 {
            player.shield_charge = 0.0;
            player.shield_secs = 0.0;
        }
    }
    if remaining <= 0.0 {
        return;
    }

    player.health -= remaining;
    if player.health <= 0.0 {
        player.health = 0.0;
        player.alive = false;
    } else {
        player.invuln_secs = PLAYER_INVULN_SECS;
    }
}
