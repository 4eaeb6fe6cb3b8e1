//! Boss behavior: phase escalation, movement, and attack dispatch.
//!
//! The phase machine advances at most one step per tick through the health
//! thresholds, applying its permanent effects exactly once per step. Motion
//! eases toward a behavior-chosen target point inside the top band of the
//! field. Attacks fire on a cooldown that tightens with the phase.

use glam::Vec2;
use hecs::World;

use starfall_core::components::{Body, Boss, Player};
use starfall_core::constants::*;
use starfall_core::enums::{BossAttack, BossMotion};
use starfall_core::events::AudioEvent;

use crate::steering;
use crate::systems::bullets;

struct VolleyRequest {
    attack: BossAttack,
    origin: Vec2,
    target: Vec2,
    phase: u8,
    attack_timer: f32,
}

/// Run the boss system for one tick. No-op when no boss is alive.
pub fn run(world: &mut World, dt: f32, events: &mut Vec<AudioEvent>) {
    let player_pos = world
        .query_mut::<(&Player, &Body)>()
        .into_iter()
        .next()
        .map(|(_, (_, body))| body.pos);

    let mut volley = None;
    for (_entity, (boss, body)) in world.query_mut::<(&mut Boss, &mut Body)>() {
        if boss.health <= 0.0 {
            continue;
        }

        // Step 1: phase escalation, one threshold per tick.
        if (boss.phase as usize) < BOSS_PHASE_THRESHOLDS.len() {
            let threshold = BOSS_PHASE_THRESHOLDS[boss.phase as usize] * boss.max_health;
            if boss.health <= threshold {
                boss.phase += 1;
                boss.fire_rate *= BOSS_PHASE_FIRE_FACTOR;
                boss.speed *= BOSS_PHASE_SPEED_FACTOR;
                boss.shield_visible = true;
            }
        }

        // Step 2: retarget and ease toward the target point.
        boss.pattern_timer += dt;
        if let Some(player) = player_pos {
            retarget(boss, body.pos, player);
        }
        let mut vel = (boss.target - body.pos) * BOSS_EASE_FACTOR;
        if vel.length() > boss.speed {
            vel = vel.normalize_or_zero() * boss.speed;
        }
        body.vel = vel;
        body.pos += vel * dt;
        let half = body.size * 0.5;
        body.pos.x = body.pos.x.clamp(half.x, FIELD_WIDTH - half.x);
        body.pos.y = body.pos.y.clamp(BOSS_MIN_Y, BOSS_MAX_Y);

        // Step 3: attack clock.
        boss.attack_timer += dt;
        boss.cooldown -= dt;
        if boss.cooldown <= 0.0 {
            if let Some(target) = player_pos {
                boss.cooldown = boss.fire_rate / (1.0 + boss.phase.min(2) as f32 * 0.3);
                volley = Some(VolleyRequest {
                    attack: boss.attack,
                    origin: body.pos,
                    target,
                    phase: boss.phase,
                    attack_timer: boss.attack_timer,
                });
            }
        }
    }

    if let Some(req) = volley {
        dispatch_volley(world, &req);
        events.push(AudioEvent::BossShot {
            pattern: req.attack,
        });
    }
}

/// Pick the movement target for the boss behavior.
fn retarget(boss: &mut Boss, pos: Vec2, player: Vec2) {
    let t = boss.pattern_timer;
    match boss.motion {
        BossMotion::Hover => {
            boss.target = Vec2::new(
                FIELD_WIDTH / 2.0 + t.sin() * 200.0,
                150.0 + (t * 0.5).cos() * 50.0,
            );
        }
        BossMotion::Chase => {
            if pos.distance(player) < BOSS_CHASE_RANGE {
                boss.target = Vec2::new(player.x, 150.0);
            }
        }
        BossMotion::Dodge => {
            let dx = pos.x - player.x;
            if pos.distance(player) < BOSS_DODGE_RANGE && dx.abs() < 100.0 {
                let side = if dx > 0.0 { 200.0 } else { -200.0 };
                boss.target = Vec2::new(FIELD_WIDTH / 2.0 + side, boss.target.y);
            }
        }
    }
}

/// Fire one volley of the boss's attack pattern. Shot counts grow with the
/// phase; the spiral's base angle rotates at 180 deg/s of attack time so
/// consecutive volleys sweep instead of restarting.
fn dispatch_volley(world: &mut World, req: &VolleyRequest) {
    let phase = req.phase as u32;
    match req.attack {
        BossAttack::Single => {
            let aim = steering::bearing(req.origin, req.target);
            let vel = Vec2::new(aim.cos(), aim.sin()) * ENEMY_BULLET_SPEED;
            bullets::spawn_boss_bullet(
                world,
                req.origin,
                vel,
                BOSS_DAMAGE,
                bullets::BossShotFlavor::Plain,
            );
        }
        BossAttack::Spread => {
            bullets::spawn_spread(
                world,
                starfall_core::enums::BulletOwner::Boss,
                req.origin,
                steering::bearing(req.origin, req.target),
                5 + 2 * phase,
                60.0,
                ENEMY_BULLET_SPEED,
                BOSS_DAMAGE,
                0,
            );
        }
        BossAttack::Spiral => {
            let base = req.attack_timer * std::f32::consts::PI;
            bullets::spawn_spiral(
                world,
                req.origin,
                8 + 2 * phase,
                base,
                ENEMY_BULLET_SPEED,
                BOSS_DAMAGE,
            );
        }
        BossAttack::Wave => {
            // Horizontal curtain: seven shots whose headings ride a sine of
            // the attack clock, biased downward so the curtain advances.
            let max_deflect = 30.0f32.to_radians();
            for i in 0..7 {
                let origin = req.origin + Vec2::new((i as f32 - 3.5) * 50.0, 0.0);
                let angle = (2.0 * req.attack_timer + i as f32).sin() * max_deflect;
                let vel = Vec2::new(angle.cos() * 150.0, angle.sin() * 300.0 + 150.0);
                bullets::spawn_boss_bullet(
                    world,
                    origin,
                    vel,
                    BOSS_DAMAGE,
                    bullets::BossShotFlavor::Explosive {
                        radius: BOSS_BLAST_RADIUS,
                    },
                );
            }
        }
        BossAttack::Homing => {
            bullets::spawn_homing(
                world,
                req.origin,
                3 + phase,
                req.target,
                ENEMY_BULLET_SPEED * BOSS_HOMING_SPEED_FACTOR,
                BOSS_DAMAGE,
            );
        }
    }
}
