//! Enemy movement and weapons, driven by the behavior FSM.
//!
//! Each tick every enemy gets a fresh AI decision from the distance to the
//! player, steers along its movement pattern, and fires when its cooldown
//! and state allow. Steering and state selection are pure functions in the
//! `starfall-enemy-ai` crate; this system applies their output to the world.

use glam::Vec2;
use hecs::{Entity, World};

use starfall_core::components::{Body, Enemy, Player};
use starfall_core::constants::*;
use starfall_core::enums::BulletOwner;
use starfall_enemy_ai::fsm::{self, EnemyContext, EnemyDecision};
use starfall_enemy_ai::profiles::{get_profile, ShotStyle};

use crate::steering;
use crate::systems::bullets;

struct ShotRequest {
    origin: Vec2,
    target: Vec2,
    style: ShotStyle,
}

/// Run enemy AI for one tick.
pub fn run(world: &mut World, dt: f32) {
    let player_pos = world
        .query_mut::<(&Player, &Body)>()
        .into_iter()
        .next()
        .map(|(_, (_, body))| body.pos)
        .unwrap_or(PLAYER_START);

    let mut decisions: Vec<(Entity, EnemyDecision)> = Vec::new();
    for (entity, (enemy, body)) in world.query_mut::<(&Enemy, &Body)>() {
        if enemy.health <= 0.0 {
            continue;
        }
        let ctx = EnemyContext {
            kind: enemy.kind,
            pattern: enemy.pattern,
            pos: body.pos,
            vel: body.vel,
            speed: enemy.speed,
            pattern_timer: enemy.pattern_timer,
            circle_angle: enemy.circle_angle,
            can_shoot: enemy.can_shoot,
            player_pos,
            dt,
        };
        decisions.push((entity, fsm::evaluate(&ctx)));
    }

    let mut shots: Vec<ShotRequest> = Vec::new();
    for (entity, decision) in decisions {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            continue;
        };
        enemy.ai_state = decision.ai_state;
        enemy.pattern_timer = decision.pattern_timer;
        enemy.circle_angle = decision.circle_angle;
        enemy.cooldown = (enemy.cooldown - dt).max(0.0);

        let wants_shot = enemy.can_shoot
            && enemy.cooldown <= 0.0
            && fsm::wants_to_fire(decision.ai_state);
        if wants_shot {
            enemy.cooldown = enemy.fire_interval;
        }
        let kind = enemy.kind;
        drop(enemy);

        let Ok(mut body) = world.get::<&mut Body>(entity) else {
            continue;
        };
        body.vel = decision.velocity;
        match decision.position_override {
            Some(pos) => body.pos = pos,
            None => {
                let step = body.vel * dt;
                body.pos += step;
            }
        }
        if decision.clamp_x {
            let half_x = body.size.x * 0.5;
            body.pos.x = body.pos.x.clamp(half_x, FIELD_WIDTH - half_x);
        }

        if wants_shot {
            shots.push(ShotRequest {
                origin: body.pos + Vec2::new(0.0, body.size.y * 0.5),
                target: player_pos,
                style: get_profile(kind).shot,
            });
        }
    }

    for shot in shots {
        match shot.style {
            ShotStyle::Single => {
                let aim = steering::bearing(shot.origin, shot.target);
                let vel = Vec2::new(aim.cos(), aim.sin()) * ENEMY_BULLET_SPEED;
                bullets::spawn_enemy_bullet(world, shot.origin, vel, ENEMY_BULLET_DAMAGE);
            }
            ShotStyle::Spread => {
                bullets::spawn_spread(
                    world,
                    BulletOwner::Enemy,
                    shot.origin,
                    steering::bearing(shot.origin, shot.target),
                    3,
                    30.0,
                    ENEMY_BULLET_SPEED,
                    ENEMY_BULLET_DAMAGE,
                    0,
                );
            }
        }
    }
}
