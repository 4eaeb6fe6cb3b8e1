//! Snapshot system: projects the ECS world into a complete GameStateSnapshot.
//!
//! Read-only over the world. Every entity list is sorted by a stable key
//! (entity id, or spawn sequence for particles) so the serialized form of
//! two identically-driven engines is byte-identical.

use std::collections::VecDeque;

use hecs::World;

use starfall_core::components::*;
use starfall_core::enums::GamePhase;
use starfall_core::events::{Alert, AudioEvent};
use starfall_core::state::*;
use starfall_core::types::SimTime;

use crate::level::LevelState;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    score: u64,
    lives: u32,
    level: &LevelState,
    alerts: &VecDeque<Alert>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        score,
        lives,
        level: level.view(),
        player: build_player(world),
        enemies: build_enemies(world),
        bullets: build_bullets(world),
        boss: build_boss(world),
        powerups: build_powerups(world),
        particles: build_particles(world),
        alerts: alerts.iter().cloned().collect(),
        audio_events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &Body)>()
        .iter()
        .next()
        .map(|(_, (p, body))| PlayerView {
            pos: body.pos,
            vel: body.vel,
            size: body.size,
            health: p.health,
            max_health: p.max_health,
            weapon_level: p.weapon_level,
            alive: p.alive,
            invulnerable: p.invuln_secs > 0.0,
            shield_active: p.shield_charge > 0.0,
            shield_charge: p.shield_charge,
            speed_mult: p.speed_mult,
            damage_mult: p.damage_mult,
            rapid_fire: p.rapid_fire,
            multi_shot: p.multi_shot,
        })
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Body)>()
        .iter()
        .map(|(entity, (enemy, body))| EnemyView {
            id: entity.id(),
            kind: enemy.kind,
            pos: body.pos,
            vel: body.vel,
            size: body.size,
            health: enemy.health,
            max_health: enemy.max_health,
            ai_state: enemy.ai_state,
            pattern: enemy.pattern,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Bullet, &Body)>()
        .iter()
        .map(|(entity, (bullet, body))| BulletView {
            id: entity.id(),
            owner: bullet.owner,
            pos: body.pos,
            vel: body.vel,
            size: body.size,
        })
        .collect();

    bullets.sort_by_key(|b| b.id);
    bullets
}

fn build_boss(world: &World) -> Option<BossView> {
    world
        .query::<(&Boss, &Body)>()
        .iter()
        .next()
        .map(|(entity, (boss, body))| BossView {
            id: entity.id(),
            kind: boss.kind,
            pos: body.pos,
            size: body.size,
            health: boss.health,
            max_health: boss.max_health,
            phase: boss.phase,
            attack: boss.attack,
            shield_visible: boss.shield_visible,
        })
}

fn build_powerups(world: &World) -> Vec<PowerUpView> {
    let mut powerups: Vec<PowerUpView> = world
        .query::<(&PowerUp, &Body)>()
        .iter()
        .map(|(entity, (powerup, body))| PowerUpView {
            id: entity.id(),
            kind: powerup.kind,
            pos: body.pos,
            size: body.size,
            remaining_secs: (powerup.lifetime - powerup.age).max(0.0),
        })
        .collect();

    powerups.sort_by_key(|p| p.id);
    powerups
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut particles: Vec<(u64, ParticleView)> = world
        .query::<(&Particle, &Body)>()
        .iter()
        .map(|(_, (particle, body))| {
            let alpha = if particle.fade_out {
                (1.0 - particle.age / particle.lifetime).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let view = ParticleView {
                pos: body.pos,
                size: particle.size,
                color: particle.color,
                alpha,
            };
            (particle.seq, view)
        })
        .collect();

    particles.sort_by_key(|(seq, _)| *seq);
    particles.into_iter().map(|(_, view)| view).collect()
}
