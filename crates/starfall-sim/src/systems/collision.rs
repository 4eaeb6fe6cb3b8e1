//! Collision resolution.
//!
//! Runs once per simulating tick, after all movement systems. The pass
//! order is fixed: player bullets against enemies, then the boss, then
//! hostile bullets against the player, contact damage, and power-up
//! pickups last. Every test is an AABB overlap. Entities killed here are
//! only deactivated (health zeroed, bullets marked spent) and buffered
//! for the cleanup sweep; nothing is despawned mid-iteration.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use starfall_core::components::{Body, Boss, Bullet, Enemy, Piercing, Player, PowerUp};
use starfall_core::constants::{ENEMY_CONTACT_SUICIDE, EXPLOSION_PARTICLE_COUNT, POWERUP_DROP_CHANCE};
use starfall_core::enums::{BulletOwner, EnemyKind, PowerUpKind};
use starfall_core::events::AudioEvent;
use starfall_core::types::Aabb;

use crate::level::LevelState;
use crate::systems::particles::{self, EXPLOSION_COLOR};
use crate::systems::{player, powerups};
use crate::world_setup;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    level: &mut LevelState,
    score: &mut u64,
    events: &mut Vec<AudioEvent>,
    despawn: &mut Vec<Entity>,
) {
    let (player_entity, player_box) = match world
        .query_mut::<(&Player, &Body)>()
        .into_iter()
        .next()
    {
        Some((entity, (p, body))) if p.alive => (entity, Aabb::new(body.pos, body.size)),
        _ => return,
    };

    // 1. Player bullets vs enemies. One bullet claims at most one victim
    // per tick; enemies already buffered for despawn are skipped so a kill
    // is credited exactly once.
    let enemies: Vec<(Entity, Aabb)> = world
        .query_mut::<(&Enemy, &Body)>()
        .into_iter()
        .filter(|(_, (enemy, _))| enemy.health > 0.0)
        .map(|(entity, (_, body))| (entity, Aabb::new(body.pos, body.size)))
        .collect();
    for (bullet, bullet_box, damage) in collect_bullets(world, BulletOwner::Player) {
        for (enemy, enemy_box) in &enemies {
            if despawn.contains(enemy) || !bullet_box.intersects(enemy_box) {
                continue;
            }
            consume_hit(world, bullet);
            events.push(AudioEvent::BulletHit);

            let mut killed: Option<(EnemyKind, u64)> = None;
            if let Ok(mut hit) = world.get::<&mut Enemy>(*enemy) {
                hit.health -= damage;
                if hit.health <= 0.0 {
                    killed = Some((hit.kind, hit.score_value));
                }
            }
            if let Some((kind, value)) = killed {
                enemy_death(world, rng, seq, level, score, events, kind, value, enemy_box.center, EXPLOSION_PARTICLE_COUNT);
                world_setup::spawn_powerup_chance(world, rng, enemy_box.center, POWERUP_DROP_CHANCE);
                despawn.push(*enemy);
            }
            break;
        }
    }

    // 2. Player bullets vs the boss.
    if let Some((boss_entity, boss_box, _)) = live_boss(world) {
        for (bullet, bullet_box, damage) in collect_bullets(world, BulletOwner::Player) {
            if !bullet_box.intersects(&boss_box) {
                continue;
            }
            consume_hit(world, bullet);
            events.push(AudioEvent::BulletHit);
            particles::hit_sparks(world, rng, seq, bullet_box.center, 5);

            let mut defeated = None;
            if let Ok(mut boss) = world.get::<&mut Boss>(boss_entity) {
                boss.health -= damage;
                if boss.health <= 0.0 {
                    defeated = Some((boss.kind, boss.score_value));
                }
            }
            if let Some((kind, value)) = defeated {
                *score += value;
                events.push(AudioEvent::BossDefeated { kind });
                particles::explosion(
                    world,
                    rng,
                    seq,
                    boss_box.center,
                    5 * EXPLOSION_PARTICLE_COUNT,
                    EXPLOSION_COLOR,
                );
                despawn.push(boss_entity);
                break;
            }
        }
    }

    // 3. Enemy bullets vs the player.
    for (bullet, bullet_box, damage) in collect_bullets(world, BulletOwner::Enemy) {
        if !bullet_box.intersects(&player_box) {
            continue;
        }
        consume_hit(world, bullet);
        hit_player(world, player_entity, damage);
        particles::hit_sparks(world, rng, seq, bullet_box.center, 8);
        events.push(AudioEvent::PlayerHit);
    }

    // 4. Boss bullets vs the player.
    for (bullet, bullet_box, damage) in collect_bullets(world, BulletOwner::Boss) {
        if !bullet_box.intersects(&player_box) {
            continue;
        }
        consume_hit(world, bullet);
        hit_player(world, player_entity, damage);
        particles::hit_sparks(world, rng, seq, bullet_box.center, 10);
        events.push(AudioEvent::PlayerHit);
    }

    // 5. Contact: player vs enemies. The enemy dies through the standard
    // death path with a half-size burst; contact kills never drop loot.
    let contacts: Vec<(Entity, Aabb, f32)> = world
        .query_mut::<(&Enemy, &Body)>()
        .into_iter()
        .filter(|(_, (enemy, _))| enemy.health > 0.0)
        .map(|(entity, (enemy, body))| {
            (entity, Aabb::new(body.pos, body.size), enemy.collision_damage)
        })
        .collect();
    for (enemy, enemy_box, contact_damage) in contacts {
        if !enemy_box.intersects(&player_box) {
            continue;
        }
        hit_player(world, player_entity, contact_damage);

        let mut killed: Option<(EnemyKind, u64)> = None;
        if let Ok(mut hit) = world.get::<&mut Enemy>(enemy) {
            hit.health -= ENEMY_CONTACT_SUICIDE;
            if hit.health <= 0.0 {
                killed = Some((hit.kind, hit.score_value));
            }
        }
        if let Some((kind, value)) = killed {
            enemy_death(world, rng, seq, level, score, events, kind, value, enemy_box.center, EXPLOSION_PARTICLE_COUNT / 2);
            despawn.push(enemy);
        }
    }

    // 6. Contact: player vs the boss.
    if let Some((_, boss_box, contact_damage)) = live_boss(world) {
        if boss_box.intersects(&player_box) {
            hit_player(world, player_entity, contact_damage);
            particles::hit_sparks(world, rng, seq, player_box.center, 20);
        }
    }

    // 7. Power-up pickups.
    let pickups: Vec<(Entity, Aabb, PowerUpKind)> = world
        .query_mut::<(&PowerUp, &Body)>()
        .into_iter()
        .filter(|(_, (p, _))| !p.collected)
        .map(|(entity, (p, body))| (entity, Aabb::new(body.pos, body.size), p.kind))
        .collect();
    for (pickup, pickup_box, kind) in pickups {
        if !pickup_box.intersects(&player_box) {
            continue;
        }
        if let Ok(mut p) = world.get::<&mut PowerUp>(pickup) {
            p.collected = true;
        }
        if let Ok(mut p) = world.get::<&mut Player>(player_entity) {
            powerups::apply(&mut p, kind);
        }
        particles::collect_effect(world, rng, seq, pickup_box.center);
        events.push(AudioEvent::PowerUpCollected { kind });
    }
}

/// Snapshot the live, unspent bullets of one pool.
fn collect_bullets(world: &mut World, owner: BulletOwner) -> Vec<(Entity, Aabb, f32)> {
    world
        .query_mut::<(&Bullet, &Body)>()
        .into_iter()
        .filter(|(_, (bullet, _))| bullet.owner == owner && !bullet.spent)
        .map(|(entity, (bullet, body))| (entity, Aabb::new(body.pos, body.size), bullet.damage))
        .collect()
}

fn live_boss(world: &mut World) -> Option<(Entity, Aabb, f32)> {
    world
        .query_mut::<(&Boss, &Body)>()
        .into_iter()
        .find(|(_, (boss, _))| boss.health > 0.0)
        .map(|(entity, (boss, body))| {
            (entity, Aabb::new(body.pos, body.size), boss.collision_damage)
        })
}

/// Route damage through the player's shield/invulnerability rules.
fn hit_player(world: &mut World, player_entity: Entity, amount: f32) {
    if let Ok(mut p) = world.get::<&mut Player>(player_entity) {
        player::take_damage(&mut p, amount);
    }
}

/// Mark a bullet as having dealt its hit. Piercing bullets survive until
/// their remaining hit count runs out.
fn consume_hit(world: &mut World, bullet: Entity) {
    if let Ok(mut piercing) = world.get::<&mut Piercing>(bullet) {
        if piercing.remaining > 1 {
            piercing.remaining -= 1;
            return;
        }
    }
    if let Ok(mut b) = world.get::<&mut Bullet>(bullet) {
        b.spent = true;
    }
}

/// Shared enemy kill bookkeeping: score, quota, sound, and burst.
#[allow(clippy::too_many_arguments)]
fn enemy_death(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    level: &mut LevelState,
    score: &mut u64,
    events: &mut Vec<AudioEvent>,
    kind: EnemyKind,
    value: u64,
    pos: Vec2,
    burst: u32,
) {
    *score += value;
    level.note_defeated(1);
    events.push(AudioEvent::EnemyDestroyed { kind });
    particles::explosion(world, rng, seq, pos, burst, EXPLOSION_COLOR);
}
