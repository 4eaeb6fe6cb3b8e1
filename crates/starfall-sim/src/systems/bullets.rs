//! Bullet spawning and flight.
//!
//! Three logical pools keyed by owner, each soft-capped at
//! `MAX_BULLETS_PER_POOL`: a spawn request against a full pool is a silent
//! no-op. Spawners append components; the flight system ages, re-aims
//! homing shots, integrates, and marks expired or out-of-field bullets
//! spent for the cleanup sweep.

use glam::Vec2;
use hecs::{Entity, World};

use starfall_core::components::{Body, Bullet, Explosive, Homing, Piercing, Player};
use starfall_core::constants::*;
use starfall_core::enums::BulletOwner;
use starfall_core::types::outside_field;

use crate::steering;

/// Flavor of a boss shot, mapped from the attack pattern by the boss system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossShotFlavor {
    /// Plain aimed shot.
    Plain,
    /// Detonates on impact; the radius drives the blast visual.
    Explosive { radius: f32 },
    /// Re-aims at the player every tick.
    Homing { strength: f32 },
    /// Survives this many hits before going spent.
    Piercing { hits: u32 },
}

/// Live (non-spent) bullets in one owner's pool.
pub fn pool_count(world: &mut World, owner: BulletOwner) -> usize {
    world
        .query_mut::<&Bullet>()
        .into_iter()
        .filter(|(_, b)| b.owner == owner && !b.spent)
        .count()
}

/// Spawn a player bullet. The collision box grows with the weapon level.
pub fn spawn_player_bullet(
    world: &mut World,
    pos: Vec2,
    vel: Vec2,
    damage: f32,
    weapon_level: u32,
) {
    if pool_count(world, BulletOwner::Player) >= MAX_BULLETS_PER_POOL {
        return;
    }
    let size = BULLET_SIZE + Vec2::splat(2.0 * weapon_level as f32);
    world.spawn((
        Bullet {
            owner: BulletOwner::Player,
            damage,
            lifetime: PLAYER_BULLET_LIFETIME,
            age: 0.0,
            spent: false,
        },
        Body { pos, vel, size },
    ));
}

/// Spawn an enemy bullet.
pub fn spawn_enemy_bullet(world: &mut World, pos: Vec2, vel: Vec2, damage: f32) {
    if pool_count(world, BulletOwner::Enemy) >= MAX_BULLETS_PER_POOL {
        return;
    }
    world.spawn((
        Bullet {
            owner: BulletOwner::Enemy,
            damage,
            lifetime: ENEMY_BULLET_LIFETIME,
            age: 0.0,
            spent: false,
        },
        Body {
            pos,
            vel,
            size: ENEMY_BULLET_SIZE,
        },
    ));
}

/// Spawn a boss bullet with the given flavor.
pub fn spawn_boss_bullet(
    world: &mut World,
    pos: Vec2,
    vel: Vec2,
    damage: f32,
    flavor: BossShotFlavor,
) {
    if pool_count(world, BulletOwner::Boss) >= MAX_BULLETS_PER_POOL {
        return;
    }
    let bullet = Bullet {
        owner: BulletOwner::Boss,
        damage,
        lifetime: BOSS_BULLET_LIFETIME,
        age: 0.0,
        spent: false,
    };
    let body = Body {
        pos,
        vel,
        size: ENEMY_BULLET_SIZE * 2.0,
    };
    match flavor {
        BossShotFlavor::Plain => {
            world.spawn((bullet, body));
        }
        BossShotFlavor::Explosive { radius } => {
            world.spawn((bullet, body, Explosive { radius }));
        }
        BossShotFlavor::Homing { strength } => {
            world.spawn((bullet, body, Homing { strength }));
        }
        BossShotFlavor::Piercing { hits } => {
            world.spawn((bullet, body, Piercing { remaining: hits }));
        }
    }
}

/// Fire a fan of `count` bullets spanning `spread_deg` degrees centered on
/// the `forward` axis (radians). A single shot fires exactly on-axis.
#[allow(clippy::too_many_arguments)]
pub fn spawn_spread(
    world: &mut World,
    owner: BulletOwner,
    origin: Vec2,
    forward: f32,
    count: u32,
    spread_deg: f32,
    speed: f32,
    damage: f32,
    weapon_level: u32,
) {
    for offset in steering::spread_offsets(count, spread_deg) {
        let angle = forward + offset;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        match owner {
            BulletOwner::Player => spawn_player_bullet(world, origin, vel, damage, weapon_level),
            BulletOwner::Enemy => spawn_enemy_bullet(world, origin, vel, damage),
            BulletOwner::Boss => spawn_boss_bullet(
                world,
                origin,
                vel,
                damage,
                BossShotFlavor::Explosive {
                    radius: BOSS_BLAST_RADIUS,
                },
            ),
        }
    }
}

/// Fire a full-circle boss volley of `count` shots starting at `base_angle`
/// (radians). Callers derive the base angle from an elapsed-time counter so
/// consecutive volleys rotate continuously.
pub fn spawn_spiral(
    world: &mut World,
    origin: Vec2,
    count: u32,
    base_angle: f32,
    speed: f32,
    damage: f32,
) {
    for angle in steering::spiral_angles(count, base_angle) {
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        spawn_boss_bullet(
            world,
            origin,
            vel,
            damage,
            BossShotFlavor::Explosive {
                radius: BOSS_BLAST_RADIUS,
            },
        );
    }
}

/// Fire a boss homing volley. Initial headings fan out around the bearing
/// to `target`; every shot re-aims toward the player each tick afterward.
pub fn spawn_homing(
    world: &mut World,
    origin: Vec2,
    count: u32,
    target: Vec2,
    speed: f32,
    damage: f32,
) {
    let aim = steering::bearing(origin, target);
    for offset in steering::homing_fan_offsets(count) {
        let angle = aim + offset;
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        spawn_boss_bullet(
            world,
            origin,
            vel,
            damage,
            BossShotFlavor::Homing {
                strength: BOSS_HOMING_STRENGTH,
            },
        );
    }
}

/// Flight system: age, homing re-aim, integration, and bounds culling.
/// A bullet marked spent here is swept by cleanup before the next tick's
/// collision pass, so it can never deal damage after expiry.
pub fn run(world: &mut World, dt: f32) {
    let player_pos = world
        .query_mut::<(&Player, &Body)>()
        .into_iter()
        .next()
        .map(|(_, (_, body))| body.pos);

    let mut updates: Vec<(Entity, f32, Vec2, Vec2, bool)> = Vec::new();
    for (entity, (bullet, body, homing)) in world
        .query_mut::<(&Bullet, &Body, Option<&Homing>)>()
        .into_iter()
    {
        if bullet.spent {
            continue;
        }
        let age = bullet.age + dt;
        let mut vel = body.vel;
        if let (Some(homing), Some(target)) = (homing, player_pos) {
            vel = steering::steer_toward(vel, steering::bearing(body.pos, target), homing.strength, dt);
        }
        let pos = body.pos + vel * dt;
        let spent = age >= bullet.lifetime || outside_field(pos, BULLET_CULL_MARGIN);
        updates.push((entity, age, vel, pos, spent));
    }

    for (entity, age, vel, pos, spent) in updates {
        if let Ok(mut bullet) = world.get::<&mut Bullet>(entity) {
            bullet.age = age;
            bullet.spent = spent;
        }
        if let Ok(mut body) = world.get::<&mut Body>(entity) {
            body.vel = vel;
            body.pos = pos;
        }
    }
}
