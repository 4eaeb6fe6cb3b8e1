//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player ship, enemies, bosses, and power-ups with
//! appropriate component bundles. Level scaling is baked into the
//! components at spawn time so systems never re-derive it.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::*;
use starfall_core::constants::*;
use starfall_core::enums::*;
use starfall_enemy_ai::profiles::get_profile;

/// Spawn the player ship at the start position with a fresh loadout.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        fresh_player(),
        Body {
            pos: PLAYER_START,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
        },
    ))
}

/// A factory-new player component: full health, level-1 weapon, no effects.
/// Used both for the initial spawn and for respawns after a lost life.
pub fn fresh_player() -> Player {
    Player {
        health: PLAYER_MAX_HEALTH,
        max_health: PLAYER_MAX_HEALTH,
        weapon_level: 1,
        fire_cooldown: 0.0,
        invuln_secs: 0.0,
        alive: true,
        speed_mult: 1.0,
        speed_secs: 0.0,
        damage_mult: 1.0,
        damage_secs: 0.0,
        rapid_fire: false,
        rapid_secs: 0.0,
        multi_shot: false,
        multi_secs: 0.0,
        shield_charge: 0.0,
        shield_secs: 0.0,
    }
}

/// Pick an enemy kind from the level's unlocked weight table.
///
/// The table is an ordered cumulative scan over normalized weights: one
/// uniform draw, one pass. Level 1 only ever produces Basic; each gated
/// kind joins the table at its unlock level.
pub fn choose_enemy_kind(rng: &mut ChaCha8Rng, level: u32) -> EnemyKind {
    let mut table: Vec<(EnemyKind, f32)> = vec![(EnemyKind::Basic, 0.4)];
    if level >= 2 {
        table.push((EnemyKind::Fast, 0.2));
        table.push((EnemyKind::Shooter, 0.15));
    }
    if level >= 3 {
        table.push((EnemyKind::Tank, 0.15));
        table.push((EnemyKind::Swarm, 0.1));
    }
    if level >= 4 {
        table.push((EnemyKind::Kamikaze, 0.1));
    }
    if level >= 5 {
        table.push((EnemyKind::Elite, 0.1));
    }

    let total: f32 = table.iter().map(|(_, w)| w).sum();
    let roll: f32 = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (kind, weight) in &table {
        cumulative += weight;
        if roll < cumulative {
            return *kind;
        }
    }
    EnemyKind::Basic
}

/// Spawn a single enemy of the given kind at a random x along the top edge.
/// Base stats come from the kind profile; health, speed, and score are
/// scaled by the level before being baked into the component.
pub fn spawn_enemy(world: &mut World, rng: &mut ChaCha8Rng, kind: EnemyKind, level: u32) -> Entity {
    let profile = get_profile(kind);
    let size = ENEMY_SIZE * profile.size_scale;
    let half = size * 0.5;

    let x = rng.gen_range(half.x..=FIELD_WIDTH - half.x);
    let pos = Vec2::new(x, -half.y);

    let steps = (level.max(1) - 1) as i32;
    let health = (profile.health * LEVEL_HEALTH_FACTOR.powi(steps)).round();
    let speed = rng.gen_range(profile.speed_min..=profile.speed_max)
        * LEVEL_SPEED_FACTOR.powi(steps);
    let score =
        (profile.score as f32 * (1.0 + LEVEL_SCORE_STEP * steps as f32)).round() as u64;

    // Orbit enemies enter the circle at a random phase.
    let circle_angle = if profile.pattern == MovementPattern::Circle {
        rng.gen_range(0.0..std::f32::consts::TAU)
    } else {
        0.0
    };

    world.spawn((
        Enemy {
            kind,
            health,
            max_health: health,
            score_value: score,
            collision_damage: profile.collision_damage,
            ai_state: AiState::Patrol,
            pattern: profile.pattern,
            pattern_timer: 0.0,
            circle_angle,
            speed,
            can_shoot: profile.can_shoot,
            fire_interval: profile.fire_interval,
            cooldown: profile.fire_interval,
        },
        Body {
            pos,
            vel: Vec2::new(0.0, speed),
            size,
        },
    ))
}

/// Per-kind boss parameters: (health multiplier, size scale, attack, motion).
fn boss_kind_params(kind: BossKind) -> (f32, f32, BossAttack, BossMotion) {
    match kind {
        BossKind::Basic => (1.0, 1.0, BossAttack::Single, BossMotion::Hover),
        BossKind::Twin => (0.7, 0.8, BossAttack::Spread, BossMotion::Dodge),
        BossKind::Mega => (2.0, 1.5, BossAttack::Spiral, BossMotion::Hover),
        BossKind::Final => (3.0, 1.8, BossAttack::Wave, BossMotion::Chase),
    }
}

/// Spawn the boss for a level. No-op (returns None) while a boss is active.
pub fn spawn_boss(world: &mut World, kind: BossKind, level: u32) -> Option<Entity> {
    let boss_active = world.query_mut::<&Boss>().into_iter().next().is_some();
    if boss_active {
        return None;
    }

    let (health_mult, size_scale, attack, motion) = boss_kind_params(kind);
    let level_mult = 1.0 + BOSS_LEVEL_HEALTH_STEP * (level.max(1) - 1) as f32;
    let health = BOSS_BASE_HEALTH * health_mult * level_mult;
    let score = (BOSS_BASE_SCORE as f32 * level_mult).round() as u64;

    Some(world.spawn((
        Boss {
            kind,
            health,
            max_health: health,
            phase: 0,
            attack,
            motion,
            fire_rate: BOSS_BASE_FIRE_RATE,
            cooldown: BOSS_BASE_FIRE_RATE,
            attack_timer: 0.0,
            pattern_timer: 0.0,
            speed: BOSS_BASE_SPEED,
            target: BOSS_SPAWN_POS,
            shield_visible: false,
            score_value: score,
            collision_damage: BOSS_DAMAGE,
        },
        Body {
            pos: BOSS_SPAWN_POS,
            vel: Vec2::ZERO,
            size: BOSS_SIZE * size_scale,
        },
    )))
}

/// Roll a power-up kind from the weighted rarity tiers.
fn roll_powerup_kind(rng: &mut ChaCha8Rng) -> PowerUpKind {
    let roll: f32 = rng.gen();
    if roll < RARITY_COMMON_WEIGHT {
        [PowerUpKind::Health, PowerUpKind::Speed, PowerUpKind::Damage][rng.gen_range(0..3)]
    } else if roll < RARITY_COMMON_WEIGHT + RARITY_RARE_WEIGHT {
        [PowerUpKind::Shield, PowerUpKind::RapidFire][rng.gen_range(0..2)]
    } else if roll < RARITY_COMMON_WEIGHT + RARITY_RARE_WEIGHT + RARITY_EPIC_WEIGHT {
        PowerUpKind::MultiShot
    } else {
        // Legendary tier: a heavy roll of the two defensive kinds.
        [PowerUpKind::Health, PowerUpKind::Shield][rng.gen_range(0..2)]
    }
}

/// Spawn a power-up at `pos`. Skipped silently when the pool is full.
/// When `kind` is None the rarity table decides.
pub fn spawn_powerup(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    kind: Option<PowerUpKind>,
) -> Option<Entity> {
    let active = world.query_mut::<&PowerUp>().into_iter().count();
    if active >= MAX_POWERUPS {
        return None;
    }

    let kind = kind.unwrap_or_else(|| roll_powerup_kind(rng));
    Some(world.spawn((
        PowerUp {
            kind,
            lifetime: POWERUP_LIFETIME,
            age: 0.0,
            collected: false,
        },
        Body {
            pos,
            vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
            size: POWERUP_SIZE,
        },
    )))
}

/// The kill-path drop hook: an independent Bernoulli trial per kill.
pub fn spawn_powerup_chance(world: &mut World, rng: &mut ChaCha8Rng, pos: Vec2, chance: f32) {
    if rng.gen::<f32>() < chance {
        spawn_powerup(world, rng, pos, None);
    }
}
