//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Position, velocity, and collision size for any entity on the field.
/// All collidable entities carry one. `pos` is the entity center.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Velocity in px/s.
    pub vel: Vec2,
    /// Full width/height of the collision box.
    pub size: Vec2,
}

/// A projectile fired by the player, an enemy, or the boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub damage: f32,
    /// Seconds of flight time before expiry.
    pub lifetime: f32,
    pub age: f32,
    /// Set when the bullet has dealt its hit and awaits removal.
    pub spent: bool,
}

/// Homing flag on a bullet: re-aimed at the player every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Homing {
    /// Turn strength, fraction of bearing error corrected per unit time.
    pub strength: f32,
}

/// Piercing flag on a bullet: survives hits until the count runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Piercing {
    pub remaining: u32,
}

/// Explosive flag on a bullet: detonates in a radius on hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosive {
    pub radius: f32,
}

/// A decorative particle. Never read by collision logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub color: [u8; 3],
    pub size: f32,
    pub lifetime: f32,
    pub age: f32,
    /// Downward acceleration in px/s^2 (negative drifts upward).
    pub gravity: f32,
    /// Per-tick velocity damping factor (1.0 = none).
    pub friction: f32,
    /// When set, render alpha is derived from remaining lifetime.
    pub fade_out: bool,
    /// Spawn order, used for oldest-first eviction when the pool is full.
    pub seq: u64,
}

/// A collectible power-up falling down the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Seconds on the field before despawning.
    pub lifetime: f32,
    pub age: f32,
    /// Set when the player has picked it up and it awaits removal.
    pub collected: bool,
}

/// An enemy ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    /// Score awarded on kill.
    pub score_value: u64,
    /// Damage dealt to the player on contact.
    pub collision_damage: f32,
    pub ai_state: AiState,
    pub pattern: MovementPattern,
    /// Seconds accumulated driving the movement pattern.
    pub pattern_timer: f32,
    /// Circle-pattern angular position (radians).
    pub circle_angle: f32,
    /// Base movement speed in px/s.
    pub speed: f32,
    pub can_shoot: bool,
    /// Seconds between shots when shooting-capable.
    pub fire_interval: f32,
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
}

/// The boss ship. At most one exists at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub health: f32,
    pub max_health: f32,
    /// Escalation phase 0..=3, advanced one step per health threshold.
    pub phase: u8,
    pub attack: BossAttack,
    pub motion: BossMotion,
    /// Seconds between attacks at the current phase.
    pub fire_rate: f32,
    /// Seconds until the next attack is allowed.
    pub cooldown: f32,
    /// Seconds since the boss spawned, drives rotating/waving patterns.
    pub attack_timer: f32,
    /// Seconds since the last movement retarget.
    pub pattern_timer: f32,
    /// Movement speed cap in px/s.
    pub speed: f32,
    /// Point the movement AI is easing toward.
    pub target: Vec2,
    /// Shield visual shown once the boss has taken damage.
    pub shield_visible: bool,
    /// Score awarded on defeat.
    pub score_value: u64,
    /// Damage dealt to the player on contact.
    pub collision_damage: f32,
}

/// The player ship (singleton entity).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub health: f32,
    pub max_health: f32,
    /// Weapon upgrade level, 1..=WEAPON_LEVEL_MAX.
    pub weapon_level: u32,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
    /// Seconds of invulnerability remaining after taking a hit.
    pub invuln_secs: f32,
    pub alive: bool,
    /// Timed movement speed multiplier (1.0 when inactive).
    pub speed_mult: f32,
    pub speed_secs: f32,
    /// Timed damage multiplier (1.0 when inactive).
    pub damage_mult: f32,
    pub damage_secs: f32,
    pub rapid_fire: bool,
    pub rapid_secs: f32,
    pub multi_shot: bool,
    pub multi_secs: f32,
    /// Shield points that absorb damage before health.
    pub shield_charge: f32,
    pub shield_secs: f32,
}
