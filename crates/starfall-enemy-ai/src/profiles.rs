//! Kind-specific behavioral profiles.
//!
//! Consolidates per-kind base stats for enemy spawning and the AI.

use starfall_core::enums::{EnemyKind, MovementPattern};

/// How a shooting-capable enemy fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotStyle {
    /// One aimed bullet.
    Single,
    /// Three-bullet fan centered on the player bearing.
    Spread,
}

/// Base stats for an enemy kind, before level scaling.
pub struct EnemyBehaviorProfile {
    pub health: f32,
    /// Movement speed range (px/s) sampled at spawn.
    pub speed_min: f32,
    pub speed_max: f32,
    /// Score awarded on kill.
    pub score: u64,
    /// Collision box scale relative to the base enemy size.
    pub size_scale: f32,
    /// Damage dealt to the player on contact.
    pub collision_damage: f32,
    pub can_shoot: bool,
    /// Seconds between shots when shooting-capable.
    pub fire_interval: f32,
    pub shot: ShotStyle,
    pub pattern: MovementPattern,
}

/// Get the behavioral profile for a given enemy kind.
pub fn get_profile(kind: EnemyKind) -> EnemyBehaviorProfile {
    match kind {
        EnemyKind::Basic => EnemyBehaviorProfile {
            health: 50.0,
            speed_min: 80.0,
            speed_max: 140.0,
            score: 100,
            size_scale: 1.0,
            collision_damage: 10.0,
            can_shoot: false,
            fire_interval: 0.0,
            shot: ShotStyle::Single,
            pattern: MovementPattern::Straight,
        },
        EnemyKind::Fast => EnemyBehaviorProfile {
            health: 30.0,
            speed_min: 250.0,
            speed_max: 250.0,
            score: 150,
            size_scale: 1.0,
            collision_damage: 10.0,
            can_shoot: false,
            fire_interval: 0.0,
            shot: ShotStyle::Single,
            pattern: MovementPattern::Straight,
        },
        EnemyKind::Tank => EnemyBehaviorProfile {
            health: 150.0,
            speed_min: 60.0,
            speed_max: 60.0,
            score: 300,
            size_scale: 1.5,
            collision_damage: 10.0,
            can_shoot: false,
            fire_interval: 0.0,
            shot: ShotStyle::Single,
            pattern: MovementPattern::Straight,
        },
        EnemyKind::Shooter => EnemyBehaviorProfile {
            health: 60.0,
            speed_min: 100.0,
            speed_max: 100.0,
            score: 200,
            size_scale: 1.0,
            collision_damage: 10.0,
            can_shoot: true,
            fire_interval: 2.0,
            shot: ShotStyle::Single,
            pattern: MovementPattern::Straight,
        },
        EnemyKind::Kamikaze => EnemyBehaviorProfile {
            health: 40.0,
            speed_min: 220.0,
            speed_max: 220.0,
            score: 250,
            size_scale: 1.0,
            collision_damage: 30.0,
            can_shoot: false,
            fire_interval: 0.0,
            shot: ShotStyle::Single,
            pattern: MovementPattern::Dive,
        },
        EnemyKind::Swarm => EnemyBehaviorProfile {
            health: 20.0,
            speed_min: 180.0,
            speed_max: 180.0,
            score: 80,
            size_scale: 0.7,
            collision_damage: 10.0,
            can_shoot: false,
            fire_interval: 0.0,
            shot: ShotStyle::Single,
            pattern: MovementPattern::Zigzag,
        },
        EnemyKind::Elite => EnemyBehaviorProfile {
            health: 120.0,
            speed_min: 120.0,
            speed_max: 120.0,
            score: 500,
            size_scale: 1.0,
            collision_damage: 10.0,
            can_shoot: true,
            fire_interval: 1.0,
            shot: ShotStyle::Spread,
            pattern: MovementPattern::Circle,
        },
    }
}
