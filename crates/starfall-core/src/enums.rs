//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    BossFight,
    LevelComplete,
    GameOver,
    Options,
    HighScores,
}

/// Which side fired a bullet. Pool caps and collision filtering key off this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletOwner {
    #[default]
    Player,
    Enemy,
    Boss,
}

/// Enemy archetype category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline fighter: average health and speed, no weapon.
    #[default]
    Basic,
    /// Low health, high speed, zigzag approach.
    Fast,
    /// Heavily armored, slow, hits hard on contact.
    Tank,
    /// Keeps its distance and fires at the player.
    Shooter,
    /// Dives straight at the player, lethal on impact.
    Kamikaze,
    /// Fragile, fast, erratic. Spawned in numbers.
    Swarm,
    /// Late-game shooter with a spread weapon and circling movement.
    Elite,
}

/// Movement pattern an enemy steers by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPattern {
    #[default]
    Straight,
    Zigzag,
    Circle,
    Dive,
}

/// Enemy AI state, recomputed each tick from distance to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Advance along the movement pattern.
    #[default]
    Patrol,
    /// Close enough to press toward the player.
    Attack,
    /// Within firing range.
    Shoot,
}

/// Boss archetype category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    /// First boss: aimed single shots, hovers.
    #[default]
    Basic,
    /// Agile boss: spread volleys, dodges toward open space.
    Twin,
    /// Heavy boss: spiral barrages, slow hover.
    Mega,
    /// Final boss: wave barrages, chases the player.
    Final,
}

/// Boss attack pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossAttack {
    /// Single aimed shot at the player.
    #[default]
    Single,
    /// Fan of shots centered on the player bearing.
    Spread,
    /// Full-circle volley rotating over time.
    Spiral,
    /// Horizontal curtain with sinusoidal headings.
    Wave,
    /// Volley of homing shots.
    Homing,
}

/// Boss movement behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossMotion {
    /// Drift between random points near the top of the field.
    #[default]
    Hover,
    /// Track the player's x position.
    Chase,
    /// Move away from the player's x position.
    Dodge,
}

/// Power-up kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restore a fixed amount of health.
    #[default]
    Health,
    /// Timed movement speed multiplier.
    Speed,
    /// Timed damage multiplier.
    Damage,
    /// Grant shield charge that absorbs damage before health.
    Shield,
    /// Timed fire-cooldown reduction.
    RapidFire,
    /// Timed three-way fan fire.
    MultiShot,
}

/// Power-up rarity tier, drives the weighted drop table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Background music track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    #[default]
    Menu,
    Gameplay,
    Boss,
    GameOver,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
