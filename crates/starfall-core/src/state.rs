//! Game state snapshot — the complete visible state sent to the frontend each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, AudioEvent};
use crate::types::SimTime;

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: LevelView,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub boss: Option<BossView>,
    pub powerups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub alerts: Vec<Alert>,
    pub audio_events: Vec<AudioEvent>,
}

/// The player ship for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub weapon_level: u32,
    pub alive: bool,
    /// Blink cue while the post-hit window is active.
    pub invulnerable: bool,
    pub shield_active: bool,
    pub shield_charge: f32,
    pub speed_mult: f32,
    pub damage_mult: f32,
    pub rapid_fire: bool,
    pub multi_shot: bool,
}

/// An enemy ship for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub ai_state: AiState,
    pub pattern: MovementPattern,
}

/// A live bullet for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub id: u32,
    pub owner: BulletOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

/// The boss for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub id: u32,
    pub kind: BossKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub phase: u8,
    pub attack: BossAttack,
    pub shield_visible: bool,
}

/// A power-up on the field for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Seconds left before it despawns (blink cue near zero).
    pub remaining_secs: f32,
}

/// A decorative particle for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: [u8; 3],
    /// 0.0 - 1.0, derived from remaining lifetime when fade-out is set.
    pub alpha: f32,
}

/// Level progression for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelView {
    pub level: u32,
    pub enemies_required: u32,
    pub enemies_spawned: u32,
    pub enemies_defeated: u32,
    pub current_wave: u32,
    pub wave_count: u32,
    /// A boss still stands between the player and level completion.
    pub boss_pending: bool,
    /// Kill-quota progress, 0.0 - 1.0.
    pub progress: f32,
}
