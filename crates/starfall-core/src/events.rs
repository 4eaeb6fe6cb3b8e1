//! One-shot events the simulation emits for sound and HUD feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Cues for the frontend sound system, drained from each snapshot.
/// Fire-and-forget: a consumer that drops them must not change behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Player fired a shot (one event per volley).
    PlayerShoot,
    /// A bullet connected with something.
    BulletHit,
    /// Player took damage.
    PlayerHit,
    /// An enemy was destroyed.
    EnemyDestroyed { kind: EnemyKind },
    /// Player lost a life.
    PlayerDestroyed { lives_left: u32 },
    /// Boss fired a volley.
    BossShot { pattern: BossAttack },
    /// Boss was defeated.
    BossDefeated { kind: BossKind },
    /// Player picked up a power-up.
    PowerUpCollected { kind: PowerUpKind },
    /// Level quota cleared, interlude started.
    LevelComplete { level: u32 },
    /// Last life lost.
    GameOver { score: u64 },
    /// Background music change request.
    MusicChange { track: MusicTrack, looped: bool },
    /// Simulation paused, music should halt in place.
    MusicPaused,
    /// Simulation resumed, music should pick up where it left off.
    MusicResumed,
}

/// One line in the HUD alert queue, stamped with the tick that raised it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
