//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Held-key snapshot the player-control system reads each tick.
/// Replaced wholesale by every `SetInput` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    /// Special-ability key. Carried in the contract; no stock ability binds it.
    pub special: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Start a new game from the menu.
    StartGame,
    /// Acknowledge game over and return to the menu.
    ConfirmGameOver,
    /// Return to the menu from Options or HighScores.
    BackToMenu,

    // --- Menu navigation ---
    /// Open the options screen.
    OpenOptions,
    /// Open the high-scores screen.
    OpenHighScores,

    // --- Play control ---
    /// Toggle pause during play.
    TogglePause,
    /// Replace the held-input snapshot.
    SetInput {
        left: bool,
        right: bool,
        up: bool,
        down: bool,
        shoot: bool,
        special: bool,
    },
    /// Raise the weapon level by one (capped).
    UpgradeWeapon,

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 0.0 = frozen). Clamped by the engine.
    SetTimeScale { scale: f32 },
}

impl PlayerCommand {
    /// The held-input snapshot carried by a `SetInput` command.
    pub fn input_snapshot(&self) -> Option<HeldInput> {
        match *self {
            PlayerCommand::SetInput {
                left,
                right,
                up,
                down,
                shoot,
                special,
            } => Some(HeldInput {
                left,
                right,
                up,
                down,
                shoot,
                special,
            }),
            _ => None,
        }
    }
}
