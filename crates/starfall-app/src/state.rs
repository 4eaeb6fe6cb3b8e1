//! Host-side session state shared with the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use starfall_core::commands::PlayerCommand;
use starfall_core::state::GameStateSnapshot;
use starfall_scores::ScoreStore;
use starfall_sim::engine::SimConfig;

use crate::game_loop;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a game loop thread. One loop per handle.
///
/// Everything here is `Send + Sync`: the `mpsc::Sender` sits behind a
/// `Mutex` (it is `Send` but not `Sync`) and the snapshot slot is shared
/// with the loop thread through an `Arc`.
pub struct AppState {
    /// Channel into the game loop thread. `None` until `start`.
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, written by the loop thread after each tick.
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }

    /// Spawn the game loop. Errors when one is already attached.
    pub fn start(&self, config: SimConfig, scores: ScoreStore) -> Result<(), String> {
        let mut tx = self.command_tx.lock().map_err(|e| e.to_string())?;
        if tx.is_some() {
            return Err("game loop already running".into());
        }
        *tx = Some(game_loop::spawn_game_loop(
            config,
            self.latest_snapshot.clone(),
            scores,
        ));
        Ok(())
    }

    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), String> {
        let tx = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Player(command))
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("game loop not started".into()),
        }
    }

    /// The most recent whole-tick snapshot, once any tick has completed.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
    }

    /// Ask the loop to stop. A no-op when it never started.
    pub fn shutdown(&self) {
        if let Ok(tx) = self.command_tx.lock() {
            if let Some(tx) = tx.as_ref() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
