//! Game loop thread — runs the simulation engine at 30Hz and publishes snapshots.
//!
//! The engine lives entirely on this thread; nothing else ever touches it.
//! Commands arrive via `mpsc` channel and are drained before each tick; the
//! latest snapshot lands in a shared slot for synchronous polling. On the tick
//! a session ends, the final score goes to the score store.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use starfall_core::constants::TICK_RATE;
use starfall_core::enums::GamePhase;
use starfall_core::state::GameStateSnapshot;
use starfall_scores::ScoreStore;
use starfall_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall-clock length of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop on its own named thread.
///
/// Returns the command sender for the host to use.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    scores: ScoreStore,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("starfall-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot, scores);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The loop body. Runs until a Shutdown command or a channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut scores: ScoreStore,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut prev_phase = engine.phase();
    info!("game loop started at {TICK_RATE} Hz");

    loop {
        // 1. Pull every queued command without blocking
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    info!("command channel closed, stopping game loop");
                    return;
                }
            }
        }

        // 2. One engine tick (pause and menu freezes happen inside)
        let snapshot = engine.tick();

        // 3. Record the score on the tick the session ends
        prev_phase = persist_on_game_over(prev_phase, &snapshot, &mut scores);

        // 4. Publish the snapshot for pollers
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep to the next tick boundary, scaled by time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f32(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // More than two ticks late: re-anchor rather than spiral
            warn!(
                "game loop fell behind by {:?}, re-anchoring",
                now - next_tick_time
            );
            next_tick_time = now;
        }
    }
}

/// Record the final score exactly once per session: on the tick the phase
/// lands on GameOver. Returns the phase to carry into the next tick.
fn persist_on_game_over(
    prev_phase: GamePhase,
    snapshot: &GameStateSnapshot,
    scores: &mut ScoreStore,
) -> GamePhase {
    if snapshot.phase == GamePhase::GameOver && prev_phase != GamePhase::GameOver {
        match scores.record(snapshot.score, snapshot.level.level) {
            Ok(Some(rank)) => info!(
                "final score {} entered the high scores at rank {rank}",
                snapshot.score
            ),
            Ok(None) => debug!("final score {} did not make the high scores", snapshot.score),
            Err(e) => warn!("failed to persist high score: {e}"),
        }
    }
    snapshot.phase
}
