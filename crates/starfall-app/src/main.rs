//! STARFALL headless demo.
//!
//! Starts the game loop, plays a short scripted session (sweep the ship side
//! to side with the trigger held), and logs one status line per second. High
//! scores land in the JSON file given as the first argument.

use std::thread;
use std::time::Duration;

use log::{error, info};

use starfall_app::state::AppState;
use starfall_core::commands::PlayerCommand;
use starfall_scores::ScoreStore;
use starfall_sim::engine::SimConfig;

fn steer(left: bool, right: bool, shoot: bool) -> PlayerCommand {
    PlayerCommand::SetInput {
        left,
        right,
        up: false,
        down: false,
        shoot,
        special: false,
    }
}

fn main() {
    env_logger::init();

    let score_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "starfall_scores.json".into());
    let scores = ScoreStore::open(&score_path);
    info!(
        "score file {score_path}, best so far {}",
        scores.high_score()
    );

    let app = AppState::new();
    if let Err(e) = app.start(SimConfig::default(), scores) {
        error!("could not start the game loop: {e}");
        return;
    }
    if let Err(e) = app.send(PlayerCommand::StartGame) {
        error!("could not start a session: {e}");
        return;
    }

    for second in 0..20u32 {
        // Swap sweep direction every two seconds, trigger held throughout.
        let headed_left = second % 4 < 2;
        if app.send(steer(headed_left, !headed_left, true)).is_err() {
            break;
        }
        thread::sleep(Duration::from_secs(1));

        if let Some(snap) = app.snapshot() {
            info!(
                "t={:>5.1}s phase={:?} score={} lives={} level={} enemies={} bullets={}",
                snap.time.elapsed_secs,
                snap.phase,
                snap.score,
                snap.lives,
                snap.level.level,
                snap.enemies.len(),
                snap.bullets.len()
            );
        }
    }

    app.shutdown();
    thread::sleep(Duration::from_millis(100));
    info!("demo finished");
}
