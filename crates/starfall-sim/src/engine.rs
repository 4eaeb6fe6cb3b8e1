//! Simulation engine — the heart of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, drains queued player
//! commands, steps the ordered system pipeline, and emits one
//! `GameStateSnapshot` per tick. Completely headless, so every behavior
//! is testable tick by tick.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::commands::{HeldInput, PlayerCommand};
use starfall_core::components::{Boss, Player};
use starfall_core::constants::{
    DT, GAME_OVER_MIN_SECS, LEVEL_COMPLETE_PAUSE, MAX_ALERTS, MAX_STEP_SECS, MAX_TIME_SCALE,
    STARTING_LIVES, WEAPON_LEVEL_MAX,
};
use starfall_core::enums::{AlertLevel, GamePhase, MusicTrack};
use starfall_core::events::{Alert, AudioEvent};
use starfall_core::state::GameStateSnapshot;
use starfall_core::types::SimTime;

use crate::level::LevelState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// Seed for the engine RNG. Equal seeds replay identical sessions.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Clamped like `SetTimeScale`.
    pub time_scale: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    alerts: VecDeque<Alert>,

    // --- Session state ---
    score: u64,
    lives: u32,
    level: LevelState,
    input: HeldInput,
    spawn_timer: f32,
    particle_seq: u64,
    interlude_secs: f32,
    game_over_secs: f32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            alerts: VecDeque::new(),
            score: 0,
            lives: STARTING_LIVES,
            level: LevelState::new(),
            input: HeldInput::default(),
            spawn_timer: 0.0,
            particle_seq: 0,
            interlude_secs: 0.0,
            game_over_secs: 0.0,
        };
        engine.audio_events.push(AudioEvent::MusicChange {
            track: MusicTrack::Menu,
            looped: true,
        });
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Commands drain first, then the phase decides what the step does:
    /// Playing and BossFight run the full pipeline, LevelComplete and
    /// GameOver only accumulate their hold timers, everything else leaves
    /// the clock untouched. A zero time scale freezes the clock without
    /// dropping commands.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        let dt = (DT * self.time_scale).min(MAX_STEP_SECS);
        if dt > 0.0 {
            match self.phase {
                GamePhase::Playing | GamePhase::BossFight => {
                    self.run_systems(dt);
                    self.time.advance(dt);
                }
                GamePhase::LevelComplete => {
                    self.interlude_secs += dt;
                    self.time.advance(dt);
                    if self.interlude_secs >= LEVEL_COMPLETE_PAUSE {
                        self.phase = GamePhase::Playing;
                    }
                }
                GamePhase::GameOver => {
                    self.game_over_secs += dt;
                    self.time.advance(dt);
                }
                _ => {}
            }
        }

        self.collect_alerts();
        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.score,
            self.lives,
            &self.level,
            &self.alerts,
            audio_events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for test surgery).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get a mutable reference to the level progression state.
    #[cfg(test)]
    pub fn level_mut(&mut self) -> &mut LevelState {
        &mut self.level
    }

    /// Override the remaining lives.
    #[cfg(test)]
    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    /// Spawn an enemy at a fixed position (for tests needing placement).
    #[cfg(test)]
    pub fn spawn_enemy_at(
        &mut self,
        kind: starfall_core::enums::EnemyKind,
        pos: glam::Vec2,
    ) -> hecs::Entity {
        let entity = world_setup::spawn_enemy(&mut self.world, &mut self.rng, kind, 1);
        if let Ok(mut body) = self.world.get::<&mut starfall_core::components::Body>(entity) {
            body.pos = pos;
            body.vel = glam::Vec2::ZERO;
        }
        entity
    }

    /// Spawn a boss immediately (for tests driving boss mechanics).
    #[cfg(test)]
    pub fn spawn_boss_now(&mut self, kind: starfall_core::enums::BossKind) -> Option<hecs::Entity> {
        world_setup::spawn_boss(&mut self.world, kind, self.level.level)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::Menu {
                    self.reset_session();
                    world_setup::spawn_player(&mut self.world);
                    self.phase = GamePhase::Playing;
                    self.audio_events.push(AudioEvent::MusicChange {
                        track: MusicTrack::Gameplay,
                        looped: true,
                    });
                }
            }
            PlayerCommand::ConfirmGameOver => {
                if self.phase == GamePhase::GameOver && self.game_over_secs >= GAME_OVER_MIN_SECS {
                    self.reset_session();
                    self.phase = GamePhase::Menu;
                    self.audio_events.push(AudioEvent::MusicChange {
                        track: MusicTrack::Menu,
                        looped: true,
                    });
                }
            }
            PlayerCommand::BackToMenu => {
                if matches!(self.phase, GamePhase::Options | GamePhase::HighScores) {
                    self.phase = GamePhase::Menu;
                }
            }
            PlayerCommand::OpenOptions => {
                if self.phase == GamePhase::Menu {
                    self.phase = GamePhase::Options;
                }
            }
            PlayerCommand::OpenHighScores => {
                if self.phase == GamePhase::Menu {
                    self.phase = GamePhase::HighScores;
                }
            }
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Playing | GamePhase::BossFight => {
                    self.phase = GamePhase::Paused;
                    self.audio_events.push(AudioEvent::MusicPaused);
                }
                GamePhase::Paused => {
                    self.phase = if self.boss_alive() {
                        GamePhase::BossFight
                    } else {
                        GamePhase::Playing
                    };
                    self.audio_events.push(AudioEvent::MusicResumed);
                }
                _ => {}
            },
            PlayerCommand::SetInput {
                left,
                right,
                up,
                down,
                shoot,
                special,
            } => {
                self.input = HeldInput {
                    left,
                    right,
                    up,
                    down,
                    shoot,
                    special,
                };
            }
            PlayerCommand::UpgradeWeapon => {
                if matches!(self.phase, GamePhase::Playing | GamePhase::BossFight) {
                    for (_entity, player) in self.world.query_mut::<&mut Player>() {
                        player.weapon_level = (player.weapon_level + 1).min(WEAPON_LEVEL_MAX);
                    }
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
        }
    }

    /// Run all systems in order for one effective step.
    fn run_systems(&mut self, dt: f32) {
        // 1. Level pacing and enemy spawning
        systems::enemy_spawn::run(
            &mut self.world,
            &mut self.level,
            &mut self.rng,
            &mut self.spawn_timer,
            dt,
        );
        // 2. Player movement, timers, and fire
        systems::player::run(&mut self.world, self.input, dt, &mut self.audio_events);
        // 3. Enemy AI and movement
        systems::enemy_ai::run(&mut self.world, dt);
        // 4. Boss phases, movement, and volleys
        systems::boss::run(&mut self.world, dt, &mut self.audio_events);
        // 5. Bullet flight (homing, expiry, culling)
        systems::bullets::run(&mut self.world, dt);
        // 6. Power-up drift
        systems::powerups::run(&mut self.world, dt);
        // 7. Particle motion
        systems::particles::run(&mut self.world, dt);
        // 8. Collision resolution
        systems::collision::run(
            &mut self.world,
            &mut self.rng,
            &mut self.particle_seq,
            &mut self.level,
            &mut self.score,
            &mut self.audio_events,
            &mut self.despawn_buffer,
        );
        // 9. Cleanup sweep (despawns everything deactivated this tick)
        systems::cleanup::run(&mut self.world, &mut self.level, &mut self.despawn_buffer);
        // 10. Session progression (death, boss handoff, level completion)
        systems::progression::run(
            &mut self.world,
            &mut self.rng,
            &mut self.particle_seq,
            &mut self.level,
            &mut self.score,
            &mut self.lives,
            &mut self.phase,
            &mut self.interlude_secs,
            &mut self.game_over_secs,
            &mut self.audio_events,
        );
    }

    /// Wipe per-session state for a fresh game. The RNG stream, particle
    /// sequence, and engine clock are not reset.
    fn reset_session(&mut self) {
        self.world.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = LevelState::new();
        self.input = HeldInput::default();
        self.spawn_timer = 0.0;
        self.interlude_secs = 0.0;
        self.game_over_secs = 0.0;
        self.despawn_buffer.clear();
        self.alerts.clear();
    }

    /// Derive HUD alerts from this tick's audio events.
    fn collect_alerts(&mut self) {
        for event in &self.audio_events {
            let alert = match event {
                AudioEvent::MusicChange {
                    track: MusicTrack::Boss,
                    ..
                } => Some((AlertLevel::Warning, "BOSS INBOUND".to_string())),
                AudioEvent::PlayerDestroyed { lives_left } => Some((
                    AlertLevel::Warning,
                    format!("SHIP DOWN, {lives_left} LIVES LEFT"),
                )),
                AudioEvent::LevelComplete { level } => {
                    Some((AlertLevel::Info, format!("LEVEL {level} CLEAR")))
                }
                AudioEvent::GameOver { score } => {
                    Some((AlertLevel::Critical, format!("GAME OVER, SCORE {score}")))
                }
                AudioEvent::PowerUpCollected { kind } => {
                    Some((AlertLevel::Info, format!("{kind:?} ACQUIRED")))
                }
                AudioEvent::BossDefeated { kind } => {
                    Some((AlertLevel::Info, format!("{kind:?} DESTROYED")))
                }
                _ => None,
            };
            if let Some((level, message)) = alert {
                self.alerts.push_back(Alert {
                    level,
                    message,
                    tick: self.time.tick,
                });
            }
        }
        while self.alerts.len() > MAX_ALERTS {
            self.alerts.pop_front();
        }
    }

    fn boss_alive(&mut self) -> bool {
        self.world
            .query_mut::<&Boss>()
            .into_iter()
            .any(|(_, boss)| boss.health > 0.0)
    }
}
