//! Simulation constants and tuning parameters.

use glam::Vec2;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick before time scaling.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Hard ceiling on the effective step (DT * time_scale). Larger steps make
/// the lerp/friction integrators unstable.
pub const MAX_STEP_SECS: f32 = 0.1;

/// Maximum accepted time scale. DT * MAX_TIME_SCALE == MAX_STEP_SECS.
pub const MAX_TIME_SCALE: f32 = 3.0;

// --- Play field ---

/// Field width in pixels.
pub const FIELD_WIDTH: f32 = 800.0;

/// Field height in pixels. Origin is top-left, y grows downward.
pub const FIELD_HEIGHT: f32 = 600.0;

// --- Player ---

/// Player collision box.
pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 40.0);

/// Spawn/respawn position.
pub const PLAYER_START: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 100.0);

pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Base movement speed (px/s), before the speed power-up multiplier.
pub const PLAYER_SPEED: f32 = 300.0;

/// Acceleration toward the target velocity while a direction is held (px/s^2).
pub const PLAYER_ACCEL: f32 = 2000.0;

/// Per-tick velocity decay on axes with no input held.
pub const PLAYER_FRICTION: f32 = 0.85;

/// Invulnerability window after a non-lethal hit (seconds).
pub const PLAYER_INVULN_SECS: f32 = 2.0;

/// Lives at the start of a session.
pub const STARTING_LIVES: u32 = 3;

// --- Weapons ---

/// Seconds between player shots at weapon level 1.
pub const BULLET_COOLDOWN: f32 = 0.25;

/// Seconds between shots while rapid fire is active.
pub const RAPID_FIRE_COOLDOWN: f32 = 0.1;

/// Base damage per player bullet at weapon level 1.
pub const BULLET_DAMAGE: f32 = 25.0;

/// Player bullet speed (px/s).
pub const BULLET_SPEED: f32 = 500.0;

/// Maximum weapon upgrade level.
pub const WEAPON_LEVEL_MAX: u32 = 5;

/// Damage multiplier per weapon level above 1.
pub const WEAPON_DAMAGE_FACTOR: f32 = 1.25;

/// Cooldown multiplier per weapon level above 1 (sub-1: faster fire).
pub const WEAPON_COOLDOWN_FACTOR: f32 = 0.9;

/// Bullets per multi-shot volley.
pub const MULTI_SHOT_COUNT: u32 = 3;

/// Total fan angle of a multi-shot volley (degrees).
pub const MULTI_SHOT_SPREAD_DEG: f32 = 30.0;

// --- Bullets ---

/// Per-pool bullet cap (player, enemy, and boss pools each).
pub const MAX_BULLETS_PER_POOL: usize = 50;

/// Base player bullet collision box. Grows with weapon level.
pub const BULLET_SIZE: Vec2 = Vec2::new(4.0, 10.0);

/// Enemy bullet collision box. Boss bullets are twice this.
pub const ENEMY_BULLET_SIZE: Vec2 = Vec2::new(6.0, 6.0);

/// Enemy and boss bullet speed (px/s).
pub const ENEMY_BULLET_SPEED: f32 = 300.0;

pub const ENEMY_BULLET_DAMAGE: f32 = 10.0;

/// Boss bullet damage, also the boss contact damage.
pub const BOSS_DAMAGE: f32 = 20.0;

pub const PLAYER_BULLET_LIFETIME: f32 = 5.0;

pub const ENEMY_BULLET_LIFETIME: f32 = 8.0;

pub const BOSS_BULLET_LIFETIME: f32 = 10.0;

/// Distance past the field edge at which bullets are culled (px).
pub const BULLET_CULL_MARGIN: f32 = 100.0;

/// Homing turn strength on boss homing shots.
pub const BOSS_HOMING_STRENGTH: f32 = 0.5;

/// Rate multiplier in the homing re-aim step (strength * dt * this).
pub const HOMING_TURN_RATE: f32 = 5.0;

/// Initial heading offset between consecutive homing shots (degrees).
pub const HOMING_FAN_STEP_DEG: f32 = 15.0;

/// Speed factor for boss homing shots relative to ENEMY_BULLET_SPEED.
pub const BOSS_HOMING_SPEED_FACTOR: f32 = 0.7;

/// Hits a laser-flavored boss bullet survives.
pub const LASER_PIERCE_COUNT: u32 = 3;

/// Explosion radius on explosive boss bullets (px).
pub const BOSS_BLAST_RADIUS: f32 = 50.0;

// --- Enemies ---

/// Maximum simultaneous enemies.
pub const MAX_ENEMIES: usize = 20;

/// Base enemy collision box, scaled per kind.
pub const ENEMY_SIZE: Vec2 = Vec2::new(30.0, 30.0);

/// Base seconds between trickle spawns at level 1.
pub const ENEMY_SPAWN_INTERVAL: f32 = 2.0;

/// Base enemies per wave at level 1.
pub const ENEMY_WAVE_SIZE: u32 = 5;

/// Distance to the player below which enemies switch to Attack (px).
pub const ENEMY_ATTACK_RANGE: f32 = 300.0;

/// Distance to the player below which shooting-capable enemies fire (px).
pub const ENEMY_SHOOT_RANGE: f32 = 500.0;

/// Zigzag pattern frequency (rad/s on the pattern timer).
pub const ZIGZAG_FREQUENCY: f32 = 2.0;

/// Zigzag pattern horizontal speed amplitude (px/s).
pub const ZIGZAG_AMPLITUDE: f32 = 100.0;

/// Circle pattern radius (px).
pub const CIRCLE_RADIUS: f32 = 150.0;

/// Circle pattern center.
pub const CIRCLE_CENTER: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, 200.0);

/// Distance past the bottom edge at which enemies despawn silently (px).
pub const ENEMY_BOTTOM_MARGIN: f32 = 100.0;

/// Damage an enemy takes on player contact. Lethal for every kind.
pub const ENEMY_CONTACT_SUICIDE: f32 = 1000.0;

// --- Bosses ---

/// Base boss collision box, scaled per kind.
pub const BOSS_SIZE: Vec2 = Vec2::new(120.0, 80.0);

/// Boss spawn position.
pub const BOSS_SPAWN_POS: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, 100.0);

/// Base boss health at level 1 for a 1.0x kind.
pub const BOSS_BASE_HEALTH: f32 = 500.0;

/// Base boss movement speed cap (px/s).
pub const BOSS_BASE_SPEED: f32 = 100.0;

/// Base seconds between boss attacks.
pub const BOSS_BASE_FIRE_RATE: f32 = 1.5;

/// Base score for defeating a boss.
pub const BOSS_BASE_SCORE: u64 = 1000;

/// Boss health/score growth per level above 1.
pub const BOSS_LEVEL_HEALTH_STEP: f32 = 0.5;

/// Health fractions at which the boss escalates a phase.
pub const BOSS_PHASE_THRESHOLDS: [f32; 3] = [0.66, 0.33, 0.10];

/// Fire-rate multiplier applied once per phase step (sub-1: faster).
pub const BOSS_PHASE_FIRE_FACTOR: f32 = 0.8;

/// Speed multiplier applied once per phase step.
pub const BOSS_PHASE_SPEED_FACTOR: f32 = 1.2;

/// Easing factor from boss position toward its movement target.
pub const BOSS_EASE_FACTOR: f32 = 2.0;

/// Top of the band the boss is confined to (px).
pub const BOSS_MIN_Y: f32 = 50.0;

/// Bottom of the band the boss is confined to (px).
pub const BOSS_MAX_Y: f32 = FIELD_HEIGHT / 3.0;

/// Player distance at which Chase behavior starts tracking (px).
pub const BOSS_CHASE_RANGE: f32 = 300.0;

/// Player distance at which Dodge behavior reacts (px).
pub const BOSS_DODGE_RANGE: f32 = 400.0;

// --- Power-ups ---

/// Maximum simultaneous power-ups on the field.
pub const MAX_POWERUPS: usize = 10;

/// Power-up collision box.
pub const POWERUP_SIZE: Vec2 = Vec2::new(20.0, 20.0);

/// Fall speed (px/s).
pub const POWERUP_FALL_SPEED: f32 = 100.0;

/// Seconds on the field before a power-up despawns.
pub const POWERUP_LIFETIME: f32 = 15.0;

/// Seconds every timed power-up effect lasts from collection.
pub const POWERUP_DURATION: f32 = 10.0;

/// Chance that a kill drops a power-up.
pub const POWERUP_DROP_CHANCE: f32 = 0.15;

/// Health restored by a Health power-up.
pub const POWERUP_HEAL_AMOUNT: f32 = 25.0;

/// Speed multiplier while the Speed effect is active.
pub const POWERUP_SPEED_MULT: f32 = 1.5;

/// Damage multiplier while the Damage effect is active.
pub const POWERUP_DAMAGE_MULT: f32 = 2.0;

/// Shield points granted by a Shield power-up.
pub const SHIELD_CHARGE: f32 = 50.0;

/// Rarity tier weights. Legendary takes the remainder (0.05).
pub const RARITY_COMMON_WEIGHT: f32 = 0.5;
pub const RARITY_RARE_WEIGHT: f32 = 0.3;
pub const RARITY_EPIC_WEIGHT: f32 = 0.15;

// --- Particles ---

/// Global particle cap. Oldest particles are evicted past this.
pub const MAX_PARTICLES: usize = 500;

/// Particle count of a standard explosion burst.
pub const EXPLOSION_PARTICLE_COUNT: u32 = 20;

/// Distance past the field edge at which particles are culled (px).
pub const PARTICLE_CULL_MARGIN: f32 = 100.0;

// --- Levels ---

/// Spawn-interval multiplier per level above 1 (sub-1: faster spawns).
pub const LEVEL_SPAWN_FACTOR: f32 = 0.9;

/// Enemy-count multiplier per level above 1.
pub const LEVEL_COUNT_FACTOR: f32 = 1.2;

/// Enemy health multiplier per level above 1.
pub const LEVEL_HEALTH_FACTOR: f32 = 1.15;

/// Enemy speed multiplier per level above 1.
pub const LEVEL_SPEED_FACTOR: f32 = 1.05;

/// Enemy score growth per level above 1 (linear step).
pub const LEVEL_SCORE_STEP: f32 = 0.2;

/// Seconds between waves once the field is clear.
pub const WAVE_DELAY: f32 = 2.0;

/// First level that requires a boss; every level from here on has one.
pub const BOSS_SPAWN_LEVEL: u32 = 3;

/// Score bonus per completed level (scaled by the new level number).
pub const LEVEL_COMPLETE_BONUS: u64 = 100;

/// Score bonus for defeating a boss.
pub const BOSS_DEFEAT_BONUS: u64 = 500;

/// Seconds the level-complete interlude lasts.
pub const LEVEL_COMPLETE_PAUSE: f32 = 2.0;

/// Seconds before a game-over confirm is accepted.
pub const GAME_OVER_MIN_SECS: f32 = 2.0;

// --- Display ---

/// Alerts retained in the snapshot queue.
pub const MAX_ALERTS: usize = 6;
