//! Level progression state.
//!
//! Tracks the enemy kill quota, wave pacing, and the boss requirement for
//! the current level. Not an ECS component — the engine owns one instance
//! and the spawner/orchestrator systems drive it.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::constants::*;
use starfall_core::enums::BossKind;
use starfall_core::state::LevelView;

/// Per-level progression counters and flags.
#[derive(Debug, Clone)]
pub struct LevelState {
    /// Current level number, 1-based.
    pub level: u32,

    // --- Kill quota ---
    /// Enemies that must be defeated to clear the level.
    pub enemies_required: u32,
    /// Enemies handed to the spawner so far this level.
    pub enemies_spawned: u32,
    /// Enemies defeated so far this level.
    pub enemies_defeated: u32,

    // --- Wave pacing ---
    /// Quota per wave, derived from the level.
    enemies_per_wave: u32,
    /// Total waves this level.
    pub wave_count: u32,
    /// Current wave, 1-based.
    pub current_wave: u32,
    /// Spawns remaining in the current wave.
    wave_budget: u32,
    /// Seconds accumulated toward the next wave while the field is clear.
    wave_timer: f32,

    // --- Boss ---
    /// The boss for this level has been spawned.
    boss_spawned: bool,
    /// The boss for this level has been defeated.
    boss_defeated: bool,
}

impl LevelState {
    pub fn new() -> Self {
        let mut state = Self {
            level: 1,
            enemies_required: 0,
            enemies_spawned: 0,
            enemies_defeated: 0,
            enemies_per_wave: 0,
            wave_count: 0,
            current_wave: 1,
            wave_budget: 0,
            wave_timer: 0.0,
            boss_spawned: false,
            boss_defeated: false,
        };
        state.set_level(1);
        state
    }

    /// Reset all progression state for level `n`.
    ///
    /// The kill quota grows by `LEVEL_COUNT_FACTOR` per level while the
    /// per-wave batch grows at half that exponent, so higher levels split
    /// into more waves rather than one giant batch.
    pub fn set_level(&mut self, n: u32) {
        let n = n.max(1);
        let steps = (n - 1) as f32;
        let required = (ENEMY_WAVE_SIZE as f32 * LEVEL_COUNT_FACTOR.powf(steps)).floor() as u32;
        let per_wave =
            (ENEMY_WAVE_SIZE as f32 * LEVEL_COUNT_FACTOR.powf(steps / 2.0)).floor() as u32;
        let per_wave = per_wave.max(1);

        self.level = n;
        self.enemies_required = required;
        self.enemies_spawned = 0;
        self.enemies_defeated = 0;
        self.enemies_per_wave = per_wave;
        self.wave_count = required.div_ceil(per_wave).max(1);
        self.current_wave = 1;
        self.wave_budget = per_wave.min(required);
        self.wave_timer = 0.0;
        self.boss_spawned = false;
        self.boss_defeated = false;
    }

    /// Advance wave pacing. `active_enemies` is snapshotted once per tick by
    /// the caller so the wave decision is atomic for the whole tick.
    ///
    /// When the current wave is fully spawned, the next wave opens only after
    /// the field has stayed clear for `WAVE_DELAY` seconds.
    pub fn update(&mut self, dt: f32, active_enemies: u32) {
        let wave_exhausted = self.wave_budget == 0
            && self.current_wave < self.wave_count
            && self.enemies_spawned < self.enemies_required;
        if wave_exhausted && active_enemies == 0 {
            self.wave_timer += dt;
            if self.wave_timer >= WAVE_DELAY {
                self.current_wave += 1;
                self.wave_budget = self
                    .enemies_per_wave
                    .min(self.enemies_required - self.enemies_spawned);
                self.wave_timer = 0.0;
            }
        }
    }

    /// Whether the spawner should produce an enemy right now.
    pub fn should_spawn_wave(&self) -> bool {
        !self.is_complete() && self.wave_budget > 0
    }

    /// Spawns remaining in the current wave.
    pub fn wave_quota(&self) -> u32 {
        self.wave_budget
    }

    /// Record one spawned enemy and re-arm the wave timer.
    pub fn note_spawned(&mut self) {
        self.enemies_spawned += 1;
        self.wave_budget = self.wave_budget.saturating_sub(1);
        self.wave_timer = 0.0;
    }

    /// Record defeated enemies (called from the collision pass and the
    /// bottom-edge sweep so escapes cannot soft-lock the quota).
    pub fn note_defeated(&mut self, n: u32) {
        self.enemies_defeated += n;
    }

    /// Every level from `BOSS_SPAWN_LEVEL` on ends with a boss.
    pub fn requires_boss(&self) -> bool {
        self.level >= BOSS_SPAWN_LEVEL
    }

    /// True exactly once per level: quota met, boss required, none spawned yet.
    pub fn should_spawn_boss(&self) -> bool {
        self.enemies_defeated >= self.enemies_required
            && self.requires_boss()
            && !self.boss_spawned
    }

    pub fn note_boss_spawned(&mut self) {
        self.boss_spawned = true;
    }

    pub fn note_boss_defeated(&mut self) {
        self.boss_defeated = true;
    }

    /// A boss still stands between the player and level completion.
    pub fn boss_pending(&self) -> bool {
        self.requires_boss() && !self.boss_defeated
    }

    /// Level cleared: quota met and any required boss resolved.
    /// Never true while `defeated < required`, regardless of boss state.
    pub fn is_complete(&self) -> bool {
        self.enemies_defeated >= self.enemies_required
            && (!self.requires_boss() || self.boss_defeated)
    }

    /// Kill-quota progress, 0.0 - 1.0.
    pub fn progress(&self) -> f32 {
        if self.enemies_required == 0 {
            return 1.0;
        }
        (self.enemies_defeated as f32 / self.enemies_required as f32).min(1.0)
    }

    /// Projection for the HUD.
    pub fn view(&self) -> LevelView {
        LevelView {
            level: self.level,
            enemies_required: self.enemies_required,
            enemies_spawned: self.enemies_spawned,
            enemies_defeated: self.enemies_defeated,
            current_wave: self.current_wave,
            wave_count: self.wave_count,
            boss_pending: self.boss_pending(),
            progress: self.progress(),
        }
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the boss kind for a level. Early levels stay on the basic boss;
/// higher bands mix in the heavier kinds, with the final boss reserved for
/// milestone levels.
pub fn boss_kind_for_level(level: u32, rng: &mut ChaCha8Rng) -> BossKind {
    let pick = |rng: &mut ChaCha8Rng, kinds: &[BossKind]| kinds[rng.gen_range(0..kinds.len())];
    if level < 5 {
        BossKind::Basic
    } else if level < 10 {
        pick(rng, &[BossKind::Basic, BossKind::Twin])
    } else if level < 15 {
        pick(rng, &[BossKind::Twin, BossKind::Mega])
    } else if level < 20 {
        if level % 5 == 0 {
            BossKind::Final
        } else {
            pick(rng, &[BossKind::Twin, BossKind::Mega])
        }
    } else if level % 10 == 0 {
        BossKind::Final
    } else {
        pick(rng, &[BossKind::Twin, BossKind::Mega, BossKind::Final])
    }
}
