//! End-of-tick session progression.
//!
//! Evaluated after collision and cleanup: player death and respawn, boss
//! fight entry and resolution, and level completion. The order matters: a
//! boss defeat resolved here hands the phase back to Playing first, so the
//! same tick can immediately complete the level.

use glam::Vec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::{Body, Boss, Player};
use starfall_core::constants::{
    BOSS_DEFEAT_BONUS, EXPLOSION_PARTICLE_COUNT, LEVEL_COMPLETE_BONUS, PLAYER_INVULN_SECS,
    PLAYER_START,
};
use starfall_core::enums::{GamePhase, MusicTrack};
use starfall_core::events::AudioEvent;

use crate::level::{boss_kind_for_level, LevelState};
use crate::systems::particles::{self, EXPLOSION_COLOR};
use crate::world_setup;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    level: &mut LevelState,
    score: &mut u64,
    lives: &mut u32,
    phase: &mut GamePhase,
    interlude_secs: &mut f32,
    game_over_secs: &mut f32,
    events: &mut Vec<AudioEvent>,
) {
    let (player_entity, player_alive, player_pos) = match world
        .query_mut::<(&Player, &Body)>()
        .into_iter()
        .next()
    {
        Some((entity, (p, body))) => (entity, p.alive, body.pos),
        None => return,
    };

    // Death and respawn. Losing the last life ends the session on the
    // spot; later steps never see a dead player.
    if !player_alive {
        *lives = lives.saturating_sub(1);
        if *lives == 0 {
            particles::explosion(
                world,
                rng,
                seq,
                player_pos,
                2 * EXPLOSION_PARTICLE_COUNT,
                EXPLOSION_COLOR,
            );
            events.push(AudioEvent::PlayerDestroyed { lives_left: 0 });
            events.push(AudioEvent::GameOver { score: *score });
            events.push(AudioEvent::MusicChange {
                track: MusicTrack::GameOver,
                looped: false,
            });
            *phase = GamePhase::GameOver;
            *game_over_secs = 0.0;
            return;
        }

        particles::explosion(
            world,
            rng,
            seq,
            player_pos,
            EXPLOSION_PARTICLE_COUNT,
            EXPLOSION_COLOR,
        );
        events.push(AudioEvent::PlayerDestroyed { lives_left: *lives });
        if let Ok(mut p) = world.get::<&mut Player>(player_entity) {
            *p = world_setup::fresh_player();
            p.invuln_secs = PLAYER_INVULN_SECS;
        }
        if let Ok(mut body) = world.get::<&mut Body>(player_entity) {
            body.pos = PLAYER_START;
            body.vel = Vec2::ZERO;
        }
    }

    // Boss resolved: bank the bonus and hand the field back.
    if *phase == GamePhase::BossFight && !boss_alive(world) {
        *score += BOSS_DEFEAT_BONUS;
        level.note_boss_defeated();
        *phase = GamePhase::Playing;
        events.push(AudioEvent::MusicChange {
            track: MusicTrack::Gameplay,
            looped: true,
        });
    }

    // Quota met on a boss level: the boss gates completion.
    if *phase == GamePhase::Playing && level.should_spawn_boss() {
        let kind = boss_kind_for_level(level.level, rng);
        if world_setup::spawn_boss(world, kind, level.level).is_some() {
            level.note_boss_spawned();
            *phase = GamePhase::BossFight;
            events.push(AudioEvent::MusicChange {
                track: MusicTrack::Boss,
                looped: true,
            });
        }
    }

    // Level cleared: advance, bank the bonus, recenter the player, and
    // hold in the interlude until the pause elapses.
    if *phase == GamePhase::Playing && level.is_complete() {
        let finished = level.level;
        events.push(AudioEvent::LevelComplete { level: finished });

        let next = finished + 1;
        level.set_level(next);
        *score += LEVEL_COMPLETE_BONUS * next as u64;
        if let Ok(mut body) = world.get::<&mut Body>(player_entity) {
            body.pos = PLAYER_START;
            body.vel = Vec2::ZERO;
        }
        *phase = GamePhase::LevelComplete;
        *interlude_secs = 0.0;
    }
}

fn boss_alive(world: &mut World) -> bool {
    world
        .query_mut::<&Boss>()
        .into_iter()
        .any(|(_, boss)| boss.health > 0.0)
}
