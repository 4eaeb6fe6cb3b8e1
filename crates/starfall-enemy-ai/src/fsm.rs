//! Enemy state selection and movement steering.
//!
//! Pure functions that compute the AI state and the next velocity (or a
//! direct position for orbit patterns) for enemy entities.
//! No ECS dependency — operates on plain data.

use glam::Vec2;
use starfall_core::constants::*;
use starfall_core::enums::{AiState, EnemyKind, MovementPattern};

/// Input to the enemy AI for a single entity and tick.
pub struct EnemyContext {
    pub kind: EnemyKind,
    pub pattern: MovementPattern,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-entity base speed (px/s).
    pub speed: f32,
    /// Pattern timer before this tick; `evaluate` advances it by dt.
    pub pattern_timer: f32,
    /// Circle-pattern angular position before this tick (radians).
    pub circle_angle: f32,
    pub can_shoot: bool,
    pub player_pos: Vec2,
    pub dt: f32,
}

/// Output from the enemy AI.
pub struct EnemyDecision {
    pub ai_state: AiState,
    pub velocity: Vec2,
    /// Set by orbit patterns that place the entity directly; the caller
    /// skips velocity integration when present.
    pub position_override: Option<Vec2>,
    pub pattern_timer: f32,
    pub circle_angle: f32,
    /// Whether x should be clamped to the field after integration.
    pub clamp_x: bool,
}

/// Evaluate the AI for one enemy. Returns the new state and steering.
pub fn evaluate(ctx: &EnemyContext) -> EnemyDecision {
    let distance = (ctx.player_pos - ctx.pos).length();
    let ai_state = select_state(ctx.kind, ctx.can_shoot, distance);
    let pattern_timer = ctx.pattern_timer + ctx.dt;
    let mut circle_angle = ctx.circle_angle;

    let mut position_override = None;
    let velocity = match ctx.pattern {
        MovementPattern::Straight => Vec2::new(0.0, ctx.speed),
        MovementPattern::Zigzag => Vec2::new(
            (pattern_timer * ZIGZAG_FREQUENCY).sin() * ZIGZAG_AMPLITUDE,
            ctx.speed,
        ),
        MovementPattern::Circle => {
            circle_angle += ctx.dt;
            position_override = Some(
                CIRCLE_CENTER + Vec2::new(circle_angle.cos(), circle_angle.sin()) * CIRCLE_RADIUS,
            );
            ctx.vel
        }
        MovementPattern::Dive => {
            if ai_state == AiState::Attack {
                let to_player = ctx.player_pos - ctx.pos;
                if to_player.length_squared() > 0.0 {
                    to_player.normalize_or_zero() * ctx.speed
                } else {
                    ctx.vel
                }
            } else {
                Vec2::new(0.0, ctx.speed)
            }
        }
    };

    EnemyDecision {
        ai_state,
        velocity,
        position_override,
        pattern_timer,
        circle_angle,
        clamp_x: ctx.kind != EnemyKind::Kamikaze,
    }
}

/// Select the AI state from the distance to the player.
/// Kamikaze enemies are always attacking.
pub fn select_state(kind: EnemyKind, can_shoot: bool, distance: f32) -> AiState {
    if kind == EnemyKind::Kamikaze {
        AiState::Attack
    } else if distance < ENEMY_ATTACK_RANGE {
        AiState::Attack
    } else if distance < ENEMY_SHOOT_RANGE && can_shoot {
        AiState::Shoot
    } else {
        AiState::Patrol
    }
}

/// Whether an enemy in this state presses the trigger when its cooldown is up.
pub fn wants_to_fire(state: AiState) -> bool {
    matches!(state, AiState::Shoot | AiState::Attack)
}
