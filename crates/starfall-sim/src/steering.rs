//! Steering and volley-pattern math.
//!
//! Pure functions shared by the player, enemy, and boss weapon systems:
//! fan/spiral angle generation for volleys and the bounded-turn steering
//! used by homing projectiles. Screen convention throughout: x grows right,
//! y grows down, angles are measured from +x toward +y (so "up" is -PI/2).
//!
//! No ECS dependency — operates on plain vectors and angles.

use glam::Vec2;
use starfall_core::constants::{HOMING_FAN_STEP_DEG, HOMING_TURN_RATE};
use starfall_core::types::wrap_angle;

/// Angle of the line from `from` to `to`, radians.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Angle offsets for a fan of `count` shots spanning `spread_deg` degrees,
/// centered on the forward axis.
///
/// The offsets are evenly spaced over `[-spread/2, +spread/2]`: step =
/// `spread / (count - 1)`. A single shot fires exactly on-axis; an even
/// count straddles the axis with no on-axis shot.
pub fn spread_offsets(count: u32, spread_deg: f32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let spread = spread_deg.to_radians();
            let step = spread / (count - 1) as f32;
            (0..count).map(|i| -spread / 2.0 + i as f32 * step).collect()
        }
    }
}

/// Absolute angles for a full-circle volley of `count` shots starting at
/// `base_angle` (radians). Step = TAU / count, so consecutive volleys with
/// an advancing base angle rotate continuously instead of restarting.
pub fn spiral_angles(count: u32, base_angle: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / count as f32;
    (0..count).map(|i| base_angle + i as f32 * step).collect()
}

/// Initial heading offsets for a homing volley: shot `i` starts
/// `(i - count/2) * 15` degrees off the target bearing. Integer division
/// keeps an odd volley centered and biases an even one to the left.
pub fn homing_fan_offsets(count: u32) -> Vec<f32> {
    let half = (count / 2) as i32;
    (0..count as i32)
        .map(|i| ((i - half) as f32 * HOMING_FAN_STEP_DEG).to_radians())
        .collect()
}

/// Rotate a velocity toward `target_bearing` by a bounded step, preserving
/// speed.
///
/// The step is `shortest_signed_diff * strength * dt * HOMING_TURN_RATE`:
/// proportional pursuit of a moving target rather than an instant snap.
/// With strength 0.5 at 30 Hz the heading closes roughly 8% of the
/// remaining error per tick, so a crossing target is tracked with visible
/// curve. A zero velocity has no heading and is returned unchanged.
pub fn steer_toward(vel: Vec2, target_bearing: f32, strength: f32, dt: f32) -> Vec2 {
    let speed = vel.length();
    if speed <= f32::EPSILON {
        return vel;
    }
    let heading = vel.y.atan2(vel.x);
    let diff = wrap_angle(target_bearing - heading);
    let next = heading + diff * strength * dt * HOMING_TURN_RATE;
    Vec2::new(next.cos(), next.sin()) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::constants::DT;

    #[test]
    fn test_spread_single_shot_on_axis() {
        let offsets = spread_offsets(1, 60.0);
        assert_eq!(offsets.len(), 1);
        assert!(offsets[0].abs() < 1e-6, "single shot must be on-axis");
    }

    #[test]
    fn test_spread_five_over_sixty_degrees() {
        let offsets = spread_offsets(5, 60.0);
        let expected = [-30.0f32, -15.0, 0.0, 15.0, 30.0];
        assert_eq!(offsets.len(), 5);
        for (got, want) in offsets.iter().zip(expected.iter()) {
            assert!(
                (got.to_degrees() - want).abs() < 1e-4,
                "expected {want} deg, got {} deg",
                got.to_degrees()
            );
        }
    }

    #[test]
    fn test_spread_even_count_straddles_axis() {
        let offsets = spread_offsets(4, 30.0);
        assert_eq!(offsets.len(), 4);
        for o in &offsets {
            assert!(o.abs() > 1e-6, "even fan must not contain an on-axis shot");
        }
        // Symmetric about zero.
        let sum: f32 = offsets.iter().sum();
        assert!(sum.abs() < 1e-5, "fan should be centered, sum was {sum}");
    }

    #[test]
    fn test_spread_zero_count_empty() {
        assert!(spread_offsets(0, 45.0).is_empty());
    }

    #[test]
    fn test_spiral_covers_full_circle() {
        let angles = spiral_angles(8, 0.5);
        assert_eq!(angles.len(), 8);
        let step = std::f32::consts::TAU / 8.0;
        for (i, a) in angles.iter().enumerate() {
            let want = 0.5 + i as f32 * step;
            assert!((a - want).abs() < 1e-5, "shot {i}: expected {want}, got {a}");
        }
    }

    #[test]
    fn test_spiral_consecutive_volleys_rotate() {
        let first = spiral_angles(8, 0.0);
        let second = spiral_angles(8, 0.3);
        for (a, b) in first.iter().zip(second.iter()) {
            assert!((b - a - 0.3).abs() < 1e-5, "volley must rotate with base angle");
        }
    }

    #[test]
    fn test_homing_fan_centered_for_odd_count() {
        let offsets = homing_fan_offsets(3);
        assert_eq!(offsets.len(), 3);
        assert!((offsets[0].to_degrees() + 15.0).abs() < 1e-4);
        assert!(offsets[1].abs() < 1e-6, "middle shot must aim dead-on");
        assert!((offsets[2].to_degrees() - 15.0).abs() < 1e-4);
    }

    /// Run the actual re-aim loop against a stationary target and verify the
    /// heading error shrinks monotonically to near zero. This exercises the
    /// same code path the bullet flight system uses every tick.
    #[test]
    fn test_steer_toward_converges_on_target() {
        let target = Vec2::new(400.0, 500.0);
        let mut pos = Vec2::new(400.0, 100.0);
        // Start heading 90 degrees off the target bearing.
        let mut vel = Vec2::new(210.0, 0.0);

        let mut last_error = f32::MAX;
        let mut min_error = f32::MAX;
        for tick in 0..90 {
            let want = bearing(pos, target);
            let heading = vel.y.atan2(vel.x);
            let error = wrap_angle(want - heading).abs();
            assert!(
                error <= last_error + 1e-4,
                "heading error grew at tick {tick}: {last_error} -> {error}"
            );
            last_error = error;
            min_error = min_error.min(error);

            vel = steer_toward(vel, want, 0.5, DT);
            pos += vel * DT;
        }
        assert!(
            min_error < 0.05,
            "homing should converge to <0.05 rad of error, best was {min_error}"
        );
    }

    #[test]
    fn test_steer_toward_preserves_speed() {
        let mut vel = Vec2::new(150.0, -80.0);
        let speed = vel.length();
        for _ in 0..60 {
            vel = steer_toward(vel, 2.0, 0.5, DT);
            assert!(
                (vel.length() - speed).abs() < 0.01,
                "speed must be preserved by the re-aim, got {}",
                vel.length()
            );
        }
    }

    #[test]
    fn test_steer_toward_zero_velocity_unchanged() {
        let vel = steer_toward(Vec2::ZERO, 1.0, 0.5, DT);
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        use std::f32::consts::FRAC_PI_2;
        let origin = Vec2::new(100.0, 100.0);
        assert!((bearing(origin, Vec2::new(200.0, 100.0))).abs() < 1e-6);
        // +y is down-screen.
        assert!((bearing(origin, Vec2::new(100.0, 200.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((bearing(origin, Vec2::new(100.0, 0.0)) + FRAC_PI_2).abs() < 1e-6);
    }
}
