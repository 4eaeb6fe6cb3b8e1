//! Particle effect factories and motion.
//!
//! Purely decorative: collision never reads particles. The global pool is
//! capped at `MAX_PARTICLES`; creation is never rejected — when the pool is
//! full the oldest particle (lowest spawn sequence) is evicted to make room.
//! Every factory randomizes within its documented ranges through the engine
//! RNG so effects stay deterministic per seed.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::{Body, Particle};
use starfall_core::constants::MAX_PARTICLES;

/// Shared burst color for kill and death explosions.
pub const EXPLOSION_COLOR: [u8; 3] = [255, 165, 0];

/// Spark palette for impact effects.
const SPARK_COLORS: [[u8; 3]; 3] = [[255, 255, 255], [255, 255, 80], [255, 165, 0]];

/// Radial explosion burst. Count is clamped to a quarter of the pool so a
/// single blast can never flush everything else out.
pub fn explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    pos: Vec2,
    count: u32,
    color: [u8; 3],
) {
    let count = count.min(MAX_PARTICLES as u32 / 4);
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(50.0..200.0);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let color = jitter_color(rng, color, 30);
        let size = rng.gen_range(2.0..6.0);
        let lifetime = rng.gen_range(0.5..1.0);
        push(world, seq, pos, vel, color, size, lifetime, 0.0, 1.0);
    }
}

/// Small impact sparks, at most ten per hit.
pub fn hit_sparks(world: &mut World, rng: &mut ChaCha8Rng, seq: &mut u64, pos: Vec2, count: u32) {
    for _ in 0..count.min(10) {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(50.0..150.0);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let color = SPARK_COLORS[rng.gen_range(0..SPARK_COLORS.len())];
        let size = rng.gen_range(1.0..3.0);
        let lifetime = rng.gen_range(0.2..0.5);
        push(world, seq, pos, vel, color, size, lifetime, 0.0, 1.0);
    }
}

/// Pickup celebration: a bright upward-drifting puff.
pub fn collect_effect(world: &mut World, rng: &mut ChaCha8Rng, seq: &mut u64, pos: Vec2) {
    for _ in 0..15 {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(50.0..200.0);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let color = [
            rng.gen_range(128..=255),
            rng.gen_range(128..=255),
            rng.gen_range(128..=255),
        ];
        let size = rng.gen_range(2.0..5.0);
        let lifetime = rng.gen_range(0.5..1.0);
        push(world, seq, pos, vel, color, size, lifetime, -50.0, 1.0);
    }
}

/// Engine-trail puffs scattered around a moving point.
pub fn trail(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    pos: Vec2,
    color: [u8; 3],
    count: u32,
) {
    for _ in 0..count {
        let scatter = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        let vel = Vec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
        let size = rng.gen_range(1.0..3.0);
        let lifetime = rng.gen_range(0.3..0.6);
        push(world, seq, pos + scatter, vel, color, size, lifetime, 0.0, 1.0);
    }
}

/// Slow gray smoke that rises and disperses.
pub fn smoke(world: &mut World, rng: &mut ChaCha8Rng, seq: &mut u64, pos: Vec2, count: u32) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(20.0..80.0);
        let mut vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        vel.y -= 50.0;
        let gray = rng.gen_range(100..=200);
        let size = rng.gen_range(5.0..15.0);
        let lifetime = rng.gen_range(1.0..2.0);
        push(
            world,
            seq,
            pos,
            vel,
            [gray, gray, gray],
            size,
            lifetime,
            -30.0,
            0.95,
        );
    }
}

/// A disc of particles expanding radially outward.
pub fn energy_ball(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    pos: Vec2,
    color: [u8; 3],
    radius: f32,
) {
    for _ in 0..20 {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let dir = Vec2::new(angle.cos(), angle.sin());
        let offset = dir * rng.gen_range(0.0..radius);
        let vel = dir * rng.gen_range(50.0..150.0);
        let size = rng.gen_range(2.0..4.0);
        let lifetime = rng.gen_range(0.5..1.0);
        push(world, seq, pos + offset, vel, color, size, lifetime, 0.0, 1.0);
    }
}

/// Particles laid along a segment, `width` per 10 px step, scattered a few
/// pixels along the perpendicular. A zero-length beam is a no-op.
pub fn beam(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut u64,
    from: Vec2,
    to: Vec2,
    color: [u8; 3],
    width: u32,
) {
    let delta = to - from;
    let len = delta.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = delta / len;
    let perpendicular = Vec2::new(-dir.y, dir.x);

    let steps = (len / 10.0) as u32 + 1;
    for step in 0..steps {
        let base = from + dir * (step as f32 * 10.0);
        for _ in 0..width {
            let pos = base + perpendicular * rng.gen_range(-3.0..3.0);
            let vel = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let size = rng.gen_range(1.0..3.0);
            let lifetime = rng.gen_range(0.2..0.4);
            push(world, seq, pos, vel, color, size, lifetime, 0.0, 1.0);
        }
    }
}

/// Advance particle motion for one tick. Expiry and field culling are
/// handled by the cleanup sweep.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (particle, body)) in world.query_mut::<(&mut Particle, &mut Body)>() {
        particle.age += dt;
        body.vel.y += particle.gravity * dt;
        body.vel *= particle.friction;
        body.pos += body.vel * dt;
    }
}

/// Append one particle, evicting the oldest when the pool is at capacity.
#[allow(clippy::too_many_arguments)]
fn push(
    world: &mut World,
    seq: &mut u64,
    pos: Vec2,
    vel: Vec2,
    color: [u8; 3],
    size: f32,
    lifetime: f32,
    gravity: f32,
    friction: f32,
) {
    let mut count = 0;
    let mut oldest: Option<(hecs::Entity, u64)> = None;
    for (entity, particle) in world.query_mut::<&Particle>() {
        count += 1;
        if oldest.map_or(true, |(_, s)| particle.seq < s) {
            oldest = Some((entity, particle.seq));
        }
    }
    if count >= MAX_PARTICLES {
        if let Some((entity, _)) = oldest {
            let _ = world.despawn(entity);
        }
    }

    world.spawn((
        Particle {
            color,
            size,
            lifetime,
            age: 0.0,
            gravity,
            friction,
            fade_out: true,
            seq: *seq,
        },
        Body {
            pos,
            vel,
            size: Vec2::splat(size),
        },
    ));
    *seq += 1;
}

fn jitter_color(rng: &mut ChaCha8Rng, color: [u8; 3], amount: i32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for (i, channel) in color.iter().enumerate() {
        let jittered = *channel as i32 + rng.gen_range(-amount..=amount);
        out[i] = jittered.clamp(0, 255) as u8;
    }
    out
}
