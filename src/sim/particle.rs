//! Per-particle state and its initial-condition sampler

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::{ALPHA_RANGE, BLINK_RANGE, SIZE_RANGE, SPEED_RANGE};

/// One simulated particle. Size, drift speed, and blink rate are fixed at
/// spawn; everything else evolves frame to frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in surface-local logical coordinates
    pub pos: Vec2,
    /// Dot radius
    pub size: f32,
    /// Scalar drift magnitude
    pub speed: f32,
    /// Current drift heading (radians), random-walked every frame
    pub angle: f32,
    /// Alpha oscillation rate
    pub blink_speed: f32,
    /// Current opacity
    pub alpha: f32,
    /// Blink direction flag, flips at the alpha bounds
    pub increasing: bool,
    /// Accumulated repulsion impulse, decays by `FRICTION` every frame
    pub vel: Vec2,
}

impl Particle {
    /// Sample a fresh particle uniformly over the given bounds. Pure aside
    /// from the injected RNG; called exactly once per slot at mount.
    pub fn spawn(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        // A zero-sized viewport still spawns inside a unit box
        let width = width.max(1.0);
        let height = height.max(1.0);
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..width),
                rng.random_range(0.0..height),
            ),
            size: rng.random_range(SIZE_RANGE),
            speed: rng.random_range(SPEED_RANGE),
            angle: rng.random_range(0.0..TAU),
            blink_speed: rng.random_range(BLINK_RANGE),
            alpha: rng.random_range(ALPHA_RANGE),
            increasing: rng.random_bool(0.5),
            vel: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_fields_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(800.0, 600.0, &mut rng);
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(SIZE_RANGE.contains(&p.size));
            assert!(SPEED_RANGE.contains(&p.speed));
            assert!(p.angle >= 0.0 && p.angle < TAU);
            assert!(BLINK_RANGE.contains(&p.blink_speed));
            assert!(ALPHA_RANGE.contains(&p.alpha));
            assert_eq!(p.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_for_a_seed() {
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        for _ in 0..50 {
            assert_eq!(
                Particle::spawn(1024.0, 768.0, &mut a),
                Particle::spawn(1024.0, 768.0, &mut b),
            );
        }
    }

    #[test]
    fn test_spawn_tolerates_degenerate_bounds() {
        let mut rng = Pcg32::seed_from_u64(0);
        let p = Particle::spawn(0.0, 0.0, &mut rng);
        assert!(p.pos.x >= 0.0 && p.pos.x < 1.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 1.0);
    }
}
