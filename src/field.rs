//! Field runtime: owns the particle set, cursor, and clock for one mounted
//! session, and drives one frame at a time against a [`Surface`].
//!
//! The cursor and global time are fields here, written by the platform layer
//! and passed by reference into the pure step functions; nothing in the
//! simulation reaches for shared state.

use glam::Vec2;
use rand::Rng;

use crate::consts::{PARTICLE_FILL_ALPHA, TIME_STEP};
use crate::policy::{FieldPolicy, OFFSCREEN_CURSOR};
use crate::render::Surface;
use crate::sim::{Link, Particle, collect_links, step};

/// Logical viewport size plus display scale factor.
///
/// The backing resolution is `logical * scale`; all simulation math stays in
/// logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

/// Lifecycle state. `Idle` is permanent for a reduced-motion mount;
/// `Disposed` is terminal and makes every entry point inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Disposed,
}

/// One mounted particle field.
pub struct Field {
    phase: Phase,
    policy: FieldPolicy,
    config: SurfaceConfig,
    particles: Vec<Particle>,
    cursor: Vec2,
    time: f32,
    /// Link buffer, reused across frames
    links: Vec<Link>,
}

impl Field {
    /// Seed a field for one mounted session. A zero-count policy (reduced
    /// motion) yields a field that stays [`Phase::Idle`] and never draws.
    pub fn new(policy: FieldPolicy, config: SurfaceConfig, rng: &mut impl Rng) -> Self {
        let particles: Vec<Particle> = (0..policy.particle_count)
            .map(|_| Particle::spawn(config.width, config.height, rng))
            .collect();
        Self {
            phase: if particles.is_empty() {
                Phase::Idle
            } else {
                Phase::Running
            },
            policy,
            config,
            cursor: OFFSCREEN_CURSOR,
            time: 0.0,
            links: Vec::new(),
            particles,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Last-write-wins cursor update from the pointer listener. Ignored
    /// unless interaction is enabled, so a stray event can never un-park the
    /// cursor on touch-only devices.
    pub fn set_cursor(&mut self, pos: Vec2) {
        if self.policy.cursor_interactive && self.phase == Phase::Running {
            self.cursor = pos;
        }
    }

    /// Adopt a new viewport size. Particle positions are kept; anything left
    /// out of bounds wraps back in on its next step.
    pub fn resize(&mut self, config: SurfaceConfig) {
        self.config = config;
    }

    /// Run one animation tick: clear, advance the clock, step and draw every
    /// particle, then draw the proximity links. Inert unless running.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        if self.phase != Phase::Running {
            return;
        }
        let SurfaceConfig { width, height, .. } = self.config;
        surface.clear(width, height);
        self.time += TIME_STEP;
        for p in &mut self.particles {
            step(p, self.time, self.cursor, width, height);
            surface.fill_circle(p.pos, p.size, p.alpha * PARTICLE_FILL_ALPHA);
        }
        collect_links(
            &self.particles,
            self.cursor,
            self.policy.cursor_interactive,
            &mut self.links,
        );
        for link in &self.links {
            surface.stroke_line(link.from, link.to, link.width, link.alpha);
        }
    }

    /// Tear down the session. Idempotent; the particle set is discarded and
    /// `frame` draws nothing afterwards, even if one more tick was already
    /// scheduled when disposal happened.
    pub fn dispose(&mut self) {
        self.phase = Phase::Disposed;
        self.particles.clear();
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CONFIG: SurfaceConfig = SurfaceConfig {
        width: 800.0,
        height: 600.0,
        scale: 1.0,
    };

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(Vec2, f32, f32)>,
        lines: Vec<(Vec2, Vec2, f32, f32)>,
    }

    impl RecordingSurface {
        fn op_count(&self) -> usize {
            self.clears + self.circles.len() + self.lines.len()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.clears += 1;
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32) {
            self.circles.push((center, radius, alpha));
        }
        fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32) {
            self.lines.push((from, to, width, alpha));
        }
    }

    fn desktop_field(seed: u64) -> Field {
        let mut rng = Pcg32::seed_from_u64(seed);
        Field::new(FieldPolicy::for_device(true, false), CONFIG, &mut rng)
    }

    #[test]
    fn test_mount_seeds_exact_particle_count() {
        assert_eq!(desktop_field(1).particles().len(), 140);

        let mut rng = Pcg32::seed_from_u64(1);
        let mobile = Field::new(FieldPolicy::for_device(false, false), CONFIG, &mut rng);
        assert_eq!(mobile.particles().len(), 50);
    }

    #[test]
    fn test_frame_clears_once_and_draws_every_particle() {
        let mut field = desktop_field(2);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 140);
    }

    #[test]
    fn test_reduced_motion_mount_stays_idle_and_never_draws() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = Field::new(FieldPolicy::for_device(true, true), CONFIG, &mut rng);
        assert_eq!(field.phase(), Phase::Idle);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        field.frame(&mut surface);
        assert_eq!(surface.op_count(), 0);
    }

    #[test]
    fn test_dispose_is_idempotent_and_silences_late_frames() {
        let mut field = desktop_field(4);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        assert!(surface.op_count() > 0);

        field.dispose();
        field.dispose();
        assert_eq!(field.phase(), Phase::Disposed);

        // A frame that was already queued at disposal time fires into a
        // disposed field and must draw nothing
        let mut late = RecordingSurface::default();
        field.frame(&mut late);
        assert_eq!(late.op_count(), 0);
    }

    #[test]
    fn test_resize_never_resets_particles() {
        let mut field = desktop_field(5);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();

        field.resize(SurfaceConfig {
            width: 1920.0,
            height: 1080.0,
            scale: 2.0,
        });
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_desktop_cursor_connects_and_repels() {
        let mut field = desktop_field(6);
        let center = Vec2::new(400.0, 300.0);
        field.set_cursor(center);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        // 140 particles over 800x600: some are within cursor range
        assert!(surface.lines.iter().any(|(_, to, ..)| *to == center));
    }

    #[test]
    fn test_mobile_cursor_writes_are_ignored() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = Field::new(FieldPolicy::for_device(false, false), CONFIG, &mut rng);
        let center = Vec2::new(400.0, 300.0);
        field.set_cursor(center);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        assert!(surface.lines.iter().all(|(_, to, ..)| *to != center));
        // Parked cursor leaves repulsion velocity untouched
        assert!(field.particles().iter().all(|p| p.vel == Vec2::ZERO));
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = desktop_field(8);
        let mut b = desktop_field(8);
        let mut sa = RecordingSurface::default();
        let mut sb = RecordingSurface::default();
        for _ in 0..10 {
            a.frame(&mut sa);
            b.frame(&mut sb);
        }
        assert_eq!(a.particles(), b.particles());
        assert_eq!(sa.circles, sb.circles);
    }
}
