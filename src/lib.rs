//! Neural Flow - an ambient particle field for a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (drift, repulsion, blink, proximity links)
//! - `policy`: Device adaptation (particle count, cursor interaction)
//! - `field`: Per-mount runtime and lifecycle state machine
//! - `render`: Drawing-surface seam
//! - `platform`: Browser glue (canvas, listeners, frame scheduling), wasm only

pub mod field;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod policy;
pub mod render;
pub mod sim;

pub use field::{Field, Phase, SurfaceConfig};
pub use policy::FieldPolicy;
pub use sim::{Link, Particle};

/// Field tuning constants
///
/// Fixed policy values, tuned visually; not configurable at run time.
pub mod consts {
    use core::ops::Range;

    /// Global-clock increment per animation frame
    pub const TIME_STEP: f32 = 0.0005;

    /// Particles on a desktop-class viewport
    pub const DESKTOP_PARTICLE_COUNT: usize = 140;
    /// Particles on a small viewport
    pub const MOBILE_PARTICLE_COUNT: usize = 50;

    /// Spawn sampling ranges
    pub const SIZE_RANGE: Range<f32> = 0.3..1.9;
    pub const SPEED_RANGE: Range<f32> = 0.02..0.07;
    pub const BLINK_RANGE: Range<f32> = 0.001..0.004;
    pub const ALPHA_RANGE: Range<f32> = ALPHA_MIN..ALPHA_MAX;

    /// Blink bounds; alpha stays inside them after the first update
    pub const ALPHA_MIN: f32 = 0.1;
    pub const ALPHA_MAX: f32 = 0.8;

    /// Exponential decay applied to the repulsion velocity every frame
    pub const FRICTION: f32 = 0.96;
    /// Cursor repulsion reach (logical units)
    pub const REPULSION_RADIUS: f32 = 150.0;
    /// Impulse scale at zero distance; falloff to the reach is linear
    pub const REPULSION_STRENGTH: f32 = 0.5;
    /// Wrap margin beyond each edge, hides the re-entry pop
    pub const WRAP_MARGIN: f32 = 20.0;

    /// Particle-to-particle connection threshold
    pub const CONNECTION_DIST: f32 = 80.0;
    /// Particle-to-cursor connection threshold
    pub const CURSOR_DIST: f32 = 180.0;
    /// Base opacity of pair links
    pub const PARTICLE_LINK_ALPHA: f32 = 0.2;
    /// Base opacity of cursor links
    pub const CURSOR_LINK_ALPHA: f32 = 0.45;
    /// Stroke width of pair links
    pub const PARTICLE_LINK_WIDTH: f32 = 0.5;
    /// Stroke width of cursor links
    pub const CURSOR_LINK_WIDTH: f32 = 0.8;

    /// Particle dots render at `alpha * this`
    pub const PARTICLE_FILL_ALPHA: f32 = 0.6;
}
