//! Deterministic particle simulation
//!
//! All field physics lives here. This module must stay pure:
//! - Injected RNG only (seeded Pcg32 in production, fixed seeds in tests)
//! - Explicit time and cursor inputs, no globals
//! - No rendering or platform dependencies

pub mod links;
pub mod particle;
pub mod step;

pub use links::{Link, collect_links};
pub use particle::Particle;
pub use step::step;
