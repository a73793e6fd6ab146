//! Proximity connector: pair and particle-to-cursor link search

use glam::Vec2;

use super::Particle;
use crate::consts::{
    CONNECTION_DIST, CURSOR_DIST, CURSOR_LINK_ALPHA, CURSOR_LINK_WIDTH, PARTICLE_LINK_ALPHA,
    PARTICLE_LINK_WIDTH,
};

/// One faded connecting stroke, ready for the render layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub alpha: f32,
}

/// Collect every connecting stroke for the current particle set into `out`,
/// clearing it first so the buffer can be reused across frames.
///
/// Each unordered pair within `CONNECTION_DIST` yields exactly one link,
/// faded by distance and by the first particle's blink phase. When
/// `cursor_links` is set, each particle within `CURSOR_DIST` of the cursor
/// gets a brighter link to it. Output order follows particle array order:
/// particle `i`'s pair links, then its cursor link. O(N^2) over the fixed
/// particle counts; an accepted cost, not an optimization target.
pub fn collect_links(particles: &[Particle], cursor: Vec2, cursor_links: bool, out: &mut Vec<Link>) {
    out.clear();
    for (i, pi) in particles.iter().enumerate() {
        for pj in &particles[i + 1..] {
            let dist = pi.pos.distance(pj.pos);
            if dist < CONNECTION_DIST {
                out.push(Link {
                    from: pi.pos,
                    to: pj.pos,
                    width: PARTICLE_LINK_WIDTH,
                    alpha: PARTICLE_LINK_ALPHA * (1.0 - dist / CONNECTION_DIST) * pi.alpha,
                });
            }
        }
        if cursor_links {
            let dist = pi.pos.distance(cursor);
            if dist < CURSOR_DIST {
                out.push(Link {
                    from: pi.pos,
                    to: cursor,
                    width: CURSOR_LINK_WIDTH,
                    alpha: CURSOR_LINK_ALPHA * (1.0 - dist / CURSOR_DIST) * pi.alpha,
                });
            }
        }
    }
}
