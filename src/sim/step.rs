//! Physics integrator: one particle, one time step

use glam::Vec2;

use super::Particle;
use crate::consts::{
    ALPHA_MAX, ALPHA_MIN, FRICTION, REPULSION_RADIUS, REPULSION_STRENGTH, WRAP_MARGIN,
};

/// Advance one particle by one frame: organic drift, cursor repulsion,
/// damping, position integration, toroidal wrap, blink. Never fails; the
/// only side effect is mutating `p`.
pub fn step(p: &mut Particle, time: f32, cursor: Vec2, width: f32, height: f32) {
    // Organic drift: heading random-walk driven by position and global time
    p.angle += (p.pos.x * 0.005 + time).sin() * 0.002;
    p.angle += (p.pos.y * 0.005 + time).cos() * 0.002;
    let drift = Vec2::new(p.angle.cos(), p.angle.sin()) * p.speed;

    // Cursor repulsion: linear falloff, full strength at distance zero, none
    // at the reach. The exactly-coincident case is left untouched.
    let to_cursor = cursor - p.pos;
    let dist = to_cursor.length();
    if dist > 0.0 && dist < REPULSION_RADIUS {
        let force = (REPULSION_RADIUS - dist) / REPULSION_RADIUS;
        p.vel -= to_cursor / dist * force * REPULSION_STRENGTH;
    }

    // Damping hits the repulsion velocity only; drift stays undamped so the
    // ambient wander never decays
    p.vel *= FRICTION;
    p.pos += drift + p.vel;

    // Toroidal wrap: exit one edge, re-enter the opposite one off-screen
    if p.pos.x < -WRAP_MARGIN {
        p.pos.x = width + WRAP_MARGIN;
    } else if p.pos.x > width + WRAP_MARGIN {
        p.pos.x = -WRAP_MARGIN;
    }
    if p.pos.y < -WRAP_MARGIN {
        p.pos.y = height + WRAP_MARGIN;
    } else if p.pos.y > height + WRAP_MARGIN {
        p.pos.y = -WRAP_MARGIN;
    }

    // Blink: bounce alpha between the bounds, direction persists between
    // frames and the value lands exactly on a bound when it flips
    if p.increasing {
        p.alpha += p.blink_speed;
        if p.alpha >= ALPHA_MAX {
            p.alpha = ALPHA_MAX;
            p.increasing = false;
        }
    } else {
        p.alpha -= p.blink_speed;
        if p.alpha <= ALPHA_MIN {
            p.alpha = ALPHA_MIN;
            p.increasing = true;
        }
    }
}
