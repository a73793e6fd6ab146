//! Device adaptation policy
//!
//! Decided once per mount and again on a viewport-class change, never per
//! frame. Reduced motion is an accessibility bypass, not a degraded mode:
//! the field stays idle and nothing is drawn or subscribed.

use glam::Vec2;

use crate::consts::{DESKTOP_PARTICLE_COUNT, MOBILE_PARTICLE_COUNT};

/// Cursor parking spot when interaction is disabled: far enough off-surface
/// that no particle can ever fall within repulsion or connection range.
pub const OFFSCREEN_CURSOR: Vec2 = Vec2::new(-9999.0, -9999.0);

/// Mount-time decision: how many particles to seed and whether the cursor
/// participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub particle_count: usize,
    pub cursor_interactive: bool,
}

impl FieldPolicy {
    /// Decision table. Reduced motion wins over everything; desktop gets the
    /// full field with cursor interaction; small viewports get a lighter,
    /// drift-only field.
    pub fn for_device(desktop: bool, reduced_motion: bool) -> Self {
        if reduced_motion {
            Self {
                particle_count: 0,
                cursor_interactive: false,
            }
        } else if desktop {
            Self {
                particle_count: DESKTOP_PARTICLE_COUNT,
                cursor_interactive: true,
            }
        } else {
            Self {
                particle_count: MOBILE_PARTICLE_COUNT,
                cursor_interactive: false,
            }
        }
    }

    /// True when this policy renders anything at all.
    pub fn renders(&self) -> bool {
        self.particle_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CURSOR_DIST, REPULSION_RADIUS};

    #[test]
    fn test_reduced_motion_disables_everything() {
        for desktop in [true, false] {
            let policy = FieldPolicy::for_device(desktop, true);
            assert_eq!(policy.particle_count, 0);
            assert!(!policy.cursor_interactive);
            assert!(!policy.renders());
        }
    }

    #[test]
    fn test_desktop_gets_full_field_with_interaction() {
        let policy = FieldPolicy::for_device(true, false);
        assert_eq!(policy.particle_count, 140);
        assert!(policy.cursor_interactive);
    }

    #[test]
    fn test_small_viewport_gets_light_drift_only_field() {
        let policy = FieldPolicy::for_device(false, false);
        assert_eq!(policy.particle_count, 50);
        assert!(!policy.cursor_interactive);
    }

    #[test]
    fn test_parked_cursor_is_beyond_every_interaction_range() {
        // Positions are wrapped into [-20, w+20] x [-20, h+20]; even the
        // origin corner is far outside both thresholds
        let nearest = OFFSCREEN_CURSOR.distance(Vec2::new(-20.0, -20.0));
        assert!(nearest > REPULSION_RADIUS);
        assert!(nearest > CURSOR_DIST);
    }
}
