//! Blade collision and knockback math
//!
//! The blade is a line segment from the player to the tip; an enemy is a
//! circle. Hits use the standard clamped-projection closest point, and the
//! knockback impulse pushes the enemy away from that point, scaled inversely
//! by its radius so small enemies are flung harder.

use glam::Vec2;

use crate::consts::{KNOCKBACK_MASS_REF, KNOCKBACK_SLASH, KNOCKBACK_STAB};
use crate::normalize_or_x;

/// Result of a blade-vs-circle check
#[derive(Debug, Clone, Copy)]
pub struct SegmentHit {
    /// Whether the circle overlaps the padded segment
    pub hit: bool,
    /// Closest point on the segment to the circle center
    pub closest: Vec2,
    /// Distance from the circle center to that point
    pub distance: f32,
}

/// Closest point on segment [a, b] to point p (clamped projection)
///
/// A degenerate segment (a == b) clamps to a.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Check a circle of `radius` at `center` against segment [a, b] padded by
/// `pad` (the blade width)
pub fn segment_circle_hit(a: Vec2, b: Vec2, center: Vec2, radius: f32, pad: f32) -> SegmentHit {
    let closest = closest_point_on_segment(a, b, center);
    let distance = (center - closest).length();
    SegmentHit {
        hit: distance < radius + pad,
        closest,
        distance,
    }
}

/// Knockback impulse for a blade hit
///
/// Direction is center minus closest point (+X fallback when the center sits
/// exactly on the blade); magnitude is the base power times 20/radius.
pub fn knockback_impulse(center: Vec2, closest: Vec2, enemy_radius: f32, stabbing: bool) -> Vec2 {
    let dir = normalize_or_x(center - closest);
    let base = if stabbing { KNOCKBACK_STAB } else { KNOCKBACK_SLASH };
    dir * (base * (KNOCKBACK_MASS_REF / enemy_radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_interior() {
        let a = Vec2::ZERO;
        let b = Vec2::new(100.0, 0.0);
        let p = Vec2::new(40.0, 30.0);

        let c = closest_point_on_segment(a, b, p);
        assert!((c.x - 40.0).abs() < 1e-5);
        assert!(c.y.abs() < 1e-5);
    }

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(100.0, 0.0);

        let c = closest_point_on_segment(a, b, Vec2::new(-50.0, 10.0));
        assert_eq!(c, a);

        let c = closest_point_on_segment(a, b, Vec2::new(150.0, 10.0));
        assert_eq!(c, b);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Vec2::new(5.0, 5.0);
        let c = closest_point_on_segment(a, a, Vec2::new(9.0, 9.0));
        assert_eq!(c, a);
    }

    #[test]
    fn test_segment_circle_hit_and_miss() {
        let a = Vec2::ZERO;
        let b = Vec2::new(60.0, 0.0);

        // Enemy radius 12 + blade width 4 = 16 reach off the segment
        let hit = segment_circle_hit(a, b, Vec2::new(30.0, 15.0), 12.0, 4.0);
        assert!(hit.hit);
        assert!((hit.distance - 15.0).abs() < 1e-4);

        let miss = segment_circle_hit(a, b, Vec2::new(30.0, 17.0), 12.0, 4.0);
        assert!(!miss.hit);
    }

    #[test]
    fn test_knockback_inverse_radius() {
        let center = Vec2::new(10.0, 10.0);
        let closest = Vec2::new(10.0, 0.0);

        // Smaller radius => strictly larger impulse, identical hit otherwise
        let small = knockback_impulse(center, closest, 12.0, false);
        let large = knockback_impulse(center, closest, 20.0, false);
        assert!(small.length() > large.length());

        // radius 20 hits the reference mass exactly: |impulse| == base power
        assert!((large.length() - KNOCKBACK_SLASH).abs() < 1e-4);
    }

    #[test]
    fn test_knockback_stab_is_stronger() {
        let center = Vec2::new(10.0, 10.0);
        let closest = Vec2::new(10.0, 0.0);

        let slash = knockback_impulse(center, closest, 15.0, false);
        let stab = knockback_impulse(center, closest, 15.0, true);
        assert!((stab.length() / slash.length() - KNOCKBACK_STAB / KNOCKBACK_SLASH).abs() < 1e-4);
    }

    #[test]
    fn test_knockback_degenerate_direction_fallback() {
        // Enemy center exactly on the blade: impulse falls back to +X
        let p = Vec2::new(30.0, 0.0);
        let impulse = knockback_impulse(p, p, 10.0, false);
        assert!(impulse.x > 0.0);
        assert!(impulse.y.abs() < 1e-6);
    }
}
