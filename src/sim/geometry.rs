//! Axis-aligned box geometry
//!
//! Every entity in the court is a box described by its center and its
//! half-extent ("radius" on each axis).

use glam::Vec2;

use super::state::Side;
use crate::consts::*;

/// Returns true if the two boxes intersect on both axes.
///
/// Touching edges count as overlapping.
#[inline]
pub fn overlaps(center_a: Vec2, radius_a: Vec2, center_b: Vec2, radius_b: Vec2) -> bool {
    let gap = (center_a - center_b).abs();
    let reach = radius_a + radius_b;
    gap.x <= reach.x && gap.y <= reach.y
}

/// Intersection rectangle of two boxes as `(min, max)`, or None when disjoint
pub fn overlap_rect(center_a: Vec2, radius_a: Vec2, center_b: Vec2, radius_b: Vec2) -> Option<(Vec2, Vec2)> {
    let min = (center_a - radius_a).max(center_b - radius_b);
    let max = (center_a + radius_a).min(center_b + radius_b);
    if min.x > max.x || min.y > max.y {
        return None;
    }
    Some((min, max))
}

/// Horizontal extent `(min_x, max_x)` of a side's building strip
pub fn base_strip(side: Side) -> (f32, f32) {
    match side {
        Side::Left => (-COURT_RADIUS.x, -COURT_RADIUS.x + BASE_LENGTH),
        Side::Right => (COURT_RADIUS.x - BASE_LENGTH, COURT_RADIUS.x),
    }
}

/// Returns true if a box at `point`, grown by the placement buffer, lies
/// entirely inside `side`'s building strip.
pub fn in_base_zone(side: Side, point: Vec2, radius: Vec2) -> bool {
    let (min_x, max_x) = base_strip(side);
    let reach = radius + Vec2::splat(BUFFER_RADIUS);
    point.x - reach.x >= min_x
        && point.x + reach.x <= max_x
        && point.y - reach.y >= -COURT_RADIUS.y
        && point.y + reach.y <= COURT_RADIUS.y
}

/// Map a pair of unit samples in `[0, 1)` to a building center inside `side`'s
/// strip. Used by the AI placement search.
pub fn base_zone_point(side: Side, u: f32, v: f32) -> Vec2 {
    let (min_x, max_x) = base_strip(side);
    let reach = BUILDING_RADIUS + Vec2::splat(BUFFER_RADIUS);
    let span_x = (max_x - min_x) - 2.0 * reach.x;
    let span_y = 2.0 * (COURT_RADIUS.y - reach.y);
    Vec2::new(
        min_x + reach.x + u * span_x,
        -COURT_RADIUS.y + reach.y + v * span_y,
    )
}
