//! Intersection-over-union under the inclusive-pixel convention.

use crate::geometry::BBox;

/// Added to every side length before computing an area.
///
/// Corners are treated as pixel indices, so a box spanning `x_min..=x_max`
/// covers `x_max - x_min + 1` columns. Dropping this term changes which boxes
/// get suppressed near the threshold.
pub const PIXEL_INCLUSIVE: f32 = 1.0;

/// Computes IoU between two corner-form boxes.
///
/// The overlap rectangle is clamped at zero per axis. The result is NaN when
/// both boxes have zero inclusive area (possible for inverted degenerate
/// boxes); callers treat NaN as "not within threshold".
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let xx1 = a.x_min.max(b.x_min);
    let yy1 = a.y_min.max(b.y_min);
    let xx2 = a.x_max.min(b.x_max);
    let yy2 = a.y_max.min(b.y_max);

    let w = (xx2 - xx1 + PIXEL_INCLUSIVE).max(0.0);
    let h = (yy2 - yy1 + PIXEL_INCLUSIVE).max(0.0);
    let inter = w * h;
    inter / (a.area() + b.area() - inter)
}
