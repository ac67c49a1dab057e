//! Mapping kept boxes back to original-image pixels.
//!
//! Corners are truncated to integer pixels in resized space first, so width and
//! height are integer differences. Every component is then divided by the
//! resize scale and truncated toward zero again.

mod policy;

pub use policy::ResizePolicy;

use crate::geometry::ScoredBox;
use crate::util::math::{trunc_f64_to_i32, trunc_to_i32};
use crate::util::{FaceBoxesError, FaceBoxesResult};

/// Class tag carried by every detection.
pub const FACE_LABEL: &str = "face";

/// Final detection in original-image integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Confidence of the kept box.
    pub score: f32,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Detection {
    /// Returns the class label, always [`FACE_LABEL`].
    pub fn label(&self) -> &'static str {
        FACE_LABEL
    }
}

/// Checks that `scale` is a usable resize factor.
pub fn validate_scale(scale: f64) -> FaceBoxesResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FaceBoxesError::InvalidScale { scale });
    }
    Ok(())
}

/// Converts one resized-space box to an original-space detection.
///
/// The division runs in `f64`. `scale` is not checked here: a zero or negative
/// factor saturates the outputs, so pass it through [`validate_scale`] first
/// (as [`remap_detections`] does).
pub fn remap_box(kept: &ScoredBox, scale: f64) -> Detection {
    let x_min = trunc_to_i32(kept.bbox.x_min);
    let y_min = trunc_to_i32(kept.bbox.y_min);
    let x_max = trunc_to_i32(kept.bbox.x_max);
    let y_max = trunc_to_i32(kept.bbox.y_max);
    let width = x_max.saturating_sub(x_min);
    let height = y_max.saturating_sub(y_min);

    let unscale = |v: i32| trunc_f64_to_i32(f64::from(v) / scale);
    Detection {
        score: kept.score,
        x: unscale(x_min),
        y: unscale(y_min),
        width: unscale(width),
        height: unscale(height),
    }
}

/// Remaps the first `keep_top_k` boxes into original-image coordinates.
///
/// Order is preserved, so a score-sorted input yields the best detections.
pub fn remap_detections(
    kept: &[ScoredBox],
    scale: f64,
    keep_top_k: usize,
) -> FaceBoxesResult<Vec<Detection>> {
    validate_scale(scale)?;
    Ok(kept
        .iter()
        .take(keep_top_k)
        .map(|b| remap_box(b, scale))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{remap_box, remap_detections, FACE_LABEL};
    use crate::geometry::{BBox, ScoredBox};
    use crate::util::FaceBoxesError;

    #[test]
    fn half_scale_doubles_coordinates() {
        let kept = ScoredBox::new(BBox::new(100.0, 100.0, 200.0, 200.0), 0.9);
        let det = remap_box(&kept, 0.5);
        assert_eq!((det.x, det.y, det.width, det.height), (200, 200, 200, 200));
        assert_eq!(det.score, 0.9);
        assert_eq!(det.label(), FACE_LABEL);
    }

    #[test]
    fn corners_truncate_before_width() {
        // 10.9 -> 10, 20.2 -> 20, width 10 rather than 9.3.
        let kept = ScoredBox::new(BBox::new(10.9, 5.5, 20.2, 9.9), 0.7);
        let det = remap_box(&kept, 1.0);
        assert_eq!((det.x, det.y, det.width, det.height), (10, 5, 10, 4));
    }

    #[test]
    fn division_truncates_toward_zero() {
        let kept = ScoredBox::new(BBox::new(-3.5, 7.0, 8.0, 12.0), 0.7);
        let det = remap_box(&kept, 0.75);
        // x: -3 / 0.75 = -4; y: 7 / 0.75 = 9.33; w: 11 / 0.75 = 14.67; h: 5 / 0.75 = 6.67
        assert_eq!((det.x, det.y, det.width, det.height), (-4, 9, 14, 6));
    }

    #[test]
    fn fractional_scale_divides_in_double_precision() {
        // 1920x1080 shrunk to 600 on the short side.
        let scale = 600.0 / 1080.0;
        let kept = ScoredBox::new(BBox::new(15.0, 30.0, 33.0, 60.0), 0.8);
        let det = remap_box(&kept, scale);
        // 15 * 1.8 = 27, 30 * 1.8 = 54, 18 * 1.8 = 32.4, 30 * 1.8 = 54
        assert_eq!((det.x, det.y, det.width, det.height), (27, 54, 32, 54));
    }

    #[test]
    fn sweep_matches_double_precision_reference() {
        for min_side in 601..=3000usize {
            let scale = 600.0 / min_side as f64;
            for x in 0..600i32 {
                let kept = ScoredBox::new(BBox::new(x as f32, 0.0, x as f32 + 1.0, 1.0), 0.9);
                let det = remap_box(&kept, scale);
                assert_eq!(det.x, (f64::from(x) / scale) as i32, "min_side {min_side}, x {x}");
            }
        }
    }

    #[test]
    fn output_is_capped_in_order() {
        let kept: Vec<ScoredBox> = (0..10)
            .map(|i| ScoredBox::new(BBox::new(0.0, 0.0, 1.0, 1.0), 1.0 - i as f32 * 0.01))
            .collect();
        let dets = remap_detections(&kept, 1.0, 4).unwrap();
        assert_eq!(dets.len(), 4);
        assert_eq!(dets[0].score, kept[0].score);
        assert_eq!(dets[3].score, kept[3].score);
    }

    #[test]
    fn rejects_bad_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = remap_detections(&[], scale, 10).unwrap_err();
            assert!(matches!(err, FaceBoxesError::InvalidScale { .. }));
        }
    }
}
