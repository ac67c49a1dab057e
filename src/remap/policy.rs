//! Resize-factor policy for large inputs.

use crate::geometry::ImageSize;
use crate::util::{FaceBoxesError, FaceBoxesResult};

/// Downscales images whose shorter side exceeds `target_min_side`.
///
/// Smaller images run at scale 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePolicy {
    /// Shorter-side length above which images are shrunk.
    pub target_min_side: f64,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            target_min_side: 600.0,
        }
    }
}

impl ResizePolicy {
    /// Validates the policy.
    pub fn validate(&self) -> FaceBoxesResult<()> {
        if !self.target_min_side.is_finite() || self.target_min_side <= 0.0 {
            return Err(FaceBoxesError::InvalidConfig {
                reason: "target_min_side must be positive",
            });
        }
        Ok(())
    }

    /// Scale factor for an image of `height x width` pixels.
    pub fn scale_for(&self, height: usize, width: usize) -> f64 {
        let min_side = height.min(width) as f64;
        if min_side > self.target_min_side {
            self.target_min_side / min_side
        } else {
            1.0
        }
    }

    /// Size of the image after resizing by [`scale_for`](Self::scale_for).
    ///
    /// Dimensions round to nearest, matching what interpolating resizers do for
    /// a fractional factor.
    pub fn resized_size(&self, height: usize, width: usize) -> ImageSize {
        let scale = self.scale_for(height, width);
        let w = (width as f64 * scale).round() as usize;
        let h = (height as f64 * scale).round() as usize;
        ImageSize::new(w, h)
    }
}
