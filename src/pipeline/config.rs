//! Pipeline configuration.

use crate::decode::Variance;
use crate::util::{FaceBoxesError, FaceBoxesResult};

/// Thresholds, caps, and decoding constants for one pipeline.
///
/// Every knob lives here rather than in module constants, so pipelines with
/// different settings can run side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Boxes must score strictly above this to be considered.
    pub confidence_threshold: f32,
    /// Candidates overlapping a kept box by more than this IoU are dropped.
    pub iou_threshold: f32,
    /// Maximum candidates carried into suppression.
    pub top_k: usize,
    /// Maximum detections returned.
    pub keep_top_k: usize,
    /// Offset de-normalization constants of the detector head.
    pub variance: Variance,
    /// Decode and suppress with rayon when the `rayon` feature is enabled.
    /// Ignored otherwise.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            iou_threshold: 0.3,
            top_k: 5000,
            keep_top_k: 750,
            variance: Variance::default(),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Checks that thresholds and variances are usable.
    pub fn validate(&self) -> FaceBoxesResult<()> {
        if !self.confidence_threshold.is_finite() {
            return Err(FaceBoxesError::InvalidConfig {
                reason: "confidence_threshold must be finite",
            });
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(FaceBoxesError::InvalidConfig {
                reason: "iou_threshold must be in [0, 1]",
            });
        }
        if !self.variance.center.is_finite() || self.variance.center <= 0.0 {
            return Err(FaceBoxesError::InvalidConfig {
                reason: "variance.center must be positive",
            });
        }
        if !self.variance.size.is_finite() || self.variance.size <= 0.0 {
            return Err(FaceBoxesError::InvalidConfig {
                reason: "variance.size must be positive",
            });
        }
        Ok(())
    }
}
