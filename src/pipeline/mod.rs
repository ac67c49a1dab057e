//! End-to-end detection post-processing.
//!
//! `DetectionPipeline` validates raw detector output, then runs decode,
//! threshold/top-K, greedy NMS, and remapping in that fixed order. Each stage
//! produces a fresh vector; nothing is cached between calls, so one pipeline
//! can be shared across threads.

mod config;

pub use config::PipelineConfig;

use crate::candidate::nms::nms_greedy;
#[cfg(feature = "rayon")]
use crate::candidate::nms::nms_greedy_par;
use crate::candidate::topk::filter_top_k;
use crate::decode::decode_boxes;
#[cfg(feature = "rayon")]
use crate::decode::rayon::decode_boxes_par;
use crate::geometry::{Anchor, BBox, ImageSize, Offset, ScoredBox};
use crate::remap::{remap_detections, validate_scale, Detection};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::math::first_non_finite;
use crate::util::{FaceBoxesError, FaceBoxesResult};

/// Pipeline output: detections plus the scale they were remapped with.
#[derive(Clone, Debug, PartialEq)]
pub struct Detections {
    /// Detections in original-image pixels, best first.
    pub detections: Vec<Detection>,
    /// Resize factor that was applied before inference.
    pub scale: f64,
}

impl Detections {
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Stateless detection post-processor.
#[derive(Clone, Debug, Default)]
pub struct DetectionPipeline {
    cfg: PipelineConfig,
}

impl DetectionPipeline {
    /// Creates a pipeline with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: PipelineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Runs the full pipeline on per-anchor detector output.
    ///
    /// `size` is the resized image the network saw; `scale` is the factor that
    /// produced it from the original image.
    pub fn detect(
        &self,
        anchors: &[Anchor],
        offsets: &[Offset],
        scores: &[f32],
        size: ImageSize,
        scale: f64,
    ) -> FaceBoxesResult<Detections> {
        let _span = trace_span!("detect", anchors = anchors.len()).entered();

        self.cfg.validate()?;
        validate_inputs(anchors, offsets, scores, size, scale)?;

        let boxes = self.decode(anchors, offsets, size)?;
        trace_event!("decoded", count = boxes.len());

        let candidates = filter_top_k(
            &boxes,
            scores,
            self.cfg.confidence_threshold,
            self.cfg.top_k,
        )?;
        trace_event!("filtered", count = candidates.len());

        let kept = self.suppress(&candidates);
        trace_event!("suppressed", count = kept.len());

        let detections = remap_detections(&kept, scale, self.cfg.keep_top_k)?;
        trace_event!("remapped", count = detections.len());

        Ok(Detections { detections, scale })
    }

    /// Runs the pipeline on flat row-major buffers.
    ///
    /// `anchors` and `offsets` hold four values per slot, `scores` one.
    pub fn detect_flat(
        &self,
        anchors: &[f32],
        offsets: &[f32],
        scores: &[f32],
        size: ImageSize,
        scale: f64,
    ) -> FaceBoxesResult<Detections> {
        let anchors = rows4(anchors, "anchors")?
            .map(Anchor::from)
            .collect::<Vec<_>>();
        let offsets = rows4(offsets, "offsets")?
            .map(Offset::from)
            .collect::<Vec<_>>();
        self.detect(&anchors, &offsets, scores, size, scale)
    }

    #[cfg(feature = "rayon")]
    fn decode(
        &self,
        anchors: &[Anchor],
        offsets: &[Offset],
        size: ImageSize,
    ) -> FaceBoxesResult<Vec<BBox>> {
        if self.cfg.parallel {
            decode_boxes_par(anchors, offsets, self.cfg.variance, size)
        } else {
            decode_boxes(anchors, offsets, self.cfg.variance, size)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn decode(
        &self,
        anchors: &[Anchor],
        offsets: &[Offset],
        size: ImageSize,
    ) -> FaceBoxesResult<Vec<BBox>> {
        decode_boxes(anchors, offsets, self.cfg.variance, size)
    }

    #[cfg(feature = "rayon")]
    fn suppress(&self, candidates: &[ScoredBox]) -> Vec<ScoredBox> {
        if self.cfg.parallel {
            nms_greedy_par(candidates, self.cfg.iou_threshold)
        } else {
            nms_greedy(candidates, self.cfg.iou_threshold)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn suppress(&self, candidates: &[ScoredBox]) -> Vec<ScoredBox> {
        nms_greedy(candidates, self.cfg.iou_threshold)
    }
}

/// Selects the foreground column from `N x 2` softmax rows.
pub fn scores_from_two_class(conf: &[f32]) -> FaceBoxesResult<Vec<f32>> {
    if conf.len() % 2 != 0 {
        return Err(FaceBoxesError::RaggedBuffer {
            field: "conf",
            len: conf.len(),
            stride: 2,
        });
    }
    Ok(conf.chunks_exact(2).map(|row| row[1]).collect())
}

fn rows4<'a>(
    data: &'a [f32],
    field: &'static str,
) -> FaceBoxesResult<impl Iterator<Item = [f32; 4]> + 'a> {
    if data.len() % 4 != 0 {
        return Err(FaceBoxesError::RaggedBuffer {
            field,
            len: data.len(),
            stride: 4,
        });
    }
    Ok(data
        .chunks_exact(4)
        .map(|row| [row[0], row[1], row[2], row[3]]))
}

fn validate_inputs(
    anchors: &[Anchor],
    offsets: &[Offset],
    scores: &[f32],
    size: ImageSize,
    scale: f64,
) -> FaceBoxesResult<()> {
    if anchors.len() != offsets.len() || anchors.len() != scores.len() {
        return Err(FaceBoxesError::LengthMismatch {
            anchors: anchors.len(),
            offsets: offsets.len(),
            scores: scores.len(),
        });
    }
    if size.width == 0 || size.height == 0 {
        return Err(FaceBoxesError::InvalidImageSize {
            width: size.width,
            height: size.height,
        });
    }
    validate_scale(scale)?;

    // Sorting NaN scores has no defined order, so reject before any stage runs.
    if let Some(index) = anchors.iter().position(|a| !a.is_finite()) {
        trace_warn!(index, "non-finite anchor");
        return Err(FaceBoxesError::NonFiniteInput {
            field: "anchors",
            index,
        });
    }
    if let Some(index) = offsets.iter().position(|o| !o.is_finite()) {
        trace_warn!(index, "non-finite offset");
        return Err(FaceBoxesError::NonFiniteInput {
            field: "offsets",
            index,
        });
    }
    if let Some(index) = first_non_finite(scores) {
        trace_warn!(index, "non-finite score");
        return Err(FaceBoxesError::NonFiniteInput {
            field: "scores",
            index,
        });
    }
    Ok(())
}
