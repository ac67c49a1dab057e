//! FaceBoxes is a CPU post-processor for prior-box face detectors.
//!
//! It turns raw per-anchor regression offsets and confidences into final face
//! boxes: anchor decoding, confidence thresholding with a top-K cap, greedy IoU
//! non-maximum suppression, and remapping to original-image pixels. Decoding
//! and suppression can run on rayon with the `rayon` feature.

mod candidate;
pub mod decode;
pub mod geometry;
#[cfg(feature = "image-io")]
pub mod io;
pub mod lowlevel;
pub mod pipeline;
pub mod remap;
mod trace;
pub mod util;

pub use decode::Variance;
pub use geometry::{Anchor, BBox, ImageSize, Offset, ScoredBox};
pub use pipeline::{scores_from_two_class, DetectionPipeline, Detections, PipelineConfig};
pub use remap::{Detection, ResizePolicy, FACE_LABEL};
pub use util::{FaceBoxesError, FaceBoxesResult};

pub use candidate::nms::{nms_greedy, nms_indices};
pub use candidate::topk::filter_top_k;
