//! Individual pipeline stages for custom post-processing.
//!
//! Use these when a detector needs a different stage order or extra filtering
//! between stages. Most users should call [`DetectionPipeline`](crate::DetectionPipeline).

pub use crate::candidate::nms::{nms_greedy, nms_indices};
#[cfg(feature = "rayon")]
pub use crate::candidate::nms::nms_greedy_par;
pub use crate::candidate::topk::filter_top_k;
pub use crate::decode::{decode_box, decode_boxes};
#[cfg(feature = "rayon")]
pub use crate::decode::rayon::decode_boxes_par;
pub use crate::geometry::{iou, PIXEL_INCLUSIVE};
pub use crate::remap::{remap_box, remap_detections, validate_scale};
