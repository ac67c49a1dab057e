//! Candidate selection and pruning.
//!
//! Includes confidence thresholding with a top-K cap and greedy IoU
//! non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod topk;
