//! Greedy IoU non-maximum suppression.

use crate::candidate::topk::is_sorted_desc;
use crate::geometry::{iou, ScoredBox};

/// Returns positions of the boxes kept by greedy NMS.
///
/// `boxes` must be sorted by descending score. Walking in that order, a box is
/// kept only if its IoU with every previously kept box is `<= iou_threshold`.
/// This is the same outcome as repeatedly popping the best candidate and
/// discarding everything overlapping it by more than the threshold, without
/// rebuilding the candidate list each round. A NaN IoU counts as overlapping.
pub fn nms_indices(boxes: &[ScoredBox], iou_threshold: f32) -> Vec<usize> {
    debug_assert!(is_sorted_desc(boxes), "nms input must be sorted by score");
    let mut kept: Vec<usize> = Vec::new();

    'outer: for (idx, candidate) in boxes.iter().enumerate() {
        for &kept_idx in kept.iter() {
            let within = iou(&boxes[kept_idx].bbox, &candidate.bbox) <= iou_threshold;
            if !within {
                continue 'outer;
            }
        }
        kept.push(idx);
    }

    kept
}

/// Applies greedy NMS and returns the surviving boxes in score order.
pub fn nms_greedy(boxes: &[ScoredBox], iou_threshold: f32) -> Vec<ScoredBox> {
    nms_indices(boxes, iou_threshold)
        .into_iter()
        .map(|idx| boxes[idx])
        .collect()
}

/// Greedy NMS with the per-round IoU filter spread across threads.
///
/// Keep decisions stay sequential; each round filters the remaining candidates
/// against the newly kept box in parallel. Output matches [`nms_greedy`].
#[cfg(feature = "rayon")]
pub fn nms_greedy_par(boxes: &[ScoredBox], iou_threshold: f32) -> Vec<ScoredBox> {
    use rayon::prelude::*;

    debug_assert!(is_sorted_desc(boxes), "nms input must be sorted by score");
    let mut kept = Vec::new();
    let mut remaining: Vec<ScoredBox> = boxes.to_vec();

    while !remaining.is_empty() {
        let head = remaining[0];
        kept.push(head);
        remaining = remaining[1..]
            .par_iter()
            .filter(|candidate| iou(&head.bbox, &candidate.bbox) <= iou_threshold)
            .copied()
            .collect();
    }

    kept
}
