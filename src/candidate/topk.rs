//! Confidence thresholding and top-K selection.

use std::cmp::Ordering;

use crate::geometry::{BBox, ScoredBox};
use crate::util::{FaceBoxesError, FaceBoxesResult};

fn score_cmp_desc(a: &ScoredBox, b: &ScoredBox) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Sorts boxes by descending score.
///
/// The sort is stable: among equal scores the box that came first stays first.
pub(crate) fn sort_scored_desc(boxes: &mut [ScoredBox]) {
    boxes.sort_by(score_cmp_desc);
}

/// Returns `true` when `boxes` is ordered by non-increasing score.
pub(crate) fn is_sorted_desc(boxes: &[ScoredBox]) -> bool {
    boxes.windows(2).all(|w| w[0].score >= w[1].score)
}

/// Keeps boxes scoring strictly above `threshold`, best first, at most `top_k`.
///
/// `boxes` and `scores` are paired by index and must have the same length. An
/// empty result is a normal outcome when nothing clears the threshold.
pub fn filter_top_k(
    boxes: &[BBox],
    scores: &[f32],
    threshold: f32,
    top_k: usize,
) -> FaceBoxesResult<Vec<ScoredBox>> {
    if boxes.len() != scores.len() {
        return Err(FaceBoxesError::PairMismatch {
            left: "boxes",
            left_len: boxes.len(),
            right: "scores",
            right_len: scores.len(),
        });
    }
    if top_k == 0 {
        return Ok(Vec::new());
    }

    let mut kept: Vec<ScoredBox> = boxes
        .iter()
        .zip(scores)
        .filter(|(_, score)| **score > threshold)
        .map(|(&bbox, &score)| ScoredBox::new(bbox, score))
        .collect();

    sort_scored_desc(&mut kept);
    kept.truncate(top_k);
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::{filter_top_k, is_sorted_desc};
    use crate::geometry::BBox;
    use crate::util::FaceBoxesError;

    fn boxes(n: usize) -> Vec<BBox> {
        (0..n)
            .map(|i| {
                let x = i as f32 * 10.0;
                BBox::new(x, 0.0, x + 5.0, 5.0)
            })
            .collect()
    }

    #[test]
    fn threshold_is_strict() {
        let b = boxes(3);
        let kept = filter_top_k(&b, &[0.6, 0.61, 0.59], 0.6, 10).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.61);
        assert_eq!(kept[0].bbox, b[1]);
    }

    #[test]
    fn sorted_descending_and_capped() {
        let b = boxes(5);
        let kept = filter_top_k(&b, &[0.7, 0.9, 0.8, 0.95, 0.65], 0.6, 3).unwrap();
        let scores: Vec<f32> = kept.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![0.95, 0.9, 0.8]);
        assert!(is_sorted_desc(&kept));
    }

    #[test]
    fn ties_keep_input_order() {
        let b = boxes(4);
        let kept = filter_top_k(&b, &[0.8, 0.9, 0.8, 0.8], 0.5, 10).unwrap();
        assert_eq!(kept[0].bbox, b[1]);
        assert_eq!(kept[1].bbox, b[0]);
        assert_eq!(kept[2].bbox, b[2]);
        assert_eq!(kept[3].bbox, b[3]);
    }

    #[test]
    fn nothing_above_threshold_is_empty() {
        let b = boxes(3);
        assert!(filter_top_k(&b, &[0.1, 0.2, 0.3], 0.6, 10).unwrap().is_empty());
        assert!(filter_top_k(&[], &[], 0.6, 10).unwrap().is_empty());
    }

    #[test]
    fn zero_top_k_is_empty() {
        let b = boxes(2);
        assert!(filter_top_k(&b, &[0.9, 0.9], 0.6, 0).unwrap().is_empty());
    }

    #[test]
    fn nan_scores_never_pass() {
        let b = boxes(2);
        let kept = filter_top_k(&b, &[f32::NAN, 0.9], 0.6, 10).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.9);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let b = boxes(3);
        let err = filter_top_k(&b, &[0.9, 0.8], 0.6, 10).unwrap_err();
        assert_eq!(
            err,
            FaceBoxesError::PairMismatch {
                left: "boxes",
                left_len: 3,
                right: "scores",
                right_len: 2,
            }
        );
    }
}
