//! Rayon-parallel decoding (feature-gated).
//!
//! Anchors are independent, so the parallel path produces exactly the same
//! boxes in the same order as [`decode_boxes`](super::decode_boxes).

use crate::decode::{check_paired, decode_box, Variance};
use crate::geometry::{Anchor, BBox, ImageSize, Offset};
use crate::util::FaceBoxesResult;
use rayon::prelude::*;

/// Parallel counterpart of [`decode_boxes`](super::decode_boxes).
pub fn decode_boxes_par(
    anchors: &[Anchor],
    offsets: &[Offset],
    variance: Variance,
    size: ImageSize,
) -> FaceBoxesResult<Vec<BBox>> {
    check_paired(anchors, offsets)?;
    let sx = size.width as f32;
    let sy = size.height as f32;
    Ok(anchors
        .par_iter()
        .zip(offsets.par_iter())
        .map(|(anchor, offset)| decode_box(anchor, offset, variance).scaled(sx, sy))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::decode_boxes_par;
    use crate::decode::Variance;
    use crate::geometry::{Anchor, ImageSize, Offset};
    use crate::util::FaceBoxesError;

    #[test]
    fn mismatched_lengths_are_rejected() {
        let anchors = [Anchor::new(0.5, 0.5, 0.2, 0.2)];
        let offsets = [Offset::default(); 2];
        let err = decode_boxes_par(
            &anchors,
            &offsets,
            Variance::default(),
            ImageSize::new(100, 100),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FaceBoxesError::PairMismatch {
                left_len: 1,
                right_len: 2,
                ..
            }
        ));
    }
}
