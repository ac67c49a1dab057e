//! Anchor-relative box decoding.
//!
//! Each anchor is decoded independently: the offset shifts the anchor center
//! by a fraction of its size and rescales the size exponentially. The variance
//! pair undoes the normalization applied to regression targets at training
//! time. Decoded boxes are then stretched to resized-image pixels.

use crate::geometry::{Anchor, BBox, ImageSize, Offset};
use crate::util::{FaceBoxesError, FaceBoxesResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Offset de-normalization constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variance {
    /// Multiplier for center offsets (`dx`, `dy`).
    pub center: f32,
    /// Multiplier for log-size offsets (`dw`, `dh`).
    pub size: f32,
}

impl Default for Variance {
    fn default() -> Self {
        Self {
            center: 0.1,
            size: 0.2,
        }
    }
}

/// Decodes one anchor/offset pair into a normalized corner-form box.
#[inline]
pub fn decode_box(anchor: &Anchor, offset: &Offset, variance: Variance) -> BBox {
    let cx = anchor.cx + offset.dx * variance.center * anchor.w;
    let cy = anchor.cy + offset.dy * variance.center * anchor.h;
    let w = anchor.w * (offset.dw * variance.size).exp();
    let h = anchor.h * (offset.dh * variance.size).exp();
    BBox::from_center(cx, cy, w, h)
}

/// Decodes every anchor and scales the result to `size` pixels.
///
/// Anchors and offsets are paired by index and must have the same length.
pub fn decode_boxes(
    anchors: &[Anchor],
    offsets: &[Offset],
    variance: Variance,
    size: ImageSize,
) -> FaceBoxesResult<Vec<BBox>> {
    check_paired(anchors, offsets)?;
    let sx = size.width as f32;
    let sy = size.height as f32;
    Ok(anchors
        .iter()
        .zip(offsets)
        .map(|(anchor, offset)| decode_box(anchor, offset, variance).scaled(sx, sy))
        .collect())
}

pub(crate) fn check_paired(anchors: &[Anchor], offsets: &[Offset]) -> FaceBoxesResult<()> {
    if anchors.len() != offsets.len() {
        return Err(FaceBoxesError::PairMismatch {
            left: "anchors",
            left_len: anchors.len(),
            right: "offsets",
            right_len: offsets.len(),
        });
    }
    Ok(())
}
