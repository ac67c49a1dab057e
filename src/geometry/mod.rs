//! Box geometry shared by every pipeline stage.
//!
//! Anchors and offsets are center-size tuples as emitted by a prior-box
//! detector head. Decoded boxes use corner form so overlap tests stay cheap.

mod iou;

pub use iou::{iou, PIXEL_INCLUSIVE};

/// Reference prior box `(center_x, center_y, width, height)`, normalized to the
/// network input size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Anchor {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
}

impl Anchor {
    pub const fn new(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self { cx, cy, w, h }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

impl From<[f32; 4]> for Anchor {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Regression output `(dx, dy, dw, dh)` predicted for one anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
    pub dw: f32,
    pub dh: f32,
}

impl Offset {
    pub const fn new(dx: f32, dy: f32, dw: f32, dh: f32) -> Self {
        Self { dx, dy, dw, dh }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.dw.is_finite() && self.dh.is_finite()
    }
}

impl From<[f32; 4]> for Offset {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Axis-aligned box in corner form.
///
/// The coordinate space (normalized, resized-image pixels) is implied by the
/// stage that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Builds a box from its center and size.
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        let half_w = w / 2.0;
        let half_h = h / 2.0;
        Self::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Scales x coordinates by `sx` and y coordinates by `sy`.
    pub fn scaled(self, sx: f32, sy: f32) -> Self {
        Self::new(
            self.x_min * sx,
            self.y_min * sy,
            self.x_max * sx,
            self.y_max * sy,
        )
    }

    /// Inclusive-pixel area, see [`PIXEL_INCLUSIVE`].
    pub fn area(&self) -> f32 {
        (self.x_max - self.x_min + PIXEL_INCLUSIVE) * (self.y_max - self.y_min + PIXEL_INCLUSIVE)
    }
}

/// A box paired with its confidence score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredBox {
    pub bbox: BBox,
    pub score: f32,
}

impl ScoredBox {
    pub const fn new(bbox: BBox, score: f32) -> Self {
        Self { bbox, score }
    }
}

/// Pixel size of the image the network actually saw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: usize,
    pub height: usize,
}

impl ImageSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}
