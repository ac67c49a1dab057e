//! Numeric helpers shared by the decoding and remapping stages.

/// Truncates toward zero and converts to `i32`.
///
/// Values outside the `i32` range saturate; callers reject non-finite input
/// before reaching this point.
#[inline]
pub(crate) fn trunc_to_i32(value: f32) -> i32 {
    value.trunc() as i32
}

/// Double-precision counterpart of [`trunc_to_i32`], used when undoing the
/// resize scale.
#[inline]
pub(crate) fn trunc_f64_to_i32(value: f64) -> i32 {
    value.trunc() as i32
}

/// Returns the index of the first NaN or infinite value, if any.
pub(crate) fn first_non_finite(values: &[f32]) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}
