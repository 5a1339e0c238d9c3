//! Scalar helpers shared by the color and distance code.

/// Tolerance used for the HSV branch selection.
pub(crate) const EPS: f64 = 1e-16;

/// Returns true when `a` and `b` differ by less than [`EPS`].
#[inline]
pub(crate) fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Circular distance between two values on the unit circle `[0, 1)`.
///
/// Evaluated as `min(d, 1 - d)` with `d = |a - b|`, in the same operation
/// order as the matrix formulation so both produce identical bits.
#[inline]
pub(crate) fn circular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(diff * -1.0 + 1.0)
}

/// Rounds and clamps a channel value into `u8`.
#[inline]
pub(crate) fn round_to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
