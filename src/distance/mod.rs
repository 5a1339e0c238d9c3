//! Perceptual distance between image pixels and a key color in HSV space.
//!
//! The metric combines a wrap-aware hue distance and a plain saturation
//! distance:
//!
//! ```text
//! d_hue    = min(|h - h_key|, 1 - |h - h_key|)
//! d_sat    = |s - s_key|
//! distance = (d_hue^2 + d_sat^2) / 0.5^2 + 1
//! ```
//!
//! The value channel does not take part. The smallest possible distance is
//! therefore exactly `1.0`, reached by any pixel with the key's hue and
//! saturation.

use crate::color::{Hsv, HsvPlanes};
use crate::matrix::Matrix;
use crate::util::math::circular_distance;
use crate::util::{ChromaKeyError, ChromaKeyResult};

/// Spread of the key color; squared distances are divided by its square.
pub const KEY_SPREAD: f64 = 0.5;

/// Constant added to every distance.
pub const DISTANCE_OFFSET: f64 = 1.0;

/// Computes the per-pixel distance between HSV planes and a key color.
///
/// `value` and `val_key` are accepted for symmetry with the HSV triple but do
/// not contribute to the result; `value` is only shape checked.
pub fn hsv_distance(
    hue: &Matrix<f64>,
    saturation: &Matrix<f64>,
    value: &Matrix<f64>,
    hue_key: f64,
    sat_key: f64,
    val_key: f64,
) -> ChromaKeyResult<Matrix<f64>> {
    let _ = val_key;
    for other in [saturation, value] {
        if hue.shape() != other.shape() {
            return Err(ChromaKeyError::shape_mismatch(
                "hsv_distance",
                hue.shape(),
                other.shape(),
            ));
        }
    }

    let diff_hue = (hue - hue_key).abs();
    let dist_hue = diff_hue.min(&(&diff_hue * -1.0 + 1.0))?;
    let dist_sat = (saturation - sat_key).abs();

    let sum = dist_hue.powf(2.0).try_add(&dist_sat.powf(2.0))?;
    Ok(sum / KEY_SPREAD.powi(2) + DISTANCE_OFFSET)
}

/// Convenience wrapper over [`hsv_distance`] for a set of planes.
pub fn planes_distance(planes: &HsvPlanes, key: Hsv) -> ChromaKeyResult<Matrix<f64>> {
    hsv_distance(
        &planes.hue,
        &planes.saturation,
        &planes.value,
        key.hue,
        key.saturation,
        key.value,
    )
}

/// Distance of a single pixel to the key, bit-identical to [`hsv_distance`].
#[inline]
pub fn pixel_distance(px: Hsv, key: Hsv) -> f64 {
    let dist_hue = circular_distance(px.hue, key.hue);
    let dist_sat = (px.saturation - key.saturation).abs();
    (dist_hue.powf(2.0) + dist_sat.powf(2.0)) / KEY_SPREAD.powi(2) + DISTANCE_OFFSET
}

#[cfg(test)]
mod tests {
    use super::{hsv_distance, pixel_distance};
    use crate::color::Hsv;
    use crate::util::ChromaKeyError;
    use crate::Matrix;

    fn row(values: &[f64]) -> Matrix<f64> {
        Matrix::from_vec(1, values.len(), values.to_vec()).unwrap()
    }

    #[test]
    fn exact_key_has_baseline_distance() {
        let hue = row(&[1.0 / 3.0]);
        let sat = row(&[1.0]);
        let val = row(&[0.2]);
        let d = hsv_distance(&hue, &sat, &val, 1.0 / 3.0, 1.0, 1.0).unwrap();
        assert_eq!(d.as_slice(), &[1.0]);
    }

    #[test]
    fn hue_distance_wraps_around() {
        let hue = row(&[0.95, 0.05]);
        let sat = row(&[0.5, 0.5]);
        let val = row(&[1.0, 1.0]);
        let d = hsv_distance(&hue, &sat, &val, 0.05, 0.5, 1.0).unwrap();
        // d_hue = 0.1 for the first pixel, not 0.9.
        assert!((d[(0, 0)] - (0.01 / 0.25 + 1.0)).abs() < 1e-12);
        assert_eq!(d[(0, 1)], 1.0);
    }

    #[test]
    fn saturation_contributes_quadratically() {
        let hue = row(&[0.0]);
        let sat = row(&[0.0]);
        let val = row(&[0.0]);
        let d = hsv_distance(&hue, &sat, &val, 0.5, 1.0, 0.0).unwrap();
        assert!((d[(0, 0)] - ((0.25 + 1.0) / 0.25 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn value_channel_is_ignored() {
        let hue = row(&[0.3, 0.3]);
        let sat = row(&[0.4, 0.4]);
        let val = row(&[0.0, 1.0]);
        let a = hsv_distance(&hue, &sat, &val, 0.1, 0.9, 0.0).unwrap();
        let b = hsv_distance(&hue, &sat, &val, 0.1, 0.9, 1.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[(0, 0)], a[(0, 1)]);
    }

    #[test]
    fn mismatched_planes_are_rejected() {
        let hue = row(&[0.0, 0.0]);
        let sat = row(&[0.0]);
        let err = hsv_distance(&hue, &sat, &hue, 0.0, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            ChromaKeyError::ShapeMismatch {
                op: "hsv_distance",
                left: (1, 2),
                right: (1, 1),
            }
        );
    }

    #[test]
    fn pixel_distance_matches_matrix_form() {
        let key = Hsv::new(0.37, 0.81, 0.5);
        let samples = [0.0, 0.13, 0.37, 0.5, 0.71, 0.99];
        let hue = row(&samples);
        let sat = row(&[0.2, 0.9, 0.81, 0.0, 1.0, 0.33]);
        let val = row(&[0.0; 6]);
        let d = hsv_distance(&hue, &sat, &val, key.hue, key.saturation, key.value).unwrap();
        for j in 0..samples.len() {
            let px = Hsv::new(hue[(0, j)], sat[(0, j)], 0.0);
            assert_eq!(pixel_distance(px, key), d[(0, j)]);
        }
    }
}
