//! Scalar distance kernel, used by the compositor when `simd` is disabled.

use crate::color::Hsv;
use crate::distance::pixel_distance;
use crate::kernel::{check_lengths, DistanceKernel};
use crate::util::ChromaKeyResult;

/// Scalar distance kernel, one pixel at a time.
pub struct DistanceScalar;

impl DistanceKernel for DistanceScalar {
    fn distance_into(
        hue: &[f64],
        saturation: &[f64],
        key: Hsv,
        out: &mut [f64],
    ) -> ChromaKeyResult<()> {
        check_lengths(hue, saturation, out)?;
        for ((dst, &h), &s) in out.iter_mut().zip(hue).zip(saturation) {
            *dst = pixel_distance(Hsv::new(h, s, 0.0), key);
        }
        Ok(())
    }
}
