//! SIMD-accelerated distance kernel using the `wide` crate.
//!
//! Four pixels are processed at a time with `f64x4`; the tail falls back to
//! the scalar formula. Squares are computed by multiplication, so results may
//! differ from the scalar kernel in the last bit.

use crate::color::Hsv;
use crate::distance::{pixel_distance, DISTANCE_OFFSET, KEY_SPREAD};
use crate::kernel::{check_lengths, DistanceKernel};
use crate::util::ChromaKeyResult;
use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

/// SIMD distance kernel.
pub struct DistanceSimd;

impl DistanceKernel for DistanceSimd {
    fn distance_into(
        hue: &[f64],
        saturation: &[f64],
        key: Hsv,
        out: &mut [f64],
    ) -> ChromaKeyResult<()> {
        check_lengths(hue, saturation, out)?;

        let hue_key = f64x4::splat(key.hue);
        let sat_key = f64x4::splat(key.saturation);
        let one = f64x4::splat(1.0);
        let scale = f64x4::splat(KEY_SPREAD * KEY_SPREAD);
        let offset = f64x4::splat(DISTANCE_OFFSET);

        let simd_end = hue.len() / LANES * LANES;
        let mut i = 0;
        while i < simd_end {
            let diff_hue = (load_f64x4(&hue[i..]) - hue_key).abs();
            let dist_hue = diff_hue.min(one - diff_hue);
            let dist_sat = (load_f64x4(&saturation[i..]) - sat_key).abs();
            let dist = (dist_hue * dist_hue + dist_sat * dist_sat) / scale + offset;
            out[i..i + LANES].copy_from_slice(&dist.to_array());
            i += LANES;
        }

        // Scalar remainder
        while i < hue.len() {
            out[i] = pixel_distance(Hsv::new(hue[i], saturation[i], 0.0), key);
            i += 1;
        }
        Ok(())
    }
}
