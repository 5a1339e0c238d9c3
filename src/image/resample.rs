//! Bilinear resampling of RGB images.
//!
//! Destination pixel `(x, y)` samples the source at
//! `(x * src_w / dst_w, y * src_h / dst_h)`. The four neighbours are clamped
//! to the last row and column, so the bottom/right edge replicates the border
//! instead of blending with black. Each channel is rounded to the nearest
//! integer before clamping to `[0, 255]`.

use crate::image::{Rgb, RgbImage};
use crate::trace::trace_span;
use crate::util::math::round_to_u8;
use crate::util::ChromaKeyResult;

/// Resizes `src` to `width x height` with bilinear interpolation.
pub fn resize_bilinear(src: &RgbImage, width: usize, height: usize) -> ChromaKeyResult<RgbImage> {
    let _span = trace_span!(
        "resize_bilinear",
        src_width = src.width(),
        src_height = src.height(),
        width = width,
        height = height
    )
    .entered();

    let mut out = RgbImage::new(width, height)?;
    if src.shape() == out.shape() {
        return Ok(src.clone());
    }

    let src_w = src.width();
    let src_h = src.height();
    let scale_x = src_w as f64 / width as f64;
    let scale_y = src_h as f64 / height as f64;
    let pixels = src.pixels();

    for (y, dst_row) in out.pixels_mut().chunks_exact_mut(width).enumerate() {
        let src_y = y as f64 * scale_y;
        let y0 = (src_y.floor() as usize).min(src_h - 1);
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = src_y - y0 as f64;

        for (x, dst) in dst_row.iter_mut().enumerate() {
            let src_x = x as f64 * scale_x;
            let x0 = (src_x.floor() as usize).min(src_w - 1);
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = src_x - x0 as f64;

            let a = pixels[y0 * src_w + x0].channels();
            let b = pixels[y0 * src_w + x1].channels();
            let c = pixels[y1 * src_w + x0].channels();
            let d = pixels[y1 * src_w + x1].channels();

            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;

            let mut channels = [0u8; 3];
            for (k, channel) in channels.iter_mut().enumerate() {
                let value = f64::from(a[k]) * w00
                    + f64::from(b[k]) * w10
                    + f64::from(c[k]) * w01
                    + f64::from(d[k]) * w11;
                *channel = round_to_u8(value);
            }
            *dst = Rgb::from(channels);
        }
    }

    Ok(out)
}
