//! RGB ↔ HSV conversion for single pixels and whole images.
//!
//! All three HSV components are normalised to the unit interval. Hue is
//! circular and lies in `[0, 1)`.

use crate::image::{Rgb, RgbImage};
use crate::matrix::Matrix;
use crate::util::math::{near, round_to_u8, EPS};

/// A color in hue/saturation/value form.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    pub const fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Hue, saturation and value planes of an image, each shaped `(height, width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HsvPlanes {
    pub hue: Matrix<f64>,
    pub saturation: Matrix<f64>,
    pub value: Matrix<f64>,
}

impl HsvPlanes {
    pub fn shape(&self) -> (usize, usize) {
        self.hue.shape()
    }

    /// Returns the HSV triple at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Hsv> {
        Some(Hsv {
            hue: *self.hue.get(row, col)?,
            saturation: *self.saturation.get(row, col)?,
            value: *self.value.get(row, col)?,
        })
    }
}

/// Converts one pixel to HSV.
///
/// Black and gray pixels (no chroma) map to hue 0 and saturation 0. Otherwise
/// the sector is chosen by testing, in order, whether red, green or blue
/// equals the maximum channel; a later match overrides an earlier one.
pub fn pixel_to_hsv(px: Rgb) -> Hsv {
    let red = f64::from(px.r) / 255.0;
    let green = f64::from(px.g) / 255.0;
    let blue = f64::from(px.b) / 255.0;

    let v = red.max(green).max(blue);
    let x = red.min(green).min(blue);

    if v < EPS {
        return Hsv::new(0.0, 0.0, v);
    }
    let s = (v - x) / v;
    if s.abs() < EPS {
        return Hsv::new(0.0, s, v);
    }

    let r = (v - red) / (v - x);
    let g = (v - green) / (v - x);
    let b = (v - blue) / (v - x);

    let mut h = 0.0;
    if near(red, v) {
        h = if near(green, x) { 5.0 + b } else { 1.0 - g };
    }
    if near(green, v) {
        h = if near(blue, x) { 1.0 + r } else { 3.0 - b };
    }
    if near(blue, v) {
        h = if near(red, x) { 3.0 + g } else { 5.0 - r };
    }

    let mut hue = h / 6.0;
    if hue >= 1.0 {
        hue -= 1.0;
    }
    Hsv::new(hue, s, v)
}

/// Converts an HSV triple back to RGB using the six-sector inverse.
pub fn hsv_to_pixel(hsv: Hsv) -> Rgb {
    let v = hsv.value.clamp(0.0, 1.0);
    let s = hsv.saturation.clamp(0.0, 1.0);
    let h6 = hsv.hue.rem_euclid(1.0) * 6.0;

    let sector = (h6.floor() as usize).min(5);
    let f = h6 - sector as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(
        round_to_u8(r * 255.0),
        round_to_u8(g * 255.0),
        round_to_u8(b * 255.0),
    )
}

/// Converts every pixel of `image` to HSV planes shaped `(height, width)`.
pub fn image_to_hsv(image: &RgbImage) -> HsvPlanes {
    let (rows, columns) = image.shape();
    let mut hue = Matrix::new(rows, columns);
    let mut saturation = Matrix::new(rows, columns);
    let mut value = Matrix::new(rows, columns);

    for (idx, &px) in image.pixels().iter().enumerate() {
        let hsv = pixel_to_hsv(px);
        hue.as_mut_slice()[idx] = hsv.hue;
        saturation.as_mut_slice()[idx] = hsv.saturation;
        value.as_mut_slice()[idx] = hsv.value;
    }

    HsvPlanes {
        hue,
        saturation,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::{hsv_to_pixel, image_to_hsv, pixel_to_hsv, Hsv};
    use crate::image::{Rgb, RgbImage};

    fn assert_hsv(actual: Hsv, hue: f64, saturation: f64, value: f64) {
        assert!((actual.hue - hue).abs() < 1e-12, "hue {actual:?}");
        assert!(
            (actual.saturation - saturation).abs() < 1e-12,
            "saturation {actual:?}"
        );
        assert!((actual.value - value).abs() < 1e-12, "value {actual:?}");
    }

    #[test]
    fn primaries_land_on_sector_boundaries() {
        assert_hsv(pixel_to_hsv(Rgb::new(255, 0, 0)), 0.0, 1.0, 1.0);
        assert_hsv(pixel_to_hsv(Rgb::new(0, 255, 0)), 1.0 / 3.0, 1.0, 1.0);
        assert_hsv(pixel_to_hsv(Rgb::new(0, 0, 255)), 2.0 / 3.0, 1.0, 1.0);
    }

    #[test]
    fn secondaries_use_later_branch() {
        // Yellow matches both the red and green branches; green wins.
        assert_hsv(pixel_to_hsv(Rgb::new(255, 255, 0)), 1.0 / 6.0, 1.0, 1.0);
        // Magenta matches red and blue; blue wins with 5 - r.
        assert_hsv(pixel_to_hsv(Rgb::new(255, 0, 255)), 5.0 / 6.0, 1.0, 1.0);
        assert_hsv(pixel_to_hsv(Rgb::new(0, 255, 255)), 0.5, 1.0, 1.0);
    }

    #[test]
    fn achromatic_pixels_have_zero_hue() {
        let gray = pixel_to_hsv(Rgb::new(128, 128, 128));
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert!((gray.value - 128.0 / 255.0).abs() < 1e-12);

        let black = pixel_to_hsv(Rgb::new(0, 0, 0));
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn intermediate_hue_follows_sector_formula() {
        // Red max, blue min: h = 1 - g with g = (v - G) / (v - x).
        let hsv = pixel_to_hsv(Rgb::new(255, 128, 0));
        let g = (255.0 - 128.0) / 255.0;
        assert_hsv(hsv, (1.0 - g) / 6.0, 1.0, 1.0);
    }

    #[test]
    fn inverse_roundtrips_representative_colors() {
        for px in [
            Rgb::new(255, 0, 0),
            Rgb::new(12, 200, 40),
            Rgb::new(30, 60, 90),
            Rgb::new(250, 250, 250),
            Rgb::new(200, 0, 180),
        ] {
            assert_eq!(hsv_to_pixel(pixel_to_hsv(px)), px);
        }
    }

    #[test]
    fn image_planes_follow_pixel_layout() {
        let img = RgbImage::from_pixels(
            vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
                Rgb::new(10, 10, 10),
                Rgb::new(0, 0, 0),
                Rgb::new(255, 255, 255),
            ],
            3,
            2,
        )
        .unwrap();
        let planes = image_to_hsv(&img);
        assert_eq!(planes.shape(), (2, 3));
        assert_hsv(planes.get(0, 1).unwrap(), 1.0 / 3.0, 1.0, 1.0);
        assert_hsv(planes.get(1, 2).unwrap(), 0.0, 0.0, 1.0);
        assert!(planes.get(2, 0).is_none());
    }
}
