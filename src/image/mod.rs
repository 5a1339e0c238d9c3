//! Owned RGB8 images and the per-pixel operations used for compositing.
//!
//! `RgbImage` stores pixels contiguously in row-major order, so pixel
//! `(row, col)` lives at `row * width + col`. A matrix of shape
//! `(height, width)` addresses the same pixel grid, which is how masks are
//! applied to images.

use crate::matrix::Matrix;
use crate::util::math::round_to_u8;
use crate::util::{ChromaKeyError, ChromaKeyResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod resample;

/// 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a pixel from untrusted integer channels, rejecting values
    /// outside `0..=255`.
    pub fn from_channels(r: i64, g: i64, b: i64) -> ChromaKeyResult<Self> {
        Ok(Self {
            r: checked_channel("red", r)?,
            g: checked_channel("green", g)?,
            b: checked_channel("blue", b)?,
        })
    }

    /// Channels in `[r, g, b]` order.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Scales every channel by `weight`, rounding to the nearest value.
    pub fn scaled(self, weight: f64) -> Self {
        Self {
            r: round_to_u8(f64::from(self.r) * weight),
            g: round_to_u8(f64::from(self.g) * weight),
            b: round_to_u8(f64::from(self.b) * weight),
        }
    }

    /// Channel-wise sum clamped at 255.
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

fn checked_channel(channel: &'static str, value: i64) -> ChromaKeyResult<u8> {
    u8::try_from(value).map_err(|_| ChromaKeyError::InvalidColorChannel { channel, value })
}

/// Owned contiguous RGB image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    data: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Creates a black image. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> ChromaKeyResult<Self> {
        Self::filled(width, height, Rgb::default())
    }

    /// Creates an image with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Rgb) -> ChromaKeyResult<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            data: vec![pixel; len],
            width,
            height,
        })
    }

    /// Wraps a row-major pixel buffer of exactly `width * height` pixels.
    pub fn from_pixels(pixels: Vec<Rgb>, width: usize, height: usize) -> ChromaKeyResult<Self> {
        let needed = pixel_count(width, height)?;
        if pixels.len() < needed {
            return Err(ChromaKeyError::BufferTooSmall {
                needed,
                got: pixels.len(),
            });
        }
        if pixels.len() > needed {
            return Err(ChromaKeyError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data: pixels,
            width,
            height,
        })
    }

    /// Builds an image from interleaved `RGBRGB...` bytes.
    pub fn from_raw(raw: &[u8], width: usize, height: usize) -> ChromaKeyResult<Self> {
        let needed = pixel_count(width, height)?
            .checked_mul(3)
            .ok_or(ChromaKeyError::InvalidDimensions { width, height })?;
        if raw.len() != needed {
            return Err(ChromaKeyError::BufferTooSmall {
                needed,
                got: raw.len(),
            });
        }
        let pixels = raw
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Self::from_pixels(pixels, width, height)
    }

    /// Returns the interleaved `RGBRGB...` bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| px.channels()).collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(height, width)`, matching the `(rows, columns)` of a mask.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    /// Returns the pixel at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Overwrites the pixel at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, pixel: Rgb) -> ChromaKeyResult<()> {
        if row >= self.height || col >= self.width {
            return Err(ChromaKeyError::IndexOutOfBounds {
                row,
                column: col,
                rows: self.height,
                columns: self.width,
            });
        }
        self.data[row * self.width + col] = pixel;
        Ok(())
    }

    /// Returns row `y` as a slice of `width` pixels.
    pub fn row(&self, y: usize) -> Option<&[Rgb]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Multiplies every channel by the matching mask weight, rounding to the
    /// nearest integer. The mask must be shaped `(height, width)`.
    pub fn mask_in_place(&mut self, mask: &Matrix<f64>) -> ChromaKeyResult<()> {
        if mask.shape() != self.shape() {
            return Err(ChromaKeyError::shape_mismatch(
                "mask",
                self.shape(),
                mask.shape(),
            ));
        }
        for (px, &weight) in self.data.iter_mut().zip(mask.as_slice()) {
            *px = px.scaled(weight);
        }
        Ok(())
    }

    /// Allocating form of [`RgbImage::mask_in_place`].
    pub fn masked(&self, mask: &Matrix<f64>) -> ChromaKeyResult<Self> {
        let mut out = self.clone();
        out.mask_in_place(mask)?;
        Ok(out)
    }

    /// Channel-wise sum of two equal-sized images, clamped at 255.
    pub fn saturating_add(&self, other: &Self) -> ChromaKeyResult<Self> {
        if self.shape() != other.shape() {
            return Err(ChromaKeyError::shape_mismatch(
                "add",
                self.shape(),
                other.shape(),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a.saturating_add(b))
            .collect();
        Ok(Self {
            data,
            width: self.width,
            height: self.height,
        })
    }
}

fn pixel_count(width: usize, height: usize) -> ChromaKeyResult<usize> {
    if width == 0 || height == 0 {
        return Err(ChromaKeyError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ChromaKeyError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{Rgb, RgbImage};
    use crate::util::ChromaKeyError;
    use crate::Matrix;

    #[test]
    fn from_channels_rejects_out_of_range() {
        assert_eq!(Rgb::from_channels(0, 255, 12).unwrap(), Rgb::new(0, 255, 12));
        assert_eq!(
            Rgb::from_channels(0, 256, 0).unwrap_err(),
            ChromaKeyError::InvalidColorChannel {
                channel: "green",
                value: 256,
            }
        );
        assert!(Rgb::from_channels(-1, 0, 0).is_err());
    }

    #[test]
    fn raw_layout_is_interleaved() {
        let raw = [1u8, 2, 3, 4, 5, 6];
        let img = RgbImage::from_raw(&raw, 2, 1).unwrap();
        assert_eq!(img.get(0, 1), Some(Rgb::new(4, 5, 6)));
        assert_eq!(img.to_raw(), raw.to_vec());
        assert!(RgbImage::from_raw(&raw, 3, 1).is_err());
    }

    #[test]
    fn zero_sized_images_are_rejected() {
        assert_eq!(
            RgbImage::new(0, 3).unwrap_err(),
            ChromaKeyError::InvalidDimensions {
                width: 0,
                height: 3,
            }
        );
    }

    #[test]
    fn mask_rounds_to_nearest_channel() {
        let mut img = RgbImage::filled(2, 1, Rgb::new(101, 50, 255)).unwrap();
        let mask = Matrix::from_vec(1, 2, vec![0.5, 0.0]).unwrap();
        img.mask_in_place(&mask).unwrap();
        assert_eq!(img.get(0, 0), Some(Rgb::new(51, 25, 128)));
        assert_eq!(img.get(0, 1), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn mask_requires_matching_shape() {
        let img = RgbImage::new(2, 3).unwrap();
        let mask = Matrix::<f64>::new(2, 3);
        let err = img.masked(&mask).unwrap_err();
        assert_eq!(
            err,
            ChromaKeyError::ShapeMismatch {
                op: "mask",
                left: (3, 2),
                right: (2, 3),
            }
        );
    }

    #[test]
    fn saturating_add_clamps_channels() {
        let a = RgbImage::filled(1, 1, Rgb::new(200, 10, 0)).unwrap();
        let b = RgbImage::filled(1, 1, Rgb::new(100, 10, 255)).unwrap();
        let sum = a.saturating_add(&b).unwrap();
        assert_eq!(sum.get(0, 0), Some(Rgb::new(255, 20, 255)));

        let c = RgbImage::new(2, 1).unwrap();
        assert!(a.saturating_add(&c).is_err());
    }
}
