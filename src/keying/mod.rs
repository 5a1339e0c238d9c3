//! Chroma-key compositing.
//!
//! The compositor keys the foreground against a reference color:
//!
//! 1. the foreground is converted to HSV planes (the background is not
//!    analysed),
//! 2. the key color is converted with the same per-pixel transform,
//! 3. the per-pixel distance to the key is computed,
//! 4. `distance > threshold` selects foreground pixels and
//!    `distance < threshold` selects background pixels,
//! 5. both images are masked and summed with saturation at 255.
//!
//! Pixels whose distance equals the threshold belong to neither mask and come
//! out black. Because the distance never drops below `1.0`, thresholds at or
//! below `1.0` keep the whole foreground.

use crate::color::{image_to_hsv, pixel_to_hsv, Hsv, HsvPlanes};
use crate::image::{Rgb, RgbImage};
use crate::matrix::Matrix;
#[cfg(feature = "tracing")]
use crate::trace::trace_event;
use crate::trace::{trace_span, trace_warn};
use crate::util::{ChromaKeyError, ChromaKeyResult};

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::DistanceScalar;
#[cfg(feature = "simd")]
use crate::kernel::simd::DistanceSimd;
use crate::kernel::DistanceKernel;

/// Configuration for a keying run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyConfig {
    /// Reference color treated as transparent.
    pub key: Rgb,
    /// Distance threshold separating foreground from background.
    pub threshold: f64,
    /// Use the row-parallel pipeline when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            key: Rgb::new(0, 255, 0),
            threshold: 1.0,
            parallel: false,
        }
    }
}

impl KeyConfig {
    /// Rejects thresholds that are NaN or infinite.
    ///
    /// Negative thresholds are accepted: they keep every pixel in the
    /// foreground, and only a warning is emitted.
    pub fn validate(&self) -> ChromaKeyResult<()> {
        if !self.threshold.is_finite() {
            return Err(ChromaKeyError::InvalidThreshold {
                value: self.threshold,
            });
        }
        if self.threshold < 0.0 {
            trace_warn!(
                "threshold should not be negative",
                threshold = self.threshold
            );
        }
        Ok(())
    }
}

/// Foreground and background masks of a keying run, shaped `(height, width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyMasks {
    /// Distance of every foreground pixel to the key.
    pub distance: Matrix<f64>,
    /// 1 where the foreground pixel is kept.
    pub foreground: Matrix<f64>,
    /// 1 where the background pixel shows through.
    pub background: Matrix<f64>,
}

/// Chroma-key compositor.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    cfg: KeyConfig,
}

impl Compositor {
    pub fn new(cfg: KeyConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: KeyConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &KeyConfig {
        &self.cfg
    }

    /// HSV triple of the configured key color.
    pub fn key_hsv(&self) -> Hsv {
        pixel_to_hsv(self.cfg.key)
    }

    /// Computes the distance matrix and both masks for `fg`.
    pub fn masks(&self, fg: &RgbImage) -> ChromaKeyResult<KeyMasks> {
        self.cfg.validate()?;
        self.compute_masks(fg)
    }

    fn compute_masks(&self, fg: &RgbImage) -> ChromaKeyResult<KeyMasks> {
        let _span = trace_span!("key_masks", width = fg.width(), height = fg.height()).entered();

        let planes = self.hsv_planes(fg);
        let key = self.key_hsv();
        let distance = distance_matrix(&planes, key)?;

        let foreground = distance.greater_than(self.cfg.threshold);
        let background = distance.less_than(self.cfg.threshold);
        #[cfg(feature = "tracing")]
        {
            let kept = foreground.count_nonzero();
            let replaced = background.count_nonzero();
            trace_event!("key_masks", foreground = kept, background = replaced);
        }

        Ok(KeyMasks {
            distance,
            foreground,
            background,
        })
    }

    /// Composites `fg` over `bg`, which must already have the same size.
    ///
    /// Neither input is modified; on error no output is produced.
    pub fn composite(&self, fg: &RgbImage, bg: &RgbImage) -> ChromaKeyResult<RgbImage> {
        if fg.shape() != bg.shape() {
            return Err(ChromaKeyError::shape_mismatch(
                "chroma_key",
                fg.shape(),
                bg.shape(),
            ));
        }
        self.cfg.validate()?;

        let _span = trace_span!(
            "composite",
            width = fg.width(),
            height = fg.height(),
            parallel = self.cfg.parallel
        )
        .entered();

        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            let key = self.key_hsv();
            return crate::kernel::rayon::composite_par(fg, bg, key, self.cfg.threshold);
        }

        let masks = self.compute_masks(fg)?;
        let fg_masked = fg.masked(&masks.foreground)?;
        let bg_masked = bg.masked(&masks.background)?;
        fg_masked.saturating_add(&bg_masked)
    }

    fn hsv_planes(&self, image: &RgbImage) -> HsvPlanes {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return crate::kernel::rayon::image_to_hsv_par(image);
        }
        image_to_hsv(image)
    }
}

#[cfg(not(feature = "simd"))]
fn distance_matrix(planes: &HsvPlanes, key: Hsv) -> ChromaKeyResult<Matrix<f64>> {
    DistanceScalar::distance_matrix(planes, key)
}

#[cfg(feature = "simd")]
fn distance_matrix(planes: &HsvPlanes, key: Hsv) -> ChromaKeyResult<Matrix<f64>> {
    DistanceSimd::distance_matrix(planes, key)
}

/// Composites `fg` over `bg` with the given key color and threshold.
pub fn chroma_key(
    fg: &RgbImage,
    bg: &RgbImage,
    key: Rgb,
    threshold: f64,
) -> ChromaKeyResult<RgbImage> {
    Compositor::new(KeyConfig {
        key,
        threshold,
        parallel: false,
    })
    .composite(fg, bg)
}
