//! Chromakey is a CPU chroma-key compositing library.
//!
//! A foreground image is keyed against a reference color in HSV space: pixels
//! close to the key in hue and saturation are replaced by the matching
//! background pixel. The numeric building blocks (a generic [`Matrix`], the
//! HSV transform and the distance metric) are public so custom pipelines can
//! be assembled from them.
//!
//! Optional features: `rayon` (row-parallel compositing), `simd` (vectorised
//! distance kernel), `image-io` (load/save via the `image` crate) and
//! `tracing` (spans and events for each pipeline stage).

pub mod color;
pub mod distance;
pub mod image;
pub mod kernel;
pub mod keying;
pub mod matrix;
mod trace;
pub mod util;

pub use crate::image::resample::resize_bilinear;
pub use crate::image::{Rgb, RgbImage};
pub use color::{hsv_to_pixel, image_to_hsv, pixel_to_hsv, Hsv, HsvPlanes};
pub use distance::{hsv_distance, pixel_distance};
pub use keying::{chroma_key, Compositor, KeyConfig, KeyMasks};
pub use matrix::{Element, Matrix};
pub use util::{ChromaKeyError, ChromaKeyResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;
