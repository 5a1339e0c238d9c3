//! Fused per-pixel distance kernels.
//!
//! [`crate::distance::hsv_distance`] is written with matrix operators and
//! allocates an intermediate matrix per step. The kernels here evaluate the
//! same formula in a single pass over the hue and saturation planes and write
//! into a caller-provided buffer. They produce the same results as the matrix
//! form; the scalar kernel is bit-identical.

use crate::color::{Hsv, HsvPlanes};
use crate::matrix::Matrix;
use crate::util::{ChromaKeyError, ChromaKeyResult};

/// Kernel trait for evaluating the key distance over flat planes.
pub trait DistanceKernel {
    /// Writes the distance of every `(hue[i], saturation[i])` pair to the key
    /// into `out[i]`. All three slices must have the same length.
    fn distance_into(
        hue: &[f64],
        saturation: &[f64],
        key: Hsv,
        out: &mut [f64],
    ) -> ChromaKeyResult<()>;

    /// Allocates and fills a distance matrix shaped like `planes`.
    fn distance_matrix(planes: &HsvPlanes, key: Hsv) -> ChromaKeyResult<Matrix<f64>> {
        if planes.hue.shape() != planes.saturation.shape() {
            return Err(ChromaKeyError::shape_mismatch(
                "distance_kernel",
                planes.hue.shape(),
                planes.saturation.shape(),
            ));
        }
        let (rows, columns) = planes.shape();
        let mut out = Matrix::new(rows, columns);
        Self::distance_into(
            planes.hue.as_slice(),
            planes.saturation.as_slice(),
            key,
            out.as_mut_slice(),
        )?;
        Ok(out)
    }
}

pub(crate) fn check_lengths(hue: &[f64], saturation: &[f64], out: &[f64]) -> ChromaKeyResult<()> {
    let needed = hue.len();
    for got in [saturation.len(), out.len()] {
        if got != needed {
            return Err(ChromaKeyError::BufferTooSmall { needed, got });
        }
    }
    Ok(())
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;
