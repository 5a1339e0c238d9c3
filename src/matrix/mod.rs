//! Dense row-major 2D numeric matrices.
//!
//! `Matrix<T>` owns a contiguous buffer of `rows * columns` elements and maps
//! `(i, j)` to `i * columns + j`. Element-wise operations between two
//! matrices are shape checked and return [`ChromaKeyError::ShapeMismatch`]
//! without touching either operand; scalar operations always succeed and are
//! exposed through the `std::ops` operators.

use crate::util::{ChromaKeyError, ChromaKeyResult};
use std::ops::{Index, IndexMut};

mod element;
mod ops;

pub use element::Element;

/// Owned 2D matrix of numeric elements.
///
/// `Clone` performs a deep copy. [`Matrix::take`] moves the buffer out and
/// leaves an empty `0x0` matrix behind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T: Element> Matrix<T> {
    /// Creates a zero-initialised matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, T::ZERO)
    }

    /// Creates a matrix with every element set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        let len = rows
            .checked_mul(columns)
            .unwrap_or_else(|| panic!("matrix size {rows}x{columns} overflows usize"));
        Self {
            data: vec![value; len],
            rows,
            columns,
        }
    }

    /// Wraps a row-major buffer whose length must equal `rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> ChromaKeyResult<Self> {
        let needed = rows
            .checked_mul(columns)
            .ok_or(ChromaKeyError::InvalidDimensions {
                width: columns,
                height: rows,
            })?;
        if data.len() < needed {
            return Err(ChromaKeyError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ChromaKeyError::InvalidDimensions {
                width: columns,
                height: rows,
            });
        }
        Ok(Self {
            data,
            rows,
            columns,
        })
    }

    /// Builds a matrix by evaluating `f(i, j)` for every position.
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut out = Self::new(rows, columns);
        for i in 0..rows {
            for j in 0..columns {
                out.data[i * columns + j] = f(i, j);
            }
        }
        out
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at `(i, j)` or `IndexOutOfBounds`.
    pub fn at(&self, i: usize, j: usize) -> ChromaKeyResult<T> {
        self.get(i, j).copied().ok_or(self.out_of_bounds(i, j))
    }

    /// Overwrites the element at `(i, j)` or fails with `IndexOutOfBounds`.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> ChromaKeyResult<()> {
        let err = self.out_of_bounds(i, j);
        let slot = self.get_mut(i, j).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    /// Returns a reference to the element at `(i, j)` if it is in bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        let idx = self.offset(i, j)?;
        self.data.get(idx)
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        let idx = self.offset(i, j)?;
        self.data.get_mut(idx)
    }

    /// Returns row `i` as a slice of length `columns`.
    pub fn row(&self, i: usize) -> Option<&[T]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.columns;
        self.data.get(start..start + self.columns)
    }

    pub fn row_mut(&mut self, i: usize) -> Option<&mut [T]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.columns;
        self.data.get_mut(start..start + self.columns)
    }

    /// Iterates over the rows as slices; yields `rows` slices even when
    /// `columns` is zero.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        let columns = self.columns;
        (0..self.rows).map(move |i| &self.data[i * columns..(i + 1) * columns])
    }

    /// Returns the row-major backing buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Moves the contents out, leaving `self` as an empty `0x0` matrix.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Sum of all elements at the element type (integral sums wrap).
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::ZERO, |acc, &v| acc.plus(v))
    }

    /// Smallest element, or `None` for an empty matrix.
    pub fn min_element(&self) -> Option<T> {
        self.data.iter().copied().reduce(T::min_of)
    }

    /// Largest element, or `None` for an empty matrix.
    pub fn max_element(&self) -> Option<T> {
        self.data.iter().copied().reduce(T::max_of)
    }

    /// Number of elements that are not zero.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|v| v.is_nonzero()).count()
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        if i >= self.rows || j >= self.columns {
            return None;
        }
        Some(i * self.columns + j)
    }

    fn out_of_bounds(&self, i: usize, j: usize) -> ChromaKeyError {
        ChromaKeyError::IndexOutOfBounds {
            row: i,
            column: j,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.get(i, j) {
            Some(value) => value,
            None => panic!(
                "index ({i}, {j}) out of bounds for {}x{} matrix",
                self.rows, self.columns
            ),
        }
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let (rows, columns) = self.shape();
        match self.get_mut(i, j) {
            Some(value) => value,
            None => panic!("index ({i}, {j}) out of bounds for {rows}x{columns} matrix"),
        }
    }
}
