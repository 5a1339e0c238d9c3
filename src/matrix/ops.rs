//! Element-wise and scalar arithmetic for [`Matrix`].
//!
//! Matrix-matrix operations are fallible (`try_*`) because the shapes must
//! agree. Scalar operations cannot fail and are implemented with the
//! `std::ops` traits for both owned matrices (reusing the buffer) and
//! references (allocating a new matrix).

use super::{Element, Matrix};
use crate::util::{ChromaKeyError, ChromaKeyResult};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

impl<T: Element> Matrix<T> {
    fn check_shape(&self, other: &Self, op: &'static str) -> ChromaKeyResult<()> {
        if self.shape() != other.shape() {
            return Err(ChromaKeyError::shape_mismatch(
                op,
                self.shape(),
                other.shape(),
            ));
        }
        Ok(())
    }

    /// Applies `f` to every element, producing a new matrix.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Applies `f` to every element in place.
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(T) -> T,
    {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Combines corresponding elements of two equal-shaped matrices.
    pub fn zip_map<F>(&self, other: &Self, op: &'static str, f: F) -> ChromaKeyResult<Self>
    where
        F: Fn(T, T) -> T,
    {
        self.check_shape(other, op)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            columns: self.columns,
        })
    }

    fn zip_in_place<F>(&mut self, other: &Self, op: &'static str, f: F) -> ChromaKeyResult<()>
    where
        F: Fn(T, T) -> T,
    {
        self.check_shape(other, op)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = f(*a, b);
        }
        Ok(())
    }

    /// Element-wise sum.
    pub fn try_add(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "add", T::plus)
    }

    /// Element-wise difference.
    pub fn try_sub(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "sub", T::minus)
    }

    /// Element-wise (Hadamard) product.
    pub fn try_mul(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "mul", T::times)
    }

    /// Element-wise quotient.
    pub fn try_div(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "div", T::over)
    }

    pub fn try_add_assign(&mut self, other: &Self) -> ChromaKeyResult<()> {
        self.zip_in_place(other, "add", T::plus)
    }

    pub fn try_sub_assign(&mut self, other: &Self) -> ChromaKeyResult<()> {
        self.zip_in_place(other, "sub", T::minus)
    }

    pub fn try_mul_assign(&mut self, other: &Self) -> ChromaKeyResult<()> {
        self.zip_in_place(other, "mul", T::times)
    }

    pub fn try_div_assign(&mut self, other: &Self) -> ChromaKeyResult<()> {
        self.zip_in_place(other, "div", T::over)
    }

    /// Raises every element to `exp` using floating-point exponentiation.
    pub fn powf(&self, exp: f64) -> Self {
        self.map(|v| v.powf(exp))
    }

    pub fn powf_assign(&mut self, exp: f64) {
        self.map_in_place(|v| v.powf(exp));
    }

    /// Absolute value of every element.
    pub fn abs(&self) -> Self {
        self.map(T::abs_value)
    }

    /// Element-wise minimum of two equal-shaped matrices.
    pub fn min(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "min", T::min_of)
    }

    /// Element-wise maximum of two equal-shaped matrices.
    pub fn max(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "max", T::max_of)
    }

    /// `1` where the element is strictly greater than `value`, else `0`.
    pub fn greater_than(&self, value: T) -> Self {
        self.map(|v| T::from_bool(v > value))
    }

    /// `1` where the element is strictly less than `value`, else `0`.
    pub fn less_than(&self, value: T) -> Self {
        self.map(|v| T::from_bool(v < value))
    }

    /// `1` where both operands are non-zero, else `0`.
    pub fn logical_and(&self, other: &Self) -> ChromaKeyResult<Self> {
        self.zip_map(other, "and", |a, b| {
            T::from_bool(a.is_nonzero() && b.is_nonzero())
        })
    }
}

macro_rules! impl_scalar_op {
    ($(#[$doc:meta])* $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $elem:ident) => {
        $(#[$doc])*
        impl<T: Element> $assign_trait<T> for Matrix<T> {
            fn $assign_method(&mut self, rhs: T) {
                self.map_in_place(|v| v.$elem(rhs));
            }
        }

        $(#[$doc])*
        impl<T: Element> $trait<T> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(mut self, rhs: T) -> Matrix<T> {
                self.$assign_method(rhs);
                self
            }
        }

        $(#[$doc])*
        impl<T: Element> $trait<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                self.map(|v| v.$elem(rhs))
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, plus);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, minus);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, times);
impl_scalar_op!(
    /// Divides every element by a scalar.
    ///
    /// # Panics
    ///
    /// For integral element types, panics when `rhs` is zero, like the
    /// primitive `/`. Floating-point division by zero yields infinities or
    /// NaN and never panics.
    Div,
    div,
    DivAssign,
    div_assign,
    over
);
