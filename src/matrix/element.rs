//! Numeric element types accepted by [`Matrix`](super::Matrix).
//!
//! The trait is sealed: only the primitive integral and floating-point types
//! implement it, so a matrix of any other type is rejected at compile time.

use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// Scalar element of a [`Matrix`](super::Matrix).
///
/// Arithmetic is performed at the element type itself. Integral types wrap on
/// overflow; integral division by zero panics like the primitive operator.
pub trait Element: Copy + Debug + Default + PartialOrd + Send + Sync + sealed::Sealed {
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity, also the "true" value of comparison masks.
    const ONE: Self;

    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn over(self, rhs: Self) -> Self;
    fn abs_value(self) -> Self;

    /// Floating-point exponentiation, converted back to the element type.
    fn powf(self, exp: f64) -> Self;

    /// Widens the element to `f64` (lossy for 64-bit integers).
    fn to_f64(self) -> f64;

    #[inline]
    fn from_bool(flag: bool) -> Self {
        if flag {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    #[inline]
    fn is_nonzero(self) -> bool {
        self != Self::ZERO
    }

    /// Smaller of two values; returns `self` unless `rhs` compares less.
    #[inline]
    fn min_of(self, rhs: Self) -> Self {
        if rhs < self {
            rhs
        } else {
            self
        }
    }

    #[inline]
    fn max_of(self, rhs: Self) -> Self {
        if rhs > self {
            rhs
        } else {
            self
        }
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}
        impl Element for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            #[inline] fn plus(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline] fn minus(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline] fn times(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline] fn over(self, rhs: Self) -> Self { self.wrapping_div(rhs) }
            #[inline] fn abs_value(self) -> Self { self.wrapping_abs() }
            #[inline] fn powf(self, exp: f64) -> Self { (self as f64).powf(exp) as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}
        impl Element for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            #[inline] fn plus(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline] fn minus(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline] fn times(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline] fn over(self, rhs: Self) -> Self { self / rhs }
            #[inline] fn abs_value(self) -> Self { self }
            #[inline] fn powf(self, exp: f64) -> Self { (self as f64).powf(exp) as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}
        impl Element for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            #[inline] fn plus(self, rhs: Self) -> Self { self + rhs }
            #[inline] fn minus(self, rhs: Self) -> Self { self - rhs }
            #[inline] fn times(self, rhs: Self) -> Self { self * rhs }
            #[inline] fn over(self, rhs: Self) -> Self { self / rhs }
            #[inline] fn abs_value(self) -> Self { self.abs() }
            #[inline] fn powf(self, exp: f64) -> Self { <$t>::powf(self, exp as $t) }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);
impl_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn integral_arithmetic_wraps() {
        assert_eq!(250u8.plus(10), 4);
        assert_eq!(0u8.minus(1), 255);
        assert_eq!(i8::MIN.abs_value(), i8::MIN);
        assert_eq!((-7i32).abs_value(), 7);
    }

    #[test]
    fn powf_goes_through_floating_point() {
        assert_eq!(3i32.powf(2.0), 9);
        assert_eq!(16u16.powf(0.5), 4);
        assert!((2.0f64.powf(0.5) - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn min_prefers_left_operand_on_ties() {
        assert_eq!(1.0f64.min_of(1.0), 1.0);
        assert_eq!(2.0f64.min_of(1.0), 1.0);
        assert_eq!(5u8.max_of(9), 9);
    }

    #[test]
    fn from_bool_maps_to_identities() {
        assert_eq!(f64::from_bool(true), 1.0);
        assert_eq!(u8::from_bool(false), 0);
        assert!(3i16.is_nonzero());
        assert!(!0.0f32.is_nonzero());
    }
}
