use std::fmt::{Debug, Display};

use crate::simd::Vectorize;

pub trait Zero: Sized {
    fn zero() -> Self;

    fn is_zero(&self) -> bool;

    fn set_zero(&mut self) {
        *self = Zero::zero();
    }
}

pub trait One: Sized {
    fn one() -> Self;

    fn set_one(&mut self) {
        *self = One::one();
    }
}

/// Scalar kinds a [`FixedVec`](crate::FixedVec) can hold.
///
/// The scalar operations mirror the register ones lane for lane, so the tail
/// of a vector computes exactly what a full register would have. Integer
/// arithmetic wraps, as the hardware does.
pub trait Element:
    Vectorize + Zero + One + Default + PartialEq + Debug + Display + Send + Sync + 'static
{
    fn add_scalar(self, rhs: Self) -> Self;
    fn sub_scalar(self, rhs: Self) -> Self;
    fn mul_scalar(self, rhs: Self) -> Self;

    /// `acc + self * rhs`, never fused.
    #[inline]
    fn mul_add_scalar(self, rhs: Self, acc: Self) -> Self {
        acc.add_scalar(self.mul_scalar(rhs))
    }
}

macro_rules! float_element {
    ($t:ty) => {
        impl Zero for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn is_zero(&self) -> bool {
                *self == 0.0
            }
        }

        impl One for $t {
            #[inline]
            fn one() -> Self {
                1.0
            }
        }

        impl Element for $t {
            #[inline(always)]
            fn add_scalar(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn sub_scalar(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn mul_scalar(self, rhs: Self) -> Self {
                self * rhs
            }
        }
    };
}

float_element!(f32);
float_element!(f64);

impl Zero for i32 {
    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl One for i32 {
    #[inline]
    fn one() -> Self {
        1
    }
}

impl Element for i32 {
    #[inline(always)]
    fn add_scalar(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline(always)]
    fn sub_scalar(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    #[inline(always)]
    fn mul_scalar(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}
