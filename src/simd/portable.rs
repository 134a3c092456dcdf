use std::mem::size_of;
use std::ops::{Add, Mul, Sub};

use super::traits::Vectorize;

// Same width as a 512-bit register so lane counts match the AVX-512 build.
pub const REGISTER_BYTES: usize = 64;

/// Register stand-in for targets without an AVX family enabled.
///
/// A 64-byte aligned lane array. The per-lane loops are plain enough for the
/// compiler to lower onto whatever vector unit the baseline target has.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(64))]
pub struct Lanes<T, const L: usize>(pub [T; L]);

impl<T: Copy, const L: usize> Lanes<T, L> {
    #[inline(always)]
    fn zip_with(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        Lanes(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }
}

macro_rules! portable_vectorize {
    ($t:ty, $zero:expr, $add:expr, $sub:expr, $mul:expr) => {
        impl Vectorize for $t {
            type SimdVector = Lanes<$t, { REGISTER_BYTES / size_of::<$t>() }>;

            const LANES: usize = REGISTER_BYTES / size_of::<$t>();

            #[inline(always)]
            unsafe fn load_simd(ptr: *const $t) -> Self::SimdVector {
                unsafe { ptr.cast::<Self::SimdVector>().read() }
            }

            #[inline(always)]
            unsafe fn store_simd(ptr: *mut $t, vec: Self::SimdVector) {
                unsafe { ptr.cast::<Self::SimdVector>().write(vec) }
            }

            #[inline(always)]
            fn zero_simd() -> Self::SimdVector {
                Lanes([$zero; REGISTER_BYTES / size_of::<$t>()])
            }

            #[inline(always)]
            fn add_simd(a: Self::SimdVector, b: Self::SimdVector) -> Self::SimdVector {
                a.zip_with(b, $add)
            }

            #[inline(always)]
            fn subtract_simd(a: Self::SimdVector, b: Self::SimdVector) -> Self::SimdVector {
                a.zip_with(b, $sub)
            }

            #[inline(always)]
            fn multiply_simd(a: Self::SimdVector, b: Self::SimdVector) -> Self::SimdVector {
                a.zip_with(b, $mul)
            }

            #[inline(always)]
            fn multiply_add_simd(
                a: Self::SimdVector,
                b: Self::SimdVector,
                acc: Self::SimdVector,
            ) -> Self::SimdVector {
                Self::add_simd(Self::multiply_simd(a, b), acc)
            }
        }
    };
}

portable_vectorize!(f32, 0.0, <f32 as Add>::add, <f32 as Sub>::sub, <f32 as Mul>::mul);
portable_vectorize!(f64, 0.0, <f64 as Add>::add, <f64 as Sub>::sub, <f64 as Mul>::mul);
portable_vectorize!(i32, 0, i32::wrapping_add, i32::wrapping_sub, i32::wrapping_mul);
