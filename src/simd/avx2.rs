// 256-bit backend, compiled when the build enables `avx2` but not `avx512f`.
#![allow(unused_unsafe)]

use std::arch::x86_64::*;

use super::traits::Vectorize;

pub const REGISTER_BYTES: usize = 32;

impl Vectorize for f32 {
    type SimdVector = __m256;

    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load_simd(ptr: *const f32) -> __m256 {
        unsafe { _mm256_load_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn store_simd(ptr: *mut f32, vec: __m256) {
        unsafe { _mm256_store_ps(ptr, vec) }
    }

    #[inline(always)]
    fn zero_simd() -> __m256 {
        unsafe { _mm256_setzero_ps() }
    }

    #[inline(always)]
    fn add_simd(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_add_ps(a, b) }
    }

    #[inline(always)]
    fn subtract_simd(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_sub_ps(a, b) }
    }

    #[inline(always)]
    fn multiply_simd(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_mul_ps(a, b) }
    }

    #[cfg(target_feature = "fma")]
    #[inline(always)]
    fn multiply_add_simd(a: __m256, b: __m256, acc: __m256) -> __m256 {
        unsafe { _mm256_fmadd_ps(a, b, acc) }
    }

    #[cfg(not(target_feature = "fma"))]
    #[inline(always)]
    fn multiply_add_simd(a: __m256, b: __m256, acc: __m256) -> __m256 {
        unsafe { _mm256_add_ps(_mm256_mul_ps(a, b), acc) }
    }
}

impl Vectorize for f64 {
    type SimdVector = __m256d;

    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load_simd(ptr: *const f64) -> __m256d {
        unsafe { _mm256_load_pd(ptr) }
    }

    #[inline(always)]
    unsafe fn store_simd(ptr: *mut f64, vec: __m256d) {
        unsafe { _mm256_store_pd(ptr, vec) }
    }

    #[inline(always)]
    fn zero_simd() -> __m256d {
        unsafe { _mm256_setzero_pd() }
    }

    #[inline(always)]
    fn add_simd(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_add_pd(a, b) }
    }

    #[inline(always)]
    fn subtract_simd(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_sub_pd(a, b) }
    }

    #[inline(always)]
    fn multiply_simd(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_mul_pd(a, b) }
    }

    #[cfg(target_feature = "fma")]
    #[inline(always)]
    fn multiply_add_simd(a: __m256d, b: __m256d, acc: __m256d) -> __m256d {
        unsafe { _mm256_fmadd_pd(a, b, acc) }
    }

    #[cfg(not(target_feature = "fma"))]
    #[inline(always)]
    fn multiply_add_simd(a: __m256d, b: __m256d, acc: __m256d) -> __m256d {
        unsafe { _mm256_add_pd(_mm256_mul_pd(a, b), acc) }
    }
}

impl Vectorize for i32 {
    type SimdVector = __m256i;

    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load_simd(ptr: *const i32) -> __m256i {
        unsafe { _mm256_load_si256(ptr.cast::<__m256i>()) }
    }

    #[inline(always)]
    unsafe fn store_simd(ptr: *mut i32, vec: __m256i) {
        unsafe { _mm256_store_si256(ptr.cast::<__m256i>(), vec) }
    }

    #[inline(always)]
    fn zero_simd() -> __m256i {
        unsafe { _mm256_setzero_si256() }
    }

    #[inline(always)]
    fn add_simd(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(a, b) }
    }

    #[inline(always)]
    fn subtract_simd(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(a, b) }
    }

    #[inline(always)]
    fn multiply_simd(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_mullo_epi32(a, b) }
    }

    #[inline(always)]
    fn multiply_add_simd(a: __m256i, b: __m256i, acc: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(_mm256_mullo_epi32(a, b), acc) }
    }
}
