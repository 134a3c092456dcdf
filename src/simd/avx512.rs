// 512-bit backend, compiled when the build enables `avx512f`.
#![allow(unused_unsafe)]

use std::arch::x86_64::*;

use super::traits::Vectorize;

pub const REGISTER_BYTES: usize = 64;

impl Vectorize for f32 {
    type SimdVector = __m512;

    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn load_simd(ptr: *const f32) -> __m512 {
        unsafe { _mm512_load_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn store_simd(ptr: *mut f32, vec: __m512) {
        unsafe { _mm512_store_ps(ptr, vec) }
    }

    #[inline(always)]
    fn zero_simd() -> __m512 {
        unsafe { _mm512_setzero_ps() }
    }

    #[inline(always)]
    fn add_simd(a: __m512, b: __m512) -> __m512 {
        unsafe { _mm512_add_ps(a, b) }
    }

    #[inline(always)]
    fn subtract_simd(a: __m512, b: __m512) -> __m512 {
        unsafe { _mm512_sub_ps(a, b) }
    }

    #[inline(always)]
    fn multiply_simd(a: __m512, b: __m512) -> __m512 {
        unsafe { _mm512_mul_ps(a, b) }
    }

    #[inline(always)]
    fn multiply_add_simd(a: __m512, b: __m512, acc: __m512) -> __m512 {
        unsafe { _mm512_fmadd_ps(a, b, acc) }
    }
}

impl Vectorize for f64 {
    type SimdVector = __m512d;

    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load_simd(ptr: *const f64) -> __m512d {
        unsafe { _mm512_load_pd(ptr) }
    }

    #[inline(always)]
    unsafe fn store_simd(ptr: *mut f64, vec: __m512d) {
        unsafe { _mm512_store_pd(ptr, vec) }
    }

    #[inline(always)]
    fn zero_simd() -> __m512d {
        unsafe { _mm512_setzero_pd() }
    }

    #[inline(always)]
    fn add_simd(a: __m512d, b: __m512d) -> __m512d {
        unsafe { _mm512_add_pd(a, b) }
    }

    #[inline(always)]
    fn subtract_simd(a: __m512d, b: __m512d) -> __m512d {
        unsafe { _mm512_sub_pd(a, b) }
    }

    #[inline(always)]
    fn multiply_simd(a: __m512d, b: __m512d) -> __m512d {
        unsafe { _mm512_mul_pd(a, b) }
    }

    #[inline(always)]
    fn multiply_add_simd(a: __m512d, b: __m512d, acc: __m512d) -> __m512d {
        unsafe { _mm512_fmadd_pd(a, b, acc) }
    }
}

impl Vectorize for i32 {
    type SimdVector = __m512i;

    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn load_simd(ptr: *const i32) -> __m512i {
        unsafe { _mm512_load_epi32(ptr) }
    }

    #[inline(always)]
    unsafe fn store_simd(ptr: *mut i32, vec: __m512i) {
        unsafe { _mm512_store_epi32(ptr, vec) }
    }

    #[inline(always)]
    fn zero_simd() -> __m512i {
        unsafe { _mm512_setzero_si512() }
    }

    #[inline(always)]
    fn add_simd(a: __m512i, b: __m512i) -> __m512i {
        unsafe { _mm512_add_epi32(a, b) }
    }

    #[inline(always)]
    fn subtract_simd(a: __m512i, b: __m512i) -> __m512i {
        unsafe { _mm512_sub_epi32(a, b) }
    }

    #[inline(always)]
    fn multiply_simd(a: __m512i, b: __m512i) -> __m512i {
        unsafe { _mm512_mullo_epi32(a, b) }
    }

    // No integer FMA in avx512f.
    #[inline(always)]
    fn multiply_add_simd(a: __m512i, b: __m512i, acc: __m512i) -> __m512i {
        unsafe { _mm512_add_epi32(_mm512_mullo_epi32(a, b), acc) }
    }
}
