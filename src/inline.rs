use crate::simd::{Vectorize, MAX_LANES};
use crate::traits::Element;

// Largest multiple of `lanes` not exceeding `len`; where the register loop stops
// and the scalar tail begins.
#[inline(always)]
pub const fn bulk_len(len: usize, lanes: usize) -> usize {
    len - len % lanes
}

// Helper function to check a pointer against a power-of-two alignment
#[inline]
pub fn is_aligned<T>(ptr: *const T, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    (ptr as usize) & (alignment - 1) == 0
}

#[repr(C, align(64))]
struct Scratch<T>([T; MAX_LANES]);

// Sums the lanes of a register left to right, through an aligned scratch block.
#[inline]
pub fn horizontal_sum<T: Element>(vec: <T as Vectorize>::SimdVector) -> T {
    const { assert!(T::LANES <= MAX_LANES) };

    let mut scratch = Scratch([T::zero(); MAX_LANES]);
    // SAFETY: scratch is 64-byte aligned and holds at least LANES elements.
    unsafe { T::store_simd(scratch.0.as_mut_ptr(), vec) };
    scratch.0[..T::LANES]
        .iter()
        .fold(T::zero(), |acc, &x| acc.add_scalar(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_len() {
        assert_eq!(bulk_len(256, 16), 256);
        assert_eq!(bulk_len(100, 16), 96);
        assert_eq!(bulk_len(7, 16), 0);
        assert_eq!(bulk_len(0, 8), 0);
    }

    #[test]
    fn test_is_aligned() {
        assert!(is_aligned(64 as *const u8, 64));
        assert!(is_aligned(128 as *const u8, 64));
        assert!(!is_aligned(96 as *const u8, 64));
        assert!(is_aligned(96 as *const u8, 32));
    }

    #[test]
    fn test_horizontal_sum_of_zero_register() {
        assert_eq!(horizontal_sum::<f32>(f32::zero_simd()), 0.0);
        assert_eq!(horizontal_sum::<i32>(i32::zero_simd()), 0);
    }

    #[test]
    fn test_horizontal_sum_counts_every_lane() {
        let ones = Scratch([1.0f64; MAX_LANES]);
        let reg = unsafe { f64::load_simd(ones.0.as_ptr()) };
        assert_eq!(horizontal_sum::<f64>(reg), <f64 as Vectorize>::LANES as f64);
    }
}
