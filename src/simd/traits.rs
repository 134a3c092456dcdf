pub(crate) mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
}

// Trait for SIMD operations
//
// Maps a scalar to the register type that holds `LANES` of it. Implemented once
// per scalar by whichever backend is compiled in, so the mapping is resolved
// entirely at compile time.
pub trait Vectorize: private::Sealed + Copy {
    type SimdVector: Copy;

    /// Number of scalars held by one `SimdVector`.
    const LANES: usize;

    /// Loads `LANES` contiguous scalars.
    ///
    /// # Safety
    /// `ptr` must be aligned to `align_of::<Self::SimdVector>()` and valid for
    /// reads of `LANES` elements.
    unsafe fn load_simd(ptr: *const Self) -> Self::SimdVector;

    /// Stores a full register.
    ///
    /// # Safety
    /// `ptr` must be aligned to `align_of::<Self::SimdVector>()` and valid for
    /// writes of `LANES` elements.
    unsafe fn store_simd(ptr: *mut Self, vec: Self::SimdVector);

    fn zero_simd() -> Self::SimdVector;
    fn add_simd(a: Self::SimdVector, b: Self::SimdVector) -> Self::SimdVector;
    fn subtract_simd(a: Self::SimdVector, b: Self::SimdVector) -> Self::SimdVector;
    fn multiply_simd(a: Self::SimdVector, b: Self::SimdVector) -> Self::SimdVector;

    /// `a * b + acc`, fused when the target has FMA.
    fn multiply_add_simd(
        a: Self::SimdVector,
        b: Self::SimdVector,
        acc: Self::SimdVector,
    ) -> Self::SimdVector;
}
