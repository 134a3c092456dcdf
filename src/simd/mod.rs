//! Register abstraction layer.
//!
//! Exactly one backend is compiled in, chosen from the target features of the
//! build (widest first):
//!
//! | target features | `f32`    | `f64`     | `i32`     |
//! |-----------------|----------|-----------|-----------|
//! | `avx512f`       | `__m512` | `__m512d` | `__m512i` |
//! | `avx2`          | `__m256` | `__m256d` | `__m256i` |
//! | otherwise       | `Lanes<f32, 16>` | `Lanes<f64, 8>` | `Lanes<i32, 16>` |
//!
//! Enable a wider backend with e.g. `RUSTFLAGS="-C target-feature=+avx2,+fma"`
//! or `-C target-cpu=native`.

pub mod traits;

#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
mod avx512;
#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
use avx512 as backend;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(target_feature = "avx512f")
))]
mod avx2;
#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(target_feature = "avx512f")
))]
use avx2 as backend;

#[cfg(not(all(
    target_arch = "x86_64",
    any(target_feature = "avx2", target_feature = "avx512f")
)))]
pub mod portable;
#[cfg(not(all(
    target_arch = "x86_64",
    any(target_feature = "avx2", target_feature = "avx512f")
)))]
use portable as backend;

pub use traits::Vectorize;

/// Size in bytes of one register of the compiled-in backend.
pub const REGISTER_BYTES: usize = backend::REGISTER_BYTES;

// Upper bound on lanes of any element type, sizes the horizontal-sum scratch.
pub const MAX_LANES: usize = REGISTER_BYTES / std::mem::size_of::<f32>();

/// Which register family the crate was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Avx512,
    Avx2,
    Portable,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Avx512 => "avx512f",
            Backend::Avx2 => "avx2",
            Backend::Portable => "portable",
        }
    }

    pub const fn register_bits(self) -> usize {
        match self {
            Backend::Avx512 | Backend::Portable => 512,
            Backend::Avx2 => 256,
        }
    }
}

pub const BACKEND: Backend = if cfg!(all(target_arch = "x86_64", target_feature = "avx512f")) {
    Backend::Avx512
} else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
    Backend::Avx2
} else {
    Backend::Portable
};
