//! Fixed-size numeric vectors evaluated with wide SIMD registers.
//!
//! Arithmetic on [`FixedVec`] references builds lazy expression nodes; nothing
//! is computed until the expression is assigned into a destination vector,
//! at which point the whole tree is evaluated one register at a time.
//!
//! ```
//! use simvec::FixedVec;
//!
//! let a = FixedVec::<f32, 256>::splat(1.0);
//! let b = FixedVec::<f32, 256>::splat(2.0);
//! let c = FixedVec::<f32, 256>::splat(0.5);
//!
//! let mut out = FixedVec::<f32, 256>::new();
//! out.assign(&a + &b - &c);
//! assert!(out.iter().all(|&x| x == 2.5));
//! assert_eq!(simvec::inner_product(&a, &b), 512.0);
//! ```
//!
//! Operands must agree on element type and length, both checked at compile time:
//!
//! ```compile_fail
//! use simvec::FixedVec;
//!
//! let a = FixedVec::<f32, 16>::new();
//! let b = FixedVec::<f64, 16>::new();
//! let _ = &a + &b;
//! ```
//!
//! ```compile_fail
//! use simvec::FixedVec;
//!
//! let a = FixedVec::<f32, 16>::new();
//! let b = FixedVec::<f32, 32>::new();
//! let mut out = FixedVec::<f32, 16>::new();
//! out.assign(&a + &b);
//! ```

pub mod error;
pub mod expr;
pub mod inline;
pub mod reduce;
pub mod simd;
pub mod traits;
pub mod vector;

pub use error::SimvecError;
pub use expr::Expression;
pub use reduce::inner_product;
pub use traits::Element;
pub use vector::FixedVec;

// Buffer alignment, large enough for the widest register (512 bits).
pub const ALIGNMENT: usize = 64;
