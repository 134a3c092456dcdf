//! Fixed-length, register-aligned numeric vector.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::ops::{self, Deref, DerefMut, Index, IndexMut};
use std::slice::{Iter, IterMut};

use aligned_vec::{AVec, ConstAlign};
use log::{debug, trace};

use crate::error::{Result, SimvecError};
use crate::expr::Expression;
use crate::inline::bulk_len;
use crate::reduce::inner_product;
use crate::traits::Element;
use crate::ALIGNMENT;

/// Aligned storage a [`FixedVec`] can adopt without copying.
pub type AlignedBuf<T> = AVec<T, ConstAlign<ALIGNMENT>>;

/// # FixedVec
///
/// Exactly `N` elements of `T` in a buffer aligned to [`ALIGNMENT`] bytes.
///
/// ## Purpose
/// The leaf of every expression. `&a + &b` does not compute anything, it
/// returns an expression node; the work happens in [`FixedVec::assign`], which
/// walks the destination one register at a time and stores each evaluated
/// register straight into the buffer. Elements past the last whole register
/// are computed one by one.
///
/// ## Ownership
/// The buffer is owned exclusively. There is no `Clone`: duplicating a large
/// aligned buffer should be an explicit `FixedVec::from_fn(|i| v[i])` or
/// `(&v + &zeros).evaluate()`. Moving the vector moves the buffer pointer only.
pub struct FixedVec<T: Element, const N: usize> {
    buf: AlignedBuf<T>,
}

impl<T: Element, const N: usize> FixedVec<T, N> {
    pub const SIZE: usize = N;

    /// Allocates a zero-filled vector.
    #[inline]
    pub fn new() -> Self {
        Self::zeros()
    }

    pub fn zeros() -> Self {
        Self::splat(T::zero())
    }

    pub fn ones() -> Self {
        Self::splat(T::one())
    }

    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value)
    }

    /// Builds the vector from `f(0), f(1), ..., f(N - 1)`.
    pub fn from_fn(mut f: impl FnMut(usize) -> T) -> Self {
        let mut buf = AlignedBuf::with_capacity(ALIGNMENT, N);
        for i in 0..N {
            buf.push(f(i));
        }
        trace!(
            "allocated FixedVec<{}, {}> at {:p}",
            std::any::type_name::<T>(),
            N,
            buf.as_ptr()
        );
        Self { buf }
    }

    /// Takes ownership of pre-allocated aligned storage.
    ///
    /// The alignment is carried by the buffer type; only the length is
    /// checked.
    pub fn from_avec(buf: AlignedBuf<T>) -> Result<Self> {
        if buf.len() != N {
            debug!("rejected buffer of {} elements for FixedVec of {}", buf.len(), N);
            return Err(SimvecError::LengthMismatch {
                expected: N,
                found: buf.len(),
            });
        }
        trace!("adopted buffer at {:p} as FixedVec of {}", buf.as_ptr(), N);
        Ok(Self { buf })
    }

    /// Releases the underlying buffer.
    pub fn into_inner(self) -> AlignedBuf<T> {
        self.buf
    }

    /// Allocates a vector holding the evaluated expression.
    pub fn from_expr<E: Expression<Elem = T>>(expr: E) -> Self {
        let mut out = Self::new();
        out.assign(expr);
        out
    }

    #[inline(always)]
    pub const fn size(&self) -> usize {
        N
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// # Safety
    /// `index < N`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < N, "index {index} out of range for FixedVec of {N}");
        unsafe { self.buf.get_unchecked(index) }
    }

    /// # Safety
    /// `index < N`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < N, "index {index} out of range for FixedVec of {N}");
        unsafe { self.buf.get_unchecked_mut(index) }
    }

    /// Overwrites every element with the evaluated expression.
    ///
    /// Whole registers are evaluated and stored for `0..bulk_len(N, LANES)`;
    /// the remaining `N % LANES` elements are evaluated one at a time.
    pub fn assign<E: Expression<Elem = T>>(&mut self, expr: E) {
        const { assert!(E::LEN == N, "expression length differs from destination") };

        let bulk = bulk_len(N, T::LANES);
        let dst = self.buf.as_mut_ptr();
        for offset in (0..bulk).step_by(T::LANES) {
            // SAFETY: offset is a whole number of registers into an aligned
            // buffer of N >= offset + LANES elements.
            unsafe { T::store_simd(dst.add(offset), expr.simd_at(offset)) };
        }
        for i in bulk..N {
            self.buf[i] = expr.scalar_at(i);
        }
    }

    /// Inner product with `other`, see [`inner_product`].
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        inner_product(self, other)
    }

    // Read-modify-write counterpart of `assign` behind the compound operators.
    fn zip_assign<E>(
        &mut self,
        rhs: E,
        simd: impl Fn(T::SimdVector, T::SimdVector) -> T::SimdVector,
        scalar: impl Fn(T, T) -> T,
    ) where
        E: Expression<Elem = T>,
    {
        const { assert!(E::LEN == N, "expression length differs from destination") };

        let bulk = bulk_len(N, T::LANES);
        let dst = self.buf.as_mut_ptr();
        for offset in (0..bulk).step_by(T::LANES) {
            // SAFETY: same layout argument as `assign`.
            unsafe {
                let p = dst.add(offset);
                T::store_simd(p, simd(T::load_simd(p), rhs.simd_at(offset)));
            }
        }
        for i in bulk..N {
            self.buf[i] = scalar(self.buf[i], rhs.scalar_at(i));
        }
    }
}

impl<T: Element, const N: usize> Default for FixedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, const N: usize> Index<usize> for FixedVec<T, N> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.buf[index]
    }
}

impl<T: Element, const N: usize> IndexMut<usize> for FixedVec<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.buf[index]
    }
}

impl<T: Element, const N: usize> Deref for FixedVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T: Element, const N: usize> DerefMut for FixedVec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Element, const N: usize> AsRef<[T]> for FixedVec<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buf
    }
}

impl<T: Element, const N: usize> AsMut<[T]> for FixedVec<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<'a, T: Element, const N: usize> IntoIterator for &'a FixedVec<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

impl<'a, T: Element, const N: usize> IntoIterator for &'a mut FixedVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter_mut()
    }
}

impl<T: Element, const N: usize> From<[T; N]> for FixedVec<T, N> {
    fn from(values: [T; N]) -> Self {
        Self::from_fn(|i| values[i])
    }
}

impl<T: Element, const N: usize> TryFrom<&[T]> for FixedVec<T, N> {
    type Error = SimvecError;

    fn try_from(values: &[T]) -> Result<Self> {
        if values.len() != N {
            debug!("rejected slice of {} elements for FixedVec of {}", values.len(), N);
            return Err(SimvecError::LengthMismatch {
                expected: N,
                found: values.len(),
            });
        }
        Ok(Self::from_fn(|i| values[i]))
    }
}

impl<T: Element, const N: usize> TryFrom<AlignedBuf<T>> for FixedVec<T, N> {
    type Error = SimvecError;

    fn try_from(buf: AlignedBuf<T>) -> Result<Self> {
        Self::from_avec(buf)
    }
}

impl<T: Element, const N: usize> PartialEq for FixedVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element, const N: usize> Debug for FixedVec<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

impl<T: Element, const N: usize> Display for FixedVec<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[")?;
        for (i, item) in self.buf.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

macro_rules! compound_assign {
    ($op:ident, $method:ident, $simd:ident, $scalar:ident) => {
        impl<T: Element, const N: usize, E> ops::$op<E> for FixedVec<T, N>
        where
            E: Expression<Elem = T>,
        {
            #[inline]
            fn $method(&mut self, rhs: E) {
                self.zip_assign(rhs, T::$simd, T::$scalar);
            }
        }
    };
}

compound_assign!(AddAssign, add_assign, add_simd, add_scalar);
compound_assign!(SubAssign, sub_assign, subtract_simd, sub_scalar);
compound_assign!(MulAssign, mul_assign, multiply_simd, mul_scalar);
