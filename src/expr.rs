//! Lazy elementwise expressions.
//!
//! `&a + &b - &c` builds `Sub<Add<&A, &B>, &C>` without touching any element.
//! The tree is evaluated when it is handed to [`FixedVec::assign`] (or one of
//! the compound assignment operators), one register-wide slice at a time, so
//! no intermediate vector is ever materialized.
//!
//! Leaves are borrowed vectors and interior nodes hold their children by
//! value. A node is a handful of references, and the borrow checker keeps it
//! from outliving the vectors it reads.

use std::ops;

use crate::simd::Vectorize;
use crate::traits::Element;
use crate::vector::FixedVec;

/// Anything that can produce `LEN` elements of `Elem`, a register or a
/// scalar at a time.
pub trait Expression: Sized {
    type Elem: Element;

    const LEN: usize;

    /// Register-wide slice starting at element `offset`.
    ///
    /// # Safety
    /// `offset` must be a multiple of `Self::Elem::LANES` and
    /// `offset + LANES <= LEN`.
    unsafe fn simd_at(&self, offset: usize) -> <Self::Elem as Vectorize>::SimdVector;

    /// Single element at `index`. Panics if `index >= LEN`.
    fn scalar_at(&self, index: usize) -> Self::Elem;

    /// Materializes the expression into a freshly allocated vector.
    ///
    /// `N` must equal `Self::LEN`; a different length fails to build. When the
    /// destination type is already spelled out, prefer
    /// [`FixedVec::from_expr`], which needs no turbofish:
    ///
    /// ```
    /// use simvec::{Expression, FixedVec};
    ///
    /// let a = FixedVec::<f64, 10>::splat(1.5);
    /// let b = FixedVec::<f64, 10>::splat(2.0);
    ///
    /// let via_ctor = FixedVec::<f64, 10>::from_expr(&a * &b);
    /// let via_expr = (&a * &b).evaluate::<10>();
    /// assert_eq!(via_ctor, via_expr);
    /// assert!(via_ctor.iter().all(|&x| x == 3.0));
    /// ```
    fn evaluate<const N: usize>(self) -> FixedVec<Self::Elem, N> {
        FixedVec::from_expr(self)
    }
}

impl<'a, T: Element, const N: usize> Expression for &'a FixedVec<T, N> {
    type Elem = T;

    const LEN: usize = N;

    #[inline(always)]
    unsafe fn simd_at(&self, offset: usize) -> T::SimdVector {
        debug_assert!(offset % T::LANES == 0 && offset + T::LANES <= N);
        // SAFETY: the buffer is ALIGNMENT-aligned and offset is a whole number
        // of registers into it, so the address is register-aligned.
        unsafe { T::load_simd(self.as_ptr().add(offset)) }
    }

    #[inline(always)]
    fn scalar_at(&self, index: usize) -> T {
        self[index]
    }
}

macro_rules! binary_expression {
    ($(#[$doc:meta])* $name:ident, $simd:ident, $scalar:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<L, R> {
            lhs: L,
            rhs: R,
        }

        impl<L, R> $name<L, R>
        where
            L: Expression,
            R: Expression<Elem = L::Elem>,
        {
            #[inline(always)]
            pub fn new(lhs: L, rhs: R) -> Self {
                const { assert!(L::LEN == R::LEN, "operands differ in length") };
                Self { lhs, rhs }
            }
        }

        impl<L, R> Expression for $name<L, R>
        where
            L: Expression,
            R: Expression<Elem = L::Elem>,
        {
            type Elem = L::Elem;

            const LEN: usize = L::LEN;

            #[inline(always)]
            unsafe fn simd_at(&self, offset: usize) -> <L::Elem as Vectorize>::SimdVector {
                // SAFETY: both operands share LEN, the caller upholds the offset contract.
                unsafe { L::Elem::$simd(self.lhs.simd_at(offset), self.rhs.simd_at(offset)) }
            }

            #[inline(always)]
            fn scalar_at(&self, index: usize) -> L::Elem {
                self.lhs.scalar_at(index).$scalar(self.rhs.scalar_at(index))
            }
        }
    };
}

binary_expression!(
    /// Pending elementwise `lhs + rhs`.
    Add, add_simd, add_scalar
);
binary_expression!(
    /// Pending elementwise `lhs - rhs`.
    Sub, subtract_simd, sub_scalar
);
binary_expression!(
    /// Pending elementwise `lhs * rhs`.
    Mul, multiply_simd, mul_scalar
);

// Operators on borrowed vectors start a tree.
macro_rules! vector_operator {
    ($op:ident, $method:ident, $node:ident) => {
        impl<'a, T: Element, const N: usize, Rhs> ops::$op<Rhs> for &'a FixedVec<T, N>
        where
            Rhs: Expression<Elem = T>,
        {
            type Output = $node<&'a FixedVec<T, N>, Rhs>;

            #[inline(always)]
            fn $method(self, rhs: Rhs) -> Self::Output {
                $node::new(self, rhs)
            }
        }
    };
}

vector_operator!(Add, add, Add);
vector_operator!(Sub, sub, Sub);
vector_operator!(Mul, mul, Mul);

// Operators on nodes extend a tree.
macro_rules! node_operator {
    ($lhs:ident; $($op:ident, $method:ident, $node:ident);+) => {
        $(
            impl<L, R, Rhs> ops::$op<Rhs> for $lhs<L, R>
            where
                L: Expression,
                R: Expression<Elem = L::Elem>,
                Rhs: Expression<Elem = L::Elem>,
            {
                type Output = $node<$lhs<L, R>, Rhs>;

                #[inline(always)]
                fn $method(self, rhs: Rhs) -> Self::Output {
                    $node::new(self, rhs)
                }
            }
        )+
    };
}

node_operator!(Add; Add, add, Add; Sub, sub, Sub; Mul, mul, Mul);
node_operator!(Sub; Add, add, Add; Sub, sub, Sub; Mul, mul, Mul);
node_operator!(Mul; Add, add, Add; Sub, sub, Sub; Mul, mul, Mul);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Zero;
    use approx::assert_relative_eq;
    use rand::Rng;

    const EPSILON: f32 = 1e-5;

    fn random_vec<const N: usize>(rng: &mut impl Rng) -> FixedVec<f32, N> {
        FixedVec::from_fn(|_| rng.gen_range(-100.0..100.0))
    }

    #[test]
    fn test_add_is_elementwise() {
        let mut rng = rand::thread_rng();
        let a = random_vec::<256>(&mut rng);
        let b = random_vec::<256>(&mut rng);

        let mut sum = FixedVec::<f32, 256>::new();
        sum.assign(&a + &b);
        for i in 0..256 {
            assert_eq!(sum[i], a[i] + b[i], "Failed at index {}", i);
        }
    }

    #[test]
    fn test_add_commutes() {
        let mut rng = rand::thread_rng();
        let a = random_vec::<100>(&mut rng);
        let b = random_vec::<100>(&mut rng);

        let ab = (&a + &b).evaluate::<100>();
        let ba = (&b + &a).evaluate::<100>();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_add_associates_within_rounding() {
        let mut rng = rand::thread_rng();
        let a = random_vec::<64>(&mut rng);
        let b = random_vec::<64>(&mut rng);
        let c = random_vec::<64>(&mut rng);

        let left = ((&a + &b) + &c).evaluate::<64>();
        let right = (&a + (&b + &c)).evaluate::<64>();
        for (l, r) in left.iter().zip(right.iter()) {
            assert_relative_eq!(*l, *r, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_zero_is_identity() {
        let mut rng = rand::thread_rng();
        let a = random_vec::<37>(&mut rng);
        let zero = FixedVec::<f32, 37>::zeros();

        let same = (&a + &zero).evaluate::<37>();
        assert_eq!(same, a);
    }

    #[test]
    fn test_self_difference_is_zero() {
        let mut rng = rand::thread_rng();
        let a = random_vec::<50>(&mut rng);

        let diff = (&a - &a).evaluate::<50>();
        assert!(diff.iter().all(|x| x.is_zero()));
    }

    #[test]
    fn test_chained_expressions_match_scalar() {
        let mut rng = rand::thread_rng();
        let a = random_vec::<123>(&mut rng);
        let b = random_vec::<123>(&mut rng);
        let c = random_vec::<123>(&mut rng);

        let mut out = FixedVec::<f32, 123>::new();
        out.assign(&a + &b - &c);
        for i in 0..123 {
            assert_relative_eq!(out[i], a[i] + b[i] - c[i], epsilon = EPSILON);
        }

        out.assign(&a - &b + &c * &a);
        for i in 0..123 {
            assert_relative_eq!(out[i], a[i] - b[i] + c[i] * a[i], epsilon = 1e-2);
        }
    }

    #[test]
    fn test_multiply_nests_on_the_right() {
        let a = FixedVec::<f64, 20>::from_fn(|i| i as f64);
        let b = FixedVec::<f64, 20>::splat(2.0);
        let c = FixedVec::<f64, 20>::splat(3.0);

        let out = (&a * (&b + &c)).evaluate::<20>();
        for i in 0..20 {
            assert_eq!(out[i], i as f64 * 5.0);
        }
    }

    #[test]
    fn test_scalar_at_matches_simd_at() {
        let a = FixedVec::<i32, 32>::from_fn(|i| i as i32);
        let b = FixedVec::<i32, 32>::splat(7);
        let expr = &a * &b - &a;

        let lanes = <i32 as Vectorize>::LANES;
        let mut block = FixedVec::<i32, 32>::new();
        for offset in (0..32).step_by(lanes) {
            let reg = unsafe { expr.simd_at(offset) };
            unsafe { i32::store_simd(block.as_mut_ptr().add(offset), reg) };
        }
        for i in 0..32 {
            assert_eq!(block[i], expr.scalar_at(i));
            assert_eq!(block[i], 6 * i as i32);
        }
    }

    #[test]
    fn test_expression_is_lazy_and_copyable() {
        let a = FixedVec::<f32, 16>::splat(1.0);
        let b = FixedVec::<f32, 16>::splat(2.0);
        let expr = &a + &b;
        let again = expr;

        assert_eq!(expr.scalar_at(3), 3.0);
        assert_eq!(again.evaluate::<16>()[15], 3.0);
    }

    #[test]
    fn test_evaluate_matches_from_expr() {
        let a = FixedVec::<i32, 19>::from_fn(|i| i as i32);
        let b = FixedVec::<i32, 19>::splat(-3);

        let via_ctor = FixedVec::<i32, 19>::from_expr(&a * &b + &a);
        let via_expr = (&a * &b + &a).evaluate::<19>();
        assert_eq!(via_ctor, via_expr);
        assert_eq!(via_ctor[18], -36);
    }
}
