use crate::expr::Expression;
use crate::inline::{bulk_len, horizontal_sum};
use crate::simd::Vectorize;
use crate::traits::Element;

/// Inner product of two equally sized operands.
///
/// Accumulation order is fixed: lane-wise multiply-add over every whole
/// register, lanes summed left to right, then the tail elements folded in by
/// increasing index. Results are therefore reproducible run to run on the same
/// hardware (FMA availability changes rounding across machines).
///
/// Operands are usually `&FixedVec`s, but any expression works:
/// `inner_product(&a + &b, &c)` never materializes `a + b`.
pub fn inner_product<L, R>(lhs: L, rhs: R) -> L::Elem
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
{
    const { assert!(L::LEN == R::LEN, "operands differ in length") };

    let lanes = L::Elem::LANES;
    let bulk = bulk_len(L::LEN, lanes);

    let mut acc = L::Elem::zero_simd();
    for offset in (0..bulk).step_by(lanes) {
        // SAFETY: offset + LANES <= bulk <= LEN and offset is a multiple of LANES.
        let (x, y) = unsafe { (lhs.simd_at(offset), rhs.simd_at(offset)) };
        acc = L::Elem::multiply_add_simd(x, y, acc);
    }

    let mut total = horizontal_sum::<L::Elem>(acc);
    for i in bulk..L::LEN {
        total = lhs.scalar_at(i).mul_add_scalar(rhs.scalar_at(i), total);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::FixedVec;
    use approx::assert_relative_eq;
    use rand::Rng;

    // Naive scalar loop in index order.
    fn naive<T: Element, const N: usize>(a: &FixedVec<T, N>, b: &FixedVec<T, N>) -> T {
        a.iter()
            .zip(b.iter())
            .fold(T::zero(), |acc, (&x, &y)| acc.add_scalar(x.mul_scalar(y)))
    }

    #[test]
    fn test_sum_of_squares_256() {
        let a = FixedVec::<f32, 256>::from_fn(|i| i as f32);
        let b = FixedVec::<f32, 256>::from_fn(|i| i as f32);
        assert_eq!(inner_product(&a, &b), 5_559_680.0);
    }

    #[test]
    fn test_sum_of_squares_integer() {
        let a = FixedVec::<i32, 256>::from_fn(|i| i as i32);
        assert_eq!(inner_product(&a, &a), 5_559_680);
    }

    #[test]
    fn test_tail_sizes_match_naive() {
        fn check<const N: usize>() {
            let a = FixedVec::<f64, N>::from_fn(|i| (i % 13) as f64 - 6.0);
            let b = FixedVec::<f64, N>::from_fn(|i| (i % 7) as f64 + 0.5);
            // Small integers and halves: every partial sum is exact.
            assert_eq!(inner_product(&a, &b), naive(&a, &b), "Failed for N = {}", N);
        }
        check::<1>();
        check::<3>();
        check::<7>();
        check::<8>();
        check::<17>();
        check::<37>();
        check::<100>();
        check::<256>();
        check::<1001>();
    }

    #[test]
    fn test_random_vectors_match_naive() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let a = FixedVec::<f32, 333>::from_fn(|_| rng.gen_range(-1.0..1.0));
            let b = FixedVec::<f32, 333>::from_fn(|_| rng.gen_range(-1.0..1.0));
            assert_relative_eq!(inner_product(&a, &b), naive(&a, &b), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_single_element() {
        let a = FixedVec::<f32, 1>::from([3.0]);
        let b = FixedVec::<f32, 1>::from([-2.0]);
        assert_eq!(inner_product(&a, &b), -6.0);
    }

    #[test]
    fn test_reproducible() {
        let mut rng = rand::thread_rng();
        let a = FixedVec::<f32, 1000>::from_fn(|_| rng.gen_range(-10.0..10.0));
        let b = FixedVec::<f32, 1000>::from_fn(|_| rng.gen_range(-10.0..10.0));
        let first = inner_product(&a, &b);
        for _ in 0..5 {
            assert_eq!(inner_product(&a, &b).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_expression_operands() {
        let a = FixedVec::<f64, 50>::from_fn(|i| i as f64);
        let b = FixedVec::<f64, 50>::ones();
        let sum = (&a + &b).evaluate::<50>();

        assert_eq!(inner_product(&a + &b, &b), inner_product(&sum, &b));
        assert_eq!(inner_product(&a + &b, &b), (1..=50).sum::<i32>() as f64);
    }
}
