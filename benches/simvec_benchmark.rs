use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use simvec::simd::BACKEND;
use simvec::{inner_product, FixedVec};

const N: usize = 1 << 14;

fn random_vec(rng: &mut impl Rng) -> FixedVec<f32, N> {
    FixedVec::from_fn(|_| rng.gen_range(-1.0..1.0))
}

fn bench_chained_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("a_plus_b_minus_c");
    group.sample_size(100);

    let mut rng = rand::thread_rng();
    let a = random_vec(&mut rng);
    let b = random_vec(&mut rng);
    let d = random_vec(&mut rng);
    let mut out = FixedVec::<f32, N>::new();

    group.bench_with_input(BenchmarkId::new(BACKEND.name(), N), &N, |bench, _| {
        bench.iter(|| {
            out.assign(black_box(&a) + black_box(&b) - black_box(&d));
        })
    });

    // Same arithmetic, one plain loop per element.
    group.bench_with_input(BenchmarkId::new("scalar", N), &N, |bench, _| {
        bench.iter(|| {
            for i in 0..N {
                out[i] = black_box(a[i]) + b[i] - d[i];
            }
        })
    });
    group.finish();
}

fn bench_inner_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("inner_product");

    let mut rng = rand::thread_rng();
    let a = random_vec(&mut rng);
    let b = random_vec(&mut rng);

    group.bench_with_input(BenchmarkId::new(BACKEND.name(), N), &N, |bench, _| {
        bench.iter(|| inner_product(black_box(&a), black_box(&b)))
    });

    group.bench_with_input(BenchmarkId::new("scalar", N), &N, |bench, _| {
        bench.iter(|| {
            black_box(&a)
                .iter()
                .zip(black_box(&b).iter())
                .fold(0.0f32, |acc, (x, y)| acc + x * y)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_chained_expression, bench_inner_product);
criterion_main!(benches);
