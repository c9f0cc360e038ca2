use blasprobe_blas::{level1, level2, level3, Layout, Queue, Transpose};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vec(rng: &mut StdRng, len: usize) -> Vec<f32> {
    (0..len).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}

fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot");
    let mut rng = StdRng::seed_from_u64(1);
    let mut queue = Queue::new(1);
    for &n in &[64, 256, 1024, 4096, 16384] {
        let x = random_vec(&mut rng, n);
        let y = random_vec(&mut rng, n);
        let mut out = vec![0.0f32];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| level1::dot(&mut queue, n, &mut out, 0, &x, 0, 1, &y, 0, 1));
        });
    }
    group.finish();
}

fn bench_axpy(c: &mut Criterion) {
    let mut group = c.benchmark_group("axpy");
    let mut rng = StdRng::seed_from_u64(2);
    let mut queue = Queue::new(1);
    for &n in &[64, 256, 1024, 4096, 16384] {
        let x = random_vec(&mut rng, n);
        let mut y = random_vec(&mut rng, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| level1::axpy(&mut queue, n, 2.0, &x, 0, 1, &mut y, 0, 1));
        });
    }
    group.finish();
}

fn bench_gemv(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemv");
    let mut rng = StdRng::seed_from_u64(3);
    let mut queue = Queue::new(1);
    for &n in &[64, 256, 1024] {
        let a = random_vec(&mut rng, n * n);
        let x = random_vec(&mut rng, n);
        let mut y = vec![0.0f32; n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                level2::gemv(
                    &mut queue,
                    Layout::RowMajor,
                    Transpose::No,
                    n,
                    n,
                    1.0,
                    &a,
                    0,
                    n,
                    &x,
                    0,
                    1,
                    0.0,
                    &mut y,
                    0,
                    1,
                )
            });
        });
    }
    group.finish();
}

fn bench_gemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm");
    let mut rng = StdRng::seed_from_u64(4);
    let mut queue = Queue::default();
    for &n in &[32, 64, 128, 256] {
        let a = random_vec(&mut rng, n * n);
        let b = random_vec(&mut rng, n * n);
        let mut c_mat = vec![0.0f32; n * n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter(|| {
                level3::gemm(
                    &mut queue,
                    Layout::RowMajor,
                    Transpose::No,
                    Transpose::No,
                    n,
                    n,
                    n,
                    1.0,
                    &a,
                    0,
                    n,
                    &b,
                    0,
                    n,
                    0.0,
                    &mut c_mat,
                    0,
                    n,
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dot, bench_axpy, bench_gemv, bench_gemm);
criterion_main!(benches);
