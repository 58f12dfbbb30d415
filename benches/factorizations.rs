use criterion::{criterion_group, criterion_main, Criterion};
use lamina::{bidiagonal_svd, householder_qr, schur_form, Matrix};

fn symmetric(n: usize) -> Matrix<f64> {
    let a = Matrix::from_fn(n, n, |i, j| ((i + 1) * (j + 1)) as f64 + if i == j { 10.0 } else { 0.0 });
    let at = a.transposed();
    &a * &at
}

fn matmul(c: &mut Criterion) {
    let mut g = c.benchmark_group("matmul");

    for n in [4usize, 8, 16] {
        g.bench_function(format!("{n}x{n}"), |b| {
            let lhs = Matrix::from_fn(n, n, |i, j| (i * n + j + 1) as f64);
            let rhs = Matrix::from_fn(n, n, |i, j| (i + j + 1) as f64);
            b.iter(|| std::hint::black_box(&lhs) * std::hint::black_box(&rhs))
        });
    }

    g.finish();
}

fn transpose_in_place(c: &mut Criterion) {
    let mut g = c.benchmark_group("transpose");

    g.bench_function("rect_32x48", |b| {
        let m = Matrix::from_fn(32, 48, |i, j| (i * 48 + j) as f64);
        b.iter(|| {
            let mut work = std::hint::black_box(&m).clone();
            work.transpose();
            work
        })
    });

    g.finish();
}

fn qr(c: &mut Criterion) {
    let mut g = c.benchmark_group("householder_qr");

    for n in [3usize, 6, 12] {
        g.bench_function(format!("{n}x{n}"), |b| {
            let a = symmetric(n);
            b.iter(|| householder_qr(std::hint::black_box(&a).view()))
        });
    }

    g.finish();
}

fn schur(c: &mut Criterion) {
    let mut g = c.benchmark_group("schur_form");

    g.bench_function("4x4_default_budget", |b| {
        let a = symmetric(4);
        b.iter(|| schur_form(std::hint::black_box(&a).view()))
    });

    g.finish();
}

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("bidiagonal_svd");

    g.bench_function("2x2_default_budget", |b| {
        let m = Matrix::new(&[[3.0_f64, 1.0], [0.0, 2.0]]);
        b.iter(|| bidiagonal_svd(std::hint::black_box(&m).view()))
    });

    g.finish();
}

criterion_group!(benches, matmul, transpose_in_place, qr, schur, svd);
criterion_main!(benches);
