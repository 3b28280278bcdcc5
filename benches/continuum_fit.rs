use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use spectral_continuum::{ContinuumFitter, Spectrum, qso_edges};

/// Deterministic sub-percent "noise" without a RNG dependency.
fn ripple(i: usize) -> f64 {
    ((i as f64 * 0.618033988749895).fract() - 0.5) * 0.02
}

/// Synthetic QSO-like spectrum: sloping continuum, periodic absorption
/// troughs, deterministic ripple.
fn generate_spectrum_data(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let wa: Vec<f64> = (0..n)
        .map(|i| 3800.0 + 5000.0 * i as f64 / n as f64)
        .collect();
    let fl: Vec<f64> = wa
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let continuum = 1.0 + 2e-4 * (w - 3800.0);
            let absorption = if i % 97 < 2 { 0.4 } else { 0.0 };
            continuum * (1.0 - absorption) + ripple(i)
        })
        .collect();
    let er = vec![0.02; n];
    (wa, fl, er)
}

fn bench_edge_generation(c: &mut Criterion) {
    let (wa, _, _) = generate_spectrum_data(8192);

    let mut group = c.benchmark_group("edge_generation");
    group.bench_function("qso_z2.5", |b| {
        b.iter(|| qso_edges(black_box(&wa), black_box(2.5), 2.0, 2.0));
    });
    group.bench_function("qso_z2.5_dense", |b| {
        b.iter(|| qso_edges(black_box(&wa), black_box(2.5), 4.0, 4.0));
    });
    group.finish();
}

fn bench_continuum_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("continuum_fit");

    for n in [2048usize, 8192] {
        let (wa, fl, er) = generate_spectrum_data(n);
        group.bench_function(format!("qso_{n}px"), |b| {
            b.iter(|| {
                let spectrum = Spectrum::new(&wa, &fl, &er)
                    .expect("benchmark spectrum should be valid")
                    .with_redshift(2.5);
                ContinuumFitter::new()
                    .fit(black_box(&spectrum))
                    .expect("benchmark fit should converge")
            });
        });
    }
    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let (wa, fl, er) = generate_spectrum_data(8192);
    let spectrum = Spectrum::new(&wa, &fl, &er)
        .expect("benchmark spectrum should be valid")
        .with_redshift(2.5);
    let fit = ContinuumFitter::new()
        .fit(&spectrum)
        .expect("benchmark fit should converge");

    let mut group = c.benchmark_group("resample");
    group.bench_function("8192px", |b| {
        b.iter(|| fit.resample(black_box(&wa)).expect("resample from valid knots"));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_edge_generation,
    bench_continuum_fit,
    bench_resample
);
criterion_main!(benches);
