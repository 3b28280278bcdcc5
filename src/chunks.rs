//! Wavelength chunk edges for the QSO continuum profile.
//!
//! Spline knots are placed at the centers of wavelength chunks. The chunk
//! boundaries come from an empirically tuned rest-frame division table
//! (dense around the quasar emission lines and the Lyman-alpha forest,
//! sparse across the featureless red side), scaled to the observed frame by
//! `(1 + z)` and clipped to the observed wavelength range.
//!
//! Edge generation is deterministic: identical inputs always produce
//! identical edges.

/// Rest-frame division table: (left, right, count) per range, tuned for
/// S/N ≈ 15 and resolving power ≈ 2000. Counts are scaled by the density
/// multipliers before use.
const QSO_DIVISIONS: [(f64, f64, f64); 18] = [
    (500.0, 800.0, 25.0),
    (800.0, 1190.0, 25.0),
    (1190.0, 1213.0, 4.0),
    (1213.0, 1230.0, 6.0),
    (1230.0, 1263.0, 6.0),
    (1263.0, 1290.0, 5.0),
    (1290.0, 1340.0, 5.0),
    (1340.0, 1370.0, 2.0),
    (1370.0, 1410.0, 5.0),
    (1410.0, 1515.0, 5.0),
    (1515.0, 1600.0, 15.0),
    (1600.0, 1800.0, 8.0),
    (1800.0, 1900.0, 5.0),
    (1900.0, 1940.0, 5.0),
    (1940.0, 2240.0, 15.0),
    (2240.0, 3000.0, 25.0),
    (3000.0, 6000.0, 80.0),
    (6000.0, 20000.0, 100.0),
];

/// Leading table rows blueward of Lyman-alpha (the forest side), scaled by
/// `forest_divmult` instead of `divmult`.
const FOREST_ROWS: usize = 2;

/// Rest-frame wavelength bracketing the Lyman-alpha transition when clipping
/// the edge grid to the observed domain.
const LYA_BRACKET: f64 = 1210.0;

/// Generate chunk edges for a QSO spectrum.
///
/// Each table row contributes `ceil(count × multiplier)` evenly spaced
/// chunks; the row's final boundary is supplied by the next row's first, so
/// the concatenated sequence is strictly increasing. The result is clipped
/// to the span of `wavelength` with sorted searches, so the returned edges
/// cover the observed range.
///
/// `wavelength` must be non-empty and sorted ascending (guaranteed by
/// [`Spectrum`](crate::Spectrum)); multipliers must be positive (validated
/// by the fitter).
pub fn qso_edges(wavelength: &[f64], redshift: f64, divmult: f64, forest_divmult: f64) -> Vec<f64> {
    let zp1 = 1.0 + redshift;

    let mut edges = Vec::new();
    for (row, &(left, right, count)) in QSO_DIVISIONS.iter().enumerate() {
        let mult = if row < FOREST_ROWS {
            forest_divmult
        } else {
            divmult
        };
        let n = (count * mult).ceil() as usize;
        let lo = left * zp1;
        let hi = right * zp1;
        // n + 1 evenly spaced boundaries with the last dropped.
        for k in 0..n {
            edges.push(lo + (hi - lo) * k as f64 / n as f64);
        }
    }

    let domain_min = wavelength[0];
    let domain_max = wavelength[wavelength.len() - 1];
    // Three bracket points: domain minimum, observed-frame Lyman-alpha,
    // domain maximum. The usable slice is [i0, i2).
    let i0 = edges.partition_point(|&e| e < domain_min);
    let _lya = edges.partition_point(|&e| e < LYA_BRACKET * zp1);
    let i2 = edges.partition_point(|&e| e < domain_max);

    #[cfg(feature = "logging")]
    tracing::debug!(
        i0,
        lya = _lya,
        i2,
        n_edges = i2.saturating_sub(i0),
        "edge grid clipped to observed domain"
    );

    edges[i0..i2].to_vec()
}
