//! Akima spline interpolation.
//!
//! A C¹-continuous piecewise cubic through ordered control points. Segment
//! slopes are blended with weights proportional to the change in slope of
//! the neighboring segments, which keeps the curve from overshooting near
//! sharp local extrema, where a natural cubic spline would ring on strong
//! emission lines.
//!
//! # Algorithm
//!
//! Segment slopes are extended past each boundary with the standard
//! two-point rule (`m₋₁ = 2m₀ − m₁`, `m₋₂ = 2m₋₁ − m₀`, mirrored on the
//! right), a blended derivative is computed per control point, and each
//! interval stores Hermite cubic coefficients evaluated in Horner form.
//! Outside the control-point domain the boundary interval's cubic is
//! evaluated directly, so the interpolant is defined on the whole real line.
//!
//! # References
//! - Akima, H. "A New Method of Interpolation and Smooth Curve Fitting
//!   Based on Local Procedures" (1970)

use serde::{Deserialize, Serialize};

use crate::error::ContinuumError;
use crate::interp::{Interpolant, knot_abscissae};
use crate::types::Knot;
use crate::validate::{validate_finite, validate_strictly_increasing};

/// Two neighboring slopes are considered equal when their blending weights
/// sum below this; the derivative falls back to their plain average.
const WEIGHT_EPS: f64 = 1e-9;

/// Akima C¹ piecewise-cubic interpolant through ordered control points.
///
/// # Examples
/// ```
/// use spectral_continuum::{AkimaSpline, Interpolant};
///
/// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = vec![1.0, 1.2, 0.9, 1.1, 1.0];
/// let spline = AkimaSpline::new(&x, &y)?;
/// assert!((spline.eval(3.0) - 0.9).abs() < 1e-12);
/// # Ok::<(), spectral_continuum::ContinuumError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AkimaSpline {
    x: Vec<f64>,
    // Per-interval Hermite cubic [value, deriv, quad, cubic].
    coeffs: Vec<[f64; 4]>,
}

impl AkimaSpline {
    /// Build the spline from ordered control points.
    ///
    /// Two points degenerate to a straight line. Three or more use the full
    /// Akima construction.
    ///
    /// # Errors
    /// Returns [`ContinuumError::InvalidInput`] if fewer than 2 points are
    /// given, lengths differ, abscissae are not strictly increasing, or any
    /// ordinate is non-finite.
    pub fn new(x: &[f64], y: &[f64]) -> crate::error::Result<Self> {
        if x.len() != y.len() {
            return Err(ContinuumError::InvalidInput {
                message: format!(
                    "control point arrays must have the same length, got {} and {}",
                    x.len(),
                    y.len()
                ),
            });
        }
        if x.len() < 2 {
            return Err(ContinuumError::InvalidInput {
                message: format!("Akima spline requires at least 2 knots, got {}", x.len()),
            });
        }
        validate_strictly_increasing(x, "knot wavelengths")?;
        for v in y {
            validate_finite(*v, "knot ordinate")?;
        }

        let n = x.len();
        if n == 2 {
            let slope = (y[1] - y[0]) / (x[1] - x[0]);
            return Ok(Self {
                x: x.to_vec(),
                coeffs: vec![[y[0], slope, 0.0, 0.0]],
            });
        }

        // Segment slopes with two extension slots on each side.
        let mut m = Vec::with_capacity(n + 3);
        m.push(0.0);
        m.push(0.0);
        for i in 0..n - 1 {
            m.push((y[i + 1] - y[i]) / (x[i + 1] - x[i]));
        }
        m[1] = 2.0 * m[2] - m[3];
        m[0] = 2.0 * m[1] - m[2];
        let last = m[n];
        let prev = m[n - 1];
        m.push(2.0 * last - prev);
        m.push(2.0 * (2.0 * last - prev) - last);

        // Blended derivative at each control point.
        let mut t = Vec::with_capacity(n);
        for i in 0..n {
            let w1 = (m[i + 3] - m[i + 2]).abs();
            let w2 = (m[i + 1] - m[i]).abs();
            t.push(if w1 + w2 < WEIGHT_EPS {
                0.5 * (m[i + 1] + m[i + 2])
            } else {
                (w1 * m[i + 1] + w2 * m[i + 2]) / (w1 + w2)
            });
        }

        let mut coeffs = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let h = x[i + 1] - x[i];
            let s = m[i + 2];
            coeffs.push([
                y[i],
                t[i],
                (3.0 * s - 2.0 * t[i] - t[i + 1]) / h,
                (t[i] + t[i + 1] - 2.0 * s) / (h * h),
            ]);
        }

        Ok(Self {
            x: x.to_vec(),
            coeffs,
        })
    }

    /// Build the spline from a knot list (frozen flags ignored).
    pub fn through_knots(knots: &[Knot]) -> crate::error::Result<Self> {
        let (x, y) = knot_abscissae(knots);
        Self::new(&x, &y)
    }
}

impl Interpolant for AkimaSpline {
    fn eval(&self, x: f64) -> f64 {
        // Clamp to the boundary interval outside the domain.
        let i = self
            .x
            .partition_point(|&v| v < x)
            .saturating_sub(1)
            .min(self.coeffs.len() - 1);
        let dx = x - self.x[i];
        let [c0, c1, c2, c3] = self.coeffs[i];
        c0 + dx * (c1 + dx * (c2 + dx * c3))
    }
}
