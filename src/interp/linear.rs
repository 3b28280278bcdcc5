//! Piecewise-linear continuum with slope-extended boundaries.
//!
//! Straight interpolation through the knots would go flat at the first and
//! last knot, dragging the model down at the spectrum edges. Instead, one
//! synthetic point is added at each end, extrapolated from the slope of the
//! two nearest real knots; beyond the synthetic points evaluation is flat.

use crate::error::ContinuumError;
use crate::interp::{Interpolant, knot_abscissae};
use crate::types::Knot;
use crate::validate::{validate_finite, validate_strictly_increasing};

/// Piecewise-linear interpolant through knot control points, extended at
/// both ends by one slope-extrapolated boundary point.
///
/// # Examples
/// ```
/// use spectral_continuum::{Interpolant, LinearContinuum};
///
/// let model = LinearContinuum::new(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0])?;
/// assert_eq!(model.eval(1.5), 15.0);
/// // The boundary slope continues one segment beyond the outermost knot.
/// assert_eq!(model.eval(0.5), 5.0);
/// # Ok::<(), spectral_continuum::ContinuumError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinearContinuum {
    // Extended arrays: one synthetic point prepended and appended.
    x: Vec<f64>,
    y: Vec<f64>,
}

impl LinearContinuum {
    /// Build the interpolant from ordered control points.
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
                message: format!("linear continuum requires at least 2 knots, got {}", x.len()),
            });
        }
        validate_strictly_increasing(x, "knot wavelengths")?;
        for v in y {
            validate_finite(*v, "knot ordinate")?;
        }

        let n = x.len();
        let mut ext_x = Vec::with_capacity(n + 2);
        let mut ext_y = Vec::with_capacity(n + 2);
        ext_x.push(x[0] - (x[1] - x[0]));
        ext_y.push(y[0] - (y[1] - y[0]));
        ext_x.extend_from_slice(x);
        ext_y.extend_from_slice(y);
        ext_x.push(x[n - 1] + (x[n - 1] - x[n - 2]));
        ext_y.push(y[n - 1] + (y[n - 1] - y[n - 2]));

        Ok(Self { x: ext_x, y: ext_y })
    }

    /// Build the interpolant from a knot list (frozen flags ignored).
    pub fn through_knots(knots: &[Knot]) -> crate::error::Result<Self> {
        let (x, y) = knot_abscissae(knots);
        Self::new(&x, &y)
    }
}

impl Interpolant for LinearContinuum {
    fn eval(&self, x: f64) -> f64 {
        let n = self.x.len();
        // Flat beyond the synthetic boundary points.
        if x <= self.x[0] {
            return self.y[0];
        }
        if x >= self.x[n - 1] {
            return self.y[n - 1];
        }
        let i = self.x.partition_point(|&v| v < x) - 1;
        let t = (x - self.x[i]) / (self.x[i + 1] - self.x[i]);
        self.y[i] + t * (self.y[i + 1] - self.y[i])
    }
}
