//! Core value types for continuum estimation.
//!
//! A fit is described by a list of [`Knot`]s (spline control points) and a
//! parallel list of [`IndexRange`]s (the pixels anchoring each knot). The two
//! lists are kept aligned by [`KnotSet`](crate::knots::KnotSet); these types
//! are plain data.

use serde::{Deserialize, Serialize};

/// A spline control point: a chunk-center wavelength, the current continuum
/// estimate there, and whether the estimate has been frozen.
///
/// Once `frozen` is set the knot's ordinate is never recomputed for the
/// remainder of a fit.
///
/// # Examples
/// ```
/// use spectral_continuum::Knot;
/// let knot = Knot::at(4300.5);
/// assert_eq!(knot.x, 4300.5);
/// assert!(!knot.frozen);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    /// Wavelength of the control point (chunk center).
    pub x: f64,
    /// Current continuum estimate at `x`.
    pub y: f64,
    /// Whether the estimate is frozen for the rest of the fit.
    pub frozen: bool,
}

impl Knot {
    /// A fresh, unfrozen knot at the given wavelength with no estimate yet.
    pub fn at(x: f64) -> Self {
        Self {
            x,
            y: 0.0,
            frozen: false,
        }
    }
}

/// Half-open pixel range `[start, end)` into the spectrum arrays,
/// identifying the pixels that belong to one wavelength chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    /// First pixel index in the chunk.
    pub start: usize,
    /// One past the last pixel index in the chunk.
    pub end: usize,
}

impl IndexRange {
    /// Number of pixels in the chunk.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the chunk contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Iterator over the pixel indices in the chunk.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
