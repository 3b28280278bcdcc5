//! Knot initialization and pruning.
//!
//! Each wavelength chunk anchors one spline knot at its center. [`KnotSet`]
//! owns the knot list and the parallel pixel-range list behind one type so
//! the two can never fall out of alignment: every pruning operation removes
//! entries from both at the same positions.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::ContinuumError;
use crate::spectrum::Spectrum;
use crate::stats::median;
use crate::types::{IndexRange, Knot};

/// A chunk's median flux must exceed this multiple of its median error for
/// the chunk to anchor a knot.
const MIN_SNR_FACTOR: f64 = 2.0;

/// Ordered knots with their pixel ranges, always of equal length.
#[derive(Debug, Clone)]
pub struct KnotSet {
    knots: Vec<Knot>,
    ranges: Vec<IndexRange>,
}

impl KnotSet {
    /// Build the initial knots, pixel ranges, and pixel mask for a spectrum
    /// and a set of chunk edges.
    ///
    /// Pixels with error ≤ 0 (or NaN) start masked. Chunks whose pixels are
    /// all masked, or whose median flux is at most twice the median error,
    /// cannot anchor a knot and are dropped silently. Surviving knots get
    /// their initial ordinate from the median unmasked flux in their chunk.
    ///
    /// # Errors
    /// Returns [`ContinuumError::InvalidInput`] if pruning leaves fewer than
    /// two knots, since no interpolant can be built through fewer points.
    pub fn prepare(
        spectrum: &Spectrum<'_>,
        edges: &[f64],
    ) -> crate::error::Result<(Self, Vec<bool>)> {
        let wa = spectrum.wavelength();
        let fl = spectrum.flux();
        let er = spectrum.error();

        let cuts: Vec<usize> = edges
            .iter()
            .map(|&e| wa.partition_point(|&w| w < e))
            .collect();

        let mask: Vec<bool> = er.iter().map(|&e| !(e > 0.0)).collect();

        let mut knots = Vec::with_capacity(edges.len().saturating_sub(1));
        let mut ranges = Vec::with_capacity(edges.len().saturating_sub(1));
        for (pair, cut) in edges.windows(2).zip(cuts.windows(2)) {
            let range = IndexRange {
                start: cut[0],
                end: cut[1],
            };
            if !chunk_usable(&range, fl, er, &mask) {
                continue;
            }
            knots.push(Knot::at(0.5 * (pair[0] + pair[1])));
            ranges.push(range);
        }

        if knots.len() < 2 {
            return Err(ContinuumError::InvalidInput {
                message: format!(
                    "only {} usable chunks after pruning; at least 2 knots are needed \
                     to anchor a continuum",
                    knots.len()
                ),
            });
        }

        let mut set = Self { knots, ranges };
        set.update_unfrozen(fl, &mask);
        Ok((set, mask))
    }

    /// Number of knots (always equal to the number of ranges).
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Whether the set holds no knots.
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// The knots, ordered by wavelength.
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// The pixel ranges, co-indexed with the knots.
    pub fn ranges(&self) -> &[IndexRange] {
        &self.ranges
    }

    /// Consume the set, keeping the knots.
    pub(crate) fn into_knots(self) -> Vec<Knot> {
        self.knots
    }

    /// True once every knot is frozen.
    pub(crate) fn all_frozen(&self) -> bool {
        self.knots.iter().all(|k| k.frozen)
    }

    /// Re-estimate every non-frozen knot's ordinate as the median unmasked
    /// flux in its chunk. A chunk that currently has no unmasked pixels
    /// keeps its previous estimate.
    pub(crate) fn update_unfrozen(&mut self, flux: &[f64], mask: &[bool]) {
        let update = |knot: &mut Knot, range: &IndexRange| {
            if knot.frozen {
                return;
            }
            let unmasked: Vec<f64> = range
                .indices()
                .filter(|&i| !mask[i])
                .map(|i| flux[i])
                .collect();
            if !unmasked.is_empty() {
                knot.y = median(&unmasked);
            }
        };

        #[cfg(feature = "parallel")]
        self.knots
            .par_iter_mut()
            .zip(self.ranges.par_iter())
            .for_each(|(knot, range)| update(knot, range));
        #[cfg(not(feature = "parallel"))]
        self.knots
            .iter_mut()
            .zip(self.ranges.iter())
            .for_each(|(knot, range)| update(knot, range));
    }

    /// Freeze every non-frozen knot whose chunk the model already fits:
    /// reduced chi-square of `model` against the unmasked flux below 1.
    /// A frozen knot is never revisited.
    pub(crate) fn freeze_well_fit(
        &mut self,
        model: &[f64],
        flux: &[f64],
        error: &[f64],
        mask: &[bool],
        threshold: f64,
    ) {
        let test = |knot: &mut Knot, range: &IndexRange| {
            if knot.frozen {
                return;
            }
            let mut chisq = 0.0;
            let mut n = 0usize;
            for i in range.indices() {
                if mask[i] {
                    continue;
                }
                let resid = (model[i] - flux[i]) / error[i];
                chisq += resid * resid;
                n += 1;
            }
            if n > 0 && chisq / (n as f64) < threshold {
                knot.frozen = true;
            }
        };

        #[cfg(feature = "parallel")]
        self.knots
            .par_iter_mut()
            .zip(self.ranges.par_iter())
            .for_each(|(knot, range)| test(knot, range));
        #[cfg(not(feature = "parallel"))]
        self.knots
            .iter_mut()
            .zip(self.ranges.iter())
            .for_each(|(knot, range)| test(knot, range));
    }
}

/// Whether a chunk can anchor a knot: it must hold at least one unmasked
/// pixel and its median flux must clear `MIN_SNR_FACTOR` times its median
/// error. Medians are taken over the whole chunk, masked pixels included.
fn chunk_usable(range: &IndexRange, flux: &[f64], error: &[f64], mask: &[bool]) -> bool {
    if range.indices().all(|i| mask[i]) {
        return false;
    }
    let fl_med = median(&flux[range.start..range.end]);
    let er_med = median(&error[range.start..range.end]);
    fl_med > MIN_SNR_FACTOR * er_med
}
