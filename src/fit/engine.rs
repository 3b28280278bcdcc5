//! The iterative continuum estimation loop.
//!
//! Each iteration, in order: re-estimate non-frozen knots from median
//! unmasked flux, evaluate the linear and Akima models over the full grid,
//! freeze knots whose chunk the Akima model fits (reduced chi-square < 1),
//! stop if all knots froze, mask pixels lying more than `nsig` below the
//! linear model, restore the per-chunk minimum-pixel floor, stop if the mask
//! did not change, and fail once the iteration cap is exceeded.
//!
//! The two models play different roles: the linear model is immune to
//! spline ringing and drives outlier rejection; the Akima model is the
//! smooth estimate that the freeze test and the final continuum use.
//!
//! The mutable state (knots and mask) is owned by one call to [`run`];
//! nothing is shared across fit executions.

use crate::error::ContinuumError;
use crate::fit::{ContinuumFit, FitConfig};
use crate::interp::{AkimaSpline, Interpolant, LinearContinuum};
use crate::knots::KnotSet;
use crate::spectrum::Spectrum;
use crate::types::IndexRange;

/// Reduced chi-square below which a chunk's knot is frozen.
const FREEZE_RCHISQ: f64 = 1.0;

/// Iteration state: the knot set and the pixel mask, threaded through the
/// loop as one exclusively owned value.
#[derive(Debug, Clone)]
pub(crate) struct FitState {
    pub(crate) knots: KnotSet,
    pub(crate) mask: Vec<bool>,
}

/// Run the convergence loop to completion and produce the final continuum.
pub(crate) fn run(
    spectrum: &Spectrum<'_>,
    config: &FitConfig,
    mut state: FitState,
) -> crate::error::Result<ContinuumFit> {
    let wa = spectrum.wavelength();
    let fl = spectrum.flux();
    let er = spectrum.error();

    let mut completed = 0usize;
    loop {
        state.knots.update_unfrozen(fl, &state.mask);

        let linear = LinearContinuum::through_knots(state.knots.knots())?;
        let akima = AkimaSpline::through_knots(state.knots.knots())?;
        let linear_model = linear.eval_grid(wa);
        let akima_model = akima.eval_grid(wa);

        state
            .knots
            .freeze_well_fit(&akima_model, fl, er, &state.mask, FREEZE_RCHISQ);
        if state.knots.all_frozen() {
            #[cfg(feature = "logging")]
            tracing::debug!(iterations = completed, "all knots frozen, stopping");
            break;
        }

        let mask_before = state.mask.clone();
        mask_outliers(&mut state.mask, &linear_model, fl, er, config.nsig);
        enforce_minpix(&mut state.mask, state.knots.ranges(), fl, er, config.minpix);
        if state.mask == mask_before {
            #[cfg(feature = "logging")]
            tracing::debug!(iterations = completed, "mask stable, stopping");
            break;
        }

        completed += 1;
        #[cfg(feature = "logging")]
        tracing::debug!(
            iteration = completed,
            frozen = state.knots.knots().iter().filter(|k| k.frozen).count(),
            masked = state.mask.iter().filter(|&&m| m).count(),
            "iteration complete"
        );
        if completed > config.maxiter {
            return Err(ContinuumError::Convergence {
                iterations: config.maxiter,
            });
        }
    }

    let akima = AkimaSpline::through_knots(state.knots.knots())?;
    let mut continuum = akima.eval_grid(wa);
    for c in &mut continuum {
        if *c < 0.0 {
            *c = 0.0;
        }
    }

    Ok(ContinuumFit {
        continuum,
        knots: state.knots.into_knots(),
    })
}

/// Mask every not-yet-masked pixel whose flux lies more than `nsig` sigma
/// below the linear model. One-sided: absorption only pulls flux below the
/// continuum, so pixels above the model are left alone.
fn mask_outliers(mask: &mut [bool], model: &[f64], flux: &[f64], error: &[f64], nsig: f64) {
    for i in 0..mask.len() {
        if !mask[i] && (model[i] - flux[i]) / error[i] > nsig {
            mask[i] = true;
        }
    }
}

/// Restore the minimum-pixel floor per chunk: where fewer than `minpix`
/// pixels remain unmasked, unmask masked valid-error pixels in descending
/// flux order, exactly enough to reach the floor.
fn enforce_minpix(
    mask: &mut [bool],
    ranges: &[IndexRange],
    flux: &[f64],
    error: &[f64],
    minpix: usize,
) {
    if minpix == 0 {
        return;
    }
    for range in ranges {
        let mut unmasked = range.indices().filter(|&i| !mask[i]).count();
        if unmasked >= minpix {
            continue;
        }
        let mut candidates: Vec<usize> = range
            .indices()
            .filter(|&i| mask[i] && error[i] > 0.0)
            .collect();
        candidates.sort_by(|&a, &b| flux[b].total_cmp(&flux[a]));
        for i in candidates {
            if unmasked >= minpix {
                break;
            }
            mask[i] = false;
            unmasked += 1;
        }
    }
}
