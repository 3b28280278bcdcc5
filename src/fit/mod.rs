//! Continuum estimation: configuration, builder API, and the fit result.
//!
//! ```
//! use spectral_continuum::{ContinuumFitter, Spectrum};
//!
//! let wavelength: Vec<f64> = (0..2000).map(|i| 4000.0 + i as f64).collect();
//! let flux = vec![1.0; 2000];
//! let error = vec![0.05; 2000];
//!
//! let spectrum = Spectrum::new(&wavelength, &flux, &error)?.with_redshift(2.5);
//! let fit = ContinuumFitter::new().fit(&spectrum)?;
//!
//! assert_eq!(fit.continuum().len(), wavelength.len());
//! assert!(fit.knots().len() > 2);
//! # Ok::<(), spectral_continuum::ContinuumError>(())
//! ```

pub(crate) mod engine;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chunks::qso_edges;
use crate::error::ContinuumError;
use crate::interp::{AkimaSpline, Interpolant};
use crate::knots::KnotSet;
use crate::spectrum::Spectrum;
use crate::types::Knot;
use crate::validate::{validate_finite, validate_positive, validate_strictly_increasing};

/// Chunking profile: how knot-bearing wavelength chunks are generated.
///
/// Parse from a string with [`FromStr`]; unrecognized names fail with
/// [`ContinuumError::Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Profile {
    /// Quasar spectrum: dense chunks through the Lyman-alpha forest and
    /// around the strong emission lines, sparse over the red continuum.
    /// Requires an emission redshift.
    #[default]
    Qso,
}

impl Profile {
    /// Whether this profile needs an emission redshift to place chunks.
    pub fn requires_redshift(self) -> bool {
        match self {
            Profile::Qso => true,
        }
    }
}

impl FromStr for Profile {
    type Err = ContinuumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("qso") {
            Ok(Profile::Qso)
        } else {
            Err(ContinuumError::Configuration {
                message: format!("unknown continuum profile {s:?}; supported profiles: QSO"),
            })
        }
    }
}

/// Resolved fit configuration handed to the engine.
#[derive(Debug, Clone)]
pub(crate) struct FitConfig {
    pub(crate) profile: Profile,
    pub(crate) redshift: Option<f64>,
    pub(crate) divmult: f64,
    pub(crate) forest_divmult: f64,
    pub(crate) edges: Option<Vec<f64>>,
    pub(crate) nsig: f64,
    pub(crate) maxiter: usize,
    pub(crate) minpix: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            redshift: None,
            divmult: 2.0,
            forest_divmult: 2.0,
            edges: None,
            nsig: 1.5,
            maxiter: 1000,
            minpix: 3,
        }
    }
}

/// Builder for continuum estimation.
///
/// Accumulates the chunking profile and fit parameters, then runs the
/// iterative fit against a [`Spectrum`]. A fitter is reusable: `fit` borrows
/// it, so one configuration can be applied to many spectra.
///
/// # Examples
///
/// ```
/// use spectral_continuum::{ContinuumFitter, Profile, Spectrum};
///
/// let wavelength: Vec<f64> = (0..2000).map(|i| 4000.0 + i as f64).collect();
/// let flux = vec![1.0; 2000];
/// let error = vec![0.05; 2000];
/// let spectrum = Spectrum::new(&wavelength, &flux, &error)?;
///
/// let fit = ContinuumFitter::new()
///     .profile(Profile::Qso)
///     .redshift(2.5)
///     .forest_divmult(1.0)
///     .nsig(2.0)
///     .fit(&spectrum)?;
/// assert!(fit.continuum().iter().all(|&c| c >= 0.0));
/// # Ok::<(), spectral_continuum::ContinuumError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContinuumFitter {
    config: FitConfig,
}

impl ContinuumFitter {
    /// A fitter with default settings (QSO profile, divmult 2,
    /// forest_divmult 2, nsig 1.5, maxiter 1000, minpix 3).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunking profile. Default is [`Profile::Qso`].
    pub fn profile(mut self, profile: Profile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Set the emission redshift, overriding any value in the spectrum
    /// metadata.
    pub fn redshift(mut self, redshift: f64) -> Self {
        self.config.redshift = Some(redshift);
        self
    }

    /// Density multiplier for chunks redward of Lyman-alpha. Default 2.
    pub fn divmult(mut self, divmult: f64) -> Self {
        self.config.divmult = divmult;
        self
    }

    /// Density multiplier for chunks in the Lyman-alpha forest. Default 2,
    /// suitable for high-resolution spectra; use smaller values for lower
    /// resolution.
    pub fn forest_divmult(mut self, forest_divmult: f64) -> Self {
        self.config.forest_divmult = forest_divmult;
        self
    }

    /// Supply explicit chunk edges, bypassing profile-based generation.
    /// The profile and redshift are ignored when edges are given.
    pub fn edges(mut self, edges: Vec<f64>) -> Self {
        self.config.edges = Some(edges);
        self
    }

    /// Outlier rejection threshold in sigma units. Default 1.5.
    pub fn nsig(mut self, nsig: f64) -> Self {
        self.config.nsig = nsig;
        self
    }

    /// Iteration cap before the fit fails with
    /// [`ContinuumError::Convergence`]. Default 1000.
    pub fn maxiter(mut self, maxiter: usize) -> Self {
        self.config.maxiter = maxiter;
        self
    }

    /// Minimum unmasked pixels kept per chunk. Default 3.
    pub fn minpix(mut self, minpix: usize) -> Self {
        self.config.minpix = minpix;
        self
    }

    /// Run the iterative continuum fit.
    ///
    /// # Errors
    /// - [`ContinuumError::Configuration`] if the profile requires a
    ///   redshift and none was supplied here or in the spectrum metadata.
    ///   Detected before any computation.
    /// - [`ContinuumError::InvalidInput`] for malformed parameters or
    ///   explicit edges, or when pruning leaves too few usable chunks.
    /// - [`ContinuumError::Convergence`] if the iteration cap is exceeded.
    pub fn fit(&self, spectrum: &Spectrum<'_>) -> crate::error::Result<ContinuumFit> {
        let config = &self.config;
        validate_positive(config.nsig, "nsig")?;

        let edges = match &config.edges {
            Some(edges) => {
                if edges.len() < 2 {
                    return Err(ContinuumError::InvalidInput {
                        message: format!(
                            "explicit edges must contain at least 2 entries, got {}",
                            edges.len()
                        ),
                    });
                }
                validate_strictly_increasing(edges, "edges")?;
                edges.clone()
            }
            None => match config.profile {
                Profile::Qso => {
                    let redshift = config
                        .redshift
                        .or_else(|| spectrum.redshift())
                        .ok_or_else(|| ContinuumError::Configuration {
                            message: "the QSO profile requires an emission redshift; \
                                      set it on the fitter or in the spectrum metadata"
                                .into(),
                        })?;
                    validate_finite(redshift, "redshift")?;
                    validate_positive(config.divmult, "divmult")?;
                    validate_positive(config.forest_divmult, "forest_divmult")?;
                    qso_edges(
                        spectrum.wavelength(),
                        redshift,
                        config.divmult,
                        config.forest_divmult,
                    )
                }
            },
        };

        #[cfg(feature = "logging")]
        tracing::debug!(
            n_pixels = spectrum.len(),
            n_edges = edges.len(),
            profile = ?config.profile,
            "continuum fit started"
        );

        let (knots, mask) = KnotSet::prepare(spectrum, &edges)?;
        let fit = engine::run(spectrum, config, engine::FitState { knots, mask })?;

        #[cfg(feature = "logging")]
        tracing::debug!(n_knots = fit.knots().len(), "continuum fit complete");

        Ok(fit)
    }
}

/// Result of a continuum fit: the continuum sampled on the input wavelength
/// grid and the final knots.
///
/// The knots alone are sufficient to regenerate the continuum (see
/// [`resample`](ContinuumFit::resample)), so persisting them preserves the
/// fit without the pixel data; both types are serde-serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuumFit {
    pub(crate) continuum: Vec<f64>,
    pub(crate) knots: Vec<Knot>,
}

impl ContinuumFit {
    /// The estimated continuum, one value per input pixel, clipped to be
    /// non-negative.
    pub fn continuum(&self) -> &[f64] {
        &self.continuum
    }

    /// The final knots, ordered by wavelength.
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// The knot control points as (wavelength, continuum) pairs.
    pub fn control_points(&self) -> Vec<(f64, f64)> {
        self.knots.iter().map(|k| (k.x, k.y)).collect()
    }

    /// Re-evaluate the continuum on an arbitrary wavelength grid from the
    /// stored knots, without rerunning the fit. Evaluating on the fit's own
    /// input grid reproduces [`continuum`](ContinuumFit::continuum) exactly.
    pub fn resample(&self, wavelength: &[f64]) -> crate::error::Result<Vec<f64>> {
        let spline = AkimaSpline::through_knots(&self.knots)?;
        let mut continuum = spline.eval_grid(wavelength);
        for c in &mut continuum {
            if *c < 0.0 {
                *c = 0.0;
            }
        }
        Ok(continuum)
    }

    /// Consume the fit, returning the continuum and knots.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Knot>) {
        (self.continuum, self.knots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_case_insensitively() {
        assert_eq!(Profile::from_str("QSO").unwrap(), Profile::Qso);
        assert_eq!(Profile::from_str("qso").unwrap(), Profile::Qso);
        assert_eq!("Qso".parse::<Profile>().unwrap(), Profile::Qso);
    }

    #[test]
    fn unknown_profile_is_a_configuration_error() {
        let result = Profile::from_str("galaxy");
        match result {
            Err(ContinuumError::Configuration { message }) => {
                assert!(message.contains("galaxy"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn qso_profile_requires_redshift() {
        assert!(Profile::Qso.requires_redshift());
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = FitConfig::default();
        assert_eq!(config.profile, Profile::Qso);
        assert_eq!(config.divmult, 2.0);
        assert_eq!(config.forest_divmult, 2.0);
        assert_eq!(config.nsig, 1.5);
        assert_eq!(config.maxiter, 1000);
        assert_eq!(config.minpix, 3);
        assert!(config.redshift.is_none());
        assert!(config.edges.is_none());
    }

    #[test]
    fn missing_redshift_fails_before_computation() {
        let wa: Vec<f64> = (0..100).map(|i| 4000.0 + i as f64).collect();
        let fl = vec![1.0; 100];
        let er = vec![0.05; 100];
        let spectrum = Spectrum::new(&wa, &fl, &er).unwrap();
        let result = ContinuumFitter::new().fit(&spectrum);
        assert!(matches!(
            result,
            Err(ContinuumError::Configuration { .. })
        ));
    }

    #[test]
    fn explicit_redshift_beats_spectrum_metadata() {
        // A metadata redshift of 100 would push the whole division table
        // redward of this grid and leave no usable chunks; the explicit
        // redshift must win for the fit to succeed.
        let wa: Vec<f64> = (0..2000).map(|i| 4000.0 + i as f64).collect();
        let fl = vec![1.0; 2000];
        let er = vec![0.05; 2000];
        let spectrum = Spectrum::new(&wa, &fl, &er).unwrap().with_redshift(100.0);
        let fit = ContinuumFitter::new()
            .redshift(2.5)
            .fit(&spectrum)
            .unwrap();
        assert!(fit.knots().len() > 2);
    }

    #[test]
    fn explicit_edges_bypass_profile_and_redshift() {
        let wa: Vec<f64> = (0..100).map(|i| 4000.0 + i as f64).collect();
        let fl = vec![1.0; 100];
        let er = vec![0.05; 100];
        let spectrum = Spectrum::new(&wa, &fl, &er).unwrap();
        // No redshift anywhere: explicit edges must still work.
        let fit = ContinuumFitter::new()
            .edges(vec![4000.0, 4025.0, 4050.0, 4075.0, 4099.5])
            .fit(&spectrum)
            .unwrap();
        assert_eq!(fit.knots().len(), 4);
    }

    #[test]
    fn malformed_explicit_edges_are_rejected() {
        let wa: Vec<f64> = (0..100).map(|i| 4000.0 + i as f64).collect();
        let fl = vec![1.0; 100];
        let er = vec![0.05; 100];
        let spectrum = Spectrum::new(&wa, &fl, &er).unwrap();

        let result = ContinuumFitter::new()
            .edges(vec![4000.0])
            .fit(&spectrum);
        assert!(matches!(result, Err(ContinuumError::InvalidInput { .. })));

        let result = ContinuumFitter::new()
            .edges(vec![4050.0, 4000.0, 4099.0])
            .fit(&spectrum);
        assert!(matches!(result, Err(ContinuumError::InvalidInput { .. })));
    }

    #[test]
    fn invalid_multipliers_are_rejected() {
        let wa: Vec<f64> = (0..100).map(|i| 4000.0 + i as f64).collect();
        let fl = vec![1.0; 100];
        let er = vec![0.05; 100];
        let spectrum = Spectrum::new(&wa, &fl, &er).unwrap();
        let result = ContinuumFitter::new()
            .redshift(2.5)
            .divmult(0.0)
            .fit(&spectrum);
        assert!(matches!(result, Err(ContinuumError::InvalidInput { .. })));

        let result = ContinuumFitter::new()
            .redshift(2.5)
            .forest_divmult(-1.0)
            .fit(&spectrum);
        assert!(matches!(result, Err(ContinuumError::InvalidInput { .. })));
    }

    #[test]
    fn control_points_mirror_knots() {
        let fit = ContinuumFit {
            continuum: vec![1.0, 1.0],
            knots: vec![
                Knot {
                    x: 1.0,
                    y: 2.0,
                    frozen: true,
                },
                Knot {
                    x: 3.0,
                    y: 4.0,
                    frozen: true,
                },
            ],
        };
        assert_eq!(fit.control_points(), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn fit_serde_round_trip() {
        let fit = ContinuumFit {
            continuum: vec![0.0, 1.5],
            knots: vec![Knot {
                x: 1.0,
                y: 1.5,
                frozen: true,
            }],
        };
        let json = serde_json::to_string(&fit).unwrap();
        let back: ContinuumFit = serde_json::from_str(&json).unwrap();
        assert_eq!(fit, back);
    }
}
