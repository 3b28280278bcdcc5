//! # spectral-continuum
//!
//! Automated emission-continuum estimation for absorption-line spectroscopy.
//!
//! Estimates the continuum of a spectrum, the flux level that would be
//! observed absent absorption features, by fitting a smooth Akima spline
//! through robustly placed knots while iteratively rejecting
//! absorption-affected pixels. No manual knot placement: chunk boundaries
//! come from a redshift-scaled division table (or explicit edges), knot
//! values from median statistics, and convergence from a per-chunk
//! chi-square freeze rule.
//!
//! ## Architecture
//!
//! - **`spectrum`** — Read-only spectrum view (wavelength, flux, error) with
//!   a numeric metadata map
//! - **`chunks`** — Wavelength chunk edges for the QSO profile
//! - **`interp`** — Continuum interpolants: slope-extended linear and Akima
//!   spline behind the [`Interpolant`] seam
//! - **`knots`** — Knot initialization and pruning ([`KnotSet`])
//! - **`fit`** — The iterative estimator ([`ContinuumFitter`]) and its
//!   result ([`ContinuumFit`])
//!
//! ## Design
//!
//! - **No panics.** Every fallible operation returns [`Result`]. Library
//!   code never calls `unwrap()` or `expect()`.
//! - **Exclusively owned fit state.** The mutable knot/mask state is owned
//!   by one fit execution; nothing is shared across concurrent fits.
//! - **Dual models per iteration.** A boundary-extrapolated linear model
//!   drives robust outlier rejection while the Akima model drives the
//!   freeze test and the final continuum; the two are never collapsed.
//! - **Reproducible.** Identical inputs give identical output, and the
//!   returned knots regenerate the continuum through the Akima interpolant
//!   alone via [`ContinuumFit::resample`].
//! - **Serializable.** Value and result types implement Serde
//!   `Serialize` / `Deserialize`.
//!
//! ## Quick start
//!
//! ```
//! use spectral_continuum::{ContinuumFitter, Spectrum};
//!
//! // A flat synthetic spectrum with 5% noise-free errors.
//! let wavelength: Vec<f64> = (0..3000).map(|i| 3800.0 + i as f64).collect();
//! let flux = vec![1.0; 3000];
//! let error = vec![0.05; 3000];
//!
//! let spectrum = Spectrum::new(&wavelength, &flux, &error)?.with_redshift(2.5);
//! let fit = ContinuumFitter::new().fit(&spectrum)?;
//!
//! assert!(fit.continuum().iter().all(|&c| c >= 0.0));
//! let regenerated = fit.resample(&wavelength)?;
//! assert_eq!(regenerated, fit.continuum());
//! # Ok::<(), spectral_continuum::ContinuumError>(())
//! ```
//!
//! ## Feature flags
//!
//! - `parallel` — parallelize per-chunk knot updates and freeze tests with
//!   rayon (iterations stay strictly serial)
//! - `logging` — emit `tracing` debug events for fit progress

pub mod chunks;
pub mod error;
pub mod fit;
pub mod interp;
pub mod knots;
pub mod spectrum;
pub mod types;

mod stats;
mod validate;

#[doc(inline)]
pub use chunks::qso_edges;
#[doc(inline)]
pub use error::{ContinuumError, Result};
#[doc(inline)]
pub use fit::{ContinuumFit, ContinuumFitter, Profile};
#[doc(inline)]
pub use interp::{AkimaSpline, Interpolant, LinearContinuum};
#[doc(inline)]
pub use knots::KnotSet;
#[doc(inline)]
pub use spectrum::{Metadata, Spectrum};
#[doc(inline)]
pub use types::{IndexRange, Knot};
