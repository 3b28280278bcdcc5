//! Read-only spectrum view consumed by the estimator.
//!
//! The fit needs three co-indexed arrays (wavelength, flux, one-sigma
//! error) and, for redshift-dependent profiles, a redshift. Construction of
//! the underlying arrays (file I/O, unit handling) belongs to the caller;
//! this type only validates the contract the fit relies on and borrows the
//! data for the duration of one estimation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ContinuumError;
use crate::validate::validate_strictly_increasing;

/// Key under which [`Metadata`] stores the emission redshift.
pub const REDSHIFT_KEY: &str = "redshift";

/// Numeric metadata attached to a spectrum.
///
/// A thin string-keyed map. The only key the estimator itself reads is
/// [`REDSHIFT_KEY`]; anything else is carried through untouched.
///
/// # Examples
/// ```
/// use spectral_continuum::Metadata;
/// let mut meta = Metadata::new();
/// meta.insert("redshift", 2.73);
/// assert_eq!(meta.redshift(), Some(2.73));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    entries: BTreeMap<String, f64>,
}

impl Metadata {
    /// An empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.entries.insert(key.into(), value);
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// The emission redshift, if present.
    pub fn redshift(&self) -> Option<f64> {
        self.get(REDSHIFT_KEY)
    }
}

/// A read-only view over one spectrum.
///
/// Wavelengths must be strictly increasing and finite; flux and error are
/// taken as-is. A pixel whose one-sigma error is zero, negative, or NaN
/// carries no measurement and is excluded from fitting from the start.
///
/// # Examples
/// ```
/// use spectral_continuum::Spectrum;
///
/// let wavelength = vec![4000.0, 4001.0, 4002.0];
/// let flux = vec![1.0, 0.98, 1.02];
/// let error = vec![0.05, 0.05, 0.05];
///
/// let spectrum = Spectrum::new(&wavelength, &flux, &error)?
///     .with_redshift(2.5);
/// assert_eq!(spectrum.len(), 3);
/// assert_eq!(spectrum.redshift(), Some(2.5));
/// # Ok::<(), spectral_continuum::ContinuumError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Spectrum<'a> {
    wavelength: &'a [f64],
    flux: &'a [f64],
    error: &'a [f64],
    meta: Metadata,
}

impl<'a> Spectrum<'a> {
    /// Create a spectrum view over three co-indexed arrays.
    ///
    /// # Errors
    /// Returns [`ContinuumError::InvalidInput`] if the arrays differ in
    /// length, contain fewer than two pixels, or the wavelengths are not
    /// strictly increasing and finite.
    pub fn new(
        wavelength: &'a [f64],
        flux: &'a [f64],
        error: &'a [f64],
    ) -> crate::error::Result<Self> {
        if wavelength.len() != flux.len() || wavelength.len() != error.len() {
            return Err(ContinuumError::InvalidInput {
                message: format!(
                    "wavelength, flux and error must have the same length, got {}, {} and {}",
                    wavelength.len(),
                    flux.len(),
                    error.len()
                ),
            });
        }
        if wavelength.len() < 2 {
            return Err(ContinuumError::InvalidInput {
                message: format!(
                    "spectrum requires at least 2 pixels, got {}",
                    wavelength.len()
                ),
            });
        }
        validate_strictly_increasing(wavelength, "wavelength")?;

        Ok(Self {
            wavelength,
            flux,
            error,
            meta: Metadata::new(),
        })
    }

    /// Attach a metadata map, replacing any existing one.
    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }

    /// Set the emission redshift in the metadata.
    pub fn with_redshift(mut self, redshift: f64) -> Self {
        self.meta.insert(REDSHIFT_KEY, redshift);
        self
    }

    /// Wavelength array, strictly increasing.
    pub fn wavelength(&self) -> &[f64] {
        self.wavelength
    }

    /// Flux array, co-indexed with wavelength.
    pub fn flux(&self) -> &[f64] {
        self.flux
    }

    /// One-sigma error array; values ≤ 0 or NaN mark invalid pixels.
    pub fn error(&self) -> &[f64] {
        self.error
    }

    /// Attached metadata.
    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    /// Emission redshift from the metadata, if present.
    pub fn redshift(&self) -> Option<f64> {
        self.meta.redshift()
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the spectrum has no pixels. Always false for a constructed
    /// spectrum; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }
}
