//! Tabulated illuminant spectra and their normalization.

use crate::{Error, Result};
use alloc::vec::Vec;
use log::debug;

#[cfg(feature = "xml")]
pub mod xml;

/// Wavelength (nm) whose power is pinned by [`normalize`].
pub const REFERENCE_WAVELENGTH: f64 = 560.0;

/// Power assigned to the reference wavelength by [`normalize`].
pub const REFERENCE_POWER: f64 = 100.0;

/// One spectrum sample: radiant power at a wavelength in nanometres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumSample {
    /// Wavelength in nanometres
    pub wavelength: f64,
    /// Power in arbitrary units
    pub power: f64,
}

impl SpectrumSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(wavelength: f64, power: f64) -> Self {
        Self { wavelength, power }
    }
}

impl From<(f64, f64)> for SpectrumSample {
    fn from((wavelength, power): (f64, f64)) -> Self {
        Self::new(wavelength, power)
    }
}

/// A tabulated spectrum.
///
/// Always holds at least one sample, wavelengths are positive and strictly
/// ascending, and every value is finite.
///
/// # Example
/// ```
/// # use virtual_sun::spectrum::Spectrum;
/// let spectrum = Spectrum::from_pairs([(500.0, 80.0), (560.0, 95.0), (600.0, 99.0)]).unwrap();
/// assert_eq!(spectrum.len(), 3);
///
/// // Unsorted input is rejected
/// assert!(Spectrum::from_pairs([(600.0, 1.0), (500.0, 1.0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<SpectrumSample>", into = "Vec<SpectrumSample>")
)]
pub struct Spectrum {
    samples: Vec<SpectrumSample>,
}

impl Spectrum {
    /// Creates a spectrum from samples sorted by ascending wavelength.
    ///
    /// # Errors
    /// Returns `InvalidSpectrum` for an empty list, non-finite values, non-positive
    /// wavelengths, or wavelengths that are not strictly ascending.
    pub fn new(samples: Vec<SpectrumSample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::invalid_spectrum("spectrum is empty"));
        }
        for sample in &samples {
            if !sample.wavelength.is_finite() || !sample.power.is_finite() {
                return Err(Error::invalid_spectrum("spectrum holds non-finite values"));
            }
            if sample.wavelength <= 0.0 {
                return Err(Error::invalid_spectrum("wavelengths must be positive"));
            }
        }
        if samples
            .windows(2)
            .any(|pair| pair[1].wavelength <= pair[0].wavelength)
        {
            return Err(Error::invalid_spectrum(
                "wavelengths must be strictly ascending",
            ));
        }
        Ok(Self { samples })
    }

    /// Creates a spectrum from `(wavelength, power)` pairs.
    ///
    /// # Errors
    /// See [`Spectrum::new`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(SpectrumSample::from).collect())
    }

    /// Gets the samples in ascending wavelength order.
    #[must_use]
    pub fn samples(&self) -> &[SpectrumSample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: a spectrum holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over the samples.
    pub fn iter(&self) -> core::slice::Iter<'_, SpectrumSample> {
        self.samples.iter()
    }

    /// Gets the first sample whose wavelength is at or above `wavelength`.
    #[must_use]
    pub fn first_at_or_above(&self, wavelength: f64) -> Option<SpectrumSample> {
        self.samples
            .iter()
            .find(|sample| sample.wavelength >= wavelength)
            .copied()
    }

    /// Returns a spectrum with the same wavelengths and every power multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.map_powers(|sample| sample.power * factor)
    }

    /// Returns a spectrum with the same wavelengths and powers computed per sample.
    pub(crate) fn map_powers<F>(&self, mut power: F) -> Self
    where
        F: FnMut(&SpectrumSample) -> f64,
    {
        let samples = self
            .samples
            .iter()
            .map(|sample| SpectrumSample::new(sample.wavelength, power(sample)))
            .collect();
        Self { samples }
    }

    /// Normalizes this spectrum; see [`normalize`].
    ///
    /// # Errors
    /// See [`normalize`].
    pub fn normalized(&self) -> Result<Self> {
        normalize(self)
    }

    /// Consumes the spectrum and returns its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<SpectrumSample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a SpectrumSample;
    type IntoIter = core::slice::Iter<'a, SpectrumSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl TryFrom<Vec<SpectrumSample>> for Spectrum {
    type Error = Error;

    fn try_from(samples: Vec<SpectrumSample>) -> Result<Self> {
        Self::new(samples)
    }
}

impl From<Spectrum> for Vec<SpectrumSample> {
    fn from(spectrum: Spectrum) -> Self {
        spectrum.samples
    }
}

/// Rescales a spectrum so that its power at [`REFERENCE_WAVELENGTH`] is [`REFERENCE_POWER`].
///
/// The reference is the first sample, scanning upwards, whose wavelength is at or above
/// 560 nm; it is assumed to be close to 560 nm. Every power is multiplied by
/// `100 / p560`.
///
/// # Errors
/// Returns `NoReferenceWavelength` when every sample lies below 560 nm, and
/// `DegenerateReferencePower` when the reference power is zero.
///
/// # Example
/// ```
/// # use virtual_sun::spectrum::{normalize, Spectrum};
/// let spectrum = Spectrum::from_pairs([(540.0, 10.0), (560.0, 20.0), (580.0, 40.0)]).unwrap();
/// let normalized = normalize(&spectrum).unwrap();
/// assert_eq!(normalized.samples()[1].power, 100.0);
/// assert_eq!(normalized.samples()[2].power, 200.0);
/// ```
pub fn normalize(spectrum: &Spectrum) -> Result<Spectrum> {
    let reference = spectrum
        .first_at_or_above(REFERENCE_WAVELENGTH)
        .ok_or(Error::no_reference_wavelength(REFERENCE_WAVELENGTH))?;

    let factor = REFERENCE_POWER / reference.power;
    if reference.power == 0.0 || !factor.is_finite() {
        return Err(Error::degenerate_reference_power(
            reference.wavelength,
            reference.power,
        ));
    }

    debug!(
        "normalizing spectrum on {} nm (power {}), factor {factor}",
        reference.wavelength, reference.power
    );
    Ok(spectrum.scaled(factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn flat_spectrum() -> Spectrum {
        Spectrum::from_pairs([
            (400.0, 50.0),
            (480.0, 80.0),
            (560.0, 40.0),
            (640.0, 60.0),
            (720.0, 20.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_spectrum_validation() {
        assert!(Spectrum::new(vec![]).is_err());
        assert!(Spectrum::from_pairs([(500.0, 1.0), (500.0, 2.0)]).is_err());
        assert!(Spectrum::from_pairs([(600.0, 1.0), (500.0, 2.0)]).is_err());
        assert!(Spectrum::from_pairs([(500.0, f64::NAN)]).is_err());
        assert!(Spectrum::from_pairs([(-5.0, 1.0)]).is_err());
        assert!(Spectrum::from_pairs([(380.0, 0.0)]).is_ok());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_roundtrip() {
        let original = flat_spectrum();
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.starts_with(r#"[{"wavelength":400.0,"power":50.0}"#));
        let recovered: Spectrum = serde_json::from_str(&json).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_rejects_invalid_samples() {
        let unordered = r#"[{"wavelength":500.0,"power":1.0},{"wavelength":400.0,"power":1.0}]"#;
        assert!(serde_json::from_str::<Spectrum>(unordered).is_err());
        assert!(serde_json::from_str::<Spectrum>("[]").is_err());
    }

    #[test]
    fn test_normalize_on_exact_reference() {
        let normalized = normalize(&flat_spectrum()).unwrap();

        let powers: Vec<f64> = normalized.iter().map(|s| s.power).collect();
        assert_eq!(powers, vec![125.0, 200.0, 100.0, 150.0, 50.0]);

        let wavelengths: Vec<f64> = normalized.iter().map(|s| s.wavelength).collect();
        assert_eq!(wavelengths, vec![400.0, 480.0, 560.0, 640.0, 720.0]);
    }

    #[test]
    fn test_normalize_uses_first_sample_above_reference() {
        let spectrum =
            Spectrum::from_pairs([(500.0, 10.0), (555.0, 30.0), (565.0, 50.0), (570.0, 80.0)])
                .unwrap();
        let normalized = normalize(&spectrum).unwrap();
        assert_eq!(normalized.samples()[2].power, 100.0);
        assert_eq!(normalized.samples()[1].power, 60.0);
    }

    #[test]
    fn test_normalize_first_sample_already_above_reference() {
        let spectrum = Spectrum::from_pairs([(600.0, 25.0), (700.0, 50.0)]).unwrap();
        let normalized = normalize(&spectrum).unwrap();
        assert_eq!(normalized.samples()[0].power, 100.0);
        assert_eq!(normalized.samples()[1].power, 200.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&flat_spectrum()).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_without_reference_fails() {
        let spectrum = Spectrum::from_pairs([(400.0, 1.0), (500.0, 2.0), (559.9, 3.0)]).unwrap();
        assert_eq!(
            normalize(&spectrum),
            Err(Error::no_reference_wavelength(REFERENCE_WAVELENGTH))
        );
    }

    #[test]
    fn test_normalize_zero_reference_power_fails() {
        let spectrum = Spectrum::from_pairs([(500.0, 2.0), (560.0, 0.0)]).unwrap();
        assert!(matches!(
            normalize(&spectrum),
            Err(Error::DegenerateReferencePower { .. })
        ));
    }

    #[test]
    fn test_first_at_or_above() {
        let spectrum = flat_spectrum();
        assert_eq!(spectrum.first_at_or_above(560.0).unwrap().wavelength, 560.0);
        assert_eq!(spectrum.first_at_or_above(561.0).unwrap().wavelength, 640.0);
        assert!(spectrum.first_at_or_above(721.0).is_none());
    }
}
