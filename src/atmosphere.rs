//! Rayleigh-style reddening of sunlight crossing the atmosphere.
//!
//! The atmosphere is modelled as a homogeneous shell of constant thickness around a
//! spherical Earth. Sunlight at altitude `h` travels a distance
//!
//! ```text
//! z = -R sin h + sqrt((R + r)² - R² cos² h)
//! ```
//!
//! through it, and each wavelength λ is attenuated by `exp(-k z / λ⁴)`.

#![allow(clippy::unreadable_literal)]

use crate::error::{check_altitude, check_atmosphere_parameter};
use crate::math::{PI, cos_deg, exp, powi, sin_deg, sqrt};
use crate::{Result, Spectrum};
use log::debug;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Thickness of the homogeneous atmosphere shell in meters.
pub const ATMOSPHERE_THICKNESS_METERS: f64 = 8_000.0;

/// Rayleigh scattering coefficient `(32/3) π³ (n - 1)² / N`, in m³.
///
/// Uses a refractivity `n - 1` of 3e-4 and a molecular density `N` of 2.6e25 m⁻³.
pub const RAYLEIGH_COEFFICIENT: f64 = 32.0 / 3.0 * PI * PI * PI * (3e-4 * 3e-4) / 2.6e25;

const NANOMETERS_TO_METERS: f64 = 1e-9;

/// Parameters of the atmosphere model.
///
/// # Example
/// ```
/// # use virtual_sun::Atmosphere;
/// let standard = Atmosphere::standard();
/// assert_eq!(standard.thickness(), 8000.0);
///
/// // With the sun overhead, light crosses exactly one shell thickness
/// assert!((standard.path_length(90.0) - 8000.0).abs() < 1e-6);
///
/// // A thicker, hazier atmosphere
/// let hazy = Atmosphere::new(6_371_000.0, 12_000.0, 2.0e-30).unwrap();
/// assert!(hazy.transmittance(450.0, 30.0) < standard.transmittance(450.0, 30.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atmosphere {
    /// Earth radius in meters
    earth_radius: f64,
    /// Atmosphere shell thickness in meters
    thickness: f64,
    /// Scattering coefficient in m³
    scattering_coefficient: f64,
}

impl Atmosphere {
    /// Creates an atmosphere model with custom parameters.
    ///
    /// # Errors
    /// Returns `InvalidAtmosphere` unless every parameter is positive and finite.
    pub fn new(earth_radius: f64, thickness: f64, scattering_coefficient: f64) -> Result<Self> {
        check_atmosphere_parameter(earth_radius, "earth radius must be positive and finite")?;
        check_atmosphere_parameter(thickness, "thickness must be positive and finite")?;
        check_atmosphere_parameter(
            scattering_coefficient,
            "scattering coefficient must be positive and finite",
        )?;
        Ok(Self {
            earth_radius,
            thickness,
            scattering_coefficient,
        })
    }

    /// Creates the standard model.
    ///
    /// - Earth radius: 6 371 km
    /// - Thickness: 8 km
    /// - Scattering coefficient: [`RAYLEIGH_COEFFICIENT`]
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            earth_radius: EARTH_RADIUS_METERS,
            thickness: ATMOSPHERE_THICKNESS_METERS,
            scattering_coefficient: RAYLEIGH_COEFFICIENT,
        }
    }

    /// Gets the Earth radius in meters.
    #[must_use]
    pub const fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    /// Gets the atmosphere thickness in meters.
    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Gets the scattering coefficient in m³.
    #[must_use]
    pub const fn scattering_coefficient(&self) -> f64 {
        self.scattering_coefficient
    }

    /// Distance in meters travelled through the atmosphere by light arriving at `altitude` degrees.
    #[must_use]
    pub fn path_length(&self, altitude: f64) -> f64 {
        let r = self.earth_radius;
        let outer = r + self.thickness;
        let cos_altitude = cos_deg(altitude);
        -r * sin_deg(altitude) + sqrt(outer * outer - r * r * cos_altitude * cos_altitude)
    }

    /// Fraction of power at `wavelength` nm that survives the path at `altitude` degrees.
    #[must_use]
    pub fn transmittance(&self, wavelength: f64, altitude: f64) -> f64 {
        self.transmittance_over(wavelength, self.path_length(altitude))
    }

    fn transmittance_over(&self, wavelength: f64, path_length: f64) -> f64 {
        let lambda = wavelength * NANOMETERS_TO_METERS;
        exp(-self.scattering_coefficient / powi(lambda, 4) * path_length)
    }

    /// Attenuates every sample of `spectrum` for the sun at `altitude` degrees.
    ///
    /// Wavelengths are kept; only powers change.
    ///
    /// # Errors
    /// Returns `ComputationError` for an altitude that is not finite or beyond ±90°.
    pub fn attenuate(&self, spectrum: &Spectrum, altitude: f64) -> Result<Spectrum> {
        let altitude = check_altitude(altitude)?;
        let path_length = self.path_length(altitude);
        debug!("light path through the atmosphere at altitude {altitude:.4}°: {path_length:.1} m");

        Ok(spectrum.map_powers(|sample| {
            sample.power * self.transmittance_over(sample.wavelength, path_length)
        }))
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::standard()
    }
}

/// Attenuates `spectrum` through the [standard](Atmosphere::standard) atmosphere.
///
/// # Errors
/// See [`Atmosphere::attenuate`].
///
/// # Example
/// ```
/// # use virtual_sun::{atmosphere, Spectrum};
/// let white = Spectrum::from_pairs([(400.0, 100.0), (700.0, 100.0)]).unwrap();
/// let low_sun = atmosphere::attenuate(&white, 5.0).unwrap();
///
/// // Blue is scattered away more than red
/// assert!(low_sun.samples()[0].power < low_sun.samples()[1].power);
/// ```
pub fn attenuate(spectrum: &Spectrum, altitude: f64) -> Result<Spectrum> {
    Atmosphere::standard().attenuate(spectrum, altitude)
}
