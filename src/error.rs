//! Error types for the sun generator.

use crate::math::normalize_degrees_0_to_360;
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while placing the sun or shaping its spectrum.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid offset from Greenwich time, in hours.
    InvalidGmtOffset {
        /// The invalid offset provided.
        value: f64,
    },
    /// Invalid calendar date or time of day.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// A spectrum that is empty, unsorted or holds non-finite values.
    InvalidSpectrum {
        /// Description of the violated spectrum constraint.
        message: &'static str,
    },
    /// No sample at or above the normalization wavelength.
    NoReferenceWavelength {
        /// The wavelength (nm) the normalization looked for.
        reference: f64,
    },
    /// The sample used for normalization carries a power that cannot be divided by.
    DegenerateReferencePower {
        /// Wavelength of the reference sample (nm).
        wavelength: f64,
        /// Power found at that wavelength.
        power: f64,
    },
    /// Azimuth is undefined at the poles and with the sun at the zenith or nadir.
    AzimuthSingularity {
        /// Observer latitude in degrees.
        latitude: f64,
        /// Solar altitude in degrees.
        altitude: f64,
    },
    /// Invalid distance for the exported sun sphere.
    InvalidDistance {
        /// The invalid distance provided.
        value: f64,
    },
    /// Invalid atmosphere model parameters.
    InvalidAtmosphere {
        /// Description of the invalid parameter.
        message: &'static str,
    },
    /// Numerical computation error.
    ComputationError {
        /// Description of the computation error.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(f, "invalid latitude {value}° (must be between -90° and +90°)")
            }
            Self::InvalidLongitude { value } => {
                write!(f, "invalid longitude {value}° (must be between -180° and +180°)")
            }
            Self::InvalidGmtOffset { value } => {
                write!(f, "invalid GMT offset {value} h (must be strictly between -24 h and +24 h)")
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::InvalidSpectrum { message } => {
                write!(f, "invalid spectrum: {message}")
            }
            Self::NoReferenceWavelength { reference } => {
                write!(f, "no reference wavelength found (no sample at or above {reference} nm)")
            }
            Self::DegenerateReferencePower { wavelength, power } => {
                write!(f, "cannot normalize on power {power} at {wavelength} nm")
            }
            Self::AzimuthSingularity { latitude, altitude } => {
                write!(f, "azimuth undefined at latitude {latitude}° with altitude {altitude}°")
            }
            Self::InvalidDistance { value } => {
                write!(f, "invalid distance {value} (must be positive and finite)")
            }
            Self::InvalidAtmosphere { message } => {
                write!(f, "invalid atmosphere: {message}")
            }
            Self::ComputationError { message } => {
                write!(f, "computation error: {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid GMT offset error.
    #[must_use]
    pub const fn invalid_gmt_offset(value: f64) -> Self {
        Self::InvalidGmtOffset { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an invalid spectrum error.
    #[must_use]
    pub const fn invalid_spectrum(message: &'static str) -> Self {
        Self::InvalidSpectrum { message }
    }

    /// Creates a missing reference wavelength error.
    #[must_use]
    pub const fn no_reference_wavelength(reference: f64) -> Self {
        Self::NoReferenceWavelength { reference }
    }

    /// Creates a degenerate reference power error.
    #[must_use]
    pub const fn degenerate_reference_power(wavelength: f64, power: f64) -> Self {
        Self::DegenerateReferencePower { wavelength, power }
    }

    /// Creates an azimuth singularity error.
    #[must_use]
    pub const fn azimuth_singularity(latitude: f64, altitude: f64) -> Self {
        Self::AzimuthSingularity { latitude, altitude }
    }

    /// Creates an invalid distance error.
    #[must_use]
    pub const fn invalid_distance(value: f64) -> Self {
        Self::InvalidDistance { value }
    }

    /// Creates an invalid atmosphere error.
    #[must_use]
    pub const fn invalid_atmosphere(message: &'static str) -> Self {
        Self::InvalidAtmosphere { message }
    }

    /// Creates a computation error.
    #[must_use]
    pub const fn computation_error(message: &'static str) -> Self {
        Self::ComputationError { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates an offset from Greenwich time in hours.
///
/// # Errors
/// Returns `InvalidGmtOffset` unless the offset is finite and strictly within ±24 h.
pub fn check_gmt_offset(offset_hours: f64) -> Result<()> {
    if !offset_hours.is_finite() || offset_hours <= -24.0 || offset_hours >= 24.0 {
        return Err(Error::invalid_gmt_offset(offset_hours));
    }
    Ok(())
}

/// Validates a distance used to place the sun sphere in a scene.
///
/// # Errors
/// Returns `InvalidDistance` if distance is not positive and finite.
pub fn check_distance(distance: f64) -> Result<()> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(Error::invalid_distance(distance));
    }
    Ok(())
}

/// Validates one parameter of the atmosphere model.
///
/// # Errors
/// Returns `InvalidAtmosphere` carrying `message` if the value is not positive and finite.
pub fn check_atmosphere_parameter(value: f64, message: &'static str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid_atmosphere(message));
    }
    Ok(())
}

/// Validates and normalizes an azimuth angle to the range [0, 360) degrees.
///
/// # Errors
/// Returns `ComputationError` if azimuth is not finite.
pub fn check_azimuth(azimuth: f64) -> Result<f64> {
    if !azimuth.is_finite() {
        return Err(Error::computation_error("azimuth is not finite"));
    }
    Ok(normalize_degrees_0_to_360(azimuth))
}

/// Validates an altitude angle to be within the range [-90, 90] degrees.
///
/// # Errors
/// Returns `ComputationError` if altitude is not finite or outside valid range.
pub fn check_altitude(altitude: f64) -> Result<f64> {
    if !altitude.is_finite() {
        return Err(Error::computation_error("altitude is not finite"));
    }
    if !(-90.0..=90.0).contains(&altitude) {
        return Err(Error::computation_error(
            "altitude must be between -90° and 90°",
        ));
    }
    Ok(altitude)
}
