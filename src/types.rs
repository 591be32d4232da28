//! Core value types: observer location and computed solar position.

use crate::Result;
use crate::error::{check_altitude, check_azimuth, check_coordinates};

/// Altitude above which the sun counts as up, in degrees.
///
/// Slightly below the geometric horizon because refraction lifts the disc into view.
pub const DAY_ALTITUDE_THRESHOLD: f64 = -0.25;

/// Geographic location of the observer, in degrees.
///
/// # Example
/// ```
/// # use virtual_sun::GeoPosition;
/// let aix = GeoPosition::new(43.53, 5.45).unwrap();
/// assert_eq!(aix.latitude(), 43.53);
///
/// // Latitudes beyond the poles are rejected
/// assert!(GeoPosition::new(120.0, 5.45).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeoPosition {
    /// Latitude in degrees (-90° to +90°, positive north)
    latitude: f64,
    /// Longitude in degrees (-180° to +180°, positive east)
    longitude: f64,
}

impl GeoPosition {
    /// Creates a new location.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Position of the sun in the observer's sky.
///
/// - Altitude: 0° = horizon, 90° = directly overhead, negative below the horizon
/// - Azimuth: 0° = North, measured clockwise, always within [0°, 360°)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolarPosition {
    /// Altitude above the horizon in degrees (-90° to 90°)
    altitude: f64,
    /// Azimuth in degrees (0° to 360°, 0° = North, increasing clockwise)
    azimuth: f64,
}

impl SolarPosition {
    /// Creates a solar position, normalizing the azimuth into [0°, 360°).
    ///
    /// # Errors
    /// Returns `ComputationError` for non-finite angles or an altitude beyond ±90°.
    ///
    /// # Example
    /// ```
    /// # use virtual_sun::SolarPosition;
    /// let position = SolarPosition::new(30.0, -90.0).unwrap();
    /// assert_eq!(position.azimuth(), 270.0);
    /// assert_eq!(position.zenith_angle(), 60.0);
    /// ```
    pub fn new(altitude: f64, azimuth: f64) -> Result<Self> {
        let altitude = check_altitude(altitude)?;
        let azimuth = check_azimuth(azimuth)?;
        Ok(Self { altitude, azimuth })
    }

    /// Gets the altitude in degrees.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Gets the azimuth in degrees (0° to 360°, 0° = North, increasing clockwise).
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Gets the zenith angle in degrees (90° - altitude).
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.altitude
    }

    /// Checks whether it is day, i.e. altitude strictly above [`DAY_ALTITUDE_THRESHOLD`].
    #[must_use]
    pub fn is_day(&self) -> bool {
        self.altitude > DAY_ALTITUDE_THRESHOLD
    }
}
