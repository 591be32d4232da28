//! The sun of a scene, as an unplaced/placed pair of types.
//!
//! A [`Sun`] has nothing to offer but [`Sun::place`]. Placing it yields a [`PlacedSun`],
//! which holds the computed solar position and produces the spectrum and scene geometry.

use crate::atmosphere::Atmosphere;
use crate::ephemeris;
use crate::geometry::{SunGeometry, to_cartesian};
use crate::spectrum::normalize;
use crate::time::Instant;
use crate::{GeoPosition, Result, SolarPosition, Spectrum};

/// A sun that has not been placed yet.
///
/// # Example
/// ```
/// use virtual_sun::{Spectrum, Sun, time::Instant};
///
/// let instant = Instant::from_ymd_hms(2011, 10, 7, 14, 0, 0).unwrap();
/// let sun = Sun::new().place(43.53, 5.45, instant, 2.0).unwrap();
/// assert!(sun.is_day());
///
/// let reference = Spectrum::from_pairs([(450.0, 100.0), (560.0, 100.0), (650.0, 100.0)]).unwrap();
/// let spectrum = sun.spectrum(&reference).unwrap();
/// assert!((spectrum.samples()[1].power - 100.0).abs() < 1e-9);
/// assert!(spectrum.samples()[0].power < spectrum.samples()[2].power);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sun {
    _private: (),
}

impl Sun {
    /// Creates an unplaced sun.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Places the sun for an observer at a local civil instant.
    ///
    /// # Arguments
    /// * `latitude` - Observer latitude in degrees (-90 to +90)
    /// * `longitude` - Observer longitude in degrees (-180 to +180, positive east)
    /// * `instant` - Local civil date and time
    /// * `gmt_offset` - Offset of the local time from Greenwich, in hours
    ///
    /// # Errors
    /// See [`ephemeris::solar_position`].
    pub fn place(
        self,
        latitude: f64,
        longitude: f64,
        instant: Instant,
        gmt_offset: f64,
    ) -> Result<PlacedSun> {
        let location = GeoPosition::new(latitude, longitude)?;
        let position = ephemeris::solar_position(latitude, longitude, &instant, gmt_offset)?;
        Ok(PlacedSun {
            location,
            instant,
            gmt_offset,
            position,
        })
    }

    /// Places the sun at a timezone-aware chrono date-time, taking the offset from it.
    ///
    /// # Errors
    /// See [`Sun::place`].
    #[cfg(feature = "chrono")]
    pub fn place_at<Tz: chrono::TimeZone>(
        self,
        latitude: f64,
        longitude: f64,
        datetime: &chrono::DateTime<Tz>,
    ) -> Result<PlacedSun> {
        let (instant, gmt_offset) = Instant::from_datetime(datetime)?;
        self.place(latitude, longitude, instant, gmt_offset)
    }
}

/// A sun placed for an observer and instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlacedSun {
    location: GeoPosition,
    instant: Instant,
    gmt_offset: f64,
    position: SolarPosition,
}

impl PlacedSun {
    /// Gets the computed solar position.
    #[must_use]
    pub const fn position(&self) -> SolarPosition {
        self.position
    }

    /// Gets the solar altitude in degrees.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.position.altitude()
    }

    /// Gets the solar azimuth in degrees.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.position.azimuth()
    }

    /// Checks whether the sun is up.
    #[must_use]
    pub fn is_day(&self) -> bool {
        self.position.is_day()
    }

    /// Gets the observer location.
    #[must_use]
    pub const fn location(&self) -> GeoPosition {
        self.location
    }

    /// Gets the local instant the sun was placed at.
    #[must_use]
    pub const fn instant(&self) -> Instant {
        self.instant
    }

    /// Gets the GMT offset in hours.
    #[must_use]
    pub const fn gmt_offset(&self) -> f64 {
        self.gmt_offset
    }

    /// Attenuates `reference` through the standard atmosphere and normalizes the result.
    ///
    /// # Errors
    /// Returns `NoReferenceWavelength` or `DegenerateReferencePower` from normalization.
    pub fn spectrum(&self, reference: &Spectrum) -> Result<Spectrum> {
        self.spectrum_in(&Atmosphere::standard(), reference)
    }

    /// Attenuates `reference` through `atmosphere` and normalizes the result.
    ///
    /// # Errors
    /// See [`PlacedSun::spectrum`].
    pub fn spectrum_in(&self, atmosphere: &Atmosphere, reference: &Spectrum) -> Result<Spectrum> {
        let attenuated = atmosphere.attenuate(reference, self.altitude())?;
        normalize(&attenuated)
    }

    /// Places the sun sphere `distance` away from the observer.
    ///
    /// # Errors
    /// Returns `InvalidDistance` for a distance that is not positive and finite.
    pub fn geometry(&self, distance: f64) -> Result<SunGeometry> {
        to_cartesian(self.altitude(), self.azimuth(), distance)
    }
}
