//! Low-precision solar ephemeris.
//!
//! Mean-anomaly / ecliptic-longitude series for the sun's equatorial coordinates, a
//! sidereal-time polynomial for the hour angle, then the usual spherical-astronomy
//! conversion to altitude and azimuth. Good to roughly a degree against the NOAA solar
//! calculator, which is plenty for lighting a rendered scene.
//!
//! The calculation is split like this:
//! - [`sun_coordinates`] depends only on the instant and the GMT offset
//! - [`solar_position_with_coordinates`] adds the observer location
//!
//! so that many locations can share the first part.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::error::{check_coordinates, check_gmt_offset};
use crate::math::{
    abs, acos, asin, atan, cos_deg, fract, polynomial, radians_to_degrees, sin_deg,
};
use crate::time::{DAYS_PER_CENTURY, Instant};
use crate::{Error, Result, SolarPosition};
use log::{debug, trace};

/// Length of the sidereal day in solar hours.
const SIDEREAL_DAY_HOURS: f64 = 23.9344;

/// Greenwich mean sidereal time at 0h UT, in seconds, as a polynomial in Julian centuries.
const SIDEREAL_TIME_COEFFS: [f64; 4] = [24110.54841, 8640184.812866, 0.093104, -0.0000062];

/// Below this value of `cos(latitude) * cos(altitude)` the azimuth is undefined.
const SINGULARITY_EPSILON: f64 = 1e-12;

/// Sun coordinates for one instant, independent of the observer location.
///
/// Use with [`solar_position_with_coordinates`] for location sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunCoordinates {
    /// Days since J2000.0
    pub(crate) days: f64,
    /// Right ascension in hours [0, 24)
    pub(crate) right_ascension: f64,
    /// Declination in degrees
    pub(crate) declination: f64,
    /// Hour angle at Greenwich in degrees, before adding the observer longitude
    pub(crate) greenwich_hour_angle: f64,
}

impl SunCoordinates {
    /// Days elapsed since the J2000.0 epoch.
    #[must_use]
    pub const fn days_since_j2000(&self) -> f64 {
        self.days
    }

    /// Right ascension in hours, within [0, 24).
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.right_ascension
    }

    /// Declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }

    /// Hour angle at longitude 0°, in degrees (not normalized).
    #[must_use]
    pub const fn greenwich_hour_angle(&self) -> f64 {
        self.greenwich_hour_angle
    }
}

/// Calculate the solar position for a local instant.
///
/// # Arguments
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180, positive east)
/// * `instant` - Local civil date and time
/// * `gmt_offset` - Offset of the local time from Greenwich, in hours (2 for French summer time)
///
/// # Errors
/// Returns error for invalid coordinates or offset, and `AzimuthSingularity` at the poles
/// or with the sun exactly at the zenith or nadir.
///
/// # Example
/// ```
/// use virtual_sun::{ephemeris, time::Instant};
///
/// let instant = Instant::from_ymd_hms(2011, 10, 7, 14, 0, 0).unwrap();
/// let position = ephemeris::solar_position(43.53, 5.45, &instant, 2.0).unwrap();
///
/// assert!(position.is_day());
/// println!("Altitude: {:.3}°", position.altitude());
/// println!("Azimuth: {:.3}°", position.azimuth());
/// ```
pub fn solar_position(
    latitude: f64,
    longitude: f64,
    instant: &Instant,
    gmt_offset: f64,
) -> Result<SolarPosition> {
    check_coordinates(latitude, longitude)?;
    let coordinates = sun_coordinates(instant, gmt_offset)?;
    solar_position_with_coordinates(latitude, longitude, &coordinates)
}

/// Calculate the solar position for a timezone-aware chrono date-time.
///
/// The local date and time and the offset of `datetime` feed [`solar_position`].
///
/// # Errors
/// See [`solar_position`].
#[cfg(feature = "chrono")]
pub fn solar_position_at<Tz: chrono::TimeZone>(
    datetime: &chrono::DateTime<Tz>,
    latitude: f64,
    longitude: f64,
) -> Result<SolarPosition> {
    let (instant, gmt_offset) = Instant::from_datetime(datetime)?;
    solar_position(latitude, longitude, &instant, gmt_offset)
}

/// Calculate the location-independent part of the solar position.
///
/// # Errors
/// Returns `InvalidGmtOffset` for an offset outside ±24 h.
pub fn sun_coordinates(instant: &Instant, gmt_offset: f64) -> Result<SunCoordinates> {
    check_gmt_offset(gmt_offset)?;

    let days = instant.days_since_j2000();

    // Mean anomaly, mean longitude, ecliptic longitude and obliquity (degrees)
    let g = 357.529 + 0.98560028 * days;
    let q = 280.459 + 0.98564736 * days;
    let l = q + 1.915 * sin_deg(g) + 0.020 * sin_deg(2.0 * g);
    let e = 23.439 - 0.00000036 * days;

    let sin_l = sin_deg(l);
    let cos_l = cos_deg(l);

    let right_ascension = right_ascension_hours(cos_deg(e) * sin_l, cos_l);
    let declination = radians_to_degrees(asin(sin_deg(e) * sin_l));

    let centuries = days / DAYS_PER_CENTURY;
    let sidereal_hours = polynomial(&SIDEREAL_TIME_COEFFS, centuries) / 3600.0;
    let sidereal_hours = fract(sidereal_hours / 24.0) * 24.0;
    let sidereal_angle = 360.0 * sidereal_hours / SIDEREAL_DAY_HOURS;

    let local_angle = (instant.decimal_hours() - gmt_offset - 12.0) * 360.0 / SIDEREAL_DAY_HOURS;
    let greenwich_hour_angle = local_angle + sidereal_angle - right_ascension * 15.0;

    trace!("sun coordinates: days={days} g={g} l={l} e={e}");
    trace!("ra={right_ascension}h decl={declination}° H0={greenwich_hour_angle}°");

    Ok(SunCoordinates {
        days,
        right_ascension,
        declination,
        greenwich_hour_angle,
    })
}

/// Right ascension in hours from the ecliptic-to-equatorial projection `y / x`.
///
/// `atan` alone only covers (-6 h, 6 h); the signs of the ecliptic longitude's cosine
/// and sine pick the quadrant.
fn right_ascension_hours(y: f64, cos_l: f64) -> f64 {
    let hours = radians_to_degrees(atan(y / cos_l)) / 15.0;
    if cos_l < 0.0 {
        hours + 12.0
    } else if y < 0.0 {
        hours + 24.0
    } else {
        hours
    }
}

/// Complete the solar position from pre-computed [`SunCoordinates`].
///
/// # Errors
/// Returns error for invalid coordinates and `AzimuthSingularity` when
/// `cos(latitude) * cos(altitude)` vanishes.
///
/// # Example
/// ```
/// use virtual_sun::{ephemeris, time::Instant};
///
/// let instant = Instant::from_ymd_hms(2011, 6, 21, 12, 0, 0).unwrap();
/// let coordinates = ephemeris::sun_coordinates(&instant, 0.0).unwrap();
///
/// for latitude in [-60.0, -30.0, 0.0, 30.0, 60.0] {
///     let position =
///         ephemeris::solar_position_with_coordinates(latitude, 0.0, &coordinates).unwrap();
///     assert!(position.azimuth() < 360.0);
/// }
/// ```
pub fn solar_position_with_coordinates(
    latitude: f64,
    longitude: f64,
    coordinates: &SunCoordinates,
) -> Result<SolarPosition> {
    check_coordinates(latitude, longitude)?;

    let hour_angle = coordinates.greenwich_hour_angle + longitude;

    let sin_decl = sin_deg(coordinates.declination);
    let cos_decl = cos_deg(coordinates.declination);
    let sin_lat = sin_deg(latitude);
    let cos_lat = cos_deg(latitude);

    let sin_altitude =
        (sin_decl * sin_lat - cos_decl * cos_lat * cos_deg(hour_angle)).clamp(-1.0, 1.0);
    let altitude = radians_to_degrees(asin(sin_altitude));
    let cos_altitude = cos_deg(altitude);

    let denominator = cos_lat * cos_altitude;
    if abs(denominator) < SINGULARITY_EPSILON {
        return Err(Error::azimuth_singularity(latitude, altitude));
    }

    // acos only yields [0°, 180°]; the sign of sin(azimuth) selects the western half
    let cos_azimuth = ((sin_decl - sin_lat * sin_altitude) / denominator).clamp(-1.0, 1.0);
    let mut azimuth = radians_to_degrees(acos(cos_azimuth));
    let sin_azimuth = cos_decl * sin_deg(hour_angle) / cos_altitude;
    if sin_azimuth < 0.0 {
        azimuth = 360.0 - azimuth;
    }

    let position = SolarPosition::new(altitude, azimuth)?;
    debug!(
        "solar position at ({latitude}°, {longitude}°): altitude={:.4}° azimuth={:.4}°",
        position.altitude(),
        position.azimuth()
    );
    Ok(position)
}
