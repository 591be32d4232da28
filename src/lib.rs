//! # Virtual Sun
//!
//! Places the sun in scenes of a spectral renderer: solar altitude and azimuth for a place
//! and local time, the reference illuminant reddened by the atmosphere the light crosses,
//! and the position, size and power of the sun sphere.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The pipeline:
//! 1. [`time`]: local calendar date and time to Julian day
//! 2. [`ephemeris`]: Julian day, location and GMT offset to altitude and azimuth
//! 3. [`atmosphere`]: Rayleigh attenuation along the light path through the atmosphere
//! 4. [`spectrum`]: normalization to a power of 100 at 560 nm
//! 5. [`geometry`]: altitude, azimuth and distance to scene coordinates
//!
//! [`Sun`] and [`PlacedSun`] chain these steps. A `Sun` must be placed before it can give a
//! spectrum or geometry, which the types enforce.
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions
//! - `chrono` (default): Enable `DateTime<Tz>` based convenience API
//! - `libm`: Use pure Rust math for `no_std` environments
//! - `xml` (default): Illuminant files ([`spectrum::xml`]) and scene files (`scene`)
//! - `serde`: `Serialize`/`Deserialize` on the value types
//! - `cli` (default): The `virtual-sun` command-line tool
//!
//! **Configuration examples:**
//! ```toml
//! # Library only, with file support
//! virtual-sun = { version = "0.1", default-features = false, features = ["std", "chrono", "xml"] }
//!
//! # Minimal no_std (pure numeric API)
//! virtual-sun = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use virtual_sun::{Spectrum, Sun, time::Instant};
//!
//! // Aix-en-Provence, 7 October 2011 at 14:00 French summer time (GMT+2)
//! let instant = Instant::from_ymd_hms(2011, 10, 7, 14, 0, 0).unwrap();
//! let sun = Sun::new().place(43.53, 5.45, instant, 2.0).unwrap();
//!
//! println!("Altitude: {:.3}°", sun.altitude());
//! println!("Azimuth: {:.3}°", sun.azimuth());
//!
//! let reference = Spectrum::from_pairs((38..=78).map(|i| (f64::from(i) * 10.0, 100.0))).unwrap();
//! let spectrum = sun.spectrum(&reference).unwrap();
//! let geometry = sun.geometry(50.0).unwrap();
//! assert!(geometry.z > 0.0);
//! # assert_eq!(spectrum.len(), reference.len());
//! ```
//!
//! ## Coordinate System
//!
//! - **Azimuth**: 0° = North, measured clockwise (0° to 360°)
//! - **Altitude**: 0° = horizon, 90° = directly overhead (-90° to +90°)
//! - **Scene**: `x` east, `y` north, `z` up, observer at the origin

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of computed values in tests
)]

extern crate alloc;

// Public API exports
pub use crate::atmosphere::Atmosphere;
pub use crate::error::{Error, Result};
pub use crate::ephemeris::{SunCoordinates, solar_position_with_coordinates, sun_coordinates};
pub use crate::geometry::SunGeometry;
pub use crate::spectrum::{Spectrum, SpectrumSample};
pub use crate::sun::{PlacedSun, Sun};
pub use crate::types::{GeoPosition, SolarPosition};

// Calculation modules
pub mod atmosphere;
pub mod ephemeris;
pub mod geometry;
pub mod spectrum;
pub mod sun;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;

#[cfg(feature = "xml")]
pub mod scene;

#[cfg(all(test, feature = "chrono"))]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    #[test]
    fn test_timezones_agree() {
        // Same local civil time expressed in two ways
        let datetime_fixed = "2011-10-07T14:00:00+02:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        let datetime_utc = Utc.with_ymd_and_hms(2011, 10, 7, 12, 0, 0).unwrap();

        let position1 = ephemeris::solar_position_at(&datetime_fixed, 43.53, 5.45).unwrap();
        let position2 = ephemeris::solar_position_at(&datetime_utc, 43.53, 5.45).unwrap();

        // The Julian day is taken from local calendar fields, so the two differ slightly
        assert!((position1.azimuth() - position2.azimuth()).abs() < 0.05);
        assert!((position1.altitude() - position2.altitude()).abs() < 0.05);

        assert!(position1.azimuth() >= 0.0);
        assert!(position1.azimuth() < 360.0);
    }

    #[test]
    fn test_full_pipeline() {
        let datetime = "2011-06-21T20:00:00+02:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        let sun = Sun::new().place_at(43.53, 5.45, &datetime).unwrap();
        assert!(sun.is_day());

        let reference =
            Spectrum::from_pairs([(400.0, 80.0), (500.0, 110.0), (560.0, 105.0), (700.0, 90.0)])
                .unwrap();
        let spectrum = sun.spectrum(&reference).unwrap();
        assert!((spectrum.samples()[2].power - 100.0).abs() < 1e-9);

        let geometry = sun.geometry(10.0).unwrap();
        assert!(geometry.x < 0.0, "evening sun is in the west");
        assert!(geometry.z > 0.0);
    }
}
