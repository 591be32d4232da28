//! Placement of the sun sphere in scene coordinates.
//!
//! The scene frame has `x` pointing east, `y` north and `z` up, with the observer at the
//! origin.

use crate::error::{check_altitude, check_azimuth, check_distance};
use crate::math::{PI, cos_deg, degrees_to_radians, sin_deg};
use crate::Result;

/// Apparent angular diameter of the sun disc used for the sphere, in degrees.
const APPARENT_DIAMETER_DEGREES: f64 = 16.0 / 360.0;

/// Radiant power per unit of sphere area given to the point source.
const POWER_PER_UNIT_AREA: f64 = 200.0;

/// Position, size and power of the sun sphere in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunGeometry {
    /// East coordinate
    pub x: f64,
    /// North coordinate
    pub y: f64,
    /// Up coordinate
    pub z: f64,
    /// Radius of the sun sphere
    pub radius: f64,
    /// Power of the point source at the sphere center
    pub power: f64,
}

impl SunGeometry {
    /// Center of the sun sphere as `[x, y, z]`.
    #[must_use]
    pub const fn center(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Converts altitude/azimuth (degrees) at `distance` from the observer into scene geometry.
///
/// - `x = d cos(alt) sin(az)`, `y = d cos(alt) cos(az)`, `z = d sin(alt)`
/// - the radius makes the sphere subtend a fixed apparent size from the origin
/// - the power is `4π · 200 · d²`
///
/// # Errors
/// Returns `InvalidDistance` for a distance that is not positive and finite, and
/// `ComputationError` for non-finite angles or an altitude beyond ±90°.
///
/// # Example
/// ```
/// # use virtual_sun::geometry::to_cartesian;
/// let geometry = to_cartesian(0.0, 0.0, 10.0).unwrap();
/// assert!(geometry.x.abs() < 1e-12);
/// assert!((geometry.y - 10.0).abs() < 1e-12);
/// assert!(geometry.z.abs() < 1e-12);
/// ```
pub fn to_cartesian(altitude: f64, azimuth: f64, distance: f64) -> Result<SunGeometry> {
    let altitude = check_altitude(altitude)?;
    let azimuth = check_azimuth(azimuth)?;
    check_distance(distance)?;

    let horizontal = cos_deg(altitude) * distance;
    Ok(SunGeometry {
        x: horizontal * sin_deg(azimuth),
        y: horizontal * cos_deg(azimuth),
        z: sin_deg(altitude) * distance,
        radius: distance * degrees_to_radians(APPARENT_DIAMETER_DEGREES),
        power: 4.0 * PI * POWER_PER_UNIT_AREA * distance * distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sqrt;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_cardinal_directions() {
        let north = to_cartesian(0.0, 0.0, 10.0).unwrap();
        assert!(north.x.abs() < EPSILON);
        assert!((north.y - 10.0).abs() < EPSILON);
        assert!(north.z.abs() < EPSILON);

        let east = to_cartesian(0.0, 90.0, 10.0).unwrap();
        assert!((east.x - 10.0).abs() < EPSILON);
        assert!(east.y.abs() < EPSILON);

        let south = to_cartesian(0.0, 180.0, 10.0).unwrap();
        assert!((south.y + 10.0).abs() < EPSILON);

        let west = to_cartesian(0.0, 270.0, 10.0).unwrap();
        assert!((west.x + 10.0).abs() < EPSILON);

        let zenith = to_cartesian(90.0, 123.0, 10.0).unwrap();
        assert!((zenith.z - 10.0).abs() < EPSILON);
        assert!(zenith.x.abs() < EPSILON && zenith.y.abs() < EPSILON);
    }

    #[test]
    fn test_center_lies_on_sphere_of_distance() {
        let geometry = to_cartesian(40.364646284696356, 191.16161862997586, 1000.0).unwrap();
        let [x, y, z] = geometry.center();
        let norm = sqrt(x * x + y * y + z * z);
        assert!((norm - 1000.0).abs() < 1e-6);
        assert!(x < 0.0 && y < 0.0 && z > 0.0);
    }

    #[test]
    fn test_radius_and_power() {
        let geometry = to_cartesian(30.0, 200.0, 10.0).unwrap();
        assert!((geometry.radius - 10.0 * 16.0 / 360.0 * PI / 180.0).abs() < EPSILON);
        assert!((geometry.power - 4.0 * PI * 200.0 * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(to_cartesian(0.0, 0.0, 0.0).is_err());
        assert!(to_cartesian(0.0, 0.0, f64::NAN).is_err());
        assert!(to_cartesian(95.0, 0.0, 1.0).is_err());
        assert!(to_cartesian(0.0, f64::INFINITY, 1.0).is_err());
    }
}
