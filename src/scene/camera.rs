//! Camera rotation about an axis through the origin.

use super::SceneError;
use core::fmt;

/// A point or direction in scene coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    /// First coordinate
    pub x: f64,
    /// Second coordinate
    pub y: f64,
    /// Third coordinate
    pub z: f64,
}

impl Point3 {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product with `other`.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns the unit vector in the same direction, or `None` for a zero or non-finite length.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        Some(Self::new(self.x / norm, self.y / norm, self.z / norm))
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Rotation of a camera position by `theta` radians about an axis through the origin.
///
/// The matrix is the usual axis-angle (Rodrigues) form for a unit axis `u`:
/// `R = cos θ I + sin θ [u]ₓ + (1 - cos θ) u uᵀ`.
///
/// # Example
/// ```
/// use core::f64::consts::FRAC_PI_2;
/// use virtual_sun::scene::{CameraRotation, Point3};
///
/// let rotation = CameraRotation::new(
///     Point3::new(0.5, 0.0, 0.1),
///     Point3::new(0.0, 0.0, 2.0),
///     FRAC_PI_2,
/// ).unwrap();
/// let rotated = rotation.rotate();
/// assert!(rotated.x.abs() < 1e-12);
/// assert!((rotated.y - 0.5).abs() < 1e-12);
/// assert!((rotated.z - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRotation {
    camera: Point3,
    rows: [Point3; 3],
}

impl CameraRotation {
    /// Creates the rotation of `camera` about `axis` (normalized here) by `theta` radians.
    ///
    /// # Errors
    /// Returns `InvalidAxis` for an axis of zero or non-finite length.
    pub fn new(camera: Point3, axis: Point3, theta: f64) -> Result<Self, SceneError> {
        let u = axis.normalized().ok_or(SceneError::InvalidAxis)?;
        let (s, c) = theta.sin_cos();
        let ic = 1.0 - c;

        let rows = [
            Point3::new(
                u.x * u.x + (1.0 - u.x * u.x) * c,
                u.x * u.y * ic - u.z * s,
                u.x * u.z * ic + u.y * s,
            ),
            Point3::new(
                u.x * u.y * ic + u.z * s,
                u.y * u.y + (1.0 - u.y * u.y) * c,
                u.y * u.z * ic - u.x * s,
            ),
            Point3::new(
                u.x * u.z * ic - u.y * s,
                u.y * u.z * ic + u.x * s,
                u.z * u.z + (1.0 - u.z * u.z) * c,
            ),
        ];
        Ok(Self { camera, rows })
    }

    /// Gets the rows of the rotation matrix.
    #[must_use]
    pub const fn matrix(&self) -> [Point3; 3] {
        self.rows
    }

    /// Gets the camera position before rotation.
    #[must_use]
    pub const fn camera(&self) -> Point3 {
        self.camera
    }

    /// Rotated camera position.
    #[must_use]
    pub fn rotate(&self) -> Point3 {
        self.apply(&self.camera)
    }

    /// Applies the rotation to any point.
    #[must_use]
    pub fn apply(&self, point: &Point3) -> Point3 {
        Point3::new(
            point.dot(&self.rows[0]),
            point.dot(&self.rows[1]),
            point.dot(&self.rows[2]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-12;

    fn assert_close(actual: Point3, expected: Point3) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON
                && (actual.y - expected.y).abs() < EPSILON
                && (actual.z - expected.z).abs() < EPSILON,
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let camera = Point3::new(0.5, -0.2, 0.1);
        let rotation = CameraRotation::new(camera, Point3::new(1.0, 1.0, 1.0), 0.0).unwrap();
        assert_close(rotation.rotate(), camera);
    }

    #[test]
    fn test_quarter_turns_about_each_axis() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let z = Point3::new(0.0, 0.0, 1.0);

        assert_close(CameraRotation::new(x, z, FRAC_PI_2).unwrap().rotate(), y);
        assert_close(CameraRotation::new(y, x, FRAC_PI_2).unwrap().rotate(), z);
        assert_close(CameraRotation::new(z, y, FRAC_PI_2).unwrap().rotate(), x);
    }

    #[test]
    fn test_rotation_keeps_length_and_axis_component() {
        let camera = Point3::new(0.5, 0.3, -0.7);
        let axis = Point3::new(0.2, -1.0, 0.4);
        let unit = axis.normalized().unwrap();
        let rotation = CameraRotation::new(camera, axis, 1.234).unwrap();
        let rotated = rotation.rotate();

        assert!((rotated.norm() - camera.norm()).abs() < EPSILON);
        assert!((rotated.dot(&unit) - camera.dot(&unit)).abs() < EPSILON);
    }

    #[test]
    fn test_half_turn_about_z() {
        let camera = Point3::new(0.5, 0.0, 0.1);
        let rotation = CameraRotation::new(camera, Point3::new(0.0, 0.0, 1.0), PI).unwrap();
        assert_close(rotation.rotate(), Point3::new(-0.5, 0.0, 0.1));
    }

    #[test]
    fn test_matrix_is_orthonormal() {
        let rotation =
            CameraRotation::new(Point3::default(), Point3::new(3.0, 1.0, -2.0), 0.77).unwrap();
        let rows = rotation.matrix();
        for (i, a) in rows.iter().enumerate() {
            for (j, b) in rows.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((a.dot(b) - expected).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_zero_axis_rejected() {
        assert!(matches!(
            CameraRotation::new(Point3::new(1.0, 0.0, 0.0), Point3::default(), 1.0),
            Err(SceneError::InvalidAxis)
        ));
        assert!(matches!(
            CameraRotation::new(Point3::default(), Point3::new(f64::NAN, 0.0, 1.0), 1.0),
            Err(SceneError::InvalidAxis)
        ));
    }
}
