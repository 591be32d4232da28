//! XML fragments pasted into scene files.

use super::camera::Point3;
use crate::geometry::SunGeometry;
use crate::spectrum::xml::comment_text;
use quick_xml::escape::escape;
use std::path::{Path, PathBuf};

/// Name of the sun source in scene files.
const SUN_SOURCE_NAME: &str = "Soleil";

/// Path of the spectrum file of the sun for the scene numbered `index`.
///
/// # Example
/// ```
/// # use virtual_sun::scene::sun_spectrum_path;
/// let path = sun_spectrum_path("data/colorimetry/illuminants", "3");
/// assert!(path.ends_with("Soleil3.xml"));
/// ```
pub fn sun_spectrum_path(directory: impl AsRef<Path>, index: &str) -> PathBuf {
    directory
        .as_ref()
        .join(format!("{SUN_SOURCE_NAME}{index}.xml"))
}

/// Renders the sun as a sphere holding a point light.
///
/// # Example
/// ```
/// # use virtual_sun::{geometry::to_cartesian, scene::sun_source_fragment};
/// let geometry = to_cartesian(40.0, 190.0, 50.0).unwrap();
/// let xml = sun_source_fragment(&geometry, "data/illuminants/Soleil0.xml", "2011-10-07 14:00");
/// assert!(xml.starts_with("<!-- Soleil 2011-10-07 14:00 -->"));
/// assert!(xml.contains(r#"spectrum="data/illuminants/Soleil0.xml""#));
/// ```
pub fn sun_source_fragment(geometry: &SunGeometry, spectrum_path: &str, comment: &str) -> String {
    let SunGeometry {
        x,
        y,
        z,
        radius,
        power,
    } = *geometry;
    let spectrum = escape(spectrum_path);
    let comment = comment_text(comment);
    format!(
        r#"<!-- {SUN_SOURCE_NAME} {comment} -->
<source name="{SUN_SOURCE_NAME}">
    <geometry type="Sphere" radius="{radius}" centerx="{x}" centery="{y}" centerz="{z}" />
    <source type="Point" spectrum="{spectrum}" power="{power}"
        originx="{x}" originy="{y}" originz="{z}" radius="{radius}" />
</source>"#
    )
}

/// Camera placement for a `<geometry>` fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraView {
    /// Camera position
    pub origin: Point3,
    /// Point the camera looks at
    pub look_at: Point3,
    /// Up direction
    pub up: Point3,
    /// Field of view in degrees
    pub fov: f64,
    /// Camera type understood by the renderer
    pub projection: String,
    /// Comment written before the fragment
    pub comment: String,
}

impl CameraView {
    /// Creates a perspective camera view without comment.
    #[must_use]
    pub fn perspective(origin: Point3, look_at: Point3, up: Point3, fov: f64) -> Self {
        Self {
            origin,
            look_at,
            up,
            fov,
            projection: "Perspective".to_string(),
            comment: String::new(),
        }
    }

    /// Sets the comment written before the fragment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the camera type.
    #[must_use]
    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = projection.into();
        self
    }
}

/// Renders the camera `<geometry>` element.
///
/// # Example
/// ```
/// # use virtual_sun::scene::{camera_fragment, CameraView, Point3};
/// let view = CameraView::perspective(
///     Point3::new(0.5, 0.0, 0.1),
///     Point3::default(),
///     Point3::new(0.0, 0.0, 1.0),
///     13.0,
/// )
/// .with_comment("0 degree");
/// let xml = camera_fragment(&view);
/// assert!(xml.starts_with("<!-- Camera 0 degree -->"));
/// assert!(xml.contains(r#"type="Perspective""#));
/// assert!(xml.contains(r#"upz="1""#));
/// ```
pub fn camera_fragment(view: &CameraView) -> String {
    let CameraView {
        origin: o,
        look_at: l,
        up: u,
        fov,
        ..
    } = view;
    let projection = escape(&view.projection);
    format!(
        r#"<!-- Camera {comment} -->
<geometry type="{projection}"
       fov="{fov}"
       originx="{ox}"  originy="{oy}" originz="{oz}"
       lookatx="{lx}"  lookaty="{ly}" lookatz="{lz}"
       upx="{ux}"      upy="{uy}"     upz="{uz}" />"#,
        comment = comment_text(&view.comment),
        ox = o.x,
        oy = o.y,
        oz = o.z,
        lx = l.x,
        ly = l.y,
        lz = l.z,
        ux = u.x,
        uy = u.y,
        uz = u.z,
    )
}
