//! Scene-file support for the spectral renderer.
//!
//! - [`fragment`]: XML fragments for the sun source and the camera geometry
//! - [`camera`]: rotation of a camera position about an axis
//! - [`animation`]: numbered scene files from a template, and batch rendering

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

pub mod animation;
pub mod camera;
pub mod fragment;

pub use animation::{Renderer, SceneBatch, animation_parameters};
pub use camera::{CameraRotation, Point3};
pub use fragment::{CameraView, camera_fragment, sun_source_fragment, sun_spectrum_path};

/// Errors raised while generating or rendering scene files.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A scene file or directory could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Scene templates must be `.xml` files.
    #[error("scene template {} is not an .xml file", path.display())]
    NotXml {
        /// The rejected template path.
        path: PathBuf,
    },
    /// A rotation axis of zero length.
    #[error("rotation axis must have a non-zero, finite length")]
    InvalidAxis,
    /// The renderer could not be started.
    #[error("failed to start renderer `{program}`: {source}")]
    Spawn {
        /// Renderer program.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The renderer ran but reported a failure.
    #[error("renderer failed on {} ({status})", scene.display())]
    Renderer {
        /// Scene being rendered.
        scene: PathBuf,
        /// Exit status of the renderer.
        status: ExitStatus,
    },
}

impl SceneError {
    /// Wraps an I/O error on `path`.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
