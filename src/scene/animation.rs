//! Animations as series of numbered scene files.
//!
//! A template scene holds two markers: one replaced by the animated value (a number or a
//! whole XML fragment), one replaced by the image path of the frame. [`SceneBatch`]
//! writes one scene per value next to the template, then runs the renderer over them.

use super::SceneError;
use log::info;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default marker replaced by the animated value.
pub const VALUE_MARKER: &str = "<!--Lambda-->";

/// Default marker replaced by the image path of the frame.
pub const NAME_MARKER: &str = "<!--Nom-->";

/// Default sub-directory receiving the generated scenes.
pub const SCENE_DIRECTORY: &str = "scenesAnimation";

/// Sub-directory of the rendered images.
const IMAGE_DIRECTORY: &str = "images";

/// Values of a parameter changing at `rate` per second, one per frame.
///
/// Returns `floor(duration · fps)` values `i · rate / fps`.
///
/// # Example
/// ```
/// # use virtual_sun::scene::animation_parameters;
/// let values = animation_parameters(2.0, 1.0, 25.0);
/// assert_eq!(values.len(), 50);
/// assert_eq!(values[1], 0.04);
/// assert!((values[49] - 1.96).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn animation_parameters(duration: f64, rate: f64, fps: f64) -> Vec<f64> {
    let frames = (duration * fps).floor();
    if !frames.is_finite() || frames <= 0.0 {
        return Vec::new();
    }
    (0..frames as usize)
        .map(|frame| frame as f64 * rate / fps)
        .collect()
}

/// External renderer invoked on each scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    /// Program to run
    pub program: String,
    /// Value passed to `-n`, the number of rendering threads
    pub threads: u32,
}

impl Renderer {
    /// Creates a renderer invocation.
    pub fn new(program: impl Into<String>, threads: u32) -> Self {
        Self {
            program: program.into(),
            threads,
        }
    }

    /// Builds `<program> -n <threads> <scene>`.
    #[must_use]
    pub fn command(&self, scene: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-n").arg(self.threads.to_string()).arg(scene);
        command
    }

    /// Renders one scene, waiting for the renderer to exit.
    ///
    /// # Errors
    /// Returns `Spawn` when the renderer cannot be started and `Renderer` when it exits
    /// unsuccessfully.
    pub fn render(&self, scene: &Path) -> Result<(), SceneError> {
        info!("rendering {}", scene.display());
        let status = self
            .command(scene)
            .status()
            .map_err(|source| SceneError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(SceneError::Renderer {
                scene: scene.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("virtuelium", 2)
    }
}

/// Numbered scenes generated from a template.
///
/// For a template `dir/house.xml`, scene `i` is written to
/// `dir/scenesAnimation/house<i>.xml` and renders to `dir/images/house<i>.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneBatch {
    template: PathBuf,
    value_marker: String,
    name_marker: String,
    scene_directory: String,
}

impl SceneBatch {
    /// Creates a batch for `template` with the default markers and sub-directory.
    ///
    /// # Errors
    /// Returns `NotXml` unless the template has an `.xml` extension.
    pub fn new(template: impl Into<PathBuf>) -> Result<Self, SceneError> {
        let template = template.into();
        if template.extension().is_none_or(|extension| extension != "xml") {
            return Err(SceneError::NotXml { path: template });
        }
        Ok(Self {
            template,
            value_marker: VALUE_MARKER.to_string(),
            name_marker: NAME_MARKER.to_string(),
            scene_directory: SCENE_DIRECTORY.to_string(),
        })
    }

    /// Replaces the markers substituted in the template.
    #[must_use]
    pub fn with_markers(mut self, value: impl Into<String>, name: impl Into<String>) -> Self {
        self.value_marker = value.into();
        self.name_marker = name.into();
        self
    }

    /// Replaces the sub-directory receiving the generated scenes.
    #[must_use]
    pub fn with_scene_directory(mut self, directory: impl Into<String>) -> Self {
        self.scene_directory = directory.into();
        self
    }

    /// Gets the template path.
    #[must_use]
    pub fn template(&self) -> &Path {
        &self.template
    }

    fn parent(&self) -> &Path {
        self.template.parent().unwrap_or_else(|| Path::new(""))
    }

    fn numbered(&self, directory: &str, index: usize, extension: &str) -> PathBuf {
        let stem = self
            .template
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        self.parent()
            .join(directory)
            .join(format!("{stem}{index}.{extension}"))
    }

    /// Path of scene `index`.
    #[must_use]
    pub fn scene_path(&self, index: usize) -> PathBuf {
        self.numbered(&self.scene_directory, index, "xml")
    }

    /// Path of the image rendered from scene `index`.
    #[must_use]
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.numbered(IMAGE_DIRECTORY, index, "png")
    }

    /// Writes one scene per value and returns their paths.
    ///
    /// Creates the scene sub-directory when missing and overwrites existing scenes.
    ///
    /// # Errors
    /// Returns `Io` when the template cannot be read or a scene cannot be written.
    pub fn generate<I>(&self, values: I) -> Result<Vec<PathBuf>, SceneError>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let template = std::fs::read_to_string(&self.template)
            .map_err(|e| SceneError::io(&self.template, e))?;
        info!("generating scenes from {}", self.template.display());

        let directory = self.parent().join(&self.scene_directory);
        std::fs::create_dir_all(&directory).map_err(|e| SceneError::io(&directory, e))?;

        let mut scenes = Vec::new();
        for (index, value) in values.into_iter().enumerate() {
            let image = self.image_path(index);
            let scene = template
                .replace(&self.value_marker, &value.to_string())
                .replace(&self.name_marker, &image.to_string_lossy());

            let path = self.scene_path(index);
            std::fs::write(&path, scene).map_err(|e| SceneError::io(&path, e))?;
            info!("wrote {}", path.display());
            scenes.push(path);
        }
        Ok(scenes)
    }

    /// Renders scenes `0..count` one after the other, stopping at the first failure.
    ///
    /// # Errors
    /// See [`Renderer::render`].
    pub fn render(&self, count: usize, renderer: &Renderer) -> Result<(), SceneError> {
        (0..count).try_for_each(|index| renderer.render(&self.scene_path(index)))
    }
}
