//! Virtual Sun command-line tool
//!
//! Places the sun for a location and local time, writes its reddened spectrum and prints
//! or generates scene fragments for the renderer.
//!
//! Usage:
//! ```text
//! virtual-sun position --latitude 43.53 --longitude 5.45 --time 2011-10-07T14:00:00 --gmt-offset 2
//! virtual-sun spectrum --latitude 43.53 --longitude 5.45 --time 2011-10-07T14:00:00 --gmt-offset 2 \
//!     --reference SpectreReference.xml --output Soleil.xml
//! virtual-sun source ... --reference SpectreReference.xml --frames 3 --template projects/House/House.xml
//! virtual-sun camera --origin 0.5,0,0.1 --fov 13 --template projects/DynamicCamera/DynamicCamera.xml --render
//! ```

use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, TimeDelta};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use virtual_sun::atmosphere::{
    ATMOSPHERE_THICKNESS_METERS, EARTH_RADIUS_METERS, RAYLEIGH_COEFFICIENT,
};
use virtual_sun::scene::{self, CameraRotation, CameraView, Point3, Renderer, SceneBatch};
use virtual_sun::spectrum::xml::{self, VISIBLE_WINDOW, WriteOptions};
use virtual_sun::time::Instant;
use virtual_sun::{Atmosphere, PlacedSun, Spectrum, Sun};

/// Default spectrum referenced by sun fragments when no spectrum is generated
const DEFAULT_SPECTRUM_PATH: &str = "data/colorimetry/illuminants/D65.xml";

/// Upper bound on the frames a single run generates
const MAX_FRAMES: u32 = 10_000;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "virtual-sun",
    about = "Sun position, atmospheric reddening and scene fragments for spectral renderers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the solar altitude and azimuth
    Position {
        #[command(flatten)]
        placement: Placement,
    },

    /// Write the sun spectrum for a place and time as an illuminant file
    Spectrum {
        #[command(flatten)]
        placement: Placement,

        #[command(flatten)]
        reference: ReferenceArgs,

        #[command(flatten)]
        atmosphere: AtmosphereArgs,

        /// Output illuminant file
        #[arg(short, long)]
        output: PathBuf,

        /// Comment written at the top of the file (defaults to the time)
        #[arg(long)]
        comment: Option<String>,
    },

    /// Print or generate sun source fragments, one per frame
    Source {
        #[command(flatten)]
        placement: Placement,

        /// Distance of the sun sphere from the scene origin
        #[arg(long, default_value_t = 10.0)]
        distance: f64,

        /// Reference illuminant; when given, a spectrum file is written per frame
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Read the reference as raw spectrometer output
        #[arg(long, requires = "reference")]
        raw: bool,

        #[command(flatten)]
        atmosphere: AtmosphereArgs,

        /// Directory receiving the generated spectrum files
        #[arg(long, default_value = "data/colorimetry/illuminants")]
        spectrum_dir: PathBuf,

        /// Spectrum referenced by the fragments when no reference is given
        #[arg(long, default_value = DEFAULT_SPECTRUM_PATH)]
        spectrum: String,

        /// Number of frames
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Time between frames in minutes
        #[arg(long, default_value_t = 60, allow_hyphen_values = true)]
        step_minutes: i64,

        #[command(flatten)]
        output: SceneOutput,
    },

    /// Print or generate camera fragments rotating about an axis
    Camera {
        /// Camera position before rotation (x,y,z)
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        origin: Point3,

        /// Rotation axis through the origin (x,y,z)
        #[arg(
            long,
            value_parser = parse_point,
            default_value = "0,0,1",
            allow_hyphen_values = true
        )]
        axis: Point3,

        /// Point the camera looks at (x,y,z)
        #[arg(
            long,
            value_parser = parse_point,
            default_value = "0,0,0",
            allow_hyphen_values = true
        )]
        look_at: Point3,

        /// Up direction (x,y,z)
        #[arg(
            long,
            value_parser = parse_point,
            default_value = "0,0,1",
            allow_hyphen_values = true
        )]
        up: Point3,

        /// Field of view in degrees
        #[arg(long, default_value_t = 45.0)]
        fov: f64,

        /// Rotation step in degrees
        #[arg(long, default_value_t = 10.0)]
        step_degrees: f64,

        /// Last rotation angle in degrees
        #[arg(long, default_value_t = 90.0)]
        max_degrees: f64,

        #[command(flatten)]
        output: SceneOutput,
    },
}

/// Observer location and local time
#[derive(Args, Debug)]
struct Placement {
    /// Observer latitude in degrees, positive north
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    /// Observer longitude in degrees, positive east
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// Local civil time, e.g. 2011-10-07T14:00:00
    #[arg(long)]
    time: NaiveDateTime,

    /// Offset of the local time from Greenwich, in hours
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    gmt_offset: f64,
}

impl Placement {
    fn place(&self, time: &NaiveDateTime) -> Result<PlacedSun> {
        let instant = Instant::from_naive(time)?;
        Ok(Sun::new().place(self.latitude, self.longitude, instant, self.gmt_offset)?)
    }
}

#[derive(Args, Debug)]
struct ReferenceArgs {
    /// Reference illuminant file
    #[arg(long)]
    reference: PathBuf,

    /// Read the reference as raw spectrometer output
    #[arg(long)]
    raw: bool,
}

#[derive(Args, Debug)]
struct AtmosphereArgs {
    /// Atmosphere thickness in meters
    #[arg(long, default_value_t = ATMOSPHERE_THICKNESS_METERS)]
    thickness: f64,

    /// Rayleigh scattering coefficient in m³
    #[arg(long, default_value_t = RAYLEIGH_COEFFICIENT)]
    scattering: f64,
}

impl AtmosphereArgs {
    fn model(&self) -> Result<Atmosphere> {
        Ok(Atmosphere::new(
            EARTH_RADIUS_METERS,
            self.thickness,
            self.scattering,
        )?)
    }
}

/// Where fragments go: stdout, or numbered scenes generated from a template
#[derive(Args, Debug)]
struct SceneOutput {
    /// Scene template; fragments replace its `<!--Lambda-->` marker
    #[arg(long)]
    template: Option<PathBuf>,

    /// Render the generated scenes
    #[arg(long, requires = "template")]
    render: bool,

    /// Renderer program
    #[arg(long, default_value = "virtuelium")]
    renderer: String,

    /// Rendering threads passed to the renderer
    #[arg(long, default_value_t = 2)]
    threads: u32,
}

impl SceneOutput {
    fn emit(&self, fragments: &[String]) -> Result<()> {
        let Some(template) = &self.template else {
            println!("{}", fragments.join("\n\n"));
            return Ok(());
        };

        let batch = SceneBatch::new(template.clone())?;
        let scenes = batch.generate(fragments)?;
        info!("generated {} scenes", scenes.len());

        if self.render {
            let renderer = Renderer::new(self.renderer.clone(), self.threads);
            batch.render(scenes.len(), &renderer)?;
        }
        Ok(())
    }
}

fn parse_point(s: &str) -> Result<Point3, String> {
    let coordinates = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in '{s}': {e}"))?;
    match coordinates.as_slice() {
        &[x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(format!("expected x,y,z but got '{s}'")),
    }
}

/// Local time of `frame`, `step_minutes` apart from `start`.
fn frame_time(start: &NaiveDateTime, step_minutes: i64, frame: u32) -> Result<NaiveDateTime> {
    let offset = step_minutes
        .checked_mul(i64::from(frame))
        .and_then(TimeDelta::try_minutes)
        .context("time step out of range")?;
    start
        .checked_add_signed(offset)
        .context("frame time out of range")
}

/// Rotation angles `0, step, 2·step, ...` up to and including `max_degrees`.
fn sweep_angles(step_degrees: f64, max_degrees: f64) -> Result<Vec<f64>> {
    if step_degrees.is_nan()
        || step_degrees <= 0.0
        || !max_degrees.is_finite()
        || max_degrees < 0.0
    {
        bail!("rotation step must be positive and the last angle non-negative");
    }

    // Tolerate rounding so that 0.3 / 0.1 still reaches the last angle
    let steps = (max_degrees / step_degrees + 1e-9).floor();
    if steps >= f64::from(MAX_FRAMES) {
        bail!("a {step_degrees}° step up to {max_degrees}° exceeds {MAX_FRAMES} frames");
    }

    // Bounded by MAX_FRAMES above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as u32;
    Ok((0..=steps)
        .map(|step| f64::from(step) * step_degrees)
        .collect())
}

fn load_reference(path: &Path, raw: bool) -> Result<Spectrum> {
    let spectrum = if raw {
        xml::read_raw_measurements(path, VISIBLE_WINDOW)
    } else {
        xml::read_illuminant(path)
    };
    spectrum.with_context(|| format!("failed to load reference spectrum {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Position { placement } => {
            let sun = placement.place(&placement.time)?;
            println!("altitude: {:.4}°", sun.altitude());
            println!("azimuth:  {:.4}°", sun.azimuth());
            println!("day:      {}", sun.is_day());
            Ok(())
        }
        Command::Spectrum {
            placement,
            reference,
            atmosphere,
            output,
            comment,
        } => {
            let sun = placement.place(&placement.time)?;
            let reference = load_reference(&reference.reference, reference.raw)?;
            let spectrum = sun.spectrum_in(&atmosphere.model()?, &reference)?;

            let comment = comment.unwrap_or_else(|| placement.time.to_string());
            let options = WriteOptions::default().with_comment(comment);
            xml::save_illuminant(&spectrum, &output, &options)?;
            Ok(())
        }
        Command::Source {
            placement,
            distance,
            reference,
            raw,
            atmosphere,
            spectrum_dir,
            spectrum,
            frames,
            step_minutes,
            output,
        } => {
            if frames > MAX_FRAMES {
                bail!("{frames} frames requested, at most {MAX_FRAMES} are supported");
            }

            let reference = reference
                .as_deref()
                .map(|path| load_reference(path, raw))
                .transpose()?;
            let atmosphere = atmosphere.model()?;
            if reference.is_some() {
                std::fs::create_dir_all(&spectrum_dir).with_context(|| {
                    format!("failed to create {}", spectrum_dir.display())
                })?;
            }

            let mut fragments = Vec::new();
            for frame in 0..frames {
                let time = frame_time(&placement.time, step_minutes, frame)?;
                let sun = placement.place(&time)?;

                let spectrum_path = match &reference {
                    Some(reference) => {
                        let path = scene::sun_spectrum_path(&spectrum_dir, &frame.to_string());
                        let spectrum = sun.spectrum_in(&atmosphere, reference)?;
                        let options = WriteOptions::default().with_comment(time.to_string());
                        xml::save_illuminant(&spectrum, &path, &options)?;
                        path.display().to_string()
                    }
                    None => spectrum.clone(),
                };

                let geometry = sun.geometry(distance)?;
                fragments.push(scene::sun_source_fragment(
                    &geometry,
                    &spectrum_path,
                    &time.to_string(),
                ));
            }
            output.emit(&fragments)
        }
        Command::Camera {
            origin,
            axis,
            look_at,
            up,
            fov,
            step_degrees,
            max_degrees,
            output,
        } => {
            let mut fragments = Vec::new();
            for angle in sweep_angles(step_degrees, max_degrees)? {
                let rotation = CameraRotation::new(origin, axis, angle.to_radians())?;
                let view = CameraView::perspective(rotation.rotate(), look_at, up, fov)
                    .with_comment(format!("{angle} degree"));
                fragments.push(scene::camera_fragment(&view));
            }
            output.emit(&fragments)
        }
    }
}
