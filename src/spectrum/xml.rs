//! Illuminant spectrum files.
//!
//! The renderer reads spectra as a flat list of entries:
//!
//! ```xml
//! <!-- D65 seen through 30° of atmosphere -->
//! <illuminant>
//!     <entry wavelength="400" value="82.75"/>
//!     <entry wavelength="410" value="91.49"/>
//! </illuminant>
//! ```
//!
//! Spectrometers export two whitespace-separated columns, sometimes with a decimal comma;
//! [`from_raw_measurements`] turns those into a [`Spectrum`].

use super::{Spectrum, SpectrumSample};
use log::{debug, info};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Wavelengths (nm) kept by default when writing, both bounds excluded.
pub const VISIBLE_WINDOW: (f64, f64) = (380.0, 780.0);

const ROOT_TAG: &str = "illuminant";
const ENTRY_TAG: &str = "entry";

/// Errors raised while reading or writing spectrum files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened, read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// An entry or measurement line lacks a usable wavelength or value.
    #[error("malformed entry: {message}")]
    MalformedEntry {
        /// What is wrong with the entry.
        message: String,
    },
    /// The entries do not form a valid spectrum.
    #[error(transparent)]
    Spectrum(#[from] crate::Error),
}

impl FileError {
    /// Wraps an I/O error on `path`.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedEntry {
            message: message.into(),
        }
    }
}

/// Options for writing an illuminant file.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Only samples strictly inside `(min, max)` nm are written.
    pub window: (f64, f64),
    /// Comment written before the root element.
    pub comment: Option<String>,
}

impl WriteOptions {
    /// Sets the comment written before the root element.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the wavelength window, bounds excluded.
    #[must_use]
    pub const fn with_window(mut self, min: f64, max: f64) -> Self {
        self.window = (min, max);
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            window: VISIBLE_WINDOW,
            comment: None,
        }
    }
}

/// Makes `text` safe inside `<!-- -->`: consecutive dashes are split with a space.
///
/// Comments are not entity-decoded, so everything else is kept as written.
pub(crate) fn comment_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn inside(window: (f64, f64), wavelength: f64) -> bool {
    wavelength > window.0 && wavelength < window.1
}

/// Parses an illuminant document.
///
/// Entries are taken in document order and must have ascending wavelengths.
///
/// # Errors
/// Returns `Xml` for malformed documents, `MalformedEntry` for entries missing a numeric
/// `wavelength` or `value`, and `Spectrum` when the entries do not form a valid spectrum.
///
/// # Example
/// ```
/// # use virtual_sun::spectrum::xml::parse_illuminant;
/// let spectrum = parse_illuminant(
///     r#"<illuminant><entry wavelength="550" value="9.5"/><entry wavelength="560" value="10"/></illuminant>"#,
/// ).unwrap();
/// assert_eq!(spectrum.len(), 2);
/// assert_eq!(spectrum.samples()[1].power, 10.0);
/// ```
pub fn parse_illuminant(document: &str) -> Result<Spectrum, FileError> {
    read_illuminant_from(document.as_bytes())
}

/// Reads an illuminant document from a buffered reader.
///
/// # Errors
/// See [`parse_illuminant`].
pub fn read_illuminant_from<R: BufRead>(source: R) -> Result<Spectrum, FileError> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);

    let mut samples = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.name().as_ref() == ENTRY_TAG.as_bytes() =>
            {
                samples.push(parse_entry(e)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!("parsed {} illuminant entries", samples.len());
    Ok(Spectrum::new(samples)?)
}

fn parse_entry(entry: &BytesStart<'_>) -> Result<SpectrumSample, FileError> {
    let mut wavelength = None;
    let mut value = None;
    for attr in entry.attributes() {
        let attr = attr.map_err(|e| FileError::malformed(e.to_string()))?;
        let key = attr.key.as_ref();
        if key == b"wavelength" {
            wavelength = Some(parse_number(&attr.value)?);
        } else if key == b"value" {
            value = Some(parse_number(&attr.value)?);
        }
    }

    match (wavelength, value) {
        (Some(wavelength), Some(value)) => Ok(SpectrumSample::new(wavelength, value)),
        (None, _) => Err(FileError::malformed("entry without wavelength")),
        (_, None) => Err(FileError::malformed("entry without value")),
    }
}

fn parse_number(bytes: &[u8]) -> Result<f64, FileError> {
    let text = std::str::from_utf8(bytes).map_err(|e| FileError::malformed(e.to_string()))?;
    text.trim()
        .parse::<f64>()
        .map_err(|_| FileError::malformed(format!("`{text}` is not a number")))
}

/// Reads an illuminant file.
///
/// # Errors
/// Returns `Io` when the file cannot be opened, otherwise see [`parse_illuminant`].
pub fn read_illuminant(path: impl AsRef<Path>) -> Result<Spectrum, FileError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let spectrum = read_illuminant_from(BufReader::new(file))?;
    info!("read {} samples from {}", spectrum.len(), path.display());
    Ok(spectrum)
}

/// Writes `spectrum` as an illuminant document and returns the number of entries written.
///
/// # Errors
/// Returns `Xml` when writing to `sink` fails.
pub fn write_illuminant<W: Write>(
    spectrum: &Spectrum,
    sink: W,
    options: &WriteOptions,
) -> Result<usize, FileError> {
    let mut writer = Writer::new_with_indent(sink, b' ', 4);

    if let Some(comment) = &options.comment {
        let text = format!(" {} ", comment_text(comment));
        writer.write_event(Event::Comment(BytesText::from_escaped(text)))?;
    }
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    let mut written = 0;
    for sample in spectrum.iter().filter(|s| inside(options.window, s.wavelength)) {
        let mut entry = BytesStart::new(ENTRY_TAG);
        entry.push_attribute(("wavelength", sample.wavelength.to_string().as_str()));
        entry.push_attribute(("value", sample.power.to_string().as_str()));
        writer.write_event(Event::Empty(entry))?;
        written += 1;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    Ok(written)
}

/// Writes `spectrum` to an illuminant file, replacing it if present.
///
/// # Errors
/// Returns `Io` when the file cannot be created or flushed.
pub fn save_illuminant(
    spectrum: &Spectrum,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<usize, FileError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| FileError::io(path, e))?;
    let mut sink = BufWriter::new(file);
    let written = write_illuminant(spectrum, &mut sink, options)?;
    sink.flush().map_err(|e| FileError::io(path, e))?;
    info!("wrote {written} samples to {}", path.display());
    Ok(written)
}

/// Converts spectrometer output into a spectrum.
///
/// Only lines starting with a digit are considered. A comma is read as a decimal point,
/// the first two whitespace-separated columns are wavelength and power, and only samples
/// strictly inside `window` are kept.
///
/// # Errors
/// Returns `MalformedEntry` for a data line without two numeric columns, and `Spectrum`
/// when nothing is left inside the window or the wavelengths are not ascending.
///
/// # Example
/// ```
/// # use virtual_sun::spectrum::xml::{from_raw_measurements, VISIBLE_WINDOW};
/// let raw = "Idalion 794\nnm\tcounts\n379,5\t0,1\n400,0\t12,5\n560,0\t40,25\n";
/// let spectrum = from_raw_measurements(raw, VISIBLE_WINDOW).unwrap();
/// assert_eq!(spectrum.len(), 2);
/// assert_eq!(spectrum.samples()[1].power, 40.25);
/// ```
pub fn from_raw_measurements(text: &str, window: (f64, f64)) -> Result<Spectrum, FileError> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let line = line.replace(',', ".");
        let mut columns = line.split_whitespace();
        let (Some(wavelength), Some(power)) = (columns.next(), columns.next()) else {
            return Err(FileError::malformed(format!(
                "line {} has fewer than two columns",
                index + 1
            )));
        };
        let wavelength = parse_number(wavelength.as_bytes())?;
        if inside(window, wavelength) {
            samples.push(SpectrumSample::new(wavelength, parse_number(power.as_bytes())?));
        }
    }
    Ok(Spectrum::new(samples)?)
}

/// Reads spectrometer output from a file; see [`from_raw_measurements`].
///
/// # Errors
/// Returns `Io` when the file cannot be read, otherwise see [`from_raw_measurements`].
pub fn read_raw_measurements(
    path: impl AsRef<Path>,
    window: (f64, f64),
) -> Result<Spectrum, FileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    from_raw_measurements(&text, window)
}
