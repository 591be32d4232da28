//! Reading, reddening and writing illuminant files.

use std::error::Error;
use tempfile::tempdir;
use virtual_sun::spectrum::xml::{
    FileError, VISIBLE_WINDOW, WriteOptions, read_illuminant, read_raw_measurements,
    save_illuminant,
};
use virtual_sun::spectrum::{REFERENCE_WAVELENGTH, normalize};
use virtual_sun::{Sun, time::Instant};

const D65: &str = "tests/data/spectra/d65.xml";
const RAW: &str = "tests/data/spectra/raw_measurements.txt";

#[test]
fn test_read_reference_illuminant() -> Result<(), Box<dyn Error>> {
    let d65 = read_illuminant(D65)?;
    assert_eq!(d65.len(), 41);
    assert_eq!(d65.samples()[0].wavelength, 380.0);
    assert_eq!(d65.samples()[40].wavelength, 780.0);

    let at_560 = d65.first_at_or_above(REFERENCE_WAVELENGTH).unwrap();
    assert_eq!(at_560.power, 100.0);
    assert_eq!(normalize(&d65)?, d65);
    Ok(())
}

#[test]
fn test_save_then_read_drops_window_bounds() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("Soleil.xml");

    let d65 = read_illuminant(D65)?;
    let written = save_illuminant(&d65, &path, &WriteOptions::default().with_comment("D65"))?;
    assert_eq!(written, 39);

    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("<!-- D65 -->"));

    let reread = read_illuminant(&path)?;
    assert_eq!(reread.samples(), &d65.samples()[1..40]);
    Ok(())
}

#[test]
fn test_raw_measurements_file() -> Result<(), Box<dyn Error>> {
    let raw = read_raw_measurements(RAW, VISIBLE_WINDOW)?;
    assert_eq!(raw.len(), 40);
    assert_eq!(raw.samples()[0].wavelength, 385.0);
    assert_eq!(raw.samples()[39].wavelength, 775.0);

    // Normalization falls on the first sample above 560 nm
    let normalized = normalize(&raw)?;
    let reference = normalized.first_at_or_above(REFERENCE_WAVELENGTH).unwrap();
    assert_eq!(reference.wavelength, 565.0);
    assert!((reference.power - 100.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let error = read_illuminant("tests/data/spectra/missing.xml").unwrap_err();
    assert!(matches!(error, FileError::Io { .. }));
    assert!(error.to_string().contains("missing.xml"));
}

#[test]
fn test_sun_spectra_through_the_day() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let d65 = read_illuminant(D65)?;

    let mut previous_blue = f64::INFINITY;
    for (index, hour) in [14, 17, 19, 20].into_iter().enumerate() {
        let instant = Instant::from_ymd_hms(2011, 6, 21, hour, 0, 0)?;
        let sun = Sun::new().place(43.53, 5.45, instant, 2.0)?;
        let spectrum = sun.spectrum(&d65)?;

        let path = dir.path().join(format!("Soleil{index}.xml"));
        save_illuminant(&spectrum, &path, &WriteOptions::default())?;
        let reread = read_illuminant(&path)?;

        // The sun sinks through the afternoon, so blue keeps fading against 560 nm
        let blue = reread.first_at_or_above(400.0).unwrap().power;
        assert!(blue < previous_blue);
        previous_blue = blue;

        let at_560 = reread.first_at_or_above(REFERENCE_WAVELENGTH).unwrap();
        assert!((at_560.power - 100.0).abs() < 1e-9);
    }
    Ok(())
}
