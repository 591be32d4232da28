//! Regression values for placing the sun, and the properties every placement must satisfy.

use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use virtual_sun::{Sun, SunGeometry, ephemeris, time::Instant};

const EPSILON: f64 = 1e-6;

#[test]
fn test_place_regression_data() -> Result<(), Box<dyn Error>> {
    let file = File::open("tests/data/regression/place_regression.csv")?;
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(false)
        .from_reader(file);

    let mut count = 0;
    for result in reader.records() {
        let record = result?;
        let local_time: NaiveDateTime = record[0].parse()?;
        let gmt_offset: f64 = record[1].parse()?;
        let latitude: f64 = record[2].parse()?;
        let longitude: f64 = record[3].parse()?;
        let expected_altitude: f64 = record[4].parse()?;
        let expected_azimuth: f64 = record[5].parse()?;

        let instant = Instant::from_naive(&local_time)?;
        let sun = Sun::new().place(latitude, longitude, instant, gmt_offset)?;

        assert!(
            (sun.altitude() - expected_altitude).abs() < EPSILON,
            "altitude {} != {expected_altitude} at {local_time}",
            sun.altitude()
        );
        assert!(
            (sun.azimuth() - expected_azimuth).abs() < EPSILON,
            "azimuth {} != {expected_azimuth} at {local_time}",
            sun.azimuth()
        );
        count += 1;
    }
    assert_eq!(count, 8);
    Ok(())
}

#[test]
fn test_reference_julian_day() {
    let instant = Instant::new(2011, 10, 7, 14, 0, 0, 0).unwrap();
    assert!((instant.julian_day() - 2455842.0833333335).abs() < 1e-9);
}

#[test]
fn test_azimuth_range_over_a_year_and_the_globe() {
    for month in 1..=12 {
        let instant = Instant::from_ymd_hms(2024, month, 15, 9, 45, 0).unwrap();
        let coordinates = ephemeris::sun_coordinates(&instant, 1.0).unwrap();
        for latitude in (-85..=85).step_by(17) {
            for longitude in (-180..=180).step_by(30) {
                let position = ephemeris::solar_position_with_coordinates(
                    f64::from(latitude),
                    f64::from(longitude),
                    &coordinates,
                )
                .unwrap();
                assert!((0.0..360.0).contains(&position.azimuth()));
                assert!((-90.0..=90.0).contains(&position.altitude()));
                assert_eq!(position.is_day(), position.altitude() > -0.25);
            }
        }
    }
}

#[test]
fn test_day_follows_the_sun_through_a_day() {
    // Aix-en-Provence at the summer solstice; at 06:00 the sun is at -0.14°, which counts as day
    let day_hours: Vec<u32> = (0..24)
        .filter(|&hour| {
            let instant = Instant::from_ymd_hms(2011, 6, 21, hour, 0, 0).unwrap();
            Sun::new().place(43.53, 5.45, instant, 2.0).unwrap().is_day()
        })
        .collect();
    assert_eq!(day_hours, (6..=21).collect::<Vec<_>>());
}

#[test]
fn test_geometry_of_reference_scenario() {
    let instant = Instant::from_ymd_hms(2011, 10, 7, 14, 0, 0).unwrap();
    let sun = Sun::new().place(43.53, 5.45, instant, 2.0).unwrap();
    let SunGeometry { x, y, z, .. } = sun.geometry(50.0).unwrap();

    // Early afternoon: high in the south, slightly west
    assert!(z > 30.0);
    assert!(y < -35.0);
    assert!(x < 0.0);
}
