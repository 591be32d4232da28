use chrono::{Duration, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use virtual_sun::{
    Atmosphere, Spectrum, Sun, ephemeris, solar_position_with_coordinates, sun_coordinates,
    time::Instant,
};

fn reference_spectrum() -> Spectrum {
    // 1 nm steps across the visible range
    Spectrum::from_pairs((380..=780).map(|nm| (f64::from(nm), 100.0))).unwrap()
}

fn benchmark_single_calculation(c: &mut Criterion) {
    let instant = Instant::from_ymd_hms(2011, 10, 7, 14, 0, 0).unwrap();

    c.bench_function("solar_position_single", |b| {
        b.iter(|| {
            ephemeris::solar_position(
                black_box(43.53),
                black_box(5.45),
                black_box(&instant),
                black_box(2.0),
            )
            .unwrap()
        })
    });

    let sun = Sun::new().place(43.53, 5.45, instant, 2.0).unwrap();
    let reference = reference_spectrum();
    c.bench_function("sun_spectrum_401_samples", |b| {
        b.iter(|| sun.spectrum(black_box(&reference)).unwrap())
    });

    let atmosphere = Atmosphere::standard();
    c.bench_function("attenuate_401_samples", |b| {
        b.iter(|| {
            atmosphere
                .attenuate(black_box(&reference), black_box(12.5))
                .unwrap()
        })
    });
}

fn benchmark_time_series_fixed_location(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_series_fixed_location");

    let base = "2011-01-01T00:00:00".parse::<NaiveDateTime>().unwrap();

    for &count in &[1000_u64, 8760] {
        group.throughput(Throughput::Elements(count));

        let instants: Vec<Instant> = (0..count)
            .map(|i| Instant::from_naive(&(base + Duration::hours(i as i64))).unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::new("place", count), &count, |b, _| {
            b.iter(|| {
                for &instant in &instants {
                    let _sun = Sun::new()
                        .place(black_box(43.53), black_box(5.45), instant, black_box(1.0))
                        .unwrap();
                }
            })
        });
    }

    group.finish();
}

fn benchmark_coordinate_sweep_fixed_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_sweep_fixed_time");

    let instant = Instant::from_ymd_hms(2011, 6, 21, 12, 0, 0).unwrap();

    for &grid_size in &[30, 150] {
        let count = grid_size * grid_size;
        group.throughput(Throughput::Elements(count as u64));

        let coordinates: Vec<(f64, f64)> = (0..grid_size)
            .flat_map(|i| {
                (0..grid_size).map(move |j| {
                    let lat = 30.0 + f64::from(i) * 0.1;
                    let lon = -5.0 + f64::from(j) * 0.1;
                    (lat, lon)
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("full", format!("{grid_size}x{grid_size}")),
            &count,
            |b, _| {
                b.iter(|| {
                    for &(lat, lon) in &coordinates {
                        let _result = ephemeris::solar_position(
                            black_box(lat),
                            black_box(lon),
                            &instant,
                            black_box(0.0),
                        )
                        .unwrap();
                    }
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("shared_coordinates", format!("{grid_size}x{grid_size}")),
            &count,
            |b, _| {
                b.iter(|| {
                    let sun = sun_coordinates(&instant, 0.0).unwrap();
                    for &(lat, lon) in &coordinates {
                        let _result =
                            solar_position_with_coordinates(black_box(lat), black_box(lon), &sun)
                                .unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_calculation,
    benchmark_time_series_fixed_location,
    benchmark_coordinate_sweep_fixed_time
);
criterion_main!(benches);
