use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Cursor},
};

use grib_reader::{
    Coordinate, GribError, ParseError, ProductContent, ReadOptions, ReprContent, Template,
    TemplateInfo,
};

mod utils;
use utils::*;

fn temperature_2x2(values: &[u8]) -> Vec<u8> {
    grib2_message(
        0,
        &[
            identification(34),
            latlon_grid((2, 2), (36_000_000, 135_000_000), (35_000_000, 136_000_000), 0),
            product(0, (0, 0), (100, 85000), 6),
            simple_packing(4, 0.0, (0, 0), 8),
            no_bitmap(),
            data(values),
        ],
    )
}

#[test]
fn decoding_a_single_dataset() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let bytes = temperature_2x2(&[10, 20, 30, 40]);
    let grib2 = grib_reader::from_slice(&bytes)?;
    assert_eq!(grib2.len(), 1);

    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    let points = dataset.points()?.collect::<Vec<_>>();
    assert_eq!(
        points,
        vec![
            (Coordinate::new(36.0, 135.0), 10.0),
            (Coordinate::new(36.0, 136.0), 20.0),
            (Coordinate::new(35.0, 135.0), 30.0),
            (Coordinate::new(35.0, 136.0), 40.0),
        ]
    );
    Ok(())
}

#[test]
fn bitmap_removes_absent_points() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    // 3 x 3 points, the second and the sixth absent
    let bytes = grib2_message(
        0,
        &[
            identification(34),
            latlon_grid((3, 3), (2_000_000, 0), (0, 2_000_000), 0),
            product(0, (0, 0), (1, 0), 0),
            simple_packing(7, 0.0, (0, 0), 8),
            bitmap(&[0b1011_1011, 0b1000_0000]),
            data(&[1, 2, 3, 4, 5, 6, 7]),
        ],
    );
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;

    let points = dataset.points()?.collect::<Vec<_>>();
    assert_eq!(points.len(), 9 - 2);
    let coords = points.iter().map(|(c, _)| *c).collect::<HashSet<_>>();
    assert_eq!(coords.len(), points.len());
    assert!(!coords.contains(&Coordinate::new(2.0, 1.0)));
    assert!(!coords.contains(&Coordinate::new(1.0, 2.0)));
    assert_eq!(
        points.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
    );

    let map = dataset.to_map()?;
    assert_eq!(map.get(&Coordinate::new(0.0, 2.0)), Some(&7.0));
    Ok(())
}

#[test]
fn bit_width_zero_yields_the_reference_value() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = grib2_message(
        0,
        &[
            identification(34),
            latlon_grid((2, 2), (1_000_000, 0), (0, 1_000_000), 0),
            product(0, (0, 0), (1, 0), 0),
            simple_packing(4, 273.15, (0, 0), 0),
            no_bitmap(),
            data(&[]),
        ],
    );
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    let values = dataset.values()?.collect::<Vec<_>>();
    assert_eq!(values, vec![273.15; 4]);
    Ok(())
}

#[test]
fn decoded_values_do_not_decrease_with_the_encoded_value() -> Result<(), Box<dyn std::error::Error>>
{
    let encoded = (0..=255).collect::<Vec<u8>>();
    let bytes = grib2_message(
        0,
        &[
            identification(34),
            latlon_grid((16, 16), (15_000_000, 0), (0, 15_000_000), 0),
            product(0, (0, 0), (1, 0), 0),
            simple_packing(256, 10.0, (2, 1), 8),
            no_bitmap(),
            data(&encoded),
        ],
    );
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    let values = dataset.values()?.collect::<Vec<_>>();
    assert_eq!(values.len(), 256);
    assert!((values[0] - 1.0).abs() < 1e-6);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    Ok(())
}

#[test]
fn multiple_messages_and_datasets() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut bytes = temperature_2x2(&[1, 2, 3, 4]);
    bytes.extend(grib2_message(
        0,
        &[
            identification(7),
            latlon_grid((2, 2), (36_000_000, 135_000_000), (35_000_000, 136_000_000), 0),
            product(0, (2, 2), (103, 10), 0),
            simple_packing(4, 0.0, (0, 0), 8),
            no_bitmap(),
            data(&[5, 6, 7, 8]),
            ensemble_product((2, 3), (3, 5, 10)),
            simple_packing(4, 0.0, (0, 0), 8),
            no_bitmap(),
            data(&[9, 10, 11, 12]),
        ],
    ));

    let grib2 = grib_reader::from_reader(Cursor::new(bytes))?;
    assert_eq!(grib2.len(), 3);

    let indices = grib2.iter().map(|(i, _)| i).collect::<Vec<_>>();
    assert_eq!(indices, vec![(0, 0), (1, 0), (1, 1)]);

    let names = grib2
        .datasets()
        .map(|d| d.parameter().map(|p| p.name))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            Some("Temperature"),
            Some("u-component of wind"),
            Some("v-component of wind")
        ]
    );

    let (_, last) = grib2.iter().nth(2).ok_or("no dataset")?;
    assert_eq!(
        last.prod_def()
            .template
            .try_get(ProductContent::PERTURBATION_NUMBER),
        Some(5)
    );
    assert_eq!(last.values()?.collect::<Vec<_>>(), vec![9.0, 10.0, 11.0, 12.0]);

    assert_eq!(
        grib2.list_templates(),
        vec![
            TemplateInfo(3, 0),
            TemplateInfo(4, 0),
            TemplateInfo(4, 1),
            TemplateInfo(5, 0),
        ]
    );
    Ok(())
}

/// Section 4 with template 4.1, which extends 4.0 with the ensemble
/// type, the perturbation number and the ensemble size.
fn ensemble_product(parameter: (u8, u8), (kind, member, size): (u8, u8, u8)) -> Vec<u8> {
    let mut sect = product(1, parameter, (103, 10), 0);
    sect.extend_from_slice(&[kind, member, size]);
    sect[3] += 3;
    sect
}

#[test]
fn typed_content_queries() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = temperature_2x2(&[10, 20, 30, 40]);
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;

    let prod = &dataset.prod_def().template;
    assert_eq!(
        prod.try_get(ProductContent::FORECAST_TIME)
            .map(|ft| ft.to_string()),
        Some("6 [h]".to_owned())
    );
    assert_eq!(
        prod.try_get(ProductContent::FIRST_FIXED_SURFACE)
            .and_then(|s| s.value()),
        Some(85000.0)
    );
    assert_eq!(prod.try_get(ProductContent::PERTURBATION_NUMBER), None);
    assert_eq!(
        prod.try_get_or_default(ProductContent::PERTURBATION_NUMBER),
        (false, 0)
    );

    let repr = &dataset.repr_def().template;
    assert_eq!(repr.try_get(ReprContent::BIT_WIDTH), Some(8));
    assert_eq!(repr.try_get(ReprContent::GROUP_COUNT), None);
    Ok(())
}

fn unsupported_product_message() -> Vec<u8> {
    grib2_message(
        0,
        &[
            identification(34),
            latlon_grid((2, 2), (1_000_000, 0), (0, 1_000_000), 0),
            product(99, (0, 0), (1, 0), 0),
            simple_packing(4, 0.0, (0, 0), 8),
            no_bitmap(),
            data(&[1, 2, 3, 4]),
        ],
    )
}

#[test]
fn unsupported_template_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = unsupported_product_message();
    let grib2 = grib_reader::from_slice(&bytes)?;
    assert!(grib2.is_empty());

    let errors = grib2.message_errors();
    assert_eq!(
        errors
            .iter()
            .map(|e| (e.message, e.error.clone()))
            .collect::<Vec<_>>(),
        vec![(0, ParseError::UnsupportedTemplate(TemplateInfo(4, 99)))]
    );
    assert_eq!(
        errors[0].error.to_string(),
        "Unsupported template: 4.99"
    );
    Ok(())
}

#[test]
fn messages_around_an_unsupported_template_are_read() -> Result<(), Box<dyn std::error::Error>>
{
    init_logger();
    let mut bytes = temperature_2x2(&[1, 2, 3, 4]);
    let broken_at = bytes.len();
    bytes.extend(unsupported_product_message());
    bytes.extend(temperature_2x2(&[10, 20, 30, 40]));

    let grib2 = grib_reader::from_slice(&bytes)?;
    assert_eq!(
        grib2.iter().map(|(i, _)| i).collect::<Vec<_>>(),
        vec![(0, 0), (2, 0)]
    );
    let values = grib2
        .datasets()
        .map(|d| d.values().map(|v| v.collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        values,
        vec![vec![1.0, 2.0, 3.0, 4.0], vec![10.0, 20.0, 30.0, 40.0]]
    );

    let errors = grib2.message_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].message, errors[0].offset), (1, broken_at));
    Ok(())
}

#[test]
fn truncated_source_is_rejected() {
    let mut bytes = temperature_2x2(&[10, 20, 30, 40]);
    bytes.truncate(bytes.len() - 10);
    assert!(matches!(
        grib_reader::from_slice(&bytes),
        Err(GribError::ParseError(_))
    ));
}

#[test]
fn reading_from_a_file() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let tempfile = to_tempfile(&temperature_2x2(&[10, 20, 30, 40]))?;
    let f = File::open(tempfile.path())?;
    let grib2 = grib_reader::from_reader(BufReader::new(f))?;

    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    assert_eq!(dataset.identification().centre_id(), 34);
    assert_eq!(
        dataset.values()?.collect::<Vec<_>>(),
        vec![10.0, 20.0, 30.0, 40.0]
    );
    Ok(())
}

#[test]
fn reading_a_compressed_stream() -> Result<(), Box<dyn std::error::Error>> {
    let compressed = gzip(&temperature_2x2(&[10, 20, 30, 40]))?;
    let bytes = gunzip(&compressed)?;
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    assert_eq!(
        dataset.describe(),
        "Temperature [K], IsobaricSurface 85000 [Pa], forecast time 6 [h]"
    );
    Ok(())
}

#[test]
fn scanning_towards_the_north() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = grib2_message(
        0,
        &[
            identification(34),
            latlon_grid((2, 2), (35_000_000, 135_000_000), (36_000_000, 136_000_000), 0x40),
            product(0, (0, 0), (1, 0), 0),
            simple_packing(4, 0.0, (0, 0), 8),
            no_bitmap(),
            data(&[1, 2, 3, 4]),
        ],
    );
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    let coords = dataset.coordinates()?.collect::<Vec<_>>();
    assert_eq!(
        coords,
        vec![
            Coordinate::new(35.0, 135.0),
            Coordinate::new(35.0, 136.0),
            Coordinate::new(36.0, 135.0),
            Coordinate::new(36.0, 136.0),
        ]
    );
    Ok(())
}

#[test]
fn lenient_reading_accepts_padded_sections() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = latlon_grid((2, 2), (1_000_000, 0), (0, 1_000_000), 0);
    grid.extend_from_slice(&[0, 0]);
    grid[3] += 2;
    let bytes = grib2_message(
        0,
        &[
            identification(34),
            grid,
            product(0, (0, 0), (1, 0), 0),
            simple_packing(4, 0.0, (0, 0), 8),
            no_bitmap(),
            data(&[1, 2, 3, 4]),
        ],
    );
    let strict = grib_reader::from_slice(&bytes)?;
    assert!(strict.is_empty());
    assert!(matches!(
        strict.message_errors()[0].error,
        ParseError::SectionLengthMismatch { sect_num: 3, .. }
    ));

    let options = ReadOptions {
        strict_section_length: false,
        ..Default::default()
    };
    let grib2 = grib_reader::Grib2::from_reader_with_options(Cursor::new(&bytes[..]), options)?;
    assert_eq!(grib2.len(), 1);
    Ok(())
}

#[cfg(feature = "time-calculation")]
#[test]
fn valid_time_of_a_forecast() -> Result<(), Box<dyn std::error::Error>> {
    use chrono::{TimeZone, Utc};

    let bytes = temperature_2x2(&[10, 20, 30, 40]);
    let grib2 = grib_reader::from_slice(&bytes)?;
    let dataset = grib2.datasets().next().ok_or("no dataset")?;
    assert_eq!(
        dataset.identification().ref_time()?,
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    );
    assert_eq!(
        dataset.valid_time()?,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap())
    );
    Ok(())
}
