use std::{
    fs::File,
    io::{BufReader, Cursor},
};

use grib_reader::{Coordinate, grib1::Grib1Reader};

mod utils;
use utils::*;

#[test]
fn reading_records_with_and_without_bitmap() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut bytes = grib1_message((2, 2), (1000, 0), (0, 1000), None, &[1, 2, 3, 4]);
    bytes.extend(grib1_message(
        (2, 2),
        (1000, 0),
        (0, 1000),
        Some(&[0b1001_0000]),
        &[5, 6],
    ));

    let records = Grib1Reader::new(Cursor::new(bytes)).collect::<Result<Vec<_>, _>>()?;
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.offset(), 0);
    assert_eq!(first.pds().parameter_name(), Some(("Temperature", "K")));
    assert_eq!(first.pds().level, 500);
    assert_eq!(
        first.points()?.collect::<Vec<_>>(),
        vec![
            (Coordinate::new(1.0, 0.0), 1.0),
            (Coordinate::new(1.0, 1.0), 2.0),
            (Coordinate::new(0.0, 0.0), 3.0),
            (Coordinate::new(0.0, 1.0), 4.0),
        ]
    );

    let second = &records[1];
    assert!(second.pds().has_bms());
    let values = second.values()?.collect::<Vec<_>>();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], 5.0);
    assert!(values[1].is_nan());
    assert!(values[2].is_nan());
    assert_eq!(values[3], 6.0);
    assert_eq!(
        second.points()?.collect::<Vec<_>>(),
        vec![
            (Coordinate::new(1.0, 0.0), 5.0),
            (Coordinate::new(0.0, 1.0), 6.0),
        ]
    );
    Ok(())
}

#[test]
fn reading_records_from_a_compressed_file() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let bytes = grib1_message((3, 1), (0, 0), (0, 2000), None, &[7, 8, 9]);
    let tempfile = to_tempfile(&gzip(&bytes)?)?;

    let compressed = std::fs::read(tempfile.path())?;
    let mut records = Grib1Reader::new(Cursor::new(gunzip(&compressed)?));
    let record = records.next().ok_or("no record")??;
    assert_eq!(record.num_points()?, 3);
    assert_eq!(record.values()?.collect::<Vec<_>>(), vec![7.0, 8.0, 9.0]);
    assert!(records.next().is_none());
    Ok(())
}

#[test]
fn reading_records_from_a_file() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = grib1_message((2, 1), (0, 0), (0, 1000), None, &[10, 20]);
    let tempfile = to_tempfile(&bytes)?;
    let f = File::open(tempfile.path())?;

    let records = Grib1Reader::new(BufReader::new(f)).collect::<Result<Vec<_>, _>>()?;
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].latlons()?.collect::<Vec<_>>(),
        vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)]
    );
    Ok(())
}

#[test]
fn reading_stops_at_the_first_broken_record() {
    let mut bytes = grib1_message((2, 1), (0, 0), (0, 1000), None, &[10, 20]);
    bytes.extend_from_slice(b"GRIB\x00\x00\x10\x02");
    let results = Grib1Reader::new(Cursor::new(bytes)).collect::<Vec<_>>();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}
