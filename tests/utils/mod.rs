#![allow(dead_code)]

use std::io::{self, Read, Write};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use tempfile::NamedTempFile;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn sect(num: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = ((payload.len() + 5) as u32).to_be_bytes().to_vec();
    buf.push(num);
    buf.extend_from_slice(payload);
    buf
}

pub(crate) fn grib2_message(discipline: u8, sections: &[Vec<u8>]) -> Vec<u8> {
    let body_len = sections.iter().map(Vec::len).sum::<usize>();
    let mut buf = b"GRIB".to_vec();
    buf.extend_from_slice(&[0, 0, discipline, 2]);
    buf.extend_from_slice(&((16 + body_len + 4) as u64).to_be_bytes());
    for s in sections {
        buf.extend_from_slice(s);
    }
    buf.extend_from_slice(b"7777");
    buf
}

/// Section 1 with a reference time of 2024-03-01 12:00:00 UTC.
pub(crate) fn identification(centre: u16) -> Vec<u8> {
    let mut payload = centre.to_be_bytes().to_vec();
    payload.extend_from_slice(&[0, 0, 28, 0, 1, 0x07, 0xe8, 3, 1, 12, 0, 0, 0, 1]);
    sect(1, &payload)
}

fn sign_magnitude(v: i32) -> u32 {
    if v < 0 {
        v.unsigned_abs() | 0x8000_0000
    } else {
        v as u32
    }
}

/// Section 3 with template 3.0 on the spherical earth. Angles are in
/// micro-degrees.
pub(crate) fn latlon_grid(
    (ni, nj): (u32, u32),
    (first_lat, first_lon): (i32, i32),
    (last_lat, last_lon): (i32, i32),
    scanning_mode: u8,
) -> Vec<u8> {
    let mut payload = vec![0];
    payload.extend_from_slice(&(ni * nj).to_be_bytes());
    payload.extend_from_slice(&[0, 0, 0, 0]);
    payload.extend_from_slice(&[6, 0xff, 0xff, 0xff, 0xff, 0xff]);
    payload.extend_from_slice(&[0xff; 10]);
    payload.extend_from_slice(&ni.to_be_bytes());
    payload.extend_from_slice(&nj.to_be_bytes());
    payload.extend_from_slice(&[0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
    payload.extend_from_slice(&sign_magnitude(first_lat).to_be_bytes());
    payload.extend_from_slice(&sign_magnitude(first_lon).to_be_bytes());
    payload.push(0x30);
    payload.extend_from_slice(&sign_magnitude(last_lat).to_be_bytes());
    payload.extend_from_slice(&sign_magnitude(last_lon).to_be_bytes());
    payload.extend_from_slice(&[0xff; 8]);
    payload.push(scanning_mode);
    sect(3, &payload)
}

/// Section 4 with template `template` sharing the layout of 4.0, forecast
/// `hours` ahead on a fixed surface with a scale factor of 0.
pub(crate) fn product(
    template: u16,
    (category, number): (u8, u8),
    (surface_type, surface_value): (u8, u32),
    hours: u32,
) -> Vec<u8> {
    let mut payload = vec![0, 0];
    payload.extend_from_slice(&template.to_be_bytes());
    payload.extend_from_slice(&[category, number, 2, 0, 0xff, 0, 0, 0, 1]);
    payload.extend_from_slice(&hours.to_be_bytes());
    payload.extend_from_slice(&[surface_type, 0]);
    payload.extend_from_slice(&surface_value.to_be_bytes());
    payload.extend_from_slice(&[0xff; 6]);
    sect(4, &payload)
}

/// Section 5 with template 5.0.
pub(crate) fn simple_packing(
    num_encoded: u32,
    ref_val: f32,
    (exp, dec): (i16, i16),
    num_bits: u8,
) -> Vec<u8> {
    let mut payload = num_encoded.to_be_bytes().to_vec();
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&ref_val.to_be_bytes());
    payload.extend_from_slice(&sign_magnitude16(exp).to_be_bytes());
    payload.extend_from_slice(&sign_magnitude16(dec).to_be_bytes());
    payload.extend_from_slice(&[num_bits, 0]);
    sect(5, &payload)
}

fn sign_magnitude16(v: i16) -> u16 {
    if v < 0 {
        v.unsigned_abs() | 0x8000
    } else {
        v as u16
    }
}

pub(crate) fn no_bitmap() -> Vec<u8> {
    sect(6, &[255])
}

pub(crate) fn bitmap(bits: &[u8]) -> Vec<u8> {
    let mut payload = vec![0];
    payload.extend_from_slice(bits);
    sect(6, &payload)
}

pub(crate) fn data(bytes: &[u8]) -> Vec<u8> {
    sect(7, bytes)
}

fn u24(v: u32) -> [u8; 3] {
    let b = v.to_be_bytes();
    [b[1], b[2], b[3]]
}

/// A GRIB1 message of temperature at 500 hPa on a regular grid with
/// `R = 0`, `E = 0`, `D = 0` and 8 bits per value. Angles are in
/// millidegrees.
pub(crate) fn grib1_message(
    (ni, nj): (u16, u16),
    (first_lat, first_lon): (u32, u32),
    (last_lat, last_lon): (u32, u32),
    bitmap: Option<&[u8]>,
    values: &[u8],
) -> Vec<u8> {
    let flags = if bitmap.is_some() { 0xc0 } else { 0x80 };
    let mut pds = u24(28).to_vec();
    pds.extend_from_slice(&[
        3, 7, 96, 255, flags, 11, 100, 0x01, 0xf4, 24, 3, 1, 12, 0, 1, 12, 0, 0, 0, 0, 0, 21, 0,
        0, 0,
    ]);

    let mut gds = u24(32).to_vec();
    gds.extend_from_slice(&[0, 255, 0]);
    gds.extend_from_slice(&ni.to_be_bytes());
    gds.extend_from_slice(&nj.to_be_bytes());
    gds.extend_from_slice(&u24(first_lat));
    gds.extend_from_slice(&u24(first_lon));
    gds.push(0x80);
    gds.extend_from_slice(&u24(last_lat));
    gds.extend_from_slice(&u24(last_lon));
    gds.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0x00, 0, 0, 0, 0]);

    let mut bms = Vec::new();
    if let Some(bits) = bitmap {
        bms.extend_from_slice(&u24(6 + bits.len() as u32));
        bms.extend_from_slice(&[0, 0, 0]);
        bms.extend_from_slice(bits);
    }

    let mut bds = u24(11 + values.len() as u32).to_vec();
    bds.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 8]);
    bds.extend_from_slice(values);

    let total = 8 + pds.len() + gds.len() + bms.len() + bds.len() + 4;
    let mut buf = b"GRIB".to_vec();
    buf.extend_from_slice(&u24(total as u32));
    buf.push(1);
    for s in [pds, gds, bms, bds] {
        buf.extend_from_slice(&s);
    }
    buf.extend_from_slice(b"7777");
    buf
}

pub(crate) fn to_tempfile(bytes: &[u8]) -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(bytes)?;
    out.flush()?;
    Ok(out)
}

pub(crate) fn gzip(bytes: &[u8]) -> Result<Vec<u8>, io::Error> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

pub(crate) fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, io::Error> {
    let mut buf = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut buf)?;
    Ok(buf)
}
