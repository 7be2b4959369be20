//! Reader for GRIB edition 1.
//!
//! GRIB1 messages have a fixed layout instead of templates: an indicator
//! section, a product definition section, optional grid description and
//! bit-map sections, a binary data section and the end marker. Messages are
//! small enough to be read as a whole, so a [`Record`] owns its bytes and
//! decodes its values lazily from them.
//!
//! ```no_run
//! use grib_reader::grib1::Grib1Reader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let f = std::fs::File::open("testdata/analysis.grib1")?;
//!     for record in Grib1Reader::new(std::io::BufReader::new(f)) {
//!         let record = record?;
//!         let count = record.points()?.count();
//!         println!("parameter {}: {count} points", record.pds().parameter);
//!     }
//!     Ok(())
//! }
//! ```

use std::io::{Read, Seek};

use log::{debug, trace};

use crate::{
    BitReader,
    codetables::{Code, TimeUnit},
    datatypes::{ForecastTime, TimeStamp},
    error::*,
    grid::{Coordinate, LatLonGridDefinition, LatLonGridIterator, ScanningMode},
    helpers::{GribInt, grib_int_from_bits},
    reader::{Grib2Read, SECT0_IS_MAGIC, SECT8_ES_MAGIC, SECT8_ES_SIZE, SeekableGrib2Reader},
};

const IS_SIZE: usize = 8;
const PDS_MIN_SIZE: usize = 28;
const GDS_MIN_SIZE: usize = 32;
const BMS_HEADER_SIZE: usize = 6;
const BDS_HEADER_SIZE: usize = 11;

/// An iterator over the records of a GRIB1 byte source.
pub struct Grib1Reader<R> {
    reader: SeekableGrib2Reader<R>,
    offset: usize,
    done: bool,
}

impl<R> Grib1Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: SeekableGrib2Reader::new(reader),
            offset: 0,
            done: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read + Seek> Grib1Reader<R> {
    fn read_record(&mut self) -> Result<Option<Record>, ParseError> {
        let offset = self.offset;
        let mut is = [0; IS_SIZE];
        if !self.reader.read_exact_or_eof(&mut is)? {
            return Ok(None);
        }
        if &is[..SECT0_IS_MAGIC.len()] != SECT0_IS_MAGIC {
            return Err(ParseError::NotGRIB);
        }
        let edition = is[7];
        if edition != 1 {
            return Err(ParseError::GRIBVersionMismatch(edition));
        }
        let total_length = read_u24(&is[4..7]) as usize;
        if total_length < IS_SIZE + PDS_MIN_SIZE + BDS_HEADER_SIZE + SECT8_ES_SIZE {
            return Err(ParseError::MessageLengthMismatch(offset));
        }

        let body = self.reader.read_payload(total_length - IS_SIZE)?;
        let record = Record::from_body(offset, &body)?;
        self.offset += total_length;
        debug!(
            "GRIB1 record at {offset}: parameter {}, {total_length} octets",
            record.pds.parameter
        );
        Ok(Some(record))
    }
}

impl<R: Read + Seek> Iterator for Grib1Reader<R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.read_record().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

fn read_u24(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(3)
        .fold(0, |acc, b| (acc << 8) | u32::from(*b))
}

/// Splits off the next section of `body` at `pos`, whose size is stored in
/// its first three octets.
fn next_section(body: &[u8], pos: usize, min_size: usize) -> Result<&[u8], ParseError> {
    let rest = body.get(pos..).unwrap_or_default();
    if rest.len() < 3 {
        return Err(ParseError::UnexpectedEndOfData(pos + IS_SIZE));
    }
    let size = read_u24(rest) as usize;
    if size < min_size {
        return Err(ParseError::SectionSizeTooSmall(pos + IS_SIZE));
    }
    rest.get(..size)
        .ok_or(ParseError::UnexpectedEndOfData(pos + IS_SIZE))
}

/// Converts an IBM System/360 single precision number, which GRIB1 uses
/// for reference values.
pub fn ibm_to_f32(bits: u32) -> f32 {
    let sign = if bits & 0x8000_0000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 24) & 0x7f) as i32 - 64;
    let mantissa = f64::from(bits & 0x00ff_ffff) / f64::from(1_u32 << 24);
    (sign * mantissa * 16_f64.powi(exponent)) as f32
}

/// One GRIB1 message.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    offset: usize,
    pds: ProductDefinitionSection,
    gds: Option<GridDescriptionSection>,
    bms: Option<BitMapSection>,
    bds: BinaryDataSection,
}

impl Record {
    fn from_body(offset: usize, body: &[u8]) -> Result<Self, ParseError> {
        let (sections, end) = body.split_at(body.len() - SECT8_ES_SIZE);
        if end != SECT8_ES_MAGIC {
            return Err(ParseError::EndSectionMismatch);
        }

        let mut pos = 0;
        let sect = next_section(sections, pos, PDS_MIN_SIZE)?;
        let pds = ProductDefinitionSection::from_bytes(sect)?;
        trace!("PDS at {}: {} octets", offset + IS_SIZE + pos, sect.len());
        pos += sect.len();

        let gds = if pds.has_gds() {
            let sect = next_section(sections, pos, GDS_MIN_SIZE)?;
            trace!("GDS at {}: {} octets", offset + IS_SIZE + pos, sect.len());
            pos += sect.len();
            Some(GridDescriptionSection::from_bytes(sect)?)
        } else {
            None
        };

        let bms = if pds.has_bms() {
            let sect = next_section(sections, pos, BMS_HEADER_SIZE)?;
            trace!("BMS at {}: {} octets", offset + IS_SIZE + pos, sect.len());
            pos += sect.len();
            Some(BitMapSection::from_bytes(sect)?)
        } else {
            None
        };

        let sect = next_section(sections, pos, BDS_HEADER_SIZE)?;
        trace!("BDS at {}: {} octets", offset + IS_SIZE + pos, sect.len());
        pos += sect.len();
        let bds = BinaryDataSection::from_bytes(sect)?;

        if pos != sections.len() {
            return Err(ParseError::MessageLengthMismatch(offset));
        }

        Ok(Self {
            offset,
            pds,
            gds,
            bms,
            bds,
        })
    }

    /// Returns the offset of the record from the start of the byte source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn pds(&self) -> &ProductDefinitionSection {
        &self.pds
    }

    pub fn gds(&self) -> Option<&GridDescriptionSection> {
        self.gds.as_ref()
    }

    pub fn bms(&self) -> Option<&BitMapSection> {
        self.bms.as_ref()
    }

    pub fn bds(&self) -> &BinaryDataSection {
        &self.bds
    }

    /// Returns the number of grid points, which is known from the grid
    /// description, or failing that from the bit-map or the packed data.
    pub fn num_points(&self) -> Result<usize, GribError> {
        if let Some(gds) = &self.gds {
            return gds.num_points();
        }
        if let Some(bms) = &self.bms {
            return Ok(bms.num_bits());
        }
        match self.bds.num_packed_values() {
            Some(n) => Ok(n),
            None => Err(GribError::InvalidValueError(
                "number of grid points is unknown for constant fields without a grid".to_owned(),
            )),
        }
    }

    /// Returns an iterator over the values of all grid points. Points the
    /// bit-map marks as absent are NaN.
    pub fn values(&self) -> Result<Grib1Values<'_>, GribError> {
        let bds = &self.bds;
        if bds.is_spherical_harmonics() {
            return Err(GribError::NotSupported(
                "GRIB1 spherical harmonic coefficients".to_owned(),
            ));
        }
        if bds.is_complex_packing() {
            return Err(GribError::NotSupported(
                "GRIB1 second order packing".to_owned(),
            ));
        }
        if bds.num_bits > 32 {
            return Err(DecodeError::NotSupported("bit width", u16::from(bds.num_bits)).into());
        }

        let num_points = self.num_points()?;
        let mask = match &self.bms {
            Some(bms) => {
                if bms.table_ref != 0 {
                    return Err(GribError::NotSupported(format!(
                        "GRIB1 predefined bit-map {}",
                        bms.table_ref
                    )));
                }
                if bms.num_bits() < num_points {
                    return Err(DecodeError::BitmapLengthMismatch.into());
                }
                Some(&bms.bitmap[..])
            }
            None => None,
        };

        let num_encoded = match mask {
            Some(mask) => (0..num_points).filter(|i| is_set(mask, *i)).count(),
            None => num_points,
        };
        if bds
            .num_packed_values()
            .is_some_and(|available| available < num_encoded)
        {
            return Err(DecodeError::LengthMismatch.into());
        }

        debug!(
            "decoding GRIB1 record at {}: {num_points} points, {} bits per value",
            self.offset, bds.num_bits
        );
        Ok(Grib1Values {
            reader: BitReader::new(&bds.data[..]),
            mask,
            num_bits: usize::from(bds.num_bits),
            ref_val: f64::from(bds.ref_val),
            bin_factor: 2_f64.powi(i32::from(bds.binary_scale)),
            dec_factor: 10_f64.powi(i32::from(self.pds.decimal_scale)),
            pos: 0,
            len: num_points,
        })
    }

    /// Returns an iterator over the coordinates of the grid points in the
    /// order the values are stored.
    pub fn latlons(&self) -> Result<LatLonGridIterator, GribError> {
        let grid = self
            .gds
            .as_ref()
            .ok_or_else(|| GribError::InvalidValueError("record has no grid description".to_owned()))?
            .latlon_grid()?;
        grid.latlons()
    }

    /// Returns an iterator over grid points with a value, paired with their
    /// coordinates.
    pub fn points(&self) -> Result<Grib1Points<'_>, GribError> {
        let coords = self.latlons()?;
        let values = self.values()?;
        Ok(Grib1Points { coords, values })
    }
}

fn is_set(mask: &[u8], index: usize) -> bool {
    mask.get(index / 8)
        .is_some_and(|byte| byte & (0b1000_0000 >> (index % 8)) != 0)
}

/// Product definition section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductDefinitionSection {
    /// Parameter table version number.
    pub table_version: u8,
    pub centre: u8,
    /// Generating process identification number.
    pub process: u8,
    /// Grid identification, 255 when the grid is described in the GDS.
    pub grid_id: u8,
    pub flags: u8,
    /// Indicator of parameter (see Code Table 2).
    pub parameter: u8,
    /// Indicator of type of level or layer (see Code Table 3).
    pub level_type: u8,
    /// Height, pressure, etc. of the level or layer, whose meaning depends
    /// on the level type.
    pub level: u16,
    pub ref_time: TimeStamp,
    /// Forecast time unit (see Code Table 4).
    pub time_unit: u8,
    pub p1: u8,
    pub p2: u8,
    /// Time range indicator (see Code Table 5).
    pub time_range: u8,
    pub num_in_average: u16,
    pub num_missing: u8,
    pub sub_centre: u8,
    pub decimal_scale: i16,
}

impl ProductDefinitionSection {
    const GDS_INCLUDED: u8 = 0b1000_0000;
    const BMS_INCLUDED: u8 = 0b0100_0000;

    fn from_bytes(sect: &[u8]) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(sect);
        reader.skip_bytes(3)?;
        let table_version = reader.read()?;
        let centre = reader.read()?;
        let process = reader.read()?;
        let grid_id = reader.read()?;
        let flags = reader.read()?;
        let parameter = reader.read()?;
        let level_type = reader.read()?;
        let level = reader.read()?;
        let year_of_century = reader.read::<u8>()?;
        let month = reader.read()?;
        let day = reader.read()?;
        let hour = reader.read()?;
        let minute = reader.read()?;
        let time_unit = reader.read()?;
        let p1 = reader.read()?;
        let p2 = reader.read()?;
        let time_range = reader.read()?;
        let num_in_average = reader.read()?;
        let num_missing = reader.read()?;
        let century = reader.read::<u8>()?;
        let sub_centre = reader.read()?;
        let decimal_scale = reader.read::<u16>()?.as_grib_int();

        // year 2000 is the 100th year of the 20th century
        let year = (u16::from(century).saturating_sub(1)) * 100 + u16::from(year_of_century);
        let ref_time = TimeStamp {
            year,
            month,
            day,
            hour,
            minute,
            second: 0,
        };

        Ok(Self {
            table_version,
            centre,
            process,
            grid_id,
            flags,
            parameter,
            level_type,
            level,
            ref_time,
            time_unit,
            p1,
            p2,
            time_range,
            num_in_average,
            num_missing,
            sub_centre,
            decimal_scale,
        })
    }

    pub fn has_gds(&self) -> bool {
        self.flags & Self::GDS_INCLUDED != 0
    }

    pub fn has_bms(&self) -> bool {
        self.flags & Self::BMS_INCLUDED != 0
    }

    /// Returns the forecast time for time ranges valid at a single point in
    /// time, i.e. time range indicators 0, 1 and 10.
    pub fn forecast_time(&self) -> Option<ForecastTime> {
        let value = match self.time_range {
            0 | 1 => u32::from(self.p1),
            10 => (u32::from(self.p1) << 8) | u32::from(self.p2),
            _ => return None,
        };
        Some(ForecastTime::new(time_unit(self.time_unit), value))
    }

    /// Returns the name and unit of the parameter for WMO parameter tables.
    pub fn parameter_name(&self) -> Option<(&'static str, &'static str)> {
        if !(1..=3).contains(&self.table_version) || self.parameter >= 128 {
            return None;
        }
        GRIB1_PARAMETERS
            .iter()
            .find(|(code, _, _)| *code == self.parameter)
            .map(|(_, name, unit)| (*name, *unit))
    }
}

/// Maps a GRIB1 time unit to the equivalent GRIB2 time unit, which share
/// their codes except for the second.
fn time_unit(unit: u8) -> Code<TimeUnit, u8> {
    match unit {
        254 => Code::Name(TimeUnit::Second),
        0..=7 | 10..=12 | 255 => Code::from_number(unit),
        _ => Code::Num(unit),
    }
}

/// Parameters of WMO Code Table 2 that are common to versions 1 to 3.
const GRIB1_PARAMETERS: &[(u8, &str, &str)] = &[
    (1, "Pressure", "Pa"),
    (2, "Pressure reduced to MSL", "Pa"),
    (3, "Pressure tendency", "Pa s-1"),
    (6, "Geopotential", "m2 s-2"),
    (7, "Geopotential height", "gpm"),
    (11, "Temperature", "K"),
    (15, "Maximum temperature", "K"),
    (16, "Minimum temperature", "K"),
    (17, "Dew-point temperature", "K"),
    (33, "u-component of wind", "m s-1"),
    (34, "v-component of wind", "m s-1"),
    (39, "Vertical velocity", "Pa s-1"),
    (51, "Specific humidity", "kg kg-1"),
    (52, "Relative humidity", "%"),
    (61, "Total precipitation", "kg m-2"),
    (65, "Water equivalent of accumulated snow depth", "kg m-2"),
    (71, "Total cloud cover", "%"),
    (81, "Land cover", "Proportion"),
];

/// Grid description section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridDescriptionSection {
    /// Number of vertical coordinate parameters.
    pub nv: u8,
    pub pv_pl: u8,
    /// Data representation type (see Code Table 6).
    pub data_repr_type: u8,
    pub ni: u16,
    pub nj: u16,
    /// Octets after `nj`, whose layout depends on the data representation
    /// type.
    pub rest: Box<[u8]>,
}

impl GridDescriptionSection {
    const LATLON: u8 = 0;

    fn from_bytes(sect: &[u8]) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(sect);
        reader.skip_bytes(3)?;
        let nv = reader.read()?;
        let pv_pl = reader.read()?;
        let data_repr_type = reader.read()?;
        let ni = reader.read()?;
        let nj = reader.read()?;
        let rest = sect.get(10..).unwrap_or_default().into();
        Ok(Self {
            nv,
            pv_pl,
            data_repr_type,
            ni,
            nj,
            rest,
        })
    }

    pub fn num_points(&self) -> Result<usize, GribError> {
        if self.ni == u16::MAX || self.nj == u16::MAX {
            return Err(GribError::NotSupported("GRIB1 quasi-regular grid".to_owned()));
        }
        Ok(usize::from(self.ni) * usize::from(self.nj))
    }

    /// Returns the grid as a regular latitude/longitude grid, if it is one.
    pub fn latlon_grid(&self) -> Result<LatLonGridDefinition, GribError> {
        if self.data_repr_type != Self::LATLON {
            return Err(GribError::NotSupported(format!(
                "GRIB1 data representation type {}",
                self.data_repr_type
            )));
        }

        let mut reader = BitReader::new(&self.rest[..]);
        let first_point_lat = read_micro_degrees(&mut reader)?;
        let first_point_lon = read_micro_degrees(&mut reader)?;
        let resolution_flags = reader.read()?;
        let last_point_lat = read_micro_degrees(&mut reader)?;
        let last_point_lon = read_micro_degrees(&mut reader)?;
        let i_direction_inc = increment(reader.read()?);
        let j_direction_inc = increment(reader.read()?);
        let scanning_mode = ScanningMode(reader.read()?);

        Ok(LatLonGridDefinition {
            ni: u32::from(self.ni),
            nj: u32::from(self.nj),
            basic_angle: 0,
            subdivision: u32::MAX,
            first_point_lat,
            first_point_lon,
            resolution_flags,
            last_point_lat,
            last_point_lon,
            i_direction_inc,
            j_direction_inc,
            scanning_mode,
        })
    }
}

/// Reads a 24-bit sign-and-magnitude angle in millidegrees.
fn read_micro_degrees(reader: &mut BitReader<&[u8]>) -> Result<i32, BitReadError> {
    Ok(grib_int_from_bits(reader.read_bits(24)?, 24) * 1000)
}

fn increment(millidegrees: u16) -> u32 {
    match millidegrees {
        u16::MAX => u32::MAX,
        v => u32::from(v) * 1000,
    }
}

/// Bit-map section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMapSection {
    /// Number of unused bits at the end of the bit-map.
    pub unused_bits: u8,
    /// Number of a predefined bit-map, or 0 if the bit-map follows.
    pub table_ref: u16,
    pub bitmap: Box<[u8]>,
}

impl BitMapSection {
    fn from_bytes(sect: &[u8]) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(sect);
        reader.skip_bytes(3)?;
        let unused_bits = reader.read()?;
        let table_ref = reader.read()?;
        let bitmap = sect.get(BMS_HEADER_SIZE..).unwrap_or_default().into();
        Ok(Self {
            unused_bits,
            table_ref,
            bitmap,
        })
    }

    /// Returns the number of points the bit-map covers.
    pub fn num_bits(&self) -> usize {
        (self.bitmap.len() * 8).saturating_sub(usize::from(self.unused_bits))
    }
}

/// Binary data section.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryDataSection {
    /// Flags in the upper four bits (see Code Table 11).
    pub flags: u8,
    /// Number of unused bits at the end of the packed data.
    pub unused_bits: u8,
    pub binary_scale: i16,
    pub ref_val: f32,
    pub num_bits: u8,
    pub data: Box<[u8]>,
}

impl BinaryDataSection {
    fn from_bytes(sect: &[u8]) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(sect);
        reader.skip_bytes(3)?;
        let flags_and_unused = reader.read::<u8>()?;
        let binary_scale = reader.read::<u16>()?.as_grib_int();
        let ref_val = ibm_to_f32(reader.read()?);
        let num_bits = reader.read()?;
        let data = sect.get(BDS_HEADER_SIZE..).unwrap_or_default().into();
        Ok(Self {
            flags: flags_and_unused & 0xf0,
            unused_bits: flags_and_unused & 0x0f,
            binary_scale,
            ref_val,
            num_bits,
            data,
        })
    }

    pub fn is_spherical_harmonics(&self) -> bool {
        self.flags & 0b1000_0000 != 0
    }

    pub fn is_complex_packing(&self) -> bool {
        self.flags & 0b0100_0000 != 0
    }

    /// Returns the number of packed values, or `None` for a constant field
    /// that has no packed bits.
    pub fn num_packed_values(&self) -> Option<usize> {
        if self.num_bits == 0 {
            return None;
        }
        let bits = (self.data.len() * 8).saturating_sub(usize::from(self.unused_bits));
        Some(bits / usize::from(self.num_bits))
    }
}

/// An iterator over the decoded values of a [`Record`], one per grid point.
pub struct Grib1Values<'a> {
    reader: BitReader<&'a [u8]>,
    mask: Option<&'a [u8]>,
    num_bits: usize,
    ref_val: f64,
    bin_factor: f64,
    dec_factor: f64,
    pos: usize,
    len: usize,
}

impl Grib1Values<'_> {
    fn next_point(&mut self) -> Option<Option<f32>> {
        if self.pos >= self.len {
            return None;
        }
        let present = self.mask.is_none_or(|mask| is_set(mask, self.pos));
        self.pos += 1;
        if !present {
            return Some(None);
        }
        let encoded = self.reader.read_bits(self.num_bits).ok()?;
        let value = (self.ref_val + f64::from(encoded) * self.bin_factor) / self.dec_factor;
        Some(Some(value as f32))
    }
}

impl Iterator for Grib1Values<'_> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_point().map(|value| value.unwrap_or(f32::NAN))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.len - self.pos;
        (size, Some(size))
    }
}

/// An iterator over `(coordinate, value)` pairs of grid points with a value.
pub struct Grib1Points<'a> {
    coords: LatLonGridIterator,
    values: Grib1Values<'a>,
}

impl Iterator for Grib1Points<'_> {
    type Item = (Coordinate, f32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let coord = self.coords.next()?;
            if let Some(value) = self.values.next_point()? {
                return Some((coord, value));
            }
        }
    }
}
