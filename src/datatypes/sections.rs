use std::slice::Iter;

#[cfg(feature = "time-calculation")]
use chrono::{DateTime, Utc};
use log::warn;

use crate::{
    BitReader,
    codetables::Parameter,
    content::Template,
    datatypes::*,
    def::grib2::{
        DataRepresentationTemplate, GridDefinitionTemplate, ParseContext,
        ProductDefinitionTemplate,
    },
    error::*,
};

pub(crate) const SECT_HEADER_SIZE: usize = 5;

/// Position, size and parsed body of one section in a byte source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionInfo {
    /// Section number.
    pub num: u8,
    /// Offset of the section from the start of the byte source.
    pub offset: usize,
    /// Size of the section in octets, including its header.
    pub size: usize,
    /// Parsed body of the section. `None` when the section has not been
    /// parsed.
    pub body: Option<SectionBody>,
}

impl SectionInfo {
    pub fn get_tmpl_code(&self) -> Option<TemplateInfo> {
        let info = match self.body.as_ref()? {
            SectionBody::Section3(body) => body.template.template_info(),
            SectionBody::Section4(body) => body.template.template_info(),
            SectionBody::Section5(body) => body.template.template_info(),
            _ => return None,
        };
        Some(info)
    }

    /// Octet range of the section payload, i.e. everything after the 5-octet
    /// header.
    pub(crate) fn payload_range(&self) -> (usize, usize) {
        (self.offset + SECT_HEADER_SIZE, self.size - SECT_HEADER_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Section0(Indicator),
    Section1(Identification),
    Section2(LocalUse),
    Section3(GridDefinition),
    Section4(ProdDefinition),
    Section5(ReprDefinition),
    Section6(BitMap),
    Section7,
    Section8,
}

/// Fails when a template did not consume its section exactly.
///
/// Without `strict`, trailing octets a template leaves unread are skipped
/// with a warning. Such a section does not conform to the template, but the
/// next section is still located by the declared length.
fn ensure_consumed<T: AsRef<[u8]>>(
    reader: &BitReader<T>,
    sect_num: u8,
    strict: bool,
) -> Result<(), ParseError> {
    let declared = reader.len() + SECT_HEADER_SIZE;
    let consumed = reader.byte_position() + SECT_HEADER_SIZE;
    if declared == consumed {
        return Ok(());
    }
    if strict {
        return Err(ParseError::SectionLengthMismatch {
            sect_num,
            declared,
            consumed,
        });
    }
    warn!("section {sect_num}: ignoring {} trailing octets", declared - consumed);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// Discipline - GRIB Master Table Number (see Code Table 0.0)
    pub discipline: u8,
    /// Total length of GRIB message in octets (including Section 0)
    pub total_length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    payload: Box<[u8]>,
}

impl Identification {
    pub fn from_payload(slice: Box<[u8]>) -> Result<Self, ParseError> {
        let size = slice.len();
        if size < 16 {
            Err(ParseError::SectionSizeTooSmall(size))
        } else {
            Ok(Self { payload: slice })
        }
    }

    pub fn iter(&self) -> Iter<'_, u8> {
        self.payload.iter()
    }

    fn read_u16(&self, start: usize) -> u16 {
        u16::from_be_bytes([self.payload[start], self.payload[start + 1]])
    }

    /// Identification of originating/generating centre (see Common Code Table
    /// C-1)
    #[inline]
    pub fn centre_id(&self) -> u16 {
        self.read_u16(0)
    }

    /// Identification of originating/generating sub-centre (allocated by
    /// originating/ generating centre)
    #[inline]
    pub fn subcentre_id(&self) -> u16 {
        self.read_u16(2)
    }

    /// GRIB Master Tables Version Number (see Code Table 1.0)
    #[inline]
    pub fn master_table_version(&self) -> u8 {
        self.payload[4]
    }

    /// GRIB Local Tables Version Number (see Code Table 1.1)
    #[inline]
    pub fn local_table_version(&self) -> u8 {
        self.payload[5]
    }

    /// Significance of Reference Time (see Code Table 1.2)
    #[inline]
    pub fn ref_time_significance(&self) -> u8 {
        self.payload[6]
    }

    /// Reference time of data as stored in the section.
    pub fn ref_time_stamp(&self) -> TimeStamp {
        TimeStamp {
            year: self.read_u16(7),
            month: self.payload[9],
            day: self.payload[10],
            hour: self.payload[11],
            minute: self.payload[12],
            second: self.payload[13],
        }
    }

    /// Reference time of data
    #[cfg(feature = "time-calculation")]
    pub fn ref_time(&self) -> Result<DateTime<Utc>, GribError> {
        self.ref_time_stamp().to_datetime()
    }

    /// Production status of processed data in this GRIB message
    /// (see Code Table 1.3)
    #[inline]
    pub fn prod_status(&self) -> u8 {
        self.payload[14]
    }

    /// Type of processed data in this GRIB message (see Code Table 1.4)
    #[inline]
    pub fn data_type(&self) -> u8 {
        self.payload[15]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUse {
    payload: Box<[u8]>,
}

impl LocalUse {
    pub fn from_payload(slice: Box<[u8]>) -> Self {
        Self { payload: slice }
    }

    pub fn iter(&self) -> Iter<'_, u8> {
        self.payload.iter()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridDefinition {
    /// Source of grid definition (see Code Table 3.0)
    pub source: u8,
    /// Number of data points
    pub num_points: u32,
    /// Number of octets for optional list of numbers defining number of
    /// points
    pub num_point_list_octets: u8,
    pub template: GridDefinitionTemplate,
}

impl GridDefinition {
    pub(crate) fn from_payload(payload: &[u8], strict: bool) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(payload);
        let source = reader.read()?;
        let num_points = reader.read()?;
        let num_point_list_octets = reader.read()?;
        let _interpretation = reader.read::<u8>()?;
        let template_num = reader.read()?;
        let template = GridDefinitionTemplate::read(&mut reader, template_num)?;
        ensure_consumed(&reader, 3, strict)?;

        Ok(Self {
            source,
            num_points,
            num_point_list_octets,
            template,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProdDefinition {
    /// Number of coordinate values after Template
    pub num_coordinates: u16,
    pub template: ProductDefinitionTemplate,
    /// Optional list of coordinate values, such as those of hybrid levels.
    pub coordinates: Vec<f32>,
}

impl ProdDefinition {
    pub(crate) fn from_payload(
        payload: &[u8],
        ctx: &ParseContext,
        strict: bool,
    ) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(payload);
        let num_coordinates = reader.read()?;
        let template_num = reader.read()?;
        let template = ProductDefinitionTemplate::read(&mut reader, template_num, ctx)?;
        let coordinates = (0..num_coordinates)
            .map(|_| reader.read::<f32>())
            .collect::<Result<Vec<_>, _>>()?;
        ensure_consumed(&reader, 4, strict)?;

        Ok(Self {
            num_coordinates,
            template,
            coordinates,
        })
    }

    /// Returns the parameter, or `None` if it is not in the parameter table.
    pub fn parameter(&self) -> Option<Parameter> {
        self.template.parameter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReprDefinition {
    /// Number of data points where one or more values are
    /// specified in Section 7 when a bit map is present, total
    /// number of data points when a bit map is absent
    pub num_points: u32,
    pub template: DataRepresentationTemplate,
}

impl ReprDefinition {
    pub(crate) fn from_payload(payload: &[u8], strict: bool) -> Result<Self, ParseError> {
        let mut reader = BitReader::new(payload);
        let num_points = reader.read()?;
        let template_num = reader.read()?;
        let template = DataRepresentationTemplate::read(&mut reader, template_num)?;
        ensure_consumed(&reader, 5, strict)?;

        Ok(Self {
            num_points,
            template,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMap {
    /// Bit-map indicator
    pub bitmap_indicator: u8,
}

impl BitMap {
    pub const BITMAP_FOLLOWS: u8 = 0;
    pub const PREVIOUSLY_DEFINED: u8 = 254;
    pub const NOT_APPLIED: u8 = 255;
}
