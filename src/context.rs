use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt::{self, Display, Formatter},
    io::{Cursor, Read, Seek},
};

#[cfg(feature = "time-calculation")]
use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::{
    codetables::Parameter,
    content::{ProductContent, Template},
    datatypes::*,
    decoder::{BitmapMask, DecodedValues, Grib2DataDecoder},
    error::*,
    grid::{Coordinate, GridPointIterator},
    parser::Grib2DatasetIndexStream,
    reader::{Grib2Read, Grib2SectionStream, SeekableGrib2Reader},
};

/// Options controlling how strictly a byte source is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Fails when a template does not consume its section exactly.
    ///
    /// Turning this off accepts non-conforming files whose sections carry
    /// trailing octets after the template. Those octets are skipped with a
    /// warning. A section shorter than its template still fails.
    pub strict_section_length: bool,
    /// Applies the parameter table of the originating centre on top of the
    /// WMO master table.
    pub local_tables: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strict_section_length: true,
            local_tables: true,
        }
    }
}

/// Reads a [`Grib2`] instance from an I/O stream of GRIB2.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let f = std::fs::File::open("testdata/forecast.grib2")?;
///     let f = std::io::BufReader::new(f);
///     let result = grib_reader::from_reader(f);
///
///     assert!(result.is_ok());
///     let grib2 = result?;
///     assert_eq!(grib2.len(), 2);
///     Ok(())
/// }
/// ```
pub fn from_reader<SR: Read + Seek>(
    reader: SR,
) -> Result<Grib2<SeekableGrib2Reader<SR>>, GribError> {
    Grib2::<SeekableGrib2Reader<SR>>::from_reader(reader)
}

/// Reads a [`Grib2`] instance from bytes of GRIB2.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let bytes = std::fs::read("testdata/forecast.grib2")?;
///     let grib2 = grib_reader::from_slice(&bytes)?;
///
///     let first = grib2.datasets().next().ok_or("no dataset")?;
///     assert_eq!(first.indicator().discipline, 0);
///     Ok(())
/// }
/// ```
pub fn from_slice(bytes: &[u8]) -> Result<Grib2<SeekableGrib2Reader<Cursor<&[u8]>>>, GribError> {
    Grib2::<SeekableGrib2Reader<Cursor<&[u8]>>>::from_slice(bytes)
}

/// All datasets of a GRIB2 byte source, located in one pass.
///
/// Every section is located and sections 1 to 5 are parsed while reading.
/// The bit-map and data sections are read again only when the values of a
/// dataset are requested.
pub struct Grib2<R> {
    reader: RefCell<R>,
    sections: Box<[SectionInfo]>,
    datasets: Box<[Grib2DatasetIndex]>,
    message_errors: Box<[MessageError]>,
}

impl<R> Grib2<R> {
    /// Returns the number of datasets.
    #[inline]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Returns an iterator over datasets and their positions.
    #[inline]
    pub fn iter(&self) -> DatasetIterator<'_, R> {
        self.into_iter()
    }

    /// Returns an iterator over datasets.
    pub fn datasets(&self) -> impl Iterator<Item = Dataset<'_, R>> {
        self.iter().map(|(_, dataset)| dataset)
    }

    /// Returns every section located in the byte source, in order.
    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    /// Returns the errors of messages that could not be read. The datasets
    /// of those messages are left out, while the other messages are read as
    /// usual.
    pub fn message_errors(&self) -> &[MessageError] {
        &self.message_errors
    }

    /// Returns the distinct templates used in the byte source, sorted.
    pub fn list_templates(&self) -> Vec<TemplateInfo> {
        get_templates(&self.sections)
    }
}

impl<R: Read + Seek> Grib2<SeekableGrib2Reader<R>> {
    pub fn from_reader(reader: R) -> Result<Self, GribError> {
        Self::from_reader_with_options(reader, ReadOptions::default())
    }

    pub fn from_reader_with_options(reader: R, options: ReadOptions) -> Result<Self, GribError> {
        Self::read_with_seekable(SeekableGrib2Reader::new(reader), options)
    }
}

impl<'a> Grib2<SeekableGrib2Reader<Cursor<&'a [u8]>>> {
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self, GribError> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Grib2Read> Grib2<R> {
    pub fn read_with_seekable(reader: R, options: ReadOptions) -> Result<Self, GribError> {
        let mut sect_stream = Grib2SectionStream::with_options(reader, options);
        let mut cacher = Vec::new();
        let mut parser =
            Grib2DatasetIndexStream::new(sect_stream.by_ref()).with_cacher(&mut cacher);
        let datasets = parser.by_ref().collect::<Result<Vec<_>, _>>()?;
        let message_errors = parser.into_message_errors();

        for index in datasets.iter() {
            if DatasetSections::resolve(&cacher, index).is_none() {
                return Err(ParseError::InvalidSectionOrder(index.sect0).into());
            }
        }
        debug!(
            "located {} datasets in {} sections, {} messages skipped",
            datasets.len(),
            cacher.len(),
            message_errors.len()
        );

        Ok(Self {
            reader: RefCell::new(sect_stream.into_reader()),
            sections: cacher.into_boxed_slice(),
            datasets: datasets.into_boxed_slice(),
            message_errors: message_errors.into_boxed_slice(),
        })
    }
}

impl<'a, R> IntoIterator for &'a Grib2<R> {
    type Item = (MessageIndex, Dataset<'a, R>);
    type IntoIter = DatasetIterator<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        DatasetIterator {
            context: self,
            pos: 0,
        }
    }
}

fn get_templates(sects: &[SectionInfo]) -> Vec<TemplateInfo> {
    let uniq: HashSet<_> = sects.iter().filter_map(|s| s.get_tmpl_code()).collect();
    let mut vec: Vec<_> = uniq.into_iter().collect();
    vec.sort_unstable();
    vec
}

/// An iterator over the datasets of a [`Grib2`].
pub struct DatasetIterator<'a, R> {
    context: &'a Grib2<R>,
    pos: usize,
}

impl<'a, R> Iterator for DatasetIterator<'a, R> {
    type Item = (MessageIndex, Dataset<'a, R>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.context.datasets.get(self.pos) {
            self.pos += 1;
            if let Some(dataset) = Dataset::new(self.context, index) {
                return Some((index.message, dataset));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.context.datasets.len().saturating_sub(self.pos);
        (size, Some(size))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.pos = self.pos.saturating_add(n);
        self.next()
    }
}

/// Parsed sections making up one dataset.
#[derive(Clone, Copy)]
struct DatasetSections<'a> {
    indicator: &'a Indicator,
    identification: &'a Identification,
    local_use: Option<&'a LocalUse>,
    grid_def: &'a GridDefinition,
    prod_def: &'a ProdDefinition,
    repr_def: &'a ReprDefinition,
    bitmap: &'a BitMap,
    bitmap_source: Option<&'a SectionInfo>,
    data: &'a SectionInfo,
}

impl<'a> DatasetSections<'a> {
    /// Returns `None` if a section of the index is missing or of another
    /// kind than expected.
    fn resolve(sections: &'a [SectionInfo], index: &Grib2DatasetIndex) -> Option<Self> {
        macro_rules! body {
            ($pos:expr, $variant:ident) => {
                match sections.get($pos)?.body.as_ref()? {
                    SectionBody::$variant(body) => body,
                    _ => return None,
                }
            };
        }

        let local_use = match index.sect2 {
            Some(pos) => Some(body!(pos, Section2)),
            None => None,
        };
        let bitmap_source = match index.bitmap_source {
            Some(pos) => Some(sections.get(pos)?),
            None => None,
        };
        let data = sections.get(index.sect7)?;
        if data.num != 7 {
            return None;
        }

        Some(Self {
            indicator: body!(index.sect0, Section0),
            identification: body!(index.sect1, Section1),
            local_use,
            grid_def: body!(index.sect3, Section3),
            prod_def: body!(index.sect4, Section4),
            repr_def: body!(index.sect5, Section5),
            bitmap: body!(index.sect6, Section6),
            bitmap_source,
            data,
        })
    }
}

/// One field of a GRIB2 message: a product definition together with its
/// grid, data representation, bit-map and data.
pub struct Dataset<'a, R> {
    reader: &'a RefCell<R>,
    message: MessageIndex,
    sections: DatasetSections<'a>,
}

impl<'a, R> Dataset<'a, R> {
    fn new(context: &'a Grib2<R>, index: &Grib2DatasetIndex) -> Option<Self> {
        let sections = DatasetSections::resolve(&context.sections, index)?;
        Some(Self {
            reader: &context.reader,
            message: index.message,
            sections,
        })
    }

    /// Returns `(message number, dataset number within the message)`.
    pub fn message_index(&self) -> MessageIndex {
        self.message
    }

    pub fn indicator(&self) -> &'a Indicator {
        self.sections.indicator
    }

    pub fn identification(&self) -> &'a Identification {
        self.sections.identification
    }

    pub fn local_use(&self) -> Option<&'a LocalUse> {
        self.sections.local_use
    }

    pub fn grid_def(&self) -> &'a GridDefinition {
        self.sections.grid_def
    }

    pub fn prod_def(&self) -> &'a ProdDefinition {
        self.sections.prod_def
    }

    pub fn repr_def(&self) -> &'a ReprDefinition {
        self.sections.repr_def
    }

    /// Returns the bit-map indicator of the dataset (see Code Table 6.0).
    pub fn bitmap_indicator(&self) -> u8 {
        self.sections.bitmap.bitmap_indicator
    }

    /// Returns the parameter, or `None` if it is not in the parameter table.
    pub fn parameter(&self) -> Option<Parameter> {
        self.sections.prod_def.parameter()
    }

    /// Returns the number of grid points.
    pub fn num_points(&self) -> usize {
        self.sections.grid_def.num_points as usize
    }

    /// Returns the number of values encoded in the data section.
    pub fn num_encoded(&self) -> usize {
        self.sections.repr_def.num_points as usize
    }

    /// Returns an iterator over the coordinates of the grid points in the
    /// order the values are stored.
    pub fn coordinates(&self) -> Result<GridPointIterator, GribError> {
        let iter = self.sections.grid_def.template.latlons()?;
        let (num_decoded, _) = iter.size_hint();
        let num_defined = self.num_points();
        if num_defined != num_decoded {
            return Err(GribError::InvalidValueError(format!(
                "number of grid points does not match: {num_defined} (defined) vs {num_decoded} (decoded)"
            )));
        }
        Ok(iter)
    }

    /// Returns the valid time, i.e. the reference time advanced by the
    /// forecast time, if the forecast time has a unit of fixed length.
    #[cfg(feature = "time-calculation")]
    pub fn valid_time(&self) -> Result<Option<DateTime<Utc>>, GribError> {
        let ref_time = self.sections.identification.ref_time()?;
        let seconds = self
            .sections
            .prod_def
            .template
            .try_get(ProductContent::FORECAST_TIME)
            .and_then(|ft| ft.seconds());
        let Some(seconds) = seconds else {
            return Ok(None);
        };
        Ok(Duration::try_seconds(seconds).and_then(|d| ref_time.checked_add_signed(d)))
    }

    /// Returns a one-line summary of the parameter, the level and the
    /// forecast time.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<R: Grib2Read> Dataset<'_, R> {
    /// Reads the bit-map and data sections and returns an iterator over the
    /// values of all grid points. Points without a value are NaN.
    pub fn values(&self) -> Result<DecodedValues, GribError> {
        let DatasetSections {
            bitmap,
            bitmap_source,
            data,
            repr_def,
            ..
        } = self.sections;

        let (bitmap, data) = {
            let mut reader = self.reader.try_borrow_mut().map_err(|_| {
                GribError::OperationError("the byte source is already being read".to_owned())
            })?;
            let bitmap = match bitmap.bitmap_indicator {
                BitMap::NOT_APPLIED => None,
                BitMap::BITMAP_FOLLOWS | BitMap::PREVIOUSLY_DEFINED => {
                    let source = bitmap_source.ok_or(DecodeError::NoPreviousBitmap)?;
                    let payload = reader.read_sect_payload_at(source)?;
                    // the first octet is the bit-map indicator
                    let bytes = payload.get(1..).map(<[u8]>::to_vec).unwrap_or_default();
                    Some(BitmapMask::new(bytes))
                }
                n => {
                    return Err(DecodeError::NotSupported(
                        "GRIB2 code table 6.0 (bit-map indicator)",
                        n.into(),
                    )
                    .into());
                }
            };
            let data = reader.read_sect_payload_at(data)?.into_vec();
            (bitmap, data)
        };

        debug!(
            "decoding dataset {:?} ({}): template {}, {} points",
            self.message,
            self.describe(),
            repr_def.template.template_info(),
            self.num_points()
        );
        let decoder = Grib2DataDecoder::new(
            &repr_def.template,
            self.num_points(),
            self.num_encoded(),
            data,
            bitmap,
        )?;
        decoder.decode()
    }

    /// Returns an iterator over grid points with a value, paired with their
    /// coordinates. Points the bit-map marks as absent are skipped.
    pub fn points(&self) -> Result<Points, GribError> {
        let coords = self.coordinates()?;
        let values = self.values()?;
        Ok(Points { coords, values })
    }

    /// Collects the points with a value into a map keyed by coordinate.
    pub fn to_map(&self) -> Result<HashMap<Coordinate, f32>, GribError> {
        Ok(self.points()?.collect())
    }
}

impl<R> Display for Dataset<'_, R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let template = &self.sections.prod_def.template;
        match self.parameter() {
            Some(param) => write!(f, "{} [{}]", param.name, param.unit)?,
            None => {
                let category = template.category();
                write!(
                    f,
                    "unknown parameter ({}.{}.{})",
                    self.sections.indicator.discipline,
                    category.parameter_category,
                    category.parameter_number
                )?;
            }
        }
        if let Some(surface) = template.try_get(ProductContent::FIRST_FIXED_SURFACE) {
            let (stype, value) = surface.describe();
            write!(f, ", {stype} {value}")?;
        }
        if let Some(ft) = template.try_get(ProductContent::FORECAST_TIME) {
            write!(f, ", forecast time {ft}")?;
        }
        Ok(())
    }
}

/// An iterator over `(coordinate, value)` pairs of grid points with a value.
pub struct Points {
    coords: GridPointIterator,
    values: DecodedValues,
}

impl Iterator for Points {
    type Item = (Coordinate, f32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let coord = self.coords.next()?;
            if let Some(value) = self.values.next_point()? {
                return Some((coord, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.coords.size_hint().1)
    }
}
