//! Templates of GRIB2 sections 3, 4 and 5.
//!
//! Each family is a closed enum with one variant per supported template
//! number. Constructing a variant consumes exactly the template's octets from
//! a [`BitReader`]; an unknown number fails with
//! [`ParseError::UnsupportedTemplate`] before anything is read.

use crate::{
    BitReader,
    codetables::Parameter,
    content::{ContentKey, Template},
    datatypes::TemplateInfo,
    error::{GribError, ParseError},
    grid::{EarthShapeDefinition, GridPointIndexIterator, GridPointIterator},
};

pub mod template3;
pub mod template4;
pub mod template5;

pub use template3::*;
pub use template4::*;
pub use template5::*;

/// Message-level information that templates need while being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseContext {
    /// Discipline from the indicator section.
    pub discipline: u8,
    /// Originating centre from the identification section.
    pub centre: u16,
    /// Whether the local parameter table of the centre is consulted.
    pub local_tables: bool,
}

impl ParseContext {
    pub(crate) fn lookup_parameter(&self, category: u8, number: u8) -> Option<Parameter> {
        if self.local_tables {
            Parameter::lookup(self.discipline, self.centre, category, number)
        } else {
            Parameter::lookup_master(self.discipline, category, number)
        }
    }
}

macro_rules! delegate_template {
    ($enum:ident { $($variant:ident,)* }) => {
        impl Template for $enum {
            fn template_info(&self) -> TemplateInfo {
                match self {
                    $(Self::$variant(t) => t.template_info(),)*
                }
            }

            fn try_get<T: 'static>(&self, key: ContentKey<T>) -> Option<T> {
                match self {
                    $(Self::$variant(t) => t.try_get(key),)*
                }
            }

            fn content_keys(&self) -> Vec<&'static str> {
                match self {
                    $(Self::$variant(t) => t.content_keys(),)*
                }
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridDefinitionTemplate {
    _3_0(Template3_0),
    _3_1(Template3_1),
    _3_40(Template3_40),
}

impl GridDefinitionTemplate {
    pub(crate) fn read<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        num: u16,
    ) -> Result<Self, ParseError> {
        let tmpl = match num {
            0 => Self::_3_0(Template3_0::from_reader(reader)?),
            1 => Self::_3_1(Template3_1::from_reader(reader)?),
            40 => Self::_3_40(Template3_40::from_reader(reader)?),
            _ => return Err(ParseError::UnsupportedTemplate(TemplateInfo(3, num))),
        };
        Ok(tmpl)
    }

    pub fn earth(&self) -> &EarthShapeDefinition {
        match self {
            Self::_3_0(t) => &t.earth,
            Self::_3_1(t) => &t.earth,
            Self::_3_40(t) => &t.earth,
        }
    }

    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        match self {
            Self::_3_0(t) => t.grid.grid_shape(),
            Self::_3_1(t) => t.grid.grid_shape(),
            Self::_3_40(t) => t.grid.grid_shape(),
        }
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::_3_0(t) => t.grid.short_name(),
            Self::_3_1(t) => t.grid.short_name(),
            Self::_3_40(t) => t.grid.short_name(),
        }
    }

    /// Returns an iterator over `(i, j)` of grid points.
    ///
    /// Note that this is a low-level API and it is not checked that the number
    /// of iterator iterations is consistent with the number of grid points
    /// defined in the data.
    pub fn ij(&self) -> Result<GridPointIndexIterator, GribError> {
        match self {
            Self::_3_0(t) => t.grid.ij(),
            Self::_3_1(t) => t.grid.ij(),
            Self::_3_40(t) => t.grid.ij(),
        }
    }

    /// Returns an iterator over coordinates of grid points in the order the
    /// data values are stored.
    pub fn latlons(&self) -> Result<GridPointIterator, GribError> {
        let iter = match self {
            Self::_3_0(t) => GridPointIterator::LatLon(t.grid.latlons()?),
            Self::_3_1(t) => GridPointIterator::Rotated(t.grid.latlons()?),
            Self::_3_40(t) => GridPointIterator::LatLon(t.grid.latlons()?),
        };
        Ok(iter)
    }
}

delegate_template!(GridDefinitionTemplate { _3_0, _3_1, _3_40, });

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductDefinitionTemplate {
    _4_0(Template4_0),
    _4_1(Template4_1),
    _4_2(Template4_2),
    _4_8(Template4_8),
    _4_11(Template4_11),
    _4_32(Template4_32),
    _4_48(Template4_48),
}

impl ProductDefinitionTemplate {
    pub(crate) fn read<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        num: u16,
        ctx: &ParseContext,
    ) -> Result<Self, ParseError> {
        let tmpl = match num {
            0 => Self::_4_0(Template4_0::from_reader(reader, ctx)?),
            1 => Self::_4_1(Template4_1::from_reader(reader, ctx)?),
            2 => Self::_4_2(Template4_2::from_reader(reader, ctx)?),
            8 => Self::_4_8(Template4_8::from_reader(reader, ctx)?),
            11 => Self::_4_11(Template4_11::from_reader(reader, ctx)?),
            32 => Self::_4_32(Template4_32::from_reader(reader, ctx)?),
            48 => Self::_4_48(Template4_48::from_reader(reader, ctx)?),
            _ => return Err(ParseError::UnsupportedTemplate(TemplateInfo(4, num))),
        };
        Ok(tmpl)
    }

    pub fn category(&self) -> &template4::param_set::Category {
        match self {
            Self::_4_0(t) => &t.category,
            Self::_4_1(t) => &t.category,
            Self::_4_2(t) => &t.category,
            Self::_4_8(t) => &t.category,
            Self::_4_11(t) => &t.category,
            Self::_4_32(t) => &t.category,
            Self::_4_48(t) => &t.category,
        }
    }

    pub fn process(&self) -> &template4::param_set::ForecastProcess {
        match self {
            Self::_4_0(t) => &t.process,
            Self::_4_1(t) => &t.process,
            Self::_4_2(t) => &t.process,
            Self::_4_8(t) => &t.process,
            Self::_4_11(t) => &t.process,
            Self::_4_32(t) => &t.process,
            Self::_4_48(t) => &t.process,
        }
    }

    /// Returns the parameter of the product, or `None` if the parameter is
    /// not in the parameter table.
    pub fn parameter(&self) -> Option<Parameter> {
        self.category().parameter
    }
}

delegate_template!(ProductDefinitionTemplate {
    _4_0,
    _4_1,
    _4_2,
    _4_8,
    _4_11,
    _4_32,
    _4_48,
});

#[derive(Debug, Clone, PartialEq)]
pub enum DataRepresentationTemplate {
    _5_0(Template5_0),
    _5_2(Template5_2),
    _5_3(Template5_3),
    _5_4(Template5_4),
    _5_200(Template5_200),
}

impl DataRepresentationTemplate {
    pub(crate) fn read<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        num: u16,
    ) -> Result<Self, ParseError> {
        let tmpl = match num {
            0 => Self::_5_0(Template5_0::from_reader(reader)?),
            2 => Self::_5_2(Template5_2::from_reader(reader)?),
            3 => Self::_5_3(Template5_3::from_reader(reader)?),
            4 => Self::_5_4(Template5_4::from_reader(reader)?),
            200 => Self::_5_200(Template5_200::from_reader(reader)?),
            _ => return Err(ParseError::UnsupportedTemplate(TemplateInfo(5, num))),
        };
        Ok(tmpl)
    }
}

delegate_template!(DataRepresentationTemplate {
    _5_0,
    _5_2,
    _5_3,
    _5_4,
    _5_200,
});

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        codetables::*,
        content::{GridContent, ProductContent, ReprContent},
        datatypes::*,
        grid::{Coordinate, ScanningMode, helpers::test_helpers::assert_coord_almost_eq},
    };

    const JMA: ParseContext = ParseContext {
        discipline: 0,
        centre: 34,
        local_tables: true,
    };

    // Template 4.0 for temperature at 850 hPa, forecast time 6 hours.
    const TEMPLATE_4_0: [u8; 25] = [
        0x00, 0x00, 0x02, 0x00, 0x1f, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x64, 0x00,
        0x00, 0x01, 0x4c, 0x08, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ];

    #[test]
    fn product_definition_template_4_0() {
        let mut reader = BitReader::new(TEMPLATE_4_0);
        let actual = ProductDefinitionTemplate::read(&mut reader, 0, &JMA).unwrap();
        assert_eq!(reader.remaining_bits(), 0);

        assert_eq!(actual.template_info(), TemplateInfo(4, 0));
        assert_eq!(actual.try_get(ProductContent::PARAMETER_CATEGORY), Some(0));
        assert_eq!(actual.try_get(ProductContent::PARAMETER_NUMBER), Some(0));
        assert_eq!(
            actual.try_get(ProductContent::PARAMETER).map(|p| p.name),
            Some("Temperature")
        );
        assert_eq!(
            actual.try_get(ProductContent::GENERATING_PROCESS_TYPE),
            Some(Name(GeneratingProcessType::Forecast))
        );
        assert_eq!(actual.try_get(ProductContent::FORECAST_PROCESS), Some(31));
        assert_eq!(
            actual.try_get(ProductContent::FORECAST_TIME),
            Some(ForecastTime::from_numbers(1, 6))
        );
        assert_eq!(
            actual.try_get(ProductContent::FIRST_FIXED_SURFACE),
            Some(FixedSurface::new(100, 0, 85000))
        );
        assert_eq!(
            actual
                .try_get(ProductContent::SECOND_FIXED_SURFACE)
                .map(|s| s.value()),
            Some(None)
        );
        assert_eq!(actual.try_get(ProductContent::PERTURBATION_NUMBER), None);
        assert_eq!(actual.try_get(ReprContent::BIT_WIDTH), None);
    }

    #[test]
    fn product_and_repr_parameter_sets_are_reachable() {
        let mut reader = BitReader::new(TEMPLATE_4_0);
        let prod = ProductDefinitionTemplate::read(&mut reader, 0, &JMA).unwrap();
        let category: &template4::param_set::Category = prod.category();
        assert_eq!(
            (category.parameter_category, category.parameter_number),
            (0, 0)
        );
        let process: &template4::param_set::ForecastProcess = prod.process();
        assert_eq!(process.forecast_process, 31);

        let simple = template5::param_set::SimplePacking {
            ref_val: 1.0,
            exp: 0,
            dec: 0,
            num_bits: 0,
        };
        assert_eq!(simple.num_bits, 0);
    }

    #[test]
    fn unknown_parameter_is_not_registered() {
        let mut bytes = TEMPLATE_4_0;
        bytes[0] = 250;
        let mut reader = BitReader::new(bytes);
        let actual = ProductDefinitionTemplate::read(&mut reader, 0, &JMA).unwrap();
        assert_eq!(actual.parameter(), None);
        assert_eq!(actual.try_get(ProductContent::PARAMETER), None);
        assert_eq!(actual.try_get(ProductContent::PARAMETER_CATEGORY), Some(250));
    }

    #[test]
    fn product_definition_template_4_1() {
        let mut bytes = TEMPLATE_4_0.to_vec();
        bytes.extend_from_slice(&[0x03, 0x05, 0x15]);
        let mut reader = BitReader::new(bytes);
        let actual = ProductDefinitionTemplate::read(&mut reader, 1, &JMA).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        assert_eq!(actual.try_get(ProductContent::ENSEMBLE_FORECAST_TYPE), Some(3));
        assert_eq!(actual.try_get(ProductContent::PERTURBATION_NUMBER), Some(5));
        assert_eq!(actual.try_get(ProductContent::ENSEMBLE_FORECASTS_NUMBER), Some(21));
        assert_eq!(actual.try_get(ProductContent::DERIVED_FORECAST), None);
    }

    #[test]
    fn product_definition_template_4_11() {
        let mut bytes = TEMPLATE_4_0.to_vec();
        bytes.extend_from_slice(&[0x03, 0x05, 0x15]);
        bytes.extend_from_slice(&[
            0x07, 0xe8, 0x01, 0x01, 0x06, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02,
            0x01, 0x00, 0x00, 0x00, 0x06, 0x01, 0x00, 0x00, 0x00, 0x00,
        ]);
        let mut reader = BitReader::new(bytes);
        let actual = ProductDefinitionTemplate::read(&mut reader, 11, &JMA).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        assert_eq!(actual.try_get(ProductContent::PERTURBATION_NUMBER), Some(5));
        let stat = actual
            .try_get(ProductContent::STATISTICAL_PROCESSING)
            .unwrap();
        assert_eq!(stat.end_time.to_string(), "2024-01-01 06:00:00");
        assert_eq!(stat.time_ranges[0].length(), ForecastTime::from_numbers(1, 6));
    }

    #[test]
    fn product_definition_template_4_32() {
        let bytes = [
            0x03, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02,
            0x00, 0x02, 0x00, 0x10, 0x00, 0x1f, 0x00, 0x00, 0x00, 0x00, 0x6e, 0x00, 0x02, 0x00,
            0x10, 0x00, 0x1f, 0x00, 0x00, 0x00, 0x00, 0x93,
        ];
        let mut reader = BitReader::new(bytes);
        let actual = ProductDefinitionTemplate::read(&mut reader, 32, &JMA).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        let bands = actual.try_get(ProductContent::SPECTRAL_BANDS).unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1].satellite_number, 16);
        assert_eq!(bands[1].central_wave_number.value(), Some(147.0));
        assert_eq!(actual.try_get(ProductContent::FIRST_FIXED_SURFACE), None);
    }

    #[test]
    fn product_definition_template_4_48() {
        let bytes = [
            0x14, 0x66, 0xf2, 0x30, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00,
            0x0a, 0x0b, 0x09, 0x00, 0x00, 0x02, 0x26, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02, 0x00,
            0x00, 0x00, 0x01, 0x1e, 0x01, 0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        ];
        let ctx = ParseContext {
            discipline: 0,
            centre: 98,
            local_tables: true,
        };
        let mut reader = BitReader::new(bytes);
        let actual = ProductDefinitionTemplate::read(&mut reader, 48, &ctx).unwrap();
        assert_eq!(reader.remaining_bits(), 0);

        assert_eq!(
            actual.try_get(ProductContent::AEROSOL_TYPE),
            Some(Name(AerosolType::TotalAerosol))
        );
        let size = actual.try_get(ProductContent::SIZE_INTERVAL).unwrap();
        assert_eq!(size.interval_type, Name(IntervalType::BetweenFirstAndSecondLimit));
        assert_eq!(size.bounds(), (Some(0.0), Some(1e-6)));
        let wavelength = actual.try_get(ProductContent::WAVELENGTH_INTERVAL).unwrap();
        assert_eq!(wavelength.interval_type, Name(IntervalType::EqualToFirstLimit));
        assert_eq!(wavelength.bounds(), (Some(5.5e-7), None));
        assert_eq!(
            actual.try_get(ProductContent::GENERATING_PROCESS_TYPE),
            Some(Name(GeneratingProcessType::Forecast))
        );
        assert_eq!(
            actual.try_get(ProductContent::OBSERVATIONAL_DATA_CUTOFF),
            Some(Duration::from_secs(3600 + 30 * 60))
        );
        assert_eq!(
            actual.try_get(ProductContent::FORECAST_TIME),
            Some(ForecastTime::from_numbers(1, 3))
        );
        assert_eq!(
            actual.try_get(ProductContent::FIRST_FIXED_SURFACE),
            Some(FixedSurface::new(1, 0, 0))
        );
    }

    macro_rules! test_unsupported_template {
        ($(($name:ident, $read:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let mut reader = BitReader::new(TEMPLATE_4_0);
                let read: fn(&mut BitReader<[u8; 25]>) -> Result<(), ParseError> = $read;
                assert_eq!(read(&mut reader), Err(ParseError::UnsupportedTemplate($expected)));
                assert_eq!(reader.bit_position(), 0);
            }
        )*);
    }

    test_unsupported_template! {
        (
            unsupported_grid_definition_template,
            |r| GridDefinitionTemplate::read(r, 30).map(|_| ()),
            TemplateInfo(3, 30)
        ),
        (
            unsupported_product_definition_template,
            |r| ProductDefinitionTemplate::read(r, 99, &JMA).map(|_| ()),
            TemplateInfo(4, 99)
        ),
        (
            unsupported_data_representation_template,
            |r| DataRepresentationTemplate::read(r, 40).map(|_| ()),
            TemplateInfo(5, 40)
        ),
    }

    #[test]
    fn truncated_template_fails_with_out_of_data() {
        let mut reader = BitReader::new(&TEMPLATE_4_0[..10]);
        let result = ProductDefinitionTemplate::read(&mut reader, 0, &JMA);
        assert!(matches!(result, Err(ParseError::BitReadError(_))));
    }

    #[test]
    fn data_representation_template_5_0() {
        let bytes = [0x43, 0x8c, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x08, 0x00];
        let mut reader = BitReader::new(bytes);
        let actual = DataRepresentationTemplate::read(&mut reader, 0).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        let expected = DataRepresentationTemplate::_5_0(Template5_0 {
            simple: template5::param_set::SimplePacking {
                ref_val: 280.0,
                exp: 1,
                dec: 1,
                num_bits: 8,
            },
            orig_field_type: 0,
        });
        assert_eq!(actual, expected);
        assert_eq!(actual.try_get(ReprContent::REFERENCE_VALUE), Some(280.0));
        assert_eq!(actual.try_get(ReprContent::BINARY_SCALE_FACTOR), Some(1));
        assert_eq!(actual.try_get(ReprContent::GROUP_COUNT), None);
        assert_eq!(
            actual.try_get_or_default(ReprContent::SPATIAL_DIFFERENCING_ORDER),
            (false, 0)
        );
    }

    #[test]
    fn data_representation_template_5_3() {
        let bytes = [
            0x44, 0x7a, 0x00, 0x00, 0x80, 0x02, 0x00, 0x00, 0x0c, 0x00, 0x01, 0x00, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x04, 0x00, 0x00,
            0x00, 0x01, 0x01, 0x00, 0x00, 0x00, 0x05, 0x03, 0x02, 0x02,
        ];
        let mut reader = BitReader::new(bytes);
        let actual = DataRepresentationTemplate::read(&mut reader, 3).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        assert_eq!(actual.try_get(ReprContent::BINARY_SCALE_FACTOR), Some(-2));
        assert_eq!(actual.try_get(ReprContent::GROUP_COUNT), Some(10));
        assert_eq!(actual.try_get(ReprContent::SPATIAL_DIFFERENCING_ORDER), Some(2));
        assert_eq!(actual.try_get(ReprContent::PRECISION), None);
    }

    #[test]
    fn data_representation_template_5_200() {
        let bytes = [0x04, 0x00, 0x03, 0x00, 0x03, 0x01, 0x00, 0x0a, 0x00, 0x14, 0x00, 0x1e];
        let mut reader = BitReader::new(bytes);
        let actual = DataRepresentationTemplate::read(&mut reader, 200).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        let expected = DataRepresentationTemplate::_5_200(Template5_200 {
            num_bits: 4,
            max_val: 3,
            max_level: 3,
            dec: 1,
            level_vals: vec![10, 20, 30],
        });
        assert_eq!(actual, expected);
        assert_eq!(actual.content_keys(), vec!["bit_width"]);
    }

    #[test]
    fn grid_definition_template_3_0() {
        let payload = [
            0x00, 0x00, 0x01, 0x50, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0xff, 0xff, 0xff, 0xff,
            0xff, 0x01, 0x03, 0xcd, 0x39, 0xfa, 0x01, 0x03, 0xc9, 0xf6, 0xa3, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x01, 0x50, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x02,
            0xdb, 0xc9, 0x3d, 0x07, 0x09, 0x7d, 0xa4, 0x30, 0x01, 0x31, 0xcf, 0xc3, 0x08, 0xef,
            0xdd, 0x5c, 0x00, 0x01, 0xe8, 0x48, 0x00, 0x01, 0x45, 0x85, 0x00,
        ];
        let mut reader = BitReader::with_offset(&payload[..], 9 * 8);
        let actual = GridDefinitionTemplate::read(&mut reader, 0).unwrap();
        assert_eq!(reader.remaining_bits(), 0);

        assert_eq!(actual.earth().shape_of_the_earth, 4);
        assert_eq!(actual.grid_shape(), (256, 336));
        assert_eq!(actual.short_name(), "regular_ll");
        assert_eq!(actual.try_get(GridContent::SHAPE), Some((256, 336)));
        assert_eq!(
            actual.try_get(GridContent::SCANNING_MODE),
            Some(ScanningMode(0b00000000))
        );
        assert_eq!(
            actual.try_get(GridContent::FIRST_POINT),
            Some(Coordinate::new(47.958333, 118.0625))
        );
        assert_eq!(
            actual.try_get(GridContent::LAST_POINT),
            Some(Coordinate::new(20.041667, 149.9375))
        );

        let mut latlons = actual.latlons().unwrap();
        assert_eq!(latlons.size_hint(), (256 * 336, Some(256 * 336)));
        assert_eq!(latlons.next(), Some(Coordinate::new(47.958333, 118.0625)));
        let last = latlons.last().unwrap();
        assert_coord_almost_eq(last, (20.041667, 149.9375), 1e-9);
    }
}
