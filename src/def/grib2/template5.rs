use crate::{
    BitReader,
    content::{ContentRegistry, ReprContent, impl_template},
    error::BitReadError,
};

/// Data representation template 5.0 - Grid point data - simple packing.
#[derive(Debug, Clone, PartialEq)]
pub struct Template5_0 {
    pub simple: param_set::SimplePacking,
    /// Type of original field values (see Code table 5.1).
    pub orig_field_type: u8,
}

impl Template5_0 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            simple: param_set::SimplePacking::read_from(reader)?,
            orig_field_type: reader.read()?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_simple(registry);
    }
}

impl_template!(Template5_0, 5, 0);

/// Data representation template 5.2 - Grid point data - complex packing.
#[derive(Debug, Clone, PartialEq)]
pub struct Template5_2 {
    pub simple: param_set::SimplePacking,
    /// Type of original field values (see Code table 5.1).
    pub orig_field_type: u8,
    pub complex: param_set::ComplexPacking,
}

impl Template5_2 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            simple: param_set::SimplePacking::read_from(reader)?,
            orig_field_type: reader.read()?,
            complex: param_set::ComplexPacking::read_from(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_simple(registry);
        registry.register(ReprContent::GROUP_COUNT, |t: &Self| t.complex.num_groups);
    }
}

impl_template!(Template5_2, 5, 2);

/// Data representation template 5.3 - Grid point data - complex packing and
/// spatial differencing.
#[derive(Debug, Clone, PartialEq)]
pub struct Template5_3 {
    pub simple: param_set::SimplePacking,
    /// Type of original field values (see Code table 5.1).
    pub orig_field_type: u8,
    pub complex: param_set::ComplexPacking,
    /// Order of spatial differencing (see Code table 5.6).
    pub spatial_diff_order: u8,
    /// Number of octets required in the data section to specify extra
    /// descriptors needed for spatial differencing (octets 6-ww in data
    /// template 7.3).
    pub num_extra_desc_octets: u8,
}

impl Template5_3 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            simple: param_set::SimplePacking::read_from(reader)?,
            orig_field_type: reader.read()?,
            complex: param_set::ComplexPacking::read_from(reader)?,
            spatial_diff_order: reader.read()?,
            num_extra_desc_octets: reader.read()?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_simple(registry);
        registry.register(ReprContent::GROUP_COUNT, |t: &Self| t.complex.num_groups);
        registry.register(ReprContent::SPATIAL_DIFFERENCING_ORDER, |t: &Self| {
            t.spatial_diff_order
        });
    }
}

impl_template!(Template5_3, 5, 3);

/// Data representation template 5.4 - Grid point data - IEEE floating point
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template5_4 {
    /// Precision (see Code table 5.7).
    pub precision: u8,
}

impl Template5_4 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            precision: reader.read()?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        registry.register(ReprContent::PRECISION, |t: &Self| t.precision);
    }
}

impl_template!(Template5_4, 5, 4);

/// Data representation template 5.200 - Run length packing with level values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template5_200 {
    /// Number of bits used for each packed value in the run length packing with
    /// level value.
    pub num_bits: u8,
    /// MV - maximum value within the levels that are used in the packing.
    pub max_val: u16,
    /// MVL - maximum value of level (predefined).
    pub max_level: u16,
    /// Decimal scale factor of representative value of each level.
    pub dec: u8,
    /// List of MVL scaled representative values of each level from lv=1 to MVL.
    pub level_vals: Vec<u16>,
}

impl Template5_200 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        let num_bits = reader.read()?;
        let max_val = reader.read()?;
        let max_level = reader.read::<u16>()?;
        let dec = reader.read()?;
        let level_vals = (0..max_level)
            .map(|_| reader.read::<u16>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            num_bits,
            max_val,
            max_level,
            dec,
            level_vals,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        registry.register(ReprContent::BIT_WIDTH, |t: &Self| t.num_bits);
    }
}

impl_template!(Template5_200, 5, 200);

trait HasSimplePacking {
    fn simple(&self) -> &param_set::SimplePacking;
    fn orig_field_type(&self) -> u8;
}

macro_rules! add_impl_for_templates {
    ($($ty:ty,)*) => ($(
        impl HasSimplePacking for $ty {
            fn simple(&self) -> &param_set::SimplePacking {
                &self.simple
            }

            fn orig_field_type(&self) -> u8 {
                self.orig_field_type
            }
        }
    )*);
}

add_impl_for_templates![Template5_0, Template5_2, Template5_3,];

fn register_simple<S: HasSimplePacking + 'static>(registry: &mut ContentRegistry<S>) {
    registry.register(ReprContent::REFERENCE_VALUE, |t: &S| t.simple().ref_val);
    registry.register(ReprContent::BINARY_SCALE_FACTOR, |t: &S| t.simple().exp);
    registry.register(ReprContent::DECIMAL_SCALE_FACTOR, |t: &S| t.simple().dec);
    registry.register(ReprContent::BIT_WIDTH, |t: &S| t.simple().num_bits);
    registry.register(ReprContent::ORIGINAL_FIELD_TYPE, |t: &S| t.orig_field_type());
}

pub mod param_set {
    use crate::{BitReader, error::BitReadError};

    #[derive(Debug, Clone, PartialEq)]
    pub struct SimplePacking {
        /// Reference value (R) (IEEE 32-bit floating-point value).
        pub ref_val: f32,
        /// Binary scale factor (E).
        pub exp: i16,
        /// Decimal scale factor (D).
        pub dec: i16,
        /// Number of bits used for each packed value for simple packing, or for
        /// each group reference value for complex packing or spatial
        /// differencing.
        pub num_bits: u8,
    }

    impl SimplePacking {
        pub(crate) fn read_from<T: AsRef<[u8]>>(
            reader: &mut BitReader<T>,
        ) -> Result<Self, BitReadError> {
            Ok(Self {
                ref_val: reader.read()?,
                exp: reader.read_i16()?,
                dec: reader.read_i16()?,
                num_bits: reader.read()?,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct ComplexPacking {
        /// Group splitting method used (see Code table 5.4).
        pub group_splitting_method: u8,
        /// Missing value management used (see Code table 5.5).
        pub missing_value_management: u8,
        /// Primary missing value substitute.
        pub primary_missing_value: u32,
        /// Secondary missing value substitute.
        pub secondary_missing_value: u32,
        /// NG - number of groups of data values into which field is split.
        pub num_groups: u32,
        /// Reference for group widths.
        pub group_width_ref: u8,
        /// Number of bits used for the group widths (after the reference value
        /// has been removed).
        pub num_group_width_bits: u8,
        /// Reference for group lengths.
        pub group_len_ref: u32,
        /// Length increment for the group lengths.
        pub group_len_inc: u8,
        /// True length of last group.
        pub group_len_last: u32,
        /// Number of bits used for the scaled group lengths (after subtraction
        /// of the reference value and division by the length increment).
        pub num_group_len_bits: u8,
    }

    impl ComplexPacking {
        pub(crate) fn read_from<T: AsRef<[u8]>>(
            reader: &mut BitReader<T>,
        ) -> Result<Self, BitReadError> {
            Ok(Self {
                group_splitting_method: reader.read()?,
                missing_value_management: reader.read()?,
                primary_missing_value: reader.read()?,
                secondary_missing_value: reader.read()?,
                num_groups: reader.read()?,
                group_width_ref: reader.read()?,
                num_group_width_bits: reader.read()?,
                group_len_ref: reader.read()?,
                group_len_inc: reader.read()?,
                group_len_last: reader.read()?,
                num_group_len_bits: reader.read()?,
            })
        }
    }
}
