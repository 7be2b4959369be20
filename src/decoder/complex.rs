use std::fmt::{self, Display, Formatter};

use self::{
    diff::{SpatialDiff1stOrderDecodeIterator, SpatialDiff2ndOrderDecodeIterator},
    missing::DecodedValue::{self, Missing1, Missing2, Normal},
};
use crate::{
    BitReader,
    decoder::{simple::Scaling, value_buffer},
    def::grib2::template5::param_set::{ComplexPacking, SimplePacking},
    error::{BitReadError, DecodeError},
    helpers::{grib_int_from_bits, is_all_ones},
};

mod diff;
mod missing;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComplexPackingDecodeError {
    /// Order of spatial differencing other than 1 or 2.
    UnsupportedSpatialDifferencingOrder(u8),
    /// Extra descriptors must be 1 to 4 octets wide.
    InvalidExtraDescriptorWidth(u8),
    /// The group lengths do not add up to the number of encoded values.
    GroupLengthMismatch { expected: usize, actual: usize },
    /// More groups than encoded values.
    TooManyGroups { groups: usize, values: usize },
}

impl Display for ComplexPackingDecodeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedSpatialDifferencingOrder(n) => {
                write!(f, "unsupported order of spatial differencing: {n}")
            }
            Self::InvalidExtraDescriptorWidth(n) => {
                write!(f, "invalid width of extra descriptors: {n} octets")
            }
            Self::GroupLengthMismatch { expected, actual } => write!(
                f,
                "group lengths add up to {actual} values instead of {expected}"
            ),
            Self::TooManyGroups { groups, values } => {
                write!(f, "{groups} groups for {values} values")
            }
        }
    }
}

impl From<ComplexPackingDecodeError> for DecodeError {
    fn from(e: ComplexPackingDecodeError) -> Self {
        Self::ComplexPackingDecodeError(e)
    }
}

struct Group {
    reference: u32,
    width: usize,
    length: usize,
}

/// Decodes complex packing, optionally combined with spatial differencing of
/// the given order and extra descriptor width.
pub(crate) fn decode(
    simple: &SimplePacking,
    complex: &ComplexPacking,
    spdiff: Option<(u8, u8)>,
    data: &[u8],
    num_encoded: usize,
) -> Result<Vec<f32>, DecodeError> {
    if complex.group_splitting_method != 1 {
        return Err(DecodeError::NotSupported(
            "GRIB2 code table 5.4 (group splitting method)",
            complex.group_splitting_method.into(),
        ));
    }
    if complex.missing_value_management > 2 {
        return Err(DecodeError::NotSupported(
            "GRIB2 code table 5.5 (missing value management for complex packing)",
            complex.missing_value_management.into(),
        ));
    }

    let mut reader = BitReader::new(data);
    let descriptors = spdiff
        .map(|(order, num_octets)| read_extra_descriptors(&mut reader, order, num_octets))
        .transpose()?;
    let z_min = descriptors.as_ref().map_or(0, |d| d.minimum);

    // Every group holds at least one value.
    let ngroup = complex.num_groups as usize;
    if ngroup > num_encoded {
        return Err(ComplexPackingDecodeError::TooManyGroups {
            groups: ngroup,
            values: num_encoded,
        }
        .into());
    }
    let mut values = value_buffer(num_encoded)?;

    let groups = read_groups(&mut reader, simple.num_bits, complex)?;
    let actual = groups
        .iter()
        .fold(0_usize, |sum, g| sum.saturating_add(g.length));
    if actual != num_encoded {
        return Err(ComplexPackingDecodeError::GroupLengthMismatch {
            expected: num_encoded,
            actual,
        }
        .into());
    }

    let nbit = usize::from(simple.num_bits);
    let mvm = complex.missing_value_management;
    for group in groups {
        if group.width == 0 {
            let value = classify(group.reference, nbit, mvm, |v| (v as i32).wrapping_add(z_min));
            values.extend(std::iter::repeat_n(value, group.length));
        } else {
            for _ in 0..group.length {
                let encoded = reader.read_bits(group.width)?;
                let value = classify(encoded, group.width, mvm, |v| {
                    (v as i32)
                        .wrapping_add(group.reference as i32)
                        .wrapping_add(z_min)
                });
                values.push(value);
            }
        }
    }

    let values: Vec<DecodedValue> = match descriptors.map(|d| d.first_values) {
        None => values,
        Some(FirstValues::One(first)) => {
            SpatialDiff1stOrderDecodeIterator::new(values.into_iter(), first).collect()
        }
        Some(FirstValues::Two(first, second)) => {
            SpatialDiff2ndOrderDecodeIterator::new(values.into_iter(), first, second).collect()
        }
    };

    let scaling = Scaling::new(simple);
    let values = values
        .into_iter()
        .map(|v| match v {
            Normal(v) => scaling.apply(v),
            Missing1 | Missing2 => f32::NAN,
        })
        .collect();
    Ok(values)
}

fn classify<F>(encoded: u32, nbit: usize, mvm: u8, normal: F) -> DecodedValue
where
    F: FnOnce(u32) -> i32,
{
    if mvm > 0 && is_all_ones(encoded, nbit) {
        Missing1
    } else if mvm == 2 && nbit > 0 && is_all_ones(encoded + 1, nbit) {
        Missing2
    } else {
        Normal(normal(encoded))
    }
}

fn read_groups(
    reader: &mut BitReader<&[u8]>,
    ref_nbit: u8,
    complex: &ComplexPacking,
) -> Result<Vec<Group>, BitReadError> {
    let ngroup = complex.num_groups as usize;

    reader.align();
    let refs = read_n(reader, usize::from(ref_nbit), ngroup)?;

    reader.align();
    let widths = read_n(reader, usize::from(complex.num_group_width_bits), ngroup)?;

    reader.align();
    let lens = read_n(reader, usize::from(complex.num_group_len_bits), ngroup)?;

    reader.align();
    let groups = refs
        .into_iter()
        .zip(widths)
        .zip(lens)
        .enumerate()
        .map(|(i, ((reference, width), len))| {
            let length = if i + 1 == ngroup {
                u64::from(complex.group_len_last)
            } else {
                u64::from(complex.group_len_ref) + u64::from(len) * u64::from(complex.group_len_inc)
            };
            Group {
                reference,
                width: (u32::from(complex.group_width_ref) + width) as usize,
                length: length as usize,
            }
        })
        .collect();
    Ok(groups)
}

fn read_n(
    reader: &mut BitReader<&[u8]>,
    nbit: usize,
    n: usize,
) -> Result<Vec<u32>, BitReadError> {
    (0..n).map(|_| reader.read_bits(nbit)).collect()
}

/// Octets 6-ww of data template 7.3: the first original values followed by
/// the overall minimum of the differences.
#[derive(Debug, PartialEq, Eq)]
struct SpatialDifferencingExtraDescriptors {
    first_values: FirstValues,
    minimum: i32,
}

#[derive(Debug, PartialEq, Eq)]
enum FirstValues {
    One(i32),
    Two(i32, i32),
}

fn read_extra_descriptors(
    reader: &mut BitReader<&[u8]>,
    order: u8,
    num_octets: u8,
) -> Result<SpatialDifferencingExtraDescriptors, DecodeError> {
    if !(1..=2).contains(&order) {
        return Err(ComplexPackingDecodeError::UnsupportedSpatialDifferencingOrder(order).into());
    }
    if !(1..=4).contains(&num_octets) {
        return Err(ComplexPackingDecodeError::InvalidExtraDescriptorWidth(num_octets).into());
    }

    let nbit = usize::from(num_octets) * 8;
    let mut read_signed = || -> Result<i32, BitReadError> {
        let raw = reader.read_bits(nbit)?;
        Ok(grib_int_from_bits(raw, nbit))
    };
    let first_values = match order {
        1 => FirstValues::One(read_signed()?),
        _ => FirstValues::Two(read_signed()?, read_signed()?),
    };
    let minimum = read_signed()?;
    Ok(SpatialDifferencingExtraDescriptors {
        first_values,
        minimum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(num_bits: u8) -> SimplePacking {
        SimplePacking {
            ref_val: 0.0,
            exp: 0,
            dec: 0,
            num_bits,
        }
    }

    fn complex(num_groups: u32, group_len_last: u32, mvm: u8) -> ComplexPacking {
        ComplexPacking {
            group_splitting_method: 1,
            missing_value_management: mvm,
            primary_missing_value: u32::MAX,
            secondary_missing_value: u32::MAX,
            num_groups,
            group_width_ref: 0,
            num_group_width_bits: 4,
            group_len_ref: 2,
            group_len_inc: 1,
            group_len_last,
            num_group_len_bits: 4,
        }
    }

    // Two groups: reference 10 and width 2 with values 0..3, then reference
    // 20, width 0 and length 2.
    const TWO_GROUPS: [u8; 5] = [0x0a, 0x14, 0x20, 0x20, 0x1b];

    #[test]
    fn complex_packing_with_constant_group() {
        let actual = decode(&simple(8), &complex(2, 2, 0), None, &TWO_GROUPS, 6).unwrap();
        assert_eq!(actual, vec![10.0, 11.0, 12.0, 13.0, 20.0, 20.0]);
    }

    #[test]
    fn complex_packing_with_primary_missing_values() {
        let actual = decode(&simple(8), &complex(2, 2, 1), None, &TWO_GROUPS, 6).unwrap();
        assert_eq!(actual[..3], [10.0, 11.0, 12.0]);
        assert!(actual[3].is_nan());
        assert_eq!(actual[4..], [20.0, 20.0]);
    }

    #[test]
    fn complex_packing_with_secondary_missing_values() {
        let actual = decode(&simple(8), &complex(2, 2, 2), None, &TWO_GROUPS, 6).unwrap();
        assert_eq!(actual[..2], [10.0, 11.0]);
        assert!(actual[2].is_nan());
        assert!(actual[3].is_nan());
    }

    #[test]
    fn complex_packing_with_wrong_group_lengths() {
        let result = decode(&simple(8), &complex(2, 3, 0), None, &TWO_GROUPS, 6);
        assert_eq!(
            result,
            Err(DecodeError::ComplexPackingDecodeError(
                ComplexPackingDecodeError::GroupLengthMismatch {
                    expected: 6,
                    actual: 7
                }
            ))
        );
    }

    #[test]
    fn complex_packing_with_more_groups_than_values() {
        let result = decode(&simple(8), &complex(u32::MAX, 2, 0), None, &TWO_GROUPS, 6);
        assert_eq!(
            result,
            Err(DecodeError::ComplexPackingDecodeError(
                ComplexPackingDecodeError::TooManyGroups {
                    groups: u32::MAX as usize,
                    values: 6
                }
            ))
        );
    }

    #[test]
    fn complex_packing_with_unreservable_value_count() {
        let result = decode(&simple(8), &complex(2, 2, 0), None, &TWO_GROUPS, usize::MAX);
        assert_eq!(result, Err(DecodeError::AllocationFailed(usize::MAX)));
    }

    #[test]
    fn complex_packing_with_first_order_spatial_differencing() {
        // first value 100, minimum -2 (sign and magnitude), one group of
        // reference 0 and width 2 with values 0, 3, 1, 2
        let data = [0x64, 0x82, 0x00, 0x20, 0x36];
        let mut param = complex(1, 4, 0);
        param.num_group_len_bits = 0;
        let actual = decode(&simple(8), &param, Some((1, 1)), &data, 4).unwrap();
        assert_eq!(actual, vec![100.0, 101.0, 100.0, 100.0]);
    }

    #[test]
    fn complex_packing_with_second_order_spatial_differencing() {
        // first values 100 and 101, minimum -1, one constant group of
        // reference 1
        let data = [0x00, 0x64, 0x00, 0x65, 0x80, 0x01, 0x01, 0x00];
        let mut param = complex(1, 4, 0);
        param.num_group_len_bits = 0;
        let actual = decode(&simple(8), &param, Some((2, 2)), &data, 4).unwrap();
        assert_eq!(actual, vec![100.0, 101.0, 102.0, 103.0]);
    }

    macro_rules! test_invalid_spatial_differencing {
        ($(($name:ident, $spdiff:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let result = decode(&simple(8), &complex(2, 2, 0), Some($spdiff), &TWO_GROUPS, 6);
                assert_eq!(result, Err(DecodeError::ComplexPackingDecodeError($expected)));
            }
        )*);
    }

    test_invalid_spatial_differencing! {
        (
            spatial_differencing_of_order_3,
            (3, 2),
            ComplexPackingDecodeError::UnsupportedSpatialDifferencingOrder(3)
        ),
        (
            spatial_differencing_with_5_octet_descriptors,
            (1, 5),
            ComplexPackingDecodeError::InvalidExtraDescriptorWidth(5)
        ),
    }

    #[test]
    fn unsupported_group_splitting_method() {
        let mut param = complex(2, 2, 0);
        param.group_splitting_method = 0;
        let result = decode(&simple(8), &param, None, &TWO_GROUPS, 6);
        assert!(matches!(result, Err(DecodeError::NotSupported(_, 0))));
    }
}
