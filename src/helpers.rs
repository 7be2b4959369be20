/// Conversion of GRIB's sign-and-magnitude integers into two's complement.
///
/// GRIB stores negative integers by setting the most significant bit and
/// keeping the absolute value in the remaining bits.
pub(crate) trait GribInt<I> {
    fn as_grib_int(&self) -> I;
}

macro_rules! add_impl_for_ints {
    ($(($ty_src:ty, $ty_dst:ty),)*) => ($(
        impl GribInt<$ty_dst> for $ty_src {
            fn as_grib_int(&self) -> $ty_dst {
                if self.leading_zeros() == 0 {
                    let abs = (self << 1 >> 1) as $ty_dst;
                    -abs
                } else {
                    *self as $ty_dst
                }
            }
        }
    )*);
}

add_impl_for_ints! {
    (u8, i8),
    (u16, i16),
    (u32, i32),
    (u64, i64),
}

/// Interprets the lowest `nbit` bits of `raw` as a sign-and-magnitude
/// integer. Used for widths that have no native integer type, such as the
/// 24-bit coordinates of GRIB1 or the variable-width descriptors of spatial
/// differencing.
pub(crate) fn grib_int_from_bits(raw: u32, nbit: usize) -> i32 {
    match nbit {
        0 => 0,
        32 => raw.as_grib_int(),
        _ => {
            let sign_mask = 1_u32 << (nbit - 1);
            let abs = (raw & (sign_mask - 1)) as i32;
            if raw & sign_mask != 0 { -abs } else { abs }
        }
    }
}

/// Returns `true` if the lowest `nbit` bits of `raw` are all set, which is the
/// GRIB convention for a missing value.
pub(crate) fn is_all_ones(raw: u32, nbit: usize) -> bool {
    match nbit {
        0 => false,
        32 => raw == u32::MAX,
        _ => raw == (1_u32 << nbit) - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_grib_i8() {
        let input: Vec<u8> = vec![0b01000000, 0b00000001, 0b10000001, 0b11000000];
        let output: Vec<i8> = vec![64, 1, -1, -64];

        let actual = input.iter().map(|v| v.as_grib_int()).collect::<Vec<i8>>();
        assert_eq!(actual, output);
    }

    #[test]
    fn into_grib_i16() {
        let input: Vec<u16> = vec![0x0040, 0x0001, 0x8001, 0x8040];
        let output: Vec<i16> = vec![64, 1, -1, -64];

        let actual = input.iter().map(|v| v.as_grib_int()).collect::<Vec<i16>>();
        assert_eq!(actual, output);
    }

    #[test]
    fn all_ones_in_grib_i32_is_one_above_minimum() {
        assert_eq!(u32::MAX.as_grib_int(), i32::MIN + 1);
    }

    macro_rules! test_grib_int_from_bits {
        ($(($name:ident, $raw:expr, $nbit:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                assert_eq!(grib_int_from_bits($raw, $nbit), $expected);
            }
        )*);
    }

    test_grib_int_from_bits! {
        (grib_int_from_8_bits_positive, 0x05, 8, 5),
        (grib_int_from_8_bits_negative, 0x85, 8, -5),
        (grib_int_from_24_bits_positive, 0x01_5f_90, 24, 90_000),
        (grib_int_from_24_bits_negative, 0x81_5f_90, 24, -90_000),
        (grib_int_from_32_bits_negative, 0x8000_0001, 32, -1),
        (grib_int_from_0_bits, 0, 0, 0),
    }

    #[test]
    fn all_ones_detection() {
        assert!(is_all_ones(0xff, 8));
        assert!(!is_all_ones(0xfe, 8));
        assert!(is_all_ones(u32::MAX, 32));
        assert!(!is_all_ones(0, 0));
    }
}
