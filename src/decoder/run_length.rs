use std::fmt::{self, Display, Formatter};

use crate::{
    bits::NBitwiseIterator, decoder::value_buffer, def::grib2::Template5_200,
    error::DecodeError,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunLengthEncodingDecodeError {
    /// Bit widths outside 1 to 16 cannot hold level values.
    UnsupportedBitWidth(u8),
    /// The maximum level leaves no room for run lengths in the bit width.
    InvalidMaxValue(u16),
    /// The data starts with a run length instead of a level.
    InvalidFirstValue,
    /// A level that has no representative value.
    InvalidLevelValue(u16),
    /// The runs expand to a number of values other than expected.
    LengthMismatch,
}

impl Display for RunLengthEncodingDecodeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedBitWidth(n) => write!(f, "unsupported bit width: {n}"),
            Self::InvalidMaxValue(v) => write!(f, "invalid maximum level value: {v}"),
            Self::InvalidFirstValue => write!(f, "invalid first value"),
            Self::InvalidLevelValue(v) => write!(f, "invalid level value: {v}"),
            Self::LengthMismatch => write!(f, "decoded length mismatch"),
        }
    }
}

impl From<RunLengthEncodingDecodeError> for DecodeError {
    fn from(e: RunLengthEncodingDecodeError) -> Self {
        Self::RunLengthEncodingDecodeError(e)
    }
}

/// Decodes run-length packed levels into their representative values.
///
/// Level 0 means missing and becomes NaN; level `i` becomes the `i`-th
/// representative value scaled by `10^-dec`.
pub(crate) fn decode(
    template: &Template5_200,
    data: &[u8],
    num_encoded: usize,
) -> Result<Vec<f32>, DecodeError> {
    let factor = 10_f64.powi(-i32::from(template.dec));
    let mut level_map = Vec::with_capacity(template.level_vals.len() + 1);
    level_map.push(f32::NAN);
    level_map.extend(
        template
            .level_vals
            .iter()
            .map(|val| (f64::from(*val) * factor) as f32),
    );

    let decoded_levels = rleunpack(data, template.num_bits, template.max_val, Some(num_encoded))?;

    let level_to_value = |level: &u16| -> Result<f32, DecodeError> {
        level_map
            .get(usize::from(*level))
            .copied()
            .ok_or_else(|| RunLengthEncodingDecodeError::InvalidLevelValue(*level).into())
    };
    decoded_levels.iter().map(level_to_value).collect()
}

// maxv is a 16-bit integer, so levels never need more than 16 bits.
fn rleunpack(
    input: &[u8],
    nbit: u8,
    maxv: u16,
    expected_len: Option<usize>,
) -> Result<Box<[u16]>, DecodeError> {
    if !(1..=16).contains(&nbit) {
        return Err(RunLengthEncodingDecodeError::UnsupportedBitWidth(nbit).into());
    }
    let rlbase = u32::from(maxv) + 1;
    let range = 1_u32 << nbit;
    if rlbase >= range {
        return Err(RunLengthEncodingDecodeError::InvalidMaxValue(maxv).into());
    }
    let lngu = (range - rlbase) as usize;

    let mut out_buf = value_buffer(expected_len.unwrap_or(0))?;
    let mut cached = None;
    let mut exp: usize = 1;

    for value in NBitwiseIterator::new(input, usize::from(nbit)) {
        if value < rlbase {
            let value = value as u16;
            out_buf.push(value);
            cached = Some(value);
            exp = 1;
        } else {
            let prev = cached.ok_or(RunLengthEncodingDecodeError::InvalidFirstValue)?;
            let length = ((value - rlbase) as usize).saturating_mul(exp);
            let new_len = out_buf.len().saturating_add(length);
            if expected_len.is_some_and(|len| new_len > len) {
                return Err(RunLengthEncodingDecodeError::LengthMismatch.into());
            }
            out_buf
                .try_reserve(length)
                .map_err(|_| DecodeError::AllocationFailed(new_len))?;
            out_buf.resize(new_len, prev);
            exp = exp.saturating_mul(lngu);
        }
    }

    if let Some(len) = expected_len
        && len != out_buf.len()
    {
        return Err(RunLengthEncodingDecodeError::LengthMismatch.into());
    }

    Ok(out_buf.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    // This test data is based on 4-bit numbers of sample data
    // provided in JMBSC's document available in the following URL:
    // http://www.jmbsc.or.jp/jp/online/joho-sample/Run-Length_Encoding.pdf
    #[test]
    fn decode_data_with_run_length_encoding() {
        let input: Vec<u8> = vec![3, 9, 12, 6, 4, 15, 2, 1, 0, 13, 12, 2, 3];
        let output: Vec<u16> = vec![
            3, 9, 9, 6, 4, 4, 4, 4, 4, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 3,
        ];
        let input: Vec<u8> = input.iter().map(|n| n + 240).collect();
        let output: Vec<u16> = output.iter().map(|n| n + 240).collect();

        assert_eq!(
            rleunpack(&input, 8, 250, Some(21)),
            Ok(output.into_boxed_slice())
        );
    }

    #[test]
    fn decode_data_with_run_length_encoding_with_multibyte_length() {
        let input: Vec<u8> = vec![0x00, 0x14, 0x1c];
        let output: Vec<u16> = vec![0; 6065];

        assert_eq!(rleunpack(&input, 8, 3, None), Ok(output.into_boxed_slice()));
    }

    #[test]
    fn run_length_before_any_level_is_rejected() {
        assert_eq!(
            rleunpack(&[0xfe, 0x01], 8, 250, None),
            Err(RunLengthEncodingDecodeError::InvalidFirstValue.into())
        );
    }

    #[test]
    fn runs_longer_than_expected_are_rejected() {
        assert_eq!(
            rleunpack(&[0x00, 0x14, 0x1c], 8, 3, Some(100)),
            Err(RunLengthEncodingDecodeError::LengthMismatch.into())
        );
    }

    #[test]
    fn maximum_level_filling_the_bit_width_is_rejected() {
        assert_eq!(
            rleunpack(&[0x00], 4, 15, None),
            Err(RunLengthEncodingDecodeError::InvalidMaxValue(15).into())
        );
        assert_eq!(
            rleunpack(&[0x00], 0, 0, None),
            Err(RunLengthEncodingDecodeError::UnsupportedBitWidth(0).into())
        );
    }

    fn template() -> Template5_200 {
        Template5_200 {
            num_bits: 4,
            max_val: 3,
            max_level: 3,
            dec: 1,
            level_vals: vec![5, 10, 25],
        }
    }

    #[test]
    fn levels_are_mapped_to_representative_values() {
        // levels 1 and 2, a run code repeating 2 once more, then 0, 3 and 3
        let data = [0x12, 0x50, 0x33];
        let actual = decode(&template(), &data, 6);
        let actual = actual.map(|v| {
            v.iter()
                .map(|f| if f.is_nan() { None } else { Some(*f) })
                .collect::<Vec<_>>()
        });
        assert_eq!(
            actual,
            Ok(vec![
                Some(0.5),
                Some(1.0),
                Some(1.0),
                None,
                Some(2.5),
                Some(2.5)
            ])
        );
    }

    #[test]
    fn unreservable_value_count_is_rejected() {
        assert_eq!(
            decode(&template(), &[0x12, 0x50, 0x33], usize::MAX),
            Err(DecodeError::AllocationFailed(usize::MAX))
        );
    }

    #[test]
    fn unknown_level_is_rejected() {
        let mut template = template();
        template.level_vals.truncate(1);
        assert_eq!(
            decode(&template, &[0x12], 2),
            Err(DecodeError::RunLengthEncodingDecodeError(
                RunLengthEncodingDecodeError::InvalidLevelValue(2)
            ))
        );
    }
}
