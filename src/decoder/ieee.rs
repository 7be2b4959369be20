use crate::{BitReader, error::DecodeError};

/// Reads IEEE floating-point values stored big-endian, one after another.
///
/// Double precision values are narrowed to `f32`.
pub(crate) fn decode(
    precision: u8,
    data: &[u8],
    num_encoded: usize,
) -> Result<Vec<f32>, DecodeError> {
    let width = match precision {
        1 => 4,
        2 => 8,
        n => {
            return Err(DecodeError::NotSupported(
                "GRIB2 code table 5.7 (precision)",
                n.into(),
            ));
        }
    };
    if data.len() < num_encoded.saturating_mul(width) {
        return Err(DecodeError::LengthMismatch);
    }

    let mut reader = BitReader::new(data);
    (0..num_encoded)
        .map(|_| match precision {
            1 => reader.read::<f32>(),
            _ => reader.read::<f64>().map(|v| v as f32),
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(DecodeError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_precision() {
        let data = [1.5_f32, -273.15, 0.0]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect::<Vec<_>>();
        assert_eq!(decode(1, &data, 3), Ok(vec![1.5, -273.15, 0.0]));
    }

    #[test]
    fn double_precision_is_narrowed() {
        let data = [1.5_f64, 1e10]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect::<Vec<_>>();
        assert_eq!(decode(2, &data, 2), Ok(vec![1.5, 1e10]));
    }

    #[test]
    fn quadruple_precision_is_not_supported() {
        assert_eq!(
            decode(3, &[0; 16], 1),
            Err(DecodeError::NotSupported(
                "GRIB2 code table 5.7 (precision)",
                3
            ))
        );
    }

    #[test]
    fn short_data_is_rejected() {
        assert_eq!(decode(1, &[0; 7], 2), Err(DecodeError::LengthMismatch));
    }
}
