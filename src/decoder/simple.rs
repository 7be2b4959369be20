use num::ToPrimitive;

use crate::{
    bits::NBitwiseIterator,
    decoder::Unpacked,
    def::grib2::template5::param_set::SimplePacking,
    error::DecodeError,
};

/// Scale factors of the linear reconstruction `Y = (R + X * 2^E) / 10^D`,
/// computed in double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scaling {
    ref_val: f64,
    bin_factor: f64,
    dec_factor: f64,
}

impl Scaling {
    pub(crate) fn new(param: &SimplePacking) -> Self {
        Self {
            ref_val: f64::from(param.ref_val),
            bin_factor: 2_f64.powi(i32::from(param.exp)),
            dec_factor: 10_f64.powi(i32::from(param.dec)),
        }
    }

    /// Scales an encoded integer of any width or signedness. Values with no
    /// `f64` representation come out as NaN.
    pub(crate) fn apply<N: ToPrimitive>(&self, encoded: N) -> f32 {
        encoded.to_f64().map_or(f32::NAN, |x| {
            ((self.ref_val + x * self.bin_factor) / self.dec_factor) as f32
        })
    }
}

pub(crate) fn decode(
    param: &SimplePacking,
    data: Vec<u8>,
    num_encoded: usize,
) -> Result<Unpacked, DecodeError> {
    // A zero bit width encodes a constant field of the reference value, and
    // the data section carries no sample bits.
    if param.num_bits == 0 {
        return Ok(Unpacked::constant(param.ref_val, num_encoded));
    }

    let nbit = usize::from(param.num_bits);
    if nbit > 32 {
        return Err(DecodeError::NotSupported("bit width", u16::from(param.num_bits)));
    }
    if data.len() * 8 < nbit * num_encoded {
        return Err(DecodeError::LengthMismatch);
    }

    let iter = SimplePackingIterator {
        iter: NBitwiseIterator::new(data, nbit),
        scaling: Scaling::new(param),
        remaining: num_encoded,
    };
    Ok(Unpacked::Simple(iter))
}

pub(crate) struct SimplePackingIterator {
    iter: NBitwiseIterator<Vec<u8>>,
    scaling: Scaling,
    remaining: usize,
}

impl Iterator for SimplePackingIterator {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let encoded = self.iter.next()?;
        self.remaining -= 1;
        Some(self.scaling.apply(encoded))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
