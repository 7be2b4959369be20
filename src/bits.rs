use crate::{datatypes::ScaledValue, error::BitReadError, helpers::GribInt};

/// A cursor over GRIB octets supporting both byte-aligned reads of fixed
/// width numbers and most-significant-bit-first reads of arbitrary widths.
///
/// The cursor only moves forward. Aligned reads first skip to the next byte
/// boundary, so a run of packed values followed by an octet field reads
/// naturally.
///
/// # Examples
///
/// ```
/// use grib_reader::BitReader;
///
/// let mut reader = BitReader::new([0b1011_0110, 0x00, 0x2a]);
/// assert_eq!(reader.read_bits(3), Ok(0b101));
/// assert_eq!(reader.read_bits(3), Ok(0b101));
/// assert_eq!(reader.read::<u16>(), Ok(0x002a));
/// assert!(reader.read::<u8>().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<T> {
    data: T,
    pos: usize,
}

impl<T: AsRef<[u8]>> BitReader<T> {
    pub fn new(data: T) -> Self {
        Self { data, pos: 0 }
    }

    /// Starts reading at `offset_bits` from the beginning of `data`.
    pub fn with_offset(data: T, offset_bits: usize) -> Self {
        Self {
            data,
            pos: offset_bits,
        }
    }

    /// Returns the total length of the underlying data in octets.
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.as_ref().is_empty()
    }

    pub fn bit_position(&self) -> usize {
        self.pos
    }

    /// Returns the number of octets touched so far, counting a partially
    /// read octet as consumed.
    pub fn byte_position(&self) -> usize {
        self.pos.div_ceil(8)
    }

    pub fn remaining_bits(&self) -> usize {
        (self.len() * 8).saturating_sub(self.pos)
    }

    pub fn is_aligned(&self) -> bool {
        self.pos % 8 == 0
    }

    /// Moves the cursor to the next byte boundary, if it is not already on
    /// one.
    pub fn align(&mut self) {
        self.pos = self.byte_position() * 8;
    }

    fn ensure(&self, nbit: usize) -> Result<(), BitReadError> {
        if nbit > self.remaining_bits() {
            return Err(BitReadError::OutOfData {
                offset: self.pos,
                requested: nbit,
            });
        }
        Ok(())
    }

    /// Reads an unsigned integer of `nbit` bits, most significant bit first.
    ///
    /// A zero-width read returns 0 and does not move the cursor.
    pub fn read_bits(&mut self, nbit: usize) -> Result<u32, BitReadError> {
        if nbit > 32 {
            return Err(BitReadError::InvalidWidth(nbit));
        }
        if nbit == 0 {
            return Ok(0);
        }
        self.ensure(nbit)?;

        let buf = self.data.as_ref();
        let mut val = 0_u64;
        let mut rest = nbit;
        let mut pos = self.pos;
        while rest > 0 {
            let offset = pos % 8;
            let take = (8 - offset).min(rest);
            let bits = (buf[pos / 8] << offset) >> (8 - take);
            val = (val << take) | u64::from(bits);
            rest -= take;
            pos += take;
        }
        self.pos = pos;
        Ok(val as u32)
    }

    /// Reads `n` octets starting at the next byte boundary.
    pub fn read_bytes(&mut self, n: usize) -> Result<&[u8], BitReadError> {
        self.align();
        self.ensure(n * 8)?;
        let start = self.pos / 8;
        self.pos += n * 8;
        Ok(&self.data.as_ref()[start..start + n])
    }

    /// Skips `n` octets starting at the next byte boundary.
    pub fn skip_bytes(&mut self, n: usize) -> Result<(), BitReadError> {
        self.read_bytes(n).map(|_| ())
    }

    /// Reads a big-endian number starting at the next byte boundary.
    pub fn read<N: FromBytes>(&mut self) -> Result<N, BitReadError> {
        let bytes = self.read_bytes(N::SIZE)?;
        Ok(N::from_be_bytes(bytes))
    }

    pub fn read_i8(&mut self) -> Result<i8, BitReadError> {
        Ok(self.read::<u8>()?.as_grib_int())
    }

    pub fn read_i16(&mut self) -> Result<i16, BitReadError> {
        Ok(self.read::<u16>()?.as_grib_int())
    }

    pub fn read_i32(&mut self) -> Result<i32, BitReadError> {
        Ok(self.read::<u32>()?.as_grib_int())
    }

    /// Reads the 5-octet pair of a scale factor and a scaled value.
    pub fn read_scaled(&mut self) -> Result<ScaledValue, BitReadError> {
        let scale_factor = self.read::<u8>()?;
        let scaled_value = self.read::<u32>()?;
        Ok(ScaledValue::from_raw(scale_factor, scaled_value))
    }

    /// Reads a scaled value pair and resolves it, returning `None` when the
    /// encoded value is the missing sentinel.
    pub fn read_scaled_value(&mut self) -> Result<Option<f64>, BitReadError> {
        Ok(self.read_scaled()?.value())
    }

    /// Consumes the reader and returns an iterator over `nbit`-wide values
    /// starting at the current position.
    pub(crate) fn into_nbitwise(self, nbit: usize) -> NBitwiseIterator<T> {
        NBitwiseIterator { reader: self, nbit }
    }
}

/// Numbers that can be read big-endian from a fixed number of octets.
pub trait FromBytes: Sized {
    const SIZE: usize;

    fn from_be_bytes(bytes: &[u8]) -> Self;
}

macro_rules! add_impl_for_types {
    ($($ty:ty,)*) => ($(
        impl FromBytes for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            fn from_be_bytes(bytes: &[u8]) -> $ty {
                let mut buf = [0; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..Self::SIZE]);
                <$ty>::from_be_bytes(buf)
            }
        }
    )*);
}

add_impl_for_types![u8, u16, u32, u64, f32, f64,];

/// An iterator over unsigned values of a fixed bit width.
///
/// The iterator ends when fewer than `nbit` bits remain, so trailing padding
/// bits are never yielded as a value.
#[derive(Debug, Clone)]
pub(crate) struct NBitwiseIterator<T> {
    reader: BitReader<T>,
    nbit: usize,
}

impl<T: AsRef<[u8]>> NBitwiseIterator<T> {
    pub(crate) fn new(data: T, nbit: usize) -> Self {
        BitReader::new(data).into_nbitwise(nbit)
    }
}

impl<T: AsRef<[u8]>> Iterator for NBitwiseIterator<T> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.reader.read_bits(self.nbit).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.nbit {
            0 => (usize::MAX, None),
            n => {
                let len = self.reader.remaining_bits() / n;
                (len, Some(len))
            }
        }
    }
}
