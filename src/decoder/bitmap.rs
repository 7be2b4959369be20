use crate::error::DecodeError;

/// A bit-map with one presence bit per grid point, most significant bit
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BitmapMask {
    bytes: Vec<u8>,
}

const MASK: u8 = 0b10000000;

impl BitmapMask {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns `true` if the point at `index` has a value.
    pub(crate) fn is_set(&self, index: usize) -> bool {
        self.bytes
            .get(index / 8)
            .is_some_and(|byte| byte & (MASK >> (index % 8)) != 0)
    }

    /// Counts the points with a value among the first `num_points` points.
    pub(crate) fn count_set(&self, num_points: usize) -> usize {
        (0..num_points).filter(|i| self.is_set(*i)).count()
    }

    /// Checks that the bit-map covers every grid point and that the number of
    /// present points matches the number of encoded values.
    pub(crate) fn check(&self, num_points: usize, num_encoded: usize) -> Result<(), DecodeError> {
        if self.bytes.len() < num_octets_for_bitmap(num_points) {
            return Err(DecodeError::BitmapLengthMismatch);
        }
        if self.count_set(num_points) != num_encoded {
            return Err(DecodeError::LengthMismatch);
        }
        Ok(())
    }
}

pub(crate) fn num_octets_for_bitmap(num_points: usize) -> usize {
    num_points.div_ceil(8)
}
