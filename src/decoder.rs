//! Reconstruction of field values from the packed Data Section.
//!
//! A [`Grib2DataDecoder`] is built from the Data Representation template of
//! a dataset, the payload of its Data Section and its bit-map, if any. It
//! checks everything that can be checked up front and then hands out
//! [`DecodedValues`], an iterator yielding exactly one value per grid point.

use std::iter::{self, Repeat, Take};

use crate::{
    def::grib2::DataRepresentationTemplate,
    error::{DecodeError, GribError},
};

mod bitmap;
mod complex;
mod ieee;
mod run_length;
mod simple;

pub(crate) use self::bitmap::BitmapMask;
pub use self::{complex::ComplexPackingDecodeError, run_length::RunLengthEncodingDecodeError};
use self::simple::SimplePackingIterator;

pub(crate) struct Grib2DataDecoder<'a> {
    repr: &'a DataRepresentationTemplate,
    num_points: usize,
    num_encoded: usize,
    data: Vec<u8>,
    bitmap: Option<BitmapMask>,
}

impl<'a> Grib2DataDecoder<'a> {
    /// `num_points` is the number of grid points of the grid definition and
    /// `num_encoded` the number of values the data representation declares.
    pub(crate) fn new(
        repr: &'a DataRepresentationTemplate,
        num_points: usize,
        num_encoded: usize,
        data: Vec<u8>,
        bitmap: Option<BitmapMask>,
    ) -> Result<Self, GribError> {
        match &bitmap {
            Some(mask) => mask.check(num_points, num_encoded)?,
            None if num_points != num_encoded => {
                return Err(DecodeError::LengthMismatch.into());
            }
            None => {}
        }

        Ok(Self {
            repr,
            num_points,
            num_encoded,
            data,
            bitmap,
        })
    }

    pub(crate) fn decode(self) -> Result<DecodedValues, GribError> {
        let Self {
            repr,
            num_points,
            num_encoded,
            data,
            bitmap,
        } = self;

        let unpacked = match repr {
            DataRepresentationTemplate::_5_0(t) => simple::decode(&t.simple, data, num_encoded)?,
            DataRepresentationTemplate::_5_2(t) => {
                let values = complex::decode(&t.simple, &t.complex, None, &data, num_encoded)?;
                Unpacked::Buffered(values.into_iter())
            }
            DataRepresentationTemplate::_5_3(t) => {
                let spdiff = (t.spatial_diff_order, t.num_extra_desc_octets);
                let values =
                    complex::decode(&t.simple, &t.complex, Some(spdiff), &data, num_encoded)?;
                Unpacked::Buffered(values.into_iter())
            }
            DataRepresentationTemplate::_5_4(t) => {
                let values = ieee::decode(t.precision, &data, num_encoded)?;
                Unpacked::Buffered(values.into_iter())
            }
            DataRepresentationTemplate::_5_200(t) => {
                let values = run_length::decode(t, &data, num_encoded)?;
                Unpacked::Buffered(values.into_iter())
            }
        };

        Ok(DecodedValues {
            values: unpacked,
            mask: bitmap,
            pos: 0,
            len: num_points,
        })
    }
}

/// Creates an empty buffer with room for `len` values, failing instead of
/// aborting when a header declares more values than can be held.
pub(crate) fn value_buffer<T>(len: usize) -> Result<Vec<T>, DecodeError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| DecodeError::AllocationFailed(len))?;
    Ok(buf)
}

pub(crate) enum Unpacked {
    Constant(Take<Repeat<f32>>),
    Simple(SimplePackingIterator),
    Buffered(std::vec::IntoIter<f32>),
}

impl Unpacked {
    pub(crate) fn constant(value: f32, len: usize) -> Self {
        Self::Constant(iter::repeat(value).take(len))
    }
}

impl Iterator for Unpacked {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Constant(iter) => iter.next(),
            Self::Simple(iter) => iter.next(),
            Self::Buffered(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Constant(iter) => iter.size_hint(),
            Self::Simple(iter) => iter.size_hint(),
            Self::Buffered(iter) => iter.size_hint(),
        }
    }
}

/// An iterator over the decoded values of a dataset, one per grid point and
/// in the order of the grid points.
///
/// Points that the bit-map marks as absent and values that the packing marks
/// as missing are yielded as NaN.
pub struct DecodedValues {
    values: Unpacked,
    mask: Option<BitmapMask>,
    pos: usize,
    len: usize,
}

impl DecodedValues {
    /// Returns the value of the next grid point, or `Some(None)` if the
    /// bit-map marks the point as absent.
    pub(crate) fn next_point(&mut self) -> Option<Option<f32>> {
        if self.pos >= self.len {
            return None;
        }
        let present = self.mask.as_ref().is_none_or(|mask| mask.is_set(self.pos));
        self.pos += 1;
        if present {
            self.values.next().map(Some)
        } else {
            Some(None)
        }
    }
}

impl Iterator for DecodedValues {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_point().map(|value| value.unwrap_or(f32::NAN))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.len - self.pos;
        (size, Some(size))
    }
}

impl ExactSizeIterator for DecodedValues {}
