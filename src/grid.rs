//! Grid geometry: the order of grid points and their coordinates.

use std::hash::{Hash, Hasher};

mod earth;
mod gaussian;
pub(crate) mod helpers;
mod latlon;
mod rotated_ll;

pub use earth::EarthShapeDefinition;
pub use gaussian::{GaussianGridDefinition, compute_gaussian_latitudes};
pub use latlon::{LatLonGridDefinition, LatLonGridIterator};
pub use rotated_ll::{RotatedLatLonGridDefinition, Rotation, Unrotate};

/// A geographic position in degrees.
///
/// Equality and hashing compare the bit patterns of both components, so two
/// coordinates are equal only if they are exactly the same floating point
/// values. Callers needing a tolerance compare the components themselves.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a coordinate from values in micro-degrees.
    pub(crate) fn from_micro_degrees(lat: i32, lon: i32) -> Self {
        Self::new(f64::from(lat) / 1e6, f64::from(lon) / 1e6)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Scanning mode flags (see Flag Table 3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanningMode(pub u8);

impl ScanningMode {
    /// Returns `true` if points of the first row or column scan in the `+i`
    /// (`+x`) direction.
    ///
    /// # Examples
    ///
    /// ```
    /// assert!(grib_reader::ScanningMode(0b00000000).scans_positively_for_i());
    /// assert!(!grib_reader::ScanningMode(0b10000000).scans_positively_for_i());
    /// ```
    pub fn scans_positively_for_i(&self) -> bool {
        self.0 & 0b10000000 == 0
    }

    /// Returns `true` if points of the first row or column scan in the `+j`
    /// (`+y`) direction.
    pub fn scans_positively_for_j(&self) -> bool {
        self.0 & 0b01000000 != 0
    }

    /// Returns `true` if adjacent points in the `i` direction are
    /// consecutive.
    pub fn is_consecutive_for_i(&self) -> bool {
        self.0 & 0b00100000 == 0
    }

    /// Returns `true` if adjacent rows scan in opposite directions.
    pub fn scans_alternating_rows(&self) -> bool {
        self.0 & 0b00010000 != 0
    }

    pub fn has_unsupported_flags(&self) -> bool {
        self.0 & 0b00001111 != 0
    }
}

/// An iterator over `(i, j)` indices of grid points in the order the data
/// values are stored.
///
/// Index 0 along each axis is the first grid point; the direction of each
/// axis is given by the first and last points of the grid.
#[derive(Debug, Clone)]
pub struct GridPointIndexIterator {
    major_len: usize,
    minor_len: usize,
    scanning_mode: ScanningMode,
    major_pos: usize,
    minor_pos: usize,
    increments: bool,
}

impl GridPointIndexIterator {
    pub fn new(i_len: usize, j_len: usize, scanning_mode: ScanningMode) -> Self {
        let (major_len, minor_len) = if scanning_mode.is_consecutive_for_i() {
            (j_len, i_len)
        } else {
            (i_len, j_len)
        };

        Self {
            major_len,
            minor_len,
            scanning_mode,
            major_pos: 0,
            minor_pos: 0,
            increments: true,
        }
    }
}

impl Iterator for GridPointIndexIterator {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.major_pos == self.major_len || self.minor_len == 0 {
            return None;
        }

        let minor = if self.increments {
            self.minor_pos
        } else {
            self.minor_len - self.minor_pos - 1
        };
        let major = self.major_pos;

        self.minor_pos += 1;
        if self.minor_pos == self.minor_len {
            self.major_pos += 1;
            self.minor_pos = 0;
            if self.scanning_mode.scans_alternating_rows() {
                self.increments = !self.increments;
            }
        }

        if self.scanning_mode.is_consecutive_for_i() {
            Some((minor, major))
        } else {
            Some((major, minor))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = if self.minor_len == 0 {
            0
        } else {
            (self.major_len - self.major_pos) * self.minor_len - self.minor_pos
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for GridPointIndexIterator {}

/// An iterator over coordinates of grid points.
#[derive(Clone)]
pub enum GridPointIterator {
    LatLon(LatLonGridIterator),
    Rotated(Unrotate<LatLonGridIterator>),
}

impl Iterator for GridPointIterator {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::LatLon(iter) => iter.next(),
            Self::Rotated(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::LatLon(iter) => iter.size_hint(),
            Self::Rotated(iter) => iter.size_hint(),
        }
    }
}
