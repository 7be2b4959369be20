use super::{
    Coordinate, GridPointIndexIterator, ScanningMode,
    helpers::{ensure_micro_degrees, evenly_spaced_degrees, unwrap_last_lon},
};
use crate::{BitReader, error::BitReadError, error::GribError};

/// A regular latitude/longitude grid. Coordinates are in micro-degrees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LatLonGridDefinition {
    pub ni: u32,
    pub nj: u32,
    pub basic_angle: u32,
    pub subdivision: u32,
    pub first_point_lat: i32,
    pub first_point_lon: i32,
    /// Resolution and component flags (see Flag Table 3.3).
    pub resolution_flags: u8,
    pub last_point_lat: i32,
    pub last_point_lon: i32,
    pub i_direction_inc: u32,
    pub j_direction_inc: u32,
    pub scanning_mode: ScanningMode,
}

impl LatLonGridDefinition {
    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.ni as usize, self.nj as usize)
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "regular_ll"
    }

    pub fn first_point(&self) -> Coordinate {
        Coordinate::from_micro_degrees(self.first_point_lat, self.first_point_lon)
    }

    pub fn last_point(&self) -> Coordinate {
        Coordinate::from_micro_degrees(self.last_point_lat, self.last_point_lon)
    }

    /// Returns an iterator over `(i, j)` of grid points.
    ///
    /// Note that this is a low-level API and it is not checked that the number
    /// of iterator iterations is consistent with the number of grid points
    /// defined in the data.
    pub fn ij(&self) -> Result<GridPointIndexIterator, GribError> {
        if self.scanning_mode.has_unsupported_flags() {
            let ScanningMode(mode) = self.scanning_mode;
            return Err(GribError::NotSupported(format!("scanning mode {mode}")));
        }

        let iter =
            GridPointIndexIterator::new(self.ni as usize, self.nj as usize, self.scanning_mode);
        Ok(iter)
    }

    /// Returns an iterator over coordinates of grid points in the order the
    /// data values are stored.
    pub fn latlons(&self) -> Result<LatLonGridIterator, GribError> {
        ensure_micro_degrees(self.basic_angle, self.subdivision)?;
        if !self.is_consistent() {
            return Err(GribError::InvalidValueError(
                "Latitudes of first/last grid points are not consistent with scanning mode"
                    .to_owned(),
            ));
        }

        let ij = self.ij()?;
        let lat = evenly_spaced_degrees(self.first_point_lat, self.last_point_lat, self.nj);
        let last_point_lon = unwrap_last_lon(
            self.first_point_lon,
            self.last_point_lon,
            self.scanning_mode.scans_positively_for_i(),
        );
        let lon = evenly_spaced_degrees(self.first_point_lon, last_point_lon, self.ni);

        Ok(LatLonGridIterator::new(lat, lon, ij))
    }

    pub(crate) fn is_consistent(&self) -> bool {
        let lat_diff = i64::from(self.last_point_lat) - i64::from(self.first_point_lat);
        lat_diff == 0 || (lat_diff > 0) == self.scanning_mode.scans_positively_for_j()
    }

    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            ni: reader.read()?,
            nj: reader.read()?,
            basic_angle: reader.read()?,
            subdivision: reader.read()?,
            first_point_lat: reader.read_i32()?,
            first_point_lon: reader.read_i32()?,
            resolution_flags: reader.read()?,
            last_point_lat: reader.read_i32()?,
            last_point_lon: reader.read_i32()?,
            i_direction_inc: reader.read()?,
            j_direction_inc: reader.read()?,
            scanning_mode: ScanningMode(reader.read()?),
        })
    }
}

/// An iterator over coordinates of grid points of a grid whose points lie
/// on the intersections of a set of latitudes and a set of longitudes.
///
/// This `struct` is created by the [`latlons`] method on
/// [`LatLonGridDefinition`]. See its documentation for more.
///
/// [`latlons`]: LatLonGridDefinition::latlons
#[derive(Debug, Clone)]
pub struct LatLonGridIterator {
    lat: Vec<f64>,
    lon: Vec<f64>,
    ij: GridPointIndexIterator,
}

impl LatLonGridIterator {
    pub(crate) fn new(lat: Vec<f64>, lon: Vec<f64>, ij: GridPointIndexIterator) -> Self {
        Self { lat, lon, ij }
    }
}

impl Iterator for LatLonGridIterator {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let (i, j) = self.ij.next()?;
        Some(Coordinate::new(*self.lat.get(j)?, *self.lon.get(i)?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ij.size_hint()
    }
}
