use super::{Coordinate, GridPointIndexIterator, LatLonGridDefinition, LatLonGridIterator};
use crate::{BitReader, error::BitReadError, error::GribError};

#[derive(Debug, Clone, PartialEq)]
pub struct RotatedLatLonGridDefinition {
    /// The grid in the rotated coordinate system.
    pub rotated: LatLonGridDefinition,
    pub rotation: Rotation,
}

impl RotatedLatLonGridDefinition {
    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        self.rotated.grid_shape()
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "rotated_ll"
    }

    pub fn ij(&self) -> Result<GridPointIndexIterator, GribError> {
        self.rotated.ij()
    }

    /// Returns an iterator over geographic coordinates of grid points.
    pub fn latlons(&self) -> Result<Unrotate<LatLonGridIterator>, GribError> {
        let iter = Unrotate::new(self.rotated.latlons()?, &self.rotation);
        Ok(iter)
    }

    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        let rotated = LatLonGridDefinition::from_reader(reader)?;
        let rotation = Rotation {
            south_pole_lat: reader.read_i32()?,
            south_pole_lon: reader.read_i32()?,
            rot_angle: reader.read()?,
        };
        Ok(Self { rotated, rotation })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    /// Latitude of the southern pole of projection in micro-degrees.
    pub south_pole_lat: i32,
    /// Longitude of the southern pole of projection in micro-degrees.
    pub south_pole_lon: i32,
    /// Angle of rotation of projection in degrees.
    pub rot_angle: f32,
}

impl Rotation {
    pub fn south_pole(&self) -> Coordinate {
        Coordinate::from_micro_degrees(self.south_pole_lat, self.south_pole_lon)
    }
}

/// An iterator adapter converting coordinates in a rotated system into
/// geographic coordinates.
#[derive(Debug, Clone)]
pub struct Unrotate<I> {
    latlons: I,
    sinφp: f64,
    cosφp: f64,
    λp: f64,
    gamma: f64,
}

impl<I> Unrotate<I> {
    pub(crate) fn new(latlons: I, rot: &Rotation) -> Self {
        let φp = (f64::from(rot.south_pole_lat) * 1e-6).to_radians();
        let λp = (f64::from(rot.south_pole_lon) * 1e-6).to_radians();
        let gamma = f64::from(rot.rot_angle).to_radians();

        // south pole to north pole
        let φp = -φp;
        let λp = λp + std::f64::consts::PI;

        let (sinφp, cosφp) = φp.sin_cos();
        Self {
            latlons,
            sinφp,
            cosφp,
            λp,
            gamma,
        }
    }
}

impl<I> Iterator for Unrotate<I>
where
    I: Iterator<Item = Coordinate>,
{
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let Coordinate { lat, lon } = self.latlons.next()?;
        let λr = lon.to_radians() - self.gamma;
        let φr = lat.to_radians();

        let (sinφr, cosφr) = φr.sin_cos();
        let (sinλr, cosλr) = λr.sin_cos();

        let sinφ = self.sinφp * sinφr + self.cosφp * cosφr * cosλr;
        let φ = sinφ.clamp(-1., 1.).asin();

        let y = cosφr * sinλr;
        let x = self.cosφp * sinφr - self.sinφp * cosφr * cosλr;
        let λ = self.λp - y.atan2(x);

        Some(Coordinate::new(φ.to_degrees(), λ.to_degrees()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.latlons.size_hint()
    }
}
