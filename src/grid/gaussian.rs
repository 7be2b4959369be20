use super::{
    GridPointIndexIterator, LatLonGridIterator, ScanningMode,
    helpers::{ensure_micro_degrees, evenly_spaced_degrees, unwrap_last_lon},
};
use crate::{BitReader, error::BitReadError, error::GribError};

/// A regular Gaussian grid, whose latitudes are the roots of a Legendre
/// polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GaussianGridDefinition {
    pub ni: u32,
    pub nj: u32,
    pub basic_angle: u32,
    pub subdivision: u32,
    pub first_point_lat: i32,
    pub first_point_lon: i32,
    pub resolution_flags: u8,
    pub last_point_lat: i32,
    pub last_point_lon: i32,
    pub i_direction_inc: u32,
    /// Number of parallels between a pole and the equator.
    pub n: u32,
    pub scanning_mode: ScanningMode,
}

impl GaussianGridDefinition {
    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.ni as usize, self.nj as usize)
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "regular_gg"
    }

    pub fn ij(&self) -> Result<GridPointIndexIterator, GribError> {
        if self.scanning_mode.has_unsupported_flags() {
            let ScanningMode(mode) = self.scanning_mode;
            return Err(GribError::NotSupported(format!("scanning mode {mode}")));
        }

        let iter =
            GridPointIndexIterator::new(self.ni as usize, self.nj as usize, self.scanning_mode);
        Ok(iter)
    }

    /// Returns an iterator over coordinates of grid points.
    ///
    /// The `nj` latitudes are taken from the full set of `2n` Gaussian
    /// latitudes starting at the one nearest to the first grid point, so
    /// that sub-areas of global grids are supported.
    pub fn latlons(&self) -> Result<LatLonGridIterator, GribError> {
        ensure_micro_degrees(self.basic_angle, self.subdivision)?;
        let ij = self.ij()?;

        let mut all_lats = compute_gaussian_latitudes(2 * self.n as usize);
        if self.scanning_mode.scans_positively_for_j() {
            all_lats.reverse();
        }
        let first = f64::from(self.first_point_lat) / 1e6;
        let start = all_lats
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - first).abs().total_cmp(&(*b - first).abs()))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let end = start + self.nj as usize;
        let lat = all_lats
            .get(start..end)
            .ok_or_else(|| {
                GribError::InvalidValueError(format!(
                    "{} latitudes starting at {first} do not fit in a Gaussian grid with N={}",
                    self.nj, self.n
                ))
            })?
            .to_vec();

        let last_point_lon = unwrap_last_lon(
            self.first_point_lon,
            self.last_point_lon,
            self.scanning_mode.scans_positively_for_i(),
        );
        let lon = evenly_spaced_degrees(self.first_point_lon, last_point_lon, self.ni);

        Ok(LatLonGridIterator::new(lat, lon, ij))
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
            n: reader.read()?,
            scanning_mode: ScanningMode(reader.read()?),
        })
    }
}

/// Computes `div` Gaussian latitudes in degrees, from north to south.
///
/// # Examples
///
/// ```
/// let lats = grib_reader::compute_gaussian_latitudes(2);
/// assert!((lats[0] - 35.264389682754654).abs() < 1e-10);
/// assert!((lats[1] + 35.264389682754654).abs() < 1e-10);
/// ```
pub fn compute_gaussian_latitudes(div: usize) -> Vec<f64> {
    let n = div as f64;
    (0..div)
        .map(|i| {
            let guess = (std::f64::consts::PI * (i as f64 + 0.75) / (n + 0.5)).cos();
            let x = find_root(guess, |x| {
                let (p, dp) = legendre_with_derivative(div, x);
                p / dp
            });
            x.asin().to_degrees()
        })
        .collect()
}

// Returns the values of the Legendre polynomial P_n and its derivative at `x`.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=n {
        let k = k as f64;
        let p2 = ((2.0 * k - 1.0) * x * p1 - (k - 1.0) * p0) / k;
        p0 = p1;
        p1 = p2;
    }
    let dp = n as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}

const MAX_ITERATIONS: usize = 100;

// Finds a root (zero point) of the given function using the Newton-Raphson
// method.
fn find_root<F>(initial_guess: f64, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    for _ in 0..MAX_ITERATIONS {
        let dx = f(x);
        x -= dx;
        if dx.abs() < f64::EPSILON {
            break;
        }
    }
    x
}
