use crate::{
    BitReader,
    content::{ContentRegistry, GridContent, impl_template},
    error::BitReadError,
    grid::{
        EarthShapeDefinition, GaussianGridDefinition, LatLonGridDefinition,
        RotatedLatLonGridDefinition,
    },
};

/// Grid definition template 3.0 - Latitude/longitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template3_0 {
    pub earth: EarthShapeDefinition,
    pub grid: LatLonGridDefinition,
}

impl Template3_0 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            earth: EarthShapeDefinition::from_reader(reader)?,
            grid: LatLonGridDefinition::from_reader(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        registry.register(GridContent::SHAPE, |t: &Self| t.grid.grid_shape());
        registry.register(GridContent::SCANNING_MODE, |t: &Self| t.grid.scanning_mode);
        registry.register(GridContent::FIRST_POINT, |t: &Self| t.grid.first_point());
        registry.register(GridContent::LAST_POINT, |t: &Self| t.grid.last_point());
    }
}

impl_template!(Template3_0, 3, 0);

/// Grid definition template 3.1 - Rotated latitude/longitude.
///
/// The first and last points exposed as contents are in the rotated
/// coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct Template3_1 {
    pub earth: EarthShapeDefinition,
    pub grid: RotatedLatLonGridDefinition,
}

impl Template3_1 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            earth: EarthShapeDefinition::from_reader(reader)?,
            grid: RotatedLatLonGridDefinition::from_reader(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        registry.register(GridContent::SHAPE, |t: &Self| t.grid.grid_shape());
        registry.register(GridContent::SCANNING_MODE, |t: &Self| {
            t.grid.rotated.scanning_mode
        });
        registry.register(GridContent::FIRST_POINT, |t: &Self| {
            t.grid.rotated.first_point()
        });
        registry.register(GridContent::LAST_POINT, |t: &Self| t.grid.rotated.last_point());
    }
}

impl_template!(Template3_1, 3, 1);

/// Grid definition template 3.40 - Gaussian latitude/longitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template3_40 {
    pub earth: EarthShapeDefinition,
    pub grid: GaussianGridDefinition,
}

impl Template3_40 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            earth: EarthShapeDefinition::from_reader(reader)?,
            grid: GaussianGridDefinition::from_reader(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        registry.register(GridContent::SHAPE, |t: &Self| t.grid.grid_shape());
        registry.register(GridContent::SCANNING_MODE, |t: &Self| t.grid.scanning_mode);
        registry.register(GridContent::FIRST_POINT, |t: &Self| {
            crate::grid::Coordinate::from_micro_degrees(
                t.grid.first_point_lat,
                t.grid.first_point_lon,
            )
        });
        registry.register(GridContent::LAST_POINT, |t: &Self| {
            crate::grid::Coordinate::from_micro_degrees(
                t.grid.last_point_lat,
                t.grid.last_point_lon,
            )
        });
    }
}

impl_template!(Template3_40, 3, 40);
