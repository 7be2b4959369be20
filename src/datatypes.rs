use std::fmt::{self, Display, Formatter};

mod product_attributes;
pub use product_attributes::*;
mod sections;
pub use sections::*;

/// Position of a dataset as `(message number, dataset number within the
/// message)`.
pub type MessageIndex = (usize, usize);

/// Section family and template number, such as `4.8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateInfo(pub u8, pub u16);

impl TemplateInfo {
    /// Returns the name of the template if it is one this crate decodes.
    pub fn describe(&self) -> Option<&'static str> {
        let name = match (self.0, self.1) {
            (3, 0) => "Latitude/longitude",
            (3, 1) => "Rotated latitude/longitude",
            (3, 40) => "Gaussian latitude/longitude",
            (4, 0) => "Analysis or forecast at a horizontal level or in a horizontal layer at a point in time",
            (4, 1) => "Individual ensemble forecast, control and perturbed, at a horizontal level or in a horizontal layer at a point in time",
            (4, 2) => "Derived forecasts based on all ensemble members at a horizontal level or in a horizontal layer at a point in time",
            (4, 8) => "Average, accumulation, extreme values or other statistically processed values at a horizontal level or in a horizontal layer in a continuous or non-continuous time interval",
            (4, 11) => "Individual ensemble forecast, control and perturbed, at a horizontal level or in a horizontal layer, in a continuous or non-continuous time interval",
            (4, 32) => "Analysis or forecast at a horizontal level or in a horizontal layer at a point in time for simulated (synthetic) satellite data",
            (4, 48) => "Analysis or forecast at a horizontal level or in a horizontal layer at a point in time for optical properties of aerosol",
            (5, 0) => "Grid point data - simple packing",
            (5, 2) => "Grid point data - complex packing",
            (5, 3) => "Grid point data - complex packing and spatial differencing",
            (5, 4) => "Grid point data - IEEE floating point data",
            (5, 200) => "Run length packing with level values",
            _ => return None,
        };
        Some(name)
    }
}

impl Display for TemplateInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Indices into the section list of all sections a dataset is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grib2DatasetIndex {
    pub(crate) message: MessageIndex,
    pub(crate) sect0: usize,
    pub(crate) sect1: usize,
    pub(crate) sect2: Option<usize>,
    pub(crate) sect3: usize,
    pub(crate) sect4: usize,
    pub(crate) sect5: usize,
    pub(crate) sect6: usize,
    pub(crate) sect7: usize,
    pub(crate) sect8: usize,
    /// Section 6 actually holding the bit-map, which differs from `sect6`
    /// when the bit-map of an earlier dataset is reused. `None` if there is
    /// no bit-map to reuse.
    pub(crate) bitmap_source: Option<usize>,
}
