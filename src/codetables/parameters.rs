//! Parameter descriptions keyed by discipline, parameter category and
//! parameter number (Code Table 4.2), with per-centre local overlays.

/// Description of a physical quantity identified by a discipline, a parameter
/// category and a parameter number.
///
/// # Examples
///
/// ```
/// use grib_reader::Parameter;
///
/// let param = Parameter::lookup(0, 34, 0, 0).unwrap();
/// assert_eq!(param.name, "Temperature");
/// assert_eq!(param.unit, "K");
/// assert!(!param.local_use);
///
/// assert_eq!(Parameter::lookup(0, 34, 0, 250), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub discipline: u8,
    pub category: u8,
    pub code: u8,
    pub name: &'static str,
    pub unit: &'static str,
    /// `true` if the parameter is defined by the originating centre rather
    /// than by the WMO master table.
    pub local_use: bool,
}

/// Originating centre code of NCEP (Common Code Table C-11).
pub const CENTRE_NCEP: u16 = 7;

impl Parameter {
    /// Looks up a parameter, consulting the originating centre's local table
    /// first when one is known.
    ///
    /// Returns `None` for unknown combinations; this is missing metadata, not
    /// an error.
    pub fn lookup(discipline: u8, centre: u16, category: u8, code: u8) -> Option<Self> {
        let key = (discipline, category, code);
        local_table(centre)
            .and_then(|table| find(table, key))
            .or_else(|| find(MASTER_TABLE, key))
    }

    /// Looks up a parameter in the WMO master table only.
    pub fn lookup_master(discipline: u8, category: u8, code: u8) -> Option<Self> {
        find(MASTER_TABLE, (discipline, category, code))
    }

    /// Returns the name of the parameter category, if known.
    pub fn category_name(&self) -> Option<&'static str> {
        category_name(self.discipline, self.category)
    }
}

/// Returns the name of a parameter category in a discipline (Code Table 4.1).
pub fn category_name(discipline: u8, category: u8) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(d, c, _)| *d == discipline && *c == category)
        .map(|(_, _, name)| *name)
}

fn local_table(centre: u16) -> Option<&'static [Parameter]> {
    match centre {
        CENTRE_NCEP => Some(NCEP_LOCAL_TABLE),
        _ => None,
    }
}

fn find(table: &[Parameter], key: (u8, u8, u8)) -> Option<Parameter> {
    table
        .binary_search_by_key(&key, |p| (p.discipline, p.category, p.code))
        .ok()
        .map(|i| table[i])
}

const fn p(
    discipline: u8,
    category: u8,
    code: u8,
    name: &'static str,
    unit: &'static str,
) -> Parameter {
    Parameter {
        discipline,
        category,
        code,
        name,
        unit,
        local_use: false,
    }
}

const fn local(
    discipline: u8,
    category: u8,
    code: u8,
    name: &'static str,
    unit: &'static str,
) -> Parameter {
    Parameter {
        local_use: true,
        ..p(discipline, category, code, name, unit)
    }
}

const CATEGORIES: &[(u8, u8, &str)] = &[
    (0, 0, "Temperature"),
    (0, 1, "Moisture"),
    (0, 2, "Momentum"),
    (0, 3, "Mass"),
    (0, 4, "Short-wave Radiation"),
    (0, 5, "Long-wave Radiation"),
    (0, 6, "Cloud"),
    (0, 7, "Thermodynamic Stability Indices"),
    (0, 13, "Aerosols"),
    (0, 14, "Trace Gases"),
    (0, 15, "Radar"),
    (0, 16, "Forecast Radar Imagery"),
    (0, 18, "Nuclear/radiology"),
    (0, 19, "Physical atmospheric properties"),
    (0, 20, "Atmospheric Chemical Constituents"),
    (0, 253, "ASCII character string"),
    (1, 0, "Hydrology basic products"),
    (1, 1, "Hydrology probabilities"),
    (2, 0, "Vegetation/Biomass"),
    (2, 3, "Soil Products"),
    (2, 4, "Fire Weather"),
    (3, 0, "Image format products"),
    (3, 1, "Quantitative products"),
    (10, 0, "Waves"),
    (10, 1, "Currents"),
    (10, 2, "Ice"),
    (10, 3, "Surface Properties"),
    (10, 4, "Sub-surface Properties"),
];

// Sorted by (discipline, category, code).
const MASTER_TABLE: &[Parameter] = &[
    p(0, 0, 0, "Temperature", "K"),
    p(0, 0, 1, "Virtual temperature", "K"),
    p(0, 0, 2, "Potential temperature", "K"),
    p(0, 0, 3, "Pseudo-adiabatic potential temperature or equivalent potential temperature", "K"),
    p(0, 0, 4, "Maximum temperature", "K"),
    p(0, 0, 5, "Minimum temperature", "K"),
    p(0, 0, 6, "Dew point temperature", "K"),
    p(0, 0, 7, "Dew point depression (or deficit)", "K"),
    p(0, 0, 8, "Lapse rate", "K m-1"),
    p(0, 0, 9, "Temperature anomaly", "K"),
    p(0, 0, 10, "Latent heat net flux", "W m-2"),
    p(0, 0, 11, "Sensible heat net flux", "W m-2"),
    p(0, 0, 12, "Heat index", "K"),
    p(0, 0, 13, "Wind chill factor", "K"),
    p(0, 0, 14, "Minimum dew point depression", "K"),
    p(0, 0, 15, "Virtual potential temperature", "K"),
    p(0, 0, 16, "Snow Phase Change Heat Flux", "W m-2"),
    p(0, 0, 17, "Skin Temperature", "K"),
    p(0, 0, 18, "Snow Temperature (top of snow)", "K"),
    p(0, 0, 19, "Turbulent Transfer Coefficient for Heat", "Numeric"),
    p(0, 0, 20, "Turbulent Diffusion Coefficient for Heat", "m2s-1"),
    p(0, 0, 21, "Apparent Temperature ", "K"),
    p(0, 0, 22, "Temperature Tendency due to Short-Wave Radiation", "K s-1"),
    p(0, 0, 23, "Temperature Tendency due to Long-Wave Radiation", "K s-1"),
    p(0, 0, 24, "Temperature Tendency due to Short-Wave Radiation,Clear Sky", "K s-1"),
    p(0, 0, 25, "Temperature Tendency due to Long-Wave Radiation,Clear Sky", "K s-1"),
    p(0, 0, 26, "Temperature Tendency due to parameterizations", "K s-1"),
    p(0, 0, 27, "Wet Bulb Temperature", "K"),
    p(0, 0, 28, "Unbalanced Component of Temperature", "K"),
    p(0, 0, 29, "Temperature Advection", "K s-1"),
    p(0, 1, 0, "Specific humidity", "kg kg-1"),
    p(0, 1, 1, "Relative humidity", "%"),
    p(0, 1, 2, "Humidity mixing ratio", "kg kg-1"),
    p(0, 1, 3, "Precipitable water", "kg m-2"),
    p(0, 1, 4, "Vapor pressure", "Pa"),
    p(0, 1, 5, "Saturation deficit", "Pa"),
    p(0, 1, 6, "Evaporation", "kg m-2"),
    p(0, 1, 7, "Precipitation rate", "kg m-2 s-1"),
    p(0, 1, 8, "Total precipitation", "kg m-2"),
    p(0, 1, 9, "Large scale precipitation (non-convective)", "kg m-2"),
    p(0, 1, 10, "Convective precipitation", "kg m-2"),
    p(0, 1, 11, "Snow depth", "m"),
    p(0, 1, 12, "Snowfall rate water equivalent", "kg m-2 s-1"),
    p(0, 1, 13, "Water equivalent of accumulated snow depth", "kg m-2"),
    p(0, 1, 14, "Convective snow", "kg m-2"),
    p(0, 1, 15, "Large scale snow", "kg m-2"),
    p(0, 1, 16, "Snow melt", "kg m-2"),
    p(0, 1, 17, "Snow age", "day"),
    p(0, 1, 18, "Absolute humidity", "kg m-3"),
    p(0, 1, 19, "Precipitation type", "Code table (4.201)"),
    p(0, 1, 20, "Integrated liquid water", "kg m-2"),
    p(0, 1, 21, "Condensate", "kg kg-1"),
    p(0, 1, 22, "Cloud mixing ratio", "kg kg-1"),
    p(0, 1, 23, "Ice water mixing ratio", "kg kg-1"),
    p(0, 1, 24, "Rain mixing ratio", "kg kg-1"),
    p(0, 1, 25, "Snow mixing ratio", "kg kg-1"),
    p(0, 1, 26, "Horizontal moisture convergence", "kg kg-1 s-1"),
    p(0, 1, 27, "Maximum relative humidity", "%"),
    p(0, 1, 28, "Maximum absolute humidity", "kg m-3"),
    p(0, 1, 29, "Total snowfall", "m"),
    p(0, 1, 30, "Precipitable water category", "Code table (4.202)"),
    p(0, 1, 31, "Hail", "m"),
    p(0, 1, 32, "Graupel (snow pellets)", "kg kg-1"),
    p(0, 1, 33, "Categorical Rain", ""),
    p(0, 1, 34, "Categorical Freezing Rain", ""),
    p(0, 1, 35, "Categorical Ice Pellets", ""),
    p(0, 1, 36, "Categorical Snow", ""),
    p(0, 1, 37, "Convective Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 38, "Horizontal Moisture Divergence", "kg kg-1 s-1"),
    p(0, 1, 39, "Percent frozen precipitation", "%"),
    p(0, 1, 40, "Potential Evaporation", "kg m-2"),
    p(0, 1, 41, "Potential Evaporation Rate", "W m-2"),
    p(0, 1, 42, "Snow Cover", "%"),
    p(0, 1, 43, "Rain Fraction of Total Cloud Water", "Proportion"),
    p(0, 1, 44, "Rime Factor", "Numeric"),
    p(0, 1, 45, "Total Column Integrated Rain", "kg m-2"),
    p(0, 1, 46, "Total Column Integrated Snow", "kg m-2"),
    p(0, 1, 47, "Large Scale Water Precipitation (Non-Convective) ", "kg m-2"),
    p(0, 1, 48, "Convective Water Precipitation ", "kg m-2"),
    p(0, 1, 49, "Total Water Precipitation ", "kg m-2"),
    p(0, 1, 50, "Total Snow Precipitation ", "kg m-2"),
    p(0, 1, 51, "Total Column Water(Vertically integrated total water (vapour+cloud water/ice)", "kg m-2"),
    p(0, 1, 52, "Total Precipitation Rate ", "kg m-2 s-1"),
    p(0, 1, 53, "Total Snowfall Rate Water Equivalent ", "kg m-2 s-1"),
    p(0, 1, 54, "Large Scale Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 55, "Convective Snowfall Rate Water Equivalent", "kg m-2 s-1"),
    p(0, 1, 56, "Large Scale Snowfall Rate Water Equivalent", "kg m-2 s-1"),
    p(0, 1, 57, "Total Snowfall Rate", "m s-1"),
    p(0, 1, 58, "Convective Snowfall Rate", "m s-1"),
    p(0, 1, 59, "Large Scale Snowfall Rate", "m s-1"),
    p(0, 1, 60, "Snow Depth Water Equivalent", "kg m-2"),
    p(0, 1, 61, "Snow Density", "kg m-3"),
    p(0, 1, 62, "Snow Evaporation", "kg m-2"),
    p(0, 1, 64, "Total Column Integrated Water Vapour", "kg m-2"),
    p(0, 1, 65, "Rain Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 66, "Snow Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 67, "Freezing Rain Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 68, "Ice Pellets Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 69, "Total Column Integrate Cloud Water", "kg m-2"),
    p(0, 1, 70, "Total Column Integrate Cloud Ice", "kg m-2"),
    p(0, 1, 71, "Hail Mixing Ratio", "kg kg-1"),
    p(0, 1, 72, "Total Column Integrate Hail", "kg m-2"),
    p(0, 1, 73, "Hail Prepitation Rate", "kg m-2 s-1"),
    p(0, 1, 74, "Total Column Integrate Graupel", "kg m-2"),
    p(0, 1, 75, "Graupel (Snow Pellets) Prepitation Rate", "kg m-2 s-1"),
    p(0, 1, 76, "Convective Rain Rate", "kg m-2 s-1"),
    p(0, 1, 77, "Large Scale Rain Rate", "kg m-2 s-1"),
    p(0, 1, 78, "Total Column Integrate Water (Allcomponents including precipitation)", "kg m-2"),
    p(0, 1, 79, "Evaporation Rate", "kg m-2 s-1"),
    p(0, 1, 80, "Total Condensate", "kg kg-1"),
    p(0, 1, 81, "Total Column-Integrate Condensate", "kg m-2"),
    p(0, 1, 82, "Cloud Ice Mixing Ratio", "kg kg-1"),
    p(0, 1, 83, "Specific Cloud Liquid Water Content", "kg kg-1"),
    p(0, 1, 84, "Specific Cloud Ice Water Content", "kg kg-1"),
    p(0, 1, 85, "Specific Rain Water Content", "kg kg-1"),
    p(0, 1, 86, "Specific Snow Water Content", "kg kg-1"),
    p(0, 1, 87, "Stratiform Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 88, "Categorical Convective Precipitation", ""),
    p(0, 1, 90, "Total Kinematic Moisture Flux", "kg kg-1 m s-1"),
    p(0, 1, 91, "U-component (zonal) Kinematic Moisture Flux", "kg kg-1 m s-1"),
    p(0, 1, 92, "V-component (meridional) Kinematic Moisture Flux", "kg kg-1 m s-1"),
    p(0, 1, 93, "Relative Humidity With Respect to Water", "%"),
    p(0, 1, 94, "Relative Humidity With Respect to Ice", "%"),
    p(0, 1, 95, "Freezing or Frozen Precipitation Rate", "kg m-2 s-1"),
    p(0, 1, 96, "Mass Density of Rain", "kg m-3"),
    p(0, 1, 97, "Mass Density of Snow", "kg m-3"),
    p(0, 1, 98, "Mass Density of Graupel", "kg m-3"),
    p(0, 1, 99, "Mass Density of Hail", "kg m-3"),
    p(0, 1, 100, "Specific Number Concentration of Rain", "kg-1"),
    p(0, 1, 101, "Specific Number Concentration of Snow", "kg-1"),
    p(0, 1, 102, "Specific Number Concentration of Graupel", "kg-1"),
    p(0, 1, 103, "Specific Number Concentration of Hail", "kg-1"),
    p(0, 1, 104, "Number Density of Rain", "m-3"),
    p(0, 1, 105, "Number Density of Snow", "m-3"),
    p(0, 1, 106, "Number Density of Graupel", "m-3"),
    p(0, 1, 107, "Number Density of Hail", "m-3"),
    p(0, 1, 108, "Specific Humidity Tendency due to Parameterizations", "kg kg-1 s-1"),
    p(0, 1, 109, "Mass Density of Liquid Water Coating on Hail Expressed as Mass of Liquid Water per Unit Volume of Air", "kg m-3"),
    p(0, 1, 110, "Specific Mass of Liquid Water Coating on HailExpressed as Mass of Liquid Water per Unit Mass of Moist Air", "kg kg-1"),
    p(0, 1, 111, "Mass Mixing Ratio of Liquid Water Coating on Hail Expressed as Mass of Liquid Water per Unit Mass of Dry Air", "kg kg-1"),
    p(0, 1, 112, "Mass Density of Liquid Water Coating on GraupelExpressed as Mass of Liquid Water per Unit Volume of Air", "kg m-3"),
    p(0, 1, 113, "Specific Mass of Liquid Water Coating on Graupel Expressed as Mass of Liquid Water per Unit Mass of Moist Air", "kg kg-1"),
    p(0, 1, 114, "Mass Mixing Ratio of Liquid Water Coating on Graupel Expressed as Mass of Liquid Water per Unit Mass of Dry Air", "kg kg-1"),
    p(0, 1, 115, "Mass Density of Liquid Water Coating on Snow Expressed as Mass of Liquid Water per Unit Volume of Air", "kg m-3"),
    p(0, 1, 116, "Specific Mass of Liquid Water Coating on Snow Expressed as Mass of Liquid Water per Unit Mass of Moist Air", "kg kg-1"),
    p(0, 1, 117, "Mass Mixing Ratio of Liquid Water Coating on Snow Expressed as Mass of Liquid Water per Unit Mass of Dry Air", "kg kg-1"),
    p(0, 1, 118, "Unbalanced Component of Specific Humidity", "kg kg-1"),
    p(0, 1, 119, "Unbalanced Component of Specific Cloud Liquid Water content", "kg kg-1"),
    p(0, 1, 120, "Unbalanced Component of Specific Cloud Ice Water content", "kg kg-1"),
    p(0, 1, 121, "Fraction of Snow Cover", "Proportion"),
    p(0, 2, 0, "Wind direction (from which blowing)", "deg true"),
    p(0, 2, 1, "Wind speed", "m s-1"),
    p(0, 2, 2, "u-component of wind", "m s-1"),
    p(0, 2, 3, "v-component of wind", "m s-1"),
    p(0, 2, 4, "Stream function", "m2 s-1"),
    p(0, 2, 5, "Velocity potential", "m2 s-1"),
    p(0, 2, 6, "Montgomery stream function", "m2 s-2"),
    p(0, 2, 7, "Sigma coordinate vertical velocity", "s-1"),
    p(0, 2, 8, "Vertical velocity (pressure)", "Pa s-1"),
    p(0, 2, 9, "Vertical velocity (geometric)", "m s-1"),
    p(0, 2, 10, "Absolute vorticity", "s-1"),
    p(0, 2, 11, "Absolute divergence", "s-1"),
    p(0, 2, 12, "Relative vorticity", "s-1"),
    p(0, 2, 13, "Relative divergence", "s-1"),
    p(0, 2, 14, "Potential vorticity", "K m2 kg-1 s-1"),
    p(0, 2, 15, "Vertical u-component shear", "s-1"),
    p(0, 2, 16, "Vertical v-component shear", "s-1"),
    p(0, 2, 17, "Momentum flux, u component", "s-1"),
    p(0, 2, 18, "Momentum flux, v component", "s-1"),
    p(0, 2, 19, "Wind mixing energy", "J"),
    p(0, 2, 20, "Boundary layer dissipation", "W m-2"),
    p(0, 2, 21, "Maximum wind speed", "m s-1"),
    p(0, 2, 22, "Wind speed (gust)", "m s-1"),
    p(0, 2, 23, "u-component of wind (gust)", "m s-1"),
    p(0, 2, 24, "v-component of wind (gust)", "m s-1"),
    p(0, 3, 0, "Pressure", "Pa"),
    p(0, 3, 1, "Pressure reduced to MSL", "Pa"),
    p(0, 3, 2, "Pressure tendency", "Pa s-1"),
    p(0, 3, 3, "ICAO Standard Atmosphere Reference Height", "m"),
    p(0, 3, 4, "Geopotential", "m2 s-2"),
    p(0, 3, 5, "Geopotential height", "gpm"),
    p(0, 3, 6, "Geometric height", "m"),
    p(0, 3, 7, "Standard deviation of height", "m"),
    p(0, 3, 8, "Pressure anomaly", "Pa"),
    p(0, 3, 9, "Geopotential height anomaly", "gpm"),
    p(0, 3, 10, "Density", "kg m-3"),
    p(0, 3, 11, "Altimeter setting", "Pa"),
    p(0, 3, 12, "Thickness", "m"),
    p(0, 3, 13, "Pressure altitude", "m"),
    p(0, 3, 14, "Density altitude", "m"),
    p(0, 4, 0, "Net short-wave radiation flux (surface)", "W m-2"),
    p(0, 4, 1, "Net short-wave radiation flux (top of atmosphere)", "W m-2"),
    p(0, 4, 2, "Short wave radiation flux", "W m-2"),
    p(0, 4, 3, "Global radiation flux", "W m-2"),
    p(0, 4, 4, "Brightness temperature", "K"),
    p(0, 4, 5, "Radiance (with respect to wave number)", "W m-1 sr-1"),
    p(0, 4, 6, "Radiance (with respect to wave length)", "W m-3 sr-1"),
    p(0, 4, 7, "Surface short-wave (solar) radiation downwards", "J m-2"),
    p(0, 5, 0, "Net long wave radiation flux (surface)", "W m-2"),
    p(0, 5, 1, "Net long wave radiation flux (top of atmosphere)", "W m-2"),
    p(0, 5, 2, "Long wave radiation flux", "W m-2"),
    p(0, 6, 0, "Cloud Ice", "kg m-2"),
    p(0, 6, 1, "Total cloud cover", "%"),
    p(0, 6, 2, "Convective cloud cover", "%"),
    p(0, 6, 3, "Low cloud cover", "%"),
    p(0, 6, 4, "Medium cloud cover", "%"),
    p(0, 6, 5, "High cloud cover", "%"),
    p(0, 6, 6, "Cloud water", "kg m-2"),
    p(0, 6, 7, "Cloud amount", "%"),
    p(0, 6, 8, "Cloud type", "Code table (4.203)"),
    p(0, 6, 9, "Thunderstorm maximum tops", "m"),
    p(0, 6, 10, "Thunderstorm coverage", "Code table (4.204)"),
    p(0, 6, 11, "Cloud base", "m"),
    p(0, 6, 12, "Cloud top", "m"),
    p(0, 6, 13, "Ceiling", "m"),
    p(0, 6, 14, "Non-Convective Cloud Cover", "%"),
    p(0, 6, 15, "Cloud Work Function", "J kg-1"),
    p(0, 6, 16, "Convective Cloud Efficiency", "Proportion"),
    p(0, 6, 21, "Ice fraction of total condensate", "Proportion"),
    p(0, 6, 22, "Cloud Cover", "%"),
    p(0, 6, 24, "Sunshine", "Numeric"),
    p(0, 6, 25, "Horizontal Extent of Cumulonimbus (CB)", "%"),
    p(0, 6, 26, "Height of Convective Cloud Base", "m"),
    p(0, 6, 27, "Height of Convective Cloud Top", "m"),
    p(0, 6, 28, "Number Concentration of Cloud Droplets", "kg-1"),
    p(0, 6, 29, "Number Concentration of Cloud Ice", "kg-1"),
    p(0, 6, 30, "Number Density of Cloud Droplets", "m-3"),
    p(0, 6, 31, "Number Density of Cloud Ice", "m-3"),
    p(0, 6, 32, "Fraction of Cloud Cover", "Numeric"),
    p(0, 6, 33, "Sunshine Duration", "s"),
    p(0, 6, 34, "Surface Long Wave Effective Total Cloudiness", "Numeric"),
    p(0, 6, 35, "Surface Short Wave Effective Total Cloudiness", "Numeric"),
    p(0, 6, 36, "Fraction of Stratiform Precipitation Cover", "Proportion"),
    p(0, 6, 37, "Fraction of Convective Precipitation Cover", "Proportion"),
    p(0, 6, 38, "Mass Density of Cloud Droplets", "kg m-3"),
    p(0, 6, 39, "Mass Density of Cloud Ice", "kg m-3"),
    p(0, 6, 40, "Mass Density of Convective Cloud Water Droplets", "kg m-3"),
    p(0, 6, 47, "Volume Fraction of Cloud Water Droplets", "Numeric"),
    p(0, 6, 48, "Volume Fraction of Cloud Ice Particles", "Numeric"),
    p(0, 6, 49, "Volume Fraction of Cloud (Ice and/or Water)", "Numeric"),
    p(0, 7, 0, "Parcel lifted index (to 500 hPa)", "K"),
    p(0, 7, 1, "Best lifted index (to 500 hPa)", "K"),
    p(0, 7, 2, "K index", "K"),
    p(0, 7, 3, "KO index", "K"),
    p(0, 7, 4, "Total totals index", "K"),
    p(0, 7, 5, "Sweat index", "numeric"),
    p(0, 7, 6, "Convective available potential energy", "J kg-1"),
    p(0, 7, 7, "Convective inhibition", "J kg-1"),
    p(0, 7, 8, "Storm relative helicity", "J kg-1"),
    p(0, 7, 9, "Energy helicity index", "numeric"),
    p(0, 13, 0, "Aerosol type", "Code table (4.205)"),
    p(0, 14, 0, "Total ozone", "Dobson"),
    p(0, 15, 0, "Base spectrum width", "m s-1"),
    p(0, 15, 1, "Base reflectivity", "dB"),
    p(0, 15, 2, "Base radial velocity", "m s-1"),
    p(0, 15, 3, "Vertically-integrated liquid", "kg m-1"),
    p(0, 15, 4, "Layer-maximum base reflectivity", "dB"),
    p(0, 15, 5, "Precipitation", "kg m-2"),
    p(0, 15, 6, "Radar spectra (1)", "-"),
    p(0, 15, 7, "Radar spectra (2)", "-"),
    p(0, 15, 8, "Radar spectra (3)", "-"),
    p(0, 16, 0, "Equivalent radar reflectivity factor for rain", "m m6 m-3"),
    p(0, 16, 1, "Equivalent radar reflectivity factor for snow", "m m6 m-3"),
    p(0, 16, 2, "Equivalent radar reflectivity factor for parameterized convection", "m m6 m-3"),
    p(0, 16, 3, "Echo Top", "m"),
    p(0, 16, 4, "Reflectivity", "dB"),
    p(0, 16, 5, "Composite reflectivity", "dB"),
    p(0, 18, 0, "Air concentration of Caesium 137", "Bq m-3"),
    p(0, 18, 1, "Air concentration of Iodine 131", "Bq m-3"),
    p(0, 18, 2, "Air concentration of radioactive pollutant", "Bq m-3"),
    p(0, 18, 3, "Ground deposition of Caesium 137", "Bq m-2"),
    p(0, 18, 4, "Ground deposition of Iodine 131", "Bq m-2"),
    p(0, 18, 5, "Ground deposition of radioactive pollutant", "Bq m-2"),
    p(0, 18, 6, "Time-integrated air concentration of caesium pollutant", "Bq s m-3"),
    p(0, 18, 7, "Time-integrated air concentration of iodine pollutant", "Bq s m-3"),
    p(0, 18, 8, "Time-integrated air concentration of radioactive pollutant", "Bq s m-3"),
    p(0, 19, 0, "Visibility", "m"),
    p(0, 19, 1, "Albedo", "%"),
    p(0, 19, 2, "Thunderstorm probability", "%"),
    p(0, 19, 3, "mixed layer depth", "m"),
    p(0, 19, 4, "Volcanic ash", "Code table (4.206)"),
    p(0, 19, 5, "Icing top", "m"),
    p(0, 19, 6, "Icing base", "m"),
    p(0, 19, 7, "Icing", "Code table (4.207)"),
    p(0, 19, 8, "Turbulence top", "m"),
    p(0, 19, 9, "Turbulence base", "m"),
    p(0, 19, 10, "Turbulence", "Code table (4.208)"),
    p(0, 19, 11, "Turbulent kinetic energy", "J kg-1"),
    p(0, 19, 12, "Planetary boundary layer regime", "Code table (4.209)"),
    p(0, 19, 13, "Contrail intensity", "Code table (4.210)"),
    p(0, 19, 14, "Contrail engine type", "Code table (4.211)"),
    p(0, 19, 15, "Contrail top", "m"),
    p(0, 19, 16, "Contrail", "base"),
    p(0, 19, 25, "Weather", "Code Table 4.225"),
    p(0, 20, 0, "Mass Density", "kg m-3"),
    p(0, 20, 1, "Column-Integrated Mass Density", "kg m-2"),
    p(0, 20, 2, "Mass Mixing Ratio", "kg kg-1"),
    p(0, 20, 3, "Atmosphere Emission Mass Flux", "kg m-2s-1"),
    p(0, 20, 4, "Atmosphere Net Production Mass Flux", "kg m-2s-1"),
    p(0, 20, 5, "Atmosphere Net Production And Emission Mass Flux", "kg m-2s-1"),
    p(0, 20, 6, "Surface Dry Deposition Mass Flux", "kg m-2s-1"),
    p(0, 20, 7, "Surface Wet Deposition Mass Flux", "kg m-2s-1"),
    p(0, 20, 8, "Atmosphere Re-Emission Mass Flux", "kg m-2s-1"),
    p(0, 20, 9, "Wet Deposition by Large-Scale Precipitation Mass Flux", "kg m-2s-1"),
    p(0, 20, 10, "Wet Deposition by Convective Precipitation Mass Flux", "kg m-2s-1"),
    p(0, 20, 11, "Sedimentation Mass Flux", "kg m-2s-1"),
    p(0, 20, 12, "Dry Deposition Mass Flux", "kg m-2s-1"),
    p(0, 20, 13, "Transfer From Hydrophobic to Hydrophilic", "kg kg-1s-1"),
    p(0, 20, 14, "Transfer From SO2 (Sulphur Dioxide) to SO4 (Sulphate)", "kg kg-1s-1"),
    p(0, 20, 15, "Dry deposition velocity", "m s-1"),
    p(0, 20, 16, "Mass mixing ratio with respect to dry air", "kg kg-1"),
    p(0, 20, 17, "Mass mixing ratio with respect to wet air", "kg kg-1"),
    p(0, 20, 18, "Potential of hydrogen (pH)", "pH"),
    p(0, 20, 50, "Amount in Atmosphere", "mol"),
    p(0, 20, 51, "Concentration In Air", "mol m-3"),
    p(0, 20, 52, "Volume Mixing Ratio", "mol mol-1"),
    p(0, 20, 53, "Chemical Gross Production Rate of Concentration", "mol m-3s-1"),
    p(0, 20, 54, "Chemical Gross Destruction Rate of Concentration", "mol m-3s-1"),
    p(0, 20, 55, "Surface Flux", "mol m-2s-1"),
    p(0, 20, 56, "Changes Of Amount in Atmosphere", "mol s-1"),
    p(0, 20, 57, "Total Yearly Average Burden of The Atmosphere", "mol"),
    p(0, 20, 58, "Total Yearly Average Atmospheric Loss", "mol s-1"),
    p(0, 20, 59, "Aerosol Number Concentration", "m-3"),
    p(0, 20, 60, "Aerosol Specific Number Concentration", "kg-1"),
    p(0, 20, 61, "Maximum of Mass Density", "kg m-3"),
    p(0, 20, 62, "Height of Mass Density", "m"),
    p(0, 20, 63, "Column-Averaged Mass Density in Layer", "kg m-3"),
    p(0, 20, 64, "Mole fraction with respect to dry air", "mol mol-1"),
    p(0, 20, 65, "Mole fraction with respect to wet air", "mol mol-1"),
    p(0, 20, 66, "Column-integrated in-cloud scavenging rate by precipitation", "kg m-2 s-1"),
    p(0, 20, 67, "Column-integrated below-cloud scavenging rate by precipitation", "kg m-2 s-1"),
    p(0, 20, 68, "Column-integrated release rate from evaporating precipitation", "kg m-2 s-1"),
    p(0, 20, 69, "Column-integrated in-cloud scavenging rate by large-scale precipitation", "kg m-2 s-1"),
    p(0, 20, 70, "Column-integrated below-cloud scavenging rate by large-scale precipitation", "kg m-2 s-1"),
    p(0, 20, 71, "Column-integrated release rate from evaporating large-scale precipitation", "kg m-2 s-1"),
    p(0, 20, 72, "Column-integrated in-cloud scavenging rate by convective precipitation", "kg m-2 s-1"),
    p(0, 20, 73, "Column-integrated below-cloud scavenging rate by convective precipitation", "kg m-2 s-1"),
    p(0, 20, 74, "Column-integrated release rate from evaporating convective precipitation", "kg m-2 s-1"),
    p(0, 20, 75, "Wildfire flux", "kg m-2 s-1"),
    p(0, 20, 76, "Emission Rate", "kg kg-1 s-1"),
    p(0, 20, 77, "Surface Emission flux", "kg m-2 s-1"),
    p(0, 20, 78, "Column integrated eastward mass flux", "kg m-2 s-1"),
    p(0, 20, 79, "Column integrated northward mass flux", "kg m-2 s-1"),
    p(0, 20, 80, "Column integrated divergence of mass flux", "kg m-2 s-1"),
    p(0, 20, 81, "Column integrated net source", "kg m-2 s-1"),
    p(0, 20, 100, "Surface Area Density (Aerosol)", "m-1"),
    p(0, 20, 101, "Vertical Visual Range", "m"),
    p(0, 20, 102, "Aerosol Optical Thickness", "Numeric"),
    p(0, 20, 103, "Single Scattering Albedo", "Numeric"),
    p(0, 20, 104, "Asymmetry Factor", "Numeric"),
    p(0, 20, 105, "Aerosol Extinction Coefficient", "m-1"),
    p(0, 20, 106, "Aerosol Absorption Coefficient", "m-1"),
    p(0, 20, 107, "Aerosol Lidar Backscatter from Satellite", "m-1sr-1"),
    p(0, 20, 108, "Aerosol Lidar Backscatter from the Ground", "m-1sr-1"),
    p(0, 20, 109, "Aerosol Lidar Extinction from Satellite", "m-1"),
    p(0, 20, 110, "Aerosol Lidar Extinction from the Ground", "m-1"),
    p(0, 20, 111, "Angstrom Exponent", "Numeric"),
    p(0, 20, 112, "Scattering Aerosol Optical Thickness", "Numeric"),
    p(0, 253, 0, "Arbitrary text string CCITTIA5", ""),
    p(1, 0, 0, "Flash flood guidance (Encoded as an accumulation over a floating subinterval of time between the reference time and valid time)", "kg m-2"),
    p(1, 0, 1, "Flash flood runoff (Encoded as an accumulation over a floating subinterval of time)", "kg m-2"),
    p(1, 0, 2, "Remotely sensed snow cover (code table 4.215)", ""),
    p(1, 0, 3, "Elevation of snow covered terrain (code table 4.216)", ""),
    p(1, 0, 4, "Snow water equivalent percent of normal", "%"),
    p(1, 1, 0, "Conditional percent precipitation amount fractile for an overall period", "kg m-2(Encoded as an accumulation)."),
    p(1, 1, 1, "Percent precipitation in a sub-period of an overall period (Encoded as per cent accumulation over the sub-period)", "%"),
    p(1, 1, 2, "Probability of 0.01 inch of precipitation (POP)", "%"),
    p(2, 0, 0, "Land cover (1=land, 2=sea)", "Proportion"),
    p(2, 0, 1, "Surface roughness", "m"),
    p(2, 0, 2, "Soil temperature", ""),
    p(2, 0, 3, "Soil moisture content", "kg m-2"),
    p(2, 0, 4, "Vegetation", "%"),
    p(2, 0, 5, "Water runoff", "kg m-2"),
    p(2, 0, 6, "Evapotranspiration", "kg-2 s-1"),
    p(2, 0, 7, "Model terrain height", "m"),
    p(2, 0, 8, "Land use", "Code table (4.212)"),
    p(2, 3, 0, "Soil type", "Code table (4.213)"),
    p(2, 3, 1, "Upper layer soil temperature", "K"),
    p(2, 3, 2, "Upper layer soil moisture", "kg m-3"),
    p(2, 3, 3, "Lower layer soil moisture", "kg m-3"),
    p(2, 3, 4, "Bottom layer soil temperature", "K"),
    p(2, 4, 2, "Haines Index", "Numeric"),
    p(3, 0, 0, "Scaled radiance", "numeric"),
    p(3, 0, 1, "Scaled albedo", "numeric"),
    p(3, 0, 2, "Scaled brightness temperature", "numeric"),
    p(3, 0, 3, "Scaled precipitable water", "numeric"),
    p(3, 0, 4, "Scaled lifted index", "numeric"),
    p(3, 0, 5, "Scaled cloud top pressure", "numeric"),
    p(3, 0, 6, "Scaled skin temperature", "numeric"),
    p(3, 0, 7, "Cloud mask", "Code table 4.217"),
    p(3, 1, 0, "Estimated precipitation", "kg m-2"),
    p(10, 0, 0, "Wave spectra (1)", "-"),
    p(10, 0, 1, "Wave spectra (2)", "-"),
    p(10, 0, 2, "Wave spectra (3)", "-"),
    p(10, 0, 3, "Significant height of combined wind waves and swell", "m"),
    p(10, 0, 4, "Direction of wind waves", "Degree true"),
    p(10, 0, 5, "Significant height of wind waves", "m"),
    p(10, 0, 6, "Mean period of wind waves", "s"),
    p(10, 0, 7, "Direction of swell waves", "Degree true"),
    p(10, 0, 8, "Significant height of swell waves", "m"),
    p(10, 0, 9, "Mean period of swell waves", "s"),
    p(10, 0, 10, "Primary wave direction", "Degree true"),
    p(10, 0, 11, "Primary wave mean period", "s"),
    p(10, 0, 12, "Secondary wave direction", "Degree true"),
    p(10, 0, 13, "Secondary wave mean period", "s"),
    p(10, 0, 14, "Direction of combined wind waves and swell", "Degree true"),
    p(10, 0, 15, "Period of combined wind waves and swell", "s"),
    p(10, 0, 25, "Inverse mean wave frequency", "s"),
    p(10, 1, 0, "Current direction", "Degree true"),
    p(10, 1, 1, "Current speed", "m s-1"),
    p(10, 1, 2, "u-component of current", "m s-1"),
    p(10, 1, 3, "v-component of current", "m s-1"),
    p(10, 2, 0, "Ice cover", "Proportion"),
    p(10, 2, 1, "Ice thickness", "m"),
    p(10, 2, 2, "Direction of ice drift", "Degree true"),
    p(10, 2, 3, "Speed of ice drift", "m s-1"),
    p(10, 2, 4, "u-component of ice drift", "m s-1"),
    p(10, 2, 5, "v-component of ice drift", "m s-1"),
    p(10, 2, 6, "Ice growth rate", "m s-1"),
    p(10, 2, 7, "Ice divergence", "s-1"),
    p(10, 2, 8, "Ice Temperature", "K"),
    p(10, 3, 0, "Water temperature", "K"),
    p(10, 3, 1, "Deviation of sea level from mean", "m"),
    p(10, 4, 0, "Main thermocline depth", "m"),
    p(10, 4, 1, "Main thermocline anomaly", "m"),
    p(10, 4, 2, "Transient thermocline depth", "m"),
    p(10, 4, 3, "Salinity", "kg kg-1"),
];

// Sorted by (discipline, category, code).
const NCEP_LOCAL_TABLE: &[Parameter] = &[
    local(0, 1, 192, "Categorical rain", "Code table (4.222)"),
    local(0, 1, 193, "Categorical freezing rain", "Code table (4.222)"),
    local(0, 1, 194, "Categorical ice pellets", "Code table (4.222)"),
    local(0, 1, 195, "Categorical snow", "Code table (4.222)"),
    local(0, 2, 194, "U-component storm motion", "m s-1"),
    local(0, 2, 195, "V-component storm motion", "m s-1"),
    local(0, 3, 192, "Mean sea level pressure (Eta model reduction)", "Pa"),
    local(0, 7, 192, "Surface lifted index", "K"),
    local(0, 7, 193, "Best (4 layer) lifted index", "K"),
    local(0, 13, 192, "Particulate matter (coarse)", "µg m-3"),
    local(0, 13, 193, "Particulate matter (fine)", "µg m-3"),
    local(0, 13, 194, "Particulate matter (fine) log", "log10(µg m-3)"),
    local(0, 13, 195, "Integrated column particulate matter (fine)", "log10(µg m-3)"),
    local(0, 16, 195, "Reflectivity", "dB"),
    local(0, 16, 196, "Composite reflectivity", "dB"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted(table: &[Parameter]) -> bool {
        table.windows(2).all(|w| {
            (w[0].discipline, w[0].category, w[0].code)
                < (w[1].discipline, w[1].category, w[1].code)
        })
    }

    #[test]
    fn tables_are_sorted_for_binary_search() {
        assert!(is_sorted(MASTER_TABLE));
        assert!(is_sorted(NCEP_LOCAL_TABLE));
    }

    macro_rules! test_parameter_lookup {
        ($(($name:ident, $discipline:expr, $centre:expr, $category:expr, $code:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let actual = Parameter::lookup($discipline, $centre, $category, $code)
                    .map(|p| (p.name, p.local_use));
                assert_eq!(actual, $expected);
            }
        )*);
    }

    test_parameter_lookup! {
        (lookup_of_master_parameter, 0, 98, 1, 8, Some(("Total precipitation", false))),
        (lookup_of_wave_parameter, 10, 7, 0, 14, Some(("Direction of combined wind waves and swell", false))),
        (lookup_of_chemical_parameter, 0, 7, 20, 102, Some(("Aerosol Optical Thickness", false))),
        (lookup_of_ncep_local_parameter, 0, 7, 13, 192, Some(("Particulate matter (coarse)", true))),
        (lookup_of_ncep_local_parameter_from_other_centre, 0, 98, 13, 192, None),
        (lookup_of_unknown_category, 0, 7, 100, 0, None),
        (lookup_of_unknown_discipline, 200, 7, 0, 0, None),
    }

    #[test]
    fn category_names() {
        assert_eq!(category_name(0, 2), Some("Momentum"));
        assert_eq!(category_name(10, 0), Some("Waves"));
        assert_eq!(category_name(10, 200), None);
    }
}
