use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Code Table 4.3: Type of generating process.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeneratingProcessType {
    Analysis = 0,
    Initialization,
    Forecast,
    BiasCorrectedForecast,
    EnsembleForecast,
    ProbabilityForecast,
    ForecastError,
    AnalysisError,
    Observation,
    Climatological,
    ProbabilityWeightedForecast,
    BiasCorrectedEnsembleForecast,
    PostProcessedAnalysis,
    PostProcessedForecast,
    Nowcast,
    Hindcast,
    PhysicalRetrieval,
    RegressionAnalysis,
    DifferenceBetweenTwoForecasts,
    Missing = 255,
}

/// Code Table 4.4: Indicator of unit of time range.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TimeUnit {
    Minute = 0,
    Hour,
    Day,
    Month,
    Year,
    Decade,
    Normal,
    Century,
    ThreeHours = 10,
    SixHours,
    TwelveHours,
    Second,
    Missing = 255,
}

impl TimeUnit {
    pub fn short_expr(&self) -> Option<&'static str> {
        match self {
            Self::Minute => Some("m"),
            Self::Hour => Some("h"),
            Self::Day => Some("D"),
            Self::Month => Some("M"),
            Self::Year => Some("Y"),
            Self::Decade => Some("10Y"),
            Self::Normal => Some("30Y"),
            Self::Century => Some("C"),
            Self::ThreeHours => Some("3h"),
            Self::SixHours => Some("6h"),
            Self::TwelveHours => Some("12h"),
            Self::Second => Some("s"),
            Self::Missing => None,
        }
    }

    /// Returns the length of the unit in seconds, for units of fixed length.
    pub fn seconds(&self) -> Option<i64> {
        let secs = match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3600,
            Self::ThreeHours => 3 * 3600,
            Self::SixHours => 6 * 3600,
            Self::TwelveHours => 12 * 3600,
            Self::Day => 24 * 3600,
            _ => return None,
        };
        Some(secs)
    }
}

/// Code Table 4.5: Fixed surface types, limited to commonly used entries.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SurfaceType {
    GroundOrWaterSurface = 1,
    CloudBaseLevel = 2,
    CloudTopLevel = 3,
    ZeroDegreeIsotherm = 4,
    AdiabaticCondensationLevel = 5,
    MaximumWindLevel = 6,
    Tropopause = 7,
    NominalTopOfAtmosphere = 8,
    SeaBottom = 9,
    EntireAtmosphere = 10,
    IsobaricSurface = 100,
    MeanSeaLevel = 101,
    SpecificAltitudeAboveMeanSeaLevel = 102,
    SpecifiedHeightLevelAboveGround = 103,
    SigmaLevel = 104,
    HybridLevel = 105,
    DepthBelowLandSurface = 106,
    IsentropicLevel = 107,
    PressureDifferenceFromGround = 108,
    PotentialVorticitySurface = 109,
    EtaLevel = 111,
    DepthBelowSeaLevel = 160,
    EntireOcean = 162,
    Missing = 255,
}

/// Code Table 4.91: Type of interval.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum IntervalType {
    SmallerThanFirstLimit = 0,
    GreaterThanSecondLimit,
    /// The range includes the first limit but not the second limit.
    BetweenFirstAndSecondLimit,
    GreaterThanFirstLimit,
    SmallerThanSecondLimit,
    SmallerOrEqualFirstLimit,
    GreaterOrEqualSecondLimit,
    /// The range includes both limits.
    BetweenFirstAndSecondLimitInclusive,
    GreaterOrEqualFirstLimit,
    SmallerOrEqualSecondLimit,
    /// The range includes the second limit but not the first limit.
    BetweenFirstAndSecondLimitReversed,
    EqualToFirstLimit,
    Missing = 255,
}

/// Code Table 4.233: Aerosol type, limited to the chemical constituents most
/// products use and the aerosol species.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum AerosolType {
    Ozone = 0,
    WaterVapour,
    Methane,
    CarbonDioxide,
    CarbonMonoxide,
    NitrogenDioxide,
    NitrousOxide,
    Formaldehyde,
    SulphurDioxide,
    Ammonia,
    Ammonium,
    NitrogenMonoxide,
    AtomicOxygen,
    NitrateRadical,
    HydroperoxylRadical,
    DinitrogenPentoxide,
    NitrousAcid,
    NitricAcid,
    PeroxynitricAcid,
    HydrogenPeroxide,
    MolecularHydrogen,
    AtomicNitrogen,
    Sulphate,
    Radon,
    TotalAerosol = 62000,
    DustDry,
    WaterInAmbient,
    AmmoniumDry,
    NitrateDry,
    NitricAcidTrihydrate,
    SulphateDry,
    MercuryDry,
    SeaSaltDry,
    BlackCarbonDry,
    ParticulateOrganicMatterDry,
    PrimaryParticulateOrganicMatterDry,
    SecondaryParticulateOrganicMatterDry,
    BlackCarbonHydrophilicDry,
    BlackCarbonHydrophobicDry,
    ParticulateOrganicMatterHydrophilicDry,
    ParticulateOrganicMatterHydrophobicDry,
    NitrateHydrophilicDry,
    NitrateHydrophobicDry,
    SmokeHighAbsorption = 62020,
    SmokeLowAbsorption,
    AerosolHighAbsorption,
    AerosolLowAbsorption,
    VolcanicAsh = 62025,
    Missing = 65535,
}
