use crate::{
    BitReader,
    codetables::Code,
    content::{ContentRegistry, ProductContent, impl_template},
    datatypes::{Interval, SpectralBand, StatisticalProcessing},
    error::BitReadError,
};

use super::ParseContext;

/// Product definition template 4.0 - Analysis or forecast at a horizontal
/// level or in a horizontal layer at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_0 {
    pub category: param_set::Category,
    pub process: param_set::ForecastProcess,
    pub surfaces: param_set::FixedSurfaces,
}

impl Template4_0 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            category: param_set::Category::read_from(reader, ctx)?,
            process: param_set::ForecastProcess::read_from(reader)?,
            surfaces: param_set::FixedSurfaces::read_from(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        register_surfaces(registry);
    }
}

impl_template!(Template4_0, 4, 0);

/// Product definition template 4.1 - Individual ensemble forecast, control and
/// perturbed, at a horizontal level or in a horizontal layer at a point in
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_1 {
    pub category: param_set::Category,
    pub process: param_set::ForecastProcess,
    pub surfaces: param_set::FixedSurfaces,
    pub ensemble: param_set::Ensemble,
}

impl Template4_1 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            category: param_set::Category::read_from(reader, ctx)?,
            process: param_set::ForecastProcess::read_from(reader)?,
            surfaces: param_set::FixedSurfaces::read_from(reader)?,
            ensemble: param_set::Ensemble::read_from(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        register_surfaces(registry);
        register_ensemble(registry);
    }
}

impl_template!(Template4_1, 4, 1);

/// Product definition template 4.2 - Derived forecasts based on all ensemble
/// members at a horizontal level or in a horizontal layer at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_2 {
    pub category: param_set::Category,
    pub process: param_set::ForecastProcess,
    pub surfaces: param_set::FixedSurfaces,
    /// Derived forecast (see Code table 4.7).
    pub derived_forecast: u8,
    /// Number of forecasts in the ensemble.
    pub num_forecasts: u8,
}

impl Template4_2 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            category: param_set::Category::read_from(reader, ctx)?,
            process: param_set::ForecastProcess::read_from(reader)?,
            surfaces: param_set::FixedSurfaces::read_from(reader)?,
            derived_forecast: reader.read()?,
            num_forecasts: reader.read()?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        register_surfaces(registry);
        registry.register(ProductContent::DERIVED_FORECAST, |t: &Self| {
            t.derived_forecast
        });
        registry.register(ProductContent::ENSEMBLE_FORECASTS_NUMBER, |t: &Self| {
            t.num_forecasts
        });
    }
}

impl_template!(Template4_2, 4, 2);

/// Product definition template 4.8 - Average, accumulation, extreme values or
/// other statistically processed values at a horizontal level or in a
/// horizontal layer in a continuous or non-continuous time interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_8 {
    pub category: param_set::Category,
    pub process: param_set::ForecastProcess,
    pub surfaces: param_set::FixedSurfaces,
    pub statistics: StatisticalProcessing,
}

impl Template4_8 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            category: param_set::Category::read_from(reader, ctx)?,
            process: param_set::ForecastProcess::read_from(reader)?,
            surfaces: param_set::FixedSurfaces::read_from(reader)?,
            statistics: StatisticalProcessing::read_from(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        register_surfaces(registry);
        registry.register(ProductContent::STATISTICAL_PROCESSING, |t: &Self| {
            t.statistics.clone()
        });
    }
}

impl_template!(Template4_8, 4, 8);

/// Product definition template 4.11 - Individual ensemble forecast, control
/// and perturbed, at a horizontal level or in a horizontal layer, in a
/// continuous or non-continuous time interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_11 {
    pub category: param_set::Category,
    pub process: param_set::ForecastProcess,
    pub surfaces: param_set::FixedSurfaces,
    pub ensemble: param_set::Ensemble,
    pub statistics: StatisticalProcessing,
}

impl Template4_11 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            category: param_set::Category::read_from(reader, ctx)?,
            process: param_set::ForecastProcess::read_from(reader)?,
            surfaces: param_set::FixedSurfaces::read_from(reader)?,
            ensemble: param_set::Ensemble::read_from(reader)?,
            statistics: StatisticalProcessing::read_from(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        register_surfaces(registry);
        register_ensemble(registry);
        registry.register(ProductContent::STATISTICAL_PROCESSING, |t: &Self| {
            t.statistics.clone()
        });
    }
}

impl_template!(Template4_11, 4, 11);

/// Product definition template 4.32 - Analysis or forecast at a horizontal
/// level or in a horizontal layer at a point in time for simulated
/// (synthetic) satellite data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_32 {
    pub category: param_set::Category,
    pub process: param_set::ForecastProcess,
    pub bands: Vec<SpectralBand>,
}

impl Template4_32 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        let category = param_set::Category::read_from(reader, ctx)?;
        let process = param_set::ForecastProcess::read_from(reader)?;
        let num_bands = reader.read::<u8>()?;
        let bands = (0..num_bands)
            .map(|_| SpectralBand::read_from(reader))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            category,
            process,
            bands,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        registry.register(ProductContent::SPECTRAL_BANDS, |t: &Self| t.bands.clone());
    }
}

impl_template!(Template4_32, 4, 32);

/// Product definition template 4.48 - Analysis or forecast at a horizontal
/// level or in a horizontal layer at a point in time for optical properties
/// of aerosol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template4_48 {
    pub category: param_set::Category,
    /// Aerosol type (see Code table 4.233).
    pub aerosol_type: u16,
    pub size: Interval,
    pub wavelength: Interval,
    pub process: param_set::ForecastProcess,
    pub surfaces: param_set::FixedSurfaces,
}

impl Template4_48 {
    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
        ctx: &ParseContext,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            category: param_set::Category::read_from(reader, ctx)?,
            aerosol_type: reader.read()?,
            size: Interval::read_from(reader)?,
            wavelength: Interval::read_from(reader)?,
            process: param_set::ForecastProcess::read_from(reader)?,
            surfaces: param_set::FixedSurfaces::read_from(reader)?,
        })
    }

    fn register_contents(registry: &mut ContentRegistry<Self>) {
        register_base(registry);
        register_surfaces(registry);
        registry.register(ProductContent::AEROSOL_TYPE, |t: &Self| {
            Code::from_number(t.aerosol_type)
        });
        registry.register(ProductContent::SIZE_INTERVAL, |t: &Self| t.size.clone());
        registry.register(ProductContent::WAVELENGTH_INTERVAL, |t: &Self| {
            t.wavelength.clone()
        });
    }
}

impl_template!(Template4_48, 4, 48);

trait HasCategory {
    fn category(&self) -> &param_set::Category;
}

trait HasForecastProcess {
    fn process(&self) -> &param_set::ForecastProcess;
}

trait HasFixedSurfaces {
    fn surfaces(&self) -> &param_set::FixedSurfaces;
}

trait HasEnsemble {
    fn ensemble(&self) -> &param_set::Ensemble;
}

macro_rules! add_impl_for_templates {
    ($tr:ident, $method:ident, $field:ident, $ret:ty, [$($ty:ty,)*]) => ($(
        impl $tr for $ty {
            fn $method(&self) -> &$ret {
                &self.$field
            }
        }
    )*);
}

add_impl_for_templates!(
    HasCategory,
    category,
    category,
    param_set::Category,
    [Template4_0, Template4_1, Template4_2, Template4_8, Template4_11, Template4_32, Template4_48,]
);
add_impl_for_templates!(
    HasForecastProcess,
    process,
    process,
    param_set::ForecastProcess,
    [Template4_0, Template4_1, Template4_2, Template4_8, Template4_11, Template4_32, Template4_48,]
);
add_impl_for_templates!(
    HasFixedSurfaces,
    surfaces,
    surfaces,
    param_set::FixedSurfaces,
    [Template4_0, Template4_1, Template4_2, Template4_8, Template4_11, Template4_48,]
);
add_impl_for_templates!(
    HasEnsemble,
    ensemble,
    ensemble,
    param_set::Ensemble,
    [Template4_1, Template4_11,]
);

fn register_base<S>(registry: &mut ContentRegistry<S>)
where
    S: HasCategory + HasForecastProcess + 'static,
{
    registry.register(ProductContent::PARAMETER_CATEGORY, |t: &S| {
        t.category().parameter_category
    });
    registry.register(ProductContent::PARAMETER_NUMBER, |t: &S| {
        t.category().parameter_number
    });
    registry.register_optional(ProductContent::PARAMETER, |t: &S| t.category().parameter);
    registry.register(ProductContent::GENERATING_PROCESS_TYPE, |t: &S| {
        Code::from_number(t.process().generating_process_type)
    });
    registry.register(ProductContent::BACKGROUND_PROCESS, |t: &S| {
        t.process().background_process
    });
    registry.register(ProductContent::FORECAST_PROCESS, |t: &S| {
        t.process().forecast_process
    });
    registry.register(ProductContent::OBSERVATIONAL_DATA_CUTOFF, |t: &S| {
        t.process().observational_data_cutoff()
    });
    registry.register(ProductContent::FORECAST_TIME, |t: &S| {
        t.process().forecast_time.clone()
    });
}

fn register_surfaces<S: HasFixedSurfaces + 'static>(registry: &mut ContentRegistry<S>) {
    registry.register(ProductContent::FIRST_FIXED_SURFACE, |t: &S| {
        t.surfaces().first.clone()
    });
    registry.register(ProductContent::SECOND_FIXED_SURFACE, |t: &S| {
        t.surfaces().second.clone()
    });
}

fn register_ensemble<S: HasEnsemble + 'static>(registry: &mut ContentRegistry<S>) {
    registry.register(ProductContent::ENSEMBLE_FORECAST_TYPE, |t: &S| {
        t.ensemble().forecast_type
    });
    registry.register(ProductContent::PERTURBATION_NUMBER, |t: &S| {
        t.ensemble().perturbation_number
    });
    registry.register(ProductContent::ENSEMBLE_FORECASTS_NUMBER, |t: &S| {
        t.ensemble().num_forecasts
    });
}

pub mod param_set {
    use std::time::Duration;

    use super::ParseContext;
    use crate::{
        BitReader,
        codetables::Parameter,
        datatypes::{FixedSurface, ForecastTime},
        error::BitReadError,
    };

    /// Parameter category and number, with the parameter they resolve to.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Category {
        /// Parameter category (see Code table 4.1).
        pub parameter_category: u8,
        /// Parameter number (see Code table 4.2).
        pub parameter_number: u8,
        /// `None` if the parameter is not in the parameter table.
        pub parameter: Option<Parameter>,
    }

    impl Category {
        pub(crate) fn read_from<T: AsRef<[u8]>>(
            reader: &mut BitReader<T>,
            ctx: &ParseContext,
        ) -> Result<Self, BitReadError> {
            let parameter_category = reader.read()?;
            let parameter_number = reader.read()?;
            Ok(Self {
                parameter_category,
                parameter_number,
                parameter: ctx.lookup_parameter(parameter_category, parameter_number),
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct ForecastProcess {
        /// Type of generating process (see Code table 4.3).
        pub generating_process_type: u8,
        /// Background generating process identifier (defined by originating
        /// centre).
        pub background_process: u8,
        /// Analysis or forecast generating process identifier (see Code ON388
        /// Table A).
        pub forecast_process: u8,
        /// Hours after reference time data cutoff.
        pub hours_after_cutoff: u16,
        /// Minutes after reference time data cutoff.
        pub minutes_after_cutoff: u8,
        pub forecast_time: ForecastTime,
    }

    impl ForecastProcess {
        pub(crate) fn read_from<T: AsRef<[u8]>>(
            reader: &mut BitReader<T>,
        ) -> Result<Self, BitReadError> {
            let generating_process_type = reader.read()?;
            let background_process = reader.read()?;
            let forecast_process = reader.read()?;
            let hours_after_cutoff = reader.read()?;
            let minutes_after_cutoff = reader.read()?;
            let unit = reader.read::<u8>()?;
            let value = reader.read::<u32>()?;
            Ok(Self {
                generating_process_type,
                background_process,
                forecast_process,
                hours_after_cutoff,
                minutes_after_cutoff,
                forecast_time: ForecastTime::from_numbers(unit, value),
            })
        }

        /// Returns the hours and minutes of the data cutoff as a single
        /// duration.
        pub fn observational_data_cutoff(&self) -> Duration {
            let minutes =
                u64::from(self.hours_after_cutoff) * 60 + u64::from(self.minutes_after_cutoff);
            Duration::from_secs(minutes * 60)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct FixedSurfaces {
        pub first: FixedSurface,
        pub second: FixedSurface,
    }

    impl FixedSurfaces {
        pub(crate) fn read_from<T: AsRef<[u8]>>(
            reader: &mut BitReader<T>,
        ) -> Result<Self, BitReadError> {
            Ok(Self {
                first: FixedSurface::read_from(reader)?,
                second: FixedSurface::read_from(reader)?,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Ensemble {
        /// Type of ensemble forecast (see Code table 4.6).
        pub forecast_type: u8,
        /// Perturbation number.
        pub perturbation_number: u8,
        /// Number of forecasts in ensemble.
        pub num_forecasts: u8,
    }

    impl Ensemble {
        pub(crate) fn read_from<T: AsRef<[u8]>>(
            reader: &mut BitReader<T>,
        ) -> Result<Self, BitReadError> {
            Ok(Self {
                forecast_type: reader.read()?,
                perturbation_number: reader.read()?,
                num_forecasts: reader.read()?,
            })
        }
    }
}
