//! Typed access to the contents of templates.
//!
//! Each template variant registers accessors for the logical contents it
//! carries under shared [`ContentKey`]s. Callers then query any variant with
//! the same key and get `None` when the active variant does not carry that
//! content.
//!
//! ```
//! use grib_reader::{ProductContent, Template};
//!
//! # fn example<R>(dataset: grib_reader::Dataset<R>) {
//! let template = &dataset.prod_def().template;
//! if let Some(member) = template.try_get(ProductContent::PERTURBATION_NUMBER) {
//!     println!("ensemble member {member}");
//! }
//! # }
//! ```

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
    time::Duration,
};

use crate::{
    codetables::{AerosolType, Code, GeneratingProcessType, Parameter},
    datatypes::*,
    grid::{Coordinate, ScanningMode},
};

/// A process-wide name bound to the type of the value stored under it.
pub struct ContentKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ContentKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContentKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContentKey<T> {}

impl<T> Debug for ContentKey<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ContentKey({})", self.name)
    }
}

type Accessor<S> = Box<dyn Fn(&S) -> Option<Box<dyn Any>> + Send + Sync>;

/// Accessors of the contents of one template type `S`, keyed by content
/// name and value type.
///
/// A key only finds an accessor registered with the same name and the same
/// type. Accessors compute values from already parsed fields and have no
/// side effects.
pub struct ContentRegistry<S> {
    accessors: HashMap<(&'static str, TypeId), Accessor<S>>,
}

impl<S: 'static> ContentRegistry<S> {
    pub fn new() -> Self {
        Self {
            accessors: HashMap::new(),
        }
    }

    pub fn register<T, F>(&mut self, key: ContentKey<T>, accessor: F)
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.register_optional(key, move |s| Some(accessor(s)));
    }

    /// Registers an accessor whose content may be absent for a particular
    /// value of `S`, in which case querying it gives `None`.
    pub fn register_optional<T, F>(&mut self, key: ContentKey<T>, accessor: F)
    where
        T: 'static,
        F: Fn(&S) -> Option<T> + Send + Sync + 'static,
    {
        let accessor: Accessor<S> =
            Box::new(move |s| accessor(s).map(|v| Box::new(v) as Box<dyn Any>));
        self.accessors.insert(Self::slot(key), accessor);
    }

    pub fn get<T: 'static>(&self, owner: &S, key: ContentKey<T>) -> Option<T> {
        let accessor = self.accessors.get(&Self::slot(key))?;
        let value = accessor(owner)?;
        value.downcast::<T>().ok().map(|v| *v)
    }

    pub fn contains<T: 'static>(&self, key: ContentKey<T>) -> bool {
        self.accessors.contains_key(&Self::slot(key))
    }

    /// Returns the names of all registered contents in sorted order.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = self
            .accessors
            .keys()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    fn slot<T: 'static>(key: ContentKey<T>) -> (&'static str, TypeId) {
        (key.name, TypeId::of::<T>())
    }
}

impl<S: 'static> Default for ContentRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A section payload that is one of several numbered variants.
pub trait Template {
    fn template_info(&self) -> TemplateInfo;

    /// Returns the content stored under `key`, or `None` if this template
    /// does not carry it.
    fn try_get<T: 'static>(&self, key: ContentKey<T>) -> Option<T>;

    /// Returns whether the content was found, together with the content or
    /// the default value of its type.
    fn try_get_or_default<T: Default + 'static>(&self, key: ContentKey<T>) -> (bool, T) {
        match self.try_get(key) {
            Some(v) => (true, v),
            None => (false, T::default()),
        }
    }

    /// Returns the names of the contents this template registers.
    fn content_keys(&self) -> Vec<&'static str>;
}

/// Implements [`Template`] for a template struct that provides
/// `fn register_contents(&mut ContentRegistry<Self>)`. The registry is built
/// once per type.
macro_rules! impl_template {
    ($ty:ty, $sect:expr, $num:expr) => {
        impl $ty {
            fn contents() -> &'static $crate::content::ContentRegistry<$ty> {
                static CONTENTS: std::sync::OnceLock<$crate::content::ContentRegistry<$ty>> =
                    std::sync::OnceLock::new();
                CONTENTS.get_or_init(|| {
                    let mut registry = $crate::content::ContentRegistry::new();
                    <$ty>::register_contents(&mut registry);
                    registry
                })
            }
        }

        impl $crate::content::Template for $ty {
            fn template_info(&self) -> $crate::datatypes::TemplateInfo {
                $crate::datatypes::TemplateInfo($sect, $num)
            }

            fn try_get<T: 'static>(&self, key: $crate::content::ContentKey<T>) -> Option<T> {
                Self::contents().get(self, key)
            }

            fn content_keys(&self) -> Vec<&'static str> {
                Self::contents().keys()
            }
        }
    };
}

pub(crate) use impl_template;

/// Content keys shared by product definition templates.
pub struct ProductContent;

impl ProductContent {
    pub const PARAMETER_CATEGORY: ContentKey<u8> = ContentKey::new("parameter_category");
    pub const PARAMETER_NUMBER: ContentKey<u8> = ContentKey::new("parameter_number");
    /// Present only when the parameter is found in the parameter table.
    pub const PARAMETER: ContentKey<Parameter> = ContentKey::new("parameter");
    pub const GENERATING_PROCESS_TYPE: ContentKey<Code<GeneratingProcessType, u8>> =
        ContentKey::new("generating_process_type");
    pub const BACKGROUND_PROCESS: ContentKey<u8> = ContentKey::new("background_process");
    pub const FORECAST_PROCESS: ContentKey<u8> = ContentKey::new("forecast_process");
    pub const OBSERVATIONAL_DATA_CUTOFF: ContentKey<Duration> =
        ContentKey::new("observational_data_cutoff");
    pub const FORECAST_TIME: ContentKey<ForecastTime> = ContentKey::new("forecast_time");
    pub const FIRST_FIXED_SURFACE: ContentKey<FixedSurface> =
        ContentKey::new("first_fixed_surface");
    pub const SECOND_FIXED_SURFACE: ContentKey<FixedSurface> =
        ContentKey::new("second_fixed_surface");
    pub const ENSEMBLE_FORECAST_TYPE: ContentKey<u8> = ContentKey::new("ensemble_forecast_type");
    pub const PERTURBATION_NUMBER: ContentKey<u8> = ContentKey::new("perturbation_number");
    pub const ENSEMBLE_FORECASTS_NUMBER: ContentKey<u8> =
        ContentKey::new("ensemble_forecasts_number");
    pub const DERIVED_FORECAST: ContentKey<u8> = ContentKey::new("derived_forecast");
    pub const STATISTICAL_PROCESSING: ContentKey<StatisticalProcessing> =
        ContentKey::new("statistical_processing");
    pub const AEROSOL_TYPE: ContentKey<Code<AerosolType, u16>> = ContentKey::new("aerosol_type");
    pub const SIZE_INTERVAL: ContentKey<Interval> = ContentKey::new("size_interval");
    pub const WAVELENGTH_INTERVAL: ContentKey<Interval> = ContentKey::new("wavelength_interval");
    pub const SPECTRAL_BANDS: ContentKey<Vec<SpectralBand>> = ContentKey::new("spectral_bands");
}

/// Content keys shared by data representation templates.
pub struct ReprContent;

impl ReprContent {
    pub const REFERENCE_VALUE: ContentKey<f32> = ContentKey::new("reference_value");
    pub const BINARY_SCALE_FACTOR: ContentKey<i16> = ContentKey::new("binary_scale_factor");
    pub const DECIMAL_SCALE_FACTOR: ContentKey<i16> = ContentKey::new("decimal_scale_factor");
    pub const BIT_WIDTH: ContentKey<u8> = ContentKey::new("bit_width");
    pub const ORIGINAL_FIELD_TYPE: ContentKey<u8> = ContentKey::new("original_field_type");
    pub const GROUP_COUNT: ContentKey<u32> = ContentKey::new("group_count");
    pub const SPATIAL_DIFFERENCING_ORDER: ContentKey<u8> =
        ContentKey::new("spatial_differencing_order");
    pub const PRECISION: ContentKey<u8> = ContentKey::new("precision");
}

/// Content keys shared by grid definition templates.
pub struct GridContent;

impl GridContent {
    /// `(ni, nj)`.
    pub const SHAPE: ContentKey<(usize, usize)> = ContentKey::new("shape");
    pub const SCANNING_MODE: ContentKey<ScanningMode> = ContentKey::new("scanning_mode");
    pub const FIRST_POINT: ContentKey<Coordinate> = ContentKey::new("first_point");
    pub const LAST_POINT: ContentKey<Coordinate> = ContentKey::new("last_point");
}
