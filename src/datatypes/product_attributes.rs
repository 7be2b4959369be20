use std::fmt::{self, Display, Formatter};

#[cfg(feature = "time-calculation")]
use chrono::{DateTime, LocalResult, TimeZone, Utc};

#[cfg(feature = "time-calculation")]
use crate::error::GribError;
use crate::{BitReader, codetables::*, error::BitReadError, helpers::GribInt};

/// A value stored as a decimal scale factor and a scaled integer, so that the
/// value is `scaled_value / 10^scale_factor`.
///
/// Both parts use sign-and-magnitude encoding, and all bits set in either
/// part marks the value as missing.
///
/// # Examples
///
/// ```
/// use grib_reader::ScaledValue;
///
/// assert_eq!(ScaledValue::new(2, 85000).value(), Some(850.0));
/// assert_eq!(ScaledValue::new(-2, 5).value(), Some(500.0));
/// assert_eq!(ScaledValue::new(i8::MIN + 1, i32::MIN + 1).value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaledValue {
    pub scale_factor: i8,
    pub scaled_value: i32,
}

impl ScaledValue {
    pub fn new(scale_factor: i8, scaled_value: i32) -> Self {
        Self {
            scale_factor,
            scaled_value,
        }
    }

    pub(crate) fn from_raw(scale_factor: u8, scaled_value: u32) -> Self {
        Self::new(scale_factor.as_grib_int(), scaled_value.as_grib_int())
    }

    /// Checks if either part holds the missing sentinel. Note that all bits
    /// set is `MIN + 1` and not `MIN` in sign-and-magnitude encoding.
    pub fn is_missing(&self) -> bool {
        self.scale_factor == i8::MIN + 1 || self.scaled_value == i32::MIN + 1
    }

    pub fn value(&self) -> Option<f64> {
        if self.is_missing() {
            return None;
        }
        let value = f64::from(self.scaled_value);
        let scale = i32::from(self.scale_factor);
        let value = if scale >= 0 {
            value / 10_f64.powi(scale)
        } else {
            value * 10_f64.powi(-scale)
        };
        Some(value)
    }
}

impl Display for ScaledValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "Missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastTime {
    pub unit: Code<TimeUnit, u8>,
    pub value: u32,
}

impl ForecastTime {
    pub fn new(unit: Code<TimeUnit, u8>, value: u32) -> Self {
        Self { unit, value }
    }

    pub fn from_numbers(unit: u8, value: u32) -> Self {
        Self::new(Code::from_number(unit), value)
    }

    /// Returns the forecast time in seconds if its unit has a fixed length.
    pub fn seconds(&self) -> Option<i64> {
        let unit = self.unit.name()?.seconds()?;
        Some(unit * i64::from(self.value))
    }

    pub fn describe(&self) -> (String, String) {
        (self.unit.to_string(), self.value.to_string())
    }
}

impl Display for ForecastTime {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.value)?;

        match &self.unit {
            Name(unit) => {
                if let Some(expr) = unit.short_expr() {
                    write!(f, " [{expr}]")?;
                }
            }
            Num(num) => {
                write!(f, " [unit: {num}]")?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedSurface {
    /// Type of fixed surface (see Code Table 4.5).
    pub surface_type: u8,
    pub scale_factor: i8,
    pub scaled_value: i32,
}

impl FixedSurface {
    pub fn new(surface_type: u8, scale_factor: i8, scaled_value: i32) -> Self {
        Self {
            surface_type,
            scale_factor,
            scaled_value,
        }
    }

    pub(crate) fn read_from<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        let surface_type = reader.read::<u8>()?;
        let ScaledValue {
            scale_factor,
            scaled_value,
        } = reader.read_scaled()?;
        Ok(Self::new(surface_type, scale_factor, scaled_value))
    }

    pub fn surface(&self) -> Code<SurfaceType, u8> {
        Code::from_number(self.surface_type)
    }

    /// Returns the value of the surface, or `None` if it is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use grib_reader::FixedSurface;
    ///
    /// assert_eq!(FixedSurface::new(100, -2, 850).value(), Some(85000.0));
    /// assert_eq!(FixedSurface::new(1, i8::MIN + 1, i32::MIN + 1).value(), None);
    /// ```
    pub fn value(&self) -> Option<f64> {
        ScaledValue::new(self.scale_factor, self.scaled_value).value()
    }

    /// Returns the unit string defined for the type of the surface, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// assert_eq!(grib_reader::FixedSurface::new(100, 0, 0).unit(), Some("Pa"));
    /// ```
    pub fn unit(&self) -> Option<&str> {
        let unit = match self.surface_type {
            11 | 12 => "m",
            13 => "%",
            18 => "Pa",
            20 => "K",
            21 | 22 => "kg m-3",
            23 | 24 => "Bq m-3",
            25 => "dBZ",
            26 | 27 | 30 => "m",
            100 => "Pa",
            102 | 103 => "m",
            104 => r#""sigma" value"#,
            106 => "m",
            107 => "K",
            108 => "Pa",
            109 => "K m2 kg-1 s-1",
            114 => "Numeric",
            117 => "m",
            151 | 152 => "Numeric",
            160 | 161 => "m",
            168 => "Numeric",
            169 => "kg m-3",
            170 => "K",
            171 => "m2 s-1",
            _ => return None,
        };
        Some(unit)
    }

    pub fn describe(&self) -> (String, String) {
        let stype = self.surface().to_string();
        let value = match (self.value(), self.unit()) {
            (Some(v), Some(unit)) => format!("{v} [{unit}]"),
            (Some(v), None) => v.to_string(),
            (None, _) => "Missing".to_owned(),
        };
        (stype, value)
    }
}

/// A date and time as stored in GRIB, without validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeStamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeStamp {
    pub(crate) fn read_from<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            year: reader.read()?,
            month: reader.read()?,
            day: reader.read()?,
            hour: reader.read()?,
            minute: reader.read()?,
            second: reader.read()?,
        })
    }

    #[cfg(feature = "time-calculation")]
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, GribError> {
        create_date_time(
            self.year.into(),
            self.month.into(),
            self.day.into(),
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
        )
    }
}

impl Display for TimeStamp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(feature = "time-calculation")]
#[inline]
pub(crate) fn create_date_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<DateTime<Utc>, GribError> {
    match Utc.with_ymd_and_hms(year, month, day, hour, minute, second) {
        LocalResult::Single(dt) => Ok(dt),
        _ => Err(GribError::InvalidValueError(format!(
            "invalid date time: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        ))),
    }
}

/// One time range specification of a statistically processed product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Statistical process (see Code Table 4.10).
    pub statistical_process: u8,
    /// Type of time increment (see Code Table 4.11).
    pub increment_type: u8,
    pub time_unit: Code<TimeUnit, u8>,
    pub time_length: u32,
    pub increment_unit: Code<TimeUnit, u8>,
    pub time_increment: u32,
}

impl TimeRange {
    pub(crate) fn read_from<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            statistical_process: reader.read()?,
            increment_type: reader.read()?,
            time_unit: Code::from_number(reader.read()?),
            time_length: reader.read()?,
            increment_unit: Code::from_number(reader.read()?),
            time_increment: reader.read()?,
        })
    }

    pub fn length(&self) -> ForecastTime {
        ForecastTime::new(self.time_unit, self.time_length)
    }
}

/// Description of a statistically processed time interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatisticalProcessing {
    /// End of the overall time interval.
    pub end_time: TimeStamp,
    /// Total number of data values missing in the statistical process.
    pub num_missing: u32,
    pub time_ranges: Vec<TimeRange>,
}

impl StatisticalProcessing {
    pub(crate) fn read_from<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        let end_time = TimeStamp::read_from(reader)?;
        let num_ranges = reader.read::<u8>()?;
        let num_missing = reader.read::<u32>()?;
        let time_ranges = (0..num_ranges)
            .map(|_| TimeRange::read_from(reader))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            end_time,
            num_missing,
            time_ranges,
        })
    }
}

/// An interval such as a particle size or a wavelength range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub interval_type: Code<IntervalType, u8>,
    pub first: ScaledValue,
    pub second: ScaledValue,
}

impl Interval {
    pub(crate) fn read_from<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            interval_type: Code::from_number(reader.read()?),
            first: reader.read_scaled()?,
            second: reader.read_scaled()?,
        })
    }

    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.first.value(), self.second.value())
    }
}

/// A spectral band of a simulated satellite product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpectralBand {
    pub satellite_series: u16,
    pub satellite_number: u16,
    pub instrument_type: u16,
    /// Central wave number in m-1.
    pub central_wave_number: ScaledValue,
}

impl SpectralBand {
    pub(crate) fn read_from<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            satellite_series: reader.read()?,
            satellite_number: reader.read()?,
            instrument_type: reader.read()?,
            central_wave_number: reader.read_scaled()?,
        })
    }
}
