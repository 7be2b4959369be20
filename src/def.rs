//! Definitions of templates contained in GRIB2 data.

pub mod grib2;
