//! Code tables and the parameter table used to describe decoded fields.
//!
//! These are descriptive lookups only. A code that is not listed here is
//! still decoded and kept as a raw number.

mod core;
pub use core::*;
mod grib2;
pub use grib2::*;
mod parameters;
pub use parameters::*;
