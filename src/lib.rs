//! Decoding of GRIB edition 2 messages, with a companion reader for
//! edition 1.
//!
//! A byte source is scanned once with [`from_reader`] or [`from_slice`].
//! Every dataset found can then be inspected through its typed section
//! bodies and templates, and its values are decoded lazily on request.
//!
//! ```no_run
//! use grib_reader::{ProductContent, Template};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let f = std::fs::File::open("testdata/forecast.grib2")?;
//!     let grib2 = grib_reader::from_reader(std::io::BufReader::new(f))?;
//!
//!     for (index, dataset) in grib2.iter() {
//!         let surface = dataset
//!             .prod_def()
//!             .template
//!             .try_get(ProductContent::FIRST_FIXED_SURFACE);
//!         println!("{index:?}: {} {surface:?}", dataset.describe());
//!
//!         for (coord, value) in dataset.points()? {
//!             println!("{:.3} {:.3} {value}", coord.lat, coord.lon);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod bits;
pub mod codetables;
mod content;
mod context;
mod datatypes;
mod decoder;
pub mod def;
mod error;
pub mod grib1;
mod grid;
mod helpers;
mod parser;
mod reader;

pub use crate::{
    bits::{BitReader, FromBytes},
    codetables::{Code, Parameter},
    content::{ContentKey, ContentRegistry, GridContent, ProductContent, ReprContent, Template},
    context::*,
    datatypes::*,
    decoder::{ComplexPackingDecodeError, DecodedValues, RunLengthEncodingDecodeError},
    error::*,
    grid::*,
    reader::{Grib2Read, Grib2SectionStream, SeekableGrib2Reader},
};
