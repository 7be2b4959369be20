use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::datatypes::TemplateInfo;
use crate::decoder::{ComplexPackingDecodeError, RunLengthEncodingDecodeError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GribError {
    ParseError(ParseError),
    DecodeError(DecodeError),
    NotSupported(String),
    InvalidValueError(String),
    OperationError(String),
}

impl Error for GribError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ParseError(e) => Some(e),
            Self::DecodeError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for GribError {
    fn from(e: ParseError) -> Self {
        Self::ParseError(e)
    }
}

impl From<DecodeError> for GribError {
    fn from(e: DecodeError) -> Self {
        Self::DecodeError(e)
    }
}

impl From<BitReadError> for GribError {
    fn from(e: BitReadError) -> Self {
        Self::DecodeError(DecodeError::BitReadError(e))
    }
}

impl Display for GribError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ParseError(e) => write!(f, "{e}"),
            Self::DecodeError(e) => write!(f, "{e}"),
            Self::NotSupported(s) => write!(f, "not supported: {s}"),
            Self::InvalidValueError(s) => write!(f, "invalid value: {s}"),
            Self::OperationError(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    ReadError(String),
    NotGRIB,
    GRIBVersionMismatch(u8),
    UnknownSectionNumber(u8),
    EndSectionMismatch,
    UnexpectedEndOfData(usize),
    InvalidSectionOrder(usize),
    NoGridDefinition(usize),
    SectionSizeTooSmall(usize),
    MessageLengthMismatch(usize),
    SectionLengthMismatch {
        sect_num: u8,
        declared: usize,
        consumed: usize,
    },
    UnsupportedTemplate(TemplateInfo),
    BitReadError(BitReadError),
}

impl ParseError {
    /// Returns whether the error leaves the start of the next message
    /// unknown, so that nothing after it can be read.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ReadError(_)
                | Self::NotGRIB
                | Self::GRIBVersionMismatch(_)
                | Self::UnexpectedEndOfData(_)
        )
    }
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ReadError(s) => write!(f, "Read error: {s}"),
            Self::NotGRIB => write!(f, "Not GRIB data"),
            Self::GRIBVersionMismatch(i) => write!(f, "Unexpected GRIB edition: {i}"),
            Self::UnknownSectionNumber(s) => write!(f, "Unknown section number: {s}"),
            Self::EndSectionMismatch => write!(f, "Content of End Section is not valid"),
            Self::UnexpectedEndOfData(i) => {
                write!(f, "Unexpected end of data at {i}")
            }
            Self::InvalidSectionOrder(i) => {
                write!(f, "GRIB2 sections wrongly ordered at {i}")
            }
            Self::NoGridDefinition(i) => {
                write!(f, "Grid Definition Section not found at {i}")
            }
            Self::SectionSizeTooSmall(i) => write!(f, "Section size is too small at {i}"),
            Self::MessageLengthMismatch(i) => {
                write!(
                    f,
                    "Sections of the message starting at {i} do not add up to its total length"
                )
            }
            Self::SectionLengthMismatch {
                sect_num,
                declared,
                consumed,
            } => write!(
                f,
                "Section {sect_num} declares {declared} octets but its template consumed {consumed}"
            ),
            Self::UnsupportedTemplate(tmpl) => write!(f, "Unsupported template: {tmpl}"),
            Self::BitReadError(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEndOfData(0),
            _ => Self::ReadError(e.to_string()),
        }
    }
}

impl From<BitReadError> for ParseError {
    fn from(e: BitReadError) -> Self {
        Self::BitReadError(e)
    }
}

/// An error that made one message of a byte source unreadable. Messages
/// before and after it are read as usual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageError {
    /// Position of the message in the byte source, counting from 0.
    pub message: usize,
    /// Offset of Section 0 of the message.
    pub offset: usize,
    pub error: ParseError,
}

impl Error for MessageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for MessageError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "message {} at {} skipped: {}",
            self.message, self.offset, self.error
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodeError {
    NotSupported(&'static str, u16),
    LengthMismatch,
    BitmapLengthMismatch,
    NoPreviousBitmap,
    /// Memory for the declared number of values could not be reserved.
    AllocationFailed(usize),
    ComplexPackingDecodeError(ComplexPackingDecodeError),
    RunLengthEncodingDecodeError(RunLengthEncodingDecodeError),
    BitReadError(BitReadError),
}

impl Error for DecodeError {}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotSupported(what, num) => write!(f, "{what} {num} is not supported"),
            Self::LengthMismatch => {
                write!(f, "Data section length does not match the number of points")
            }
            Self::BitmapLengthMismatch => {
                write!(f, "Bit-map is shorter than the number of grid points")
            }
            Self::NoPreviousBitmap => {
                write!(f, "No previously defined bit-map to reuse in this message")
            }
            Self::AllocationFailed(n) => write!(f, "Cannot allocate memory for {n} values"),
            Self::ComplexPackingDecodeError(e) => write!(f, "Complex packing: {e}"),
            Self::RunLengthEncodingDecodeError(e) => write!(f, "Run-length packing: {e}"),
            Self::BitReadError(e) => write!(f, "{e}"),
        }
    }
}

impl From<BitReadError> for DecodeError {
    fn from(e: BitReadError) -> Self {
        Self::BitReadError(e)
    }
}

/// Errors raised by [`BitReader`](crate::BitReader).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BitReadError {
    /// Reading `requested` bits at bit offset `offset` would run past the end
    /// of the data.
    OutOfData { offset: usize, requested: usize },
    /// A sub-byte read wider than 32 bits was requested.
    InvalidWidth(usize),
}

impl Error for BitReadError {}

impl Display for BitReadError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::OutOfData { offset, requested } => {
                write!(f, "Out of data reading {requested} bits at bit offset {offset}")
            }
            Self::InvalidWidth(n) => write!(f, "Invalid bit width: {n}"),
        }
    }
}
