use std::fmt::{self, Debug, Display, Formatter};

use num_enum::{TryFromPrimitive, TryFromPrimitiveError};

/// A coded value that is either a known table entry or a raw number absent
/// from the table.
///
/// Unknown codes are not errors; they are kept as [`Code::Num`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code<Enum, N> {
    Name(Enum),
    Num(N),
}

pub use Code::{Name, Num};

impl<Enum, N> Code<Enum, N> {
    /// Returns the table entry, if the code is known.
    pub fn name(&self) -> Option<&Enum> {
        match self {
            Name(e) => Some(e),
            Num(_) => None,
        }
    }
}

impl<Enum, N> Code<Enum, N>
where
    Enum: TryFromPrimitive<Primitive = N, Error = TryFromPrimitiveError<Enum>>,
{
    pub fn from_number(n: N) -> Self {
        Enum::try_from_primitive(n).into()
    }
}

impl<Enum, N> From<Result<Enum, TryFromPrimitiveError<Enum>>> for Code<Enum, N>
where
    Enum: TryFromPrimitive<Primitive = N>,
{
    fn from(result: Result<Enum, TryFromPrimitiveError<Enum>>) -> Self {
        match result {
            Ok(e) => Self::Name(e),
            Err(TryFromPrimitiveError { number: n }) => Self::Num(n),
        }
    }
}

impl<Enum: Debug, N: Display> Display for Code<Enum, N> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Name(e) => write!(f, "{e:?}"),
            Num(n) => write!(f, "code {n}"),
        }
    }
}
