/// An integer reconstructed from complex packing before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodedValue {
    Normal(i32),
    /// Primary missing value.
    Missing1,
    /// Secondary missing value.
    Missing2,
}
