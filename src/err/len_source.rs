/// Sources of length limiting values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LenSource {
    /// Limiting length was the slice length (we don't know what determined
    /// the length of the slice).
    Slice,
    /// Length was determined by an UPER length determinant (e.g. the
    /// length of an extension value or of the WSM body).
    LengthDeterminant,
}
