use crate::err::{Layer, LenSource};

/// Error when different lengths are conflicting with each other (e.g. not
/// enough data in a slice to decode a header).
///
/// This error is triggered whenever there is not enough data to decode
/// an element (e.g. if a slice ends in the middle of a WSA service info)
/// or if a length determinant announces more octets than are available.
///
/// When the error is caused by not enough data beeing available
/// `required_len > len` must be true.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LenError {
    /// Expected minimum length (in bytes) conflicting with the
    /// `len` value.
    pub required_len: usize,

    /// Length (in bytes) limiting the required length.
    pub len: usize,

    /// Source of the outer length (e.g. Slice or a length determinant).
    pub len_source: LenSource,

    /// Layer in which the length error was encountered.
    pub layer: Layer,
}

impl core::fmt::Display for LenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let len_source: &'static str = {
            use LenSource::*;
            match self.len_source {
                Slice => "slice length",
                LengthDeterminant => "length determinant",
            }
        };
        write!(
            f,
            "{}: Not enough data to decode '{}'. {} byte(s) would be required, but only {} byte(s) are available based on the {}.",
            self.layer.error_title(),
            self.layer,
            self.required_len,
            self.len,
            len_source
        )
    }
}

impl std::error::Error for LenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
