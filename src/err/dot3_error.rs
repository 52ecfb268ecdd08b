use super::*;

/// Error returned by the fallible operations of this crate.
///
/// Groups the more specific error types by category. Use the accessor
/// functions or a `match` to get to the specific error.
#[derive(Debug)]
pub enum Dot3Error {
    /// Not enough data to decode an element.
    Len(LenError),
    /// A value is outside of its allowed range.
    Value(ValueError),
    /// The structure of a received message is not supported.
    Decode(DecodeError),
    /// A service table operation failed.
    Table(TableError),
    /// UAS management has already been started.
    UasMgmtAlreadyRunning,
    /// The UAS management timer thread could not be created.
    TimerSpawn(std::io::Error),
}

impl Dot3Error {
    /// Returns the [`LenError`] if the error is a length error.
    pub fn len_error(&self) -> Option<&LenError> {
        match self {
            Dot3Error::Len(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the [`ValueError`] if the error is a value error.
    pub fn value_error(&self) -> Option<&ValueError> {
        match self {
            Dot3Error::Value(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the [`DecodeError`] if the error is a decode error.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Dot3Error::Decode(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the [`TableError`] if the error is a table error.
    pub fn table_error(&self) -> Option<&TableError> {
        match self {
            Dot3Error::Table(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Dot3Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use Dot3Error::*;
        match self {
            Len(err) => write!(f, "{err}"),
            Value(err) => write!(f, "{err}"),
            Decode(err) => write!(f, "{err}"),
            Table(err) => write!(f, "{err}"),
            UasMgmtAlreadyRunning => write!(f, "UAS management is already running."),
            TimerSpawn(err) => write!(f, "Failed to start the UAS management timer: {err}"),
        }
    }
}

impl std::error::Error for Dot3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Dot3Error::*;
        match self {
            Len(err) => Some(err),
            Value(err) => Some(err),
            Decode(err) => Some(err),
            Table(err) => Some(err),
            UasMgmtAlreadyRunning => None,
            TimerSpawn(err) => Some(err),
        }
    }
}

impl From<LenError> for Dot3Error {
    fn from(err: LenError) -> Dot3Error {
        Dot3Error::Len(err)
    }
}

impl From<ValueError> for Dot3Error {
    fn from(err: ValueError) -> Dot3Error {
        Dot3Error::Value(err)
    }
}

impl From<DecodeError> for Dot3Error {
    fn from(err: DecodeError) -> Dot3Error {
        Dot3Error::Decode(err)
    }
}

impl From<TableError> for Dot3Error {
    fn from(err: TableError) -> Dot3Error {
        Dot3Error::Table(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::*;
    use std::error::Error;

    #[test]
    fn from() {
        assert_matches!(
            Dot3Error::from(ValueError::InvalidPsid(0xffff_ffff)),
            Dot3Error::Value(ValueError::InvalidPsid(0xffff_ffff))
        );
        assert_matches!(
            Dot3Error::from(DecodeError::InvalidPsidFormat),
            Dot3Error::Decode(DecodeError::InvalidPsidFormat)
        );
        assert_matches!(
            Dot3Error::from(TableError::PsrTableFull),
            Dot3Error::Table(TableError::PsrTableFull)
        );
    }

    #[test]
    fn accessors() {
        let err = Dot3Error::from(TableError::UasTableFull);
        assert_eq!(Some(&TableError::UasTableFull), err.table_error());
        assert!(err.value_error().is_none());
        assert!(err.decode_error().is_none());
        assert!(err.len_error().is_none());
    }

    #[test]
    fn fmt_source() {
        let err = Dot3Error::from(TableError::NoRelatedChannelInfo(178));
        assert_eq!(
            "No channel info (PCI) for channel 178 is registered.",
            format!("{}", err)
        );
        assert!(err.source().is_some());
        assert!(Dot3Error::UasMgmtAlreadyRunning.source().is_none());
        let _ = format!(
            "{}",
            Dot3Error::TimerSpawn(std::io::Error::new(std::io::ErrorKind::Other, "oh no!"))
        );
    }
}
