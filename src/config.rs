use crate::err::ValueError;
use crate::*;
use std::time::Duration;

/// Configuration of a [`Dot3`] context.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Dot3Config {
    /// Maximum length (in bytes) of constructed WSMs at start up
    /// (can be changed later via [`Dot3::set_wsm_max_len`]).
    wsm_max_len: usize,

    /// Time a user available service stays in the UAS table after the
    /// last WSA advertising it was received.
    uas_expiry: Duration,

    /// If set the PCI table is filled with the default channel
    /// infos of the channels 172 to 184 when the context is created.
    pub populate_default_pci: bool,
}

impl Dot3Config {
    /// Maximum length of constructed WSMs.
    #[inline]
    pub fn wsm_max_len(&self) -> usize {
        self.wsm_max_len
    }

    /// Time after which UAS entries are removed.
    #[inline]
    pub fn uas_expiry(&self) -> Duration {
        self.uas_expiry
    }

    /// Creates a new config with the given maximum WSM length and UAS
    /// expiry time.
    ///
    /// # Example
    ///
    /// ```
    /// use dot3::Dot3Config;
    /// use std::time::Duration;
    ///
    /// let config = Dot3Config::new(1400, Duration::from_secs(5)).unwrap();
    /// assert_eq!(1400, config.wsm_max_len());
    /// ```
    ///
    /// construction fails if the WSM length is outside of
    /// `WSM_MIN_LEN..=WSM_MAX_LEN` or if the expiry time is zero:
    ///
    /// ```
    /// use dot3::{Dot3Config, WSM_MAX_LEN, err::ValueError::*};
    /// use std::time::Duration;
    ///
    /// assert_eq!(
    ///     Dot3Config::new(WSM_MAX_LEN + 1, Duration::from_secs(5)),
    ///     Err(InvalidWsmMaxLen(WSM_MAX_LEN + 1))
    /// );
    /// assert_eq!(
    ///     Dot3Config::new(1400, Duration::ZERO),
    ///     Err(InvalidUasExpiry)
    /// );
    /// ```
    pub fn new(wsm_max_len: usize, uas_expiry: Duration) -> Result<Dot3Config, ValueError> {
        if !validate::is_valid_wsm_max_len(wsm_max_len) {
            return Err(ValueError::InvalidWsmMaxLen(wsm_max_len));
        }
        if uas_expiry.is_zero() {
            return Err(ValueError::InvalidUasExpiry);
        }
        Ok(Dot3Config {
            wsm_max_len,
            uas_expiry,
            populate_default_pci: true,
        })
    }
}

impl core::default::Default for Dot3Config {
    fn default() -> Self {
        Dot3Config {
            wsm_max_len: WSM_DEFAULT_MAX_LEN,
            uas_expiry: UAS_EXPIRY_TIME,
            populate_default_pci: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default() {
        let config = Dot3Config::default();
        assert_eq!(WSM_DEFAULT_MAX_LEN, config.wsm_max_len());
        assert_eq!(UAS_EXPIRY_TIME, config.uas_expiry());
        assert!(config.populate_default_pci);
    }

    #[test]
    fn new() {
        assert_eq!(
            Ok(Dot3Config {
                wsm_max_len: WSM_MIN_LEN,
                uas_expiry: Duration::from_millis(1),
                populate_default_pci: true,
            }),
            Dot3Config::new(WSM_MIN_LEN, Duration::from_millis(1))
        );
        assert_eq!(
            Err(ValueError::InvalidWsmMaxLen(WSM_MIN_LEN - 1)),
            Dot3Config::new(WSM_MIN_LEN - 1, UAS_EXPIRY_TIME)
        );
    }
}
