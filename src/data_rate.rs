///Data rate in units of 500 kbit/s (e.g. `DataRate(12)` is 6 Mbit/s).
///
///The raw value is kept as received so that an invalid rate in a single
///WSA channel info can be rejected without discarding the whole WSA. Use
///[`DataRate::is_valid`] to check if the value is one of the rates
///supported by 802.11 OFDM in 10 MHz & 20 MHz channels.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DataRate(pub u8);

impl DataRate {
    pub const MBPS_3: DataRate = DataRate(6);
    pub const MBPS_4_5: DataRate = DataRate(9);
    pub const MBPS_6: DataRate = DataRate(12);
    pub const MBPS_9: DataRate = DataRate(18);
    pub const MBPS_12: DataRate = DataRate(24);
    pub const MBPS_18: DataRate = DataRate(36);
    pub const MBPS_24: DataRate = DataRate(48);
    pub const MBPS_27: DataRate = DataRate(54);
    pub const MBPS_36: DataRate = DataRate(72);
    pub const MBPS_48: DataRate = DataRate(96);
    pub const MBPS_54: DataRate = DataRate(108);

    ///All valid data rates in ascending order.
    pub const ALL: [DataRate; 11] = [
        DataRate::MBPS_3,
        DataRate::MBPS_4_5,
        DataRate::MBPS_6,
        DataRate::MBPS_9,
        DataRate::MBPS_12,
        DataRate::MBPS_18,
        DataRate::MBPS_24,
        DataRate::MBPS_27,
        DataRate::MBPS_36,
        DataRate::MBPS_48,
        DataRate::MBPS_54,
    ];

    ///Returns true if the value is one of the supported data rates.
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self.0, 6 | 9 | 12 | 18 | 24 | 36 | 48 | 54 | 72 | 96 | 108)
    }

    ///Data rate in kbit/s.
    #[inline]
    pub fn kbps(self) -> u32 {
        u32::from(self.0) * 500
    }
}

impl From<DataRate> for u8 {
    fn from(d: DataRate) -> u8 {
        d.0
    }
}

impl core::fmt::Display for DataRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kbps = self.kbps();
        if 0 == kbps % 1000 {
            write!(f, "{} Mbps", kbps / 1000)
        } else {
            write!(f, "{}.{} Mbps", kbps / 1000, (kbps % 1000) / 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fmt() {
        assert_eq!("6 Mbps", format!("{}", DataRate::MBPS_6));
        assert_eq!("4.5 Mbps", format!("{}", DataRate::MBPS_4_5));
        assert_eq!("54 Mbps", format!("{}", DataRate::MBPS_54));
    }

    proptest! {
        #[test]
        fn is_valid(raw in any::<u8>()) {
            prop_assert_eq!(
                DataRate::ALL.iter().any(|d| d.0 == raw),
                DataRate(raw).is_valid()
            );
        }
    }
}
