/// Range & format errors of values passed in by the caller (or decoded
/// from a message and checked afterwards).
///
/// Each variant names exactly one violated field and carries the
/// offending value.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ValueError {
    /// PSID is bigger then [`crate::PSID_MAX`].
    InvalidPsid(u32),
    /// Channel number is bigger then [`crate::CHANNEL_NUMBER_MAX`].
    InvalidChannelNumber(u8),
    /// Raw data rate value is not one of the [`crate::DataRate`] values.
    InvalidDataRate(u8),
    /// User priority is bigger then 7.
    InvalidPriority(u8),
    /// RCPI is bigger then [`crate::RCPI_MAX`].
    InvalidRcpi(u8),
    /// WSM payload exceeds [`crate::WSM_MAX_PAYLOAD_LEN`].
    WsmPayloadTooLarge { len: usize, max: usize },
    /// Encoded WSM exceeds the configured maximum WSM length.
    WsmTooLarge { len: usize, max: usize },
    /// Configured maximum WSM length is outside of
    /// [`crate::WSM_MIN_LEN`]..=[`crate::WSM_MAX_LEN`].
    InvalidWsmMaxLen(usize),
    /// WSA identifier exceeds 4 bits.
    InvalidWsaId(u8),
    /// WSA content count exceeds 4 bits.
    InvalidContentCount(u8),
    /// Latitude is outside of the allowed range.
    InvalidLatitude(i32),
    /// Longitude is outside of the allowed range.
    InvalidLongitude(i32),
    /// Elevation is outside of the allowed range.
    InvalidElevation(i32),
    /// Advertiser identifier length is not within 1..=32 bytes.
    InvalidAdvertiserIdLen(usize),
    /// Provider service context is longer then 31 bytes.
    InvalidPscLen(usize),
    /// Channel index is not within 1..=31.
    InvalidChannelIndex(u8),
    /// RCPI threshold is bigger then [`crate::RCPI_MAX`].
    InvalidRcpiThreshold(u8),
    /// WSA count threshold is zero.
    InvalidWsaCountThreshold(u8),
    /// WSA count threshold interval is zero.
    InvalidWsaCountThresholdInterval(u8),
    /// EDCA access category index exceeds 2 bits.
    InvalidAci(u8),
    /// EDCA AIFSN exceeds 4 bits.
    InvalidAifsn(u8),
    /// EDCA ECWmin exceeds 4 bits.
    InvalidEcwMin(u8),
    /// EDCA ECWmax exceeds 4 bits.
    InvalidEcwMax(u8),
    /// EDCA ECWmax is smaller then ECWmin.
    EcwMaxLessThanEcwMin { ecw_min: u8, ecw_max: u8 },
    /// Raw channel access value is unknown.
    InvalidChannelAccess(u8),
    /// Router lifetime is zero.
    InvalidRouterLifetime(u16),
    /// IPv6 prefix length is not within 1..=128.
    InvalidIpv6PrefixLen(u8),
    /// More service infos then [`crate::WSI_NUM_MAX`] were passed to an encoder.
    TooManyServiceInfos(usize),
    /// More channel infos then [`crate::WCI_NUM_MAX`] were passed to an encoder.
    TooManyChannelInfos(usize),
    /// A length determinant would require fragmentation (>= 16384).
    LengthTooLarge(usize),
    /// UAS management interval is not within 1..=[`crate::UAS_MGMT_INTERVAL_MAX`].
    InvalidUasMgmtInterval(u32),
    /// UAS expiry time is zero.
    InvalidUasExpiry,
}

impl core::fmt::Display for ValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use ValueError::*;
        match self {
            InvalidPsid(v) => write!(f, "PSID {v} is bigger then the maximum allowed value {}.", crate::PSID_MAX),
            InvalidChannelNumber(v) => write!(f, "Channel number {v} is bigger then the maximum allowed value {}.", crate::CHANNEL_NUMBER_MAX),
            InvalidDataRate(v) => write!(f, "Data rate {v} (500 kbps units) is not a supported data rate."),
            InvalidPriority(v) => write!(f, "User priority {v} is bigger then the maximum allowed value 7."),
            InvalidRcpi(v) => write!(f, "RCPI {v} is bigger then the maximum allowed value {}.", crate::RCPI_MAX),
            WsmPayloadTooLarge { len, max } => write!(f, "WSM payload length {len} is bigger then the maximum allowed payload length {max}."),
            WsmTooLarge { len, max } => write!(f, "Encoded WSM length {len} is bigger then the configured maximum WSM length {max}."),
            InvalidWsmMaxLen(v) => write!(f, "Maximum WSM length {v} is not within {}..={}.", crate::WSM_MIN_LEN, crate::WSM_MAX_LEN),
            InvalidWsaId(v) => write!(f, "WSA identifier {v} is bigger then the maximum allowed value 15."),
            InvalidContentCount(v) => write!(f, "WSA content count {v} is bigger then the maximum allowed value 15."),
            InvalidLatitude(v) => write!(f, "Latitude {v} is outside of the allowed range."),
            InvalidLongitude(v) => write!(f, "Longitude {v} is outside of the allowed range."),
            InvalidElevation(v) => write!(f, "Elevation {v} is outside of the allowed range."),
            InvalidAdvertiserIdLen(v) => write!(f, "Advertiser identifier length {v} is not within 1..=32."),
            InvalidPscLen(v) => write!(f, "Provider service context length {v} is bigger then the maximum allowed length 31."),
            InvalidChannelIndex(v) => write!(f, "Channel index {v} is not within 1..=31."),
            InvalidRcpiThreshold(v) => write!(f, "RCPI threshold {v} is bigger then the maximum allowed value {}.", crate::RCPI_MAX),
            InvalidWsaCountThreshold(v) => write!(f, "WSA count threshold {v} is not within 1..=255."),
            InvalidWsaCountThresholdInterval(v) => write!(f, "WSA count threshold interval {v} is not within 1..=255."),
            InvalidAci(v) => write!(f, "EDCA access category index {v} is bigger then the maximum allowed value 3."),
            InvalidAifsn(v) => write!(f, "EDCA AIFSN {v} is bigger then the maximum allowed value 15."),
            InvalidEcwMin(v) => write!(f, "EDCA ECWmin {v} is bigger then the maximum allowed value 15."),
            InvalidEcwMax(v) => write!(f, "EDCA ECWmax {v} is bigger then the maximum allowed value 15."),
            EcwMaxLessThanEcwMin { ecw_min, ecw_max } => write!(f, "EDCA ECWmax {ecw_max} is smaller then ECWmin {ecw_min}."),
            InvalidChannelAccess(v) => write!(f, "Channel access value {v} is unknown."),
            InvalidRouterLifetime(v) => write!(f, "Router lifetime {v} is not within 1..=65535."),
            InvalidIpv6PrefixLen(v) => write!(f, "IPv6 prefix length {v} is not within 1..=128."),
            TooManyServiceInfos(v) => write!(f, "{v} service infos exceed the maximum of {} per WSA.", crate::WSI_NUM_MAX),
            TooManyChannelInfos(v) => write!(f, "{v} channel infos exceed the maximum of {} per WSA.", crate::WCI_NUM_MAX),
            LengthTooLarge(v) => write!(f, "Length {v} can not be encoded without fragmentation (maximum 16383)."),
            InvalidUasMgmtInterval(v) => write!(f, "UAS management interval {v} is not within 1..={}.", crate::UAS_MGMT_INTERVAL_MAX),
            InvalidUasExpiry => write!(f, "UAS expiry time must not be zero."),
        }
    }
}

impl std::error::Error for ValueError {}
