use crate::err::Layer;

/// Errors in the structure of a received message (unknown identifiers,
/// unsupported versions, malformed encodings).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DecodeError {
    /// WSM N-Header subtype is not "null networking" (0).
    UnsupportedWsmSubtype(u8),
    /// WSM N-Header protocol version is not [`crate::WSMP_VERSION`].
    UnsupportedWsmVersion(u8),
    /// WSM T-Header TPID is not supported (only 0 is).
    UnsupportedTpid(u8),
    /// WSA message type is not a service advertisement (0).
    UnsupportedWsaMessageType(u8),
    /// WSA protocol version is not [`crate::WSA_VERSION`].
    UnsupportedWsaVersion(u8),
    /// Extension identifier is unknown in the given layer.
    InvalidExtensionId { layer: Layer, id: u8 },
    /// PSID uses an extension level beyond the 4 byte encoding.
    InvalidPsidFormat,
    /// A decoded integer is outside of its constrained range.
    ConstraintViolation { layer: Layer, value: i64 },
    /// A length determinant uses fragmentation (not supported).
    FragmentedLength(Layer),
    /// 802.11 protocol version in the frame control field is not 0.
    UnsupportedMpduProtocolVersion(u8),
    /// 802.11 frame type is not "data".
    NotDataFrame(u8),
    /// 802.11 frame subtype is not "QoS data".
    NotQosDataSubtype(u8),
    /// Address 3 of the MPDU is not the wildcard BSSID.
    NotWildcardBssid([u8; 6]),
    /// LLC EtherType is not WSMP.
    NotSupportedEtherType(u16),
    /// A UTF8String (e.g. the advertiser id) contains invalid UTF-8.
    InvalidUtf8(Layer),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use DecodeError::*;
        match self {
            UnsupportedWsmSubtype(v) => write!(f, "Unsupported subtype '{v}' found in WSM N-Header."),
            UnsupportedWsmVersion(v) => write!(f, "Unsupported protocol version '{v}' found in WSM N-Header."),
            UnsupportedTpid(v) => write!(f, "Unsupported TPID '{v}' found in WSM T-Header."),
            UnsupportedWsaMessageType(v) => write!(f, "Unsupported message type '{v}' found in WSA."),
            UnsupportedWsaVersion(v) => write!(f, "Unsupported protocol version '{v}' found in WSA."),
            InvalidExtensionId { layer, id } => write!(f, "{}: Unknown extension id '{id}' found in {layer}.", layer.error_title()),
            InvalidPsidFormat => write!(f, "PSID uses an unsupported (longer then 4 bytes) encoding."),
            ConstraintViolation { layer, value } => write!(f, "{}: Decoded value '{value}' is outside of its allowed range.", layer.error_title()),
            FragmentedLength(layer) => write!(f, "{}: Fragmented length determinants are not supported.", layer.error_title()),
            UnsupportedMpduProtocolVersion(v) => write!(f, "Unsupported 802.11 protocol version '{v}' found in MPDU."),
            NotDataFrame(v) => write!(f, "802.11 frame type '{v}' is not a data frame."),
            NotQosDataSubtype(v) => write!(f, "802.11 frame subtype '{v}' is not a QoS data frame."),
            NotWildcardBssid(v) => write!(
                f,
                "BSSID {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x} is not the wildcard BSSID.",
                v[0], v[1], v[2], v[3], v[4], v[5]
            ),
            NotSupportedEtherType(v) => write!(f, "EtherType 0x{v:04x} is not supported (only WSMP 0x88dc is)."),
            InvalidUtf8(layer) => write!(f, "{}: String contains invalid UTF-8.", layer.error_title()),
        }
    }
}

impl std::error::Error for DecodeError {}
