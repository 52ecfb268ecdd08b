/// Layers on which an error can occur.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Layer {
    /// Error occured in the 802.11 MAC/LLC framing around a WSM.
    Mpdu,
    /// Error occured in the WSM network header (N-Header).
    WsmNHeader,
    /// Error occured in the WSM transport header (T-Header).
    WsmTHeader,
    /// Error occured while decoding a PSID (VarLengthNumber).
    Psid,
    /// Error occured in the WSA header (or its extensions).
    WsaHeader,
    /// Error occured in a WSA Service Info.
    ServiceInfo,
    /// Error occured in a WSA Channel Info.
    ChannelInfo,
    /// Error occured in the WSA Routing Advertisement.
    RoutingAdvertisement,
}

impl Layer {
    /// String that is used as a title for the error.
    pub fn error_title(&self) -> &'static str {
        use Layer::*;
        match self {
            Mpdu => "MPDU Error",
            WsmNHeader => "WSM N-Header Error",
            WsmTHeader => "WSM T-Header Error",
            Psid => "PSID Error",
            WsaHeader => "WSA Header Error",
            ServiceInfo => "WSA Service Info Error",
            ChannelInfo => "WSA Channel Info Error",
            RoutingAdvertisement => "WSA Routing Advertisement Error",
        }
    }
}

impl core::fmt::Display for Layer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use Layer::*;
        match self {
            Mpdu => write!(f, "MPDU"),
            WsmNHeader => write!(f, "WSM N-Header"),
            WsmTHeader => write!(f, "WSM T-Header"),
            Psid => write!(f, "PSID"),
            WsaHeader => write!(f, "WSA header"),
            ServiceInfo => write!(f, "WSA service info"),
            ChannelInfo => write!(f, "WSA channel info"),
            RoutingAdvertisement => write!(f, "WSA routing advertisement"),
        }
    }
}
