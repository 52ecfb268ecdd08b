use crate::err::{Dot3Error, Layer, ValueError};
use crate::extension::{read_extensions, write_extensions, ExtCodec, Extension};
use crate::psid::{read_psid, write_psid};
use crate::uper::{BitReader, BitWriter};
use crate::validate::{self, PSC_MAX_LEN};
use crate::MacAddr;

/// Extension ids allowed in a WSA service info.
pub const WSI_EXT_ID_PSC: u8 = 8;
pub const WSI_EXT_ID_IPV6_ADDRESS: u8 = 9;
pub const WSI_EXT_ID_SERVICE_PORT: u8 = 10;
pub const WSI_EXT_ID_PROVIDER_MAC_ADDR: u8 = 11;
pub const WSI_EXT_ID_RCPI_THRESHOLD: u8 = 19;
pub const WSI_EXT_ID_WSA_COUNT_THRESHOLD: u8 = 20;
pub const WSI_EXT_ID_WSA_COUNT_THRESHOLD_INTERVAL: u8 = 22;

/// Optional fields of a WSA service info.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ServiceInfoExt {
    Psc(Vec<u8>),
    Ipv6Address([u8; 16]),
    ServicePort(u16),
    ProviderMacAddr(MacAddr),
    RcpiThreshold(u8),
    WsaCountThreshold(u8),
    WsaCountThresholdInterval(u8),
}

impl ServiceInfoExt {
    fn read_psc(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        // fill bits in front of the 5 bit length align the octets
        let _fill = r.read_bits(3)?;
        let len = r.read_bits(5)? as usize;
        Ok(ServiceInfoExt::Psc(r.read_octets(len)?))
    }

    fn read_ipv6_address(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        Ok(ServiceInfoExt::Ipv6Address(r.read_array::<16>()?))
    }

    fn read_service_port(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        Ok(ServiceInfoExt::ServicePort(r.read_bits(16)? as u16))
    }

    fn read_provider_mac_addr(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        Ok(ServiceInfoExt::ProviderMacAddr(r.read_array::<6>()?))
    }

    fn read_rcpi_threshold(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        Ok(ServiceInfoExt::RcpiThreshold(r.read_u8()?))
    }

    fn read_wsa_count_threshold(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        Ok(ServiceInfoExt::WsaCountThreshold(r.read_u8()?))
    }

    fn read_wsa_count_threshold_interval(r: &mut BitReader) -> Result<ServiceInfoExt, Dot3Error> {
        Ok(ServiceInfoExt::WsaCountThresholdInterval(r.read_u8()?))
    }
}

impl Extension for ServiceInfoExt {
    const LAYER: Layer = Layer::ServiceInfo;
    const REGISTRY: &'static [ExtCodec<ServiceInfoExt>] = &[
        ExtCodec {
            id: WSI_EXT_ID_PSC,
            decode: ServiceInfoExt::read_psc,
        },
        ExtCodec {
            id: WSI_EXT_ID_IPV6_ADDRESS,
            decode: ServiceInfoExt::read_ipv6_address,
        },
        ExtCodec {
            id: WSI_EXT_ID_SERVICE_PORT,
            decode: ServiceInfoExt::read_service_port,
        },
        ExtCodec {
            id: WSI_EXT_ID_PROVIDER_MAC_ADDR,
            decode: ServiceInfoExt::read_provider_mac_addr,
        },
        ExtCodec {
            id: WSI_EXT_ID_RCPI_THRESHOLD,
            decode: ServiceInfoExt::read_rcpi_threshold,
        },
        ExtCodec {
            id: WSI_EXT_ID_WSA_COUNT_THRESHOLD,
            decode: ServiceInfoExt::read_wsa_count_threshold,
        },
        ExtCodec {
            id: WSI_EXT_ID_WSA_COUNT_THRESHOLD_INTERVAL,
            decode: ServiceInfoExt::read_wsa_count_threshold_interval,
        },
    ];

    fn id(&self) -> u8 {
        use ServiceInfoExt::*;
        match self {
            Psc(_) => WSI_EXT_ID_PSC,
            Ipv6Address(_) => WSI_EXT_ID_IPV6_ADDRESS,
            ServicePort(_) => WSI_EXT_ID_SERVICE_PORT,
            ProviderMacAddr(_) => WSI_EXT_ID_PROVIDER_MAC_ADDR,
            RcpiThreshold(_) => WSI_EXT_ID_RCPI_THRESHOLD,
            WsaCountThreshold(_) => WSI_EXT_ID_WSA_COUNT_THRESHOLD,
            WsaCountThresholdInterval(_) => WSI_EXT_ID_WSA_COUNT_THRESHOLD_INTERVAL,
        }
    }

    fn write_value(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        use ServiceInfoExt::*;
        match self {
            Psc(psc) => {
                if psc.len() > PSC_MAX_LEN {
                    return Err(ValueError::InvalidPscLen(psc.len()));
                }
                writer.write_bits(0, 3);
                writer.write_bits(psc.len() as u64, 5);
                writer.write_octets(psc);
            }
            Ipv6Address(addr) => writer.write_octets(addr),
            ServicePort(port) => writer.write_bits(u64::from(*port), 16),
            ProviderMacAddr(addr) => writer.write_octets(addr),
            RcpiThreshold(v) | WsaCountThreshold(v) | WsaCountThresholdInterval(v) => {
                writer.write_bits(u64::from(*v), 8)
            }
        }
        Ok(())
    }
}

/// Service advertised in a WSA.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ServiceInfo {
    pub psid: u32,
    /// 1 based index of the channel info the service is offered on.
    pub channel_index: u8,
    /// Provider service context.
    pub psc: Option<Vec<u8>>,
    pub ipv6_address: Option<[u8; 16]>,
    pub service_port: Option<u16>,
    pub provider_mac_addr: Option<MacAddr>,
    /// Minimum RCPI a WSA has to be received with to make the service available.
    pub rcpi_threshold: Option<u8>,
    /// Number of WSAs that have to be received within
    /// `wsa_cnt_threshold_interval`.
    pub wsa_cnt_threshold: Option<u8>,
    /// Interval (in units of 100 ms) the `wsa_cnt_threshold` refers to.
    pub wsa_cnt_threshold_interval: Option<u8>,
}

impl ServiceInfo {
    /// Service info without any optional fields.
    pub fn new(psid: u32, channel_index: u8) -> ServiceInfo {
        ServiceInfo {
            psid,
            channel_index,
            psc: None,
            ipv6_address: None,
            service_port: None,
            provider_mac_addr: None,
            rcpi_threshold: None,
            wsa_cnt_threshold: None,
            wsa_cnt_threshold_interval: None,
        }
    }

    /// Checks that all values are in their allowed ranges.
    pub fn validate(&self) -> Result<(), ValueError> {
        use ValueError::*;
        if !validate::is_valid_psid(self.psid) {
            return Err(InvalidPsid(self.psid));
        }
        if !validate::is_valid_channel_index(self.channel_index) {
            return Err(InvalidChannelIndex(self.channel_index));
        }
        if let Some(psc) = &self.psc {
            if !validate::is_valid_psc_len(psc.len()) {
                return Err(InvalidPscLen(psc.len()));
            }
        }
        if let Some(v) = self.rcpi_threshold {
            if !validate::is_valid_rcpi_threshold(v) {
                return Err(InvalidRcpiThreshold(v));
            }
        }
        if let Some(v) = self.wsa_cnt_threshold {
            if !validate::is_valid_wsa_count_threshold(v) {
                return Err(InvalidWsaCountThreshold(v));
            }
        }
        if let Some(v) = self.wsa_cnt_threshold_interval {
            if !validate::is_valid_wsa_count_threshold_interval(v) {
                return Err(InvalidWsaCountThresholdInterval(v));
            }
        }
        Ok(())
    }

    fn extensions(&self) -> Vec<ServiceInfoExt> {
        let mut result = Vec::with_capacity(7);
        if let Some(psc) = &self.psc {
            result.push(ServiceInfoExt::Psc(psc.clone()));
        }
        if let Some(addr) = self.ipv6_address {
            result.push(ServiceInfoExt::Ipv6Address(addr));
        }
        if let Some(port) = self.service_port {
            result.push(ServiceInfoExt::ServicePort(port));
        }
        if let Some(addr) = self.provider_mac_addr {
            result.push(ServiceInfoExt::ProviderMacAddr(addr));
        }
        if let Some(v) = self.rcpi_threshold {
            result.push(ServiceInfoExt::RcpiThreshold(v));
        }
        if let Some(v) = self.wsa_cnt_threshold {
            result.push(ServiceInfoExt::WsaCountThreshold(v));
        }
        if let Some(v) = self.wsa_cnt_threshold_interval {
            result.push(ServiceInfoExt::WsaCountThresholdInterval(v));
        }
        result
    }

    pub(crate) fn write(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        let exts = self.extensions();
        write_psid(writer, self.psid)?;
        writer.write_bits(u64::from(self.channel_index), 5);
        writer.write_bit(!exts.is_empty());
        if !exts.is_empty() {
            write_extensions(writer, &exts)?;
        }
        Ok(())
    }

    /// Reads a service info without checking the value ranges (see
    /// [`ServiceInfo::validate`]).
    pub(crate) fn read(reader: &mut BitReader) -> Result<ServiceInfo, Dot3Error> {
        reader.set_layer(Layer::ServiceInfo);
        let psid = read_psid(reader)?;
        let channel_index = reader.read_bits(5)? as u8;
        let mut result = ServiceInfo::new(psid, channel_index);
        if reader.read_bit()? {
            for ext in read_extensions::<ServiceInfoExt>(reader)? {
                use ServiceInfoExt::*;
                match ext {
                    Psc(psc) => result.psc = Some(psc),
                    Ipv6Address(addr) => result.ipv6_address = Some(addr),
                    ServicePort(port) => result.service_port = Some(port),
                    ProviderMacAddr(addr) => result.provider_mac_addr = Some(addr),
                    RcpiThreshold(v) => result.rcpi_threshold = Some(v),
                    WsaCountThreshold(v) => result.wsa_cnt_threshold = Some(v),
                    WsaCountThresholdInterval(v) => result.wsa_cnt_threshold_interval = Some(v),
                }
            }
        }
        Ok(result)
    }
}
