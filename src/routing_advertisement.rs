use crate::err::{Dot3Error, Layer, ValueError};
use crate::extension::{read_extensions, write_extensions, ExtCodec, Extension};
use crate::uper::{BitReader, BitWriter};
use crate::{validate, MacAddr};

/// Extension ids allowed in a WSA routing advertisement.
pub const WRA_EXT_ID_SECONDARY_DNS: u8 = 13;
pub const WRA_EXT_ID_GATEWAY_MAC_ADDR: u8 = 14;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum RoutingAdvertisementExt {
    SecondaryDns([u8; 16]),
    GatewayMacAddr(MacAddr),
}

impl RoutingAdvertisementExt {
    fn read_secondary_dns(r: &mut BitReader) -> Result<RoutingAdvertisementExt, Dot3Error> {
        Ok(RoutingAdvertisementExt::SecondaryDns(r.read_array::<16>()?))
    }

    fn read_gateway_mac_addr(r: &mut BitReader) -> Result<RoutingAdvertisementExt, Dot3Error> {
        Ok(RoutingAdvertisementExt::GatewayMacAddr(r.read_array::<6>()?))
    }
}

impl Extension for RoutingAdvertisementExt {
    const LAYER: Layer = Layer::RoutingAdvertisement;
    const REGISTRY: &'static [ExtCodec<RoutingAdvertisementExt>] = &[
        ExtCodec {
            id: WRA_EXT_ID_SECONDARY_DNS,
            decode: RoutingAdvertisementExt::read_secondary_dns,
        },
        ExtCodec {
            id: WRA_EXT_ID_GATEWAY_MAC_ADDR,
            decode: RoutingAdvertisementExt::read_gateway_mac_addr,
        },
    ];

    fn id(&self) -> u8 {
        match self {
            RoutingAdvertisementExt::SecondaryDns(_) => WRA_EXT_ID_SECONDARY_DNS,
            RoutingAdvertisementExt::GatewayMacAddr(_) => WRA_EXT_ID_GATEWAY_MAC_ADDR,
        }
    }

    fn write_value(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        match self {
            RoutingAdvertisementExt::SecondaryDns(addr) => writer.write_octets(addr),
            RoutingAdvertisementExt::GatewayMacAddr(addr) => writer.write_octets(addr),
        }
        Ok(())
    }
}

/// IPv6 configuration a provider advertises (WAVE routing advertisement).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RoutingAdvertisement {
    /// Seconds the default gateway stays valid.
    pub router_lifetime: u16,
    pub ip_prefix: [u8; 16],
    pub ip_prefix_len: u8,
    pub default_gateway: [u8; 16],
    pub primary_dns: [u8; 16],
    pub secondary_dns: Option<[u8; 16]>,
    pub gateway_mac_addr: Option<MacAddr>,
}

impl RoutingAdvertisement {
    pub fn validate(&self) -> Result<(), ValueError> {
        if !validate::is_valid_router_lifetime(self.router_lifetime) {
            return Err(ValueError::InvalidRouterLifetime(self.router_lifetime));
        }
        if !validate::is_valid_ipv6_prefix_len(self.ip_prefix_len) {
            return Err(ValueError::InvalidIpv6PrefixLen(self.ip_prefix_len));
        }
        Ok(())
    }

    pub(crate) fn write(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        let mut exts = Vec::with_capacity(2);
        if let Some(addr) = self.secondary_dns {
            exts.push(RoutingAdvertisementExt::SecondaryDns(addr));
        }
        if let Some(addr) = self.gateway_mac_addr {
            exts.push(RoutingAdvertisementExt::GatewayMacAddr(addr));
        }
        writer.write_bits(u64::from(self.router_lifetime), 16);
        writer.write_octets(&self.ip_prefix);
        writer.write_bits(u64::from(self.ip_prefix_len), 8);
        writer.write_octets(&self.default_gateway);
        writer.write_octets(&self.primary_dns);
        writer.write_bit(!exts.is_empty());
        if !exts.is_empty() {
            write_extensions(writer, &exts)?;
        }
        Ok(())
    }

    pub(crate) fn read(reader: &mut BitReader) -> Result<RoutingAdvertisement, Dot3Error> {
        reader.set_layer(Layer::RoutingAdvertisement);
        let router_lifetime = reader.read_bits(16)? as u16;
        let ip_prefix = reader.read_array::<16>()?;
        let ip_prefix_len = reader.read_u8()?;
        let default_gateway = reader.read_array::<16>()?;
        let primary_dns = reader.read_array::<16>()?;
        let mut result = RoutingAdvertisement {
            router_lifetime,
            ip_prefix,
            ip_prefix_len,
            default_gateway,
            primary_dns,
            secondary_dns: None,
            gateway_mac_addr: None,
        };
        if reader.read_bit()? {
            for ext in read_extensions::<RoutingAdvertisementExt>(reader)? {
                match ext {
                    RoutingAdvertisementExt::SecondaryDns(addr) => {
                        result.secondary_dns = Some(addr)
                    }
                    RoutingAdvertisementExt::GatewayMacAddr(addr) => {
                        result.gateway_mac_addr = Some(addr)
                    }
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proptest_generators::*;
    use proptest::prelude::*;

    #[test]
    fn validate() {
        let base = RoutingAdvertisement {
            router_lifetime: 1,
            ip_prefix: [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ip_prefix_len: 64,
            default_gateway: [0; 16],
            primary_dns: [0; 16],
            secondary_dns: None,
            gateway_mac_addr: None,
        };
        assert_eq!(Ok(()), base.validate());
        assert_eq!(
            Err(ValueError::InvalidRouterLifetime(0)),
            RoutingAdvertisement {
                router_lifetime: 0,
                ..base.clone()
            }
            .validate()
        );
        assert_eq!(
            Err(ValueError::InvalidIpv6PrefixLen(129)),
            RoutingAdvertisement {
                ip_prefix_len: 129,
                ..base
            }
            .validate()
        );
    }

    proptest! {
        #[test]
        fn write_read(wra in routing_advertisement_any()) {
            let mut w = BitWriter::new();
            wra.write(&mut w).unwrap();
            let bytes = w.into_bytes();
            // 2 + 16 + 1 + 16 + 16 bytes + presence bit
            prop_assert!(bytes.len() >= 52);
            let mut r = BitReader::new(&bytes, Layer::WsaHeader);
            prop_assert_eq!(wra, RoutingAdvertisement::read(&mut r).unwrap());
        }
    }
}
