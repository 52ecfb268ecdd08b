use crate::err::{Dot3Error, TableError, ValueError};
use crate::pci::PciTable;
use crate::*;

/// IPv6 address & port a service is reachable at.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct IpService {
    pub ipv6_address: [u8; 16],
    pub service_port: u16,
}

/// Provider service request, a service a provider wants to advertise
/// in its WSAs.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Dot3Psr {
    /// WSA the service is advertised in.
    pub wsa_id: u8,
    pub psid: u32,
    /// Channel the service is offered on (must be present in the PCI table).
    pub service_chan_num: u8,
    /// Provider service context.
    pub psc: Option<Vec<u8>>,
    pub ip_service: Option<IpService>,
    pub provider_mac_addr: Option<MacAddr>,
    pub rcpi_threshold: Option<u8>,
    pub wsa_cnt_threshold: Option<u8>,
    pub wsa_cnt_threshold_interval: Option<u8>,
}

impl Dot3Psr {
    /// Request without optional fields.
    pub fn new(wsa_id: u8, psid: u32, service_chan_num: u8) -> Dot3Psr {
        Dot3Psr {
            wsa_id,
            psid,
            service_chan_num,
            psc: None,
            ip_service: None,
            provider_mac_addr: None,
            rcpi_threshold: None,
            wsa_cnt_threshold: None,
            wsa_cnt_threshold_interval: None,
        }
    }

    /// Checks that all values are in their allowed ranges.
    pub fn validate(&self) -> Result<(), ValueError> {
        if !validate::is_valid_wsa_id(self.wsa_id) {
            return Err(ValueError::InvalidWsaId(self.wsa_id));
        }
        if !validate::is_valid_channel_number(self.service_chan_num) {
            return Err(ValueError::InvalidChannelNumber(self.service_chan_num));
        }
        // channel index 1 is only a placeholder, it is always valid
        self.to_service_info(1).validate()
    }

    /// Number of optional fields that are present.
    pub(crate) fn option_cnt(&self) -> usize {
        [
            self.psc.is_some(),
            self.ip_service.is_some(),
            self.provider_mac_addr.is_some(),
            self.rcpi_threshold.is_some(),
            self.wsa_cnt_threshold.is_some(),
            self.wsa_cnt_threshold_interval.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Service info advertising the request on the given channel info.
    pub fn to_service_info(&self, channel_index: u8) -> ServiceInfo {
        ServiceInfo {
            psid: self.psid,
            channel_index,
            psc: self.psc.clone(),
            ipv6_address: self.ip_service.as_ref().map(|s| s.ipv6_address),
            service_port: self.ip_service.as_ref().map(|s| s.service_port),
            provider_mac_addr: self.provider_mac_addr,
            rcpi_threshold: self.rcpi_threshold,
            wsa_cnt_threshold: self.wsa_cnt_threshold,
            wsa_cnt_threshold_interval: self.wsa_cnt_threshold_interval,
        }
    }
}

/// Provider service requests in insertion order, unique by PSID.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PsrTable {
    entries: Vec<Dot3Psr>,
}

impl PsrTable {
    pub fn new() -> PsrTable {
        PsrTable {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Dot3Psr> {
        self.entries.iter()
    }

    pub fn get(&self, psid: u32) -> Option<&Dot3Psr> {
        self.entries.iter().find(|psr| psr.psid == psid)
    }

    /// Adds a request after checking its values and that the PCI table
    /// contains its channel. Returns the new number of entries.
    pub fn add(&mut self, psr: Dot3Psr, pci: &PciTable) -> Result<usize, Dot3Error> {
        psr.validate()?;
        if self.get(psr.psid).is_some() {
            return Err(TableError::DuplicatedPsr(psr.psid).into());
        }
        if self.entries.len() >= PSR_NUM_MAX {
            return Err(TableError::PsrTableFull.into());
        }
        if pci.get(psr.service_chan_num).is_none() {
            return Err(TableError::NoRelatedChannelInfo(psr.service_chan_num).into());
        }
        self.entries.push(psr);
        Ok(self.entries.len())
    }

    /// Removes the request with the given PSID. Returns the remaining
    /// number of entries.
    pub fn delete(&mut self, psid: u32) -> Result<usize, Dot3Error> {
        let idx = self
            .entries
            .iter()
            .position(|psr| psr.psid == psid)
            .ok_or(TableError::NoSuchPsr(psid))?;
        self.entries.remove(idx);
        Ok(self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the provider service context of a request.
    pub fn change_psc(&mut self, psid: u32, psc: Option<Vec<u8>>) -> Result<(), Dot3Error> {
        if let Some(psc) = &psc {
            if !validate::is_valid_psc_len(psc.len()) {
                return Err(ValueError::InvalidPscLen(psc.len()).into());
            }
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|psr| psr.psid == psid)
            .ok_or(TableError::NoSuchPsr(psid))?;
        entry.psc = psc;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::*;

    #[test]
    fn option_cnt() {
        let mut psr = Dot3Psr::new(1, 0x20, 172);
        assert_eq!(0, psr.option_cnt());
        psr.psc = Some(b"psc".to_vec());
        psr.ip_service = Some(IpService {
            ipv6_address: [0; 16],
            service_port: 1234,
        });
        psr.wsa_cnt_threshold = Some(3);
        assert_eq!(3, psr.option_cnt());
    }

    #[test]
    fn to_service_info() {
        let psr = Dot3Psr {
            ip_service: Some(IpService {
                ipv6_address: [1; 16],
                service_port: 80,
            }),
            rcpi_threshold: Some(100),
            ..Dot3Psr::new(1, 0x20, 172)
        };
        let wsi = psr.to_service_info(3);
        assert_eq!(3, wsi.channel_index);
        assert_eq!(Some([1; 16]), wsi.ipv6_address);
        assert_eq!(Some(80), wsi.service_port);
        assert_eq!(Some(100), wsi.rcpi_threshold);
    }

    #[test]
    fn add_delete() {
        let pci = PciTable::with_defaults();
        let mut table = PsrTable::new();
        assert_eq!(1, table.add(Dot3Psr::new(1, 0x20, 172), &pci).unwrap());
        assert_eq!(2, table.add(Dot3Psr::new(1, 0x21, 178), &pci).unwrap());
        assert_matches!(
            table.add(Dot3Psr::new(2, 0x20, 172), &pci),
            Err(Dot3Error::Table(TableError::DuplicatedPsr(0x20)))
        );
        assert_matches!(
            table.add(Dot3Psr::new(1, 0x22, 190), &pci),
            Err(Dot3Error::Table(TableError::NoRelatedChannelInfo(190)))
        );
        assert_matches!(
            table.add(Dot3Psr::new(16, 0x22, 172), &pci),
            Err(Dot3Error::Value(ValueError::InvalidWsaId(16)))
        );
        assert_matches!(
            table.add(Dot3Psr::new(1, PSID_MAX + 1, 172), &pci),
            Err(Dot3Error::Value(ValueError::InvalidPsid(_)))
        );
        assert_eq!(1, table.delete(0x20).unwrap());
        assert_matches!(
            table.delete(0x20),
            Err(Dot3Error::Table(TableError::NoSuchPsr(0x20)))
        );
        assert_eq!(Some(&Dot3Psr::new(1, 0x21, 178)), table.get(0x21));
    }

    #[test]
    fn full() {
        let pci = PciTable::with_defaults();
        let mut table = PsrTable::new();
        for psid in 0..PSR_NUM_MAX as u32 {
            table.add(Dot3Psr::new(0, psid, 172), &pci).unwrap();
        }
        assert_matches!(
            table.add(Dot3Psr::new(0, 1000, 172), &pci),
            Err(Dot3Error::Table(TableError::PsrTableFull))
        );
        table.clear();
        assert_eq!(0, table.len());
    }

    #[test]
    fn change_psc() {
        let pci = PciTable::with_defaults();
        let mut table = PsrTable::new();
        table.add(Dot3Psr::new(1, 0x20, 172), &pci).unwrap();
        table.change_psc(0x20, Some(b"new".to_vec())).unwrap();
        assert_eq!(Some(b"new".to_vec()), table.get(0x20).unwrap().psc);
        assert_matches!(
            table.change_psc(0x20, Some(vec![0; 32])),
            Err(Dot3Error::Value(ValueError::InvalidPscLen(32)))
        );
        assert_matches!(
            table.change_psc(0x21, None),
            Err(Dot3Error::Table(TableError::NoSuchPsr(0x21)))
        );
    }
}
