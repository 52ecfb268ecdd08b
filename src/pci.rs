use crate::err::{Dot3Error, TableError};
use crate::*;

/// Provider channel info, the channel parameters a provider advertises
/// for its services.
pub type Dot3Pci = ChannelInfo;

/// Operating class of 10 MHz channels in the 5.9 GHz band.
pub const OPERATING_CLASS_10MHZ: u8 = 17;
/// Operating class of 20 MHz channels in the 5.9 GHz band.
pub const OPERATING_CLASS_20MHZ: u8 = 18;

/// Channels filled into the PCI table by default.
pub const DEFAULT_PCI_CHANNELS: core::ops::RangeInclusive<u8> = 172..=184;

/// Table of provider channel infos keyed by the channel number.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PciTable {
    entries: Vec<Dot3Pci>,
}

impl PciTable {
    pub fn new() -> PciTable {
        PciTable {
            entries: Vec::new(),
        }
    }

    /// Table containing the default channel infos (even channels
    /// 10 MHz, odd channels 20 MHz).
    pub fn with_defaults() -> PciTable {
        PciTable {
            entries: DEFAULT_PCI_CHANNELS
                .map(|chan_num| {
                    let operating_class = if 0 == chan_num % 2 {
                        OPERATING_CLASS_10MHZ
                    } else {
                        OPERATING_CLASS_20MHZ
                    };
                    ChannelInfo::new(operating_class, chan_num)
                })
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, chan_num: u8) -> Option<&Dot3Pci> {
        self.entries.iter().find(|pci| pci.chan_num == chan_num)
    }

    /// Adds the channel info or replaces the entry with the same channel number.
    pub fn set(&mut self, pci: Dot3Pci) -> Result<(), Dot3Error> {
        pci.validate()?;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.chan_num == pci.chan_num) {
            *entry = pci;
            return Ok(());
        }
        if self.entries.len() >= PCI_NUM_MAX {
            return Err(TableError::PciTableFull.into());
        }
        self.entries.push(pci);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::ValueError;
    use assert_matches::*;

    #[test]
    fn defaults() {
        let table = PciTable::with_defaults();
        assert_eq!(13, table.len());
        assert_eq!(Some(&ChannelInfo::new(17, 172)), table.get(172));
        assert_eq!(Some(&ChannelInfo::new(18, 175)), table.get(175));
        assert_eq!(20, table.get(184).unwrap().transmit_power_level);
        assert_eq!(None, table.get(171));
    }

    #[test]
    fn set_replaces() {
        let mut table = PciTable::with_defaults();
        let pci = ChannelInfo {
            transmit_power_level: 10,
            channel_access: Some(ChannelAccess::AlternatingSlot1),
            ..ChannelInfo::new(17, 178)
        };
        table.set(pci.clone()).unwrap();
        assert_eq!(13, table.len());
        assert_eq!(Some(&pci), table.get(178));
    }

    #[test]
    fn set_errors() {
        let mut table = PciTable::new();
        assert_matches!(
            table.set(ChannelInfo::new(17, 201)),
            Err(Dot3Error::Value(ValueError::InvalidChannelNumber(201)))
        );
        for chan_num in 0..PCI_NUM_MAX as u8 {
            table.set(ChannelInfo::new(17, chan_num)).unwrap();
        }
        assert_matches!(
            table.set(ChannelInfo::new(17, PCI_NUM_MAX as u8)),
            Err(Dot3Error::Table(TableError::PciTableFull))
        );
        // updating an existing entry is still possible
        table.set(ChannelInfo::new(18, 0)).unwrap();
        table.clear();
        assert_eq!(0, table.len());
    }
}
