use crate::err::{Dot3Error, TableError, ValueError};
use crate::*;

/// Security processing a received WSA passed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum WsaType {
    Secured,
    Unsecured,
}

/// Channel identified by its operating class & channel number.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LteChannel {
    pub operating_class: u8,
    pub chan_num: u8,
}

/// User service request, the services a user is interested in.
///
/// A received WSA service info matches the request if the PSID and the WSA
/// type are equal and every present criterion is met.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Dot3Usr {
    pub psid: u32,
    pub wsa_type: WsaType,
    /// Required provider service context.
    pub psc: Option<Vec<u8>>,
    /// Required MAC address of the WSA sender.
    pub src_mac_addr: Option<MacAddr>,
    /// Required advertiser id of the WSA.
    pub advertiser_id: Option<String>,
    /// Required channel number of the service.
    pub chan_num: Option<u8>,
    /// Required operating class & channel number of the service.
    pub lte_channel: Option<LteChannel>,
}

impl Dot3Usr {
    /// Request only matching on PSID & WSA type.
    pub fn new(psid: u32, wsa_type: WsaType) -> Dot3Usr {
        Dot3Usr {
            psid,
            wsa_type,
            psc: None,
            src_mac_addr: None,
            advertiser_id: None,
            chan_num: None,
            lte_channel: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValueError> {
        if !validate::is_valid_psid(self.psid) {
            return Err(ValueError::InvalidPsid(self.psid));
        }
        if let Some(psc) = &self.psc {
            if !validate::is_valid_psc_len(psc.len()) {
                return Err(ValueError::InvalidPscLen(psc.len()));
            }
        }
        if let Some(id) = &self.advertiser_id {
            if !validate::is_valid_advertiser_id_len(id.len()) {
                return Err(ValueError::InvalidAdvertiserIdLen(id.len()));
            }
        }
        if let Some(chan_num) = self.chan_num {
            if !validate::is_valid_channel_number(chan_num) {
                return Err(ValueError::InvalidChannelNumber(chan_num));
            }
        }
        if let Some(lte) = &self.lte_channel {
            if !validate::is_valid_channel_number(lte.chan_num) {
                return Err(ValueError::InvalidChannelNumber(lte.chan_num));
            }
        }
        Ok(())
    }

    /// Returns true if the service info (received in a WSA with the given
    /// header & channel info) satisfies the request.
    pub fn matches(
        &self,
        src_mac_addr: &MacAddr,
        wsa_type: WsaType,
        header: &WsaHeader,
        wsi: &ServiceInfo,
        wci: &ChannelInfo,
    ) -> bool {
        fn criterion<T: PartialEq>(required: &Option<T>, actual: Option<&T>) -> bool {
            match required {
                None => true,
                Some(required) => Some(required) == actual,
            }
        }

        self.psid == wsi.psid
            && self.wsa_type == wsa_type
            && criterion(&self.psc, wsi.psc.as_ref())
            && criterion(&self.src_mac_addr, Some(src_mac_addr))
            && criterion(&self.advertiser_id, header.advertiser_id.as_ref())
            && criterion(&self.chan_num, Some(&wci.chan_num))
            && criterion(
                &self.lte_channel,
                Some(&LteChannel {
                    operating_class: wci.operating_class,
                    chan_num: wci.chan_num,
                }),
            )
    }
}

/// User service requests in insertion order, unique by PSID.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct UsrTable {
    entries: Vec<Dot3Usr>,
}

impl UsrTable {
    pub fn new() -> UsrTable {
        UsrTable {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Dot3Usr> {
        self.entries.iter()
    }

    /// Adds a request. Returns the new number of entries.
    pub fn add(&mut self, usr: Dot3Usr) -> Result<usize, Dot3Error> {
        usr.validate()?;
        if self.entries.iter().any(|e| e.psid == usr.psid) {
            return Err(TableError::DuplicatedUsr(usr.psid).into());
        }
        if self.entries.len() >= USR_NUM_MAX {
            return Err(TableError::UsrTableFull.into());
        }
        self.entries.push(usr);
        Ok(self.entries.len())
    }

    /// Removes the request with the given PSID. Returns the remaining
    /// number of entries.
    pub fn delete(&mut self, psid: u32) -> Result<usize, Dot3Error> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.psid == psid)
            .ok_or(TableError::NoSuchUsr(psid))?;
        self.entries.remove(idx);
        Ok(self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
