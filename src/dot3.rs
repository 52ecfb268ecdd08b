use crate::err::{Dot3Error, TableError, ValueError};
use crate::pci::PciTable;
use crate::psr::PsrTable;
use crate::uas::{ReceivedService, UasTable};
use crate::uas_mgmt::UasMgmt;
use crate::usr::UsrTable;
use crate::wsr::WsrTable;
use crate::*;
use log::{debug, info, trace, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Provider side tables (locked together).
#[derive(Debug, Default)]
pub(crate) struct ProviderInfo {
    pub psr: PsrTable,
    pub pci: PciTable,
}

impl ProviderInfo {
    /// Service infos & channel infos for all requests with the given WSA id.
    /// Channel infos are shared between services on the same channel.
    fn service_lists(
        &self,
        wsa_id: u8,
    ) -> Result<(Vec<ServiceInfo>, Vec<ChannelInfo>), Dot3Error> {
        let mut wsis: Vec<ServiceInfo> = Vec::new();
        let mut wcis: Vec<ChannelInfo> = Vec::new();
        for psr in self.psr.iter().filter(|psr| psr.wsa_id == wsa_id) {
            if wsis.len() >= WSI_NUM_MAX {
                debug!("WSA {} reached the service info limit", wsa_id);
                break;
            }
            let pci = self
                .pci
                .get(psr.service_chan_num)
                .ok_or(TableError::NoRelatedChannelInfo(psr.service_chan_num))?;
            let idx = match wcis.iter().position(|wci| wci.chan_num == pci.chan_num) {
                Some(idx) => idx,
                None => {
                    if wcis.len() >= WCI_NUM_MAX {
                        debug!("WSA {} reached the channel info limit", wsa_id);
                        break;
                    }
                    wcis.push(pci.clone());
                    wcis.len() - 1
                }
            };
            trace!(
                "WSA {}: PSID 0x{:x} on channel {} with {} option(s)",
                wsa_id,
                psr.psid,
                pci.chan_num,
                psr.option_cnt()
            );
            // idx < WCI_NUM_MAX (31) so the 1 based index fits into u8
            wsis.push(psr.to_service_info(idx as u8 + 1));
        }
        Ok((wsis, wcis))
    }
}

/// User side tables (locked together).
#[derive(Debug, Default)]
pub(crate) struct UserInfo {
    pub usr: UsrTable,
    pub uas: UasTable,
}

impl UserInfo {
    pub fn new() -> UserInfo {
        UserInfo {
            usr: UsrTable::new(),
            uas: UasTable::new(),
        }
    }
}

/// Parameters for constructing a WSA from the provider tables.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WsaConstructParams {
    /// Header of the WSA. The services advertised are all provider service
    /// requests with `header.wsa_id`.
    pub header: WsaHeader,
    pub routing_advertisement: Option<RoutingAdvertisement>,
}

/// WAVE networking services context (service tables, configuration &
/// UAS management).
///
/// All methods take `&self` and can be called from multiple threads at
/// the same time (e.g. by sharing the context in an [`Arc`]). The WSR
/// table, the provider tables (PSR & PCI) and the user tables (USR & UAS)
/// are each protected by their own lock. No method holds more then one
/// of these locks at a time.
///
/// # Example
///
/// ```
/// use dot3::*;
///
/// let dot3 = Dot3::new(Dot3Config::default());
/// dot3.add_wsr(&Dot3Wsr { psid: 32 }).unwrap();
///
/// let wsm = dot3.construct_wsm(&WsmParams::new(32), &[1, 2, 3]).unwrap();
/// let (slice, interested) = dot3.parse_wsm(&wsm).unwrap();
/// assert_eq!(32, slice.psid());
/// assert_eq!(&[1, 2, 3], slice.payload());
/// assert!(interested);
/// ```
#[derive(Debug)]
pub struct Dot3 {
    config: Dot3Config,
    wsm_max_len: AtomicUsize,
    wsr: Mutex<WsrTable>,
    provider: Mutex<ProviderInfo>,
    user: Arc<Mutex<UserInfo>>,
    uas_mgmt: Mutex<Option<UasMgmt>>,
}

impl Dot3 {
    pub fn new(config: Dot3Config) -> Dot3 {
        let pci = if config.populate_default_pci {
            PciTable::with_defaults()
        } else {
            PciTable::new()
        };
        info!(
            "dot3 initialized (wsm max len {}, {} PCI entries)",
            config.wsm_max_len(),
            pci.len()
        );
        Dot3 {
            wsm_max_len: AtomicUsize::new(config.wsm_max_len()),
            config,
            wsr: Mutex::new(WsrTable::new()),
            provider: Mutex::new(ProviderInfo {
                psr: PsrTable::new(),
                pci,
            }),
            user: Arc::new(Mutex::new(UserInfo::new())),
            uas_mgmt: Mutex::new(None),
        }
    }

    /// Configuration the context was created with.
    #[inline]
    pub fn config(&self) -> &Dot3Config {
        &self.config
    }

    /// Current maximum length of constructed WSMs.
    #[inline]
    pub fn wsm_max_len(&self) -> usize {
        self.wsm_max_len.load(Ordering::Relaxed)
    }

    pub fn set_wsm_max_len(&self, len: usize) -> Result<(), ValueError> {
        if !validate::is_valid_wsm_max_len(len) {
            return Err(ValueError::InvalidWsmMaxLen(len));
        }
        self.wsm_max_len.store(len, Ordering::Relaxed);
        debug!("wsm max len set to {}", len);
        Ok(())
    }

    // WSM

    /// Encodes a WSM limited to the configured maximum length.
    pub fn construct_wsm(&self, params: &WsmParams, payload: &[u8]) -> Result<Vec<u8>, Dot3Error> {
        let wsm = params.to_bytes(payload, self.wsm_max_len())?;
        trace!("constructed WSM (psid {}, {} bytes)", params.psid, wsm.len());
        Ok(wsm)
    }

    /// Encodes a WSM & wraps it into an MPDU.
    pub fn construct_wsm_mpdu(
        &self,
        mac_params: &MacParams,
        params: &WsmParams,
        payload: &[u8],
    ) -> Result<Vec<u8>, Dot3Error> {
        // check the MAC parameters before encoding anything
        mac_params.validate()?;
        let wsm = self.construct_wsm(params, payload)?;
        Ok(mac_params.to_mpdu_bytes(&wsm)?)
    }

    /// Decodes a WSM. The returned flag is set if a WSR with the PSID of
    /// the WSM is registered.
    pub fn parse_wsm<'a>(&self, wsm: &'a [u8]) -> Result<(WsmSlice<'a>, bool), Dot3Error> {
        let slice = WsmSlice::from_slice(wsm)?;
        let interested = self.wsr.lock().contains(slice.psid());
        trace!(
            "parsed WSM (psid {}, {} byte payload, interested {})",
            slice.psid(),
            slice.payload().len(),
            interested
        );
        Ok((slice, interested))
    }

    /// Decodes an MPDU & the WSM contained in it.
    pub fn parse_wsm_mpdu<'a>(
        &self,
        mpdu: &'a [u8],
    ) -> Result<(MacParams, WsmSlice<'a>, bool), Dot3Error> {
        let mpdu = MpduSlice::from_slice(mpdu)?;
        let (wsm, interested) = self.parse_wsm(mpdu.wsm())?;
        Ok((mpdu.params().clone(), wsm, interested))
    }

    // WSR

    /// Registers interest in WSMs with the PSID. Returns the number of WSRs.
    pub fn add_wsr(&self, wsr: &Dot3Wsr) -> Result<usize, Dot3Error> {
        let result = self.wsr.lock().add(wsr);
        if let Err(err) = &result {
            warn!("failed to add WSR (psid {}): {}", wsr.psid, err);
        }
        result
    }

    /// Removes a WSR. Returns the remaining number of WSRs.
    pub fn delete_wsr(&self, psid: u32) -> Result<usize, Dot3Error> {
        self.wsr.lock().delete(psid)
    }

    pub fn delete_all_wsrs(&self) {
        self.wsr.lock().clear();
    }

    pub fn get_wsr(&self, psid: u32) -> Option<Dot3Wsr> {
        if self.wsr.lock().contains(psid) {
            Some(Dot3Wsr { psid })
        } else {
            None
        }
    }

    pub fn get_wsr_num(&self) -> usize {
        self.wsr.lock().len()
    }

    // PCI

    /// Adds a provider channel info or updates the one with the same channel.
    pub fn set_pci(&self, pci: Dot3Pci) -> Result<(), Dot3Error> {
        let chan_num = pci.chan_num;
        let result = self.provider.lock().pci.set(pci);
        match &result {
            Ok(()) => debug!("set PCI for channel {}", chan_num),
            Err(err) => warn!("failed to set PCI for channel {}: {}", chan_num, err),
        }
        result
    }

    pub fn get_pci(&self, chan_num: u8) -> Option<Dot3Pci> {
        self.provider.lock().pci.get(chan_num).cloned()
    }

    pub fn get_pci_num(&self) -> usize {
        self.provider.lock().pci.len()
    }

    // PSR

    /// Adds a provider service request. The PCI table must contain the
    /// channel of the request. Returns the number of PSRs.
    pub fn add_psr(&self, psr: Dot3Psr) -> Result<usize, Dot3Error> {
        let psid = psr.psid;
        let mut provider = self.provider.lock();
        let ProviderInfo { psr: psrs, pci } = &mut *provider;
        let result = psrs.add(psr, pci);
        match &result {
            Ok(num) => debug!("added PSR (psid {}), {} PSRs", psid, num),
            Err(err) => warn!("failed to add PSR (psid {}): {}", psid, err),
        }
        result
    }

    /// Removes a PSR. Returns the remaining number of PSRs.
    pub fn delete_psr(&self, psid: u32) -> Result<usize, Dot3Error> {
        self.provider.lock().psr.delete(psid)
    }

    pub fn delete_all_psrs(&self) {
        self.provider.lock().psr.clear();
    }

    /// Replaces the provider service context of a PSR.
    pub fn change_psr(&self, psid: u32, psc: Option<Vec<u8>>) -> Result<(), Dot3Error> {
        self.provider.lock().psr.change_psc(psid, psc)
    }

    pub fn get_psr(&self, psid: u32) -> Option<Dot3Psr> {
        self.provider.lock().psr.get(psid).cloned()
    }

    pub fn get_all_psrs(&self) -> Vec<Dot3Psr> {
        self.provider.lock().psr.iter().cloned().collect()
    }

    pub fn get_psr_num(&self) -> usize {
        self.provider.lock().psr.len()
    }

    // WSA

    /// Encodes a WSA advertising all PSRs with the WSA id of the header.
    pub fn construct_wsa(&self, params: &WsaConstructParams) -> Result<Vec<u8>, Dot3Error> {
        params.header.validate()?;
        if let Some(wra) = &params.routing_advertisement {
            wra.validate()?;
        }
        let (service_infos, channel_infos) =
            self.provider.lock().service_lists(params.header.wsa_id)?;
        let wsa = Wsa {
            header: params.header.clone(),
            service_infos,
            channel_infos,
            routing_advertisement: params.routing_advertisement.clone(),
        };
        let bytes = wsa.to_bytes()?;
        debug!(
            "constructed WSA (wsa id {}, {} services, {} channels, {} bytes)",
            wsa.header.wsa_id,
            wsa.service_infos.len(),
            wsa.channel_infos.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Decodes a WSA (see [`Wsa::from_slice`]).
    pub fn parse_wsa(&self, wsa: &[u8]) -> Result<Wsa, Dot3Error> {
        Wsa::from_slice(wsa)
    }

    /// Decodes a received WSA and adds or updates a UAS for every service
    /// a USR is interested in.
    ///
    /// Invalid service infos or channel infos are skipped without
    /// affecting the other services in the WSA.
    pub fn process_wsa(&self, wsa_bytes: &[u8], rx: &WsaRxParams) -> Result<(), Dot3Error> {
        rx.validate()?;
        let wsa = Wsa::from_slice(wsa_bytes)?;
        let now = Instant::now();
        let expiry = self.config.uas_expiry();

        let mut user = self.user.lock();
        let UserInfo { usr, uas } = &mut *user;
        for wsi in &wsa.service_infos {
            if let Err(err) = wsi.validate() {
                warn!("skipping invalid WSA service info (psid {}): {}", wsi.psid, err);
                continue;
            }
            let wci = match wsa.channel_info_for(wsi) {
                Some(wci) => wci,
                None => {
                    warn!(
                        "skipping WSA service info (psid {}), channel index {} has no channel info",
                        wsi.psid, wsi.channel_index
                    );
                    continue;
                }
            };
            if let Err(err) = wci.validate() {
                warn!(
                    "skipping WSA service info (psid {}) with invalid channel info: {}",
                    wsi.psid, err
                );
                continue;
            }
            let requested = usr
                .iter()
                .any(|usr| usr.matches(&rx.src_mac_addr, rx.wsa_type, &wsa.header, wsi, wci));
            if !requested {
                trace!("no USR for WSA service (psid {})", wsi.psid);
                continue;
            }
            let received = ReceivedService {
                wsa: wsa_bytes,
                rx,
                header: &wsa.header,
                wsi,
                wci,
                wra: wsa.routing_advertisement.as_ref(),
            };
            if let Err(err) = uas.add_or_update(&received, now, expiry) {
                warn!("failed to add UAS (psid {}): {}", wsi.psid, err);
            }
        }
        Ok(())
    }

    // USR

    /// Adds a user service request. Returns the number of USRs.
    pub fn add_usr(&self, usr: Dot3Usr) -> Result<usize, Dot3Error> {
        let psid = usr.psid;
        let result = self.user.lock().usr.add(usr);
        if let Err(err) = &result {
            warn!("failed to add USR (psid {}): {}", psid, err);
        }
        result
    }

    /// Removes a USR. Returns the remaining number of USRs.
    pub fn delete_usr(&self, psid: u32) -> Result<usize, Dot3Error> {
        self.user.lock().usr.delete(psid)
    }

    pub fn delete_all_usrs(&self) {
        self.user.lock().usr.clear();
    }

    pub fn get_usr(&self, psid: u32) -> Option<Dot3Usr> {
        self.user.lock().usr.iter().find(|usr| usr.psid == psid).cloned()
    }

    pub fn get_usr_num(&self) -> usize {
        self.user.lock().usr.len()
    }

    // UAS

    fn uass_filtered<F: Fn(&Dot3Uas) -> bool>(&self, filter: F) -> Vec<Dot3Uas> {
        self.user.lock().uas.iter().filter(|uas| filter(uas)).cloned().collect()
    }

    pub fn get_all_uass(&self) -> Vec<Dot3Uas> {
        self.uass_filtered(|_| true)
    }

    pub fn get_uass_with_psid(&self, psid: u32) -> Vec<Dot3Uas> {
        self.uass_filtered(|uas| uas.psid() == psid)
    }

    pub fn get_uass_with_src_mac(&self, src_mac_addr: &MacAddr) -> Vec<Dot3Uas> {
        self.uass_filtered(|uas| &uas.src_mac_addr == src_mac_addr)
    }

    pub fn get_uass_with_psid_and_src_mac(
        &self,
        psid: u32,
        src_mac_addr: &MacAddr,
    ) -> Vec<Dot3Uas> {
        self.uass_filtered(|uas| uas.psid() == psid && &uas.src_mac_addr == src_mac_addr)
    }

    /// Returns the UAS received with the highest RCPI (the first one
    /// if multiple share it).
    pub fn get_uas_with_max_rcpi(&self) -> Option<Dot3Uas> {
        let user = self.user.lock();
        let mut best: Option<&Dot3Uas> = None;
        for uas in user.uas.iter() {
            if best.map_or(true, |b| uas.rcpi > b.rcpi) {
                best = Some(uas);
            }
        }
        best.cloned()
    }

    pub fn delete_all_uass(&self) {
        self.user.lock().uas.clear();
    }

    pub fn get_uas_num(&self) -> usize {
        self.user.lock().uas.len()
    }

    /// Starts the periodic UAS management (expiry & WSA count threshold
    /// evaluation) every `interval` x 100 ms.
    pub fn start_uas_management(&self, interval: u32) -> Result<(), Dot3Error> {
        if !validate::is_valid_uas_mgmt_interval(interval) {
            return Err(ValueError::InvalidUasMgmtInterval(interval).into());
        }
        let mut mgmt = self.uas_mgmt.lock();
        if mgmt.is_some() {
            return Err(Dot3Error::UasMgmtAlreadyRunning);
        }
        *mgmt = Some(UasMgmt::start(self.user.clone(), interval)?);
        info!("UAS management started (interval {} x 100ms)", interval);
        Ok(())
    }

    /// Stops the UAS management & waits for the worker to finish. Does
    /// nothing if the management is not running.
    pub fn stop_uas_management(&self) {
        let mgmt = self.uas_mgmt.lock().take();
        if let Some(mgmt) = mgmt {
            mgmt.stop();
            info!("UAS management stopped");
        }
    }

    #[inline]
    pub fn is_uas_management_running(&self) -> bool {
        self.uas_mgmt.lock().is_some()
    }

    /// Stops the UAS management & clears all tables (including the PCI table).
    pub fn release(&self) {
        self.stop_uas_management();
        self.wsr.lock().clear();
        {
            let mut provider = self.provider.lock();
            provider.psr.clear();
            provider.pci.clear();
        }
        {
            let mut user = self.user.lock();
            user.usr.clear();
            user.uas.clear();
        }
        info!("dot3 released");
    }
}

impl Default for Dot3 {
    fn default() -> Self {
        Dot3::new(Dot3Config::default())
    }
}
