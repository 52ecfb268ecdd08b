use crate::err::{TableError, ValueError};
use crate::*;
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Reception metadata of a WSA (provided by the lower layers & the
/// security processing).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WsaRxParams {
    pub src_mac_addr: MacAddr,
    pub wsa_type: WsaType,
    /// Received channel power indicator.
    pub rcpi: u8,
    /// Latitude of the receiver at reception time (1/10 micro degrees).
    pub tx_lat: i32,
    /// Longitude of the receiver at reception time (1/10 micro degrees).
    pub tx_lon: i32,
    /// Elevation of the receiver at reception time (decimeters).
    pub tx_elev: i32,
}

impl WsaRxParams {
    pub fn validate(&self) -> Result<(), ValueError> {
        use ValueError::*;
        if !validate::is_valid_rcpi(self.rcpi) {
            return Err(InvalidRcpi(self.rcpi));
        }
        if !validate::is_valid_latitude(self.tx_lat) {
            return Err(InvalidLatitude(self.tx_lat));
        }
        if !validate::is_valid_longitude(self.tx_lon) {
            return Err(InvalidLongitude(self.tx_lon));
        }
        if !validate::is_valid_elevation(self.tx_elev) {
            return Err(InvalidElevation(self.tx_elev));
        }
        Ok(())
    }
}

/// User available service, a service advertised in a received WSA that
/// matched a user service request.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Dot3Uas {
    pub src_mac_addr: MacAddr,
    pub wsa_type: WsaType,
    /// RCPI of the last received WSA.
    pub rcpi: u8,
    pub tx_lat: i32,
    pub tx_lon: i32,
    pub tx_elev: i32,
    /// Header of the last received WSA.
    pub header: WsaHeader,
    pub service_info: ServiceInfo,
    pub channel_info: ChannelInfo,
    pub routing_advertisement: Option<RoutingAdvertisement>,
    /// Set if the service currently fulfills its RCPI & WSA count thresholds.
    pub available: bool,
}

impl Dot3Uas {
    #[inline]
    pub fn psid(&self) -> u32 {
        self.service_info.psid
    }

    #[inline]
    pub fn wsa_id(&self) -> u8 {
        self.header.wsa_id
    }

    fn rcpi_ok(&self) -> bool {
        self.service_info
            .rcpi_threshold
            .map_or(true, |threshold| self.rcpi >= threshold)
    }
}

/// The part of a received WSA that is stored in a UAS entry.
pub(crate) struct ReceivedService<'a> {
    /// Complete encoded WSA (used to detect repetitions).
    pub wsa: &'a [u8],
    pub rx: &'a WsaRxParams,
    pub header: &'a WsaHeader,
    pub wsi: &'a ServiceInfo,
    pub wci: &'a ChannelInfo,
    pub wra: Option<&'a RoutingAdvertisement>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct UasEntry {
    uas: Dot3Uas,
    /// Encoded WSA the entry was last updated from.
    wsa: Vec<u8>,
    /// Set if the service info defines a WSA count threshold & interval.
    check_rx_cnt: bool,
    /// WSAs received in the current measuring interval.
    rx_cnt: u32,
    /// Time passed in the current measuring interval (100 ms units).
    elapsed: u32,
    expiry: Instant,
}

impl UasEntry {
    /// Counts the reception of a WSA. The counter & the measuring
    /// interval restart if the content of the WSA changed.
    fn count_rx(&mut self, wsa: &[u8]) {
        if self.wsa == wsa {
            self.rx_cnt = self.rx_cnt.saturating_add(1);
        } else {
            self.rx_cnt = 1;
            self.elapsed = 0;
            self.wsa = wsa.to_vec();
        }
    }

    fn update_availability(&mut self) {
        if !self.check_rx_cnt {
            self.uas.available = self.uas.rcpi_ok();
        }
    }

    /// Advances the measuring interval & decides on the availability if
    /// the interval is complete.
    fn tick(&mut self, units: u32) {
        if !self.check_rx_cnt {
            return;
        }
        let (threshold, interval) = match (
            self.uas.service_info.wsa_cnt_threshold,
            self.uas.service_info.wsa_cnt_threshold_interval,
        ) {
            (Some(threshold), Some(interval)) => (u64::from(threshold), u64::from(interval)),
            _ => return,
        };
        self.elapsed = self.elapsed.saturating_add(units);
        if u64::from(self.elapsed) >= interval {
            // received rate (rx_cnt / elapsed) >= required rate (threshold / interval)
            let rate_ok = u64::from(self.rx_cnt) * interval >= threshold * u64::from(self.elapsed);
            self.uas.available = rate_ok && self.uas.rcpi_ok();
            trace!(
                "UAS psid {} rx count {} in {} x 100ms: available {}",
                self.uas.psid(),
                self.rx_cnt,
                self.elapsed,
                self.uas.available
            );
            self.rx_cnt = 0;
            self.elapsed = 0;
        }
    }
}

/// Table of user available services keyed by (sender MAC address, WSA id, PSID).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct UasTable {
    entries: Vec<UasEntry>,
}

impl UasTable {
    pub fn new() -> UasTable {
        UasTable {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dot3Uas> {
        self.entries.iter().map(|e| &e.uas)
    }

    /// Creates or updates the entry for the received service.
    pub fn add_or_update(
        &mut self,
        received: &ReceivedService,
        now: Instant,
        expiry: Duration,
    ) -> Result<(), TableError> {
        let rx = received.rx;
        let check_rx_cnt = received.wsi.wsa_cnt_threshold.is_some()
            && received.wsi.wsa_cnt_threshold_interval.is_some();

        let existing = self.entries.iter_mut().find(|e| {
            e.uas.src_mac_addr == rx.src_mac_addr
                && e.uas.wsa_id() == received.header.wsa_id
                && e.uas.psid() == received.wsi.psid
        });

        match existing {
            Some(entry) => {
                entry.count_rx(received.wsa);
                entry.uas.wsa_type = rx.wsa_type;
                entry.uas.rcpi = rx.rcpi;
                entry.uas.tx_lat = rx.tx_lat;
                entry.uas.tx_lon = rx.tx_lon;
                entry.uas.tx_elev = rx.tx_elev;
                entry.uas.header = received.header.clone();
                entry.uas.service_info = received.wsi.clone();
                entry.uas.channel_info = received.wci.clone();
                entry.uas.routing_advertisement = received.wra.cloned();
                if entry.check_rx_cnt != check_rx_cnt {
                    entry.check_rx_cnt = check_rx_cnt;
                    entry.elapsed = 0;
                }
                entry.expiry = now + expiry;
                entry.update_availability();
                debug!(
                    "updated UAS (psid {}, wsa id {}), rx count {}",
                    entry.uas.psid(),
                    entry.uas.wsa_id(),
                    entry.rx_cnt
                );
                Ok(())
            }
            None => {
                if self.entries.len() >= UAS_NUM_MAX {
                    return Err(TableError::UasTableFull);
                }
                let mut entry = UasEntry {
                    uas: Dot3Uas {
                        src_mac_addr: rx.src_mac_addr,
                        wsa_type: rx.wsa_type,
                        rcpi: rx.rcpi,
                        tx_lat: rx.tx_lat,
                        tx_lon: rx.tx_lon,
                        tx_elev: rx.tx_elev,
                        header: received.header.clone(),
                        service_info: received.wsi.clone(),
                        channel_info: received.wci.clone(),
                        routing_advertisement: received.wra.cloned(),
                        available: false,
                    },
                    wsa: received.wsa.to_vec(),
                    check_rx_cnt,
                    rx_cnt: 1,
                    elapsed: 0,
                    expiry: now + expiry,
                };
                entry.update_availability();
                debug!(
                    "added UAS (psid {}, wsa id {})",
                    entry.uas.psid(),
                    entry.uas.wsa_id()
                );
                self.entries.push(entry);
                Ok(())
            }
        }
    }

    /// Removes expired entries & advances the WSA count measuring
    /// intervals by `units` x 100 ms.
    pub fn tick(&mut self, now: Instant, units: u32) {
        self.entries.retain(|e| {
            let keep = e.expiry > now;
            if !keep {
                debug!(
                    "UAS (psid {}, wsa id {}) expired",
                    e.uas.psid(),
                    e.uas.wsa_id()
                );
            }
            keep
        });
        for entry in self.entries.iter_mut() {
            entry.tick(units);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
