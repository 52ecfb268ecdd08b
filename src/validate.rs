//! Range predicates for every field that is checked before encoding
//! and after decoding.
//!
//! Encoders and decoders map a failed predicate onto the matching
//! [`crate::err::ValueError`] variant.

use crate::*;

/// Smallest allowed latitude (in 1/10 micro degrees).
pub const LATITUDE_MIN: i32 = -900_000_000;
/// Largest allowed latitude, `LATITUDE_MAX` itself means "unavailable".
pub const LATITUDE_MAX: i32 = 900_000_001;
/// Smallest allowed longitude (in 1/10 micro degrees).
pub const LONGITUDE_MIN: i32 = -1_799_999_999;
/// Largest allowed longitude, `LONGITUDE_MAX` itself means "unavailable".
pub const LONGITUDE_MAX: i32 = 1_800_000_001;
/// Smallest allowed elevation (in decimeters).
pub const ELEVATION_MIN: i32 = -4096;
/// Largest allowed elevation (in decimeters), `ELEVATION_MAX` means "unavailable".
pub const ELEVATION_MAX: i32 = 61439;

/// Maximum length of the advertiser id (in bytes).
pub const ADVERTISER_ID_MAX_LEN: usize = 32;
/// Maximum length of a provider service context (in bytes).
pub const PSC_MAX_LEN: usize = 31;

#[inline]
pub fn is_valid_psid(psid: u32) -> bool {
    psid <= PSID_MAX
}

#[inline]
pub fn is_valid_channel_number(chan_num: u8) -> bool {
    chan_num <= CHANNEL_NUMBER_MAX
}

#[inline]
pub fn is_valid_data_rate(datarate: DataRate) -> bool {
    datarate.is_valid()
}

/// User priority (802.1D), 0..=7.
#[inline]
pub fn is_valid_priority(priority: u8) -> bool {
    priority <= 7
}

#[inline]
pub fn is_valid_rcpi(rcpi: u8) -> bool {
    rcpi <= RCPI_MAX
}

#[inline]
pub fn is_valid_wsa_id(wsa_id: u8) -> bool {
    wsa_id <= 15
}

#[inline]
pub fn is_valid_content_count(content_count: u8) -> bool {
    content_count <= 15
}

#[inline]
pub fn is_valid_latitude(lat: i32) -> bool {
    (LATITUDE_MIN..=LATITUDE_MAX).contains(&lat)
}

#[inline]
pub fn is_valid_longitude(lon: i32) -> bool {
    (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&lon)
}

#[inline]
pub fn is_valid_elevation(elev: i32) -> bool {
    (ELEVATION_MIN..=ELEVATION_MAX).contains(&elev)
}

#[inline]
pub fn is_valid_advertiser_id_len(len: usize) -> bool {
    (1..=ADVERTISER_ID_MAX_LEN).contains(&len)
}

#[inline]
pub fn is_valid_psc_len(len: usize) -> bool {
    len <= PSC_MAX_LEN
}

/// Channel index of a service info (1 based index into the channel infos).
#[inline]
pub fn is_valid_channel_index(index: u8) -> bool {
    (1..=WCI_NUM_MAX as u8).contains(&index)
}

#[inline]
pub fn is_valid_rcpi_threshold(threshold: u8) -> bool {
    threshold <= RCPI_MAX
}

#[inline]
pub fn is_valid_wsa_count_threshold(threshold: u8) -> bool {
    threshold >= 1
}

#[inline]
pub fn is_valid_wsa_count_threshold_interval(interval: u8) -> bool {
    interval >= 1
}

#[inline]
pub fn is_valid_aci(aci: u8) -> bool {
    aci <= 3
}

#[inline]
pub fn is_valid_aifsn(aifsn: u8) -> bool {
    aifsn <= 15
}

#[inline]
pub fn is_valid_ecw(ecw: u8) -> bool {
    ecw <= 15
}

#[inline]
pub fn is_valid_router_lifetime(lifetime: u16) -> bool {
    lifetime >= 1
}

#[inline]
pub fn is_valid_ipv6_prefix_len(len: u8) -> bool {
    (1..=128).contains(&len)
}

#[inline]
pub fn is_valid_wsm_max_len(len: usize) -> bool {
    (WSM_MIN_LEN..=WSM_MAX_LEN).contains(&len)
}

/// UAS management interval (in units of 100 ms).
#[inline]
pub fn is_valid_uas_mgmt_interval(interval: u32) -> bool {
    (1..=UAS_MGMT_INTERVAL_MAX).contains(&interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert!(is_valid_psid(PSID_MAX));
        assert!(!is_valid_psid(PSID_MAX + 1));
        assert!(is_valid_channel_number(200));
        assert!(!is_valid_channel_number(201));
        assert!(is_valid_priority(7));
        assert!(!is_valid_priority(8));
        assert!(is_valid_rcpi(220));
        assert!(!is_valid_rcpi(221));
        assert!(is_valid_wsa_id(15));
        assert!(!is_valid_wsa_id(16));
        assert!(is_valid_latitude(LATITUDE_MIN));
        assert!(is_valid_latitude(LATITUDE_MAX));
        assert!(!is_valid_latitude(LATITUDE_MAX + 1));
        assert!(!is_valid_longitude(LONGITUDE_MIN - 1));
        assert!(is_valid_elevation(ELEVATION_MIN));
        assert!(!is_valid_elevation(ELEVATION_MAX + 1));
        assert!(!is_valid_advertiser_id_len(0));
        assert!(is_valid_advertiser_id_len(32));
        assert!(!is_valid_advertiser_id_len(33));
        assert!(is_valid_psc_len(0));
        assert!(!is_valid_psc_len(32));
        assert!(!is_valid_channel_index(0));
        assert!(is_valid_channel_index(31));
        assert!(!is_valid_channel_index(32));
        assert!(!is_valid_wsa_count_threshold(0));
        assert!(!is_valid_ipv6_prefix_len(0));
        assert!(is_valid_ipv6_prefix_len(128));
        assert!(!is_valid_ipv6_prefix_len(129));
        assert!(!is_valid_wsm_max_len(WSM_MIN_LEN - 1));
        assert!(is_valid_wsm_max_len(WSM_MAX_LEN));
        assert!(!is_valid_wsm_max_len(WSM_MAX_LEN + 1));
        assert!(!is_valid_uas_mgmt_interval(0));
        assert!(is_valid_uas_mgmt_interval(UAS_MGMT_INTERVAL_MAX));
        assert!(!is_valid_uas_mgmt_interval(UAS_MGMT_INTERVAL_MAX + 1));
    }
}
