use super::*;
use crate::validate::*;

use proptest::option;
use proptest::prelude::*;

pub fn psid_any() -> impl Strategy<Value = u32> {
    0..=PSID_MAX
}

pub fn data_rate_any() -> impl Strategy<Value = DataRate> {
    proptest::sample::select(DataRate::ALL.to_vec())
}

pub fn chan_num_any() -> impl Strategy<Value = u8> {
    0..=CHANNEL_NUMBER_MAX
}

prop_compose! {
    pub fn wsm_params_any()(
        psid in psid_any(),
        chan_num in option::of(chan_num_any()),
        datarate in option::of(data_rate_any()),
        transmit_power in option::of(any::<i8>()))
    -> WsmParams
    {
        WsmParams {
            psid,
            chan_num,
            datarate,
            transmit_power,
        }
    }
}

prop_compose! {
    pub fn mac_params_any()(
        dst_mac_addr in any::<[u8; 6]>(),
        src_mac_addr in any::<[u8; 6]>(),
        priority in 0u8..=7)
    -> MacParams
    {
        MacParams {
            dst_mac_addr,
            src_mac_addr,
            priority,
        }
    }
}

prop_compose! {
    pub fn service_info_any()(
        psid in psid_any(),
        channel_index in 1u8..=31,
        psc in option::of(proptest::collection::vec(any::<u8>(), 0..=PSC_MAX_LEN)),
        ipv6_address in option::of(any::<[u8; 16]>()),
        service_port in option::of(any::<u16>()),
        provider_mac_addr in option::of(any::<[u8; 6]>()),
        rcpi_threshold in option::of(0..=RCPI_MAX),
        wsa_cnt_threshold in option::of(1u8..=255),
        wsa_cnt_threshold_interval in option::of(1u8..=255))
    -> ServiceInfo
    {
        ServiceInfo {
            psid,
            channel_index,
            psc,
            ipv6_address,
            service_port,
            provider_mac_addr,
            rcpi_threshold,
            wsa_cnt_threshold,
            wsa_cnt_threshold_interval,
        }
    }
}

prop_compose! {
    pub fn edca_parameter_record_any()(
        aci in 0u8..=3,
        acm in any::<bool>(),
        aifsn in 0u8..=15,
        ecw_min in 0u8..=15,
        ecw_extra in 0u8..=15,
        txop_limit in any::<u16>())
    -> EdcaParameterRecord
    {
        EdcaParameterRecord {
            aci,
            acm,
            aifsn,
            ecw_min,
            ecw_max: ecw_min.saturating_add(ecw_extra).min(15),
            txop_limit,
        }
    }
}

prop_compose! {
    pub fn edca_parameter_set_any()(
        ac_be in edca_parameter_record_any(),
        ac_bk in edca_parameter_record_any(),
        ac_vi in edca_parameter_record_any(),
        ac_vo in edca_parameter_record_any())
    -> EdcaParameterSet
    {
        EdcaParameterSet {
            ac_be,
            ac_bk,
            ac_vi,
            ac_vo,
        }
    }
}

pub fn channel_access_any() -> impl Strategy<Value = ChannelAccess> {
    prop_oneof![
        Just(ChannelAccess::Continuous),
        Just(ChannelAccess::AlternatingSlot1),
        Just(ChannelAccess::AlternatingSlot0),
        Just(ChannelAccess::Any),
    ]
}

prop_compose! {
    pub fn channel_info_any()(
        operating_class in any::<u8>(),
        chan_num in chan_num_any(),
        transmit_power_level in any::<i8>(),
        datarate in data_rate_any(),
        adaptable_datarate in any::<bool>(),
        edca_param_set in option::of(edca_parameter_set_any()),
        channel_access in option::of(channel_access_any()))
    -> ChannelInfo
    {
        ChannelInfo {
            operating_class,
            chan_num,
            transmit_power_level,
            datarate,
            adaptable_datarate,
            edca_param_set,
            channel_access,
        }
    }
}

prop_compose! {
    pub fn routing_advertisement_any()(
        router_lifetime in 1u16..=u16::MAX,
        ip_prefix in any::<[u8; 16]>(),
        ip_prefix_len in 1u8..=128,
        default_gateway in any::<[u8; 16]>(),
        primary_dns in any::<[u8; 16]>(),
        secondary_dns in option::of(any::<[u8; 16]>()),
        gateway_mac_addr in option::of(any::<[u8; 6]>()))
    -> RoutingAdvertisement
    {
        RoutingAdvertisement {
            router_lifetime,
            ip_prefix,
            ip_prefix_len,
            default_gateway,
            primary_dns,
            secondary_dns,
            gateway_mac_addr,
        }
    }
}

prop_compose! {
    pub fn twod_location_any()(
        latitude in LATITUDE_MIN..=LATITUDE_MAX,
        longitude in LONGITUDE_MIN..=LONGITUDE_MAX)
    -> TwoDLocation
    {
        TwoDLocation { latitude, longitude }
    }
}

prop_compose! {
    pub fn threed_location_any()(
        latitude in LATITUDE_MIN..=LATITUDE_MAX,
        longitude in LONGITUDE_MIN..=LONGITUDE_MAX,
        elevation in ELEVATION_MIN..=ELEVATION_MAX)
    -> ThreeDLocation
    {
        ThreeDLocation { latitude, longitude, elevation }
    }
}

prop_compose! {
    pub fn wsa_header_any()(
        wsa_id in 0u8..=15,
        content_count in 0u8..=15,
        repeat_rate in option::of(any::<u8>()),
        twod_location in option::of(twod_location_any()),
        threed_location in option::of(threed_location_any()),
        advertiser_id in option::of("[a-zA-Z0-9 _-]{1,32}"))
    -> WsaHeader
    {
        WsaHeader {
            wsa_id,
            content_count,
            repeat_rate,
            twod_location,
            threed_location,
            advertiser_id,
        }
    }
}

prop_compose! {
    pub fn wsa_any()(
        channel_infos in proptest::collection::vec(channel_info_any(), 0..4)
    )(
        header in wsa_header_any(),
        service_infos in proptest::collection::vec(
            service_info_any(),
            // service infos need a channel info to refer to
            if channel_infos.is_empty() { 0..1 } else { 0..5 }
        ),
        indices in proptest::collection::vec(1..=channel_infos.len().max(1) as u8, 5),
        channel_infos in Just(channel_infos.clone()),
        routing_advertisement in option::of(routing_advertisement_any()))
    -> Wsa
    {
        let service_infos = service_infos
            .into_iter()
            .zip(indices)
            .map(|(wsi, channel_index)| ServiceInfo { channel_index, ..wsi })
            .collect();
        Wsa {
            header,
            service_infos,
            channel_infos,
            routing_advertisement,
        }
    }
}

/// Changes applied to a valid encoding: byte flips, a truncation &
/// bytes appended after the cut.
#[derive(Clone, Debug)]
pub struct Mutation {
    pub flips: Vec<(usize, u8)>,
    pub cut: usize,
    pub append: Vec<u8>,
}

impl Mutation {
    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        let mut result = bytes.to_vec();
        if !result.is_empty() {
            for (pos, value) in &self.flips {
                let len = result.len();
                result[pos % len] ^= value;
            }
        }
        result.truncate(self.cut % (bytes.len() + 1));
        result.extend_from_slice(&self.append);
        result
    }
}

prop_compose! {
    pub fn mutation_any()(
        flips in proptest::collection::vec((any::<usize>(), any::<u8>()), 0..8),
        cut in any::<usize>(),
        append in proptest::collection::vec(any::<u8>(), 0..8))
    -> Mutation
    {
        Mutation {
            flips,
            cut,
            append,
        }
    }
}
