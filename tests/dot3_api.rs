use dot3::err::*;
use dot3::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const RSU_MAC: MacAddr = [0x02, 0x00, 0x5e, 0x10, 0x00, 0x01];

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rx_params(rcpi: u8) -> WsaRxParams {
    WsaRxParams {
        src_mac_addr: RSU_MAC,
        wsa_type: WsaType::Unsecured,
        rcpi,
        tx_lat: 375_000_000,
        tx_lon: 1_270_000_000,
        tx_elev: 200,
    }
}

/// Waits until the condition is met or the timeout expired.
fn wait_for<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[test]
fn provider_to_user() {
    init_log();
    let provider = Dot3::default();
    provider
        .add_psr(Dot3Psr {
            psc: Some(b"parking".to_vec()),
            ip_service: Some(IpService {
                ipv6_address: [0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                service_port: 5000,
            }),
            ..Dot3Psr::new(2, 0x20, 178)
        })
        .unwrap();
    provider.add_psr(Dot3Psr::new(2, 0x8002, 178)).unwrap();

    let wsa = provider
        .construct_wsa(&WsaConstructParams {
            header: WsaHeader {
                repeat_rate: Some(50),
                advertiser_id: Some("rsu-17".to_string()),
                ..WsaHeader::new(2, 1)
            },
            routing_advertisement: None,
        })
        .unwrap();
    let wsm = provider
        .construct_wsm_mpdu(
            &MacParams {
                dst_mac_addr: BROADCAST_MAC_ADDR,
                src_mac_addr: RSU_MAC,
                priority: 7,
            },
            &WsmParams {
                chan_num: Some(178),
                datarate: Some(DataRate::MBPS_6),
                transmit_power: Some(20),
                ..WsmParams::new(WSA_PSID)
            },
            &wsa,
        )
        .unwrap();

    let user = Dot3::default();
    user.add_usr(Dot3Usr {
        psc: Some(b"parking".to_vec()),
        advertiser_id: Some("rsu-17".to_string()),
        ..Dot3Usr::new(0x20, WsaType::Unsecured)
    })
    .unwrap();
    user.add_wsr(&Dot3Wsr { psid: WSA_PSID }).unwrap();

    let (mac, slice, interested) = user.parse_wsm_mpdu(&wsm).unwrap();
    assert!(interested);
    assert_eq!(RSU_MAC, mac.src_mac_addr);
    assert_eq!(WSA_PSID, slice.psid());
    user.process_wsa(slice.payload(), &rx_params(150)).unwrap();

    let uass = user.get_uass_with_psid_and_src_mac(0x20, &RSU_MAC);
    assert_eq!(1, uass.len());
    let uas = &uass[0];
    assert_eq!(2, uas.wsa_id());
    assert_eq!(Some("rsu-17".to_string()), uas.header.advertiser_id);
    assert_eq!(Some(5000), uas.service_info.service_port);
    assert_eq!(178, uas.channel_info.chan_num);
    assert!(uas.available);
    // 0x8002 was advertised but not requested
    assert!(user.get_uass_with_psid(0x8002).is_empty());
}

#[test]
fn concurrent_table_access() {
    init_log();
    let dot3 = Arc::new(Dot3::default());
    let wsa = {
        let provider = Dot3::default();
        for psid in 0..8 {
            provider
                .add_psr(Dot3Psr::new(1, 0x100 + psid, 172 + psid as u8))
                .unwrap();
        }
        provider
            .construct_wsa(&WsaConstructParams {
                header: WsaHeader::new(1, 0),
                routing_advertisement: None,
            })
            .unwrap()
    };
    dot3.start_uas_management(1).unwrap();

    let workers: Vec<_> = (0..4u32)
        .map(|id| {
            let dot3 = dot3.clone();
            let wsa = wsa.clone();
            thread::spawn(move || {
                for round in 0..50u32 {
                    let psid = 0x100 + (id * 2 + round % 2);
                    let _ = dot3.add_usr(Dot3Usr::new(psid, WsaType::Unsecured));
                    dot3.add_wsr(&Dot3Wsr {
                        psid: 0x1000 + id * 100 + round,
                    })
                    .unwrap();
                    dot3.process_wsa(&wsa, &rx_params((round % 200) as u8))
                        .unwrap();
                    let wsm = dot3
                        .construct_wsm(&WsmParams::new(0x1000 + id * 100 + round), &[id as u8])
                        .unwrap();
                    assert!(dot3.parse_wsm(&wsm).unwrap().1);
                    let _ = dot3.get_uas_with_max_rcpi();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(200, dot3.get_wsr_num());
    assert_eq!(8, dot3.get_usr_num());
    dot3.stop_uas_management();
    dot3.release();
    assert_eq!(0, dot3.get_usr_num());
    assert_eq!(0, dot3.get_uas_num());
}

#[test]
fn uas_expires_without_refresh() {
    init_log();
    let config = Dot3Config::new(WSM_DEFAULT_MAX_LEN, Duration::from_millis(300)).unwrap();
    let dot3 = Dot3::new(config);
    dot3.add_usr(Dot3Usr::new(0x20, WsaType::Unsecured)).unwrap();
    let wsa = Wsa {
        header: WsaHeader::new(0, 0),
        service_infos: vec![ServiceInfo::new(0x20, 1)],
        channel_infos: vec![ChannelInfo::new(OPERATING_CLASS_10MHZ, 172)],
        routing_advertisement: None,
    }
    .to_bytes()
    .unwrap();

    dot3.start_uas_management(1).unwrap();
    dot3.process_wsa(&wsa, &rx_params(100)).unwrap();
    assert_eq!(1, dot3.get_uas_num());

    assert!(wait_for(Duration::from_secs(10), || 0 == dot3.get_uas_num()));

    // a new reception creates the entry again
    dot3.process_wsa(&wsa, &rx_params(100)).unwrap();
    assert_eq!(1, dot3.get_uas_num());
    dot3.stop_uas_management();
}

#[test]
fn wsa_count_threshold() {
    init_log();
    let dot3 = Dot3::default();
    dot3.add_usr(Dot3Usr::new(0x20, WsaType::Unsecured)).unwrap();
    // at least 5 WSAs per 100ms
    let wsa = Wsa {
        header: WsaHeader::new(0, 0),
        service_infos: vec![ServiceInfo {
            wsa_cnt_threshold: Some(5),
            wsa_cnt_threshold_interval: Some(1),
            ..ServiceInfo::new(0x20, 1)
        }],
        channel_infos: vec![ChannelInfo::new(OPERATING_CLASS_10MHZ, 172)],
        routing_advertisement: None,
    }
    .to_bytes()
    .unwrap();

    dot3.process_wsa(&wsa, &rx_params(100)).unwrap();
    // not available until the first measuring interval completed
    assert!(!dot3.get_all_uass()[0].available);

    dot3.start_uas_management(1).unwrap();
    let available = wait_for(Duration::from_secs(10), || {
        // keep refreshing faster then the threshold requires
        for _ in 0..20 {
            dot3.process_wsa(&wsa, &rx_params(100)).unwrap();
        }
        dot3.get_all_uass().first().map_or(false, |uas| uas.available)
    });
    assert!(available);
    dot3.stop_uas_management();
}

#[test]
fn errors_are_reported() {
    let dot3 = Dot3::default();
    assert_matches::assert_matches!(
        dot3.parse_wsm(&[0x03, 0x00]),
        Err(Dot3Error::Len(_))
    );
    assert_matches::assert_matches!(
        dot3.delete_psr(0x20),
        Err(Dot3Error::Table(TableError::NoSuchPsr(0x20)))
    );
    assert_matches::assert_matches!(
        dot3.add_wsr(&Dot3Wsr { psid: PSID_MAX + 1 }),
        Err(Dot3Error::Value(ValueError::InvalidPsid(_)))
    );
    let err = dot3.parse_wsa(&[0x13]).unwrap_err();
    assert!(!err.to_string().is_empty());
}
