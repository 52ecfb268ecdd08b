use dot3::*;
use rpcap::read::PcapReader;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Error> {
    let pcap_path = std::env::args()
        .nth(1)
        .expect("Expected PCAP file (raw 802.11 frames) as argument");

    let dot3 = Dot3::new(Dot3Config::default());
    let (_, mut reader) = PcapReader::new(BufReader::new(File::open(pcap_path)?))?;

    while let Some(packet) = reader.next()? {
        // skip frames that are not WSMP QoS data frames
        let (mac, wsm, _) = match dot3.parse_wsm_mpdu(packet.data) {
            Ok(value) => value,
            Err(_) => continue,
        };

        let params = wsm.params();
        println!(
            "{} -> {} psid 0x{:x} (priority {})",
            fmt_mac(&mac.src_mac_addr),
            fmt_mac(&mac.dst_mac_addr),
            params.psid,
            mac.priority
        );
        if let Some(chan_num) = params.chan_num {
            println!("  channel: {}", chan_num);
        }
        if let Some(datarate) = params.datarate {
            println!("  data rate: {}", datarate);
        }
        if let Some(power) = params.transmit_power {
            println!("  transmit power: {} dBm", power);
        }

        if WSA_PSID == params.psid {
            match dot3.parse_wsa(wsm.payload()) {
                Ok(wsa) => print_wsa(&wsa),
                Err(err) => println!("  invalid WSA: {}", err),
            }
        } else {
            println!("  with payload {:?}", wsm.payload());
        }
    }

    Ok(())
}

fn print_wsa(wsa: &Wsa) {
    println!(
        "  WSA id {} (content count {})",
        wsa.header.wsa_id, wsa.header.content_count
    );
    if let Some(id) = &wsa.header.advertiser_id {
        println!("    advertiser: {}", id);
    }
    for wsi in &wsa.service_infos {
        match wsa.channel_info_for(wsi) {
            Some(wci) => println!(
                "    service 0x{:x} on channel {} ({})",
                wsi.psid, wci.chan_num, wci.datarate
            ),
            None => println!(
                "    service 0x{:x} with unknown channel index {}",
                wsi.psid, wsi.channel_index
            ),
        }
    }
    if let Some(wra) = &wsa.routing_advertisement {
        println!(
            "    router lifetime {}s, prefix length {}",
            wra.router_lifetime, wra.ip_prefix_len
        );
    }
}

fn fmt_mac(addr: &MacAddr) -> String {
    addr.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

#[derive(Debug)]
enum Error {
    IoError(std::io::Error),
    PcapError(rpcap::PcapError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<rpcap::PcapError> for Error {
    fn from(err: rpcap::PcapError) -> Error {
        Error::PcapError(err)
    }
}
