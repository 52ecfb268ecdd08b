use clap::{App, Arg};
use dot3::*;
use rpcap::read::PcapReader;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use time::Instant;

fn main() {
    let matches = App::new("count the WSMs by PSID")
        .about("Counts the WSMs contained in a pcap of raw 802.11 frames")
        .arg(
            Arg::with_name("INPUT")
                .help("input pcap file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .help("log skipped frames"),
        )
        .get_matches();

    if matches.is_present("verbose") {
        env_logger::init();
        set_log_level(log::LevelFilter::Debug);
    }

    // INPUT is required so clap guarantees the value
    if let Some(path) = matches.value_of("INPUT") {
        if let Err(err) = read(path) {
            println!("Error: {:?}", err);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
struct Stats {
    total_frame_size: usize,
    frames: usize,
    not_wsmp: usize,
    wsm_err: usize,
    wsm_count: HashMap<u32, usize>,
    wsa_ok: usize,
    wsa_err: usize,
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

fn read(in_file_path: &str) -> Result<(), Error> {
    let in_file_metadata = std::fs::metadata(in_file_path)?;
    let mut stats: Stats = Default::default();

    let start = Instant::now();
    let (_, mut reader) = PcapReader::new(BufReader::new(File::open(in_file_path)?))?;

    while let Some(packet) = reader.next()? {
        stats.frames += 1;
        stats.total_frame_size += packet.data.len();

        let mpdu = match MpduSlice::from_slice(packet.data) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("frame {} skipped: {}", stats.frames, err);
                stats.not_wsmp += 1;
                continue;
            }
        };
        match WsmSlice::from_slice(mpdu.wsm()) {
            Ok(wsm) => {
                *stats.wsm_count.entry(wsm.psid()).or_insert(0) += 1;
                if WSA_PSID == wsm.psid() {
                    match Wsa::from_slice(wsm.payload()) {
                        Ok(_) => stats.wsa_ok += 1,
                        Err(_) => stats.wsa_err += 1,
                    }
                }
            }
            Err(err) => {
                log::debug!("frame {} contains an invalid WSM: {}", stats.frames, err);
                stats.wsm_err += 1;
            }
        }
    }

    let duration = start.elapsed();
    let duration_secs = duration.as_seconds_f64();
    let megabytes_per_sec_file = in_file_metadata.len() as f64 / duration_secs / 1_000_000.0;
    let megabytes_per_sec_frames = stats.total_frame_size as f64 / duration_secs / 1_000_000.0;

    println!("{}", in_file_path);
    println!("{:?}", stats);
    println!("{:?}", duration);
    println!("{:?}MB/s (file)", megabytes_per_sec_file);
    println!("{:?}MB/s (frame data)", megabytes_per_sec_frames);

    let mut counts: Vec<_> = stats.wsm_count.iter().collect();
    counts.sort();
    for (psid, count) in counts {
        println!("psid 0x{:x}: {}", psid, count);
    }

    Ok(())
}
