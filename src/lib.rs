//! A Rust library implementing the IEEE 1609.3 WAVE networking services
//! ("dot3"): encoding & decoding of WAVE short messages (WSM), WAVE
//! service advertisements (WSA) and the 802.11 MPDU framing around them,
//! plus the provider & user service tables that decide which advertised
//! services are available.
//!
//! # Usage
//!
//! Add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dot3 = "0.1.0"
//! ```
//!
//! # Example
//! ```
//! use dot3::*;
//!
//! let dot3 = Dot3::new(Dot3Config::default());
//!
//! // provider: advertise a service on channel 172
//! dot3.add_psr(Dot3Psr::new(1, 0x20, 172)).unwrap();
//! let wsa = dot3
//!     .construct_wsa(&WsaConstructParams {
//!         header: WsaHeader::new(1, 0),
//!         routing_advertisement: None,
//!     })
//!     .unwrap();
//!
//! // user: register interest & process the received advertisement
//! dot3.add_usr(Dot3Usr::new(0x20, WsaType::Unsecured)).unwrap();
//! dot3.process_wsa(
//!     &wsa,
//!     &WsaRxParams {
//!         src_mac_addr: [0x02, 0, 0, 0, 0, 1],
//!         wsa_type: WsaType::Unsecured,
//!         rcpi: 100,
//!         tx_lat: 375_000_000,
//!         tx_lon: 1_270_000_000,
//!         tx_elev: 0,
//!     },
//! ).unwrap();
//!
//! for uas in dot3.get_all_uass() {
//!     println!(
//!         "service 0x{:x} on channel {} (available: {})",
//!         uas.psid(),
//!         uas.channel_info.chan_num,
//!         uas.available
//!     );
//! }
//! ```
//!
//! # References
//! * IEEE Std 1609.3-2016, WAVE Networking Services
//! * IEEE Std 802.11-2016, Wireless LAN MAC & PHY Specifications
//! * ITU-T X.691, ASN.1 encoding rules: Packed Encoding Rules (PER)

#[cfg(test)]
mod proptest_generators;

/// Error types of dot3.
pub mod err;

/// Value range checks.
pub mod validate;

mod uper;

mod extension;

mod psid;
pub use psid::*;

mod data_rate;
pub use data_rate::*;

mod wsm;
pub use wsm::*;

mod mpdu;
pub use mpdu::*;

mod edca;
pub use edca::*;

mod wsa_header;
pub use wsa_header::*;

mod service_info;
pub use service_info::*;

mod channel_info;
pub use channel_info::*;

mod routing_advertisement;
pub use routing_advertisement::*;

mod wsa;
pub use wsa::*;

mod config;
pub use config::*;

mod pci;
pub use pci::*;

mod psr;
pub use psr::*;

mod wsr;
pub use wsr::*;

mod usr;
pub use usr::*;

mod uas;
pub use uas::*;

mod uas_mgmt;

mod dot3;
pub use dot3::*;

use std::time::Duration;

/// The supported WSMP version.
pub const WSMP_VERSION: u8 = 3;

/// The supported WSA version.
pub const WSA_VERSION: u8 = 3;

/// WSM N-Header subtype "null networking" (the only supported subtype).
pub const WSM_SUBTYPE_NULL_NETWORKING: u8 = 0;

/// WSM T-Header protocol identifier "PSID only" (the only supported TPID).
pub const WSM_TPID: u8 = 0;

/// Largest PSID that can be encoded (4 byte encoding).
pub const PSID_MAX: u32 = 0x1020_407f;

/// PSID WSAs are transmitted with.
pub const WSA_PSID: u32 = 0x87;

/// Largest allowed channel number.
pub const CHANNEL_NUMBER_MAX: u8 = 200;

/// Largest allowed received channel power indicator.
pub const RCPI_MAX: u8 = 220;

/// Maximum length of a WSM (maximum PDCP SDU size).
pub const WSM_MAX_LEN: usize = 2302;

/// Smallest possible WSM (N-Header, TPID, 1 byte PSID, length).
pub const WSM_MIN_LEN: usize = 4;

/// Maximum length of the WSM N-Header (all extensions present).
pub const WSM_MAX_N_HEADER_LEN: usize = 11;

/// Maximum length of the WSM T-Header (4 byte PSID & 2 byte length).
pub const WSM_MAX_T_HEADER_LEN: usize = 7;

/// Maximum length of all WSM headers.
pub const WSM_MAX_HEADER_LEN: usize = WSM_MAX_N_HEADER_LEN + WSM_MAX_T_HEADER_LEN;

/// Maximum WSM payload length accepted by the encoder.
///
/// The bound assumes the largest possible headers, so every payload of
/// this size still fits into [`WSM_MAX_LEN`].
pub const WSM_MAX_PAYLOAD_LEN: usize = WSM_MAX_LEN - WSM_MAX_HEADER_LEN;

/// Default maximum length of constructed WSMs (see [`Dot3Config`]).
pub const WSM_DEFAULT_MAX_LEN: usize = 1400;

/// Maximum number of service infos in a WSA.
pub const WSI_NUM_MAX: usize = 31;

/// Maximum number of channel infos in a WSA.
pub const WCI_NUM_MAX: usize = 31;

/// Maximum number of provider service requests.
pub const PSR_NUM_MAX: usize = 128;

/// Maximum number of provider channel infos.
pub const PCI_NUM_MAX: usize = 128;

/// Maximum number of WSM service requests.
pub const WSR_NUM_MAX: usize = 65536;

/// Maximum number of user service requests.
pub const USR_NUM_MAX: usize = 4096;

/// Maximum number of user available services.
pub const UAS_NUM_MAX: usize = 4096;

/// Default time after which a UAS is removed if no WSA refreshed it.
pub const UAS_EXPIRY_TIME: Duration = Duration::from_secs(5);

/// Unit of the UAS management interval & the WSA count threshold interval.
pub const UAS_MGMT_TICK: Duration = Duration::from_millis(100);

/// Largest allowed UAS management interval (in [`UAS_MGMT_TICK`] units).
pub const UAS_MGMT_INTERVAL_MAX: u32 = 100;

/// Sets the maximum level of the log messages emitted by the library
/// (and everything else using the `log` facade in the process).
pub fn set_log_level(level: log::LevelFilter) {
    log::set_max_level(level);
}
