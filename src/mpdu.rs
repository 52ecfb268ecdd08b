use crate::err::{DecodeError, Dot3Error, Layer, LenError, LenSource, ValueError};
use crate::*;

/// IEEE 802 MAC address.
pub type MacAddr = [u8; 6];

/// Wildcard BSSID used by WAVE devices communicating outside of the
/// context of a BSS (OCB mode).
pub const WILDCARD_BSSID: MacAddr = [0xff; 6];

/// Broadcast MAC address.
pub const BROADCAST_MAC_ADDR: MacAddr = [0xff; 6];

/// Length of the 802.11 QoS data MAC header.
pub const MPDU_MAC_HEADER_LEN: usize = 26;

/// Length of the LLC header (EtherType only).
pub const MPDU_LLC_HEADER_LEN: usize = 2;

/// Length of the MAC header & LLC header in front of the WSM.
pub const MPDU_HEADER_LEN: usize = MPDU_MAC_HEADER_LEN + MPDU_LLC_HEADER_LEN;

/// EtherType of WSMP.
pub const WSMP_ETHER_TYPE: u16 = 0x88dc;

/// Frame control field of a QoS data frame (protocol version 0,
/// type data, subtype QoS data, no flags set).
const FC_QOS_DATA: u16 = 0x0088;

const FC_TYPE_DATA: u8 = 2;
const FC_SUBTYPE_QOS_DATA: u8 = 8;

/// Sequence control value written into constructed MPDUs. The real
/// sequence number is filled in by the device driver.
const SEQ_CTRL: u16 = 0xfffe;

/// QoS control ack policy "no ack" (used for group addressed frames).
const QOS_ACK_POLICY_NO_ACK: u8 = 1;

/// Returns true if the individual/group bit of the address is set.
#[inline]
pub fn is_group_addr(addr: &MacAddr) -> bool {
    0 != addr[0] & 0x01
}

/// MAC parameters of an MPDU carrying a WSM.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MacParams {
    pub dst_mac_addr: MacAddr,
    pub src_mac_addr: MacAddr,
    /// User priority (TID), 0..=7.
    pub priority: u8,
}

impl MacParams {
    pub fn validate(&self) -> Result<(), ValueError> {
        if !validate::is_valid_priority(self.priority) {
            return Err(ValueError::InvalidPriority(self.priority));
        }
        Ok(())
    }

    /// Returns the MAC header & LLC header in front of a WSM.
    pub fn to_header_bytes(&self) -> Result<[u8; MPDU_HEADER_LEN], ValueError> {
        self.validate()?;
        let fc = FC_QOS_DATA.to_le_bytes();
        let seq_ctrl = SEQ_CTRL.to_le_bytes();
        let ack_policy = if is_group_addr(&self.dst_mac_addr) {
            QOS_ACK_POLICY_NO_ACK
        } else {
            0
        };
        let ether_type = WSMP_ETHER_TYPE.to_be_bytes();
        let d = &self.dst_mac_addr;
        let s = &self.src_mac_addr;
        let b = &WILDCARD_BSSID;
        #[rustfmt::skip]
        let header = [
            fc[0], fc[1],
            0, 0, // duration
            d[0], d[1], d[2], d[3], d[4], d[5],
            s[0], s[1], s[2], s[3], s[4], s[5],
            b[0], b[1], b[2], b[3], b[4], b[5],
            seq_ctrl[0], seq_ctrl[1],
            self.priority | (ack_policy << 5), 0,
            ether_type[0], ether_type[1],
        ];
        Ok(header)
    }

    /// Encodes an MPDU (MAC header, LLC header & the WSM).
    pub fn to_mpdu_bytes(&self, wsm: &[u8]) -> Result<Vec<u8>, ValueError> {
        let header = self.to_header_bytes()?;
        let mut result = Vec::with_capacity(MPDU_HEADER_LEN + wsm.len());
        result.extend_from_slice(&header);
        result.extend_from_slice(wsm);
        Ok(result)
    }
}

/// A decoded MPDU (MAC parameters & a reference to the contained WSM).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MpduSlice<'a> {
    params: MacParams,
    wsm: &'a [u8],
}

impl<'a> MpduSlice<'a> {
    /// Checks the MAC header & LLC header of an MPDU and separates the
    /// WSM behind them.
    pub fn from_slice(slice: &'a [u8]) -> Result<MpduSlice<'a>, Dot3Error> {
        if slice.len() < MPDU_HEADER_LEN {
            return Err(LenError {
                required_len: MPDU_HEADER_LEN,
                len: slice.len(),
                len_source: LenSource::Slice,
                layer: Layer::Mpdu,
            }
            .into());
        }

        let fc = u16::from_le_bytes([slice[0], slice[1]]);
        let protocol_version = (fc & 0b11) as u8;
        if 0 != protocol_version {
            return Err(DecodeError::UnsupportedMpduProtocolVersion(protocol_version).into());
        }
        let frame_type = ((fc >> 2) & 0b11) as u8;
        if FC_TYPE_DATA != frame_type {
            return Err(DecodeError::NotDataFrame(frame_type).into());
        }
        let subtype = ((fc >> 4) & 0b1111) as u8;
        if FC_SUBTYPE_QOS_DATA != subtype {
            return Err(DecodeError::NotQosDataSubtype(subtype).into());
        }

        let read_addr = |start: usize| -> MacAddr {
            [
                slice[start],
                slice[start + 1],
                slice[start + 2],
                slice[start + 3],
                slice[start + 4],
                slice[start + 5],
            ]
        };
        let dst_mac_addr = read_addr(4);
        let src_mac_addr = read_addr(10);
        let bssid = read_addr(16);
        if WILDCARD_BSSID != bssid {
            return Err(DecodeError::NotWildcardBssid(bssid).into());
        }

        let ether_type = u16::from_be_bytes([slice[26], slice[27]]);
        if WSMP_ETHER_TYPE != ether_type {
            return Err(DecodeError::NotSupportedEtherType(ether_type).into());
        }

        let priority = slice[24] & 0x0f;
        let params = MacParams {
            dst_mac_addr,
            src_mac_addr,
            priority,
        };
        params.validate()?;

        Ok(MpduSlice {
            params,
            wsm: &slice[MPDU_HEADER_LEN..],
        })
    }

    #[inline]
    pub fn params(&self) -> &MacParams {
        &self.params
    }

    /// WSM contained in the MPDU.
    #[inline]
    pub fn wsm(&self) -> &'a [u8] {
        self.wsm
    }
}
