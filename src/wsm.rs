use crate::err::{DecodeError, Dot3Error, Layer, LenError, LenSource, ValueError};
use crate::extension::{read_extensions, write_extensions, ExtCodec, Extension};
use crate::psid::{read_psid, write_psid};
use crate::uper::{BitReader, BitWriter};
use crate::*;

/// Extension ids allowed in the WSM N-Header.
pub const WSM_EXT_ID_TX_POWER_USED: u8 = 4;
pub const WSM_EXT_ID_CHANNEL_NUMBER: u8 = 15;
pub const WSM_EXT_ID_DATA_RATE: u8 = 16;

/// Optional N-Header fields of a WSM.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum WsmNHeaderExt {
    ChannelNumber(u8),
    DataRate(DataRate),
    TxPowerUsed(i8),
}

impl WsmNHeaderExt {
    fn read_channel_number(r: &mut BitReader) -> Result<WsmNHeaderExt, Dot3Error> {
        Ok(WsmNHeaderExt::ChannelNumber(r.read_u8()?))
    }

    fn read_data_rate(r: &mut BitReader) -> Result<WsmNHeaderExt, Dot3Error> {
        Ok(WsmNHeaderExt::DataRate(DataRate(r.read_bits(7)? as u8)))
    }

    fn read_tx_power_used(r: &mut BitReader) -> Result<WsmNHeaderExt, Dot3Error> {
        Ok(WsmNHeaderExt::TxPowerUsed(
            r.read_constrained(-128, 127)? as i8,
        ))
    }
}

impl Extension for WsmNHeaderExt {
    const LAYER: Layer = Layer::WsmNHeader;
    const REGISTRY: &'static [ExtCodec<WsmNHeaderExt>] = &[
        ExtCodec {
            id: WSM_EXT_ID_TX_POWER_USED,
            decode: WsmNHeaderExt::read_tx_power_used,
        },
        ExtCodec {
            id: WSM_EXT_ID_CHANNEL_NUMBER,
            decode: WsmNHeaderExt::read_channel_number,
        },
        ExtCodec {
            id: WSM_EXT_ID_DATA_RATE,
            decode: WsmNHeaderExt::read_data_rate,
        },
    ];

    fn id(&self) -> u8 {
        use WsmNHeaderExt::*;
        match self {
            ChannelNumber(_) => WSM_EXT_ID_CHANNEL_NUMBER,
            DataRate(_) => WSM_EXT_ID_DATA_RATE,
            TxPowerUsed(_) => WSM_EXT_ID_TX_POWER_USED,
        }
    }

    fn write_value(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        use WsmNHeaderExt::*;
        match self {
            ChannelNumber(chan) => writer.write_bits(u64::from(*chan), 8),
            DataRate(rate) => writer.write_bits(u64::from(rate.0), 7),
            TxPowerUsed(power) => writer.write_constrained(i64::from(*power), -128, 127),
        }
        Ok(())
    }
}

/// Header parameters of a WAVE short message.
///
/// The same type is used to construct a WSM and as the result of parsing
/// one. Fields set to `None` are not present in the N-Header.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WsmParams {
    /// Provider service identifier of the payload.
    pub psid: u32,
    /// Channel number the WSM is transmitted on.
    pub chan_num: Option<u8>,
    /// Data rate the WSM is transmitted with.
    pub datarate: Option<DataRate>,
    /// Transmit power used (in dBm).
    pub transmit_power: Option<i8>,
}

impl WsmParams {
    /// Parameters without any N-Header extensions.
    pub fn new(psid: u32) -> WsmParams {
        WsmParams {
            psid,
            chan_num: None,
            datarate: None,
            transmit_power: None,
        }
    }

    /// Checks that all present values are in their allowed ranges.
    pub fn validate(&self) -> Result<(), ValueError> {
        use ValueError::*;
        if !validate::is_valid_psid(self.psid) {
            return Err(InvalidPsid(self.psid));
        }
        if let Some(chan_num) = self.chan_num {
            if !validate::is_valid_channel_number(chan_num) {
                return Err(InvalidChannelNumber(chan_num));
            }
        }
        if let Some(datarate) = self.datarate {
            if !validate::is_valid_data_rate(datarate) {
                return Err(InvalidDataRate(datarate.0));
            }
        }
        // transmit power covers its whole range (-128..=127)
        Ok(())
    }

    fn extensions(&self) -> Vec<WsmNHeaderExt> {
        let mut result = Vec::with_capacity(3);
        if let Some(chan_num) = self.chan_num {
            result.push(WsmNHeaderExt::ChannelNumber(chan_num));
        }
        if let Some(datarate) = self.datarate {
            result.push(WsmNHeaderExt::DataRate(datarate));
        }
        if let Some(power) = self.transmit_power {
            result.push(WsmNHeaderExt::TxPowerUsed(power));
        }
        result
    }

    /// Returns the length of the WSM headers (N-Header & T-Header) for a
    /// payload of the given length.
    pub(crate) fn header_len(&self, payload_len: usize) -> Result<usize, ValueError> {
        // id + length determinant + one byte value per extension
        let ext_len = self.extensions().len() * 3;
        let n_header_len = 1 + if ext_len > 0 { 1 + ext_len } else { 0 };
        let len_determinant_len = if payload_len < 0x80 { 1 } else { 2 };
        Ok(n_header_len + 1 + psid::psid_encoded_len(self.psid)? + len_determinant_len)
    }

    /// Encodes a WSM (headers followed by the payload).
    ///
    /// Fails if a parameter is out of range, if the payload is larger then
    /// [`WSM_MAX_PAYLOAD_LEN`] or if the resulting WSM is longer then `max_len`.
    pub fn to_bytes(&self, payload: &[u8], max_len: usize) -> Result<Vec<u8>, ValueError> {
        self.validate()?;
        if payload.len() > WSM_MAX_PAYLOAD_LEN {
            return Err(ValueError::WsmPayloadTooLarge {
                len: payload.len(),
                max: WSM_MAX_PAYLOAD_LEN,
            });
        }
        let len = self.header_len(payload.len())? + payload.len();
        if len > max_len {
            return Err(ValueError::WsmTooLarge { len, max: max_len });
        }
        let exts = self.extensions();

        let mut writer = BitWriter::with_capacity(len);

        // N-Header
        writer.write_bits(u64::from(WSM_SUBTYPE_NULL_NETWORKING), 4);
        writer.write_bit(!exts.is_empty());
        writer.write_bits(u64::from(WSMP_VERSION), 3);
        if !exts.is_empty() {
            write_extensions(&mut writer, &exts)?;
        }

        // T-Header
        writer.write_bits(u64::from(WSM_TPID), 8);
        write_psid(&mut writer, self.psid)?;
        writer.write_length(payload.len())?;
        writer.write_octets(payload);
        Ok(writer.into_bytes())
    }
}

/// A decoded WSM (header parameters and a reference to the payload).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WsmSlice<'a> {
    params: WsmParams,
    header_len: usize,
    payload: &'a [u8],
}

impl<'a> WsmSlice<'a> {
    /// Decodes the N-Header & T-Header of a WSM and returns them together
    /// with the payload. Bytes after the payload are ignored.
    pub fn from_slice(slice: &'a [u8]) -> Result<WsmSlice<'a>, Dot3Error> {
        let mut reader = BitReader::new(slice, Layer::WsmNHeader);

        // N-Header
        let subtype = reader.read_bits(4)? as u8;
        if WSM_SUBTYPE_NULL_NETWORKING != subtype {
            return Err(DecodeError::UnsupportedWsmSubtype(subtype).into());
        }
        let ext_present = reader.read_bit()?;
        let version = reader.read_bits(3)? as u8;
        if WSMP_VERSION != version {
            return Err(DecodeError::UnsupportedWsmVersion(version).into());
        }

        let mut params = WsmParams::new(0);
        if ext_present {
            for ext in read_extensions::<WsmNHeaderExt>(&mut reader)? {
                use WsmNHeaderExt::*;
                match ext {
                    ChannelNumber(chan_num) => params.chan_num = Some(chan_num),
                    DataRate(datarate) => params.datarate = Some(datarate),
                    TxPowerUsed(power) => params.transmit_power = Some(power),
                }
            }
        }

        // T-Header
        reader.set_layer(Layer::WsmTHeader);
        let tpid = reader.read_u8()?;
        if WSM_TPID != tpid {
            return Err(DecodeError::UnsupportedTpid(tpid).into());
        }
        params.psid = read_psid(&mut reader)?;
        let payload_len = reader.read_length()?;

        params.validate()?;
        if payload_len > WSM_MAX_PAYLOAD_LEN {
            return Err(ValueError::WsmPayloadTooLarge {
                len: payload_len,
                max: WSM_MAX_PAYLOAD_LEN,
            }
            .into());
        }

        // all header fields are octet aligned
        let header_len = reader.bit_pos() / 8;
        let rest = &slice[header_len..];
        if rest.len() < payload_len {
            return Err(LenError {
                required_len: header_len + payload_len,
                len: slice.len(),
                len_source: LenSource::LengthDeterminant,
                layer: Layer::WsmTHeader,
            }
            .into());
        }

        Ok(WsmSlice {
            params,
            header_len,
            payload: &rest[..payload_len],
        })
    }

    #[inline]
    pub fn params(&self) -> &WsmParams {
        &self.params
    }

    #[inline]
    pub fn psid(&self) -> u32 {
        self.params.psid
    }

    /// Length of the N-Header & T-Header.
    #[inline]
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    #[inline]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proptest_generators::*;
    use assert_matches::*;
    use proptest::prelude::*;

    #[test]
    fn minimal() {
        let bytes = WsmParams::new(32).to_bytes(&[], WSM_DEFAULT_MAX_LEN).unwrap();
        assert_eq!(vec![0x03, 0x00, 0x20, 0x00], bytes);
        assert_eq!(WSM_MIN_LEN, bytes.len());

        let slice = WsmSlice::from_slice(&bytes).unwrap();
        assert_eq!(&WsmParams::new(32), slice.params());
        assert_eq!(4, slice.header_len());
        assert!(slice.payload().is_empty());
    }

    #[test]
    fn with_extensions() {
        let params = WsmParams {
            psid: 0x87,
            chan_num: Some(172),
            datarate: Some(DataRate::MBPS_6),
            transmit_power: Some(-3),
        };
        let bytes = params.to_bytes(&[0xaa, 0xbb], WSM_DEFAULT_MAX_LEN).unwrap();
        assert_eq!(
            vec![
                0x0b, // subtype 0, ext present, version 3
                3, // extension count
                15, 1, 172, // channel number
                16, 1, 12 << 1, // data rate (7 bits)
                4, 1, 125, // tx power (-3 + 128)
                0, // tpid
                0x80, 0x07, // psid
                2, 0xaa, 0xbb,
            ],
            bytes
        );
        assert_eq!(bytes.len(), params.header_len(2).unwrap() + 2);

        let slice = WsmSlice::from_slice(&bytes).unwrap();
        assert_eq!(&params, slice.params());
        assert_eq!(&[0xaa, 0xbb], slice.payload());
    }

    #[test]
    fn construct_errors() {
        let max = WSM_DEFAULT_MAX_LEN;
        assert_eq!(
            Err(ValueError::InvalidPsid(PSID_MAX + 1)),
            WsmParams::new(PSID_MAX + 1).to_bytes(&[], max)
        );
        assert_eq!(
            Err(ValueError::InvalidChannelNumber(201)),
            WsmParams {
                chan_num: Some(201),
                ..WsmParams::new(1)
            }
            .to_bytes(&[], max)
        );
        assert_eq!(
            Err(ValueError::InvalidDataRate(13)),
            WsmParams {
                datarate: Some(DataRate(13)),
                ..WsmParams::new(1)
            }
            .to_bytes(&[], max)
        );
        assert_eq!(
            Err(ValueError::WsmPayloadTooLarge {
                len: WSM_MAX_PAYLOAD_LEN + 1,
                max: WSM_MAX_PAYLOAD_LEN
            }),
            WsmParams::new(1).to_bytes(&vec![0; WSM_MAX_PAYLOAD_LEN + 1], WSM_MAX_LEN)
        );
        // 5 byte header (2 byte length determinant) + 1396 byte payload
        assert_eq!(
            Err(ValueError::WsmTooLarge { len: 1401, max }),
            WsmParams::new(1).to_bytes(&vec![0; 1396], max)
        );
        // exactly at the maximum
        assert_eq!(
            1400,
            WsmParams::new(1).to_bytes(&vec![0; 1395], max).unwrap().len()
        );
    }

    #[test]
    fn largest_payload() {
        let payload = vec![0x11; WSM_MAX_PAYLOAD_LEN];
        let params = WsmParams {
            psid: PSID_MAX,
            chan_num: Some(200),
            datarate: Some(DataRate::MBPS_54),
            transmit_power: Some(127),
        };
        let bytes = params.to_bytes(&payload, WSM_MAX_LEN).unwrap();
        assert_eq!(WSM_MAX_LEN, bytes.len());
        assert_eq!(&payload[..], WsmSlice::from_slice(&bytes).unwrap().payload());
    }

    #[test]
    fn parse_errors() {
        assert_matches!(
            WsmSlice::from_slice(&[0x13, 0x00, 0x20, 0x00]),
            Err(Dot3Error::Decode(DecodeError::UnsupportedWsmSubtype(1)))
        );
        assert_matches!(
            WsmSlice::from_slice(&[0x02, 0x00, 0x20, 0x00]),
            Err(Dot3Error::Decode(DecodeError::UnsupportedWsmVersion(2)))
        );
        assert_matches!(
            WsmSlice::from_slice(&[0x03, 0x01, 0x20, 0x00]),
            Err(Dot3Error::Decode(DecodeError::UnsupportedTpid(1)))
        );
        assert_matches!(
            WsmSlice::from_slice(&[0x0b, 1, 99, 1, 0, 0x00, 0x20, 0x00]),
            Err(Dot3Error::Decode(DecodeError::InvalidExtensionId {
                layer: Layer::WsmNHeader,
                id: 99
            }))
        );
        assert_matches!(
            WsmSlice::from_slice(&[0x0b, 1, 15, 1, 201, 0x00, 0x20, 0x00]),
            Err(Dot3Error::Value(ValueError::InvalidChannelNumber(201)))
        );
        assert_matches!(
            WsmSlice::from_slice(&[0x03, 0x00, 0x20, 0x03, 1, 2]),
            Err(Dot3Error::Len(LenError {
                required_len: 7,
                len: 6,
                len_source: LenSource::LengthDeterminant,
                layer: Layer::WsmTHeader,
            }))
        );
    }

    #[test]
    fn truncated() {
        let bytes = WsmParams {
            chan_num: Some(178),
            ..WsmParams::new(0x4080)
        }
        .to_bytes(&[1, 2, 3], WSM_DEFAULT_MAX_LEN)
        .unwrap();
        for len in 0..bytes.len() {
            assert_matches!(WsmSlice::from_slice(&bytes[..len]), Err(Dot3Error::Len(_)));
        }
    }

    proptest! {
        #[test]
        fn construct_parse(
            params in wsm_params_any(),
            payload in proptest::collection::vec(any::<u8>(), 0..300),
        ) {
            let bytes = params.to_bytes(&payload, WSM_MAX_LEN).unwrap();
            prop_assert_eq!(bytes.len(), params.header_len(payload.len()).unwrap() + payload.len());
            let slice = WsmSlice::from_slice(&bytes).unwrap();
            prop_assert_eq!(&params, slice.params());
            prop_assert_eq!(&payload[..], slice.payload());
        }
    }
}
