use crate::err::{DecodeError, Dot3Error, Layer, ValueError};
use crate::uper::{BitReader, BitWriter};
use crate::PSID_MAX;

/// Upper bounds (inclusive) of the values encodable with 1, 2, 3 & 4 bytes.
const PSID_1BYTE_MAX: u32 = 0x7f;
const PSID_2BYTE_MAX: u32 = 0x407f;
const PSID_3BYTE_MAX: u32 = 0x20_407f;

/// Offsets subtracted from the value before it is written with 2, 3 & 4 bytes.
const PSID_2BYTE_OFFSET: u32 = PSID_1BYTE_MAX + 1;
const PSID_3BYTE_OFFSET: u32 = PSID_2BYTE_MAX + 1;
const PSID_4BYTE_OFFSET: u32 = PSID_3BYTE_MAX + 1;

/// Returns the number of bytes the p-encoding of the given PSID takes up.
pub fn psid_encoded_len(psid: u32) -> Result<usize, ValueError> {
    if psid <= PSID_1BYTE_MAX {
        Ok(1)
    } else if psid <= PSID_2BYTE_MAX {
        Ok(2)
    } else if psid <= PSID_3BYTE_MAX {
        Ok(3)
    } else if psid <= PSID_MAX {
        Ok(4)
    } else {
        Err(ValueError::InvalidPsid(psid))
    }
}

/// Encodes a PSID with the shortest possible p-encoding
/// (1 to 4 bytes, the leading bits announce the length).
///
/// ```
/// assert_eq!(vec![0x20], dot3::encode_psid(0x20).unwrap());
/// assert_eq!(vec![0x80, 0x07], dot3::encode_psid(0x87).unwrap());
/// ```
pub fn encode_psid(psid: u32) -> Result<Vec<u8>, ValueError> {
    let mut writer = BitWriter::with_capacity(4);
    write_psid(&mut writer, psid)?;
    Ok(writer.into_bytes())
}

/// Decodes a p-encoded PSID from the start of the given slice.
///
/// Bytes after the encoded PSID are ignored.
pub fn decode_psid(bytes: &[u8]) -> Result<u32, Dot3Error> {
    let mut reader = BitReader::new(bytes, Layer::Psid);
    read_psid(&mut reader)
}

pub(crate) fn write_psid(writer: &mut BitWriter, psid: u32) -> Result<(), ValueError> {
    match psid_encoded_len(psid)? {
        1 => writer.write_bits(u64::from(psid), 8),
        2 => writer.write_bits(0x8000 | u64::from(psid - PSID_2BYTE_OFFSET), 16),
        3 => writer.write_bits(0xc0_0000 | u64::from(psid - PSID_3BYTE_OFFSET), 24),
        _ => writer.write_bits(0xe000_0000 | u64::from(psid - PSID_4BYTE_OFFSET), 32),
    }
    Ok(())
}

pub(crate) fn read_psid(reader: &mut BitReader) -> Result<u32, Dot3Error> {
    let first = reader.read_u8()?;
    let psid = if 0 == first & 0x80 {
        u32::from(first)
    } else if 0x80 == first & 0xc0 {
        let rest = reader.read_bits(8)? as u32;
        ((u32::from(first & 0x3f) << 8) | rest) + PSID_2BYTE_OFFSET
    } else if 0xc0 == first & 0xe0 {
        let rest = reader.read_bits(16)? as u32;
        ((u32::from(first & 0x1f) << 16) | rest) + PSID_3BYTE_OFFSET
    } else if 0xe0 == first & 0xf0 {
        let rest = reader.read_bits(24)? as u32;
        ((u32::from(first & 0x0f) << 24) | rest) + PSID_4BYTE_OFFSET
    } else {
        return Err(DecodeError::InvalidPsidFormat.into());
    };
    Ok(psid)
}
