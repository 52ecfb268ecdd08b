use crate::err::{self, DecodeError, Dot3Error, Layer, LenError, LenSource, ValueError};

/// Number of bits needed to encode a constrained whole number in the range `lb..=ub`.
#[inline]
pub(crate) fn range_bits(lb: i64, ub: i64) -> u32 {
    let range = (ub - lb) as u64;
    if range == 0 {
        0
    } else {
        64 - range.leading_zeros()
    }
}

/// Writes values bit by bit (most significant bit first) as
/// required by the unaligned packed encoding rules (UPER).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter {
            bytes: Vec::new(),
            bit_len: 0,
        }
    }

    pub fn with_capacity(bytes: usize) -> BitWriter {
        BitWriter {
            bytes: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    /// Number of bits written so far.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn write_bit(&mut self, bit: bool) {
        if 0 == self.bit_len % 8 {
            self.bytes.push(0);
        }
        if bit {
            let idx = self.bit_len / 8;
            self.bytes[idx] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Writes the lowest `bits` bits of `value`.
    pub fn write_bits(&mut self, value: u64, bits: u32) {
        debug_assert!(bits <= 64);
        for i in (0..bits).rev() {
            self.write_bit(0 != (value >> i) & 1);
        }
    }

    /// Writes a constrained whole number (X.691 10.5).
    pub fn write_constrained(&mut self, value: i64, lb: i64, ub: i64) {
        debug_assert!(lb <= value && value <= ub);
        self.write_bits((value - lb) as u64, range_bits(lb, ub));
    }

    /// Writes an unconstrained length determinant (X.691 10.9). Lengths
    /// that would require fragmentation are rejected.
    pub fn write_length(&mut self, len: usize) -> Result<(), ValueError> {
        if len < 0x80 {
            self.write_bits(len as u64, 8);
            Ok(())
        } else if len < 0x4000 {
            self.write_bits(0x8000 | len as u64, 16);
            Ok(())
        } else {
            Err(ValueError::LengthTooLarge(len))
        }
    }

    pub fn write_octets(&mut self, octets: &[u8]) {
        if 0 == self.bit_len % 8 {
            self.bytes.extend_from_slice(octets);
            self.bit_len += octets.len() * 8;
        } else {
            for octet in octets {
                self.write_bits(u64::from(*octet), 8);
            }
        }
    }

    /// Writes the complete encoding of a value as an open type
    /// (length determinant followed by the octets).
    pub fn write_open_type(&mut self, content: &[u8]) -> Result<(), ValueError> {
        // an empty encoding still occupies one octet (X.691 11.2.1)
        if content.is_empty() {
            self.write_length(1)?;
            self.write_octets(&[0]);
        } else {
            self.write_length(content.len())?;
            self.write_octets(content);
        }
        Ok(())
    }

    /// Returns the written bits padded with zeros to a full octet.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads UPER encoded values bit by bit from a slice.
///
/// Every read checks the remaining length first, so truncated or
/// malicious input results in an error and never in a panic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
    layer: Layer,
    len_source: LenSource,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8], layer: Layer) -> BitReader<'a> {
        BitReader {
            data,
            bit_pos: 0,
            layer,
            len_source: LenSource::Slice,
        }
    }

    /// Reader over the contents of an open type (the length was given by a
    /// length determinant).
    pub fn for_open_type(data: &'a [u8], layer: Layer) -> BitReader<'a> {
        BitReader {
            data,
            bit_pos: 0,
            layer,
            len_source: LenSource::LengthDeterminant,
        }
    }

    /// Sets the layer that is reported in errors.
    #[inline]
    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    #[inline]
    pub fn bit_pos(&self) -> usize {
        self.bit_pos
    }

    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    fn len_error(&self, required_bits: usize, len_source: LenSource) -> LenError {
        LenError {
            required_len: (self.bit_pos + required_bits + 7) / 8,
            len: self.data.len(),
            len_source,
            layer: self.layer,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, LenError> {
        if self.remaining_bits() < 1 {
            return Err(self.len_error(1, self.len_source));
        }
        let byte = self.data[self.bit_pos / 8];
        let bit = 0 != byte & (0x80 >> (self.bit_pos % 8));
        self.bit_pos += 1;
        Ok(bit)
    }

    pub fn read_bits(&mut self, bits: u32) -> Result<u64, LenError> {
        debug_assert!(bits <= 64);
        if self.remaining_bits() < bits as usize {
            return Err(self.len_error(bits as usize, self.len_source));
        }
        let mut value = 0u64;
        for _ in 0..bits {
            let byte = self.data[self.bit_pos / 8];
            let bit = (byte >> (7 - (self.bit_pos % 8))) & 1;
            value = (value << 1) | u64::from(bit);
            self.bit_pos += 1;
        }
        Ok(value)
    }

    /// Reads a `u8` from the next 8 bits.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, LenError> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Reads a constrained whole number in the range `lb..=ub`.
    pub fn read_constrained(&mut self, lb: i64, ub: i64) -> Result<i64, Dot3Error> {
        let raw = self.read_bits(range_bits(lb, ub))?;
        let value = lb + raw as i64;
        if value > ub {
            Err(DecodeError::ConstraintViolation {
                layer: self.layer,
                value,
            }
            .into())
        } else {
            Ok(value)
        }
    }

    /// Reads an unconstrained length determinant.
    pub fn read_length(&mut self) -> Result<usize, Dot3Error> {
        let first = self.read_u8()?;
        if 0 == first & 0x80 {
            Ok(usize::from(first))
        } else if 0x80 == first & 0xc0 {
            let second = self.read_u8()?;
            Ok((usize::from(first & 0x3f) << 8) | usize::from(second))
        } else {
            Err(DecodeError::FragmentedLength(self.layer).into())
        }
    }

    pub fn read_octets(&mut self, len: usize) -> Result<Vec<u8>, LenError> {
        self.read_octets_with_source(len, self.len_source)
    }

    fn read_octets_with_source(
        &mut self,
        len: usize,
        len_source: LenSource,
    ) -> Result<Vec<u8>, LenError> {
        // check before allocating anything
        if self.remaining_bits() / 8 < len {
            return Err(self.len_error(len * 8, len_source));
        }
        if 0 == self.bit_pos % 8 {
            let start = self.bit_pos / 8;
            self.bit_pos += len * 8;
            Ok(self.data[start..start + len].to_vec())
        } else {
            let mut result = Vec::with_capacity(len);
            for _ in 0..len {
                result.push(self.read_u8()?);
            }
            Ok(result)
        }
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], LenError> {
        if self.remaining_bits() / 8 < N {
            return Err(self.len_error(N * 8, self.len_source));
        }
        let mut result = [0u8; N];
        for b in result.iter_mut() {
            *b = self.read_u8()?;
        }
        Ok(result)
    }

    /// Reads the octets of an open type.
    pub fn read_open_type(&mut self) -> Result<Vec<u8>, Dot3Error> {
        let len = self.read_length()?;
        Ok(self.read_octets_with_source(len, LenSource::LengthDeterminant)?)
    }
}

/// Converts a length error of a nested reader into an error of the outer layer.
#[inline]
pub(crate) fn relayer(err: Dot3Error, layer: Layer) -> Dot3Error {
    match err {
        Dot3Error::Len(len_err) => Dot3Error::Len(err::LenError { layer, ..len_err }),
        other => other,
    }
}
