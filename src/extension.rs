use crate::err::{DecodeError, Dot3Error, Layer, ValueError};
use crate::uper::{relayer, BitReader, BitWriter};

/// Decoder for the value of one extension id.
pub(crate) struct ExtCodec<E> {
    pub id: u8,
    pub decode: fn(&mut BitReader) -> Result<E, Dot3Error>,
}

/// Extension (id + open type value) that can be part of an extension list.
///
/// Each implementing type carries a registry that maps the extension ids
/// allowed in its layer to their decoders. Ids missing in the registry
/// are reported as [`DecodeError::InvalidExtensionId`].
pub(crate) trait Extension: Sized + 'static {
    /// Layer the extension list belongs to (used in errors).
    const LAYER: Layer;

    /// Decoders for all extension ids known in the layer.
    const REGISTRY: &'static [ExtCodec<Self>];

    /// Extension id written before the value.
    fn id(&self) -> u8;

    /// Writes the value (without the open type wrapping).
    fn write_value(&self, writer: &mut BitWriter) -> Result<(), ValueError>;
}

pub(crate) fn write_extension<E: Extension>(
    writer: &mut BitWriter,
    ext: &E,
) -> Result<(), ValueError> {
    let mut value = BitWriter::new();
    ext.write_value(&mut value)?;
    writer.write_bits(u64::from(ext.id()), 8);
    writer.write_open_type(&value.into_bytes())
}

/// Writes a list of extensions (count followed by the extensions).
pub(crate) fn write_extensions<E: Extension>(
    writer: &mut BitWriter,
    exts: &[E],
) -> Result<(), ValueError> {
    writer.write_length(exts.len())?;
    for ext in exts {
        write_extension(writer, ext)?;
    }
    Ok(())
}

pub(crate) fn read_extension<E: Extension>(reader: &mut BitReader) -> Result<E, Dot3Error> {
    let id = reader.read_u8()?;
    let codec = E::REGISTRY
        .iter()
        .find(|codec| codec.id == id)
        .ok_or(DecodeError::InvalidExtensionId { layer: E::LAYER, id })?;
    let value = reader.read_open_type()?;
    let mut value_reader = BitReader::for_open_type(&value, E::LAYER);
    (codec.decode)(&mut value_reader).map_err(|err| relayer(err, E::LAYER))
}

/// Reads a list of extensions (count followed by the extensions).
pub(crate) fn read_extensions<E: Extension>(reader: &mut BitReader) -> Result<Vec<E>, Dot3Error> {
    let count = reader.read_length()?;
    // the count is not trusted for preallocation
    let mut result = Vec::with_capacity(count.min(8));
    for _ in 0..count {
        result.push(read_extension(reader)?);
    }
    Ok(result)
}
