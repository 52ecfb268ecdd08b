use crate::err::{DecodeError, Dot3Error, Layer, ValueError};
use crate::extension::{read_extensions, write_extensions};
use crate::uper::{BitReader, BitWriter};
use crate::wsa_header::WsaHeaderExt;
use crate::*;
use log::debug;

/// Message type of a WAVE service advertisement.
const WSA_MESSAGE_ID: u8 = 0;

/// Decoded or to be encoded WAVE service advertisement.
///
/// Service infos reference their channel info with a 1 based
/// [`ServiceInfo::channel_index`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Wsa {
    pub header: WsaHeader,
    pub service_infos: Vec<ServiceInfo>,
    pub channel_infos: Vec<ChannelInfo>,
    pub routing_advertisement: Option<RoutingAdvertisement>,
}

impl Wsa {
    /// WSA containing only a header.
    pub fn new(header: WsaHeader) -> Wsa {
        Wsa {
            header,
            service_infos: Vec::new(),
            channel_infos: Vec::new(),
            routing_advertisement: None,
        }
    }

    /// Returns the channel info a service info refers to.
    pub fn channel_info_for(&self, wsi: &ServiceInfo) -> Option<&ChannelInfo> {
        usize::from(wsi.channel_index)
            .checked_sub(1)
            .and_then(|idx| self.channel_infos.get(idx))
    }

    /// Checks all values and the references between the service infos and
    /// the channel infos.
    pub fn validate(&self) -> Result<(), ValueError> {
        self.header.validate()?;
        if self.service_infos.len() > WSI_NUM_MAX {
            return Err(ValueError::TooManyServiceInfos(self.service_infos.len()));
        }
        if self.channel_infos.len() > WCI_NUM_MAX {
            return Err(ValueError::TooManyChannelInfos(self.channel_infos.len()));
        }
        for wsi in &self.service_infos {
            wsi.validate()?;
            if self.channel_info_for(wsi).is_none() {
                return Err(ValueError::InvalidChannelIndex(wsi.channel_index));
            }
        }
        for wci in &self.channel_infos {
            wci.validate()?;
        }
        if let Some(wra) = &self.routing_advertisement {
            wra.validate()?;
        }
        Ok(())
    }

    /// Encodes the WSA after validating it.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ValueError> {
        self.validate()?;

        let hdr_exts = self.header.extensions();
        let mut writer = BitWriter::with_capacity(128);
        writer.write_bits(u64::from(WSA_MESSAGE_ID), 4);
        writer.write_bits(u64::from(WSA_VERSION), 4);
        writer.write_bit(!hdr_exts.is_empty());
        writer.write_bit(!self.service_infos.is_empty());
        writer.write_bit(!self.channel_infos.is_empty());
        writer.write_bit(self.routing_advertisement.is_some());
        writer.write_bits(u64::from(self.header.wsa_id), 4);
        writer.write_bits(u64::from(self.header.content_count), 4);
        if !hdr_exts.is_empty() {
            write_extensions(&mut writer, &hdr_exts)?;
        }
        if !self.service_infos.is_empty() {
            writer.write_length(self.service_infos.len())?;
            for wsi in &self.service_infos {
                wsi.write(&mut writer)?;
            }
        }
        if !self.channel_infos.is_empty() {
            writer.write_length(self.channel_infos.len())?;
            for wci in &self.channel_infos {
                wci.write(&mut writer)?;
            }
        }
        if let Some(wra) = &self.routing_advertisement {
            wra.write(&mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    /// Decodes a WSA.
    ///
    /// The header & routing advertisement are validated. Service infos
    /// and channel infos are only decoded, use their `validate` methods to
    /// check them individually. More then [`WSI_NUM_MAX`] service infos or
    /// [`WCI_NUM_MAX`] channel infos are decoded but dropped.
    pub fn from_slice(slice: &[u8]) -> Result<Wsa, Dot3Error> {
        let mut reader = BitReader::new(slice, Layer::WsaHeader);

        let message_id = reader.read_bits(4)? as u8;
        if WSA_MESSAGE_ID != message_id {
            return Err(DecodeError::UnsupportedWsaMessageType(message_id).into());
        }
        let version = reader.read_bits(4)? as u8;
        if WSA_VERSION != version {
            return Err(DecodeError::UnsupportedWsaVersion(version).into());
        }
        let hdr_ext_present = reader.read_bit()?;
        let wsis_present = reader.read_bit()?;
        let wcis_present = reader.read_bit()?;
        let wra_present = reader.read_bit()?;
        let wsa_id = reader.read_bits(4)? as u8;
        let content_count = reader.read_bits(4)? as u8;

        let mut header = WsaHeader::new(wsa_id, content_count);
        if hdr_ext_present {
            for ext in read_extensions::<WsaHeaderExt>(&mut reader)? {
                header.apply_extension(ext);
            }
        }
        header.validate()?;

        let mut result = Wsa::new(header);
        if wsis_present {
            let count = reader.read_length()?;
            result.service_infos.reserve(count.min(WSI_NUM_MAX));
            for _ in 0..count {
                let wsi = ServiceInfo::read(&mut reader)?;
                if result.service_infos.len() < WSI_NUM_MAX {
                    result.service_infos.push(wsi);
                }
            }
            if count > WSI_NUM_MAX {
                debug!(
                    "WSA contains {} service infos, only the first {} are kept",
                    count, WSI_NUM_MAX
                );
            }
        }
        if wcis_present {
            let count = reader.read_length()?;
            result.channel_infos.reserve(count.min(WCI_NUM_MAX));
            for _ in 0..count {
                let wci = ChannelInfo::read(&mut reader)?;
                if result.channel_infos.len() < WCI_NUM_MAX {
                    result.channel_infos.push(wci);
                }
            }
            if count > WCI_NUM_MAX {
                debug!(
                    "WSA contains {} channel infos, only the first {} are kept",
                    count, WCI_NUM_MAX
                );
            }
        }
        if wra_present {
            let wra = RoutingAdvertisement::read(&mut reader)?;
            wra.validate()?;
            result.routing_advertisement = Some(wra);
        }
        Ok(result)
    }
}
