use crate::err::{Dot3Error, Layer, ValueError};
use crate::extension::{read_extensions, write_extensions, ExtCodec, Extension};
use crate::uper::{BitReader, BitWriter};
use crate::{validate, DataRate, EdcaParameterSet};

/// Extension ids allowed in a WSA channel info.
pub const WCI_EXT_ID_EDCA_PARAMETER_SET: u8 = 12;
pub const WCI_EXT_ID_CHANNEL_ACCESS: u8 = 21;

/// Medium access of a channel (continuous or alternating with the CCH).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ChannelAccess {
    /// Continuous access (time slot 0 & 1).
    Continuous = 0,
    /// Alternating access in time slot 1 only.
    AlternatingSlot1 = 1,
    /// Alternating access in time slot 0 only.
    AlternatingSlot0 = 2,
    /// Any time slot.
    Any = 3,
}

impl ChannelAccess {
    pub fn from_u8(value: u8) -> Result<ChannelAccess, ValueError> {
        use ChannelAccess::*;
        match value {
            0 => Ok(Continuous),
            1 => Ok(AlternatingSlot1),
            2 => Ok(AlternatingSlot0),
            3 => Ok(Any),
            other => Err(ValueError::InvalidChannelAccess(other)),
        }
    }
}

/// Optional fields of a WSA channel info.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ChannelInfoExt {
    EdcaParameterSet(EdcaParameterSet),
    ChannelAccess(ChannelAccess),
}

impl ChannelInfoExt {
    fn read_edca_parameter_set(r: &mut BitReader) -> Result<ChannelInfoExt, Dot3Error> {
        Ok(ChannelInfoExt::EdcaParameterSet(EdcaParameterSet::read(r)?))
    }

    fn read_channel_access(r: &mut BitReader) -> Result<ChannelInfoExt, Dot3Error> {
        let raw = r.read_u8()?;
        Ok(ChannelInfoExt::ChannelAccess(ChannelAccess::from_u8(raw)?))
    }
}

impl Extension for ChannelInfoExt {
    const LAYER: Layer = Layer::ChannelInfo;
    const REGISTRY: &'static [ExtCodec<ChannelInfoExt>] = &[
        ExtCodec {
            id: WCI_EXT_ID_EDCA_PARAMETER_SET,
            decode: ChannelInfoExt::read_edca_parameter_set,
        },
        ExtCodec {
            id: WCI_EXT_ID_CHANNEL_ACCESS,
            decode: ChannelInfoExt::read_channel_access,
        },
    ];

    fn id(&self) -> u8 {
        match self {
            ChannelInfoExt::EdcaParameterSet(_) => WCI_EXT_ID_EDCA_PARAMETER_SET,
            ChannelInfoExt::ChannelAccess(_) => WCI_EXT_ID_CHANNEL_ACCESS,
        }
    }

    fn write_value(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        match self {
            ChannelInfoExt::EdcaParameterSet(set) => set.write(writer),
            ChannelInfoExt::ChannelAccess(access) => writer.write_bits(*access as u64, 8),
        }
        Ok(())
    }
}

/// Channel a WSA advertises services on.
///
/// The same type is used for the provider channel info (PCI) table.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChannelInfo {
    /// Operating class (17 for 10 MHz & 18 for 20 MHz channels in the 5.9 GHz band).
    pub operating_class: u8,
    pub chan_num: u8,
    /// Maximum transmit power level (in dBm).
    pub transmit_power_level: i8,
    pub datarate: DataRate,
    /// If set the data rate may be adapted by the sender.
    pub adaptable_datarate: bool,
    pub edca_param_set: Option<EdcaParameterSet>,
    pub channel_access: Option<ChannelAccess>,
}

impl ChannelInfo {
    /// Channel info with the default values (20 dBm, 6 Mbit/s,
    /// not adaptable, no optional fields).
    pub fn new(operating_class: u8, chan_num: u8) -> ChannelInfo {
        ChannelInfo {
            operating_class,
            chan_num,
            transmit_power_level: 20,
            datarate: DataRate::MBPS_6,
            adaptable_datarate: false,
            edca_param_set: None,
            channel_access: None,
        }
    }

    /// Checks that all values are in their allowed ranges.
    pub fn validate(&self) -> Result<(), ValueError> {
        if !validate::is_valid_channel_number(self.chan_num) {
            return Err(ValueError::InvalidChannelNumber(self.chan_num));
        }
        if !validate::is_valid_data_rate(self.datarate) {
            return Err(ValueError::InvalidDataRate(self.datarate.0));
        }
        if let Some(set) = &self.edca_param_set {
            set.validate()?;
        }
        Ok(())
    }

    fn extensions(&self) -> Vec<ChannelInfoExt> {
        let mut result = Vec::with_capacity(2);
        if let Some(set) = &self.edca_param_set {
            result.push(ChannelInfoExt::EdcaParameterSet(set.clone()));
        }
        if let Some(access) = self.channel_access {
            result.push(ChannelInfoExt::ChannelAccess(access));
        }
        result
    }

    pub(crate) fn write(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        let exts = self.extensions();
        writer.write_bits(u64::from(self.operating_class), 8);
        writer.write_bits(u64::from(self.chan_num), 8);
        writer.write_constrained(i64::from(self.transmit_power_level), -128, 127);
        writer.write_bit(self.adaptable_datarate);
        writer.write_bits(u64::from(self.datarate.0), 7);
        writer.write_bit(!exts.is_empty());
        if !exts.is_empty() {
            write_extensions(writer, &exts)?;
        }
        Ok(())
    }

    /// Reads a channel info without checking the value ranges (see
    /// [`ChannelInfo::validate`]).
    pub(crate) fn read(reader: &mut BitReader) -> Result<ChannelInfo, Dot3Error> {
        reader.set_layer(Layer::ChannelInfo);
        let operating_class = reader.read_u8()?;
        let chan_num = reader.read_u8()?;
        let transmit_power_level = reader.read_constrained(-128, 127)? as i8;
        let adaptable_datarate = reader.read_bit()?;
        let datarate = DataRate(reader.read_bits(7)? as u8);
        let mut result = ChannelInfo {
            operating_class,
            chan_num,
            transmit_power_level,
            datarate,
            adaptable_datarate,
            edca_param_set: None,
            channel_access: None,
        };
        if reader.read_bit()? {
            for ext in read_extensions::<ChannelInfoExt>(reader)? {
                match ext {
                    ChannelInfoExt::EdcaParameterSet(set) => result.edca_param_set = Some(set),
                    ChannelInfoExt::ChannelAccess(access) => result.channel_access = Some(access),
                }
            }
        }
        Ok(result)
    }
}
