use crate::err::{DecodeError, Dot3Error, Layer, ValueError};
use crate::extension::{ExtCodec, Extension};
use crate::uper::{BitReader, BitWriter};
use crate::validate::{self, *};

/// Extension ids allowed in the WSA header.
pub const WSA_EXT_ID_REPEAT_RATE: u8 = 17;
pub const WSA_EXT_ID_2D_LOCATION: u8 = 5;
pub const WSA_EXT_ID_3D_LOCATION: u8 = 6;
pub const WSA_EXT_ID_ADVERTISER_ID: u8 = 7;

/// Position of the WSA transmitter (latitude & longitude in 1/10 micro degrees).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TwoDLocation {
    pub latitude: i32,
    pub longitude: i32,
}

/// Position of the WSA transmitter including the elevation (in decimeters).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ThreeDLocation {
    pub latitude: i32,
    pub longitude: i32,
    pub elevation: i32,
}

fn check_lat_lon(latitude: i32, longitude: i32) -> Result<(), ValueError> {
    if !is_valid_latitude(latitude) {
        return Err(ValueError::InvalidLatitude(latitude));
    }
    if !is_valid_longitude(longitude) {
        return Err(ValueError::InvalidLongitude(longitude));
    }
    Ok(())
}

fn write_lat_lon(writer: &mut BitWriter, latitude: i32, longitude: i32) {
    writer.write_constrained(
        i64::from(latitude),
        i64::from(LATITUDE_MIN),
        i64::from(LATITUDE_MAX),
    );
    writer.write_constrained(
        i64::from(longitude),
        i64::from(LONGITUDE_MIN),
        i64::from(LONGITUDE_MAX),
    );
}

fn read_lat_lon(reader: &mut BitReader) -> Result<(i32, i32), Dot3Error> {
    let latitude = reader.read_constrained(i64::from(LATITUDE_MIN), i64::from(LATITUDE_MAX))?;
    let longitude = reader.read_constrained(i64::from(LONGITUDE_MIN), i64::from(LONGITUDE_MAX))?;
    Ok((latitude as i32, longitude as i32))
}

/// Optional fields of the WSA header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum WsaHeaderExt {
    RepeatRate(u8),
    TwoDLocation(TwoDLocation),
    ThreeDLocation(ThreeDLocation),
    AdvertiserId(String),
}

impl WsaHeaderExt {
    fn read_repeat_rate(r: &mut BitReader) -> Result<WsaHeaderExt, Dot3Error> {
        Ok(WsaHeaderExt::RepeatRate(r.read_u8()?))
    }

    fn read_2d_location(r: &mut BitReader) -> Result<WsaHeaderExt, Dot3Error> {
        let (latitude, longitude) = read_lat_lon(r)?;
        Ok(WsaHeaderExt::TwoDLocation(TwoDLocation { latitude, longitude }))
    }

    fn read_3d_location(r: &mut BitReader) -> Result<WsaHeaderExt, Dot3Error> {
        let (latitude, longitude) = read_lat_lon(r)?;
        let elevation =
            r.read_constrained(i64::from(ELEVATION_MIN), i64::from(ELEVATION_MAX))? as i32;
        Ok(WsaHeaderExt::ThreeDLocation(ThreeDLocation {
            latitude,
            longitude,
            elevation,
        }))
    }

    fn read_advertiser_id(r: &mut BitReader) -> Result<WsaHeaderExt, Dot3Error> {
        // UTF8String (SIZE(1..32)): length constrained to 5 bits (len - 1)
        let len = r.read_bits(5)? as usize + 1;
        let octets = r.read_octets(len)?;
        let id = String::from_utf8(octets).map_err(|_| DecodeError::InvalidUtf8(Layer::WsaHeader))?;
        Ok(WsaHeaderExt::AdvertiserId(id))
    }
}

impl Extension for WsaHeaderExt {
    const LAYER: Layer = Layer::WsaHeader;
    const REGISTRY: &'static [ExtCodec<WsaHeaderExt>] = &[
        ExtCodec {
            id: WSA_EXT_ID_REPEAT_RATE,
            decode: WsaHeaderExt::read_repeat_rate,
        },
        ExtCodec {
            id: WSA_EXT_ID_2D_LOCATION,
            decode: WsaHeaderExt::read_2d_location,
        },
        ExtCodec {
            id: WSA_EXT_ID_3D_LOCATION,
            decode: WsaHeaderExt::read_3d_location,
        },
        ExtCodec {
            id: WSA_EXT_ID_ADVERTISER_ID,
            decode: WsaHeaderExt::read_advertiser_id,
        },
    ];

    fn id(&self) -> u8 {
        use WsaHeaderExt::*;
        match self {
            RepeatRate(_) => WSA_EXT_ID_REPEAT_RATE,
            TwoDLocation(_) => WSA_EXT_ID_2D_LOCATION,
            ThreeDLocation(_) => WSA_EXT_ID_3D_LOCATION,
            AdvertiserId(_) => WSA_EXT_ID_ADVERTISER_ID,
        }
    }

    fn write_value(&self, writer: &mut BitWriter) -> Result<(), ValueError> {
        use WsaHeaderExt::*;
        match self {
            RepeatRate(rate) => writer.write_bits(u64::from(*rate), 8),
            TwoDLocation(loc) => write_lat_lon(writer, loc.latitude, loc.longitude),
            ThreeDLocation(loc) => {
                write_lat_lon(writer, loc.latitude, loc.longitude);
                writer.write_constrained(
                    i64::from(loc.elevation),
                    i64::from(ELEVATION_MIN),
                    i64::from(ELEVATION_MAX),
                );
            }
            AdvertiserId(id) => {
                let len = id.len();
                if !is_valid_advertiser_id_len(len) {
                    return Err(ValueError::InvalidAdvertiserIdLen(len));
                }
                writer.write_bits(len as u64 - 1, 5);
                writer.write_octets(id.as_bytes());
            }
        }
        Ok(())
    }
}

/// Header of a WAVE service advertisement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WsaHeader {
    /// Identifier of the WSA (0..=15).
    pub wsa_id: u8,
    /// Incremented by the provider whenever the content changes (0..=15).
    pub content_count: u8,
    /// Number of WSA transmissions per 5 seconds.
    pub repeat_rate: Option<u8>,
    pub twod_location: Option<TwoDLocation>,
    pub threed_location: Option<ThreeDLocation>,
    /// Name of the advertiser (1 to 32 bytes of UTF-8).
    pub advertiser_id: Option<String>,
}

impl WsaHeader {
    /// Header without any optional fields.
    pub fn new(wsa_id: u8, content_count: u8) -> WsaHeader {
        WsaHeader {
            wsa_id,
            content_count,
            repeat_rate: None,
            twod_location: None,
            threed_location: None,
            advertiser_id: None,
        }
    }

    /// Checks that all values are in their allowed ranges.
    pub fn validate(&self) -> Result<(), ValueError> {
        use ValueError::*;
        if !validate::is_valid_wsa_id(self.wsa_id) {
            return Err(InvalidWsaId(self.wsa_id));
        }
        if !validate::is_valid_content_count(self.content_count) {
            return Err(InvalidContentCount(self.content_count));
        }
        if let Some(loc) = &self.twod_location {
            check_lat_lon(loc.latitude, loc.longitude)?;
        }
        if let Some(loc) = &self.threed_location {
            check_lat_lon(loc.latitude, loc.longitude)?;
            if !is_valid_elevation(loc.elevation) {
                return Err(InvalidElevation(loc.elevation));
            }
        }
        if let Some(id) = &self.advertiser_id {
            if !is_valid_advertiser_id_len(id.len()) {
                return Err(InvalidAdvertiserIdLen(id.len()));
            }
        }
        Ok(())
    }

    pub(crate) fn extensions(&self) -> Vec<WsaHeaderExt> {
        let mut result = Vec::with_capacity(4);
        if let Some(rate) = self.repeat_rate {
            result.push(WsaHeaderExt::RepeatRate(rate));
        }
        if let Some(loc) = &self.twod_location {
            result.push(WsaHeaderExt::TwoDLocation(loc.clone()));
        }
        if let Some(loc) = &self.threed_location {
            result.push(WsaHeaderExt::ThreeDLocation(loc.clone()));
        }
        if let Some(id) = &self.advertiser_id {
            result.push(WsaHeaderExt::AdvertiserId(id.clone()));
        }
        result
    }

    pub(crate) fn apply_extension(&mut self, ext: WsaHeaderExt) {
        use WsaHeaderExt::*;
        match ext {
            RepeatRate(rate) => self.repeat_rate = Some(rate),
            TwoDLocation(loc) => self.twod_location = Some(loc),
            ThreeDLocation(loc) => self.threed_location = Some(loc),
            AdvertiserId(id) => self.advertiser_id = Some(id),
        }
    }
}
