use crate::err::{Dot3Error, ValueError};
use crate::uper::{BitReader, BitWriter};
use crate::validate;

/// EDCA parameters of one access category.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdcaParameterRecord {
    /// Access category index (0..=3).
    pub aci: u8,
    /// Admission control mandatory.
    pub acm: bool,
    /// Arbitration inter frame space number (0..=15).
    pub aifsn: u8,
    /// Exponent form of CWmin (0..=15).
    pub ecw_min: u8,
    /// Exponent form of CWmax (0..=15, not smaller then `ecw_min`).
    pub ecw_max: u8,
    /// TXOP limit in units of 32 microseconds.
    pub txop_limit: u16,
}

impl EdcaParameterRecord {
    pub fn validate(&self) -> Result<(), ValueError> {
        use ValueError::*;
        if !validate::is_valid_aci(self.aci) {
            return Err(InvalidAci(self.aci));
        }
        if !validate::is_valid_aifsn(self.aifsn) {
            return Err(InvalidAifsn(self.aifsn));
        }
        if !validate::is_valid_ecw(self.ecw_min) {
            return Err(InvalidEcwMin(self.ecw_min));
        }
        if !validate::is_valid_ecw(self.ecw_max) {
            return Err(InvalidEcwMax(self.ecw_max));
        }
        if self.ecw_max < self.ecw_min {
            return Err(EcwMaxLessThanEcwMin {
                ecw_min: self.ecw_min,
                ecw_max: self.ecw_max,
            });
        }
        Ok(())
    }

    pub(crate) fn write(&self, writer: &mut BitWriter) {
        // reserved bit
        writer.write_bit(false);
        writer.write_bits(u64::from(self.aci), 2);
        writer.write_bit(self.acm);
        writer.write_bits(u64::from(self.aifsn), 4);
        writer.write_bits(u64::from(self.ecw_max), 4);
        writer.write_bits(u64::from(self.ecw_min), 4);
        writer.write_bits(u64::from(self.txop_limit), 16);
    }

    pub(crate) fn read(reader: &mut BitReader) -> Result<EdcaParameterRecord, Dot3Error> {
        let _reserved = reader.read_bit()?;
        let aci = reader.read_bits(2)? as u8;
        let acm = reader.read_bit()?;
        let aifsn = reader.read_bits(4)? as u8;
        let ecw_max = reader.read_bits(4)? as u8;
        let ecw_min = reader.read_bits(4)? as u8;
        let txop_limit = reader.read_bits(16)? as u16;
        Ok(EdcaParameterRecord {
            aci,
            acm,
            aifsn,
            ecw_min,
            ecw_max,
            txop_limit,
        })
    }
}

/// EDCA parameters of all four access categories.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdcaParameterSet {
    pub ac_be: EdcaParameterRecord,
    pub ac_bk: EdcaParameterRecord,
    pub ac_vi: EdcaParameterRecord,
    pub ac_vo: EdcaParameterRecord,
}

impl EdcaParameterSet {
    pub fn validate(&self) -> Result<(), ValueError> {
        self.ac_be.validate()?;
        self.ac_bk.validate()?;
        self.ac_vi.validate()?;
        self.ac_vo.validate()
    }

    pub(crate) fn write(&self, writer: &mut BitWriter) {
        self.ac_be.write(writer);
        self.ac_bk.write(writer);
        self.ac_vi.write(writer);
        self.ac_vo.write(writer);
    }

    pub(crate) fn read(reader: &mut BitReader) -> Result<EdcaParameterSet, Dot3Error> {
        Ok(EdcaParameterSet {
            ac_be: EdcaParameterRecord::read(reader)?,
            ac_bk: EdcaParameterRecord::read(reader)?,
            ac_vi: EdcaParameterRecord::read(reader)?,
            ac_vo: EdcaParameterRecord::read(reader)?,
        })
    }
}

impl Default for EdcaParameterSet {
    /// EDCA parameters used for OCB communication (802.11 "dot11OCBActivated").
    fn default() -> Self {
        let record = |aci, aifsn, ecw_min, ecw_max| EdcaParameterRecord {
            aci,
            acm: false,
            aifsn,
            ecw_min,
            ecw_max,
            txop_limit: 0,
        };
        EdcaParameterSet {
            ac_be: record(0, 6, 4, 10),
            ac_bk: record(1, 9, 4, 10),
            ac_vi: record(2, 3, 3, 4),
            ac_vo: record(3, 2, 2, 3),
        }
    }
}
