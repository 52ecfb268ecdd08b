use crate::err::{Dot3Error, TableError, ValueError};
use crate::*;
use std::collections::HashSet;

/// WSM service request, registers interest in received WSMs with the PSID.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Dot3Wsr {
    pub psid: u32,
}

/// Set of PSIDs the application is interested in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct WsrTable {
    psids: HashSet<u32>,
}

impl WsrTable {
    pub fn new() -> WsrTable {
        WsrTable {
            psids: HashSet::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.psids.len()
    }

    #[inline]
    pub fn contains(&self, psid: u32) -> bool {
        self.psids.contains(&psid)
    }

    /// Adds a request. Returns the new number of entries.
    pub fn add(&mut self, wsr: &Dot3Wsr) -> Result<usize, Dot3Error> {
        if !validate::is_valid_psid(wsr.psid) {
            return Err(ValueError::InvalidPsid(wsr.psid).into());
        }
        if self.psids.contains(&wsr.psid) {
            return Err(TableError::DuplicatedWsr(wsr.psid).into());
        }
        if self.psids.len() >= WSR_NUM_MAX {
            return Err(TableError::WsrTableFull.into());
        }
        self.psids.insert(wsr.psid);
        Ok(self.psids.len())
    }

    /// Removes a request. Returns the remaining number of entries.
    pub fn delete(&mut self, psid: u32) -> Result<usize, Dot3Error> {
        if self.psids.remove(&psid) {
            Ok(self.psids.len())
        } else {
            Err(TableError::NoSuchWsr(psid).into())
        }
    }

    pub fn clear(&mut self) {
        self.psids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::*;

    #[test]
    fn add_delete() {
        let mut table = WsrTable::new();
        assert_eq!(1, table.add(&Dot3Wsr { psid: 32 }).unwrap());
        assert!(table.contains(32));
        assert!(!table.contains(33));
        assert_matches!(
            table.add(&Dot3Wsr { psid: 32 }),
            Err(Dot3Error::Table(TableError::DuplicatedWsr(32)))
        );
        assert_matches!(
            table.add(&Dot3Wsr { psid: PSID_MAX + 1 }),
            Err(Dot3Error::Value(ValueError::InvalidPsid(_)))
        );
        assert_eq!(0, table.delete(32).unwrap());
        assert_matches!(
            table.delete(32),
            Err(Dot3Error::Table(TableError::NoSuchWsr(32)))
        );
    }

    #[test]
    fn full() {
        let mut table = WsrTable::new();
        for psid in 0..WSR_NUM_MAX as u32 {
            table.add(&Dot3Wsr { psid }).unwrap();
        }
        assert_matches!(
            table.add(&Dot3Wsr {
                psid: WSR_NUM_MAX as u32
            }),
            Err(Dot3Error::Table(TableError::WsrTableFull))
        );
        table.clear();
        assert_eq!(0, table.len());
    }
}
