/// Errors returned by the service table operations (capacity,
/// uniqueness & reference integrity).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TableError {
    /// PSR table already holds [`crate::PSR_NUM_MAX`] entries.
    PsrTableFull,
    /// A PSR with the given PSID is already registered.
    DuplicatedPsr(u32),
    /// No PSR with the given PSID is registered.
    NoSuchPsr(u32),
    /// PCI table already holds [`crate::PCI_NUM_MAX`] entries.
    PciTableFull,
    /// WSR table already holds [`crate::WSR_NUM_MAX`] entries.
    WsrTableFull,
    /// A WSR with the given PSID is already registered.
    DuplicatedWsr(u32),
    /// No WSR with the given PSID is registered.
    NoSuchWsr(u32),
    /// USR table already holds [`crate::USR_NUM_MAX`] entries.
    UsrTableFull,
    /// A USR with the given PSID is already registered.
    DuplicatedUsr(u32),
    /// No USR with the given PSID is registered.
    NoSuchUsr(u32),
    /// UAS table already holds [`crate::UAS_NUM_MAX`] entries.
    UasTableFull,
    /// The PCI entry for the given channel number (referenced by a PSR) does not exist.
    NoRelatedChannelInfo(u8),
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use TableError::*;
        match self {
            PsrTableFull => write!(f, "PSR table is full ({} entries).", crate::PSR_NUM_MAX),
            DuplicatedPsr(psid) => write!(f, "PSR with PSID {psid} is already registered."),
            NoSuchPsr(psid) => write!(f, "No PSR with PSID {psid} is registered."),
            PciTableFull => write!(f, "PCI table is full ({} entries).", crate::PCI_NUM_MAX),
            WsrTableFull => write!(f, "WSR table is full ({} entries).", crate::WSR_NUM_MAX),
            DuplicatedWsr(psid) => write!(f, "WSR with PSID {psid} is already registered."),
            NoSuchWsr(psid) => write!(f, "No WSR with PSID {psid} is registered."),
            UsrTableFull => write!(f, "USR table is full ({} entries).", crate::USR_NUM_MAX),
            DuplicatedUsr(psid) => write!(f, "USR with PSID {psid} is already registered."),
            NoSuchUsr(psid) => write!(f, "No USR with PSID {psid} is registered."),
            UasTableFull => write!(f, "UAS table is full ({} entries).", crate::UAS_NUM_MAX),
            NoRelatedChannelInfo(chan) => write!(f, "No channel info (PCI) for channel {chan} is registered."),
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_write() {
        use TableError::*;
        for value in [PsrTableFull, DuplicatedPsr(1), NoRelatedChannelInfo(172)].iter() {
            let _ = format!("{:?}", value);
        }
    }

    #[test]
    fn fmt() {
        use TableError::*;
        let tests = [
            (PsrTableFull, "PSR table is full (128 entries)."),
            (DuplicatedUsr(32), "USR with PSID 32 is already registered."),
            (NoRelatedChannelInfo(178), "No channel info (PCI) for channel 178 is registered."),
        ];
        for t in tests {
            assert_eq!(format!("{}", t.0), t.1);
        }
    }
}
