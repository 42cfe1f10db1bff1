use super::{Entry, EntryKind};
use crate::Error;

const BYTES_IN_U64: usize = 8;
const BYTES_IN_U32: usize = 4;
const BYTES_IN_U16: usize = 2;

/// Fixed part of a record: kind, fblock, size, three timestamps, name length.
const FIXED_LEN: usize = 1 + BYTES_IN_U32 + 4 * BYTES_IN_U64 + BYTES_IN_U16;

/// On-disk form of one directory child, stored in the owning directory's
/// content chain. All integers little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    pub kind: EntryKind,
    pub fblock: u32,
    pub size: u64,
    pub ctime: u64,
    pub mtime: u64,
    pub atime: u64,
    pub name: String,
}

impl ChildRecord {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            kind: entry.kind,
            fblock: entry.fblock,
            size: entry.size,
            ctime: entry.ctime,
            mtime: entry.mtime,
            atime: entry.atime,
            name: entry.name.clone(),
        }
    }

    pub fn into_entry(self) -> Entry {
        Entry {
            name: self.name,
            kind: self.kind,
            size: self.size,
            ctime: self.ctime,
            mtime: self.mtime,
            atime: self.atime,
            fblock: self.fblock,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FIXED_LEN + self.name.len());
        bytes.push(match self.kind {
            EntryKind::File => 0,
            EntryKind::Directory => 1,
        });
        bytes.extend_from_slice(&self.fblock.to_le_bytes());
        bytes.extend_from_slice(&self.size.to_le_bytes());
        bytes.extend_from_slice(&self.ctime.to_le_bytes());
        bytes.extend_from_slice(&self.mtime.to_le_bytes());
        bytes.extend_from_slice(&self.atime.to_le_bytes());
        bytes.extend_from_slice(&(self.name.len() as u16).to_le_bytes());
        bytes.extend_from_slice(self.name.as_bytes());
        bytes
    }

    /// Parse one record from `bytes`, returning it with the byte count it
    /// occupied.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), Error> {
        if bytes.len() < FIXED_LEN {
            return Err(Error::MalformedStore("child record truncated".into()));
        }
        let kind = match bytes[0] {
            0 => EntryKind::File,
            1 => EntryKind::Directory,
            other => {
                return Err(Error::MalformedStore(format!(
                    "unknown entry kind {other}"
                )))
            }
        };
        let mut at = 1;
        let mut take_u32 = |bytes: &[u8]| {
            let value = u32::from_le_bytes(bytes[at..at + BYTES_IN_U32].try_into().unwrap());
            at += BYTES_IN_U32;
            value
        };
        let fblock = take_u32(bytes);
        let mut take_u64 = |bytes: &[u8]| {
            let value = u64::from_le_bytes(bytes[at..at + BYTES_IN_U64].try_into().unwrap());
            at += BYTES_IN_U64;
            value
        };
        let size = take_u64(bytes);
        let ctime = take_u64(bytes);
        let mtime = take_u64(bytes);
        let atime = take_u64(bytes);
        let name_len =
            u16::from_le_bytes(bytes[at..at + BYTES_IN_U16].try_into().unwrap()) as usize;
        at += BYTES_IN_U16;
        if bytes.len() < at + name_len {
            return Err(Error::MalformedStore("child record name truncated".into()));
        }
        let name = std::str::from_utf8(&bytes[at..at + name_len])?.to_owned();
        Ok((
            Self {
                kind,
                fblock,
                size,
                ctime,
                mtime,
                atime,
                name,
            },
            at + name_len,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChildRecord, EntryKind};

    #[test]
    fn byte_conversion() {
        let record = ChildRecord {
            kind: EntryKind::Directory,
            fblock: 42,
            size: 1234,
            ctime: 1_700_000_000,
            mtime: 1_700_000_100,
            atime: 1_700_000_200,
            name: "projects".into(),
        };
        let bytes = record.as_bytes();
        let (parsed, consumed) = ChildRecord::from_bytes(&bytes).unwrap();
        assert_eq![consumed, bytes.len()];
        assert_eq![parsed, record];
    }

    #[test]
    fn truncated_record_is_rejected() {
        let record = ChildRecord {
            kind: EntryKind::File,
            fblock: 0,
            size: 0,
            ctime: 0,
            mtime: 0,
            atime: 0,
            name: "a".into(),
        };
        let bytes = record.as_bytes();
        assert![ChildRecord::from_bytes(&bytes[..bytes.len() - 1]).is_err()];
    }
}
