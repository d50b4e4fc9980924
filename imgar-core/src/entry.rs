//! The fixed-size table records of the three container layouts, decoded
//! field by field from their little-endian wire form.

use byteorder::{ByteOrder, LittleEndian};

use crate::{ARCHIVE_ENTRY_SIZE, IM2_ENTRY_SIZE, IM3_ENTRY_SIZE};

/// Trim a fixed-width NUL-padded name field at the first NUL.
fn name_prefix(field: &[u8]) -> &[u8] {
    let mut i = 0;
    while i < field.len() {
        if field[i] == 0 {
            break;
        }
        i += 1;
    }
    &field[..i]
}

/// One 80-byte record of the sentinel-terminated archive table.
#[derive(Clone, Copy, Debug)]
pub struct ArchiveEntry {
    /// NUL-padded sub-file name, used as the output name unmodified
    pub name: [u8; 64],
    /// Length of the record's metadata region; not consulted while walking
    pub metadata_length: u32,
    /// Length of the sub-file data following this record
    pub file_length: i32,
    /// Signed jump from this record's own position to the next record
    pub end_offset: i32,
    pub reserved: u32,
}

impl ArchiveEntry {
    pub fn from_bytes(data: &[u8; ARCHIVE_ENTRY_SIZE]) -> ArchiveEntry {
        let mut name = [0; 64];
        name.copy_from_slice(&data[..64]);
        ArchiveEntry {
            name,
            metadata_length: LittleEndian::read_u32(&data[64..68]),
            file_length: LittleEndian::read_i32(&data[68..72]),
            end_offset: LittleEndian::read_i32(&data[72..76]),
            reserved: LittleEndian::read_u32(&data[76..80]),
        }
    }

    /// Retrieve the name, ending at the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        name_prefix(&self.name)
    }

    /// A terminating record: unnamed, or with either signed field set
    /// to -1.
    pub fn is_sentinel(&self) -> bool {
        self.name[0] == 0 || self.file_length == -1 || self.end_offset == -1
    }
}

/// One 48-byte record of the IM2 table. There is no length field; the
/// sub-file runs from `offset` to the next entry's offset.
#[derive(Clone, Copy, Debug)]
pub struct Im2Entry {
    pub name: [u8; 32],
    /// Absolute position of the sub-file data in the container
    pub offset: u32,
    pub reserved: [u32; 3],
}

impl Im2Entry {
    pub fn from_bytes(data: &[u8; IM2_ENTRY_SIZE]) -> Im2Entry {
        let mut name = [0; 32];
        name.copy_from_slice(&data[..32]);
        Im2Entry {
            name,
            offset: LittleEndian::read_u32(&data[32..36]),
            reserved: [
                LittleEndian::read_u32(&data[36..40]),
                LittleEndian::read_u32(&data[40..44]),
                LittleEndian::read_u32(&data[44..48]),
            ],
        }
    }

    /// Retrieve the name, ending at the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        name_prefix(&self.name)
    }
}

/// One 64-byte record of the IM3 table, carrying an explicit data length.
#[derive(Clone, Copy, Debug)]
pub struct Im3Entry {
    pub name: [u8; 32],
    pub reserved0: u32,
    /// Absolute position of the sub-file data in the container
    pub offset: u32,
    pub reserved1: u32,
    pub padding: [u8; 8],
    /// Length of the sub-file data at `offset`
    pub file_length: u32,
    pub reserved2: [u32; 2],
}

impl Im3Entry {
    pub fn from_bytes(data: &[u8; IM3_ENTRY_SIZE]) -> Im3Entry {
        let mut name = [0; 32];
        name.copy_from_slice(&data[..32]);
        let mut padding = [0; 8];
        padding.copy_from_slice(&data[44..52]);
        Im3Entry {
            name,
            reserved0: LittleEndian::read_u32(&data[32..36]),
            offset: LittleEndian::read_u32(&data[36..40]),
            reserved1: LittleEndian::read_u32(&data[40..44]),
            padding,
            file_length: LittleEndian::read_u32(&data[52..56]),
            reserved2: [
                LittleEndian::read_u32(&data[56..60]),
                LittleEndian::read_u32(&data[60..64]),
            ],
        }
    }

    /// Retrieve the name, ending at the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        name_prefix(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_entry_decode() {
        let mut data = [0u8; ARCHIVE_ENTRY_SIZE];
        data[..5].copy_from_slice(b"a.bin");
        LittleEndian::write_u32(&mut data[64..68], 12);
        LittleEndian::write_i32(&mut data[68..72], 34);
        LittleEndian::write_i32(&mut data[72..76], 120);

        let entry = ArchiveEntry::from_bytes(&data);
        assert_eq!(entry.name_bytes(), b"a.bin");
        assert_eq!(entry.metadata_length, 12);
        assert_eq!(entry.file_length, 34);
        assert_eq!(entry.end_offset, 120);
        assert!(!entry.is_sentinel());
    }

    #[test]
    fn archive_sentinel_forms() {
        let named = |name: &[u8], file_length: i32, end_offset: i32| {
            let mut data = [0u8; ARCHIVE_ENTRY_SIZE];
            data[..name.len()].copy_from_slice(name);
            LittleEndian::write_i32(&mut data[68..72], file_length);
            LittleEndian::write_i32(&mut data[72..76], end_offset);
            ArchiveEntry::from_bytes(&data)
        };

        assert!(named(b"", 1, 1).is_sentinel());
        assert!(named(b"x", -1, 1).is_sentinel());
        assert!(named(b"x", 1, -1).is_sentinel());
        assert!(!named(b"x", 1, 1).is_sentinel());
    }

    #[test]
    fn im2_entry_decode() {
        let mut data = [0u8; IM2_ENTRY_SIZE];
        data[..4].copy_from_slice(b"tex0");
        LittleEndian::write_u32(&mut data[32..36], 0x1000);

        let entry = Im2Entry::from_bytes(&data);
        assert_eq!(entry.name_bytes(), b"tex0");
        assert_eq!(entry.offset, 0x1000);
    }

    #[test]
    fn im3_entry_decode() {
        let mut data = [0u8; IM3_ENTRY_SIZE];
        data[..4].copy_from_slice(b"tex1");
        LittleEndian::write_u32(&mut data[36..40], 0x2000);
        LittleEndian::write_u32(&mut data[52..56], 0x30);

        let entry = Im3Entry::from_bytes(&data);
        assert_eq!(entry.name_bytes(), b"tex1");
        assert_eq!(entry.offset, 0x2000);
        assert_eq!(entry.file_length, 0x30);
    }

    #[test]
    fn name_stops_at_first_nul() {
        let mut data = [0u8; IM2_ENTRY_SIZE];
        data[..8].copy_from_slice(b"ab\0cdefg");
        assert_eq!(Im2Entry::from_bytes(&data).name_bytes(), b"ab");
    }
}
