//! Walker for the sentinel-terminated generic archive table.

use alloc::vec;

use crate::{ArchiveEntry, ContainerSrc, Error, SrcCursor, SubfileSink, ARCHIVE_ENTRY_SIZE};

fn read_entry<S: ContainerSrc>(cursor: &mut SrcCursor<'_, S>) -> Result<ArchiveEntry, S::Err> {
    let mut data = [0; ARCHIVE_ENTRY_SIZE];
    cursor.read_exact(&mut data)?;
    Ok(ArchiveEntry::from_bytes(&data))
}

/// Decode the archive table of `src`, emitting every sub-file to `sink`.
///
/// This layout carries no signature. Its shape is validated structurally:
/// the container must be large enough for one real record plus the
/// terminator, and a sentinel record must sit at the tail position.
///
/// Each record is followed by its sub-file data; `end_offset` then jumps
/// (relative to the record's own position) to the next record. The jump
/// may never move backwards past the record just read, and may never land
/// where a full record no longer fits.
pub fn extract<S, W, E>(src: &mut S, sink: &mut W) -> Result<(), E>
where
    S: ContainerSrc<Err = E>,
    W: SubfileSink<Err = E>,
    E: From<Error>,
{
    let entry_size = ARCHIVE_ENTRY_SIZE as u64;
    let mut cursor = SrcCursor::new(src)?;
    let container_size = cursor.len();

    // Minimum shape: one real record plus the terminator
    if container_size < entry_size * 2 {
        return Err(Error::BadArchiveSize.into());
    }

    cursor.seek(container_size - entry_size)?;
    if !read_entry(&mut cursor)?.is_sentinel() {
        return Err(Error::BadFormat.into());
    }

    cursor.seek(0)?;
    loop {
        let start = cursor.position();
        let entry = read_entry(&mut cursor)?;
        if entry.is_sentinel() {
            return Ok(());
        }

        let next_offset = start as i128 + entry.end_offset as i128;
        let after_record = cursor.position();

        // The jump target must stay ahead of the record just read and
        // leave room for a full record, so the scan only ever moves
        // forward
        if next_offset < after_record as i128 || next_offset > (container_size - entry_size) as i128
        {
            return Err(Error::BadOffsetField.into());
        }

        if entry.file_length < 0 || entry.file_length as u64 > cursor.remaining() {
            return Err(Error::BadLengthField.into());
        }

        let length = usize::try_from(entry.file_length).map_err(Error::TryFromInt)?;
        let mut data = vec![0; length];
        cursor.read_exact(&mut data)?;
        sink.emit(entry.name_bytes(), &data)?;

        cursor.seek(next_offset as u64)?;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use byteorder::{ByteOrder, LittleEndian};

    use super::*;
    use crate::VecSink;

    fn record(name: &[u8], file_length: i32, end_offset: i32) -> [u8; ARCHIVE_ENTRY_SIZE] {
        let mut data = [0u8; ARCHIVE_ENTRY_SIZE];
        data[..name.len()].copy_from_slice(name);
        LittleEndian::write_i32(&mut data[68..72], file_length);
        LittleEndian::write_i32(&mut data[72..76], end_offset);
        data
    }

    fn sentinel() -> [u8; ARCHIVE_ENTRY_SIZE] {
        record(b"", -1, -1)
    }

    /// Assemble records and payloads into a contiguous container, fixing
    /// up each record's jump to point at the next one.
    fn build(files: &[(&[u8], &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, payload) in files {
            let end_offset = ARCHIVE_ENTRY_SIZE + payload.len();
            out.extend_from_slice(&record(name, payload.len() as i32, end_offset as i32));
            out.extend_from_slice(payload);
        }
        out.extend_from_slice(&sentinel());
        out
    }

    #[test]
    fn well_formed_round_trip() {
        let mut container = build(&[
            (b"first.bin", b"hello"),
            (b"second.bin", b"archive contents"),
            (b"third.bin", b""),
        ]);

        let mut sink = VecSink::default();
        extract(&mut container, &mut sink).unwrap();

        assert_eq!(sink.files.len(), 3);
        assert_eq!(sink.files[0], (b"first.bin".to_vec(), b"hello".to_vec()));
        assert_eq!(
            sink.files[1],
            (b"second.bin".to_vec(), b"archive contents".to_vec())
        );
        assert_eq!(sink.files[2], (b"third.bin".to_vec(), Vec::new()));
    }

    #[test]
    fn minimum_container_extracts_nothing() {
        let mut container = Vec::new();
        container.extend_from_slice(&sentinel());
        container.extend_from_slice(&sentinel());
        assert_eq!(container.len(), ARCHIVE_ENTRY_SIZE * 2);

        let mut sink = VecSink::default();
        extract(&mut container, &mut sink).unwrap();
        assert!(sink.files.is_empty());
    }

    #[test]
    fn undersized_container_rejected() {
        let mut container = vec![0u8; ARCHIVE_ENTRY_SIZE * 2 - 1];
        let mut sink = VecSink::default();
        assert_eq!(
            extract(&mut container, &mut sink),
            Err(Error::BadArchiveSize)
        );
    }

    #[test]
    fn missing_tail_sentinel_rejected() {
        // Full-width names keep the truncated tail free of NUL bytes
        let name = [b'n'; 64];
        let mut container = build(&[(&name, b"0123456789abcdef"), (&name, b"fedcba9876543210")]);
        // Cut the terminator off; the record at the tail position is now
        // a slice of table and payload bytes
        container.truncate(container.len() - ARCHIVE_ENTRY_SIZE);

        let mut sink = VecSink::default();
        assert_eq!(extract(&mut container, &mut sink), Err(Error::BadFormat));
    }

    #[test]
    fn backward_jump_rejected() {
        let mut container = build(&[(b"a", b"12345678"), (b"b", b"abcdefgh")]);
        // Second record jumps back to the first
        let second = ARCHIVE_ENTRY_SIZE + 8;
        LittleEndian::write_i32(&mut container[second + 72..second + 76], -(second as i32));

        let mut sink = VecSink::default();
        assert_eq!(
            extract(&mut container, &mut sink),
            Err(Error::BadOffsetField)
        );
        // The first sub-file was already emitted when the scan aborted
        assert_eq!(sink.files.len(), 1);
    }

    #[test]
    fn jump_past_tail_rejected() {
        let mut container = build(&[(b"a", b"12345678")]);
        let len = container.len() as i32;
        LittleEndian::write_i32(&mut container[72..76], len - ARCHIVE_ENTRY_SIZE as i32 + 1);

        let mut sink = VecSink::default();
        assert_eq!(
            extract(&mut container, &mut sink),
            Err(Error::BadOffsetField)
        );
    }

    #[test]
    fn oversized_length_rejected() {
        let mut container = build(&[(b"a", b"12345678")]);
        let remaining = container.len() - ARCHIVE_ENTRY_SIZE;
        LittleEndian::write_i32(&mut container[68..72], remaining as i32 + 1);

        let mut sink = VecSink::default();
        assert_eq!(
            extract(&mut container, &mut sink),
            Err(Error::BadLengthField)
        );
    }

    #[test]
    fn negative_length_rejected() {
        let mut container = build(&[(b"a", b"12345678")]);
        LittleEndian::write_i32(&mut container[68..72], -2);

        let mut sink = VecSink::default();
        assert_eq!(
            extract(&mut container, &mut sink),
            Err(Error::BadLengthField)
        );
    }

    #[test]
    fn contiguous_jump_is_allowed() {
        // A jump landing exactly after the payload, with the terminator
        // doubling as the tail record
        let mut container = build(&[(b"exact", b"xy")]);

        let mut sink = VecSink::default();
        extract(&mut container, &mut sink).unwrap();
        assert_eq!(sink.files, vec![(b"exact".to_vec(), b"xy".to_vec())]);
    }
}
