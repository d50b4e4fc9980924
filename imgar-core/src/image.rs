//! Walkers for the IMG/IM2/IM3 image container tables.
//!
//! Both layouts start with the fixed [`ImageHeader`](crate::ImageHeader)
//! and differ in their record shape and in how each sub-file's length is
//! determined: IM2 infers it from the following entry's offset, IM3
//! stores it explicitly.

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    ContainerSrc, Error, Im2Entry, Im3Entry, SrcCursor, SubfileSink, IM2_ENTRY_SIZE,
    IM3_ENTRY_SIZE, IMAGE_HEADER_SIZE,
};

/// Extension appended to every emitted image sub-file name.
pub const SUBFILE_SUFFIX: &[u8] = b".tm2";

fn suffixed_name(name: &[u8]) -> Vec<u8> {
    let mut full = Vec::with_capacity(name.len() + SUBFILE_SUFFIX.len());
    full.extend_from_slice(name);
    full.extend_from_slice(SUBFILE_SUFFIX);
    full
}

/// Absolute offset of the first byte past an entry table of `count`
/// records of `entry_size` bytes, validated against the container length.
fn table_end(count: u32, entry_size: usize, container_size: u64) -> Result<u64, Error> {
    let table_size = (count as u64)
        .checked_mul(entry_size as u64)
        .ok_or(Error::Overflow)?;
    let end = (IMAGE_HEADER_SIZE as u64)
        .checked_add(table_size)
        .ok_or(Error::Overflow)?;
    if end > container_size {
        return Err(Error::OutOfBounds {
            pos: end,
            len: container_size,
        });
    }
    Ok(end)
}

/// Walk an IM2-layout table of `count` records, emitting each sub-file to
/// `sink`.
///
/// Sub-files are emitted in stored table order. Each one runs from its
/// entry's offset to the next entry's offset (the last runs to the end of
/// the container), so offsets must never decrease; the first may not
/// point back into the table itself.
pub fn extract_im2<S, W, E>(src: &mut S, sink: &mut W, count: u32) -> Result<(), E>
where
    S: ContainerSrc<Err = E>,
    W: SubfileSink<Err = E>,
    E: From<Error>,
{
    let mut cursor = SrcCursor::new(src)?;
    let container_size = cursor.len();
    let table_end = table_end(count, IM2_ENTRY_SIZE, container_size)?;

    cursor.seek(IMAGE_HEADER_SIZE as u64)?;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut data = [0; IM2_ENTRY_SIZE];
        cursor.read_exact(&mut data)?;
        entries.push(Im2Entry::from_bytes(&data));
    }

    let mut floor = table_end;
    for (i, entry) in entries.iter().enumerate() {
        let offset = entry.offset as u64;
        let next = match entries.get(i + 1) {
            Some(next) => next.offset as u64,
            None => container_size,
        };

        let size = next.checked_sub(offset).ok_or(Error::BadOffset)?;
        if size > container_size - table_end {
            return Err(Error::BadOffset.into());
        }
        if offset < floor {
            return Err(Error::BadOffset.into());
        }

        cursor.seek(offset)?;
        let mut data = vec![0; usize::try_from(size).map_err(Error::TryFromInt)?];
        cursor.read_exact(&mut data)?;
        sink.emit(&suffixed_name(entry.name_bytes()), &data)?;

        floor = offset;
    }
    Ok(())
}

/// Walk an IM3-layout table of `count` records, emitting each sub-file to
/// `sink`.
///
/// Records are read sequentially; after each record the cursor jumps to
/// the sub-file data and back. An offset pointing before the unread rest
/// of the table is rejected, so data can never alias metadata that is
/// still to be decoded.
pub fn extract_im3<S, W, E>(src: &mut S, sink: &mut W, count: u32) -> Result<(), E>
where
    S: ContainerSrc<Err = E>,
    W: SubfileSink<Err = E>,
    E: From<Error>,
{
    let mut cursor = SrcCursor::new(src)?;
    let container_size = cursor.len();
    let table_end = table_end(count, IM3_ENTRY_SIZE, container_size)?;

    cursor.seek(IMAGE_HEADER_SIZE as u64)?;
    for _ in 0..count {
        let mut record = [0; IM3_ENTRY_SIZE];
        cursor.read_exact(&mut record)?;
        let entry = Im3Entry::from_bytes(&record);

        let length = entry.file_length as u64;
        let resume = cursor.position();

        if length > container_size - table_end {
            return Err(Error::BadOffset.into());
        }
        if (entry.offset as u64) < resume {
            return Err(Error::BadOffset.into());
        }

        cursor.seek(entry.offset as u64)?;
        let mut data = vec![0; usize::try_from(length).map_err(Error::TryFromInt)?];
        cursor.read_exact(&mut data)?;
        sink.emit(&suffixed_name(entry.name_bytes()), &data)?;

        cursor.seek(resume)?;
    }
    Ok(())
}
