use crate::Error;

/// Source of container bytes, which may be backed by memory, a file, or
/// any other seekable stream.
pub trait ContainerSrc {
    type Err: From<Error>;

    /// Total length of the container in bytes.
    fn size(&mut self) -> Result<u64, Self::Err>;

    /// Fill `buf` with the bytes starting at `offset`. Callers only pass
    /// ranges that lie inside the container.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Err>;
}

impl<T: AsRef<[u8]>> ContainerSrc for T {
    type Err = Error;

    fn size(&mut self) -> Result<u64, Error> {
        Ok(self.as_ref().len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error> {
        let data = self.as_ref();
        let start = usize::try_from(offset)?;
        let end = start.checked_add(buf.len()).ok_or(Error::Overflow)?;
        if end > data.len() {
            return Err(Error::OutOfBounds {
                pos: end as u64,
                len: data.len() as u64,
            });
        }
        buf.copy_from_slice(&data[start..end]);
        Ok(())
    }
}

/// Bounds-aware reading position over a [`ContainerSrc`].
///
/// Every read and seek is validated against the container length before
/// any byte is fetched.
pub struct SrcCursor<'a, S: ContainerSrc> {
    src: &'a mut S,
    len: u64,
    pos: u64,
}

impl<'a, S: ContainerSrc> SrcCursor<'a, S> {
    pub fn new(src: &'a mut S) -> Result<SrcCursor<'a, S>, S::Err> {
        let len = src.size()?;
        Ok(SrcCursor { src, len, pos: 0 })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes between the current position and the end of the container.
    pub fn remaining(&self) -> u64 {
        self.len - self.pos
    }

    pub fn seek(&mut self, pos: u64) -> Result<(), S::Err> {
        if pos > self.len {
            return Err(Error::OutOfBounds { pos, len: self.len }.into());
        }
        self.pos = pos;
        Ok(())
    }

    /// Read exactly `buf.len()` bytes, advancing the cursor.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), S::Err> {
        let wanted = buf.len() as u64;
        if wanted > self.remaining() {
            return Err(Error::OutOfBounds {
                pos: self.pos.saturating_add(wanted),
                len: self.len,
            }
            .into());
        }
        self.src.read_at(self.pos, buf)?;
        self.pos += wanted;
        Ok(())
    }
}
