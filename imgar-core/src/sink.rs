use alloc::vec::Vec;

use crate::Error;

/// Receiver for extracted sub-files.
///
/// The table walkers hand every decoded sub-file to a sink as a name plus
/// its bytes and retain nothing; where the bytes end up is entirely the
/// sink's concern.
pub trait SubfileSink {
    type Err: From<Error>;

    /// Persist one sub-file under `name`. Names are the raw NUL-trimmed
    /// bytes of a fixed-width name field and are not guaranteed to be
    /// UTF-8.
    fn emit(&mut self, name: &[u8], data: &[u8]) -> Result<(), Self::Err>;
}

/// Sink that collects emitted sub-files in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    pub files: Vec<(Vec<u8>, Vec<u8>)>,
}

impl SubfileSink for VecSink {
    type Err = Error;

    fn emit(&mut self, name: &[u8], data: &[u8]) -> Result<(), Error> {
        self.files.push((name.to_vec(), data.to_vec()));
        Ok(())
    }
}
