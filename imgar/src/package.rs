use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use imgar_core::ContainerSrc;

use crate::Error;

/// A container file on disk.
#[derive(Debug)]
pub struct ContainerFile {
    path: PathBuf,
    file: File,
    len: u64,
}

impl ContainerFile {
    pub fn open(path: impl AsRef<Path>) -> Result<ContainerFile, Error> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|e| Error::Io {
            reason: "open container".to_string(),
            file: path.clone(),
            source: e,
        })?;

        let len = file
            .metadata()
            .map_err(|e| Error::Io {
                reason: "read container metadata".to_string(),
                file: path.clone(),
                source: e,
            })?
            .len();

        Ok(ContainerFile { path, file, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContainerSrc for ContainerFile {
    type Err = Error;

    fn size(&mut self) -> Result<u64, Error> {
        Ok(self.len)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Error::Io {
                reason: format!("seek to {}", offset),
                file: self.path.clone(),
                source: e,
            })?;
        self.file.read_exact(buf).map_err(|e| Error::Io {
            reason: format!("read {} bytes at {}", buf.len(), offset),
            file: self.path.clone(),
            source: e,
        })
    }
}
