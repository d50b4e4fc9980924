use std::fs::{self, File};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use log::debug;

use imgar_core::SubfileSink;

use crate::Error;

/// Sink writing each sub-file into a directory named after the container,
/// beside it on disk.
///
/// The directory is created when the first sub-file is emitted, so a
/// decode that fails before emitting anything leaves no trace. Existing
/// sub-files are truncated, making repeated extraction of the same
/// container idempotent.
#[derive(Debug)]
pub struct DirSink {
    out: PathBuf,
    mkdir: bool,
    created: bool,
}

impl DirSink {
    /// `create_dir: false` skips the per-container directory and writes
    /// sub-files directly beside the container.
    pub fn new(container_path: &Path, create_dir: bool) -> DirSink {
        let parent = container_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();
        let (out, mkdir) = match container_path.file_stem() {
            Some(stem) if create_dir => (parent.join(stem), true),
            _ => (parent, false),
        };
        DirSink {
            out,
            mkdir,
            created: false,
        }
    }
}

impl SubfileSink for DirSink {
    type Err = Error;

    fn emit(&mut self, name: &[u8], data: &[u8]) -> Result<(), Error> {
        let name = String::from_utf8_lossy(name).into_owned();
        check_name(&name)?;

        if self.mkdir && !self.created {
            fs::create_dir_all(&self.out).map_err(|e| Error::Io {
                reason: "create output directory".to_string(),
                file: self.out.clone(),
                source: e,
            })?;
            self.created = true;
        }

        let path = self.out.join(&name);
        debug!("writing {} bytes to {}", data.len(), path.display());

        let mut out = File::create(&path).map_err(|e| Error::Io {
            reason: "create sub-file".to_string(),
            file: path.clone(),
            source: e,
        })?;
        out.write_all(data).map_err(|e| Error::Io {
            reason: "write sub-file".to_string(),
            file: path,
            source: e,
        })
    }
}

/// Container names become single path components; anything that could
/// land outside the output directory is rejected.
fn check_name(name: &str) -> Result<(), Error> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidName {
            name: name.to_string(),
        }),
    }
}
