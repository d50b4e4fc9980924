use std::fs;
use std::path::Path;

use log::{debug, info};

use imgar_core::{archive, image, FormatKind, ImageHeader, SrcCursor};

use crate::{ContainerFile, DirSink, Error};

/// Attempt the image-container layouts against `path`.
///
/// The IMG and IM2 signatures select the same table walk and differ only
/// in name; IM3 gets its own.
pub fn extract_image(path: impl AsRef<Path>, create_dir: bool) -> Result<FormatKind, Error> {
    try_image(path.as_ref(), create_dir).map_err(|(_, e)| e)
}

fn try_image(path: &Path, create_dir: bool) -> Result<FormatKind, (Option<FormatKind>, Error)> {
    let mut file = ContainerFile::open(path).map_err(|e| (None, e))?;

    let header = {
        let mut cursor = SrcCursor::new(&mut file).map_err(|e| (None, e))?;
        ImageHeader::read(&mut cursor).map_err(|e| (None, e))?
    };
    let kind = header.kind().map_err(|e| (None, e.into()))?;

    let mut sink = DirSink::new(path, create_dir);
    let walked = match kind {
        FormatKind::Img | FormatKind::Im2 => {
            image::extract_im2(&mut file, &mut sink, header.im2_count)
        }
        FormatKind::Im3 => image::extract_im3(&mut file, &mut sink, header.im3_count),
        // The archive layout has no signature, so no signature classifies
        // as it
        FormatKind::Archive => Err(imgar_core::Error::BadSignature.into()),
    };

    match walked {
        Ok(()) => Ok(kind),
        Err(e) => Err((Some(kind), e)),
    }
}

/// Attempt the sentinel-terminated archive layout against `path`.
pub fn extract_archive(path: impl AsRef<Path>, create_dir: bool) -> Result<(), Error> {
    let path = path.as_ref();
    let mut file = ContainerFile::open(path)?;
    let mut sink = DirSink::new(path, create_dir);
    archive::extract(&mut file, &mut sink)
}

/// Extract `path`, trying every known container layout: the image
/// variants first, the generic archive second.
///
/// Extraction is not transactional; sub-files emitted by an attempt that
/// fails later in its scan are left on disk.
pub fn extract(path: impl AsRef<Path>, create_dir: bool) -> Result<FormatKind, Error> {
    let path = path.as_ref();

    let len = fs::metadata(path)
        .map_err(|e| Error::Io {
            reason: "stat container".to_string(),
            file: path.to_path_buf(),
            source: e,
        })?
        .len();
    if len == 0 {
        return Err(Error::EmptyFile(path.to_path_buf()));
    }

    match try_image(path, create_dir) {
        Ok(kind) => {
            info!("extracted {} container from {}", kind, path.display());
            Ok(kind)
        }
        Err((image_kind, image)) => {
            debug!("image attempt failed on {}: {}", path.display(), image);
            match extract_archive(path, create_dir) {
                Ok(()) => {
                    info!("extracted archive from {}", path.display());
                    Ok(FormatKind::Archive)
                }
                Err(archive) => {
                    debug!("archive attempt failed on {}: {}", path.display(), archive);
                    Err(Error::Unrecognized {
                        image_kind,
                        image: Box::new(image),
                        archive: Box::new(archive),
                    })
                }
            }
        }
    }
}
