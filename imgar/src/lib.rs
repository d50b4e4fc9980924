mod bin;
mod package;
mod sink;

pub use bin::*;
pub use package::*;
pub use sink::*;

pub use imgar_core::FormatKind;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while extracting a container file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{reason}: {}", .file.display())]
    Io {
        reason: String,
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Core(#[from] imgar_core::Error),

    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("invalid sub-file name: {name:?}")]
    InvalidName { name: String },

    /// Neither the image layouts nor the archive layout matched; carries
    /// both attempts' failures and, where one was classified, the image
    /// variant that was being decoded.
    #[error(
        "could not extract: img[{image}][{}] arch[{archive}]",
        .image_kind.map_or("unknown type", |k| k.as_str())
    )]
    Unrecognized {
        image_kind: Option<FormatKind>,
        image: Box<Error>,
        archive: Box<Error>,
    },
}
