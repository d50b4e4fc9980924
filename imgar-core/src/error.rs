use core::error;
use core::fmt::{Display, Formatter, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// No recognized signature tag at the start of the container
    BadSignature,
    /// The archive tail is not a valid terminating record
    BadFormat,
    /// Container too small to hold the minimum archive structure
    BadArchiveSize,
    /// Archive record whose jump target leaves the valid table range
    BadOffsetField,
    /// Archive record with a negative or oversized data length
    BadLengthField,
    /// Image record with a non-monotonic offset or oversized range
    BadOffset,
    /// Read or seek past the end of the container
    OutOfBounds { pos: u64, len: u64 },
    Overflow,
    TryFromInt(core::num::TryFromIntError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Error::*;

        match self {
            BadSignature => write!(f, "bad signature"),
            BadFormat => write!(f, "bad format"),
            BadArchiveSize => write!(f, "bad archive size"),
            BadOffsetField => write!(f, "bad offset field"),
            BadLengthField => write!(f, "bad length field"),
            BadOffset => write!(f, "bad offset"),
            OutOfBounds { pos, len } => {
                write!(f, "position {} out of bounds for container of {} bytes", pos, len)
            }
            Overflow => write!(f, "overflow"),
            TryFromInt(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::TryFromInt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<core::num::TryFromIntError> for Error {
    fn from(err: core::num::TryFromIntError) -> Error {
        Error::TryFromInt(err)
    }
}
