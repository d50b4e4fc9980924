//! The leading header of the signature-tagged image containers.

use core::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::{ContainerSrc, Error, SrcCursor, IMAGE_HEADER_SIZE};

pub const IMG_SIGNATURE: [u8; 4] = *b"IMG\0";
pub const IM2_SIGNATURE: [u8; 4] = *b"IM2\0";
pub const IM3_SIGNATURE: [u8; 4] = *b"IM3\0";

/// Which container layout a decode attempt matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Img,
    Im2,
    Im3,
    Archive,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Img => "IMG",
            FormatKind::Im2 => "IM2",
            FormatKind::Im3 => "IM3",
            FormatKind::Archive => "archive",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed 16-byte header at the start of every image container. The two
/// count fields share the header; which one is meaningful depends on the
/// signature.
#[derive(Clone, Copy, Debug)]
pub struct ImageHeader {
    pub signature: [u8; 4],
    /// Entry count used by the IMG and IM2 layouts
    pub im2_count: u32,
    /// Entry count used by the IM3 layout
    pub im3_count: u32,
    pub reserved: u32,
}

impl ImageHeader {
    /// Decode the header fields from the first 16 bytes of a container.
    pub fn from_bytes(data: &[u8; IMAGE_HEADER_SIZE]) -> ImageHeader {
        let mut signature = [0; 4];
        signature.copy_from_slice(&data[..4]);
        ImageHeader {
            signature,
            im2_count: LittleEndian::read_u32(&data[4..8]),
            im3_count: LittleEndian::read_u32(&data[8..12]),
            reserved: LittleEndian::read_u32(&data[12..16]),
        }
    }

    /// Read and decode the header from the start of the container.
    pub fn read<S: ContainerSrc>(cursor: &mut SrcCursor<'_, S>) -> Result<ImageHeader, S::Err> {
        let mut data = [0; IMAGE_HEADER_SIZE];
        cursor.seek(0)?;
        cursor.read_exact(&mut data)?;
        Ok(ImageHeader::from_bytes(&data))
    }

    /// Classify the signature tag. The IMG and IM2 tags select the same
    /// table layout and differ only in name; IM3 has its own.
    pub fn kind(&self) -> Result<FormatKind, Error> {
        match self.signature {
            IMG_SIGNATURE => Ok(FormatKind::Img),
            IM2_SIGNATURE => Ok(FormatKind::Im2),
            IM3_SIGNATURE => Ok(FormatKind::Im3),
            _ => Err(Error::BadSignature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(signature: &[u8; 4], im2_count: u32, im3_count: u32) -> [u8; IMAGE_HEADER_SIZE] {
        let mut data = [0; IMAGE_HEADER_SIZE];
        data[..4].copy_from_slice(signature);
        LittleEndian::write_u32(&mut data[4..8], im2_count);
        LittleEndian::write_u32(&mut data[8..12], im3_count);
        data
    }

    #[test]
    fn decode_fields() {
        let header = ImageHeader::from_bytes(&header_bytes(&IM3_SIGNATURE, 7, 9));
        assert_eq!(header.signature, IM3_SIGNATURE);
        assert_eq!(header.im2_count, 7);
        assert_eq!(header.im3_count, 9);
        assert_eq!(header.reserved, 0);
    }

    #[test]
    fn img_and_im2_signatures_both_classify() {
        let img = ImageHeader::from_bytes(&header_bytes(&IMG_SIGNATURE, 1, 0));
        assert_eq!(img.kind().unwrap(), FormatKind::Img);

        let im2 = ImageHeader::from_bytes(&header_bytes(&IM2_SIGNATURE, 1, 0));
        assert_eq!(im2.kind().unwrap(), FormatKind::Im2);
    }

    #[test]
    fn im3_signature_classifies() {
        let im3 = ImageHeader::from_bytes(&header_bytes(&IM3_SIGNATURE, 0, 1));
        assert_eq!(im3.kind().unwrap(), FormatKind::Im3);
    }

    #[test]
    fn unknown_signature_rejected() {
        let header = ImageHeader::from_bytes(&header_bytes(b"IM4\0", 0, 0));
        assert_eq!(header.kind(), Err(Error::BadSignature));

        // A recognized tag without its trailing NUL is not a match either
        let header = ImageHeader::from_bytes(&header_bytes(b"IMG2", 0, 0));
        assert_eq!(header.kind(), Err(Error::BadSignature));
    }
}
