#![no_main]

use libfuzzer_sys::fuzz_target;

use imgar_core::{archive, image, FormatKind, ImageHeader, SrcCursor, VecSink};

fuzz_target!(|data: &[u8]| {
    let mut src = data;
    let mut sink = VecSink::default();
    let _ = archive::extract(&mut src, &mut sink);

    let mut src = data;
    let header = {
        let mut cursor = match SrcCursor::new(&mut src) {
            Ok(cursor) => cursor,
            Err(_) => return,
        };
        match ImageHeader::read(&mut cursor) {
            Ok(header) => header,
            Err(_) => return,
        }
    };

    let mut sink = VecSink::default();
    match header.kind() {
        Ok(FormatKind::Img) | Ok(FormatKind::Im2) => {
            let _ = image::extract_im2(&mut src, &mut sink, header.im2_count);
        }
        Ok(FormatKind::Im3) => {
            let _ = image::extract_im3(&mut src, &mut sink, header.im3_count);
        }
        _ => {}
    }
});
