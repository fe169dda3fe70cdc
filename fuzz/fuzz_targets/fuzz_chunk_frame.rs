#![no_main]

use libfuzzer_sys::fuzz_target;
use libmsh::ChunkFrame;

fuzz_target!(|data: &[u8]| {
    // Walk the buffer as a chunk tree, reading every child until an error
    let Ok(mut frame) = ChunkFrame::from_slice(data, 0) else {
        return;
    };
    while let Ok(false) = frame.is_exhausted() {
        match frame.read_chunk() {
            Ok(mut child) => {
                let _ = child.read_children();
            }
            Err(_) => break,
        }
    }
});
