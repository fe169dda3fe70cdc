#![no_main]

use libfuzzer_sys::fuzz_target;
use libmsh::{CheckIntegrity, Document, NullSink, ParserConfig};
use std::io::Cursor;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let config = ParserConfig::new().with_log_sink(Arc::new(NullSink));

    // Both entry points must agree on every input
    let from_bytes = Document::from_bytes_with_config(data, &config);
    let from_reader = Document::from_reader_with_config(Cursor::new(data), &config);
    assert_eq!(from_bytes.is_ok(), from_reader.is_ok());

    if let Ok(document) = from_bytes {
        let _ = document.check_integrity();
    }
});
