#![no_main]

use libfuzzer_sys::fuzz_target;
use libmsh::{Document, NullSink, ParserConfig};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let config = ParserConfig::new().with_log_sink(Arc::new(NullSink));
    let Ok(document) = Document::from_bytes_with_config(data, &config) else {
        return;
    };

    // The first write normalizes strips and strings; after that the bytes
    // must be stable
    let first = document.to_bytes().expect("loaded document failed to write");
    let second = Document::from_bytes_with_config(&first, &config)
        .expect("written document failed to parse")
        .to_bytes()
        .expect("reloaded document failed to write");
    let third = Document::from_bytes_with_config(&second, &config)
        .expect("written document failed to parse")
        .to_bytes()
        .expect("reloaded document failed to write");
    assert_eq!(second, third);
});
