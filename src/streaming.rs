//! Streaming access to the root chunks of an MSH file
//!
//! [`ChunkReader`] pulls one root chunk at a time from any blocking reader, so
//! a file never has to be loaded into a single buffer first.
//!
//! # Example
//!
//! ```no_run
//! use libmsh::streaming::ChunkReader;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("model.msh")?;
//! for frame in ChunkReader::new(file) {
//!     let frame = frame?;
//!     println!("{}: {} bytes", frame.tag(), frame.payload_len()?);
//! }
//! # Ok(())
//! # }
//! ```

use crate::chunk::{ChunkFrame, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::model::{Document, ParserConfig};
use crate::parser;
use std::io::{ErrorKind, Read};

/// Iterator over the root chunks of a stream
///
/// Ends cleanly when the stream ends on a chunk boundary. A stream that ends
/// inside a header or payload yields one [`Error::UnexpectedEndOfData`]; any
/// error ends the iteration.
pub struct ChunkReader<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a reader positioned at the first root chunk
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    /// Parse the remaining chunks into a document
    pub fn parse_full(self, config: &ParserConfig) -> Result<Document> {
        parser::parse_frames(self, config)
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read a header, or `None` if the stream is already at its end
    fn read_header(&mut self) -> Result<Option<[u8; HEADER_SIZE]>> {
        let mut header = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match self.reader.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(Error::end_of_data(HEADER_SIZE, filled)),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(header))
    }

    fn next_frame(&mut self) -> Result<Option<ChunkFrame>> {
        match self.read_header()? {
            Some(header) => ChunkFrame::from_header(header, &mut self.reader).map(Some),
            None => Ok(None),
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<ChunkFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
