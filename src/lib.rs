//! # libmsh
//!
//! A pure Rust reader and writer for chunk-based MSH mesh/model files.
//!
//! An MSH file is a tree of chunks. Every chunk is a four character tag, a
//! little-endian `i32` payload length and the payload. Container chunks hold
//! further chunks; leaf chunks hold vectors, strings and index strips.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Strict chunk framing with descriptive errors
//! - Geometry segments decoded into merged vertex arrays and polygons
//! - Materials resolved through a document-owned material list
//! - Non-fatal integrity checks that collect every problem
//! - Unknown chunks kept verbatim and written back unchanged
//!
//! ## Example
//!
//! ```no_run
//! use libmsh::{CheckIntegrity, Document};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("model.msh")?;
//! let document = Document::from_reader(file)?;
//!
//! println!("Document contains {} segments", document.segments().len());
//! for error in document.check_integrity().errors() {
//!     eprintln!("{}", error);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chunk;
pub mod cursor;
pub mod error;
pub mod log;
#[cfg(feature = "mesh-ops")]
pub mod mesh_ops;
pub mod model;
pub mod parser;
pub mod streaming;
pub mod validator;
pub mod writer;

pub use chunk::{ChunkFrame, ChunkTag};
pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use log::{LogSink, NullSink, Severity, TracingSink};
pub use model::{
    BoundingBox, Color, Document, Material, MaterialAttributes, MaterialData, MaterialHandle,
    ParserConfig, Polygon, RawChunk, Record, Segment, Vector2, Vector3, Vector4, Vertex,
    VertexIndex,
};
pub use validator::{CheckIntegrity, CheckResult};

use std::io::{Read, Write};
use std::path::Path;

impl Document {
    /// Parse an MSH file held in memory
    ///
    /// Uses the default configuration, which logs through `tracing`.
    ///
    /// # Example
    ///
    /// ```
    /// use libmsh::Document;
    ///
    /// let bytes = b"HEDR\x00\x00\x00\x00";
    /// let document = Document::from_bytes(bytes).unwrap();
    /// assert_eq!(document.records.len(), 1);
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_config(bytes, &ParserConfig::default())
    }

    /// Parse an MSH file held in memory with custom configuration
    ///
    /// # Arguments
    ///
    /// * `bytes` - The complete file
    /// * `config` - Container tags, depth limit and log sink
    pub fn from_bytes_with_config(bytes: &[u8], config: &ParserConfig) -> Result<Self> {
        parser::parse_document_with_config(bytes, config)
    }

    /// Parse an MSH file from a reader, one root chunk at a time
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libmsh::Document;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("model.msh")?;
    /// let document = Document::from_reader(file)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_config(reader, &ParserConfig::default())
    }

    /// Parse an MSH file from a reader with custom configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libmsh::{ChunkTag, Document, ParserConfig};
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("model.msh")?;
    ///
    /// // Keep shadow info as raw bytes instead of parsing its children
    /// let config = ParserConfig::new().without_container_tag(ChunkTag::SINF);
    ///
    /// let document = Document::from_reader_with_config(file, &config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader_with_config<R: Read>(reader: R, config: &ParserConfig) -> Result<Self> {
        streaming::ChunkReader::new(reader).parse_full(config)
    }

    /// Read and parse an MSH file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Serialize the document
    ///
    /// Segments write their material as its position in
    /// [`Document::materials`], or `-1` when unset.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        writer::write_document(self)
    }

    /// Serialize the document into a writer
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        writer::write_document_to(self, writer)
    }

    /// Write the document to a file, replacing it if it exists
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libmsh::Document;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let document = Document::new();
    /// document.write_to_file("output.msh")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.to_writer(std::io::BufWriter::new(file))
    }
}
