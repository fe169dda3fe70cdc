//! Error types for MSH parsing and writing
//!
//! This module provides the hard-failure channel of the crate. Soft findings
//! (missing materials, suspicious vertex data) are never reported here; they
//! are collected by the integrity checker in [`crate::validator`].
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: Chunk framing errors
//! - **E3xxx**: Record content errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error reading from a stream
//! - `E2001`: Unexpected end of data
//! - `E2002`: Invalid chunk (bad tag, negative length or count, nesting too deep)
//! - `E2003`: Chunk payload accessed after being flushed into its parent
//! - `E3001`: Invalid geometry segment
//! - `E3002`: Invalid vertex data

use std::io;
use thiserror::Error;

/// Result type for MSH operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading or writing MSH data
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading from a stream
    ///
    /// **Error Code**: E1001
    ///
    /// Stream underruns are not reported through this variant; they become
    /// [`Error::UnexpectedEndOfData`].
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The buffer or stream ended before a required field could be read
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Truncated file
    /// - A length or count field larger than the data that follows it
    #[error("[E2001] Unexpected end of data: {0}")]
    UnexpectedEndOfData(String),

    /// Malformed chunk header or chunk content
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Tag is not one uppercase letter followed by three uppercase letters or digits
    /// - Negative chunk length
    /// - Negative element count inside a list chunk
    /// - Container chunks nested deeper than the configured limit
    #[error("[E2002] Invalid chunk: {0}")]
    InvalidChunk(String),

    /// A frame's payload was accessed after the frame was spliced into its parent
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Chunk '{0}' was already flushed into its parent")]
    ChunkFlushed(String),

    /// A geometry segment is structurally inconsistent
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - `POSL` and `NRML` carry a different number of vectors
    #[error("[E3001] Invalid segment: {0}")]
    InvalidSegment(String),

    /// A vertex carries unusable data
    ///
    /// **Error Code**: E3002
    ///
    /// Raised by vertex validation only; the integrity checker converts it
    /// into an error message instead of propagating it.
    #[error("[E3002] Invalid vertex: {0}")]
    InvalidVertex(String),
}

impl Error {
    /// Create an UnexpectedEndOfData error describing the failed read
    ///
    /// # Arguments
    /// * `needed` - Number of bytes the read required
    /// * `remaining` - Number of bytes that were left
    pub fn end_of_data(needed: usize, remaining: usize) -> Self {
        Error::UnexpectedEndOfData(format!(
            "needed {} byte(s) but only {} remain",
            needed, remaining
        ))
    }

    /// Create an InvalidChunk error for a tag that fails the tag pattern
    pub fn invalid_tag(bytes: &[u8]) -> Self {
        Error::InvalidChunk(format!(
            "'{}' is not a valid chunk name. \
             Chunk names are one uppercase letter followed by three uppercase letters or digits.",
            String::from_utf8_lossy(bytes)
        ))
    }

    /// Create an InvalidChunk error for a negative length field
    pub fn negative_length(tag: &str, length: i32) -> Self {
        Error::InvalidChunk(format!(
            "Chunk '{}' declares length {}; chunk lengths must not be negative",
            tag, length
        ))
    }

    /// Create an InvalidChunk error for a negative element count
    pub fn negative_count(tag: &str, count: i32) -> Self {
        Error::InvalidChunk(format!(
            "Chunk '{}' declares {} elements; element counts must not be negative",
            tag, count
        ))
    }
}
