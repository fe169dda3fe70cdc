//! Bounded, position-tracking byte buffer
//!
//! [`ByteCursor`] owns a byte buffer and a read position. Reads consume fixed
//! widths from the current position and fail with
//! [`Error::UnexpectedEndOfData`] instead of reading past the end. Writes
//! append to the end of the buffer. All numeric values are little-endian.

use crate::error::{Error, Result};
use std::io::{self, Read};

/// Byte buffer with a forward-only read position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteCursor {
    data: Vec<u8>,
    position: usize,
}

impl ByteCursor {
    /// Create an empty cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing buffer, reading from its first byte
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }

    /// Wrap an existing buffer, reading from `position`
    ///
    /// A position past the end is clamped to the buffer length.
    pub fn with_position(data: Vec<u8>, position: usize) -> Self {
        let position = position.min(data.len());
        Self { data, position }
    }

    /// Current read offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True once every byte has been read
    pub fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The whole buffer, read or not
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Take the buffer out of the cursor
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Drop all bytes and reset the position
    pub fn clear(&mut self) {
        self.data.clear();
        self.position = 0;
    }

    /// Advance past `count` bytes without decoding them
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read a run of `count` raw bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<&[u8]> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(Error::end_of_data(count, remaining));
        }
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..self.position])
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a 4-byte float
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Read a 4-byte signed integer
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read a 2-byte signed integer
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Read a 2-byte unsigned integer
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_array::<1>().map(|b| b[0])
    }

    /// Read a fixed-width string field
    ///
    /// Exactly `length` bytes are consumed. The returned string stops at the
    /// first NUL byte; anything after it is discarded from the value but still
    /// counts towards the consumed width. Bytes are interpreted as Latin-1.
    pub fn read_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_bytes(length)?;
        Ok(bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect())
    }

    /// Append raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a 4-byte float
    pub fn write_f32(&mut self, value: f32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a 4-byte signed integer
    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a 2-byte signed integer
    pub fn write_i16(&mut self, value: i16) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a 2-byte unsigned integer
    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a single byte
    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Overwrite four bytes at `offset` with `value`
    ///
    /// Used to patch a chunk's length field once its content is final.
    pub fn patch_i32(&mut self, offset: usize, value: i32) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(offset..offset + 4)
            .ok_or_else(|| Error::end_of_data(offset + 4, len))?;
        slot.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}

/// Read exactly `count` bytes from a blocking stream
///
/// A stream that ends early yields [`Error::UnexpectedEndOfData`]; any other
/// I/O failure is returned as [`Error::Io`].
pub fn read_exact_from<R: Read + ?Sized>(reader: &mut R, count: usize) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; count];
    reader.read_exact(&mut buffer).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfData(format!(
            "stream ended before {} byte(s) could be read",
            count
        )),
        _ => Error::Io(e),
    })?;
    Ok(buffer)
}
