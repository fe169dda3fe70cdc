//! Chunk framing
//!
//! Every record in an MSH file is a chunk: a four character tag, a 32-bit
//! little-endian payload length and the payload itself. Container chunks hold
//! further chunks in their payload, so a whole file is a tree of chunks.
//!
//! [`ChunkFrame`] is used in both directions. Parsed frames own exactly the
//! payload bytes and keep a read position into them. Frames built for writing
//! hold the header followed by the payload; the length field is written as a
//! zero placeholder and patched by [`ChunkFrame::finish`] once the content is
//! known. Splicing a child into its parent with [`ChunkFrame::write_chunk`]
//! moves the bytes and flushes the child; reading a flushed frame fails with
//! [`Error::ChunkFlushed`].

use crate::cursor::{ByteCursor, read_exact_from};
use crate::error::{Error, Result};
use crate::model::{Color, Vector2, Vector3, Vector4, VertexIndex};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Size of a chunk header: 4 tag bytes plus a 4 byte length
pub const HEADER_SIZE: usize = 8;

/// A validated four character chunk name
///
/// Tags are one uppercase ASCII letter followed by three uppercase ASCII
/// letters or digits, e.g. `SEGM` or `UV0L`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    /// File header, root of an MSH file
    pub const HEDR: Self = Self(*b"HEDR");
    /// Mesh block inside the header
    pub const MSH2: Self = Self(*b"MSH2");
    /// Scene information
    pub const SINF: Self = Self(*b"SINF");
    /// Material list
    pub const MATL: Self = Self(*b"MATL");
    /// Material definition
    pub const MATD: Self = Self(*b"MATD");
    /// Name string
    pub const NAME: Self = Self(*b"NAME");
    /// Material color data
    pub const DATA: Self = Self(*b"DATA");
    /// Material attributes
    pub const ATRB: Self = Self(*b"ATRB");
    /// Texture slot 0
    pub const TX0D: Self = Self(*b"TX0D");
    /// Texture slot 1
    pub const TX1D: Self = Self(*b"TX1D");
    /// Texture slot 2
    pub const TX2D: Self = Self(*b"TX2D");
    /// Texture slot 3
    pub const TX3D: Self = Self(*b"TX3D");
    /// Model node
    pub const MODL: Self = Self(*b"MODL");
    /// Geometry block of a model
    pub const GEOM: Self = Self(*b"GEOM");
    /// Geometry segment
    pub const SEGM: Self = Self(*b"SEGM");
    /// Material index of a segment
    pub const MATI: Self = Self(*b"MATI");
    /// Position list
    pub const POSL: Self = Self(*b"POSL");
    /// Normal list
    pub const NRML: Self = Self(*b"NRML");
    /// UV coordinate list
    pub const UV0L: Self = Self(*b"UV0L");
    /// Triangle strip index list
    pub const STRP: Self = Self(*b"STRP");
    /// Bounding box
    pub const BBOX: Self = Self(*b"BBOX");

    /// Texture slot tags in slot order
    pub const TEXTURE_SLOTS: [Self; 4] = [Self::TX0D, Self::TX1D, Self::TX2D, Self::TX3D];

    /// Validate four raw bytes as a tag
    pub fn from_bytes(bytes: [u8; 4]) -> Result<Self> {
        if Self::is_valid(&bytes) {
            Ok(Self(bytes))
        } else {
            Err(Error::invalid_tag(&bytes))
        }
    }

    /// Check bytes against the tag pattern `[A-Z][A-Z0-9]{3}`
    pub fn is_valid(bytes: &[u8]) -> bool {
        match bytes {
            [first, rest @ ..] if rest.len() == 3 => {
                first.is_ascii_uppercase()
                    && rest
                        .iter()
                        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            }
            _ => false,
        }
    }

    /// Raw tag bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Tag as a string slice
    pub fn as_str(&self) -> &str {
        // Validated tags are pure ASCII.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl FromStr for ChunkTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| Error::invalid_tag(s.as_bytes()))?;
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({})", self.as_str())
    }
}

/// Decode a header into its tag and payload length
///
/// The tag is checked before the length, so a header that is wrong in both
/// places reports the tag.
fn parse_header(header: &[u8]) -> Result<(ChunkTag, usize)> {
    let mut tag = [0u8; 4];
    tag.copy_from_slice(&header[..4]);
    let mut length = [0u8; 4];
    length.copy_from_slice(&header[4..HEADER_SIZE]);
    let length = i32::from_le_bytes(length);

    let tag = ChunkTag::from_bytes(tag)?;
    let length = usize::try_from(length).map_err(|_| Error::negative_length(tag.as_str(), length))?;
    Ok((tag, length))
}

fn length_field(tag: ChunkTag, length: usize) -> Result<i32> {
    i32::try_from(length).map_err(|_| {
        Error::InvalidChunk(format!(
            "Chunk '{}' payload of {} bytes does not fit a 32-bit length field",
            tag, length
        ))
    })
}

/// One tagged, length-prefixed record
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkFrame {
    tag: ChunkTag,
    cursor: ByteCursor,
    /// 0 for parsed frames, [`HEADER_SIZE`] once `begin_write` emitted a header
    payload_start: usize,
    flushed: bool,
}

impl ChunkFrame {
    /// Create an empty frame for `tag`
    pub fn new(tag: ChunkTag) -> Self {
        Self::from_payload(tag, Vec::new())
    }

    /// Create a frame that owns `payload`, positioned at its first byte
    pub fn from_payload(tag: ChunkTag, payload: Vec<u8>) -> Self {
        Self {
            tag,
            cursor: ByteCursor::from_vec(payload),
            payload_start: 0,
            flushed: false,
        }
    }

    /// Parse one chunk starting at `offset` in `buffer`
    ///
    /// # Errors
    ///
    /// - [`Error::UnexpectedEndOfData`] if fewer than 8 bytes remain for the
    ///   header or fewer than the declared length remain for the payload
    /// - [`Error::InvalidChunk`] if the tag fails the tag pattern or the length
    ///   is negative
    pub fn from_slice(buffer: &[u8], offset: usize) -> Result<Self> {
        let available = buffer.len().saturating_sub(offset);
        if available < HEADER_SIZE {
            return Err(Error::end_of_data(HEADER_SIZE, available));
        }

        let (tag, length) = parse_header(&buffer[offset..offset + HEADER_SIZE])?;

        let start = offset + HEADER_SIZE;
        let remaining = buffer.len() - start;
        if length > remaining {
            return Err(Error::UnexpectedEndOfData(format!(
                "chunk '{}' declares {} byte(s) but only {} remain",
                tag, length, remaining
            )));
        }

        Ok(Self::from_payload(tag, buffer[start..start + length].to_vec()))
    }

    /// Parse one chunk from a blocking stream
    ///
    /// Behaves like [`ChunkFrame::from_slice`]; an underrun anywhere in the
    /// header or payload is reported as [`Error::UnexpectedEndOfData`].
    pub fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let header = read_exact_from(reader, HEADER_SIZE)?;
        let mut array = [0u8; HEADER_SIZE];
        array.copy_from_slice(&header);
        Self::from_header(array, reader)
    }

    /// Finish parsing a chunk whose header was already read from `reader`
    pub(crate) fn from_header<R: Read + ?Sized>(
        header: [u8; HEADER_SIZE],
        reader: &mut R,
    ) -> Result<Self> {
        let (tag, length) = parse_header(&header)?;

        // Read through `take` so a bogus length cannot force a huge allocation up front.
        let mut payload = Vec::new();
        Read::take(&mut *reader, length as u64).read_to_end(&mut payload)?;
        if payload.len() != length {
            return Err(Error::UnexpectedEndOfData(format!(
                "chunk '{}' declares {} byte(s) but the stream ended after {}",
                tag,
                length,
                payload.len()
            )));
        }

        Ok(Self::from_payload(tag, payload))
    }

    /// The chunk's tag
    pub fn tag(&self) -> ChunkTag {
        self.tag
    }

    /// True once the frame was spliced into a parent
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    fn live(&self) -> Result<&ByteCursor> {
        if self.flushed {
            Err(Error::ChunkFlushed(self.tag.to_string()))
        } else {
            Ok(&self.cursor)
        }
    }

    fn live_mut(&mut self) -> Result<&mut ByteCursor> {
        if self.flushed {
            Err(Error::ChunkFlushed(self.tag.to_string()))
        } else {
            Ok(&mut self.cursor)
        }
    }

    /// Payload bytes, excluding any header written by `begin_write`
    pub fn payload(&self) -> Result<&[u8]> {
        let start = self.payload_start;
        self.live().map(|c| &c.as_slice()[start..])
    }

    /// Payload length in bytes
    pub fn payload_len(&self) -> Result<usize> {
        self.payload().map(<[u8]>::len)
    }

    /// Read offset relative to the start of the payload
    pub fn position(&self) -> Result<usize> {
        let start = self.payload_start;
        self.live().map(|c| c.position() - start)
    }

    /// Unread payload bytes
    pub fn remaining(&self) -> Result<usize> {
        self.live().map(ByteCursor::remaining)
    }

    /// True once the whole payload has been read
    pub fn is_exhausted(&self) -> Result<bool> {
        self.live().map(ByteCursor::is_at_end)
    }

    /// Read a 4-byte float
    pub fn read_f32(&mut self) -> Result<f32> {
        self.live_mut()?.read_f32()
    }

    /// Read a 4-byte signed integer
    pub fn read_i32(&mut self) -> Result<i32> {
        self.live_mut()?.read_i32()
    }

    /// Read a 2-byte signed integer
    pub fn read_i16(&mut self) -> Result<i16> {
        self.live_mut()?.read_i16()
    }

    /// Read a 2-byte unsigned integer
    pub fn read_u16(&mut self) -> Result<u16> {
        self.live_mut()?.read_u16()
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.live_mut()?.read_u8()
    }

    /// Read `count` raw bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<&[u8]> {
        self.live_mut()?.read_bytes(count)
    }

    /// Read a fixed-width, NUL-terminated string field of `length` bytes
    pub fn read_string(&mut self, length: usize) -> Result<String> {
        self.live_mut()?.read_string(length)
    }

    /// Read the rest of the payload as a string
    pub fn read_remaining_string(&mut self) -> Result<String> {
        let remaining = self.remaining()?;
        self.read_string(remaining)
    }

    /// Read an element count and reject negative values
    pub fn read_count(&mut self) -> Result<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| Error::negative_count(self.tag.as_str(), count))
    }

    /// Read two floats
    pub fn read_vector2(&mut self) -> Result<Vector2> {
        Ok(Vector2::new(self.read_f32()?, self.read_f32()?))
    }

    /// Read three floats
    pub fn read_vector3(&mut self) -> Result<Vector3> {
        Ok(Vector3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read four floats
    pub fn read_vector4(&mut self) -> Result<Vector4> {
        Ok(Vector4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read an RGBA float color
    pub fn read_color(&mut self) -> Result<Color> {
        Ok(Color::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read a packed strip entry
    pub fn read_vertex_index(&mut self) -> Result<VertexIndex> {
        self.read_i16().map(VertexIndex::from_raw)
    }

    /// Parse the child chunk at the read position and step over it
    ///
    /// At least a full header must remain in this frame's payload.
    pub fn read_chunk(&mut self) -> Result<ChunkFrame> {
        let cursor = self.live_mut()?;
        let remaining = cursor.remaining();
        if remaining < HEADER_SIZE {
            return Err(Error::end_of_data(HEADER_SIZE, remaining));
        }

        let child = ChunkFrame::from_slice(cursor.as_slice(), cursor.position())?;
        cursor.skip(child.cursor.len() + HEADER_SIZE)?;
        Ok(child)
    }

    /// Read child chunks until the payload is exhausted
    pub fn read_children(&mut self) -> Result<Vec<ChunkFrame>> {
        let mut children = Vec::new();
        while !self.is_exhausted()? {
            children.push(self.read_chunk()?);
        }
        Ok(children)
    }

    /// Start writing: clear the frame and emit the tag and a placeholder length
    pub fn begin_write(&mut self) {
        let mut header = Vec::with_capacity(HEADER_SIZE);
        header.extend_from_slice(self.tag.as_bytes());
        header.extend_from_slice(&0i32.to_le_bytes());
        self.cursor = ByteCursor::with_position(header, HEADER_SIZE);
        self.payload_start = HEADER_SIZE;
        self.flushed = false;
    }

    /// Writes to a flushed frame start over with an empty payload.
    fn sink(&mut self) -> &mut ByteCursor {
        if self.flushed {
            self.flushed = false;
            self.payload_start = 0;
            self.cursor.clear();
        }
        &mut self.cursor
    }

    /// Append raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.sink().write_bytes(bytes);
    }

    /// Append a 4-byte float
    pub fn write_f32(&mut self, value: f32) {
        self.sink().write_f32(value);
    }

    /// Append a 4-byte signed integer
    pub fn write_i32(&mut self, value: i32) {
        self.sink().write_i32(value);
    }

    /// Append a 2-byte signed integer
    pub fn write_i16(&mut self, value: i16) {
        self.sink().write_i16(value);
    }

    /// Append a 2-byte unsigned integer
    pub fn write_u16(&mut self, value: u16) {
        self.sink().write_u16(value);
    }

    /// Append one byte
    pub fn write_u8(&mut self, value: u8) {
        self.sink().write_u8(value);
    }

    /// Append a bare four character header
    pub fn write_header(&mut self, tag: ChunkTag) {
        self.write_bytes(tag.as_bytes());
    }

    /// Append an element count
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let count = i32::try_from(count).map_err(|_| {
            Error::InvalidChunk(format!(
                "Chunk '{}' cannot hold {} elements",
                self.tag, count
            ))
        })?;
        self.write_i32(count);
        Ok(())
    }

    /// Append two floats
    pub fn write_vector2(&mut self, vector: Vector2) {
        self.write_f32(vector.x);
        self.write_f32(vector.y);
    }

    /// Append three floats
    pub fn write_vector3(&mut self, vector: Vector3) {
        self.write_f32(vector.x);
        self.write_f32(vector.y);
        self.write_f32(vector.z);
    }

    /// Append four floats
    pub fn write_vector4(&mut self, vector: Vector4) {
        self.write_f32(vector.x);
        self.write_f32(vector.y);
        self.write_f32(vector.z);
        self.write_f32(vector.w);
    }

    /// Append an RGBA float color
    pub fn write_color(&mut self, color: Color) {
        self.write_f32(color.r);
        self.write_f32(color.g);
        self.write_f32(color.b);
        self.write_f32(color.a);
    }

    /// Append a packed strip entry
    pub fn write_vertex_index(&mut self, index: VertexIndex) {
        self.write_i16(index.to_raw());
    }

    /// Append a complete string chunk: `header`, length, characters, NUL
    ///
    /// The length is known up front, so no placeholder is written. Characters
    /// outside Latin-1 are written as `?`.
    pub fn write_string(&mut self, header: ChunkTag, value: &str) -> Result<()> {
        let bytes: Vec<u8> = value
            .chars()
            .map(|c| u8::try_from(c).unwrap_or(b'?'))
            .collect();
        let length = length_field(header, bytes.len() + 1)?;

        self.write_header(header);
        self.write_i32(length);
        self.write_bytes(&bytes);
        self.write_u8(0);
        Ok(())
    }

    /// Patch the length field to match the payload written so far
    ///
    /// Does nothing for frames that carry no header of their own.
    pub fn finish(&mut self) -> Result<()> {
        let tag = self.tag;
        let start = self.payload_start;
        let cursor = self.live_mut()?;
        if start == HEADER_SIZE {
            let length = length_field(tag, cursor.len() - HEADER_SIZE)?;
            cursor.patch_i32(4, length)?;
        }
        Ok(())
    }

    /// Splice `child` into this frame's payload and flush the child
    ///
    /// The child's length field is patched first. Afterwards the bytes belong
    /// to this frame and every read of the child fails.
    pub fn write_chunk(&mut self, child: &mut ChunkFrame) -> Result<()> {
        child.finish()?;
        if child.payload_start == HEADER_SIZE {
            self.write_bytes(child.cursor.as_slice());
        } else {
            let length = length_field(child.tag, child.cursor.len())?;
            self.write_header(child.tag);
            self.write_i32(length);
            self.write_bytes(child.cursor.as_slice());
        }
        child.flush();
        Ok(())
    }

    /// Drop the payload and mark the frame as consumed
    pub fn flush(&mut self) {
        self.cursor.clear();
        self.payload_start = 0;
        self.flushed = true;
    }

    /// Encode the frame as header plus payload
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        self.finish()?;
        if self.payload_start == HEADER_SIZE {
            return Ok(self.cursor.into_inner());
        }
        let mut framed = ChunkFrame::new(self.tag);
        framed.begin_write();
        framed.write_bytes(self.cursor.as_slice());
        framed.finish()?;
        Ok(framed.cursor.into_inner())
    }
}
