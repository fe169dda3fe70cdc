//! Core MSH types and structures

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::chunk::ChunkTag;
use crate::log::{LogSink, Severity, TracingSink};

/// Two component float vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True if no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Three component float vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// Create a new vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True if no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Squared euclidean length
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

/// Four component float vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Vector4 {
    /// Create a new vector
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// True if no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

/// RGBA color with float channels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Create a new color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A vertex of a geometry segment
///
/// Segments store positions, normals and UVs as parallel lists; decoding
/// zips them into one vertex per position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    /// Position
    pub position: Vector3,
    /// Normal
    pub normal: Vector3,
    /// Texture coordinate, zero when the segment has none
    pub uv: Vector2,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vector3, normal: Vector3, uv: Vector2) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A packed triangle strip entry
///
/// On disk each entry is a 16-bit value: the low 15 bits hold the vertex
/// index and bit 15 marks a polygon boundary. The flag is layered on top of
/// the index; it is not a negative index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VertexIndex {
    /// Index into the segment's vertex array, `0..=0x7FFF`
    pub index: u16,
    /// Polygon boundary flag
    pub boundary: bool,
}

impl VertexIndex {
    /// Mask selecting the index bits
    pub const INDEX_MASK: u16 = 0x7FFF;
    /// Bit marking a polygon boundary
    pub const BOUNDARY_BIT: u16 = 0x8000;
    /// Largest index that fits next to the boundary flag
    pub const MAX_INDEX: u16 = Self::INDEX_MASK;

    /// Create a new entry
    pub fn new(index: u16, boundary: bool) -> Self {
        Self { index, boundary }
    }

    /// Unpack a raw 16-bit strip value
    pub fn from_raw(raw: i16) -> Self {
        let raw = raw as u16;
        Self {
            index: raw & Self::INDEX_MASK,
            boundary: raw & Self::BOUNDARY_BIT != 0,
        }
    }

    /// Pack into the raw 16-bit strip value
    pub fn to_raw(self) -> i16 {
        let mut raw = self.index;
        if self.boundary {
            raw ^= Self::BOUNDARY_BIT;
        }
        raw as i16
    }
}

/// A polygon as an ordered list of indices into the segment's vertices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    /// Vertex indices
    pub indices: Vec<u16>,
}

impl Polygon {
    /// Create an empty polygon
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if the polygon has no indices
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl From<Vec<u16>> for Polygon {
    fn from(indices: Vec<u16>) -> Self {
        Self { indices }
    }
}

/// Default nesting limit for container chunks
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for parsing MSH files
///
/// Decides which tags are parsed as containers, how deep containers may
/// nest, and where log messages go.
#[derive(Clone)]
pub struct ParserConfig {
    /// Tags whose payload is a sequence of child chunks
    container_tags: HashSet<ChunkTag>,
    /// Maximum container nesting depth
    max_depth: usize,
    /// Destination for log messages
    log_sink: Arc<dyn LogSink>,
}

impl ParserConfig {
    /// Create a configuration with the standard MSH container tags
    pub fn new() -> Self {
        let container_tags = [
            ChunkTag::HEDR,
            ChunkTag::MSH2,
            ChunkTag::SINF,
            ChunkTag::MODL,
            ChunkTag::GEOM,
        ]
        .into_iter()
        .collect();

        Self {
            container_tags,
            max_depth: DEFAULT_MAX_DEPTH,
            log_sink: Arc::new(TracingSink),
        }
    }

    /// Treat `tag` as a container chunk
    pub fn with_container_tag(mut self, tag: ChunkTag) -> Self {
        self.container_tags.insert(tag);
        self
    }

    /// Stop treating `tag` as a container; its payload is kept as raw bytes
    pub fn without_container_tag(mut self, tag: ChunkTag) -> Self {
        self.container_tags.remove(&tag);
        self
    }

    /// Limit how deep container chunks may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Send log messages to `sink`
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = sink;
        self
    }

    /// Check if `tag` is parsed as a container
    pub fn is_container(&self, tag: ChunkTag) -> bool {
        self.container_tags.contains(&tag)
    }

    /// Maximum container nesting depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The configured log sink
    pub fn log_sink(&self) -> &dyn LogSink {
        self.log_sink.as_ref()
    }

    /// Log through the configured sink
    pub fn log(&self, message: &str, severity: Severity) {
        self.log_sink.log(message, severity);
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.container_tags.iter().collect();
        tags.sort();
        f.debug_struct("ParserConfig")
            .field("container_tags", &tags)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
