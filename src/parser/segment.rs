//! Geometry segment decoding

use crate::chunk::{ChunkFrame, ChunkTag};
use crate::error::{Error, Result};
use crate::log::{LogSink, Severity};
use crate::model::{Polygon, Segment, Vector2, Vector3, Vertex, VertexIndex};

/// Size of a three float vector on disk
const VECTOR3_SIZE: usize = 12;
/// Size of a two float vector on disk
const VECTOR2_SIZE: usize = 8;
/// Size of a packed strip entry on disk
const STRIP_ENTRY_SIZE: usize = 2;

/// Builds polygons from a stream of strip entries
///
/// A boundary-flagged entry starts a new polygon only when the entry before
/// it was not flagged. Runs of flagged entries therefore continue the polygon
/// started by the first one.
#[derive(Debug, Default)]
pub struct StripDecoder {
    polygons: Vec<Polygon>,
    current: Polygon,
    last_boundary: bool,
}

impl StripDecoder {
    /// Create a decoder with no polygons
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next strip entry
    pub fn push(&mut self, entry: VertexIndex) {
        if entry.boundary && !self.last_boundary && !self.current.is_empty() {
            self.polygons.push(std::mem::take(&mut self.current));
        }
        self.current.indices.push(entry.index);
        self.last_boundary = entry.boundary;
    }

    /// Close the polygon in progress and return all polygons
    pub fn finish(mut self) -> Vec<Polygon> {
        if !self.current.is_empty() {
            self.polygons.push(self.current);
        }
        self.polygons
    }
}

/// Decode a whole strip into polygons
pub fn decode_strip(entries: impl IntoIterator<Item = VertexIndex>) -> Vec<Polygon> {
    let mut decoder = StripDecoder::new();
    for entry in entries {
        decoder.push(entry);
    }
    decoder.finish()
}

fn read_vector3_list(chunk: &mut ChunkFrame, out: &mut Vec<Vector3>) -> Result<()> {
    let count = chunk.read_count()?;
    out.reserve(count.min(chunk.remaining()? / VECTOR3_SIZE));
    for _ in 0..count {
        out.push(chunk.read_vector3()?);
    }
    Ok(())
}

fn read_vector2_list(chunk: &mut ChunkFrame, out: &mut Vec<Vector2>) -> Result<()> {
    let count = chunk.read_count()?;
    out.reserve(count.min(chunk.remaining()? / VECTOR2_SIZE));
    for _ in 0..count {
        out.push(chunk.read_vector2()?);
    }
    Ok(())
}

fn read_strip(chunk: &mut ChunkFrame, decoder: &mut StripDecoder) -> Result<()> {
    let count = chunk.read_count()?;
    if count > chunk.remaining()? / STRIP_ENTRY_SIZE {
        return Err(Error::UnexpectedEndOfData(format!(
            "strip declares {} entries but only {} byte(s) remain",
            count,
            chunk.remaining()?
        )));
    }
    for _ in 0..count {
        decoder.push(chunk.read_vertex_index()?);
    }
    Ok(())
}

/// Decode a `SEGM` chunk
///
/// Child chunks may come in any order and any subset; unknown tags are
/// skipped. Repeated list chunks append to the lists read so far, and the
/// strip decoder carries its state across repeated `STRP` chunks. A segment
/// without `MATI` refers to material 0.
///
/// # Errors
///
/// Framing errors from the children, and [`Error::InvalidSegment`] when the
/// number of positions and normals differ.
pub fn parse_segment(frame: &mut ChunkFrame, log: &dyn LogSink) -> Result<Segment> {
    let mut segment = Segment {
        material_index: 0,
        ..Segment::new()
    };
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut strip = StripDecoder::new();

    while !frame.is_exhausted()? {
        let mut child = frame.read_chunk()?;
        match child.tag() {
            ChunkTag::MATI => segment.material_index = child.read_i32()?,
            ChunkTag::POSL => read_vector3_list(&mut child, &mut positions)?,
            ChunkTag::NRML => read_vector3_list(&mut child, &mut normals)?,
            ChunkTag::UV0L => read_vector2_list(&mut child, &mut uvs)?,
            ChunkTag::STRP => read_strip(&mut child, &mut strip)?,
            other => log.log(
                &format!("Skipping unknown segment chunk {}", other),
                Severity::Info,
            ),
        }
    }

    if positions.len() != normals.len() {
        return Err(Error::InvalidSegment(format!(
            "segment has {} position(s) but {} normal(s); POSL and NRML must have the same count",
            positions.len(),
            normals.len()
        )));
    }

    segment.has_uvs = !uvs.is_empty();
    segment.vertices = positions
        .into_iter()
        .zip(normals)
        .enumerate()
        .map(|(i, (position, normal))| {
            Vertex::new(position, normal, uvs.get(i).copied().unwrap_or_default())
        })
        .collect();
    segment.polygons = strip.finish();

    log.log(
        &format!(
            "Decoded segment with {} vertices and {} polygons",
            segment.vertices.len(),
            segment.polygons.len()
        ),
        Severity::Info,
    );

    Ok(segment)
}
