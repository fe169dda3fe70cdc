//! Geometry segment encoding

use crate::chunk::{ChunkFrame, ChunkTag};
use crate::error::{Error, Result};
use crate::model::{Document, Polygon, Segment, VertexIndex};

/// Flatten polygons into strip entries
///
/// The first two entries of every polygon carry the boundary flag. This is
/// the layout the format's readers expect; it is not the inverse of
/// [`decode_strip`](crate::parser::decode_strip) for every input.
pub fn encode_strip(polygons: &[Polygon]) -> Vec<VertexIndex> {
    let mut entries = Vec::with_capacity(polygons.iter().map(Polygon::len).sum());
    for polygon in polygons {
        for (position, &index) in polygon.indices.iter().enumerate() {
            entries.push(VertexIndex::new(index, position < 2));
        }
    }
    entries
}

/// Write one child chunk of `parent` whose body is produced by `body`
pub(super) fn write_child<F>(parent: &mut ChunkFrame, tag: ChunkTag, body: F) -> Result<()>
where
    F: FnOnce(&mut ChunkFrame) -> Result<()>,
{
    let mut child = ChunkFrame::new(tag);
    child.begin_write();
    body(&mut child)?;
    parent.write_chunk(&mut child)
}

/// Encode a segment as a `SEGM` chunk
///
/// Writes `MATI`, `POSL`, `NRML`, then `UV0L` when the segment has UVs, then
/// `STRP`. The material index comes from the segment's resolved handle and
/// is `-1` when the handle is unset.
///
/// # Errors
///
/// [`Error::InvalidSegment`] if a polygon index does not fit the 15 bits of a
/// strip entry.
pub fn write_segment(segment: &Segment, document: &Document) -> Result<ChunkFrame> {
    if let Some(index) = segment
        .polygons
        .iter()
        .flat_map(|p| p.indices.iter().copied())
        .find(|&index| index > VertexIndex::MAX_INDEX)
    {
        return Err(Error::InvalidSegment(format!(
            "polygon index {} exceeds the strip limit of {}",
            index,
            VertexIndex::MAX_INDEX
        )));
    }

    let mut frame = ChunkFrame::new(ChunkTag::SEGM);
    frame.begin_write();

    write_child(&mut frame, ChunkTag::MATI, |chunk| {
        chunk.write_i32(document.material_position(segment.material));
        Ok(())
    })?;

    write_child(&mut frame, ChunkTag::POSL, |chunk| {
        chunk.write_count(segment.vertices.len())?;
        for vertex in &segment.vertices {
            chunk.write_vector3(vertex.position);
        }
        Ok(())
    })?;

    write_child(&mut frame, ChunkTag::NRML, |chunk| {
        chunk.write_count(segment.vertices.len())?;
        for vertex in &segment.vertices {
            chunk.write_vector3(vertex.normal);
        }
        Ok(())
    })?;

    if segment.has_uvs {
        write_child(&mut frame, ChunkTag::UV0L, |chunk| {
            chunk.write_count(segment.vertices.len())?;
            for vertex in &segment.vertices {
                chunk.write_vector2(vertex.uv);
            }
            Ok(())
        })?;
    }

    let strip = encode_strip(&segment.polygons);
    write_child(&mut frame, ChunkTag::STRP, |chunk| {
        chunk.write_count(strip.len())?;
        for entry in &strip {
            chunk.write_vertex_index(*entry);
        }
        Ok(())
    })?;

    Ok(frame)
}
