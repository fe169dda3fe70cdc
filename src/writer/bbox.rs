use crate::chunk::{ChunkFrame, ChunkTag};
use crate::model::BoundingBox;

/// Encode a bounding box as a `BBOX` chunk
pub fn write_bounding_box(bbox: &BoundingBox) -> ChunkFrame {
    let mut frame = ChunkFrame::new(ChunkTag::BBOX);
    frame.begin_write();
    frame.write_vector4(bbox.rotation);
    frame.write_vector3(bbox.translation);
    frame.write_vector4(bbox.dimension);
    frame
}
