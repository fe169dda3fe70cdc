use crate::chunk::ChunkFrame;
use crate::error::Result;
use crate::model::BoundingBox;

/// Parse a `BBOX` chunk: rotation, translation, dimension
pub fn parse_bounding_box(frame: &mut ChunkFrame) -> Result<BoundingBox> {
    Ok(BoundingBox {
        rotation: frame.read_vector4()?,
        translation: frame.read_vector3()?,
        dimension: frame.read_vector4()?,
    })
}
