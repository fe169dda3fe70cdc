//! Bounding box record

use super::core::{Vector3, Vector4};

/// Oriented bounding box (`BBOX` chunk)
///
/// Stored on disk as rotation, translation, dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    /// Orientation as a quaternion
    pub rotation: Vector4,
    /// Center of the box
    pub translation: Vector3,
    /// Half extents in x, y, z and the bounding sphere radius in w
    pub dimension: Vector4,
}
