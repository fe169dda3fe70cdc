//! Geometry segments

use super::core::{Polygon, Vertex};
use super::material::{Material, MaterialHandle};

/// One geometry record: a material reference plus vertex and polygon data
///
/// The material is stored twice: `material_index` is the raw value read from
/// the `MATI` chunk, `material` is the handle bound by reference resolution.
/// Only the handle is used when writing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    /// Raw material index as read from the file
    pub material_index: i32,
    /// Resolved material, `None` until references are applied or when the
    /// index does not name a material
    pub material: Option<MaterialHandle>,
    /// Merged vertex array
    pub vertices: Vec<Vertex>,
    /// Polygons indexing into `vertices`
    pub polygons: Vec<Polygon>,
    /// Whether UV data was present when the segment was decoded
    ///
    /// Controls whether a `UV0L` chunk is written; it is not recomputed from
    /// the current vertices.
    pub has_uvs: bool,
}

impl Segment {
    /// Create an empty segment with no material
    pub fn new() -> Self {
        Self {
            material_index: -1,
            ..Default::default()
        }
    }

    /// Assign a material, keeping the raw index in step
    pub fn set_material(&mut self, handle: MaterialHandle) {
        self.material_index = i32::try_from(handle.index()).unwrap_or(-1);
        self.material = Some(handle);
    }

    /// Bind `material_index` to a material in `materials`
    ///
    /// The reference is set only when the index is in range; anything else
    /// leaves it unset. Must run after the whole material list is known.
    pub fn apply_references(&mut self, materials: &[Material]) {
        self.material = usize::try_from(self.material_index)
            .ok()
            .filter(|&index| index < materials.len())
            .map(MaterialHandle::new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials(count: usize) -> Vec<Material> {
        (0..count)
            .map(|i| Material::new(format!("mat{}", i)))
            .collect()
    }

    #[test]
    fn test_apply_references_in_range() {
        let mut segment = Segment::new();
        segment.material_index = 1;
        segment.apply_references(&materials(2));
        assert_eq!(segment.material, Some(MaterialHandle::new(1)));
    }

    #[test]
    fn test_apply_references_out_of_range() {
        let list = materials(2);
        for index in [-1, 2, 100, i32::MIN] {
            let mut segment = Segment::new();
            segment.material_index = index;
            segment.apply_references(&list);
            assert_eq!(segment.material, None, "index {}", index);
        }
    }

    #[test]
    fn test_apply_references_clears_stale_handle() {
        let mut segment = Segment::new();
        segment.set_material(MaterialHandle::new(3));
        segment.apply_references(&materials(1));
        assert_eq!(segment.material, None);
    }

    #[test]
    fn test_set_material_updates_index() {
        let mut segment = Segment::new();
        assert_eq!(segment.material_index, -1);
        segment.set_material(MaterialHandle::new(4));
        assert_eq!(segment.material_index, 4);
    }
}
