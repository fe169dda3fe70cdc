//! The document: chunk tree plus material arena

use super::bbox::BoundingBox;
use super::material::{Material, MaterialHandle};
use super::segment::Segment;
use crate::chunk::ChunkTag;

/// A chunk kept verbatim because nothing interprets it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    /// Chunk tag
    pub tag: ChunkTag,
    /// Payload bytes, without the header
    pub data: Vec<u8>,
}

impl RawChunk {
    /// Create a raw chunk
    pub fn new(tag: ChunkTag, data: Vec<u8>) -> Self {
        Self { tag, data }
    }
}

/// One node of the document's chunk tree
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A chunk whose payload is a sequence of child chunks
    Container {
        /// Chunk tag
        tag: ChunkTag,
        /// Child records in file order
        children: Vec<Record>,
    },
    /// Position of the `MATL` chunk; the materials live in
    /// [`Document::materials`]
    MaterialList,
    /// A `SEGM` chunk
    Segment(Segment),
    /// A `BBOX` chunk
    BoundingBox(BoundingBox),
    /// Any other chunk
    Raw(RawChunk),
}

impl Record {
    /// Tag this record is written with
    pub fn tag(&self) -> ChunkTag {
        match self {
            Record::Container { tag, .. } => *tag,
            Record::MaterialList => ChunkTag::MATL,
            Record::Segment(_) => ChunkTag::SEGM,
            Record::BoundingBox(_) => ChunkTag::BBOX,
            Record::Raw(raw) => raw.tag,
        }
    }

    fn collect_segments<'a>(&'a self, out: &mut Vec<&'a Segment>) {
        match self {
            Record::Container { children, .. } => {
                for child in children {
                    child.collect_segments(out);
                }
            }
            Record::Segment(segment) => out.push(segment),
            _ => {}
        }
    }

    fn for_each_segment_mut(&mut self, f: &mut dyn FnMut(&mut Segment)) {
        match self {
            Record::Container { children, .. } => {
                for child in children {
                    child.for_each_segment_mut(f);
                }
            }
            Record::Segment(segment) => f(segment),
            _ => {}
        }
    }
}

/// A parsed MSH file
///
/// Owns the chunk tree and the material list. Segments refer to materials by
/// [`MaterialHandle`], so the tree holds no references into the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Top-level records, normally a single `HEDR` container
    pub records: Vec<Record>,
    /// All materials of the file, in `MATL` order
    pub materials: Vec<Material>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return its handle
    ///
    /// Materials are written only where a [`Record::MaterialList`] sits in
    /// [`Document::records`]. A document built by hand needs one in its tree,
    /// otherwise the materials are dropped on write and
    /// [`check_integrity`](crate::CheckIntegrity::check_integrity) warns.
    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle::new(self.materials.len() - 1)
    }

    /// Look up a material by handle
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.index())
    }

    /// Index written to `MATI` for a segment's material
    ///
    /// `-1` when the handle is unset or no longer inside the material list.
    pub fn material_position(&self, handle: Option<MaterialHandle>) -> i32 {
        handle
            .filter(|h| h.index() < self.materials.len())
            .and_then(|h| i32::try_from(h.index()).ok())
            .unwrap_or(-1)
    }

    /// All segments in tree order
    pub fn segments(&self) -> Vec<&Segment> {
        let mut out = Vec::new();
        for record in &self.records {
            record.collect_segments(&mut out);
        }
        out
    }

    /// Run `f` on every segment in tree order
    pub fn for_each_segment_mut(&mut self, mut f: impl FnMut(&mut Segment)) {
        for record in &mut self.records {
            record.for_each_segment_mut(&mut f);
        }
    }

    /// Bind every segment's raw material index to the material list
    ///
    /// Runs automatically at the end of parsing. Call it again after editing
    /// raw indices or the material list.
    pub fn apply_references(&mut self) {
        let materials = &self.materials;
        for record in &mut self.records {
            record.for_each_segment_mut(&mut |segment: &mut Segment| {
                segment.apply_references(materials)
            });
        }
    }
}
