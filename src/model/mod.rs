//! Data structures representing MSH documents

mod bbox;
mod core;
mod document;
mod material;
mod segment;

pub use bbox::BoundingBox;
pub use self::core::{
    Color, DEFAULT_MAX_DEPTH, ParserConfig, Polygon, Vector2, Vector3, Vector4, Vertex,
    VertexIndex,
};
pub use document::{Document, RawChunk, Record};
pub use material::{Material, MaterialAttributes, MaterialData, MaterialHandle};
pub use segment::Segment;
