//! Shared builders for integration tests
//!
//! Builds MSH byte streams by hand so tests do not depend on the writer to
//! produce their input.

#![allow(dead_code)]

use libmsh::{
    ChunkTag, Document, Material, MaterialData, NullSink, ParserConfig, Polygon, Record, Segment,
    Vector2, Vector3, Vertex,
};
use std::sync::Arc;

/// Frame `payload` as a chunk with `tag`
pub fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&(payload.len() as i32).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Concatenate several chunks
pub fn concat(chunks: &[Vec<u8>]) -> Vec<u8> {
    chunks.concat()
}

/// Payload of a `POSL`/`NRML` chunk
pub fn vector3_list(vectors: &[(f32, f32, f32)]) -> Vec<u8> {
    let mut bytes = (vectors.len() as i32).to_le_bytes().to_vec();
    for &(x, y, z) in vectors {
        bytes.extend_from_slice(&x.to_le_bytes());
        bytes.extend_from_slice(&y.to_le_bytes());
        bytes.extend_from_slice(&z.to_le_bytes());
    }
    bytes
}

/// Payload of a `UV0L` chunk
pub fn vector2_list(vectors: &[(f32, f32)]) -> Vec<u8> {
    let mut bytes = (vectors.len() as i32).to_le_bytes().to_vec();
    for &(u, v) in vectors {
        bytes.extend_from_slice(&u.to_le_bytes());
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Payload of a `STRP` chunk from (index, boundary) pairs
pub fn strip(entries: &[(u16, bool)]) -> Vec<u8> {
    let mut bytes = (entries.len() as i32).to_le_bytes().to_vec();
    for &(index, boundary) in entries {
        let raw = if boundary { index | 0x8000 } else { index };
        bytes.extend_from_slice(&raw.to_le_bytes());
    }
    bytes
}

/// Payload of a `MATD` chunk holding only a name
pub fn material_definition(name: &str) -> Vec<u8> {
    let mut text = name.as_bytes().to_vec();
    text.push(0);
    chunk(b"NAME", &text)
}

/// A `MATL` chunk with one named definition per entry
pub fn material_list(names: &[&str]) -> Vec<u8> {
    let mut payload = (names.len() as i32).to_le_bytes().to_vec();
    for name in names {
        payload.extend(chunk(b"MATD", &material_definition(name)));
    }
    chunk(b"MATL", &payload)
}

/// Parser configuration that discards log output
pub fn quiet_config() -> ParserConfig {
    ParserConfig::new().with_log_sink(Arc::new(NullSink))
}

/// A vertex with a +Y normal and the given position and UV
pub fn vertex(position: (f32, f32, f32), uv: (f32, f32)) -> Vertex {
    Vertex::new(
        Vector3::new(position.0, position.1, position.2),
        Vector3::new(0.0, 1.0, 0.0),
        Vector2::new(uv.0, uv.1),
    )
}

/// A small document: two materials and two segments under HEDR/MSH2/GEOM
pub fn sample_document() -> Document {
    let mut document = Document::new();
    let stone = document.add_material(Material {
        data: Some(MaterialData::default()),
        ..Material::new("stone")
    });
    let mut glass = Material::new("glass");
    glass.textures[0] = Some("glass.tga".to_string());
    let glass = document.add_material(glass);

    let mut quad = Segment::new();
    quad.set_material(stone);
    quad.has_uvs = true;
    quad.vertices = vec![
        vertex((0.0, 0.0, 0.0), (0.0, 0.0)),
        vertex((1.0, 0.0, 0.0), (1.0, 0.0)),
        vertex((1.0, 0.0, 1.0), (1.0, 1.0)),
        vertex((0.0, 0.0, 1.0), (0.0, 1.0)),
    ];
    quad.polygons = vec![Polygon::from(vec![0, 1, 2, 3])];

    let mut triangles = Segment::new();
    triangles.set_material(glass);
    triangles.vertices = vec![
        vertex((0.0, 1.0, 0.0), (0.0, 0.0)),
        vertex((1.0, 1.0, 0.0), (0.0, 0.0)),
        vertex((0.0, 1.0, 1.0), (0.0, 0.0)),
        vertex((1.0, 1.0, 1.0), (0.0, 0.0)),
    ];
    triangles.polygons = vec![Polygon::from(vec![0, 1, 2]), Polygon::from(vec![1, 3, 2])];

    document.records.push(Record::Container {
        tag: ChunkTag::HEDR,
        children: vec![Record::Container {
            tag: ChunkTag::MSH2,
            children: vec![
                Record::MaterialList,
                Record::Container {
                    tag: ChunkTag::GEOM,
                    children: vec![Record::Segment(quad), Record::Segment(triangles)],
                },
            ],
        }],
    });
    document
}
