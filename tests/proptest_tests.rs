//! Property-based tests for libmsh
//!
//! These tests use proptest to generate random chunks, strips and segments
//! and verify invariants hold across a wide range of inputs.

mod common;

use common::quiet_config;
use libmsh::parser::{decode_strip, parse_segment};
use libmsh::writer::{encode_strip, write_segment};
use libmsh::{
    ChunkFrame, ChunkTag, Document, Material, NullSink, Polygon, Segment, Vector2, Vector3, Vertex,
    VertexIndex,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// Generate a tag matching the chunk name pattern
fn tag_strategy() -> impl Strategy<Value = ChunkTag> {
    "[A-Z][A-Z0-9]{3}".prop_map(|s| s.parse().unwrap())
}

fn finite() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn vertex_strategy() -> impl Strategy<Value = Vertex> {
    (
        (finite(), finite(), finite()),
        (finite(), finite(), finite()),
        (finite(), finite()),
    )
        .prop_map(|(p, n, uv)| {
            Vertex::new(
                Vector3::new(p.0, p.1, p.2),
                Vector3::new(n.0, n.1, n.2),
                Vector2::new(uv.0, uv.1),
            )
        })
}

/// Generate a segment whose polygons all have at least three indices
fn segment_strategy() -> impl Strategy<Value = Segment> {
    (prop::collection::vec(vertex_strategy(), 1..40), any::<bool>()).prop_flat_map(
        |(vertices, has_uvs)| {
            let count = vertices.len() as u16;
            let polygon = prop::collection::vec(0..count, 3..8).prop_map(Polygon::from);
            prop::collection::vec(polygon, 0..10).prop_map(move |polygons| {
                let mut segment = Segment::new();
                segment.vertices = vertices.clone();
                if !has_uvs {
                    for vertex in &mut segment.vertices {
                        vertex.uv = Vector2::default();
                    }
                }
                segment.has_uvs = has_uvs;
                segment.polygons = polygons;
                segment
            })
        },
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_frame_round_trip(tag in tag_strategy(), payload in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut frame = ChunkFrame::new(tag);
        frame.begin_write();
        frame.write_bytes(&payload);
        let bytes = frame.into_bytes().unwrap();

        prop_assert_eq!(bytes.len(), payload.len() + 8);
        let parsed = ChunkFrame::from_slice(&bytes, 0).unwrap();
        prop_assert_eq!(parsed.tag(), tag);
        prop_assert_eq!(parsed.payload().unwrap(), payload.as_slice());
    }

    #[test]
    fn prop_strip_decoding_keeps_every_index(raw in prop::collection::vec(any::<i16>(), 0..200)) {
        let entries: Vec<VertexIndex> = raw.iter().map(|&r| VertexIndex::from_raw(r)).collect();
        let polygons = decode_strip(entries.clone());

        let flattened: Vec<u16> = polygons.iter().flat_map(|p| p.indices.iter().copied()).collect();
        let expected: Vec<u16> = entries.iter().map(|e| e.index).collect();
        prop_assert_eq!(flattened, expected);
        prop_assert!(polygons.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn prop_strip_round_trip_for_real_polygons(
        polygons in prop::collection::vec(prop::collection::vec(0u16..0x8000, 3..10), 0..20)
    ) {
        let polygons: Vec<Polygon> = polygons.into_iter().map(Polygon::from).collect();
        prop_assert_eq!(decode_strip(encode_strip(&polygons)), polygons);
    }

    #[test]
    fn prop_segment_round_trip(segment in segment_strategy()) {
        let mut document = Document::new();
        let handle = document.add_material(Material::new("m"));
        let mut segment = segment;
        segment.set_material(handle);

        let bytes = write_segment(&segment, &document).unwrap().into_bytes().unwrap();
        let mut frame = ChunkFrame::from_slice(&bytes, 0).unwrap();
        let mut decoded = parse_segment(&mut frame, &NullSink).unwrap();
        decoded.apply_references(&document.materials);

        prop_assert_eq!(decoded, segment);
    }

    #[test]
    fn prop_parse_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Document::from_bytes_with_config(&bytes, &quiet_config());
    }
}
