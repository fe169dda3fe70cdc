//! Tests for the geometric helpers in `mesh_ops`

#![cfg(feature = "mesh-ops")]

mod common;

use common::sample_document;
use libmsh::mesh_ops::{
    calculate_vertex_normals, compute_bounding_box, compute_segment_aabb, recompute_normals,
    triangulate_segment,
};
use libmsh::{BoundingBox, Record, Vector3};

#[test]
fn test_bounding_box_of_sample() {
    let document = sample_document();
    let bbox = compute_bounding_box(&document.segments()).unwrap();

    assert_eq!(bbox.translation, Vector3::new(0.5, 0.5, 0.5));
    assert_eq!(bbox.dimension.x, 0.5);
    assert_eq!(bbox.dimension.y, 0.5);
    assert_eq!(bbox.dimension.z, 0.5);
    assert!((bbox.dimension.w - 0.75f32.sqrt()).abs() < 1e-6);
}

#[test]
fn test_computed_box_can_be_stored() {
    let mut document = sample_document();
    let bbox: BoundingBox = compute_bounding_box(&document.segments()).unwrap();
    document.records.push(Record::BoundingBox(bbox));

    let bytes = document.to_bytes().unwrap();
    let parsed = libmsh::Document::from_bytes_with_config(&bytes, &common::quiet_config()).unwrap();
    assert_eq!(parsed.records.last(), Some(&Record::BoundingBox(bbox)));
}

#[test]
fn test_segment_aabb() {
    let document = sample_document();
    let (min, max) = compute_segment_aabb(document.segments()[1]).unwrap();
    assert_eq!(min, Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(max, Vector3::new(1.0, 1.0, 1.0));
}

#[test]
fn test_triangulate_sample() {
    let document = sample_document();
    let segments = document.segments();
    assert_eq!(triangulate_segment(segments[0]), vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(triangulate_segment(segments[1]).len(), 2);
}

#[test]
fn test_recomputed_normals_are_unit_length() {
    let document = sample_document();
    let mut segment = document.segments()[0].clone();
    recompute_normals(&mut segment);

    for vertex in &segment.vertices {
        let length = vertex.normal.length_squared().sqrt();
        assert!((length - 1.0).abs() < 1e-6);
        // Quad lies in the XZ plane
        assert!(vertex.normal.x.abs() < 1e-6);
        assert!(vertex.normal.z.abs() < 1e-6);
    }
    assert_eq!(calculate_vertex_normals(&segment).len(), 4);
}
