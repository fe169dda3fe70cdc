//! Geometric operations on segments using nalgebra
//!
//! This module provides:
//! - Axis-aligned bounds of a segment
//! - A `BBOX` record computed from segments
//! - Fan triangulation of polygons
//! - Face and vertex normal calculation

use crate::model::{BoundingBox, Polygon, Segment, Vector3, Vector4};
use nalgebra::{Point3, Vector3 as NVector3};

/// An axis-aligned box as (min corner, max corner)
pub type Aabb = (Vector3, Vector3);

fn to_point(v: Vector3) -> Point3<f32> {
    Point3::new(v.x, v.y, v.z)
}

fn from_vector(v: NVector3<f32>) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

/// Compute the axis-aligned bounds of a segment's vertices
///
/// Returns `None` for a segment without vertices.
pub fn compute_segment_aabb(segment: &Segment) -> Option<Aabb> {
    let mut points = segment.vertices.iter().map(|v| to_point(v.position));
    let first = points.next()?;
    let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
    Some((
        Vector3::new(min.x, min.y, min.z),
        Vector3::new(max.x, max.y, max.z),
    ))
}

/// Build a `BBOX` record enclosing every vertex of `segments`
///
/// The box is axis aligned: identity rotation, translation at the center,
/// half extents in the dimension's x, y, z and the enclosing sphere radius in
/// its w. Returns `None` when no segment has vertices.
///
/// # Example
/// ```
/// use libmsh::{Segment, Vector2, Vector3, Vertex, mesh_ops::compute_bounding_box};
///
/// let mut segment = Segment::new();
/// for x in [-1.0, 3.0] {
///     segment.vertices.push(Vertex::new(
///         Vector3::new(x, 0.0, 0.0),
///         Vector3::new(0.0, 1.0, 0.0),
///         Vector2::default(),
///     ));
/// }
///
/// let bbox = compute_bounding_box(&[&segment]).unwrap();
/// assert_eq!(bbox.translation.x, 1.0);
/// assert_eq!(bbox.dimension.x, 2.0);
/// ```
pub fn compute_bounding_box(segments: &[&Segment]) -> Option<BoundingBox> {
    let (min, max) = segments
        .iter()
        .filter_map(|s| compute_segment_aabb(s))
        .map(|(min, max)| (to_point(min), to_point(max)))
        .reduce(|(amin, amax), (bmin, bmax)| (amin.inf(&bmin), amax.sup(&bmax)))?;

    let center = nalgebra::center(&min, &max);
    let half = (max - min) * 0.5;

    Some(BoundingBox {
        rotation: Vector4::new(0.0, 0.0, 0.0, 1.0),
        translation: Vector3::new(center.x, center.y, center.z),
        dimension: Vector4::new(half.x, half.y, half.z, half.norm()),
    })
}

/// Split a polygon into a triangle fan around its first index
///
/// Polygons with fewer than three indices produce no triangles.
pub fn triangulate_polygon(polygon: &Polygon) -> Vec<[u16; 3]> {
    match polygon.indices.split_first() {
        Some((&apex, rest)) if rest.len() >= 2 => rest
            .windows(2)
            .map(|pair| [apex, pair[0], pair[1]])
            .collect(),
        _ => Vec::new(),
    }
}

/// Triangulate every polygon of a segment
pub fn triangulate_segment(segment: &Segment) -> Vec<[u16; 3]> {
    segment.polygons.iter().flat_map(triangulate_polygon).collect()
}

/// Unit normal of the triangle `a`, `b`, `c` (counter-clockwise)
///
/// Degenerate triangles give the zero vector.
pub fn calculate_face_normal(a: Vector3, b: Vector3, c: Vector3) -> Vector3 {
    let (a, b, c) = (to_point(a), to_point(b), to_point(c));
    let cross = (b - a).cross(&(c - a));
    from_vector(cross.try_normalize(0.0).unwrap_or_else(NVector3::zeros))
}

/// Area-weighted vertex normals of a segment
///
/// Triangles come from fan triangulation of the polygons. Triangles with an
/// index outside the vertex array, or with zero area, are skipped. Vertices
/// not touched by any triangle get the zero vector.
pub fn calculate_vertex_normals(segment: &Segment) -> Vec<Vector3> {
    let mut normals = vec![NVector3::<f32>::zeros(); segment.vertices.len()];

    for triangle in triangulate_segment(segment) {
        let [i0, i1, i2] = triangle.map(usize::from);
        let (Some(v0), Some(v1), Some(v2)) = (
            segment.vertices.get(i0),
            segment.vertices.get(i1),
            segment.vertices.get(i2),
        ) else {
            continue;
        };

        let (p0, p1, p2) = (to_point(v0.position), to_point(v1.position), to_point(v2.position));
        // Cross product length is twice the area, which is the weight we want
        let weighted = (p1 - p0).cross(&(p2 - p0));
        if weighted.norm_squared() > 0.0 {
            normals[i0] += weighted;
            normals[i1] += weighted;
            normals[i2] += weighted;
        }
    }

    normals
        .into_iter()
        .map(|n| from_vector(n.try_normalize(0.0).unwrap_or_else(NVector3::zeros)))
        .collect()
}

/// Replace every vertex normal with the computed area-weighted normal
pub fn recompute_normals(segment: &mut Segment) {
    let normals = calculate_vertex_normals(segment);
    for (vertex, normal) in segment.vertices.iter_mut().zip(normals) {
        vertex.normal = normal;
    }
}
