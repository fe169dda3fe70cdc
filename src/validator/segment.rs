//! Segment and vertex checks

use super::{CheckIntegrity, CheckResult};
use crate::error::{Error, Result};
use crate::model::{Segment, Vertex, VertexIndex};

/// Check one vertex
///
/// # Errors
///
/// [`Error::InvalidVertex`] if any position, normal or UV component is NaN or
/// infinite. Softer problems come back as warnings.
pub fn validate_vertex(vertex: &Vertex) -> Result<CheckResult> {
    if !vertex.position.is_finite() {
        return Err(Error::InvalidVertex(format!(
            "position {:?} is not finite",
            vertex.position
        )));
    }
    if !vertex.normal.is_finite() {
        return Err(Error::InvalidVertex(format!(
            "normal {:?} is not finite",
            vertex.normal
        )));
    }
    if !vertex.uv.is_finite() {
        return Err(Error::InvalidVertex(format!(
            "uv {:?} is not finite",
            vertex.uv
        )));
    }

    let mut result = CheckResult::new();
    if vertex.normal.length_squared() == 0.0 {
        result.add_warning("normal has zero length");
    }
    Ok(result)
}

impl CheckIntegrity for Segment {
    fn check_integrity(&self) -> CheckResult {
        let mut result = CheckResult::new();

        if self.material.is_none() {
            result.add_error(format!(
                "no material assigned (material index {})",
                self.material_index
            ));
        }

        for (i, vertex) in self.vertices.iter().enumerate() {
            let prefix = format!("Vertex {}", i);
            let checked = match validate_vertex(vertex) {
                Ok(found) => found,
                Err(e) => {
                    let mut failed = CheckResult::new();
                    failed.add_error(e.to_string());
                    failed
                }
            };
            result = result.merge(checked.with_prefix(&prefix));
        }

        for (i, polygon) in self.polygons.iter().enumerate() {
            if polygon.len() < 3 {
                result.add_warning(format!(
                    "Polygon {}: has {} index(es), fewer than a triangle",
                    i,
                    polygon.len()
                ));
            }
            for &index in &polygon.indices {
                if index > VertexIndex::MAX_INDEX {
                    result.add_error(format!(
                        "Polygon {}: index {} does not fit in 15 bits",
                        i, index
                    ));
                } else if usize::from(index) >= self.vertices.len() {
                    result.add_error(format!(
                        "Polygon {}: index {} is out of range for {} vertices",
                        i,
                        index,
                        self.vertices.len()
                    ));
                }
            }
        }

        result
    }
}
