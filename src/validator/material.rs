//! Material and bounding box checks

use super::{CheckIntegrity, CheckResult};
use crate::model::{BoundingBox, Material};

impl CheckIntegrity for Material {
    fn check_integrity(&self) -> CheckResult {
        let mut result = CheckResult::new();
        if self.name.is_empty() {
            result.add_warning("material has no name");
        }
        result
    }
}

impl CheckIntegrity for BoundingBox {
    fn check_integrity(&self) -> CheckResult {
        let mut result = CheckResult::new();
        if !self.rotation.is_finite() {
            result.add_error("bounding box rotation is not finite");
        }
        if !self.translation.is_finite() {
            result.add_error("bounding box translation is not finite");
        }
        if !self.dimension.is_finite() {
            result.add_error("bounding box dimension is not finite");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vector3;

    #[test]
    fn test_unnamed_material_warns() {
        let result = Material::default().check_integrity();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert!(Material::new("stone").check_integrity().is_empty());
    }

    #[test]
    fn test_bbox_nan() {
        let bbox = BoundingBox {
            translation: Vector3::new(0.0, f32::NAN, 0.0),
            ..Default::default()
        };
        assert_eq!(bbox.check_integrity().errors().len(), 1);
        assert!(BoundingBox::default().check_integrity().is_valid());
    }
}
