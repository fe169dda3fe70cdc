//! Whole-document checks

use super::{CheckIntegrity, CheckResult};
use crate::model::{Document, Record, Segment};

/// Per-kind record counters used for message prefixes
#[derive(Default)]
struct Counters {
    segments: usize,
    bounding_boxes: usize,
}

/// Segment checks that need the material list
fn check_segment(segment: &Segment, document: &Document) -> CheckResult {
    let mut result = segment.check_integrity();
    if let Some(handle) = segment.material {
        if document.material(handle).is_none() {
            result.add_error(format!(
                "material handle {} is not in the material list of {} material(s)",
                handle.index(),
                document.materials.len()
            ));
        }
    }
    result
}

fn check_record(record: &Record, document: &Document, counters: &mut Counters) -> CheckResult {
    match record {
        Record::Container { children, .. } => CheckResult::merge_all(
            children
                .iter()
                .map(|child| check_record(child, document, counters)),
        ),
        Record::Segment(segment) => {
            let prefix = format!("Segment {}", counters.segments);
            counters.segments += 1;
            check_segment(segment, document).with_prefix(&prefix)
        }
        Record::BoundingBox(bbox) => {
            let prefix = format!("Bounding box {}", counters.bounding_boxes);
            counters.bounding_boxes += 1;
            bbox.check_integrity().with_prefix(&prefix)
        }
        Record::MaterialList | Record::Raw(_) => CheckResult::new(),
    }
}

fn has_material_list(records: &[Record]) -> bool {
    records.iter().any(|record| match record {
        Record::MaterialList => true,
        Record::Container { children, .. } => has_material_list(children),
        _ => false,
    })
}

impl CheckIntegrity for Document {
    /// Check every material, then every record in tree order
    ///
    /// Messages are prefixed with the kind and position of the record,
    /// counted separately per kind, e.g. `Segment 2: ...`. Materials that no
    /// `MaterialList` record would write out produce a warning.
    fn check_integrity(&self) -> CheckResult {
        let mut list = CheckResult::new();
        if !self.materials.is_empty() && !has_material_list(&self.records) {
            list.add_warning(format!(
                "{} material(s) but no material list record; they will not be written",
                self.materials.len()
            ));
        }

        let materials = self
            .materials
            .iter()
            .enumerate()
            .map(|(i, material)| material.check_integrity().with_prefix(&format!("Material {}", i)));

        let mut counters = Counters::default();
        let records: Vec<CheckResult> = self
            .records
            .iter()
            .map(|record| check_record(record, self, &mut counters))
            .collect();

        CheckResult::merge_all(std::iter::once(list).chain(materials).chain(records))
    }
}
