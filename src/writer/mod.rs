//! Chunk tree writing for MSH files
//!
//! Every record is rebuilt from the model; nothing is copied from the bytes a
//! document was loaded from. Raw records are the exception, their payload is
//! written back verbatim.

mod bbox;
mod material;
mod segment;

use crate::chunk::ChunkFrame;
use crate::error::Result;
use crate::model::{Document, Record};
use std::io::Write;

pub use bbox::write_bounding_box;
pub use material::{write_material, write_material_list};
pub use segment::{encode_strip, write_segment};

/// Serialize a document to bytes
pub fn write_document(document: &Document) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for record in &document.records {
        bytes.extend(write_record(record, document)?.into_bytes()?);
    }
    Ok(bytes)
}

/// Serialize a document into `writer`
pub fn write_document_to<W: Write>(document: &Document, mut writer: W) -> Result<()> {
    for record in &document.records {
        writer.write_all(&write_record(record, document)?.into_bytes()?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode one record and its children
///
/// The returned frame has not been finished; splicing it into a parent or
/// calling [`ChunkFrame::into_bytes`] patches its length.
pub fn write_record(record: &Record, document: &Document) -> Result<ChunkFrame> {
    match record {
        Record::Container { tag, children } => {
            let mut frame = ChunkFrame::new(*tag);
            frame.begin_write();
            for child in children {
                let mut encoded = write_record(child, document)?;
                frame.write_chunk(&mut encoded)?;
            }
            Ok(frame)
        }
        Record::MaterialList => write_material_list(&document.materials),
        Record::Segment(segment) => write_segment(segment, document),
        Record::BoundingBox(bbox) => Ok(write_bounding_box(bbox)),
        Record::Raw(raw) => {
            let mut frame = ChunkFrame::new(raw.tag);
            frame.begin_write();
            frame.write_bytes(&raw.data);
            Ok(frame)
        }
    }
}
