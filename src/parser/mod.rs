//! Chunk tree parsing for MSH files
//!
//! Loading runs in two phases. The structural phase walks the chunk tree and
//! builds [`Record`]s, collecting every `MATL` into the document's material
//! list. The reference phase then binds each segment's raw material index to
//! that list via [`Document::apply_references`].

mod bbox;
mod material;
mod segment;

use crate::chunk::{ChunkFrame, ChunkTag, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::log::Severity;
use crate::model::*;

pub use bbox::parse_bounding_box;
pub use material::{parse_material, parse_material_list};
pub use segment::{StripDecoder, decode_strip, parse_segment};

/// Parse an MSH file held in memory with the default configuration
pub fn parse_document(bytes: &[u8]) -> Result<Document> {
    parse_document_with_config(bytes, &ParserConfig::default())
}

/// Parse an MSH file held in memory
///
/// The buffer holds one or more root chunks back to back. Bytes after the
/// last root chunk that are too short for a header are an error.
pub fn parse_document_with_config(bytes: &[u8], config: &ParserConfig) -> Result<Document> {
    let mut builder = DocumentBuilder::new(config);
    let mut offset = 0;

    while offset < bytes.len() {
        let frame = ChunkFrame::from_slice(bytes, offset).inspect_err(|e| report(config, e))?;
        offset += HEADER_SIZE + frame.payload_len()?;
        builder.push_frame(frame)?;
    }

    Ok(builder.finish())
}

/// Parse a sequence of root chunks, e.g. from a [`ChunkReader`](crate::streaming::ChunkReader)
pub fn parse_frames<I>(frames: I, config: &ParserConfig) -> Result<Document>
where
    I: IntoIterator<Item = Result<ChunkFrame>>,
{
    let mut builder = DocumentBuilder::new(config);
    for frame in frames {
        builder.push_frame(frame.inspect_err(|e| report(config, e))?)?;
    }
    Ok(builder.finish())
}

fn report(config: &ParserConfig, error: &Error) {
    config.log(&error.to_string(), Severity::Error);
}

/// Accumulates root records and materials during the structural phase
struct DocumentBuilder<'c> {
    config: &'c ParserConfig,
    document: Document,
    has_material_list: bool,
}

impl<'c> DocumentBuilder<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            document: Document::new(),
            has_material_list: false,
        }
    }

    fn push_frame(&mut self, mut frame: ChunkFrame) -> Result<()> {
        let record = self
            .parse_record(&mut frame, 0)
            .inspect_err(|e| report(self.config, e))?;
        if let Some(record) = record {
            self.document.records.push(record);
        }
        Ok(())
    }

    /// Reference phase: bind material indices and hand out the document
    fn finish(mut self) -> Document {
        self.document.apply_references();
        self.config.log(
            &format!(
                "Loaded {} root chunk(s), {} material(s), {} segment(s)",
                self.document.records.len(),
                self.document.materials.len(),
                self.document.segments().len()
            ),
            Severity::Info,
        );
        self.document
    }

    fn parse_record(&mut self, frame: &mut ChunkFrame, depth: usize) -> Result<Option<Record>> {
        let tag = frame.tag();
        self.config.log(
            &format!(
                "Valid chunk {} found with {} byte(s)",
                tag,
                frame.payload_len()?
            ),
            Severity::Info,
        );

        if depth > self.config.max_depth() {
            return Err(Error::InvalidChunk(format!(
                "chunk '{}' is nested {} levels deep; the limit is {}",
                tag,
                depth,
                self.config.max_depth()
            )));
        }

        let record = match tag {
            tag if self.config.is_container(tag) => {
                let mut children = Vec::new();
                while !frame.is_exhausted()? {
                    let mut child = frame.read_chunk()?;
                    if let Some(record) = self.parse_record(&mut child, depth + 1)? {
                        children.push(record);
                    }
                }
                Record::Container { tag, children }
            }
            ChunkTag::MATL => {
                let materials = parse_material_list(frame, self.config.log_sink())?;
                self.document.materials.extend(materials);
                if self.has_material_list {
                    self.config.log(
                        "Additional material list appended to the first one",
                        Severity::Warning,
                    );
                    return Ok(None);
                }
                self.has_material_list = true;
                Record::MaterialList
            }
            ChunkTag::SEGM => Record::Segment(parse_segment(frame, self.config.log_sink())?),
            ChunkTag::BBOX => Record::BoundingBox(parse_bounding_box(frame)?),
            _ => Record::Raw(RawChunk::new(tag, frame.payload()?.to_vec())),
        };

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NullSink;
    use std::sync::Arc;

    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = tag.to_vec();
        bytes.extend_from_slice(&(payload.len() as i32).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    fn quiet() -> ParserConfig {
        ParserConfig::new().with_log_sink(Arc::new(NullSink))
    }

    #[test]
    fn test_parse_empty_buffer() {
        let doc = parse_document_with_config(&[], &quiet()).unwrap();
        assert!(doc.records.is_empty());
    }

    #[test]
    fn test_parse_raw_root_chunk() {
        let bytes = chunk(b"ABCD", &[1, 2, 3]);
        let doc = parse_document_with_config(&bytes, &quiet()).unwrap();
        assert_eq!(
            doc.records,
            vec![Record::Raw(RawChunk::new("ABCD".parse().unwrap(), vec![1, 2, 3]))]
        );
    }

    #[test]
    fn test_parse_nested_containers() {
        let geom = chunk(b"GEOM", &chunk(b"SEGM", &[]));
        let modl = chunk(b"MODL", &geom);
        let bytes = chunk(b"HEDR", &modl);

        let doc = parse_document_with_config(&bytes, &quiet()).unwrap();
        assert_eq!(doc.segments().len(), 1);
        match &doc.records[0] {
            Record::Container { tag, children } => {
                assert_eq!(*tag, ChunkTag::HEDR);
                assert_eq!(children[0].tag(), ChunkTag::MODL);
            }
            other => panic!("expected container, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_limit() {
        let bytes = chunk(b"HEDR", &chunk(b"MSH2", &chunk(b"SINF", &[])));
        let config = quiet().with_max_depth(1);
        assert!(matches!(
            parse_document_with_config(&bytes, &config),
            Err(Error::InvalidChunk(_))
        ));

        let config = quiet().with_max_depth(2);
        assert!(parse_document_with_config(&bytes, &config).is_ok());
    }

    #[test]
    fn test_trailing_partial_header() {
        let mut bytes = chunk(b"HEDR", &[]);
        bytes.extend_from_slice(b"SEG");
        assert!(matches!(
            parse_document_with_config(&bytes, &quiet()),
            Err(Error::UnexpectedEndOfData(_))
        ));
    }

    #[test]
    fn test_second_material_list_is_merged() {
        let empty_list = chunk(b"MATL", &0i32.to_le_bytes());
        let mut payload = empty_list.clone();
        payload.extend(empty_list);
        let bytes = chunk(b"HEDR", &payload);

        let doc = parse_document_with_config(&bytes, &quiet()).unwrap();
        match &doc.records[0] {
            Record::Container { children, .. } => {
                assert_eq!(children, &vec![Record::MaterialList]);
            }
            other => panic!("expected container, got {:?}", other),
        }
    }

    #[test]
    fn test_container_tag_can_be_disabled() {
        let bytes = chunk(b"HEDR", &chunk(b"SEGM", &[]));
        let config = quiet().without_container_tag(ChunkTag::HEDR);
        let doc = parse_document_with_config(&bytes, &config).unwrap();
        assert!(matches!(doc.records[0], Record::Raw(_)));
        assert!(doc.segments().is_empty());
    }
}
