//! Material list parsing

use crate::chunk::{ChunkFrame, ChunkTag};
use crate::error::{Error, Result};
use crate::log::{LogSink, Severity};
use crate::model::{Material, MaterialAttributes, MaterialData, RawChunk};

/// Parse a `MATL` chunk: an `i32` count followed by that many `MATD` chunks
///
/// Bytes left over after the declared definitions are skipped with a warning.
pub fn parse_material_list(frame: &mut ChunkFrame, log: &dyn LogSink) -> Result<Vec<Material>> {
    let count = frame.read_count()?;
    let mut materials = Vec::with_capacity(count.min(frame.remaining()?));

    for i in 0..count {
        let mut child = frame.read_chunk()?;
        if child.tag() != ChunkTag::MATD {
            return Err(Error::InvalidChunk(format!(
                "material list entry {} is '{}', expected 'MATD'",
                i,
                child.tag()
            )));
        }
        materials.push(parse_material(&mut child, log)?);
    }

    if !frame.is_exhausted()? {
        log.log(
            &format!(
                "Material list has {} byte(s) after its {} declared material(s)",
                frame.remaining()?,
                count
            ),
            Severity::Warning,
        );
    }

    Ok(materials)
}

/// Parse a single `MATD` chunk
pub fn parse_material(frame: &mut ChunkFrame, log: &dyn LogSink) -> Result<Material> {
    let mut material = Material::default();

    while !frame.is_exhausted()? {
        let mut child = frame.read_chunk()?;
        let tag = child.tag();
        match tag {
            ChunkTag::NAME => material.name = child.read_remaining_string()?,
            ChunkTag::DATA => material.data = Some(parse_material_data(&mut child)?),
            ChunkTag::ATRB => material.attributes = Some(parse_attributes(&mut child)?),
            _ => {
                if let Some(slot) = ChunkTag::TEXTURE_SLOTS.iter().position(|t| *t == tag) {
                    material.textures[slot] = Some(child.read_remaining_string()?);
                } else {
                    log.log(
                        &format!("Keeping unknown material chunk {} as raw data", tag),
                        Severity::Info,
                    );
                    material.extra.push(RawChunk::new(tag, child.payload()?.to_vec()));
                }
            }
        }
    }

    Ok(material)
}

fn parse_material_data(chunk: &mut ChunkFrame) -> Result<MaterialData> {
    Ok(MaterialData {
        diffuse: chunk.read_color()?,
        specular: chunk.read_color()?,
        ambient: chunk.read_color()?,
        specular_decay: chunk.read_f32()?,
    })
}

fn parse_attributes(chunk: &mut ChunkFrame) -> Result<MaterialAttributes> {
    Ok(MaterialAttributes {
        flags: chunk.read_u8()?,
        render_type: chunk.read_u8()?,
        data0: chunk.read_u8()?,
        data1: chunk.read_u8()?,
    })
}
