//! Material list encoding

use super::segment::write_child;
use crate::chunk::{ChunkFrame, ChunkTag};
use crate::error::Result;
use crate::model::{Material, MaterialAttributes, MaterialData};

/// Encode the material list as a `MATL` chunk
pub fn write_material_list(materials: &[Material]) -> Result<ChunkFrame> {
    let mut frame = ChunkFrame::new(ChunkTag::MATL);
    frame.begin_write();
    frame.write_count(materials.len())?;
    for material in materials {
        let mut definition = write_material(material)?;
        frame.write_chunk(&mut definition)?;
    }
    Ok(frame)
}

/// Encode one material as a `MATD` chunk
///
/// `NAME` is always written; the other children only when present.
pub fn write_material(material: &Material) -> Result<ChunkFrame> {
    let mut frame = ChunkFrame::new(ChunkTag::MATD);
    frame.begin_write();
    frame.write_string(ChunkTag::NAME, &material.name)?;

    if let Some(data) = &material.data {
        write_child(&mut frame, ChunkTag::DATA, |chunk| {
            write_material_data(chunk, data);
            Ok(())
        })?;
    }

    if let Some(attributes) = &material.attributes {
        write_child(&mut frame, ChunkTag::ATRB, |chunk| {
            write_attributes(chunk, attributes);
            Ok(())
        })?;
    }

    for (tag, texture) in ChunkTag::TEXTURE_SLOTS.iter().zip(&material.textures) {
        if let Some(name) = texture {
            frame.write_string(*tag, name)?;
        }
    }

    for raw in &material.extra {
        let mut chunk = ChunkFrame::from_payload(raw.tag, raw.data.clone());
        frame.write_chunk(&mut chunk)?;
    }

    Ok(frame)
}

fn write_material_data(chunk: &mut ChunkFrame, data: &MaterialData) {
    chunk.write_color(data.diffuse);
    chunk.write_color(data.specular);
    chunk.write_color(data.ambient);
    chunk.write_f32(data.specular_decay);
}

fn write_attributes(chunk: &mut ChunkFrame, attributes: &MaterialAttributes) {
    chunk.write_u8(attributes.flags);
    chunk.write_u8(attributes.render_type);
    chunk.write_u8(attributes.data0);
    chunk.write_u8(attributes.data1);
}
