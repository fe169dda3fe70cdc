//! Material types

use super::core::Color;
use super::document::RawChunk;

/// Handle to a material in a document's material list
///
/// A plain index into [`Document::materials`](crate::Document::materials).
/// It does not own or borrow the material; look it up with
/// [`Document::material`](crate::Document::material).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(usize);

impl MaterialHandle {
    /// Create a handle for the material at `index`
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the material list
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Lighting data of a material (`DATA` chunk)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialData {
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Ambient color
    pub ambient: Color,
    /// Specular exponent
    pub specular_decay: f32,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            diffuse: Color::new(1.0, 1.0, 1.0, 1.0),
            specular: Color::new(1.0, 1.0, 1.0, 1.0),
            ambient: Color::new(0.0, 0.0, 0.0, 1.0),
            specular_decay: 50.0,
        }
    }
}

/// Render attributes of a material (`ATRB` chunk, four bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialAttributes {
    /// Bit flags (emissive, glow, transparency, specular, ...)
    pub flags: u8,
    /// Render type selector
    pub render_type: u8,
    /// First render type parameter
    pub data0: u8,
    /// Second render type parameter
    pub data1: u8,
}

/// A material definition (`MATD` chunk)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Lighting data, if the definition had a `DATA` chunk
    pub data: Option<MaterialData>,
    /// Render attributes, if the definition had an `ATRB` chunk
    pub attributes: Option<MaterialAttributes>,
    /// Texture names for slots `TX0D`..`TX3D`
    pub textures: [Option<String>; 4],
    /// Unrecognized child chunks, kept in order
    pub extra: Vec<RawChunk>,
}

impl Material {
    /// Create a material with a name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
