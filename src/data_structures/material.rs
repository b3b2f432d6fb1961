//! How a part is shaded.
//!
//! Textured materials name a [`TextureSlot`] rather than a concrete image:
//! caps and car walls depend on the texture set that is active when the
//! frame is composed.

/// A texture role in the scene, resolved against the active texture set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Ground,
    Cap,
    Wheel(usize),
    Wall(usize),
    Car(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Point light diffuse shading of a solid colour.
    Colour([f32; 4]),
    /// Point light diffuse shading of a texture.
    Textured(TextureSlot),
    /// Unlit texture multiplied by a colour, alpha included.
    Modulated(TextureSlot, [f32; 4]),
    /// Unlit solid colour.
    Flat([f32; 4]),
}

impl Material {
    pub fn texture(&self) -> Option<TextureSlot> {
        match self {
            Material::Textured(slot) | Material::Modulated(slot, _) => Some(*slot),
            Material::Colour(_) | Material::Flat(_) => None,
        }
    }

    /// The colour handed to the shader alongside the texture, if any.
    pub fn colour(&self) -> [f32; 4] {
        match self {
            Material::Colour(c) | Material::Modulated(_, c) | Material::Flat(c) => *c,
            Material::Textured(_) => [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Shader branch selector, mirrored in `scene.wgsl`.
    pub fn mode(&self) -> u32 {
        match self {
            Material::Colour(_) => 0,
            Material::Textured(_) => 1,
            Material::Modulated(..) => 2,
            Material::Flat(_) => 3,
        }
    }
}
