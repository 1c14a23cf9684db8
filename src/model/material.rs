use serde::{Deserialize, Serialize};
use crate::math::Vec3;

/// Physically based surface description consumed by the mesh shader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base colour as 0xRRGGBB
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    /// Strength of the glossy lacquer layer (0.0 to 1.0)
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            metalness: 0.0,
            roughness: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
        }
    }
}

impl Material {
    /// Glossy light pink
    pub fn petal() -> Self {
        Self {
            color: 0xffc0cb,
            metalness: 0.2,
            roughness: 0.05,
            clearcoat: 1.0,
            clearcoat_roughness: 0.1,
        }
    }

    /// Satin light green, shared by stem and leaves
    pub fn stem() -> Self {
        Self {
            color: 0x90ee90,
            roughness: 0.5,
            ..Self::default()
        }
    }

    /// Base colour as linear-ish RGB in [0, 1]
    pub fn rgb(&self) -> Vec3 {
        hex_to_rgb(self.color)
    }
}

/// Material fields named in a config document. Unnamed fields keep the base material's value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct MaterialOverrides {
    pub color: Option<u32>,
    pub metalness: Option<f32>,
    pub roughness: Option<f32>,
    pub clearcoat: Option<f32>,
    pub clearcoat_roughness: Option<f32>,
}

impl MaterialOverrides {
    pub fn apply(self, base: Material) -> Material {
        Material {
            color: self.color.unwrap_or(base.color),
            metalness: self.metalness.unwrap_or(base.metalness),
            roughness: self.roughness.unwrap_or(base.roughness),
            clearcoat: self.clearcoat.unwrap_or(base.clearcoat),
            clearcoat_roughness: self.clearcoat_roughness.unwrap_or(base.clearcoat_roughness),
        }
    }
}

pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}
