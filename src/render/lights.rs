use serde::{Deserialize, Serialize};
use crate::math::Vec3;
use crate::model::material::hex_to_rgb;

/// Ambient fill plus one directional key light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingParams {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    /// The directional light shines from here toward the origin
    pub directional_position: Vec3,
    pub background: u32,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_intensity: 1.0,
            directional_color: 0xffffff,
            directional_intensity: 1.0,
            directional_position: Vec3::new(1.0, 1.0, 1.0),
            background: 0x000000,
        }
    }
}

impl LightingParams {
    pub fn ambient(&self) -> Vec3 {
        hex_to_rgb(self.ambient_color).scale(self.ambient_intensity)
    }

    pub fn directional(&self) -> Vec3 {
        hex_to_rgb(self.directional_color).scale(self.directional_intensity)
    }

    /// Unit vector from the surface toward the light
    pub fn to_light(&self) -> Vec3 {
        self.directional_position.normalize()
    }

    pub fn background_rgb(&self) -> Vec3 {
        hex_to_rgb(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_white_and_unit() {
        let lights = LightingParams::default();
        assert_eq!(lights.ambient(), Vec3::ONE);
        assert_eq!(lights.directional(), Vec3::ONE);
        assert_eq!(lights.background_rgb(), Vec3::ZERO);
    }

    #[test]
    fn test_light_direction_is_normalized() {
        let d = LightingParams::default().to_light();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x - d.y).abs() < 1e-6 && (d.y - d.z).abs() < 1e-6);
    }

    #[test]
    fn test_intensity_scales_colour() {
        let lights = LightingParams {
            ambient_intensity: 0.5,
            ..Default::default()
        };
        assert!((lights.ambient().x - 0.5).abs() < 1e-6);
    }
}
