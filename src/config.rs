//! Scene configuration loaded from YAML. Every section is optional.

use serde::{Deserialize, Serialize};
use crate::animation::SwingParams;
use crate::math::Vec3;
use crate::mesh::ExtrudeSettings;
use crate::model::{Material, TulipParams};
use crate::render::{CameraParams, LightingParams};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tulip: TulipParams,
    pub swing: SwingParams,
    pub camera: CameraParams,
    pub lighting: LightingParams,
    /// Upper bound on the device pixel ratio used for the drawing buffer
    pub max_pixel_ratio: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tulip: TulipParams::default(),
            swing: SwingParams::default(),
            camera: CameraParams::default(),
            lighting: LightingParams::default(),
            max_pixel_ratio: 2.0,
        }
    }
}

impl SceneConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        // An empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SceneConfig = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let tulip = &self.tulip;
        validate_extrude("petal_extrude", &tulip.petal_extrude)?;
        validate_extrude("leaf_extrude", &tulip.leaf_extrude)?;
        validate_material("petal_material", &tulip.petal_material)?;
        validate_material("stem_material", &tulip.stem_material)?;
        finite_vec3("tulip.stem_position", tulip.stem_position)?;
        finite_vec3("tulip.leaf_position", tulip.leaf_position)?;
        if !tulip.leaf_tilt.is_finite() {
            return Err(format!("tulip.leaf_tilt must be finite, got {}", tulip.leaf_tilt));
        }

        let stem = &tulip.stem;
        if !(3..=MAX_RADIAL_SEGMENTS).contains(&stem.radial_segments) {
            return Err(format!(
                "stem.radial_segments must be in 3..={}, got {}",
                MAX_RADIAL_SEGMENTS, stem.radial_segments
            ));
        }
        if !(stem.height > 0.0 && stem.height.is_finite()) {
            return Err(format!("stem.height must be positive, got {}", stem.height));
        }
        if !(non_negative(stem.radius_top) && non_negative(stem.radius_bottom)) {
            return Err("stem radii must be finite and not negative".to_string());
        }

        let swing = &self.swing;
        if !swing.sensitivity.is_finite() {
            return Err(format!("swing.sensitivity must be finite, got {}", swing.sensitivity));
        }
        if !non_negative(swing.max_swing_angle) {
            return Err(format!(
                "swing.max_swing_angle must be finite and not negative, got {}",
                swing.max_swing_angle
            ));
        }
        if !(swing.swing_speed > 0.0 && swing.swing_speed <= 1.0) {
            return Err(format!("swing.swing_speed must be in (0, 1], got {}", swing.swing_speed));
        }

        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(format!("camera.fov must be in (0, 180) degrees, got {}", camera.fov));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(format!(
                "camera planes must satisfy 0 < near < far, got near {} far {}",
                camera.near, camera.far
            ));
        }
        finite_vec3("camera.position", camera.position)?;
        finite_vec3("camera.target", camera.target)?;
        if camera.position.distance(&camera.target) < 1e-6 {
            return Err("camera.position and camera.target must differ".to_string());
        }

        let lighting = &self.lighting;
        if !(non_negative(lighting.ambient_intensity) && non_negative(lighting.directional_intensity)) {
            return Err("light intensities must be finite and not negative".to_string());
        }
        finite_vec3("lighting.directional_position", lighting.directional_position)?;
        if lighting.directional_position.length() < 1e-6 {
            return Err("lighting.directional_position must not be the origin".to_string());
        }

        if !(self.max_pixel_ratio >= 1.0 && self.max_pixel_ratio.is_finite()) {
            return Err(format!("max_pixel_ratio must be at least 1, got {}", self.max_pixel_ratio));
        }

        Ok(())
    }
}

const MAX_CURVE_SEGMENTS: usize = 128;
const MAX_STEPS: usize = 64;
const MAX_BEVEL_SEGMENTS: usize = 32;
const MAX_RADIAL_SEGMENTS: usize = 256;

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn finite_vec3(name: &str, v: Vec3) -> Result<(), String> {
    if v.x.is_finite() && v.y.is_finite() && v.z.is_finite() {
        Ok(())
    } else {
        Err(format!("{} must be finite, got {:?}", name, v))
    }
}

fn validate_extrude(name: &str, settings: &ExtrudeSettings) -> Result<(), String> {
    if !(settings.depth > 0.0 && settings.depth.is_finite()) {
        return Err(format!("{}.depth must be positive, got {}", name, settings.depth));
    }
    if !(1..=MAX_CURVE_SEGMENTS).contains(&settings.curve_segments) {
        return Err(format!(
            "{}.curve_segments must be in 1..={}, got {}",
            name, MAX_CURVE_SEGMENTS, settings.curve_segments
        ));
    }
    if !(1..=MAX_STEPS).contains(&settings.steps) {
        return Err(format!("{}.steps must be in 1..={}, got {}", name, MAX_STEPS, settings.steps));
    }
    if !(non_negative(settings.bevel_thickness) && non_negative(settings.bevel_size)) {
        return Err(format!("{} bevel sizes must be finite and not negative", name));
    }
    if settings.bevel_enabled && !(1..=MAX_BEVEL_SEGMENTS).contains(&settings.bevel_segments) {
        return Err(format!(
            "{}.bevel_segments must be in 1..={} when bevel is enabled, got {}",
            name, MAX_BEVEL_SEGMENTS, settings.bevel_segments
        ));
    }
    Ok(())
}

fn validate_material(name: &str, material: &Material) -> Result<(), String> {
    let unit = |v: f32| (0.0..=1.0).contains(&v);
    if material.color > 0xffffff {
        return Err(format!("{}.color must be 0xRRGGBB, got {:#x}", name, material.color));
    }
    if !(unit(material.metalness)
        && unit(material.roughness)
        && unit(material.clearcoat)
        && unit(material.clearcoat_roughness))
    {
        return Err(format!("{} factors must be in [0, 1]", name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        assert_eq!(SceneConfig::from_yaml("").unwrap(), SceneConfig::default());
        assert_eq!(SceneConfig::from_yaml("{}").unwrap(), SceneConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let yaml = r#"
swing:
  sensitivity: 0.3
camera:
  fov: 60
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.swing.sensitivity, 0.3);
        assert_eq!(config.swing.max_swing_angle, 0.2);
        assert_eq!(config.swing.swing_speed, 0.005);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.far, 100.0);
        assert_eq!(config.tulip, TulipParams::default());
    }

    #[test]
    fn test_nested_tulip_overrides() {
        let yaml = r#"
tulip:
  petal_material:
    color: 0xff0000
  stem:
    radial_segments: 8
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tulip.petal_material.color, 0xff0000);
        assert_eq!(config.tulip.petal_material.clearcoat, 1.0);
        assert_eq!(config.tulip.petal_material.metalness, 0.2);
        assert_eq!(config.tulip.petal_material.roughness, 0.05);
        assert_eq!(config.tulip.stem.radial_segments, 8);
        assert_eq!(config.tulip.stem.height, 4.0);
    }

    #[test]
    fn test_partial_sections_keep_part_defaults() {
        let yaml = r#"
tulip:
  leaf_extrude:
    depth: 0.2
  petal_extrude:
    curve_segments: 6
  stem_material:
    color: 0x00ff00
"#;
        let tulip = SceneConfig::from_yaml(yaml).unwrap().tulip;

        assert_eq!(tulip.leaf_extrude.depth, 0.2);
        assert_eq!(tulip.leaf_extrude.bevel_size, 0.05);
        assert_eq!(tulip.leaf_extrude.bevel_thickness, 0.05);
        assert_eq!(tulip.leaf_extrude.bevel_segments, 3);

        assert_eq!(tulip.petal_extrude.curve_segments, 6);
        assert_eq!(tulip.petal_extrude.bevel_segments, 5);
        assert_eq!(tulip.petal_extrude.bevel_size, 0.1);

        assert_eq!(tulip.stem_material.color, 0x00ff00);
        assert_eq!(tulip.stem_material.roughness, 0.5);
        assert_eq!(tulip.petal_material, Material::petal());
    }

    #[test]
    fn test_invalid_values_rejected() {
        for yaml in [
            "tulip:\n  petal_extrude:\n    depth: 0",
            "tulip:\n  leaf_extrude:\n    bevel_size: -0.1",
            "tulip:\n  petal_extrude:\n    bevel_segments: 0",
            "tulip:\n  stem:\n    radial_segments: 2",
            "tulip:\n  leaf_tilt: .nan",
            "tulip:\n  stem_position: {x: .inf, y: 0, z: 0}",
            "tulip:\n  leaf_position: {x: 0, y: .nan, z: 0.2}",
            "tulip:\n  petal_material:\n    roughness: 2",
            "tulip:\n  stem_material:\n    color: 0x1000000",
            "swing:\n  swing_speed: 0",
            "swing:\n  swing_speed: 1.5",
            "swing:\n  max_swing_angle: -0.2",
            "swing:\n  max_swing_angle: .inf",
            "swing:\n  sensitivity: .nan",
            "camera:\n  near: 10\n  far: 5",
            "camera:\n  target: {x: 0, y: 0, z: 10}",
            "lighting:\n  ambient_intensity: -1",
            "lighting:\n  directional_position: {x: 0, y: 0, z: 0}",
            "max_pixel_ratio: 0.5",
        ] {
            assert!(SceneConfig::from_yaml(yaml).is_err(), "accepted: {}", yaml);
        }
    }

    #[test]
    fn test_segment_counts_are_capped() {
        for yaml in [
            "tulip:\n  petal_extrude:\n    curve_segments: 100000000",
            "tulip:\n  leaf_extrude:\n    steps: 100000",
            "tulip:\n  petal_extrude:\n    bevel_segments: 5000",
            "tulip:\n  stem:\n    radial_segments: 1000000",
        ] {
            let err = SceneConfig::from_yaml(yaml).unwrap_err();
            assert!(err.contains("must be in"), "{}", err);
        }

        let at_limit = "tulip:\n  petal_extrude:\n    curve_segments: 128\n  stem:\n    radial_segments: 256";
        assert!(SceneConfig::from_yaml(at_limit).is_ok());
    }

    #[test]
    fn test_disabled_bevel_allows_zero_segments() {
        let yaml = "tulip:\n  petal_extrude:\n    bevel_enabled: false\n    bevel_segments: 0";
        assert!(SceneConfig::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_malformed_yaml() {
        let result = SceneConfig::from_yaml("swing: [1, 2");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("YAML parse error"));
    }
}
