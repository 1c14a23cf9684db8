//! Procedural tulip: three extruded petals around the vertical axis,
//! a cylindrical stem, and a mirrored pair of leaves at its base.

use std::f32::consts::{PI, TAU};
use std::rc::Rc;
use serde::{Deserialize, Deserializer, Serialize};
use crate::math::Vec3;
use crate::mesh::{CylinderParams, ExtrudeOverrides, ExtrudeSettings, Shape, cylinder, extrude_shape};
use super::material::{Material, MaterialOverrides};
use super::node::{Group, MeshNode, Part, Transform};

pub const PETAL_COUNT: usize = 3;
pub const LEAF_COUNT: usize = 2;

/// Parameters for building the tulip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TulipParams {
    #[serde(deserialize_with = "petal_extrude")]
    pub petal_extrude: ExtrudeSettings,
    #[serde(deserialize_with = "leaf_extrude")]
    pub leaf_extrude: ExtrudeSettings,
    pub stem: CylinderParams,
    /// Centre of the stem relative to the flower head
    pub stem_position: Vec3,
    /// Position of the +Z leaf; the other leaf mirrors it through the stem axis
    pub leaf_position: Vec3,
    /// Z rotation magnitude of the leaves (radians)
    pub leaf_tilt: f32,
    #[serde(deserialize_with = "petal_material")]
    pub petal_material: Material,
    /// Shared by stem and leaves
    #[serde(deserialize_with = "stem_material")]
    pub stem_material: Material,
}

// Nested sections are read as overrides on top of the part's own defaults

fn petal_extrude<'de, D: Deserializer<'de>>(d: D) -> Result<ExtrudeSettings, D::Error> {
    Ok(ExtrudeOverrides::deserialize(d)?.apply(ExtrudeSettings::petal()))
}

fn leaf_extrude<'de, D: Deserializer<'de>>(d: D) -> Result<ExtrudeSettings, D::Error> {
    Ok(ExtrudeOverrides::deserialize(d)?.apply(ExtrudeSettings::leaf()))
}

fn petal_material<'de, D: Deserializer<'de>>(d: D) -> Result<Material, D::Error> {
    Ok(MaterialOverrides::deserialize(d)?.apply(Material::petal()))
}

fn stem_material<'de, D: Deserializer<'de>>(d: D) -> Result<Material, D::Error> {
    Ok(MaterialOverrides::deserialize(d)?.apply(Material::stem()))
}

impl Default for TulipParams {
    fn default() -> Self {
        Self {
            petal_extrude: ExtrudeSettings::petal(),
            leaf_extrude: ExtrudeSettings::leaf(),
            stem: CylinderParams::default(),
            stem_position: Vec3::new(0.0, -1.25, 0.0),
            leaf_position: Vec3::new(0.0, -2.4, 0.2),
            leaf_tilt: PI / 1.5,
            petal_material: Material::petal(),
            stem_material: Material::stem(),
        }
    }
}

/// Almond profile: two mirrored arcs from the base to a rounded tip
pub fn petal_outline() -> Shape {
    Shape::builder()
        .move_to(0.0, -1.0)
        .bezier_curve_to(1.5, -1.0, 1.5, 1.0, 0.0, 1.5)
        .bezier_curve_to(-1.5, 1.0, -1.5, -1.0, 0.0, -1.0)
        .build()
}

/// One arc over the top, then a straight edge down to the point
pub fn leaf_outline() -> Shape {
    Shape::builder()
        .move_to(-0.5, 0.0)
        .bezier_curve_to(-0.5, 1.0, 0.5, 1.0, 0.5, 0.0)
        .line_to(0.0, -1.0)
        .build()
}

/// Builds the tulip scene node from [`TulipParams`]
pub struct TulipBuilder {
    params: TulipParams,
}

impl TulipBuilder {
    pub fn new(params: TulipParams) -> Self {
        Self { params }
    }

    pub fn build(&self) -> Group {
        let params = &self.params;
        let mut group = Group::new();

        let petal_geometry = Rc::new(extrude_shape(&petal_outline(), &params.petal_extrude));
        let petal_material = Rc::new(params.petal_material);

        for i in 0..PETAL_COUNT {
            let angle = i as f32 * TAU / PETAL_COUNT as f32;
            group.add(MeshNode {
                part: Part::Petal,
                geometry: Rc::clone(&petal_geometry),
                material: Rc::clone(&petal_material),
                transform: Transform::default().with_rotation(Vec3::new(0.0, angle, 0.0)),
            });
        }

        let stem_material = Rc::new(params.stem_material);
        let leaf_geometry = Rc::new(extrude_shape(&leaf_outline(), &params.leaf_extrude));

        for i in 0..LEAF_COUNT {
            let side = if i == 0 { -1.0 } else { 1.0 };
            let position = Vec3::new(
                params.leaf_position.x,
                params.leaf_position.y,
                params.leaf_position.z * side,
            );
            group.add(MeshNode {
                part: Part::Leaf,
                geometry: Rc::clone(&leaf_geometry),
                material: Rc::clone(&stem_material),
                transform: Transform::at(position)
                    .with_rotation(Vec3::new(0.0, 0.0, params.leaf_tilt * side)),
            });
        }

        group.add(MeshNode {
            part: Part::Stem,
            geometry: Rc::new(cylinder(&params.stem)),
            material: stem_material,
            transform: Transform::at(params.stem_position),
        });

        group
    }
}

/// Build the tulip with its stock proportions and materials
pub fn build_tulip() -> Group {
    TulipBuilder::new(TulipParams::default()).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_counts() {
        let tulip = build_tulip();
        assert_eq!(tulip.parts(Part::Petal).count(), 3);
        assert_eq!(tulip.parts(Part::Leaf).count(), 2);
        assert_eq!(tulip.parts(Part::Stem).count(), 1);
        assert_eq!(tulip.children.len(), 6);
    }

    #[test]
    fn test_petals_evenly_spaced() {
        let tulip = build_tulip();
        for (i, petal) in tulip.parts(Part::Petal).enumerate() {
            let expected = i as f32 * 2.0 * PI / 3.0;
            assert!((petal.transform.rotation.y - expected).abs() < 1e-6);
            assert_eq!(petal.transform.rotation.x, 0.0);
            assert_eq!(petal.transform.rotation.z, 0.0);
            assert_eq!(petal.transform.position, Vec3::ZERO);
        }
    }

    #[test]
    fn test_petals_share_geometry_and_material() {
        let tulip = build_tulip();
        let petals: Vec<_> = tulip.parts(Part::Petal).collect();
        for petal in &petals[1..] {
            assert!(Rc::ptr_eq(&petal.geometry, &petals[0].geometry));
            assert!(Rc::ptr_eq(&petal.material, &petals[0].material));
        }
        assert_eq!(*petals[0].material, Material::petal());
    }

    #[test]
    fn test_leaves_mirror_each_other() {
        let tulip = build_tulip();
        let leaves: Vec<_> = tulip.parts(Part::Leaf).collect();
        let (a, b) = (&leaves[0].transform, &leaves[1].transform);

        assert!(a.rotation.z < 0.0 && b.rotation.z > 0.0);
        assert!((a.rotation.z + b.rotation.z).abs() < 1e-6);
        assert!((a.rotation.z.abs() - PI / 1.5).abs() < 1e-6);

        assert!((a.position.z + 0.2).abs() < 1e-6);
        assert!((b.position.z - 0.2).abs() < 1e-6);
        assert_eq!(a.position.y, b.position.y);

        assert!(Rc::ptr_eq(&leaves[0].geometry, &leaves[1].geometry));
        assert!(Rc::ptr_eq(&leaves[0].material, &leaves[1].material));
    }

    #[test]
    fn test_leaves_share_stem_material() {
        let tulip = build_tulip();
        let stem = tulip.parts(Part::Stem).next().unwrap();
        let leaf = tulip.parts(Part::Leaf).next().unwrap();
        assert!(Rc::ptr_eq(&stem.material, &leaf.material));
    }

    #[test]
    fn test_stem_hangs_below_head() {
        let tulip = build_tulip();
        let stem = tulip.parts(Part::Stem).next().unwrap();
        assert_eq!(stem.transform.position, Vec3::new(0.0, -1.25, 0.0));

        // Top of the stem reaches into the flower head, bottom well below it
        let top = stem.transform.position.y + 2.0;
        let bottom = stem.transform.position.y - 2.0;
        assert!(top > -1.0);
        assert!(bottom < -2.4);
    }

    #[test]
    fn test_geometry_is_not_empty() {
        let tulip = build_tulip();
        for child in &tulip.children {
            assert!(child.geometry.vertex_count() > 0);
            assert!(child.geometry.triangle_count() > 0);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_tulip();
        let b = build_tulip();
        for (x, y) in a.children.iter().zip(&b.children) {
            assert_eq!(x.transform, y.transform);
            assert_eq!(x.geometry.vertex_data(), y.geometry.vertex_data());
        }
    }

    #[test]
    fn test_leaf_outline_closes_with_straight_edge() {
        let points = leaf_outline().extract_points(12);
        // start + 12 curve samples + the point of the leaf
        assert_eq!(points.len(), 14);
        assert_eq!(points[13], crate::math::Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_custom_params_flow_through() {
        let params = TulipParams {
            leaf_tilt: 0.5,
            stem_position: Vec3::new(0.0, -2.0, 0.0),
            ..Default::default()
        };
        let tulip = TulipBuilder::new(params).build();
        let leaf = tulip.parts(Part::Leaf).last().unwrap();
        assert!((leaf.transform.rotation.z - 0.5).abs() < 1e-6);
        let stem = tulip.parts(Part::Stem).next().unwrap();
        assert_eq!(stem.transform.position.y, -2.0);
    }
}
