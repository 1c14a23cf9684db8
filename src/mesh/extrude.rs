//! Extrusion of closed outlines into solids with an optional rounded bevel

use std::f32::consts::FRAC_PI_2;
use serde::{Deserialize, Serialize};
use crate::math::{Vec2, Vec3};
use super::geometry::{Mesh, Vertex};
use super::shape::{Shape, is_clockwise, tessellate_polygon};

/// Parameters for extruding a shape along +Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeSettings {
    /// Thickness of the straight body
    pub depth: f32,
    /// Number of body subdivisions along the depth
    pub steps: usize,
    /// Divisions per curved outline segment
    pub curve_segments: usize,
    pub bevel_enabled: bool,
    /// How far the bevel extends beyond the body along Z
    pub bevel_thickness: f32,
    /// How far the bevel pushes the outline outward
    pub bevel_size: f32,
    pub bevel_segments: usize,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 0.1,
            steps: 1,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: 0.1,
            bevel_size: 0.1,
            bevel_segments: 5,
        }
    }
}

impl ExtrudeSettings {
    /// Thin, finely rounded slab for petals
    pub fn petal() -> Self {
        Self::default()
    }

    /// Same depth as a petal with a tighter, coarser bevel
    pub fn leaf() -> Self {
        Self {
            bevel_thickness: 0.05,
            bevel_size: 0.05,
            bevel_segments: 3,
            ..Self::default()
        }
    }

    fn bevels(&self) -> bool {
        self.bevel_enabled && self.bevel_segments > 0
    }

    /// (z, outward offset) of every ring from front to back
    pub fn layer_profile(&self) -> Vec<(f32, f32)> {
        let steps = self.steps.max(1);
        let mut layers = Vec::new();

        let body_offset = if self.bevels() { self.bevel_size } else { 0.0 };
        let bevel_at = |k: usize| {
            let t = k as f32 / self.bevel_segments as f32;
            let angle = t * FRAC_PI_2;
            (self.bevel_thickness * angle.cos(), self.bevel_size * angle.sin())
        };

        if self.bevels() {
            for k in 0..self.bevel_segments {
                let (dz, offset) = bevel_at(k);
                layers.push((-dz, offset));
            }
        }

        for s in 0..=steps {
            layers.push((self.depth * s as f32 / steps as f32, body_offset));
        }

        if self.bevels() {
            for k in (0..self.bevel_segments).rev() {
                let (dz, offset) = bevel_at(k);
                layers.push((self.depth + dz, offset));
            }
        }

        layers
    }
}

/// Extrusion fields named in a config document. Unnamed fields keep the base settings' value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ExtrudeOverrides {
    pub depth: Option<f32>,
    pub steps: Option<usize>,
    pub curve_segments: Option<usize>,
    pub bevel_enabled: Option<bool>,
    pub bevel_thickness: Option<f32>,
    pub bevel_size: Option<f32>,
    pub bevel_segments: Option<usize>,
}

impl ExtrudeOverrides {
    pub fn apply(self, base: ExtrudeSettings) -> ExtrudeSettings {
        ExtrudeSettings {
            depth: self.depth.unwrap_or(base.depth),
            steps: self.steps.unwrap_or(base.steps),
            curve_segments: self.curve_segments.unwrap_or(base.curve_segments),
            bevel_enabled: self.bevel_enabled.unwrap_or(base.bevel_enabled),
            bevel_thickness: self.bevel_thickness.unwrap_or(base.bevel_thickness),
            bevel_size: self.bevel_size.unwrap_or(base.bevel_size),
            bevel_segments: self.bevel_segments.unwrap_or(base.bevel_segments),
        }
    }
}

/// Unit-distance miter offsets pointing out of a counter-clockwise outline
fn outline_offsets(contour: &[Vec2]) -> Vec<Vec2> {
    let n = contour.len();
    (0..n)
        .map(|j| {
            let prev = contour[(j + n - 1) % n];
            let cur = contour[j];
            let next = contour[(j + 1) % n];

            let n1 = (cur - prev).right_normal();
            let n2 = (next - cur).right_normal();
            let miter = (n1 + n2).normalize();
            if miter.length() < 0.5 {
                return n1;
            }
            // Keep the offset distance constant along both adjacent edges
            miter.scale(1.0 / miter.dot(&n1).max(0.25))
        })
        .collect()
}

/// Fill the outline grown by `offset` at depth `z`. Back caps face +Z, front caps -Z.
fn add_cap(mesh: &mut Mesh, contour: &[Vec2], offsets: &[Vec2], offset: f32, z: f32, facing_back: bool) {
    let outline: Vec<Vec2> = contour
        .iter()
        .zip(offsets)
        .map(|(p, dir)| *p + dir.scale(offset))
        .collect();

    let cap = match tessellate_polygon(&outline) {
        Ok(cap) => cap,
        Err(e) => {
            log::warn!("Skipping extrusion cap: {}", e);
            return;
        }
    };

    let start = mesh.add_vertices(
        cap.positions
            .iter()
            .map(|p| Vertex::new(Vec3::new(p.x, p.y, z), Vec3::ZERO).with_uv(p.x, p.y)),
    );
    for t in &cap.triangles {
        if facing_back {
            mesh.add_triangle(start + t[0], start + t[1], start + t[2]);
        } else {
            mesh.add_triangle(start + t[0], start + t[2], start + t[1]);
        }
    }
}

/// Extrude `shape` from z = 0 to z = depth, with bevels growing past both faces
pub fn extrude_shape(shape: &Shape, settings: &ExtrudeSettings) -> Mesh {
    let mut contour = shape.extract_points(settings.curve_segments.max(1));
    if contour.len() < 3 {
        return Mesh::new();
    }
    if is_clockwise(&contour) {
        contour.reverse();
    }

    let n = contour.len();
    let offsets = outline_offsets(&contour);
    let layers = settings.layer_profile();
    let last_layer = (layers.len() - 1).max(1) as f32;

    let ring_at = |z: f32, offset: f32, v: f32| -> Vec<Vertex> {
        contour
            .iter()
            .zip(&offsets)
            .enumerate()
            .map(|(j, (p, dir))| {
                let q = *p + dir.scale(offset);
                Vertex::new(Vec3::new(q.x, q.y, z), Vec3::ZERO).with_uv(j as f32 / n as f32, v)
            })
            .collect()
    };

    let mut mesh = Mesh::new();

    // Side walls
    let mut prev_ring: Option<u32> = None;
    for (i, &(z, offset)) in layers.iter().enumerate() {
        let ring = mesh.add_vertices(ring_at(z, offset, i as f32 / last_layer));
        if let Some(prev) = prev_ring {
            for j in 0..n {
                let j_next = (j + 1) % n;
                mesh.add_quad(
                    prev + j as u32,
                    prev + j_next as u32,
                    ring + j_next as u32,
                    ring + j as u32,
                );
            }
        }
        prev_ring = Some(ring);
    }

    // Caps get their own vertices so their normals stay flat
    let (front_z, front_offset) = layers[0];
    let (back_z, back_offset) = layers[layers.len() - 1];
    add_cap(&mut mesh, &contour, &offsets, front_offset, front_z, false);
    add_cap(&mut mesh, &contour, &offsets, back_offset, back_z, true);

    mesh.compute_normals();
    mesh
}
