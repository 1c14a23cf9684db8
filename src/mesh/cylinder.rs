use serde::{Deserialize, Serialize};
use crate::math::Vec3;
use super::geometry::{Mesh, Vertex, create_ring, connect_rings};

/// Parameters for a Y-aligned cylinder centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderParams {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: usize,
    /// Skip the end caps
    pub open_ended: bool,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius_top: 0.15,
            radius_bottom: 0.15,
            height: 4.0,
            radial_segments: 16,
            open_ended: false,
        }
    }
}

/// Build a (possibly tapered) cylinder spanning y in [-height/2, height/2]
pub fn cylinder(params: &CylinderParams) -> Mesh {
    let segments = params.radial_segments.max(3);
    let half = params.height / 2.0;
    let top_center = Vec3::new(0.0, half, 0.0);
    let bottom_center = Vec3::new(0.0, -half, 0.0);

    // Tapering tilts the side normals toward the narrow end
    let slope = if params.height > 0.0 {
        (params.radius_bottom - params.radius_top) / params.height
    } else {
        0.0
    };
    let tilt = |mut v: Vertex| {
        v.normal = (v.normal + Vec3::UP.scale(slope)).normalize();
        v
    };

    let mut mesh = Mesh::new();

    let top_ring: Vec<Vertex> = create_ring(top_center, Vec3::UP, params.radius_top, segments, 1.0)
        .into_iter()
        .map(tilt)
        .collect();
    let bottom_ring: Vec<Vertex> =
        create_ring(bottom_center, Vec3::UP, params.radius_bottom, segments, 0.0)
            .into_iter()
            .map(tilt)
            .collect();

    let top = mesh.add_vertices(top_ring);
    let bottom = mesh.add_vertices(bottom_ring);
    connect_rings(&mut mesh, top, bottom, segments);

    if !params.open_ended {
        add_cap(&mut mesh, top_center, params.radius_top, segments, Vec3::UP);
        add_cap(&mut mesh, bottom_center, params.radius_bottom, segments, -Vec3::UP);
    }

    mesh
}

fn add_cap(mesh: &mut Mesh, center: Vec3, radius: f32, segments: usize, normal: Vec3) {
    let rim: Vec<Vertex> = create_ring(center, Vec3::UP, radius, segments, 0.0)
        .into_iter()
        .map(|v| {
            let u = 0.5 + (v.position.x - center.x) / (2.0 * radius.max(f32::EPSILON));
            let w = 0.5 + (v.position.z - center.z) / (2.0 * radius.max(f32::EPSILON));
            Vertex::new(v.position, normal).with_uv(u, w)
        })
        .collect();

    let rim_start = mesh.add_vertices(rim);
    let hub = mesh.add_vertices(std::iter::once(Vertex::new(center, normal).with_uv(0.5, 0.5)));
    let facing_up = normal.y > 0.0;

    for i in 0..segments {
        let a = rim_start + i as u32;
        let b = rim_start + ((i + 1) % segments) as u32;
        if facing_up {
            mesh.add_triangle(hub, a, b);
        } else {
            mesh.add_triangle(hub, b, a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_counts() {
        let mesh = cylinder(&CylinderParams::default());
        // Two side rings plus two capped rims with hubs
        assert_eq!(mesh.vertex_count(), 2 * 16 + 2 * (16 + 1));
        assert_eq!(mesh.triangle_count(), 2 * 16 + 2 * 16);
    }

    #[test]
    fn test_open_ended_has_no_caps() {
        let params = CylinderParams {
            open_ended: true,
            ..Default::default()
        };
        let mesh = cylinder(&params);
        assert_eq!(mesh.vertex_count(), 32);
        assert_eq!(mesh.triangle_count(), 32);
    }

    #[test]
    fn test_cylinder_extent() {
        let mesh = cylinder(&CylinderParams::default());
        let min_y = mesh.vertices.iter().map(|v| v.position.y).fold(f32::MAX, f32::min);
        let max_y = mesh.vertices.iter().map(|v| v.position.y).fold(f32::MIN, f32::max);
        assert!((min_y + 2.0).abs() < 0.0001);
        assert!((max_y - 2.0).abs() < 0.0001);

        for v in &mesh.vertices {
            let r = (v.position.x.powi(2) + v.position.z.powi(2)).sqrt();
            assert!(r <= 0.15 + 0.0001);
        }
    }

    #[test]
    fn test_cap_triangles_face_their_normal() {
        let mesh = cylinder(&CylinderParams::default());
        let side_tris = 2 * 16;
        for tri in mesh.indices.chunks_exact(3).skip(side_tris) {
            let a = mesh.vertices[tri[0] as usize];
            let b = mesh.vertices[tri[1] as usize];
            let c = mesh.vertices[tri[2] as usize];
            let face = (b.position - a.position).cross(&(c.position - a.position));
            assert!(face.dot(&a.normal) > 0.0);
        }
    }

    #[test]
    fn test_tapered_normals_lean_upward() {
        let params = CylinderParams {
            radius_top: 0.05,
            radius_bottom: 0.2,
            ..Default::default()
        };
        let mesh = cylinder(&params);
        assert!(mesh.vertices[0].normal.y > 0.0);
        assert!((mesh.vertices[0].normal.length() - 1.0).abs() < 0.0001);
    }
}
