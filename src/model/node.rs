use std::rc::Rc;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;
use super::material::Material;

/// Position, Euler rotation (XYZ order, radians), and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::compose(self.position, self.rotation, self.scale)
    }
}

/// Which part of the flower a mesh instance represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Petal,
    Leaf,
    Stem,
}

/// One drawable instance: shared geometry and material placed by its own transform
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub part: Part,
    pub geometry: Rc<Mesh>,
    pub material: Rc<Material>,
    pub transform: Transform,
}

/// A transform applied to a flat list of mesh instances
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub transform: Transform,
    pub children: Vec<MeshNode>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: MeshNode) {
        self.children.push(node);
    }

    pub fn parts(&self, part: Part) -> impl Iterator<Item = &MeshNode> {
        self.children.iter().filter(move |c| c.part == part)
    }

    /// World matrix of a child: group transform applied after the child's own
    pub fn world_matrix(&self, child: &MeshNode) -> Mat4 {
        self.transform.matrix().mul(&child.transform.matrix())
    }
}
