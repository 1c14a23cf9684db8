pub mod geometry;
pub mod shape;
pub mod extrude;
pub mod cylinder;

pub use geometry::{Mesh, Vertex, VERTEX_STRIDE};
pub use shape::{Shape, ShapeBuilder};
pub use extrude::{ExtrudeOverrides, ExtrudeSettings, extrude_shape};
pub use cylinder::{CylinderParams, cylinder};
