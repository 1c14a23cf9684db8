//! Scene-graph model of the tulip: shared geometry and materials placed by transforms

pub mod material;
pub mod node;
pub mod tulip;

pub use material::{Material, MaterialOverrides};
pub use node::{Group, MeshNode, Part, Transform};
pub use tulip::{TulipBuilder, TulipParams, build_tulip, petal_outline, leaf_outline, PETAL_COUNT, LEAF_COUNT};
