pub mod vec2;
pub mod vec3;
pub mod matrix;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use matrix::Mat4;
