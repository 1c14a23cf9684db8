pub mod camera;
pub mod lights;
pub mod webgl;
pub mod shaders;
pub mod pipeline;

pub use camera::{CameraParams, PerspectiveCamera};
pub use lights::LightingParams;
pub use webgl::WebGLContext;
pub use pipeline::RenderPipeline;
