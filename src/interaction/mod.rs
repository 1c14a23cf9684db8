pub mod pointer;
pub mod viewport;

pub use pointer::PointerState;
pub use viewport::Viewport;
