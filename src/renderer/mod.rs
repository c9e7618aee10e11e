//! Rendering
//!
//! `draw` projects a game snapshot into primitives, `shapes` turns them into
//! triangles and `pipeline` puts them on a WebGPU surface.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawCommand, frame};
pub use pipeline::RenderState;
