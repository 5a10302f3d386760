pub mod config;
pub mod mesh;
pub mod shader;
pub mod texture;
pub mod window;

// Re-export commonly used types
pub use config::WindowConfig;
pub use mesh::{Mesh, VertexAttribute, VertexLayout};
pub use shader::{CompiledShader, ShaderError, ShaderKind, ShaderProgram};
pub use texture::Texture;
pub use window::{DemoWindow, WindowError};
