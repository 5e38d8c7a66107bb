pub mod animation;
pub mod gl_api;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod shaders;
pub mod sources;

pub use animation::{AnimationState, FrameUniforms, FrameUpdater, ModelTransform};
pub use gl_api::{Gl, ShaderApi};
pub use mesh::{GpuMesh, MeshData};
pub use renderer::Renderer;
pub use scene::{SceneDescriptor, SceneKind};
pub use shaders::{ShaderProgram, ShaderSource, ShaderStage};
