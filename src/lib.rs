pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::core::AppConfig;
pub use render::animation::{AnimationState, FrameUpdater};
pub use render::renderer::Renderer;
pub use render::scene::SceneKind;
pub use render::shaders::{ShaderProgram, ShaderSource};
pub use utils::error::RenderError;
pub use utils::fps::FrameCounter;
