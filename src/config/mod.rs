pub mod animation;
pub mod core;
pub mod loader;
pub mod rendering;

pub use animation::AnimationConfig;
pub use core::{AppConfig, WindowConfig};
pub use loader::{config_path, load_or_create_at, load_or_create_config};
pub use rendering::RenderConfig;
