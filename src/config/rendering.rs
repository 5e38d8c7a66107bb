use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    pub vsync: bool,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.5, 0.5, 1.0],
            vsync: true,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}
