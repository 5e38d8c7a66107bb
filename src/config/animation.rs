use serde::{Deserialize, Serialize};

/// Per-frame increments and bounds of the scene animation.
///
/// `angle_*` values are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub offset_step: f32,
    pub max_offset: f32,
    pub angle_step: f32,
    pub angle_limit: f32,
    pub angle_reset: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            offset_step: 0.0005,
            max_offset: 0.7,
            angle_step: 0.01,
            angle_limit: 360.0,
            angle_reset: 0.01,
        }
    }
}
