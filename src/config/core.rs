use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::animation::AnimationConfig;
use super::rendering::RenderConfig;
use crate::render::scene::SceneKind;
use crate::utils::error::{RenderError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Testing".to_string(),
            resizable: false,
        }
    }
}

/// Top-level application settings, stored as `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneKind,
    pub log_level: String,
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub animation: AnimationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Pyramid,
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            render: RenderConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

/// Finite and strictly greater than zero; rejects NaN and infinities.
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| RenderError::Config(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(RenderError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        let render = &self.render;
        if !(positive(render.near) && positive(render.far) && render.near < render.far) {
            return Err(RenderError::Config(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                render.near, render.far
            )));
        }
        if !(render.fov_degrees > 0.0 && render.fov_degrees < 180.0) {
            return Err(RenderError::Config(format!(
                "fov_degrees must be in (0, 180), got {}",
                render.fov_degrees
            )));
        }

        let anim = &self.animation;
        if !(positive(anim.offset_step) && positive(anim.max_offset)) {
            return Err(RenderError::Config(
                "offset_step and max_offset must be positive".to_string(),
            ));
        }
        if !(positive(anim.angle_step) && positive(anim.angle_limit)) {
            return Err(RenderError::Config(
                "angle_step and angle_limit must be positive".to_string(),
            ));
        }
        if !(anim.angle_reset >= 0.0 && anim.angle_reset < anim.angle_limit) {
            return Err(RenderError::Config(format!(
                "angle_reset must be in [0, {}), got {}",
                anim.angle_limit, anim.angle_reset
            )));
        }

        self.level_filter()?;
        Ok(())
    }
}
