use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::core::AppConfig;

const CONFIG_FILE: &str = "config.toml";

/// Loads the config from the platform config directory, writing the
/// defaults there first if no file exists yet.
pub fn load_or_create_config() -> Result<AppConfig> {
    let config_path = config_path()?;
    load_or_create_at(&config_path)
}

pub fn load_or_create_at(config_path: &Path) -> Result<AppConfig> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    if !config_path.exists() {
        let default_config = AppConfig::default();
        let toml_content = toml::to_string_pretty(&default_config)?;
        fs::write(config_path, toml_content).context("Failed to write default config")?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(config_path).context("Failed to read config file")?;
    let config: AppConfig = toml::from_str(&content).context("Failed to parse config file")?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", config_path.display()))?;
    Ok(config)
}

/// Location of `config.toml` in the platform config directory.
pub fn config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "glscene")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scene::SceneKind;

    #[test]
    fn test_creates_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = load_or_create_at(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // The written file must load back to the same values.
        let reloaded = load_or_create_at(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "scene = \"triangle\"\n\n[window]\ntitle = \"Triangle\"\n\n[animation]\nmax_offset = 0.5\n",
        )
        .unwrap();

        let config = load_or_create_at(&path).unwrap();
        assert_eq!(config.scene, SceneKind::Triangle);
        assert_eq!(config.window.title, "Triangle");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.animation.max_offset, 0.5);
        assert_eq!(config.animation.offset_step, 0.0005);
        assert_eq!(config.render.clear_color, [0.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        fs::write(&path, "scene = \"cube\"\n").unwrap();
        assert!(load_or_create_at(&path).is_err());

        fs::write(&path, "[window]\nwidth = 0\n").unwrap();
        assert!(load_or_create_at(&path).is_err());
    }

    #[test]
    fn test_config_path_names_config_toml() {
        // Environments without a home directory have no project dirs.
        if let Ok(path) = config_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_FILE);
            assert!(path.parent().is_some());
        }
    }

    #[test]
    fn test_nan_animation_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        fs::write(&path, "[animation]\nangle_step = nan\noffset_step = nan\n").unwrap();
        assert!(load_or_create_at(&path).is_err());

        fs::write(&path, "[render]\nfar = inf\n").unwrap();
        assert!(load_or_create_at(&path).is_err());
    }
}
