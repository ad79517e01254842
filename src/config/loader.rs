use crate::config::core::DemoConfig;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "GLTRIANGLE_CONFIG";

pub fn load_or_create_config() -> Result<DemoConfig> {
    let config_path = match std::env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => get_config_path()?,
    };
    load_or_create_at(&config_path)
}

/// Reads the config at `config_path`, writing the defaults there first if
/// the file does not exist.
pub fn load_or_create_at(config_path: &Path) -> Result<DemoConfig> {
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let default_config = DemoConfig::default();
        let toml_content = toml::to_string_pretty(&default_config)?;
        std::fs::write(config_path, toml_content).context("Failed to write default config")?;
        log::info!("Wrote default config to {}", config_path.display());
        return Ok(default_config);
    }

    let content = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
    log::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "gltriangle")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}
