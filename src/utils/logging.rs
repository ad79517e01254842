use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Parses a level name such as `"info"` or `"debug"`.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("Invalid log level {:?}", level))
}

/// Installs the global logger. `RUST_LOG`, when set, overrides `level`.
pub fn init_logging(level: LevelFilter) -> Result<()> {
    SimpleLogger::new()
        .with_level(level)
        .with_module_level("winit", LevelFilter::Warn)
        .with_module_level("glutin", LevelFilter::Warn)
        .env()
        .init()
        .context("Failed to install logger")
}
