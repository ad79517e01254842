use anyhow::Result;
use gltriangle::{config, platform, utils};

fn main() -> Result<()> {
    let config = config::load_or_create_config()?;
    utils::init_logging(utils::parse_level(&config.log_level)?)?;
    log::info!("Starting {}", config.window.title);

    platform::run(&config)?;

    log::info!("Window closed");
    Ok(())
}
