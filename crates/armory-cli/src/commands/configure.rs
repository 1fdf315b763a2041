//! Configure command for saving catalog credentials.

use anyhow::{Result, bail};
use armory_core::DEFAULT_LOCALE;
use tracing::warn;

use crate::cli::SourceArgs;
use crate::config::{Settings, config_path};

pub fn run(source: &SourceArgs) -> Result<()> {
    if source.api_key.is_none() {
        bail!("--api-key is required");
    }

    let path = config_path()?;
    let settings = Settings::load_from(&path)?.merge(source);
    if settings.locale.is_none() {
        warn!("No locale configured, using {}", DEFAULT_LOCALE);
    }
    settings.save_to(&path)?;

    println!("Configuration saved to: {}", path.display());
    Ok(())
}
