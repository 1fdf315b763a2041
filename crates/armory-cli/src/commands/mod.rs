pub mod configure;
pub mod export;
pub mod season;
pub mod summary;

use anyhow::Result;
use armory_core::{Armory, ArmoryConfig, HttpGateway, SeasonWindow};
use tracing::info;

use crate::cli::SourceArgs;
use crate::config;

/// Build a pipeline against the configured catalog service
pub(crate) fn open(source: &SourceArgs, window: SeasonWindow) -> Result<Armory<HttpGateway>> {
    let settings = config::resolve(source)?;
    info!("Catalog: {} (locale: {})", settings.base_url, settings.locale);

    let gateway = HttpGateway::with_base_url(settings.base_url, settings.api_key);
    let config = ArmoryConfig::builder()
        .locale(settings.locale)
        .season_window(window)
        .build();
    Ok(Armory::connect(gateway, config))
}
