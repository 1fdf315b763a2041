//! Season command for showing the current season.

use anyhow::{Context, Result};
use armory_core::SeasonWindow;

use crate::cli::SourceArgs;

pub fn run(source: &SourceArgs) -> Result<()> {
    let armory = super::open(source, SeasonWindow::default())?;

    let season = armory
        .current_season()
        .context("Failed to resolve the current season")?;

    let date = |value: Option<chrono::DateTime<chrono::Utc>>| {
        value
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    println!("Season {}: {}", season.ordinal, season.name);
    println!("  Hash:  {}", season.id);
    println!("  Start: {}", date(season.start));
    println!("  End:   {}", date(season.end));
    Ok(())
}
