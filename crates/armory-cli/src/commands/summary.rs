//! Summary command for item counts per category.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{SourceArgs, WindowArg};

pub fn run(source: &SourceArgs, window: WindowArg) -> Result<()> {
    let armory = super::open(source, window.into())?;

    eprintln!("Loading definition tables...");
    let data = armory.load().context("Failed to load definition tables")?;
    info!("Loaded {} item definitions", data.items.len());

    let summary = armory.summary(&data)?;
    let width = summary
        .iter()
        .map(|(category, _)| category.label().len())
        .max()
        .unwrap_or(0);

    for (category, count) in summary {
        println!("{:<width$}  {}", category.label(), count, width = width);
    }
    Ok(())
}
