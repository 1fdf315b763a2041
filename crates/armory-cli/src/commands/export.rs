//! Export command for writing classified items to disk.

use std::path::Path;

use anyhow::{Context, Result};
use armory_core::{Category, ExportKind, export_items};
use strum::IntoEnumIterator;
use tracing::info;

use crate::cli::{ExportFormat, SourceArgs, WindowArg};

/// Export each category to `<output_dir>/<category>.<ext>`
pub fn run(
    source: &SourceArgs,
    categories: &[Category],
    format: ExportFormat,
    output_dir: &Path,
    window: WindowArg,
) -> Result<()> {
    let current_version = env!("CARGO_PKG_VERSION");
    eprintln!("armory {} - Export Mode", current_version);

    let armory = super::open(source, window.into())?;

    eprintln!("Loading definition tables...");
    let data = armory.load().context("Failed to load definition tables")?;
    info!("Loaded {} item definitions", data.items.len());

    let categories: Vec<Category> = if categories.is_empty() {
        Category::iter().collect()
    } else {
        categories.to_vec()
    };

    let kind: ExportKind = format.into();
    for category in categories {
        let items = armory
            .items(&data, category)
            .with_context(|| format!("Failed to build {}", category.label()))?;

        let path = output_dir.join(format!("{}.{}", category.tag(), kind.extension()));
        export_items(&path, &items, kind, Some(&*data.stats))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("{}: {} items -> {}", category.label(), items.len(), path.display());
    }

    info!("Export finished in {}", output_dir.display());
    Ok(())
}
