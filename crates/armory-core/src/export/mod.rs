//! Output adapters for enriched items.
//!
//! - **TSV**: one row per item, tabs and line breaks flattened
//! - **CSV**: RFC 4180 quoting
//! - **JSON**: newline-delimited source records with resolved fields overlaid

mod csv;
mod format;
mod json;
mod tsv;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::info;

use crate::definition::DefinitionTable;
use crate::enrich::EnrichedItem;
use crate::error::Result;

pub use csv::CsvExporter;
pub use format::{COLUMNS, ExportFormat, row_values};
pub use json::JsonExporter;
pub use tsv::TsvExporter;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportKind {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Tsv => "tsv",
            ExportKind::Csv => "csv",
            ExportKind::Json => "jsonl",
        }
    }

    /// Render items in this format
    pub fn render(self, items: &[EnrichedItem<'_>], stats: Option<&DefinitionTable>) -> String {
        match self {
            ExportKind::Tsv => {
                let mut exporter = TsvExporter::new();
                if let Some(stats) = stats {
                    exporter = exporter.with_stat_table(stats);
                }
                exporter.format_rows(items)
            }
            ExportKind::Csv => {
                let mut exporter = CsvExporter::new();
                if let Some(stats) = stats {
                    exporter = exporter.with_stat_table(stats);
                }
                exporter.format_rows(items)
            }
            ExportKind::Json => JsonExporter.format_rows(items),
        }
    }
}

/// Write items to `path`, creating parent directories as needed
pub fn export_items<P: AsRef<Path>>(
    path: P,
    items: &[EnrichedItem<'_>],
    kind: ExportKind,
    stats: Option<&DefinitionTable>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, kind.render(items, stats))?;
    info!("Exported {} items to {}", items.len(), path.display());
    Ok(())
}
