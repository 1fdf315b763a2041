//! TSV export format implementation

use crate::definition::DefinitionTable;
use crate::enrich::EnrichedItem;

use super::format::{COLUMNS, ExportFormat, row_values};

/// TSV (Tab-Separated Values) exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter<'t> {
    stats: Option<&'t DefinitionTable>,
}

impl<'t> TsvExporter<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stat table used to name stats of items without resolved stats
    pub fn with_stat_table(mut self, stats: &'t DefinitionTable) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl ExportFormat for TsvExporter<'_> {
    fn header(&self) -> Option<String> {
        Some(COLUMNS.join("\t"))
    }

    fn format_row(&self, item: &EnrichedItem<'_>) -> String {
        row_values(item, self.stats)
            .iter()
            .map(|value| sanitize(value))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Tabs and line breaks would split the row; flatten them to spaces
fn sanitize(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}
