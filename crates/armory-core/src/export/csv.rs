//! CSV export format implementation

use crate::definition::DefinitionTable;
use crate::enrich::EnrichedItem;

use super::format::{COLUMNS, ExportFormat, row_values};

/// CSV exporter (RFC 4180 quoting)
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter<'t> {
    stats: Option<&'t DefinitionTable>,
}

impl<'t> CsvExporter<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stat table used to name stats of items without resolved stats
    pub fn with_stat_table(mut self, stats: &'t DefinitionTable) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl ExportFormat for CsvExporter<'_> {
    fn header(&self) -> Option<String> {
        Some(COLUMNS.join(","))
    }

    fn format_row(&self, item: &EnrichedItem<'_>) -> String {
        row_values(item, self.stats)
            .iter()
            .map(|value| escape(value))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
