//! ExportFormat trait and the shared column layout

use serde_json::{Number, Value};

use crate::definition::{DefinitionTable, value_as_u64};
use crate::enrich::{EnrichedItem, NameResolver};

/// Trait for export format implementations
///
/// Provides a common interface for different export formats (TSV, CSV, JSON)
pub trait ExportFormat {
    /// Returns the header line for the format (None for formats without headers)
    fn header(&self) -> Option<String>;

    /// Format a single enriched item
    fn format_row(&self, item: &EnrichedItem<'_>) -> String;

    /// Format multiple items
    fn format_rows(&self, items: &[EnrichedItem<'_>]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for item in items {
            output.push_str(&self.format_row(item));
            output.push('\n');
        }
        output
    }
}

/// Column names shared by the delimited formats
pub const COLUMNS: [&str; 10] = [
    "id",
    "category",
    "name",
    "type",
    "tier",
    "season",
    "damage_type",
    "stats",
    "perks",
    "description",
];

/// Flat column values for one item, in `COLUMNS` order
pub fn row_values(item: &EnrichedItem<'_>, stats: Option<&DefinitionTable>) -> Vec<String> {
    let record = item.record();

    vec![
        item.id().to_string(),
        item.item.category.tag().to_string(),
        item.name().to_string(),
        record
            .str_at(&["itemTypeDisplayName"])
            .unwrap_or_default()
            .to_string(),
        record
            .str_at(&["inventory", "tierTypeName"])
            .unwrap_or_default()
            .to_string(),
        record
            .u64_at(&["seasonHash"])
            .filter(|hash| *hash != 0)
            .map(|hash| hash.to_string())
            .unwrap_or_default(),
        item.resolved_damage_type
            .as_ref()
            .map(|damage| damage.name.clone())
            .unwrap_or_default(),
        stat_summary(item, stats),
        item.resolved_perks
            .as_ref()
            .map(|perks| {
                perks
                    .iter()
                    .map(|perk| perk.name.as_str())
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default(),
        record.description().unwrap_or_default().to_string(),
    ]
}

/// `Name: value` pairs joined by `; `.
///
/// Items that went through stat enrichment use their resolved names; others
/// fall back to resolving the raw stat block against the stat table.
fn stat_summary(item: &EnrichedItem<'_>, stats: Option<&DefinitionTable>) -> String {
    if let Some(resolved) = &item.resolved_stats {
        return resolved
            .values()
            .map(|stat| format!("{}: {}", stat.name, display_number(stat.value.as_ref())))
            .collect::<Vec<_>>()
            .join("; ");
    }

    let Some(raw) = item.record().object_at(&["stats", "stats"]) else {
        return String::new();
    };
    let empty = DefinitionTable::new();
    let names = NameResolver::for_stats(stats.unwrap_or(&empty));

    raw.iter()
        .filter_map(|(key, entry)| {
            let id = entry
                .get("statHash")
                .and_then(value_as_u64)
                .or_else(|| key.parse().ok())?;
            let value = match entry.get("value") {
                Some(Value::Number(n)) => Some(n),
                _ => None,
            };
            Some(format!("{}: {}", names.resolve(id).name, display_number(value)))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn display_number(value: Option<&Number>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
