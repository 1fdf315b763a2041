//! JSON export format implementation

use crate::enrich::EnrichedItem;

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
///
/// Each line is the source record with the resolved fields overlaid.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None // NDJSON has no header
    }

    fn format_row(&self, item: &EnrichedItem<'_>) -> String {
        item.to_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Category, ClassifiedItem};
    use crate::definition::Record;
    use crate::enrich::ResolvedDamageType;
    use serde_json::{Value, json};

    #[test]
    fn test_json_lines() {
        let record = Record::from_value(json!({
            "hash": 1363886209u64,
            "displayProperties": { "name": "Gjallarhorn" }
        }))
        .unwrap();
        let mut item = EnrichedItem::from(ClassifiedItem::new("1363886209", Category::Weapon, &record));
        item.resolved_damage_type = Some(ResolvedDamageType {
            name: "Solar".to_string(),
            description: String::new(),
            ordinal: Some(3),
        });

        let output = JsonExporter.format_rows(&[item.clone(), item]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["hash"], json!(1363886209u64));
        assert_eq!(parsed["category"], json!("weapon"));
        assert_eq!(parsed["resolvedDamageType"]["ordinal"], json!(3));
        assert!(parsed.get("resolvedPerks").is_none());
    }
}
