//! Enrichment: cross-referencing classified items against auxiliary tables.
//!
//! Enrichment only adds derived fields next to the source record; the record
//! and the auxiliary tables are never modified. Missing references are
//! skipped because partial source data is normal.

mod names;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::classify::ClassifiedItem;
use crate::definition::{DefinitionTable, Record, value_as_u64};

pub use names::{BuiltinStatNames, NameResolver, NameSource, ResolvedName, TableNames};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStat {
    pub name: String,
    pub description: String,
    pub value: Option<Number>,
    pub min: Option<Number>,
    pub max: Option<Number>,
    pub display_max: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPerk {
    pub hash: u64,
    pub name: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub displayable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSocket {
    pub socket_type_id: Option<u64>,
    pub initial_plug_id: Option<u64>,
    pub reusable_plug_set_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDamageType {
    pub name: String,
    pub description: String,
    pub ordinal: Option<i64>,
}

/// A classified item with resolved cross-references attached
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedItem<'a> {
    pub item: ClassifiedItem<'a>,
    pub resolved_stats: Option<BTreeMap<String, ResolvedStat>>,
    pub resolved_perks: Option<Vec<ResolvedPerk>>,
    pub resolved_sockets: Option<Vec<ResolvedSocket>>,
    pub resolved_damage_type: Option<ResolvedDamageType>,
}

impl<'a> From<ClassifiedItem<'a>> for EnrichedItem<'a> {
    fn from(item: ClassifiedItem<'a>) -> Self {
        Self {
            item,
            resolved_stats: None,
            resolved_perks: None,
            resolved_sockets: None,
            resolved_damage_type: None,
        }
    }
}

impl<'a> EnrichedItem<'a> {
    pub fn id(&self) -> &'a str {
        self.item.id
    }

    pub fn record(&self) -> &'a Record {
        self.item.record
    }

    pub fn name(&self) -> &'a str {
        self.item.name()
    }

    /// The source record with the resolved fields overlaid.
    ///
    /// Keys already present on the record are left untouched.
    pub fn to_value(&self) -> Value {
        let mut fields = self.item.record.fields().clone();

        overlay(&mut fields, "category", &self.item.category);
        if let Some(stats) = &self.resolved_stats {
            overlay(&mut fields, "resolvedStats", stats);
        }
        if let Some(perks) = &self.resolved_perks {
            overlay(&mut fields, "resolvedPerks", perks);
        }
        if let Some(sockets) = &self.resolved_sockets {
            overlay(&mut fields, "resolvedSockets", sockets);
        }
        if let Some(damage_type) = &self.resolved_damage_type {
            overlay(&mut fields, "resolvedDamageType", damage_type);
        }

        Value::Object(fields)
    }
}

fn overlay<T: Serialize>(fields: &mut Map<String, Value>, key: &str, value: &T) {
    if fields.contains_key(key) {
        return;
    }
    if let Ok(value) = serde_json::to_value(value) {
        fields.insert(key.to_string(), value);
    }
}

/// Resolves item references against the stat, perk and damage-type tables
pub struct Enricher<'t> {
    stat_names: NameResolver<'t>,
    perks: &'t DefinitionTable,
    damage_types: &'t DefinitionTable,
    asset_base_url: String,
}

impl<'t> Enricher<'t> {
    pub fn new(
        stats: &'t DefinitionTable,
        perks: &'t DefinitionTable,
        damage_types: &'t DefinitionTable,
        asset_base_url: impl Into<String>,
    ) -> Self {
        Self {
            stat_names: NameResolver::for_stats(stats),
            perks,
            damage_types,
            asset_base_url: asset_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full enrichment: stats, perks, sockets and damage type
    pub fn enrich<'a>(&self, item: ClassifiedItem<'a>) -> EnrichedItem<'a> {
        let enriched = self.enrich_stats(EnrichedItem::from(item));
        self.enrich_perks_and_damage(enriched)
    }

    pub fn enrich_stats<'a>(&self, mut item: EnrichedItem<'a>) -> EnrichedItem<'a> {
        item.resolved_stats = self.resolve_stats(item.record());
        item
    }

    pub fn enrich_perks_and_damage<'a>(&self, mut item: EnrichedItem<'a>) -> EnrichedItem<'a> {
        let record = item.record();
        item.resolved_perks = self.resolve_perks(record);
        item.resolved_sockets = resolve_sockets(record);
        item.resolved_damage_type = self.resolve_damage_type(record);
        item
    }

    /// Per-item stat block keyed by stat id; `None` when the record has no stats
    pub fn resolve_stats(&self, record: &Record) -> Option<BTreeMap<String, ResolvedStat>> {
        let stats = record.object_at(&["stats", "stats"])?;

        let resolved = stats
            .iter()
            .filter_map(|(key, entry)| {
                let id = entry
                    .get("statHash")
                    .and_then(value_as_u64)
                    .or_else(|| key.parse().ok())?;
                let name = self.stat_names.resolve(id);
                // Copied as-is; values may be fractional or exceed i64
                let number = |field: &str| match entry.get(field) {
                    Some(Value::Number(n)) => Some(n.clone()),
                    _ => None,
                };

                Some((
                    id.to_string(),
                    ResolvedStat {
                        name: name.name,
                        description: name.description,
                        value: number("value"),
                        min: number("minimum"),
                        max: number("maximum"),
                        display_max: number("displayMaximum"),
                    },
                ))
            })
            .collect();

        Some(resolved)
    }

    /// Perk references in source order; unknown perks are skipped
    pub fn resolve_perks(&self, record: &Record) -> Option<Vec<ResolvedPerk>> {
        let perks = record.array_at(&["perks"])?;

        let resolved = perks
            .iter()
            .filter_map(|perk| perk.get("perkHash").and_then(value_as_u64))
            .filter_map(|hash| {
                let definition = self.perks.get_hash(hash)?;
                Some(ResolvedPerk {
                    hash,
                    name: definition.display_name().unwrap_or_default().to_string(),
                    description: definition.description().unwrap_or_default().to_string(),
                    icon_url: definition.icon().map(|icon| self.absolute_url(icon)),
                    displayable: definition.bool_at(&["isDisplayable"]).unwrap_or(false),
                })
            })
            .collect();

        Some(resolved)
    }

    pub fn resolve_damage_type(&self, record: &Record) -> Option<ResolvedDamageType> {
        let hash = record
            .u64_at(&["defaultDamageTypeHash"])
            .filter(|hash| *hash != 0)?;
        let definition = self.damage_types.get_hash(hash)?;

        Some(ResolvedDamageType {
            name: definition.display_name().unwrap_or_default().to_string(),
            description: definition.description().unwrap_or_default().to_string(),
            ordinal: definition.i64_at(&["enumValue"]),
        })
    }

    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.asset_base_url, path.trim_start_matches('/'))
        }
    }
}

/// Socket entries with at least one populated id, in source order
pub fn resolve_sockets(record: &Record) -> Option<Vec<ResolvedSocket>> {
    let entries = record.array_at(&["sockets", "socketEntries"])?;
    let id = |entry: &Value, field: &str| {
        entry
            .get(field)
            .and_then(value_as_u64)
            .filter(|hash| *hash != 0)
    };

    let sockets = entries
        .iter()
        .map(|entry| ResolvedSocket {
            socket_type_id: id(entry, "socketTypeHash"),
            initial_plug_id: id(entry, "singleInitialItemHash"),
            reusable_plug_set_id: id(entry, "reusablePlugSetHash"),
        })
        .filter(|socket| {
            socket.socket_type_id.is_some()
                || socket.initial_plug_id.is_some()
                || socket.reusable_plug_set_id.is_some()
        })
        .collect();

    Some(sockets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use serde_json::json;

    const ASSETS: &str = "https://assets.test";

    fn table(value: Value) -> DefinitionTable {
        serde_json::from_value(value).unwrap()
    }

    fn stats() -> DefinitionTable {
        table(json!({
            "4043523819": { "displayProperties": { "name": "Impact", "description": "Damage" } }
        }))
    }

    fn perks() -> DefinitionTable {
        table(json!({
            "10": { "displayProperties": { "name": "Outlaw", "description": "Faster reload", "icon": "/common/outlaw.png" }, "isDisplayable": true },
            "20": { "displayProperties": { "name": "Hidden", "icon": "https://cdn.test/h.png" } }
        }))
    }

    fn damage_types() -> DefinitionTable {
        table(json!({
            "3373582085": { "displayProperties": { "name": "Kinetic", "description": "Physical" }, "enumValue": 1 }
        }))
    }

    fn weapon() -> Record {
        Record::from_value(json!({
            "hash": 3628991658u64,
            "displayProperties": { "name": "Vigilance Wing" },
            "stats": { "stats": {
                "4043523819": { "statHash": 4043523819u64, "value": 29, "minimum": 0, "maximum": 100, "displayMaximum": 100 },
                "555": { "statHash": 555, "value": 7 }
            } },
            "perks": [ { "perkHash": 20 }, { "perkHash": 999 }, { "perkHash": 10 } ],
            "sockets": { "socketEntries": [
                { "socketTypeHash": 1, "singleInitialItemHash": 2, "reusablePlugSetHash": 0 },
                { "socketTypeHash": 0, "singleInitialItemHash": 0 },
                { "reusablePlugSetHash": 3 }
            ] },
            "defaultDamageTypeHash": 3373582085u64
        }))
        .unwrap()
    }

    #[test]
    fn test_enrich_stats() {
        let (s, p, d) = (stats(), perks(), damage_types());
        let enricher = Enricher::new(&s, &p, &d, ASSETS);
        let record = weapon();

        let stats = enricher.resolve_stats(&record).unwrap();
        let impact = &stats["4043523819"];
        assert_eq!(impact.name, "Impact");
        assert_eq!(impact.value, Some(Number::from(29)));
        assert_eq!(impact.max, Some(Number::from(100)));
        assert_eq!(impact.display_max, Some(Number::from(100)));

        let unknown = &stats["555"];
        assert_eq!(unknown.name, "Unknown_555");
        assert_eq!(unknown.min, None);
    }

    #[test]
    fn test_enrich_perks_and_damage() {
        let (s, p, d) = (stats(), perks(), damage_types());
        let enricher = Enricher::new(&s, &p, &d, "https://assets.test/");
        let record = weapon();
        let item = ClassifiedItem::new("3628991658", Category::Weapon, &record);

        let enriched = enricher.enrich(item);

        let perks = enriched.resolved_perks.as_ref().unwrap();
        assert_eq!(perks.len(), 2);
        assert_eq!(perks[0].name, "Hidden");
        assert_eq!(perks[0].icon_url.as_deref(), Some("https://cdn.test/h.png"));
        assert!(!perks[0].displayable);
        assert_eq!(perks[1].name, "Outlaw");
        assert_eq!(
            perks[1].icon_url.as_deref(),
            Some("https://assets.test/common/outlaw.png")
        );
        assert!(perks[1].displayable);

        let sockets = enriched.resolved_sockets.as_ref().unwrap();
        assert_eq!(
            sockets,
            &vec![
                ResolvedSocket {
                    socket_type_id: Some(1),
                    initial_plug_id: Some(2),
                    reusable_plug_set_id: None,
                },
                ResolvedSocket {
                    socket_type_id: None,
                    initial_plug_id: None,
                    reusable_plug_set_id: Some(3),
                },
            ]
        );

        let damage = enriched.resolved_damage_type.as_ref().unwrap();
        assert_eq!(damage.name, "Kinetic");
        assert_eq!(damage.ordinal, Some(1));
    }

    #[test]
    fn test_sparse_record_enriches_to_nothing() {
        let (s, p, d) = (stats(), perks(), damage_types());
        let enricher = Enricher::new(&s, &p, &d, ASSETS);
        let record = Record::from_value(json!({ "defaultDamageTypeHash": 42 })).unwrap();

        let enriched = enricher.enrich(ClassifiedItem::new("1", Category::Aspect, &record));
        assert!(enriched.resolved_stats.is_none());
        assert!(enriched.resolved_perks.is_none());
        assert!(enriched.resolved_sockets.is_none());
        assert!(enriched.resolved_damage_type.is_none());
    }

    #[test]
    fn test_to_value_is_additive() {
        let (s, p, d) = (stats(), perks(), damage_types());
        let enricher = Enricher::new(&s, &p, &d, ASSETS);
        let mut record = weapon();
        if let Value::Object(mut fields) = serde_json::to_value(&record).unwrap() {
            fields.insert("category".to_string(), json!("source-owned"));
            record = Record::new(fields);
        }

        let enriched = enricher.enrich(ClassifiedItem::new("1", Category::Weapon, &record));
        let value = enriched.to_value();
        let overlay = value.as_object().unwrap();

        for (key, original) in record.fields() {
            assert_eq!(overlay.get(key), Some(original), "{} changed", key);
        }
        assert_eq!(overlay["category"], json!("source-owned"));
        assert_eq!(overlay["resolvedStats"]["4043523819"]["displayMax"], json!(100));
        assert_eq!(overlay["resolvedPerks"][1]["iconUrl"], json!("https://assets.test/common/outlaw.png"));
        assert_eq!(overlay["resolvedDamageType"]["name"], json!("Kinetic"));
        assert_eq!(overlay["resolvedSockets"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_enrichment_leaves_tables_untouched() {
        let (s, p, d) = (stats(), perks(), damage_types());
        let before = (s.clone(), p.clone(), d.clone());
        let record = weapon();

        let enricher = Enricher::new(&s, &p, &d, ASSETS);
        enricher.enrich(ClassifiedItem::new("1", Category::Weapon, &record));
        drop(enricher);

        assert_eq!((s, p, d), before);
    }

    #[test]
    fn test_stat_numbers_pass_through_unchanged() {
        let (s, p, d) = (stats(), perks(), damage_types());
        let enricher = Enricher::new(&s, &p, &d, ASSETS);
        let record = Record::from_value(json!({
            "stats": { "stats": {
                "4043523819": {
                    "statHash": 4043523819u64,
                    "value": 2.5,
                    "minimum": -3,
                    "maximum": 18446744073709551615u64,
                    "displayMaximum": "100"
                }
            } }
        }))
        .unwrap();

        let stats = enricher.resolve_stats(&record).unwrap();
        let impact = &stats["4043523819"];
        assert_eq!(impact.value.as_ref().and_then(Number::as_f64), Some(2.5));
        assert_eq!(impact.min, Some(Number::from(-3)));
        assert_eq!(impact.max, Some(Number::from(u64::MAX)));
        assert_eq!(impact.display_max, None);

        let item = enricher.enrich(ClassifiedItem::new("1", Category::Weapon, &record));
        let value = item.to_value();
        assert_eq!(value["resolvedStats"]["4043523819"]["value"], json!(2.5));
        assert_eq!(value["resolvedStats"]["4043523819"]["max"], json!(u64::MAX));
    }
}
