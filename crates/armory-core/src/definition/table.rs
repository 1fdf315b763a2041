use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Record;

/// Record identifier. Numeric ids order by value, before any non-numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
struct DefinitionId(String);

impl DefinitionId {
    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for DefinitionId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DefinitionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Flat table of definition records keyed by their numeric identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionTable {
    records: BTreeMap<DefinitionId, Record>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(&DefinitionId(id.to_string()))
    }

    /// Look up a record by numeric hash
    pub fn get_hash(&self, hash: u64) -> Option<&Record> {
        self.records.get(&DefinitionId(hash.to_string()))
    }

    pub fn insert(&mut self, id: impl Into<String>, record: Record) {
        self.records.insert(DefinitionId(id.into()), record);
    }

    /// Iterate records in numeric identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(id, record)| (id.0.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, Record)> for DefinitionTable {
    fn from_iter<I: IntoIterator<Item = (String, Record)>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|(id, record)| (DefinitionId(id), record))
                .collect(),
        }
    }
}
