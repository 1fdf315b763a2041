use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single definition record.
///
/// Source records are large, heterogeneous documents where almost every field
/// is optional. All accessors walk a key path and return `None` instead of
/// failing when a segment is missing or has an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value, returning `None` for non-objects
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Look up a value by key path
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    pub fn has(&self, path: &[&str]) -> bool {
        self.get(path).is_some_and(|v| !v.is_null())
    }

    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.get(path)?.as_str()
    }

    /// Lower-cased copy of a string field, empty when absent
    pub fn lower_at(&self, path: &[&str]) -> String {
        self.str_at(path).unwrap_or_default().to_lowercase()
    }

    /// Unsigned integer field. Numeric strings are accepted since identifiers
    /// appear both as numbers and as object keys.
    pub fn u64_at(&self, path: &[&str]) -> Option<u64> {
        value_as_u64(self.get(path)?)
    }

    pub fn i64_at(&self, path: &[&str]) -> Option<i64> {
        let value = self.get(path)?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
    }

    pub fn bool_at(&self, path: &[&str]) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    pub fn array_at(&self, path: &[&str]) -> Option<&Vec<Value>> {
        self.get(path)?.as_array()
    }

    pub fn object_at(&self, path: &[&str]) -> Option<&Map<String, Value>> {
        self.get(path)?.as_object()
    }

    /// Numeric identifiers stored in an array field; non-numeric entries are skipped
    pub fn hash_list(&self, path: &[&str]) -> Vec<u64> {
        self.array_at(path)
            .map(|values| values.iter().filter_map(value_as_u64).collect())
            .unwrap_or_default()
    }

    /// Display name, treating an empty string as absent
    pub fn display_name(&self) -> Option<&str> {
        self.str_at(&["displayProperties", "name"])
            .filter(|name| !name.trim().is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.str_at(&["displayProperties", "description"])
            .filter(|desc| !desc.is_empty())
    }

    pub fn icon(&self) -> Option<&str> {
        self.str_at(&["displayProperties", "icon"])
            .filter(|icon| !icon.is_empty())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

pub(crate) fn value_as_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
