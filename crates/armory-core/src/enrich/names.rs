//! Name resolution chain: definition table, then built-in names, then a
//! synthesized placeholder.

use crate::definition::DefinitionTable;

/// A resolved display name and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub description: String,
}

impl ResolvedName {
    pub fn placeholder(id: u64) -> Self {
        Self {
            name: format!("Unknown_{}", id),
            description: String::new(),
        }
    }
}

/// One link of the resolver chain
pub trait NameSource {
    fn resolve(&self, id: u64) -> Option<ResolvedName>;
}

/// Names taken from a definition table's display properties
pub struct TableNames<'t>(pub &'t DefinitionTable);

impl NameSource for TableNames<'_> {
    fn resolve(&self, id: u64) -> Option<ResolvedName> {
        let record = self.0.get_hash(id)?;
        let name = record.display_name()?;
        Some(ResolvedName {
            name: name.to_string(),
            description: record.description().unwrap_or_default().to_string(),
        })
    }
}

/// Stat hash -> name for the stats that show up on weapons and armor
const BUILTIN_STAT_NAMES: &[(u64, &str)] = &[
    (4284893193, "Rounds Per Minute"),
    (4043523819, "Impact"),
    (1240592695, "Range"),
    (155624089, "Stability"),
    (943549884, "Handling"),
    (4188031367, "Reload Speed"),
    (2715839340, "Recoil Direction"),
    (3555269338, "Zoom"),
    (1345609583, "Aim Assistance"),
    (3871231066, "Magazine"),
    (1931675084, "Inventory Size"),
    (2961396640, "Charge Time"),
    (447667954, "Draw Time"),
    (1591432999, "Accuracy"),
    (3614673599, "Blast Radius"),
    (2523465841, "Velocity"),
    (2996146975, "Mobility"),
    (392767087, "Resilience"),
    (1943323491, "Recovery"),
    (1735777505, "Discipline"),
    (144602215, "Intellect"),
    (4244567218, "Strength"),
];

/// Hardcoded stat names for when the stat table is missing an entry
pub struct BuiltinStatNames;

impl NameSource for BuiltinStatNames {
    fn resolve(&self, id: u64) -> Option<ResolvedName> {
        BUILTIN_STAT_NAMES
            .iter()
            .find(|(hash, _)| *hash == id)
            .map(|(_, name)| ResolvedName {
                name: name.to_string(),
                description: String::new(),
            })
    }
}

/// Ordered list of name sources; the first hit wins
#[derive(Default)]
pub struct NameResolver<'t> {
    sources: Vec<Box<dyn NameSource + 't>>,
}

impl<'t> NameResolver<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stat table, then built-in stat names
    pub fn for_stats(stats: &'t DefinitionTable) -> Self {
        Self::new()
            .with_source(TableNames(stats))
            .with_source(BuiltinStatNames)
    }

    pub fn with_source(mut self, source: impl NameSource + 't) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// First successful lookup, or an `Unknown_<id>` placeholder
    pub fn resolve(&self, id: u64) -> ResolvedName {
        self.sources
            .iter()
            .find_map(|source| source.resolve(id))
            .unwrap_or_else(|| ResolvedName::placeholder(id))
    }
}
