//! Definition data model.
//!
//! - **Record**: one loosely-typed definition document with safe accessors
//! - **DefinitionTable**: identifier -> record mapping for one entity kind
//! - **CatalogIndex**: locale/table -> resource path directory

mod index;
mod record;
mod table;

pub use index::CatalogIndex;
pub use record::Record;
pub(crate) use record::value_as_u64;
pub use table::DefinitionTable;

/// Well-known definition table names
pub mod tables {
    pub const ITEMS: &str = "DestinyInventoryItemDefinition";
    pub const STATS: &str = "DestinyStatDefinition";
    pub const PERKS: &str = "DestinySandboxPerkDefinition";
    pub const DAMAGE_TYPES: &str = "DestinyDamageTypeDefinition";
    pub const SEASONS: &str = "DestinySeasonDefinition";
}
