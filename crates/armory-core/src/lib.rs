//! # armory-core
//!
//! Core library for the Armory item catalog exporter.
//!
//! This crate provides:
//! - Definition tables and the locale-aware catalog index
//! - A gateway abstraction over the remote catalog service
//! - Per-table caching with coalesced concurrent fetches
//! - Current season resolution and season windowing
//! - Rule-based item classification, usability filtering and enrichment
//! - TSV, CSV and NDJSON export
//!
//! ## Feature Flags
//!
//! - `api`: Enables `HttpGateway`, the blocking HTTP client for the remote
//!   catalog service. Without it, callers supply their own `CatalogGateway`.

pub mod armory;
pub mod cache;
pub mod classify;
pub mod definition;
pub mod enrich;
pub mod error;
pub mod export;
pub mod filter;
pub mod network;
pub mod prelude;
pub mod season;

pub use armory::{
    Armory, ArmoryConfig, ArmoryConfigBuilder, CatalogData, DEFAULT_ASSET_BASE_URL,
    DEFAULT_LOCALE,
};
pub use cache::DefinitionCache;
pub use classify::{
    ARMOR_CATEGORY_HASH, ARMOR_MOD_CATEGORY_HASH, ArmorPolicy, Category, ClassifiedItem,
    Classifier, Rule, SUBCLASS_CATEGORY_HASH, Vocabulary, WEAPON_CATEGORY_HASH,
};
pub use definition::{CatalogIndex, DefinitionTable, Record, tables};
pub use enrich::{
    EnrichedItem, Enricher, NameResolver, ResolvedDamageType, ResolvedName, ResolvedPerk,
    ResolvedSocket, ResolvedStat, resolve_sockets,
};
pub use error::{Error, Result};
pub use export::{
    CsvExporter, ExportFormat, ExportKind, JsonExporter, TsvExporter, export_items,
};
pub use filter::{SeasonWindow, filter_by_season_window, filter_usable, in_season_window, is_usable};
pub use network::CatalogGateway;
#[cfg(feature = "api")]
pub use network::{DEFAULT_BASE_URL, HttpGateway};
pub use season::{SeasonOrdinals, SeasonRecord, SeasonResolver, select_current_season};
