//! Prelude module for convenient imports
//!
//! ```ignore
//! use armory_core::prelude::*;
//! ```

// Pipeline
pub use crate::armory::{Armory, ArmoryConfig, CatalogData};
pub use crate::cache::DefinitionCache;

// Error handling
pub use crate::error::{Error, Result};

// Catalog data
pub use crate::classify::Category;
pub use crate::definition::{DefinitionTable, Record};
pub use crate::enrich::EnrichedItem;
pub use crate::season::SeasonRecord;

// Seams
pub use crate::export::{ExportFormat, ExportKind};
pub use crate::network::CatalogGateway;
#[cfg(feature = "api")]
pub use crate::network::HttpGateway;
