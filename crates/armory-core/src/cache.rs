//! In-memory definition cache.
//!
//! Holds the catalog index and every downloaded table for the lifetime of the
//! cache object, plus state derived from those tables (the selected current
//! season and the season ordinal map). Nothing is persisted between runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::definition::{CatalogIndex, DefinitionTable};
use crate::error::Result;
use crate::network::CatalogGateway;
use crate::season::{SeasonOrdinals, SeasonRecord};

/// Per-table slot; holding its lock while fetching keeps one download in flight per name
type TableSlot = Arc<Mutex<Option<Arc<DefinitionTable>>>>;

/// State computed from cached tables, cleared together with them
#[derive(Debug, Default)]
pub(crate) struct DerivedState {
    pub current_season: Option<SeasonRecord>,
    pub season_ordinals: Option<Arc<SeasonOrdinals>>,
}

pub struct DefinitionCache<G> {
    gateway: G,
    locale: String,
    index: Mutex<Option<Arc<CatalogIndex>>>,
    tables: Mutex<HashMap<String, TableSlot>>,
    derived: Mutex<DerivedState>,
}

impl<G: CatalogGateway> DefinitionCache<G> {
    pub fn new(gateway: G, locale: impl Into<String>) -> Self {
        Self {
            gateway,
            locale: locale.into(),
            index: Mutex::new(None),
            tables: Mutex::new(HashMap::new()),
            derived: Mutex::new(DerivedState::default()),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Catalog index, fetched on first use
    pub fn index(&self) -> Result<Arc<CatalogIndex>> {
        let mut index = lock(&self.index);
        if let Some(cached) = index.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let fetched = Arc::new(self.gateway.fetch_index()?);
        *index = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Definition table by name, fetched on first use.
    ///
    /// Failures are not cached; the next call tries again.
    pub fn table(&self, name: &str) -> Result<Arc<DefinitionTable>> {
        let slot = {
            let mut tables = lock(&self.tables);
            Arc::clone(tables.entry(name.to_string()).or_default())
        };

        let mut entry = lock(&slot);
        if let Some(table) = entry.as_ref() {
            debug!("Cache hit for {}", name);
            return Ok(Arc::clone(table));
        }

        let index = self.index()?;
        let path = index.resolve(&self.locale, name)?;

        info!("Fetching {} ({})", name, self.locale);
        let table = Arc::new(self.gateway.fetch_table(path)?);
        info!("Loaded {} records from {}", table.len(), name);

        *entry = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Whether a table is currently cached
    pub fn contains(&self, name: &str) -> bool {
        let slot = lock(&self.tables).get(name).cloned();
        slot.is_some_and(|slot| lock(&slot).is_some())
    }

    /// Drop the index, all tables and every derived value
    pub fn clear(&self) {
        *lock(&self.index) = None;
        lock(&self.tables).clear();
        *lock(&self.derived) = DerivedState::default();
        debug!("Definition cache cleared");
    }

    pub(crate) fn derived(&self) -> MutexGuard<'_, DerivedState> {
        lock(&self.derived)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::definition::{CatalogIndex, DefinitionTable};
    use crate::error::{Error, Result};
    use crate::network::CatalogGateway;

    /// In-memory gateway that counts fetches
    #[derive(Default)]
    pub struct FakeGateway {
        tables: HashMap<String, DefinitionTable>,
        pub index_fetches: AtomicUsize,
        fetches: Mutex<HashMap<String, usize>>,
        pub fail_tables: bool,
        pub delay: Option<Duration>,
    }

    impl FakeGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_table(mut self, name: &str, table: DefinitionTable) -> Self {
            self.tables.insert(name.to_string(), table);
            self
        }

        pub fn fetches(&self, name: &str) -> usize {
            let path = format!("/content/en/{}.json", name);
            self.fetches.lock().unwrap().get(&path).copied().unwrap_or(0)
        }
    }

    impl CatalogGateway for FakeGateway {
        fn fetch_index(&self) -> Result<CatalogIndex> {
            self.index_fetches.fetch_add(1, Ordering::SeqCst);
            let index = self
                .tables
                .keys()
                .fold(CatalogIndex::new("test"), |index, name| {
                    index.with_path("en", name, format!("/content/en/{}.json", name))
                });
            Ok(index)
        }

        fn fetch_table(&self, path: &str) -> Result<DefinitionTable> {
            *self
                .fetches
                .lock()
                .unwrap()
                .entry(path.to_string())
                .or_default() += 1;

            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            if self.fail_tables {
                return Err(Error::NetworkError("HTTP 503".to_string()));
            }

            let name = path
                .trim_start_matches("/content/en/")
                .trim_end_matches(".json");
            Ok(self.tables.get(name).cloned().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeGateway;
    use super::*;
    use crate::definition::{Record, tables};
    use crate::error::Error;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn stat_table() -> DefinitionTable {
        let mut table = DefinitionTable::new();
        table.insert("4284893193", Record::default());
        table
    }

    #[test]
    fn test_table_fetched_once() {
        let gateway = FakeGateway::new().with_table(tables::STATS, stat_table());
        let cache = DefinitionCache::new(gateway, "en");

        let first = cache.table(tables::STATS).unwrap();
        let second = cache.table(tables::STATS).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.gateway().fetches(tables::STATS), 1);
        assert_eq!(cache.gateway().index_fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_forces_refetch() {
        let gateway = FakeGateway::new().with_table(tables::STATS, stat_table());
        let cache = DefinitionCache::new(gateway, "en");

        cache.table(tables::STATS).unwrap();
        assert!(cache.contains(tables::STATS));

        cache.clear();
        assert!(!cache.contains(tables::STATS));

        cache.table(tables::STATS).unwrap();
        assert_eq!(cache.gateway().fetches(tables::STATS), 2);
        assert_eq!(cache.gateway().index_fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unknown_table_is_not_found() {
        let cache = DefinitionCache::new(FakeGateway::new(), "en");
        let err = cache.table(tables::SEASONS).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_locale_is_not_found() {
        let gateway = FakeGateway::new().with_table(tables::STATS, stat_table());
        let cache = DefinitionCache::new(gateway, "ja");
        assert!(matches!(
            cache.table(tables::STATS),
            Err(Error::LocaleNotFound(_))
        ));
    }

    #[test]
    fn test_failed_fetch_is_not_cached() {
        let mut gateway = FakeGateway::new().with_table(tables::STATS, stat_table());
        gateway.fail_tables = true;
        let cache = DefinitionCache::new(gateway, "en");

        assert!(matches!(
            cache.table(tables::STATS),
            Err(Error::NetworkError(_))
        ));
        assert!(!cache.contains(tables::STATS));
        assert!(cache.table(tables::STATS).is_err());
        assert_eq!(cache.gateway().fetches(tables::STATS), 2);
    }

    #[test]
    fn test_concurrent_readers_share_one_fetch() {
        let mut gateway = FakeGateway::new().with_table(tables::STATS, stat_table());
        gateway.delay = Some(Duration::from_millis(50));
        let cache = DefinitionCache::new(gateway, "en");

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let table = cache.table(tables::STATS).unwrap();
                    assert_eq!(table.len(), 1);
                });
            }
        });

        assert_eq!(cache.gateway().fetches(tables::STATS), 1);
    }
}
