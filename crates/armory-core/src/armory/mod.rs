//! Pipeline orchestration.
//!
//! `Armory` ties the pieces together for one category at a time:
//! classify -> usability filter -> season window (seasonal categories only)
//! -> enrichment.
//!
//! ## Example
//!
//! ```ignore
//! use armory_core::{Armory, ArmoryConfig, Category, DefinitionCache, HttpGateway};
//!
//! let cache = DefinitionCache::new(HttpGateway::new(api_key), "en");
//! let armory = Armory::with_config(cache, ArmoryConfig::builder().build());
//!
//! let data = armory.load()?;
//! let weapons = armory.items(&data, Category::Weapon)?;
//! ```

mod config;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;
use tracing::info;

use crate::cache::DefinitionCache;
use crate::classify::{Category, Classifier};
use crate::definition::{DefinitionTable, tables};
use crate::enrich::{EnrichedItem, Enricher};
use crate::error::Result;
use crate::filter::{filter_by_season_window, filter_usable};
use crate::network::CatalogGateway;
use crate::season::{SeasonOrdinals, SeasonRecord, SeasonResolver};

pub use config::{ArmoryConfig, ArmoryConfigBuilder, DEFAULT_ASSET_BASE_URL, DEFAULT_LOCALE};

/// Every table the pipeline reads, fetched through the cache
#[derive(Debug, Clone)]
pub struct CatalogData {
    pub items: Arc<DefinitionTable>,
    pub stats: Arc<DefinitionTable>,
    pub perks: Arc<DefinitionTable>,
    pub damage_types: Arc<DefinitionTable>,
}

impl CatalogData {
    pub fn load<G: CatalogGateway>(cache: &DefinitionCache<G>) -> Result<Self> {
        Ok(Self {
            items: cache.table(tables::ITEMS)?,
            stats: cache.table(tables::STATS)?,
            perks: cache.table(tables::PERKS)?,
            damage_types: cache.table(tables::DAMAGE_TYPES)?,
        })
    }

    pub fn enricher(&self, asset_base_url: &str) -> Enricher<'_> {
        Enricher::new(&self.stats, &self.perks, &self.damage_types, asset_base_url)
    }
}

pub struct Armory<G> {
    cache: DefinitionCache<G>,
    config: ArmoryConfig,
    classifier: Classifier,
    now: Option<DateTime<Utc>>,
}

impl<G: CatalogGateway> Armory<G> {
    pub fn new(cache: DefinitionCache<G>) -> Self {
        Self::with_config(cache, ArmoryConfig::default())
    }

    /// Pipeline over a fresh cache for the configured locale
    pub fn connect(gateway: G, config: ArmoryConfig) -> Self {
        let cache = DefinitionCache::new(gateway, config.locale.clone());
        Self::with_config(cache, config)
    }

    /// The cache's locale replaces `config.locale`
    pub fn with_config(cache: DefinitionCache<G>, mut config: ArmoryConfig) -> Self {
        config.locale = cache.locale().to_string();
        let classifier = Classifier::new(config.vocabulary.clone(), config.armor_policy);
        Self {
            cache,
            config,
            classifier,
            now: None,
        }
    }

    /// Resolve seasons at a fixed instant instead of the current time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &ArmoryConfig {
        &self.config
    }

    pub fn cache(&self) -> &DefinitionCache<G> {
        &self.cache
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn resolver(&self) -> SeasonResolver<'_, G> {
        let resolver = SeasonResolver::new(&self.cache);
        match self.now {
            Some(now) => resolver.at(now),
            None => resolver,
        }
    }

    pub fn current_season(&self) -> Result<SeasonRecord> {
        self.resolver().current_season()
    }

    pub fn season_ordinals(&self) -> Result<Arc<SeasonOrdinals>> {
        self.resolver().season_ordinals()
    }

    pub fn load(&self) -> Result<CatalogData> {
        CatalogData::load(&self.cache)
    }

    /// Classified, filtered and enriched items of one category
    pub fn items<'d>(
        &self,
        data: &'d CatalogData,
        category: Category,
    ) -> Result<Vec<EnrichedItem<'d>>> {
        let classified = self.classifier.bucket(&data.items, category);
        let usable = filter_usable(classified, category.is_plug());

        let bounded = if category.is_season_bounded() {
            let current = self.current_season()?;
            let ordinals = self.season_ordinals()?;
            filter_by_season_window(usable, &current, &ordinals, self.config.season_window)
        } else {
            usable
        };

        let enricher = data.enricher(&self.config.asset_base_url);
        let items: Vec<EnrichedItem<'d>> = bounded
            .into_iter()
            .map(|item| {
                if category.has_stats() {
                    enricher.enrich(item)
                } else {
                    enricher.enrich_perks_and_damage(EnrichedItem::from(item))
                }
            })
            .collect();

        info!("{}: {} items", category.label(), items.len());
        Ok(items)
    }

    /// Item count per category after filtering
    pub fn summary(&self, data: &CatalogData) -> Result<Vec<(Category, usize)>> {
        Category::iter()
            .map(|category| -> Result<(Category, usize)> {
                Ok((category, self.items(data, category)?.len()))
            })
            .collect()
    }

    /// Forget every cached table and derived season state
    pub fn clear(&self) {
        self.cache.clear();
    }
}
