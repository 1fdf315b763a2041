//! Current-season resolution.
//!
//! Season end dates in the source data are sometimes missing or stale, so the
//! current season is picked in two tiers: the highest-ordinal season whose
//! window contains `now`, falling back to the highest-ordinal season that has
//! started at all.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::DefinitionCache;
use crate::definition::{Record, tables};
use crate::error::{Error, Result};
use crate::network::CatalogGateway;

/// One entry of the season table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonRecord {
    pub id: String,
    pub ordinal: u32,
    pub name: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl SeasonRecord {
    /// Build from a season-table record; `None` when it carries no season number
    pub fn from_record(id: &str, record: &Record) -> Option<Self> {
        let ordinal = u32::try_from(record.u64_at(&["seasonNumber"])?).ok()?;
        let name = record
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Season {}", ordinal));

        Some(Self {
            id: id.to_string(),
            ordinal,
            name,
            start: parse_date(record.str_at(&["startDate"])),
            end: parse_date(record.str_at(&["endDate"])),
        })
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| start <= now)
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end.is_some_and(|end| end <= now)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.has_started(now) && !self.has_ended(now)
    }
}

fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(e) => {
            warn!("Ignoring unparseable season date {:?}: {}", raw, e);
            None
        }
    }
}

/// Season identifier -> season ordinal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonOrdinals {
    ordinals: HashMap<String, u32>,
}

impl SeasonOrdinals {
    pub fn get(&self, season_id: &str) -> Option<u32> {
        self.ordinals.get(season_id).copied()
    }

    pub fn get_hash(&self, season_hash: u64) -> Option<u32> {
        self.get(&season_hash.to_string())
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}

impl FromIterator<(String, u32)> for SeasonOrdinals {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            ordinals: iter.into_iter().collect(),
        }
    }
}

/// Pick the current season from a list of season records.
///
/// Ties on ordinal go to the later start date (an absent start ranks lowest),
/// then to the greater identifier.
pub fn select_current_season(seasons: &[SeasonRecord], now: DateTime<Utc>) -> Result<SeasonRecord> {
    let numbered: Vec<&SeasonRecord> = seasons.iter().filter(|s| s.ordinal > 0).collect();

    if let Some(season) = latest(numbered.iter().copied().filter(|s| s.is_active(now))) {
        return Ok(season.clone());
    }

    if let Some(season) = latest(numbered.iter().copied().filter(|s| s.has_started(now))) {
        debug!(
            "No season window contains {}, falling back to latest started season {}",
            now, season.ordinal
        );
        return Ok(season.clone());
    }

    Err(Error::SeasonResolution(format!(
        "none of {} numbered seasons has started as of {}",
        numbered.len(),
        now.to_rfc3339()
    )))
}

fn latest<'a>(seasons: impl Iterator<Item = &'a SeasonRecord>) -> Option<&'a SeasonRecord> {
    seasons.max_by(|a, b| {
        a.ordinal
            .cmp(&b.ordinal)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.id.cmp(&b.id))
    })
}

/// Resolves season information from the season table held by a cache
pub struct SeasonResolver<'a, G> {
    cache: &'a DefinitionCache<G>,
    now: DateTime<Utc>,
}

impl<'a, G: CatalogGateway> SeasonResolver<'a, G> {
    pub fn new(cache: &'a DefinitionCache<G>) -> Self {
        Self {
            cache,
            now: Utc::now(),
        }
    }

    /// Evaluate season windows at a fixed instant instead of the current time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// All season records carrying a season number
    pub fn seasons(&self) -> Result<Vec<SeasonRecord>> {
        let table = self.cache.table(tables::SEASONS)?;
        Ok(table
            .iter()
            .filter_map(|(id, record)| SeasonRecord::from_record(id, record))
            .collect())
    }

    /// Current season, selected once and kept until the cache is cleared
    pub fn current_season(&self) -> Result<SeasonRecord> {
        if let Some(season) = self.cache.derived().current_season.clone() {
            return Ok(season);
        }

        let season = select_current_season(&self.seasons()?, self.now)?;
        info!("Current season: {} ({})", season.name, season.ordinal);

        self.cache.derived().current_season = Some(season.clone());
        Ok(season)
    }

    /// Season identifier -> ordinal map, built once per cache lifetime
    pub fn season_ordinals(&self) -> Result<Arc<SeasonOrdinals>> {
        if let Some(ordinals) = self.cache.derived().season_ordinals.clone() {
            return Ok(ordinals);
        }

        let ordinals: Arc<SeasonOrdinals> = Arc::new(
            self.seasons()?
                .into_iter()
                .map(|season| (season.id, season.ordinal))
                .collect(),
        );
        debug!("Built season ordinal map with {} entries", ordinals.len());

        self.cache.derived().season_ordinals = Some(Arc::clone(&ordinals));
        Ok(ordinals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testing::FakeGateway;
    use crate::definition::DefinitionTable;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 17, 0, 0).unwrap()
    }

    fn season(id: &str, ordinal: u32, start: Option<i64>, end: Option<i64>) -> SeasonRecord {
        SeasonRecord {
            id: id.to_string(),
            ordinal,
            name: format!("Season {}", ordinal),
            start: start.map(|days| now() + Duration::days(days)),
            end: end.map(|days| now() + Duration::days(days)),
        }
    }

    #[test]
    fn test_open_ended_season_beats_ended_one() {
        let seasons = [
            season("a", 1, Some(-10), Some(-5)),
            season("b", 2, Some(-5), None),
        ];
        assert_eq!(select_current_season(&seasons, now()).unwrap().ordinal, 2);
    }

    #[test]
    fn test_active_season_beats_higher_future_season() {
        let seasons = [
            season("a", 22, Some(-30), Some(30)),
            season("b", 23, Some(30), Some(90)),
        ];
        assert_eq!(select_current_season(&seasons, now()).unwrap().ordinal, 22);
    }

    #[test]
    fn test_fallback_to_latest_started_when_all_ended() {
        let seasons = [
            season("a", 1, Some(-30), Some(-20)),
            season("b", 3, Some(-10), Some(-1)),
            season("c", 2, Some(-20), Some(-10)),
        ];
        let current = select_current_season(&seasons, now()).unwrap();
        assert_eq!(current.ordinal, 3);
        assert_eq!(current.id, "b");
    }

    #[test]
    fn test_no_started_season_is_an_error() {
        let seasons = [season("a", 1, Some(5), None), season("z", 0, None, None)];
        assert!(matches!(
            select_current_season(&seasons, now()),
            Err(Error::SeasonResolution(_))
        ));
        assert!(select_current_season(&[], now()).is_err());
    }

    #[test]
    fn test_ordinal_zero_is_ignored() {
        let seasons = [season("a", 0, None, None), season("b", 4, Some(-1), None)];
        assert_eq!(select_current_season(&seasons, now()).unwrap().id, "b");
    }

    #[test]
    fn test_tie_broken_by_latest_start() {
        let seasons = [
            season("late", 7, Some(-2), None),
            season("early", 7, Some(-9), None),
            season("undated", 7, None, None),
        ];
        assert_eq!(select_current_season(&seasons, now()).unwrap().id, "late");
    }

    #[test]
    fn test_season_window_boundaries() {
        let s = season("a", 1, Some(0), Some(1));
        assert!(s.is_active(now()));
        assert!(!s.is_active(now() + Duration::days(1)));
        assert!(s.has_started(now()));
        assert!(!s.has_started(now() - Duration::seconds(1)));
    }

    #[test]
    fn test_from_record() {
        let record = Record::from_value(json!({
            "hash": 2758726568u64,
            "seasonNumber": 23,
            "displayProperties": { "name": "Season of the Wish" },
            "startDate": "2023-11-28T17:00:00Z",
            "endDate": "not a date"
        }))
        .unwrap();

        let season = SeasonRecord::from_record("2758726568", &record).unwrap();
        assert_eq!(season.ordinal, 23);
        assert_eq!(season.name, "Season of the Wish");
        assert_eq!(
            season.start,
            Some(Utc.with_ymd_and_hms(2023, 11, 28, 17, 0, 0).unwrap())
        );
        assert_eq!(season.end, None);

        assert!(SeasonRecord::from_record("1", &Record::default()).is_none());
    }

    fn season_table() -> DefinitionTable {
        serde_json::from_value(json!({
            "100": { "seasonNumber": 1, "startDate": "2024-01-01T00:00:00Z", "endDate": "2024-03-01T00:00:00Z" },
            "200": { "seasonNumber": 2, "startDate": "2024-03-01T00:00:00Z" },
            "300": { "seasonNumber": 3, "startDate": "2030-01-01T00:00:00Z" },
            "999": { "displayProperties": { "name": "Not a season" } }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolver_memoizes_until_clear() {
        let gateway = FakeGateway::new().with_table(tables::SEASONS, season_table());
        let cache = DefinitionCache::new(gateway, "en");
        let resolver = SeasonResolver::new(&cache).at(now());

        let current = resolver.current_season().unwrap();
        assert_eq!(current.id, "200");
        assert_eq!(current.name, "Season 2");

        resolver.current_season().unwrap();
        let ordinals = resolver.season_ordinals().unwrap();
        assert_eq!(ordinals.len(), 3);
        assert_eq!(ordinals.get("300"), Some(3));
        assert_eq!(ordinals.get_hash(100), Some(1));
        assert_eq!(cache.gateway().fetches(tables::SEASONS), 1);

        cache.clear();
        resolver.current_season().unwrap();
        assert_eq!(cache.gateway().fetches(tables::SEASONS), 2);
    }
}
