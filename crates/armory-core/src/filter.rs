//! Usability and season-window filters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::debug;

use crate::classify::ClassifiedItem;
use crate::definition::Record;
use crate::season::{SeasonOrdinals, SeasonRecord};

/// How season-bounded items are compared against the current season
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SeasonWindow {
    /// Only items introduced in the current season
    Exact,
    /// Evergreen items, items of unknown season, and items up to the current season
    #[default]
    UpToCurrent,
}

/// Whether a record is a usable, named, non-placeholder definition
pub fn is_usable(record: &Record, allow_non_equippable: bool) -> bool {
    if record.bool_at(&["redacted"]) == Some(true) {
        return false;
    }
    if record.display_name().is_none() {
        return false;
    }
    allow_non_equippable || record.bool_at(&["equippable"]) != Some(false)
}

/// Drop redacted, unnamed and (unless allowed) non-equippable items
pub fn filter_usable<'a>(
    items: Vec<ClassifiedItem<'a>>,
    allow_non_equippable: bool,
) -> Vec<ClassifiedItem<'a>> {
    let before = items.len();
    let kept: Vec<ClassifiedItem<'a>> = items
        .into_iter()
        .filter(|item| is_usable(item.record, allow_non_equippable))
        .collect();

    debug!("Usability filter kept {} of {} items", kept.len(), before);
    kept
}

/// Whether a record falls inside the season window
pub fn in_season_window(
    record: &Record,
    current: &SeasonRecord,
    ordinals: &SeasonOrdinals,
    mode: SeasonWindow,
) -> bool {
    let season_hash = record.u64_at(&["seasonHash"]).filter(|hash| *hash != 0);

    match mode {
        SeasonWindow::Exact => season_hash.is_some_and(|hash| hash.to_string() == current.id),
        SeasonWindow::UpToCurrent => match season_hash {
            None => true,
            Some(hash) => ordinals
                .get_hash(hash)
                .is_none_or(|ordinal| ordinal <= current.ordinal),
        },
    }
}

/// Bound items to the season window around `current`
pub fn filter_by_season_window<'a>(
    items: Vec<ClassifiedItem<'a>>,
    current: &SeasonRecord,
    ordinals: &SeasonOrdinals,
    mode: SeasonWindow,
) -> Vec<ClassifiedItem<'a>> {
    let before = items.len();
    let kept: Vec<ClassifiedItem<'a>> = items
        .into_iter()
        .filter(|item| in_season_window(item.record, current, ordinals, mode))
        .collect();

    debug!(
        "Season window ({}, season {}) kept {} of {} items",
        mode,
        current.ordinal,
        kept.len(),
        before
    );
    kept
}
