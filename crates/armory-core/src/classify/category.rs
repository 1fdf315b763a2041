use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::definition::Record;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Category {
    Weapon,
    Armor,
    ArmorMod,
    Subclass,
    Aspect,
    Fragment,
    Ability,
    ArtifactMod,
    ChampionMod,
}

impl Category {
    /// Kebab-case tag (e.g., "armor-mod")
    pub fn tag(&self) -> &'static str {
        self.into()
    }

    /// Human-readable label used in exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::ArmorMod => "Armor Mod",
            Self::Subclass => "Subclass",
            Self::Aspect => "Aspect",
            Self::Fragment => "Fragment",
            Self::Ability => "Ability",
            Self::ArtifactMod => "Artifact Mod",
            Self::ChampionMod => "Champion Mod",
        }
    }

    /// Plug categories are socketed sub-items. The source data routinely marks
    /// them non-equippable even though they are usable.
    pub fn is_plug(&self) -> bool {
        matches!(
            self,
            Self::ArmorMod
                | Self::Aspect
                | Self::Fragment
                | Self::Ability
                | Self::ArtifactMod
                | Self::ChampionMod
        )
    }

    /// Categories that rotate per season and are bounded by the season window
    pub fn is_season_bounded(&self) -> bool {
        matches!(self, Self::ArtifactMod | Self::ChampionMod)
    }

    /// Gear categories carry per-item stat blocks worth resolving
    pub fn has_stats(&self) -> bool {
        matches!(self, Self::Weapon | Self::Armor)
    }
}

/// A record viewed as a member of one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedItem<'a> {
    pub id: &'a str,
    pub category: Category,
    pub record: &'a Record,
}

impl<'a> ClassifiedItem<'a> {
    pub fn new(id: &'a str, category: Category, record: &'a Record) -> Self {
        Self {
            id,
            category,
            record,
        }
    }

    pub fn name(&self) -> &'a str {
        self.record.display_name().unwrap_or_default()
    }
}
