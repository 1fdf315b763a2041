use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Item category hash of weapons
pub const WEAPON_CATEGORY_HASH: u64 = 1;
/// Item category hash of armor pieces
pub const ARMOR_CATEGORY_HASH: u64 = 20;
/// Item category hash of subclasses
pub const SUBCLASS_CATEGORY_HASH: u64 = 50;
/// Item category hash of armor mods
pub const ARMOR_MOD_CATEGORY_HASH: u64 = 4104513227;

/// How the Armor 2.0 signal (energy capacity, known plug sets, mod tokens)
/// is applied to the armor and armor-mod rules.
///
/// Recent content may omit the energy block entirely, so the signal is not
/// required unless asked for.
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
pub enum ArmorPolicy {
    /// Category membership alone decides
    #[default]
    Ignore,
    /// Records must also carry an Armor 2.0 signal
    Require,
}

/// Constants and tokens the classification rules match against.
///
/// The vocabulary belongs to the remote data source and changes between
/// content releases, which is why it is data rather than code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub weapon_category: u64,
    pub armor_category: u64,
    pub armor_mod_category: u64,
    pub subclass_category: u64,
    /// Reusable plug sets only found on Armor 2.0 sockets.
    ///
    /// Empty by default: the ids change with content releases, so callers
    /// that use `ArmorPolicy::Require` and want socket-based detection must
    /// supply them. Without the list only `energy.energyCapacity` marks armor
    /// as Armor 2.0.
    pub armor2_plug_sets: Vec<u64>,
    /// Plug-category identifier fragments of Armor 2.0 mods
    pub armor2_mod_tokens: Vec<String>,
    /// Plug-category identifier fragments of subclass abilities
    pub ability_tokens: Vec<String>,
    /// Phrases naming champion counters
    pub champion_phrases: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            weapon_category: WEAPON_CATEGORY_HASH,
            armor_category: ARMOR_CATEGORY_HASH,
            armor_mod_category: ARMOR_MOD_CATEGORY_HASH,
            subclass_category: SUBCLASS_CATEGORY_HASH,
            armor2_plug_sets: Vec::new(),
            armor2_mod_tokens: strings(&["enhancements.v2", "enhancements.season", "armor_mod"]),
            ability_tokens: strings(&[
                "grenades",
                "melee",
                "class_abilities",
                "supers",
                ".abilities",
            ]),
            champion_phrases: strings(&[
                "anti-barrier",
                "shield-piercing",
                "overload",
                "disrupt",
                "unstoppable",
                "stagger",
            ]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
