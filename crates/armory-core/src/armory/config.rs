use crate::classify::{ArmorPolicy, Vocabulary};
use crate::filter::SeasonWindow;

pub const DEFAULT_LOCALE: &str = "en";
/// Prefix for relative icon paths
pub const DEFAULT_ASSET_BASE_URL: &str = "https://www.bungie.net";

/// Configuration for the classification pipeline
#[derive(Debug, Clone)]
pub struct ArmoryConfig {
    /// Locale of the definition tables
    pub locale: String,
    /// Category hashes and tokens the classifier matches against
    pub vocabulary: Vocabulary,
    /// Whether the Armor 2.0 signal is required for armor and armor mods
    pub armor_policy: ArmorPolicy,
    /// Season window applied to seasonal categories
    pub season_window: SeasonWindow,
    /// Base URL prepended to relative icon paths
    pub asset_base_url: String,
}

impl Default for ArmoryConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            vocabulary: Vocabulary::default(),
            armor_policy: ArmorPolicy::default(),
            season_window: SeasonWindow::default(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}

impl ArmoryConfig {
    /// Create a new configuration builder
    pub fn builder() -> ArmoryConfigBuilder {
        ArmoryConfigBuilder::default()
    }
}

/// Builder for ArmoryConfig
#[derive(Debug, Clone, Default)]
pub struct ArmoryConfigBuilder {
    locale: Option<String>,
    vocabulary: Option<Vocabulary>,
    armor_policy: Option<ArmorPolicy>,
    season_window: Option<SeasonWindow>,
    asset_base_url: Option<String>,
}

impl ArmoryConfigBuilder {
    pub fn locale<S: Into<String>>(mut self, locale: S) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn armor_policy(mut self, policy: ArmorPolicy) -> Self {
        self.armor_policy = Some(policy);
        self
    }

    pub fn season_window(mut self, window: SeasonWindow) -> Self {
        self.season_window = Some(window);
        self
    }

    pub fn asset_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.asset_base_url = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ArmoryConfig {
        let default = ArmoryConfig::default();
        ArmoryConfig {
            locale: self.locale.unwrap_or(default.locale),
            vocabulary: self.vocabulary.unwrap_or(default.vocabulary),
            armor_policy: self.armor_policy.unwrap_or(default.armor_policy),
            season_window: self.season_window.unwrap_or(default.season_window),
            asset_base_url: self.asset_base_url.unwrap_or(default.asset_base_url),
        }
    }
}
