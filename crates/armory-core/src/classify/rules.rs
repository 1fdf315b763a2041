use crate::definition::Record;

use super::{ArmorPolicy, Category, Vocabulary};

/// Lower-cased view of the fields the rules look at.
///
/// Built once per record so every rule sees the same normalized strings.
/// Absent fields are empty; nothing here fails on a sparse record.
#[derive(Debug, Clone)]
pub struct ItemFacts<'a> {
    pub record: &'a Record,
    pub category_hashes: Vec<u64>,
    pub plug_category: String,
    pub item_type_name: String,
    pub name: String,
    pub description: String,
    pub has_plug: bool,
    pub season_hash: Option<u64>,
}

impl<'a> ItemFacts<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            category_hashes: record.hash_list(&["itemCategoryHashes"]),
            plug_category: record.lower_at(&["plug", "plugCategoryIdentifier"]),
            item_type_name: record.lower_at(&["itemTypeDisplayName"]),
            name: record.lower_at(&["displayProperties", "name"]),
            description: record.lower_at(&["displayProperties", "description"]),
            has_plug: record.object_at(&["plug"]).is_some(),
            season_hash: record.u64_at(&["seasonHash"]).filter(|hash| *hash != 0),
        }
    }

    pub fn in_category(&self, hash: u64) -> bool {
        self.category_hashes.contains(&hash)
    }

    fn plug_matches_any(&self, tokens: &[String]) -> bool {
        tokens.iter().any(|token| self.plug_category.contains(token.as_str()))
    }
}

/// Settings a rule predicate may consult
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub vocabulary: &'a Vocabulary,
    pub armor_policy: ArmorPolicy,
}

pub type Predicate = fn(&ItemFacts<'_>, &RuleContext<'_>) -> bool;

/// A tagged classification rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub name: &'static str,
    pub predicate: Predicate,
}

impl Rule {
    pub const fn new(category: Category, name: &'static str, predicate: Predicate) -> Self {
        Self {
            category,
            name,
            predicate,
        }
    }

    pub fn matches(&self, facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
        (self.predicate)(facts, ctx)
    }
}

/// Built-in rules, one per category
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(Category::Weapon, "weapon-category", is_weapon),
        Rule::new(Category::Armor, "armor-category", is_armor),
        Rule::new(Category::ArmorMod, "armor-mod-category", is_armor_mod),
        Rule::new(Category::Subclass, "subclass-category", is_subclass),
        Rule::new(Category::Aspect, "aspect-plug", is_aspect),
        Rule::new(Category::Fragment, "fragment-plug", is_fragment),
        Rule::new(Category::Ability, "ability-plug", is_ability),
        Rule::new(Category::ArtifactMod, "artifact-plug", is_artifact_mod),
        Rule::new(Category::ChampionMod, "champion-phrase", is_champion_mod),
    ]
}

fn is_weapon(facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
    facts.in_category(ctx.vocabulary.weapon_category)
}

fn is_armor(facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
    facts.in_category(ctx.vocabulary.armor_category)
        && (ctx.armor_policy == ArmorPolicy::Ignore || has_armor2_signal(facts, ctx.vocabulary))
}

/// Energy capacity on the item, or a socket fed by a known Armor 2.0 plug set
fn has_armor2_signal(facts: &ItemFacts<'_>, vocabulary: &Vocabulary) -> bool {
    if facts
        .record
        .u64_at(&["energy", "energyCapacity"])
        .is_some_and(|capacity| capacity > 0)
    {
        return true;
    }

    facts
        .record
        .array_at(&["sockets", "socketEntries"])
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("reusablePlugSetHash"))
        .filter_map(crate::definition::value_as_u64)
        .any(|hash| vocabulary.armor2_plug_sets.contains(&hash))
}

fn is_armor_mod(facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
    if !facts.in_category(ctx.vocabulary.armor_mod_category) {
        return false;
    }
    ctx.armor_policy == ArmorPolicy::Ignore
        || facts.record.has(&["plug", "energyCost"])
        || facts.plug_matches_any(&ctx.vocabulary.armor2_mod_tokens)
}

fn is_subclass(facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
    facts.in_category(ctx.vocabulary.subclass_category)
}

// Aspect and fragment detection never looks at the display name: plenty of
// unrelated items are called "... Fragment" or similar.
fn is_aspect(facts: &ItemFacts<'_>, _ctx: &RuleContext<'_>) -> bool {
    facts.plug_category.contains("aspect") || facts.item_type_name == "aspect"
}

fn is_fragment(facts: &ItemFacts<'_>, _ctx: &RuleContext<'_>) -> bool {
    facts.plug_category.contains("fragment") || facts.item_type_name == "fragment"
}

fn is_ability(facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
    facts.plug_matches_any(&ctx.vocabulary.ability_tokens)
        && !is_aspect(facts, ctx)
        && !is_fragment(facts, ctx)
}

fn is_artifact_mod(facts: &ItemFacts<'_>, _ctx: &RuleContext<'_>) -> bool {
    if !facts.has_plug || facts.name.trim().is_empty() {
        return false;
    }
    facts.plug_category.contains("artifact")
        || facts.item_type_name.contains("artifact")
        || (facts.plug_category.contains("seasonal") && facts.season_hash.is_some())
}

fn is_champion_mod(facts: &ItemFacts<'_>, ctx: &RuleContext<'_>) -> bool {
    if !facts.has_plug || !facts.in_category(ctx.vocabulary.armor_mod_category) {
        return false;
    }
    ctx.vocabulary
        .champion_phrases
        .iter()
        .any(|phrase| facts.name.contains(phrase.as_str()) || facts.description.contains(phrase.as_str()))
}
