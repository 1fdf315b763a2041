//! Item classification.
//!
//! Classification is fuzzy matching against a vocabulary owned by the remote
//! data source (category hashes, plug-category identifiers, item-type names).
//! Each category has an independent tagged rule; a record is tested against
//! every rule and may match several categories.

mod category;
mod rules;
mod vocabulary;

use std::collections::BTreeMap;

use tracing::debug;

use crate::definition::{DefinitionTable, Record};

pub use category::{Category, ClassifiedItem};
pub use rules::{ItemFacts, Predicate, Rule, RuleContext, default_rules};
pub use vocabulary::{
    ARMOR_CATEGORY_HASH, ARMOR_MOD_CATEGORY_HASH, ArmorPolicy, SUBCLASS_CATEGORY_HASH,
    Vocabulary, WEAPON_CATEGORY_HASH,
};

#[derive(Debug, Clone)]
pub struct Classifier {
    vocabulary: Vocabulary,
    armor_policy: ArmorPolicy,
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Vocabulary::default(), ArmorPolicy::default())
    }
}

impl Classifier {
    pub fn new(vocabulary: Vocabulary, armor_policy: ArmorPolicy) -> Self {
        Self {
            vocabulary,
            armor_policy,
            rules: default_rules(),
        }
    }

    /// Append an extra rule; it is evaluated after the built-in ones
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn armor_policy(&self) -> ArmorPolicy {
        self.armor_policy
    }

    fn context(&self) -> RuleContext<'_> {
        RuleContext {
            vocabulary: &self.vocabulary,
            armor_policy: self.armor_policy,
        }
    }

    /// Every category the record matches, in rule order, without duplicates
    pub fn classify(&self, record: &Record) -> Vec<Category> {
        let facts = ItemFacts::new(record);
        let ctx = self.context();

        let mut categories = Vec::new();
        for rule in &self.rules {
            if !categories.contains(&rule.category) && rule.matches(&facts, &ctx) {
                categories.push(rule.category);
            }
        }
        categories
    }

    /// Whether any rule of `category` matches the record
    pub fn matches(&self, record: &Record, category: Category) -> bool {
        let facts = ItemFacts::new(record);
        let ctx = self.context();
        self.rules
            .iter()
            .filter(|rule| rule.category == category)
            .any(|rule| rule.matches(&facts, &ctx))
    }

    /// All records of one category
    pub fn bucket<'t>(
        &self,
        table: &'t DefinitionTable,
        category: Category,
    ) -> Vec<ClassifiedItem<'t>> {
        let items: Vec<ClassifiedItem<'t>> = table
            .iter()
            .filter(|(_, record)| self.matches(record, category))
            .map(|(id, record)| ClassifiedItem::new(id, category, record))
            .collect();

        debug!("Classified {} records as {}", items.len(), category);
        items
    }

    /// Split a table into every category bucket.
    ///
    /// Categories with no members are present with an empty list.
    pub fn partition<'t>(
        &self,
        table: &'t DefinitionTable,
    ) -> BTreeMap<Category, Vec<ClassifiedItem<'t>>> {
        let mut buckets: BTreeMap<Category, Vec<ClassifiedItem<'t>>> = self
            .rules
            .iter()
            .map(|rule| (rule.category, Vec::new()))
            .collect();

        for (id, record) in table.iter() {
            for category in self.classify(record) {
                buckets
                    .entry(category)
                    .or_default()
                    .push(ClassifiedItem::new(id, category, record));
            }
        }
        buckets
    }
}
