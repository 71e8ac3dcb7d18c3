//! Catalog compilation.
//!
//! This is the static side of the engine: matchers derived once from a
//! validated `Catalog` so each classification is a couple of automaton runs
//! instead of a keyword-by-keyword scan.
//!
//! ## Invariants
//!
//! - Pattern `i` of `topics` corresponds to `catalog.rules()[i]`.
//! - Every keyword is passed through `regex::escape`, so patterns are plain
//!   literal alternations and carry no regex semantics of their own.

use crate::{Catalog, CatalogError, RuleId};
use regex::{Regex, RegexSet};

/// A catalog together with its compiled matchers.
#[derive(Debug)]
pub struct CompiledCatalog {
    catalog: Catalog,
    greeting: Regex,
    topics: RegexSet,
}

impl CompiledCatalog {
    /// Compile `catalog`. The only failure left at this point is a pattern
    /// exceeding the regex size limits.
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        let greeting = Regex::new(&alternation(catalog.greetings()))?;
        let topics = RegexSet::new(catalog.rules().iter().map(|rule| alternation(rule.keywords)))?;

        Ok(CompiledCatalog { catalog, greeting, topics })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the normalized input contains any greeting keyword.
    pub fn is_greeting(&self, normalized: &str) -> bool {
        self.greeting.is_match(normalized)
    }

    /// First rule, in catalog order, with a keyword inside the normalized input.
    pub fn first_topic(&self, normalized: &str) -> Option<RuleId> {
        self.topics.matches(normalized).into_iter().next()
    }

    /// Every rule with a keyword inside the normalized input, in catalog order.
    pub fn all_topics(&self, normalized: &str) -> Vec<RuleId> {
        self.topics.matches(normalized).into_iter().collect()
    }
}

fn alternation(keywords: &[&str]) -> String {
    keywords.iter().map(|kw| regex::escape(kw)).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled() -> CompiledCatalog {
        let catalog = Catalog::new(
            vec![
                rule! { name: "dots", keywords: ["a.b", "(x)"], response: "dots" },
                rule! { name: "sleep", keywords: ["can't sleep", "sleep"], response: "sleep" },
                rule! { name: "stress", keywords: ["stress"], response: "stress" },
            ],
            &["hi"],
            &["hello"],
            &["fallback"],
        )
        .unwrap();
        CompiledCatalog::new(catalog).unwrap()
    }

    #[test]
    fn keywords_are_literal() {
        let compiled = compiled();
        assert_eq!(compiled.first_topic("a.b"), Some(0));
        assert_eq!(compiled.first_topic("axb"), None);
        assert_eq!(compiled.first_topic("see (x) here"), Some(0));
        assert_eq!(compiled.first_topic("see x here"), None);
    }

    #[test]
    fn first_topic_follows_catalog_order() {
        let compiled = compiled();
        assert_eq!(compiled.first_topic("stress means i can't sleep"), Some(1));
        assert_eq!(compiled.all_topics("stress means i can't sleep"), vec![1, 2]);
    }

    #[test]
    fn greeting_is_substring_match() {
        let compiled = compiled();
        assert!(compiled.is_greeting("this"));
        assert!(!compiled.is_greeting("h i"));
    }
}
