//! Rule catalog construction and validation.
//!
//! A `Catalog` is pure data: the ordered topic rules, the greeting keyword set
//! and the two response pools. It is validated once in [`Catalog::new`] and
//! never mutated afterwards.

use crate::{CatalogError, Rule};
use std::collections::HashSet;

const GREETINGS_SET: &str = "greetings";

/// Immutable, validated rule set.
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: Vec<Rule>,
    greetings: &'static [&'static str],
    greeting_responses: &'static [&'static str],
    fallback_responses: &'static [&'static str],
}

impl Catalog {
    /// Build a catalog, checking every construction invariant.
    ///
    /// Rule order is evaluation order. Fails on the first violation found:
    /// a rule without keywords or with a blank response, an empty, uppercase or
    /// repeated keyword, an empty greeting set, or an empty response pool.
    pub fn new(
        rules: Vec<Rule>,
        greetings: &'static [&'static str],
        greeting_responses: &'static [&'static str],
        fallback_responses: &'static [&'static str],
    ) -> Result<Self, CatalogError> {
        for rule in &rules {
            if rule.keywords.is_empty() {
                return Err(CatalogError::NoKeywords { rule: rule.name });
            }
            if rule.response.trim().is_empty() {
                return Err(CatalogError::EmptyResponse { rule: rule.name });
            }
            check_keywords(rule.name, rule.keywords)?;
        }

        if greetings.is_empty() {
            return Err(CatalogError::NoGreetings);
        }
        check_keywords(GREETINGS_SET, greetings)?;

        check_pool("greeting", greeting_responses)?;
        check_pool("fallback", fallback_responses)?;

        Ok(Catalog { rules, greetings, greeting_responses, fallback_responses })
    }

    /// Topic rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn greetings(&self) -> &'static [&'static str] {
        self.greetings
    }

    pub fn greeting_responses(&self) -> &'static [&'static str] {
        self.greeting_responses
    }

    pub fn fallback_responses(&self) -> &'static [&'static str] {
        self.fallback_responses
    }
}

fn check_keywords(set: &'static str, keywords: &'static [&'static str]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(keywords.len());
    for &keyword in keywords {
        if keyword.is_empty() {
            return Err(CatalogError::EmptyKeyword { set });
        }
        if crate::normalize(keyword) != keyword {
            return Err(CatalogError::UppercaseKeyword { set, keyword });
        }
        if !seen.insert(keyword) {
            return Err(CatalogError::DuplicateKeyword { set, keyword });
        }
    }
    Ok(())
}

fn check_pool(pool: &'static str, responses: &[&str]) -> Result<(), CatalogError> {
    if responses.is_empty() {
        return Err(CatalogError::EmptyPool { pool });
    }
    if let Some(index) = responses.iter().position(|r| r.trim().is_empty()) {
        return Err(CatalogError::BlankPoolEntry { pool, index });
    }
    Ok(())
}
