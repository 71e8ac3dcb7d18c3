//! The classification engine.
//!
//! Precedence is fixed and total:
//!
//! 1. any greeting keyword → uniform pick from the greeting pool
//! 2. first topic rule (catalog order) with any keyword → that rule's response
//! 3. nothing matched → uniform pick from the fallback pool
//!
//! There is no scoring: a rule hit by three keywords is no stronger than one
//! hit by a single keyword, and a greeting beats every topic.

use super::compiled_rules::CompiledCatalog;
use super::trigger::TriggerInfo;
use crate::api::{Classification, Outcome};
use crate::{Catalog, CatalogError};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, trace};

/// Stateless matcher over one compiled catalog.
///
/// An `Engine` is immutable after construction and can be shared freely
/// between sessions and threads. Randomness comes from the caller.
#[derive(Debug)]
pub struct Engine {
    compiled: CompiledCatalog,
}

impl Engine {
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        Ok(Engine { compiled: CompiledCatalog::new(catalog)? })
    }

    pub fn catalog(&self) -> &Catalog {
        self.compiled.catalog()
    }

    /// Select the response for `input`.
    ///
    /// Always returns a response; `rng` is only consulted when a pool applies.
    pub fn classify<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> &'static str {
        let normalized = crate::normalize(input);
        let (outcome, response) = self.decide(&normalized, rng);
        debug!(?outcome, "classified input");
        response
    }

    /// Like [`Engine::classify`], but also reports which rules were seen and
    /// how the response was chosen.
    pub fn classify_verbose<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Classification {
        let start = Instant::now();
        let normalized = crate::normalize(input);

        let trigger = TriggerInfo::scan(&self.compiled, &normalized);
        trace!(signals = ?trigger.signals, topics = ?trigger.topics, "trigger scan");

        let (outcome, response) = self.decide(&normalized, rng);
        debug!(?outcome, "classified input");

        let rules = self.catalog().rules();
        Classification {
            text: input.to_string(),
            response,
            outcome,
            signals: trigger.signals,
            matched_rules: trigger.topics.iter().map(|&id| rules[id].name).collect(),
            elapsed: start.elapsed(),
        }
    }

    fn decide<R: Rng + ?Sized>(&self, normalized: &str, rng: &mut R) -> (Outcome, &'static str) {
        let catalog = self.catalog();

        if self.compiled.is_greeting(normalized) {
            let (index, response) = pick(catalog.greeting_responses(), rng);
            return (Outcome::Greeting { index }, response);
        }

        if let Some(rule) = self.compiled.first_topic(normalized) {
            let matched = &catalog.rules()[rule];
            return (Outcome::Topic { rule, name: matched.name }, matched.response);
        }

        let (index, response) = pick(catalog.fallback_responses(), rng);
        (Outcome::Fallback { index }, response)
    }
}

/// Uniform pick over a non-empty pool (guaranteed by catalog validation).
fn pick<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> (usize, &'static str) {
    let index = rng.gen_range(0..pool.len());
    (index, pool[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signals;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const GREETING_POOL: &[&str] = &["g0", "g1", "g2", "g3"];
    const FALLBACK_POOL: &[&str] = &["f0", "f1"];

    fn engine() -> Engine {
        let catalog = Catalog::new(
            vec![
                rule! { name: "pain", keywords: ["pain", "ache"], response: "pain response" },
                rule! { name: "fever", keywords: ["fever", "flu"], response: "fever response" },
            ],
            &["hello", "hey"],
            GREETING_POOL,
            FALLBACK_POOL,
        )
        .unwrap();
        Engine::new(catalog).unwrap()
    }

    #[test]
    fn greeting_beats_topics() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(7);

        for input in ["hello", "Hey, I have a fever", "HELLO pain"] {
            let response = engine.classify(input, &mut rng);
            assert!(GREETING_POOL.contains(&response), "{input:?} -> {response:?}");
        }
    }

    #[test]
    fn first_rule_in_order_wins() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(engine.classify("fever and pain", &mut rng), "pain response");
        assert_eq!(engine.classify("just the FLU", &mut rng), "fever response");
        assert_eq!(engine.classify("ache ache pain", &mut rng), "pain response");
    }

    #[test]
    fn falls_back_when_nothing_matches() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let response = engine.classify("quantum physics", &mut rng);
            assert!(FALLBACK_POOL.contains(&response));
        }
    }

    #[test]
    fn verbose_reports_shadowed_rules() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(7);

        let res = engine.classify_verbose("hey, fever and pain", &mut rng);
        assert!(matches!(res.outcome, Outcome::Greeting { .. }));
        assert_eq!(res.signals, Signals::GREETING | Signals::TOPIC);
        assert_eq!(res.matched_rules, vec!["pain", "fever"]);
        assert_eq!(res.text, "hey, fever and pain");

        let res = engine.classify_verbose("flu", &mut rng);
        assert_eq!(res.outcome, Outcome::Topic { rule: 1, name: "fever" });
        assert_eq!(res.response, "fever response");
        assert_eq!(res.signals, Signals::TOPIC);

        let res = engine.classify_verbose("nothing here", &mut rng);
        let Outcome::Fallback { index } = res.outcome else { panic!("expected fallback, got {:?}", res.outcome) };
        assert_eq!(res.response, FALLBACK_POOL[index]);
        assert!(res.signals.is_empty());
        assert!(res.matched_rules.is_empty());
    }

    #[test]
    fn pool_pick_is_uniform() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];

        for _ in 0..4000 {
            let res = engine.classify_verbose("hello", &mut rng);
            let Outcome::Greeting { index } = res.outcome else { panic!("expected greeting") };
            counts[index] += 1;
        }

        // Expected 1000 each; sd is ~27.
        for (index, &count) in counts.iter().enumerate() {
            assert!((850..=1150).contains(&count), "index {index} picked {count} times: {counts:?}");
        }
    }
}
