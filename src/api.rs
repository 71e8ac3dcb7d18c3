use crate::engine::Engine;
use crate::{Signals, rules};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;

/// The built-in health catalog, compiled on first use.
///
/// A broken built-in catalog is a programming error, so initialization panics
/// instead of letting the assistant run with a partial rule set.
static DEFAULT_ENGINE: Lazy<Arc<Engine>> = Lazy::new(|| {
    let engine = rules::health::rules::catalog().and_then(Engine::new);
    Arc::new(engine.unwrap_or_else(|err| panic!("built-in health catalog is invalid: {err}")))
});

/// Shared handle to the engine built from the built-in catalog.
pub fn default_engine() -> Arc<Engine> {
    Arc::clone(&DEFAULT_ENGINE)
}

/// Options that affect response selection.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Seed for pool picks. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Options {
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// How a response was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A greeting keyword matched; `index` is the pick from the greeting pool.
    Greeting { index: usize },
    /// Topic rule number `rule` (catalog order) matched first.
    Topic { rule: usize, name: &'static str },
    /// Nothing matched; `index` is the pick from the fallback pool.
    Fallback { index: usize },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Greeting { .. } => "greeting",
            Outcome::Topic { name, .. } => *name,
            Outcome::Fallback { .. } => "fallback",
        }
    }
}

/// Result from [`classify_verbose_with`] and [`Engine::classify_verbose`].
#[derive(Debug, Clone)]
pub struct Classification {
    /// The raw input text.
    pub text: String,
    pub response: &'static str,
    pub outcome: Outcome,
    /// Stages that found a keyword, whether or not they decided the outcome.
    pub signals: Signals,
    /// Names of all topic rules with a keyword in the input, in catalog order.
    pub matched_rules: Vec<&'static str>,
    pub elapsed: Duration,
}

/// Classify `text` against the built-in catalog.
///
/// # Example
/// ```
/// let reply = healthbot::classify("I have a bad headache");
/// assert!(reply.starts_with("Headaches can be caused by"));
/// ```
pub fn classify(text: &str) -> String {
    DEFAULT_ENGINE.classify(text, &mut rand::thread_rng()).to_string()
}

/// Classify `text` against the built-in catalog using `options`.
///
/// With a seed the pick among pool responses is reproducible.
pub fn classify_with(text: &str, options: &Options) -> String {
    DEFAULT_ENGINE.classify(text, &mut options.rng()).to_string()
}

/// Classify `text` and return the full [`Classification`] trace.
pub fn classify_verbose_with(text: &str, options: &Options) -> Classification {
    DEFAULT_ENGINE.classify_verbose(text, &mut options.rng())
}
