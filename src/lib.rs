#[macro_use]
mod macros;
mod api;
mod catalog;
mod engine;
mod error;
mod rules;
mod session;

pub use api::{Classification, Options, Outcome, classify, classify_verbose_with, classify_with, default_engine};
pub use catalog::Catalog;
pub use engine::{Engine, Signals};
pub use error::{CatalogError, SubmitError};
pub use session::{Message, MessageId, Sender, Session, SessionConfig};

// --- Catalog types ----------------------------------------------------------

/// A topic rule: a name, a set of lowercase keywords and the single canned
/// response returned when any keyword occurs in the input.
///
/// The rule's category is its position in the [`Catalog`]; earlier rules win
/// when several match. `name` only shows up in traces and logs.
///
/// Rules are usually written with the `rule!` macro (see `src/macros.rs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    /// Matched as plain substrings of the lowercased input.
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

/// Index of a rule inside its catalog.
pub(crate) type RuleId = usize;

/// Lowercase the raw input. This is the only normalization applied before
/// matching: punctuation and whitespace are left as-is.
pub(crate) fn normalize(input: &str) -> String {
    input.to_lowercase()
}
