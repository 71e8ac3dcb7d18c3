//! Intent matching and response selection.
//!
//! Classifying an input string is a short, fixed-precedence pipeline:
//!
//! ```text
//! Catalog ── CompiledCatalog::new          (compiled_rules.rs)
//!              - one Regex for greetings
//!              - one RegexSet over topic rules
//!                        │
//! input ── normalize ────┼── greeting? ──▶ random greeting response
//!          (lowercase)   │
//!                        ├── first topic rule hit ──▶ that rule's response
//!                        │
//!                        └── otherwise ──▶ random fallback response
//! ```
//!
//! Keywords are compiled as escaped literal alternations, so a match is exactly
//! "the lowercased input contains the keyword as a substring". `RegexSet`
//! reports hits in pattern order, which keeps first-match-wins intact.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: turns a validated `Catalog` into matchers.
//! - `trigger.rs`: full scan of an input for tracing/debugging (`Signals`).
//! - `matcher.rs`: the `Engine` itself, including the pool pick.
//!
//! ## Debugging
//!
//! Outcomes are logged at `debug`, trigger scans at `trace`.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/trigger.rs"]
mod trigger;

pub use matcher::Engine;
pub use trigger::Signals;
