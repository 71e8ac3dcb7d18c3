//! Trigger scanning.
//!
//! `Engine::classify` stops at the first thing that applies. For tracing and
//! the CLI's `--explain` output it is useful to see everything that *could*
//! have applied, e.g. a topic rule shadowed by a greeting or by an earlier
//! rule. `TriggerInfo::scan` collects that.

use super::compiled_rules::CompiledCatalog;
use crate::RuleId;

bitflags::bitflags! {
    /// Which stages of the pipeline found a keyword in the input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Signals: u8 {
        const GREETING = 1 << 0;
        const TOPIC    = 1 << 1;
    }
}

/// Everything the catalog recognizes in one normalized input.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub signals: Signals,
    /// Matching rules in catalog order.
    pub topics: Vec<RuleId>,
}

impl TriggerInfo {
    pub fn scan(compiled: &CompiledCatalog, normalized: &str) -> Self {
        let mut signals = Signals::empty();

        if compiled.is_greeting(normalized) {
            signals |= Signals::GREETING;
        }

        let topics = compiled.all_topics(normalized);
        if !topics.is_empty() {
            signals |= Signals::TOPIC;
        }

        TriggerInfo { signals, topics }
    }
}
