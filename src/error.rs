//! Error types.
//!
//! Classification itself cannot fail: the fallback pool absorbs every input.
//! What can go wrong is a malformed catalog (caught once, at construction)
//! and a submission the session refuses.

use thiserror::Error;

/// A catalog that breaks one of its construction invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("rule `{rule}` has no keywords")]
    NoKeywords { rule: &'static str },

    #[error("rule `{rule}` has an empty response")]
    EmptyResponse { rule: &'static str },

    #[error("`{set}` contains an empty keyword")]
    EmptyKeyword { set: &'static str },

    /// Input is lowercased before matching, so this keyword could never match.
    #[error("keyword `{keyword}` in `{set}` is not lowercase")]
    UppercaseKeyword { set: &'static str, keyword: &'static str },

    #[error("keyword `{keyword}` appears more than once in `{set}`")]
    DuplicateKeyword { set: &'static str, keyword: &'static str },

    #[error("the greeting keyword set is empty")]
    NoGreetings,

    #[error("the {pool} response pool is empty")]
    EmptyPool { pool: &'static str },

    #[error("the {pool} response pool has a blank entry at index {index}")]
    BlankPoolEntry { pool: &'static str, index: usize },

    #[error("failed to compile keyword patterns: {0}")]
    Pattern(String),
}

impl From<regex::Error> for CatalogError {
    fn from(err: regex::Error) -> Self {
        CatalogError::Pattern(err.to_string())
    }
}

/// Why a [`Session`](crate::Session) refused a submission.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,

    #[error("the assistant is still replying to the previous message")]
    AwaitingResponse,

    #[error("no tokio runtime is available to produce the reply")]
    NoRuntime,
}
