#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod combinator;
mod grammar;
pub mod lexer;
pub mod token;

pub use grammar::parse_oracle_text;
pub use lexer::tokenize;

use serde::{Deserialize, Serialize};

/// Knobs for a single parse. Every field has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Bound on nested clauses (modal modes, "if you do" follow-ups,
    /// conditional bodies). Deeper text becomes an unparsed node.
    pub max_nesting_depth: usize,
    /// Keep reminder text on keyword abilities.
    pub keep_reminder_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 16,
            keep_reminder_text: true,
        }
    }
}
