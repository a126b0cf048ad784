#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

//! Whole-card parsing on top of the oracle text grammar.
//!
//! [`parse_card`] turns one card record into a [`CardOutputAst`] plus the
//! diagnostics of every face; [`parse_batch`] does the same for many cards
//! in parallel. [`report`] aggregates diagnostics across a batch and
//! [`ratchet`] compares a run of named test cases against a baseline.
//!
//! [`CardOutputAst`]: oracle_ast::card::CardOutputAst

mod attributes;
mod batch;
mod card;
mod error;
mod input;
pub mod ratchet;
pub mod report;
mod type_line;

pub use batch::parse_batch;
pub use card::{parse_card, ParseResult};
pub use error::HarnessError;
pub use input::CardInput;
pub use oracle_parse::ParseOptions;
pub use type_line::parse_type_line;
