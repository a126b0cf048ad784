use crate::card::{parse_card, ParseResult};
use crate::input::CardInput;
use oracle_parse::ParseOptions;
use rayon::prelude::*;

/// Parse many cards in parallel. Results come back in input order.
#[tracing::instrument(level = "debug", skip_all, fields(cards = cards.len()))]
pub fn parse_batch(cards: &[CardInput], opts: &ParseOptions) -> Vec<ParseResult> {
    cards.par_iter().map(|card| parse_card(card, opts)).collect()
}
