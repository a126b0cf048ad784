//! Aggregate diagnostics across a batch of parsed cards.

use crate::card::ParseResult;
use oracle_ast::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Example cards kept per diagnostic code.
pub const MAX_EXAMPLES: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub total_cards: usize,
    pub cards_succeeded: usize,
    /// Sorted by count, highest first, then by code.
    pub entries: Vec<ReportEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub code: DiagnosticCode,
    pub message: String,
    pub severity: Severity,
    /// Occurrences across all cards.
    pub count: usize,
    pub cards_affected: usize,
    /// Share of analysed cards without this code, 0 to 100.
    pub percent_clean: f64,
    pub examples: Vec<ReportExample>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExample {
    pub card: String,
    pub snippet: String,
}

#[derive(Default)]
struct Tally {
    count: usize,
    cards: BTreeSet<usize>,
    examples: Vec<ReportExample>,
}

impl DiagnosticReport {
    pub fn build(results: &[ParseResult]) -> Self {
        let mut tallies: BTreeMap<DiagnosticCode, Tally> = BTreeMap::new();
        for (index, result) in results.iter().enumerate() {
            for diagnostic in &result.diagnostics {
                let tally = tallies.entry(diagnostic.code).or_default();
                tally.count += 1;
                // one example per card
                if tally.cards.insert(index) && tally.examples.len() < MAX_EXAMPLES {
                    tally.examples.push(ReportExample {
                        card: result.ast.name.clone(),
                        snippet: diagnostic.text.clone().unwrap_or_default(),
                    });
                }
            }
        }

        let total_cards = results.len();
        let mut entries: Vec<ReportEntry> = tallies
            .into_iter()
            .map(|(code, tally)| ReportEntry {
                code,
                message: code.template().to_string(),
                severity: code.severity(),
                count: tally.count,
                cards_affected: tally.cards.len(),
                percent_clean: percent(total_cards - tally.cards.len(), total_cards),
                examples: tally.examples,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.code.cmp(&b.code)));

        Self {
            total_cards,
            cards_succeeded: results.iter().filter(|r| r.succeeded).count(),
            entries,
        }
    }

    pub fn entry(&self, code: DiagnosticCode) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.code == code)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        100.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} cards analysed, {} parsed without errors ({:.1}%)",
            self.total_cards,
            self.cards_succeeded,
            percent(self.cards_succeeded, self.total_cards)
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "{} {:<7} {:>6} in {:>5} cards, {:5.1}% clean  {}",
                entry.code,
                entry.severity,
                entry.count,
                entry.cards_affected,
                entry.percent_clean,
                entry.message
            )?;
            for example in &entry.examples {
                writeln!(f, "    {}: {}", example.card, example.snippet)?;
            }
        }
        Ok(())
    }
}
