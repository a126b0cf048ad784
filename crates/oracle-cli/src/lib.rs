#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

//! Commands behind the `oracle` binary, kept in a library so they can be
//! driven without spawning a process.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use oracle_ast::prelude::*;
use oracle_card::ratchet::{self, Baseline, RatchetReport};
use oracle_card::report::DiagnosticReport;
use oracle_card::{parse_batch, parse_card, CardInput, ParseOptions, ParseResult};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Maximum single-card input size in bytes (1MB)
pub const MAX_SOURCE_SIZE: u64 = 1_000_000;

/// Maximum bulk card file size in bytes (256MB)
pub const MAX_BULK_SIZE: u64 = 256_000_000;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Json,
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();
}

/// Read a file, refusing anything larger than `limit` bytes.
pub fn read_capped(path: &Path, limit: u64) -> Result<String> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?
        .len();
    if len > limit {
        bail!(
            "'{}' exceeds {}MB limit ({} bytes)",
            path.display(),
            limit / 1_000_000,
            len
        );
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Where `oracle parse` gets its card.
pub enum ParseSource<'a> {
    /// Oracle text given on the command line.
    Text(&'a str),
    /// A `.json` file holds card records, anything else is oracle text.
    File(&'a Path),
}

/// Parse a card (or the cards of a JSON file) and render the results.
pub fn run_parse(
    source: ParseSource<'_>,
    name: Option<&str>,
    format: Format,
    opts: &ParseOptions,
) -> Result<String> {
    let cards = match source {
        ParseSource::Text(text) => {
            if text.len() as u64 > MAX_SOURCE_SIZE {
                bail!("input text exceeds {}MB limit", MAX_SOURCE_SIZE / 1_000_000);
            }
            vec![CardInput::from_text(name.unwrap_or("~"), text)]
        }
        ParseSource::File(path) if path.extension().is_some_and(|e| e == "json") => {
            let json = read_capped(path, MAX_SOURCE_SIZE)?;
            CardInput::list_from_json(&json)
                .with_context(|| format!("failed to decode '{}'", path.display()))?
        }
        ParseSource::File(path) => {
            let text = read_capped(path, MAX_SOURCE_SIZE)?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("~");
            vec![CardInput::from_text(name.unwrap_or(stem), text.trim_end())]
        }
    };
    debug!(cards = cards.len(), "parsing");
    let results: Vec<ParseResult> = cards.iter().map(|c| parse_card(c, opts)).collect();

    match format {
        Format::Json if results.len() == 1 => Ok(serde_json::to_string_pretty(&results[0])?),
        Format::Json => Ok(serde_json::to_string_pretty(&results)?),
        Format::Pretty => {
            let mut out = String::new();
            for result in &results {
                render_card(&mut out, result)?;
            }
            Ok(out)
        }
    }
}

fn render_card(out: &mut String, result: &ParseResult) -> Result<()> {
    let ast = &result.ast;
    writeln!(out, "{}", ast.name)?;
    if !ast.type_line.raw.is_empty() {
        writeln!(out, "  {}", ast.type_line.raw)?;
    }
    for attribute in &ast.attributes {
        writeln!(out, "  attribute {}", serde_json::to_string(attribute)?)?;
    }
    render_abilities(out, &ast.oracle.abilities, "  ")?;
    for face in ast.faces.iter().flatten() {
        writeln!(out, "  face {}", face.name)?;
        for attribute in &face.attributes {
            writeln!(out, "    attribute {}", serde_json::to_string(attribute)?)?;
        }
        render_abilities(out, &face.oracle.abilities, "    ")?;
    }
    for diagnostic in &result.diagnostics {
        writeln!(out, "  {}", diagnostic)?;
    }
    let errors = result.error_count();
    if result.succeeded {
        writeln!(out, "  ok")?;
    } else {
        writeln!(out, "  failed ({} errors)", errors)?;
    }
    Ok(())
}

fn render_abilities(out: &mut String, abilities: &[Ability], indent: &str) -> Result<()> {
    for (i, ability) in abilities.iter().enumerate() {
        let shape = match ability {
            Ability::Static { .. } => "static",
            Ability::Activated { .. } => "activated",
            Ability::Triggered { .. } => "triggered",
            Ability::NamedTriggered { .. } => "named-triggered",
            Ability::Passive { .. } => "passive",
            Ability::Unparsed { .. } => "unparsed",
        };
        writeln!(
            out,
            "{}{}. {} {}",
            indent,
            i + 1,
            shape,
            serde_json::to_string(ability)?
        )?;
    }
    Ok(())
}

/// Parse a bulk card file and aggregate its diagnostics.
pub fn run_report(path: &Path, format: Format, opts: &ParseOptions) -> Result<String> {
    let json = read_capped(path, MAX_BULK_SIZE)?;
    let cards = CardInput::list_from_json(&json)
        .with_context(|| format!("failed to decode '{}'", path.display()))?;
    info!(cards = cards.len(), "building diagnostic report");
    let report = DiagnosticReport::build(&parse_batch(&cards, opts));
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&report)?),
        Format::Pretty => Ok(report.to_string()),
    }
}

/// Result of `oracle ratchet`: the comparison and its rendering.
pub struct RatchetOutcome {
    pub report: RatchetReport,
    pub summary: String,
}

/// Run the test cases and compare against the baseline file. With
/// `update`, a regression-free run is written back as the new baseline.
/// A missing baseline counts as empty.
pub fn run_ratchet(
    cases_path: &Path,
    baseline_path: &Path,
    update: bool,
    opts: &ParseOptions,
) -> Result<RatchetOutcome> {
    let cases_json = read_capped(cases_path, MAX_BULK_SIZE)?;
    let cases = ratchet::load_cases(&cases_json)
        .with_context(|| format!("failed to decode '{}'", cases_path.display()))?;
    let baseline = if baseline_path.exists() {
        let json = read_capped(baseline_path, MAX_BULK_SIZE)?;
        Baseline::from_json(&json)
            .with_context(|| format!("failed to decode '{}'", baseline_path.display()))?
    } else {
        Baseline::default()
    };

    let current = ratchet::run_cases(&cases, opts);
    let report = ratchet::compare(&baseline, &current);

    let mut summary = String::new();
    writeln!(
        summary,
        "{} cases: {} passing, {} regressions, {} fixes, {} stable failures, {} new",
        current.cases.len(),
        current.passing(),
        report.regressions.len(),
        report.fixes.len(),
        report.stable_failures.len(),
        report.new_cases.len()
    )?;
    for name in &report.regressions {
        writeln!(summary, "  regression: {}", name)?;
    }
    for name in &report.fixes {
        writeln!(summary, "  fixed: {}", name)?;
    }
    for name in &report.changed_outputs {
        writeln!(summary, "  output changed: {}", name)?;
    }

    if update {
        if !report.is_regression_free() {
            writeln!(summary, "baseline not updated: regressions present")?;
        } else {
            std::fs::write(baseline_path, current.to_json()?)
                .with_context(|| format!("failed to write '{}'", baseline_path.display()))?;
            writeln!(summary, "baseline written to {}", baseline_path.display())?;
        }
    }
    Ok(RatchetOutcome { report, summary })
}
