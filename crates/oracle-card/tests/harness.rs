use oracle_ast::prelude::*;
use oracle_card::ratchet::{self, Baseline, CaseStatus};
use oracle_card::report::DiagnosticReport;
use oracle_card::{parse_batch, parse_card, CardInput, ParseOptions};

const UNREADABLE: &str = "Zzyzx the Impossible does something nobody has written a parser for yet.";

#[test]
fn report_aggregates_by_code() {
    let cards = vec![
        CardInput::from_text("Clean", "Flying"),
        CardInput::from_text("Broken One", UNREADABLE),
        CardInput::from_text("Broken Two", format!("Flying\n{UNREADABLE}")),
    ];
    let results = parse_batch(&cards, &ParseOptions::default());
    let report = DiagnosticReport::build(&results);

    assert_eq!(report.total_cards, 3);
    assert_eq!(report.cards_succeeded, 1);
    let entry = report.entry(DiagnosticCode::UnparsedAbility).unwrap();
    assert_eq!(entry.count, 2);
    assert_eq!(entry.cards_affected, 2);
    assert!((entry.percent_clean - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(entry.severity, Severity::Error);
    let names: Vec<_> = entry.examples.iter().map(|e| e.card.as_str()).collect();
    assert_eq!(names, vec!["Broken One", "Broken Two"]);
    assert_eq!(entry.examples[0].snippet, UNREADABLE);

    let rendered = report.to_string();
    assert!(rendered.contains("AST001"));
}

#[test]
fn report_examples_are_capped_and_sorted() {
    let mut cards: Vec<CardInput> = (0..8)
        .map(|i| CardInput::from_text(format!("Odd {i}"), UNREADABLE))
        .collect();
    cards.push(CardInput {
        mana_cost: Some("{2}{G".into()),
        ..CardInput::from_text("Bad Cost", "Flying")
    });
    let results = parse_batch(&cards, &ParseOptions::default());
    let report = DiagnosticReport::build(&results);
    assert_eq!(report.entries[0].code, DiagnosticCode::UnparsedAbility);
    assert_eq!(report.entries[0].count, 8);
    assert_eq!(report.entries[0].examples.len(), 5);
    assert_eq!(report.entries[1].code, DiagnosticCode::InvalidManaCost);
    for pair in report.entries.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}

#[test]
fn ratchet_run_and_compare() {
    let json = format!(
        r#"[
            {{"name": "flying", "card": {{"name": "Bird", "oracle_text": "Flying"}}}},
            {{"name": "unreadable", "card": {{"name": "Odd", "oracle_text": "{UNREADABLE}"}}}}
        ]"#
    );
    let cases = ratchet::load_cases(&json).unwrap();
    let run = ratchet::run_cases(&cases, &ParseOptions::default());
    assert_eq!(run.cases["flying"].status, CaseStatus::Pass);
    assert_eq!(run.cases["unreadable"].status, CaseStatus::Fail);
    assert!(run.cases["flying"].digest.starts_with("sha256:"));

    // a baseline written by this run round-trips and compares clean
    let stored = Baseline::from_json(&run.to_json().unwrap()).unwrap();
    let report = ratchet::compare(&stored, &run);
    assert!(report.is_regression_free());
    assert_eq!(report.stable_failures, vec!["unreadable"]);
    assert!(report.changed_outputs.is_empty());

    // pretend the unreadable case used to pass
    let mut optimistic = stored.clone();
    if let Some(record) = optimistic.cases.get_mut("unreadable") {
        record.status = CaseStatus::Pass;
    }
    let report = ratchet::compare(&optimistic, &run);
    assert_eq!(report.regressions, vec!["unreadable"]);
    assert!(!report.is_regression_free());
}

#[test]
fn expected_output_must_match() {
    let card = CardInput::from_text("Bird", "Flying");
    let ast = serde_json::to_value(parse_card(&card, &ParseOptions::default()).ast).unwrap();
    let cases = vec![
        ratchet::TestCase {
            name: "exact".into(),
            card: card.clone(),
            expected: Some(ast),
        },
        ratchet::TestCase {
            name: "wrong".into(),
            card,
            expected: Some(serde_json::json!({"name": "Bird"})),
        },
    ];
    let run = ratchet::run_cases(&cases, &ParseOptions::default());
    assert_eq!(run.cases["exact"].status, CaseStatus::Pass);
    assert_eq!(run.cases["wrong"].status, CaseStatus::Fail);
    assert_eq!(run.cases["exact"].digest, run.cases["wrong"].digest);
}
