//! Tests for the clause nesting bound.

use oracle_ast::prelude::*;
use oracle_parse::{parse_oracle_text, ParseOptions};

fn with_depth(max_nesting_depth: usize) -> ParseOptions {
    ParseOptions {
        max_nesting_depth,
        ..ParseOptions::default()
    }
}

#[test]
fn default_depth_handles_ordinary_modal_text() {
    let oracle = parse_oracle_text(
        "Choose one —\n• Draw a card.\n• Scry 2.",
        None,
        &ParseOptions::default(),
    );
    assert!(oracle.diagnostics.is_empty());
}

#[test]
fn exceeding_depth_degrades_to_unparsed_modes() {
    let oracle = parse_oracle_text(
        "Choose one —\n• Draw a card.\n• Scry 2.",
        None,
        &with_depth(1),
    );
    let Ability::Passive { effect } = &oracle.abilities[0] else {
        panic!("expected passive, got {:?}", oracle.abilities[0]);
    };
    let EffectKind::Modal { modes, .. } = &effect.kind else {
        panic!("expected modal");
    };
    assert!(modes.iter().all(Effect::is_unparsed));
    let limits = oracle
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::NestingLimit)
        .count();
    assert_eq!(limits, 2);
}

#[test]
fn zero_depth_keeps_the_trigger_but_not_its_effect() {
    let oracle = parse_oracle_text("When ~ dies, draw a card.", None, &with_depth(0));
    let Ability::Triggered { trigger, effect } = &oracle.abilities[0] else {
        panic!("expected triggered, got {:?}", oracle.abilities[0]);
    };
    assert!(trigger.event.is_some());
    assert!(effect.is_unparsed());
    assert!(oracle
        .diagnostics
        .iter()
        .any(|d| d.code == DiagnosticCode::NestingLimit && d.is_error()));
}

#[test]
fn long_sequences_are_not_limited_by_depth() {
    let text = "Draw a card. ".repeat(40);
    let oracle = parse_oracle_text(text.trim_end(), None, &with_depth(2));
    let Ability::Passive { effect } = &oracle.abilities[0] else {
        panic!("expected passive");
    };
    let EffectKind::Sequence { effects } = &effect.kind else {
        panic!("expected sequence");
    };
    assert_eq!(effects.len(), 40);
    assert!(oracle.diagnostics.is_empty());
}
