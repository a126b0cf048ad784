use oracle_ast::prelude::*;
use oracle_parse::token::{StructWord, Symbol, TokKind};
use oracle_parse::tokenize;

fn kinds(src: &str) -> Vec<TokKind> {
    tokenize(src).into_iter().map(|t| t.kind).collect()
}

#[test]
fn activated_ability_tokens() {
    assert_eq!(
        kinds("{T}: Add {G}."),
        vec![
            TokKind::Symbol(Symbol::Tap),
            TokKind::Colon,
            TokKind::Word("Add".into()),
            TokKind::Symbol(Symbol::Mana(ManaSymbol::colored(Color::Green))),
            TokKind::Period,
        ]
    );
}

#[test]
fn spelled_numbers_and_structural_words() {
    assert_eq!(
        kinds("When two"),
        vec![
            TokKind::Structural(StructWord::When),
            TokKind::Number {
                value: 2,
                spelled: true
            },
        ]
    );
    // shouting is not a structural word
    assert_eq!(kinds("WHEN"), vec![TokKind::Word("WHEN".into())]);
}

#[test]
fn reminder_and_quoted_text_are_single_tokens() {
    assert_eq!(
        kinds("(Hi.) \"{T}: Add {C}.\""),
        vec![
            TokKind::Reminder("Hi.".into()),
            TokKind::Quoted("{T}: Add {C}.".into()),
        ]
    );
}

#[test]
fn spans_cover_exact_source_bytes() {
    let src = "Sacrifice ~: Gain 2 life.";
    for tok in tokenize(src) {
        assert!(!tok.span.slice(src).is_empty());
    }
    let toks = tokenize(src);
    assert_eq!(toks[1].span.slice(src), "~");
    assert_eq!(toks[1].kind, TokKind::Word("~".into()));
}

#[test]
fn unknown_braces_and_characters_never_fail() {
    let toks = kinds("{CHAOS} ¤");
    assert!(toks.contains(&TokKind::Unknown('{')));
    assert!(toks.contains(&TokKind::Unknown('¤')));
}

#[test]
fn loyalty_costs_keep_their_sign() {
    assert_eq!(
        kinds("+1: −3:"),
        vec![
            TokKind::Word("+1".into()),
            TokKind::Colon,
            TokKind::Word("-3".into()),
            TokKind::Colon,
        ]
    );
}
