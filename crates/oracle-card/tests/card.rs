use oracle_ast::prelude::*;
use oracle_card::{parse_batch, parse_card, CardInput, ParseOptions};

fn opts() -> ParseOptions {
    ParseOptions::default()
}

fn attribute<'a>(
    attributes: &'a [CardAttribute],
    pick: impl Fn(&CardAttribute) -> bool,
) -> Option<&'a CardAttribute> {
    attributes.iter().find(|a| pick(a))
}

#[test]
fn mana_cost_becomes_attribute() {
    let card = CardInput {
        name: "Woodland Giant".into(),
        type_line: Some("Creature — Giant".into()),
        mana_cost: Some("{2}{G}{G}".into()),
        power: Some("4".into()),
        toughness: Some("4".into()),
        ..CardInput::default()
    };
    let result = parse_card(&card, &opts());
    assert!(result.succeeded);
    assert_eq!(
        result.ast.attributes[0],
        CardAttribute::ManaCost {
            symbols: vec![
                ManaSymbol::generic(2),
                ManaSymbol::colored(Color::Green),
                ManaSymbol::colored(Color::Green),
            ],
            mana_value: 4,
            is_variable: false,
        }
    );
    assert!(result.ast.attributes.contains(&CardAttribute::Colors {
        colors: vec![Color::Green]
    }));
    assert!(result.ast.attributes.contains(&CardAttribute::CreatureStats {
        power: PowerToughnessValue::Fixed { value: 4 },
        toughness: PowerToughnessValue::Fixed { value: 4 },
    }));
    assert_eq!(result.ast.type_line.subtypes, vec!["Giant"]);
}

#[test]
fn variable_cost_counts_zero() {
    let card = CardInput {
        name: "Blaze".into(),
        mana_cost: Some("{X}{R}".into()),
        ..CardInput::default()
    };
    let result = parse_card(&card, &opts());
    let Some(CardAttribute::ManaCost {
        mana_value,
        is_variable,
        ..
    }) = attribute(&result.ast.attributes, |a| {
        matches!(a, CardAttribute::ManaCost { .. })
    })
    else {
        panic!("no mana cost attribute");
    };
    assert_eq!(*mana_value, 1);
    assert!(*is_variable);
}

#[test]
fn bad_mana_cost_is_an_error() {
    let card = CardInput {
        name: "Broken".into(),
        mana_cost: Some("{2}{G".into()),
        ..CardInput::default()
    };
    let result = parse_card(&card, &opts());
    assert!(!result.succeeded);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::InvalidManaCost);
    assert_eq!(result.diagnostics[0].text.as_deref(), Some("{2}{G"));
}

#[test]
fn oversized_mana_cost_is_an_error_not_a_panic() {
    let huge = CardInput {
        name: "Too Big".into(),
        mana_cost: Some("{4294967295}{1}".into()),
        oracle_text: Some("Flying".into()),
        ..CardInput::default()
    };
    let result = parse_card(&huge, &opts());
    assert!(!result.succeeded);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::InvalidManaCost);
    assert!(!result
        .ast
        .attributes
        .iter()
        .any(|a| matches!(a, CardAttribute::ManaCost { .. })));

    let results = parse_batch(&[huge, CardInput::from_text("Bird", "Flying")], &opts());
    assert_eq!(results.len(), 2);
    assert!(!results[0].succeeded);
    assert!(results[1].succeeded);
}

#[test]
fn unparsed_card_fails_but_returns_a_tree() {
    let text = "Zzyzx the Impossible does something nobody has written a parser for yet.";
    let result = parse_card(&CardInput::from_text("Test Card", text), &opts());
    assert!(!result.succeeded);
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.ast.oracle.abilities.len(), 1);
    let Ability::Unparsed { raw_text, .. } = &result.ast.oracle.abilities[0] else {
        panic!("expected unparsed ability");
    };
    assert_eq!(raw_text, text);
}

#[test]
fn split_card_faces_parse_independently() {
    let card = CardInput {
        name: "Fire // Ice".into(),
        type_line: Some("Instant // Instant".into()),
        mana_cost: Some("{1}{R} // {1}{U}".into()),
        oracle_text: Some("Zzyzx burns things.\n//\nDraw a card.".into()),
        colors: Some(vec!["U".into(), "R".into()]),
        layout: Some("split".into()),
        ..CardInput::default()
    };
    let result = parse_card(&card, &opts());
    let faces = result.ast.faces.as_ref().expect("faces");
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0].name, "Fire");
    assert_eq!(faces[1].name, "Ice");

    // the unparsed first face does not leak into the second
    assert!(faces[0].oracle.abilities[0].is_unparsed());
    assert_eq!(faces[1].oracle.abilities.len(), 1);
    assert!(faces[1].oracle.diagnostics.is_empty());
    assert!(!result.succeeded);

    assert!(matches!(
        &faces[1].attributes[0],
        CardAttribute::ManaCost { mana_value: 2, .. }
    ));
    assert!(faces[1].attributes.contains(&CardAttribute::Colors {
        colors: vec![Color::Blue]
    }));

    // root: own printed characteristics only
    assert!(result.ast.oracle.abilities.is_empty());
    assert_eq!(
        result.ast.attributes,
        vec![
            CardAttribute::Colors {
                colors: vec![Color::Blue, Color::Red]
            },
            CardAttribute::Layout {
                layout: "split".into()
            },
        ]
    );
    assert_eq!(result.ast.type_line.types, vec!["Instant"]);
}

#[test]
fn upstream_faces_take_precedence() {
    let json = r#"{
        "name": "Delver of Secrets // Insectile Aberration",
        "layout": "transform",
        "card_faces": [
            {"name": "Delver of Secrets", "type_line": "Creature — Human Wizard",
             "mana_cost": "{U}", "power": "1", "toughness": "1", "oracle_text": ""},
            {"name": "Insectile Aberration", "type_line": "Creature — Human Insect",
             "mana_cost": "", "power": "3", "toughness": "2", "oracle_text": "Flying",
             "color_indicator": ["U"]}
        ]
    }"#;
    let cards = CardInput::list_from_json(json).unwrap();
    let result = parse_card(&cards[0], &opts());
    let faces = result.ast.faces.unwrap();
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[1].oracle.abilities.len(), 1);
    assert!(faces[1].attributes.contains(&CardAttribute::Colors {
        colors: vec![Color::Blue]
    }));
    assert!(!faces[1]
        .attributes
        .iter()
        .any(|a| matches!(a, CardAttribute::ManaCost { .. })));
    assert!(result.succeeded);
}

#[test]
fn cost_statements_become_attributes() {
    let card = CardInput::from_text(
        "Bone Splinters",
        "As an additional cost to cast this spell, sacrifice a creature.\nDestroy target creature.",
    );
    let result = parse_card(&card, &opts());
    let Some(CardAttribute::AdditionalCosts { costs }) =
        attribute(&result.ast.attributes, |a| {
            matches!(a, CardAttribute::AdditionalCosts { .. })
        })
    else {
        panic!("no additional costs: {:?}", result.ast.attributes);
    };
    assert_eq!(costs.len(), 1);
    assert!(matches!(costs[0].cost, Cost::Sacrifice { .. }));
}

#[test]
fn starred_stats() {
    let card = CardInput {
        name: "Tarmogoyf".into(),
        power: Some("*".into()),
        toughness: Some("1+*".into()),
        ..CardInput::default()
    };
    let result = parse_card(&card, &opts());
    assert!(result.ast.attributes.contains(&CardAttribute::CreatureStats {
        power: PowerToughnessValue::Variable { derived_from: None },
        toughness: PowerToughnessValue::Derived {
            base: 1,
            derived_from: "*".into()
        },
    }));
}

#[test]
fn batch_keeps_input_order() {
    let cards: Vec<CardInput> = (0..50)
        .map(|i| CardInput::from_text(format!("Card {i}"), "Flying"))
        .collect();
    let results = parse_batch(&cards, &opts());
    assert_eq!(results.len(), 50);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.ast.name, format!("Card {i}"));
        assert!(result.succeeded);
    }
}

#[test]
fn repeated_parses_are_identical() {
    let card = CardInput::from_text("Prodigal Sorcerer", "{T}: Prodigal Sorcerer deals 1 damage to any target.");
    let a = serde_json::to_string(&parse_card(&card, &opts())).unwrap();
    let b = serde_json::to_string(&parse_card(&card, &opts())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn card_output_round_trips_through_json() {
    let cards = [
        CardInput {
            name: "Fire // Ice".into(),
            type_line: Some("Instant // Instant".into()),
            mana_cost: Some("{1}{R} // {1}{U}".into()),
            oracle_text: Some("Zzyzx burns things.\n//\nDraw a card.".into()),
            layout: Some("split".into()),
            ..CardInput::default()
        },
        CardInput {
            name: "Tarmogoyf".into(),
            type_line: Some("Creature — Lhurgoyf".into()),
            mana_cost: Some("{1}{G}".into()),
            power: Some("*".into()),
            toughness: Some("1+*".into()),
            ..CardInput::default()
        },
        CardInput {
            name: "Bone Splinters".into(),
            type_line: Some("Sorcery".into()),
            mana_cost: Some("{B}".into()),
            oracle_text: Some(
                "As an additional cost to cast this spell, sacrifice a creature.\nDestroy target creature."
                    .into(),
            ),
            ..CardInput::default()
        },
    ];
    for result in parse_batch(&cards, &opts()) {
        let json = serde_json::to_string(&result.ast).unwrap();
        let back: CardOutputAst = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result.ast);
    }
}
