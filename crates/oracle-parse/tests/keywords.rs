use oracle_ast::prelude::*;
use oracle_parse::{parse_oracle_text, ParseOptions};

fn parse(text: &str) -> Oracle {
    parse_oracle_text(text, None, &ParseOptions::default())
}

fn static_effect(ability: &Ability) -> (&Option<String>, &EffectKind) {
    match ability {
        Ability::Static {
            keyword_source,
            effect,
            ..
        } => (keyword_source, &effect.kind),
        other => panic!("expected a static ability, got {other:?}"),
    }
}

#[test]
fn flying_is_evasion_blocked_by_flying_or_reach() {
    let oracle = parse("Flying");
    assert_eq!(oracle.abilities.len(), 1);
    assert!(oracle.diagnostics.is_empty());

    let (source, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(source.as_deref(), Some("Flying"));
    let EffectKind::Evasion {
        can_be_blocked_by: Some(blockers),
        ..
    } = kind
    else {
        panic!("expected evasion, got {kind:?}");
    };
    assert_eq!(blockers.card_types, vec!["creature"]);
    assert_eq!(blockers.characteristics, vec!["flying", "reach"]);
}

#[test]
fn protection_lists_each_quality_in_order() {
    let oracle = parse("Protection from red and from artifacts");
    assert_eq!(oracle.abilities.len(), 1);
    let (_, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(
        *kind,
        EffectKind::Protection {
            from: vec![
                ProtectionQuality {
                    kind: QualityKind::Color,
                    value: Some("red".into()),
                },
                ProtectionQuality {
                    kind: QualityKind::CardType,
                    value: Some("artifact".into()),
                },
            ],
        }
    );
}

#[test]
fn one_keyword_per_line_keeps_source_order() {
    let oracle = parse("Flying\nVigilance");
    assert_eq!(oracle.abilities.len(), 2);
    let (first, _) = static_effect(&oracle.abilities[0]);
    assert_eq!(first.as_deref(), Some("Flying"));
    let (second, kind) = static_effect(&oracle.abilities[1]);
    assert_eq!(second.as_deref(), Some("Vigilance"));
    assert_eq!(
        *kind,
        EffectKind::Marker {
            keyword: Keyword::Vigilance
        }
    );
}

#[test]
fn comma_separated_keywords_become_separate_abilities() {
    let oracle = parse("First strike, trample");
    let sources: Vec<_> = oracle
        .abilities
        .iter()
        .map(|a| static_effect(a).0.clone())
        .collect();
    assert_eq!(
        sources,
        vec![Some("First strike".to_string()), Some("Trample".to_string())]
    );
}

#[test]
fn reminder_text_is_kept_unless_disabled() {
    let text = "Flying (This creature can't be blocked except by creatures with flying or reach.)";
    let kept = parse(text);
    let Ability::Static { reminder, .. } = &kept.abilities[0] else {
        panic!("expected static");
    };
    assert!(reminder.as_deref().is_some_and(|r| r.starts_with("This creature")));

    let opts = ParseOptions {
        keep_reminder_text: false,
        ..ParseOptions::default()
    };
    let stripped = parse_oracle_text(text, None, &opts);
    let Ability::Static { reminder, .. } = &stripped.abilities[0] else {
        panic!("expected static");
    };
    assert!(reminder.is_none());
}

#[test]
fn ward_carries_its_cost() {
    let oracle = parse("Ward {2}");
    let (_, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(
        *kind,
        EffectKind::Ward {
            cost: Cost::Mana {
                symbols: vec![ManaSymbol::generic(2)],
            },
        }
    );
}

#[test]
fn equip_is_a_sorcery_speed_activated_ability() {
    let oracle = parse("Equip {1}");
    let Ability::Activated {
        costs,
        effect,
        keyword_source,
        restriction,
        ..
    } = &oracle.abilities[0]
    else {
        panic!("expected activated");
    };
    assert_eq!(keyword_source.as_deref(), Some("Equip"));
    assert_eq!(restriction.as_deref(), Some("Activate only as a sorcery"));
    assert_eq!(
        costs,
        &vec![Cost::Mana {
            symbols: vec![ManaSymbol::generic(1)]
        }]
    );
    let EffectKind::Attach { object, target } = &effect.kind else {
        panic!("expected attach, got {:?}", effect.kind);
    };
    assert_eq!(*object, ObjectReference::this());
    assert_eq!(target.kind, ReferenceKind::Target);
}

#[test]
fn keyword_json_uses_camel_case_discriminators() {
    let oracle = parse("Flying");
    let json = serde_json::to_value(&oracle).unwrap();
    let ability = &json["abilities"][0];
    assert_eq!(ability["abilityType"], "Static");
    assert_eq!(ability["keywordSource"], "Flying");
    assert_eq!(ability["effect"]["effectType"], "Evasion");
    assert_eq!(ability["effect"]["canBeBlockedBy"]["cardTypes"][0], "creature");
    assert!(json.get("diagnostics").is_none());
}

#[test]
fn reminder_text_between_keywords() {
    let oracle = parse(
        "Flying (This creature can't be blocked except by creatures with flying or reach.), vigilance",
    );
    assert!(oracle.diagnostics.is_empty(), "{:?}", oracle.diagnostics);
    assert_eq!(oracle.abilities.len(), 2);
    let Ability::Static { reminder, .. } = &oracle.abilities[0] else {
        panic!("expected static");
    };
    assert!(reminder.as_deref().is_some_and(|r| r.starts_with("This creature")));
    let (source, _) = static_effect(&oracle.abilities[1]);
    assert_eq!(source.as_deref(), Some("Vigilance"));
}

#[test]
fn landwalk_is_unblockable_against_that_land_type() {
    let oracle = parse("Swampwalk");
    let (source, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(source.as_deref(), Some("Swampwalk"));
    assert_eq!(
        *kind,
        EffectKind::Evasion {
            can_be_blocked_by: None,
            unblockable_condition: Some(UnblockableCondition::DefendingPlayerControls {
                subtype: "Swamp".into(),
            }),
            min_blockers: None,
        }
    );
}

#[test]
fn menace_needs_two_blockers() {
    let oracle = parse("Menace");
    let (source, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(source.as_deref(), Some("Menace"));
    assert!(matches!(
        kind,
        EffectKind::Evasion {
            min_blockers: Some(2),
            ..
        }
    ));
}

#[test]
fn kicker_is_an_optional_additional_cost() {
    let oracle = parse("Kicker {2}{R}");
    let (source, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(source.as_deref(), Some("Kicker"));
    let EffectKind::RequireAdditionalCost { cost } = kind else {
        panic!("expected additional cost, got {kind:?}");
    };
    assert!(cost.is_optional);
    assert_eq!(cost.keyword.as_deref(), Some("Kicker"));
    assert_eq!(
        cost.cost,
        Cost::Mana {
            symbols: vec![ManaSymbol::generic(2), ManaSymbol::colored(Color::Red)],
        }
    );
}

#[test]
fn flashback_is_an_alternative_cost_from_the_graveyard() {
    let oracle = parse("Flashback {3}{U}");
    let (source, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(source.as_deref(), Some("Flashback"));
    let EffectKind::AllowAlternativeCost { cost } = kind else {
        panic!("expected alternative cost, got {kind:?}");
    };
    assert_eq!(cost.condition.as_deref(), Some("cast from your graveyard"));
    assert_eq!(
        cost.cost,
        Cost::Mana {
            symbols: vec![ManaSymbol::generic(3), ManaSymbol::colored(Color::Blue)],
        }
    );
}

#[test]
fn cycling_discards_itself_to_draw() {
    let oracle = parse("Cycling {2}");
    let Ability::Activated {
        costs,
        effect,
        keyword_source,
        ..
    } = &oracle.abilities[0]
    else {
        panic!("expected activated");
    };
    assert_eq!(keyword_source.as_deref(), Some("Cycling"));
    assert_eq!(
        costs,
        &vec![
            Cost::Mana {
                symbols: vec![ManaSymbol::generic(2)]
            },
            Cost::Discard {
                object: ObjectReference::this(),
                quantity: Quantity::one(),
            },
        ]
    );
    assert_eq!(
        effect.kind,
        EffectKind::Draw {
            player: ObjectReference::you(),
            amount: Quantity::one(),
        }
    );
}

#[test]
fn enchant_names_what_it_can_enchant() {
    let oracle = parse("Enchant creature");
    let (source, kind) = static_effect(&oracle.abilities[0]);
    assert_eq!(source.as_deref(), Some("Enchant"));
    let EffectKind::Enchant { filter } = kind else {
        panic!("expected enchant, got {kind:?}");
    };
    assert_eq!(filter.card_types, vec!["creature"]);
}
