use oracle_ast::prelude::*;
use oracle_parse::{parse_oracle_text, ParseOptions};

fn parse_named(text: &str, name: &str) -> Oracle {
    parse_oracle_text(text, Some(name), &ParseOptions::default())
}

fn parse(text: &str) -> Oracle {
    parse_oracle_text(text, None, &ParseOptions::default())
}

fn only(oracle: &Oracle) -> &Ability {
    assert_eq!(oracle.abilities.len(), 1, "{:#?}", oracle.abilities);
    &oracle.abilities[0]
}

#[test]
fn mana_ability_splits_cost_and_effect() {
    let oracle = parse("{T}: Add {G}.");
    let Ability::Activated {
        costs,
        effect,
        restriction,
        ..
    } = only(&oracle)
    else {
        panic!("expected activated");
    };
    assert_eq!(costs, &vec![Cost::Tap { target: None }]);
    assert_eq!(
        effect.kind,
        EffectKind::AddMana {
            symbols: vec![ManaSymbol::colored(Color::Green)],
            any_color: None,
        }
    );
    assert!(restriction.is_none());
    assert!(oracle.diagnostics.is_empty());
}

#[test]
fn activated_costs_are_listed_in_order() {
    let oracle = parse("{2}, {T}, Sacrifice a creature: Draw two cards.");
    let Ability::Activated { costs, effect, .. } = only(&oracle) else {
        panic!("expected activated");
    };
    assert_eq!(costs.len(), 3);
    assert_eq!(
        costs[0],
        Cost::Mana {
            symbols: vec![ManaSymbol::generic(2)]
        }
    );
    assert_eq!(costs[1], Cost::Tap { target: None });
    assert_eq!(
        costs[2],
        Cost::Sacrifice {
            object: ObjectReference::with_filter(
                ReferenceKind::Indefinite,
                ObjectFilter::card_type("creature"),
            ),
            quantity: Quantity::one(),
        }
    );
    assert_eq!(
        effect.kind,
        EffectKind::Draw {
            player: ObjectReference::you(),
            amount: Quantity::literal(2),
        }
    );
}

#[test]
fn card_name_is_a_self_reference() {
    let oracle = parse_named("Lightning Bolt deals 3 damage to any target.", "Lightning Bolt");
    let Ability::Passive { effect } = only(&oracle) else {
        panic!("expected passive");
    };
    assert_eq!(
        effect.kind,
        EffectKind::DealDamage {
            source: Some(ObjectReference::this()),
            amount: Quantity::literal(3),
            target: ObjectReference::new(ReferenceKind::AnyTarget),
        }
    );
}

#[test]
fn enters_trigger_with_named_card() {
    let oracle = parse_named(
        "When Elvish Visionary enters the battlefield, draw a card.",
        "Elvish Visionary",
    );
    let Ability::Triggered { trigger, effect } = only(&oracle) else {
        panic!("expected triggered");
    };
    assert_eq!(trigger.word, TriggerWord::When);
    assert_eq!(trigger.text, "Elvish Visionary enters the battlefield");
    assert_eq!(
        trigger.event,
        Some(TriggerEvent::EntersBattlefield {
            object: ObjectReference::this()
        })
    );
    assert!(matches!(effect.kind, EffectKind::Draw { .. }));
}

#[test]
fn upkeep_trigger_names_the_step_and_player() {
    let oracle = parse("At the beginning of your upkeep, you lose 1 life.");
    let Ability::Triggered { trigger, effect } = only(&oracle) else {
        panic!("expected triggered");
    };
    assert_eq!(
        trigger.event,
        Some(TriggerEvent::BeginningOfStep {
            step: Step::Upkeep,
            player: Some(ObjectReference::you()),
        })
    );
    assert_eq!(
        effect.kind,
        EffectKind::LoseLife {
            player: ObjectReference::you(),
            amount: Quantity::literal(1),
        }
    );
}

#[test]
fn unknown_trigger_event_keeps_text_and_warns() {
    let oracle = parse("Whenever you cycle or discard a card, scry 1.");
    let Ability::Triggered { trigger, effect } = only(&oracle) else {
        panic!("expected triggered");
    };
    assert_eq!(trigger.text, "you cycle or discard a card");
    assert!(trigger.event.is_none());
    assert_eq!(
        effect.kind,
        EffectKind::Scry {
            amount: Quantity::literal(1)
        }
    );
    assert_eq!(oracle.diagnostics.len(), 1);
    assert_eq!(oracle.diagnostics[0].code, DiagnosticCode::UnparsedTrigger);
    assert_eq!(oracle.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn pump_until_end_of_turn_is_one_shot() {
    let oracle = parse("Target creature gets +2/+2 until end of turn.");
    let Ability::Passive { effect } = only(&oracle) else {
        panic!("expected passive");
    };
    assert_eq!(effect.duration, Some(Duration::UntilEndOfTurn));
    assert_eq!(
        effect.kind,
        EffectKind::ModifyPowerToughness {
            target: ObjectReference::with_filter(
                ReferenceKind::Target,
                ObjectFilter::card_type("creature"),
            ),
            power: Quantity::literal(2),
            toughness: Quantity::literal(2),
        }
    );
}

#[test]
fn if_you_do_attaches_to_previous_effect() {
    let oracle = parse("You may sacrifice a creature. If you do, draw two cards.");
    let Ability::Passive { effect } = only(&oracle) else {
        panic!("expected passive");
    };
    assert!(effect.is_optional);
    assert!(matches!(effect.kind, EffectKind::Sacrifice { .. }));
    let follow_up = effect.if_you_do.as_deref().expect("follow-up effect");
    assert_eq!(
        follow_up.kind,
        EffectKind::Draw {
            player: ObjectReference::you(),
            amount: Quantity::literal(2),
        }
    );
}

#[test]
fn modal_spell_collects_bulleted_modes() {
    let oracle = parse("Choose one —\n• Destroy target artifact.\n• Draw a card.");
    let Ability::Passive { effect } = only(&oracle) else {
        panic!("expected passive");
    };
    let EffectKind::Modal { choose, modes } = &effect.kind else {
        panic!("expected modal, got {:?}", effect.kind);
    };
    assert_eq!(*choose, Quantity::literal(1));
    assert_eq!(modes.len(), 2);
    assert!(matches!(modes[0].kind, EffectKind::Destroy { .. }));
    assert!(matches!(modes[1].kind, EffectKind::Draw { .. }));
}

#[test]
fn would_instead_is_a_static_replacement() {
    let oracle = parse("If a creature would die, exile it instead.");
    let Ability::Static { effect, .. } = only(&oracle) else {
        panic!("expected static");
    };
    let EffectKind::Replacement(r) = &effect.kind else {
        panic!("expected replacement, got {:?}", effect.kind);
    };
    assert_eq!(
        r.event,
        ReplacementEvent::Death {
            affected: Some(ObjectFilter::card_type("creature")),
            controller: None,
        }
    );
    assert!(!r.original_event_occurs);
    assert!(r.modifier.is_none());
    assert_eq!(
        r.replacement.kind,
        EffectKind::Exile {
            target: ObjectReference::it(),
            from: None,
        }
    );
}

#[test]
fn additional_cost_statement() {
    let oracle = parse("As an additional cost to cast this spell, sacrifice a creature.");
    let Ability::Static { effect, .. } = only(&oracle) else {
        panic!("expected static");
    };
    let EffectKind::RequireAdditionalCost { cost } = &effect.kind else {
        panic!("expected additional cost, got {:?}", effect.kind);
    };
    assert!(!cost.is_optional);
    assert!(matches!(cost.cost, Cost::Sacrifice { .. }));
}

#[test]
fn paragraphs_parse_independently() {
    let oracle = parse("Flying\n{T}: Add {G}.\nWhen ~ dies, draw a card.");
    let kinds: Vec<&str> = oracle
        .abilities
        .iter()
        .map(|a| match a {
            Ability::Static { .. } => "static",
            Ability::Activated { .. } => "activated",
            Ability::Triggered { .. } => "triggered",
            Ability::NamedTriggered { .. } => "named",
            Ability::Passive { .. } => "passive",
            Ability::Unparsed { .. } => "unparsed",
        })
        .collect();
    assert_eq!(kinds, vec!["static", "activated", "triggered"]);
}

fn static_kind(oracle: &Oracle) -> &EffectKind {
    match only(oracle) {
        Ability::Static { effect, .. } => &effect.kind,
        other => panic!("expected static, got {other:?}"),
    }
}

#[test]
fn rather_than_pay_is_an_alternative_cost() {
    let oracle = parse("You may pay 1 life rather than pay this spell's mana cost.");
    assert_eq!(
        *static_kind(&oracle),
        EffectKind::AllowAlternativeCost {
            cost: AlternativeCost {
                cost: Cost::PayLife {
                    amount: Quantity::literal(1)
                },
                condition: None,
                keyword: None,
            },
        }
    );
}

#[test]
fn costs_less_is_a_cost_reduction() {
    let oracle = parse("This spell costs {2} less to cast.");
    assert_eq!(
        *static_kind(&oracle),
        EffectKind::ReduceCost {
            reduction: CostReduction {
                amount: Quantity::literal(2),
                per: None,
                condition: None,
            },
        }
    );
}

#[test]
fn enters_tapped_replaces_the_zone_change() {
    let oracle = parse("~ enters tapped.");
    let EffectKind::Replacement(r) = static_kind(&oracle) else {
        panic!("expected replacement");
    };
    assert!(r.original_event_occurs);
    assert_eq!(r.modifier, Some(ReplacementModifier::EntersTapped));
    assert_eq!(
        r.replacement.kind,
        EffectKind::Tap {
            target: ObjectReference::this()
        }
    );
}

#[test]
fn enters_with_counters_records_type_and_amount() {
    let oracle = parse("~ enters with two +1/+1 counters on it.");
    let EffectKind::Replacement(r) = static_kind(&oracle) else {
        panic!("expected replacement");
    };
    assert_eq!(
        r.modifier,
        Some(ReplacementModifier::EntersWithCounters {
            counter_type: "+1/+1".into(),
            amount: Quantity::literal(2),
        })
    );
}

#[test]
fn loyalty_abilities_carry_their_change() {
    let oracle = parse("+1: Draw a card.\n−3: Destroy target creature.");
    assert_eq!(oracle.abilities.len(), 2);
    assert!(oracle.diagnostics.is_empty());
    let changes: Vec<&Cost> = oracle
        .abilities
        .iter()
        .map(|a| match a {
            Ability::Activated { costs, .. } => &costs[0],
            other => panic!("expected activated, got {other:?}"),
        })
        .collect();
    assert_eq!(changes[0], &Cost::Loyalty { change: 1 });
    assert_eq!(changes[1], &Cost::Loyalty { change: -3 });
}

#[test]
fn minus_x_loyalty_stays_activated() {
    let oracle = parse("−X: Destroy target creature.");
    let Ability::Activated { costs, effect, .. } = only(&oracle) else {
        panic!("expected activated, got {:?}", oracle.abilities);
    };
    assert_eq!(
        costs,
        &vec![Cost::VariableLoyalty {
            variable: "X".into(),
            negative: true,
        }]
    );
    assert!(matches!(effect.kind, EffectKind::Destroy { .. }));
    assert!(oracle.diagnostics.is_empty());
}

#[test]
fn attach_keeps_what_is_attached() {
    let oracle = parse("Attach ~ to target creature.");
    let Ability::Passive { effect } = only(&oracle) else {
        panic!("expected passive");
    };
    assert_eq!(
        effect.kind,
        EffectKind::Attach {
            object: ObjectReference::this(),
            target: ObjectReference::with_filter(
                ReferenceKind::Target,
                ObjectFilter::card_type("creature"),
            ),
        }
    );
}

#[test]
fn cant_be_regenerated_modifies_destroy() {
    let oracle = parse("Destroy target creature. It can't be regenerated.");
    let Ability::Passive { effect } = only(&oracle) else {
        panic!("expected passive");
    };
    assert!(matches!(
        effect.kind,
        EffectKind::Destroy {
            cant_be_regenerated: true,
            ..
        }
    ));
    assert!(oracle.diagnostics.is_empty());
}
