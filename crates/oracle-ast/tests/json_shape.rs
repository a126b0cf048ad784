use oracle_ast::prelude::*;
use serde_json::json;

#[test]
fn self_reference_serializes_as_self() {
    let value = serde_json::to_value(ObjectReference::this()).unwrap();
    assert_eq!(value, json!({ "kind": "Self" }));
}

#[test]
fn effect_modifiers_sit_beside_the_discriminator() {
    let effect = Effect::new(EffectKind::Draw {
        player: ObjectReference::you(),
        amount: Quantity::one(),
    })
    .optional()
    .if_you_do(Effect::new(EffectKind::Proliferate));

    let value = serde_json::to_value(&effect).unwrap();
    assert_eq!(
        value,
        json!({
            "effectType": "Draw",
            "player": { "kind": "You" },
            "amount": { "quantityType": "Literal", "value": 1 },
            "isOptional": true,
            "ifYouDo": { "effectType": "Proliferate" },
        })
    );
    let back: Effect = serde_json::from_value(value).unwrap();
    assert_eq!(back, effect);
}

#[test]
fn replacement_flattens_into_the_effect_object() {
    let effect = Effect::new(EffectKind::Replacement(ReplacementEffect {
        event: ReplacementEvent::TokenCreation {
            affected: None,
            controller: Some(ObjectReference::you()),
        },
        original_event_occurs: false,
        replacement: Box::new(Effect::new(EffectKind::Proliferate)),
        modifier: Some(ReplacementModifier::Double),
    }));
    let value = serde_json::to_value(&effect).unwrap();
    assert_eq!(value["effectType"], "Replacement");
    assert_eq!(value["event"]["eventType"], "TokenCreation");
    assert_eq!(value["modifier"]["modifierType"], "Double");
    let back: Effect = serde_json::from_value(value).unwrap();
    assert_eq!(back, effect);
}

#[test]
fn diagnostics_use_stable_codes() {
    let d = Diagnostic::at(DiagnosticCode::UnparsedCost, TextSpan::new(4, 9), "dance");
    let value = serde_json::to_value(&d).unwrap();
    assert_eq!(value["code"], "AST003");
    assert_eq!(value["severity"], "error");
    assert_eq!(value["span"], json!({ "start": 4, "end": 9 }));
    let back: Diagnostic = serde_json::from_value(value).unwrap();
    assert_eq!(back, d);
}

#[test]
fn unknown_discriminator_is_rejected() {
    let err = serde_json::from_value::<Cost>(json!({ "costType": "Juggle" }));
    assert!(err.is_err());
}

#[test]
fn card_output_omits_empty_collections() {
    let card = CardOutputAst {
        name: "Grizzly Bears".into(),
        type_line: TypeLine {
            raw: "Creature — Bear".into(),
            supertypes: Vec::new(),
            types: vec!["Creature".into()],
            subtypes: vec!["Bear".into()],
        },
        oracle: Oracle::default(),
        attributes: Vec::new(),
        faces: None,
    };
    let value = serde_json::to_value(&card).unwrap();
    assert!(value.get("attributes").is_none());
    assert!(value.get("faces").is_none());
    assert!(value["typeLine"].get("supertypes").is_none());
    assert_eq!(value["oracle"], json!({ "abilities": [] }));
    let back: CardOutputAst = serde_json::from_value(value).unwrap();
    assert_eq!(back, card);
}
