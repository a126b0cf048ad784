//! Trees produced by the grammar survive a trip through JSON unchanged.

use oracle_ast::prelude::*;
use oracle_parse::{parse_oracle_text, ParseOptions};

const CORPUS: &[(&str, &str)] = &[
    ("Serra Angel", "Flying, vigilance"),
    ("Llanowar Elves", "{T}: Add {G}."),
    ("Lightning Bolt", "Lightning Bolt deals 3 damage to any target."),
    ("Elvish Visionary", "When Elvish Visionary enters the battlefield, draw a card."),
    ("Giant Growth", "Target creature gets +3/+3 until end of turn."),
    ("Charm", "Choose one —\n• Destroy target artifact.\n• Draw a card."),
    ("Rest", "If a creature would die, exile it instead."),
    ("Bone Splinters", "As an additional cost to cast this spell, sacrifice a creature.\nDestroy target creature."),
    ("Gate", "~ enters tapped.\n{T}: Add {W} or {U}."),
    ("Walker", "+1: Draw a card.\n−X: Destroy target creature."),
    ("Knight", "Protection from red and from artifacts\nEquip {1}"),
    ("Mystery", "Zzyzx the Impossible does something nobody has written a parser for yet."),
    ("Tail", "Draw a card, then zzzz."),
    ("Huge", "Draw 3000000000 cards."),
    ("Kicked", "Kicker {2}{R}\nCycling {2}"),
];

#[test]
fn parsed_trees_round_trip_through_json() {
    for (name, text) in CORPUS {
        let oracle = parse_oracle_text(text, Some(name), &ParseOptions::default());
        let json = serde_json::to_string(&oracle).unwrap();
        let back: Oracle = serde_json::from_str(&json)
            .unwrap_or_else(|e| panic!("{name}: {e}\n{json}"));
        assert_eq!(back, oracle, "{name}");
    }
}

#[test]
fn round_trip_holds_without_reminder_text() {
    let opts = ParseOptions {
        keep_reminder_text: false,
        ..ParseOptions::default()
    };
    let text = "Flying (This creature can't be blocked except by creatures with flying or reach.), vigilance";
    let oracle = parse_oracle_text(text, None, &opts);
    let value = serde_json::to_value(&oracle).unwrap();
    let back: Oracle = serde_json::from_value(value).unwrap();
    assert_eq!(back, oracle);
}
