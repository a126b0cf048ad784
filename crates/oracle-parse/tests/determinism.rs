use oracle_parse::{parse_oracle_text, ParseOptions};

const TEXTS: &[&str] = &[
    "Flying, vigilance",
    "{2}, {T}, Sacrifice a creature: Draw two cards.",
    "When ~ enters the battlefield, you gain 3 life.",
    "Choose one —\n• Destroy target artifact.\n• Draw a card.",
    "Zzyzx the Impossible does something nobody has written a parser for yet.",
];

#[test]
fn same_input_gives_identical_json() {
    let opts = ParseOptions::default();
    for text in TEXTS {
        let a = serde_json::to_string(&parse_oracle_text(text, Some("Test Card"), &opts)).unwrap();
        let b = serde_json::to_string(&parse_oracle_text(text, Some("Test Card"), &opts)).unwrap();
        assert_eq!(a, b, "{text}");
    }
}

#[test]
fn parse_options_accept_partial_json() {
    let opts: ParseOptions = serde_json::from_str(r#"{"keepReminderText": false}"#).unwrap();
    assert_eq!(opts.max_nesting_depth, ParseOptions::default().max_nesting_depth);
    assert!(!opts.keep_reminder_text);
}
