use oracle_ast::mana::ManaSymbol;
use oracle_ast::span::TextSpan;

/// Braced symbols other than plain words.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Mana(ManaSymbol),
    Tap,    // {T}
    Untap,  // {Q}
    Energy, // {E}
}

/// Closed table of words the grammar branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructWord {
    // triggers
    When,
    Whenever,
    At,
    // conditionals
    If,
    Unless,
    Instead,
    Would,
    // modal
    Choose,
    Or,
    And,
    Then,
    // references
    Target,
    This,
    That,
    It,
    You,
    Your,
    Each,
    All,
    Another,
    Any,
}

impl StructWord {
    const TABLE: [(StructWord, &'static str); 21] = [
        (StructWord::When, "when"),
        (StructWord::Whenever, "whenever"),
        (StructWord::At, "at"),
        (StructWord::If, "if"),
        (StructWord::Unless, "unless"),
        (StructWord::Instead, "instead"),
        (StructWord::Would, "would"),
        (StructWord::Choose, "choose"),
        (StructWord::Or, "or"),
        (StructWord::And, "and"),
        (StructWord::Then, "then"),
        (StructWord::Target, "target"),
        (StructWord::This, "this"),
        (StructWord::That, "that"),
        (StructWord::It, "it"),
        (StructWord::You, "you"),
        (StructWord::Your, "your"),
        (StructWord::Each, "each"),
        (StructWord::All, "all"),
        (StructWord::Another, "another"),
        (StructWord::Any, "any"),
    ];

    /// Matches the lower-case or capitalised form exactly; `WHEN` stays a word.
    pub fn classify(word: &str) -> Option<StructWord> {
        let mut chars = word.chars();
        let first = chars.next()?;
        let rest = chars.as_str();
        if rest.chars().any(|c| c.is_ascii_uppercase()) {
            return None;
        }
        let lowered = format!("{}{}", first.to_ascii_lowercase(), rest);
        Self::TABLE
            .iter()
            .find(|(_, text)| *text == lowered)
            .map(|(w, _)| *w)
    }

    pub fn as_str(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(w, _)| *w == self)
            .map(|(_, text)| *text)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    Newline,
    Symbol(Symbol),
    /// Parenthesised reminder text, without the parentheses.
    Reminder(String),
    /// Double-quoted text, without the quotes.
    Quoted(String),
    // punctuation
    Colon,
    Comma,
    Period,
    Semicolon,
    Slash,
    EmDash,
    Bullet,
    LParen, // unmatched
    RParen,
    Quote, // unmatched
    // numbers: digits or spelled-out words
    Number { value: u32, spelled: bool },
    Structural(StructWord),
    Word(String),
    /// Low-confidence fallback for characters nothing else claims.
    Unknown(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tok {
    pub kind: TokKind,
    pub span: TextSpan,
}

impl Tok {
    /// Lower-cased text for word-like tokens (words, structural words,
    /// spelled numbers); `None` for everything else.
    pub fn word(&self, src: &str) -> Option<String> {
        match &self.kind {
            TokKind::Word(w) => Some(w.to_lowercase()),
            TokKind::Structural(s) => Some(s.as_str().to_string()),
            TokKind::Number { spelled: true, .. } => Some(self.span.slice(src).to_lowercase()),
            _ => None,
        }
    }

    pub fn is_punct(&self) -> bool {
        matches!(
            self.kind,
            TokKind::Colon
                | TokKind::Comma
                | TokKind::Period
                | TokKind::Semicolon
                | TokKind::Slash
                | TokKind::EmDash
                | TokKind::Bullet
                | TokKind::LParen
                | TokKind::RParen
                | TokKind::Quote
        )
    }
}

pub(crate) const NUMBER_WORDS: [(&str, u32); 21] = [
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
];

pub(crate) fn number_word(word: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| w.eq_ignore_ascii_case(word))
        .map(|(_, n)| *n)
}
