//! Object and player references, and the filters that narrow them.
//!
//! Every effect that names an object goes through [`Grammar::reference`], so
//! "target creature" has the same shape wherever it appears.

use super::{tok_key, Grammar};
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::TokKind;
use oracle_ast::prelude::*;

/// Card type nouns as (singular, plural).
const CARD_TYPES: &[(&str, &str)] = &[
    ("artifact", "artifacts"),
    ("creature", "creatures"),
    ("enchantment", "enchantments"),
    ("land", "lands"),
    ("planeswalker", "planeswalkers"),
    ("instant", "instants"),
    ("sorcery", "sorceries"),
    ("battle", "battles"),
    ("permanent", "permanents"),
    ("spell", "spells"),
    ("card", "cards"),
    ("player", "players"),
    ("opponent", "opponents"),
];

const SUPERTYPES: &[&str] = &["legendary", "basic", "snow", "world"];

const STATUS_WORDS: &[&str] = &[
    "tapped",
    "untapped",
    "attacking",
    "blocking",
    "nontoken",
    "other",
    "colorless",
    "multicolored",
    "monocolored",
];

/// Nouns that may follow "this" in a self reference.
const SELF_NOUNS: &[&str] = &[
    "creature",
    "permanent",
    "spell",
    "card",
    "artifact",
    "enchantment",
    "land",
    "planeswalker",
    "token",
    "aura",
    "equipment",
    "vehicle",
    "battle",
];

/// Capitalised words that open sentences and are never subtypes.
const NOT_SUBTYPES: &[&str] = &[
    "add", "attach", "copy", "counter", "create", "deal", "deals", "destroy", "discard", "draw",
    "exile", "fight", "gain", "gains", "get", "gets", "look", "lose", "mill", "prevent",
    "proliferate", "put", "remove", "return", "reveal", "sacrifice", "scry", "search", "shuffle",
    "surveil", "tap", "untap", "enchanted", "equipped", "activate", "as", "spells", "creatures",
    "other", "players", "flying", "reach", "protection", "ward", "equip", "cycling", "kicker",
    "flashback", "enchant", "until", "for", "whenever", "during", "cards", "lands", "artifacts",
    "permanents", "tokens", "damage", "its", "their", "his", "her",
];

pub(super) fn card_type(word: &str) -> Option<(&'static str, bool)> {
    CARD_TYPES.iter().find_map(|(one, many)| {
        if *one == word {
            Some((*one, false))
        } else if *many == word {
            Some((*one, true))
        } else {
            None
        }
    })
}

/// Plural creature subtypes back to the singular printed on type lines.
fn singular_subtype(raw: &str) -> String {
    const IRREGULAR: &[(&str, &str)] = &[
        ("Elves", "Elf"),
        ("Dwarves", "Dwarf"),
        ("Wolves", "Wolf"),
        ("Werewolves", "Werewolf"),
        ("Mercenaries", "Mercenary"),
        ("Fungi", "Fungus"),
        ("Sphinxes", "Sphinx"),
        ("Foxes", "Fox"),
    ];
    if let Some((_, one)) = IRREGULAR.iter().find(|(many, _)| *many == raw) {
        return (*one).to_string();
    }
    match raw.strip_suffix('s') {
        Some(stem) if !raw.ends_with("ss") && stem.len() > 2 => stem.to_string(),
        _ => raw.to_string(),
    }
}

enum Suffix {
    Controller(ControllerConstraint),
    Zone(Zone),
    Compare(NumericComparison),
    Characteristic(String),
    Raw(TextSpan),
}

impl Grammar<'_> {
    pub(super) fn reference(&mut self) -> Outcome<ObjectReference> {
        one_of!(
            self,
            self.cur
                .phrase("any target")
                .map(|_| ObjectReference::new(ReferenceKind::AnyTarget)),
            self.self_ref(),
            self.player_ref(),
            self.attempt(|g| g.targeted()),
            self.cur
                .phrase("an opponent")
                .map(|_| ObjectReference::new(ReferenceKind::Opponent)),
            self.controller_ref(),
            self.attempt(|g| g.anaphora()),
            self.attempt(|g| g.determined(&["enchanted", "equipped"], ReferenceKind::EnchantedOrEquipped)),
            self.attempt(|g| {
                g.cur.phrase("the chosen")?;
                let f = g.filter()?;
                Ok(ObjectReference::with_filter(ReferenceKind::Chosen, f))
            }),
            self.attempt(|g| g.determined(&["another"], ReferenceKind::Another)),
            self.attempt(|g| g.determined(&["each", "all"], ReferenceKind::Each)),
            self.attempt(|g| g.determined(&["a", "an"], ReferenceKind::Indefinite)),
            self.attempt(|g| {
                let (f, plural) = g.filter_with_number()?;
                if plural {
                    Ok(ObjectReference::with_filter(ReferenceKind::Each, f))
                } else {
                    g.cur.fail()
                }
            }),
        )
    }

    fn determined(&mut self, words: &[&str], kind: ReferenceKind) -> Outcome<ObjectReference> {
        self.cur.keyword_any(words)?;
        let f = self.filter()?;
        Ok(ObjectReference::with_filter(kind, f))
    }

    /// "~", the card's name, or "this creature" and friends.
    pub(super) fn self_ref(&mut self) -> Outcome<ObjectReference> {
        if self.cur.keyword("~").is_ok() {
            return Ok(ObjectReference::this());
        }
        if self
            .attempt(|g| {
                g.cur.keyword("this")?;
                g.cur.keyword_any(SELF_NOUNS)
            })
            .is_ok()
        {
            return Ok(ObjectReference::this());
        }
        if self.card_name(false) {
            return Ok(ObjectReference::this());
        }
        self.cur.fail()
    }

    /// Match the card's name at the cursor, optionally in possessive form.
    fn card_name(&mut self, possessive: bool) -> bool {
        let names = self.names;
        let src = self.cur.src();
        for key in names {
            let Some((last, init)) = key.split_last() else {
                continue;
            };
            let matched = init
                .iter()
                .enumerate()
                .all(|(i, k)| self.cur.peek_nth(i).is_some_and(|t| tok_key(t, src) == *k))
                && self.cur.peek_nth(init.len()).is_some_and(|t| {
                    let got = tok_key(t, src);
                    if possessive {
                        got == format!("{last}'s")
                    } else {
                        got == *last
                    }
                });
            if matched {
                for _ in 0..key.len() {
                    self.cur.bump();
                }
                return true;
            }
        }
        false
    }

    fn player_ref(&mut self) -> Outcome<ObjectReference> {
        one_of!(
            self,
            self.cur
                .phrase("each other player")
                .map(|_| ObjectReference::new(ReferenceKind::EachOtherPlayer)),
            self.cur
                .phrase("each opponent")
                .map(|_| ObjectReference::new(ReferenceKind::EachOpponent)),
            self.cur
                .phrase("each player")
                .map(|_| ObjectReference::new(ReferenceKind::EachPlayer)),
            self.cur
                .phrase("that player")
                .map(|_| ObjectReference::new(ReferenceKind::ThatPlayer)),
            self.cur
                .phrase("defending player")
                .map(|_| ObjectReference::new(ReferenceKind::DefendingPlayer)),
            self.cur.keyword("you").map(|_| ObjectReference::you()),
        )
    }

    /// "[another] [up to N] target <filter>"
    fn targeted(&mut self) -> Outcome<ObjectReference> {
        let another = self.cur.keyword("another").is_ok();
        let up_to = self
            .optional(|g| {
                g.cur.phrase("up to")?;
                g.quantity_atom()
            })
            .map(|q| match q.as_literal() {
                Some(n) => format!("up to {n}"),
                None => "up to".to_string(),
            });
        self.cur.keyword("target")?;
        let mut f = self.filter()?;
        if another {
            f.characteristics.insert(0, "another".into());
        }
        if let Some(up_to) = up_to {
            f.characteristics.push(up_to);
        }
        Ok(ObjectReference::with_filter(ReferenceKind::Target, f))
    }

    fn controller_ref(&mut self) -> Outcome<ObjectReference> {
        let kind = one_of!(
            self,
            self.cur.phrase("its controller").map(|_| ReferenceKind::Controller),
            self.cur.phrase("its owner").map(|_| ReferenceKind::Owner),
            self.attempt(|g| {
                g.cur.keyword_any(&["that", "enchanted", "equipped"])?;
                g.cur
                    .keyword_any(&["creature's", "spell's", "permanent's", "ability's"])?;
                g.cur.keyword("controller").map(|_| ReferenceKind::Controller)
            }),
        )?;
        Ok(ObjectReference::new(kind))
    }

    /// "it", "them", "that creature", "those cards".
    fn anaphora(&mut self) -> Outcome<ObjectReference> {
        if self.cur.keyword_any(&["it", "them", "they"]).is_ok() {
            return Ok(ObjectReference::it());
        }
        self.cur.keyword_any(&["that", "those"])?;
        let noun = self.cur.any_word()?;
        if card_type(&noun).is_some() || noun == "token" || noun == "tokens" {
            Ok(ObjectReference::it())
        } else {
            self.cur.fail()
        }
    }

    /// An object or player in possessive position: "its", "your", "~'s".
    pub(super) fn possessive(&mut self) -> Outcome<ObjectReference> {
        if self.card_name(true) {
            return Ok(ObjectReference::this());
        }
        let word = self.cur.any_word()?;
        let kind = match word.as_str() {
            "its" => return Ok(ObjectReference::it()),
            "your" => return Ok(ObjectReference::you()),
            "their" => return Ok(ObjectReference::new(ReferenceKind::ThatPlayer)),
            "~'s" => return Ok(ObjectReference::this()),
            "this" => ReferenceKind::This,
            "enchanted" | "equipped" => ReferenceKind::EnchantedOrEquipped,
            "that" | "the" => ReferenceKind::It,
            _ => return self.cur.fail(),
        };
        if word == "the" {
            // "the sacrificed creature's", "the exiled card's"
            let _ = self.cur.keyword_any(&["sacrificed", "exiled", "chosen", "target"]);
        }
        let noun = self.cur.any_word()?;
        match noun.strip_suffix("'s") {
            Some(stem) if card_type(stem).is_some() || SELF_NOUNS.contains(&stem) => {
                Ok(ObjectReference::new(kind))
            }
            _ => self.cur.fail(),
        }
    }

    /// "a creature", "two cards", "another creature", "~": an object count
    /// as used by costs and sacrifice effects.
    pub(super) fn counted_object(&mut self) -> Outcome<(ObjectReference, Quantity)> {
        one_of!(
            self,
            self.self_ref().map(|r| (r, Quantity::one())),
            self.attempt(|g| {
                g.cur.keyword("another")?;
                let f = g.filter()?;
                Ok((ObjectReference::with_filter(ReferenceKind::Another, f), Quantity::one()))
            }),
            self.attempt(|g| {
                let q = g.quantity()?;
                let f = g.filter()?;
                Ok((ObjectReference::with_filter(ReferenceKind::Indefinite, f), q))
            }),
        )
    }

    pub(super) fn filter(&mut self) -> Outcome<ObjectFilter> {
        self.filter_with_number().map(|(f, _)| f)
    }

    /// A filter, and whether its head noun was plural.
    pub(super) fn filter_with_number(&mut self) -> Outcome<(ObjectFilter, bool)> {
        let mut f = ObjectFilter::default();
        let mut plural = false;
        let mut first = true;
        loop {
            let before = f.clone();
            let got = self.attempt(|g| {
                if !first {
                    let comma = g.cur.punct(TokKind::Comma).is_ok();
                    let or = g.cur.keyword("or").is_ok();
                    if comma && !or && g.cur.at_word("and") {
                        return g.cur.fail();
                    }
                }
                g.filter_prefixes(&mut f);
                g.filter_noun(&mut f)
            });
            match got {
                Ok(p) => plural |= p,
                Err(_) => {
                    f = before;
                    break;
                }
            }
            first = false;
        }
        if f.card_types.is_empty() && f.subtypes.is_empty() {
            return self.cur.fail();
        }
        while let Ok(suffix) = self.attempt(|g| g.filter_suffix()) {
            match suffix {
                Suffix::Controller(c) => f.controller = Some(c),
                Suffix::Zone(z) => f.zone = Some(z),
                Suffix::Compare(c) => f.comparisons.push(c),
                Suffix::Characteristic(c) => f.characteristics.push(c),
                Suffix::Raw(span) => {
                    f.characteristics.push(self.cur.text(span).to_string());
                    f.source_span = Some(span);
                    self.issue(DiagnosticCode::UnparsedFilter, span);
                }
            }
        }
        Ok((f, plural))
    }

    fn filter_prefixes(&mut self, f: &mut ObjectFilter) {
        while let Some(word) = self.cur.peek_word() {
            if let Some(color) = Color::from_word(&word) {
                self.cur.bump();
                f.colors.push(color);
                let next_is_color = self
                    .cur
                    .peek_word_nth(1)
                    .is_some_and(|w| Color::from_word(&w).is_some());
                if self.cur.at_word("or") && next_is_color {
                    self.cur.bump();
                }
                continue;
            }
            if SUPERTYPES.contains(&word.as_str()) {
                f.supertypes.push(word);
            } else if STATUS_WORDS.contains(&word.as_str()) {
                f.characteristics.push(word);
            } else if let Some(rest) = word.strip_prefix("non") {
                let rest = rest.trim_start_matches('-');
                match card_type(rest) {
                    Some((one, _)) => f.excluded_types.push(one.to_string()),
                    None if rest.len() >= 3 && word != "none" => f.characteristics.push(word),
                    None => break,
                }
            } else {
                break;
            }
            self.cur.bump();
        }
    }

    /// One type noun or subtype; returns whether it was plural.
    fn filter_noun(&mut self, f: &mut ObjectFilter) -> Outcome<bool> {
        let Some(tok) = self.cur.peek() else {
            return self.cur.fail();
        };
        let Some(word) = tok.word(self.cur.src()) else {
            return self.cur.fail();
        };
        let has_head = !f.card_types.is_empty() || !f.subtypes.is_empty();
        if let Some((one, plural)) = card_type(&word) {
            self.cur.bump();
            match one {
                // "land card", "creature spell": the head noun already names the type
                "card" if has_head => {}
                "spell" if has_head => f.zone = Some(Zone::Stack),
                _ => f.card_types.push(one.to_string()),
            }
            return Ok(plural);
        }
        if (word == "token" || word == "tokens") && has_head {
            self.cur.bump();
            f.characteristics.push("token".into());
            return Ok(word == "tokens");
        }
        if let TokKind::Word(raw) = &tok.kind {
            let capitalised = raw.chars().next().is_some_and(char::is_uppercase);
            if capitalised && raw != "~" && !NOT_SUBTYPES.contains(&word.as_str()) {
                self.cur.bump();
                f.subtypes.push(singular_subtype(raw));
                return Ok(raw.ends_with('s'));
            }
        }
        self.cur.fail()
    }

    fn filter_suffix(&mut self) -> Outcome<Suffix> {
        one_of!(
            self,
            self.cur
                .phrase("you control")
                .map(|_| Suffix::Controller(ControllerConstraint::You)),
            self.cur
                .phrase("you don't control")
                .map(|_| Suffix::Controller(ControllerConstraint::NotYou)),
            self.cur
                .phrase("an opponent controls")
                .map(|_| Suffix::Controller(ControllerConstraint::Opponent)),
            self.cur
                .phrase("your opponents control")
                .map(|_| Suffix::Controller(ControllerConstraint::Opponent)),
            self.cur
                .phrase("you own")
                .map(|_| Suffix::Characteristic("you own".into())),
            self.cur
                .phrase("on the battlefield")
                .map(|_| Suffix::Zone(Zone::Battlefield)),
            self.attempt(|g| g.zone_suffix()),
            self.attempt(|g| g.comparison_suffix()),
            self.attempt(|g| g.keyword_suffix()),
            self.attempt(|g| g.raw_with_suffix()),
        )
    }

    /// "from your graveyard", "in a graveyard", "from exile"
    fn zone_suffix(&mut self) -> Outcome<Suffix> {
        self.cur.keyword_any(&["in", "from"])?;
        let _ = self.cur.keyword_any(&["your", "a", "an", "their", "its", "target"]);
        let _ = self
            .cur
            .keyword_any(&["opponent's", "player's", "owner's", "owners'"]);
        let word = self.cur.any_word()?;
        match Zone::from_word(&word) {
            Some(Zone::Battlefield) | None => self.cur.fail(),
            Some(zone) => Ok(Suffix::Zone(zone)),
        }
    }

    /// "with power 2 or less", "with mana value 3 or greater"
    fn comparison_suffix(&mut self) -> Outcome<Suffix> {
        self.cur.keyword("with")?;
        let stat = one_of!(
            self,
            self.cur.phrase("mana value").map(|_| Stat::ManaValue),
            self.cur.keyword("power").map(|_| Stat::Power),
            self.cur.keyword("toughness").map(|_| Stat::Toughness),
        )?;
        let value = self.quantity_atom()?;
        let op = one_of!(
            self,
            self.cur
                .phrase("or greater")
                .map(|_| Comparison::GreaterOrEqual),
            self.cur.phrase("or more").map(|_| Comparison::GreaterOrEqual),
            self.cur.phrase("or less").map(|_| Comparison::LessOrEqual),
        )
        .unwrap_or(Comparison::Equal);
        Ok(Suffix::Compare(NumericComparison { stat, op, value }))
    }

    /// "with flying"
    fn keyword_suffix(&mut self) -> Outcome<Suffix> {
        self.cur.keyword("with")?;
        let name = self.keyword_name()?;
        Ok(Suffix::Characteristic(name))
    }

    /// "with <anything>": kept as raw text up to the clause boundary.
    fn raw_with_suffix(&mut self) -> Outcome<Suffix> {
        self.cur.keyword("with")?;
        let start = self.cur.pos();
        while let Some(tok) = self.cur.peek() {
            let stop = tok.is_punct()
                || matches!(tok.kind, TokKind::Reminder(_) | TokKind::Newline)
                || tok.word(self.cur.src()).is_some_and(|w| {
                    matches!(
                        w.as_str(),
                        "and" | "then" | "until" | "unless" | "to" | "onto" | "into" | "gets"
                            | "get" | "gains" | "gain" | "has" | "have" | "deals" | "dies"
                    )
                });
            if stop {
                break;
            }
            self.cur.bump();
        }
        if self.cur.pos() == start {
            return self.cur.fail();
        }
        Ok(Suffix::Raw(self.cur.span_from(start)))
    }
}
