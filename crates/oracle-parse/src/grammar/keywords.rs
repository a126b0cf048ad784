//! Keyword abilities: "Flying, vigilance", "Protection from red",
//! "Ward {2}", "Equip {1}" and friends.

use super::reference::card_type;
use super::Grammar;
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::{Tok, TokKind};
use oracle_ast::prelude::*;

const MARKERS: &[(&str, Keyword)] = &[
    ("first strike", Keyword::FirstStrike),
    ("double strike", Keyword::DoubleStrike),
    ("vigilance", Keyword::Vigilance),
    ("trample", Keyword::Trample),
    ("haste", Keyword::Haste),
    ("lifelink", Keyword::Lifelink),
    ("reach", Keyword::Reach),
    ("flash", Keyword::Flash),
    ("deathtouch", Keyword::Deathtouch),
    ("defender", Keyword::Defender),
    ("hexproof", Keyword::Hexproof),
    ("indestructible", Keyword::Indestructible),
    ("shroud", Keyword::Shroud),
];

const LANDWALKS: &[(&str, &str)] = &[
    ("plainswalk", "Plains"),
    ("islandwalk", "Island"),
    ("swampwalk", "Swamp"),
    ("mountainwalk", "Mountain"),
    ("forestwalk", "Forest"),
];

/// "first strike" -> "First strike"
fn display_name(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn keyword_static(source: &str, kind: EffectKind) -> Ability {
    Ability::Static {
        keyword_source: Some(source.to_string()),
        effect: Effect::new(kind),
        reminder: None,
    }
}

fn creature_you_control() -> ObjectReference {
    ObjectReference::with_filter(
        ReferenceKind::Target,
        ObjectFilter {
            controller: Some(ControllerConstraint::You),
            ..ObjectFilter::card_type("creature")
        },
    )
}

impl Grammar<'_> {
    /// A comma- or semicolon-separated run of keywords, one ability each.
    /// Reminder text may follow any keyword in the run.
    pub(super) fn keyword_line(&mut self) -> Outcome<Vec<Ability>> {
        let mut abilities = self.sep_by(
            |g| g.keyword_with_reminder(),
            |g| {
                one_of!(
                    g,
                    g.cur.punct(TokKind::Comma),
                    g.cur.punct(TokKind::Semicolon),
                )
                .map(|_| ())
            },
        )?;
        let _ = self.cur.punct(TokKind::Period);
        if let Some(text) = self.reminder_token() {
            if let Some(last) = abilities.last_mut() {
                self.keep_reminder(last, text);
            }
        }
        Ok(abilities)
    }

    fn keyword_with_reminder(&mut self) -> Outcome<Ability> {
        let mut ability = self.keyword_ability()?;
        if let Some(text) = self.reminder_token() {
            self.keep_reminder(&mut ability, text);
        }
        Ok(ability)
    }

    fn reminder_token(&mut self) -> Option<String> {
        match self.cur.peek() {
            Some(Tok {
                kind: TokKind::Reminder(text),
                ..
            }) => {
                self.cur.bump();
                Some(text.clone())
            }
            _ => None,
        }
    }

    fn keep_reminder(&self, ability: &mut Ability, text: String) {
        if !self.opts.keep_reminder_text {
            return;
        }
        if let Ability::Static { reminder, .. } | Ability::Activated { reminder, .. } = ability {
            *reminder = Some(text);
        }
    }

    fn keyword_ability(&mut self) -> Outcome<Ability> {
        one_of!(
            self,
            self.cur.keyword("flying").map(|_| {
                let blockers = ObjectFilter {
                    characteristics: vec!["flying".into(), "reach".into()],
                    ..ObjectFilter::card_type("creature")
                };
                keyword_static(
                    "Flying",
                    EffectKind::Evasion {
                        can_be_blocked_by: Some(blockers),
                        unblockable_condition: None,
                        min_blockers: None,
                    },
                )
            }),
            self.marker(),
            self.cur.keyword("menace").map(|_| {
                keyword_static(
                    "Menace",
                    EffectKind::Evasion {
                        can_be_blocked_by: None,
                        unblockable_condition: None,
                        min_blockers: Some(2),
                    },
                )
            }),
            self.landwalk(),
            self.attempt(|g| g.protection()),
            self.attempt(|g| g.ward()),
            self.attempt(|g| g.equip()),
            self.attempt(|g| g.cycling()),
            self.attempt(|g| g.kicker()),
            self.attempt(|g| g.flashback()),
            self.attempt(|g| g.enchant()),
        )
    }

    fn marker(&mut self) -> Outcome<Ability> {
        for (phrase, keyword) in MARKERS {
            if self.cur.phrase(phrase).is_ok() {
                return Ok(keyword_static(
                    &display_name(phrase),
                    EffectKind::Marker { keyword: *keyword },
                ));
            }
        }
        self.cur.fail()
    }

    fn landwalk(&mut self) -> Outcome<Ability> {
        let names: Vec<&str> = LANDWALKS.iter().map(|(word, _)| *word).collect();
        let idx = self.cur.keyword_any(&names)?;
        let (word, subtype) = LANDWALKS[idx];
        Ok(keyword_static(
            &display_name(word),
            EffectKind::Evasion {
                can_be_blocked_by: None,
                unblockable_condition: Some(UnblockableCondition::DefendingPlayerControls {
                    subtype: subtype.to_string(),
                }),
                min_blockers: None,
            },
        ))
    }

    /// "Protection from red and from artifacts"
    fn protection(&mut self) -> Outcome<Ability> {
        self.cur.phrase("protection from")?;
        let mut from = self.protection_quality()?;
        while let Ok(more) = self.attempt(|g| {
            let comma = g.cur.punct(TokKind::Comma).is_ok();
            let and = g.cur.keyword("and").is_ok();
            if !comma && !and {
                return g.cur.fail();
            }
            g.cur.keyword("from")?;
            g.protection_quality()
        }) {
            from.extend(more);
        }
        Ok(keyword_static("Protection", EffectKind::Protection { from }))
    }

    fn protection_quality(&mut self) -> Outcome<Vec<ProtectionQuality>> {
        let quality = |kind, value: Option<String>| ProtectionQuality { kind, value };
        if self.cur.phrase("all colors").is_ok() {
            return Ok(Color::ALL
                .into_iter()
                .map(|c| quality(QualityKind::Color, Some(c.name().to_string())))
                .collect());
        }
        if self.cur.keyword("everything").is_ok() {
            return Ok(vec![quality(QualityKind::Everything, None)]);
        }
        let Some(word) = self.cur.peek_word() else {
            return self.cur.fail();
        };
        if let Some(color) = Color::from_word(&word) {
            self.cur.bump();
            return Ok(vec![quality(
                QualityKind::Color,
                Some(color.name().to_string()),
            )]);
        }
        if word == "colorless" {
            self.cur.bump();
            return Ok(vec![quality(QualityKind::Color, Some(word))]);
        }
        if let Some((one, _)) = card_type(&word) {
            self.cur.bump();
            return Ok(vec![quality(QualityKind::CardType, Some(one.to_string()))]);
        }
        let start = self.cur.pos();
        while self.cur.peek().is_some_and(|t| {
            !t.is_punct()
                && matches!(t.kind, TokKind::Word(_) | TokKind::Structural(_))
                && t.word(self.cur.src()).as_deref() != Some("and")
        }) {
            self.cur.bump();
        }
        if self.cur.pos() == start {
            return self.cur.fail();
        }
        let text = self.cur.text(self.cur.span_from(start)).to_string();
        Ok(vec![quality(QualityKind::Subtype, Some(text))])
    }

    /// The cost after a parameterized keyword: "{2}" or "—Pay 3 life".
    fn keyword_cost(&mut self) -> Outcome<Cost> {
        one_of!(
            self,
            self.mana_symbols().map(|symbols| Cost::Mana { symbols }),
            self.attempt(|g| {
                g.cur.punct(TokKind::EmDash)?;
                g.cost_piece()
            }),
        )
    }

    fn ward(&mut self) -> Outcome<Ability> {
        self.cur.keyword("ward")?;
        let cost = self.keyword_cost()?;
        Ok(keyword_static("Ward", EffectKind::Ward { cost }))
    }

    fn equip(&mut self) -> Outcome<Ability> {
        self.cur.keyword("equip")?;
        let cost = self.keyword_cost()?;
        Ok(Ability::Activated {
            costs: vec![cost],
            effect: Effect::new(EffectKind::Attach {
                object: ObjectReference::this(),
                target: creature_you_control(),
            }),
            keyword_source: Some("Equip".into()),
            restriction: Some("Activate only as a sorcery".into()),
            reminder: None,
        })
    }

    fn cycling(&mut self) -> Outcome<Ability> {
        self.cur.keyword("cycling")?;
        let cost = self.keyword_cost()?;
        Ok(Ability::Activated {
            costs: vec![
                cost,
                Cost::Discard {
                    object: ObjectReference::this(),
                    quantity: Quantity::one(),
                },
            ],
            effect: Effect::new(EffectKind::Draw {
                player: ObjectReference::you(),
                amount: Quantity::one(),
            }),
            keyword_source: Some("Cycling".into()),
            restriction: None,
            reminder: None,
        })
    }

    fn kicker(&mut self) -> Outcome<Ability> {
        self.cur.keyword("kicker")?;
        let cost = self.keyword_cost()?;
        Ok(keyword_static(
            "Kicker",
            EffectKind::RequireAdditionalCost {
                cost: AdditionalCost {
                    cost,
                    is_optional: true,
                    alternative: None,
                    keyword: Some("Kicker".into()),
                },
            },
        ))
    }

    fn flashback(&mut self) -> Outcome<Ability> {
        self.cur.keyword("flashback")?;
        let cost = self.keyword_cost()?;
        Ok(keyword_static(
            "Flashback",
            EffectKind::AllowAlternativeCost {
                cost: AlternativeCost {
                    cost,
                    condition: Some("cast from your graveyard".into()),
                    keyword: Some("Flashback".into()),
                },
            },
        ))
    }

    fn enchant(&mut self) -> Outcome<Ability> {
        self.cur.keyword("enchant")?;
        let filter = self.filter()?;
        Ok(keyword_static("Enchant", EffectKind::Enchant { filter }))
    }

    /// A keyword as named inside other text ("gains flying", "with
    /// first strike"), lower-cased.
    pub(super) fn keyword_name(&mut self) -> Outcome<String> {
        let simple = ["flying", "menace"]
            .into_iter()
            .chain(MARKERS.iter().map(|(phrase, _)| *phrase))
            .chain(LANDWALKS.iter().map(|(word, _)| *word));
        for phrase in simple {
            if self.cur.phrase(phrase).is_ok() {
                return Ok(phrase.to_string());
            }
        }
        self.attempt(|g| {
            g.cur.phrase("protection from")?;
            let quality = g.cur.any_word()?;
            Ok(format!("protection from {quality}"))
        })
    }
}
