//! Effect sentences.
//!
//! A region of effect text is split into sentences at periods, newlines and
//! reminder text. Each sentence is a chain of clauses ("Draw a card, then
//! discard a card.") where a clause is an optional subject followed by a
//! verb phrase. Follow-up sentences such as "If you do, ..." and "It can't be
//! regenerated." modify the effect before them instead of standing alone.

use super::quantity::{fixed_pt, pt_modifier};
use super::reference::card_type;
use super::Grammar;
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::{Tok, TokKind};
use oracle_ast::prelude::*;
use tracing::trace;

/// Predefined artifact tokens that are named by their subtype alone.
const ARTIFACT_TOKENS: &[&str] = &[
    "Treasure",
    "Food",
    "Clue",
    "Blood",
    "Gold",
    "Map",
    "Powerstone",
];

enum Piece {
    Effect(Effect),
    IfYouDo(Effect),
    /// "It can't be regenerated." Only meaningful after a destroy effect.
    NoRegeneration(Effect),
    /// Sentences with no rules content of their own ("Then shuffle.").
    Dropped,
}

fn attach(effects: &mut Vec<Effect>, piece: Piece) {
    match piece {
        Piece::Effect(e) => effects.push(e),
        Piece::IfYouDo(follow_up) => match effects.last_mut() {
            Some(last) if last.if_you_do.is_none() => last.if_you_do = Some(Box::new(follow_up)),
            _ => effects.push(Effect::new(EffectKind::Conditional {
                condition: "you do".into(),
                effect: Box::new(follow_up),
            })),
        },
        Piece::NoRegeneration(sentence) => match effects.last_mut() {
            Some(Effect {
                kind: EffectKind::Destroy {
                    cant_be_regenerated,
                    ..
                },
                ..
            }) => *cant_be_regenerated = true,
            _ => effects.push(sentence),
        },
        Piece::Dropped => {}
    }
}

/// Effects that a trailing "until end of turn" applies to as a group.
fn takes_shared_duration(kind: &EffectKind) -> bool {
    matches!(
        kind,
        EffectKind::ModifyPowerToughness { .. }
            | EffectKind::GrantKeywords { .. }
            | EffectKind::CantBlock { .. }
            | EffectKind::CantBeBlocked { .. }
            | EffectKind::GainControl { .. }
    )
}

impl Grammar<'_> {
    /// Everything left in the window as one effect. Never fails.
    pub(super) fn effect_region(&mut self) -> Effect {
        match self.nested(|g| Ok(g.sentences())) {
            Ok(effect) => effect,
            Err(_) => {
                let span = self.cur.skip_rest();
                Effect::unparsed(self.cur.text(span), span)
            }
        }
    }

    fn sentences(&mut self) -> Effect {
        let start = self.cur.pos();
        let mut effects = Vec::new();
        while let Some(tok) = self.cur.peek() {
            match tok.kind {
                TokKind::Period | TokKind::Newline => {
                    self.cur.bump();
                    continue;
                }
                TokKind::Reminder(_) => {
                    self.cur.bump();
                    self.issue(DiagnosticCode::UnmodeledReminder, tok.span);
                    continue;
                }
                _ => {}
            }
            if let Ok(modal) = self.attempt(|g| g.modal()) {
                effects.push(modal);
                continue;
            }
            let here = self.cur.pos();
            let mut stop = self.index_of(|t| {
                matches!(
                    t.kind,
                    TokKind::Period | TokKind::Newline | TokKind::Bullet | TokKind::Reminder(_)
                )
            });
            if stop == here {
                stop = (here + 1).min(self.cur.end());
            }
            let piece = self.bounded(stop, |g| {
                g.attempt(|g| g.whole(|g| g.sentence()))
                    .unwrap_or_else(|e| {
                        trace!(farthest = e.at, "sentence not understood");
                        let span = g.cur.skip_rest();
                        Piece::Effect(Effect::unparsed(g.cur.text(span), span))
                    })
            });
            attach(&mut effects, piece);
        }
        match effects.len() {
            0 => {
                let span = self.cur.span_of(start, start);
                Effect::unparsed("", span)
            }
            1 => effects.remove(0),
            _ => Effect::new(EffectKind::Sequence { effects }),
        }
    }

    fn sentence(&mut self) -> Outcome<Piece> {
        one_of!(
            self,
            self.whole(|g| g.if_you_do()),
            self.whole(|g| g.no_regeneration()),
            self.whole(|g| g.dropped_sentence()),
            self.whole(|g| g.cost_statement()).map(Piece::Effect),
            self.whole(|g| g.replacement_statement()).map(Piece::Effect),
            self.whole(|g| g.conditional()).map(Piece::Effect),
            self.whole(|g| g.clause_chain()).map(Piece::Effect),
        )
    }

    fn if_you_do(&mut self) -> Outcome<Piece> {
        self.cur.phrase("if you")?;
        if self.cur.keyword("do").is_ok() {
            self.cur.punct(TokKind::Comma)?;
            let follow_up = self.nested(|g| g.clause_chain())?;
            return Ok(Piece::IfYouDo(follow_up));
        }
        one_of!(
            self,
            self.cur.keyword("don't"),
            self.cur.phrase("do not"),
        )?;
        self.cur.punct(TokKind::Comma)?;
        let effect = self.nested(|g| g.clause_chain())?;
        Ok(Piece::Effect(Effect::new(EffectKind::Conditional {
            condition: "you don't".into(),
            effect: Box::new(effect),
        })))
    }

    fn no_regeneration(&mut self) -> Outcome<Piece> {
        let start = self.cur.pos();
        self.cur.keyword_any(&["it", "they"])?;
        self.cur.phrase("can't be regenerated")?;
        let span = self.cur.span_from(start);
        Ok(Piece::NoRegeneration(Effect::unparsed(
            self.cur.text(span),
            span,
        )))
    }

    fn dropped_sentence(&mut self) -> Outcome<Piece> {
        one_of!(
            self,
            self.attempt(|g| {
                let _ = g.cur.keyword("then");
                g.shuffle_tail()
            }),
            self.cur
                .phrase("you may choose new targets for the copy")
                .map(|_| ()),
        )?;
        Ok(Piece::Dropped)
    }

    fn shuffle_tail(&mut self) -> Outcome<()> {
        self.cur.keyword_any(&["shuffle", "shuffles"])?;
        let _ = self.cur.keyword_any(&["your", "their"]);
        let _ = self.cur.keyword("library");
        Ok(())
    }

    /// "If <condition>, <effect>." and "As long as <condition>, <effect>."
    fn conditional(&mut self) -> Outcome<Effect> {
        let as_long_as = one_of!(
            self,
            self.cur.keyword("if").map(|_| false),
            self.cur.phrase("as long as").map(|_| true),
        )?;
        let start = self.cur.pos();
        let Some(comma) = self.cur.find(|t| t.kind == TokKind::Comma) else {
            return self.cur.fail();
        };
        let src = self.cur.src();
        let mentions_would = (start..comma).any(|i| {
            self.cur
                .tok_at(i)
                .and_then(|t| t.word(src))
                .is_some_and(|w| w == "would")
        });
        if comma == start || mentions_would {
            return self.cur.fail();
        }
        let condition = self.cur.text(self.cur.span_of(start, comma)).to_string();
        self.cur.restore(comma);
        self.cur.punct(TokKind::Comma)?;
        let body = self.nested(|g| g.clause_chain())?;
        if as_long_as {
            Ok(body.with_duration(Duration::AsLongAs { condition }))
        } else {
            Ok(Effect::new(EffectKind::Conditional {
                condition,
                effect: Box::new(body),
            }))
        }
    }

    /// Clauses joined by ", then", "and" or a bare comma. The subject of one
    /// clause carries over to the next ("~ gets +1/+1 and gains flying").
    pub(super) fn clause_chain(&mut self) -> Outcome<Effect> {
        let leading = self.optional(|g| {
            let d = g.duration()?;
            g.cur.punct(TokKind::Comma)?;
            Ok(d)
        });
        let _ = self.cur.keyword("then");
        let (first, mut subject) = self.clause(None)?;
        let mut effects = vec![first];
        loop {
            let carry = subject.clone();
            let next = self.attempt(|g| {
                let comma = g.cur.punct(TokKind::Comma).is_ok();
                let joiner = g.cur.keyword_any(&["then", "and"]).is_ok();
                if !comma && !joiner {
                    return g.cur.fail();
                }
                let _ = g.cur.keyword("then");
                g.clause(carry.as_ref())
            });
            match next {
                Ok((effect, s)) => {
                    effects.push(effect);
                    subject = s;
                }
                Err(_) => {
                    if let Some(rest) = self.optional(|g| g.unreadable_clause()) {
                        effects.push(rest);
                    }
                    break;
                }
            }
        }

        let shared = leading.or_else(|| effects.last().and_then(|e| e.duration.clone()));
        if let Some(duration) = shared {
            for effect in effects.iter_mut() {
                if effect.duration.is_none() && takes_shared_duration(&effect.kind) {
                    effect.duration = Some(duration.clone());
                }
            }
        }
        if effects.len() == 1 {
            Ok(effects.remove(0))
        } else {
            Ok(Effect::new(EffectKind::Sequence { effects }))
        }
    }

    /// A joiner followed by text no clause reads. The rest of the window is
    /// kept as an unparsed effect beside the clauses already read.
    fn unreadable_clause(&mut self) -> Outcome<Effect> {
        let comma = self.cur.punct(TokKind::Comma).is_ok();
        let joiner = self.cur.keyword_any(&["then", "and"]).is_ok();
        if !comma && !joiner {
            return self.cur.fail();
        }
        let _ = self.cur.keyword("then");
        let span = self.cur.skip_rest();
        if span.is_empty() {
            return self.cur.fail();
        }
        trace!(at = span.start, "clause not understood");
        Ok(Effect::unparsed(self.cur.text(span), span))
    }

    fn clause(
        &mut self,
        carry: Option<&ObjectReference>,
    ) -> Outcome<(Effect, Option<ObjectReference>)> {
        one_of!(
            self,
            self.attempt(|g| {
                let subject = g.reference()?;
                g.predicate(Some(subject))
            }),
            self.predicate(carry.cloned()),
        )
    }

    /// "[may] <verb phrase> [duration] [unless ...]"
    fn predicate(
        &mut self,
        subject: Option<ObjectReference>,
    ) -> Outcome<(Effect, Option<ObjectReference>)> {
        let may = self.cur.keyword("may").is_ok();
        let mut effect = self.verb(subject.as_ref())?;
        if let Some(d) = self.optional(|g| g.duration()) {
            effect.duration = Some(d);
        }
        if let Some(u) = self.optional(|g| g.unless_clause()) {
            effect.unless = Some(u);
        }
        if effect.duration.is_none() {
            effect.duration = self.optional(|g| g.duration());
        }
        if may {
            effect.is_optional = true;
        }
        Ok((effect, subject))
    }

    fn verb(&mut self, subject: Option<&ObjectReference>) -> Outcome<Effect> {
        let Some(word) = self.cur.peek_word() else {
            return self.cur.fail();
        };
        let player = || subject.cloned().unwrap_or_else(ObjectReference::you);
        let this = || subject.cloned().unwrap_or_else(ObjectReference::this);
        let verb_at = self.cur.pos();
        self.cur.bump();
        let kind = match word.as_str() {
            "deal" | "deals" => self.deal_damage(subject.cloned())?,
            "prevent" => self.prevent_damage()?,
            "destroy" => EffectKind::Destroy {
                target: self.reference()?,
                cant_be_regenerated: false,
            },
            "exile" => {
                let target = self.reference()?;
                let from = zone_of(&target);
                EffectKind::Exile { target, from }
            }
            "return" => self.return_object()?,
            "sacrifice" | "sacrifices" => {
                let (object, quantity) = self.counted_object()?;
                EffectKind::Sacrifice {
                    player: player(),
                    object,
                    quantity,
                }
            }
            "draw" | "draws" => EffectKind::Draw {
                player: player(),
                amount: self.counted("card", "cards")?,
            },
            "discard" | "discards" => {
                let amount = self.counted("card", "cards")?;
                let random = self.cur.phrase("at random").is_ok();
                EffectKind::Discard {
                    player: player(),
                    amount,
                    random,
                }
            }
            "mill" | "mills" => EffectKind::Mill {
                player: player(),
                amount: self.counted("card", "cards")?,
            },
            "scry" => EffectKind::Scry {
                amount: self.quantity_atom()?,
            },
            "surveil" => EffectKind::Surveil {
                amount: self.quantity_atom()?,
            },
            "search" | "searches" => self.search_library(player())?,
            "put" | "puts" => one_of!(
                self,
                self.attempt(|g| g.put_counters()),
                self.put_onto(),
            )?,
            "remove" | "removes" => {
                let amount = self.quantity()?;
                let counter_type = self.counter_type()?;
                self.cur.keyword("from")?;
                EffectKind::RemoveCounters {
                    counter_type,
                    amount,
                    target: self.reference()?,
                }
            }
            "proliferate" => EffectKind::Proliferate,
            "gain" | "gains" => one_of!(
                self,
                self.counted("life", "life").map(|amount| EffectKind::GainLife {
                    player: player(),
                    amount,
                }),
                self.attempt(|g| {
                    g.cur.phrase("control of")?;
                    Ok(EffectKind::GainControl {
                        target: g.reference()?,
                    })
                }),
                self.keyword_list().map(|keywords| EffectKind::GrantKeywords {
                    target: this(),
                    keywords,
                }),
            )?,
            "lose" | "loses" => EffectKind::LoseLife {
                player: player(),
                amount: self.counted("life", "life")?,
            },
            "add" | "adds" => self.add_mana()?,
            "create" | "creates" => self.create_token()?,
            "copy" | "copies" => EffectKind::CopySpell {
                target: self.reference()?,
            },
            "get" | "gets" => {
                let (power, toughness) = self.pt_change()?;
                EffectKind::ModifyPowerToughness {
                    target: this(),
                    power,
                    toughness,
                }
            }
            "have" | "has" => EffectKind::GrantKeywords {
                target: this(),
                keywords: self.keyword_list()?,
            },
            "tap" | "taps" => EffectKind::Tap {
                target: self.reference()?,
            },
            "untap" | "untaps" => EffectKind::Untap {
                target: self.reference()?,
            },
            "fight" | "fights" => EffectKind::Fight {
                attacker: this(),
                defender: self.reference()?,
            },
            "can't" => one_of!(
                self,
                self.cur
                    .phrase("be blocked")
                    .map(|_| EffectKind::CantBeBlocked { target: this() }),
                self.cur
                    .keyword("block")
                    .map(|_| EffectKind::CantBlock { target: this() }),
            )?,
            "counter" => EffectKind::CounterSpell {
                target: self.reference()?,
            },
            "attach" => {
                let object = self.reference()?;
                self.cur.keyword("to")?;
                EffectKind::Attach {
                    object,
                    target: self.reference()?,
                }
            }
            _ => {
                self.cur.restore(verb_at);
                return self.cur.fail();
            }
        };
        Ok(Effect::new(kind))
    }

    /// "<N> damage to <target>" or "damage equal to <amount> to <target>".
    fn deal_damage(&mut self, source: Option<ObjectReference>) -> Outcome<EffectKind> {
        let amount = one_of!(
            self,
            self.attempt(|g| {
                let q = g.quantity()?;
                g.cur.keyword("damage")?;
                Ok(q)
            }),
            self.attempt(|g| {
                g.cur.keyword("damage")?;
                g.equal_to(&["to"])
            }),
        )?;
        self.cur.keyword("to")?;
        let target = self.reference()?;
        Ok(EffectKind::DealDamage {
            source,
            amount,
            target,
        })
    }

    /// "Prevent all combat damage that would be dealt this turn."
    fn prevent_damage(&mut self) -> Outcome<EffectKind> {
        let amount = one_of!(
            self,
            self.cur.keyword("all").map(|_| None),
            self.attempt(|g| {
                g.cur.phrase("the next")?;
                g.quantity_atom().map(Some)
            }),
        )?;
        let _ = self.cur.keyword("combat");
        self.cur.keyword("damage")?;
        let _ = self.cur.phrase("that would be dealt");
        let target = self
            .optional(|g| {
                g.cur.keyword_any(&["to", "by"])?;
                g.reference()
            })
            .unwrap_or_else(|| ObjectReference::new(ReferenceKind::Each));
        Ok(EffectKind::PreventDamage { amount, target })
    }

    fn return_object(&mut self) -> Outcome<EffectKind> {
        let target = self.reference()?;
        self.cur.keyword("to")?;
        one_of!(
            self,
            self.attempt(|g| {
                g.hand_destination()?;
                Ok(EffectKind::ReturnToHand {
                    target: target.clone(),
                })
            }),
            self.attempt(|g| {
                g.cur.phrase("the battlefield")?;
                Ok(g.battlefield_tail(target.clone()))
            }),
        )
    }

    fn hand_destination(&mut self) -> Outcome<()> {
        one_of!(
            self,
            self.cur.phrase("its owner's hand"),
            self.cur.phrase("their owner's hand"),
            self.cur.phrase("their owners' hands"),
            self.cur.phrase("your hand"),
            self.cur.phrase("their hand"),
        )
        .map(|_| ())
    }

    /// "[tapped] [under your control]" after "onto the battlefield".
    fn battlefield_tail(&mut self, target: ObjectReference) -> EffectKind {
        let tapped = self.cur.keyword("tapped").is_ok();
        let under_your_control = self.cur.phrase("under your control").is_ok();
        if !under_your_control {
            let _ = self.cur.phrase("under its owner's control");
            let _ = self.cur.phrase("under their owners' control");
        }
        let from = zone_of(&target);
        EffectKind::ReturnToBattlefield {
            target,
            from,
            tapped,
            under_your_control,
        }
    }

    /// "Search your library for a basic land card, put it onto the
    /// battlefield tapped, then shuffle."
    fn search_library(&mut self, player: ObjectReference) -> Outcome<EffectKind> {
        self.cur.keyword_any(&["your", "their", "his"])?;
        let _ = self.cur.phrase("or her");
        self.cur.keyword("library")?;
        self.cur.keyword("for")?;
        let quantity = self.quantity()?;
        let filter = self.filter()?;
        let _ = self.optional(|g| {
            g.cur.punct(TokKind::Comma)?;
            g.cur.keyword("reveal")?;
            g.reference()
        });
        let _ = self.cur.punct(TokKind::Comma);
        let _ = self.cur.keyword("and");
        self.cur.keyword("put")?;
        self.reference()?;
        let (destination, tapped) = one_of!(
            self,
            self.attempt(|g| {
                g.cur.phrase("onto the battlefield")?;
                Ok((Zone::Battlefield, g.cur.keyword("tapped").is_ok()))
            }),
            self.attempt(|g| {
                g.cur.keyword("into")?;
                g.hand_destination()?;
                Ok((Zone::Hand, false))
            }),
            self.attempt(|g| {
                g.cur.phrase("into your graveyard")?;
                Ok((Zone::Graveyard, false))
            }),
            self.attempt(|g| {
                g.cur.phrase("on top of")?;
                g.cur.keyword_any(&["your", "their"])?;
                g.cur.keyword("library")?;
                Ok((Zone::Library, false))
            }),
        )?;
        let _ = self.optional(|g| {
            let _ = g.cur.punct(TokKind::Comma);
            g.cur.keyword_any(&["then", "and"])?;
            g.shuffle_tail()
        });
        Ok(EffectKind::SearchLibrary {
            player,
            filter,
            quantity,
            destination,
            tapped,
        })
    }

    /// "a +1/+1 counter on target creature"
    fn put_counters(&mut self) -> Outcome<EffectKind> {
        let amount = self.quantity()?;
        let counter_type = self.counter_type()?;
        self.cur.keyword("on")?;
        let target = self.reference()?;
        Ok(EffectKind::PutCounters {
            counter_type,
            amount,
            target,
        })
    }

    /// "target creature card from a graveyard onto the battlefield under
    /// your control", "it into your hand"
    fn put_onto(&mut self) -> Outcome<EffectKind> {
        let target = self.reference()?;
        one_of!(
            self,
            self.attempt(|g| {
                g.cur.phrase("onto the battlefield")?;
                Ok(g.battlefield_tail(target.clone()))
            }),
            self.attempt(|g| {
                g.cur.keyword("into")?;
                g.hand_destination()?;
                Ok(EffectKind::ReturnToHand {
                    target: target.clone(),
                })
            }),
        )
    }

    fn add_mana(&mut self) -> Outcome<EffectKind> {
        one_of!(
            self,
            self.attempt(|g| {
                let mut symbols = g.mana_symbols()?;
                while let Ok(more) = g.attempt(|g| {
                    let comma = g.cur.punct(TokKind::Comma).is_ok();
                    let or = g.cur.keyword("or").is_ok();
                    if !comma && !or {
                        return g.cur.fail();
                    }
                    g.mana_symbols()
                }) {
                    symbols.extend(more);
                }
                Ok(EffectKind::AddMana {
                    symbols,
                    any_color: None,
                })
            }),
            self.attempt(|g| {
                let amount = g.quantity_atom()?;
                g.cur.keyword("mana")?;
                one_of!(
                    g,
                    g.cur.phrase("of any one color"),
                    g.cur.phrase("of any color"),
                    g.cur.phrase("in any combination of colors"),
                )?;
                Ok(EffectKind::AddMana {
                    symbols: Vec::new(),
                    any_color: Some(amount),
                })
            }),
        )
    }

    /// "two 1/1 white Soldier creature tokens with vigilance"
    fn create_token(&mut self) -> Outcome<EffectKind> {
        let amount = self.quantity()?;
        let mut token = TokenSpec {
            tapped: self.cur.keyword("tapped").is_ok(),
            ..TokenSpec::default()
        };
        if let Some(size) = self.cur.peek_word() {
            if let Some((p, t)) = fixed_pt(&size) {
                token.power = Some(p);
                token.toughness = Some(t);
                self.cur.bump();
            } else if size == "x/x" {
                self.cur.bump();
            }
        }
        loop {
            if self.cur.keyword_any(&["token", "tokens"]).is_ok() {
                break;
            }
            let Some(tok) = self.cur.peek() else {
                return self.cur.fail();
            };
            let Some(word) = tok.word(self.cur.src()) else {
                return self.cur.fail();
            };
            if let Some(color) = Color::from_word(&word) {
                token.colors.push(color);
            } else if word == "colorless" {
                token.colorless = true;
            } else if word == "and" || word == "legendary" {
            } else if let Some((one @ ("artifact" | "creature" | "enchantment" | "land"), false)) =
                card_type(&word)
            {
                push_unique(&mut token.card_types, one);
            } else if let TokKind::Word(raw) = &tok.kind {
                if !raw.chars().next().is_some_and(char::is_uppercase) {
                    return self.cur.fail();
                }
                if ARTIFACT_TOKENS.contains(&raw.as_str()) {
                    token.name = Some(raw.clone());
                    push_unique(&mut token.card_types, "artifact");
                } else {
                    token.subtypes.push(raw.clone());
                }
            } else {
                return self.cur.fail();
            }
            self.cur.bump();
        }
        if let Some(keywords) = self.optional(|g| {
            g.cur.keyword("with")?;
            g.keyword_list()
        }) {
            token.keywords = keywords;
        }
        if self
            .optional(|g| {
                let _ = g.cur.keyword("that's");
                g.cur.phrase("tapped and attacking")
            })
            .is_some()
        {
            token.tapped = true;
        }
        Ok(EffectKind::CreateToken { amount, token })
    }

    /// "+2/+2", "-X/-X", "+1/+0 for each artifact you control".
    fn pt_change(&mut self) -> Outcome<(Quantity, Quantity)> {
        let Some(tok) = self.cur.peek() else {
            return self.cur.fail();
        };
        let printed = self.cur.text(tok.span);
        let Some((power, toughness)) = pt_modifier(printed) else {
            return self.cur.fail();
        };
        self.cur.bump();

        let per_start = self.cur.pos();
        let Some(per) = self.optional(|g| {
            g.cur.phrase("for each")?;
            let what = g.cur.any_word()?;
            let rest = g.cur.pos();
            while g.cur.peek().is_some_and(|t| !t.is_punct()) && !g.at_clause_boundary() {
                g.cur.bump();
            }
            let filter = (g.cur.pos() > rest)
                .then(|| g.cur.text(g.cur.span_from(rest)).to_string());
            Ok(Quantity::Count { what, filter })
        }) else {
            return Ok((power, toughness));
        };
        let per_span = self.cur.span_from(per_start);
        self.issue(DiagnosticCode::CalculatedQuantity, per_span);
        let per_text = self.cur.text(per_span);
        let scale = |side: Quantity, side_text: &str| {
            if side == Quantity::literal(0) {
                return side;
            }
            Quantity::Calculated {
                expression: format!("{side_text} {per_text}"),
                base: Some(Box::new(per.clone())),
                operation: None,
                rounding: None,
            }
        };
        let (p_text, t_text) = printed.split_once('/').unwrap_or((printed, printed));
        Ok((scale(power, p_text), scale(toughness, t_text)))
    }

    fn at_clause_boundary(&self) -> bool {
        self.cur.peek_word().is_some_and(|w| {
            matches!(
                w.as_str(),
                "and" | "then" | "until" | "unless" | "as" | "this" | "instead"
            )
        })
    }

    /// "until end of turn", "this turn", "for as long as ..."
    pub(super) fn duration(&mut self) -> Outcome<Duration> {
        one_of!(
            self,
            self.cur
                .phrase("until end of turn")
                .map(|_| Duration::UntilEndOfTurn),
            self.cur.phrase("this turn").map(|_| Duration::UntilEndOfTurn),
            self.cur
                .phrase("until your next turn")
                .map(|_| Duration::UntilYourNextTurn),
            self.cur
                .phrase("until end of combat")
                .map(|_| Duration::UntilEndOfCombat),
            self.cur
                .phrase("at the beginning of the next end step")
                .map(|_| Duration::AtBeginningOfNextEndStep),
            self.attempt(|g| {
                g.cur.keyword("until")?;
                let object = g.self_ref()?;
                g.cur.phrase("leaves the battlefield")?;
                Ok(Duration::UntilLeavesBattlefield { object })
            }),
            self.attempt(|g| {
                let _ = g.cur.keyword("for");
                g.cur.phrase("as long as")?;
                let span = g.cur.skip_rest();
                if span.is_empty() {
                    return g.cur.fail();
                }
                Ok(Duration::AsLongAs {
                    condition: g.cur.text(span).trim().to_string(),
                })
            }),
        )
    }

    /// "unless its controller pays {3}", "unless that player pays 3 life"
    fn unless_clause(&mut self) -> Outcome<UnlessClause> {
        self.cur.keyword("unless")?;
        let player = self.reference()?;
        self.cur.keyword_any(&["pays", "pay"])?;
        let cost = one_of!(
            self,
            self.mana_symbols().map(|symbols| Cost::Mana { symbols }),
            self.counted("life", "life")
                .map(|amount| Cost::PayLife { amount }),
        )?;
        Ok(UnlessClause { player, cost })
    }

    /// A quoted ability or a keyword, as granted by "gains"/"has"/"with".
    pub(super) fn keyword_list(&mut self) -> Outcome<Vec<String>> {
        self.sep_by(
            |g| one_of!(g, g.keyword_name(), g.quoted()),
            |g| {
                let comma = g.cur.punct(TokKind::Comma).is_ok();
                let and = g.cur.keyword("and").is_ok();
                if comma || and {
                    Ok(())
                } else {
                    g.cur.fail()
                }
            },
        )
    }

    fn quoted(&mut self) -> Outcome<String> {
        match self.cur.peek() {
            Some(Tok {
                kind: TokKind::Quoted(text),
                ..
            }) => {
                self.cur.bump();
                Ok(text.clone())
            }
            _ => self.cur.fail(),
        }
    }

    /// "Choose one —" followed by bullet lines.
    fn modal(&mut self) -> Outcome<Effect> {
        self.cur.keyword("choose")?;
        let count_at = self.cur.pos();
        let n = self.cur.number()?;
        let count_span = self.cur.span_from(count_at);
        let or_both = self.cur.phrase("or both").is_ok();
        let or_more = !or_both && self.cur.phrase("or more").is_ok();
        self.cur.punct(TokKind::EmDash)?;
        let mut modes = Vec::new();
        loop {
            while self.cur.punct(TokKind::Newline).is_ok() {}
            if self.cur.punct(TokKind::Bullet).is_err() {
                break;
            }
            let end = self.index_of(|t| matches!(t.kind, TokKind::Newline | TokKind::Bullet));
            modes.push(self.bounded(end, |g| g.effect_region()));
        }
        if modes.is_empty() || !self.cur.at_end() {
            return self.cur.fail();
        }
        let choose = if or_both {
            Quantity::UpTo {
                min: n,
                max: Box::new(Quantity::literal(2)),
            }
        } else if or_more {
            let every = i32::try_from(modes.len()).unwrap_or(i32::MAX);
            Quantity::UpTo {
                min: n,
                max: Box::new(Quantity::literal(every)),
            }
        } else {
            self.printed_number(n, count_span)
        };
        Ok(Effect::new(EffectKind::Modal { choose, modes }))
    }
}

fn zone_of(target: &ObjectReference) -> Option<Zone> {
    target
        .filter
        .as_ref()
        .and_then(|f| f.zone)
        .filter(|z| *z != Zone::Battlefield)
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|t| t == item) {
        list.push(item.to_string());
    }
}
