//! Trigger conditions: "When/Whenever/At <condition>, ...".
//!
//! The condition text is always kept verbatim. When the grammar also
//! recognises the event it is attached as a typed [`TriggerEvent`];
//! otherwise the trigger carries text only and an AST010 warning.

use super::reference::card_type;
use super::Grammar;
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::TokKind;
use oracle_ast::prelude::*;

impl Grammar<'_> {
    pub(super) fn trigger(&mut self) -> Outcome<Trigger> {
        let word = one_of!(
            self,
            self.cur.keyword("whenever").map(|_| TriggerWord::Whenever),
            self.cur.keyword("when").map(|_| TriggerWord::When),
            self.cur.keyword("at").map(|_| TriggerWord::At),
        )?;
        let start = self.cur.pos();
        let Some(comma) = self.condition_end() else {
            return self.cur.fail();
        };
        if comma == start {
            return self.cur.fail();
        }
        let span = self.cur.span_of(start, comma);
        let event = self.bounded(comma, |g| g.attempt(|g| g.whole(|g| g.trigger_event())).ok());
        if event.is_none() {
            self.issue(DiagnosticCode::UnparsedTrigger, span);
        }
        self.cur.restore(comma);
        self.cur.punct(TokKind::Comma)?;
        let intervening_if = self.optional(|g| g.intervening_if());
        Ok(Trigger {
            word,
            text: self.cur.text(span).to_string(),
            span,
            event,
            intervening_if,
        })
    }

    /// Index of the comma that closes the condition. Commas inside a list
    /// ("an artifact, creature, or enchantment spell") do not count.
    fn condition_end(&self) -> Option<usize> {
        let src = self.cur.src();
        let word_at = |i: usize| self.cur.tok_at(i).and_then(|t| t.word(src));
        let mut i = self.cur.pos();
        while let Some(tok) = self.cur.tok_at(i) {
            match tok.kind {
                TokKind::Period | TokKind::Newline => return None,
                TokKind::Comma => {
                    let next = word_at(i + 1);
                    let listed = next.as_deref().is_some_and(|w| card_type(w).is_some())
                        && (self
                            .cur
                            .tok_at(i + 2)
                            .is_some_and(|t| t.kind == TokKind::Comma)
                            || word_at(i + 2).as_deref() == Some("or"));
                    if next.as_deref() != Some("or") && !listed {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// "if <condition>," directly after the trigger condition.
    fn intervening_if(&mut self) -> Outcome<String> {
        self.cur.keyword("if")?;
        let start = self.cur.pos();
        let Some(comma) = self.cur.find(|t| t.kind == TokKind::Comma) else {
            return self.cur.fail();
        };
        if comma == start {
            return self.cur.fail();
        }
        let condition = self.cur.text(self.cur.span_of(start, comma)).to_string();
        self.cur.restore(comma);
        self.cur.punct(TokKind::Comma)?;
        Ok(condition)
    }

    fn trigger_event(&mut self) -> Outcome<TriggerEvent> {
        one_of!(
            self,
            self.attempt(|g| g.beginning_of_step()),
            self.attempt(|g| {
                let object = g.reference()?;
                g.object_event(object)
            }),
        )
    }

    /// "the beginning of your upkeep", "the beginning of combat on your turn"
    fn beginning_of_step(&mut self) -> Outcome<TriggerEvent> {
        self.cur.phrase("the beginning of")?;
        let mut player = one_of!(
            self,
            self.cur.keyword("your").map(|_| Some(ObjectReference::you())),
            self.cur
                .phrase("each opponent's")
                .map(|_| Some(ObjectReference::new(ReferenceKind::EachOpponent))),
            self.cur
                .phrase("each player's")
                .map(|_| Some(ObjectReference::new(ReferenceKind::EachPlayer))),
            self.cur
                .keyword("each")
                .map(|_| Some(ObjectReference::new(ReferenceKind::EachPlayer))),
            self.cur.phrase("the next").map(|_| None),
            self.cur.keyword("the").map(|_| None),
        )
        .unwrap_or(None);
        let step = one_of!(
            self,
            self.cur.keyword("upkeep").map(|_| Step::Upkeep),
            self.cur.phrase("draw step").map(|_| Step::DrawStep),
            self.cur.phrase("end step").map(|_| Step::EndStep),
            self.cur
                .phrase("precombat main phase")
                .map(|_| Step::PrecombatMain),
            self.cur
                .phrase("postcombat main phase")
                .map(|_| Step::PostcombatMain),
            self.cur.keyword("combat").map(|_| Step::Combat),
        )?;
        if self.cur.phrase("on your turn").is_ok() {
            player = Some(ObjectReference::you());
        }
        Ok(TriggerEvent::BeginningOfStep { step, player })
    }

    /// The verb phrase after the subject of a trigger condition.
    fn object_event(&mut self, object: ObjectReference) -> Outcome<TriggerEvent> {
        let Some(word) = self.cur.peek_word() else {
            return self.cur.fail();
        };
        self.cur.bump();
        match word.as_str() {
            "enters" | "enter" => {
                let _ = self.cur.phrase("the battlefield");
                let _ = self.cur.phrase("under your control");
                Ok(TriggerEvent::EntersBattlefield { object })
            }
            "dies" | "die" => Ok(TriggerEvent::Dies { object }),
            "is" | "are" => {
                self.cur.phrase("put into")?;
                self.cur.keyword_any(&["a", "your", "its", "an"])?;
                let _ = self.cur.keyword("owner's");
                self.cur.keyword_any(&["graveyard", "graveyards"])?;
                self.cur.phrase("from the battlefield")?;
                Ok(TriggerEvent::Dies { object })
            }
            "leaves" | "leave" => {
                self.cur.phrase("the battlefield")?;
                Ok(TriggerEvent::LeavesBattlefield { object })
            }
            "attacks" | "attack" => Ok(TriggerEvent::Attacks { object }),
            "blocks" | "block" => Ok(TriggerEvent::Blocks { object }),
            "deals" | "deal" => {
                let combat_only = self.cur.keyword("combat").is_ok();
                self.cur.keyword("damage")?;
                let to = self.optional(|g| {
                    g.cur.keyword("to")?;
                    g.reference()
                });
                Ok(TriggerEvent::DealsDamage {
                    object,
                    to,
                    combat_only,
                })
            }
            "becomes" | "become" => {
                self.cur.phrase("the target of")?;
                self.cur.skip_rest();
                Ok(TriggerEvent::BecomesTarget { object })
            }
            "gain" | "gains" => {
                self.cur.keyword("life")?;
                Ok(TriggerEvent::GainLife { player: object })
            }
            "draw" | "draws" => {
                self.cur.phrase("a card")?;
                Ok(TriggerEvent::DrawCard { player: object })
            }
            "cast" | "casts" => {
                let filter = self.optional(|g| {
                    let _ = g.cur.keyword_any(&["a", "an"]);
                    g.filter()
                });
                Ok(TriggerEvent::CastSpell {
                    player: object,
                    filter,
                })
            }
            _ => self.cur.fail(),
        }
    }
}
