//! Rules sentences that change how the card is cast or how events happen:
//! additional and alternative costs, cost reductions, and replacements.

use super::Grammar;
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::{number_word, Tok, TokKind};
use oracle_ast::prelude::*;

fn replacement(
    event: ReplacementEvent,
    original_event_occurs: bool,
    replacement: Effect,
    modifier: Option<ReplacementModifier>,
) -> Effect {
    Effect::new(EffectKind::Replacement(ReplacementEffect {
        event,
        original_event_occurs,
        replacement: Box::new(replacement),
        modifier,
    }))
}

fn enters_battlefield() -> ReplacementEvent {
    ReplacementEvent::ZoneChange {
        from: None,
        to: Some(Zone::Battlefield),
        affected: None,
        controller: None,
    }
}

/// Sort a replaced event by its wording ("die", "be destroyed", "create one
/// or more tokens"). `None` means the event is kept as generic text.
fn classify_event(
    text: &str,
    subject: Option<&ObjectReference>,
) -> Option<ReplacementEvent> {
    let (affected, controller) = match subject {
        Some(s) if s.is_player() => (None, Some(s.clone())),
        Some(s) => (s.filter.clone(), None),
        None => (None, None),
    };
    let controller = controller.or_else(|| {
        text.contains("under your control")
            .then(ObjectReference::you)
    });
    let event = if text.starts_with("die") {
        ReplacementEvent::Death {
            affected,
            controller,
        }
    } else if text.starts_with("be destroyed") {
        ReplacementEvent::Destruction {
            affected,
            controller,
        }
    } else if text.contains("create") && text.contains("token") {
        ReplacementEvent::TokenCreation {
            affected,
            controller,
        }
    } else if text.starts_with("put") && text.contains("counter") {
        let counter_type = text
            .split_whitespace()
            .take_while(|w| !w.starts_with("counter"))
            .last()
            .filter(|w| w.contains('/') || !matches!(*w, "more" | "a" | "put" | "of"))
            .map(str::to_string);
        ReplacementEvent::CounterPlacement {
            counter_type,
            affected,
            controller,
        }
    } else if text.contains("damage") {
        ReplacementEvent::Damage {
            source: subject.cloned(),
            affected: None,
            controller,
        }
    } else if text.starts_with("gain life") || text.starts_with("lose life") {
        ReplacementEvent::LifeChange {
            is_gain: text.starts_with("gain"),
            affected,
            controller: controller.or_else(|| subject.cloned()),
        }
    } else if text.starts_with("untap") {
        ReplacementEvent::Untap {
            affected,
            controller,
        }
    } else if let Some((from, to)) = zone_change(text) {
        ReplacementEvent::ZoneChange {
            from,
            to,
            affected,
            controller,
        }
    } else {
        return None;
    };
    Some(event)
}

fn zone_change(text: &str) -> Option<(Option<Zone>, Option<Zone>)> {
    if text.starts_with("be put into") && text.contains("graveyard") {
        let from = text
            .contains("from the battlefield")
            .then_some(Zone::Battlefield);
        Some((from, Some(Zone::Graveyard)))
    } else if text.starts_with("enter") {
        Some((None, Some(Zone::Battlefield)))
    } else if text.starts_with("leave the battlefield") {
        Some((Some(Zone::Battlefield), None))
    } else if text.starts_with("be exiled") {
        Some((None, Some(Zone::Exile)))
    } else {
        None
    }
}

impl Grammar<'_> {
    pub(super) fn cost_statement(&mut self) -> Outcome<Effect> {
        one_of!(
            self,
            self.attempt(|g| g.additional_cost()),
            self.attempt(|g| g.alternative_cost()),
            self.attempt(|g| g.cost_reduction()),
        )
    }

    /// "As an additional cost to cast this spell, sacrifice a creature or
    /// pay 3 life."
    fn additional_cost(&mut self) -> Outcome<Effect> {
        self.cur.phrase("as an additional cost to cast this spell")?;
        self.cur.punct(TokKind::Comma)?;
        let cost = self.cost_piece()?;
        let alternative = self
            .optional(|g| {
                g.cur.keyword("or")?;
                g.cost_piece()
            })
            .map(|cost| AlternativeCost {
                cost,
                condition: None,
                keyword: None,
            });
        Ok(Effect::new(EffectKind::RequireAdditionalCost {
            cost: AdditionalCost {
                cost,
                is_optional: false,
                alternative,
                keyword: None,
            },
        }))
    }

    /// "[If <condition>,] you may <cost> rather than pay this spell's mana
    /// cost."
    fn alternative_cost(&mut self) -> Outcome<Effect> {
        let condition = self.optional(|g| {
            g.cur.keyword("if")?;
            let start = g.cur.pos();
            let Some(comma) = g.cur.find(|t| t.kind == TokKind::Comma) else {
                return g.cur.fail();
            };
            let text = g.cur.text(g.cur.span_of(start, comma)).to_string();
            g.cur.restore(comma);
            g.cur.punct(TokKind::Comma)?;
            Ok(text)
        });
        self.cur.phrase("you may")?;
        let cost = one_of!(
            self,
            self.attempt(|g| {
                let cost = g.cost_piece()?;
                g.cur.phrase("rather than pay this spell's mana cost")?;
                Ok(cost)
            }),
            self.cur
                .phrase("cast this spell without paying its mana cost")
                .map(|_| Cost::Mana {
                    symbols: Vec::new(),
                }),
        )?;
        Ok(Effect::new(EffectKind::AllowAlternativeCost {
            cost: AlternativeCost {
                cost,
                condition,
                keyword: None,
            },
        }))
    }

    /// "This spell costs {1} less to cast for each artifact you control."
    fn cost_reduction(&mut self) -> Outcome<Effect> {
        self.self_ref()?;
        self.cur.keyword("costs")?;
        let start = self.cur.pos();
        let symbols = self.mana_symbols()?;
        let symbols_span = self.cur.span_from(start);
        self.cur.keyword("less")?;
        self.cur.phrase("to cast")?;
        let per = self.optional(|g| {
            g.cur.phrase("for each")?;
            g.filter()
        });
        let condition = self.optional(|g| {
            one_of!(
                g,
                g.cur.keyword("if"),
                g.cur.phrase("as long as"),
            )?;
            let span = g.cur.skip_rest();
            if span.is_empty() {
                return g.cur.fail();
            }
            Ok(g.cur.text(span).to_string())
        });
        let amount = match symbols.as_slice() {
            [ManaSymbol {
                kind: ManaSymbolKind::Generic,
                amount: Some(n),
                ..
            }] => self.printed_number(*n, symbols_span),
            [ManaSymbol {
                kind: ManaSymbolKind::Variable,
                variable: Some(name),
                ..
            }] => Quantity::variable(name.clone()),
            _ => {
                self.issue(DiagnosticCode::CalculatedQuantity, symbols_span);
                Quantity::Calculated {
                    expression: self.cur.text(symbols_span).to_string(),
                    base: None,
                    operation: None,
                    rounding: None,
                }
            }
        };
        Ok(Effect::new(EffectKind::ReduceCost {
            reduction: CostReduction {
                amount,
                per,
                condition,
            },
        }))
    }

    pub(super) fn replacement_statement(&mut self) -> Outcome<Effect> {
        one_of!(
            self,
            self.attempt(|g| g.enters_tapped()),
            self.attempt(|g| g.enters_with_counters()),
            self.attempt(|g| g.would_instead()),
        )
    }

    /// "~ enters tapped [unless <condition>]."
    fn enters_tapped(&mut self) -> Outcome<Effect> {
        self.self_ref()?;
        self.cur.keyword("enters")?;
        let _ = self.cur.phrase("the battlefield");
        self.cur.keyword("tapped")?;
        let tap = Effect::new(EffectKind::Tap {
            target: ObjectReference::this(),
        });
        let tap = match self.optional(|g| {
            g.cur.keyword("unless")?;
            let span = g.cur.skip_rest();
            if span.is_empty() {
                return g.cur.fail();
            }
            Ok(g.cur.text(span).to_string())
        }) {
            Some(condition) => Effect::new(EffectKind::Conditional {
                condition: format!("unless {condition}"),
                effect: Box::new(tap),
            }),
            None => tap,
        };
        Ok(replacement(
            enters_battlefield(),
            true,
            tap,
            Some(ReplacementModifier::EntersTapped),
        ))
    }

    /// "~ enters with two +1/+1 counters on it."
    fn enters_with_counters(&mut self) -> Outcome<Effect> {
        self.self_ref()?;
        self.cur.keyword("enters")?;
        let _ = self.cur.phrase("the battlefield");
        self.cur.keyword("with")?;
        let amount = self.quantity()?;
        let counter_type = self.counter_type()?;
        self.cur.phrase("on it")?;
        let put = Effect::new(EffectKind::PutCounters {
            counter_type: counter_type.clone(),
            amount: amount.clone(),
            target: ObjectReference::this(),
        });
        Ok(replacement(
            enters_battlefield(),
            true,
            put,
            Some(ReplacementModifier::EntersWithCounters {
                counter_type,
                amount,
            }),
        ))
    }

    /// "If <subject> would <event>, <effect> instead."
    fn would_instead(&mut self) -> Outcome<Effect> {
        self.cur.keyword("if")?;
        let src = self.cur.src();
        let is_word = |t: &Tok, w: &str| t.word(src).as_deref() == Some(w);

        let would = self.index_of(|t| is_word(t, "would"));
        if would >= self.cur.end() {
            return self.cur.fail();
        }
        let subject = self.bounded(would, |g| g.attempt(|g| g.whole(|g| g.reference())).ok());
        self.cur.restore(would + 1);

        let event_start = self.cur.pos();
        let comma = self.index_of(|t| t.kind == TokKind::Comma);
        if comma >= self.cur.end() || comma == event_start {
            return self.cur.fail();
        }
        let event_span = self.cur.span_of(event_start, comma);
        let event_text = self.cur.text(event_span).to_lowercase();
        self.cur.restore(comma + 1);

        let body_start = self.cur.pos();
        let instead = self.index_of(|t| is_word(t, "instead"));
        if instead >= self.cur.end() || instead == body_start {
            return self.cur.fail();
        }
        let body_span = self.cur.span_of(body_start, instead);
        let body_text = self.cur.text(body_span).to_lowercase();
        let modifier = if body_text.contains("twice that many") {
            Some(ReplacementModifier::Double)
        } else if body_text.contains("prevent that damage") {
            Some(ReplacementModifier::Prevent)
        } else {
            body_text
                .split_once("that many plus ")
                .and_then(|(_, rest)| rest.split_whitespace().next())
                .and_then(|n| number_word(n).or_else(|| n.parse().ok()))
                .map(|n| ReplacementModifier::Additional {
                    amount: self.printed_number(n, body_span),
                })
        };

        let event = match classify_event(&event_text, subject.as_ref()) {
            Some(event) => event,
            None => {
                self.issue(DiagnosticCode::GenericReplacement, event_span);
                ReplacementEvent::Generic {
                    text: self.cur.text(event_span).to_string(),
                    affected: subject.as_ref().and_then(|s| s.filter.clone()),
                    controller: None,
                }
            }
        };

        let parsed = self.bounded(instead, |g| {
            g.attempt(|g| g.whole(|g| g.clause_chain())).ok()
        });
        let body = match parsed {
            Some(body) => body,
            None => self.synthesized_replacement(&event, modifier.as_ref(), body_span),
        };
        self.cur.restore(instead);
        self.cur.keyword("instead")?;
        Ok(replacement(event, false, body, modifier))
    }

    /// Replacement bodies the clause grammar cannot read ("it creates twice
    /// that many of those tokens") rebuilt from the event and modifier.
    fn synthesized_replacement(
        &mut self,
        event: &ReplacementEvent,
        modifier: Option<&ReplacementModifier>,
        body_span: TextSpan,
    ) -> Effect {
        let scaled = || {
            let operation = match modifier {
                Some(ReplacementModifier::Double) => Some(Operation::Twice),
                Some(ReplacementModifier::Additional { amount }) => Some(Operation::Plus {
                    amount: amount.as_literal().unwrap_or(0),
                }),
                _ => None,
            };
            Quantity::Calculated {
                expression: self.cur.text(body_span).to_string(),
                base: Some(Box::new(Quantity::derived(
                    Characteristic::EventAmount,
                    None,
                ))),
                operation,
                rounding: None,
            }
        };
        let kind = match (event, modifier) {
            (ReplacementEvent::TokenCreation { .. }, Some(_)) => EffectKind::CreateToken {
                amount: scaled(),
                token: TokenSpec::default(),
            },
            (ReplacementEvent::CounterPlacement { counter_type, .. }, Some(_)) => {
                EffectKind::PutCounters {
                    counter_type: counter_type.clone().unwrap_or_else(|| "any".into()),
                    amount: scaled(),
                    target: ObjectReference::it(),
                }
            }
            (_, Some(ReplacementModifier::Prevent)) => EffectKind::PreventDamage {
                amount: None,
                target: ObjectReference::it(),
            },
            _ => EffectKind::Unparsed {
                raw_text: self.cur.text(body_span).to_string(),
                span: body_span,
            },
        };
        if matches!(
            kind,
            EffectKind::CreateToken { .. } | EffectKind::PutCounters { .. }
        ) {
            self.issue(DiagnosticCode::CalculatedQuantity, body_span);
        }
        Effect::new(kind)
    }
}
