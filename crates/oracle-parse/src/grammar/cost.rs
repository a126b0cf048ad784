//! Costs: the part of an activated ability before the colon, and the cost
//! phrases reused by keywords and casting-cost statements.

use super::Grammar;
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::{Symbol, Tok, TokKind};
use oracle_ast::prelude::*;

impl Grammar<'_> {
    /// Comma-separated costs filling the window. Never fails: a piece the
    /// grammar does not understand becomes [`Cost::Unparsed`].
    pub(super) fn cost_list(&mut self) -> Vec<Cost> {
        let mut costs = Vec::new();
        while !self.cur.at_end() {
            if let Ok(span) = self.cur.punct(TokKind::Comma) {
                self.issue(DiagnosticCode::DanglingSeparator, span);
                continue;
            }
            let end = self.index_of(|t| t.kind == TokKind::Comma);
            let cost = self.bounded(end, |g| {
                g.attempt(|g| g.whole(|g| g.cost_piece()))
                    .unwrap_or_else(|_| {
                        let span = g.cur.skip_rest();
                        Cost::Unparsed {
                            raw_text: g.cur.text(span).to_string(),
                            span,
                        }
                    })
            });
            costs.push(cost);
            if let Ok(span) = self.cur.punct(TokKind::Comma) {
                if self.cur.at_end() {
                    self.issue(DiagnosticCode::DanglingSeparator, span);
                }
            }
        }
        costs
    }

    pub(super) fn cost_piece(&mut self) -> Outcome<Cost> {
        one_of!(
            self,
            self.symbol_cost(),
            self.loyalty_cost(),
            self.attempt(|g| {
                g.cur.keyword("sacrifice")?;
                let (object, quantity) = g.counted_object()?;
                Ok(Cost::Sacrifice { object, quantity })
            }),
            self.attempt(|g| {
                g.cur.keyword("discard")?;
                let (object, quantity) = g.counted_object()?;
                Ok(Cost::Discard { object, quantity })
            }),
            self.attempt(|g| {
                g.cur.keyword("pay")?;
                g.payment()
            }),
            self.attempt(|g| {
                g.cur.keyword("exile")?;
                let (object, quantity) = g.counted_object()?;
                let from_zone = object.filter.as_ref().and_then(|f| f.zone);
                Ok(Cost::Exile {
                    object,
                    quantity,
                    from_zone,
                })
            }),
            self.attempt(|g| {
                g.cur.keyword("remove")?;
                let quantity = g.quantity()?;
                let counter_type = g.counter_type()?;
                g.cur.keyword("from")?;
                let target = Some(g.reference()?);
                Ok(Cost::RemoveCounters {
                    counter_type,
                    quantity,
                    target,
                })
            }),
            self.attempt(|g| {
                g.cur.keyword("tap")?;
                one_of!(
                    g,
                    g.self_ref().map(|this| Cost::Tap { target: Some(this) }),
                    g.counted_object()
                        .map(|(object, quantity)| Cost::TapPermanents { object, quantity }),
                )
            }),
            self.attempt(|g| {
                g.cur.keyword("untap")?;
                let this = g.self_ref()?;
                Ok(Cost::Untap { target: Some(this) })
            }),
        )
    }

    /// `{2}{R}`, `{T}`, `{Q}`, `{E}{E}`
    fn symbol_cost(&mut self) -> Outcome<Cost> {
        match self.cur.peek().map(|t| &t.kind) {
            Some(TokKind::Symbol(Symbol::Mana(_))) => Ok(Cost::Mana {
                symbols: self.mana_symbols()?,
            }),
            Some(TokKind::Symbol(Symbol::Tap)) => {
                self.cur.bump();
                Ok(Cost::Tap { target: None })
            }
            Some(TokKind::Symbol(Symbol::Untap)) => {
                self.cur.bump();
                Ok(Cost::Untap { target: None })
            }
            Some(TokKind::Symbol(Symbol::Energy)) => Ok(Cost::PayEnergy {
                amount: self.energy()?,
            }),
            _ => self.cur.fail(),
        }
    }

    /// `+1`, `-3`, `0`, `-X` before a planeswalker ability's colon.
    fn loyalty_cost(&mut self) -> Outcome<Cost> {
        let cost = match self.cur.peek().map(|t| &t.kind) {
            Some(TokKind::Number {
                value: 0,
                spelled: false,
            }) => Cost::Loyalty { change: 0 },
            Some(TokKind::Word(w)) if w.starts_with(|c| c == '+' || c == '-') => {
                let (sign, rest) = w.split_at(1);
                if rest == "X" {
                    Cost::VariableLoyalty {
                        variable: rest.to_string(),
                        negative: sign == "-",
                    }
                } else {
                    match w.parse::<i32>() {
                        Ok(change) => Cost::Loyalty { change },
                        Err(_) => return self.cur.fail(),
                    }
                }
            }
            _ => return self.cur.fail(),
        };
        self.cur.bump();
        Ok(cost)
    }

    /// After "pay": "3 life", "{E}{E}", "{2}".
    fn payment(&mut self) -> Outcome<Cost> {
        one_of!(
            self,
            self.counted("life", "life")
                .map(|amount| Cost::PayLife { amount }),
            self.energy().map(|amount| Cost::PayEnergy { amount }),
            self.mana_symbols().map(|symbols| Cost::Mana { symbols }),
        )
    }

    fn energy(&mut self) -> Outcome<Quantity> {
        let mut count = 0;
        while self.cur.at_kind(&TokKind::Symbol(Symbol::Energy)) {
            self.cur.bump();
            count += 1;
        }
        if count == 0 {
            return self.cur.fail();
        }
        Ok(Quantity::literal(count))
    }

    /// A run of adjacent mana symbols.
    pub(super) fn mana_symbols(&mut self) -> Outcome<Vec<ManaSymbol>> {
        let mut symbols = Vec::new();
        while let Some(Tok {
            kind: TokKind::Symbol(Symbol::Mana(m)),
            ..
        }) = self.cur.peek()
        {
            symbols.push(m.clone());
            self.cur.bump();
        }
        if symbols.is_empty() {
            return self.cur.fail();
        }
        Ok(symbols)
    }

    /// The words before "counter(s)": "+1/+1", "loyalty", "-1/-1". A bare
    /// "counter" has type "any".
    pub(super) fn counter_type(&mut self) -> Outcome<String> {
        let start = self.cur.pos();
        let mut words = Vec::new();
        for _ in 0..=3 {
            if self.cur.keyword_any(&["counter", "counters"]).is_ok() {
                return Ok(if words.is_empty() {
                    "any".to_string()
                } else {
                    words.join(" ")
                });
            }
            match self.cur.peek() {
                Some(tok) if !tok.is_punct() && tok.kind != TokKind::Newline => {
                    words.push(self.cur.text(tok.span).to_string());
                    self.cur.bump();
                }
                _ => break,
            }
        }
        self.cur.restore(start);
        self.cur.fail()
    }
}
