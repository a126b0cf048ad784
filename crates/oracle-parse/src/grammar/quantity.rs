use super::Grammar;
use crate::combinator::{Backtrack, Outcome};
use crate::one_of;
use crate::token::TokKind;
use oracle_ast::prelude::*;

impl Grammar<'_> {
    /// An amount as it appears before a noun: "two", "X", "up to three", "a".
    pub(super) fn quantity(&mut self) -> Outcome<Quantity> {
        one_of!(
            self,
            self.attempt(|g| {
                g.cur.phrase("up to")?;
                let max = g.quantity_atom()?;
                Ok(Quantity::UpTo {
                    min: 0,
                    max: Box::new(max),
                })
            }),
            self.quantity_atom(),
        )
    }

    pub(super) fn quantity_atom(&mut self) -> Outcome<Quantity> {
        let start = self.cur.pos();
        if let Ok(n) = self.cur.number() {
            let span = self.cur.span_from(start);
            return Ok(self.printed_number(n, span));
        }
        let Some(word) = self.cur.peek_word() else {
            return self.cur.fail();
        };
        match word.as_str() {
            "a" | "an" => {
                self.cur.bump();
                Ok(Quantity::one())
            }
            "x" | "y" | "z" => {
                self.cur.bump();
                Ok(Quantity::variable(word.to_uppercase()))
            }
            "that" => one_of!(
                self,
                self.cur.phrase("that much"),
                self.cur.phrase("that many"),
            )
            .map(|_| Quantity::derived(Characteristic::EventAmount, None)),
            _ => self.cur.fail(),
        }
    }

    /// A printed number as a literal. One too large for a literal keeps its
    /// text as a calculated quantity.
    pub(super) fn printed_number(&mut self, n: u32, span: TextSpan) -> Quantity {
        match i32::try_from(n) {
            Ok(value) => Quantity::literal(value),
            Err(_) => {
                self.issue(DiagnosticCode::CalculatedQuantity, span);
                Quantity::Calculated {
                    expression: self.cur.text(span).to_string(),
                    base: None,
                    operation: None,
                    rounding: None,
                }
            }
        }
    }

    /// "<amount> <noun>" or "<plural noun> equal to <amount>".
    pub(super) fn counted(&mut self, singular: &str, plural: &str) -> Outcome<Quantity> {
        one_of!(
            self,
            self.attempt(|g| {
                let q = g.quantity()?;
                g.cur.keyword_any(&[singular, plural])?;
                Ok(q)
            }),
            self.attempt(|g| {
                g.cur.keyword(plural)?;
                g.equal_to(&[])
            }),
        )
    }

    /// "equal to <amount>". Amounts the grammar cannot break down are kept
    /// as text up to the first of `stop`.
    pub(super) fn equal_to(&mut self, stop: &[&str]) -> Outcome<Quantity> {
        self.cur.phrase("equal to")?;
        one_of!(
            self,
            self.attempt(|g| g.derived_quantity()),
            self.calculated(stop),
        )
    }

    /// "its power", "your life total", "the number of cards in your hand".
    pub(super) fn derived_quantity(&mut self) -> Outcome<Quantity> {
        one_of!(
            self,
            self.attempt(|g| g.count_of()),
            self.attempt(|g| g.characteristic_of()),
            self.quantity_atom(),
        )
    }

    fn characteristic_of(&mut self) -> Outcome<Quantity> {
        let source = self.possessive()?;
        let characteristic = one_of!(
            self,
            self.cur.keyword("power").map(|_| Characteristic::Power),
            self.cur.keyword("toughness").map(|_| Characteristic::Toughness),
            self.cur.phrase("mana value").map(|_| Characteristic::ManaValue),
            self.cur.phrase("life total").map(|_| Characteristic::LifeTotal),
        )?;
        let source = match source.kind {
            ReferenceKind::You if characteristic == Characteristic::LifeTotal => {
                Some(ObjectReference::you())
            }
            _ => Some(source),
        };
        Ok(Quantity::derived(characteristic, source))
    }

    fn count_of(&mut self) -> Outcome<Quantity> {
        self.cur.phrase("the number of")?;
        if self.cur.phrase("cards in your hand").is_ok() {
            return Ok(Quantity::derived(
                Characteristic::CardsInHand,
                Some(ObjectReference::you()),
            ));
        }
        let what = self.cur.any_word()?;
        let rest_start = self.cur.pos();
        while self.cur.peek().is_some_and(|t| !t.is_punct()) && !self.at_amount_boundary() {
            self.cur.bump();
        }
        let filter = (self.cur.pos() > rest_start)
            .then(|| self.cur.text(self.cur.span_from(rest_start)).to_string());
        Ok(Quantity::Count { what, filter })
    }

    /// Arithmetic kept as text ("half your life, rounded up").
    pub(super) fn calculated(&mut self, stop: &[&str]) -> Outcome<Quantity> {
        let start = self.cur.pos();
        let operation = one_of!(
            self,
            self.cur.keyword("half").map(|_| Operation::Half),
            self.cur.keyword("twice").map(|_| Operation::Twice),
        )
        .ok();
        let base = match operation {
            Some(_) => self.optional(|g| g.derived_quantity()).map(Box::new),
            None => None,
        };
        while let Some(tok) = self.cur.peek() {
            let stops = tok.is_punct()
                || matches!(tok.kind, TokKind::Reminder(_))
                || tok
                    .word(self.cur.src())
                    .is_some_and(|w| stop.contains(&w.as_str()));
            if stops {
                break;
            }
            self.cur.bump();
        }
        if self.cur.pos() == start {
            return self.cur.fail();
        }
        let rounding = self
            .optional(|g| {
                g.cur.punct(TokKind::Comma)?;
                g.cur.keyword("rounded")?;
                one_of!(
                    g,
                    g.cur.keyword("up").map(|_| Rounding::Up),
                    g.cur.keyword("down").map(|_| Rounding::Down),
                )
            });
        let span = self.cur.span_from(start);
        self.issue(DiagnosticCode::CalculatedQuantity, span);
        Ok(Quantity::Calculated {
            expression: self.cur.text(span).to_string(),
            base,
            operation,
            rounding,
        })
    }

    fn at_amount_boundary(&self) -> bool {
        self.cur.peek_word().is_some_and(|w| {
            matches!(
                w.as_str(),
                "to" | "and" | "then" | "until" | "unless" | "plus" | "minus" | "instead"
            )
        })
    }
}

/// One side of a power/toughness modifier: "+2", "-1", "+X", "-X".
pub(super) fn pt_part(text: &str) -> Option<Quantity> {
    let (negative, body) = match text.as_bytes().first()? {
        b'+' => (false, &text[1..]),
        b'-' => (true, &text[1..]),
        _ => (false, text),
    };
    if body.eq_ignore_ascii_case("x") {
        return Some(if negative {
            Quantity::Calculated {
                expression: "-X".into(),
                base: Some(Box::new(Quantity::variable("X"))),
                operation: None,
                rounding: None,
            }
        } else {
            Quantity::variable("X")
        });
    }
    let n: i32 = body.parse().ok()?;
    Some(Quantity::literal(if negative { -n } else { n }))
}

/// "+1/+1", "-2/-0", "+X/+0".
pub(super) fn pt_modifier(text: &str) -> Option<(Quantity, Quantity)> {
    let (p, t) = text.split_once('/')?;
    let signed = |s: &str| s.starts_with(|c| c == '+' || c == '-');
    if !(signed(p) && signed(t)) {
        return None;
    }
    Some((pt_part(p)?, pt_part(t)?))
}

/// A printed token size such as "2/2".
pub(super) fn fixed_pt(text: &str) -> Option<(i32, i32)> {
    let (p, t) = text.split_once('/')?;
    Some((p.parse().ok()?, t.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_modifiers() {
        assert_eq!(
            pt_modifier("+1/+1"),
            Some((Quantity::literal(1), Quantity::literal(1)))
        );
        assert_eq!(
            pt_modifier("-2/-0"),
            Some((Quantity::literal(-2), Quantity::literal(0)))
        );
        assert_eq!(pt_modifier("2/2"), None);
        assert!(matches!(
            pt_modifier("+X/+0"),
            Some((Quantity::Variable { .. }, _))
        ));
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(fixed_pt("3/1"), Some((3, 1)));
        assert_eq!(fixed_pt("X/X"), None);
    }
}
