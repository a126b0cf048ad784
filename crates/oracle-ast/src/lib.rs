#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod ability;
pub mod card;
pub mod cost;
pub mod diagnostic;
pub mod duration;
pub mod effect;
pub mod mana;
pub mod quantity;
pub mod reference;
pub mod replacement;

pub mod span {
    use serde::{Deserialize, Serialize};

    /// Half-open byte range into the oracle text of a single face.
    #[derive(
        Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    pub struct TextSpan {
        pub start: u32,
        pub end: u32,
    }

    impl TextSpan {
        pub fn new(start: usize, end: usize) -> Self {
            Self {
                start: start as u32,
                end: end as u32,
            }
        }

        pub fn empty(at: u32) -> Self {
            Self { start: at, end: at }
        }

        pub fn len(&self) -> u32 {
            self.end.saturating_sub(self.start)
        }

        pub fn is_empty(&self) -> bool {
            self.end <= self.start
        }

        /// Smallest span covering both `self` and `other`.
        pub fn to(self, other: TextSpan) -> TextSpan {
            TextSpan {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            }
        }

        /// The text this span covers. Out-of-range spans yield `""`.
        pub fn slice<'s>(&self, src: &'s str) -> &'s str {
            src.get(self.start as usize..self.end as usize)
                .unwrap_or("")
        }
    }
}

pub mod prelude {
    pub use crate::ability::{Ability, Step, Trigger, TriggerEvent, TriggerWord};
    pub use crate::card::{
        CardAttribute, CardFaceAst, CardOutputAst, Oracle, PowerToughnessValue, TypeLine,
    };
    pub use crate::cost::{AdditionalCost, AlternativeCost, Cost, CostReduction};
    pub use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
    pub use crate::duration::Duration;
    pub use crate::effect::{
        Effect, EffectKind, Keyword, ProtectionQuality, QualityKind, TokenSpec,
        UnblockableCondition, UnlessClause,
    };
    pub use crate::mana::{Color, ManaSymbol, ManaSymbolKind};
    pub use crate::quantity::{Characteristic, Operation, Quantity, Rounding};
    pub use crate::reference::{
        Comparison, ControllerConstraint, NumericComparison, ObjectFilter, ObjectReference,
        ReferenceKind, Stat, Zone,
    };
    pub use crate::replacement::{ReplacementEffect, ReplacementEvent, ReplacementModifier};
    pub use crate::span::TextSpan;
}

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}
