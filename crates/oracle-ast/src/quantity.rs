use crate::reference::ObjectReference;
use serde::{Deserialize, Serialize};

/// A numeric amount as written on a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quantityType", rename_all_fields = "camelCase")]
pub enum Quantity {
    Literal {
        value: i32,
    },
    /// `X`, `Y` or `Z`.
    Variable {
        name: String,
    },
    /// A characteristic read off an object, e.g. "its power".
    Derived {
        characteristic: Characteristic,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<Box<ObjectReference>>,
    },
    /// "the number of <what> [<filter>]".
    Count {
        what: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
    },
    UpTo {
        min: u32,
        max: Box<Quantity>,
    },
    /// Arithmetic that is kept as text, optionally anchored on a base amount.
    Calculated {
        expression: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<Box<Quantity>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operation: Option<Operation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rounding: Option<Rounding>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Characteristic {
    Power,
    Toughness,
    ManaValue,
    LifeTotal,
    CardsInHand,
    /// "that much" / "that many": the amount of the event being referred to.
    EventAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Half,
    Twice,
    Plus { amount: i32 },
    Minus { amount: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rounding {
    Up,
    Down,
}

impl Quantity {
    pub fn literal(value: i32) -> Self {
        Quantity::Literal { value }
    }

    pub fn one() -> Self {
        Quantity::literal(1)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Quantity::Variable { name: name.into() }
    }

    pub fn derived(characteristic: Characteristic, source: Option<ObjectReference>) -> Self {
        Quantity::Derived {
            characteristic,
            source: source.map(Box::new),
        }
    }

    pub fn as_literal(&self) -> Option<i32> {
        match self {
            Quantity::Literal { value } => Some(*value),
            _ => None,
        }
    }

    /// Nesting depth of `base`/`max` chains; a flat quantity has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Quantity::UpTo { max, .. } => 1 + max.depth(),
            Quantity::Calculated { base: Some(b), .. } => 1 + b.depth(),
            _ => 1,
        }
    }
}
