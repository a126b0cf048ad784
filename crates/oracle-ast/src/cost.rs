use crate::is_false;
use crate::mana::ManaSymbol;
use crate::quantity::Quantity;
use crate::reference::{ObjectFilter, ObjectReference, Zone};
use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "costType", rename_all_fields = "camelCase")]
pub enum Cost {
    Mana {
        symbols: Vec<ManaSymbol>,
    },
    Tap {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ObjectReference>,
    },
    Untap {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ObjectReference>,
    },
    Sacrifice {
        object: ObjectReference,
        quantity: Quantity,
    },
    Discard {
        object: ObjectReference,
        quantity: Quantity,
    },
    PayLife {
        amount: Quantity,
    },
    PayEnergy {
        amount: Quantity,
    },
    Exile {
        object: ObjectReference,
        quantity: Quantity,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from_zone: Option<Zone>,
    },
    RemoveCounters {
        counter_type: String,
        quantity: Quantity,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ObjectReference>,
    },
    TapPermanents {
        object: ObjectReference,
        quantity: Quantity,
    },
    /// Planeswalker loyalty cost: `+2`, `−3`, `0`.
    Loyalty {
        change: i32,
    },
    /// `+X` or `−X`.
    VariableLoyalty {
        variable: String,
        negative: bool,
    },
    Composite {
        costs: Vec<Cost>,
    },
    Unparsed {
        raw_text: String,
        span: TextSpan,
    },
}

impl Cost {
    pub fn is_unparsed(&self) -> bool {
        match self {
            Cost::Unparsed { .. } => true,
            Cost::Composite { costs } => costs.iter().any(Cost::is_unparsed),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeCost {
    pub cost: Cost,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalCost {
    pub cost: Cost,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<AlternativeCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReduction {
    pub amount: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<ObjectFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}
