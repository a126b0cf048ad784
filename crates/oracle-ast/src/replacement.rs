use crate::effect::Effect;
use crate::quantity::Quantity;
use crate::reference::{ObjectFilter, ObjectReference, Zone};
use serde::{Deserialize, Serialize};

/// "If <event> would happen, <replacement> instead."
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementEffect {
    pub event: ReplacementEvent,
    /// Whether the replaced event still happens (e.g. "enters tapped").
    pub original_event_occurs: bool,
    pub replacement: Box<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ReplacementModifier>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all_fields = "camelCase")]
pub enum ReplacementEvent {
    TokenCreation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    CounterPlacement {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        counter_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    Damage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ObjectReference>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    Destruction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    Death {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    ZoneChange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Zone>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<Zone>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    LifeChange {
        is_gain: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    Untap {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
    /// Free-text fallback for events the grammar recognises as a
    /// replacement but cannot classify.
    Generic {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        affected: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        controller: Option<ObjectReference>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modifierType", rename_all_fields = "camelCase")]
pub enum ReplacementModifier {
    Double,
    Additional { amount: Quantity },
    Prevent,
    EntersTapped,
    EntersWithCounters { counter_type: String, amount: Quantity },
}
