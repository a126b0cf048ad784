use crate::cost::Cost;
use crate::diagnostic::Diagnostic;
use crate::effect::Effect;
use crate::reference::{ObjectFilter, ObjectReference};
use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

/// One paragraph of oracle text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "abilityType", rename_all_fields = "camelCase")]
pub enum Ability {
    /// Keyword abilities and continuous effects.
    Static {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keyword_source: Option<String>,
        effect: Effect,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reminder: Option<String>,
    },
    /// "Cost: Effect."
    Activated {
        costs: Vec<Cost>,
        effect: Effect,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keyword_source: Option<String>,
        /// "Activate only as a sorcery." and similar.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        restriction: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reminder: Option<String>,
    },
    /// "When/Whenever/At ..., effect."
    Triggered { trigger: Trigger, effect: Effect },
    /// "Landfall — Whenever ..., effect."
    NamedTriggered {
        keyword: String,
        trigger: Trigger,
        effect: Effect,
    },
    /// One-shot spell text and other sentences that are neither keywords
    /// nor continuous effects.
    Passive { effect: Effect },
    Unparsed {
        raw_text: String,
        span: TextSpan,
        diagnostics: Vec<Diagnostic>,
    },
}

impl Ability {
    pub fn effect(&self) -> Option<&Effect> {
        match self {
            Ability::Static { effect, .. }
            | Ability::Activated { effect, .. }
            | Ability::Triggered { effect, .. }
            | Ability::NamedTriggered { effect, .. }
            | Ability::Passive { effect } => Some(effect),
            Ability::Unparsed { .. } => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Ability::Unparsed { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerWord {
    When,
    Whenever,
    At,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub word: TriggerWord,
    /// Condition text between the trigger word and the comma.
    pub text: String,
    pub span: TextSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<TriggerEvent>,
    /// "..., if <condition>, ..." after the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervening_if: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Upkeep,
    DrawStep,
    PrecombatMain,
    Combat,
    PostcombatMain,
    EndStep,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "triggerType", rename_all_fields = "camelCase")]
pub enum TriggerEvent {
    EntersBattlefield {
        object: ObjectReference,
    },
    LeavesBattlefield {
        object: ObjectReference,
    },
    Dies {
        object: ObjectReference,
    },
    Attacks {
        object: ObjectReference,
    },
    Blocks {
        object: ObjectReference,
    },
    DealsDamage {
        object: ObjectReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<ObjectReference>,
        combat_only: bool,
    },
    CastSpell {
        player: ObjectReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<ObjectFilter>,
    },
    GainLife {
        player: ObjectReference,
    },
    DrawCard {
        player: ObjectReference,
    },
    BecomesTarget {
        object: ObjectReference,
    },
    BeginningOfStep {
        step: Step,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player: Option<ObjectReference>,
    },
}
