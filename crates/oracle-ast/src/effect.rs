//! Effects: what an ability does once it resolves or applies.
//!
//! [`Effect`] carries the modifiers every effect can have (duration,
//! optionality, an "if you do" follow-up and an "unless" escape) and flattens
//! the variant-specific [`EffectKind`] next to them, so the JSON for an effect
//! is a single object discriminated by `effectType`.

use crate::cost::{AdditionalCost, AlternativeCost, Cost, CostReduction};
use crate::duration::Duration;
use crate::is_false;
use crate::mana::{Color, ManaSymbol};
use crate::quantity::Quantity;
use crate::reference::{ObjectFilter, ObjectReference, Zone};
use crate::replacement::ReplacementEffect;
use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(flatten)]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_you_do: Option<Box<Effect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<UnlessClause>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnlessClause {
    pub player: ObjectReference,
    pub cost: Cost,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effectType", rename_all_fields = "camelCase")]
pub enum EffectKind {
    // damage
    DealDamage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ObjectReference>,
        amount: Quantity,
        target: ObjectReference,
    },
    PreventDamage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<Quantity>,
        target: ObjectReference,
    },

    // zone change
    Destroy {
        target: ObjectReference,
        #[serde(default, skip_serializing_if = "is_false")]
        cant_be_regenerated: bool,
    },
    Exile {
        target: ObjectReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Zone>,
    },
    ReturnToHand {
        target: ObjectReference,
    },
    ReturnToBattlefield {
        target: ObjectReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Zone>,
        #[serde(default, skip_serializing_if = "is_false")]
        tapped: bool,
        #[serde(default, skip_serializing_if = "is_false")]
        under_your_control: bool,
    },
    Sacrifice {
        player: ObjectReference,
        object: ObjectReference,
        quantity: Quantity,
    },

    // card flow
    Draw {
        player: ObjectReference,
        amount: Quantity,
    },
    Discard {
        player: ObjectReference,
        amount: Quantity,
        #[serde(default, skip_serializing_if = "is_false")]
        random: bool,
    },
    Mill {
        player: ObjectReference,
        amount: Quantity,
    },
    Scry {
        amount: Quantity,
    },
    Surveil {
        amount: Quantity,
    },
    SearchLibrary {
        player: ObjectReference,
        filter: ObjectFilter,
        quantity: Quantity,
        destination: Zone,
        #[serde(default, skip_serializing_if = "is_false")]
        tapped: bool,
    },

    // counters
    PutCounters {
        counter_type: String,
        amount: Quantity,
        target: ObjectReference,
    },
    RemoveCounters {
        counter_type: String,
        amount: Quantity,
        target: ObjectReference,
    },
    Proliferate,

    // resources
    GainLife {
        player: ObjectReference,
        amount: Quantity,
    },
    LoseLife {
        player: ObjectReference,
        amount: Quantity,
    },
    AddMana {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        symbols: Vec<ManaSymbol>,
        /// "Add N mana of any (one) color."
        #[serde(default, skip_serializing_if = "Option::is_none")]
        any_color: Option<Quantity>,
    },

    // tokens and copies
    CreateToken {
        amount: Quantity,
        token: TokenSpec,
    },
    CopySpell {
        target: ObjectReference,
    },

    // modification
    ModifyPowerToughness {
        target: ObjectReference,
        power: Quantity,
        toughness: Quantity,
    },
    GrantKeywords {
        target: ObjectReference,
        keywords: Vec<String>,
    },

    // control
    GainControl {
        target: ObjectReference,
    },

    // keyword abilities
    Evasion {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        can_be_blocked_by: Option<ObjectFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unblockable_condition: Option<UnblockableCondition>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_blockers: Option<u32>,
    },
    Protection {
        from: Vec<ProtectionQuality>,
    },
    Marker {
        keyword: Keyword,
    },
    Ward {
        cost: Cost,
    },
    /// "Enchant creature": what an Aura may be attached to.
    Enchant {
        filter: ObjectFilter,
    },
    /// Equip and similar "attach to" effects: `object` becomes attached to
    /// `target`.
    Attach {
        object: ObjectReference,
        target: ObjectReference,
    },

    // combat
    Tap {
        target: ObjectReference,
    },
    Untap {
        target: ObjectReference,
    },
    Fight {
        attacker: ObjectReference,
        defender: ObjectReference,
    },
    CantBlock {
        target: ObjectReference,
    },
    CantBeBlocked {
        target: ObjectReference,
    },

    // timing
    CounterSpell {
        target: ObjectReference,
    },

    // casting costs stated in rules text
    RequireAdditionalCost {
        cost: AdditionalCost,
    },
    AllowAlternativeCost {
        cost: AlternativeCost,
    },
    ReduceCost {
        reduction: CostReduction,
    },

    // replacement
    Replacement(ReplacementEffect),

    // composite
    Sequence {
        effects: Vec<Effect>,
    },
    Modal {
        choose: Quantity,
        modes: Vec<Effect>,
    },
    Conditional {
        condition: String,
        effect: Box<Effect>,
    },
    Unparsed {
        raw_text: String,
        span: TextSpan,
    },
}

/// Zero-argument keyword abilities that carry no further structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Vigilance,
    Trample,
    Haste,
    Lifelink,
    Reach,
    Flash,
    FirstStrike,
    DoubleStrike,
    Deathtouch,
    Defender,
    Hexproof,
    Indestructible,
    Shroud,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "conditionType", rename_all_fields = "camelCase")]
pub enum UnblockableCondition {
    DefendingPlayerControls { subtype: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityKind {
    Color,
    CardType,
    Everything,
    Subtype,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionQuality {
    pub kind: QualityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub colorless: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub tapped: bool,
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            duration: None,
            is_optional: false,
            if_you_do: None,
            unless: None,
        }
    }

    pub fn unparsed(raw_text: impl Into<String>, span: TextSpan) -> Self {
        Self::new(EffectKind::Unparsed {
            raw_text: raw_text.into(),
            span,
        })
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn if_you_do(mut self, follow_up: Effect) -> Self {
        self.if_you_do = Some(Box::new(follow_up));
        self
    }

    pub fn unless(mut self, clause: UnlessClause) -> Self {
        self.unless = Some(clause);
        self
    }

    /// True when the effect itself is an unparsed fallback.
    pub fn is_unparsed(&self) -> bool {
        matches!(self.kind, EffectKind::Unparsed { .. })
    }

    /// True when the effect is unparsed or every part of a sequence is.
    pub fn is_wholly_unparsed(&self) -> bool {
        match &self.kind {
            EffectKind::Unparsed { .. } => true,
            EffectKind::Sequence { effects } => {
                !effects.is_empty() && effects.iter().all(Effect::is_wholly_unparsed)
            }
            _ => false,
        }
    }
}

impl From<EffectKind> for Effect {
    fn from(kind: EffectKind) -> Self {
        Effect::new(kind)
    }
}
