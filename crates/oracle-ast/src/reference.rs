//! Object references ("target creature", "each opponent", "it") and the
//! filters that narrow them.

use crate::mana::Color;
use crate::quantity::Quantity;
use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// The object the text is printed on.
    #[serde(rename = "Self")]
    This,
    Target,
    It,
    You,
    Opponent,
    EachOpponent,
    EachPlayer,
    AnyTarget,
    Another,
    Each,
    Controller,
    Owner,
    DefendingPlayer,
    EnchantedOrEquipped,
    Chosen,
    ThatPlayer,
    EachOtherPlayer,
    /// "a creature", "two cards": any matching object, not targeted.
    Indefinite,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub kind: ReferenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ObjectFilter>,
}

impl ObjectReference {
    pub fn new(kind: ReferenceKind) -> Self {
        Self { kind, filter: None }
    }

    pub fn with_filter(kind: ReferenceKind, filter: ObjectFilter) -> Self {
        let filter = if filter.is_empty() { None } else { Some(filter) };
        Self { kind, filter }
    }

    pub fn this() -> Self {
        Self::new(ReferenceKind::This)
    }

    pub fn it() -> Self {
        Self::new(ReferenceKind::It)
    }

    pub fn you() -> Self {
        Self::new(ReferenceKind::You)
    }

    pub fn is_player(&self) -> bool {
        match self.kind {
            ReferenceKind::You
            | ReferenceKind::Opponent
            | ReferenceKind::EachOpponent
            | ReferenceKind::EachPlayer
            | ReferenceKind::Controller
            | ReferenceKind::Owner
            | ReferenceKind::DefendingPlayer
            | ReferenceKind::ThatPlayer
            | ReferenceKind::EachOtherPlayer => true,
            _ => self.filter.as_ref().is_some_and(|f| {
                f.card_types
                    .iter()
                    .any(|t| t == "player" || t == "opponent")
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerConstraint {
    You,
    Opponent,
    NotYou,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Battlefield,
    Graveyard,
    Hand,
    Library,
    Exile,
    Stack,
    Command,
}

impl Zone {
    pub fn from_word(word: &str) -> Option<Zone> {
        match word.to_ascii_lowercase().as_str() {
            "battlefield" => Some(Zone::Battlefield),
            "graveyard" | "graveyards" => Some(Zone::Graveyard),
            "hand" | "hands" => Some(Zone::Hand),
            "library" | "libraries" => Some(Zone::Library),
            "exile" => Some(Zone::Exile),
            "stack" => Some(Zone::Stack),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stat {
    Power,
    Toughness,
    ManaValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericComparison {
    pub stat: Stat,
    pub op: Comparison,
    pub value: Quantity,
}

/// Restrictions on which objects a reference can mean. All lists are
/// conjunctive except `card_types`, which lists alternatives ("artifact or
/// creature").
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparisons: Vec<NumericComparison>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characteristics: Vec<String>,
    /// Span of a trailing fragment the filter grammar did not understand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_span: Option<TextSpan>,
}

impl ObjectFilter {
    pub fn card_type(t: impl Into<String>) -> Self {
        Self {
            card_types: vec![t.into()],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ObjectFilter::default()
    }
}
