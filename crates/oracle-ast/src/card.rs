//! Card-level output: the root of every parse.

use crate::ability::Ability;
use crate::cost::{AdditionalCost, AlternativeCost, CostReduction};
use crate::diagnostic::Diagnostic;
use crate::mana::{Color, ManaSymbol};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOutputAst {
    pub name: String,
    pub type_line: TypeLine,
    pub oracle: Oracle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<CardAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<CardFaceAst>>,
}

/// One printed face of a multi-faced card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFaceAst {
    pub name: String,
    pub type_line: TypeLine,
    pub oracle: Oracle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<CardAttribute>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeLine {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Oracle {
    pub abilities: Vec<Ability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum CardAttribute {
    ManaCost {
        symbols: Vec<ManaSymbol>,
        mana_value: u32,
        is_variable: bool,
    },
    Colors {
        colors: Vec<Color>,
    },
    ColorIdentity {
        colors: Vec<Color>,
    },
    CreatureStats {
        power: PowerToughnessValue,
        toughness: PowerToughnessValue,
    },
    Loyalty {
        value: PowerToughnessValue,
    },
    Defense {
        value: PowerToughnessValue,
    },
    AdditionalCosts {
        costs: Vec<AdditionalCost>,
    },
    AlternativeCosts {
        costs: Vec<AlternativeCost>,
    },
    CostReductions {
        reductions: Vec<CostReduction>,
    },
    Layout {
        layout: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "valueType", rename_all_fields = "camelCase")]
pub enum PowerToughnessValue {
    Fixed {
        value: i32,
    },
    /// `*`, `X`, `?`: defined elsewhere (or not at all).
    Variable {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        derived_from: Option<String>,
    },
    /// `1+*` and friends.
    Derived {
        base: i32,
        derived_from: String,
    },
}
