//! The card record handed over by the ingestion pipeline.

use crate::error::HarnessError;
use serde::{Deserialize, Serialize};

const FACE_SEPARATOR: &str = " // ";

/// Raw printed characteristics of a card or of one face, using Scryfall's
/// field names. Everything except the name is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_indicator: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_identity: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_faces: Option<Vec<CardInput>>,
}

impl CardInput {
    /// A single-faced card with only a name and oracle text.
    pub fn from_text(name: impl Into<String>, oracle_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oracle_text: Some(oracle_text.into()),
            ..Self::default()
        }
    }

    /// Decode a JSON array of cards, or a single card object.
    pub fn list_from_json(json: &str) -> Result<Vec<CardInput>, HarnessError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(HarnessError::Cards)?;
        if value.is_array() {
            serde_json::from_value(value).map_err(HarnessError::Cards)
        } else {
            serde_json::from_value(value)
                .map(|card| vec![card])
                .map_err(HarnessError::Cards)
        }
    }

    /// The printed faces of this card, in source order. Empty for a
    /// single-faced card.
    ///
    /// Upstream `card_faces` win. Otherwise a name of the form `A // B` is
    /// split, along with every other field holding a ` // ` pair; oracle
    /// text is split on lines consisting of `//`.
    pub fn faces(&self) -> Vec<CardInput> {
        if let Some(faces) = self.card_faces.as_ref().filter(|f| !f.is_empty()) {
            return faces.clone();
        }
        if !self.name.contains(FACE_SEPARATOR) {
            return Vec::new();
        }
        let texts = self
            .oracle_text
            .as_deref()
            .map(split_oracle_text)
            .unwrap_or_default();
        self.name
            .split(FACE_SEPARATOR)
            .enumerate()
            .map(|(i, name)| CardInput {
                name: name.trim().to_string(),
                type_line: nth_part(&self.type_line, i),
                oracle_text: texts.get(i).cloned(),
                mana_cost: nth_part(&self.mana_cost, i),
                power: nth_part(&self.power, i),
                toughness: nth_part(&self.toughness, i),
                loyalty: nth_part(&self.loyalty, i),
                defense: nth_part(&self.defense, i),
                ..CardInput::default()
            })
            .collect()
    }
}

/// Whether a raw field holds one value per face rather than one for the card.
pub(crate) fn is_face_pair(raw: &str) -> bool {
    raw.contains(FACE_SEPARATOR)
}

fn nth_part(field: &Option<String>, i: usize) -> Option<String> {
    let raw = field.as_deref()?;
    if !is_face_pair(raw) {
        return (i == 0).then(|| raw.to_string());
    }
    raw.split(FACE_SEPARATOR)
        .nth(i)
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
}

fn split_oracle_text(text: &str) -> Vec<String> {
    let mut faces = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim() == "//" {
            faces.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    faces.push(current.join("\n"));
    faces
}
