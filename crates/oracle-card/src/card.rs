use crate::attributes;
use crate::input::CardInput;
use crate::type_line::parse_type_line;
use oracle_ast::prelude::*;
use oracle_parse::{parse_oracle_text, ParseOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything one card parse produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub ast: CardOutputAst,
    /// Attribute diagnostics followed by the oracle diagnostics of the
    /// card, or of each face in order.
    pub diagnostics: Vec<Diagnostic>,
    /// No error-severity diagnostic anywhere on the card.
    pub succeeded: bool,
}

impl ParseResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Parse one card. Never fails; text the grammar does not understand
/// becomes unparsed nodes with diagnostics.
///
/// Multi-faced cards parse each face on its own. The root then carries
/// only the card's own printed characteristics and an empty oracle.
#[tracing::instrument(level = "debug", skip_all, fields(card = %input.name))]
pub fn parse_card(input: &CardInput, opts: &ParseOptions) -> ParseResult {
    let mut diagnostics = Vec::new();
    let face_inputs = input.faces();

    let (oracle, attributes, faces) = if face_inputs.is_empty() {
        let (oracle, attributes) = parse_side(input, opts, &mut diagnostics);
        (oracle, attributes, None)
    } else {
        let mut attributes = attributes::printed(input, &mut diagnostics);
        if let Some(layout) = &input.layout {
            attributes.push(CardAttribute::Layout {
                layout: layout.clone(),
            });
        }
        let faces = face_inputs
            .iter()
            .map(|face| {
                let (oracle, attributes) = parse_side(face, opts, &mut diagnostics);
                CardFaceAst {
                    name: face.name.clone(),
                    type_line: parse_type_line(face.type_line.as_deref().unwrap_or("")),
                    oracle,
                    attributes,
                }
            })
            .collect::<Vec<_>>();
        debug!(faces = faces.len(), "parsed faces");
        (Oracle::default(), attributes, Some(faces))
    };

    let succeeded = !diagnostics.iter().any(Diagnostic::is_error);
    debug!(
        succeeded,
        diagnostics = diagnostics.len(),
        "card parsed"
    );
    ParseResult {
        ast: CardOutputAst {
            name: input.name.clone(),
            type_line: parse_type_line(input.type_line.as_deref().unwrap_or("")),
            oracle,
            attributes,
            faces,
        },
        diagnostics,
        succeeded,
    }
}

/// Oracle text and attributes of a single-faced card or of one face.
fn parse_side(
    side: &CardInput,
    opts: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Oracle, Vec<CardAttribute>) {
    let oracle = parse_oracle_text(
        side.oracle_text.as_deref().unwrap_or(""),
        Some(&side.name),
        opts,
    );
    let mut attributes = attributes::printed(side, diagnostics);
    attributes::from_oracle(&oracle, &mut attributes);
    if let Some(layout) = &side.layout {
        attributes.push(CardAttribute::Layout {
            layout: layout.clone(),
        });
    }
    diagnostics.extend(oracle.diagnostics.iter().cloned());
    (oracle, attributes)
}
