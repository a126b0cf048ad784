//! Diagnostics attached to partially parsed cards.
//!
//! Codes are stable (`AST001`...) so downstream reports can aggregate them
//! across runs. Each code has a fixed default severity; a card parse is
//! successful iff none of its diagnostics is an error.

use crate::span::TextSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Paragraph matched no ability form.
    #[serde(rename = "AST001")]
    UnparsedAbility,
    /// Effect clause not understood.
    #[serde(rename = "AST002")]
    UnparsedEffect,
    /// Cost fragment not understood.
    #[serde(rename = "AST003")]
    UnparsedCost,
    #[serde(rename = "AST004")]
    UnparsedFilter,
    #[serde(rename = "AST005")]
    UnmodeledReminder,
    #[serde(rename = "AST006")]
    DanglingSeparator,
    #[serde(rename = "AST007")]
    GenericReplacement,
    #[serde(rename = "AST008")]
    CalculatedQuantity,
    #[serde(rename = "AST009")]
    UnknownCharacter,
    #[serde(rename = "AST010")]
    UnparsedTrigger,
    #[serde(rename = "AST011")]
    InvalidManaCost,
    #[serde(rename = "AST012")]
    InvalidStat,
    #[serde(rename = "AST013")]
    NestingLimit,
}

impl DiagnosticCode {
    pub const ALL: [DiagnosticCode; 13] = [
        DiagnosticCode::UnparsedAbility,
        DiagnosticCode::UnparsedEffect,
        DiagnosticCode::UnparsedCost,
        DiagnosticCode::UnparsedFilter,
        DiagnosticCode::UnmodeledReminder,
        DiagnosticCode::DanglingSeparator,
        DiagnosticCode::GenericReplacement,
        DiagnosticCode::CalculatedQuantity,
        DiagnosticCode::UnknownCharacter,
        DiagnosticCode::UnparsedTrigger,
        DiagnosticCode::InvalidManaCost,
        DiagnosticCode::InvalidStat,
        DiagnosticCode::NestingLimit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnparsedAbility => "AST001",
            DiagnosticCode::UnparsedEffect => "AST002",
            DiagnosticCode::UnparsedCost => "AST003",
            DiagnosticCode::UnparsedFilter => "AST004",
            DiagnosticCode::UnmodeledReminder => "AST005",
            DiagnosticCode::DanglingSeparator => "AST006",
            DiagnosticCode::GenericReplacement => "AST007",
            DiagnosticCode::CalculatedQuantity => "AST008",
            DiagnosticCode::UnknownCharacter => "AST009",
            DiagnosticCode::UnparsedTrigger => "AST010",
            DiagnosticCode::InvalidManaCost => "AST011",
            DiagnosticCode::InvalidStat => "AST012",
            DiagnosticCode::NestingLimit => "AST013",
        }
    }

    pub fn from_code(code: &str) -> Option<DiagnosticCode> {
        DiagnosticCode::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::UnparsedAbility
            | DiagnosticCode::UnparsedEffect
            | DiagnosticCode::UnparsedCost
            | DiagnosticCode::DanglingSeparator
            | DiagnosticCode::InvalidManaCost
            | DiagnosticCode::NestingLimit => Severity::Error,
            DiagnosticCode::UnparsedFilter
            | DiagnosticCode::UnmodeledReminder
            | DiagnosticCode::GenericReplacement
            | DiagnosticCode::CalculatedQuantity
            | DiagnosticCode::UnparsedTrigger
            | DiagnosticCode::InvalidStat => Severity::Warning,
            DiagnosticCode::UnknownCharacter => Severity::Info,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            DiagnosticCode::UnparsedAbility => "ability text matched no known form",
            DiagnosticCode::UnparsedEffect => "effect text could not be parsed",
            DiagnosticCode::UnparsedCost => "cost text could not be parsed",
            DiagnosticCode::UnparsedFilter => "object filter kept as raw text",
            DiagnosticCode::UnmodeledReminder => "reminder text is not modelled",
            DiagnosticCode::DanglingSeparator => "cost list ends with a dangling separator",
            DiagnosticCode::GenericReplacement => "replacement event kept as generic text",
            DiagnosticCode::CalculatedQuantity => "quantity expression kept as text",
            DiagnosticCode::UnknownCharacter => "unrecognised character",
            DiagnosticCode::UnparsedTrigger => "trigger condition kept as raw text",
            DiagnosticCode::InvalidManaCost => "mana cost could not be parsed",
            DiagnosticCode::InvalidStat => "stat value not understood",
            DiagnosticCode::NestingLimit => "clause nesting limit reached",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<TextSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode) -> Self {
        Self {
            code,
            message: code.template().to_string(),
            severity: code.severity(),
            span: None,
            text: None,
        }
    }

    pub fn at(code: DiagnosticCode, span: TextSpan, text: impl Into<String>) -> Self {
        Self {
            span: Some(span),
            text: Some(text.into()),
            ..Self::new(code)
        }
    }

    /// Append detail to the templated message.
    pub fn with_detail(mut self, detail: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", self.message, detail);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(text) = &self.text {
            write!(f, " `{}`", text)?;
        }
        Ok(())
    }
}
