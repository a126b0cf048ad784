//! Mana symbols and colors.

use crate::is_false;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// WUBRG order.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn from_letter(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    /// Color word as printed in rules text, case-insensitive.
    pub fn from_word(word: &str) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(word))
    }

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaSymbolKind {
    Colored,
    Colorless,
    Generic,
    Variable,
    Hybrid,
    HybridGeneric,
    Snow,
}

/// One braced mana symbol such as `{2}`, `{G}`, `{W/U}`, `{2/W}` or `{B/P}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManaSymbol {
    pub kind: ManaSymbolKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<Color>,
    /// Generic amount for `Generic` and `HybridGeneric` symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    /// Variable name (`X`, `Y`, `Z`) for `Variable` symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub phyrexian: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub snow: bool,
}

impl ManaSymbol {
    fn bare(kind: ManaSymbolKind) -> Self {
        Self {
            kind,
            colors: Vec::new(),
            amount: None,
            variable: None,
            phyrexian: false,
            snow: false,
        }
    }

    pub fn generic(amount: u32) -> Self {
        Self {
            amount: Some(amount),
            ..Self::bare(ManaSymbolKind::Generic)
        }
    }

    pub fn colored(color: Color) -> Self {
        Self {
            colors: vec![color],
            ..Self::bare(ManaSymbolKind::Colored)
        }
    }

    pub fn colorless() -> Self {
        Self::bare(ManaSymbolKind::Colorless)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            variable: Some(name.into()),
            ..Self::bare(ManaSymbolKind::Variable)
        }
    }

    pub fn hybrid(a: Color, b: Color) -> Self {
        Self {
            colors: vec![a, b],
            ..Self::bare(ManaSymbolKind::Hybrid)
        }
    }

    pub fn hybrid_generic(amount: u32, color: Color) -> Self {
        Self {
            colors: vec![color],
            amount: Some(amount),
            ..Self::bare(ManaSymbolKind::HybridGeneric)
        }
    }

    pub fn snow() -> Self {
        Self {
            snow: true,
            ..Self::bare(ManaSymbolKind::Snow)
        }
    }

    pub fn phyrexian(mut self) -> Self {
        self.phyrexian = true;
        self
    }

    /// Classify the body of a braced symbol (without the braces).
    ///
    /// Returns `None` for anything that is not mana: `T`, `Q`, `E` and
    /// unknown bodies are the lexer's business.
    pub fn from_braced(body: &str) -> Option<ManaSymbol> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        if body.bytes().all(|b| b.is_ascii_digit()) {
            return body.parse().ok().map(ManaSymbol::generic);
        }

        let parts: Vec<&str> = body.split('/').collect();
        match parts.as_slice() {
            [single] => match single.to_ascii_uppercase().as_str() {
                "X" | "Y" | "Z" => Some(ManaSymbol::variable(single.to_ascii_uppercase())),
                "C" => Some(ManaSymbol::colorless()),
                "S" => Some(ManaSymbol::snow()),
                s if s.len() == 1 => s.chars().next().and_then(Color::from_letter).map(ManaSymbol::colored),
                _ => None,
            },
            [color, p] if p.eq_ignore_ascii_case("P") => {
                single_color(color).map(|c| ManaSymbol::colored(c).phyrexian())
            }
            [amount, color] if amount.bytes().all(|b| b.is_ascii_digit()) => {
                let amount = amount.parse().ok()?;
                single_color(color).map(|c| ManaSymbol::hybrid_generic(amount, c))
            }
            [a, b] => Some(ManaSymbol::hybrid(single_color(a)?, single_color(b)?)),
            [a, b, p] if p.eq_ignore_ascii_case("P") => {
                Some(ManaSymbol::hybrid(single_color(a)?, single_color(b)?).phyrexian())
            }
            _ => None,
        }
    }

    /// Contribution of this symbol to a mana value. Variable symbols count
    /// as zero; hybrid-generic symbols count their generic half.
    pub fn mana_value(&self) -> u32 {
        match self.kind {
            ManaSymbolKind::Generic | ManaSymbolKind::HybridGeneric => self.amount.unwrap_or(0),
            ManaSymbolKind::Variable => 0,
            ManaSymbolKind::Colored
            | ManaSymbolKind::Colorless
            | ManaSymbolKind::Hybrid
            | ManaSymbolKind::Snow => 1,
        }
    }
}

fn single_color(s: &str) -> Option<Color> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Color::from_letter(c),
        _ => None,
    }
}

impl fmt::Display for ManaSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = || -> Vec<String> {
            self.colors.iter().map(|c| c.letter().to_string()).collect()
        };
        let mut body = match self.kind {
            ManaSymbolKind::Generic => self.amount.unwrap_or(0).to_string(),
            ManaSymbolKind::Variable => self.variable.clone().unwrap_or_else(|| "X".into()),
            ManaSymbolKind::Colorless => "C".into(),
            ManaSymbolKind::Snow => "S".into(),
            ManaSymbolKind::Colored | ManaSymbolKind::Hybrid => letters().join("/"),
            ManaSymbolKind::HybridGeneric => {
                format!("{}/{}", self.amount.unwrap_or(0), letters().join("/"))
            }
        };
        if self.phyrexian {
            body.push_str("/P");
        }
        write!(f, "{{{}}}", body)
    }
}

/// Sum of `mana_value` over a symbol run, plus whether any symbol is variable.
/// `None` when the total does not fit in a `u32`.
pub fn mana_value_of(symbols: &[ManaSymbol]) -> Option<(u32, bool)> {
    let value = symbols
        .iter()
        .try_fold(0u32, |total, s| total.checked_add(s.mana_value()))?;
    let variable = symbols
        .iter()
        .any(|s| s.kind == ManaSymbolKind::Variable);
    Some((value, variable))
}
