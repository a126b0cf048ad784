//! Card-level attributes derived from printed fields and parsed abilities.

use crate::input::{is_face_pair, CardInput};
use oracle_ast::mana::mana_value_of;
use oracle_ast::prelude::*;

/// Attributes printed on `card` itself. A field holding a ` // ` pair
/// belongs to the faces and is skipped.
pub(crate) fn printed(card: &CardInput, diagnostics: &mut Vec<Diagnostic>) -> Vec<CardAttribute> {
    let own = |field: &Option<String>| -> Option<String> {
        field
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty() && !is_face_pair(raw))
            .map(str::to_string)
    };
    let mut out = Vec::new();

    let mana = own(&card.mana_cost).and_then(|raw| {
        let parsed = parse_mana_cost(&raw)
            .and_then(|symbols| mana_value_of(&symbols).map(|value| (symbols, value)));
        if parsed.is_none() {
            diagnostics.push(Diagnostic::at(
                DiagnosticCode::InvalidManaCost,
                TextSpan::new(0, raw.len()),
                raw,
            ));
        }
        parsed
    });
    if let Some((symbols, (mana_value, is_variable))) = &mana {
        out.push(CardAttribute::ManaCost {
            symbols: symbols.clone(),
            mana_value: *mana_value,
            is_variable: *is_variable,
        });
    }

    let colors = card
        .colors
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(card.color_indicator.as_deref())
        .map(color_letters)
        .unwrap_or_else(|| {
            mana.as_ref()
                .map(|(symbols, _)| symbol_colors(symbols))
                .unwrap_or_default()
        });
    if !colors.is_empty() {
        out.push(CardAttribute::Colors { colors });
    }
    if let Some(identity) = card.color_identity.as_deref().filter(|c| !c.is_empty()) {
        out.push(CardAttribute::ColorIdentity {
            colors: color_letters(identity),
        });
    }

    let mut stat = |raw: Option<String>| raw.map(|raw| stat_value(&raw, diagnostics));
    let power = stat(own(&card.power));
    let toughness = stat(own(&card.toughness));
    if let (Some(power), Some(toughness)) = (power, toughness) {
        out.push(CardAttribute::CreatureStats { power, toughness });
    }
    if let Some(value) = stat(own(&card.loyalty)) {
        out.push(CardAttribute::Loyalty { value });
    }
    if let Some(value) = stat(own(&card.defense)) {
        out.push(CardAttribute::Defense { value });
    }
    out
}

/// AdditionalCosts, AlternativeCosts and CostReductions gathered from the
/// casting-cost statements among `oracle`'s static abilities.
pub(crate) fn from_oracle(oracle: &Oracle, out: &mut Vec<CardAttribute>) {
    let mut additional = Vec::new();
    let mut alternative = Vec::new();
    let mut reductions = Vec::new();
    for ability in &oracle.abilities {
        let Ability::Static { effect, .. } = ability else {
            continue;
        };
        let effects: Vec<&Effect> = match &effect.kind {
            EffectKind::Sequence { effects } => effects.iter().collect(),
            _ => vec![effect],
        };
        for effect in effects {
            match &effect.kind {
                EffectKind::RequireAdditionalCost { cost } => additional.push(cost.clone()),
                EffectKind::AllowAlternativeCost { cost } => alternative.push(cost.clone()),
                EffectKind::ReduceCost { reduction } => reductions.push(reduction.clone()),
                _ => {}
            }
        }
    }
    if !additional.is_empty() {
        out.push(CardAttribute::AdditionalCosts { costs: additional });
    }
    if !alternative.is_empty() {
        out.push(CardAttribute::AlternativeCosts { costs: alternative });
    }
    if !reductions.is_empty() {
        out.push(CardAttribute::CostReductions { reductions });
    }
}

/// `{2}{G}{G}` into symbols. `None` if anything is left over or a braced
/// body is not a mana symbol.
pub(crate) fn parse_mana_cost(raw: &str) -> Option<Vec<ManaSymbol>> {
    let mut symbols = Vec::new();
    let mut rest = raw.trim();
    while !rest.is_empty() {
        let body = rest.strip_prefix('{')?;
        let close = body.find('}')?;
        symbols.push(ManaSymbol::from_braced(&body[..close])?);
        rest = body[close + 1..].trim_start();
    }
    Some(symbols)
}

/// Power, toughness, loyalty or defense as printed.
fn stat_value(raw: &str, diagnostics: &mut Vec<Diagnostic>) -> PowerToughnessValue {
    parse_stat(raw).unwrap_or_else(|| {
        diagnostics.push(Diagnostic::at(
            DiagnosticCode::InvalidStat,
            TextSpan::new(0, raw.len()),
            raw,
        ));
        PowerToughnessValue::Variable {
            derived_from: Some(raw.to_string()),
        }
    })
}

pub(crate) fn parse_stat(raw: &str) -> Option<PowerToughnessValue> {
    let raw = raw.trim().replace('−', "-");
    if let Ok(value) = raw.parse::<i32>() {
        return Some(PowerToughnessValue::Fixed { value });
    }
    if is_variable(&raw) {
        return Some(PowerToughnessValue::Variable { derived_from: None });
    }
    // "1+*", "7-*", "*+1"; the operator is never the leading character
    let op_at = raw
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '+' || c == '-')
        .map(|(i, _)| i)?;
    let (left, right) = (&raw[..op_at], &raw[op_at + 1..]);
    let negative = raw[op_at..].starts_with('-');
    match (left.parse::<i32>(), right.parse::<i32>()) {
        (Ok(base), Err(_)) if is_variable(right) => Some(PowerToughnessValue::Derived {
            base,
            derived_from: if negative {
                format!("-{right}")
            } else {
                right.to_string()
            },
        }),
        (Err(_), Ok(n)) if is_variable(left) => Some(PowerToughnessValue::Derived {
            base: if negative { -n } else { n },
            derived_from: left.to_string(),
        }),
        _ => None,
    }
}

fn is_variable(s: &str) -> bool {
    matches!(s, "*" | "X" | "?")
}

/// Letters such as `["G", "U"]` into colors, sorted WUBRG.
fn color_letters(letters: &[String]) -> Vec<Color> {
    let mut colors: Vec<Color> = letters
        .iter()
        .filter_map(|l| l.chars().next().and_then(Color::from_letter))
        .collect();
    colors.sort();
    colors.dedup();
    colors
}

fn symbol_colors(symbols: &[ManaSymbol]) -> Vec<Color> {
    let mut colors: Vec<Color> = symbols.iter().flat_map(|s| s.colors.iter().copied()).collect();
    colors.sort();
    colors.dedup();
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mana_cost_symbols() {
        let symbols = parse_mana_cost("{2}{G}{G}").unwrap();
        assert_eq!(
            symbols,
            vec![
                ManaSymbol::generic(2),
                ManaSymbol::colored(Color::Green),
                ManaSymbol::colored(Color::Green),
            ]
        );
        assert!(parse_mana_cost("{2}{G").is_none());
        assert!(parse_mana_cost("2G").is_none());
        assert_eq!(parse_mana_cost(""), Some(Vec::new()));
    }

    #[test]
    fn stat_shapes() {
        assert_eq!(parse_stat("3"), Some(PowerToughnessValue::Fixed { value: 3 }));
        assert_eq!(parse_stat("-1"), Some(PowerToughnessValue::Fixed { value: -1 }));
        assert_eq!(
            parse_stat("*"),
            Some(PowerToughnessValue::Variable { derived_from: None })
        );
        assert_eq!(
            parse_stat("1+*"),
            Some(PowerToughnessValue::Derived {
                base: 1,
                derived_from: "*".into()
            })
        );
        assert_eq!(
            parse_stat("*+1"),
            Some(PowerToughnessValue::Derived {
                base: 1,
                derived_from: "*".into()
            })
        );
        assert_eq!(parse_stat("∞"), None);
    }

    #[test]
    fn unknown_stat_warns_and_keeps_text() {
        let mut diagnostics = Vec::new();
        let value = stat_value("*²", &mut diagnostics);
        assert_eq!(
            value,
            PowerToughnessValue::Variable {
                derived_from: Some("*²".into())
            }
        );
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidStat);
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn colors_fall_back_to_mana_cost() {
        let card = CardInput {
            name: "Hybrid".into(),
            mana_cost: Some("{G/W}{R}".into()),
            ..CardInput::default()
        };
        let attrs = printed(&card, &mut Vec::new());
        assert!(attrs.contains(&CardAttribute::Colors {
            colors: vec![Color::White, Color::Red, Color::Green]
        }));
    }
}
