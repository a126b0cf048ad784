//! Diagnostics for unparsed nodes, and the final ordering pass.
//!
//! The grammar records warnings as it goes; error diagnostics for unparsed
//! effects and costs are derived afterwards from the finished tree so each
//! surviving node is reported exactly once.

use oracle_ast::prelude::*;

/// Append a diagnostic for every unparsed node under `ability`.
pub(super) fn collect(ability: &Ability, out: &mut Vec<Diagnostic>) {
    match ability {
        Ability::Unparsed { diagnostics, .. } => out.extend(diagnostics.iter().cloned()),
        Ability::Activated { costs, effect, .. } => {
            for cost in costs {
                walk_cost(cost, out);
            }
            walk_effect(effect, out);
        }
        Ability::Static { effect, .. }
        | Ability::Triggered { effect, .. }
        | Ability::NamedTriggered { effect, .. }
        | Ability::Passive { effect } => walk_effect(effect, out),
    }
}

fn walk_effect(effect: &Effect, out: &mut Vec<Diagnostic>) {
    match &effect.kind {
        EffectKind::Unparsed { raw_text, span } => {
            out.push(Diagnostic::at(
                DiagnosticCode::UnparsedEffect,
                *span,
                raw_text.clone(),
            ));
        }
        EffectKind::Sequence { effects } => {
            for e in effects {
                walk_effect(e, out);
            }
        }
        EffectKind::Modal { modes, .. } => {
            for mode in modes {
                walk_effect(mode, out);
            }
        }
        EffectKind::Conditional { effect, .. } => walk_effect(effect, out),
        EffectKind::Replacement(r) => walk_effect(&r.replacement, out),
        EffectKind::Ward { cost } => walk_cost(cost, out),
        EffectKind::RequireAdditionalCost { cost } => {
            walk_cost(&cost.cost, out);
            if let Some(alt) = &cost.alternative {
                walk_cost(&alt.cost, out);
            }
        }
        EffectKind::AllowAlternativeCost { cost } => walk_cost(&cost.cost, out),
        _ => {}
    }
    if let Some(follow_up) = &effect.if_you_do {
        walk_effect(follow_up, out);
    }
    if let Some(unless) = &effect.unless {
        walk_cost(&unless.cost, out);
    }
}

fn walk_cost(cost: &Cost, out: &mut Vec<Diagnostic>) {
    match cost {
        Cost::Unparsed { raw_text, span } => out.push(Diagnostic::at(
            DiagnosticCode::UnparsedCost,
            *span,
            raw_text.clone(),
        )),
        Cost::Composite { costs } => {
            for c in costs {
                walk_cost(c, out);
            }
        }
        _ => {}
    }
}

/// Sort by source offset then code, and drop exact duplicates.
pub(super) fn normalize(diagnostics: &mut Vec<Diagnostic>) {
    diagnostics.sort_by(|a, b| {
        let start = |d: &Diagnostic| d.span.map_or(0, |s| s.start);
        let end = |d: &Diagnostic| d.span.map_or(0, |s| s.end);
        start(a)
            .cmp(&start(b))
            .then(a.code.cmp(&b.code))
            .then(end(a).cmp(&end(b)))
            .then_with(|| a.message.cmp(&b.message))
    });
    diagnostics.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_unparsed_nodes_are_all_reported() {
        let inner = Effect::unparsed("blah", TextSpan::new(10, 14));
        let outer = Effect::new(EffectKind::Sequence {
            effects: vec![
                Effect::unparsed("foo", TextSpan::new(0, 3)),
                Effect::new(EffectKind::Proliferate).if_you_do(inner),
            ],
        });
        let ability = Ability::Activated {
            costs: vec![Cost::Unparsed {
                raw_text: "bar".into(),
                span: TextSpan::new(4, 7),
            }],
            effect: outer,
            keyword_source: None,
            restriction: None,
            reminder: None,
        };
        let mut out = Vec::new();
        collect(&ability, &mut out);
        normalize(&mut out);
        let codes: Vec<_> = out.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["AST002", "AST003", "AST002"]);
    }

    #[test]
    fn normalize_orders_and_dedups() {
        let a = Diagnostic::at(DiagnosticCode::UnknownCharacter, TextSpan::new(5, 6), "#");
        let b = Diagnostic::at(DiagnosticCode::UnparsedAbility, TextSpan::new(0, 9), "x");
        let mut list = vec![a.clone(), b.clone(), a.clone()];
        normalize(&mut list);
        assert_eq!(list, vec![b, a]);
    }
}
