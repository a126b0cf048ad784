//! Oracle text grammar: paragraphs in, abilities out.
//!
//! Each paragraph is tried against the ability forms from most to least
//! structured: named triggers, triggers, activated abilities, keyword lines,
//! then static and one-shot statements. A paragraph none of them accepts
//! becomes [`Ability::Unparsed`] covering its exact source text.

mod cost;
mod effect;
mod keywords;
mod quantity;
mod recovery;
mod reference;
mod statics;
mod trigger;

use crate::combinator::{Backtrack, Cursor, Outcome};
use crate::lexer::tokenize;
use crate::one_of;
use crate::token::{Tok, TokKind};
use crate::ParseOptions;
use oracle_ast::prelude::*;
use tracing::{debug, trace};

/// Parse one face's oracle text. Never fails; text the grammar does not
/// understand comes back as unparsed nodes plus diagnostics.
pub fn parse_oracle_text(text: &str, card_name: Option<&str>, opts: &ParseOptions) -> Oracle {
    let toks = tokenize(text);
    let names = card_name.map(name_keys).unwrap_or_default();

    let mut abilities = Vec::new();
    let mut diagnostics = Vec::new();

    for tok in &toks {
        if let TokKind::Unknown(c) = tok.kind {
            diagnostics.push(Diagnostic::at(
                DiagnosticCode::UnknownCharacter,
                tok.span,
                c.to_string(),
            ));
        }
    }

    for (lo, hi) in paragraphs(&toks) {
        let para = &toks[lo..hi];
        if para
            .iter()
            .all(|t| matches!(t.kind, TokKind::Reminder(_)))
        {
            // a bare reminder line such as "({T}: Add {G}.)"
            for t in para {
                diagnostics.push(Diagnostic::at(
                    DiagnosticCode::UnmodeledReminder,
                    t.span,
                    t.span.slice(text),
                ));
            }
            continue;
        }
        let mut g = Grammar::new(text, para, &names, opts);
        let parsed = g.paragraph();
        debug!(
            paragraph = %g.cur.text(g.cur.span_of(0, para.len())),
            abilities = parsed.len(),
            issues = g.issues.len(),
            "parsed paragraph"
        );
        diagnostics.append(&mut g.issues);
        for ability in &parsed {
            recovery::collect(ability, &mut diagnostics);
        }
        abilities.extend(parsed);
    }

    recovery::normalize(&mut diagnostics);
    Oracle {
        abilities,
        diagnostics,
    }
}

/// Token ranges of paragraphs. A newline directly followed by a bullet
/// continues the current paragraph (modal modes).
fn paragraphs(toks: &[Tok]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < toks.len() {
        if toks[i].kind == TokKind::Newline {
            let next = toks[i..]
                .iter()
                .find(|t| t.kind != TokKind::Newline)
                .map(|t| &t.kind);
            if next != Some(&TokKind::Bullet) {
                if i > start {
                    out.push((start, i));
                }
                start = i + 1;
            }
        }
        i += 1;
    }
    if toks.len() > start {
        out.push((start, toks.len()));
    }
    out
}

/// Token keys for the card's full name and, for "Name, Epithet" cards, the
/// short name. Longest first.
fn name_keys(name: &str) -> Vec<Vec<String>> {
    let mut names = vec![name.trim().to_string()];
    if let Some((short, _)) = name.split_once(',') {
        names.push(short.trim().to_string());
    }
    let mut keys: Vec<Vec<String>> = names
        .iter()
        .filter(|n| !n.is_empty())
        .map(|n| tokenize(n).iter().map(|t| tok_key(t, n)).collect())
        .collect();
    keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
    keys.dedup();
    keys
}

fn tok_key(tok: &Tok, src: &str) -> String {
    tok.word(src)
        .unwrap_or_else(|| tok.span.slice(src).to_lowercase())
}

pub(crate) struct Grammar<'a> {
    cur: Cursor<'a>,
    names: &'a [Vec<String>],
    opts: &'a ParseOptions,
    issues: Vec<Diagnostic>,
    depth: usize,
}

impl Backtrack for Grammar<'_> {
    type Snapshot = (usize, usize);

    fn snapshot(&self) -> (usize, usize) {
        (self.cur.pos(), self.issues.len())
    }

    fn restore(&mut self, (pos, issues): (usize, usize)) {
        self.cur.restore(pos);
        self.issues.truncate(issues);
    }

    fn position(&self) -> usize {
        self.cur.pos()
    }
}

impl<'a> Grammar<'a> {
    fn new(
        src: &'a str,
        toks: &'a [Tok],
        names: &'a [Vec<String>],
        opts: &'a ParseOptions,
    ) -> Self {
        Self {
            cur: Cursor::new(src, toks),
            names,
            opts,
            issues: Vec::new(),
            depth: 0,
        }
    }

    fn issue(&mut self, code: DiagnosticCode, span: TextSpan) {
        let text = self.cur.text(span).to_string();
        self.issues.push(Diagnostic::at(code, span, text));
    }

    /// Run `f` one clause level deeper. Past the configured bound the rest
    /// of the window becomes an unparsed effect instead.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Outcome<Effect>) -> Outcome<Effect> {
        if self.depth >= self.opts.max_nesting_depth {
            let span = self.cur.skip_rest();
            self.issue(DiagnosticCode::NestingLimit, span);
            return Ok(Effect::unparsed(self.cur.text(span), span));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// Run `f` with the window ending at token index `end`, restoring the
    /// previous bound afterwards.
    fn bounded<T>(&mut self, end: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let prev = self.cur.set_end(end);
        let out = f(self);
        self.cur.set_end(prev);
        out
    }

    /// Index of the first token at or after the cursor that satisfies
    /// `pred`, or the window end.
    fn index_of(&self, pred: impl Fn(&Tok) -> bool) -> usize {
        self.cur.find(pred).unwrap_or(self.cur.end())
    }

    fn paragraph(&mut self) -> Vec<Ability> {
        let start = self.cur.pos();
        let parsed = one_of!(
            self,
            self.attempt(|g| g.whole(|g| g.named_triggered())),
            self.attempt(|g| g.whole(|g| g.triggered())),
            self.attempt(|g| g.whole(|g| g.activated())),
            self.attempt(|g| g.whole(|g| g.keyword_line())),
            self.attempt(|g| g.whole(|g| g.statement())),
        );
        match parsed {
            Ok(abilities) => abilities,
            Err(e) => {
                trace!(farthest = e.at, "no ability form matched");
                self.cur.restore(start);
                let span = self.cur.skip_rest();
                let raw_text = self.cur.text(span).to_string();
                let diagnostics = vec![Diagnostic::at(
                    DiagnosticCode::UnparsedAbility,
                    span,
                    raw_text.clone(),
                )];
                vec![Ability::Unparsed {
                    raw_text,
                    span,
                    diagnostics,
                }]
            }
        }
    }

    /// `form` must consume everything left in the window.
    fn whole<T>(&mut self, form: impl FnOnce(&mut Self) -> Outcome<T>) -> Outcome<T> {
        let out = form(self)?;
        if self.cur.at_end() {
            Ok(out)
        } else {
            self.cur.fail()
        }
    }

    /// "Landfall — Whenever ..., effect."
    fn named_triggered(&mut self) -> Outcome<Vec<Ability>> {
        let start = self.cur.pos();
        let mut words = 0;
        while matches!(self.cur.peek().map(|t| &t.kind), Some(TokKind::Word(_))) {
            self.cur.bump();
            words += 1;
        }
        if words == 0 || words > 4 {
            return self.cur.fail();
        }
        let keyword = self.cur.text(self.cur.span_from(start)).to_string();
        self.cur.punct(TokKind::EmDash)?;
        let trigger = self.trigger()?;
        let effect = self.effect_region();
        Ok(vec![Ability::NamedTriggered {
            keyword,
            trigger,
            effect,
        }])
    }

    fn triggered(&mut self) -> Outcome<Vec<Ability>> {
        let trigger = self.trigger()?;
        let effect = self.effect_region();
        Ok(vec![Ability::Triggered { trigger, effect }])
    }

    /// "Cost[, Cost]*: Effect. [Activate only ...]"
    fn activated(&mut self) -> Outcome<Vec<Ability>> {
        let colon = self.index_of(|t| t.kind == TokKind::Colon);
        let period = self.index_of(|t| t.kind == TokKind::Period);
        if colon >= self.cur.end() || period < colon {
            return self.cur.fail();
        }
        let costs = self.bounded(colon, |g| g.cost_list());
        if costs.iter().all(Cost::is_unparsed) {
            return self.cur.fail();
        }
        self.cur.punct(TokKind::Colon)?;

        let restriction_at = self.restriction_start();
        let effect = self.bounded(restriction_at, |g| g.effect_region());
        let restriction = if self.cur.at_end() {
            None
        } else {
            let span = self.cur.skip_rest();
            Some(
                self.cur
                    .text(span)
                    .trim_end_matches('.')
                    .trim()
                    .to_string(),
            )
        };
        Ok(vec![Ability::Activated {
            costs,
            effect,
            keyword_source: None,
            restriction,
            reminder: None,
        }])
    }

    /// Start of a trailing "Activate only ..." sentence, or the window end.
    fn restriction_start(&self) -> usize {
        let from = self.cur.pos();
        (from..self.cur.end())
            .find(|&i| {
                let starts_sentence = i == from
                    || self
                        .cur
                        .tok_at(i - 1)
                        .is_some_and(|t| t.kind == TokKind::Period);
                starts_sentence
                    && self
                        .cur
                        .tok_at(i)
                        .and_then(|t| t.word(self.cur.src()))
                        .is_some_and(|w| w == "activate")
            })
            .unwrap_or(self.cur.end())
    }

    /// Static and one-shot sentences. Text that is entirely unparsed is left
    /// to the paragraph fallback.
    fn statement(&mut self) -> Outcome<Vec<Ability>> {
        let effect = self.effect_region();
        if effect.is_wholly_unparsed() {
            return self.cur.fail();
        }
        let ability = if is_continuous(&effect) {
            Ability::Static {
                keyword_source: None,
                effect,
                reminder: None,
            }
        } else {
            Ability::Passive { effect }
        };
        Ok(vec![ability])
    }
}

/// Whether a statement describes a standing rule rather than something that
/// happens once.
fn is_continuous(effect: &Effect) -> bool {
    if matches!(effect.duration, Some(Duration::AsLongAs { .. })) {
        return true;
    }
    if effect.duration.is_some() {
        return false;
    }
    match &effect.kind {
        EffectKind::Replacement(_)
        | EffectKind::RequireAdditionalCost { .. }
        | EffectKind::AllowAlternativeCost { .. }
        | EffectKind::ReduceCost { .. }
        | EffectKind::Evasion { .. }
        | EffectKind::Protection { .. }
        | EffectKind::Marker { .. }
        | EffectKind::Ward { .. }
        | EffectKind::Enchant { .. } => true,
        EffectKind::CantBlock { target }
        | EffectKind::CantBeBlocked { target }
        | EffectKind::ModifyPowerToughness { target, .. }
        | EffectKind::GrantKeywords { target, .. } => !matches!(
            target.kind,
            ReferenceKind::Target | ReferenceKind::AnyTarget | ReferenceKind::It
        ),
        EffectKind::Sequence { effects } => {
            effects.iter().all(|e| e.is_unparsed() || is_continuous(e))
                && effects.iter().any(|e| !e.is_unparsed())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_before_bullet_does_not_split() {
        let toks = tokenize("Choose one —\n• Draw a card.\n• Scry 2.\nFlying");
        let paras = paragraphs(&toks);
        assert_eq!(paras.len(), 2);
    }

    #[test]
    fn legendary_names_get_a_short_key() {
        let keys = name_keys("Jace, the Mind Sculptor");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1], vec!["jace".to_string()]);
    }
}
