//! Backtracking parser primitives over a token slice.
//!
//! Failure is a value: every primitive returns [`Outcome`], and a mismatch
//! reports the token index where it gave up. Anything that implements
//! [`Backtrack`] gets `attempt`/`optional`/`many`/`sep_by` for free, and
//! [`one_of!`](crate::one_of) tries alternatives in order, committing to the
//! first success.

use crate::token::{Symbol, Tok, TokKind};
use oracle_ast::span::TextSpan;
use tracing::trace;

/// A local mismatch. `at` is the token index of the farthest failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch {
    pub at: usize,
}

pub type Outcome<T> = Result<T, NoMatch>;

pub trait Backtrack {
    type Snapshot: Clone;

    fn snapshot(&self) -> Self::Snapshot;
    fn restore(&mut self, snapshot: Self::Snapshot);
    fn position(&self) -> usize;

    /// Run `f`; on failure roll back everything it did.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Outcome<T>) -> Outcome<T>
    where
        Self: Sized,
    {
        let snap = self.snapshot();
        let out = f(self);
        if out.is_err() {
            self.restore(snap);
        }
        out
    }

    fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> Outcome<T>) -> Option<T>
    where
        Self: Sized,
    {
        self.attempt(f).ok()
    }

    /// Zero or more repetitions, stopping at the first failure or at an
    /// iteration that consumed nothing.
    fn many<T>(&mut self, mut f: impl FnMut(&mut Self) -> Outcome<T>) -> Vec<T>
    where
        Self: Sized,
    {
        let mut out = Vec::new();
        loop {
            let before = self.position();
            match self.attempt(&mut f) {
                Ok(v) => {
                    out.push(v);
                    if self.position() == before {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        out
    }

    /// One or more `item`s separated by `sep`. A separator not followed by an
    /// item is left unconsumed.
    fn sep_by<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Outcome<T>,
        mut sep: impl FnMut(&mut Self) -> Outcome<()>,
    ) -> Outcome<Vec<T>>
    where
        Self: Sized,
    {
        let first = self.attempt(&mut item)?;
        let mut out = vec![first];
        while let Ok(v) = self.attempt(|p| {
            sep(p)?;
            item(p)
        }) {
            out.push(v);
        }
        Ok(out)
    }
}

/// Try each alternative in order against the same starting state and yield
/// the first success. On total failure the error reports the farthest
/// position any alternative reached.
#[macro_export]
macro_rules! one_of {
    ($p:expr, $($alt:expr),+ $(,)?) => {{
        let original = $p.snapshot();
        let mut farthest = $p.position();
        let mut result = Err($crate::combinator::NoMatch { at: farthest });
        $(
            if result.is_err() {
                match $alt {
                    Ok(v) => result = Ok(v),
                    Err(e) => {
                        let e: $crate::combinator::NoMatch = e;
                        farthest = farthest.max(e.at);
                        $p.restore(original.clone());
                        result = Err($crate::combinator::NoMatch { at: farthest });
                    }
                }
            }
        )+
        result
    }};
}

/// Position over a token slice, optionally bounded before its end.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a str,
    toks: &'a [Tok],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, toks: &'a [Tok]) -> Self {
        Self {
            src,
            toks,
            pos: 0,
            end: toks.len(),
        }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Narrow the visible window to end at `end`; returns the previous bound.
    pub fn set_end(&mut self, end: usize) -> usize {
        let prev = self.end;
        self.end = end.min(self.toks.len());
        prev
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    pub fn peek(&self) -> Option<&'a Tok> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> Option<&'a Tok> {
        let idx = self.pos + n;
        if idx < self.end {
            self.toks.get(idx)
        } else {
            None
        }
    }

    pub fn tok_at(&self, idx: usize) -> Option<&'a Tok> {
        if idx < self.end {
            self.toks.get(idx)
        } else {
            None
        }
    }

    pub fn bump(&mut self) -> Option<&'a Tok> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    pub fn fail<T>(&self) -> Outcome<T> {
        Err(NoMatch { at: self.pos })
    }

    /// Lower-cased text of the next word-like token.
    pub fn peek_word(&self) -> Option<String> {
        self.peek()?.word(self.src)
    }

    pub fn peek_word_nth(&self, n: usize) -> Option<String> {
        self.peek_nth(n)?.word(self.src)
    }

    pub fn at_word(&self, word: &str) -> bool {
        self.peek_word().as_deref() == Some(word)
    }

    pub fn at_kind(&self, kind: &TokKind) -> bool {
        self.peek().is_some_and(|t| t.kind == *kind)
    }

    /// One word, compared case-insensitively. `word` must be lower case.
    pub fn keyword(&mut self, word: &str) -> Outcome<TextSpan> {
        match self.peek() {
            Some(tok) if tok.word(self.src).as_deref() == Some(word) => {
                self.pos += 1;
                Ok(tok.span)
            }
            _ => self.fail(),
        }
    }

    /// The first of `words` that matches; returns its index.
    pub fn keyword_any(&mut self, words: &[&str]) -> Outcome<usize> {
        let Some(found) = self.peek_word() else {
            return self.fail();
        };
        match words.iter().position(|w| *w == found) {
            Some(idx) => {
                self.pos += 1;
                Ok(idx)
            }
            None => self.fail(),
        }
    }

    /// A space-separated run of keywords, all or nothing.
    pub fn phrase(&mut self, words: &str) -> Outcome<TextSpan> {
        let start = self.pos;
        let mut span: Option<TextSpan> = None;
        for word in words.split(' ') {
            match self.keyword(word) {
                Ok(s) => span = Some(span.map_or(s, |acc| acc.to(s))),
                Err(e) => {
                    self.pos = start;
                    return Err(e);
                }
            }
        }
        span.map_or_else(|| self.fail(), Ok)
    }

    pub fn punct(&mut self, kind: TokKind) -> Outcome<TextSpan> {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                self.pos += 1;
                Ok(tok.span)
            }
            _ => self.fail(),
        }
    }

    pub fn number(&mut self) -> Outcome<u32> {
        match self.peek() {
            Some(Tok {
                kind: TokKind::Number { value, .. },
                ..
            }) => {
                self.pos += 1;
                Ok(*value)
            }
            _ => self.fail(),
        }
    }

    pub fn symbol(&mut self) -> Outcome<Symbol> {
        match self.peek() {
            Some(Tok {
                kind: TokKind::Symbol(sym),
                ..
            }) => {
                self.pos += 1;
                Ok(sym.clone())
            }
            _ => self.fail(),
        }
    }

    /// Any word-like token, lower-cased.
    pub fn any_word(&mut self) -> Outcome<String> {
        match self.peek_word() {
            Some(w) => {
                self.pos += 1;
                Ok(w)
            }
            None => self.fail(),
        }
    }

    /// Original-case text of the next plain word.
    pub fn raw_word(&mut self) -> Outcome<&'a str> {
        match self.peek() {
            Some(tok) if matches!(tok.kind, TokKind::Word(_) | TokKind::Structural(_)) => {
                self.pos += 1;
                Ok(tok.span.slice(self.src))
            }
            _ => self.fail(),
        }
    }

    /// First token index in `[pos, end)` satisfying `pred`.
    pub fn find(&self, pred: impl Fn(&Tok) -> bool) -> Option<usize> {
        (self.pos..self.end).find(|&i| self.toks.get(i).is_some_and(&pred))
    }

    /// Source span covered by tokens `[from, to)`. An empty range gives an
    /// empty span at the start of token `from`.
    pub fn span_of(&self, from: usize, to: usize) -> TextSpan {
        if to <= from {
            let at = self
                .toks
                .get(from)
                .map(|t| t.span.start)
                .or_else(|| self.toks.last().map(|t| t.span.end))
                .unwrap_or(0);
            return TextSpan::empty(at);
        }
        let first = self.toks.get(from).map(|t| t.span);
        let last = self.toks.get(to - 1).map(|t| t.span);
        match (first, last) {
            (Some(a), Some(b)) => a.to(b),
            _ => TextSpan::default(),
        }
    }

    pub fn span_from(&self, from: usize) -> TextSpan {
        self.span_of(from, self.pos)
    }

    /// Span of everything left in the window.
    pub fn rest_span(&self) -> TextSpan {
        self.span_of(self.pos, self.end)
    }

    pub fn text(&self, span: TextSpan) -> &'a str {
        span.slice(self.src)
    }

    /// Skip to the end of the window, returning the span skipped.
    pub fn skip_rest(&mut self) -> TextSpan {
        let span = self.rest_span();
        trace!(from = self.pos, to = self.end, "skipping tokens");
        self.pos = self.end;
        span
    }
}

impl Backtrack for Cursor<'_> {
    type Snapshot = usize;

    fn snapshot(&self) -> usize {
        self.pos
    }

    fn restore(&mut self, snapshot: usize) {
        self.pos = snapshot;
    }

    fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn one_of_commits_to_first_success() {
        let src = "first strike";
        let toks = tokenize(src);
        let mut c = Cursor::new(src, &toks);
        let got: Outcome<&str> = one_of!(
            c,
            c.phrase("first blood").map(|_| "blood"),
            c.phrase("first strike").map(|_| "strike"),
            c.keyword("first").map(|_| "first"),
        );
        assert_eq!(got, Ok("strike"));
        assert!(c.at_end());
    }

    #[test]
    fn one_of_restores_and_reports_farthest() {
        let src = "first strike";
        let toks = tokenize(src);
        let mut c = Cursor::new(src, &toks);
        let got: Outcome<()> = one_of!(
            c,
            c.phrase("first blood").map(|_| ()),
            c.keyword("double").map(|_| ()),
        );
        assert_eq!(got, Err(NoMatch { at: 0 }));
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn sep_by_leaves_trailing_separator() {
        let src = "a, b, c,";
        let toks = tokenize(src);
        let mut c = Cursor::new(src, &toks);
        let words = c
            .sep_by(|c| c.any_word(), |c| c.punct(TokKind::Comma).map(|_| ()))
            .unwrap();
        assert_eq!(words, vec!["a", "b", "c"]);
        assert!(c.at_kind(&TokKind::Comma));
    }

    #[test]
    fn optional_does_not_consume_on_failure() {
        let src = "until end of combat";
        let toks = tokenize(src);
        let mut c = Cursor::new(src, &toks);
        assert!(c.optional(|c| c.phrase("until end of turn")).is_none());
        assert_eq!(c.pos(), 0);
        assert!(c.optional(|c| c.phrase("until end of combat")).is_some());
    }

    #[test]
    fn bounded_window_hides_tail() {
        let src = "draw a card. discard a card.";
        let toks = tokenize(src);
        let mut c = Cursor::new(src, &toks);
        let period = c.find(|t| t.kind == TokKind::Period).unwrap();
        c.set_end(period);
        assert_eq!(c.many(|c| c.any_word()), vec!["draw", "a", "card"]);
        assert!(c.at_end());
    }
}
