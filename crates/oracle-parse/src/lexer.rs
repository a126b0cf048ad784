use crate::token::{number_word, StructWord, Symbol, Tok, TokKind};
use oracle_ast::mana::ManaSymbol;
use oracle_ast::span::TextSpan;

/// Longest brace body we try to classify (`{W/U/P}` is the longest real one).
const MAX_BRACE_BODY: usize = 8;

/// Total tokenizer over oracle text. Never fails: characters nothing else
/// claims come out as [`TokKind::Unknown`].
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    fn span(&self, start: usize) -> TextSpan {
        TextSpan::new(start, self.pos)
    }

    fn tok(&self, kind: TokKind, start: usize) -> Tok {
        Tok {
            kind,
            span: self.span(start),
        }
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(c) if c != '\n' && c.is_whitespace()) {
            self.bump();
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_tok(&mut self) -> Option<Tok> {
        self.skip_blanks();
        let start = self.pos;
        let c = self.bump()?;

        let kind = match c {
            '\n' => TokKind::Newline,
            '{' => match self.braced(start) {
                Some(kind) => kind,
                None => TokKind::Unknown('{'),
            },
            '(' => match self.delimited(')', false) {
                Some(inner) => TokKind::Reminder(inner),
                None => TokKind::LParen,
            },
            '"' | '“' => match self.delimited_any(&['"', '”'], true) {
                Some(inner) => TokKind::Quoted(inner),
                None => TokKind::Quote,
            },
            ')' => TokKind::RParen,
            '”' => TokKind::Quote,
            ':' => TokKind::Colon,
            ',' => TokKind::Comma,
            '.' => TokKind::Period,
            ';' => TokKind::Semicolon,
            '/' => TokKind::Slash,
            '—' | '–' => TokKind::EmDash,
            '•' => TokKind::Bullet,
            '~' => self.tilde(),
            '+' | '-' | '−' if self.starts_number_or_x() => self.signed(c),
            '-' if self.peek() == Some('-') => {
                self.bump();
                TokKind::EmDash
            }
            c if c.is_ascii_digit() => self.number(start),
            c if c.is_alphabetic() => self.word(start),
            other => TokKind::Unknown(other),
        };
        Some(self.tok(kind, start))
    }

    /// `~` stands for the card's own name; `~'s` is its possessive.
    fn tilde(&mut self) -> TokKind {
        let possessive = matches!(self.peek(), Some('\'' | '’'))
            && self.peek2() == Some('s')
            && !matches!(self.src[self.pos..].chars().nth(2), Some(c) if c.is_alphanumeric());
        if possessive {
            self.bump();
            self.bump();
            return TokKind::Word("~'s".into());
        }
        TokKind::Word("~".into())
    }

    fn starts_number_or_x(&self) -> bool {
        matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == 'X')
    }

    /// Body of `{...}`; restores position and returns `None` when the body is
    /// not a known symbol.
    fn braced(&mut self, start: usize) -> Option<TokKind> {
        let rest = &self.src[self.pos..];
        let close = rest.find('}')?;
        let body = &rest[..close];
        if body.len() > MAX_BRACE_BODY {
            return None;
        }
        let kind = match body.to_ascii_uppercase().as_str() {
            "T" => TokKind::Symbol(Symbol::Tap),
            "Q" => TokKind::Symbol(Symbol::Untap),
            "E" => TokKind::Symbol(Symbol::Energy),
            _ => TokKind::Symbol(Symbol::Mana(ManaSymbol::from_braced(body)?)),
        };
        debug_assert!(start < self.pos);
        self.pos += close + 1;
        Some(kind)
    }

    /// Text up to the matching `close`, honouring nesting of the opener.
    /// With `cross_lines == false` a newline aborts the match.
    fn delimited(&mut self, close: char, cross_lines: bool) -> Option<String> {
        let rest = &self.src[self.pos..];
        let mut depth = 0usize;
        for (idx, ch) in rest.char_indices() {
            match ch {
                '\n' if !cross_lines => return None,
                '(' if close == ')' => depth += 1,
                c if c == close => {
                    if depth == 0 {
                        let inner = rest[..idx].to_string();
                        self.pos += idx + ch.len_utf8();
                        return Some(inner);
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        None
    }

    fn delimited_any(&mut self, closers: &[char], cross_lines: bool) -> Option<String> {
        let rest = &self.src[self.pos..];
        for (idx, ch) in rest.char_indices() {
            if ch == '\n' && !cross_lines {
                return None;
            }
            if closers.contains(&ch) {
                let inner = rest[..idx].to_string();
                self.pos += idx + ch.len_utf8();
                return Some(inner);
            }
        }
        None
    }

    /// `+1`, `-2`, `−X`, and P/T modifiers such as `+1/+1` or `-X/-0`.
    fn signed(&mut self, sign: char) -> TokKind {
        let mut text = String::new();
        text.push(if sign == '+' { '+' } else { '-' });
        self.take_digits_or_x(&mut text);
        self.pt_tail(&mut text);
        TokKind::Word(text)
    }

    fn take_digits_or_x(&mut self, text: &mut String) {
        if self.peek() == Some('X') {
            self.bump();
            text.push('X');
            return;
        }
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }
    }

    /// Extends `text` with `/N`, `/+N`, `/-N` or `/X` when present.
    fn pt_tail(&mut self, text: &mut String) -> bool {
        if self.peek() != Some('/') {
            return false;
        }
        let after = self.peek2();
        let ok = matches!(after, Some(c) if c.is_ascii_digit() || c == 'X' || c == '+' || c == '-' || c == '−' || c == '*');
        if !ok {
            return false;
        }
        self.bump();
        text.push('/');
        match self.peek() {
            Some('+') => {
                self.bump();
                text.push('+');
            }
            Some('-') | Some('−') => {
                self.bump();
                text.push('-');
            }
            Some('*') => {
                self.bump();
                text.push('*');
                return true;
            }
            _ => {}
        }
        self.take_digits_or_x(text);
        true
    }

    fn number(&mut self, start: usize) -> TokKind {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let mut text = self.src[start..self.pos].to_string();
        if self.pt_tail(&mut text) {
            return TokKind::Word(text);
        }
        match text.parse() {
            Ok(value) => TokKind::Number {
                value,
                spelled: false,
            },
            // out of range: keep the digits as a plain word
            Err(_) => TokKind::Word(text),
        }
    }

    fn word(&mut self, start: usize) -> TokKind {
        while let Some(c) = self.peek() {
            let joins = match c {
                '\'' | '’' => match self.peek2() {
                    Some(n) if n.is_alphabetic() => true,
                    // plural possessive: "owners' hands"
                    next => {
                        self.src[start..self.pos].ends_with('s')
                            && !next.is_some_and(char::is_alphanumeric)
                    }
                },
                '-' => matches!(self.peek2(), Some(n) if n.is_alphabetic()),
                _ => c.is_alphanumeric(),
            };
            if !joins {
                break;
            }
            self.bump();
        }
        let mut text = self.src[start..self.pos].replace('’', "'");
        if text == "X" && self.pt_tail(&mut text) {
            return TokKind::Word(text);
        }
        if let Some(s) = StructWord::classify(&text) {
            return TokKind::Structural(s);
        }
        if let Some(value) = number_word(&text) {
            return TokKind::Number {
                value,
                spelled: true,
            };
        }
        TokKind::Word(text)
    }
}

/// Tokenize a whole oracle text.
pub fn tokenize(src: &str) -> Vec<Tok> {
    let mut lex = Lexer::new(src);
    let mut toks = Vec::new();
    while let Some(tok) = lex.next_tok() {
        toks.push(tok);
    }
    toks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn possessives_stay_in_one_word() {
        assert_eq!(
            kinds("owner’s hand"),
            vec![TokKind::Word("owner's".into()), TokKind::Word("hand".into())]
        );
        assert_eq!(
            kinds("owners’ hands"),
            vec![TokKind::Word("owners'".into()), TokKind::Word("hands".into())]
        );
    }

    #[test]
    fn pt_modifiers_are_single_words() {
        assert_eq!(
            kinds("+1/+1 -X/-0 2/2 X/X"),
            vec![
                TokKind::Word("+1/+1".into()),
                TokKind::Word("-X/-0".into()),
                TokKind::Word("2/2".into()),
                TokKind::Word("X/X".into()),
            ]
        );
    }

    #[test]
    fn unterminated_reminder_falls_back_to_paren() {
        assert_eq!(
            kinds("(oops\nnext"),
            vec![
                TokKind::LParen,
                TokKind::Word("oops".into()),
                TokKind::Newline,
                TokKind::Word("next".into()),
            ]
        );
    }
}
