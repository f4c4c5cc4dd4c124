// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for a single unfolded content line.
//!
//! The lexer is a state machine driven by character classes. It is pulled one
//! token at a time and stops after the property value, the component name or
//! the first error.
//!
//! ```text
//! PropName ──BEGIN/END──> BeforeCompName ──':'──> CompName
//!    │
//!    └─name─> BeforeValue ──':'──────────────────────────> Value
//!                  │                                          ^
//!                  └─';'─> ParamName ─'='─> ParamValue ─> AfterParamValue
//!                              ^               ^  │ '"'        │
//!                              │               │  └─> Quoted ──┤
//!                              └──────';'──────┴───────','─────┘
//! ```

use std::fmt::{self, Display};
use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::SyntaxErrorKind;
use crate::keyword::{KW_BEGIN, KW_END, is_control, is_name_char};
use crate::name::names_eq;

/// Tokenize one unfolded content line.
#[must_use]
pub fn tokenize(line: &str) -> Lexer<'_> {
    Lexer::new(line)
}

/// A span representing a byte range in a logical line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position of the span
    pub start: usize,
    /// End position of the span
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end positions
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert to a standard range
    #[must_use]
    pub const fn into_range(self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Token emitted by the content line lexer
#[derive(Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// `BEGIN` marker, case-insensitive
    Begin,

    /// `END` marker, case-insensitive
    End,

    /// Property or parameter name, original casing
    Identifier(&'src str),

    /// Name following `BEGIN:` or `END:`, original casing
    ComponentName(&'src str),

    /// Parameter value, still RFC 6868 encoded and without quotes
    ParamValue {
        /// The value text
        raw: &'src str,
        /// Whether the value was quoted in the source
        quoted: bool,
    },

    /// Property value, the rest of the line
    Value(&'src str),

    /// The line is malformed, no token follows
    Error(SyntaxErrorKind),
}

impl Token<'_> {
    /// Whether no token can follow this one on the same line.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ComponentName(_) | Self::Value(_) | Self::Error(_)
        )
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => write!(f, "Begin"),
            Self::End => write!(f, "End"),
            Self::Identifier(s) => write!(f, "Identifier({s})"),
            Self::ComponentName(s) => write!(f, "ComponentName({s})"),
            Self::ParamValue { raw, quoted: true } => write!(f, "ParamValue(\"{raw}\")"),
            Self::ParamValue { raw, quoted: false } => write!(f, "ParamValue({raw})"),
            Self::Value(s) => write!(f, "Value({s})"),
            Self::Error(kind) => write!(f, "Error({kind})"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its associated span in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);

impl Display for SpannedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    PropName,
    BeforeCompName,
    CompName,
    BeforeValue,
    ParamName,
    BeforeParamValue,
    ParamValue,
    QuotedParamValue,
    AfterParamValue,
    Value,
    Done,
}

/// Position of a paused lexer, lets the parser keep a line without a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    pos: usize,
    state: State,
}

impl Checkpoint {
    pub(crate) const START: Self = Self {
        pos: 0,
        state: State::PropName,
    };

    pub(crate) fn is_finished(self) -> bool {
        self.state == State::Done
    }
}

/// Pull-based lexer over one unfolded content line
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    state: State,
}

impl<'src> Lexer<'src> {
    /// Create a lexer at the start of `line`.
    #[must_use]
    pub const fn new(line: &'src str) -> Self {
        Self::resume(line, Checkpoint::START)
    }

    pub(crate) const fn resume(line: &'src str, checkpoint: Checkpoint) -> Self {
        Self {
            src: line,
            pos: checkpoint.pos,
            state: checkpoint.state,
        }
    }

    pub(crate) const fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            state: self.state,
        }
    }

    /// The line being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.src
    }

    /// Whether the terminal token has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == State::Done
    }

    fn rest(&self) -> &'src str {
        self.src.get(self.pos..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn accept(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn accept_while(&mut self, pred: impl Fn(char) -> bool) -> Span {
        let start = self.pos;
        let len: usize = self
            .rest()
            .chars()
            .take_while(|&c| pred(c))
            .map(char::len_utf8)
            .sum();
        self.pos += len;
        Span::new(start, self.pos)
    }

    fn slice(&self, span: Span) -> &'src str {
        self.src.get(span.into_range()).unwrap_or_default()
    }

    fn emit(&mut self, token: Token<'src>, span: Span, next: State) -> SpannedToken<'src> {
        self.state = next;
        SpannedToken(token, span)
    }

    /// Stop with an error pointing at the next character (or the end of line).
    fn error(&mut self, kind: SyntaxErrorKind) -> SpannedToken<'src> {
        let len = self.peek().map_or(0, char::len_utf8);
        let span = Span::new(self.pos, self.pos + len);
        self.emit(Token::Error(kind), span, State::Done)
    }

    fn step(&mut self) -> Option<SpannedToken<'src>> {
        loop {
            match self.state {
                State::Done => return None,

                State::PropName => {
                    let span = self.accept_while(is_name_char);
                    if span.is_empty() {
                        return Some(self.error(SyntaxErrorKind::EmptyName));
                    }

                    let name = self.slice(span);
                    let token = if names_eq(name, KW_BEGIN) {
                        self.emit(Token::Begin, span, State::BeforeCompName)
                    } else if names_eq(name, KW_END) {
                        self.emit(Token::End, span, State::BeforeCompName)
                    } else {
                        self.emit(Token::Identifier(name), span, State::BeforeValue)
                    };
                    return Some(token);
                }

                State::BeforeCompName => {
                    if !self.accept(':') {
                        return Some(self.error(SyntaxErrorKind::ExpectedColon));
                    }
                    self.state = State::CompName;
                }

                State::CompName => {
                    if self.peek().is_none() {
                        return Some(self.error(SyntaxErrorKind::EmptyComponentName));
                    }

                    let span = self.accept_while(is_name_char);
                    if self.peek().is_some() {
                        return Some(self.error(SyntaxErrorKind::InvalidComponentName));
                    }

                    let name = self.slice(span);
                    return Some(self.emit(Token::ComponentName(name), span, State::Done));
                }

                State::BeforeValue => {
                    if self.accept(':') {
                        self.state = State::Value;
                    } else if self.accept(';') {
                        self.state = State::ParamName;
                    } else {
                        return Some(self.error(SyntaxErrorKind::ExpectedColonOrSemicolon));
                    }
                }

                State::ParamName => {
                    let span = self.accept_while(is_name_char);
                    if span.is_empty() {
                        return Some(self.error(SyntaxErrorKind::EmptyParameterName));
                    }

                    let name = self.slice(span);
                    return Some(self.emit(Token::Identifier(name), span, State::BeforeParamValue));
                }

                State::BeforeParamValue => {
                    if !self.accept('=') {
                        return Some(self.error(SyntaxErrorKind::ExpectedEquals));
                    }
                    self.state = State::ParamValue;
                }

                State::ParamValue => {
                    if self.accept('"') {
                        self.state = State::QuotedParamValue;
                        continue;
                    }

                    let span = self.accept_while(|c| {
                        !is_control(c) && !matches!(c, '"' | ';' | ':' | ',')
                    });
                    let raw = self.slice(span);
                    let token = Token::ParamValue { raw, quoted: false };
                    return Some(self.emit(token, span, State::AfterParamValue));
                }

                State::QuotedParamValue => {
                    let inner = self.accept_while(|c| c != '"' && !is_control(c));
                    if !self.accept('"') {
                        return Some(self.error(SyntaxErrorKind::UnterminatedQuote));
                    }

                    let raw = self.slice(inner);
                    let span = Span::new(inner.start.saturating_sub(1), self.pos);
                    let token = Token::ParamValue { raw, quoted: true };
                    return Some(self.emit(token, span, State::AfterParamValue));
                }

                State::AfterParamValue => {
                    if self.accept(':') {
                        self.state = State::Value;
                    } else if self.accept(';') {
                        self.state = State::ParamName;
                    } else if self.accept(',') {
                        self.state = State::ParamValue;
                    } else {
                        return Some(self.error(SyntaxErrorKind::ExpectedParameterDelimiter));
                    }
                }

                State::Value => {
                    let span = self.accept_while(|c| !is_control(c));
                    if self.peek().is_some() {
                        return Some(self.error(SyntaxErrorKind::ControlCharacter));
                    }

                    let value = self.slice(span);
                    return Some(self.emit(Token::Value(value), span, State::Done));
                }
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = SpannedToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::Token::*;
    use super::*;

    fn tokens(line: &str) -> Vec<Token<'_>> {
        tokenize(line).map(|SpannedToken(token, _)| token).collect()
    }

    #[test]
    fn tokenizes_begin_and_end() {
        assert_eq!(tokens("BEGIN:VCALENDAR"), [Begin, ComponentName("VCALENDAR")]);
        assert_eq!(tokens("end:vEvent"), [End, ComponentName("vEvent")]);
    }

    #[test]
    fn tokenizes_begin_prefixed_names_as_identifiers() {
        assert_eq!(
            tokens("BEGINNING:now"),
            [Identifier("BEGINNING"), Value("now")]
        );
    }

    #[test]
    fn tokenizes_simple_property() {
        assert_eq!(
            tokens("FEATURE:Content:'!,;.'"),
            [Identifier("FEATURE"), Value("Content:'!,;.'")]
        );
    }

    #[test]
    fn tokenizes_empty_value() {
        assert_eq!(tokens("SUMMARY:"), [Identifier("SUMMARY"), Value("")]);
    }

    #[test]
    fn tokenizes_parameters() {
        assert_eq!(
            tokens(r#"FEATURE;Par1=e^'^n,"other^,val";PAR2=x:LoremIpsum"#),
            [
                Identifier("FEATURE"),
                Identifier("Par1"),
                ParamValue {
                    raw: "e^'^n",
                    quoted: false
                },
                ParamValue {
                    raw: "other^,val",
                    quoted: true
                },
                Identifier("PAR2"),
                ParamValue {
                    raw: "x",
                    quoted: false
                },
                Value("LoremIpsum"),
            ]
        );
    }

    #[test]
    fn tokenizes_empty_parameter_value() {
        assert_eq!(
            tokens("X;A=:v"),
            [
                Identifier("X"),
                Identifier("A"),
                ParamValue {
                    raw: "",
                    quoted: false
                },
                Value("v"),
            ]
        );
    }

    #[test]
    fn tracks_spans() {
        let spanned: Vec<_> = tokenize(r#"A;B="c":d"#).collect();
        let spans: Vec<_> = spanned.iter().map(|t| t.1).collect();
        assert_eq!(
            spans,
            [
                Span::new(0, 1),
                Span::new(2, 3),
                Span::new(4, 7),
                Span::new(8, 9),
            ]
        );
    }

    #[test]
    fn keeps_tab_and_unicode_in_values() {
        assert_eq!(
            tokens("DESCRIPTION;LANGUAGE=zh:你好\t世界 🎉"),
            [
                Identifier("DESCRIPTION"),
                Identifier("LANGUAGE"),
                ParamValue {
                    raw: "zh",
                    quoted: false
                },
                Value("你好\t世界 🎉"),
            ]
        );
    }

    #[test]
    fn rejects_empty_name() {
        let tokens: Vec<_> = tokenize(":value").collect();
        assert_eq!(
            tokens,
            [SpannedToken(
                Error(SyntaxErrorKind::EmptyName),
                Span::new(0, 1)
            )]
        );
        assert_eq!(self::tokens(""), [Error(SyntaxErrorKind::EmptyName)]);
    }

    #[test]
    fn rejects_missing_colon_after_begin() {
        assert_eq!(
            tokens("BEGIN;VCALENDAR"),
            [Begin, Error(SyntaxErrorKind::ExpectedColon)]
        );
    }

    #[test]
    fn rejects_bad_component_names() {
        assert_eq!(
            tokens("BEGIN:"),
            [Begin, Error(SyntaxErrorKind::EmptyComponentName)]
        );
        let spanned: Vec<_> = tokenize("END:V_EVENT").collect();
        assert_eq!(
            spanned.last(),
            Some(&SpannedToken(
                Error(SyntaxErrorKind::InvalidComponentName),
                Span::new(5, 6)
            ))
        );
    }

    #[test]
    fn rejects_bad_property_syntax() {
        assert_eq!(
            tokens("DTSTART value"),
            [
                Identifier("DTSTART"),
                Error(SyntaxErrorKind::ExpectedColonOrSemicolon)
            ]
        );
        assert_eq!(
            tokens("DTSTART;=x:y"),
            [
                Identifier("DTSTART"),
                Error(SyntaxErrorKind::EmptyParameterName)
            ]
        );
        assert_eq!(
            tokens("DTSTART;TZID:y"),
            [
                Identifier("DTSTART"),
                Identifier("TZID"),
                Error(SyntaxErrorKind::ExpectedEquals)
            ]
        );
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert_eq!(
            tokens(r#"X;A="abc:def"#),
            [
                Identifier("X"),
                Identifier("A"),
                Error(SyntaxErrorKind::UnterminatedQuote)
            ]
        );
    }

    #[test]
    fn rejects_quote_inside_unquoted_value() {
        assert_eq!(
            tokens(r#"X;A=ab"c":v"#),
            [
                Identifier("X"),
                Identifier("A"),
                ParamValue {
                    raw: "ab",
                    quoted: false
                },
                Error(SyntaxErrorKind::ExpectedParameterDelimiter)
            ]
        );
    }

    #[test]
    fn rejects_control_characters_in_value() {
        let spanned: Vec<_> = tokenize("X:a\u{7}b").collect();
        assert_eq!(
            spanned.last(),
            Some(&SpannedToken(
                Error(SyntaxErrorKind::ControlCharacter),
                Span::new(3, 4)
            ))
        );
    }

    #[test]
    fn stops_after_terminal_token() {
        let mut lexer = tokenize("X:y");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_some_and(|t| t.0.is_terminal()));
        assert!(lexer.is_finished());
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn resumes_from_checkpoint() {
        let line = "X;A=1:v";
        let mut lexer = Lexer::new(line);
        assert_eq!(lexer.next().map(|t| t.0), Some(Identifier("X")));

        let checkpoint = lexer.checkpoint();
        let mut resumed = Lexer::resume(line, checkpoint);
        assert_eq!(resumed.next().map(|t| t.0), Some(Identifier("A")));
        assert_eq!(lexer.next().map(|t| t.0), Some(Identifier("A")));
    }
}
