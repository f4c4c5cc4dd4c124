// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while decoding content lines.

use std::fmt::{self, Display};
use std::io;

use crate::syntax::Span;

/// Number of characters shown on each side of the offending slice.
const CONTEXT_RADIUS: usize = 20;

/// What went wrong in a malformed content line.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// A line or component name has no name characters.
    #[error("expected one or more alphanumeric characters or '-'")]
    EmptyName,

    /// `BEGIN`/`END` is not followed by a colon.
    #[error("expected ':'")]
    ExpectedColon,

    /// `BEGIN:` or `END:` without a component name.
    #[error("component name must not be empty")]
    EmptyComponentName,

    /// A component name contains a character outside `[-A-Za-z0-9]`.
    #[error("unexpected character, expected end of line, alphanumeric or '-'")]
    InvalidComponentName,

    /// A property name is followed by something else than `:` or `;`.
    #[error("expected ':' or ';'")]
    ExpectedColonOrSemicolon,

    /// `;` without a parameter name.
    #[error("parameter name must not be empty")]
    EmptyParameterName,

    /// A parameter name is not followed by `=`.
    #[error("expected '='")]
    ExpectedEquals,

    /// A quoted parameter value has no closing quote.
    #[error("expected '\"' or other non-control characters")]
    UnterminatedQuote,

    /// A parameter value is followed by something else than `,`, `:` or `;`.
    #[error("expected ',', ':' or ';'")]
    ExpectedParameterDelimiter,

    /// A property value contains a control character.
    #[error("unexpected control character, expected end of line")]
    ControlCharacter,

    /// A line is not terminated by CRLF.
    #[error("expected CRLF")]
    ExpectedCrlf,

    /// A line is not valid UTF-8.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,

    /// An object does not start with `BEGIN`.
    #[error("expected 'BEGIN'")]
    ExpectedBegin,

    /// The `END` name differs from the `BEGIN` name.
    #[error("expected END:{expected}, found END:{found}")]
    MismatchedEnd {
        /// Name of the open component
        expected: String,
        /// Name found on the `END` line
        found: String,
    },

    /// A token that cannot appear at this point of a component.
    #[error("unexpected {found}")]
    UnexpectedToken {
        /// Description of the token
        found: &'static str,
    },
}

/// A malformed content line, with enough context to point at the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    line: String,
    span: Span,
    line_number: usize,
}

impl SyntaxError {
    pub(crate) fn new(
        kind: SyntaxErrorKind,
        line: impl Into<String>,
        span: Span,
        line_number: usize,
    ) -> Self {
        Self {
            kind,
            line: line.into(),
            span,
            line_number,
        }
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// The unfolded line the error was found in.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Byte range of the offending slice within [`SyntaxError::line`].
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Byte offset of the offending slice within [`SyntaxError::line`].
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }

    /// 1-based number of the physical line where the logical line starts.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// The offending slice, empty when the line ended too early.
    #[must_use]
    pub fn offending(&self) -> &str {
        self.line.get(self.span.into_range()).unwrap_or_default()
    }

    /// Render the offending slice with up to 20 characters around it.
    ///
    /// ```text
    /// ...FEATURE;LANG=e;n:Lo >,< rem
    /// BEGIN:<HERE>
    /// ```
    #[must_use]
    pub fn context(&self) -> String {
        let line = self.line.as_str();
        let start = floor_char_boundary(line, self.span.start);
        let end = ceil_char_boundary(line, self.span.end.max(start));

        let prefix_start = line
            .get(..start)
            .and_then(|prefix| prefix.char_indices().rev().nth(CONTEXT_RADIUS - 1))
            .map_or(0, |(i, _)| i);
        let suffix_end = line
            .get(end..)
            .and_then(|suffix| suffix.char_indices().nth(CONTEXT_RADIUS))
            .map_or(line.len(), |(i, _)| end + i);

        let mut out = String::new();
        if prefix_start > 0 {
            out.push_str("...");
        }
        out.push_str(line.get(prefix_start..start).unwrap_or_default());
        if start == end {
            out.push_str("<HERE>");
        } else {
            out.push_str(" >");
            out.push_str(line.get(start..end).unwrap_or_default());
            out.push('<');
            if end < suffix_end {
                out.push(' ');
            }
        }
        out.push_str(line.get(end..suffix_end).unwrap_or_default());
        if suffix_end < line.len() {
            out.push_str("...");
        }
        out
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}): {}",
            self.kind,
            self.line_number,
            self.context()
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Errors returned by [`Parser::parse_next_object`](crate::Parser::parse_next_object).
///
/// The end of the stream is not an error, see `Ok(None)`.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed content line or component structure
    #[error("error while parsing component(s): {0}")]
    Syntax(#[from] SyntaxError),

    /// The stream ended before the component was closed
    #[error("unexpected end of stream inside component {component} (line {line})")]
    UnexpectedEof {
        /// Name of the innermost open component
        component: String,
        /// Number of physical lines read
        line: usize,
    },

    /// Component nesting is deeper than the configured limit
    #[error("component {component} exceeds the maximum nesting depth of {max} (line {line})")]
    TooDeep {
        /// Name of the component that crossed the limit
        component: String,
        /// The configured limit
        max: usize,
        /// Physical line of the offending `BEGIN`
        line: usize,
    },

    /// The underlying reader failed
    #[error("failed to read content line {line}")]
    Io {
        /// Physical line that was being read
        line: usize,
        /// The reader's error
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// The syntax error, if this is one.
    #[must_use]
    pub const fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
