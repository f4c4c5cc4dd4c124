// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser building components from the token stream.
//!
//! # Algorithm
//!
//! 1. The first token must be `BEGIN`, its component name opens the object
//! 2. A name starts a property, parameter values accumulate under the most
//!    recent parameter name until the property value
//! 3. `BEGIN` recurses into a nested component
//! 4. `END` closes the component, its name must match the opening name
//!
//! Only one token is alive at any time. A line whose parse was aborted is
//! dropped, the next call starts on a fresh line.

use std::io::BufRead;
use std::iter::FusedIterator;

use crate::component::Component;
use crate::error::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::escape::unescape_param_value;
use crate::keyword::KW_BEGIN;
use crate::name::normalize_name;
use crate::property::Property;
use crate::syntax::lexer::{Checkpoint, Lexer, SpannedToken, Token};
use crate::syntax::{LogicalLine, Span, Unfolder};

/// Parse every top-level object of an in-memory string.
///
/// ## Errors
///
/// Returns the first error, see [`Parser::parse_next_object`].
pub fn parse_str(src: &str) -> Result<Vec<Component>, ParseError> {
    Parser::new(src.as_bytes()).collect()
}

/// Options of the [`Parser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of nested components, the top-level object included.
    ///
    /// Default: `None`, nesting is only bounded by the call stack.
    pub max_depth: Option<usize>,
}

impl ParserOptions {
    /// Set the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Pull parser of content line objects
///
/// Also an iterator over the top-level objects, which stops after the end of
/// the stream or the first error.
#[derive(Debug)]
pub struct Parser<R> {
    unfolder: Unfolder<R>,
    options: ParserOptions,
    active: Option<ActiveLine>,
    finished: bool,
}

/// The line being tokenized and where its lexer stopped.
#[derive(Debug)]
struct ActiveLine {
    line: LogicalLine,
    checkpoint: Checkpoint,
}

impl ActiveLine {
    fn is_finished(&self) -> bool {
        self.checkpoint.is_finished()
    }
}

/// A token converted to owned form with its names normalized.
#[derive(Debug)]
enum Item {
    Begin,
    End,
    Name(String),
    ComponentName(String),
    ParamValue(String),
    Value(String),
}

impl Item {
    /// Convert a lexer token, error tokens are handed back.
    fn from_token(token: Token<'_>) -> Result<Self, SyntaxErrorKind> {
        Ok(match token {
            Token::Begin => Self::Begin,
            Token::End => Self::End,
            Token::Identifier(name) => Self::Name(normalize_name(name)),
            Token::ComponentName(name) => Self::ComponentName(normalize_name(name)),
            Token::ParamValue { raw, .. } => Self::ParamValue(unescape_param_value(raw)),
            Token::Value(value) => Self::Value(value.to_owned()),
            Token::Error(kind) => return Err(kind),
        })
    }

    /// Short description used in diagnostics.
    const fn describe(&self) -> &'static str {
        match self {
            Self::Begin => "'BEGIN'",
            Self::End => "'END'",
            Self::Name(_) => "name",
            Self::ComponentName(_) => "component name",
            Self::ParamValue(_) => "parameter value",
            Self::Value(_) => "property value",
        }
    }
}

impl<R: BufRead> Parser<R> {
    /// Create a parser with default options.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }

    /// Create a parser with the given options.
    #[must_use]
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self {
            unfolder: Unfolder::new(reader),
            options,
            active: None,
            finished: false,
        }
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.unfolder.line_number()
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.unfolder.into_inner()
    }

    /// Parse the next top-level object.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly between objects.
    ///
    /// ## Errors
    ///
    /// - [`ParseError::Syntax`] for a malformed line, a line that does not
    ///   start an object, or an `END` that does not match its `BEGIN`.
    /// - [`ParseError::UnexpectedEof`] when the stream ends inside an object.
    /// - [`ParseError::TooDeep`] when [`ParserOptions::max_depth`] is exceeded.
    /// - [`ParseError::Io`] when reading fails.
    pub fn parse_next_object(&mut self) -> Result<Option<Component>, ParseError> {
        let result = self.parse_object();
        match &result {
            Ok(Some(component)) => tracing::debug!(
                component = component.name(),
                line = self.line_number(),
                "parsed object"
            ),
            Ok(None) => tracing::debug!(line = self.line_number(), "end of stream"),
            Err(err) => {
                self.active = None;
                tracing::debug!(error = %err, "aborted parsing object");
            }
        }
        result
    }

    fn parse_object(&mut self) -> Result<Option<Component>, ParseError> {
        let Some((item, span)) = self.next_item()? else {
            return Ok(None);
        };

        match item {
            Item::Begin => {
                let (name, _) = self.expect_component_name(KW_BEGIN)?;
                self.parse_component(name, 1).map(Some)
            }
            _ => Err(self.syntax_error(SyntaxErrorKind::ExpectedBegin, span)),
        }
    }

    fn parse_component(&mut self, name: String, depth: usize) -> Result<Component, ParseError> {
        if let Some(max) = self.options.max_depth.filter(|&max| depth > max) {
            return Err(ParseError::TooDeep {
                component: name,
                max,
                line: self.line_number(),
            });
        }

        let mut component = Component::new(&name);
        loop {
            let (item, span) = self.expect_item(component.name())?;
            match item {
                Item::Name(prop) => {
                    let property = self.parse_property(&prop, component.name())?;
                    component.push_property(property);
                }
                Item::Begin => {
                    let (child, _) = self.expect_component_name(component.name())?;
                    let child = self.parse_component(child, depth + 1)?;
                    component.push_child(child);
                }
                Item::End => {
                    let (end, span) = self.expect_component_name(component.name())?;
                    if end != component.name() {
                        let kind = SyntaxErrorKind::MismatchedEnd {
                            expected: component.name().to_owned(),
                            found: end,
                        };
                        return Err(self.syntax_error(kind, span));
                    }
                    return Ok(component);
                }
                other => return Err(self.unexpected(&other, span)),
            }
        }
    }

    fn parse_property(&mut self, name: &str, component: &str) -> Result<Property, ParseError> {
        let original_line = self.active.as_ref().map_or("", |a| a.line.text());
        let mut property = Property::parsed(name, original_line);

        let mut param_name: Option<String> = None;
        loop {
            let (item, span) = self.expect_item(component)?;
            match item {
                Item::Name(name) => param_name = Some(name),
                Item::ParamValue(value) => match &param_name {
                    Some(name) => property.add_parameter(name, value),
                    None => return Err(self.unexpected(&Item::ParamValue(value), span)),
                },
                Item::Value(value) => {
                    property.set_value(value);
                    return Ok(property);
                }
                other => return Err(self.unexpected(&other, span)),
            }
        }
    }

    fn expect_component_name(&mut self, component: &str) -> Result<(String, Span), ParseError> {
        match self.expect_item(component)? {
            (Item::ComponentName(name), span) => Ok((name, span)),
            (other, span) => Err(self.unexpected(&other, span)),
        }
    }

    fn expect_item(&mut self, component: &str) -> Result<(Item, Span), ParseError> {
        self.next_item()?.ok_or_else(|| ParseError::UnexpectedEof {
            component: component.to_owned(),
            line: self.line_number(),
        })
    }

    /// Pull the next token, reading a new line when the current one is done.
    fn next_item(&mut self) -> Result<Option<(Item, Span)>, ParseError> {
        loop {
            if self.active.as_ref().is_none_or(ActiveLine::is_finished) {
                self.active = None;
                match self.unfolder.next_line()? {
                    Some(line) => {
                        self.active = Some(ActiveLine {
                            line,
                            checkpoint: Checkpoint::START,
                        });
                    }
                    None => return Ok(None),
                }
            }

            let Some(active) = self.active.as_mut() else {
                continue;
            };

            let mut lexer = Lexer::resume(active.line.text(), active.checkpoint);
            let token = lexer.next();
            active.checkpoint = lexer.checkpoint();

            let Some(SpannedToken(token, span)) = token else {
                continue;
            };
            match Item::from_token(token) {
                Ok(item) => return Ok(Some((item, span))),
                Err(kind) => return Err(self.syntax_error(kind, span)),
            }
        }
    }

    fn unexpected(&mut self, item: &Item, span: Span) -> ParseError {
        let kind = SyntaxErrorKind::UnexpectedToken {
            found: item.describe(),
        };
        self.syntax_error(kind, span)
    }

    /// Build an error pointing into the active line, and drop that line.
    fn syntax_error(&mut self, kind: SyntaxErrorKind, span: Span) -> ParseError {
        let err = match self.active.take() {
            Some(ActiveLine { line, .. }) => {
                let line_number = line.line_number();
                SyntaxError::new(kind, line.into_text(), span, line_number)
            }
            None => SyntaxError::new(kind, String::new(), Span::default(), self.line_number()),
        };
        err.into()
    }
}

impl<R: BufRead> Iterator for Parser<R> {
    type Item = Result<Component, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.parse_next_object() {
            Ok(Some(component)) => Some(Ok(component)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Parser<R> {}
