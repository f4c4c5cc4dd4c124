// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decode and encode the content line format shared by iCalendar (RFC 5545)
//! and vCard (RFC 6350).
//!
//! Objects are nested components delimited by `BEGIN`/`END` lines, each
//! holding properties with parameters. Long lines are folded, and parameter
//! values are escaped per RFC 6868. Property values are opaque strings.
//!
//! # Example
//!
//! ```
//! use aimcal_contentline::{Component, Parser};
//!
//! let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
//! let mut parser = Parser::new(src.as_bytes());
//! let calendar: Component = parser.parse_next_object().unwrap().unwrap();
//! assert_eq!(calendar.property("VERSION").unwrap().value(), "2.0");
//! assert!(parser.parse_next_object().unwrap().is_none());
//!
//! let mut out = Vec::new();
//! calendar.encode(&mut out).unwrap();
//! assert_eq!(out, src.as_bytes());
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod component;
mod error;
pub mod escape;
pub mod formatter;
pub mod keyword;
pub mod name;
mod parameter;
mod property;
pub mod syntax;

pub use crate::component::Component;
pub use crate::error::{ParseError, SyntaxError, SyntaxErrorKind};
pub use crate::escape::{escape_param_value, unescape_param_value};
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatter, format};
pub use crate::name::{InvalidName, normalize_name, validate_name};
pub use crate::parameter::{Iter as ParameterIter, Parameters};
pub use crate::property::Property;
pub use crate::syntax::{
    Lexer, LogicalLine, Parser, ParserOptions, Span, SpannedToken, Token, Unfolder, parse_str,
    tokenize,
};
