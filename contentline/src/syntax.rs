// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of content lines as defined in RFC 5545 Section 3.1 and RFC 6350
//! Section 3.2.
//!
//! # Architecture
//!
//! ```text
//! Bytes → Unfolder → Logical Line → Lexer → Token Stream → Parser → Component
//! ```
//!
//! Every stage is pull-based: the parser asks the lexer for one token at a
//! time, and the lexer is created for one logical line that the unfolder reads
//! on demand.

mod lexer;
mod parser;
mod unfold;

pub use crate::syntax::lexer::{Lexer, Span, SpannedToken, Token, tokenize};
pub use crate::syntax::parser::{Parser, ParserOptions, parse_str};
pub use crate::syntax::unfold::{LogicalLine, Unfolder};
