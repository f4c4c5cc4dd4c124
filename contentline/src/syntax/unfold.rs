// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Reassembles folded physical lines into logical lines.
//!
//! ```text
//! contentline = name *(";" param ) ":" value CRLF
//! ; a long line may be split by inserting CRLF followed by one
//! ; linear white-space character (SPACE or HTAB)
//! ```

use std::io::{self, BufRead};

use crate::error::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::syntax::Span;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// One unfolded content line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    text: String,
    line_number: usize,
}

impl LogicalLine {
    /// The line without CRLF and with folds removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based number of the physical line the logical line starts on.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consume the line and return its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Reads logical lines from a strict CRLF-terminated byte stream
#[derive(Debug)]
pub struct Unfolder<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> Unfolder<R> {
    /// Wrap a buffered reader.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next logical line.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly, that is before any byte
    /// of a new line.
    ///
    /// ## Errors
    ///
    /// - [`ParseError::Syntax`] with [`SyntaxErrorKind::ExpectedCrlf`] for a bare
    ///   LF, a lone CR or a last line without terminator.
    /// - [`ParseError::Syntax`] with [`SyntaxErrorKind::InvalidUtf8`] when the
    ///   unfolded line is not UTF-8.
    /// - [`ParseError::Io`] when the reader fails.
    pub fn next_line(&mut self) -> Result<Option<LogicalLine>, ParseError> {
        let start_line = self.line_number + 1;
        let mut buf = Vec::new();

        if !self.read_physical(&mut buf, start_line)? {
            return Ok(None);
        }

        loop {
            match self.peek_byte()? {
                Some(b' ' | b'\t') => {
                    self.reader.consume(1);
                    // A fold marker at the very end yields an empty continuation.
                    self.read_physical(&mut buf, start_line)?;
                }
                _ => break,
            }
        }

        let text = match String::from_utf8(buf) {
            Ok(text) => text,
            Err(err) => {
                let offset = err.utf8_error().valid_up_to();
                let lossy = String::from_utf8_lossy(err.as_bytes()).into_owned();
                // The lossy text keeps the valid prefix, so the offset still lines up.
                let span = Span::new(offset, offset + '\u{FFFD}'.len_utf8());
                let err = SyntaxError::new(SyntaxErrorKind::InvalidUtf8, lossy, span, start_line);
                return Err(err.into());
            }
        };

        tracing::trace!(line = start_line, text = %text, "read logical line");
        Ok(Some(LogicalLine {
            text,
            line_number: start_line,
        }))
    }

    /// Append one physical line without its CRLF to `buf`.
    ///
    /// Returns `false` if the stream was already exhausted.
    fn read_physical(&mut self, buf: &mut Vec<u8>, start_line: usize) -> Result<bool, ParseError> {
        let begin = buf.len();
        let read = self
            .reader
            .read_until(CR, buf)
            .map_err(|source| self.io_error(source))?;
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;

        if let Some(lf) = buf.get(begin..).and_then(|s| s.iter().position(|&b| b == LF)) {
            return Err(crlf_error(buf, begin + lf, start_line));
        }

        if buf.last() != Some(&CR) {
            // Reached the end of the stream without a terminator.
            let end = buf.len();
            return Err(crlf_error(buf, end, start_line));
        }
        buf.pop();

        match self.peek_byte()? {
            Some(LF) => {
                self.reader.consume(1);
                Ok(true)
            }
            _ => {
                let cr = buf.len();
                buf.push(CR);
                Err(crlf_error(buf, cr, start_line))
            }
        }
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, ParseError> {
        loop {
            let peeked = self.reader.fill_buf().map(|bytes| bytes.first().copied());
            match peeked {
                Ok(byte) => return Ok(byte),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => return Err(self.io_error(source)),
            }
        }
    }

    fn io_error(&self, source: io::Error) -> ParseError {
        ParseError::Io {
            line: self.line_number + 1,
            source,
        }
    }
}

fn crlf_error(buf: &[u8], offset: usize, line_number: usize) -> ParseError {
    let line = String::from_utf8_lossy(buf).into_owned();
    // Lossy decoding can shift offsets, clamp to keep the span inside the line.
    let start = offset.min(line.len());
    let end = if start < line.len() { start + 1 } else { start };
    SyntaxError::new(
        SyntaxErrorKind::ExpectedCrlf,
        line,
        Span::new(start, end),
        line_number,
    )
    .into()
}
