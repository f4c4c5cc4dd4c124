// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content line formatter.
//!
//! This module writes [`Component`] trees as folded content lines to any
//! `std::io::Write` implementer. Parameter values are escaped per RFC 6868 and
//! quoted when needed, property values are written as they are.
//!
//! # Example
//!
//! ```
//! use aimcal_contentline::{Component, Property, formatter::format};
//!
//! let calendar = Component::new("VCALENDAR").with_property(Property::new("VERSION", "2.0"));
//! let text = format(&calendar).unwrap();
//! assert_eq!(text, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
//! ```

mod component;
mod parameter;
mod property;

use std::io::{self, Write};

use crate::component::Component;
use crate::formatter::component::write_component;
use crate::keyword::FOLD_WIDTH;

/// Format a [`Component`] to a `String` with the default options.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(component: &Component) -> io::Result<String> {
    FormatOptions::default().write_to_string(component)
}

/// Formatting options for the content line formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding, CRLF excluded.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(FOLD_WIDTH),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write a [`Component`] to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, component: &Component, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        formatter.write_component(component)?;
        formatter.flush()
    }

    /// Write a [`Component`] to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, component: &Component) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(component, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style.
///
/// A folded line continues after CRLF followed by one whitespace character
/// (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    #[must_use]
    pub(crate) const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }

    /// Get the length of the continuation character after CRLF.
    #[must_use]
    pub(crate) const fn continuation_len() -> usize {
        1 // Both SPACE and TAB are 1 byte
    }
}

/// Content line formatter that writes to any `Write` implementer.
///
/// Bytes written through [`Write`] belong to the current logical line and are
/// folded as needed, without splitting a UTF-8 sequence.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
    /// Whether the current physical line is a continuation.
    continued: bool,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub const fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
            continued: false,
        }
    }

    /// Get a mutable reference to the underlying writer.
    #[must_use]
    pub const fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a [`Component`] with its properties and nested components.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_component(&mut self, component: &Component) -> io::Result<()> {
        write_component(self, component)
    }

    /// Terminate the current logical line with CRLF.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        self.continued = false;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    fn insert_fold(&mut self) -> io::Result<()> {
        tracing::trace!(length = self.line_length, "folding content line");
        self.writer
            .write_all(self.options.folding_style.as_bytes())?;
        self.line_length = FoldingStyle::continuation_len();
        self.continued = true;
        Ok(())
    }

    /// Whether nothing but the fold marker has been written on this line.
    const fn is_fresh_line(&self) -> bool {
        let start = if self.continued {
            FoldingStyle::continuation_len()
        } else {
            0
        };
        self.line_length <= start
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            self.writer.write_all(buf)?;
            self.line_length += buf.len();
            return Ok(buf.len());
        };

        let mut remaining = buf;
        while !remaining.is_empty() {
            let available = max_len.saturating_sub(self.line_length);
            let mut len = fitting_len(remaining, available);
            if len == 0 {
                if !self.is_fresh_line() {
                    self.insert_fold()?;
                    continue;
                }
                // Too narrow for even one character, write it whole.
                len = remaining
                    .first()
                    .map_or(0, |&lead| utf8_width(lead).min(remaining.len()));
            }

            let (chunk, rest) = remaining.split_at(len);
            self.writer.write_all(chunk)?;
            self.line_length += chunk.len();
            remaining = rest;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Length of the longest prefix of whole UTF-8 sequences within `max_bytes`.
fn fitting_len(buf: &[u8], max_bytes: usize) -> usize {
    let mut len = 0;
    while let Some(&lead) = buf.get(len) {
        let next = (len + utf8_width(lead)).min(buf.len());
        if next > max_bytes {
            break;
        }
        len = next;
    }
    len
}

/// Width of the UTF-8 sequence starting with `lead`.
///
/// UTF-8 encoding:
/// - 0xxxxxxx: 1 byte (ASCII)
/// - 110xxxxx: 2 bytes
/// - 1110xxxx: 3 bytes
/// - 11110xxx: 4 bytes
/// - 10xxxxxx: continuation byte, counted alone
const fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
