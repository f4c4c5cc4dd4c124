// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords and character classes of the content line grammar.

/// Name that opens a component (`BEGIN:VCALENDAR`).
pub const KW_BEGIN: &str = "BEGIN";
/// Name that closes a component (`END:VCALENDAR`).
pub const KW_END: &str = "END";

/// Maximum octets of a physical line (excluding CRLF), RFC 5545 Section 3.1.
pub const FOLD_WIDTH: usize = 75;

/// Characters that must be quoted when they appear in a parameter value.
pub(crate) const PARAM_RESERVED: [char; 3] = [',', ';', ':'];

/// Whether `c` may appear in a property, parameter or component name.
#[must_use]
pub const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Whether `c` is a control character other than HTAB.
///
/// ```text
/// CONTROL = %x00-08 / %x0A-1F / %x7F
/// ```
#[must_use]
pub const fn is_control(c: char) -> bool {
    (c < '\u{20}' && c != '\t') || c == '\u{7F}'
}
