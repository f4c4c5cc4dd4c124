// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parameter formatting.
//!
//! Values are escaped per RFC 6868 first, then wrapped in DQUOTE when they
//! contain a character that would end the value.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::escape::escape_param_value;
use crate::formatter::Formatter;
use crate::keyword::PARAM_RESERVED;
use crate::parameter::Parameters;

/// Format all parameters, each prefixed with a semicolon.
pub fn write_parameters<W: Write>(f: &mut Formatter<W>, parameters: &Parameters) -> io::Result<()> {
    for (name, values) in parameters {
        write!(f, ";{name}=")?;
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            let escaped = escape_param_value(value);
            write!(f, "{}", quote_if_needed(&escaped))?;
        }
    }
    Ok(())
}

/// Quote the value if it contains `,`, `;` or `:`.
///
/// The value must already be escaped, so it holds no DQUOTE.
fn quote_if_needed(s: &str) -> Cow<'_, str> {
    if s.contains(PARAM_RESERVED) {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
