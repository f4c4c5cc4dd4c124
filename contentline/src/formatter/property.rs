// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property formatting.
//!
//! ```text
//! contentline = name *(";" param ) ":" value CRLF
//! ```

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::formatter::parameter::write_parameters;
use crate::property::Property;

/// Format a single property as one logical line, CRLF included.
pub fn write_property<W: Write>(f: &mut Formatter<W>, property: &Property) -> io::Result<()> {
    write!(f, "{}", property.name())?;
    write_parameters(f, property.parameters())?;
    write!(f, ":{}", property.value())?;
    f.writeln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatOptions;

    fn line(property: &Property) -> String {
        let mut buf = Vec::new();
        let mut f = Formatter::new(&mut buf, FormatOptions::default());
        write_property(&mut f, property).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_value_verbatim() {
        let prop = Property::new("feature", r"Content:'!,;.'\n");
        assert_eq!(line(&prop), "FEATURE:Content:'!,;.'\\n\r\n");
    }

    #[test]
    fn writes_parameters_in_order() {
        let prop = Property::new("TYPE", "Transporter").with_parameter("class", ">6m");
        assert_eq!(line(&prop), "TYPE;CLASS=>6m:Transporter\r\n");
    }
}
