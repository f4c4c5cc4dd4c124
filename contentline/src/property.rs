// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Properties, one content line each.

use crate::keyword::{KW_BEGIN, KW_END};
use crate::name::{InvalidName, names_eq, normalize_name, validate_name};
use crate::parameter::Parameters;

/// A property of a component
///
/// The value is opaque: it is neither unescaped nor validated. A value must not
/// contain CR, LF or other control characters except HTAB, otherwise the
/// encoded output cannot be parsed back.
#[derive(Debug, Clone, Eq)]
pub struct Property {
    name: String,
    value: String,
    parameters: Parameters,
    original_line: String,
}

impl Property {
    /// Create a property, the name is converted to upper case.
    ///
    /// The name is not checked, see [`Property::try_new`].
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: normalize_name(name),
            value: value.into(),
            parameters: Parameters::new(),
            original_line: String::new(),
        }
    }

    /// Create a property after checking that the name only contains
    /// `[-A-Za-z0-9]` and is not `BEGIN` or `END`.
    ///
    /// ## Errors
    ///
    /// If the name is empty, contains an illegal character or would be read
    /// back as a component marker.
    pub fn try_new(name: &str, value: impl Into<String>) -> Result<Self, InvalidName> {
        validate_name(name)?;
        if names_eq(name, KW_BEGIN) || names_eq(name, KW_END) {
            return Err(InvalidName::Reserved {
                name: name.to_owned(),
            });
        }
        Ok(Self::new(name, value))
    }

    /// Property read from `original_line`, its value is filled in by the parser.
    pub(crate) fn parsed(name: &str, original_line: &str) -> Self {
        Self {
            original_line: original_line.to_owned(),
            ..Self::new(name, String::new())
        }
    }

    /// Builder-style [`Parameters::append`].
    ///
    /// Like the property value, a parameter value must not contain control
    /// characters other than HTAB, CR and LF.
    #[must_use]
    pub fn with_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.add_parameter(name, value);
        self
    }

    /// Append a parameter value, see [`Parameters::append`].
    pub fn add_parameter(&mut self, name: &str, value: impl Into<String>) {
        self.parameters.append(name, value);
    }

    /// Upper-case property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Parameters with unescaped values.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Mutable access to the parameters.
    pub const fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    /// The unfolded line this property was parsed from, empty if it was
    /// constructed.
    #[must_use]
    pub fn original_line(&self) -> &str {
        &self.original_line
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value && self.parameters == other.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_name() {
        let prop = Property::new("summary", "Lunch");
        assert_eq!(prop.name(), "SUMMARY");
        assert_eq!(prop.value(), "Lunch");
        assert_eq!(prop.original_line(), "");
        assert!(prop.parameters().is_empty());
    }

    #[test]
    fn try_new_rejects_illegal_names() {
        assert!(Property::try_new("X-ABC", "").is_ok());
        assert_eq!(
            Property::try_new("Not-So-'Valid'", "x"),
            Err(InvalidName::IllegalChar {
                name: "Not-So-'Valid'".to_owned(),
                ch: '\'',
                offset: 7,
            })
        );
        assert_eq!(Property::try_new("", "x"), Err(InvalidName::Empty));
    }

    #[test]
    fn try_new_rejects_component_markers() {
        for name in ["BEGIN", "end", "Begin"] {
            assert_eq!(
                Property::try_new(name, "X"),
                Err(InvalidName::Reserved {
                    name: name.to_owned()
                })
            );
        }
        assert!(Property::try_new("BEGINNING", "X").is_ok());
        assert!(Property::try_new("X-END", "X").is_ok());
    }

    #[test]
    fn builds_parameters() {
        let prop = Property::new("ATTENDEE", "mailto:a@example.com")
            .with_parameter("role", "CHAIR")
            .with_parameter("member", "a")
            .with_parameter("MEMBER", "b");
        assert_eq!(prop.parameters().first("ROLE"), Some("CHAIR"));
        assert_eq!(prop.parameters().get("member").map(<[String]>::len), Some(2));
    }

    #[test]
    fn equality_ignores_original_line() {
        let mut parsed = Property::parsed("x", "x:1");
        parsed.set_value("1");
        assert_eq!(parsed, Property::new("X", "1"));
        assert_eq!(parsed.original_line(), "x:1");
    }
}
