// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Identifier normalization and validation.
//!
//! Component, property and parameter names are case-insensitive. Every name
//! that enters the tree goes through [`normalize_name`], so comparisons can be
//! done on the canonical upper-case form.

/// Canonicalize a name to its upper-case form.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Compare two names case-insensitively.
#[must_use]
pub fn names_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Check that `name` is a legal `iana-token` or `x-name`.
///
/// This is an opt-in check for programmatically constructed objects, the
/// parser never calls it.
///
/// ## Errors
///
/// Returns the first character outside `[-A-Za-z0-9]`, or an error for an
/// empty name.
pub fn validate_name(name: &str) -> Result<(), InvalidName> {
    if name.is_empty() {
        return Err(InvalidName::Empty);
    }

    match name.char_indices().find(|&(_, c)| !crate::keyword::is_name_char(c)) {
        Some((offset, ch)) => Err(InvalidName::IllegalChar {
            name: name.to_owned(),
            ch,
            offset,
        }),
        None => Ok(()),
    }
}

/// Error returned by [`validate_name`] and [`Property::try_new`](crate::Property::try_new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidName {
    /// The name has no characters.
    #[error("name must not be empty")]
    Empty,

    /// The name contains a character outside `[-A-Za-z0-9]`.
    #[error("name '{name}' contains illegal character {ch:?} at byte {offset}")]
    IllegalChar {
        /// The rejected name
        name: String,
        /// The first illegal character
        ch: char,
        /// Byte offset of `ch` in `name`
        offset: usize,
    },

    /// The name is `BEGIN` or `END`, which only mark components.
    #[error("'{name}' is reserved for component markers")]
    Reserved {
        /// The rejected name
        name: String,
    },
}
