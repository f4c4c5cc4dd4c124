// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters.
//!
//! ```text
//! param       = param-name "=" param-value *("," param-value)
//! param-value = paramtext / quoted-string
//! ```
//!
//! A parameter name may repeat on one line, and each occurrence may carry a
//! comma-separated list. All values for one name are kept in one list, in the
//! order they were seen.

use std::slice;

use crate::name::normalize_name;

/// Parameters of a property, keyed by upper-case name
///
/// Keys keep the order in which they were first added, so encoding is
/// deterministic. Equality ignores key order but not the order of values
/// under one key. Every key holds at least one value.
///
/// Values are escaped on output, but they must not contain control characters
/// other than HTAB, CR and LF, otherwise the encoded output cannot be parsed
/// back.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    entries: Vec<(String, Vec<String>)>,
}

impl Parameters {
    /// Create an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All values of a parameter, case-insensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .and_then(|i| self.entries.get(i))
            .map(|(_, values)| values.as_slice())
    }

    /// The first value of a parameter, case-insensitive.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Whether the parameter is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Append a value under `name`, after the values already present.
    ///
    /// The value must not contain control characters other than HTAB, CR and
    /// LF, they are written as they are and cannot be parsed back.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, values)) => values.push(value),
            None => self.entries.push((normalize_name(name), vec![value])),
        }
    }

    /// Replace all values of `name`, keeping its position if present.
    ///
    /// An empty `values` removes the parameter. Returns the previous values.
    pub fn insert<I, V>(&mut self, name: &str, values: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return self.remove(name);
        }

        match self.position(name).and_then(|i| self.entries.get_mut(i)) {
            Some((_, old)) => Some(std::mem::replace(old, values)),
            None => {
                self.entries.push((normalize_name(name), values));
                None
            }
        }
    }

    /// Remove a parameter and return its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    /// Iterate over `(name, values)` in first-seen order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterate over the parameter names in first-seen order.
    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, values)| other.get(name) == Some(values))
    }
}

impl Eq for Parameters {}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for Parameters {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.append(name.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the parameters of a property, see [`Parameters::iter`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, Vec<String>)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
