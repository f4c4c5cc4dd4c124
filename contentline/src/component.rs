// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Components, delimited by `BEGIN:<NAME>` and `END:<NAME>`.

use std::io::{self, Write};

use crate::formatter::FormatOptions;
use crate::name::{names_eq, normalize_name};
use crate::property::Property;

/// A component (e.g., VCALENDAR, VEVENT, VCARD) with its properties and nested
/// components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    properties: Vec<Property>,
    children: Vec<Self>,
}

impl Component {
    /// Create an empty component, the name is converted to upper case.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Upper-case component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Nested components in order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Append a property.
    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Append a nested component.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Builder-style [`Component::push_property`].
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.push_property(property);
        self
    }

    /// Builder-style [`Component::push_child`].
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push_child(child);
        self
    }

    /// First property with the given name, case-insensitive.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|prop| names_eq(prop.name(), name))
    }

    /// All properties with the given name, case-insensitive.
    pub fn find_properties<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a Property> + use<'a, 'b> {
        self.properties
            .iter()
            .filter(move |prop| names_eq(prop.name(), name))
    }

    /// All direct children with the given name, case-insensitive.
    pub fn find_children<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a Self> + use<'a, 'b> {
        self.children
            .iter()
            .filter(move |child| names_eq(child.name(), name))
    }

    /// Encode the component with the default [`FormatOptions`].
    ///
    /// ## Errors
    ///
    /// If writing to the writer fails.
    pub fn encode(&self, w: &mut impl Write) -> io::Result<()> {
        FormatOptions::default().write(self, w)
    }
}
