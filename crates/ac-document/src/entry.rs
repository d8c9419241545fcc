// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The atomic entry node inserted when a suggestion is accepted

use serde::{Deserialize, Serialize};

use crate::visual::DomElement;

/// CSS class carried by the visual element of every entry
pub const ENTRY_CLASS: &str = "autocompleted-entry";

/// Current version of the serialized entry form
pub const ENTRY_VERSION: u32 = 1;

/// An accepted autocomplete suggestion embedded in the document
///
/// The display text is fixed at construction. Entries are atomic: the caret
/// is never placed inside one and typed text is never merged into one.
/// Two entries are equal iff their display texts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryNode {
    text: String,
}

/// External (JSON) representation of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEntryNode {
    pub text: String,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    ENTRY_VERSION
}

impl EntryNode {
    pub const TYPE: &'static str = "autocompleted-entry";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_atomic(&self) -> bool {
        true
    }

    /// Token nodes are selected and deleted as one unit
    pub fn is_token(&self) -> bool {
        true
    }

    pub fn can_insert_text_before(&self) -> bool {
        false
    }

    pub fn can_insert_text_after(&self) -> bool {
        false
    }

    /// Rendered element, always non-editable
    pub fn create_visual(&self) -> DomElement {
        DomElement::new("span", self.text.clone())
            .with_class(ENTRY_CLASS)
            .non_editable()
    }

    /// Whether a previously rendered `prev` must be redrawn to show `self`
    pub fn needs_redraw(&self, prev: &EntryNode) -> bool {
        prev.text != self.text
    }

    /// Element used when exporting to an external markup format
    pub fn export_dom(&self) -> DomElement {
        DomElement::new("span", self.text.clone()).with_class(ENTRY_CLASS)
    }

    /// Recognizes spans produced by [`EntryNode::export_dom`]
    pub fn import_dom(element: &DomElement) -> Option<EntryNode> {
        if element.tag.eq_ignore_ascii_case("span") && element.has_class(ENTRY_CLASS) {
            Some(EntryNode::new(element.text.clone()))
        } else {
            None
        }
    }

    pub fn to_external_form(&self) -> SerializedEntryNode {
        SerializedEntryNode {
            text: self.text.clone(),
            version: ENTRY_VERSION,
        }
    }

    pub fn from_external_form(form: SerializedEntryNode) -> EntryNode {
        EntryNode::new(form.text)
    }
}
