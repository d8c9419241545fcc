// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Renderer-agnostic description of a node's visual element

use serde::{Deserialize, Serialize};

/// Minimal element description handed to (or received from) a rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomElement {
    pub tag: String,
    pub class_name: String,
    /// `Some(false)` marks the element as non-editable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_editable: Option<bool>,
    pub text: String,
}

impl DomElement {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn non_editable(mut self) -> Self {
        self.content_editable = Some(false);
        self
    }

    /// Whitespace-separated class list membership
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    pub fn is_editable(&self) -> bool {
        self.content_editable.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_membership() {
        let el = DomElement::new("span", "x").with_class("chip autocompleted-entry");
        assert!(el.has_class("autocompleted-entry"));
        assert!(el.has_class("chip"));
        assert!(!el.has_class("autocompleted"));
    }

    #[test]
    fn test_editable_by_default() {
        let el = DomElement::new("span", "x");
        assert!(el.is_editable());
        assert!(!el.non_editable().is_editable());
    }
}
