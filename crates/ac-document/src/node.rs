// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Node identity and the closed set of node variants

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::EntryNode;

/// Opaque identifier of a node inside one [`crate::Document`]
///
/// Keys are allocated monotonically and never reused, so a key captured
/// before a mutation either still names the same node or names nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey(u64);

impl NodeKey {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Plain, mutable, splittable text leaf
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextNode {
    text: String,
}

impl TextNode {
    pub const TYPE: &'static str = "text";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Length in Unicode scalar values, the unit of every text offset
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Every kind of node the document tree can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Text(TextNode),
    Entry(EntryNode),
}

impl NodeKind {
    pub fn text(text: impl Into<String>) -> Self {
        NodeKind::Text(TextNode::new(text))
    }

    pub fn entry(text: impl Into<String>) -> Self {
        NodeKind::Entry(EntryNode::new(text))
    }

    /// Serialized type name
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text(_) => TextNode::TYPE,
            NodeKind::Entry(_) => EntryNode::TYPE,
        }
    }

    /// Atomic nodes are edited only as a whole: never entered by the caret,
    /// never merged with typed text.
    pub fn is_atomic(&self) -> bool {
        matches!(self, NodeKind::Entry(_))
    }

    /// Leaves that live inside a paragraph
    pub fn is_inline(&self) -> bool {
        matches!(self, NodeKind::Text(_) | NodeKind::Entry(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Root | NodeKind::Paragraph)
    }

    pub fn can_insert_text_before(&self) -> bool {
        !self.is_atomic()
    }

    pub fn can_insert_text_after(&self) -> bool {
        !self.is_atomic()
    }

    /// Own text of a leaf; elements have none of their own.
    pub fn text_content(&self) -> &str {
        match self {
            NodeKind::Text(text) => text.text(),
            NodeKind::Entry(entry) => entry.text(),
            NodeKind::Root | NodeKind::Paragraph => "",
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_entry(&self) -> Option<&EntryNode> {
        match self {
            NodeKind::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// A node stored in the document arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: NodeKey,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_atomic(&self) -> bool {
        self.kind.is_atomic()
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn is_entry(&self) -> bool {
        matches!(self.kind, NodeKind::Entry(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_by_kind() {
        let text = NodeKind::text("abc");
        let entry = NodeKind::entry("world");

        assert!(!text.is_atomic());
        assert!(text.can_insert_text_after());
        assert!(entry.is_atomic());
        assert!(!entry.can_insert_text_before());
        assert!(!entry.can_insert_text_after());
        assert!(entry.is_inline() && text.is_inline());
        assert!(NodeKind::Paragraph.is_element());
    }

    #[test]
    fn test_text_length_counts_scalar_values() {
        let text = TextNode::new("héllo");
        assert_eq!(text.len(), 5);
        assert_eq!(text.text().len(), 6);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(NodeKind::text("").type_name(), "text");
        assert_eq!(NodeKind::entry("x").type_name(), "autocompleted-entry");
        assert_eq!(NodeKind::Paragraph.type_name(), "paragraph");
    }
}
