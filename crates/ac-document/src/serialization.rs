// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON import/export of documents and the registry of allowed node types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as J;
use tracing::debug;

use crate::document::Document;
use crate::entry::{EntryNode, SerializedEntryNode};
use crate::error::DocumentError;
use crate::node::{NodeKey, NodeKind, TextNode};

const NODE_VERSION: u32 = 1;

fn node_version() -> u32 {
    NODE_VERSION
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("node type '{0}' is not registered")]
    UnregisteredNodeType(String),

    #[error("node type '{0}' has no codec")]
    UnsupportedNodeType(String),

    #[error("node is missing its \"type\" field")]
    MissingType,

    #[error("document root has type '{0}', expected 'root'")]
    UnexpectedRoot(String),

    #[error("a '{child}' node cannot appear inside '{parent}'")]
    Misplaced { parent: String, child: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Every node type the JSON codec can represent
pub const SUPPORTED_TYPES: [&str; 4] = ["root", "paragraph", TextNode::TYPE, EntryNode::TYPE];

/// The node types a document is allowed to contain
///
/// `root`, `paragraph` and `text` are always present; every other type must
/// be registered before documents containing it can be imported. Only
/// [`SUPPORTED_TYPES`] can be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRegistry {
    types: BTreeSet<&'static str>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            types: ["root", "paragraph", TextNode::TYPE].into_iter().collect(),
        }
    }

    /// Core types plus the autocompleted entry node
    pub fn with_entry_nodes() -> Self {
        let mut registry = Self::new();
        registry.types.insert(EntryNode::TYPE);
        registry
    }

    /// Returns `Ok(false)` if the type was already registered.
    pub fn register(&mut self, type_name: &str) -> Result<bool, CodecError> {
        let known = SUPPORTED_TYPES
            .into_iter()
            .find(|supported| *supported == type_name)
            .ok_or_else(|| CodecError::UnsupportedNodeType(type_name.to_string()))?;
        Ok(self.types.insert(known))
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.types.contains(type_name)
    }

    pub fn types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.iter().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedDocument {
    pub root: SerializedNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SerializedNode {
    #[serde(rename = "root")]
    Root {
        children: Vec<SerializedNode>,
        #[serde(default = "node_version")]
        version: u32,
    },
    #[serde(rename = "paragraph")]
    Paragraph {
        children: Vec<SerializedNode>,
        #[serde(default = "node_version")]
        version: u32,
    },
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(default = "node_version")]
        version: u32,
    },
    #[serde(rename = "autocompleted-entry")]
    Entry(SerializedEntryNode),
}

impl SerializedNode {
    pub fn type_name(&self) -> &'static str {
        match self {
            SerializedNode::Root { .. } => "root",
            SerializedNode::Paragraph { .. } => "paragraph",
            SerializedNode::Text { .. } => TextNode::TYPE,
            SerializedNode::Entry(_) => EntryNode::TYPE,
        }
    }
}

/// Serializes the whole tree; the selection is not part of the external form.
pub fn export_json(doc: &Document) -> Result<String, CodecError> {
    let serialized = SerializedDocument {
        root: export_node(doc, doc.root()),
    };
    Ok(serde_json::to_string(&serialized)?)
}

fn export_node(doc: &Document, key: NodeKey) -> SerializedNode {
    let children = || -> Vec<SerializedNode> {
        doc.children(key)
            .iter()
            .map(|child| export_node(doc, *child))
            .collect()
    };
    match doc.node(key).map(|node| node.kind()) {
        Some(NodeKind::Text(text)) => SerializedNode::Text {
            text: text.text().to_string(),
            version: NODE_VERSION,
        },
        Some(NodeKind::Entry(entry)) => SerializedNode::Entry(entry.to_external_form()),
        Some(NodeKind::Paragraph) => SerializedNode::Paragraph {
            children: children(),
            version: NODE_VERSION,
        },
        Some(NodeKind::Root) | None => SerializedNode::Root {
            children: children(),
            version: NODE_VERSION,
        },
    }
}

/// Parses a document, rejecting node types the registry does not know.
///
/// The caret of the imported document sits at the end of its last paragraph.
pub fn import_json(json: &str, registry: &NodeRegistry) -> Result<Document, CodecError> {
    let value: J = serde_json::from_str(json)?;
    if let Some(root) = value.get("root") {
        check_registered(root, registry)?;
    }
    let serialized: SerializedDocument = serde_json::from_value(value)?;

    let children = match serialized.root {
        SerializedNode::Root { children, .. } => children,
        other => return Err(CodecError::UnexpectedRoot(other.type_name().to_string())),
    };

    let mut doc = Document::empty();
    for child in children {
        let children = match child {
            SerializedNode::Paragraph { children, .. } => children,
            other => return Err(misplaced("root", &other)),
        };
        let paragraph = doc.append_paragraph();
        for inline in children {
            match inline {
                SerializedNode::Text { text, .. } => {
                    doc.append_text(paragraph, &text)?;
                }
                SerializedNode::Entry(form) => {
                    let entry = EntryNode::from_external_form(form);
                    doc.append_entry(paragraph, entry.text())?;
                }
                other => return Err(misplaced("paragraph", &other)),
            }
        }
    }
    doc.select_document_end();

    debug!(paragraphs = doc.paragraphs().len(), "imported document");
    Ok(doc)
}

fn misplaced(parent: &str, child: &SerializedNode) -> CodecError {
    CodecError::Misplaced {
        parent: parent.to_string(),
        child: child.type_name().to_string(),
    }
}

fn check_registered(node: &J, registry: &NodeRegistry) -> Result<(), CodecError> {
    let type_name = node
        .get("type")
        .and_then(J::as_str)
        .ok_or(CodecError::MissingType)?;
    if !registry.is_registered(type_name) {
        return Err(CodecError::UnregisteredNodeType(type_name.to_string()));
    }
    if let Some(children) = node.get("children").and_then(J::as_array) {
        for child in children {
            check_registered(child, registry)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::empty();
        let paragraph = doc.append_paragraph();
        doc.append_text(paragraph, "say ").unwrap();
        doc.append_entry(paragraph, "world").unwrap();
        doc.append_text(paragraph, "!").unwrap();
        doc
    }

    #[test]
    fn test_export_shape() {
        let json = export_json(&sample()).unwrap();
        let value: J = serde_json::from_str(&json).unwrap();
        let entry = &value["root"]["children"][0]["children"][1];

        assert_eq!(value["root"]["type"], "root");
        assert_eq!(entry["type"], "autocompleted-entry");
        assert_eq!(entry["text"], "world");
        assert_eq!(entry["version"], 1);
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let json = export_json(&sample()).unwrap();
        let restored = import_json(&json, &NodeRegistry::with_entry_nodes()).unwrap();

        let paragraph = restored.first_paragraph().unwrap();
        let entry = restored.children(paragraph)[1];
        assert!(restored.node(entry).unwrap().is_atomic());
        assert_eq!(restored.text(), "say world!");
    }

    #[test]
    fn test_import_requires_registered_entry_type() {
        let json = export_json(&sample()).unwrap();
        let err = import_json(&json, &NodeRegistry::new()).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredNodeType(ref t) if t == "autocompleted-entry"));
    }

    #[test]
    fn test_import_rejects_misplaced_nodes() {
        let json = r#"{"root":{"type":"root","children":[{"type":"text","text":"loose"}]}}"#;
        let err = import_json(json, &NodeRegistry::new()).unwrap_err();
        assert!(matches!(err, CodecError::Misplaced { .. }));
    }

    #[test]
    fn test_import_places_caret_at_end() {
        let json = export_json(&sample()).unwrap();
        let restored = import_json(&json, &NodeRegistry::with_entry_nodes()).unwrap();
        let paragraph = restored.first_paragraph().unwrap();
        let last = restored.children(paragraph)[2];
        assert_eq!(restored.selection().unwrap().text_caret(), Some((last, 1)));
    }

    #[test]
    fn test_registry_registration() {
        let mut registry = NodeRegistry::new();
        assert!(!registry.is_registered(EntryNode::TYPE));
        assert!(registry.register(EntryNode::TYPE).unwrap());
        assert!(!registry.register(EntryNode::TYPE).unwrap());
        assert_eq!(registry.types().count(), 4);
    }

    #[test]
    fn test_register_rejects_types_without_codec() {
        let mut registry = NodeRegistry::new();
        let err = registry.register("mention").unwrap_err();
        assert_eq!(err.to_string(), "node type 'mention' has no codec");
        assert!(!registry.is_registered("mention"));
    }
}
