// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for document tree operations

use crate::node::NodeKey;

/// Result type alias for document operations that can fail
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors raised by the document host when a mutation or query cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeKey),

    #[error("node {0} is not a text node")]
    NotText(NodeKey),

    #[error("node {0} is atomic and cannot be edited")]
    AtomicNode(NodeKey),

    #[error("node {0} is not attached to a parent")]
    Detached(NodeKey),

    #[error("offset {offset} is out of range for node {key} (length {len})")]
    OffsetOutOfRange {
        key: NodeKey,
        offset: usize,
        len: usize,
    },

    #[error("a {kind} node cannot be placed under {parent}")]
    InvalidParent { parent: NodeKey, kind: &'static str },
}
