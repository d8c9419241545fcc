// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Node-tree document host
//!
//! Provides the in-memory document that autocomplete plugins edit through
//! [`DocumentHost`], the atomic [`EntryNode`] variant, and a JSON codec gated
//! by a [`NodeRegistry`].

pub mod document;
pub mod entry;
pub mod error;
pub mod host;
pub mod node;
pub mod selection;
pub mod serialization;
pub mod visual;

pub use document::Document;
pub use entry::{ENTRY_CLASS, ENTRY_VERSION, EntryNode, SerializedEntryNode};
pub use error::{DocumentError, Result};
pub use host::{DocumentHost, update};
pub use node::{Node, NodeKey, NodeKind, TextNode};
pub use selection::{Point, Selection};
pub use serialization::{
    CodecError, NodeRegistry, SUPPORTED_TYPES, SerializedDocument, SerializedNode, export_json,
    import_json,
};
pub use visual::DomElement;
