// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The node/selection interface that editor plugins are written against

use crate::document::Document;
use crate::error::Result;
use crate::node::{Node, NodeKey, NodeKind};
use crate::selection::Selection;

/// Document-tree host as seen by a plugin
///
/// Plugins never edit text themselves. They read the selection and the nodes
/// around it and request sibling-level mutations through this trait.
pub trait DocumentHost {
    /// Opaque copy of the host state used to roll back a failed transaction
    type Snapshot;

    fn selection(&self) -> Option<Selection>;

    fn set_selection(&mut self, selection: Option<Selection>);

    fn node(&self, key: NodeKey) -> Option<&Node>;

    fn parent(&self, key: NodeKey) -> Option<NodeKey>;

    fn previous_sibling(&self, key: NodeKey) -> Option<NodeKey>;

    fn next_sibling(&self, key: NodeKey) -> Option<NodeKey>;

    fn index_within_parent(&self, key: NodeKey) -> Option<usize>;

    fn text_content(&self, key: NodeKey) -> Result<String>;

    fn set_text_content(&mut self, key: NodeKey, text: &str) -> Result<()>;

    fn insert_after(&mut self, anchor: NodeKey, kind: NodeKind) -> Result<NodeKey>;

    fn remove(&mut self, key: NodeKey) -> Result<()>;

    fn select_text(&mut self, key: NodeKey, offset: usize) -> Result<()>;

    fn select_start(&mut self, key: NodeKey) -> Result<()>;

    fn select_end(&mut self, key: NodeKey) -> Result<()>;

    fn select_after(&mut self, key: NodeKey) -> Result<()>;

    fn snapshot(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: Self::Snapshot);

    fn kind(&self, key: NodeKey) -> Option<&NodeKind> {
        self.node(key).map(Node::kind)
    }

    fn is_entry(&self, key: NodeKey) -> bool {
        self.node(key).is_some_and(Node::is_entry)
    }

    fn child_at(&self, parent: NodeKey, index: usize) -> Option<NodeKey> {
        self.node(parent)?.children().get(index).copied()
    }
}

/// Runs `f` as one transaction: if it fails, every mutation it made is undone.
pub fn update<H, R, E>(
    host: &mut H,
    f: impl FnOnce(&mut H) -> std::result::Result<R, E>,
) -> std::result::Result<R, E>
where
    H: DocumentHost + ?Sized,
{
    let snapshot = host.snapshot();
    match f(host) {
        Ok(value) => Ok(value),
        Err(err) => {
            host.restore(snapshot);
            Err(err)
        }
    }
}

impl DocumentHost for Document {
    type Snapshot = Document;

    fn selection(&self) -> Option<Selection> {
        Document::selection(self)
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        Document::set_selection(self, selection)
    }

    fn node(&self, key: NodeKey) -> Option<&Node> {
        Document::node(self, key)
    }

    fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        Document::parent(self, key)
    }

    fn previous_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        Document::previous_sibling(self, key)
    }

    fn next_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        Document::next_sibling(self, key)
    }

    fn index_within_parent(&self, key: NodeKey) -> Option<usize> {
        Document::index_within_parent(self, key)
    }

    fn text_content(&self, key: NodeKey) -> Result<String> {
        Document::text_content(self, key)
    }

    fn set_text_content(&mut self, key: NodeKey, text: &str) -> Result<()> {
        Document::set_text_content(self, key, text)
    }

    fn insert_after(&mut self, anchor: NodeKey, kind: NodeKind) -> Result<NodeKey> {
        Document::insert_after(self, anchor, kind)
    }

    fn remove(&mut self, key: NodeKey) -> Result<()> {
        Document::remove(self, key)
    }

    fn select_text(&mut self, key: NodeKey, offset: usize) -> Result<()> {
        Document::select_text(self, key, offset)
    }

    fn select_start(&mut self, key: NodeKey) -> Result<()> {
        Document::select_start(self, key)
    }

    fn select_end(&mut self, key: NodeKey) -> Result<()> {
        Document::select_end(self, key)
    }

    fn select_after(&mut self, key: NodeKey) -> Result<()> {
        Document::select_after(self, key)
    }

    fn snapshot(&self) -> Document {
        self.clone()
    }

    fn restore(&mut self, snapshot: Document) {
        *self = snapshot;
    }
}
