// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory node-tree document
//!
//! The tree is always `root -> paragraph* -> (text | entry)*`. Nodes live in
//! an arena keyed by [`NodeKey`]; parent/child links are kept on both sides.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use tracing::trace;

use crate::error::{DocumentError, Result};
use crate::node::{Node, NodeKey, NodeKind};
use crate::selection::{Point, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: BTreeMap<NodeKey, Node>,
    root: NodeKey,
    next_key: u64,
    selection: Option<Selection>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding one empty paragraph with the caret inside it
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let paragraph = doc.append_paragraph();
        doc.selection = Some(Selection::caret(Point::element(paragraph, 0)));
        doc
    }

    /// A bare root with no paragraphs and no selection
    pub fn empty() -> Self {
        let root = NodeKey::new(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                key: root,
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            },
        );
        Self {
            nodes,
            root,
            next_key: 1,
            selection: None,
        }
    }

    /// One paragraph per line; the caret is placed at the end of the text.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::empty();
        for line in text.split('\n') {
            let paragraph = doc.append_paragraph();
            if !line.is_empty() {
                doc.attach(paragraph, NodeKind::text(line));
            }
        }
        doc.select_document_end();
        doc
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn paragraphs(&self) -> &[NodeKey] {
        self.children(self.root)
    }

    pub fn first_paragraph(&self) -> Option<NodeKey> {
        self.paragraphs().first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn append_paragraph(&mut self) -> NodeKey {
        self.attach(self.root, NodeKind::Paragraph)
    }

    pub fn append_text(&mut self, paragraph: NodeKey, text: &str) -> Result<NodeKey> {
        self.append_inline(paragraph, NodeKind::text(text))
    }

    pub fn append_entry(&mut self, paragraph: NodeKey, text: &str) -> Result<NodeKey> {
        self.append_inline(paragraph, NodeKind::entry(text))
    }

    fn append_inline(&mut self, paragraph: NodeKey, kind: NodeKind) -> Result<NodeKey> {
        let parent = self.get(paragraph)?;
        check_placement(parent, &kind)?;
        Ok(self.attach(paragraph, kind))
    }

    fn allocate(&mut self, parent: NodeKey, kind: NodeKind) -> NodeKey {
        let key = NodeKey::new(self.next_key);
        self.next_key += 1;
        self.nodes.insert(
            key,
            Node {
                key,
                parent: Some(parent),
                children: Vec::new(),
                kind,
            },
        );
        key
    }

    /// Appends without validation; callers guarantee the placement is legal.
    fn attach(&mut self, parent: NodeKey, kind: NodeKind) -> NodeKey {
        let key = self.allocate(parent, kind);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(key);
        }
        key
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    fn get(&self, key: NodeKey) -> Result<&Node> {
        self.nodes.get(&key).ok_or(DocumentError::NodeNotFound(key))
    }

    fn get_mut(&mut self, key: NodeKey) -> Result<&mut Node> {
        self.nodes.get_mut(&key).ok_or(DocumentError::NodeNotFound(key))
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(&key).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(&key)?.parent
    }

    pub fn index_within_parent(&self, key: NodeKey) -> Option<usize> {
        let parent = self.parent(key)?;
        self.children(parent).iter().position(|child| *child == key)
    }

    pub fn previous_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let index = self.index_within_parent(key)?;
        let parent = self.parent(key)?;
        index.checked_sub(1).map(|i| self.children(parent)[i])
    }

    pub fn next_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let index = self.index_within_parent(key)?;
        let parent = self.parent(key)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Text of a leaf, or the concatenated text of an element's descendants
    pub fn text_content(&self, key: NodeKey) -> Result<String> {
        let node = self.get(key)?;
        let content = match &node.kind {
            NodeKind::Text(_) | NodeKind::Entry(_) => node.kind.text_content().to_string(),
            NodeKind::Paragraph => {
                let mut out = String::new();
                for child in &node.children {
                    out.push_str(&self.text_content(*child)?);
                }
                out
            }
            NodeKind::Root => {
                let parts = node
                    .children
                    .iter()
                    .map(|child| self.text_content(*child))
                    .collect::<Result<Vec<_>>>()?;
                parts.join("\n")
            }
        };
        Ok(content)
    }

    /// Whole document as plain text, paragraphs separated by `\n`
    pub fn text(&self) -> String {
        self.text_content(self.root).unwrap_or_default()
    }

    /// Replaces the content of a text node. Entries are immutable.
    pub fn set_text_content(&mut self, key: NodeKey, text: &str) -> Result<()> {
        let node = self.get_mut(key)?;
        match &mut node.kind {
            NodeKind::Text(existing) => {
                let content = existing.text_mut();
                content.clear();
                content.push_str(text);
            }
            NodeKind::Entry(_) => return Err(DocumentError::AtomicNode(key)),
            NodeKind::Root | NodeKind::Paragraph => return Err(DocumentError::NotText(key)),
        }

        let len = text.chars().count();
        self.map_selection(|point| match point {
            Point::Text { key: k, offset } if k == key && offset > len => Point::text(k, len),
            other => other,
        });
        Ok(())
    }

    /// Inserts `kind` as the immediate next sibling of `anchor`.
    pub fn insert_after(&mut self, anchor: NodeKey, kind: NodeKind) -> Result<NodeKey> {
        let parent_key = self.get(anchor)?.parent.ok_or(DocumentError::Detached(anchor))?;
        check_placement(self.get(parent_key)?, &kind)?;
        let index = self
            .index_within_parent(anchor)
            .ok_or(DocumentError::Detached(anchor))?;

        let key = self.allocate(parent_key, kind);
        self.get_mut(parent_key)?.children.insert(index + 1, key);

        // Element points past the insertion gap now address one child further.
        self.map_selection(|point| match point {
            Point::Element { key: k, offset } if k == parent_key && offset > index => {
                Point::element(k, offset + 1)
            }
            other => other,
        });
        trace!(anchor = %anchor, inserted = %key, "inserted sibling");
        Ok(key)
    }

    /// Removes a node and its subtree.
    ///
    /// A selection endpoint inside the removed subtree moves to the gap the
    /// node leaves behind.
    pub fn remove(&mut self, key: NodeKey) -> Result<()> {
        let parent_key = self.get(key)?.parent.ok_or(DocumentError::Detached(key))?;
        let index = self
            .index_within_parent(key)
            .ok_or(DocumentError::Detached(key))?;

        let mut removed = BTreeSet::new();
        let mut stack = vec![key];
        while let Some(next) = stack.pop() {
            if removed.insert(next) {
                stack.extend(self.children(next).iter().copied());
            }
        }

        self.map_selection(|point| {
            if removed.contains(&point.key()) {
                return Point::element(parent_key, index);
            }
            match point {
                Point::Element { key: k, offset } if k == parent_key && offset > index => {
                    Point::element(k, offset - 1)
                }
                other => other,
            }
        });

        self.get_mut(parent_key)?.children.remove(index);
        for gone in &removed {
            self.nodes.remove(gone);
        }
        trace!(removed = %key, "removed node");
        Ok(())
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    fn map_selection(&mut self, mut f: impl FnMut(Point) -> Point) {
        if let Some(selection) = self.selection {
            self.selection = Some(Selection::range(f(selection.anchor), f(selection.focus)));
        }
    }

    fn set_caret(&mut self, point: Point) {
        self.selection = Some(Selection::caret(point));
    }

    fn text_len(&self, key: NodeKey) -> Result<usize> {
        match &self.get(key)?.kind {
            NodeKind::Text(text) => Ok(text.len()),
            NodeKind::Entry(_) => Err(DocumentError::AtomicNode(key)),
            _ => Err(DocumentError::NotText(key)),
        }
    }

    /// An element point may address any gap from before the first child to
    /// after the last one.
    fn check_gap(&self, key: NodeKey, offset: usize) -> Result<()> {
        let len = self.get(key)?.children.len();
        if offset > len {
            return Err(DocumentError::OffsetOutOfRange { key, offset, len });
        }
        Ok(())
    }

    /// Caret at `offset` inside a text node
    pub fn select_text(&mut self, key: NodeKey, offset: usize) -> Result<()> {
        let len = self.text_len(key)?;
        if offset > len {
            return Err(DocumentError::OffsetOutOfRange { key, offset, len });
        }
        self.set_caret(Point::text(key, offset));
        Ok(())
    }

    /// Caret at the start of a node; for an entry, the gap before it
    pub fn select_start(&mut self, key: NodeKey) -> Result<()> {
        let point = match &self.get(key)?.kind {
            NodeKind::Text(_) => Point::text(key, 0),
            NodeKind::Entry(_) => self.gap_before(key)?,
            NodeKind::Root | NodeKind::Paragraph => Point::element(key, 0),
        };
        self.set_caret(point);
        Ok(())
    }

    /// Caret at the end of a node; for an entry, the gap after it
    pub fn select_end(&mut self, key: NodeKey) -> Result<()> {
        let node = self.get(key)?;
        let point = match &node.kind {
            NodeKind::Text(text) => Point::text(key, text.len()),
            NodeKind::Entry(_) => self.gap_after(key)?,
            NodeKind::Root | NodeKind::Paragraph => Point::element(key, node.children.len()),
        };
        self.set_caret(point);
        Ok(())
    }

    /// Caret in the parent, immediately after `key`
    pub fn select_after(&mut self, key: NodeKey) -> Result<()> {
        let point = self.gap_after(key)?;
        self.set_caret(point);
        Ok(())
    }

    fn gap_before(&self, key: NodeKey) -> Result<Point> {
        let parent = self.get(key)?.parent.ok_or(DocumentError::Detached(key))?;
        let index = self.index_within_parent(key).ok_or(DocumentError::Detached(key))?;
        Ok(Point::element(parent, index))
    }

    fn gap_after(&self, key: NodeKey) -> Result<Point> {
        let parent = self.get(key)?.parent.ok_or(DocumentError::Detached(key))?;
        let index = self.index_within_parent(key).ok_or(DocumentError::Detached(key))?;
        Ok(Point::element(parent, index + 1))
    }

    /// Caret at the end of the last paragraph, inside its trailing text node
    /// when there is one.
    pub fn select_document_end(&mut self) {
        let Some(&paragraph) = self.paragraphs().last() else {
            self.selection = None;
            return;
        };
        let point = match self.children(paragraph).last().copied() {
            Some(last) => match self.nodes.get(&last).map(|node| &node.kind) {
                Some(NodeKind::Text(text)) => Point::text(last, text.len()),
                _ => Point::element(paragraph, self.children(paragraph).len()),
            },
            None => Point::element(paragraph, 0),
        };
        self.set_caret(point);
    }

    /// Inserts typed text at the selection.
    ///
    /// Text next to an atomic node goes into a neighbouring text node, or a new
    /// one, never into the atomic node itself.
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(point) = self.collapse_text_range()? else {
            return Ok(());
        };

        match point {
            Point::Text { key, offset } => self.insert_into_text(key, offset, text),
            Point::Element { key: parent, offset } => {
                if !matches!(self.get(parent)?.kind, NodeKind::Paragraph) {
                    return Err(DocumentError::NotText(parent));
                }
                self.check_gap(parent, offset)?;
                let children = self.children(parent);
                let before = offset.checked_sub(1).and_then(|i| children.get(i)).copied();
                let after = children.get(offset).copied();

                if let Some(prev) = before.filter(|k| self.is_text_node(*k)) {
                    let len = self.text_len(prev)?;
                    self.insert_into_text(prev, len, text)
                } else if let Some(next) = after.filter(|k| self.is_text_node(*k)) {
                    self.insert_into_text(next, 0, text)
                } else {
                    let key = self.allocate(parent, NodeKind::text(text));
                    self.get_mut(parent)?.children.insert(offset, key);
                    self.set_caret(Point::text(key, text.chars().count()));
                    Ok(())
                }
            }
        }
    }

    fn insert_into_text(&mut self, key: NodeKey, offset: usize, text: &str) -> Result<()> {
        let current = self.text_content(key)?;
        let len = current.chars().count();
        if offset > len {
            return Err(DocumentError::OffsetOutOfRange { key, offset, len });
        }
        let at = byte_index(&current, offset);
        let mut updated = String::with_capacity(current.len() + text.len());
        updated.push_str(&current[..at]);
        updated.push_str(text);
        updated.push_str(&current[at..]);
        self.set_text_content(key, &updated)?;
        self.set_caret(Point::text(key, offset + text.chars().count()));
        Ok(())
    }

    /// Deletes a range that lies within one text node and returns the
    /// resulting caret. Ranges spanning nodes are left alone and yield `None`.
    fn collapse_text_range(&mut self) -> Result<Option<Point>> {
        let Some(selection) = self.selection else {
            return Ok(None);
        };
        if let Some(point) = selection.caret_point() {
            return Ok(Some(point));
        }
        match (selection.anchor, selection.focus) {
            (Point::Text { key: a, offset: start }, Point::Text { key: b, offset: end }) if a == b => {
                let (start, end) = (start.min(end), start.max(end));
                let current = self.text_content(a)?;
                let mut updated = String::with_capacity(current.len());
                updated.push_str(&current[..byte_index(&current, start)]);
                updated.push_str(&current[byte_index(&current, end)..]);
                self.set_text_content(a, &updated)?;
                self.set_caret(Point::text(a, start));
                Ok(Some(Point::text(a, start)))
            }
            _ => Ok(None),
        }
    }

    fn is_text_node(&self, key: NodeKey) -> bool {
        self.nodes.get(&key).is_some_and(Node::is_text)
    }

    /// Default backspace: one character, or an adjacent atomic node as a unit.
    /// Returns whether the document changed.
    pub fn delete_backward(&mut self) -> Result<bool> {
        let Some(selection) = self.selection else {
            return Ok(false);
        };
        if !selection.is_collapsed() {
            return Ok(self.collapse_text_range()?.is_some());
        }

        let mut point = selection.anchor;
        loop {
            let (container, index) = match point {
                Point::Text { key, offset } if offset > 0 => {
                    self.delete_char_before(key, offset)?;
                    return Ok(true);
                }
                Point::Text { key, .. } => {
                    let parent = self.get(key)?.parent.ok_or(DocumentError::Detached(key))?;
                    let index = self.index_within_parent(key).ok_or(DocumentError::Detached(key))?;
                    (parent, index)
                }
                Point::Element { key, offset } => {
                    self.check_gap(key, offset)?;
                    (key, offset)
                }
            };

            let Some(prev) = index
                .checked_sub(1)
                .and_then(|i| self.children(container).get(i))
                .copied()
            else {
                return Ok(false);
            };

            match &self.get(prev)?.kind {
                NodeKind::Entry(_) => {
                    self.remove(prev)?;
                    return Ok(true);
                }
                NodeKind::Text(text) if !text.is_empty() => {
                    let len = text.len();
                    self.delete_char_before(prev, len)?;
                    return Ok(true);
                }
                NodeKind::Text(_) => {
                    // Empty text node: drop it and look further back.
                    self.remove(prev)?;
                    point = match self.selection.and_then(|s| s.caret_point()) {
                        Some(p) => p,
                        None => return Ok(true),
                    };
                }
                NodeKind::Root | NodeKind::Paragraph => return Ok(false),
            }
        }
    }

    fn delete_char_before(&mut self, key: NodeKey, offset: usize) -> Result<()> {
        let current = self.text_content(key)?;
        let start = byte_index(&current, offset - 1);
        let end = byte_index(&current, offset);
        let mut updated = String::with_capacity(current.len());
        updated.push_str(&current[..start]);
        updated.push_str(&current[end..]);
        self.set_text_content(key, &updated)?;
        self.set_caret(Point::text(key, offset - 1));
        Ok(())
    }

    /// Moves the caret one position left, stepping over entries as a unit.
    pub fn move_caret_left(&mut self) -> Result<()> {
        let Some(selection) = self.selection else {
            return Ok(());
        };
        let point = match selection.focus {
            Point::Text { key, offset } if offset > 0 => Point::text(key, offset - 1),
            Point::Text { key, .. } => match self.previous_sibling(key) {
                Some(prev) => self.step_left_into(prev)?,
                None => Point::text(key, 0),
            },
            Point::Element { key, offset } => {
                self.check_gap(key, offset)?;
                match offset.checked_sub(1).and_then(|i| self.children(key).get(i)).copied() {
                    Some(prev) => self.step_left_into(prev)?,
                    None => Point::element(key, offset),
                }
            }
        };
        self.set_caret(point);
        Ok(())
    }

    fn step_left_into(&self, prev: NodeKey) -> Result<Point> {
        match &self.get(prev)?.kind {
            NodeKind::Text(text) => Ok(Point::text(prev, text.len().saturating_sub(1))),
            _ => self.gap_before(prev),
        }
    }

    /// Moves the caret one position right, stepping over entries as a unit.
    pub fn move_caret_right(&mut self) -> Result<()> {
        let Some(selection) = self.selection else {
            return Ok(());
        };
        let point = match selection.focus {
            Point::Text { key, offset } => {
                let len = self.text_len(key)?;
                if offset < len {
                    Point::text(key, offset + 1)
                } else {
                    match self.next_sibling(key) {
                        Some(next) => self.step_right_into(next)?,
                        None => Point::text(key, len),
                    }
                }
            }
            Point::Element { key, offset } => {
                self.check_gap(key, offset)?;
                match self.children(key).get(offset).copied() {
                    Some(next) => self.step_right_into(next)?,
                    None => Point::element(key, offset),
                }
            }
        };
        self.set_caret(point);
        Ok(())
    }

    fn step_right_into(&self, next: NodeKey) -> Result<Point> {
        match &self.get(next)?.kind {
            NodeKind::Text(text) => Ok(Point::text(next, text.len().min(1))),
            _ => self.gap_after(next),
        }
    }

    /// Deterministic, key-free rendering of the tree and selection
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_node(self.root, 0, &mut out);
        match self.selection {
            None => out.push_str("selection: none"),
            Some(selection) if selection.is_collapsed() => {
                let _ = write!(out, "caret: {}", self.describe_point(selection.anchor));
            }
            Some(selection) => {
                let _ = write!(
                    out,
                    "selection: {} .. {}",
                    self.describe_point(selection.anchor),
                    self.describe_point(selection.focus)
                );
            }
        }
        out
    }

    fn outline_node(&self, key: NodeKey, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&key) else {
            return;
        };
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), self.describe_node(node));
        for child in &node.children {
            self.outline_node(*child, depth + 1, out);
        }
    }

    fn describe_node(&self, node: &Node) -> String {
        match &node.kind {
            NodeKind::Root => "root".to_string(),
            NodeKind::Paragraph => "paragraph".to_string(),
            NodeKind::Text(text) => format!("text {:?}", text.text()),
            NodeKind::Entry(entry) => format!("entry {:?}", entry.text()),
        }
    }

    fn describe_point(&self, point: Point) -> String {
        match point {
            Point::Text { key, offset } => match self.nodes.get(&key) {
                Some(node) => format!("{} @ {}", self.describe_node(node), offset),
                None => format!("missing node @ {offset}"),
            },
            Point::Element { key, offset } => {
                let children = self.children(key);
                let neighbour = |i: usize| children.get(i).and_then(|k| self.nodes.get(k));
                if let Some(prev) = offset.checked_sub(1).and_then(neighbour) {
                    format!("after {}", self.describe_node(prev))
                } else if let Some(next) = neighbour(offset) {
                    format!("before {}", self.describe_node(next))
                } else {
                    match self.nodes.get(&key) {
                        Some(node) => format!("{} start", self.describe_node(node)),
                        None => format!("missing node @ {offset}"),
                    }
                }
            }
        }
    }
}

/// Paragraphs take inline children, the root takes paragraphs.
fn check_placement(parent: &Node, kind: &NodeKind) -> Result<()> {
    let allowed = match parent.kind {
        NodeKind::Root => matches!(kind, NodeKind::Paragraph),
        NodeKind::Paragraph => kind.is_inline(),
        NodeKind::Text(_) | NodeKind::Entry(_) => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(DocumentError::InvalidParent {
            parent: parent.key,
            kind: kind.type_name(),
        })
    }
}

/// Byte index of the `offset`-th scalar value, clamped to the string end
pub(crate) fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
