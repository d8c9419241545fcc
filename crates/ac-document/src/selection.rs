// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Caret and range positions

use crate::node::NodeKey;

/// A position in the document
///
/// Text points count Unicode scalar values into a text node. Element points
/// address the gap before child `offset` of an element, which is how a caret
/// sits next to an atomic node without entering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Point {
    Text { key: NodeKey, offset: usize },
    Element { key: NodeKey, offset: usize },
}

impl Point {
    pub fn text(key: NodeKey, offset: usize) -> Self {
        Point::Text { key, offset }
    }

    pub fn element(key: NodeKey, offset: usize) -> Self {
        Point::Element { key, offset }
    }

    /// Node that contains the point
    pub fn key(&self) -> NodeKey {
        match *self {
            Point::Text { key, .. } | Point::Element { key, .. } => key,
        }
    }

    pub fn offset(&self) -> usize {
        match *self {
            Point::Text { offset, .. } | Point::Element { offset, .. } => offset,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Point::Text { .. })
    }
}

/// Anchor/focus selection; collapsed when both ends coincide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn range(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The insertion point, if this selection is a caret
    pub fn caret_point(&self) -> Option<Point> {
        self.is_collapsed().then_some(self.anchor)
    }

    /// `(key, offset)` of a collapsed caret inside a text node
    pub fn text_caret(&self) -> Option<(NodeKey, usize)> {
        match self.caret_point()? {
            Point::Text { key, offset } => Some((key, offset)),
            Point::Element { .. } => None,
        }
    }
}
