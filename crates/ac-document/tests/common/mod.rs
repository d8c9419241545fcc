// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

#![allow(dead_code)]

use ac_document::{Document, NodeKey};

/// One paragraph built from `(is_entry, text)` parts
pub fn paragraph_of(parts: &[(bool, &str)]) -> (Document, Vec<NodeKey>) {
    let mut doc = Document::empty();
    let paragraph = doc.append_paragraph();
    let keys = parts
        .iter()
        .map(|(is_entry, text)| {
            if *is_entry {
                doc.append_entry(paragraph, text).unwrap()
            } else {
                doc.append_text(paragraph, text).unwrap()
            }
        })
        .collect();
    (doc, keys)
}
