// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

#![allow(dead_code)]

use ac_config::AutocompleteConfig;
use ac_core::Editor;
use ac_document::{Document, NodeKey};

pub fn editor() -> Editor {
    Editor::default()
}

/// Editor whose corpus is exactly `words`
pub fn editor_with_corpus(words: &[&str]) -> Editor {
    let config = AutocompleteConfig {
        suggestions: words.iter().map(|w| w.to_string()).collect(),
        ..AutocompleteConfig::default()
    };
    Editor::new(&config)
}

/// Editor over one paragraph built from `(is_entry, text)` parts
pub fn editor_with_parts(parts: &[(bool, &str)]) -> (Editor, Vec<NodeKey>) {
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
    (Editor::with_document(doc, &AutocompleteConfig::default()), keys)
}

pub fn candidates(editor: &Editor) -> Vec<String> {
    editor
        .dropdown()
        .map(|dropdown| dropdown.suggestions().to_vec())
        .unwrap_or_default()
}
