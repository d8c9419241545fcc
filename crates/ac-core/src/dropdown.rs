// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! What a rendering layer needs to draw the suggestion list

use crate::state::{ActiveMatch, AutocompleteState};

/// Borrowed view of an open suggestion list
///
/// Only exists while a match is active and has at least one candidate.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionsDropdown<'a> {
    active: &'a ActiveMatch,
}

/// One row of the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownItem<'a> {
    pub index: usize,
    pub text: &'a str,
    pub highlighted: bool,
}

impl<'a> SuggestionsDropdown<'a> {
    pub fn from_state(state: &'a AutocompleteState) -> Option<Self> {
        state
            .active()
            .filter(|active| !active.candidates().is_empty())
            .map(|active| Self { active })
    }

    pub fn suggestions(&self) -> &'a [String] {
        self.active.candidates()
    }

    pub fn highlighted_index(&self) -> usize {
        self.active.highlighted_index()
    }

    pub fn match_string(&self) -> &'a str {
        self.active.match_string()
    }

    pub fn len(&self) -> usize {
        self.active.candidates().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> impl Iterator<Item = DropdownItem<'a>> + 'a {
        let highlighted = self.active.highlighted_index();
        self.active
            .candidates()
            .iter()
            .enumerate()
            .map(move |(index, text)| DropdownItem {
                index,
                text,
                highlighted: index == highlighted,
            })
    }
}
