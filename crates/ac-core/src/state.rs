// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Autocomplete state: inactive, or an active match with ranked candidates

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AutocompleteState {
    #[default]
    Inactive,
    Active(ActiveMatch),
}

impl AutocompleteState {
    pub fn is_active(&self) -> bool {
        matches!(self, AutocompleteState::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveMatch> {
        match self {
            AutocompleteState::Active(active) => Some(active),
            AutocompleteState::Inactive => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveMatch> {
        match self {
            AutocompleteState::Active(active) => Some(active),
            AutocompleteState::Inactive => None,
        }
    }

    /// Active with at least one candidate: the only state that intercepts keys
    pub fn has_candidates(&self) -> bool {
        self.active().is_some_and(|active| !active.candidates.is_empty())
    }
}

/// The match under the caret and the candidates offered for it
///
/// `highlighted_index` is always a valid index when there are candidates and
/// 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMatch {
    match_string: String,
    candidates: Vec<String>,
    highlighted_index: usize,
}

impl ActiveMatch {
    /// Starts with the first candidate highlighted.
    pub fn new(match_string: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            match_string: match_string.into(),
            candidates,
            highlighted_index: 0,
        }
    }

    pub fn match_string(&self) -> &str {
        &self.match_string
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted_index
    }

    pub fn highlighted_candidate(&self) -> Option<&str> {
        self.candidate(self.highlighted_index)
    }

    pub fn candidate(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    /// Moves the highlight down, wrapping to the first candidate.
    pub fn highlight_next(&mut self) {
        let len = self.candidates.len();
        if len > 0 {
            self.highlighted_index = (self.highlighted_index + 1) % len;
        }
    }

    /// Moves the highlight up, wrapping to the last candidate.
    pub fn highlight_previous(&mut self) {
        let len = self.candidates.len();
        if len > 0 {
            self.highlighted_index = (self.highlighted_index + len - 1) % len;
        }
    }

    /// Out-of-range indices are ignored.
    pub fn set_highlight(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.highlighted_index = index;
            true
        } else {
            false
        }
    }
}
