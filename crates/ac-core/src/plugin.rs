// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The autocomplete state machine
//!
//! Two stimuli drive it. Navigation keys are evaluated against the state as it
//! was before the keystroke, and only while a match with candidates is open.
//! After the host has applied a keystroke that navigation did not consume,
//! [`AutocompletePlugin::rescan`] re-derives the state from the document.

use ac_config::AutocompleteConfig;
use ac_document::DocumentHost;
use tracing::debug;

use crate::dropdown::SuggestionsDropdown;
use crate::filter::filter_with_limit;
use crate::keys::{Key, KeyEvent};
use crate::listener::{CommandPriority, HookOutcome, KeyListener};
use crate::replacement::replace_with_entry;
use crate::scanner::scan_host;
use crate::state::{ActiveMatch, AutocompleteState};

#[derive(Debug, Clone)]
pub struct AutocompletePlugin {
    state: AutocompleteState,
    corpus: Vec<String>,
    trigger: String,
    max_suggestions: usize,
}

impl Default for AutocompletePlugin {
    fn default() -> Self {
        Self::new(&AutocompleteConfig::default())
    }
}

impl AutocompletePlugin {
    pub fn new(config: &AutocompleteConfig) -> Self {
        Self {
            state: AutocompleteState::Inactive,
            corpus: config.suggestions.clone(),
            trigger: config.trigger.clone(),
            max_suggestions: config.max_suggestions,
        }
    }

    /// Default trigger and limit with a caller-supplied corpus
    pub fn with_corpus(corpus: Vec<String>) -> Self {
        Self {
            corpus,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Pre-keystroke navigation. Returns `Handled` for every key it consumes.
    pub fn handle_key_down<H>(&mut self, event: &mut KeyEvent, host: &mut H) -> HookOutcome
    where
        H: DocumentHost + ?Sized,
    {
        if !event.key.is_navigation() {
            return HookOutcome::NotHandled;
        }
        let Some(active) = self.state.active_mut().filter(|a| !a.candidates().is_empty()) else {
            return HookOutcome::NotHandled;
        };

        match event.key {
            Key::ArrowDown => {
                active.highlight_next();
                debug!(index = active.highlighted_index(), "highlight moved down");
            }
            Key::ArrowUp => {
                active.highlight_previous();
                debug!(index = active.highlighted_index(), "highlight moved up");
            }
            Key::Enter | Key::Tab => {
                let index = active.highlighted_index();
                self.select_suggestion(index, host);
            }
            Key::Escape => {
                debug!("match dismissed");
                self.close();
            }
            _ => return HookOutcome::NotHandled,
        }

        event.prevent_default();
        HookOutcome::Handled
    }

    /// Post-keystroke step: re-derive the state from the current document.
    ///
    /// A new match always starts with the first candidate highlighted.
    pub fn rescan<H>(&mut self, host: &H)
    where
        H: DocumentHost + ?Sized,
    {
        match scan_host(host, &self.trigger) {
            Some((_, context)) => {
                let candidates =
                    filter_with_limit(&context.match_string, &self.corpus, self.max_suggestions);
                debug!(
                    match_string = %context.match_string,
                    candidates = candidates.len(),
                    "match active"
                );
                self.state = AutocompleteState::Active(ActiveMatch::new(
                    context.match_string,
                    candidates,
                ));
            }
            None => {
                if self.state.is_active() {
                    debug!("match closed");
                }
                self.state = AutocompleteState::Inactive;
            }
        }
    }

    /// Accepts the candidate at `index`.
    ///
    /// The state resets to inactive whether or not anything was inserted; an
    /// index with no candidate, or a document that no longer holds the match,
    /// makes this a no-op. Returns whether an entry was inserted.
    pub fn select_suggestion<H>(&mut self, index: usize, host: &mut H) -> bool
    where
        H: DocumentHost + ?Sized,
    {
        let candidate = self
            .state
            .active()
            .and_then(|active| active.candidate(index))
            .map(str::to_string);
        self.state = AutocompleteState::Inactive;

        let Some(candidate) = candidate else {
            debug!(index, "no candidate at index; nothing inserted");
            return false;
        };

        match replace_with_entry(host, &self.trigger, &candidate) {
            Ok(_) => true,
            Err(err) => {
                debug!(
                    error = %err,
                    candidate = %candidate,
                    "suggestion replacement aborted; document unchanged"
                );
                false
            }
        }
    }

    /// Pointer hover. Out-of-range indices are ignored.
    pub fn highlight(&mut self, index: usize) -> bool {
        self.state
            .active_mut()
            .is_some_and(|active| active.set_highlight(index))
    }

    pub fn dropdown(&self) -> Option<SuggestionsDropdown<'_>> {
        SuggestionsDropdown::from_state(&self.state)
    }

    pub fn close(&mut self) {
        self.state = AutocompleteState::Inactive;
    }
}

impl<H: DocumentHost + ?Sized> KeyListener<H> for AutocompletePlugin {
    fn priority(&self) -> CommandPriority {
        CommandPriority::Low
    }

    fn on_key(&mut self, event: &mut KeyEvent, host: &mut H) -> HookOutcome {
        self.handle_key_down(event, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_document::Document;

    fn corpus(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn active_plugin(text: &str, words: &[&str]) -> (AutocompletePlugin, Document) {
        let doc = Document::from_text(text);
        let mut plugin = AutocompletePlugin::with_corpus(corpus(words));
        plugin.rescan(&doc);
        (plugin, doc)
    }

    fn press(plugin: &mut AutocompletePlugin, doc: &mut Document, key: Key) -> (HookOutcome, KeyEvent) {
        let mut event = KeyEvent::new(key);
        let outcome = plugin.handle_key_down(&mut event, doc);
        (outcome, event)
    }

    #[test]
    fn test_rescan_activates_with_first_highlighted() {
        let (plugin, _) = active_plugin("say <>wo", &["world", "work", "hello"]);
        let active = plugin.state().active().unwrap();
        assert_eq!(active.match_string(), "wo");
        assert_eq!(active.candidates(), &["world", "work"]);
        assert_eq!(active.highlighted_index(), 0);
    }

    #[test]
    fn test_rescan_resets_highlight_on_new_match() {
        let (mut plugin, mut doc) = active_plugin("<>w", &["world", "work", "wonder"]);
        press(&mut plugin, &mut doc, Key::ArrowDown);
        assert_eq!(plugin.state().active().unwrap().highlighted_index(), 1);

        doc.insert_text("o").unwrap();
        plugin.rescan(&doc);
        assert_eq!(plugin.state().active().unwrap().highlighted_index(), 0);
    }

    #[test]
    fn test_rescan_without_match_deactivates() {
        let (mut plugin, mut doc) = active_plugin("<>w", &["world"]);
        let text = doc.children(doc.first_paragraph().unwrap())[0];
        doc.select_text(text, 0).unwrap();
        plugin.rescan(&doc);
        assert_eq!(plugin.state(), &AutocompleteState::Inactive);
    }

    #[test]
    fn test_navigation_consumes_and_wraps() {
        let (mut plugin, mut doc) = active_plugin("<>", &["a", "b", "c"]);

        let (outcome, event) = press(&mut plugin, &mut doc, Key::ArrowUp);
        assert_eq!(outcome, HookOutcome::Handled);
        assert!(event.is_default_prevented());
        assert_eq!(plugin.state().active().unwrap().highlighted_index(), 2);

        press(&mut plugin, &mut doc, Key::ArrowDown);
        assert_eq!(plugin.state().active().unwrap().highlighted_index(), 0);
    }

    #[test]
    fn test_escape_closes_without_editing() {
        let (mut plugin, mut doc) = active_plugin("<>w", &["world"]);
        let before = doc.clone();

        let (outcome, _) = press(&mut plugin, &mut doc, Key::Escape);

        assert_eq!(outcome, HookOutcome::Handled);
        assert_eq!(plugin.state(), &AutocompleteState::Inactive);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_tab_accepts_highlighted_candidate() {
        let (mut plugin, mut doc) = active_plugin("<>w", &["world", "work"]);
        press(&mut plugin, &mut doc, Key::ArrowDown);

        let (outcome, _) = press(&mut plugin, &mut doc, Key::Tab);

        assert_eq!(outcome, HookOutcome::Handled);
        assert_eq!(doc.text(), "work");
        assert_eq!(plugin.state(), &AutocompleteState::Inactive);
    }

    #[test]
    fn test_other_keys_fall_through() {
        let (mut plugin, mut doc) = active_plugin("<>w", &["world"]);
        for key in [Key::Char('x'), Key::Backspace, Key::ArrowLeft] {
            let (outcome, event) = press(&mut plugin, &mut doc, key);
            assert_eq!(outcome, HookOutcome::NotHandled);
            assert!(!event.is_default_prevented());
        }
        assert!(plugin.state().is_active());
    }

    #[test]
    fn test_inactive_or_empty_match_intercepts_nothing() {
        let mut doc = Document::from_text("plain");
        let mut plugin = AutocompletePlugin::with_corpus(corpus(&["world"]));
        plugin.rescan(&doc);
        assert_eq!(press(&mut plugin, &mut doc, Key::Enter).0, HookOutcome::NotHandled);

        let (mut plugin, mut doc) = active_plugin("<>zz", &["world"]);
        assert!(plugin.state().is_active());
        assert_eq!(press(&mut plugin, &mut doc, Key::Enter).0, HookOutcome::NotHandled);
    }

    #[test]
    fn test_out_of_range_selection_resets_state() {
        let (mut plugin, mut doc) = active_plugin("<>w", &["world"]);
        let before = doc.clone();

        assert!(!plugin.select_suggestion(5, &mut doc));
        assert_eq!(plugin.state(), &AutocompleteState::Inactive);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_hover_highlight() {
        let (mut plugin, _) = active_plugin("<>", &["a", "b"]);
        assert!(plugin.highlight(1));
        assert!(!plugin.highlight(2));
        assert_eq!(plugin.dropdown().unwrap().highlighted_index(), 1);
    }

    #[test]
    fn test_config_limits_candidates() {
        let config = AutocompleteConfig {
            trigger: "::".into(),
            max_suggestions: 2,
            ..AutocompleteConfig::default()
        };
        let doc = Document::from_text("::w");
        let mut plugin = AutocompletePlugin::new(&config);
        plugin.rescan(&doc);
        assert_eq!(plugin.state().active().unwrap().candidates(), &["world", "work"]);
    }
}
