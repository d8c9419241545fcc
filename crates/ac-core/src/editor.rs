// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! A document with the autocomplete plugin and deletion coordinator attached
//!
//! Each key is handled in one synchronous turn: listeners by priority, then
//! the host's default editing action, then the autocomplete rescan against the
//! document as it now stands.

use std::cmp::Reverse;

use ac_config::AutocompleteConfig;
use ac_document::{export_json, import_json, CodecError, Document, DocumentError, NodeRegistry};
use tracing::{debug, trace};

use crate::deletion::DeletionCoordinator;
use crate::dropdown::SuggestionsDropdown;
use crate::keys::{Key, KeyEvent};
use crate::listener::KeyListener;
use crate::plugin::AutocompletePlugin;
use crate::state::AutocompleteState;

/// Which registered listener claimed a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerId {
    Autocomplete,
    EntryDeletion,
}

/// What happened to one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDispatch {
    pub handled_by: Option<ListenerId>,
    /// The host's own editing action ran
    pub default_applied: bool,
    /// The autocomplete state was re-derived afterwards
    pub rescanned: bool,
}

#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    registry: NodeRegistry,
    autocomplete: AutocompletePlugin,
    deletion: DeletionCoordinator,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&AutocompleteConfig::default())
    }
}

impl Editor {
    /// An empty document; registers the entry node type.
    pub fn new(config: &AutocompleteConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    pub fn with_document(document: Document, config: &AutocompleteConfig) -> Self {
        Self {
            document,
            registry: NodeRegistry::with_entry_nodes(),
            autocomplete: AutocompletePlugin::new(config),
            deletion: DeletionCoordinator::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access for hosts that edit outside key dispatch; call
    /// [`Editor::rescan`] afterwards to refresh the suggestions.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn state(&self) -> &AutocompleteState {
        self.autocomplete.state()
    }

    pub fn autocomplete(&self) -> &AutocompletePlugin {
        &self.autocomplete
    }

    pub fn dropdown(&self) -> Option<SuggestionsDropdown<'_>> {
        self.autocomplete.dropdown()
    }

    pub fn rescan(&mut self) {
        self.autocomplete.rescan(&self.document);
    }

    pub fn dispatch_key(&mut self, key: Key) -> KeyDispatch {
        let mut event = KeyEvent::new(key);
        let mut listeners: [(ListenerId, &mut dyn KeyListener<Document>); 2] = [
            (ListenerId::Autocomplete, &mut self.autocomplete),
            (ListenerId::EntryDeletion, &mut self.deletion),
        ];
        listeners.sort_by_key(|(_, listener)| Reverse(listener.priority()));

        let mut handled_by = None;
        for (id, listener) in listeners.iter_mut() {
            if !listener.accepts(&event.key) {
                continue;
            }
            if listener.on_key(&mut event, &mut self.document).is_handled() {
                handled_by = Some(*id);
                break;
            }
        }

        let default_applied =
            handled_by.is_none() && !event.is_default_prevented() && self.apply_default(key);

        // Keys consumed by navigation must not retrigger a scan in the same turn.
        let rescanned = handled_by != Some(ListenerId::Autocomplete);
        if rescanned {
            self.autocomplete.rescan(&self.document);
        }

        trace!(%key, ?handled_by, default_applied, "key dispatched");
        KeyDispatch {
            handled_by,
            default_applied,
            rescanned,
        }
    }

    /// Types each character as its own key press; `\n` and `\t` become Enter
    /// and Tab.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let key = match c {
                '\n' => Key::Enter,
                '\t' => Key::Tab,
                c => Key::Char(c),
            };
            self.dispatch_key(key);
        }
    }

    /// Pointer selection of a dropdown row
    pub fn click_suggestion(&mut self, index: usize) -> bool {
        self.autocomplete.select_suggestion(index, &mut self.document)
    }

    /// Pointer hover over a dropdown row
    pub fn hover_suggestion(&mut self, index: usize) -> bool {
        self.autocomplete.highlight(index)
    }

    pub fn export_json(&self) -> Result<String, CodecError> {
        export_json(&self.document)
    }

    /// Replaces the document; any open match is closed.
    pub fn import_json(&mut self, json: &str) -> Result<(), CodecError> {
        self.document = import_json(json, &self.registry)?;
        self.autocomplete.close();
        Ok(())
    }

    fn apply_default(&mut self, key: Key) -> bool {
        let result = match key {
            Key::Char(c) => self.document.insert_text(c.encode_utf8(&mut [0; 4])).map(|_| true),
            Key::Enter => self.document.insert_text("\n").map(|_| true),
            Key::Tab => self.document.insert_text("\t").map(|_| true),
            Key::Backspace => self.document.delete_backward(),
            Key::ArrowLeft => self.document.move_caret_left().map(|_| true),
            Key::ArrowRight => self.document.move_caret_right().map(|_| true),
            Key::ArrowUp | Key::ArrowDown | Key::Escape => Ok(false),
        };
        result.unwrap_or_else(|err: DocumentError| {
            debug!(%key, error = %err, "default action failed; document unchanged");
            false
        })
    }
}
