// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Inline autocomplete for node-tree documents
//!
//! Typing the trigger (`<>` by default) followed by characters opens a list of
//! matching suggestions. Accepting one replaces the typed span with an atomic
//! [`ac_document::EntryNode`]; backspace next to an entry removes it whole.
//!
//! The pieces, leaves first:
//! - [`scanner`] recovers the match before the caret,
//! - [`filter`] ranks corpus entries for it,
//! - [`plugin`] holds the state machine and reacts to keys,
//! - [`replacement`] performs the tree mutation on acceptance,
//! - [`deletion`] removes entries as units on backspace,
//! - [`editor`] wires them to a [`ac_document::Document`].

pub mod deletion;
pub mod dropdown;
pub mod editor;
pub mod error;
pub mod filter;
pub mod keys;
pub mod listener;
pub mod plugin;
pub mod replacement;
pub mod scanner;
pub mod state;

pub use deletion::DeletionCoordinator;
pub use dropdown::{DropdownItem, SuggestionsDropdown};
pub use editor::{Editor, KeyDispatch, ListenerId};
pub use error::{ReplacementError, UnknownKey};
pub use filter::{filter, filter_with_limit, MAX_SUGGESTIONS};
pub use keys::{Key, KeyEvent};
pub use listener::{CommandPriority, HookOutcome, KeyListener};
pub use plugin::AutocompletePlugin;
pub use replacement::{replace_with_entry, Replacement};
pub use scanner::{scan, scan_host, scan_with_trigger, MatchContext, TRIGGER};
pub use state::{ActiveMatch, AutocompleteState};
