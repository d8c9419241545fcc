// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Backspace handling that removes entry nodes as single units

use ac_document::{update, DocumentError, DocumentHost, NodeKey, Point, Selection};
use tracing::debug;

use crate::keys::{Key, KeyEvent};
use crate::listener::{CommandPriority, HookOutcome, KeyListener};

/// Stateless high-priority backspace hook
///
/// Runs before the autocomplete listener and never touches its state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletionCoordinator;

impl DeletionCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Removes an entry adjacent to (or, defensively, containing) the caret.
    ///
    /// Ranges and carets with no entry behind them are left to the host.
    pub fn handle_backspace<H>(&self, event: &mut KeyEvent, host: &mut H) -> HookOutcome
    where
        H: DocumentHost + ?Sized,
    {
        let Some(caret) = host.selection().and_then(|s| s.caret_point()) else {
            return HookOutcome::NotHandled;
        };

        match delete_entry_at(caret, host) {
            Ok(true) => {
                event.prevent_default();
                HookOutcome::Handled
            }
            Ok(false) => HookOutcome::NotHandled,
            Err(err) => {
                debug!(error = %err, "entry deletion aborted; document unchanged");
                HookOutcome::NotHandled
            }
        }
    }
}

impl<H: DocumentHost + ?Sized> KeyListener<H> for DeletionCoordinator {
    fn priority(&self) -> CommandPriority {
        CommandPriority::High
    }

    fn accepts(&self, key: &Key) -> bool {
        *key == Key::Backspace
    }

    fn on_key(&mut self, event: &mut KeyEvent, host: &mut H) -> HookOutcome {
        self.handle_backspace(event, host)
    }
}

fn delete_entry_at<H>(caret: Point, host: &mut H) -> Result<bool, DocumentError>
where
    H: DocumentHost + ?Sized,
{
    if let Some(entry) = entry_before(caret, host) {
        // Removal repairs the caret: a text caret keeps its node and offset,
        // an element caret shifts back over the gap.
        update(host, |host| host.remove(entry))?;
        debug!(entry = %entry, "removed entry before caret");
        return Ok(true);
    }

    let key = caret.key();
    if host.is_entry(key) {
        update(host, |host| {
            let parent = host.parent(key).ok_or(DocumentError::Detached(key))?;
            let index = host
                .index_within_parent(key)
                .ok_or(DocumentError::Detached(key))?;
            host.remove(key)?;

            // Neighbours as they stand once the entry is gone
            let next = host.child_at(parent, index);
            let prev = index.checked_sub(1).and_then(|i| host.child_at(parent, i));
            match (next, prev) {
                (Some(next), _) => host.select_start(next),
                (None, Some(prev)) => host.select_end(prev),
                (None, None) => {
                    host.set_selection(Some(Selection::caret(Point::element(parent, 0))));
                    Ok(())
                }
            }
        })?;
        debug!(entry = %key, "removed entry containing caret");
        return Ok(true);
    }

    Ok(false)
}

/// Entry immediately before a collapsed caret
fn entry_before<H>(caret: Point, host: &H) -> Option<NodeKey>
where
    H: DocumentHost + ?Sized,
{
    let candidate = match caret {
        Point::Text { key, offset: 0 } => host.previous_sibling(key),
        Point::Element { key, offset } => offset.checked_sub(1).and_then(|i| host.child_at(key, i)),
        Point::Text { .. } => None,
    }?;
    host.is_entry(candidate).then_some(candidate)
}
