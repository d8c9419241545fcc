// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Recovers the active match from the text around the caret
//!
//! Only the text node under the caret is inspected, and only the part before
//! the caret. All offsets are counted in Unicode scalar values.

use ac_document::{DocumentHost, NodeKey, Node};
use tracing::trace;

pub use ac_config::DEFAULT_TRIGGER as TRIGGER;

/// Match found before the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    /// Text between the trigger and the caret, possibly empty
    pub match_string: String,
    /// Offset of the first trigger character
    pub trigger_start: usize,
    /// Offset just past the match string, i.e. the caret
    pub trigger_end: usize,
}

impl MatchContext {
    /// Offsets covered by the trigger and the match string
    pub fn span(&self) -> std::ops::Range<usize> {
        self.trigger_start..self.trigger_end
    }
}

/// Scans for the default `<>` trigger.
pub fn scan(text: &str, cursor_offset: usize) -> Option<MatchContext> {
    scan_with_trigger(text, cursor_offset, TRIGGER)
}

/// Finds the rightmost `trigger` before `cursor_offset`.
///
/// Returns `None` when there is no trigger or when the match string would
/// span a line break. Offsets past the end of `text` are clamped.
pub fn scan_with_trigger(text: &str, cursor_offset: usize, trigger: &str) -> Option<MatchContext> {
    if trigger.is_empty() {
        return None;
    }
    let cursor_byte = text
        .char_indices()
        .nth(cursor_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let before = &text[..cursor_byte];

    let trigger_byte = before.rfind(trigger)?;
    let match_string = &before[trigger_byte + trigger.len()..];
    if match_string.contains(['\n', '\r']) {
        trace!("match string spans a line break");
        return None;
    }

    let trigger_start = before[..trigger_byte].chars().count();
    let trigger_end = before.chars().count();
    Some(MatchContext {
        match_string: match_string.to_string(),
        trigger_start,
        trigger_end,
    })
}

/// Scans the text node holding a collapsed caret.
///
/// Any other selection shape yields `None`.
pub fn scan_host<H>(host: &H, trigger: &str) -> Option<(NodeKey, MatchContext)>
where
    H: DocumentHost + ?Sized,
{
    let (key, offset) = host.selection()?.text_caret()?;
    if !host.node(key).is_some_and(Node::is_text) {
        return None;
    }
    let text = host.text_content(key).ok()?;
    let context = scan_with_trigger(&text, offset, trigger)?;
    trace!(node = %key, match_string = %context.match_string, "trigger match");
    Some((key, context))
}
