// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Turns an accepted suggestion into an entry node
//!
//! ```text
//! before:  text "say <>wo| and more"
//! after:   text "say "  entry "world"  text "| and more"
//! ```

use ac_document::{update, DocumentHost, Node, NodeKey, NodeKind, Point};
use tracing::debug;

use crate::error::ReplacementError;
use crate::scanner::scan_with_trigger;

/// Nodes touched by a successful replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    /// The text node that held the trigger, now holding only what preceded it
    pub host_node: NodeKey,
    pub entry: NodeKey,
    /// Text that followed the caret, moved into its own node
    pub trailing: Option<NodeKey>,
}

/// Replaces the trigger and match string before the caret with an entry
/// holding `candidate`.
///
/// The trigger bounds are recomputed from the current node content. The
/// mutation runs as one transaction: on error the document is unchanged.
pub fn replace_with_entry<H>(
    host: &mut H,
    trigger: &str,
    candidate: &str,
) -> Result<Replacement, ReplacementError>
where
    H: DocumentHost + ?Sized,
{
    let selection = host.selection().ok_or(ReplacementError::NoSelection)?;
    let caret = selection.caret_point().ok_or(ReplacementError::NotCollapsed)?;
    let Point::Text { key, offset } = caret else {
        return Err(ReplacementError::NotInText);
    };
    if !host.node(key).is_some_and(Node::is_text) {
        return Err(ReplacementError::NotInText);
    }

    let text = host.text_content(key)?;
    let context =
        scan_with_trigger(&text, offset, trigger).ok_or(ReplacementError::TriggerNotFound)?;
    let before: String = text.chars().take(context.trigger_start).collect();
    let after: String = text.chars().skip(context.trigger_end).collect();

    let replacement = update(host, |host| {
        host.set_text_content(key, &before)?;
        let entry = host.insert_after(key, NodeKind::entry(candidate))?;

        let trailing = if after.is_empty() {
            host.select_after(entry)?;
            None
        } else {
            let trailing = host.insert_after(entry, NodeKind::text(after.as_str()))?;
            host.select_text(trailing, 0)?;
            Some(trailing)
        };

        Ok::<_, ReplacementError>(Replacement {
            host_node: key,
            entry,
            trailing,
        })
    })?;

    debug!(
        candidate,
        entry = %replacement.entry,
        trailing = replacement.trailing.is_some(),
        "inserted entry"
    );
    Ok(replacement)
}
