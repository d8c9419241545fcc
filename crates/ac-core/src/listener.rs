// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Command hooks through which plugins see key-down events

use ac_document::DocumentHost;

use crate::keys::{Key, KeyEvent};

/// Result of offering an event to a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Stop propagation to lower-priority listeners
    Handled,
    NotHandled,
}

impl HookOutcome {
    pub fn is_handled(self) -> bool {
        self == HookOutcome::Handled
    }
}

/// Listeners run from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandPriority {
    Low,
    Normal,
    High,
}

pub trait KeyListener<H: DocumentHost + ?Sized> {
    fn priority(&self) -> CommandPriority;

    /// Keys this listener wants to see; all of them by default
    fn accepts(&self, _key: &Key) -> bool {
        true
    }

    fn on_key(&mut self, event: &mut KeyEvent, host: &mut H) -> HookOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let mut priorities = vec![CommandPriority::Low, CommandPriority::High, CommandPriority::Normal];
        priorities.sort_by(|a, b| b.cmp(a));
        assert_eq!(
            priorities,
            vec![CommandPriority::High, CommandPriority::Normal, CommandPriority::Low]
        );
    }
}
