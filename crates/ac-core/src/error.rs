// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the autocomplete core
//!
//! None of these cross the plugin boundary: the plugin logs them and treats
//! the attempted operation as a no-op.

use ac_document::DocumentError;

/// Why a suggestion could not be turned into an entry node
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplacementError {
    #[error("there is no selection")]
    NoSelection,

    #[error("the selection is a range, not a caret")]
    NotCollapsed,

    #[error("the caret is not inside a text node")]
    NotInText,

    #[error("no trigger sequence before the caret")]
    TriggerNotFound,

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// A key name that does not map to any [`crate::Key`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name '{0}'")]
pub struct UnknownKey(pub String);
