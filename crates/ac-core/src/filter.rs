// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Case-insensitive prefix filtering of the suggestion corpus

use tracing::trace;

pub use ac_config::DEFAULT_MAX_SUGGESTIONS as MAX_SUGGESTIONS;

/// Candidates for `match_string`, at most [`MAX_SUGGESTIONS`] of them.
pub fn filter<S: AsRef<str>>(match_string: &str, corpus: &[S]) -> Vec<String> {
    filter_with_limit(match_string, corpus, MAX_SUGGESTIONS)
}

/// Corpus entries whose lowercase form starts with the lowercase
/// `match_string`, in corpus order, truncated to `limit`.
///
/// An empty match string keeps every entry.
pub fn filter_with_limit<S: AsRef<str>>(match_string: &str, corpus: &[S], limit: usize) -> Vec<String> {
    let needle = match_string.to_lowercase();
    let candidates: Vec<String> = corpus
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| entry.to_lowercase().starts_with(&needle))
        .take(limit)
        .map(str::to_string)
        .collect();
    trace!(match_string, count = candidates.len(), "filtered suggestions");
    candidates
}
