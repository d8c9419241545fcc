// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Property tests for the pure scanner and filter

use ac_config::DEFAULT_SUGGESTIONS;
use ac_core::{filter, filter_with_limit, scan, MAX_SUGGESTIONS, TRIGGER};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("<>".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just("\n".to_string()),
            "[a-zé ]{0,4}",
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn match_is_the_text_between_rightmost_trigger_and_caret(
        text in text_strategy(),
        cursor in 0usize..40,
    ) {
        let chars: Vec<char> = text.chars().collect();
        let clamped = cursor.min(chars.len());
        let before: String = chars[..clamped].iter().collect();

        match scan(&text, cursor) {
            Some(ctx) => {
                prop_assert_eq!(ctx.trigger_end, clamped);
                let trigger: String = chars[ctx.trigger_start..ctx.trigger_start + 2].iter().collect();
                prop_assert_eq!(trigger.as_str(), TRIGGER);
                let between: String = chars[ctx.trigger_start + 2..clamped].iter().collect();
                prop_assert_eq!(&ctx.match_string, &between);
                prop_assert!(!ctx.match_string.contains('\n'));
                prop_assert!(!ctx.match_string.contains(TRIGGER));
            }
            None => {
                let abandoned = before
                    .rfind(TRIGGER)
                    .map(|i| before[i + TRIGGER.len()..].contains('\n'))
                    .unwrap_or(true);
                prop_assert!(abandoned);
            }
        }
    }

    #[test]
    fn filter_returns_bounded_corpus_subsequence(needle in "[a-zA-Z]{0,3}") {
        let candidates = filter(&needle, DEFAULT_SUGGESTIONS);
        prop_assert!(candidates.len() <= MAX_SUGGESTIONS);

        let lowered = needle.to_lowercase();
        for candidate in &candidates {
            prop_assert!(candidate.to_lowercase().starts_with(&lowered));
        }

        let mut corpus = DEFAULT_SUGGESTIONS.iter();
        for candidate in &candidates {
            prop_assert!(
                corpus.any(|entry| *entry == candidate.as_str()),
                "order broken at {}",
                candidate
            );
        }

        let expected: Vec<&str> = DEFAULT_SUGGESTIONS
            .iter()
            .copied()
            .filter(|entry| entry.to_lowercase().starts_with(&lowered))
            .take(MAX_SUGGESTIONS)
            .collect();
        prop_assert_eq!(candidates, expected);
    }

    #[test]
    fn filter_limit_is_respected(limit in 1usize..12) {
        prop_assert_eq!(
            filter_with_limit("", DEFAULT_SUGGESTIONS, limit).len(),
            limit.min(DEFAULT_SUGGESTIONS.len())
        );
    }
}
