// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON merging of configuration layers

use serde_json::Value as J;

/// Merge `layer` over `base`
///
/// Objects are merged recursively, scalars/arrays replace the left value.
pub fn merge_two_json(base: &mut J, layer: J) {
    match (base, layer) {
        (J::Object(a), J::Object(b)) => {
            for (k, v) in b {
                merge_two_json(a.entry(k).or_insert(J::Null), v);
            }
        }
        // Suggestion lists are replaced wholesale, never concatenated
        (a @ J::Array(_), J::Array(b)) => *a = J::Array(b),
        (_, J::Null) => { /* keep left if right is null */ }
        (a, b) => *a = b,
    }
}
