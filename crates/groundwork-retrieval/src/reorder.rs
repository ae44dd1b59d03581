//! Long-context placement.
//!
//! Models attend best to the start and end of a long prompt. Given items in
//! descending relevance, the most relevant end up at both edges and the
//! least relevant in the middle: `[1, 2, 3, 4, 5]` becomes `[1, 3, 5, 4, 2]`.

use std::collections::VecDeque;

/// Deterministic permutation of `items`, which must arrive most relevant first.
pub fn long_context_reorder<T>(items: Vec<T>) -> Vec<T> {
    let mut placed = VecDeque::with_capacity(items.len());
    for (i, item) in items.into_iter().rev().enumerate() {
        if i % 2 == 1 {
            placed.push_back(item);
        } else {
            placed.push_front(item);
        }
    }
    placed.into()
}
