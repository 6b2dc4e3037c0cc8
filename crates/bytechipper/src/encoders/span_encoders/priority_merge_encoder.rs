//! # Priority-merge [`SpanEncoder`].
//!
//! Uses a binary min-heap over a doubly-linked list for O(n log n) BPE merging,
//! replacing the O(n^2) rescan in [`super::MergeScanSpanEncoder`].

use core::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{encoders::span_encoders::SpanEncoder, types::TokenType, vocab::RankTable};

const NONE: u32 = u32::MAX;

struct Node<T> {
    token: T,
    start: usize,
    end: usize,
    prev: u32,
    next: u32,
}

/// Heap entry representing a potential merge.
///
/// Ordered by (rank, `left_idx`) so the lowest-rank, leftmost pair is popped first.
/// `left_tok` and `right_tok` are stored for O(1) stale-entry detection.
#[derive(Eq)]
struct MergeEntry<T: Ord> {
    rank: T,
    left_idx: u32,
    left_tok: T,
    right_tok: T,
}

impl<T: Ord> PartialEq for MergeEntry<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.rank == other.rank && self.left_idx == other.left_idx
    }
}

impl<T: Ord> Ord for MergeEntry<T> {
    fn cmp(
        &self,
        other: &Self,
    ) -> core::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.left_idx.cmp(&other.left_idx))
    }
}

impl<T: Ord> PartialOrd for MergeEntry<T> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A [`SpanEncoder`] using a binary min-heap with a doubly-linked list.
///
/// Each node covers a byte range of the span; a candidate merge's rank is the
/// rank of the two nodes' combined bytes.
pub struct PriorityMergeSpanEncoder<T: TokenType> {
    nodes: Vec<Node<T>>,
    heap: BinaryHeap<Reverse<MergeEntry<T>>>,
}

impl<T: TokenType> Default for PriorityMergeSpanEncoder<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }
}

impl<T: TokenType> core::fmt::Debug for PriorityMergeSpanEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PriorityMergeSpanEncoder").finish()
    }
}

impl<T: TokenType> Clone for PriorityMergeSpanEncoder<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: TokenType> PriorityMergeSpanEncoder<T> {
    /// Push the merge of `left` and its successor, if it is ranked.
    fn push_candidate(
        &mut self,
        table: &RankTable<T>,
        span: &[u8],
        left: u32,
    ) {
        let right = self.nodes[left as usize].next;
        if right == NONE {
            return;
        }
        let (l, r) = (&self.nodes[left as usize], &self.nodes[right as usize]);
        if let Some(rank) = table.lookup(&span[l.start..r.end]) {
            let entry = MergeEntry {
                rank,
                left_idx: left,
                left_tok: l.token,
                right_tok: r.token,
            };
            self.heap.push(Reverse(entry));
        }
    }
}

impl<T: TokenType> SpanEncoder<T> for PriorityMergeSpanEncoder<T> {
    fn encode_append_compound_span(
        &mut self,
        table: &RankTable<T>,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        let n = span.len();
        if n < 2 {
            tokens.extend(span.iter().map(|&b| table.byte_token(b)));
            return;
        }

        // Build doubly-linked list of byte tokens.
        self.nodes.clear();
        self.nodes.reserve(n);
        for (i, &byte) in span.iter().enumerate() {
            self.nodes.push(Node {
                token: table.byte_token(byte),
                start: i,
                end: i + 1,
                prev: if i == 0 { NONE } else { (i - 1) as u32 },
                next: if i + 1 < n { (i + 1) as u32 } else { NONE },
            });
        }

        // Seed the heap with all initially-mergeable adjacent pairs.
        self.heap.clear();
        for i in 0..(n - 1) {
            self.push_candidate(table, span, i as u32);
        }

        // Process merges in priority order (lowest rank first).
        while let Some(Reverse(entry)) = self.heap.pop() {
            let li = entry.left_idx as usize;

            // Validate: left node still active with expected right neighbor.
            let ri_u32 = self.nodes[li].next;
            if ri_u32 == NONE {
                continue;
            }
            let ri = ri_u32 as usize;

            // Tokens are unique per byte sequence, so matching tokens mean
            // the pair is unchanged since the entry was pushed.
            if self.nodes[ri].prev != entry.left_idx
                || self.nodes[li].token != entry.left_tok
                || self.nodes[ri].token != entry.right_tok
            {
                continue;
            }

            // Merge: left absorbs right.
            let right_next = self.nodes[ri].next;
            let right_end = self.nodes[ri].end;
            let left = &mut self.nodes[li];
            left.token = entry.rank;
            left.end = right_end;
            left.next = right_next;
            if right_next != NONE {
                self.nodes[right_next as usize].prev = entry.left_idx;
            }

            // Enqueue new neighbor pairs.
            let left_prev = self.nodes[li].prev;
            if left_prev != NONE {
                self.push_candidate(table, span, left_prev);
            }
            self.push_candidate(table, span, entry.left_idx);
        }

        // Collect final tokens by walking the linked list.
        let mut idx = 0u32;
        while idx != NONE {
            tokens.push(self.nodes[idx as usize].token);
            idx = self.nodes[idx as usize].next;
        }
    }
}
