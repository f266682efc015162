//! Open and closed sets for best-first search.
//!
//! - `OpenSet`: discovered entries awaiting expansion, popped lowest score first.
//!   Equal scores come out in insertion order, so a run is reproducible.
//! - `ClosedSet`: boards that have already been expanded.
use crate::engine::BoardState;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

struct Entry<T> {
    score: u32,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lower score first, then earlier insertion.
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A priority queue of items ordered by an externally computed score.
///
/// Several entries may refer to the same board; the open set does not filter
/// duplicates.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::frontier::OpenSet;
///
/// let mut open = OpenSet::new();
/// open.push("b", 2);
/// open.push("a", 1);
/// open.push("c", 2);
///
/// assert_eq!(open.pop(), Some(("a", 1)));
/// assert_eq!(open.pop(), Some(("b", 2))); // inserted before "c"
/// assert_eq!(open.pop(), Some(("c", 2)));
/// assert_eq!(open.pop(), None);
/// assert_eq!(open.peak_len(), 3);
/// ```
pub struct OpenSet<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
    peak: usize,
}

impl<T> OpenSet<T> {
    pub fn new() -> Self {
        OpenSet {
            heap: BinaryHeap::new(),
            next_seq: 0,
            peak: 0,
        }
    }

    /// Adds `item` with priority `score` (lower pops first).
    pub fn push(&mut self, item: T, score: u32) {
        self.heap.push(Entry {
            score,
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
        self.peak = self.peak.max(self.heap.len());
    }

    /// Removes and returns the entry with the lowest score, earliest first on ties.
    pub fn pop(&mut self) -> Option<(T, u32)> {
        self.heap.pop().map(|entry| (entry.item, entry.score))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the largest number of entries held at once.
    pub fn peak_len(&self) -> usize {
        self.peak
    }
}

impl<T> Default for OpenSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Boards that have been selected for expansion. Once closed, a board is never
/// expanded again.
#[derive(Debug, Default)]
pub struct ClosedSet {
    boards: HashSet<BoardState>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `board` as expanded. Returns `false` if it already was.
    pub fn close(&mut self, board: BoardState) -> bool {
        self.boards.insert(board)
    }

    pub fn contains(&self, board: &BoardState) -> bool {
        self.boards.contains(board)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Move;

    #[test]
    fn test_open_set_orders_by_score() {
        let mut open = OpenSet::new();
        for (item, score) in [(10, 5), (11, 3), (12, 4), (13, 1)] {
            open.push(item, score);
        }
        let popped: Vec<u32> = std::iter::from_fn(|| open.pop().map(|(_, s)| s)).collect();
        assert_eq!(popped, vec![1, 3, 4, 5]);
        assert!(open.is_empty());
    }

    #[test]
    fn test_open_set_ties_pop_in_insertion_order() {
        let mut open = OpenSet::new();
        for item in 0..100 {
            open.push(item, 7);
        }
        for expected in 0..100 {
            assert_eq!(open.pop(), Some((expected, 7)));
        }
    }

    #[test]
    fn test_open_set_ties_after_interleaved_pops() {
        let mut open = OpenSet::new();
        open.push('a', 2);
        open.push('b', 1);
        assert_eq!(open.pop(), Some(('b', 1)));
        open.push('c', 2);
        open.push('d', 2);
        assert_eq!(open.pop(), Some(('a', 2)));
        assert_eq!(open.pop(), Some(('c', 2)));
        assert_eq!(open.pop(), Some(('d', 2)));
    }

    #[test]
    fn test_open_set_tracks_peak() {
        let mut open = OpenSet::new();
        open.push((), 1);
        open.push((), 1);
        open.pop();
        open.push((), 1);
        assert_eq!(open.len(), 2);
        assert_eq!(open.peak_len(), 2);
        open.push((), 1);
        assert_eq!(open.peak_len(), 3);
    }

    #[test]
    fn test_closed_set() {
        let mut closed = ClosedSet::new();
        let goal = BoardState::goal();
        let moved = goal.apply_move(Move::Up).unwrap();

        assert!(closed.is_empty());
        assert!(closed.close(goal));
        assert!(!closed.close(goal));
        assert!(closed.contains(&goal));
        assert!(!closed.contains(&moved));
        assert_eq!(closed.len(), 1);
    }
}
