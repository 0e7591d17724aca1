use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A candidate cell waiting on the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    /// Tentative distance at the time of insertion, kept at path precision.
    pub distance: f64,
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
}

impl Eq for FrontierEntry {}

// Reversed so that `BinaryHeap` pops the smallest `(distance, row, col)` first.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.row.cmp(&self.row))
            .then_with(|| other.col.cmp(&self.col))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of candidate cells ordered by tentative distance.
///
/// The same cell may be queued several times. Superseded entries are never removed;
/// the solver recognises them on pop by comparing against the current distance.
/// Ties are broken by row, then column.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushes: usize,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frontier able to hold `capacity` entries without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            pushes: 0,
        }
    }

    /// Queue `(row, col)` at `distance`.
    pub fn push(&mut self, distance: f64, row: usize, col: usize) {
        self.pushes += 1;
        self.heap.push(FrontierEntry { distance, row, col });
    }

    /// Remove and return the entry with the smallest distance.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// The entry that [`Frontier::pop`] would return next.
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek()
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entry is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes since creation.
    pub fn pushes(&self) -> usize {
        self.pushes
    }
}
