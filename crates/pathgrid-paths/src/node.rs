use std::cmp::Ordering;

/// Sentinel cost meaning "not reached yet".
/// Scores are `i64`: sums of `i32` weights along any route stay below it.
pub const UNREACHABLE: i64 = i64::MAX;

// ---------------------------------------------------------------------------
// Per-cell search bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) f: i64,
    pub(crate) parent: usize,
    /// Position in the open set; breaks `f` ties.
    pub(crate) seq: u64,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: usize::MAX,
            seq: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for use in a `BinaryHeap`.
///
/// The heap pops the smallest `f` first and, among equal `f`, the cell that
/// sits earliest in the open set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other
            .f
            .cmp(&self.f)
            .then(other.seq.cmp(&self.seq))
            .then(other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
