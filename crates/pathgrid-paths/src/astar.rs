//! Steppable weighted A*.
//!
//! [`AstarSearch`] holds the whole search state (open set, `g`/`f` scores,
//! predecessors) and advances by exactly one expansion per
//! [`step`](AstarSearch::step) call, so a caller can pace it with a timer or
//! run it in a tight loop. The search never schedules its own continuation:
//! dropping it is cancellation.

use std::collections::BinaryHeap;
use std::fmt;

use pathgrid_core::{Point, Range};

use crate::node::{Node, NodeRef, UNREACHABLE};
use crate::traits::AstarPather;

/// Reasons a search cannot be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end has not been designated.
    MissingEndpoints,
    /// Start and end are the same cell.
    CoincidentEndpoints(Point),
    /// An endpoint lies outside the searched range.
    OutOfBounds(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => f.write_str("both a start and an end must be set"),
            Self::CoincidentEndpoints(p) => write!(f, "start and end are both {p}"),
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A shortest path, start and end included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: i64,
}

impl Path {
    /// Every cell from start to end, in walking order.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// The cells after the start, ending with the end cell.
    #[inline]
    pub fn steps(&self) -> &[Point] {
        &self.cells[1..]
    }

    /// Number of moves along the path.
    #[inline]
    pub fn edges(&self) -> usize {
        self.cells.len() - 1
    }

    /// Sum of the weights of every entered cell.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.cells[0]
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }
}

// ---------------------------------------------------------------------------
// SearchStep
// ---------------------------------------------------------------------------

/// Result of one [`AstarSearch::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStep {
    /// `Point` was taken off the open set and its neighbours relaxed.
    Expanded(Point),
    /// The end was reached. Terminal.
    Found(Path),
    /// The open set ran dry without reaching the end. Terminal.
    Exhausted,
}

impl SearchStep {
    /// Whether this step ends the search.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Expanded(_))
    }
}

// ---------------------------------------------------------------------------
// AstarSearch
// ---------------------------------------------------------------------------

/// An in-progress A* search over a rectangular range.
#[derive(Debug, Clone)]
pub struct AstarSearch {
    rng: Range,
    from: Point,
    to: Point,
    nodes: Vec<Node>,
    open: BinaryHeap<NodeRef>,
    next_seq: u64,
    expanded: usize,
    done: bool,
    nbuf: Vec<Point>,
}

impl AstarSearch {
    /// Set up a search from `from` to `to` within `rng`.
    ///
    /// Fails before allocating any state if an endpoint is missing,
    /// outside `rng`, or both endpoints coincide.
    pub fn new<P: AstarPather>(
        pather: &P,
        rng: Range,
        from: Option<Point>,
        to: Option<Point>,
    ) -> Result<Self, SearchError> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(SearchError::MissingEndpoints);
        };
        for p in [from, to] {
            if !rng.contains(p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }
        if from == to {
            return Err(SearchError::CoincidentEndpoints(from));
        }

        let mut nodes = vec![Node::default(); rng.len()];
        let start_idx = rng.index(from).ok_or(SearchError::OutOfBounds(from))?;
        let start = &mut nodes[start_idx];
        start.g = 0;
        start.f = i64::from(pather.estimate(from, to));
        start.open = true;
        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: start.f,
            seq: 0,
        });

        log::debug!("A* search {from} -> {to} over {rng}");
        Ok(Self {
            rng,
            from,
            to,
            nodes,
            open,
            next_seq: 1,
            expanded: 0,
            done: false,
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Start of the search.
    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    /// Goal of the search.
    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    /// Whether a terminal step has been returned.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of cells taken off the open set so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn g_score(&self, p: Point) -> Option<i64> {
        let g = self.nodes[self.rng.index(p)?].g;
        (g != UNREACHABLE).then_some(g)
    }

    /// Advance by one expansion.
    ///
    /// Returns `None` once a terminal step ([`SearchStep::Found`] or
    /// [`SearchStep::Exhausted`]) has already been returned.
    pub fn step<P: AstarPather>(&mut self, pather: &P) -> Option<SearchStep> {
        if self.done {
            return None;
        }

        let ci = loop {
            let Some(top) = self.open.pop() else {
                self.done = true;
                log::debug!(
                    "A* {} -> {}: open set exhausted after {} expansions",
                    self.from,
                    self.to,
                    self.expanded
                );
                return Some(SearchStep::Exhausted);
            };
            // Skip entries superseded by a later improvement or renumbering.
            let n = &self.nodes[top.idx];
            if n.open && n.f == top.f && n.seq == top.seq {
                break top.idx;
            }
        };

        self.nodes[ci].open = false;
        self.expanded += 1;
        let current = self.rng.point(ci);

        if current == self.to {
            self.done = true;
            let path = self.reconstruct(ci);
            log::debug!(
                "A* {} -> {}: path of {} moves, cost {}, after {} expansions",
                self.from,
                self.to,
                path.edges(),
                path.cost(),
                self.expanded
            );
            return Some(SearchStep::Found(path));
        }

        let current_g = self.nodes[ci].g;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        // Cells numbered from here on were appended during this expansion.
        let appended_from = self.next_seq;
        let mut renumbered = false;
        for &np in nbuf.iter() {
            let Some(ni) = self.rng.index(np) else {
                continue;
            };
            let tentative_g = current_g.saturating_add(i64::from(pather.cost(current, np)));
            if tentative_g >= self.nodes[ni].g {
                continue;
            }
            if self.nodes[ni].open && !renumbered {
                self.renumber_open(appended_from);
                renumbered = true;
            }
            let h = i64::from(pather.estimate(np, self.to));
            let n = &mut self.nodes[ni];
            n.g = tentative_g;
            n.f = tentative_g.saturating_add(h);
            n.parent = ci;
            if !n.open {
                n.open = true;
                n.seq = self.next_seq;
                self.next_seq += 1;
            }
            self.open.push(NodeRef {
                idx: ni,
                f: n.f,
                seq: n.seq,
            });
        }

        self.nbuf = nbuf;
        Some(SearchStep::Expanded(current))
    }

    /// Run every remaining step without pacing.
    ///
    /// Returns the path, or `None` if the end is unreachable or the search
    /// had already terminated.
    pub fn finish<P: AstarPather>(&mut self, pather: &P) -> Option<Path> {
        while let Some(step) = self.step(pather) {
            match step {
                SearchStep::Expanded(_) => {}
                SearchStep::Found(path) => return Some(path),
                SearchStep::Exhausted => return None,
            }
        }
        None
    }

    /// Number the cells that were open at the last pick by their position
    /// after that pick: ascending `f`, ties kept in their previous order.
    ///
    /// An improved cell keeps its place in the open set, so before the
    /// first improvement of an expansion the numbering has to reflect the
    /// order the last pick left behind, not the order cells were added in.
    /// Cells appended during the current expansion keep their numbers,
    /// which are larger than any rank handed out here.
    fn renumber_open(&mut self, appended_from: u64) {
        let mut ranked: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].open && self.nodes[i].seq < appended_from)
            .collect();
        ranked.sort_unstable_by_key(|&i| (self.nodes[i].f, self.nodes[i].seq));
        for (rank, &i) in ranked.iter().enumerate() {
            self.nodes[i].seq = rank as u64;
        }
        self.open = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.open)
            .map(|(idx, n)| NodeRef {
                idx,
                f: n.f,
                seq: n.seq,
            })
            .collect();
    }

    fn reconstruct(&self, goal_idx: usize) -> Path {
        let mut cells = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            cells.push(self.rng.point(ci));
            ci = self.nodes[ci].parent;
        }
        cells.reverse();
        Path {
            cells,
            cost: self.nodes[goal_idx].g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use pathgrid_core::{Grid, Role};

    fn p(row: i32, col: i32) -> Point {
        Point::new(col, row)
    }

    /// Expansion order of a search that keeps its open set in a plain
    /// vector, stable-sorts it by `f` and takes the head on every step.
    fn stable_sort_order(g: &Grid) -> Vec<Point> {
        let rng = g.bounds();
        let (from, to) = (g.start().unwrap(), g.end().unwrap());
        let mut gs = vec![UNREACHABLE; rng.len()];
        let mut fs = vec![UNREACHABLE; rng.len()];
        let fi = rng.index(from).unwrap();
        gs[fi] = 0;
        fs[fi] = i64::from(manhattan(from, to));
        let mut open = vec![from];
        let mut order = Vec::new();
        while !open.is_empty() {
            open.sort_by_key(|&q| fs[rng.index(q).unwrap()]);
            let cur = open.remove(0);
            order.push(cur);
            if cur == to {
                break;
            }
            let ci = rng.index(cur).unwrap();
            for n in g.neighbors(cur) {
                let ni = rng.index(n).unwrap();
                let t = gs[ci] + i64::from(g.at(n).weight);
                if t < gs[ni] {
                    gs[ni] = t;
                    fs[ni] = t + i64::from(manhattan(n, to));
                    if !open.contains(&n) {
                        open.push(n);
                    }
                }
            }
        }
        order
    }

    fn expansion_order(g: &Grid) -> Vec<Point> {
        let mut search = AstarSearch::for_grid(g).unwrap();
        let mut order = Vec::new();
        while let Some(step) = search.step(g) {
            match step {
                SearchStep::Expanded(q) => order.push(q),
                SearchStep::Found(path) => order.push(path.end()),
                SearchStep::Exhausted => {}
            }
        }
        order
    }

    fn grid_with(rows: i32, cols: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(rows, cols).unwrap();
        g.set_role(start, Role::Start);
        g.set_role(end, Role::End);
        g
    }

    fn solve(g: &Grid) -> Option<Path> {
        AstarSearch::for_grid(g).unwrap().finish(g)
    }

    #[test]
    fn open_grid_is_manhattan_optimal() {
        for (rows, cols) in [(5, 5), (7, 12), (10, 10), (13, 6)] {
            let g = grid_with(rows, cols, p(0, 0), p(rows - 1, cols - 1));
            let path = solve(&g).unwrap();
            assert_eq!(path.edges() as i32, (rows - 1) + (cols - 1));
            assert_eq!(path.cost(), i64::from((rows - 1) + (cols - 1)));
            assert_eq!(path.start(), p(0, 0));
            assert_eq!(path.end(), p(rows - 1, cols - 1));
        }
    }

    #[test]
    fn path_is_contiguous_and_avoids_walls() {
        let mut g = grid_with(8, 8, p(0, 0), p(7, 7));
        for row in 0..7 {
            g.toggle_wall(p(row, 3));
        }
        let path = solve(&g).unwrap();
        for w in path.cells().windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
            assert!(!g.at(w[1]).wall);
        }
        // Forced through the gap in row 7.
        assert!(path.cells().contains(&p(7, 3)));
    }

    #[test]
    fn wall_in_middle_takes_east_first_route() {
        let mut g = grid_with(5, 5, p(0, 0), p(2, 2));
        g.toggle_wall(p(1, 1));
        let path = solve(&g).unwrap();
        assert_eq!(path.edges(), 4);
        assert_eq!(path.cost(), 4);
        assert_eq!(path.cells(), &[p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
    }

    #[test]
    fn straight_run_expands_along_the_row() {
        let g = grid_with(5, 5, p(0, 0), p(0, 4));
        let mut search = AstarSearch::for_grid(&g).unwrap();
        let mut expanded = Vec::new();
        let path = loop {
            match search.step(&g).unwrap() {
                SearchStep::Expanded(q) => expanded.push(q),
                SearchStep::Found(path) => break path,
                SearchStep::Exhausted => panic!("no path"),
            }
        };
        assert_eq!(expanded, vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)]);
        assert_eq!(path.steps(), &[p(0, 1), p(0, 2), p(0, 3), p(0, 4)]);
        assert_eq!(search.expanded(), 5);
    }

    #[test]
    fn weights_steer_the_path() {
        let mut g = grid_with(5, 5, p(0, 0), p(0, 4));
        g.set_weight(p(0, 2), 10);
        let path = solve(&g).unwrap();
        assert!(!path.cells().contains(&p(0, 2)));
        // Detour through row 1 costs 6; straight through costs 13.
        assert_eq!(path.cost(), 6);
    }

    #[test]
    fn cost_counts_entered_cells_only() {
        let mut g = grid_with(5, 5, p(0, 0), p(0, 2));
        g.set_weight(p(0, 1), 2);
        let path = solve(&g).unwrap();
        assert_eq!(path.cells(), &[p(0, 0), p(0, 1), p(0, 2)]);
        assert_eq!(path.cost(), 3);
    }

    #[test]
    fn raising_weights_never_lowers_cost() {
        let mut g = grid_with(9, 9, p(0, 0), p(8, 8));
        for i in 1..8 {
            g.toggle_wall(p(i, 4));
        }
        let mut last = solve(&g).unwrap().cost();
        let bound = i64::from(manhattan(p(0, 0), p(8, 8)));
        assert!(last >= bound);
        for (k, q) in [p(0, 4), p(8, 4), p(0, 3), p(4, 2), p(8, 5)].into_iter().enumerate() {
            g.set_weight(q, 3 + k as i32);
            let cost = solve(&g).unwrap().cost();
            assert!(cost >= last, "cost dropped from {last} to {cost} after weighting {q}");
            assert!(cost >= bound);
            last = cost;
        }
    }

    #[test]
    fn walled_off_end_is_exhausted() {
        let mut g = grid_with(6, 6, p(0, 0), p(5, 5));
        g.toggle_wall(p(4, 5));
        g.toggle_wall(p(5, 4));
        let mut search = AstarSearch::for_grid(&g).unwrap();
        let mut last = None;
        while let Some(step) = search.step(&g) {
            last = Some(step);
        }
        assert_eq!(last, Some(SearchStep::Exhausted));
        assert!(search.is_done());
        // Every reachable cell was expanded exactly once: 36 - 2 walls - end.
        assert_eq!(search.expanded(), 33);
        assert_eq!(search.g_score(p(5, 5)), None);
    }

    #[test]
    fn steps_stop_after_termination() {
        let g = grid_with(5, 5, p(0, 0), p(0, 1));
        let mut search = AstarSearch::for_grid(&g).unwrap();
        assert_eq!(search.step(&g), Some(SearchStep::Expanded(p(0, 0))));
        assert!(matches!(search.step(&g), Some(SearchStep::Found(_))));
        assert_eq!(search.step(&g), None);
        assert_eq!(search.finish(&g), None);
    }

    #[test]
    fn setup_errors() {
        let g = Grid::default();
        let rng = g.bounds();
        assert_eq!(
            AstarSearch::new(&g, rng, Some(p(0, 0)), None).err(),
            Some(SearchError::MissingEndpoints)
        );
        assert_eq!(
            AstarSearch::new(&g, rng, Some(p(1, 1)), Some(p(1, 1))).err(),
            Some(SearchError::CoincidentEndpoints(p(1, 1)))
        );
        assert_eq!(
            AstarSearch::new(&g, rng, Some(p(0, 0)), Some(p(10, 0))).err(),
            Some(SearchError::OutOfBounds(p(10, 0)))
        );
    }

    #[test]
    fn g_scores_reflect_weights() {
        let mut g = grid_with(5, 5, p(0, 0), p(4, 4));
        g.set_weight(p(0, 1), 4);
        let mut search = AstarSearch::for_grid(&g).unwrap();
        search.step(&g);
        assert_eq!(search.g_score(p(0, 0)), Some(0));
        assert_eq!(search.g_score(p(0, 1)), Some(4));
        assert_eq!(search.g_score(p(1, 0)), Some(1));
        assert_eq!(search.g_score(p(3, 3)), None);
    }

    #[test]
    fn ties_follow_the_open_set_order() {
        for salt in 0..40 {
            let mut g = grid_with(10, 10, p(0, 0), p(9, 9));
            for q in g.bounds().iter() {
                let mix = (q.y * 31 + q.x * 17 + salt * 13) % 23;
                if mix < 4 {
                    g.toggle_wall(q);
                } else if mix < 12 {
                    g.set_weight(q, 2 + mix % 5);
                }
            }
            assert_eq!(expansion_order(&g), stable_sort_order(&g), "pattern {salt}");
        }
    }

    #[test]
    fn heavy_weights_do_not_overflow() {
        let mut g = grid_with(5, 5, p(0, 0), p(0, 3));
        let heavy = pathgrid_core::parse_weight("1500000000").unwrap();
        for q in g.bounds().iter() {
            g.set_weight(q, heavy);
        }
        let path = solve(&g).unwrap();
        assert_eq!(path.cells(), &[p(0, 0), p(0, 1), p(0, 2), p(0, 3)]);
        assert_eq!(path.cost(), 2 * 1_500_000_000 + 1);
    }
}
