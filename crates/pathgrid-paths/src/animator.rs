//! Progressive reveal of a found [`Path`].

use std::iter::FusedIterator;

use pathgrid_core::Point;

use crate::astar::Path;

/// Yields the cells of a path one at a time, in walking order, for the
/// caller to tag `on_path`.
///
/// Start and end are never yielded, so a path of `n` moves produces `n - 1`
/// reveals. The animator is consumed as it goes and cannot be rewound; build
/// a new one to replay.
#[derive(Debug, Clone)]
pub struct PathAnimator {
    cells: std::vec::IntoIter<Point>,
}

impl PathAnimator {
    pub fn new(path: &Path) -> Self {
        let steps = path.steps();
        let inner = &steps[..steps.len().saturating_sub(1)];
        Self {
            cells: inner.to_vec().into_iter(),
        }
    }

    /// Reveals still to come.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.cells.len() == 0
    }
}

impl Iterator for PathAnimator {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        self.cells.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl ExactSizeIterator for PathAnimator {}

impl FusedIterator for PathAnimator {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstarSearch;
    use pathgrid_core::{Grid, Role};

    fn path_between(start: Point, end: Point) -> Path {
        let mut g = Grid::default();
        g.set_role(start, Role::Start);
        g.set_role(end, Role::End);
        AstarSearch::for_grid(&g).unwrap().finish(&g).unwrap()
    }

    #[test]
    fn reveals_interior_cells_in_order() {
        let path = path_between(Point::new(0, 0), Point::new(4, 0));
        let reveals: Vec<Point> = PathAnimator::new(&path).collect();
        assert_eq!(
            reveals,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
    }

    #[test]
    fn adjacent_endpoints_reveal_nothing() {
        let path = path_between(Point::new(0, 0), Point::new(1, 0));
        let mut anim = PathAnimator::new(&path);
        assert!(anim.is_done());
        assert_eq!(anim.next(), None);
    }

    #[test]
    fn is_lazy_and_not_restartable() {
        let path = path_between(Point::new(0, 0), Point::new(0, 3));
        let mut anim = PathAnimator::new(&path);
        assert_eq!(anim.remaining(), 2);
        assert_eq!(anim.next(), Some(Point::new(0, 1)));
        assert_eq!(anim.remaining(), 1);
        assert_eq!(anim.next(), Some(Point::new(0, 2)));
        assert_eq!(anim.next(), None);
        assert_eq!(anim.next(), None);
    }
}
