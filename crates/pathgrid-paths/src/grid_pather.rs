//! [`Grid`] as an A* search space: 4-connected, walls excluded, entry cost
//! equal to the weight of the cell being entered.

use pathgrid_core::{Grid, Point};

use crate::astar::{AstarSearch, SearchError};
use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(Grid::neighbors(self, p));
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.weight(to).unwrap_or(i32::MAX)
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarSearch {
    /// Prepare a search from the grid's start marker to its end marker.
    pub fn for_grid(grid: &Grid) -> Result<Self, SearchError> {
        AstarSearch::new(grid, grid.bounds(), grid.start(), grid.end())
    }
}
