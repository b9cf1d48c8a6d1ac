//! The [`Grid`] type: a row-major map of [`Cell`]s with unique start and end
//! markers.
//!
//! Edits follow a no-op policy: an edit that would break an invariant (a wall
//! on an endpoint, a weight below 1, a coordinate outside the grid) leaves
//! the grid untouched and reports `false`.

use crate::cell::{Cell, DEFAULT_WEIGHT, Role};
use crate::error::GridError;
use crate::geom::{Point, Range};

/// Smallest accepted side length.
pub const MIN_SIDE: i32 = 5;
/// Rows of a grid created without explicit dimensions.
pub const DEFAULT_ROWS: i32 = 10;
/// Columns of a grid created without explicit dimensions.
pub const DEFAULT_COLS: i32 = 10;

/// Check that `rows × cols` is an acceptable grid size.
pub fn check_dimensions(rows: i32, cols: i32) -> Result<(), GridError> {
    if rows < MIN_SIDE || cols < MIN_SIDE {
        return Err(GridError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

/// Parse user-entered weight text.
///
/// Accepts surrounding whitespace; rejects anything that is not an integer
/// in `1..=i32::MAX`.
pub fn parse_weight(s: &str) -> Result<i32, GridError> {
    match s.trim().parse::<i32>() {
        Ok(w) if w >= DEFAULT_WEIGHT => Ok(w),
        _ => Err(GridError::InvalidWeight(s.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` obstacle-and-weight map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Vec<Cell>,
    pub(crate) bounds: Range,
    pub(crate) start: Option<Point>,
    pub(crate) end: Option<Point>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::blank(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// Create a grid of default cells.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        check_dimensions(rows, cols)?;
        Ok(Self::blank(rows, cols))
    }

    fn blank(rows: i32, cols: i32) -> Self {
        let bounds = Range::new(0, 0, cols, rows);
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
            start: None,
            end: None,
        }
    }

    /// Discard every cell and recreate the grid at `rows × cols`.
    ///
    /// On [`GridError::InvalidDimensions`] the grid is left unchanged.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<(), GridError> {
        check_dimensions(rows, cols)?;
        *self = Self::blank(rows, cols);
        Ok(())
    }

    /// Recreate every cell at the current size, clearing start and end.
    pub fn reset(&mut self) {
        *self = Self::blank(self.rows(), self.cols());
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// The bounding range, `x` over columns and `y` over rows.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The start marker, if designated.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The end marker, if designated.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Borrow the cell at `p`.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.bounds.index(p).map(|i| &self.cells[i])
    }

    /// Read the cell at `p`. Returns `Cell::default()` if `p` is outside
    /// bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Cell {
        self.get(p).copied().unwrap_or_default()
    }

    #[inline]
    fn get_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.bounds.index(p).map(|i| &mut self.cells[i])
    }

    /// Whether a search may enter `p`.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.get(p).is_some_and(|c| !c.wall)
    }

    /// Cost of entering `p`, or `None` outside the grid.
    #[inline]
    pub fn weight(&self, p: Point) -> Option<i32> {
        self.get(p).map(|c| c.weight)
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Give `p` the start or end role, taking it from its previous holder.
    ///
    /// The target loses any wall, custom weight or other role. `Role::None`
    /// just clears whatever role `p` carries.
    pub fn set_role(&mut self, p: Point, role: Role) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        match self.cells[i].role {
            Role::Start => self.start = None,
            Role::End => self.end = None,
            Role::None => {}
        }
        let previous = match role {
            Role::Start => self.start.replace(p),
            Role::End => self.end.replace(p),
            Role::None => None,
        };
        if let Some(old) = previous.and_then(|old| self.get_mut(old)) {
            old.role = Role::None;
        }
        let cell = &mut self.cells[i];
        cell.role = role;
        if role != Role::None {
            cell.wall = false;
            cell.weight = DEFAULT_WEIGHT;
        }
        true
    }

    /// Flip the wall flag of `p`. Endpoints are never walled.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        match self.get_mut(p) {
            Some(c) if !c.is_endpoint() => {
                c.wall = !c.wall;
                true
            }
            _ => false,
        }
    }

    /// Set the cost of entering `p`.
    ///
    /// Ignored for weights below 1, endpoints and walls.
    pub fn set_weight(&mut self, p: Point, weight: i32) -> bool {
        if weight < DEFAULT_WEIGHT {
            return false;
        }
        match self.get_mut(p) {
            Some(c) if !c.is_endpoint() && !c.wall => {
                c.weight = weight;
                true
            }
            _ => false,
        }
    }

    /// Return `p` to a default cell: no wall, default weight, no role.
    pub fn clear_cell(&mut self, p: Point) -> bool {
        if !self.contains(p) {
            return false;
        }
        self.set_role(p, Role::None);
        if let Some(c) = self.get_mut(p) {
            *c = Cell::default();
        }
        true
    }

    // -----------------------------------------------------------------------
    // Presentation tags
    // -----------------------------------------------------------------------

    /// Tag `p` as expanded by the search. Endpoints are never tagged.
    pub fn mark_visited(&mut self, p: Point) {
        if let Some(c) = self.get_mut(p).filter(|c| !c.is_endpoint()) {
            c.visited = true;
        }
    }

    /// Tag `p` as part of the revealed path, replacing its `visited` tag.
    /// Endpoints are never tagged.
    pub fn mark_on_path(&mut self, p: Point) {
        if let Some(c) = self.get_mut(p).filter(|c| !c.is_endpoint()) {
            c.visited = false;
            c.on_path = true;
        }
    }

    /// Remove every `visited` / `on_path` tag.
    pub fn clear_tags(&mut self) {
        for c in &mut self.cells {
            c.clear_tags();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// In-bounds, non-wall cardinal neighbours of `p`, ordered east, south,
    /// west, north.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.is_passable(n))
    }

    /// Row-major iterator over `(Point, &Cell)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Point, &Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter())
    }
}
