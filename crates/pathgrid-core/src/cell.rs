//! The [`Cell`] type, one square of the map, with its [`Role`].

/// Traversal cost of a cell nobody has weighted.
pub const DEFAULT_WEIGHT: i32 = 1;

/// Endpoint marker carried by at most one cell each.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    None,
    Start,
    End,
}

/// State of a single grid square.
///
/// `wall`, `weight` and `role` drive the search. `visited` and `on_path` are
/// presentation tags written while a search or reveal is running; the search
/// never reads them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub role: Role,
    pub wall: bool,
    /// Cost of entering this cell. Always ≥ 1.
    pub weight: i32,
    pub visited: bool,
    pub on_path: bool,
}

impl Cell {
    /// Set the wall flag (builder).
    #[inline]
    pub const fn with_wall(mut self, wall: bool) -> Self {
        self.wall = wall;
        self
    }

    /// Set the weight (builder).
    #[inline]
    pub const fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Whether this cell is the start or end marker.
    #[inline]
    pub fn is_endpoint(&self) -> bool {
        self.role != Role::None
    }

    /// Whether the weight differs from [`DEFAULT_WEIGHT`].
    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.weight != DEFAULT_WEIGHT
    }

    /// Drop the `visited` / `on_path` tags.
    #[inline]
    pub fn clear_tags(&mut self) {
        self.visited = false;
        self.on_path = false;
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            role: Role::None,
            wall: false,
            weight: DEFAULT_WEIGHT,
            visited: false,
            on_path: false,
        }
    }
}
