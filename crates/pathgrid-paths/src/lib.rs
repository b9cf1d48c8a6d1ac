//! Steppable weighted A* for pathgrid.
//!
//! This crate turns a [`Grid`](pathgrid_core::Grid) into a search space and
//! runs A* over it one expansion at a time:
//!
//! - [`AstarSearch`] advances by one [`SearchStep`] per call and reports
//!   [`Path`]s with start and end included
//! - [`PathAnimator`] replays a found path cell by cell
//! - [`manhattan`] is the heuristic: admissible for 4-connected moves whose
//!   cost is at least 1
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | cost of entering a neighbour |
//! | [`AstarPather`] : [`WeightedPather`] | distance estimate |
//!
//! [`Grid`](pathgrid_core::Grid) implements all three.

mod animator;
mod astar;
mod distance;
mod grid_pather;
mod node;
mod traits;

pub use animator::PathAnimator;
pub use astar::{AstarSearch, Path, SearchError, SearchStep};
pub use distance::manhattan;
pub use node::UNREACHABLE;
pub use traits::{AstarPather, Pather, WeightedPather};
