//! **pathgrid-core**: the obstacle-and-weight map behind pathgrid.
//!
//! This crate provides the state model the search runs over: geometry
//! primitives, [`Cell`]s with their [`Role`], the editable [`Grid`], flat
//! [`PersistedGrid`] snapshots and the single-slot [`Storage`] seam.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod persist;
pub mod storage;

pub use cell::{Cell, DEFAULT_WEIGHT, Role};
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Grid, MIN_SIDE, parse_weight};
pub use persist::{PersistedCell, PersistedGrid};
#[cfg(feature = "serde")]
pub use storage::JsonFileStorage;
pub use storage::{MemoryStorage, Storage, StorageError};
