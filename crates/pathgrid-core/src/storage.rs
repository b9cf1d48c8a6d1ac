//! Single-slot storage for [`PersistedGrid`] records.
//!
//! A [`Storage`] holds at most one record. [`MemoryStorage`] keeps it in
//! memory; with the `serde` feature [`JsonFileStorage`] keeps it as a JSON
//! document on disk.

use std::fmt;
use std::io;

use crate::persist::PersistedGrid;

/// Errors raised by a [`Storage`] backend.
#[derive(Debug)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    Io(io::Error),
    /// The stored bytes are not a record.
    Format(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage i/o error: {e}"),
            Self::Format(why) => write!(f, "stored grid is unreadable: {why}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// A single well-known slot holding one saved grid.
pub trait Storage {
    /// Overwrite the slot with `record`.
    fn save(&mut self, record: &PersistedGrid) -> Result<(), StorageError>;

    /// Read the slot. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedGrid>, StorageError>;
}

/// In-memory slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slot: Option<PersistedGrid>,
}

impl MemoryStorage {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, record: &PersistedGrid) -> Result<(), StorageError> {
        self.slot = Some(record.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedGrid>, StorageError> {
        Ok(self.slot.clone())
    }
}

#[cfg(feature = "serde")]
pub use json::JsonFileStorage;

#[cfg(feature = "serde")]
mod json {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::{Storage, StorageError};
    use crate::persist::PersistedGrid;

    /// A slot stored as one pretty-printed JSON file.
    #[derive(Debug, Clone)]
    pub struct JsonFileStorage {
        path: PathBuf,
    }

    impl JsonFileStorage {
        /// Use the file at `path` as the slot. The file need not exist yet.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Location of the slot file.
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Storage for JsonFileStorage {
        fn save(&mut self, record: &PersistedGrid) -> Result<(), StorageError> {
            let json = serde_json::to_string_pretty(record)
                .map_err(|e| StorageError::Format(e.to_string()))?;
            fs::write(&self.path, json)?;
            log::debug!("saved {}x{} grid to {}", record.rows, record.cols, self.path.display());
            Ok(())
        }

        fn load(&self) -> Result<Option<PersistedGrid>, StorageError> {
            let text = match fs::read_to_string(&self.path) {
                Ok(t) => t,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            let record = serde_json::from_str(&text)
                .map_err(|e| StorageError::Format(e.to_string()))?;
            log::debug!("loaded grid record from {}", self.path.display());
            Ok(Some(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn memory_slot_starts_empty_and_overwrites() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.load().unwrap(), None);

        let a = Grid::new(5, 5).unwrap().to_record();
        let b = Grid::new(6, 9).unwrap().to_record();
        s.save(&a).unwrap();
        s.save(&b).unwrap();
        assert_eq!(s.load().unwrap(), Some(b));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::{Grid, Point, Role};

    fn scratch_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pathgrid-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn json_file_round_trip() {
        let path = scratch_file("round-trip");
        let mut s = JsonFileStorage::new(&path);

        let mut g = Grid::new(5, 6).unwrap();
        g.set_role(Point::new(0, 0), Role::Start);
        g.set_weight(Point::new(2, 2), 4);
        s.save(&g.to_record()).unwrap();

        let rec = s.load().unwrap().unwrap();
        assert_eq!(rec, g.to_record());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_empty_slot() {
        let s = JsonFileStorage::new(scratch_file("missing"));
        assert!(s.load().unwrap().is_none());
    }

    #[test]
    fn garbage_file_is_format_error() {
        let path = scratch_file("garbage");
        std::fs::write(&path, "{ not json").unwrap();
        let s = JsonFileStorage::new(&path);
        assert!(matches!(s.load(), Err(StorageError::Format(_))));
        std::fs::remove_file(&path).ok();
    }
}
