//! Flat, versionless snapshots of a [`Grid`].
//!
//! A [`PersistedGrid`] holds the dimensions and, for every cell in row-major
//! order, the four fields that survive a save: weight, wall, start, end.
//! Presentation tags are not persisted.
//!
//! With the `serde` feature the record uses camelCase field names
//! (`isWall`, `isStart`, `isEnd`) and accepts the weight either as a JSON
//! integer or as a decimal string.

use crate::cell::{Cell, DEFAULT_WEIGHT, Role};
use crate::error::GridError;
use crate::grid::{Grid, check_dimensions};

/// One cell of a [`PersistedGrid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PersistedCell {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "weight_repr::deserialize"))]
    pub weight: i32,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl Default for PersistedCell {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            is_wall: false,
            is_start: false,
            is_end: false,
        }
    }
}

/// Snapshot of a grid's dimensions and cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistedGrid {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<PersistedCell>,
}

impl Grid {
    /// Snapshot this grid.
    pub fn to_record(&self) -> PersistedGrid {
        PersistedGrid {
            rows: self.rows(),
            cols: self.cols(),
            cells: self
                .cells
                .iter()
                .map(|c| PersistedCell {
                    weight: c.weight,
                    is_wall: c.wall,
                    is_start: c.role == Role::Start,
                    is_end: c.role == Role::End,
                })
                .collect(),
        }
    }

    /// Rebuild a grid from a snapshot.
    ///
    /// The whole record is validated first; any inconsistency yields
    /// [`GridError::CorruptRecord`] and nothing is built.
    pub fn from_record(record: &PersistedGrid) -> Result<Self, GridError> {
        record.validate()?;
        let mut grid = Grid::new(record.rows, record.cols)
            .map_err(|e| GridError::CorruptRecord(e.to_string()))?;
        for (i, pc) in record.cells.iter().enumerate() {
            let p = grid.bounds.point(i);
            grid.cells[i] = Cell::default()
                .with_wall(pc.is_wall)
                .with_weight(pc.weight);
            if pc.is_start {
                grid.set_role(p, Role::Start);
            } else if pc.is_end {
                grid.set_role(p, Role::End);
            }
        }
        Ok(grid)
    }
}

impl PersistedGrid {
    /// Check that the record describes a grid the edit rules could have
    /// produced.
    pub fn validate(&self) -> Result<(), GridError> {
        let corrupt = |why: String| Err(GridError::CorruptRecord(why));
        if let Err(e) = check_dimensions(self.rows, self.cols) {
            return corrupt(e.to_string());
        }
        let expected = self.rows as usize * self.cols as usize;
        if self.cells.len() != expected {
            return corrupt(format!(
                "{} cells for a {}x{} grid (expected {expected})",
                self.cells.len(),
                self.rows,
                self.cols
            ));
        }
        let (mut starts, mut ends) = (0usize, 0usize);
        for (i, c) in self.cells.iter().enumerate() {
            if c.weight < DEFAULT_WEIGHT {
                return corrupt(format!("cell {i} has weight {}", c.weight));
            }
            if c.is_start && c.is_end {
                return corrupt(format!("cell {i} is both start and end"));
            }
            if (c.is_start || c.is_end) && (c.is_wall || c.weight != DEFAULT_WEIGHT) {
                return corrupt(format!("endpoint cell {i} is walled or weighted"));
            }
            starts += c.is_start as usize;
            ends += c.is_end as usize;
        }
        if starts > 1 {
            return corrupt(format!("{starts} start cells"));
        }
        if ends > 1 {
            return corrupt(format!("{ends} end cells"));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod weight_repr {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Text(String),
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        let n = match Repr::deserialize(d)? {
            Repr::Int(n) => n,
            Repr::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("weight {s:?} is not an integer")))?,
        };
        i32::try_from(n).map_err(|_| D::Error::custom(format!("weight {n} out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn p(row: i32, col: i32) -> Point {
        Point::new(col, row)
    }

    fn painted() -> Grid {
        let mut g = Grid::new(6, 8).unwrap();
        g.set_role(p(0, 0), Role::Start);
        g.set_role(p(5, 7), Role::End);
        g.toggle_wall(p(2, 3));
        g.toggle_wall(p(3, 3));
        g.set_weight(p(1, 4), 6);
        g.mark_visited(p(1, 1));
        g
    }

    #[test]
    fn record_round_trip_keeps_state() {
        let g = painted();
        let rec = g.to_record();
        assert_eq!((rec.rows, rec.cols), (6, 8));
        assert_eq!(rec.cells.len(), 48);

        let back = Grid::from_record(&rec).unwrap();
        assert_eq!((back.rows(), back.cols()), (6, 8));
        assert_eq!(back.start(), Some(p(0, 0)));
        assert_eq!(back.end(), Some(p(5, 7)));
        for (q, c) in g.iter() {
            let b = back.at(q);
            assert_eq!((b.weight, b.wall, b.role), (c.weight, c.wall, c.role), "at {q}");
        }
        // Tags are not persisted.
        assert!(!back.at(p(1, 1)).visited);
    }

    #[test]
    fn record_is_row_major() {
        let g = painted();
        let rec = g.to_record();
        assert!(rec.cells[2 * 8 + 3].is_wall);
        assert_eq!(rec.cells[8 + 4].weight, 6);
        assert!(rec.cells[0].is_start);
        assert!(rec.cells[47].is_end);
    }

    #[test]
    fn length_mismatch_is_corrupt() {
        let mut rec = painted().to_record();
        rec.cells.pop();
        assert!(matches!(Grid::from_record(&rec), Err(GridError::CorruptRecord(_))));
    }

    #[test]
    fn small_dimensions_are_corrupt() {
        let rec = PersistedGrid {
            rows: 3,
            cols: 3,
            cells: vec![PersistedCell::default(); 9],
        };
        assert!(matches!(Grid::from_record(&rec), Err(GridError::CorruptRecord(_))));
    }

    #[test]
    fn duplicate_endpoints_are_corrupt() {
        let mut rec = painted().to_record();
        rec.cells[1].is_start = true;
        assert!(matches!(rec.validate(), Err(GridError::CorruptRecord(_))));

        let mut rec = painted().to_record();
        rec.cells[10].is_end = true;
        assert!(matches!(rec.validate(), Err(GridError::CorruptRecord(_))));
    }

    #[test]
    fn inconsistent_cells_are_corrupt() {
        let mut rec = painted().to_record();
        rec.cells[0].is_wall = true;
        assert!(rec.validate().is_err());

        let mut rec = painted().to_record();
        rec.cells[5].weight = 0;
        assert!(rec.validate().is_err());

        let mut rec = painted().to_record();
        rec.cells[5].is_start = true;
        rec.cells[5].is_end = true;
        assert!(rec.validate().is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_fields() {
        let rec = Grid::new(5, 5).unwrap().to_record();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"isWall\":false"));
        assert!(json.contains("\"isStart\":false"));
        assert!(json.contains("\"rows\":5"));
    }

    #[test]
    fn weight_accepts_string_or_int() {
        let json = r#"{"weight":"7","isWall":false,"isStart":false,"isEnd":false}"#;
        let c: PersistedCell = serde_json::from_str(json).unwrap();
        assert_eq!(c.weight, 7);

        let json = r#"{"weight":3,"isWall":true,"isStart":false,"isEnd":false}"#;
        let c: PersistedCell = serde_json::from_str(json).unwrap();
        assert_eq!(c.weight, 3);
        assert!(c.is_wall);

        let json = r#"{"weight":"heavy","isWall":false,"isStart":false,"isEnd":false}"#;
        assert!(serde_json::from_str::<PersistedCell>(json).is_err());
    }

    #[test]
    fn missing_fields_fail_to_parse() {
        let json = r#"{"rows":5,"cells":[]}"#;
        assert!(serde_json::from_str::<PersistedGrid>(json).is_err());
    }
}
