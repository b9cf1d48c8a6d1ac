//! Session configuration.

use std::time::Duration;

use pathgrid_core::grid::{DEFAULT_COLS, DEFAULT_ROWS};

/// Settings for a [`Session`](crate::Session).
///
/// Delays only pace the animation; they never change what the search finds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Rows of the initial grid.
    #[cfg_attr(feature = "serde", serde(default = "defaults::rows"))]
    pub rows: i32,

    /// Columns of the initial grid.
    #[cfg_attr(feature = "serde", serde(default = "defaults::cols"))]
    pub cols: i32,

    /// Pause between two search expansions (milliseconds).
    #[cfg_attr(feature = "serde", serde(default = "defaults::step_delay_ms"))]
    pub step_delay_ms: u64,

    /// Pause between two path reveals (milliseconds).
    #[cfg_attr(feature = "serde", serde(default = "defaults::reveal_delay_ms"))]
    pub reveal_delay_ms: u64,
}

impl SessionConfig {
    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    #[inline]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            cols: defaults::cols(),
            step_delay_ms: defaults::step_delay_ms(),
            reveal_delay_ms: defaults::reveal_delay_ms(),
        }
    }
}

mod defaults {
    use super::*;

    pub fn rows() -> i32 {
        DEFAULT_ROWS
    }

    pub fn cols() -> i32 {
        DEFAULT_COLS
    }

    pub fn step_delay_ms() -> u64 {
        30
    }

    pub fn reveal_delay_ms() -> u64 {
        50
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SessionConfig = serde_json::from_str(r#"{"rows": 20}"#).unwrap();
        assert_eq!(cfg.rows, 20);
        assert_eq!(cfg.cols, 10);
        assert_eq!(cfg.step_delay(), Duration::from_millis(30));
        assert_eq!(cfg.reveal_delay(), Duration::from_millis(50));
    }

    #[test]
    fn empty_object_is_default() {
        let cfg: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SessionConfig::default());
    }
}
