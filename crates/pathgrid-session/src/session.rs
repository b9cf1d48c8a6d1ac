//! The [`Session`]: one user's grid, edit mode and running search.
//!
//! All state that a caller would otherwise keep in globals lives here and is
//! changed only through session methods:
//!
//! 1. edits arrive as [`Command`]s or mode-based [`clicks`](Session::click);
//! 2. [`find_path`](Session::find_path) prepares a search;
//! 3. the host calls [`tick`](Session::tick) until
//!    [`next_delay`](Session::next_delay) returns `None`, waiting that long
//!    between ticks (or hands a [`Scheduler`] to [`run`](Session::run)).
//!
//! Every edit abandons a search or reveal in progress, so the grid never
//! changes under a running search.

use std::time::Duration;

use pathgrid_core::{Grid, Point, Role, Storage, parse_weight};
use pathgrid_paths::{AstarSearch, Path, PathAnimator, SearchStep};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::schedule::Scheduler;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// What a click on a cell does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditMode {
    Start,
    End,
    #[default]
    Wall,
    /// Give the clicked cell this weight.
    Weight(i32),
    /// Return the clicked cell to default.
    Erase,
}

/// A discrete edit delivered by the input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    DesignateStart(Point),
    DesignateEnd(Point),
    ToggleWall(Point),
    SetWeight(Point, i32),
    ClearCell(Point),
    Resize { rows: i32, cols: i32 },
    Reset,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    PathFound(Path),
    NoPathFound,
}

/// What one [`Session::tick`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The search expanded this cell (tagged `visited` unless an endpoint).
    Explored(Point),
    /// The search reached the end; reveal ticks follow.
    PathFound(Path),
    /// The search ran out of cells. Nothing follows.
    NoPathFound,
    /// This path cell was tagged `on_path`.
    Revealed(Point),
    /// Nothing is running.
    Idle,
}

enum Phase {
    Idle,
    Searching(AstarSearch),
    Revealing(PathAnimator),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Owns the grid and drives searches over it one tick at a time.
pub struct Session {
    grid: Grid,
    mode: EditMode,
    config: SessionConfig,
    phase: Phase,
    outcome: Option<Outcome>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            mode: EditMode::default(),
            config: SessionConfig::default(),
            phase: Phase::Idle,
            outcome: None,
        }
    }
}

impl Session {
    /// Create a session with a blank grid sized by `config`.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let grid = Grid::new(config.rows, config.cols)?;
        Ok(Self {
            grid,
            mode: EditMode::default(),
            config,
            phase: Phase::Idle,
            outcome: None,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    #[inline]
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Whether a search or reveal is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// The running search, if the session is in its search phase.
    pub fn search(&self) -> Option<&AstarSearch> {
        match &self.phase {
            Phase::Searching(s) => Some(s),
            _ => None,
        }
    }

    /// How the most recent search ended, if it has.
    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Apply an edit. Returns whether the grid changed.
    ///
    /// Edits the grid refuses (a wall on an endpoint, a weight below 1, a
    /// cell outside the grid) are ignored and return `Ok(false)`. Only a
    /// resize to an invalid size is an error. An edit that changes the grid
    /// abandons the run in progress; a refused one leaves it running.
    pub fn apply(&mut self, cmd: Command) -> Result<bool, SessionError> {
        let changed = match cmd {
            Command::DesignateStart(p) => self.grid.set_role(p, Role::Start),
            Command::DesignateEnd(p) => self.grid.set_role(p, Role::End),
            Command::ToggleWall(p) => self.grid.toggle_wall(p),
            Command::SetWeight(p, w) => self.grid.set_weight(p, w),
            Command::ClearCell(p) => self.grid.clear_cell(p),
            Command::Resize { rows, cols } => {
                self.grid.resize(rows, cols)?;
                log::info!("grid resized to {rows}x{cols}");
                true
            }
            Command::Reset => {
                self.grid.reset();
                log::info!("grid reset");
                true
            }
        };
        if changed {
            self.cancel();
        } else {
            log::debug!("ignored edit {cmd:?}");
        }
        Ok(changed)
    }

    /// Apply a click on `p` according to the current [`EditMode`].
    pub fn click(&mut self, p: Point) -> Result<bool, SessionError> {
        let cmd = match self.mode {
            EditMode::Start => Command::DesignateStart(p),
            EditMode::End => Command::DesignateEnd(p),
            EditMode::Wall => Command::ToggleWall(p),
            EditMode::Weight(w) => Command::SetWeight(p, w),
            EditMode::Erase => Command::ClearCell(p),
        };
        self.apply(cmd)
    }

    /// Set the weight of `p` from user-entered text.
    ///
    /// Text that is not an integer ≥ 1 is ignored.
    pub fn set_weight_text(&mut self, p: Point, text: &str) -> Result<bool, SessionError> {
        match parse_weight(text) {
            Ok(w) => self.apply(Command::SetWeight(p, w)),
            Err(e) => {
                log::debug!("ignored weight edit at {p}: {e}");
                Ok(false)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Abandon whatever search or reveal is running. Tags already written
    /// stay on the grid.
    pub fn cancel(&mut self) {
        if self.is_running() {
            log::debug!("abandoning run in progress");
        }
        self.phase = Phase::Idle;
    }

    /// Start a new search from the grid's start to its end.
    ///
    /// Fails with [`SearchError::MissingEndpoints`](pathgrid_paths::SearchError)
    /// without touching the grid if either marker is unset. Otherwise clears
    /// every `visited` / `on_path` tag left by earlier runs.
    pub fn find_path(&mut self) -> Result<(), SessionError> {
        self.cancel();
        let search = AstarSearch::for_grid(&self.grid)?;
        self.grid.clear_tags();
        self.outcome = None;
        log::info!("searching {} -> {}", search.from(), search.to());
        self.phase = Phase::Searching(search);
        Ok(())
    }

    /// Advance the running search or reveal by one unit.
    pub fn tick(&mut self) -> Tick {
        match &mut self.phase {
            Phase::Idle => Tick::Idle,
            Phase::Searching(search) => match search.step(&self.grid) {
                Some(SearchStep::Expanded(p)) => {
                    self.grid.mark_visited(p);
                    Tick::Explored(p)
                }
                Some(SearchStep::Found(path)) => {
                    log::info!("path found: {} moves, cost {}", path.edges(), path.cost());
                    let anim = PathAnimator::new(&path);
                    self.phase = if anim.is_done() {
                        Phase::Idle
                    } else {
                        Phase::Revealing(anim)
                    };
                    self.outcome = Some(Outcome::PathFound(path.clone()));
                    Tick::PathFound(path)
                }
                Some(SearchStep::Exhausted) | None => {
                    log::info!("no path found");
                    self.phase = Phase::Idle;
                    self.outcome = Some(Outcome::NoPathFound);
                    Tick::NoPathFound
                }
            },
            Phase::Revealing(anim) => match anim.next() {
                Some(p) => {
                    if anim.is_done() {
                        self.phase = Phase::Idle;
                    }
                    self.grid.mark_on_path(p);
                    Tick::Revealed(p)
                }
                None => {
                    self.phase = Phase::Idle;
                    Tick::Idle
                }
            },
        }
    }

    /// How long the host should wait before the next [`tick`](Session::tick),
    /// or `None` when nothing is running.
    pub fn next_delay(&self) -> Option<Duration> {
        match self.phase {
            Phase::Idle => None,
            Phase::Searching(_) => Some(self.config.step_delay()),
            Phase::Revealing(_) => Some(self.config.reveal_delay()),
        }
    }

    /// Run a whole search and reveal, pacing ticks with `scheduler` and
    /// calling `observe` after each one.
    pub fn run<S, F>(&mut self, scheduler: &mut S, mut observe: F) -> Result<Outcome, SessionError>
    where
        S: Scheduler + ?Sized,
        F: FnMut(&Grid, &Tick),
    {
        self.find_path()?;
        loop {
            let tick = self.tick();
            observe(&self.grid, &tick);
            match self.next_delay() {
                Some(delay) => scheduler.wait(delay),
                None => break,
            }
        }
        Ok(self.outcome.clone().unwrap_or(Outcome::NoPathFound))
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Save the grid into `storage`'s slot.
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), SessionError> {
        storage.save(&self.grid.to_record())?;
        log::info!("saved {}x{} grid", self.grid.rows(), self.grid.cols());
        Ok(())
    }

    /// Replace the grid with the one in `storage`'s slot.
    ///
    /// Returns `Ok(false)` if the slot is empty. A corrupt record aborts the
    /// load and leaves the live grid untouched.
    pub fn load<S: Storage + ?Sized>(&mut self, storage: &S) -> Result<bool, SessionError> {
        let Some(record) = storage.load()? else {
            log::debug!("nothing saved yet");
            return Ok(false);
        };
        let grid = Grid::from_record(&record).inspect_err(|e| log::warn!("load aborted: {e}"))?;
        self.cancel();
        self.outcome = None;
        self.grid = grid;
        log::info!("loaded {}x{} grid", self.grid.rows(), self.grid.cols());
        Ok(true)
    }
}
