//! **pathgrid-session**: the explicit session object for pathgrid.
//!
//! A [`Session`] owns the [`Grid`](pathgrid_core::Grid), the current
//! [`EditMode`] and at most one running search. Hosts feed it [`Command`]s,
//! then drive searches and path reveals one [`Tick`] at a time, pacing them
//! with a [`Scheduler`] of their choice.

pub mod config;
pub mod error;
pub mod schedule;
pub mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use schedule::{Immediate, Scheduler, SleepScheduler};
pub use session::{Command, EditMode, Outcome, Session, Tick};
