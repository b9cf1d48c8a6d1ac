//! Pacing seam between a [`Session`](crate::Session) and its host.
//!
//! The session never sleeps on its own. Whoever drives it hands over a
//! [`Scheduler`] that decides what "wait for the next step" means.

use std::time::Duration;

/// Waits between two units of search or reveal work.
pub trait Scheduler {
    fn wait(&mut self, delay: Duration);
}

/// Blocks the current thread for the requested delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepScheduler;

impl Scheduler for SleepScheduler {
    fn wait(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Never waits; runs the work as a tight loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn wait(&mut self, _delay: Duration) {}
}

impl<F: FnMut(Duration)> Scheduler for F {
    fn wait(&mut self, delay: Duration) {
        self(delay)
    }
}
