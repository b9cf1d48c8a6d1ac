//! Random obstacle maps for the demo.

use pathgrid_core::Point;
use pathgrid_session::{Command, Session, SessionError};
use rand::Rng;

/// Odds used when painting a random map.
#[derive(Debug, Clone, Copy)]
pub struct ScatterRule {
    /// Chance of a cell becoming a wall.
    pub wall_pct: f64,
    /// Chance of a non-wall cell getting a weight above 1.
    pub weight_pct: f64,
    /// Largest weight handed out.
    pub max_weight: i32,
}

impl Default for ScatterRule {
    fn default() -> Self {
        Self {
            wall_pct: 0.25,
            weight_pct: 0.15,
            max_weight: 9,
        }
    }
}

/// Paint random walls and weights over the session's grid, then put the
/// start in the top-left and the end in the bottom-right corner.
pub fn scatter<R: Rng>(
    session: &mut Session,
    rng: &mut R,
    rule: ScatterRule,
) -> Result<(), SessionError> {
    session.apply(Command::Reset)?;
    let bounds = session.grid().bounds();
    for p in bounds.iter() {
        if rng.random_bool(rule.wall_pct) {
            session.apply(Command::ToggleWall(p))?;
        } else if rule.max_weight > 1 && rng.random_bool(rule.weight_pct) {
            let w = rng.random_range(2..=rule.max_weight);
            session.apply(Command::SetWeight(p, w))?;
        }
    }
    session.apply(Command::DesignateStart(Point::ZERO))?;
    session.apply(Command::DesignateEnd(Point::new(bounds.max.x - 1, bounds.max.y - 1)))?;
    Ok(())
}
