//! Player filters shared by the pool listing and the slot dropdowns.

use crate::{cli::types::Position, pool::Player};

/// Projection over the weekly pool.
///
/// Empty membership lists mean "no restriction"; the salary range is inclusive
/// on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    pub positions: Vec<Position>,
    pub teams: Vec<String>,
    pub opponents: Vec<String>,
    pub min_salary: Option<u32>,
    pub max_salary: Option<u32>,
}

impl PlayerFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, player: &Player) -> bool {
        (self.positions.is_empty() || self.positions.contains(&player.position))
            && member(&self.teams, &player.team)
            && member(&self.opponents, &player.opponent)
            && self.min_salary.map_or(true, |min| player.salary >= min)
            && self.max_salary.map_or(true, |max| player.salary <= max)
    }
}

fn member(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}
