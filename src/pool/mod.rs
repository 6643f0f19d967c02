//! Weekly player pool loaded from the salary CSV.
//!
//! The pool is a read-only snapshot for one invocation: it is rebuilt from the
//! week's file every time and never carried across weeks. Player names
//! (`first name` + `last name`) are the join key for lineups, mappings and
//! scores.

pub mod filters;
pub mod weekly_file;


use std::{collections::HashMap, fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{cli::types::Position, error::LeagueError, Result};

pub use filters::PlayerFilter;
pub use weekly_file::{find_weekly_file, latest_weekly_file, WeeklyFile};

/// Columns every weekly file must carry (matched case/whitespace-insensitively).
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "first name",
    "last name",
    "position",
    "team",
    "opponent",
    "salary",
    "fppg",
];

/// One player on the weekly salary sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub team: String,
    pub opponent: String,
    pub salary: u32,
    /// Projected fantasy points per game, rounded to 2 places.
    pub fppg: f64,
}

impl Player {
    /// Dropdown-style label: `Josh Allen | $8800 | 22.45 FPPG`.
    pub fn label(&self) -> String {
        format!("{} | ${} | {:.2} FPPG", self.name, self.salary, self.fppg)
    }
}

/// Immutable snapshot of one week's players, in file order.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: Vec<Player>,
    by_name: HashMap<String, usize>,
}

impl PlayerPool {
    /// Build a pool from already-normalized players. Later duplicates of a name
    /// are dropped.
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut pool = Self::default();
        for player in players {
            if pool.by_name.contains_key(&player.name) {
                warn!("duplicate player '{}' in weekly file, keeping first row", player.name);
                continue;
            }
            pool.by_name.insert(player.name.clone(), pool.players.len());
            pool.players.push(player);
        }
        pool
    }

    /// Load the pool from a weekly salary CSV on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let pool = Self::load_from_reader(file)?;
        debug!("loaded {} players from {}", pool.len(), path.display());
        Ok(pool)
    }

    /// Load the pool from any CSV reader.
    ///
    /// Missing required columns or unparseable salary/fppg values fail the
    /// whole load with [`LeagueError::MalformedInput`]; there is no partial
    /// pool. Rows with a position outside QB/RB/WR/TE/D are skipped.
    pub fn load_from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers: Vec<String> = reader
            .headers()
            .map_err(malformed)?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut columns = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, wanted) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            match headers.iter().position(|h| h == wanted) {
                Some(idx) => *slot = idx,
                None => missing.push(wanted),
            }
        }
        if !missing.is_empty() {
            return Err(LeagueError::MalformedInput {
                message: format!("missing required column(s): {}", missing.join(", ")),
            });
        }
        let [first_col, last_col, position_col, team_col, opponent_col, salary_col, fppg_col] = columns;

        let mut players = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(malformed)?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();
            let line = row + 2;

            let name = format!("{} {}", field(first_col), field(last_col)).trim().to_string();
            let position = match field(position_col).parse::<Position>() {
                Ok(p) => p,
                Err(_) => {
                    warn!(
                        "skipping '{}' on line {}: unsupported position {:?}",
                        name,
                        line,
                        field(position_col)
                    );
                    continue;
                }
            };

            players.push(Player {
                name,
                position,
                team: field(team_col).to_string(),
                opponent: field(opponent_col).to_string(),
                salary: parse_salary(field(salary_col)).ok_or_else(|| LeagueError::MalformedInput {
                    message: format!("line {}: invalid salary {:?}", line, field(salary_col)),
                })?,
                fppg: parse_fppg(field(fppg_col)).ok_or_else(|| LeagueError::MalformedInput {
                    message: format!("line {}: invalid fppg {:?}", line, field(fppg_col)),
                })?,
            });
        }

        Ok(Self::from_players(players))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Look a player up by display name (exact match).
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.by_name.get(name).map(|&idx| &self.players[idx])
    }

    /// Look a player up by name, failing with [`LeagueError::PlayerNotFound`].
    pub fn find(&self, name: &str) -> Result<&Player> {
        self.get(name.trim())
            .ok_or_else(|| LeagueError::PlayerNotFound {
                name: name.to_string(),
            })
    }

    /// Narrowed view of the pool; never mutates it.
    pub fn filter<'a>(&'a self, filter: &'a PlayerFilter) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| filter.matches(p))
    }

    /// Distinct teams in file order.
    pub fn teams(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.team.as_str()))
    }

    /// Distinct opponents in file order.
    pub fn opponents(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.opponent.as_str()))
    }

    /// Lowest and highest salary in the pool, if any players were loaded.
    pub fn salary_bounds(&self) -> Option<(u32, u32)> {
        let min = self.players.iter().map(|p| p.salary).min()?;
        let max = self.players.iter().map(|p| p.salary).max()?;
        Some((min, max))
    }
}

fn malformed(err: csv::Error) -> LeagueError {
    LeagueError::MalformedInput {
        message: err.to_string(),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Salaries are whole currency units; tolerate `$` and thousands separators.
fn parse_salary(raw: &str) -> Option<u32> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    if let Ok(v) = cleaned.parse::<u32>() {
        return Some(v);
    }
    let v = cleaned.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0 && v <= u32::MAX as f64).then(|| v.round() as u32)
}

/// Blank means no history yet and is treated as zero.
fn parse_fppg(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(0.0);
    }
    let v = raw.parse::<f64>().ok()?;
    v.is_finite().then(|| round2(v))
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
