//! Storage layer for submitted lineups and season standings
//!
//! Both backends implement the same two traits and are picked once, at the
//! edge, from configuration:
//! - `json_file`: a single flat JSON document
//! - `schema` / `queries`: a local SQLite database

pub mod json_file;
pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

use std::{collections::BTreeMap, path::Path};

use crate::{
    cli::types::{ManagerName, StoreBackend, WeekKey},
    lineup::Lineup,
    Result,
};

pub use json_file::JsonFileStore;
pub use models::*;
pub use schema::LeagueDatabase;

/// Persistence for submitted lineups, append-if-absent per (manager, week).
pub trait LineupStore {
    /// Store `lineup` for the pair. Fails with
    /// [`LeagueError::Conflict`](crate::LeagueError::Conflict) when a record
    /// already exists; the existing record is left as it was.
    fn save(&self, manager: &ManagerName, week: WeekKey, lineup: &Lineup) -> Result<SubmittedLineup>;

    /// Every lineup stored for `week`, keyed by manager.
    fn load_for_week(&self, week: WeekKey) -> Result<BTreeMap<ManagerName, SubmittedLineup>>;

    fn load_one(&self, manager: &ManagerName, week: WeekKey) -> Result<Option<SubmittedLineup>>;
}

/// Season standings, read for display and updated once per finished week.
pub trait StandingsStore {
    fn load_standings(&self) -> Result<Vec<SeasonStanding>>;

    /// Fold a finished week into the standings. Recording the same week twice
    /// fails with [`LeagueError::WeekAlreadyRecorded`](crate::LeagueError::WeekAlreadyRecorded).
    fn record_week(&self, week: WeekKey, results: &[WeekResult]) -> Result<()>;

    fn recorded_weeks(&self) -> Result<Vec<WeekKey>>;
}

/// A store that keeps both lineups and standings.
pub trait LeagueStore: LineupStore + StandingsStore {}

impl<T: LineupStore + StandingsStore> LeagueStore for T {}

/// Open the configured backend at `path`.
pub fn open_store(backend: StoreBackend, path: &Path) -> Result<Box<dyn LeagueStore>> {
    Ok(match backend {
        StoreBackend::Json => Box::new(JsonFileStore::new(path)),
        StoreBackend::Sqlite => Box::new(LeagueDatabase::open(path)?),
    })
}
