//! Flat-file JSON backend.
//!
//! The whole league lives in one document. Writes go through a temp file and
//! a rename so readers never see a half-written file. The check-then-write
//! for a (manager, week) pair runs under an exclusive advisory lock on a
//! sidecar `<file>.lock`, so writers in other processes wait their turn.

use std::{
    collections::BTreeMap,
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{models::*, LineupStore, StandingsStore};
use crate::{
    cli::types::{ManagerName, WeekKey},
    core::write_string,
    error::LeagueError,
    lineup::Lineup,
    Result,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeagueDocument {
    #[serde(default)]
    lineups: Vec<SubmittedLineup>,
    #[serde(default)]
    standings: Vec<SeasonStanding>,
    #[serde(default)]
    recorded_weeks: Vec<WeekKey>,
}

struct WriteGuard<'a> {
    _memory: MutexGuard<'a, ()>,
    _file: File,
}

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    /// Held across a read-check-write. The file lock is released when the
    /// guard drops.
    fn write_guard(&self) -> Result<WriteGuard<'_>> {
        let memory = self.guard();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock()?;
        Ok(WriteGuard {
            _memory: memory,
            _file: file,
        })
    }

    /// A missing file is an empty league.
    fn read_document(&self) -> Result<LeagueDocument> {
        if !self.path.exists() {
            return Ok(LeagueDocument::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(LeagueDocument::default());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_document(&self, doc: &LeagueDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        write_string(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LineupStore for JsonFileStore {
    fn save(&self, manager: &ManagerName, week: WeekKey, lineup: &Lineup) -> Result<SubmittedLineup> {
        let _guard = self.write_guard()?;
        let mut doc = self.read_document()?;

        if doc
            .lineups
            .iter()
            .any(|l| l.week == week && &l.manager == manager)
        {
            return Err(LeagueError::Conflict {
                manager: manager.clone(),
                week,
            });
        }

        let record = SubmittedLineup::new(manager.clone(), week, lineup.clone());
        doc.lineups.push(record.clone());
        self.write_document(&doc)?;
        debug!("stored lineup for {} in {} at {}", manager, week, self.path.display());
        Ok(record)
    }

    fn load_for_week(&self, week: WeekKey) -> Result<BTreeMap<ManagerName, SubmittedLineup>> {
        let _guard = self.guard();
        Ok(self
            .read_document()?
            .lineups
            .into_iter()
            .filter(|l| l.week == week)
            .map(|l| (l.manager.clone(), l))
            .collect())
    }

    fn load_one(&self, manager: &ManagerName, week: WeekKey) -> Result<Option<SubmittedLineup>> {
        let _guard = self.guard();
        Ok(self
            .read_document()?
            .lineups
            .into_iter()
            .find(|l| l.week == week && &l.manager == manager))
    }
}

impl StandingsStore for JsonFileStore {
    fn load_standings(&self) -> Result<Vec<SeasonStanding>> {
        let _guard = self.guard();
        Ok(self.read_document()?.standings)
    }

    fn record_week(&self, week: WeekKey, results: &[WeekResult]) -> Result<()> {
        let _guard = self.write_guard()?;
        let mut doc = self.read_document()?;

        if doc.recorded_weeks.contains(&week) {
            return Err(LeagueError::WeekAlreadyRecorded { week });
        }

        for result in results {
            match doc.standings.iter_mut().find(|s| s.manager == result.manager) {
                Some(standing) => standing.apply(result),
                None => {
                    let mut standing = SeasonStanding::new(result.manager.clone());
                    standing.apply(result);
                    doc.standings.push(standing);
                }
            }
        }
        doc.recorded_weeks.push(week);
        doc.recorded_weeks.sort();

        self.write_document(&doc)
    }

    fn recorded_weeks(&self) -> Result<Vec<WeekKey>> {
        let _guard = self.guard();
        Ok(self.read_document()?.recorded_weeks)
    }
}
