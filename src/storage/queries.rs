//! SQLite implementations of the store traits

use std::collections::BTreeMap;

use rusqlite::{params, ErrorCode, OptionalExtension, Row, Transaction, TransactionBehavior};
use tracing::debug;

use super::{models::*, schema::LeagueDatabase, LineupStore, StandingsStore};
use crate::{
    cli::types::{ManagerName, Position, WeekKey},
    error::LeagueError,
    lineup::{Lineup, SlotLabel},
    pool::Player,
    Result,
};

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Text column that must parse into one of our types.
fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = LeagueError>,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e: LeagueError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl LeagueDatabase {
    /// `BEGIN IMMEDIATE`, so a second process waits on the busy timeout
    /// instead of failing when it upgrades a read lock.
    fn write_transaction(&self) -> Result<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }

    /// Slots of every lineup stored for `week`, grouped by manager.
    fn slots_for_week(&self, week: WeekKey) -> Result<BTreeMap<ManagerName, Lineup>> {
        let mut stmt = self.conn.prepare(
            "SELECT manager, slot, name, position, team, opponent, salary, fppg
             FROM lineup_slots
             WHERE week = ?",
        )?;

        let rows = stmt.query_map(params![week.to_string()], |row| {
            let manager = ManagerName::new(row.get::<_, String>(0)?);
            let slot: SlotLabel = parse_column(row, 1)?;
            let player = Player {
                name: row.get(2)?,
                position: parse_column::<Position>(row, 3)?,
                team: row.get(4)?,
                opponent: row.get(5)?,
                salary: row.get(6)?,
                fppg: row.get(7)?,
            };
            Ok((manager, slot, player))
        })?;

        let mut lineups: BTreeMap<ManagerName, Lineup> = BTreeMap::new();
        for row in rows {
            let (manager, slot, player) = row?;
            lineups.entry(manager).or_default().insert(slot, player);
        }
        Ok(lineups)
    }
}

impl LineupStore for LeagueDatabase {
    fn save(&self, manager: &ManagerName, week: WeekKey, lineup: &Lineup) -> Result<SubmittedLineup> {
        let record = SubmittedLineup::new(manager.clone(), week, lineup.clone());
        let tx = self.write_transaction()?;

        // The header insert doubles as the existence check: a second writer
        // for the same pair hits the primary key, whichever process it is.
        match tx.execute(
            "INSERT INTO lineups (week, manager, submitted_at) VALUES (?, ?, ?)",
            params![week.to_string(), manager.as_str(), record.submitted_at],
        ) {
            Ok(_) => {}
            Err(e) if is_constraint_violation(&e) => {
                return Err(LeagueError::Conflict {
                    manager: manager.clone(),
                    week,
                })
            }
            Err(e) => return Err(e.into()),
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO lineup_slots
                 (week, manager, slot, name, position, team, opponent, salary, fppg)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for (slot, player) in lineup.iter() {
                stmt.execute(params![
                    week.to_string(),
                    manager.as_str(),
                    slot.to_string(),
                    player.name,
                    player.position.as_str(),
                    player.team,
                    player.opponent,
                    player.salary,
                    player.fppg,
                ])?;
            }
        }

        tx.commit()?;
        debug!("stored lineup for {} in {}", manager, week);
        Ok(record)
    }

    fn load_for_week(&self, week: WeekKey) -> Result<BTreeMap<ManagerName, SubmittedLineup>> {
        let mut slots = self.slots_for_week(week)?;

        let mut stmt = self
            .conn
            .prepare("SELECT manager, submitted_at FROM lineups WHERE week = ? ORDER BY manager")?;
        let rows = stmt.query_map(params![week.to_string()], |row| {
            Ok((ManagerName::new(row.get::<_, String>(0)?), row.get::<_, u64>(1)?))
        })?;

        let mut out = BTreeMap::new();
        for row in rows {
            let (manager, submitted_at) = row?;
            let lineup = slots.remove(&manager).unwrap_or_default();
            out.insert(
                manager.clone(),
                SubmittedLineup {
                    manager,
                    week,
                    submitted_at,
                    lineup,
                },
            );
        }
        Ok(out)
    }

    fn load_one(&self, manager: &ManagerName, week: WeekKey) -> Result<Option<SubmittedLineup>> {
        let submitted_at: Option<u64> = self
            .conn
            .query_row(
                "SELECT submitted_at FROM lineups WHERE week = ? AND manager = ?",
                params![week.to_string(), manager.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(submitted_at) = submitted_at else {
            return Ok(None);
        };

        let lineup = self
            .slots_for_week(week)?
            .remove(manager)
            .unwrap_or_default();

        Ok(Some(SubmittedLineup {
            manager: manager.clone(),
            week,
            submitted_at,
            lineup,
        }))
    }
}

impl StandingsStore for LeagueDatabase {
    fn load_standings(&self) -> Result<Vec<SeasonStanding>> {
        let mut stmt = self.conn.prepare(
            "SELECT manager, total_points, firsts, seconds, thirds
             FROM season_standings
             ORDER BY manager",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SeasonStanding {
                manager: ManagerName::new(row.get::<_, String>(0)?),
                total_points: row.get(1)?,
                firsts: row.get(2)?,
                seconds: row.get(3)?,
                thirds: row.get(4)?,
            })
        })?;

        let mut standings = Vec::new();
        for row in rows {
            standings.push(row?);
        }
        Ok(standings)
    }

    fn record_week(&self, week: WeekKey, results: &[WeekResult]) -> Result<()> {
        let tx = self.write_transaction()?;

        match tx.execute(
            "INSERT INTO recorded_weeks (week, recorded_at) VALUES (?, ?)",
            params![week.to_string(), unix_now()],
        ) {
            Ok(_) => {}
            Err(e) if is_constraint_violation(&e) => {
                return Err(LeagueError::WeekAlreadyRecorded { week })
            }
            Err(e) => return Err(e.into()),
        }

        for result in results {
            let mut standing = tx
                .query_row(
                    "SELECT total_points, firsts, seconds, thirds
                     FROM season_standings WHERE manager = ?",
                    params![result.manager.as_str()],
                    |row| {
                        Ok(SeasonStanding {
                            manager: result.manager.clone(),
                            total_points: row.get(0)?,
                            firsts: row.get(1)?,
                            seconds: row.get(2)?,
                            thirds: row.get(3)?,
                        })
                    },
                )
                .optional()?
                .unwrap_or_else(|| SeasonStanding::new(result.manager.clone()));

            standing.apply(result);

            tx.execute(
                "INSERT OR REPLACE INTO season_standings
                 (manager, total_points, firsts, seconds, thirds)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    standing.manager.as_str(),
                    standing.total_points,
                    standing.firsts,
                    standing.seconds,
                    standing.thirds
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn recorded_weeks(&self) -> Result<Vec<WeekKey>> {
        let mut stmt = self.conn.prepare("SELECT week FROM recorded_weeks")?;
        let rows = stmt.query_map([], |row| parse_column::<WeekKey>(row, 0))?;

        let mut weeks = Vec::new();
        for row in rows {
            weeks.push(row?);
        }
        weeks.sort();
        Ok(weeks)
    }
}
