//! Error types for the BragginRights league tool

use thiserror::Error;

use crate::cli::types::{ManagerName, WeekKey};


pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Malformed weekly player data: {message}")]
    MalformedInput { message: String },

    #[error("No weekly player file (*.csv) found in {dir}")]
    NoWeeklyFile { dir: String },

    #[error("Invalid week key: {value} (expected e.g. 2025_week_3)")]
    InvalidWeekKey { value: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Unknown lineup slot: {slot}")]
    UnknownSlot { slot: String },

    #[error("Unknown manager: {name}")]
    UnknownManager { name: String },

    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("{player} ({position}) is not eligible for slot {slot}")]
    InvalidSlotAssignment {
        slot: String,
        player: String,
        position: String,
    },

    #[error("{player} is already in slot {existing_slot}")]
    DuplicatePlayer {
        player: String,
        existing_slot: String,
    },

    #[error("Lineup salary ${total} exceeds the ${cap} cap")]
    CapExceeded { total: u64, cap: u32 },

    #[error("Lineup is incomplete: {missing} slot(s) unfilled")]
    IncompleteLineup { missing: usize },

    #[error("{manager} already submitted a lineup for {week}")]
    AlreadySubmitted { manager: ManagerName, week: WeekKey },

    #[error("A lineup for {manager} in {week} is already stored")]
    Conflict { manager: ManagerName, week: WeekKey },

    #[error("{missing} score(s) for {week} could not be fetched; standings not recorded")]
    ScoresUnavailable { week: WeekKey, missing: usize },

    #[error("Standings already include {week}")]
    WeekAlreadyRecorded { week: WeekKey },
}
