//! BragginRights DFS league library
//!
//! A small daily-fantasy salary-cap league: managers pick a nine-player
//! lineup from the week's salary file, lock it in once, and are ranked on
//! the players' realized fantasy points.
//!
//! ## Features
//!
//! - **Player Pool**: Load the weekly salary CSV and filter it by position, team, opponent and salary
//! - **Lineup Engine**: Slot eligibility, one-slot-per-player, and the $60,000 cap
//! - **Editing Sessions**: Build, reset and submit; a submitted lineup is locked for the week
//! - **Storage**: Append-only lineups and season standings in SQLite or a JSON file
//! - **Scoring**: Realized points from a Sleeper-compatible stats API, cached per render
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bragginrights::{
//!     lineup::{EditingSession, LineupEngine},
//!     pool::{latest_weekly_file, PlayerPool},
//!     storage::LeagueDatabase,
//!     ManagerName,
//! };
//! use std::path::Path;
//!
//! # fn example() -> bragginrights::Result<()> {
//! let file = latest_weekly_file(Path::new("salaries"))?;
//! let pool = PlayerPool::load(&file.path)?;
//! let db = LeagueDatabase::open(Path::new("league.db"))?;
//!
//! let mut session = EditingSession::open(LineupEngine::default(), &db, ManagerName::new("Amos"), file.week)?;
//! session.assign("QB".parse()?, Some(pool.find("Josh Allen")?.clone()))?;
//! session.submit(&db)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Every setting can come from the environment instead of a flag:
//! ```bash
//! export BRAGGIN_SALARIES_DIR=salaries
//! export BRAGGIN_STORE=sqlite
//! export BRAGGIN_MANAGERS="Mariah,David,Amos,AJ,Danny"
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod leaderboard;
pub mod lineup;
pub mod pool;
pub mod scoring;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{ManagerName, Position, Season, StoreBackend, Week, WeekKey};
pub use error::{LeagueError, Result};
pub use lineup::{EditingSession, Lineup, LineupEngine, SlotLabel, SALARY_CAP};
pub use pool::{Player, PlayerPool};

pub const SALARIES_DIR_ENV_VAR: &str = "BRAGGIN_SALARIES_DIR";
pub const MAPPING_FILE_ENV_VAR: &str = "BRAGGIN_MAPPING_FILE";
pub const STORE_ENV_VAR: &str = "BRAGGIN_STORE";
pub const STORE_PATH_ENV_VAR: &str = "BRAGGIN_STORE_PATH";
pub const MANAGERS_ENV_VAR: &str = "BRAGGIN_MANAGERS";
pub const STATS_URL_ENV_VAR: &str = "BRAGGIN_STATS_URL";
pub const REQUIRE_COMPLETE_ENV_VAR: &str = "BRAGGIN_REQUIRE_COMPLETE";
