//! CLI argument definitions and parsing.

pub mod types;

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use types::{Position, StoreBackend, WeekKey};

use crate::{core::ConfigOverrides, error::LeagueError, pool::PlayerFilter};

/// Settings shared by every command. Each falls back to its environment
/// variable, then to the built-in default.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Folder holding the weekly salary CSVs (or set `BRAGGIN_SALARIES_DIR`).
    #[clap(long, global = true)]
    pub salaries_dir: Option<PathBuf>,

    /// Player name → stats id mapping file (or set `BRAGGIN_MAPPING_FILE`).
    #[clap(long, global = true)]
    pub mapping_file: Option<PathBuf>,

    /// Lineup store backend (or set `BRAGGIN_STORE`).
    #[clap(long, global = true, value_enum)]
    pub store: Option<StoreBackend>,

    /// Lineup store location (or set `BRAGGIN_STORE_PATH`).
    #[clap(long, global = true)]
    pub store_path: Option<PathBuf>,

    /// Log debug diagnostics to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn overrides(&self, require_complete: bool) -> ConfigOverrides {
        ConfigOverrides {
            salaries_dir: self.salaries_dir.clone(),
            mapping_file: self.mapping_file.clone(),
            store: self.store,
            store_path: self.store_path.clone(),
            require_complete,
        }
    }
}

/// Player pool filters shared between commands
#[derive(Debug, Args, Default)]
pub struct PoolFilters {
    /// Filter by position (repeatable): `-p RB -p WR`.
    #[clap(short = 'p', long = "position")]
    pub positions: Vec<Position>,

    /// Filter by team abbreviation (repeatable).
    #[clap(long = "team")]
    pub teams: Vec<String>,

    /// Filter by opponent (repeatable).
    #[clap(long = "opponent")]
    pub opponents: Vec<String>,

    /// Lowest salary to include.
    #[clap(long)]
    pub min_salary: Option<u32>,

    /// Highest salary to include.
    #[clap(long)]
    pub max_salary: Option<u32>,
}

impl PoolFilters {
    pub fn to_filter(&self) -> PlayerFilter {
        PlayerFilter {
            positions: self.positions.clone(),
            teams: self.teams.clone(),
            opponents: self.opponents.clone(),
            min_salary: self.min_salary,
            max_salary: self.max_salary,
        }
    }
}

/// `SLOT=Player Name`, e.g. `RB1="Bijan Robinson"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPick {
    pub slot: String,
    pub player: String,
}

impl FromStr for SlotPick {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((slot, player)) if !slot.trim().is_empty() && !player.trim().is_empty() => {
                Ok(Self {
                    slot: slot.trim().to_string(),
                    player: player.trim().to_string(),
                })
            }
            _ => Err(LeagueError::UnknownSlot {
                slot: format!("{} (expected SLOT=Player Name)", s),
            }),
        }
    }
}

#[derive(Debug, Args)]
pub struct ManagerArg {
    /// Manager name, one of the league's managers.
    #[clap(long, short)]
    pub manager: String,
}

#[derive(Debug, Subcommand)]
pub enum LineupCmd {
    /// List the players that can fill a slot.
    ///
    /// Players already picked for another slot are left out; the slot's own
    /// pick is always listed.
    Options {
        #[clap(flatten)]
        manager: ManagerArg,

        /// Slot to fill, e.g. QB, RB2, FLEX.
        #[clap(long, short)]
        slot: String,

        /// Picks already made for other slots (repeatable).
        #[clap(long = "pick")]
        picks: Vec<SlotPick>,

        #[clap(flatten)]
        filters: PoolFilters,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show the lineup a manager submitted.
    Show {
        #[clap(flatten)]
        manager: ManagerArg,

        /// Week to show, e.g. 2025_week_3 (defaults to the current week).
        #[clap(long, short)]
        week: Option<WeekKey>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Build a lineup from picks and lock it in for the current week.
    Submit {
        #[clap(flatten)]
        manager: ManagerArg,

        /// One pick per slot (repeatable): `--pick QB="Josh Allen"`.
        #[clap(long = "pick", required = true)]
        picks: Vec<SlotPick>,

        /// Refuse lineups with empty slots (or set `BRAGGIN_REQUIRE_COMPLETE`).
        #[clap(long)]
        require_complete: bool,
    },

    /// Build a lineup interactively.
    Edit {
        #[clap(flatten)]
        manager: ManagerArg,

        /// Refuse lineups with empty slots (or set `BRAGGIN_REQUIRE_COMPLETE`).
        #[clap(long)]
        require_complete: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum StandingsCmd {
    /// Show the season standings.
    Show {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Fold a finished week's results into the season standings (once per week).
    Record {
        /// Week to record, e.g. 2025_week_3 (defaults to the current week).
        #[clap(long, short)]
        week: Option<WeekKey>,

        /// Reuse scores saved by earlier runs.
        #[clap(long)]
        score_cache: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List this week's player pool.
    Players {
        #[clap(flatten)]
        filters: PoolFilters,

        /// Week of the pool to list (defaults to the latest salary file).
        #[clap(long, short)]
        week: Option<WeekKey>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Build, submit and view lineups.
    Lineup {
        #[clap(subcommand)]
        cmd: LineupCmd,
    },

    /// Score every submitted lineup for a week.
    Leaderboard {
        /// Week to score, e.g. 2025_week_3 (defaults to the current week).
        #[clap(long, short)]
        week: Option<WeekKey>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Reuse scores saved by earlier runs (and save new ones).
        #[clap(long)]
        score_cache: bool,

        /// Drop saved scores and fetch everything again.
        #[clap(long)]
        refresh: bool,
    },

    /// Season standings.
    Standings {
        #[clap(subcommand)]
        cmd: StandingsCmd,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "bragginrights",
    version,
    about = "Family BragginRights DFS salary-cap league"
)]
pub struct BragginRights {
    #[clap(flatten)]
    pub global: GlobalArgs,

    #[clap(subcommand)]
    pub command: Commands,
}
