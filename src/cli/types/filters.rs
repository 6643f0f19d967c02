//! Selector enums for CLI commands.

use std::fmt;

/// Which lineup store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StoreBackend {
    /// A single flat JSON document
    Json,
    /// A local SQLite database (safe across concurrent processes)
    #[default]
    Sqlite,
}

impl StoreBackend {
    /// File name used when no explicit store path is configured.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            StoreBackend::Json => "lineups.json",
            StoreBackend::Sqlite => "league.db",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StoreBackend::Json => "json",
            StoreBackend::Sqlite => "sqlite",
        };
        write!(f, "{}", s)
    }
}
