//! Realized fantasy points for rostered players.
//!
//! Players are joined to the stats provider through a name → identifier
//! mapping file; points come from a Sleeper-compatible stats endpoint and
//! are cached per (identifier, season, week).

pub mod http;
pub mod lookup;
pub mod mapping;

#[cfg(test)]
mod tests;

pub use http::fetch_player_points;
pub use lookup::{ScoreCacheKey, ScoreLookup, ScoreResult, ScoreSource};
pub use mapping::PlayerIdMapping;
