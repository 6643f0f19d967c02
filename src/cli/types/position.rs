//! Player positions as they appear on the weekly salary sheet.

use crate::error::LeagueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player's listed position.
///
/// The salary sheets list defenses as `DEF`; everything downstream uses `D`.
///
/// # Examples
///
/// ```rust
/// use bragginrights::Position;
///
/// let d: Position = "DEF".parse().unwrap();
/// assert_eq!(d, Position::D);
/// assert_eq!(d.to_string(), "D");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    #[serde(alias = "DEF")]
    D,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::D => "D",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "D" | "DEF" | "DST" | "D/ST" => Ok(Position::D),
            _ => Err(LeagueError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
