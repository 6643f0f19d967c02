//! Time-related types for league seasons and scoring weeks.

use crate::error::{LeagueError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static WEEK_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})_week_(\d+)").expect("valid week key pattern"));

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scoring period: a season year and a week number.
///
/// Rendered as `2025_week_3`, the same token the weekly salary files carry in
/// their names, and used as the storage key for submitted lineups.
///
/// # Examples
///
/// ```rust
/// use bragginrights::{Season, Week, WeekKey};
///
/// let key: WeekKey = "2025_week_3".parse().unwrap();
/// assert_eq!(key, WeekKey::new(Season::new(2025), Week::new(3)));
/// assert_eq!(key.to_string(), "2025_week_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    pub season: Season,
    pub week: Week,
}

impl WeekKey {
    pub fn new(season: Season, week: Week) -> Self {
        Self { season, week }
    }

    /// Find a `<year>_week_<n>` token anywhere in `text` (typically a file name).
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = WEEK_KEY_RE.captures(text)?;
        let season = caps.get(1)?.as_str().parse().ok()?;
        let week = caps.get(2)?.as_str().parse().ok()?;
        Some(Self::new(Season(season), Week(week)))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_week_{}", self.season, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match Self::find_in(trimmed) {
            Some(key) if key.to_string() == trimmed => Ok(key),
            _ => Err(LeagueError::InvalidWeekKey {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
