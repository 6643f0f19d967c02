//! Lineup slots and the roster shape they come from.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{cli::types::Position, error::LeagueError, Result};

/// Maximum total salary of a lineup that can be submitted.
pub const SALARY_CAP: u32 = 60_000;

/// A slot category. FLEX takes any of RB, WR or TE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKind {
    QB,
    RB,
    WR,
    TE,
    FLEX,
    D,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::QB => "QB",
            SlotKind::RB => "RB",
            SlotKind::WR => "WR",
            SlotKind::TE => "TE",
            SlotKind::FLEX => "FLEX",
            SlotKind::D => "D",
        }
    }

    /// Positions this slot kind will take.
    pub fn eligible_positions(&self) -> &'static [Position] {
        match self {
            SlotKind::QB => &[Position::QB],
            SlotKind::RB => &[Position::RB],
            SlotKind::WR => &[Position::WR],
            SlotKind::TE => &[Position::TE],
            SlotKind::FLEX => &[Position::RB, Position::WR, Position::TE],
            SlotKind::D => &[Position::D],
        }
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.eligible_positions().contains(&position)
    }
}

impl FromStr for SlotKind {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(SlotKind::QB),
            "RB" => Ok(SlotKind::RB),
            "WR" => Ok(SlotKind::WR),
            "TE" => Ok(SlotKind::TE),
            "FLEX" => Ok(SlotKind::FLEX),
            "D" | "DEF" | "DST" => Ok(SlotKind::D),
            _ => Err(LeagueError::UnknownSlot {
                slot: s.to_string(),
            }),
        }
    }
}

/// A single position in a lineup, e.g. `QB`, `RB2`, `FLEX`.
///
/// Categories with more than one slot are numbered from 1; single-slot
/// categories carry no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotLabel {
    pub kind: SlotKind,
    pub ordinal: Option<u8>,
}

impl SlotLabel {
    pub fn single(kind: SlotKind) -> Self {
        Self {
            kind,
            ordinal: None,
        }
    }

    pub fn numbered(kind: SlotKind, ordinal: u8) -> Self {
        Self {
            kind,
            ordinal: Some(ordinal),
        }
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.kind.accepts(position)
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ordinal {
            Some(n) => write!(f, "{}{}", self.kind.as_str(), n),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

impl FromStr for SlotLabel {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (kind, digits) = trimmed.split_at(split);
        let unknown = || LeagueError::UnknownSlot {
            slot: s.to_string(),
        };

        let kind: SlotKind = kind.parse().map_err(|_| unknown())?;
        if digits.is_empty() {
            return Ok(Self::single(kind));
        }
        match digits.parse::<u8>() {
            Ok(n) if n >= 1 => Ok(Self::numbered(kind, n)),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for SlotLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How many slots of each kind a lineup has, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    counts: Vec<(SlotKind, u8)>,
}

impl RosterConfig {
    pub fn new(counts: Vec<(SlotKind, u8)>) -> Self {
        Self { counts }
    }

    /// Every required slot label, in display order.
    pub fn labels(&self) -> Vec<SlotLabel> {
        let mut labels = Vec::new();
        for &(kind, count) in &self.counts {
            if count == 1 {
                labels.push(SlotLabel::single(kind));
            } else {
                labels.extend((1..=count).map(|n| SlotLabel::numbered(kind, n)));
            }
        }
        labels
    }

    pub fn contains(&self, slot: SlotLabel) -> bool {
        self.labels().contains(&slot)
    }

    /// Parse a slot label and check it is part of this roster.
    pub fn resolve(&self, raw: &str) -> Result<SlotLabel> {
        let slot: SlotLabel = raw.parse()?;
        if self.contains(slot) {
            Ok(slot)
        } else {
            Err(LeagueError::UnknownSlot {
                slot: raw.to_string(),
            })
        }
    }
}

impl Default for RosterConfig {
    /// QB, RB×2, WR×3, TE, FLEX, D.
    fn default() -> Self {
        Self::new(vec![
            (SlotKind::QB, 1),
            (SlotKind::RB, 2),
            (SlotKind::WR, 3),
            (SlotKind::TE, 1),
            (SlotKind::FLEX, 1),
            (SlotKind::D, 1),
        ])
    }
}

/// Everything the engine needs to judge a lineup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupRules {
    pub salary_cap: u32,
    pub roster: RosterConfig,
    /// Refuse to submit lineups with empty slots.
    pub require_complete: bool,
}

impl Default for LineupRules {
    fn default() -> Self {
        Self {
            salary_cap: SALARY_CAP,
            roster: RosterConfig::default(),
            require_complete: false,
        }
    }
}
