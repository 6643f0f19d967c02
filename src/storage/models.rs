//! Data models for the storage layer

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    cli::types::{ManagerName, WeekKey},
    lineup::Lineup,
};

/// A lineup locked in for one manager and week. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedLineup {
    pub manager: ManagerName,
    pub week: WeekKey,
    /// Unix seconds at save time.
    pub submitted_at: u64,
    pub lineup: Lineup,
}

impl SubmittedLineup {
    pub fn new(manager: ManagerName, week: WeekKey, lineup: Lineup) -> Self {
        Self {
            manager,
            week,
            submitted_at: unix_now(),
            lineup,
        }
    }
}

/// Season-long record for one manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStanding {
    pub manager: ManagerName,
    pub total_points: f64,
    pub firsts: u32,
    pub seconds: u32,
    pub thirds: u32,
}

impl SeasonStanding {
    pub fn new(manager: ManagerName) -> Self {
        Self {
            manager,
            total_points: 0.0,
            firsts: 0,
            seconds: 0,
            thirds: 0,
        }
    }

    /// Fold one finished week into the record.
    pub fn apply(&mut self, result: &WeekResult) {
        self.total_points = crate::pool::round2(self.total_points + result.points);
        match result.placement {
            Some(1) => self.firsts += 1,
            Some(2) => self.seconds += 1,
            Some(3) => self.thirds += 1,
            _ => {}
        }
    }
}

/// One manager's outcome for a finished week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    pub manager: ManagerName,
    pub points: f64,
    /// 1, 2 or 3 for a podium finish.
    pub placement: Option<u8>,
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
