//! Weekly leaderboard and season standings ranking.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use crate::{
    cli::types::{ManagerName, WeekKey},
    lineup::SlotLabel,
    pool::round2,
    scoring::{ScoreLookup, ScoreSource},
    storage::{SeasonStanding, SubmittedLineup, WeekResult},
};

#[cfg(test)]
mod tests;

/// Placements that count toward the season record.
pub const PODIUM: u8 = 3;

/// One rostered player with realized points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotScore {
    pub slot: SlotLabel,
    pub player: String,
    pub points: f64,
    pub source: ScoreSource,
}

impl SlotScore {
    /// `Name (12.3 pts)`
    pub fn display(&self) -> String {
        format!("{} ({} pts)", self.player, self.points)
    }

    /// Served from a score saved by an earlier run.
    pub fn is_stale(&self) -> bool {
        self.source == ScoreSource::PersistentCache
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub manager: ManagerName,
    /// Roster order.
    pub slots: Vec<SlotScore>,
    pub total: f64,
}

impl LeaderboardEntry {
    pub fn new(manager: ManagerName, mut slots: Vec<SlotScore>) -> Self {
        slots.sort_by_key(|s| s.slot);
        let total = round2(slots.iter().map(|s| s.points).sum());
        Self {
            manager,
            slots,
            total,
        }
    }

    /// True if any score was served from an earlier render's cache.
    pub fn has_cached_scores(&self) -> bool {
        self.slots.iter().any(SlotScore::is_stale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyLeaderboard {
    pub week: WeekKey,
    /// Best total first; equal totals by manager name.
    pub entries: Vec<LeaderboardEntry>,
}

impl WeeklyLeaderboard {
    pub fn from_entries(week: WeekKey, mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.manager.cmp(&b.manager))
        });
        Self { week, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots whose score lookup failed and were shown as 0.
    pub fn unavailable_scores(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| &e.slots)
            .filter(|s| s.source == ScoreSource::Unavailable)
            .count()
    }
}

/// Score every stored lineup for `week`.
pub async fn weekly_leaderboard(
    week: WeekKey,
    lineups: &BTreeMap<ManagerName, SubmittedLineup>,
    scores: &mut ScoreLookup,
) -> WeeklyLeaderboard {
    let mut entries = Vec::with_capacity(lineups.len());
    for (manager, submitted) in lineups {
        let mut slots = Vec::with_capacity(submitted.lineup.len());
        for (slot, player) in submitted.lineup.iter() {
            let score = scores.points_for(&player.name, week.season, week.week).await;
            slots.push(SlotScore {
                slot,
                player: player.name.clone(),
                points: score.points,
                source: score.source,
            });
        }
        entries.push(LeaderboardEntry::new(manager.clone(), slots));
    }
    WeeklyLeaderboard::from_entries(week, entries)
}

/// Competition ranking over the sorted entries: equal totals share a
/// placement and the next distinct total skips past them. Only the podium is
/// returned.
pub fn placements(leaderboard: &WeeklyLeaderboard) -> Vec<(ManagerName, u8)> {
    let mut placed = Vec::new();
    let mut rank = 0u8;
    let mut previous: Option<f64> = None;
    for (i, entry) in leaderboard.entries.iter().enumerate() {
        if previous != Some(entry.total) {
            rank = u8::try_from(i + 1).unwrap_or(u8::MAX);
            previous = Some(entry.total);
        }
        if rank > PODIUM {
            break;
        }
        placed.push((entry.manager.clone(), rank));
    }
    placed
}

/// Each manager's week total and podium placement, ready for the standings.
pub fn week_results(leaderboard: &WeeklyLeaderboard) -> Vec<WeekResult> {
    let podium: BTreeMap<ManagerName, u8> = placements(leaderboard).into_iter().collect();
    leaderboard
        .entries
        .iter()
        .map(|entry| WeekResult {
            manager: entry.manager.clone(),
            points: entry.total,
            placement: podium.get(&entry.manager).copied(),
        })
        .collect()
}

fn compare_standings(a: &SeasonStanding, b: &SeasonStanding) -> Ordering {
    b.total_points
        .total_cmp(&a.total_points)
        .then_with(|| b.firsts.cmp(&a.firsts))
        .then_with(|| b.seconds.cmp(&a.seconds))
        .then_with(|| b.thirds.cmp(&a.thirds))
        .then_with(|| a.manager.cmp(&b.manager))
}

/// Season table order: points, then firsts, seconds, thirds, then name.
pub fn rank_standings(mut standings: Vec<SeasonStanding>) -> Vec<SeasonStanding> {
    standings.sort_by(compare_standings);
    standings
}
