//! Weekly leaderboard command

use crate::{
    cli::types::WeekKey,
    leaderboard::{placements, weekly_leaderboard, WeeklyLeaderboard},
    Result,
};

use super::common::CommandContext;

#[derive(Debug)]
pub struct LeaderboardParams {
    pub week: Option<WeekKey>,
    pub as_json: bool,
    pub score_cache: bool,
    pub refresh: bool,
}

/// Handle the leaderboard command
pub async fn handle_leaderboard(ctx: &CommandContext, params: LeaderboardParams) -> Result<()> {
    let week = ctx.resolve_week(params.week)?;
    let lineups = ctx.lineups_or_empty(week);
    let mut scores = ctx.score_lookup(params.score_cache, params.refresh)?;

    if !params.as_json {
        println!("Scoring {} lineup(s) for {}...", lineups.len(), week);
    }
    let board = weekly_leaderboard(week, &lineups, &mut scores).await;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&board)?); // tarpaulin::skip
        return Ok(());
    }

    for line in format_leaderboard(&board) {
        println!("{}", line); // tarpaulin::skip
    }
    Ok(())
}

/// Text rendering: one block per manager, best first.
pub fn format_leaderboard(board: &WeeklyLeaderboard) -> Vec<String> {
    if board.is_empty() {
        return vec!["No lineups submitted yet.".to_string()];
    }

    let podium = placements(board);
    let mut lines = vec![format!("🏆 Weekly leaderboard: {}", board.week)];

    for entry in &board.entries {
        let place = podium
            .iter()
            .find(|(m, _)| m == &entry.manager)
            .map(|(_, p)| format!("#{}", p))
            .unwrap_or_else(|| "  ".to_string());
        lines.push(format!(
            "{} {:<10} {:>7.2} pts",
            place,
            entry.manager.as_str(),
            entry.total
        ));
        for score in &entry.slots {
            let cached = if score.is_stale() { " *" } else { "" };
            lines.push(format!("     {:<5} {}{}", score.slot.to_string(), score.display(), cached));
        }
    }

    if board.entries.iter().any(|e| e.has_cached_scores()) {
        lines.push("* saved by an earlier run; use --refresh to fetch again".to_string());
    }
    lines
}
