//! Season standings commands

use crate::{
    cli::types::WeekKey,
    error::LeagueError,
    leaderboard::{rank_standings, week_results, weekly_leaderboard},
    storage::{LineupStore, SeasonStanding, StandingsStore},
    Result,
};

use super::common::CommandContext;

/// Handle `standings show`
pub fn handle_standings_show(ctx: &CommandContext, as_json: bool) -> Result<()> {
    let standings = rank_standings(ctx.standings_or_empty());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&standings)?); // tarpaulin::skip
        return Ok(());
    }

    for line in format_standings(&standings) {
        println!("{}", line); // tarpaulin::skip
    }
    Ok(())
}

/// Ranked table rows; `standings` must already be in rank order.
pub fn format_standings(standings: &[SeasonStanding]) -> Vec<String> {
    if standings.is_empty() {
        return vec!["No season standings yet.".to_string()];
    }

    let mut lines = vec![format!(
        "{:>2}  {:<10} {:>9}  {:>3} {:>3} {:>3}",
        "#", "Manager", "Points", "1st", "2nd", "3rd"
    )];
    for (i, s) in standings.iter().enumerate() {
        lines.push(format!(
            "{:>2}  {:<10} {:>9.2}  {:>3} {:>3} {:>3}",
            i + 1,
            s.manager.as_str(),
            s.total_points,
            s.firsts,
            s.seconds,
            s.thirds
        ));
    }
    lines
}

#[derive(Debug)]
pub struct RecordParams {
    pub week: Option<WeekKey>,
    pub score_cache: bool,
}

/// Handle `standings record`: score a finished week and fold it into the
/// standings.
///
/// Nothing is written unless every rostered player was scored; a failed
/// lookup leaves the week open to record again.
pub async fn handle_standings_record(ctx: &CommandContext, params: RecordParams) -> Result<()> {
    let week = ctx.resolve_week(params.week)?;
    if ctx.store.recorded_weeks()?.contains(&week) {
        return Err(LeagueError::WeekAlreadyRecorded { week });
    }

    let lineups = ctx.store.load_for_week(week)?;
    if lineups.is_empty() {
        println!("No lineups stored for {}; nothing recorded", week);
        return Ok(());
    }

    let mut scores = ctx.score_lookup(params.score_cache, false)?;
    let board = weekly_leaderboard(week, &lineups, &mut scores).await;
    let missing = board.unavailable_scores();
    if missing > 0 {
        return Err(LeagueError::ScoresUnavailable { week, missing });
    }
    let results = week_results(&board);
    ctx.store.record_week(week, &results)?;

    println!("✓ Recorded {} for {} manager(s)", week, results.len());
    for r in &results {
        if let Some(place) = r.placement {
            println!("  #{} {} ({:.2} pts)", place, r.manager, r.points);
        }
    }
    Ok(())
}
