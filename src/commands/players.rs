//! Weekly player pool listing

use crate::{
    cli::types::WeekKey,
    pool::{PlayerFilter, PlayerPool},
    Result,
};

use super::common::CommandContext;

#[derive(Debug)]
pub struct PlayersParams {
    pub week: Option<WeekKey>,
    pub filter: PlayerFilter,
    pub as_json: bool,
}

/// Handle the players command
pub fn handle_players(ctx: &CommandContext, params: PlayersParams) -> Result<()> {
    let (file, pool) = ctx.load_pool(params.week)?;
    let players: Vec<_> = pool.filter(&params.filter).collect();

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&players)?); // tarpaulin::skip
        return Ok(());
    }

    println!(
        "✓ {} of {} players for {} ({})",
        players.len(),
        pool.len(),
        file.week,
        file.path.display()
    );
    for p in players {
        // tarpaulin::skip - console output
        println!(
            "{:<3} {:<24} {:<4} vs {:<5} ${:>6} {:>6.2}",
            p.position.as_str(),
            p.name,
            p.team,
            p.opponent,
            p.salary,
            p.fppg
        );
    }
    for line in format_pool_summary(&pool) {
        println!("{}", line); // tarpaulin::skip
    }

    Ok(())
}

/// What the whole pool offers to filter on: teams, opponents, salary range.
pub fn format_pool_summary(pool: &PlayerPool) -> Vec<String> {
    let mut lines = Vec::new();
    if !pool.is_empty() {
        lines.push(format!("Teams: {}", pool.teams().join(", ")));
        lines.push(format!("Opponents: {}", pool.opponents().join(", ")));
    }
    if let Some((low, high)) = pool.salary_bounds() {
        lines.push(format!("Salaries range ${} to ${}", low, high));
    }
    lines
}
