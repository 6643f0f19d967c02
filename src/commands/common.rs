//! Common utilities and helper functions shared across commands.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::{
    cli::types::{ManagerName, WeekKey},
    core::{
        build_http_client,
        config::{app_cache_dir, LeagueConfig},
        http::HTTP_TIMEOUT,
        ConfigOverrides,
    },
    lineup::{Lineup, LineupEngine},
    pool::{find_weekly_file, latest_weekly_file, PlayerPool, WeeklyFile},
    scoring::{PlayerIdMapping, ScoreLookup},
    storage::{LeagueStore, LineupStore, SeasonStanding, StandingsStore, SubmittedLineup},
    Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub config: LeagueConfig,
    pub store: Box<dyn LeagueStore>,
}

impl CommandContext {
    /// Resolve configuration and open the configured store
    pub fn new(overrides: ConfigOverrides) -> Result<Self> {
        let config = LeagueConfig::resolve(overrides)?;
        let store = config.open_store()?;
        info!(
            "using {} store at {}",
            config.store,
            config.store_path.display()
        );
        Ok(Self { config, store })
    }

    pub fn engine(&self) -> LineupEngine {
        LineupEngine::new(self.config.rules.clone())
    }

    /// The salary file for `week`, or the latest one when no week is given.
    pub fn weekly_file(&self, week: Option<WeekKey>) -> Result<WeeklyFile> {
        match week {
            Some(week) => find_weekly_file(&self.config.salaries_dir, week),
            None => latest_weekly_file(&self.config.salaries_dir),
        }
    }

    /// The week commands default to: the one named by the latest salary file.
    pub fn resolve_week(&self, week: Option<WeekKey>) -> Result<WeekKey> {
        match week {
            Some(week) => Ok(week),
            None => Ok(latest_weekly_file(&self.config.salaries_dir)?.week),
        }
    }

    pub fn load_pool(&self, week: Option<WeekKey>) -> Result<(WeeklyFile, PlayerPool)> {
        let file = self.weekly_file(week)?;
        let pool = PlayerPool::load(&file.path)?;
        info!("loaded {} players from {}", pool.len(), file.path.display());
        Ok((file, pool))
    }

    /// Score resolver for this invocation.
    ///
    /// `persistent` reuses scores saved by earlier runs; `refresh` deletes
    /// them first.
    pub fn score_lookup(&self, persistent: bool, refresh: bool) -> Result<ScoreLookup> {
        let client = build_http_client(HTTP_TIMEOUT)?;
        let mapping = PlayerIdMapping::load_or_empty(&self.config.mapping_file);
        let mut scores = ScoreLookup::new(client, self.config.stats_base_url.clone(), mapping);

        if persistent || refresh {
            scores = scores.with_persistent_cache(app_cache_dir().join("scores"));
        }
        if refresh {
            let removed = scores.refresh()?;
            info!("cleared {} saved score(s)", removed);
        }
        Ok(scores)
    }

    /// Lineups for `week`; a failed read renders as "nothing submitted".
    pub fn lineups_or_empty(&self, week: WeekKey) -> BTreeMap<ManagerName, SubmittedLineup> {
        self.store.load_for_week(week).unwrap_or_else(|e| {
            warn!("Could not read lineups for {}: {}", week, e);
            BTreeMap::new()
        })
    }

    /// Standings; a failed read renders as an empty table.
    pub fn standings_or_empty(&self) -> Vec<SeasonStanding> {
        self.store.load_standings().unwrap_or_else(|e| {
            warn!("Could not read season standings: {}", e);
            Vec::new()
        })
    }
}

/// Slot-by-slot text for a lineup, with empty slots shown as `-`.
pub fn format_lineup(engine: &LineupEngine, lineup: &Lineup) -> Vec<String> {
    let mut lines: Vec<String> = engine
        .slots()
        .into_iter()
        .map(|slot| {
            let label = slot.to_string();
            match lineup.get(slot) {
                Some(p) => format!(
                    "{:<5} {:<24} {:<4} vs {:<5} ${:>6} {:>6.2}",
                    label, p.name, p.team, p.opponent, p.salary, p.fppg
                ),
                None => format!("{:<5} -", label),
            }
        })
        .collect();

    lines.push(format!(
        "Salary used: ${} | Remaining: ${} | Projected: {:.2}",
        lineup.total_salary(),
        engine.remaining_salary(lineup),
        lineup.projected_points()
    ));
    lines
}
