use std::{collections::HashSet, path::PathBuf};

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::{http::fetch_player_points, mapping::PlayerIdMapping};
use crate::{
    cli::types::{Season, Week},
    core::{CacheKey, CacheSource, UnifiedCache},
    pool::round2,
};

/// Entries kept in memory for one render.
const SCORE_MEMORY_CAPACITY: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreCacheKey {
    pub player_id: String,
    pub season: Season,
    pub week: Week,
}

impl CacheKey for ScoreCacheKey {
    fn to_file_key(&self) -> String {
        format!("points_{}_{}_week_{}", self.player_id, self.season, self.week)
    }
}

/// Where a score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Fetched from the stats provider during this render.
    Fetched,
    /// Read from the persistent cache written by an earlier render.
    PersistentCache,
    /// No identifier for the player; scored as 0.
    Unmapped,
    /// The provider call failed; scored as 0.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub points: f64,
    pub source: ScoreSource,
}

impl ScoreResult {
    fn zero(source: ScoreSource) -> Self {
        Self {
            points: 0.0,
            source,
        }
    }
}

/// Score resolver for one render pass.
///
/// Lookups never fail: anything that goes wrong scores the player 0 and logs
/// a warning.
pub struct ScoreLookup {
    client: Client,
    base_url: String,
    mapping: PlayerIdMapping,
    cache: UnifiedCache<ScoreCacheKey, f64>,
    // Keys whose value was first served from disk during this render.
    from_disk: HashSet<ScoreCacheKey>,
}

impl ScoreLookup {
    pub fn new(client: Client, base_url: impl Into<String>, mapping: PlayerIdMapping) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            mapping,
            cache: UnifiedCache::new(SCORE_MEMORY_CAPACITY),
            from_disk: HashSet::new(),
        }
    }

    /// Also persist scores under `dir` so later renders can reuse them.
    pub fn with_persistent_cache(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = UnifiedCache::with_disk(SCORE_MEMORY_CAPACITY, dir);
        self
    }

    /// Drop every cached score, persistent ones included.
    pub fn refresh(&mut self) -> std::io::Result<usize> {
        self.cache.clear_memory();
        self.from_disk.clear();
        self.cache.clear_disk()
    }

    pub async fn points_for(&mut self, player_name: &str, season: Season, week: Week) -> ScoreResult {
        let Some(player_id) = self.mapping.id_for(player_name) else {
            debug!("No stats id mapped for {}", player_name);
            return ScoreResult::zero(ScoreSource::Unmapped);
        };

        let key = ScoreCacheKey {
            player_id: player_id.to_string(),
            season,
            week,
        };

        if let Some((points, source)) = self.cache.get(&key) {
            if source == CacheSource::Disk {
                self.from_disk.insert(key.clone());
            }
            debug!("Score cache hit for {} ({:?})", key.to_file_key(), source);
            let source = if self.from_disk.contains(&key) {
                ScoreSource::PersistentCache
            } else {
                ScoreSource::Fetched
            };
            return ScoreResult { points, source };
        }

        match fetch_player_points(&self.client, &self.base_url, &key.player_id, season, week).await {
            Ok(points) => {
                let points = round2(points);
                self.cache.put(key, points);
                ScoreResult {
                    points,
                    source: ScoreSource::Fetched,
                }
            }
            Err(e) => {
                warn!(
                    "Could not fetch points for {} (id {}): {}",
                    player_name, key.player_id, e
                );
                ScoreResult::zero(ScoreSource::Unavailable)
            }
        }
    }
}
