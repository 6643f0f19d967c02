//! League configuration.
//!
//! Every setting resolves the same way: explicit CLI flag, then environment
//! variable, then built-in default.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::{
    cli::types::{ManagerName, StoreBackend},
    error::LeagueError,
    lineup::LineupRules,
    storage::{open_store, LeagueStore},
    Result, MANAGERS_ENV_VAR, MAPPING_FILE_ENV_VAR, REQUIRE_COMPLETE_ENV_VAR,
    SALARIES_DIR_ENV_VAR, STATS_URL_ENV_VAR, STORE_ENV_VAR, STORE_PATH_ENV_VAR,
};

pub const DEFAULT_SALARIES_DIR: &str = "salaries";
pub const DEFAULT_MAPPING_FILE: &str = "mappings/fanduel_to_sleeper.json";
pub const DEFAULT_STATS_URL: &str = "https://api.sleeper.app/v1";
pub const DEFAULT_MANAGERS: [&str; 5] = ["Mariah", "David", "Amos", "AJ", "Danny"];

fn base_dir(dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    dir.unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(fallback);
        home
    })
    .join("bragginrights")
}

/// `<data dir>/bragginrights`, home of the default stores
pub fn app_data_dir() -> PathBuf {
    base_dir(dirs::data_dir(), ".local/share")
}

/// `<cache dir>/bragginrights`, home of the persistent score cache
pub fn app_cache_dir() -> PathBuf {
    base_dir(dirs::cache_dir(), ".cache")
}

/// Values given on the command line; `None` falls through to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub salaries_dir: Option<PathBuf>,
    pub mapping_file: Option<PathBuf>,
    pub store: Option<StoreBackend>,
    pub store_path: Option<PathBuf>,
    pub require_complete: bool,
}

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub salaries_dir: PathBuf,
    pub mapping_file: PathBuf,
    pub store: StoreBackend,
    pub store_path: PathBuf,
    pub managers: Vec<ManagerName>,
    pub stats_base_url: String,
    pub rules: LineupRules,
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(var: &str) -> bool {
    env_value(var).is_some_and(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
}

impl LeagueConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let salaries_dir = overrides
            .salaries_dir
            .or_else(|| env_value(SALARIES_DIR_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SALARIES_DIR));

        let mapping_file = overrides
            .mapping_file
            .or_else(|| env_value(MAPPING_FILE_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_FILE));

        let store = match overrides.store {
            Some(backend) => backend,
            None => match env_value(STORE_ENV_VAR) {
                Some(raw) => <StoreBackend as ValueEnum>::from_str(&raw, true).map_err(|_| {
                    LeagueError::InvalidConfig {
                        message: format!("{}={} (expected json or sqlite)", STORE_ENV_VAR, raw),
                    }
                })?,
                None => StoreBackend::default(),
            },
        };

        let store_path = overrides
            .store_path
            .or_else(|| env_value(STORE_PATH_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| app_data_dir().join(store.default_file_name()));

        let managers = match env_value(MANAGERS_ENV_VAR) {
            Some(raw) => parse_managers(&raw)?,
            None => DEFAULT_MANAGERS.iter().map(|m| ManagerName::new(*m)).collect(),
        };

        let stats_base_url = env_value(STATS_URL_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_STATS_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let rules = LineupRules {
            require_complete: overrides.require_complete || env_flag(REQUIRE_COMPLETE_ENV_VAR),
            ..LineupRules::default()
        };

        Ok(Self {
            salaries_dir,
            mapping_file,
            store,
            store_path,
            managers,
            stats_base_url,
            rules,
        })
    }

    /// Match `name` against the league's managers, ignoring case.
    pub fn resolve_manager(&self, name: &str) -> Result<ManagerName> {
        let wanted = name.trim();
        self.managers
            .iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| LeagueError::UnknownManager {
                name: name.to_string(),
            })
    }

    pub fn open_store(&self) -> Result<Box<dyn LeagueStore>> {
        open_store(self.store, &self.store_path)
    }
}

fn parse_managers(raw: &str) -> Result<Vec<ManagerName>> {
    let managers: Vec<ManagerName> = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(ManagerName::new)
        .collect();
    if managers.is_empty() {
        return Err(LeagueError::InvalidConfig {
            message: format!("{} lists no managers", MANAGERS_ENV_VAR),
        });
    }
    Ok(managers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for var in [
            SALARIES_DIR_ENV_VAR,
            MAPPING_FILE_ENV_VAR,
            STORE_ENV_VAR,
            STORE_PATH_ENV_VAR,
            MANAGERS_ENV_VAR,
            STATS_URL_ENV_VAR,
            REQUIRE_COMPLETE_ENV_VAR,
        ] {
            std::env::remove_var(var);
        }
    }

    // Env-var tests share process state, so they run as one test.
    #[test]
    fn test_resolution_order() {
        clear_env();

        let config = LeagueConfig::resolve(ConfigOverrides::default()).unwrap();
        assert_eq!(config.salaries_dir, PathBuf::from(DEFAULT_SALARIES_DIR));
        assert_eq!(config.mapping_file, PathBuf::from(DEFAULT_MAPPING_FILE));
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert!(config.store_path.ends_with("bragginrights/league.db"));
        assert_eq!(config.managers.len(), 5);
        assert_eq!(config.stats_base_url, DEFAULT_STATS_URL);
        assert!(!config.rules.require_complete);

        std::env::set_var(SALARIES_DIR_ENV_VAR, "/tmp/env-salaries");
        std::env::set_var(STORE_ENV_VAR, "JSON");
        std::env::set_var(MANAGERS_ENV_VAR, "Pat, Sam ,,");
        std::env::set_var(STATS_URL_ENV_VAR, "http://localhost:9999/v1/");
        std::env::set_var(REQUIRE_COMPLETE_ENV_VAR, "true");

        let config = LeagueConfig::resolve(ConfigOverrides::default()).unwrap();
        assert_eq!(config.salaries_dir, PathBuf::from("/tmp/env-salaries"));
        assert_eq!(config.store, StoreBackend::Json);
        assert!(config.store_path.ends_with("bragginrights/lineups.json"));
        assert_eq!(
            config.managers,
            vec![ManagerName::new("Pat"), ManagerName::new("Sam")]
        );
        assert_eq!(config.stats_base_url, "http://localhost:9999/v1");
        assert!(config.rules.require_complete);

        let config = LeagueConfig::resolve(ConfigOverrides {
            salaries_dir: Some(PathBuf::from("flag-salaries")),
            store: Some(StoreBackend::Sqlite),
            store_path: Some(PathBuf::from("league-test.db")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.salaries_dir, PathBuf::from("flag-salaries"));
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.store_path, PathBuf::from("league-test.db"));

        std::env::set_var(STORE_ENV_VAR, "spreadsheet");
        assert!(matches!(
            LeagueConfig::resolve(ConfigOverrides::default()),
            Err(LeagueError::InvalidConfig { .. })
        ));

        clear_env();
    }

    #[test]
    fn test_resolve_manager_ignores_case() {
        let config = LeagueConfig {
            salaries_dir: PathBuf::from("salaries"),
            mapping_file: PathBuf::from("mapping.json"),
            store: StoreBackend::Json,
            store_path: PathBuf::from("lineups.json"),
            managers: DEFAULT_MANAGERS.iter().map(|m| ManagerName::new(*m)).collect(),
            stats_base_url: DEFAULT_STATS_URL.to_string(),
            rules: LineupRules::default(),
        };

        assert_eq!(config.resolve_manager("aj").unwrap(), ManagerName::new("AJ"));
        assert!(matches!(
            config.resolve_manager("-"),
            Err(LeagueError::UnknownManager { .. })
        ));
    }

    #[test]
    fn test_parse_managers_rejects_empty_list() {
        assert!(parse_managers(" , ").is_err());
    }
}
