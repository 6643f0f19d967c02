//! Core utilities shared across the application
//!
//! - `cache`: file helpers and the two-tier (LRU + disk) cache
//! - `config`: flag / environment / default resolution
//! - `http`: HTTP client construction

pub mod cache;
pub mod config;
pub mod http;

pub use cache::{try_read_to_string, write_string, CacheKey, CacheSource, UnifiedCache};
pub use config::{ConfigOverrides, LeagueConfig};
pub use http::build_http_client;
