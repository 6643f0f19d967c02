use super::*;
use crate::{
    cli::types::{Season, Week},
    core::build_http_client,
    core::{http::HTTP_TIMEOUT, CacheKey},
};
use serde_json::json;
use std::collections::HashMap;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn mapping(pairs: &[(&str, &str)]) -> PlayerIdMapping {
    PlayerIdMapping::new(
        pairs
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

fn lookup(server: &MockServer, mapping: PlayerIdMapping) -> ScoreLookup {
    ScoreLookup::new(build_http_client(HTTP_TIMEOUT).unwrap(), server.uri(), mapping)
}

async fn mount_points(server: &MockServer, id: &str, week: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/stats/nfl/player/{}", id)))
        .and(query_param("season", "2025"))
        .and(query_param("season_type", "regular"))
        .and(query_param("week", week.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[test]
fn test_mapping_from_json() {
    let m = PlayerIdMapping::from_json(r#"{"Bob Smith": "999", "Al Jones": "12"}"#).unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.id_for("Bob Smith"), Some("999"));
    assert_eq!(m.id_for(" Bob Smith "), Some("999"));
    assert_eq!(m.id_for("Unknown Player"), None);
}

#[test]
fn test_mapping_missing_or_bad_file_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(PlayerIdMapping::load_or_empty(&dir.path().join("absent.json")).is_empty());

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "not json").unwrap();
    assert!(PlayerIdMapping::load_or_empty(&bad).is_empty());

    let good = dir.path().join("good.json");
    std::fs::write(&good, r#"{"Bob Smith": "999"}"#).unwrap();
    assert_eq!(PlayerIdMapping::load_or_empty(&good).id_for("Bob Smith"), Some("999"));
}

#[test]
fn test_score_cache_key_file_name() {
    let key = ScoreCacheKey {
        player_id: "4046".to_string(),
        season: Season::new(2025),
        week: Week::new(3),
    };
    assert_eq!(key.to_file_key(), "points_4046_2025_week_3");
}

#[tokio::test]
async fn test_unknown_player_scores_zero() {
    let server = MockServer::start().await;
    let mut scores = lookup(&server, mapping(&[("Bob Smith", "999")]));

    let result = scores
        .points_for("Unknown Player", Season::new(2025), Week::new(3))
        .await;

    assert_eq!(result.points, 0.0);
    assert_eq!(result.source, ScoreSource::Unmapped);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_points_for_fetches_and_caches() {
    let server = MockServer::start().await;
    mount_points(&server, "999", 3, json!({"fantasy_points": 18.456, "stats": {}})).await;
    let mut scores = lookup(&server, mapping(&[("Bob Smith", "999")]));

    let first = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(first.points, 18.46);
    assert_eq!(first.source, ScoreSource::Fetched);

    let second = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(second.points, 18.46);
    assert_eq!(second.source, ScoreSource::Fetched);

    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_fantasy_points_is_zero() {
    let server = MockServer::start().await;
    mount_points(&server, "999", 4, json!({"stats": {"rec": 0}})).await;
    let mut scores = lookup(&server, mapping(&[("Bob Smith", "999")]));

    let result = scores.points_for("Bob Smith", Season::new(2025), Week::new(4)).await;
    assert_eq!(result.points, 0.0);
    assert_eq!(result.source, ScoreSource::Fetched);
}

#[tokio::test]
async fn test_provider_error_fails_soft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/nfl/player/999"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut scores = lookup(&server, mapping(&[("Bob Smith", "999")]));

    let result = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(result.points, 0.0);
    assert_eq!(result.source, ScoreSource::Unavailable);
}

#[tokio::test]
async fn test_malformed_body_fails_soft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/nfl/player/999"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;
    let mut scores = lookup(&server, mapping(&[("Bob Smith", "999")]));

    let result = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(result.points, 0.0);
    assert_eq!(result.source, ScoreSource::Unavailable);
}

#[tokio::test]
async fn test_persistent_cache_is_reported_and_refreshable() {
    let server = MockServer::start().await;
    mount_points(&server, "999", 3, json!({"fantasy_points": 12.0})).await;
    let cache_dir = TempDir::new().unwrap();

    {
        let mut scores =
            lookup(&server, mapping(&[("Bob Smith", "999")])).with_persistent_cache(cache_dir.path());
        let result = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
        assert_eq!(result.source, ScoreSource::Fetched);
    }

    let mut scores =
        lookup(&server, mapping(&[("Bob Smith", "999")])).with_persistent_cache(cache_dir.path());
    let cached = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(cached.points, 12.0);
    assert_eq!(cached.source, ScoreSource::PersistentCache);

    // Still reported as persistent once promoted to memory.
    let again = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(again.source, ScoreSource::PersistentCache);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    assert_eq!(scores.refresh().unwrap(), 1);
    let fresh = scores.points_for("Bob Smith", Season::new(2025), Week::new(3)).await;
    assert_eq!(fresh.source, ScoreSource::Fetched);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
