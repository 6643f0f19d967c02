use super::*;
use crate::{
    cli::types::{Position, Season, Week},
    core::{build_http_client, http::HTTP_TIMEOUT},
    lineup::{Lineup, SlotKind},
    pool::Player,
    scoring::PlayerIdMapping,
};
use serde_json::json;
use std::collections::HashMap;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn week() -> WeekKey {
    WeekKey::new(Season::new(2025), Week::new(3))
}

fn entry(manager: &str, points: &[f64]) -> LeaderboardEntry {
    let slots = points
        .iter()
        .enumerate()
        .map(|(i, p)| SlotScore {
            slot: SlotLabel::numbered(SlotKind::WR, i as u8 + 1),
            player: format!("Player {}", i),
            points: *p,
            source: ScoreSource::Fetched,
        })
        .collect();
    LeaderboardEntry::new(ManagerName::new(manager), slots)
}

fn standing(manager: &str, total: f64, firsts: u32, seconds: u32, thirds: u32) -> SeasonStanding {
    SeasonStanding {
        manager: ManagerName::new(manager),
        total_points: total,
        firsts,
        seconds,
        thirds,
    }
}

fn player(name: &str, position: Position) -> Player {
    Player {
        name: name.to_string(),
        position,
        team: "KC".to_string(),
        opponent: "BUF".to_string(),
        salary: 7000,
        fppg: 10.0,
    }
}

#[test]
fn test_entry_total_and_display() {
    let e = entry("Amos", &[10.25, 4.5, 0.0]);
    assert_eq!(e.total, 14.75);
    assert_eq!(e.slots[1].display(), "Player 1 (4.5 pts)");
    assert!(!e.has_cached_scores());

    let mut cached = entry("David", &[7.0]);
    cached.slots[0].source = ScoreSource::PersistentCache;
    assert!(cached.slots[0].is_stale());
    assert!(cached.has_cached_scores());
}

#[test]
fn test_entries_sorted_by_total_then_name() {
    let board = WeeklyLeaderboard::from_entries(
        week(),
        vec![
            entry("David", &[50.0]),
            entry("Mariah", &[80.0]),
            entry("Amos", &[50.0]),
        ],
    );
    let order: Vec<&str> = board.entries.iter().map(|e| e.manager.as_str()).collect();
    assert_eq!(order, vec!["Mariah", "Amos", "David"]);
}

#[test]
fn test_placements_without_ties() {
    let board = WeeklyLeaderboard::from_entries(
        week(),
        vec![
            entry("AJ", &[90.0]),
            entry("Amos", &[80.0]),
            entry("Danny", &[70.0]),
            entry("David", &[60.0]),
        ],
    );
    let placed = placements(&board);
    assert_eq!(
        placed,
        vec![
            (ManagerName::new("AJ"), 1),
            (ManagerName::new("Amos"), 2),
            (ManagerName::new("Danny"), 3),
        ]
    );
}

#[test]
fn test_tie_for_first_skips_second() {
    let board = WeeklyLeaderboard::from_entries(
        week(),
        vec![
            entry("AJ", &[90.0]),
            entry("Amos", &[90.0]),
            entry("Danny", &[70.0]),
            entry("David", &[60.0]),
        ],
    );
    let placed = placements(&board);
    assert_eq!(
        placed,
        vec![
            (ManagerName::new("AJ"), 1),
            (ManagerName::new("Amos"), 1),
            (ManagerName::new("Danny"), 3),
        ]
    );
}

#[test]
fn test_week_results_carry_every_manager() {
    let board = WeeklyLeaderboard::from_entries(
        week(),
        vec![
            entry("AJ", &[90.0]),
            entry("Amos", &[80.0]),
            entry("Danny", &[70.0]),
            entry("David", &[60.0]),
        ],
    );
    let results = week_results(&board);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].placement, Some(1));
    assert_eq!(results[3].manager, ManagerName::new("David"));
    assert_eq!(results[3].points, 60.0);
    assert_eq!(results[3].placement, None);
}

#[test]
fn test_rank_standings_order() {
    let ranked = rank_standings(vec![
        standing("Danny", 300.0, 0, 1, 0),
        standing("Amos", 410.5, 1, 0, 0),
        standing("AJ", 300.0, 1, 0, 0),
        standing("David", 300.0, 1, 0, 0),
        standing("Mariah", 300.0, 1, 1, 0),
    ]);
    let order: Vec<&str> = ranked.iter().map(|s| s.manager.as_str()).collect();
    assert_eq!(order, vec!["Amos", "Mariah", "AJ", "David", "Danny"]);
}

#[test]
fn test_unavailable_scores_counted() {
    let mut failed = entry("Amos", &[0.0, 12.0]);
    failed.slots[0].source = ScoreSource::Unavailable;
    let mut unmapped = entry("David", &[0.0]);
    unmapped.slots[0].source = ScoreSource::Unmapped;

    let board = WeeklyLeaderboard::from_entries(week(), vec![failed, unmapped]);
    assert_eq!(board.unavailable_scores(), 1);
}

#[test]
fn test_empty_leaderboard() {
    let board = WeeklyLeaderboard::from_entries(week(), Vec::new());
    assert!(board.is_empty());
    assert!(placements(&board).is_empty());
    assert!(week_results(&board).is_empty());
}

#[tokio::test]
async fn test_weekly_leaderboard_scores_stored_lineups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/nfl/player/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fantasy_points": 22.5})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/nfl/player/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fantasy_points": 8.0})))
        .mount(&server)
        .await;

    let mapping = PlayerIdMapping::new(HashMap::from([
        ("Pat Passer".to_string(), "1".to_string()),
        ("Ty Tight".to_string(), "2".to_string()),
    ]));
    let mut scores = ScoreLookup::new(build_http_client(HTTP_TIMEOUT).unwrap(), server.uri(), mapping);

    let amos: Lineup = [
        (SlotLabel::single(SlotKind::TE), player("Ty Tight", Position::TE)),
        (SlotLabel::single(SlotKind::QB), player("Pat Passer", Position::QB)),
    ]
    .into_iter()
    .collect();
    let david: Lineup = [(
        SlotLabel::single(SlotKind::D),
        player("Unmapped Defense", Position::D),
    )]
    .into_iter()
    .collect();

    let mut lineups = BTreeMap::new();
    lineups.insert(
        ManagerName::new("David"),
        SubmittedLineup::new(ManagerName::new("David"), week(), david),
    );
    lineups.insert(
        ManagerName::new("Amos"),
        SubmittedLineup::new(ManagerName::new("Amos"), week(), amos),
    );

    let board = weekly_leaderboard(week(), &lineups, &mut scores).await;

    assert_eq!(board.entries.len(), 2);
    let top = &board.entries[0];
    assert_eq!(top.manager, ManagerName::new("Amos"));
    assert_eq!(top.total, 30.5);
    assert_eq!(top.slots[0].slot.to_string(), "QB");
    assert_eq!(top.slots[0].display(), "Pat Passer (22.5 pts)");
    assert_eq!(top.slots[1].display(), "Ty Tight (8 pts)");

    let bottom = &board.entries[1];
    assert_eq!(bottom.total, 0.0);
    assert_eq!(bottom.slots[0].source, ScoreSource::Unmapped);
    assert_eq!(board.unavailable_scores(), 0);
}
