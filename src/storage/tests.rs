//! Unit tests for both store backends

use super::*;
use crate::{
    cli::types::{Position, Season, Week},
    error::LeagueError,
    lineup::SlotLabel,
    pool::Player,
};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

fn week(n: u16) -> WeekKey {
    WeekKey::new(Season::new(2025), Week::new(n))
}

fn amos() -> ManagerName {
    ManagerName::new("Amos")
}

fn sample_lineup() -> Lineup {
    [
        (
            "QB",
            Player {
                name: "Quinn Arm".to_string(),
                position: Position::QB,
                team: "KC".to_string(),
                opponent: "BUF".to_string(),
                salary: 8200,
                fppg: 21.37,
            },
        ),
        (
            "FLEX",
            Player {
                name: "Ted Tote".to_string(),
                position: Position::TE,
                team: "DET".to_string(),
                opponent: "@GB".to_string(),
                salary: 5100,
                fppg: 9.5,
            },
        ),
        (
            "D",
            Player {
                name: "Dallas Defense".to_string(),
                position: Position::D,
                team: "DAL".to_string(),
                opponent: "NYG".to_string(),
                salary: 3900,
                fppg: 7.0,
            },
        ),
    ]
    .into_iter()
    .map(|(slot, player)| (slot.parse::<SlotLabel>().unwrap(), player))
    .collect()
}

fn result(manager: &str, points: f64, placement: Option<u8>) -> WeekResult {
    WeekResult {
        manager: ManagerName::new(manager),
        points,
        placement,
    }
}

/// Runs the same checks against any backend.
fn exercise_lineups(store: &dyn LeagueStore) {
    assert!(store.load_one(&amos(), week(3)).unwrap().is_none());
    assert!(store.load_for_week(week(3)).unwrap().is_empty());

    let saved = store.save(&amos(), week(3), &sample_lineup()).unwrap();
    assert_eq!(saved.manager, amos());
    assert_eq!(saved.week, week(3));
    assert!(saved.submitted_at > 0);

    let loaded = store.load_one(&amos(), week(3)).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.lineup.names(), sample_lineup().names());

    let week_lineups = store.load_for_week(week(3)).unwrap();
    assert_eq!(week_lineups.len(), 1);
    assert_eq!(week_lineups[&amos()].lineup, sample_lineup());

    // Append-if-absent: the second save loses and the first stays.
    let err = store.save(&amos(), week(3), &Lineup::new()).unwrap_err();
    assert!(matches!(err, LeagueError::Conflict { .. }));
    assert_eq!(store.load_one(&amos(), week(3)).unwrap().unwrap(), saved);

    // Other weeks and other managers are separate records.
    store.save(&amos(), week(4), &Lineup::new()).unwrap();
    store
        .save(&ManagerName::new("David"), week(3), &sample_lineup())
        .unwrap();
    assert_eq!(store.load_for_week(week(3)).unwrap().len(), 2);
    assert!(store.load_one(&amos(), week(4)).unwrap().unwrap().lineup.is_empty());
}

fn exercise_standings(store: &dyn LeagueStore) {
    assert!(store.load_standings().unwrap().is_empty());
    assert!(store.recorded_weeks().unwrap().is_empty());

    store
        .record_week(
            week(1),
            &[
                result("Amos", 101.5, Some(1)),
                result("David", 90.25, Some(2)),
                result("AJ", 80.0, Some(3)),
                result("Danny", 42.0, None),
            ],
        )
        .unwrap();
    store
        .record_week(
            week(2),
            &[result("Amos", 50.0, Some(3)), result("Danny", 120.0, Some(1))],
        )
        .unwrap();

    let err = store
        .record_week(week(2), &[result("Amos", 999.0, Some(1))])
        .unwrap_err();
    assert!(matches!(err, LeagueError::WeekAlreadyRecorded { .. }));

    let standings = store.load_standings().unwrap();
    let amos = standings.iter().find(|s| s.manager == amos()).unwrap();
    assert_eq!(amos.total_points, 151.5);
    assert_eq!((amos.firsts, amos.seconds, amos.thirds), (1, 0, 1));

    let danny = standings
        .iter()
        .find(|s| s.manager.as_str() == "Danny")
        .unwrap();
    assert_eq!(danny.total_points, 162.0);
    assert_eq!(danny.firsts, 1);

    assert_eq!(standings.len(), 4);
    assert_eq!(store.recorded_weeks().unwrap(), vec![week(1), week(2)]);
}

mod sqlite {
    use super::*;

    #[test]
    fn test_lineup_round_trip_and_conflict() {
        let db = LeagueDatabase::open_in_memory().unwrap();
        exercise_lineups(&db);
    }

    #[test]
    fn test_standings() {
        let db = LeagueDatabase::open_in_memory().unwrap();
        exercise_standings(&db);
    }

    #[test]
    fn test_reopen_keeps_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("league.db");
        {
            let db = LeagueDatabase::open(&path).unwrap();
            db.save(&amos(), week(3), &sample_lineup()).unwrap();
        }
        let db = LeagueDatabase::open(&path).unwrap();
        assert_eq!(
            db.load_one(&amos(), week(3)).unwrap().unwrap().lineup,
            sample_lineup()
        );
    }

    #[test]
    fn test_concurrent_saves_have_one_winner() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("league.db");
        LeagueDatabase::open(&path).unwrap();

        let writers = 4;
        let barrier = Arc::new(Barrier::new(writers));
        let handles: Vec<_> = (0..writers)
            .map(|_| {
                let path = path.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let db = LeagueDatabase::open(&path).unwrap();
                    barrier.wait();
                    db.save(&amos(), week(3), &sample_lineup())
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = outcomes.iter().filter(|r| r.is_ok()).count();
        let conflicts = outcomes
            .iter()
            .filter(|r| matches!(r, Err(LeagueError::Conflict { .. })))
            .count();
        assert_eq!(winners, 1);
        assert_eq!(conflicts, writers - 1);

        let db = LeagueDatabase::open(&path).unwrap();
        assert_eq!(db.load_for_week(week(3)).unwrap().len(), 1);
    }

    #[test]
    fn test_open_store_dispatches_backend() {
        let dir = TempDir::new().unwrap();
        let store = open_store(StoreBackend::Sqlite, &dir.path().join("league.db")).unwrap();
        store.save(&amos(), week(1), &Lineup::new()).unwrap();
        assert!(dir.path().join("league.db").exists());
    }
}

mod json_file {
    use super::*;

    #[test]
    fn test_lineup_round_trip_and_conflict() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("lineups.json"));
        exercise_lineups(&store);
    }

    #[test]
    fn test_standings() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("lineups.json"));
        exercise_standings(&store);
    }

    #[test]
    fn test_missing_or_blank_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineups.json");
        let store = JsonFileStore::new(&path);
        assert!(store.load_for_week(week(3)).unwrap().is_empty());

        std::fs::write(&path, "  \n").unwrap();
        assert!(store.load_standings().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineups.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load_for_week(week(3)),
            Err(LeagueError::Json(_))
        ));
    }

    #[test]
    fn test_document_survives_a_new_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineups.json");
        JsonFileStore::new(&path)
            .save(&amos(), week(3), &sample_lineup())
            .unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.load_one(&amos(), week(3)).unwrap().unwrap().lineup,
            sample_lineup()
        );
        assert!(!dir.path().join("lineups.json.tmp").exists());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("2025_week_3"));
        assert!(raw.contains("\"FLEX\""));
    }

    #[test]
    fn test_concurrent_saves_have_one_winner() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("lineups.json")));

        let writers = 4;
        let barrier = Arc::new(Barrier::new(writers));
        let handles: Vec<_> = (0..writers)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.save(&amos(), week(3), &sample_lineup())
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();
        assert_eq!(winners, 1);
        assert_eq!(store.load_for_week(week(3)).unwrap().len(), 1);
    }

    #[test]
    fn test_separate_handles_have_one_winner() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("league").join("lineups.json");

        let writers = 4;
        let barrier = Arc::new(Barrier::new(writers));
        let handles: Vec<_> = (0..writers)
            .map(|_| {
                let store = JsonFileStore::new(&path);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.save(&amos(), week(3), &sample_lineup())
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, LeagueError::Conflict { .. })));

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load_for_week(week(3)).unwrap().len(), 1);
        assert!(store.lock_path().exists());
    }
}

#[test]
fn test_week_result_folding() {
    let mut standing = SeasonStanding::new(amos());
    standing.apply(&result("Amos", 10.111, Some(2)));
    standing.apply(&result("Amos", 0.333, None));
    assert_eq!(standing.total_points, 10.44);
    assert_eq!((standing.firsts, standing.seconds, standing.thirds), (0, 1, 0));
}
