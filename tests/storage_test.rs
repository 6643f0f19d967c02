//! Integration tests for the lineup and standings stores

use bragginrights::{
    lineup::{LineupEngine, SlotKind},
    storage::*,
    LeagueError, ManagerName, Player, Position, Season, SlotLabel, StoreBackend, Week, WeekKey,
};
use std::{path::Path, process::Command};
use tempfile::TempDir;

fn week() -> WeekKey {
    WeekKey::new(Season::new(2025), Week::new(3))
}

fn lineup() -> bragginrights::Lineup {
    [(
        SlotLabel::single(SlotKind::QB),
        Player {
            name: "Josh Allen".to_string(),
            position: Position::QB,
            team: "BUF".to_string(),
            opponent: "MIA".to_string(),
            salary: 8800,
            fppg: 22.46,
        },
    )]
    .into_iter()
    .collect()
}

fn check_backend(backend: StoreBackend, path: &Path) {
    let store = open_store(backend, path).unwrap();
    let amos = ManagerName::new("Amos");

    let saved = store.save(&amos, week(), &lineup()).unwrap();
    assert!(matches!(
        store.save(&amos, week(), &lineup()),
        Err(LeagueError::Conflict { .. })
    ));

    // A second handle on the same path sees the record.
    let reopened = open_store(backend, path).unwrap();
    assert_eq!(reopened.load_one(&amos, week()).unwrap(), Some(saved));
    assert_eq!(reopened.load_for_week(week()).unwrap().len(), 1);

    // The engine maps the store conflict to "already submitted".
    let err = LineupEngine::default()
        .submit(&*reopened, &amos, week(), &lineup())
        .unwrap_err();
    assert!(matches!(err, LeagueError::AlreadySubmitted { .. }));

    reopened
        .record_week(
            week(),
            &[WeekResult {
                manager: amos.clone(),
                points: 31.2,
                placement: Some(1),
            }],
        )
        .unwrap();
    assert!(matches!(
        store.record_week(week(), &[]),
        Err(LeagueError::WeekAlreadyRecorded { .. })
    ));
    assert_eq!(store.recorded_weeks().unwrap(), vec![week()]);
    assert_eq!(store.load_standings().unwrap()[0].firsts, 1);
}

#[test]
fn test_sqlite_backend() {
    let dir = TempDir::new().unwrap();
    check_backend(StoreBackend::Sqlite, &dir.path().join("league.db"));
}

#[test]
fn test_json_backend() {
    let dir = TempDir::new().unwrap();
    check_backend(StoreBackend::Json, &dir.path().join("data").join("lineups.json"));
}

#[test]
fn test_cli_binary_reports_second_submit() {
    let dir = TempDir::new().unwrap();
    let salaries = dir.path().join("salaries");
    std::fs::create_dir_all(&salaries).unwrap();
    std::fs::write(
        salaries.join("2025_week_3.csv"),
        "First Name,Last Name,Position,Team,Opponent,Salary,FPPG\n\
         Josh,Allen,QB,BUF,MIA,8800,22.456\n",
    )
    .unwrap();

    let run = || {
        Command::new(env!("CARGO_BIN_EXE_bragginrights"))
            .args(["--salaries-dir"])
            .arg(&salaries)
            .args(["--store", "sqlite", "--store-path"])
            .arg(dir.path().join("league.db"))
            .args(["lineup", "submit", "-m", "Amos", "--pick", "QB=Josh Allen"])
            .env_remove("BRAGGIN_MANAGERS")
            .output()
            .unwrap()
    };

    let first = run();
    assert!(first.status.success());
    assert!(String::from_utf8_lossy(&first.stdout).contains("Lineup submitted for 2025_week_3"));

    let second = run();
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("already submitted"));
}
