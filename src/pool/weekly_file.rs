//! Locating the weekly salary file.
//!
//! Files are named by convention with a `<year>_week_<n>` token; the file with
//! the latest week in the salaries folder is the current week.

use std::path::{Path, PathBuf};

use crate::{cli::types::WeekKey, error::LeagueError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyFile {
    pub path: PathBuf,
    pub week: WeekKey,
}

fn week_of(path: &Path) -> Option<WeekKey> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(WeekKey::find_in)
}

/// CSVs in week order; files without a week token sort first, by name.
fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort_by_cached_key(|p| (week_of(p), p.clone()));
    Ok(files)
}

fn no_weekly_file(dir: &Path) -> LeagueError {
    LeagueError::NoWeeklyFile {
        dir: dir.display().to_string(),
    }
}

/// The CSV in `dir` with the latest week, and that week.
pub fn latest_weekly_file(dir: &Path) -> Result<WeeklyFile> {
    let path = csv_files(dir)
        .map_err(|_| no_weekly_file(dir))?
        .pop()
        .ok_or_else(|| no_weekly_file(dir))?;

    let week = week_of(&path).ok_or_else(|| LeagueError::MalformedInput {
        message: format!("{} does not encode a <year>_week_<n> token", path.display()),
    })?;
    Ok(WeeklyFile { path, week })
}

/// The CSV in `dir` for a specific week.
pub fn find_weekly_file(dir: &Path, week: WeekKey) -> Result<WeeklyFile> {
    csv_files(dir)
        .map_err(|_| no_weekly_file(dir))?
        .into_iter()
        .rev()
        .find(|p| week_of(p) == Some(week))
        .map(|path| WeeklyFile { path, week })
        .ok_or_else(|| no_weekly_file(dir))
}
