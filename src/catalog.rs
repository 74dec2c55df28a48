//! League and team discovery over the on-disk data tree.
//!
//! Layout: `<data_root>/<league_id>/<team display name>.csv`. Every immediate
//! subdirectory of the root is a league and every CSV directly inside a league
//! is a team. The tree is never written to.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::H2hError;
use crate::models::{League, Team};
use crate::normalize::normalize_name;

#[derive(Debug, Clone)]
pub struct Catalog {
    data_root: PathBuf,
}

impl Catalog {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    /// Leagues sorted by id. A missing root yields an empty list.
    pub fn list_leagues(&self) -> Result<Vec<League>, H2hError> {
        if !self.data_root.is_dir() {
            debug!(root = %self.data_root.display(), "data root missing");
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&self.data_root).map_err(|e| H2hError::io(&self.data_root, e))?;
        let mut leagues = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(root = %self.data_root.display(), "skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.path().is_dir() {
                continue;
            }
            let Some(league_id) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %entry.path().display(), "skipping non utf-8 league directory");
                continue;
            };
            if league_id.starts_with('.') {
                continue;
            }
            let name = league_display_name(&league_id);
            leagues.push(League { league_id, name });
        }
        leagues.sort_by(|a, b| a.league_id.cmp(&b.league_id));
        Ok(leagues)
    }

    /// Teams in a league, or an empty list when the league does not exist.
    pub fn list_teams(&self, league_id: &str) -> Vec<Team> {
        match self.scan_teams(league_id) {
            Ok(teams) => teams,
            Err(err) => {
                debug!(league_id, "no teams listed: {err}");
                Vec::new()
            }
        }
    }

    /// Like [`Catalog::list_teams`] but tells a missing league apart from an
    /// empty one.
    pub fn scan_teams(&self, league_id: &str) -> Result<Vec<Team>, H2hError> {
        let files = self.team_files(league_id)?;
        Ok(files
            .into_iter()
            .map(|(name, _)| Team {
                team_id: normalize_name(&name),
                name,
            })
            .collect())
    }

    /// Path of the CSV whose normalized stem equals the normalized `team_name`.
    pub fn resolve_team_file(&self, league_id: &str, team_name: &str) -> Result<PathBuf, H2hError> {
        let target = normalize_name(team_name);
        let files = self.team_files(league_id)?;
        if !target.is_empty() {
            for (stem, path) in files {
                if normalize_name(&stem) == target {
                    debug!(league_id, team = team_name, path = %path.display(), "team resolved");
                    return Ok(path);
                }
            }
        }
        Err(H2hError::TeamNotFound {
            team: team_name.to_string(),
            league_id: league_id.to_string(),
        })
    }

    fn league_dir(&self, league_id: &str) -> Result<PathBuf, H2hError> {
        let not_found = || H2hError::LeagueNotFound {
            league_id: league_id.to_string(),
        };
        if !is_safe_league_id(league_id) {
            return Err(not_found());
        }
        let dir = self.data_root.join(league_id);
        if !dir.is_dir() {
            return Err(not_found());
        }
        Ok(dir)
    }

    // (stem, path) pairs sorted by stem.
    fn team_files(&self, league_id: &str) -> Result<Vec<(String, PathBuf)>, H2hError> {
        let dir = self.league_dir(league_id)?;
        let entries = fs::read_dir(&dir).map_err(|e| H2hError::io(&dir, e))?;
        let mut out = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    warn!(dir = %dir.display(), "skipping unreadable entry: {err}");
                    continue;
                }
            };
            if let Some(stem) = csv_stem(&path) {
                out.push((stem, path));
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

fn csv_stem(path: &Path) -> Option<String> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv || !path.is_file() {
        return None;
    }
    let Some(stem) = path.file_stem()?.to_str() else {
        warn!(path = %path.display(), "skipping non utf-8 team file");
        return None;
    };
    if stem.is_empty() || stem.starts_with('.') {
        return None;
    }
    Some(stem.to_string())
}

fn is_safe_league_id(league_id: &str) -> bool {
    !(league_id.is_empty()
        || league_id == "."
        || league_id == ".."
        || league_id.contains(['/', '\\', '\0']))
}

/// `serie-a` -> `Serie A`. Letters after a non-letter are upper-cased, the
/// rest lower-cased.
pub fn league_display_name(league_id: &str) -> String {
    let mut out = String::with_capacity(league_id.len());
    let mut prev_alpha = false;
    for ch in league_id.chars() {
        let ch = if ch == '-' || ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
