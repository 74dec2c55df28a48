use std::path::PathBuf;

use thiserror::Error;

/// Coarse failure classes surfaced to callers. The HTTP layer maps these to
/// 404 / 404 / 400 / 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LeagueNotFound,
    TeamNotFound,
    EmptyData,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum H2hError {
    #[error("Liga não encontrada: {league_id}")]
    LeagueNotFound { league_id: String },

    #[error("Time '{team}' não encontrado na liga '{league_id}'")]
    TeamNotFound { team: String, league_id: String },

    #[error("CSV vazio para o time {team} ({})", .path.display())]
    EmptyData { team: String, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl H2hError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LeagueNotFound { .. } => ErrorKind::LeagueNotFound,
            Self::TeamNotFound { .. } => ErrorKind::TeamNotFound,
            Self::EmptyData { .. } => ErrorKind::EmptyData,
            Self::Io { .. } | Self::Csv { .. } => ErrorKind::Unexpected,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
