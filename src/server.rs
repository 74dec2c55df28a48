//! HTTP surface: liveness, league and team listings, and the h2h analysis.
//!
//! Filesystem work runs on tokio's blocking pool. Errors leave handlers as
//! [`ApiError`] and are rendered as `{"detail": ...}` bodies.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::{ErrorKind, H2hError};
use crate::h2h::H2hAnalyzer;
use crate::models::{H2HAnalysis, League, Team};

pub const ROOT_MESSAGE: &str = "H2H Predictor API funcionando";
const NO_TEAMS_DETAIL: &str = "Liga não encontrada ou sem times";

#[derive(Clone)]
struct AppState {
    analyzer: Arc<H2hAnalyzer>,
}

pub fn router(analyzer: H2hAnalyzer) -> Router {
    let state = AppState {
        analyzer: Arc::new(analyzer),
    };
    Router::new()
        .route("/", get(root))
        .route("/leagues", get(get_leagues))
        .route("/league/:league_id/teams", get(get_teams))
        .route("/league/:league_id/h2h", get(get_h2h))
        .fallback(fallback)
        .with_state(state)
}

pub async fn serve<F>(listener: TcpListener, analyzer: H2hAnalyzer, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(analyzer))
        .with_graceful_shutdown(shutdown)
        .await
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Internal(msg) => format!("Erro interno: {msg}"),
        }
    }
}

impl From<H2hError> for ApiError {
    fn from(err: H2hError) -> Self {
        match err.kind() {
            ErrorKind::LeagueNotFound | ErrorKind::TeamNotFound => Self::NotFound(err.to_string()),
            ErrorKind::EmptyData => Self::BadRequest(err.to_string()),
            ErrorKind::Unexpected => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{detail}");
        } else {
            warn!(status = status.as_u16(), "{detail}");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

async fn run_blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, H2hError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(res) => res.map_err(ApiError::from),
        Err(err) => Err(ApiError::Internal(format!("blocking task failed: {err}"))),
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": ROOT_MESSAGE,
        "status": "online",
    }))
}

async fn get_leagues(State(state): State<AppState>) -> Result<Json<Vec<League>>, ApiError> {
    let analyzer = state.analyzer.clone();
    let leagues = run_blocking(move || analyzer.catalog().list_leagues()).await?;
    info!(count = leagues.len(), "listed leagues");
    Ok(Json(leagues))
}

async fn get_teams(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let analyzer = state.analyzer.clone();
    let id = league_id.clone();
    let scanned = run_blocking(move || match analyzer.catalog().scan_teams(&id) {
        Err(H2hError::LeagueNotFound { .. }) => Ok(None),
        other => other.map(Some),
    })
    .await?;

    match scanned {
        None => {
            info!(league_id = %league_id, "league directory missing");
            Err(ApiError::NotFound(NO_TEAMS_DETAIL.to_string()))
        }
        Some(teams) if teams.is_empty() => {
            info!(league_id = %league_id, "league has no team files");
            Err(ApiError::NotFound(NO_TEAMS_DETAIL.to_string()))
        }
        Some(teams) => {
            info!(league_id = %league_id, count = teams.len(), "listed teams");
            Ok(Json(teams))
        }
    }
}

#[derive(Debug, Deserialize)]
struct H2hQuery {
    home: Option<String>,
    away: Option<String>,
}

async fn get_h2h(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    Query(query): Query<H2hQuery>,
) -> Result<Json<H2HAnalysis>, ApiError> {
    let home = required_param("home", query.home)?;
    let away = required_param("away", query.away)?;
    let analyzer = state.analyzer.clone();
    let analysis = run_blocking(move || analyzer.analyze(&league_id, &home, &away)).await?;
    Ok(Json(analysis))
}

fn required_param(name: &str, value: Option<String>) -> Result<String, ApiError> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Parâmetro obrigatório ausente: {name}"
        )));
    }
    Ok(value)
}

async fn fallback() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn error_kinds_map_to_statuses() {
        let cases = [
            (
                H2hError::LeagueNotFound {
                    league_id: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                H2hError::TeamNotFound {
                    team: "t".into(),
                    league_id: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                H2hError::EmptyData {
                    team: "t".into(),
                    path: PathBuf::from("t.csv"),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                H2hError::Io {
                    path: PathBuf::from("t.csv"),
                    source: std::io::Error::other("denied"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_detail_is_prefixed() {
        let err = ApiError::Internal("disk on fire".into());
        assert_eq!(err.detail(), "Erro interno: disk on fire");
    }

    #[test]
    fn blank_params_are_rejected() {
        assert!(matches!(
            required_param("home", None),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            required_param("home", Some("   ".into())),
            Err(ApiError::BadRequest(_))
        ));
        assert_eq!(
            required_param("home", Some(" Juventus ".into())).expect("valid"),
            "Juventus"
        );
    }
}
