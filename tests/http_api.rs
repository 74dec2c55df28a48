use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

use h2h_predictor::catalog::Catalog;
use h2h_predictor::h2h::H2hAnalyzer;
use h2h_predictor::models::{H2HAnalysis, League, Team};
use h2h_predictor::server;

fn fixture_root() -> PathBuf {
    let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.push("tests");
    root.push("fixtures");
    root.push("data");
    root
}

async fn spawn_server(root: PathBuf) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let analyzer = H2hAnalyzer::new(Catalog::new(root));
    tokio::spawn(server::serve(listener, analyzer, std::future::pending::<()>()));
    addr
}

async fn get(addr: SocketAddr, path: &str) -> (StatusCode, Value) {
    let resp = reqwest::get(format!("http://{addr}{path}"))
        .await
        .expect("request should complete");
    let status = resp.status();
    let body = resp.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn root_reports_online() {
    let addr = spawn_server(fixture_root()).await;
    let (status, body) = get(addr, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["message"], server::ROOT_MESSAGE);
}

#[tokio::test]
async fn leagues_listed() {
    let addr = spawn_server(fixture_root()).await;
    let (status, body) = get(addr, "/leagues").await;
    assert_eq!(status, StatusCode::OK);
    let leagues: Vec<League> = serde_json::from_value(body).expect("league array");
    assert_eq!(leagues.len(), 4);
    assert_eq!(leagues[0].league_id, "brasileirao");
    assert_eq!(leagues[0].name, "Brasileirao");
}

#[tokio::test]
async fn leagues_empty_when_root_missing() {
    let addr = spawn_server(PathBuf::from("/definitely/not/here")).await;
    let (status, body) = get(addr, "/leagues").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(Vec::new()));
}

#[tokio::test]
async fn teams_listed_for_league() {
    let addr = spawn_server(fixture_root()).await;
    let (status, body) = get(addr, "/league/seriea/teams").await;
    assert_eq!(status, StatusCode::OK);
    let teams: Vec<Team> = serde_json::from_value(body).expect("team array");
    let ids: Vec<&str> = teams.iter().map(|t| t.team_id.as_str()).collect();
    assert_eq!(ids, ["inter", "juventus", "milan", "vazio"]);
}

#[tokio::test]
async fn missing_or_empty_league_is_404() {
    let addr = spawn_server(fixture_root()).await;
    for path in ["/league/ligue-1/teams", "/league/serie-b/teams"] {
        let (status, body) = get(addr, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["detail"], "Liga não encontrada ou sem times");
    }
}

#[tokio::test]
async fn h2h_returns_analysis() {
    let addr = spawn_server(fixture_root()).await;
    let (status, body) = get(addr, "/league/seriea/h2h?home=Juventus&away=inter").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["home"]["win_prob"].is_null());
    assert!(body["away"]["btts_prob"].is_null());

    let analysis: H2HAnalysis = serde_json::from_value(body).expect("analysis body");
    assert_eq!(analysis.home.raw_columns["gols"], 10.0);
    assert_eq!(analysis.away.raw_columns["assistencias"], 7.0);
    assert_eq!(analysis.prediction.best_bet, "EM_ANALISE");
}

#[tokio::test]
async fn h2h_decodes_accented_query() {
    let addr = spawn_server(fixture_root()).await;
    let (status, body) = get(
        addr,
        "/league/brasileirao/h2h?home=S%C3%A3o%20Paulo&away=atletico-mg",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["home"]["name"], "São Paulo");
    assert_eq!(body["away"]["team_id"], "atletico mg");
}

#[tokio::test]
async fn h2h_error_statuses() {
    let addr = spawn_server(fixture_root()).await;
    let cases = [
        ("/league/seriea/h2h?home=Juventus&away=Ghost", StatusCode::NOT_FOUND),
        ("/league/ligue-1/h2h?home=PSG&away=Lyon", StatusCode::NOT_FOUND),
        ("/league/seriea/h2h?home=Juventus&away=Vazio", StatusCode::BAD_REQUEST),
        ("/league/seriea/h2h?home=Juventus", StatusCode::BAD_REQUEST),
        ("/league/seriea/h2h?home=%20&away=Inter", StatusCode::BAD_REQUEST),
        (
            "/league/quebrada/h2h?home=Inteiro&away=Corrompido",
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];
    for (path, expected) in cases {
        let (status, body) = get(addr, path).await;
        assert_eq!(status, expected, "{path}");
        assert!(body["detail"].is_string(), "{path}");
    }
}

#[tokio::test]
async fn internal_errors_carry_prefix() {
    let addr = spawn_server(fixture_root()).await;
    let (_, body) = get(addr, "/league/quebrada/h2h?home=Inteiro&away=Corrompido").await;
    let detail = body["detail"].as_str().expect("detail string");
    assert!(detail.starts_with("Erro interno: "), "{detail}");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let addr = spawn_server(fixture_root()).await;
    let (status, body) = get(addr, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not Found");
}
