use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use h2h_predictor::catalog::Catalog;
use h2h_predictor::config::{ServerConfig, load_dotenv};
use h2h_predictor::h2h::H2hAnalyzer;
use h2h_predictor::logging;

const USAGE: &str = "usage: h2h_report [--data-dir <path>] <leagues | teams <league> | h2h <league> <home> <away>>";

fn main() -> Result<()> {
    load_dotenv();
    logging::init();

    let mut config = ServerConfig::from_env();
    let args = config.apply_args(std::env::args().skip(1));
    let analyzer = H2hAnalyzer::new(Catalog::new(config.data_dir.clone()));
    let catalog = analyzer.catalog();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["leagues"] => {
            let leagues = catalog.list_leagues().context("list leagues")?;
            print_json(&leagues)
        }
        ["teams", league_id] => {
            let teams = catalog
                .scan_teams(league_id)
                .with_context(|| format!("list teams for {league_id}"))?;
            if teams.is_empty() {
                return Err(anyhow!("league {league_id} has no team files"));
            }
            print_json(&teams)
        }
        ["h2h", league_id, home, away] => {
            let analysis = analyzer
                .analyze(league_id, home, away)
                .with_context(|| format!("analyze {home} vs {away} in {league_id}"))?;
            print_json(&analysis)
        }
        _ => Err(anyhow!(USAGE)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{out}");
    Ok(())
}
