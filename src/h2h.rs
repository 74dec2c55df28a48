use tracing::info;

use crate::catalog::Catalog;
use crate::error::H2hError;
use crate::models::{H2HAnalysis, H2HPrediction};
use crate::stats::load_team_stats;

#[derive(Debug, Clone)]
pub struct H2hAnalyzer {
    catalog: Catalog,
}

impl H2hAnalyzer {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Head-to-head view of two teams in one league.
    ///
    /// Both teams are resolved before any file is read, so an unknown team
    /// fails the call without loading the other side. Team names are trimmed
    /// before use.
    pub fn analyze(&self, league_id: &str, home: &str, away: &str) -> Result<H2HAnalysis, H2hError> {
        let (home, away) = (home.trim(), away.trim());
        let home_path = self.catalog.resolve_team_file(league_id, home)?;
        let away_path = self.catalog.resolve_team_file(league_id, away)?;

        let home_stats = load_team_stats(&home_path, home)?;
        let away_stats = load_team_stats(&away_path, away)?;

        info!(
            league_id,
            home = %home_stats.team_id,
            away = %away_stats.team_id,
            "h2h analysis built"
        );

        Ok(H2HAnalysis {
            league_id: league_id.to_string(),
            home: home_stats,
            away: away_stats,
            prediction: H2HPrediction::placeholder(),
        })
    }
}
