use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_BEST_BET: &str = "EM_ANALISE";
pub const PLACEHOLDER_COMMENT: &str = "Motor básico ativo. Configure depois o motor PRO para gerar \
prognósticos inteligentes (1, X1, X, X2, 2, tendências de gols, etc.).";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub league_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub name: String,
}

/// First-row projection of a team CSV. The analytical fields are not computed
/// yet and always serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_id: String,
    pub name: String,
    pub raw_columns: BTreeMap<String, f64>,
    pub win_prob: Option<f64>,
    pub draw_prob: Option<f64>,
    pub loss_prob: Option<f64>,
    pub avg_goals_for: Option<f64>,
    pub avg_goals_against: Option<f64>,
    pub over_15_prob: Option<f64>,
    pub over_25_prob: Option<f64>,
    pub btts_prob: Option<f64>,
}

impl TeamStats {
    pub fn unscored(team_id: String, name: String, raw_columns: BTreeMap<String, f64>) -> Self {
        Self {
            team_id,
            name,
            raw_columns,
            win_prob: None,
            draw_prob: None,
            loss_prob: None,
            avg_goals_for: None,
            avg_goals_against: None,
            over_15_prob: None,
            over_25_prob: None,
            btts_prob: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HPrediction {
    pub best_bet: String,
    pub comment: String,
}

impl H2HPrediction {
    pub fn placeholder() -> Self {
        Self {
            best_bet: PLACEHOLDER_BEST_BET.to_string(),
            comment: PLACEHOLDER_COMMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct H2HAnalysis {
    pub league_id: String,
    pub home: TeamStats,
    pub away: TeamStats,
    pub prediction: H2HPrediction,
}
