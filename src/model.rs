//! Expected-goals regression models and the serving-time score predictor.
//!
//! Two independent linear models share one feature layout: one regresses the
//! home side's goals, the other the away side's. At serving time the fitted
//! predictors turn a fixture into a pair of goal rates, which the Monte Carlo
//! sampler converts into a discrete scoreline.

use std::collections::BTreeMap;

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount};
use thiserror::Error;
use tinyrand::Rand;

use crate::domain::Score;
use crate::form::MatchFeatures;
use crate::linear::regression::{AsIndex, Predictor};
use crate::linear::Matrix;
use crate::sim;
use crate::stats::TeamSnapshot;

pub mod artifacts;

/// Substitute statistic for a team absent from the snapshot map.
pub const DEFAULT_STAT: f64 = 1.5;

/// Column layout of the training matrix and of every serving-time input row.
/// The two response columns lead; the twelve regressor columns follow.
#[derive(Clone, Debug, PartialEq, Eq, Ordinal, Display, EnumCount, Serialize, Deserialize)]
pub enum FeatureColumn {
    HomeGoals,
    AwayGoals,
    HomeId,
    AwayId,
    HomeRollingGf,
    HomeRollingGa,
    HomeRollingPoints,
    HomeFormScore,
    HomeGdForm,
    AwayRollingGf,
    AwayRollingGa,
    AwayRollingPoints,
    AwayFormScore,
    AwayGdForm,
}
impl AsIndex for FeatureColumn {
    fn as_index(&self) -> usize {
        self.ordinal()
    }
}

/// Failure modes of a single prediction. These are business outcomes, not
/// panics: callers decide whether to surface or substitute them.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("a team cannot play itself: {0}")]
    SameTeam(String),
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    #[error("non-finite goal rate for {home_team} v {away_team}")]
    Inference {
        home_team: String,
        away_team: String,
    },
}

/// The complete serving state: both fitted predictors plus the team lookups
/// they were trained against.
#[derive(Clone, Debug, PartialEq)]
pub struct ScorePredictor {
    pub home_model: Predictor<FeatureColumn>,
    pub away_model: Predictor<FeatureColumn>,
    pub team_ids: BTreeMap<String, u32>,
    pub team_stats: BTreeMap<String, TeamSnapshot>,
    pub iterations: usize,
}
impl ScorePredictor {
    /// Predicts the most likely scoreline of a fixture. Input validation runs
    /// before any inference, so a malformed fixture never touches the models.
    pub fn predict(
        &self,
        home_team: &str,
        away_team: &str,
        rand: &mut impl Rand,
    ) -> Result<Score, PredictionError> {
        if home_team == away_team {
            return Err(PredictionError::SameTeam(home_team.to_string()));
        }
        let input = self.feature_row(home_team, away_team)?;

        let lambda_home = self.home_model.predict(&input).max(0.0);
        let lambda_away = self.away_model.predict(&input).max(0.0);
        if !lambda_home.is_finite() || !lambda_away.is_finite() {
            return Err(PredictionError::Inference {
                home_team: home_team.to_string(),
                away_team: away_team.to_string(),
            });
        }

        Ok(sim::simulate_scoreline(
            lambda_home,
            lambda_away,
            self.iterations,
            rand,
        ))
    }

    fn feature_row(&self, home_team: &str, away_team: &str) -> Result<Vec<f64>, PredictionError> {
        let home_id = self.team_id(home_team)?;
        let away_id = self.team_id(away_team)?;
        let home = self.snapshot(home_team);
        let away = self.snapshot(away_team);
        Ok(vec![
            0.0,
            0.0,
            home_id as f64,
            away_id as f64,
            home.avg_gf,
            home.avg_ga,
            home.points_per_match,
            home.win_rate * 10.0,
            home.goal_difference,
            away.avg_gf,
            away.avg_ga,
            away.points_per_match,
            away.win_rate * 10.0,
            away.goal_difference,
        ])
    }

    fn team_id(&self, team: &str) -> Result<u32, PredictionError> {
        self.team_ids
            .get(team)
            .copied()
            .ok_or_else(|| PredictionError::UnknownTeam(team.to_string()))
    }

    fn snapshot(&self, team: &str) -> TeamSnapshot {
        self.team_stats
            .get(team)
            .copied()
            .unwrap_or(NEUTRAL_SNAPSHOT)
    }
}

// Stands in for a team that was assigned an id but never appears in the
// snapshot map.
const NEUTRAL_SNAPSHOT: TeamSnapshot = TeamSnapshot {
    avg_gf: DEFAULT_STAT,
    avg_ga: DEFAULT_STAT,
    points_per_match: DEFAULT_STAT,
    win_rate: DEFAULT_STAT,
    goal_difference: DEFAULT_STAT,
};

/// Assembles the training matrix from the engineered features, keeping only
/// matches where both sides have a filled rolling window. Teams missing from
/// `team_ids` drop their matches with them.
pub fn training_matrix(
    features: &[MatchFeatures],
    team_ids: &BTreeMap<String, u32>,
    window: usize,
) -> Matrix {
    let complete: Vec<_> = features
        .iter()
        .filter_map(|entry| {
            let home = entry.home?;
            let away = entry.away?;
            let home_id = *team_ids.get(&entry.record.home_team)?;
            let away_id = *team_ids.get(&entry.record.away_team)?;
            Some((entry, home, away, home_id, away_id))
        })
        .collect();

    let mut matrix = Matrix::allocate(complete.len(), <FeatureColumn as strum::EnumCount>::COUNT);
    for (row_index, (entry, home, away, home_id, away_id)) in complete.into_iter().enumerate() {
        let row = matrix.row_slice_mut(row_index);
        row[FeatureColumn::HomeGoals.as_index()] = entry.record.home_goals as f64;
        row[FeatureColumn::AwayGoals.as_index()] = entry.record.away_goals as f64;
        row[FeatureColumn::HomeId.as_index()] = home_id as f64;
        row[FeatureColumn::AwayId.as_index()] = away_id as f64;
        row[FeatureColumn::HomeRollingGf.as_index()] = home.gf;
        row[FeatureColumn::HomeRollingGa.as_index()] = home.ga;
        row[FeatureColumn::HomeRollingPoints.as_index()] = home.points;
        row[FeatureColumn::HomeFormScore.as_index()] = home.form_score(window);
        row[FeatureColumn::HomeGdForm.as_index()] = home.gd_form();
        row[FeatureColumn::AwayRollingGf.as_index()] = away.gf;
        row[FeatureColumn::AwayRollingGa.as_index()] = away.ga;
        row[FeatureColumn::AwayRollingPoints.as_index()] = away.points;
        row[FeatureColumn::AwayFormScore.as_index()] = away.form_score(window);
        row[FeatureColumn::AwayGdForm.as_index()] = away.gd_form();
    }
    matrix
}

/// The shared regressor list of both goal models: an intercept followed by the
/// twelve feature columns.
pub fn regressors() -> Vec<crate::linear::regression::Regressor<FeatureColumn>> {
    use crate::linear::regression::Regressor::{Intercept, Ordinal};
    vec![
        Intercept,
        Ordinal(FeatureColumn::HomeId),
        Ordinal(FeatureColumn::AwayId),
        Ordinal(FeatureColumn::HomeRollingGf),
        Ordinal(FeatureColumn::HomeRollingGa),
        Ordinal(FeatureColumn::HomeRollingPoints),
        Ordinal(FeatureColumn::HomeFormScore),
        Ordinal(FeatureColumn::HomeGdForm),
        Ordinal(FeatureColumn::AwayRollingGf),
        Ordinal(FeatureColumn::AwayRollingGa),
        Ordinal(FeatureColumn::AwayRollingPoints),
        Ordinal(FeatureColumn::AwayFormScore),
        Ordinal(FeatureColumn::AwayGdForm),
    ]
}

#[cfg(test)]
mod tests;
