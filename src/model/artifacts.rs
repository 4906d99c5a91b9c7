//! Persistence of the trained model artifacts.
//!
//! Everything serving needs travels in one JSON document: both fitted
//! predictors, the team id mapping and the form snapshots. Loading validates
//! the predictors up front so a malformed artifact fails at startup rather
//! than on the first prediction.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MatchRecord;
use crate::linear::regression::Predictor;
use crate::model::{FeatureColumn, ScorePredictor};
use crate::sim;
use crate::stats::TeamSnapshot;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot read artifacts: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("malformed artifacts: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    InvalidModel(#[from] anyhow::Error),
}

/// The on-disk form of a trained model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artifacts {
    pub home_model: Predictor<FeatureColumn>,
    pub away_model: Predictor<FeatureColumn>,
    pub team_ids: BTreeMap<String, u32>,
    pub team_stats: BTreeMap<String, TeamSnapshot>,
}
impl Artifacts {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let file = File::open(path)?;
        let artifacts: Artifacts = serde_json::from_reader(BufReader::new(file))?;
        artifacts.validate()?;
        Ok(artifacts)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), StartupError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        self.home_model.validate()?;
        self.away_model.validate()?;
        Ok(())
    }

    /// Promotes the artifacts into a live predictor with the stock iteration
    /// count.
    pub fn into_predictor(self) -> ScorePredictor {
        ScorePredictor {
            home_model: self.home_model,
            away_model: self.away_model,
            team_ids: self.team_ids,
            team_stats: self.team_stats,
            iterations: sim::DEFAULT_ITERATIONS,
        }
    }
}

/// Assigns each team a stable numeric id, ordered by name. Retraining over the
/// same set of teams reproduces the same mapping.
pub fn assign_team_ids(history: &[MatchRecord]) -> BTreeMap<String, u32> {
    let teams: BTreeSet<&str> = history
        .iter()
        .flat_map(|record| [record.home_team.as_str(), record.away_team.as_str()])
        .collect();
    teams
        .into_iter()
        .enumerate()
        .map(|(id, team)| (team.to_string(), id as u32))
        .collect()
}
