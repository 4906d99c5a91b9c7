use chrono::NaiveDate;
use tinyrand::{Seeded, StdRand};

use crate::domain::{MatchRecord, MatchResult};
use crate::form;
use crate::linear::regression::Regressor::{Intercept, Ordinal};
use crate::testing::assert_slice_f64_relative;

use super::*;

fn record(
    date: (i32, u32, u32),
    home_team: &str,
    away_team: &str,
    home_goals: u8,
    away_goals: u8,
) -> MatchRecord {
    MatchRecord {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        home_team: home_team.into(),
        away_team: away_team.into(),
        home_goals,
        away_goals,
        result: MatchResult::from_goals(home_goals, away_goals),
    }
}

fn sample_predictor() -> ScorePredictor {
    let flat = Predictor {
        regressors: vec![Intercept, Ordinal(FeatureColumn::HomeId)],
        coefficients: vec![0.0, 0.0],
    };
    ScorePredictor {
        home_model: flat.clone(),
        away_model: flat,
        team_ids: [("Arsenal".to_string(), 0), ("Wolves".to_string(), 1)].into(),
        team_stats: [(
            "Arsenal".to_string(),
            TeamSnapshot {
                avg_gf: 2.2,
                avg_ga: 0.8,
                points_per_match: 2.4,
                win_rate: 0.6,
                goal_difference: 1.4,
            },
        )]
        .into(),
        iterations: sim::DEFAULT_ITERATIONS,
    }
}

#[test]
fn same_team_rejected_before_any_lookup() {
    let predictor = sample_predictor();
    let mut rand = StdRand::seed(1);
    // "Spurs" is unknown, yet the identity check must fire first
    let err = predictor.predict("Spurs", "Spurs", &mut rand).unwrap_err();
    assert_eq!("a team cannot play itself: Spurs", err.to_string());
}

#[test]
fn unknown_team_rejected() {
    let predictor = sample_predictor();
    let mut rand = StdRand::seed(1);
    let err = predictor.predict("Spurs", "Arsenal", &mut rand).unwrap_err();
    assert_eq!("unknown team: Spurs", err.to_string());
}

#[test]
fn feature_row_layout() {
    let predictor = sample_predictor();
    let row = predictor.feature_row("Arsenal", "Wolves").unwrap();
    assert_slice_f64_relative(
        &[
            0.0, 0.0, // response placeholders
            0.0, 1.0, // ids
            2.2, 0.8, 2.4, 6.0, 1.4, // Arsenal, win rate scaled tenfold
            1.5, 1.5, 1.5, 15.0, 1.5, // Wolves falls back to neutral form
        ],
        &row,
        1e-12,
    );
}

#[test]
fn zero_rates_predict_nil_nil() {
    let predictor = sample_predictor();
    let mut rand = StdRand::seed(5);
    let score = predictor.predict("Arsenal", "Wolves", &mut rand).unwrap();
    assert_eq!(Score::new(0, 0), score);
}

#[test]
fn negative_rates_clamp_to_zero() {
    let mut predictor = sample_predictor();
    predictor.home_model.coefficients = vec![-4.0, 0.0];
    predictor.away_model.coefficients = vec![-1.0, 0.0];
    let mut rand = StdRand::seed(5);
    let score = predictor.predict("Arsenal", "Wolves", &mut rand).unwrap();
    assert_eq!(Score::new(0, 0), score);
}

#[test]
fn non_finite_rate_is_an_inference_error() {
    let mut predictor = sample_predictor();
    predictor.home_model.coefficients = vec![f64::INFINITY, 0.0];
    let mut rand = StdRand::seed(5);
    let err = predictor
        .predict("Arsenal", "Wolves", &mut rand)
        .unwrap_err();
    assert_eq!(
        "non-finite goal rate for Arsenal v Wolves",
        err.to_string()
    );
}

#[test]
fn training_matrix_keeps_only_complete_windows() {
    let history = [
        record((2024, 8, 10), "Arsenal", "Wolves", 2, 1),
        record((2024, 8, 17), "Arsenal", "Wolves", 0, 3),
    ];
    let features = form::build_features(&history, 1);
    let team_ids = artifacts::assign_team_ids(&history);
    let matrix = training_matrix(&features, &team_ids, 1);

    // only the second match has both windows filled
    assert_eq!(1, matrix.rows());
    assert_eq!(14, matrix.cols());
    assert_slice_f64_relative(
        &[
            0.0, 3.0, // responses
            0.0, 1.0, // ids
            2.0, 1.0, 3.0, 3.0, 1.0, // Arsenal's home form entering the match
            1.0, 2.0, 0.0, 0.0, -1.0, // Wolves' away form
        ],
        matrix.row_slice(0),
        1e-12,
    );
}

#[test]
fn training_matrix_drops_unmapped_teams() {
    let history = [
        record((2024, 8, 10), "Arsenal", "Wolves", 2, 1),
        record((2024, 8, 17), "Arsenal", "Wolves", 0, 3),
    ];
    let features = form::build_features(&history, 1);
    let team_ids = [("Arsenal".to_string(), 0)].into();
    let matrix = training_matrix(&features, &team_ids, 1);
    assert_eq!(0, matrix.rows());
}

#[test]
fn regressor_list_is_well_formed() {
    let regressors = regressors();
    assert_eq!(13, regressors.len());
    assert_eq!(
        1,
        regressors
            .iter()
            .filter(|regressor| regressor.is_constant())
            .count()
    );
}
