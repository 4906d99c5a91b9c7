use chrono::{DateTime, Utc};
use tinyrand::{Seeded, StdRand};

use crate::domain::Fixture;
use crate::fixtures::parse_kickoff;
use crate::linear::regression::Predictor;
use crate::linear::regression::Regressor::{Intercept, Ordinal};
use crate::model::{FeatureColumn, ScorePredictor};
use crate::sim;
use crate::stats::TeamSnapshot;

use super::*;

fn fixture(round: u32, date: Option<&str>, home_team: &str, away_team: &str) -> Fixture {
    Fixture {
        round,
        date: date.map(|raw| parse_kickoff(raw).unwrap()),
        home_team: home_team.into(),
        away_team: away_team.into(),
    }
}

fn nil_nil_predictor() -> ScorePredictor {
    let flat = Predictor {
        regressors: vec![Intercept, Ordinal(FeatureColumn::HomeId)],
        coefficients: vec![0.0, 0.0],
    };
    ScorePredictor {
        home_model: flat.clone(),
        away_model: flat,
        team_ids: [
            ("Arsenal".to_string(), 0),
            ("Spurs".to_string(), 1),
            ("Wolves".to_string(), 2),
        ]
        .into(),
        team_stats: [(
            "Arsenal".to_string(),
            TeamSnapshot {
                avg_gf: 1.0,
                avg_ga: 1.0,
                points_per_match: 1.0,
                win_rate: 0.2,
                goal_difference: 0.0,
            },
        )]
        .into(),
        iterations: sim::DEFAULT_ITERATIONS,
    }
}

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

#[test]
fn released_round_predicts_each_fixture() {
    let calendar = FixtureCalendar::new(vec![
        fixture(1, Some("16/08/2024 20:00"), "Arsenal", "Spurs"),
        fixture(1, None, "Wolves", "Arsenal"),
    ]);
    let predictor = nil_nil_predictor();
    let mut rand = StdRand::seed(7);
    let rows = listing(
        &calendar,
        1,
        &predictor,
        &UnlockPolicy::default(),
        at("2024-08-17T00:00:00Z"),
        &mut rand,
    );
    assert_eq!(
        vec![
            MatchRow {
                date: "2024-08-16".into(),
                home_team: "Arsenal".into(),
                away_team: "Spurs".into(),
                prediction: "0 - 0".into(),
            },
            MatchRow {
                date: "TBD".into(),
                home_team: "Wolves".into(),
                away_team: "Arsenal".into(),
                prediction: "0 - 0".into(),
            },
        ],
        rows
    );
}

#[test]
fn locked_round_shows_upcoming() {
    let calendar = FixtureCalendar::new(vec![fixture(
        1,
        Some("16/08/2024 20:00"),
        "Arsenal",
        "Spurs",
    )]);
    let predictor = nil_nil_predictor();
    let mut rand = StdRand::seed(7);
    let rows = listing(
        &calendar,
        1,
        &predictor,
        &UnlockPolicy::default(),
        at("2024-08-15T00:00:00Z"),
        &mut rand,
    );
    assert_eq!(
        vec![UPCOMING],
        rows.iter().map(|row| row.prediction.as_str()).collect::<Vec<_>>()
    );
}

#[test]
fn one_bad_fixture_does_not_blank_the_round() {
    let calendar = FixtureCalendar::new(vec![
        fixture(1, Some("16/08/2024 20:00"), "Arsenal", "Spurs"),
        fixture(1, Some("17/08/2024 15:00"), "Leeds", "Wolves"),
        fixture(1, Some("17/08/2024 17:30"), "Wolves", "Spurs"),
    ]);
    let predictor = nil_nil_predictor();
    let mut rand = StdRand::seed(7);
    let rows = listing(
        &calendar,
        1,
        &predictor,
        &UnlockPolicy::default(),
        at("2024-08-17T00:00:00Z"),
        &mut rand,
    );
    // Leeds is unknown to the model; only its row degrades
    assert_eq!(
        vec!["0 - 0", UPCOMING, "0 - 0"],
        rows.iter().map(|row| row.prediction.as_str()).collect::<Vec<_>>()
    );
}

#[test]
fn empty_round_yields_no_rows() {
    let calendar = FixtureCalendar::new(vec![]);
    let predictor = nil_nil_predictor();
    let mut rand = StdRand::seed(7);
    let rows = listing(
        &calendar,
        1,
        &predictor,
        &UnlockPolicy::default(),
        Utc::now(),
        &mut rand,
    );
    assert!(rows.is_empty());
}
