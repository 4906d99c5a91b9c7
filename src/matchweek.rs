//! Assembly of a round's prediction listing.
//!
//! Locked rounds and individually unpredictable fixtures both surface as
//! "Upcoming" rather than failing the whole listing: a feed problem with one
//! fixture must not blank out the rest of the round.

use chrono::{DateTime, Utc};
use tinyrand::Rand;
use tracing::warn;

use crate::fixtures::{FixtureCalendar, UnlockPolicy};
use crate::model::ScorePredictor;

pub const UPCOMING: &str = "Upcoming";

/// One row of the rendered matchweek.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRow {
    /// ISO date, or "TBD" when the calendar carries no parseable kickoff.
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub prediction: String,
}

/// Builds the listing of `round`. Before the round's unlock instant every
/// prediction reads "Upcoming"; after it, each fixture is predicted
/// independently and per-fixture failures degrade to "Upcoming".
pub fn listing(
    calendar: &FixtureCalendar,
    round: u32,
    predictor: &ScorePredictor,
    policy: &UnlockPolicy,
    now: DateTime<Utc>,
    rand: &mut impl Rand,
) -> Vec<MatchRow> {
    let released = policy.should_release(calendar, round, now);
    calendar
        .round(round)
        .into_iter()
        .map(|fixture| {
            let prediction = if released {
                match predictor.predict(&fixture.home_team, &fixture.away_team, rand) {
                    Ok(score) => score.to_string(),
                    Err(err) => {
                        warn!(
                            "cannot predict {} v {}: {err}",
                            fixture.home_team, fixture.away_team
                        );
                        UPCOMING.to_string()
                    }
                }
            } else {
                UPCOMING.to_string()
            };
            MatchRow {
                date: fixture
                    .date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "TBD".to_string()),
                home_team: fixture.home_team.clone(),
                away_team: fixture.away_team.clone(),
                prediction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
