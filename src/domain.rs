//! Canonical types shared across the pipeline: scorelines, result codes, cleaned
//! match records and calendar fixtures.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A discrete full-time scoreline.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.home, self.away)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// The H/D/A full-time result code. Derivable from the goals, but carried
/// redundantly on the record the way the source feeds supply it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Home,
    Draw,
    Away,
}
impl MatchResult {
    pub fn from_goals(home_goals: u8, away_goals: u8) -> Self {
        if home_goals > away_goals {
            MatchResult::Home
        } else if home_goals < away_goals {
            MatchResult::Away
        } else {
            MatchResult::Draw
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MatchResult::Home => "H",
            MatchResult::Draw => "D",
            MatchResult::Away => "A",
        }
    }
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error)]
#[error("unsupported result code '{0}'")]
pub struct ParseResultError(pub String);

impl FromStr for MatchResult {
    type Err = ParseResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(MatchResult::Home),
            "D" => Ok(MatchResult::Draw),
            "A" => Ok(MatchResult::Away),
            other => Err(ParseResultError(other.into())),
        }
    }
}

/// A cleaned historical result. Immutable once produced by the cleaner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u8,
    pub away_goals: u8,
    pub result: MatchResult,
}
impl MatchRecord {
    /// The side `team` took in this match, if it took part at all.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == team {
            Some(Side::Home)
        } else if self.away_team == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Goals (scored, conceded) from the perspective of `side`.
    pub fn goals(&self, side: Side) -> (u8, u8) {
        match side {
            Side::Home => (self.home_goals, self.away_goals),
            Side::Away => (self.away_goals, self.home_goals),
        }
    }

    /// Points earned by `side`: 3 for a win, 1 for a draw, 0 for a loss.
    pub fn points(&self, side: Side) -> u8 {
        let (scored, conceded) = self.goals(side);
        if scored > conceded {
            3
        } else if scored == conceded {
            1
        } else {
            0
        }
    }
}

/// A calendar entry, independent of any prediction. The date stays `None` when
/// the source cell could not be parsed; such fixtures render as "TBD".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub round: u32,
    pub date: Option<NaiveDateTime>,
    pub home_team: String,
    pub away_team: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_from_goals() {
        assert_eq!(MatchResult::Home, MatchResult::from_goals(2, 0));
        assert_eq!(MatchResult::Draw, MatchResult::from_goals(1, 1));
        assert_eq!(MatchResult::Away, MatchResult::from_goals(0, 3));
    }

    #[test]
    fn result_code_round_trip() {
        for result in [MatchResult::Home, MatchResult::Draw, MatchResult::Away] {
            assert_eq!(result, result.code().parse().unwrap());
        }
        assert_eq!(
            "unsupported result code 'X'",
            "X".parse::<MatchResult>().unwrap_err().to_string()
        );
    }

    #[test]
    fn perspective() {
        let record = MatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            home_team: "Arsenal".into(),
            away_team: "Wolves".into(),
            home_goals: 2,
            away_goals: 0,
            result: MatchResult::Home,
        };
        assert_eq!(Some(Side::Home), record.side_of("Arsenal"));
        assert_eq!(Some(Side::Away), record.side_of("Wolves"));
        assert_eq!(None, record.side_of("Spurs"));
        assert_eq!((2, 0), record.goals(Side::Home));
        assert_eq!((0, 2), record.goals(Side::Away));
        assert_eq!(3, record.points(Side::Home));
        assert_eq!(0, record.points(Side::Away));
    }

    #[test]
    fn draw_points() {
        let record = MatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            home_team: "Arsenal".into(),
            away_team: "Wolves".into(),
            home_goals: 1,
            away_goals: 1,
            result: MatchResult::Draw,
        };
        assert_eq!(1, record.points(Side::Home));
        assert_eq!(1, record.points(Side::Away));
    }

    #[test]
    fn score_display() {
        assert_eq!("2 - 1", Score::new(2, 1).to_string());
    }
}
