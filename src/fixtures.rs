//! The fixture calendar and the matchweek release policy.
//!
//! Fixtures arrive in a CSV feed keyed by round number. A round's predictions
//! are withheld until its unlock instant: the calendar date of the round's
//! earliest fixture, taken at a configured hour of a configured time zone.

use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::warn;

use crate::csv::{CsvReader, Header};
use crate::domain::Fixture;

pub const ROUND: &str = "Round Number";
pub const DATE: &str = "Date";
pub const HOME_TEAM: &str = "Home Team";
pub const AWAY_TEAM: &str = "Away Team";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("missing column {0}")]
    MissingColumn(&'static str),

    #[error("calendar has no header row")]
    Empty,
}

struct Columns {
    round: usize,
    date: usize,
    home_team: usize,
    away_team: usize,
}
impl Columns {
    fn locate(header: &Header) -> Result<Self, CalendarError> {
        let locate = |name: &'static str| {
            header
                .locate(name)
                .ok_or(CalendarError::MissingColumn(name))
        };
        Ok(Self {
            round: locate(ROUND)?,
            date: locate(DATE)?,
            home_team: locate(HOME_TEAM)?,
            away_team: locate(AWAY_TEAM)?,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct FixtureCalendar {
    fixtures: Vec<Fixture>,
}
impl FixtureCalendar {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CalendarError> {
        let mut reader = CsvReader::open(path)?;
        let header = reader.next().ok_or(CalendarError::Empty)??;
        let columns = Columns::locate(&Header::parse(&header))?;
        let mut fixtures = vec![];
        for (row_index, row) in reader.enumerate() {
            let row = row?;
            match parse_fixture(&row, &columns) {
                Some(fixture) => fixtures.push(fixture),
                None => warn!("dropping fixture row {}: {row:?}", row_index + 2),
            }
        }
        Ok(Self { fixtures })
    }

    /// Fixtures of one round, in source order.
    pub fn round(&self, round: u32) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|fixture| fixture.round == round)
            .collect()
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }
}

fn parse_fixture(row: &[String], columns: &Columns) -> Option<Fixture> {
    let round = row.get(columns.round)?.trim().parse().ok()?;
    let home_team = row.get(columns.home_team)?.trim();
    let away_team = row.get(columns.away_team)?.trim();
    if home_team.is_empty() || away_team.is_empty() {
        return None;
    }
    Some(Fixture {
        round,
        // a bad date keeps the fixture; it renders as "TBD"
        date: parse_kickoff(row.get(columns.date)?),
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
    })
}

/// Parses a kickoff cell, with or without the time-of-day component.
pub fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%d/%m/%Y %H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%d/%m/%Y")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// When each round's predictions become visible.
#[derive(Clone, Debug)]
pub struct UnlockPolicy {
    pub zone: Tz,
    pub release_hour: u32,
}

impl Default for UnlockPolicy {
    fn default() -> Self {
        Self {
            zone: chrono_tz::America::Chicago,
            release_hour: 0,
        }
    }
}

impl UnlockPolicy {
    /// The unlock instant of a round: the calendar date of its earliest dated
    /// fixture, at the release hour in the policy's zone. `None` when no
    /// fixture in the round carries a parseable date.
    pub fn unlock_time(&self, calendar: &FixtureCalendar, round: u32) -> Option<DateTime<Utc>> {
        let earliest = calendar
            .round(round)
            .iter()
            .filter_map(|fixture| fixture.date)
            .min()?;
        let local = earliest.date().and_hms_opt(self.release_hour, 0, 0)?;
        // DST gaps and folds resolve to whichever instant exists
        let zoned = self
            .zone
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| self.zone.from_local_datetime(&local).latest())?;
        Some(zoned.with_timezone(&Utc))
    }

    /// Whether the round's predictions may be shown at `now`. A round with no
    /// unlock instant stays locked.
    pub fn should_release(
        &self,
        calendar: &FixtureCalendar,
        round: u32,
        now: DateTime<Utc>,
    ) -> bool {
        match self.unlock_time(calendar, round) {
            Some(unlock) => now >= unlock,
            None => false,
        }
    }
}
