//! Cleaning of the raw historical results feed into canonical match records.
//!
//! Rows without a result code are dropped, as are rows whose date or goal cells
//! fail to parse; every drop is logged at `warn`. Output preserves source order;
//! date sorting is the feature builder's responsibility.

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use crate::csv::{CsvReader, CsvWriter, Header};
use crate::domain::{MatchRecord, MatchResult};

pub const DATE: &str = "Date";
pub const HOME_TEAM: &str = "HomeTeam";
pub const AWAY_TEAM: &str = "AwayTeam";
pub const HOME_GOALS: &str = "FTHG";
pub const AWAY_GOALS: &str = "FTAG";
pub const RESULT: &str = "FTR";

pub const CANONICAL_HEADER: [&str; 6] =
    [DATE, HOME_TEAM, AWAY_TEAM, HOME_GOALS, AWAY_GOALS, RESULT];

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("missing column {0}")]
    MissingColumn(&'static str),

    #[error("feed has no header row")]
    Empty,
}

struct Columns {
    date: usize,
    home_team: usize,
    away_team: usize,
    home_goals: usize,
    away_goals: usize,
    result: usize,
}
impl Columns {
    fn locate(header: &Header) -> Result<Self, FeedError> {
        let locate = |name: &'static str| {
            header.locate(name).ok_or(FeedError::MissingColumn(name))
        };
        Ok(Self {
            date: locate(DATE)?,
            home_team: locate(HOME_TEAM)?,
            away_team: locate(AWAY_TEAM)?,
            home_goals: locate(HOME_GOALS)?,
            away_goals: locate(AWAY_GOALS)?,
            result: locate(RESULT)?,
        })
    }
}

/// Cleans an in-memory feed: a header row followed by data rows.
pub fn clean<I>(header: &[String], rows: I) -> Result<Vec<MatchRecord>, FeedError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let columns = Columns::locate(&Header::parse(header))?;
    let mut records = vec![];
    for (row_index, row) in rows.into_iter().enumerate() {
        match clean_row(&row, &columns) {
            Some(record) => records.push(record),
            None => warn!("dropping row {}: {row:?}", row_index + 2),
        }
    }
    Ok(records)
}

/// Reads a raw results CSV and returns the cleaned records.
pub fn load_and_clean(path: impl AsRef<Path>) -> Result<Vec<MatchRecord>, FeedError> {
    let mut reader = CsvReader::open(path)?;
    let header = reader.next().ok_or(FeedError::Empty)??;
    let rows = reader.collect::<Result<Vec<_>, _>>()?;
    clean(&header, rows)
}

/// Persists cleaned records in the canonical six-column layout. Reloading the
/// written file through [`load_and_clean`] reproduces the same records.
pub fn write_cleaned(path: impl AsRef<Path>, records: &[MatchRecord]) -> Result<(), io::Error> {
    let mut writer = CsvWriter::create(path)?;
    writer.append(CANONICAL_HEADER)?;
    for record in records {
        writer.append(canonical_row(record))?;
    }
    writer.flush()
}

pub fn canonical_row(record: &MatchRecord) -> Vec<String> {
    vec![
        record.date.format("%Y-%m-%d").to_string(),
        record.home_team.clone(),
        record.away_team.clone(),
        record.home_goals.to_string(),
        record.away_goals.to_string(),
        record.result.code().to_string(),
    ]
}

fn clean_row(row: &[String], columns: &Columns) -> Option<MatchRecord> {
    let result_code = row.get(columns.result)?.trim();
    if result_code.is_empty() {
        return None;
    }
    let result: MatchResult = result_code.parse().ok()?;
    let date = parse_date_day_first(row.get(columns.date)?)?;
    let home_team = row.get(columns.home_team)?.trim();
    let away_team = row.get(columns.away_team)?.trim();
    if home_team.is_empty() || away_team.is_empty() {
        return None;
    }
    Some(MatchRecord {
        date,
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_goals: parse_goals(row.get(columns.home_goals)?)?,
        away_goals: parse_goals(row.get(columns.away_goals)?)?,
        result,
    })
}

/// Parses a feed date with day-first precedence, accepting the ISO form the
/// canonical layout writes.
pub fn parse_date_day_first(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%y"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn parse_goals(raw: &str) -> Option<u8> {
    // some exports write whole goals as floats ("2.0")
    let value = raw.trim().parse::<f64>().ok()?;
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return None;
    }
    Some(value as u8)
}
