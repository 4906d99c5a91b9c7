//! Rolling-form feature engineering over the cleaned match history.
//!
//! For every match, the trailing window of each participant's prior appearances
//! on the same side (home or away) yields its form entering that match. Windows
//! never look ahead: only strictly earlier appearances count, and an unfilled
//! window propagates as `None` rather than an error.

use rustc_hash::FxHashMap;

use crate::domain::{MatchRecord, Side};

pub const DEFAULT_WINDOW: usize = 5;

/// Trailing-window form of one team entering one match. Goal statistics are
/// per-match means; points are the sum over the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollingForm {
    pub gf: f64,
    pub ga: f64,
    pub points: f64,
}
impl RollingForm {
    /// Points per match over the window, a compact momentum feature.
    pub fn form_score(&self, window: usize) -> f64 {
        self.points / window as f64
    }

    /// Mean goal difference over the window.
    pub fn gd_form(&self) -> f64 {
        self.gf - self.ga
    }
}

/// A match record annotated with the entering form of both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchFeatures {
    pub record: MatchRecord,
    pub home: Option<RollingForm>,
    pub away: Option<RollingForm>,
}

#[derive(Clone, Copy, Debug)]
struct Appearance {
    gf: f64,
    ga: f64,
    points: f64,
}

/// Computes rolling-form features for every match in `history`, returned in
/// date order. Ties in date keep the source feed's row order (stable sort),
/// which decides window membership for same-day matches.
pub fn build_features(history: &[MatchRecord], window: usize) -> Vec<MatchFeatures> {
    assert!(window > 0, "window cannot be zero");

    let mut ordered: Vec<&MatchRecord> = history.iter().collect();
    ordered.sort_by_key(|record| record.date);

    let mut sequences: FxHashMap<(&str, Side), Vec<Appearance>> = FxHashMap::default();
    let mut features = Vec::with_capacity(ordered.len());
    for record in ordered {
        let home = trailing_window(&sequences, &record.home_team, Side::Home, window);
        let away = trailing_window(&sequences, &record.away_team, Side::Away, window);
        features.push(MatchFeatures {
            record: record.clone(),
            home,
            away,
        });

        for side in [Side::Home, Side::Away] {
            let team = match side {
                Side::Home => record.home_team.as_str(),
                Side::Away => record.away_team.as_str(),
            };
            let (scored, conceded) = record.goals(side);
            sequences.entry((team, side)).or_default().push(Appearance {
                gf: scored as f64,
                ga: conceded as f64,
                points: record.points(side) as f64,
            });
        }
    }
    features
}

fn trailing_window(
    sequences: &FxHashMap<(&str, Side), Vec<Appearance>>,
    team: &str,
    side: Side,
    window: usize,
) -> Option<RollingForm> {
    let sequence = sequences.get(&(team, side))?;
    if sequence.len() < window {
        return None;
    }
    let tail = &sequence[sequence.len() - window..];
    Some(RollingForm {
        gf: tail.iter().map(|appearance| appearance.gf).sum::<f64>() / window as f64,
        ga: tail.iter().map(|appearance| appearance.ga).sum::<f64>() / window as f64,
        points: tail.iter().map(|appearance| appearance.points).sum(),
    })
}
