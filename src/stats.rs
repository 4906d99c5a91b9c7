//! Serving-time team form snapshots.
//!
//! A snapshot summarises each known team's most recent matches, merged across
//! its home and away appearances. It is built once at artifact-export time and
//! consulted read-only at prediction time, so serving never rescans history.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::MatchRecord;

/// Current form of one team over its trailing window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub avg_gf: f64,
    pub avg_ga: f64,
    pub points_per_match: f64,
    pub win_rate: f64,
    pub goal_difference: f64,
}

/// Builds the snapshot map over the most recent `window` matches per team.
/// Ties in date resolve by source order; a team with fewer than `window`
/// matches is summarised over however many it has.
pub fn build_snapshots(
    history: &[MatchRecord],
    window: usize,
) -> BTreeMap<String, TeamSnapshot> {
    assert!(window > 0, "window cannot be zero");

    let mut ordered: Vec<&MatchRecord> = history.iter().collect();
    ordered.sort_by_key(|record| record.date);

    let teams: BTreeSet<&str> = ordered
        .iter()
        .flat_map(|record| [record.home_team.as_str(), record.away_team.as_str()])
        .collect();

    let mut snapshots = BTreeMap::new();
    for team in teams {
        let appearances: Vec<_> = ordered
            .iter()
            .filter_map(|record| record.side_of(team).map(|side| (*record, side)))
            .collect();
        let recent = &appearances[appearances.len().saturating_sub(window)..];
        if recent.is_empty() {
            continue;
        }

        let (mut gf, mut ga, mut points, mut wins) = (0.0, 0.0, 0.0, 0.0);
        for (record, side) in recent {
            let (scored, conceded) = record.goals(*side);
            gf += scored as f64;
            ga += conceded as f64;
            let earned = record.points(*side);
            points += earned as f64;
            if earned == 3 {
                wins += 1.0;
            }
        }
        let matches = recent.len() as f64;
        snapshots.insert(
            team.to_string(),
            TeamSnapshot {
                avg_gf: gf / matches,
                avg_ga: ga / matches,
                points_per_match: points / matches,
                win_rate: wins / matches,
                goal_difference: (gf - ga) / matches,
            },
        );
    }
    snapshots
}
