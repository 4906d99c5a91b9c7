//! Console rendering of matchweeks and team form.

use std::collections::BTreeMap;

use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::matchweek::MatchRow;
use crate::stats::TeamSnapshot;

pub fn tabulate_matchweek(rows: &[MatchRow]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10))),
            Col::new(Styles::default().with(MinWidth(16))),
            Col::new(Styles::default().with(MinWidth(16))),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Date".into(),
                "Home".into(),
                "Away".into(),
                "Prediction".into(),
            ],
        ));
    for row in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                row.date.as_str().into(),
                row.home_team.as_str().into(),
                row.away_team.as_str().into(),
                row.prediction.as_str().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_snapshots(snapshots: &BTreeMap<String, TeamSnapshot>) -> Table {
    let numeric = || Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right));
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(16))),
            numeric(),
            numeric(),
            numeric(),
            numeric(),
            numeric(),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Team".into(),
                "Avg GF".into(),
                "Avg GA".into(),
                "Pts/match".into(),
                "Win rate".into(),
                "GD".into(),
            ],
        ));
    for (team, snapshot) in snapshots {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.as_str().into(),
                format!("{:.2}", snapshot.avg_gf).into(),
                format!("{:.2}", snapshot.avg_ga).into(),
                format!("{:.2}", snapshot.points_per_match).into(),
                format!("{:.2}", snapshot.win_rate).into(),
                format!("{:+.2}", snapshot.goal_difference).into(),
            ],
        ));
    }
    table
}
