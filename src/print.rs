use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::{FormMetrics, H2hMetrics, KeyPlayerMissing, Recommendation};

pub fn tabulate_recommendations(recommendations: &[Recommendation]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(16)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(40)).with(HAlign::Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Market".into(),
                "Selection".into(),
                "Confidence".into(),
                "Price".into(),
                "Reasoning".into(),
            ],
        ));
    for recommendation in recommendations {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", recommendation.market).into(),
                format!("{:?}", recommendation.outcome).into(),
                format!("{:.2}", recommendation.confidence).into(),
                recommendation
                    .price
                    .map(|price| format!("{price:.2}"))
                    .unwrap_or_else(|| "-".into())
                    .into(),
                recommendation.reasons.join("; ").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_form(home: &FormMetrics, away: &FormMetrics) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(16)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["".into(), "Home".into(), "Away".into()],
        ));
    let rows: Vec<(&str, String, String)> = vec![
        (
            "Form score",
            format!("{:.3}", home.score),
            format!("{:.3}", away.score),
        ),
        (
            "Sample",
            format!("{}", home.samples),
            format!("{}", away.samples),
        ),
        (
            "W-D-L",
            format!("{}-{}-{}", home.wins, home.draws, home.losses),
            format!("{}-{}-{}", away.wins, away.draws, away.losses),
        ),
        (
            "Goals for",
            format!("{:.2}", home.goals_for_avg),
            format!("{:.2}", away.goals_for_avg),
        ),
        (
            "Goals against",
            format!("{:.2}", home.goals_against_avg),
            format!("{:.2}", away.goals_against_avg),
        ),
        (
            "Clean sheets",
            format!("{:.2}", home.clean_sheet_rate),
            format!("{:.2}", away.clean_sheet_rate),
        ),
    ];
    for (label, home_value, away_value) in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![label.into(), home_value.into(), away_value.into()],
        ));
    }
    table
}

pub fn tabulate_h2h(metrics: &H2hMetrics) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(16)).with(HAlign::Left)),
        Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
    ]);
    let rows: Vec<(&str, String)> = vec![
        ("Meetings", format!("{}", metrics.meetings)),
        (
            "H-D-A",
            format!(
                "{}-{}-{}",
                metrics.home_wins, metrics.draws, metrics.away_wins
            ),
        ),
        ("Avg goals", format!("{:.2}", metrics.avg_total_goals)),
        ("Venue bias", format!("{:+.2}", metrics.venue_bias)),
    ];
    for (label, value) in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![label.into(), value.into()],
        ));
    }
    table
}

pub fn tabulate_absences(home: &[KeyPlayerMissing], away: &[KeyPlayerMissing]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Side".into(),
                "Player".into(),
                "Reason".into(),
                "Impact".into(),
                "Returns".into(),
            ],
        ));
    for (side, missing) in [("home", home), ("away", away)] {
        for player in missing {
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    side.into(),
                    player.player.clone().into(),
                    format!("{:?}", player.reason).into(),
                    format!("{:.2}", player.impact).into(),
                    player
                        .returns
                        .map(|date| date.to_string())
                        .unwrap_or_else(|| "-".into())
                        .into(),
                ],
            ));
        }
    }
    table
}
