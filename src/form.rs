//! Derives a team's recent-form metrics from its completed fixtures.

use crate::config::Config;
use crate::domain::{FixtureResult, FormFixture, FormMetrics};
use crate::recency::SliceExt;

/// Fixtures must be ordered most recent first; anything beyond the configured
/// window is ignored outright rather than averaged in.
pub fn analyse(fixtures: &[FormFixture], config: &Config) -> FormMetrics {
    let window = &fixtures[..fixtures.len().min(config.form_window)];

    let points = window
        .iter()
        .map(|fixture| match fixture.result() {
            FixtureResult::Win => 1.0,
            FixtureResult::Draw => 0.5,
            FixtureResult::Loss => 0.0,
        })
        .collect::<Vec<_>>();
    let weighted = points.decay_weighted(config.form_decay);

    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;
    for fixture in window {
        match fixture.result() {
            FixtureResult::Win => wins += 1,
            FixtureResult::Draw => draws += 1,
            FixtureResult::Loss => losses += 1,
        }
    }

    // Goal rates are descriptive rather than predictive, so they stay unweighted.
    let goals_for = window
        .iter()
        .map(|fixture| fixture.goals_for as f64)
        .collect::<Vec<_>>();
    let goals_against = window
        .iter()
        .map(|fixture| fixture.goals_against as f64)
        .collect::<Vec<_>>();
    let clean_sheets = window.iter().filter(|fixture| fixture.clean_sheet()).count();
    let scored = window.iter().filter(|fixture| fixture.goals_for > 0).count();

    FormMetrics {
        score: weighted.value,
        samples: weighted.samples,
        wins,
        draws,
        losses,
        goals_for_avg: goals_for.mean(),
        goals_against_avg: goals_against.mean(),
        clean_sheet_rate: rate(clean_sheets, window.len()),
        scored_rate: rate(scored, window.len()),
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
