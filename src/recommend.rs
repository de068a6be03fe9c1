//! Scores every configured market from the analyzer outputs and emits ranked
//! recommendations with deterministic reasoning.

use strum::IntoEnumIterator;
use tracing::debug;

use crate::config::{Config, Signal};
use crate::domain::{
    FormMetrics, H2hMetrics, KeyPlayerMissing, Market, MatchOdds, Outcome, Recommendation, Side,
    StandingsRow,
};
use crate::recency::SliceExt;


/// Everything the recommender sees about the pairing. Standings and odds may be
/// absent; absence degrades confidence rather than failing.
#[derive(Debug)]
pub struct MarketView<'a> {
    pub home_form: &'a FormMetrics,
    pub away_form: &'a FormMetrics,
    pub h2h: &'a H2hMetrics,
    pub home_absences: &'a [KeyPlayerMissing],
    pub away_absences: &'a [KeyPlayerMissing],
    pub home_standing: Option<&'a StandingsRow>,
    pub away_standing: Option<&'a StandingsRow>,
    pub odds: Option<&'a MatchOdds>,
}

/// Emits exactly one recommendation per configured market, ranked by confidence
/// with ties broken in market enumeration order.
pub fn recommend(view: &MarketView, config: &Config) -> Vec<Recommendation> {
    let signals = Signals::read(view, config);
    debug!("blended {signals:?}");
    let mut recommendations = Market::iter()
        .map(|market| score_market(market, &signals, view, config))
        .collect::<Vec<_>>();
    recommendations.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.market.cmp(&b.market))
    });
    recommendations
}

/// The blended home-side edge in [-1, 1] plus the inputs the reasoning reuses.
#[derive(Debug)]
struct Signals {
    form_delta: f64,
    venue_bias: f64,
    edge: f64,
    coverage: f64,
}
impl Signals {
    fn read(view: &MarketView, config: &Config) -> Self {
        let form_delta = view.home_form.score - view.away_form.score;
        let venue_bias = view.h2h.venue_bias;
        let impact_delta =
            (total_impact(view.away_absences) - total_impact(view.home_absences)).clamp(-1.0, 1.0);
        let standings_delta = match (view.home_standing, view.away_standing) {
            (Some(home), Some(away)) => {
                ((away.rank as f64 - home.rank as f64) / config.rank_gap_norm).clamp(-1.0, 1.0)
            }
            _ => 0.0,
        };
        let edge = config.weight(&Signal::Form) * form_delta
            + config.weight(&Signal::HeadToHead) * venue_bias
            + config.weight(&Signal::Availability) * impact_delta
            + config.weight(&Signal::Standings) * standings_delta;
        Self {
            form_delta,
            venue_bias,
            edge,
            coverage: Self::coverage(view, config),
        }
    }

    /// How much of the signal base was actually present, in [0, 1].
    fn coverage(view: &MarketView, config: &Config) -> f64 {
        let wanted = config.min_form_sample;
        let form = (view.home_form.samples.min(wanted) + view.away_form.samples.min(wanted)) as f64
            / (2 * wanted) as f64;
        let h2h = view.h2h.meetings.min(wanted) as f64 / wanted as f64;
        let standings = match (view.home_standing, view.away_standing) {
            (Some(_), Some(_)) => 1.0,
            (Some(_), None) | (None, Some(_)) => 0.5,
            (None, None) => 0.0,
        };
        [form, h2h, standings].mean()
    }
}

fn score_market(
    market: Market,
    signals: &Signals,
    view: &MarketView,
    config: &Config,
) -> Recommendation {
    let (outcome, confidence, mut reasons) = match market {
        Market::MatchResult => match_result(signals, view, config),
        Market::DoubleChance => double_chance(signals, view, config),
        Market::TotalGoals => total_goals(signals, view, config),
        Market::BothTeamsToScore => both_teams_to_score(signals, view, config),
    };
    if signals.coverage < config.low_coverage {
        reasons.push("limited data for this pairing: low confidence".into());
    }
    let price = view.odds.and_then(|odds| odds.price(&market, &outcome));
    debug!("{market}: picked {outcome:?} at {confidence:.3}");
    Recommendation {
        market,
        outcome,
        confidence,
        reasons,
        price,
    }
}

fn match_result(
    signals: &Signals,
    view: &MarketView,
    config: &Config,
) -> (Outcome, f64, Vec<String>) {
    let outcome = if signals.edge > config.draw_band {
        Outcome::Win(Side::Home)
    } else if signals.edge < -config.draw_band {
        Outcome::Win(Side::Away)
    } else {
        Outcome::Draw
    };
    let deviation = match outcome {
        Outcome::Draw => (config.draw_band - signals.edge.abs()).max(0.0) / 2.0,
        _ => signals.edge.abs() / 2.0,
    };
    let confidence = shrink(0.5 + deviation, signals.coverage);

    let mut reasons = Vec::new();
    form_reasons(&mut reasons, signals, view, config);
    result_h2h_reasons(&mut reasons, signals, view, config);
    availability_reasons(&mut reasons, view, config);
    standings_reasons(&mut reasons, view, config);
    (outcome, confidence, reasons)
}

fn double_chance(
    signals: &Signals,
    view: &MarketView,
    config: &Config,
) -> (Outcome, f64, Vec<String>) {
    let draw_share =
        (view.h2h.meetings > 0).then(|| view.h2h.draws as f64 / view.h2h.meetings as f64);
    let outcome = match draw_share {
        Some(share)
            if signals.edge.abs() <= config.draw_band
                && share < config.rare_draw_share
                && view.h2h.meetings >= config.min_form_sample =>
        {
            Outcome::EitherWin
        }
        _ if signals.edge >= 0.0 => Outcome::WinOrDraw(Side::Home),
        _ => Outcome::WinOrDraw(Side::Away),
    };
    // Covering two of the three results starts from a higher base than a single pick.
    let deviation = (0.25 + signals.edge.abs() / 4.0).min(0.5);
    let confidence = shrink(0.5 + deviation, signals.coverage);

    let mut reasons = Vec::new();
    form_reasons(&mut reasons, signals, view, config);
    result_h2h_reasons(&mut reasons, signals, view, config);
    if outcome == Outcome::EitherWin {
        reasons.push("draws have been rare between the sides".into());
    }
    availability_reasons(&mut reasons, view, config);
    standings_reasons(&mut reasons, view, config);
    (outcome, confidence, reasons)
}

fn total_goals(
    signals: &Signals,
    view: &MarketView,
    config: &Config,
) -> (Outcome, f64, Vec<String>) {
    let line = config.goals_line as f64 + 0.5;
    let from_form = (view.home_form.goals_for_avg + view.away_form.goals_against_avg) / 2.0
        + (view.away_form.goals_for_avg + view.home_form.goals_against_avg) / 2.0;
    let blended = if view.h2h.no_history {
        from_form
    } else {
        (1.0 - config.h2h_goal_blend) * from_form
            + config.h2h_goal_blend * view.h2h.avg_total_goals
    };
    let burden = (total_impact(view.home_absences) + total_impact(view.away_absences)).min(2.0);
    let expected = (blended - config.absence_goal_penalty * burden).max(0.0);

    let outcome = if expected > line {
        Outcome::Over(config.goals_line)
    } else {
        Outcome::Under(config.goals_line + 1)
    };
    let deviation = ((expected - line).abs() * config.goals_confidence_slope).min(0.5);
    let confidence = shrink(0.5 + deviation, signals.coverage);

    let mut reasons = Vec::new();
    if view.home_form.samples > 0 && view.away_form.samples > 0 {
        if from_form >= line + 0.5 {
            reasons.push("recent scoring rates point well over the line".into());
        } else if from_form <= line - 0.5 {
            reasons.push("recent scoring rates point well under the line".into());
        }
    }
    totals_h2h_reasons(&mut reasons, view, config);
    if burden >= config.notable_impact {
        reasons.push("key absences temper the goal expectation".into());
    }
    (outcome, confidence, reasons)
}

fn both_teams_to_score(
    signals: &Signals,
    view: &MarketView,
    config: &Config,
) -> (Outcome, f64, Vec<String>) {
    let home_scores = ((view.home_form.scored_rate + (1.0 - view.away_form.clean_sheet_rate))
        / 2.0)
        .clamp(0.0, 1.0);
    let away_scores = ((view.away_form.scored_rate + (1.0 - view.home_form.clean_sheet_rate))
        / 2.0)
        .clamp(0.0, 1.0);
    let both = home_scores * away_scores;

    let outcome = if both >= 0.5 {
        Outcome::BothScore
    } else {
        Outcome::OneBlank
    };
    let deviation = (both - 0.5).abs();
    let confidence = shrink(0.5 + deviation, signals.coverage);

    let mut reasons = Vec::new();
    if view.home_form.samples > 0
        && view.away_form.samples > 0
        && view.home_form.scored_rate >= 0.75
        && view.away_form.scored_rate >= 0.75
    {
        reasons.push("both sides scoring consistently".into());
    }
    if view.home_form.samples > 0 && view.home_form.clean_sheet_rate >= 0.5 {
        reasons.push("home side keeping regular clean sheets".into());
    }
    if view.away_form.samples > 0 && view.away_form.clean_sheet_rate >= 0.5 {
        reasons.push("away side keeping regular clean sheets".into());
    }
    availability_reasons(&mut reasons, view, config);
    (outcome, confidence, reasons)
}

/// Pulls the raw confidence toward the neutral midpoint when coverage is thin.
fn shrink(raw: f64, coverage: f64) -> f64 {
    (0.5 + (raw - 0.5) * coverage).clamp(0.0, 1.0)
}

fn total_impact(absences: &[KeyPlayerMissing]) -> f64 {
    absences.iter().map(|missing| missing.impact).sum()
}

fn form_reasons(reasons: &mut Vec<String>, signals: &Signals, view: &MarketView, config: &Config) {
    if signals.form_delta >= config.notable_form_edge {
        reasons.push("home side clearly ahead on recent form".into());
    } else if signals.form_delta <= -config.notable_form_edge {
        reasons.push("away side clearly ahead on recent form".into());
    }
    if view.home_form.unbeaten() && view.home_form.samples >= config.min_form_sample {
        reasons.push(format!(
            "home side unbeaten in their last {} matches",
            view.home_form.samples
        ));
    }
    if view.away_form.unbeaten() && view.away_form.samples >= config.min_form_sample {
        reasons.push(format!(
            "away side unbeaten in their last {} matches",
            view.away_form.samples
        ));
    }
}

fn result_h2h_reasons(
    reasons: &mut Vec<String>,
    signals: &Signals,
    view: &MarketView,
    config: &Config,
) {
    if view.h2h.no_history {
        reasons.push("no head-to-head history between the sides".into());
        return;
    }
    if signals.venue_bias >= config.notable_bias {
        reasons.push("head-to-head record favours the home side".into());
    } else if signals.venue_bias <= -config.notable_bias {
        reasons.push("head-to-head record favours the away side".into());
    }
    if view.h2h.meetings >= config.min_form_sample
        && view.h2h.draws * 2 >= view.h2h.meetings
    {
        reasons.push("meetings between the sides tend to be drawn".into());
    }
}

fn totals_h2h_reasons(reasons: &mut Vec<String>, view: &MarketView, config: &Config) {
    if view.h2h.no_history {
        reasons.push("no head-to-head history between the sides".into());
        return;
    }
    let line = config.goals_line as f64 + 0.5;
    if (view.h2h.avg_total_goals - line).abs() >= 0.5 {
        reasons.push(format!(
            "meetings between the sides average {:.1} goals",
            view.h2h.avg_total_goals
        ));
    }
}

fn availability_reasons(reasons: &mut Vec<String>, view: &MarketView, config: &Config) {
    if let Some(top) = view.home_absences.first() {
        if top.impact >= config.notable_impact {
            reasons.push(format!("home side missing leading scorer {}", top.player));
        }
    }
    if let Some(top) = view.away_absences.first() {
        if top.impact >= config.notable_impact {
            reasons.push(format!("away side missing leading scorer {}", top.player));
        }
    }
}

fn standings_reasons(reasons: &mut Vec<String>, view: &MarketView, config: &Config) {
    if let (Some(home), Some(away)) = (view.home_standing, view.away_standing) {
        if home.rank + config.notable_rank_gap <= away.rank {
            reasons.push(format!(
                "home side sits {} places higher in the table",
                away.rank - home.rank
            ));
        } else if away.rank + config.notable_rank_gap <= home.rank {
            reasons.push(format!(
                "away side sits {} places higher in the table",
                home.rank - away.rank
            ));
        }
    }
}
