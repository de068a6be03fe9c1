//! Input and derived types shared by the analyzers and the recommender.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

pub mod error;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum FixtureResult {
    Win,
    Draw,
    Loss,
}

/// One completed match for a single team of interest, most recent first in any list.
#[derive(Clone, Debug, PartialEq)]
pub struct FormFixture {
    pub date: NaiveDate,
    pub opponent: String,
    /// Where the team of interest played.
    pub venue: Side,
    pub goals_for: u8,
    pub goals_against: u8,
}
impl FormFixture {
    pub fn result(&self) -> FixtureResult {
        match self.goals_for.cmp(&self.goals_against) {
            std::cmp::Ordering::Greater => FixtureResult::Win,
            std::cmp::Ordering::Equal => FixtureResult::Draw,
            std::cmp::Ordering::Less => FixtureResult::Loss,
        }
    }

    pub fn clean_sheet(&self) -> bool {
        self.goals_against == 0
    }
}

/// One historical meeting between the two sides of the upcoming pairing.
#[derive(Clone, Debug, PartialEq)]
pub struct H2hFixture {
    pub date: NaiveDate,
    /// Which side of the upcoming pairing hosted this meeting.
    pub hosted_by: Side,
    pub hosts: u8,
    pub visitors: u8,
}
impl H2hFixture {
    /// Goals restated as (upcoming home side, upcoming away side).
    pub fn aligned(&self) -> Score {
        match self.hosted_by {
            Side::Home => Score::new(self.hosts, self.visitors),
            Side::Away => Score::new(self.visitors, self.hosts),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsenceReason {
    Injury,
    Suspension,
}

/// A player ruled out of the upcoming fixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Sidelined {
    pub player: String,
    pub reason: AbsenceReason,
    pub returns: Option<NaiveDate>,
}

/// A league scoring-leaders entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopScorer {
    pub player: String,
    pub team: String,
    pub goals: u16,
    pub team_rank: u16,
}

/// One row of the league standings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: String,
    pub rank: u16,
    pub points: u16,
    pub goal_diff: i16,
    pub played: u16,
}

/// Everything known about one of the pairing's teams ahead of the analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamRecord {
    pub team: String,
    /// Most recent first.
    pub fixtures: Vec<FormFixture>,
    pub sidelined: Vec<Sidelined>,
    pub standing: Option<StandingsRow>,
}

/// The closed set of markets the engine scores. Extending it is a deployment-time
/// decision; every arm of the recommender matches on it exhaustively.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Market {
    MatchResult,
    DoubleChance,
    TotalGoals,
    BothTeamsToScore,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
    WinOrDraw(Side),
    EitherWin,
    Over(u8),
    Under(u8),
    BothScore,
    OneBlank,
}
impl Outcome {
    pub fn belongs_to(&self, market: &Market) -> bool {
        match market {
            Market::MatchResult => matches!(self, Outcome::Win(_) | Outcome::Draw),
            Market::DoubleChance => matches!(self, Outcome::WinOrDraw(_) | Outcome::EitherWin),
            Market::TotalGoals => matches!(self, Outcome::Over(_) | Outcome::Under(_)),
            Market::BothTeamsToScore => matches!(self, Outcome::BothScore | Outcome::OneBlank),
        }
    }
}

/// Bookmaker-quoted decimal prices, keyed by market and selection within it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchOdds {
    pub offerings: FxHashMap<Market, HashMap<Outcome, f64>>,
}
impl MatchOdds {
    pub fn price(&self, market: &Market, outcome: &Outcome) -> Option<f64> {
        self.offerings
            .get(market)
            .and_then(|prices| prices.get(outcome))
            .copied()
    }
}

/// Derived, per team: recency-weighted form plus descriptive rates over the window.
#[derive(Clone, Debug, PartialEq)]
pub struct FormMetrics {
    /// Decay-weighted result strength in [0, 1]; 0.5 when no fixtures were available.
    pub score: f64,
    pub samples: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub goals_for_avg: f64,
    pub goals_against_avg: f64,
    pub clean_sheet_rate: f64,
    pub scored_rate: f64,
}
impl FormMetrics {
    pub fn low_sample(&self, min_sample: usize) -> bool {
        self.samples < min_sample
    }

    pub fn unbeaten(&self) -> bool {
        self.samples > 0 && self.losses == 0
    }
}

/// Derived, for the pairing. Outcome counts are relative to the upcoming home side.
#[derive(Clone, Debug, PartialEq)]
pub struct H2hMetrics {
    pub meetings: usize,
    pub home_wins: usize,
    pub draws: usize,
    pub away_wins: usize,
    pub avg_total_goals: f64,
    /// (home wins − away wins) / meetings, in [-1, 1]; 0 with no history.
    pub venue_bias: f64,
    pub no_history: bool,
}

/// An absence judged against the scoring leaders, highest impact first per team.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyPlayerMissing {
    pub player: String,
    pub impact: f64,
    pub reason: AbsenceReason,
    pub returns: Option<NaiveDate>,
}

/// One market judgment. The quoted price, when present, is passed through unmodified.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub market: Market,
    pub outcome: Outcome,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub price: Option<f64>,
}

/// The aggregate returned to the caller: fully determined by the inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchInsights {
    pub home_form: FormMetrics,
    pub away_form: FormMetrics,
    pub h2h: H2hMetrics,
    pub home_absences: Vec<KeyPlayerMissing>,
    pub away_absences: Vec<KeyPlayerMissing>,
    /// Ranked by confidence, ties broken in market enumeration order; exactly one
    /// entry per configured market.
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_result_from_goals() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let fixture = |goals_for, goals_against| FormFixture {
            date,
            opponent: "Opponent".into(),
            venue: Side::Home,
            goals_for,
            goals_against,
        };
        assert_eq!(FixtureResult::Win, fixture(2, 0).result());
        assert_eq!(FixtureResult::Draw, fixture(1, 1).result());
        assert_eq!(FixtureResult::Loss, fixture(0, 3).result());
        assert!(fixture(2, 0).clean_sheet());
        assert!(!fixture(2, 1).clean_sheet());
    }

    #[test]
    fn h2h_alignment_follows_host() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 18).unwrap();
        let hosted_home = H2hFixture {
            date,
            hosted_by: Side::Home,
            hosts: 3,
            visitors: 1,
        };
        assert_eq!(Score::new(3, 1), hosted_home.aligned());

        let hosted_away = H2hFixture {
            date,
            hosted_by: Side::Away,
            hosts: 3,
            visitors: 1,
        };
        assert_eq!(Score::new(1, 3), hosted_away.aligned());
    }

    #[test]
    fn outcome_market_membership() {
        assert!(Outcome::Win(Side::Home).belongs_to(&Market::MatchResult));
        assert!(Outcome::Draw.belongs_to(&Market::MatchResult));
        assert!(!Outcome::Draw.belongs_to(&Market::DoubleChance));
        assert!(Outcome::EitherWin.belongs_to(&Market::DoubleChance));
        assert!(Outcome::Over(2).belongs_to(&Market::TotalGoals));
        assert!(!Outcome::BothScore.belongs_to(&Market::TotalGoals));
        assert!(Outcome::OneBlank.belongs_to(&Market::BothTeamsToScore));
    }

    #[test]
    fn odds_lookup() {
        let mut odds = MatchOdds::default();
        odds.offerings.insert(
            Market::MatchResult,
            HashMap::from([(Outcome::Win(Side::Home), 1.85), (Outcome::Draw, 3.6)]),
        );
        assert_eq!(
            Some(1.85),
            odds.price(&Market::MatchResult, &Outcome::Win(Side::Home))
        );
        assert_eq!(None, odds.price(&Market::MatchResult, &Outcome::Win(Side::Away)));
        assert_eq!(None, odds.price(&Market::TotalGoals, &Outcome::Over(2)));
    }

    #[test]
    fn market_parses_kebab_case() {
        use std::str::FromStr;
        assert_eq!(Market::MatchResult, Market::from_str("match-result").unwrap());
        assert_eq!(
            Market::BothTeamsToScore,
            Market::from_str("both-teams-to-score").unwrap()
        );
        assert!(Market::from_str("first-goalscorer").is_err());
    }

    #[test]
    fn score_total() {
        assert_eq!(7, Score::new(4, 3).total());
        assert_eq!(0, Score::new(0, 0).total());
    }
}
