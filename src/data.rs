//! Serde model of a pre-fetched match snapshot, as consumed by the CLI. The
//! engine itself performs no I/O; whatever fetched the snapshot maps individual
//! upstream failures to absent sections rather than failing the file.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    AbsenceReason, FormFixture, H2hFixture, Market, MatchOdds, Outcome, Side, Sidelined,
    StandingsRow, TeamRecord, TopScorer,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("unsupported market {0:?}")]
    UnknownMarket(String),

    #[error("unsupported selection {selection:?} for {market}")]
    UnknownSelection { market: Market, selection: String },

    #[error("unparseable date {0:?}")]
    BadDate(String),
}

#[derive(Debug, Deserialize)]
pub struct MatchSnapshot {
    pub home: TeamSection,
    pub away: TeamSection,
    #[serde(default)]
    pub h2h: Vec<H2hEntry>,
    #[serde(default)]
    pub scorers: Vec<TopScorer>,
    #[serde(default)]
    pub odds: Option<HashMap<String, HashMap<String, f64>>>,
}

#[derive(Debug, Deserialize)]
pub struct TeamSection {
    pub team: String,
    #[serde(default)]
    pub fixtures: Vec<FixtureEntry>,
    #[serde(default)]
    pub sidelined: Vec<SidelinedEntry>,
    #[serde(default)]
    pub standing: Option<StandingsRow>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureEntry {
    pub date: String,
    pub opponent: String,
    pub venue: Side,
    pub goals_for: u8,
    pub goals_against: u8,
}

#[derive(Debug, Deserialize)]
pub struct H2hEntry {
    pub date: String,
    pub hosted_by: Side,
    pub hosts: u8,
    pub visitors: u8,
}

#[derive(Debug, Deserialize)]
pub struct SidelinedEntry {
    pub player: String,
    pub reason: AbsenceReason,
    #[serde(default)]
    pub returns: Option<String>,
}

/// The snapshot unpacked into engine inputs.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub home: TeamRecord,
    pub away: TeamRecord,
    pub h2h: Vec<H2hFixture>,
    pub scorers: Vec<TopScorer>,
    pub odds: Option<MatchOdds>,
}

impl MatchSnapshot {
    /// Fails fast on market keys outside the enumeration, selections that do not
    /// belong to their market, and unparseable dates.
    pub fn unpack(&self, goals_line: u8) -> Result<AnalysisRequest, SnapshotError> {
        let odds = match &self.odds {
            None => None,
            Some(raw) => Some(unpack_odds(raw, goals_line)?),
        };
        Ok(AnalysisRequest {
            home: unpack_team(&self.home)?,
            away: unpack_team(&self.away)?,
            h2h: self
                .h2h
                .iter()
                .map(|entry| {
                    Ok(H2hFixture {
                        date: parse_date(&entry.date)?,
                        hosted_by: entry.hosted_by,
                        hosts: entry.hosts,
                        visitors: entry.visitors,
                    })
                })
                .collect::<Result<Vec<_>, SnapshotError>>()?,
            scorers: self.scorers.clone(),
            odds,
        })
    }
}

fn unpack_team(section: &TeamSection) -> Result<TeamRecord, SnapshotError> {
    Ok(TeamRecord {
        team: section.team.clone(),
        fixtures: section
            .fixtures
            .iter()
            .map(|entry| {
                Ok(FormFixture {
                    date: parse_date(&entry.date)?,
                    opponent: entry.opponent.clone(),
                    venue: entry.venue,
                    goals_for: entry.goals_for,
                    goals_against: entry.goals_against,
                })
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?,
        sidelined: section
            .sidelined
            .iter()
            .map(|entry| {
                let returns = match &entry.returns {
                    None => None,
                    Some(raw) => Some(parse_date(raw)?),
                };
                Ok(Sidelined {
                    player: entry.player.clone(),
                    reason: entry.reason,
                    returns,
                })
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?,
        standing: section.standing.clone(),
    })
}

fn unpack_odds(
    raw: &HashMap<String, HashMap<String, f64>>,
    goals_line: u8,
) -> Result<MatchOdds, SnapshotError> {
    let mut offerings = FxHashMap::with_capacity_and_hasher(raw.len(), Default::default());
    for (market_key, selections) in raw {
        let market = Market::from_str(market_key)
            .map_err(|_| SnapshotError::UnknownMarket(market_key.clone()))?;
        let mut prices = HashMap::with_capacity(selections.len());
        for (selection, &price) in selections {
            prices.insert(parse_selection(market, selection, goals_line)?, price);
        }
        offerings.insert(market, prices);
    }
    Ok(MatchOdds { offerings })
}

fn parse_selection(
    market: Market,
    selection: &str,
    goals_line: u8,
) -> Result<Outcome, SnapshotError> {
    let outcome = match (market, selection) {
        (Market::MatchResult, "home") => Outcome::Win(Side::Home),
        (Market::MatchResult, "draw") => Outcome::Draw,
        (Market::MatchResult, "away") => Outcome::Win(Side::Away),
        (Market::DoubleChance, "home-or-draw") => Outcome::WinOrDraw(Side::Home),
        (Market::DoubleChance, "away-or-draw") => Outcome::WinOrDraw(Side::Away),
        (Market::DoubleChance, "home-or-away") => Outcome::EitherWin,
        (Market::TotalGoals, "over") => Outcome::Over(goals_line),
        (Market::TotalGoals, "under") => Outcome::Under(goals_line + 1),
        (Market::BothTeamsToScore, "yes") => Outcome::BothScore,
        (Market::BothTeamsToScore, "no") => Outcome::OneBlank,
        _ => {
            return Err(SnapshotError::UnknownSelection {
                market,
                selection: selection.into(),
            })
        }
    };
    Ok(outcome)
}

fn parse_date(raw: &str) -> Result<NaiveDate, SnapshotError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| SnapshotError::BadDate(raw.into()))
}
