use chrono::NaiveDate;
use strum::{EnumCount, IntoEnumIterator};
use thiserror::Error;

use crate::domain::{FormFixture, H2hFixture, Market, MatchInsights, MatchOdds, Outcome};

/// Decimal prices below this cannot pay out and are treated as malformed.
pub const MIN_PRICE: f64 = 1.0;

#[derive(Debug, Error)]
pub enum InvalidInput {
    #[error("{0}")]
    UnrealScoreline(#[from] UnrealScoreline),

    #[error("{0}")]
    InvalidOdds(#[from] InvalidOdds),
}

#[derive(Debug, Error)]
#[error("{goals} goals for one side in the fixture dated {date} exceeds the cap of {cap}")]
pub struct UnrealScoreline {
    pub date: NaiveDate,
    pub goals: u8,
    pub cap: u8,
}

#[derive(Debug, Clone)]
pub struct SaneScorelineAssertion {
    pub cap: u8,
}
impl SaneScorelineAssertion {
    const DEFAULT_CAP: u8 = 20;

    pub fn with_default_cap() -> Self {
        Self {
            cap: Self::DEFAULT_CAP,
        }
    }

    pub fn check_form(&self, fixtures: &[FormFixture]) -> Result<(), UnrealScoreline> {
        for fixture in fixtures {
            self.check_goals(fixture.date, fixture.goals_for)?;
            self.check_goals(fixture.date, fixture.goals_against)?;
        }
        Ok(())
    }

    pub fn check_h2h(&self, fixtures: &[H2hFixture]) -> Result<(), UnrealScoreline> {
        for fixture in fixtures {
            self.check_goals(fixture.date, fixture.hosts)?;
            self.check_goals(fixture.date, fixture.visitors)?;
        }
        Ok(())
    }

    fn check_goals(&self, date: NaiveDate, goals: u8) -> Result<(), UnrealScoreline> {
        if goals > self.cap {
            Err(UnrealScoreline {
                date,
                goals,
                cap: self.cap,
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidOdds {
    #[error("{0}")]
    ExtraneousOutcome(#[from] ExtraneousOutcome),

    #[error("{0}")]
    UnrealPrice(#[from] UnrealPrice),
}

#[derive(Debug, Error)]
#[error("{outcome:?} does not belong in {market}")]
pub struct ExtraneousOutcome {
    pub market: Market,
    pub outcome: Outcome,
}

#[derive(Debug, Error)]
#[error("price {price} quoted for {outcome:?} in {market} is not a decimal price")]
pub struct UnrealPrice {
    pub market: Market,
    pub outcome: Outcome,
    pub price: f64,
}

impl MatchOdds {
    pub fn validate(&self) -> Result<(), InvalidOdds> {
        for (&market, prices) in &self.offerings {
            for (&outcome, &price) in prices {
                if !outcome.belongs_to(&market) {
                    return Err(ExtraneousOutcome { market, outcome }.into());
                }
                if !price.is_finite() || price < MIN_PRICE {
                    return Err(UnrealPrice {
                        market,
                        outcome,
                        price,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum InvalidInsights {
    #[error("{expected} markets configured but {actual} recommendations produced")]
    RecommendationCount { expected: usize, actual: usize },

    #[error("no recommendation for {market}")]
    MissingMarket { market: Market },

    #[error("recommendations not ranked by confidence at position {index}")]
    Unranked { index: usize },

    #[error("confidence {confidence} for {market} is outside [0, 1]")]
    ConfidenceBounds { market: Market, confidence: f64 },

    #[error("impact {impact} for {player} is outside [0, 1]")]
    ImpactBounds { player: String, impact: f64 },

    #[error("venue bias {bias} is outside [-1, 1]")]
    BiasBounds { bias: f64 },

    #[error("{0}")]
    ExtraneousOutcome(#[from] ExtraneousOutcome),
}

impl MatchInsights {
    /// Hard output invariants, checked by the aggregation step rather than assumed.
    pub fn validate(&self) -> Result<(), InvalidInsights> {
        if self.recommendations.len() != Market::COUNT {
            return Err(InvalidInsights::RecommendationCount {
                expected: Market::COUNT,
                actual: self.recommendations.len(),
            });
        }
        for market in Market::iter() {
            let scored = self
                .recommendations
                .iter()
                .filter(|recommendation| recommendation.market == market)
                .count();
            if scored != 1 {
                return Err(InvalidInsights::MissingMarket { market });
            }
        }
        for (index, pair) in self.recommendations.windows(2).enumerate() {
            if pair[0].confidence < pair[1].confidence {
                return Err(InvalidInsights::Unranked { index: index + 1 });
            }
        }
        for recommendation in &self.recommendations {
            if !(0.0..=1.0).contains(&recommendation.confidence) {
                return Err(InvalidInsights::ConfidenceBounds {
                    market: recommendation.market,
                    confidence: recommendation.confidence,
                });
            }
            if !recommendation.outcome.belongs_to(&recommendation.market) {
                return Err(ExtraneousOutcome {
                    market: recommendation.market,
                    outcome: recommendation.outcome,
                }
                .into());
            }
        }
        for missing in self.home_absences.iter().chain(self.away_absences.iter()) {
            if !(0.0..=1.0).contains(&missing.impact) {
                return Err(InvalidInsights::ImpactBounds {
                    player: missing.player.clone(),
                    impact: missing.impact,
                });
            }
        }
        if !(-1.0..=1.0).contains(&self.h2h.venue_bias) {
            return Err(InvalidInsights::BiasBounds {
                bias: self.h2h.venue_bias,
            });
        }
        Ok(())
    }
}
