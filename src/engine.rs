//! Orchestrates the analyzers and the recommender into a single `MatchInsights`.

use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ValidationError};
use crate::domain::error::{InvalidInput, InvalidInsights, SaneScorelineAssertion};
use crate::domain::{H2hFixture, MatchInsights, MatchOdds, TeamRecord, TopScorer};
use crate::recommend::MarketView;
use crate::{availability, form, h2h, recommend};


#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("{0}")]
    InvalidInsights(#[from] InvalidInsights),
}

/// A stateless analysis pass over one pairing. Holds nothing but the validated
/// policy, so a single instance may serve concurrent callers.
#[derive(Debug)]
pub struct Engine {
    pub config: Config,
}
impl TryFrom<Config> for Engine {
    type Error = ValidationError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { config })
    }
}
impl Engine {
    /// Fixture lists must be ordered most recent first. Empty or absent inputs
    /// degrade confidence in-band; only malformed inputs fail.
    pub fn analyse(
        &self,
        home: &TeamRecord,
        away: &TeamRecord,
        h2h_fixtures: &[H2hFixture],
        scorers: &[TopScorer],
        odds: Option<&MatchOdds>,
    ) -> Result<MatchInsights, AnalysisError> {
        let assertion = SaneScorelineAssertion::with_default_cap();
        assertion
            .check_form(&home.fixtures)
            .map_err(InvalidInput::from)?;
        assertion
            .check_form(&away.fixtures)
            .map_err(InvalidInput::from)?;
        assertion
            .check_h2h(h2h_fixtures)
            .map_err(InvalidInput::from)?;
        if let Some(odds) = odds {
            odds.validate().map_err(InvalidInput::from)?;
        }

        let h2h_window = &h2h_fixtures[..h2h_fixtures.len().min(self.config.h2h_window)];

        let home_form = form::analyse(&home.fixtures, &self.config);
        let away_form = form::analyse(&away.fixtures, &self.config);
        let h2h = h2h::analyse(h2h_window);
        let home_absences =
            availability::analyse(&home.team, &home.sidelined, scorers, &self.config);
        let away_absences =
            availability::analyse(&away.team, &away.sidelined, scorers, &self.config);
        debug!(
            "{} vs {}: form {:.3}/{} against {:.3}/{}, {} meetings",
            home.team,
            away.team,
            home_form.score,
            home_form.samples,
            away_form.score,
            away_form.samples,
            h2h.meetings
        );

        let recommendations = recommend::recommend(
            &MarketView {
                home_form: &home_form,
                away_form: &away_form,
                h2h: &h2h,
                home_absences: &home_absences,
                away_absences: &away_absences,
                home_standing: home.standing.as_ref(),
                away_standing: away.standing.as_ref(),
                odds,
            },
            &self.config,
        );

        let insights = MatchInsights {
            home_form,
            away_form,
            h2h,
            home_absences,
            away_absences,
            recommendations,
        };
        insights.validate()?;
        Ok(insights)
    }
}
