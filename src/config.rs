//! Policy constants for the analyzers and the recommender, isolated so they can be
//! tuned without touching the analysis logic.

use std::error::Error;

use anyhow::anyhow;
use ordinalizer::Ordinal;
use strum::EnumCount;
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValidationError(#[from] pub Box<dyn Error>);

impl From<anyhow::Error> for ValidationError {
    fn from(value: anyhow::Error) -> Self {
        ValidationError(value.into())
    }
}

/// The independent signals blended into a market edge; indexes the weight vector.
#[derive(Debug, Clone, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
pub enum Signal {
    Form,
    HeadToHead,
    Availability,
    Standings,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Fixtures beyond this many are ignored outright, not averaged in.
    pub form_window: usize,
    pub h2h_window: usize,
    /// Exponential decay applied per step away from the most recent fixture; in (0, 1).
    pub form_decay: f64,
    /// Below this many fixtures the form score is flagged low-confidence.
    pub min_form_sample: usize,
    /// Impact assigned to a sidelined player absent from the scoring leaders.
    pub baseline_absence_impact: f64,
    /// Signal blend weights, indexed by [Signal]; must sum to 1.
    pub weights: [f64; Signal::COUNT],
    /// Half-width of the edge band inside which the match-result pick is the draw.
    pub draw_band: f64,
    /// Whole-goal line: the totals market quotes over `goals_line` / under `goals_line + 1`.
    pub goals_line: u8,
    /// Share of the head-to-head goal average blended into the totals expectation.
    pub h2h_goal_blend: f64,
    /// Expected goals removed per point of combined absence impact.
    pub absence_goal_penalty: f64,
    /// Confidence gained per goal of distance between the expectation and the line.
    pub goals_confidence_slope: f64,
    /// Head-to-head draw share below which the double chance may back either side.
    pub rare_draw_share: f64,
    pub notable_form_edge: f64,
    pub notable_bias: f64,
    pub notable_impact: f64,
    pub notable_rank_gap: u16,
    /// Rank gaps are divided by this before entering the blend.
    pub rank_gap_norm: f64,
    /// Coverage below this attaches the low-confidence reasoning entry.
    pub low_coverage: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_window: 6,
            h2h_window: 10,
            form_decay: 0.8,
            min_form_sample: 3,
            baseline_absence_impact: 0.1,
            weights: [0.40, 0.25, 0.20, 0.15],
            draw_band: 0.08,
            goals_line: 2,
            h2h_goal_blend: 0.35,
            absence_goal_penalty: 0.3,
            goals_confidence_slope: 0.25,
            rare_draw_share: 0.2,
            notable_form_edge: 0.2,
            notable_bias: 0.3,
            notable_impact: 0.25,
            notable_rank_gap: 5,
            rank_gap_norm: 20.0,
            low_coverage: 0.5,
        }
    }
}

impl Config {
    const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

    pub fn weight(&self, signal: &Signal) -> f64 {
        self.weights[signal.ordinal()]
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.form_window == 0 {
            return Err(anyhow!("form window cannot be zero").into());
        }
        if self.h2h_window == 0 {
            return Err(anyhow!("head-to-head window cannot be zero").into());
        }
        if self.form_decay <= 0.0 || self.form_decay >= 1.0 {
            return Err(anyhow!("form decay {} outside (0, 1)", self.form_decay).into());
        }
        if self.min_form_sample == 0 {
            return Err(anyhow!("minimum form sample cannot be zero").into());
        }
        if !(0.0..1.0).contains(&self.baseline_absence_impact) {
            return Err(anyhow!(
                "baseline absence impact {} outside [0, 1)",
                self.baseline_absence_impact
            )
            .into());
        }
        for (index, &weight) in self.weights.iter().enumerate() {
            if !(0.0..=1.0).contains(&weight) {
                return Err(anyhow!("signal weight at {index} is {weight}, outside [0, 1]").into());
            }
        }
        let weight_sum: f64 = self.weights.iter().sum();
        if (weight_sum - 1.0).abs() > Self::WEIGHT_SUM_TOLERANCE {
            return Err(anyhow!("signal weights sum to {weight_sum}, expected 1").into());
        }
        if !(0.0..0.5).contains(&self.draw_band) {
            return Err(anyhow!("draw band {} outside [0, 0.5)", self.draw_band).into());
        }
        if !(0.0..=1.0).contains(&self.h2h_goal_blend) {
            return Err(anyhow!("h2h goal blend {} outside [0, 1]", self.h2h_goal_blend).into());
        }
        if !(0.0..=1.0).contains(&self.rare_draw_share) {
            return Err(anyhow!("rare draw share {} outside [0, 1]", self.rare_draw_share).into());
        }
        if !(0.0..=1.0).contains(&self.low_coverage) {
            return Err(anyhow!("low coverage {} outside [0, 1]", self.low_coverage).into());
        }
        if self.rank_gap_norm <= 0.0 {
            return Err(anyhow!("rank gap norm must be positive").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn weight_lookup_by_signal() {
        let config = Config::default();
        assert_eq!(0.40, config.weight(&Signal::Form));
        assert_eq!(0.25, config.weight(&Signal::HeadToHead));
        assert_eq!(0.20, config.weight(&Signal::Availability));
        assert_eq!(0.15, config.weight(&Signal::Standings));
    }

    #[test]
    fn rejects_decay_outside_open_interval() {
        let mut config = Config::default();
        config.form_decay = 1.0;
        assert_eq!(
            "form decay 1 outside (0, 1)",
            config.validate().unwrap_err().to_string()
        );
    }

    #[test]
    fn rejects_zero_window() {
        let mut config = Config::default();
        config.form_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unnormalised_weights() {
        let mut config = Config::default();
        config.weights = [0.4, 0.25, 0.2, 0.2];
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("expected 1"));
    }

    #[test]
    fn rejects_wide_draw_band() {
        let mut config = Config::default();
        config.draw_band = 0.5;
        assert!(config.validate().is_err());
    }
}
