//! Judges the impact of sidelined players against the league's scoring leaders.

use crate::config::Config;
use crate::domain::{KeyPlayerMissing, Sidelined, TopScorer};

/// Weighs each absence for `team`, highest impact first. A player on the
/// scoring-leaders list is weighted by their share of the team's listed goals;
/// anyone else gets the flat baseline, a conservative floor in place of deeper
/// squad-role data.
pub fn analyse(
    team: &str,
    sidelined: &[Sidelined],
    scorers: &[TopScorer],
    config: &Config,
) -> Vec<KeyPlayerMissing> {
    let team_goals: u32 = scorers
        .iter()
        .filter(|scorer| scorer.team == team)
        .map(|scorer| scorer.goals as u32)
        .sum();

    let mut missing = sidelined
        .iter()
        .map(|absence| {
            let listed = scorers
                .iter()
                .find(|scorer| scorer.team == team && scorer.player == absence.player);
            let impact = match listed {
                Some(scorer) if team_goals > 0 => {
                    let share = (scorer.goals as f64 / team_goals as f64).clamp(0.0, 1.0);
                    config.baseline_absence_impact
                        + (1.0 - config.baseline_absence_impact) * share
                }
                _ => config.baseline_absence_impact,
            };
            KeyPlayerMissing {
                player: absence.player.clone(),
                impact,
                reason: absence.reason,
                returns: absence.returns,
            }
        })
        .collect::<Vec<_>>();

    missing.sort_by(|a, b| {
        b.impact
            .total_cmp(&a.impact)
            .then_with(|| a.player.cmp(&b.player))
    });
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AbsenceReason;
    use assert_float_eq::*;
    use chrono::NaiveDate;

    fn absence(player: &str) -> Sidelined {
        Sidelined {
            player: player.into(),
            reason: AbsenceReason::Injury,
            returns: None,
        }
    }

    fn scorer(player: &str, team: &str, goals: u16) -> TopScorer {
        TopScorer {
            player: player.into(),
            team: team.into(),
            goals,
            team_rank: 1,
        }
    }

    #[test]
    fn listed_scorer_outweighs_unlisted_player() {
        let config = Config::default();
        let scorers = [scorer("Striker", "Albion", 10), scorer("Winger", "Albion", 10)];
        let missing = analyse(
            "Albion",
            &[absence("Striker"), absence("Defender")],
            &scorers,
            &config,
        );
        assert_eq!(2, missing.len());
        assert_eq!("Striker", missing[0].player);
        assert!(missing[0].impact > missing[1].impact);
        assert_f64_near!(config.baseline_absence_impact, missing[1].impact);
    }

    #[test]
    fn any_positive_share_beats_the_baseline() {
        let config = Config::default();
        // A one-goal share of a huge total still lands strictly above the floor.
        let scorers = [scorer("Fringe", "Albion", 1), scorer("Star", "Albion", 99)];
        let missing = analyse("Albion", &[absence("Fringe")], &scorers, &config);
        assert!(missing[0].impact > config.baseline_absence_impact);
        assert!(missing[0].impact <= 1.0);
    }

    #[test]
    fn impact_proportional_to_goal_share() {
        let config = Config::default();
        let scorers = [scorer("Star", "Albion", 15), scorer("Support", "Albion", 5)];
        let missing = analyse("Albion", &[absence("Star")], &scorers, &config);
        // Share of 0.75 over a 0.1 floor.
        assert_float_relative_eq!(0.1 + 0.9 * 0.75, missing[0].impact, 0.0001);
    }

    #[test]
    fn scorers_from_other_teams_do_not_count() {
        let config = Config::default();
        let scorers = [scorer("Striker", "Rovers", 20)];
        let missing = analyse("Albion", &[absence("Striker")], &scorers, &config);
        assert_f64_near!(config.baseline_absence_impact, missing[0].impact);
    }

    #[test]
    fn zero_listed_goals_falls_back_to_baseline() {
        let config = Config::default();
        let scorers = [scorer("Striker", "Albion", 0)];
        let missing = analyse("Albion", &[absence("Striker")], &scorers, &config);
        assert_f64_near!(config.baseline_absence_impact, missing[0].impact);
    }

    #[test]
    fn ordering_is_deterministic() {
        let config = Config::default();
        let missing = analyse(
            "Albion",
            &[absence("Zed"), absence("Abel"), absence("Mona")],
            &[],
            &config,
        );
        // Equal impacts fall back to name order.
        let names = missing
            .iter()
            .map(|player| player.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(vec!["Abel", "Mona", "Zed"], names);
    }

    #[test]
    fn return_date_is_carried_but_irrelevant_to_impact() {
        let config = Config::default();
        let dated = Sidelined {
            player: "Striker".into(),
            reason: AbsenceReason::Suspension,
            returns: NaiveDate::from_ymd_opt(2024, 5, 1),
        };
        let missing = analyse("Albion", &[dated], &[], &config);
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 1), missing[0].returns);
        assert_f64_near!(config.baseline_absence_impact, missing[0].impact);
    }
}
