//! Derives the pairing's head-to-head tendencies from their shared history.

use std::cmp::Ordering;

use crate::domain::{H2hFixture, H2hMetrics};

/// Fixtures must be ordered most recent first. Outcomes are classified on goals
/// alone: strictly more goals wins, equal goals is a draw wherever it was played.
pub fn analyse(fixtures: &[H2hFixture]) -> H2hMetrics {
    if fixtures.is_empty() {
        return H2hMetrics {
            meetings: 0,
            home_wins: 0,
            draws: 0,
            away_wins: 0,
            avg_total_goals: 0.0,
            venue_bias: 0.0,
            no_history: true,
        };
    }

    let mut home_wins = 0;
    let mut draws = 0;
    let mut away_wins = 0;
    let mut total_goals = 0u32;
    for fixture in fixtures {
        let aligned = fixture.aligned();
        total_goals += aligned.total() as u32;
        match aligned.home.cmp(&aligned.away) {
            Ordering::Greater => home_wins += 1,
            Ordering::Equal => draws += 1,
            Ordering::Less => away_wins += 1,
        }
    }

    let meetings = fixtures.len();
    H2hMetrics {
        meetings,
        home_wins,
        draws,
        away_wins,
        avg_total_goals: total_goals as f64 / meetings as f64,
        venue_bias: (home_wins as f64 - away_wins as f64) / meetings as f64,
        no_history: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;
    use assert_float_eq::*;
    use chrono::NaiveDate;

    fn meeting(hosted_by: Side, hosts: u8, visitors: u8) -> H2hFixture {
        H2hFixture {
            date: NaiveDate::from_ymd_opt(2023, 10, 7).unwrap(),
            hosted_by,
            hosts,
            visitors,
        }
    }

    #[test]
    fn no_meetings_sets_the_flag_and_zero_bias() {
        let metrics = analyse(&[]);
        assert!(metrics.no_history);
        assert_eq!(0, metrics.meetings);
        assert_f64_near!(0.0, metrics.venue_bias);
        assert_f64_near!(0.0, metrics.avg_total_goals);
    }

    #[test]
    fn equal_goals_draw_wherever_hosted() {
        let metrics = analyse(&[
            meeting(Side::Home, 2, 2),
            meeting(Side::Away, 0, 0),
            meeting(Side::Away, 3, 3),
        ]);
        assert_eq!(3, metrics.draws);
        assert_eq!(0, metrics.home_wins);
        assert_eq!(0, metrics.away_wins);
        assert_f64_near!(0.0, metrics.venue_bias);
    }

    #[test]
    fn wins_follow_the_aligned_scoreline() {
        // Hosted away and the hosts won, so the upcoming away side takes it.
        let metrics = analyse(&[meeting(Side::Away, 2, 1)]);
        assert_eq!(1, metrics.away_wins);
        assert_eq!(0, metrics.home_wins);
        // Hosted away but the visitors won: that's the upcoming home side.
        let metrics = analyse(&[meeting(Side::Away, 0, 1)]);
        assert_eq!(1, metrics.home_wins);
    }

    #[test]
    fn bias_from_ten_meetings_split_six_two_two() {
        let mut fixtures = Vec::new();
        for _ in 0..6 {
            fixtures.push(meeting(Side::Home, 2, 0));
        }
        for _ in 0..2 {
            fixtures.push(meeting(Side::Home, 1, 1));
        }
        for _ in 0..2 {
            fixtures.push(meeting(Side::Away, 2, 0));
        }
        let metrics = analyse(&fixtures);
        assert_eq!(10, metrics.meetings);
        assert_eq!(6, metrics.home_wins);
        assert_eq!(2, metrics.draws);
        assert_eq!(2, metrics.away_wins);
        assert_float_relative_eq!(0.4, metrics.venue_bias, 0.0001);
    }

    #[test]
    fn bias_stays_bounded() {
        let sweep = analyse(&[meeting(Side::Home, 1, 0), meeting(Side::Away, 0, 1)]);
        assert_f64_near!(1.0, sweep.venue_bias);
        let reverse = analyse(&[meeting(Side::Home, 0, 1), meeting(Side::Away, 1, 0)]);
        assert_f64_near!(-1.0, reverse.venue_bias);
    }

    #[test]
    fn average_combined_goals() {
        let metrics = analyse(&[meeting(Side::Home, 3, 1), meeting(Side::Away, 1, 1)]);
        assert_float_relative_eq!(3.0, metrics.avg_total_goals, 0.0001);
    }
}
