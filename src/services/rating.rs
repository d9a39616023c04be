use crate::domain::{BprResult, CompetitionResult};
use crate::services::scoring::{placement_score, size_weight};
use chrono::{DateTime, Utc};

/// Per-step recency multiplier; the most recent result is weighted `DECAY^1`.
pub const RECENCY_DECAY: f64 = 0.90;
/// Strength of the prior, in virtual competitions.
pub const PRIOR_STRENGTH: f64 = 5.0;
/// Neutral skill every rating is shrunk toward.
pub const PRIOR_MEAN: f64 = 0.50;
/// Only the most recent results count.
pub const MAX_HISTORY: usize = 40;
pub const INACTIVE_AFTER_DAYS: i64 = 60;
pub const INACTIVE_WEEKLY_FACTOR: f64 = 0.99;
/// Ratings built from fewer results than this are provisional.
pub const PROVISIONAL_BELOW: usize = 3;

/// Bayesian Placement Rating of a competition history, evaluated at `now`.
///
/// Results are taken most recent first (ties on `ended_at` ordered by
/// competition id) and capped at [`MAX_HISTORY`]. Each one contributes its
/// placement score weighted by field size and recency. The weighted mean is
/// shrunk toward [`PRIOR_MEAN`] by [`PRIOR_STRENGTH`] virtual results, then
/// decayed weekly once the latest result is more than
/// [`INACTIVE_AFTER_DAYS`] old. A decayed rating is floored at the prior mean.
pub fn calculate_bpr(results: &[CompetitionResult], now: DateTime<Utc>) -> BprResult {
    if results.is_empty() {
        return BprResult {
            bpr: PRIOR_MEAN,
            competitions_count: 0,
            is_provisional: true,
            weighted_average: PRIOR_MEAN,
            total_weight: 0.0,
        };
    }

    let mut history: Vec<&CompetitionResult> = results.iter().collect();
    history.sort_by(|a, b| {
        b.ended_at
            .cmp(&a.ended_at)
            .then_with(|| a.competition_id.cmp(&b.competition_id))
    });
    history.truncate(MAX_HISTORY);
    let counted = history.len();

    let mut sum_weight = 0.0;
    let mut sum_weighted_score = 0.0;
    for (position, result) in history.iter().enumerate() {
        let score = placement_score(result.finish_rank, result.field_size);
        let weight = size_weight(result.field_size) * RECENCY_DECAY.powi(position as i32 + 1);

        sum_weight += weight;
        sum_weighted_score += weight * score;
    }

    let weighted_average = if sum_weight > 0.0 {
        sum_weighted_score / sum_weight
    } else {
        PRIOR_MEAN
    };

    let shrunk = (weighted_average * counted as f64 + PRIOR_MEAN * PRIOR_STRENGTH)
        / (counted as f64 + PRIOR_STRENGTH);

    let bpr = apply_inactivity_decay(shrunk, history[0].ended_at, now);

    BprResult {
        bpr: round2(bpr),
        competitions_count: counted,
        is_provisional: counted < PROVISIONAL_BELOW,
        weighted_average: round2(weighted_average),
        total_weight: round2(sum_weight),
    }
}

fn apply_inactivity_decay(bpr: f64, most_recent: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days_inactive = (now - most_recent).num_days();
    if days_inactive <= INACTIVE_AFTER_DAYS {
        return bpr;
    }

    let weeks_inactive = (days_inactive - INACTIVE_AFTER_DAYS) / 7;
    let decayed = bpr * INACTIVE_WEEKLY_FACTOR.powi(weeks_inactive as i32);
    decayed.max(PRIOR_MEAN)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn result(id: &str, rank: u32, field: u32, days_ago: i64) -> CompetitionResult {
        CompetitionResult {
            competition_id: id.to_string(),
            finish_rank: rank,
            field_size: field,
            ended_at: now() - Duration::days(days_ago),
            points: 0.0,
        }
    }

    fn wins(count: usize, days_ago: i64) -> Vec<CompetitionResult> {
        (0..count)
            .map(|i| result(&format!("w{i}"), 1, 2, days_ago))
            .collect()
    }

    #[test]
    fn empty_history_is_neutral_and_provisional() {
        let rating = calculate_bpr(&[], now());
        assert_eq!(rating.bpr, 0.50);
        assert_eq!(rating.weighted_average, 0.50);
        assert_eq!(rating.competitions_count, 0);
        assert_eq!(rating.total_weight, 0.0);
        assert!(rating.is_provisional);
    }

    #[test]
    fn single_head_to_head_win_is_shrunk_toward_prior() {
        let rating = calculate_bpr(&[result("c1", 1, 2, 0)], now());
        assert_eq!(rating.weighted_average, 1.0);
        assert_eq!(rating.bpr, 0.58);
        assert_eq!(rating.total_weight, 0.9);
        assert_eq!(rating.competitions_count, 1);
        assert!(rating.is_provisional);
    }

    #[test]
    fn solo_competition_is_neutral() {
        let rating = calculate_bpr(&[result("solo", 1, 1, 0)], now());
        assert_eq!(rating.weighted_average, 0.5);
        assert_eq!(rating.bpr, 0.5);
        assert_eq!(rating.total_weight, 0.45);
    }

    #[test]
    fn identical_placements_average_to_their_score() {
        let history: Vec<_> = (0..6)
            .map(|i| result(&format!("c{i}"), 2, 3, i))
            .collect();
        let rating = calculate_bpr(&history, now());
        assert_eq!(rating.weighted_average, 0.5);
        assert_eq!(rating.bpr, 0.5);
        assert!(!rating.is_provisional);
    }

    #[test]
    fn provisional_until_three_results() {
        assert!(calculate_bpr(&wins(2, 0), now()).is_provisional);
        assert!(!calculate_bpr(&wins(3, 0), now()).is_provisional);
    }

    #[test]
    fn larger_fields_weigh_more() {
        // Recent head-to-head loss, older win in a 64-player field.
        let history = vec![result("small", 2, 2, 1), result("big", 1, 64, 2)];
        let rating = calculate_bpr(&history, now());
        assert!(rating.weighted_average > 0.8);
    }

    #[test]
    fn recent_results_weigh_more() {
        let recent_win = vec![result("a", 1, 8, 1), result("b", 8, 8, 2)];
        let recent_loss = vec![result("a", 8, 8, 1), result("b", 1, 8, 2)];
        assert!(
            calculate_bpr(&recent_win, now()).weighted_average
                > calculate_bpr(&recent_loss, now()).weighted_average
        );
    }

    #[test]
    fn history_is_capped_at_forty_most_recent() {
        let mut history: Vec<_> = (0..40)
            .map(|i| result(&format!("recent{i:02}"), (i % 5) as u32 + 1, 6, i as i64))
            .collect();
        let kept = calculate_bpr(&history, now());
        assert_eq!(kept.competitions_count, 40);

        // Oldest five are last place in huge fields and must be ignored.
        for i in 0..5 {
            history.push(result(&format!("old{i}"), 1000, 1000, 100 + i));
        }
        let capped = calculate_bpr(&history, now());
        assert_eq!(capped, kept);

        history.reverse();
        assert_eq!(calculate_bpr(&history, now()), kept);
    }

    #[test]
    fn forty_one_results_drop_the_oldest() {
        let mut history = wins(40, 1);
        let baseline = calculate_bpr(&history, now());
        history.push(result("oldest", 10, 10, 30));
        let rating = calculate_bpr(&history, now());
        assert_eq!(rating.competitions_count, 40);
        assert_eq!(rating, baseline);
    }

    #[test]
    fn no_decay_at_exactly_sixty_days() {
        let fresh = calculate_bpr(&wins(5, 0), now());
        let idle = calculate_bpr(&wins(5, INACTIVE_AFTER_DAYS), now());
        assert_eq!(fresh.bpr, 0.75);
        assert_eq!(idle.bpr, 0.75);
    }

    #[test]
    fn one_week_of_decay_after_sixty_seven_days() {
        let rating = calculate_bpr(&wins(5, 67), now());
        // 0.75 * 0.99
        assert_eq!(rating.bpr, 0.74);
        assert_eq!(rating.weighted_average, 1.0);
    }

    #[test]
    fn partial_week_does_not_decay() {
        assert_eq!(calculate_bpr(&wins(5, 66), now()).bpr, 0.75);
    }

    #[test]
    fn several_weeks_of_decay() {
        // 0.75 * 0.99^3
        assert_eq!(calculate_bpr(&wins(5, 81), now()).bpr, 0.73);
    }

    #[test]
    fn decay_never_drops_below_prior_mean() {
        let rating = calculate_bpr(&[result("c1", 1, 2, 400)], now());
        assert_eq!(rating.bpr, PRIOR_MEAN);
    }

    #[test]
    fn inactive_ratings_are_floored_at_prior_mean() {
        let active = calculate_bpr(&[result("c1", 2, 2, 10)], now());
        assert_eq!(active.bpr, 0.42);

        let inactive = calculate_bpr(&[result("c1", 2, 2, 61)], now());
        assert_eq!(inactive.bpr, PRIOR_MEAN);
    }

    #[test]
    fn future_results_are_not_decayed() {
        let rating = calculate_bpr(&wins(5, -3), now());
        assert_eq!(rating.bpr, 0.75);
    }

    #[test]
    fn many_perfect_results_approach_one() {
        let rating = calculate_bpr(&wins(40, 0), now());
        assert_eq!(rating.weighted_average, 1.0);
        // (40 + 2.5) / 45
        assert_eq!(rating.bpr, 0.94);
    }

    #[test]
    fn input_is_not_mutated() {
        let history = vec![result("b", 1, 4, 5), result("a", 2, 4, 1)];
        let before = history.clone();
        calculate_bpr(&history, now());
        assert_eq!(history, before);
    }
}
