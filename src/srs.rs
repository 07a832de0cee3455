// src/srs.rs

//! Spaced repetition ladder and streak arithmetic.
//!
//! A correct answer climbs one rung of [`SRS_INTERVAL_HOURS`], an incorrect one
//! drops back to the first rung. There is no ease factor.

use crate::constants::SRS_INTERVAL_HOURS;
use crate::models::{PerformanceData, PerformanceEntry, ProblemId};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::debug;

/// Hours until the next review for a given level. Levels past the end of the
/// ladder reuse the longest interval.
pub fn review_delay_hours(srs_level: u32) -> i64 {
    let idx = (srs_level as usize).min(SRS_INTERVAL_HOURS.len() - 1);
    SRS_INTERVAL_HOURS[idx]
}

pub fn next_review_at(srs_level: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::hours(review_delay_hours(srs_level))
}

/// Applies one answer to an entry in place.
pub fn apply_answer(entry: &mut PerformanceEntry, is_correct: bool, now: DateTime<Utc>) {
    let old_level = entry.srs_level;

    if is_correct {
        entry.correct += 1;
        entry.srs_level = entry.srs_level.saturating_add(1);
    } else {
        entry.incorrect += 1;
        entry.srs_level = 0;
    }
    entry.next_review = next_review_at(entry.srs_level, now);

    debug!(
        "[SRS] Correct: {}, Level {} -> {}, Next review {}",
        is_correct, old_level, entry.srs_level, entry.next_review
    );
}

/// Streak after practicing on `today`.
///
/// Same-day repeats keep the streak; yesterday extends it; any longer gap
/// restarts at 1. A last date after `today` (clock moved back) is treated
/// like a same-day repeat.
pub fn next_streak(current: u32, last_practice: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_practice else {
        return 1;
    };

    match (today - last).num_days() {
        1 => current + 1,
        d if d > 1 => 1,
        _ => current,
    }
}

/// Ids whose next review is at or before `now`, ascending.
pub fn due_problem_ids(data: &PerformanceData, now: DateTime<Utc>) -> Vec<ProblemId> {
    data.iter()
        .filter(|(_, entry)| entry.next_review <= now)
        .map(|(&id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_delay_table_and_clamp() {
        let expected = [4, 8, 24, 72, 168, 336, 672, 2688];
        for (level, hours) in expected.iter().enumerate() {
            assert_eq!(review_delay_hours(level as u32), *hours);
        }
        assert_eq!(review_delay_hours(8), 2688);
        assert_eq!(review_delay_hours(500), 2688);
    }

    #[test]
    fn test_consecutive_correct_climbs_ladder() {
        let now = at(9);
        let mut entry = PerformanceEntry::new(now);
        for n in 1..=10 {
            apply_answer(&mut entry, true, now);
            assert_eq!(entry.srs_level, n);
        }
        assert_eq!(entry.correct, 10);
        assert_eq!(entry.next_review, now + Duration::hours(2688));
    }

    #[test]
    fn test_incorrect_resets_level() {
        let now = at(9);
        let mut entry = PerformanceEntry::new(now);
        apply_answer(&mut entry, true, now);
        apply_answer(&mut entry, true, now);
        apply_answer(&mut entry, false, now);

        assert_eq!(entry.srs_level, 0);
        assert_eq!(entry.correct, 2);
        assert_eq!(entry.incorrect, 1);
        assert_eq!(entry.next_review, now + Duration::hours(4));
    }

    #[test]
    fn test_first_correct_answer_uses_level_one() {
        let now = at(9);
        let mut entry = PerformanceEntry::new(now);
        apply_answer(&mut entry, true, now);
        assert_eq!(entry.next_review, now + Duration::hours(8));
    }

    #[test]
    fn test_streak_rules() {
        assert_eq!(next_streak(0, None, day(10)), 1);
        assert_eq!(next_streak(4, Some(day(9)), day(10)), 5);
        assert_eq!(next_streak(4, Some(day(10)), day(10)), 4);
        assert_eq!(next_streak(4, Some(day(8)), day(10)), 1);
        assert_eq!(next_streak(4, Some(day(1)), day(10)), 1);
        assert_eq!(next_streak(4, Some(day(12)), day(10)), 4);
    }

    #[test]
    fn test_due_ids_boundary_inclusive() {
        let now = at(12);
        let mut data = PerformanceData::new();
        data.insert(5, PerformanceEntry::new(now));
        data.insert(2, PerformanceEntry::new(at(11)));
        data.insert(9, PerformanceEntry::new(at(13)));

        assert_eq!(due_problem_ids(&data, now), vec![2, 5]);
    }
}
