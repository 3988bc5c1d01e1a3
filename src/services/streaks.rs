//! Streak calculation and period aggregation.
//!
//! Pure functions over a habit's completion dates and a reference `today`.
//! Nothing here touches storage, and nothing here can fail: empty inputs
//! yield zero streaks and zero totals. Handlers pass
//! `Local::now().date_naive()` for `today`; tests pass fixed dates.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Frequency;

/// Completion counts for one week window and one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    pub weekly_total: u32,
    pub monthly_total: u32,
}

/// Current streak length for a habit: consecutive qualifying periods (days
/// or weeks) ending at or adjacent to the current period.
///
/// The current period not being completed yet does not break the streak;
/// counting then starts from the previous period instead.
pub fn calculate_streak(frequency: Frequency, dates: &[NaiveDate], today: NaiveDate) -> u32 {
    if dates.is_empty() {
        return 0;
    }
    match frequency {
        Frequency::Daily => daily_streak(dates, today),
        Frequency::Weekly => weekly_streak(dates, today),
    }
}

/// Walks calendar days backwards from `today` (or yesterday, when today is
/// not yet logged) and counts until the first gap.
fn daily_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    // The store guarantees one completion per day; dedup anyway.
    sorted.dedup();

    let mut expected = today;
    if sorted[0] != today {
        expected = today - Duration::days(1);
    }

    let mut streak = 0;
    for &date in &sorted {
        if date == expected {
            streak += 1;
            expected = expected - Duration::days(1);
        } else if date < expected {
            break;
        }
        // A date ahead of `expected` (only possible for the first entries
        // when today is unlogged) is skipped without counting.
    }
    streak
}

/// Counts consecutive covered weeks ending at (or just before) the current
/// week.
///
/// A week is keyed by (calendar year, ISO week number) — deliberately the
/// calendar year, not the ISO year, and rollover past week 1 always lands on
/// week 52 of the prior year even when that year had 53 ISO weeks. Both
/// quirks are load-bearing for existing data; see DESIGN.md.
fn weekly_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let completed_weeks: HashSet<(i32, u32)> = dates
        .iter()
        .map(|d| (d.year(), d.iso_week().week()))
        .collect();

    let mut expected = (today.year(), today.iso_week().week());
    if !completed_weeks.contains(&expected) {
        expected = prior_week(expected);
    }

    let mut streak = 0;
    while completed_weeks.contains(&expected) {
        streak += 1;
        expected = prior_week(expected);
    }
    streak
}

fn prior_week((year, week): (i32, u32)) -> (i32, u32) {
    if week <= 1 {
        (year - 1, 52)
    } else {
        (year, week - 1)
    }
}

/// Completion counts for the given Jan-1-anchored week window and calendar
/// month. An out-of-range `year` yields an empty window, hence zero.
pub fn period_totals(dates: &[NaiveDate], year: i32, month: u32, week: u32) -> PeriodTotals {
    let weekly_total = match week_bounds(year, week) {
        Some((start, end)) => count_in_window(dates, start, end),
        None => 0,
    };

    PeriodTotals {
        weekly_total,
        monthly_total: monthly_total(dates, year, month),
    }
}

/// Number of dates inside `[start, end]` inclusive.
pub fn count_in_window(dates: &[NaiveDate], start: NaiveDate, end: NaiveDate) -> u32 {
    dates.iter().filter(|&&d| d >= start && d <= end).count() as u32
}

/// Number of dates in the given calendar (year, month).
pub fn monthly_total(dates: &[NaiveDate], year: i32, month: u32) -> u32 {
    dates
        .iter()
        .filter(|d| d.year() == year && d.month() == month)
        .count() as u32
}

/// Window of week `week` in `year`, anchored to January 1:
/// `start = Jan 1 + ((week - 1) * 7 - weekday_of_jan1)`, `end = start + 6`.
///
/// Not true ISO week numbering; kept byte-for-byte compatible with the stats
/// the API has always reported. `week` comes straight from the query string,
/// so a window that would run off the calendar yields `None` instead of
/// overflowing.
pub fn week_bounds(year: i32, week: u32) -> Option<(NaiveDate, NaiveDate)> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let offset = (i64::from(week) - 1) * 7 - i64::from(jan_first.weekday().num_days_from_monday());
    let start = jan_first.checked_add_signed(Duration::days(offset))?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some((start, end))
}

/// Monday-through-Sunday window containing `today`; the summary endpoint
/// aggregates over this rather than the Jan-1 formula.
pub fn current_week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (start, start + Duration::days(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // A Wednesday, so day and week arithmetic stays inside one ISO week.
    fn today() -> NaiveDate {
        d(2025, 6, 18)
    }

    #[test]
    fn no_completions_no_streak() {
        assert_eq!(calculate_streak(Frequency::Daily, &[], today()), 0);
        assert_eq!(calculate_streak(Frequency::Weekly, &[], today()), 0);
    }

    #[test]
    fn daily_consecutive_days_count() {
        let dates: Vec<NaiveDate> = (0..5).map(|i| today() - Duration::days(i)).collect();
        assert_eq!(calculate_streak(Frequency::Daily, &dates, today()), 5);
    }

    #[test]
    fn daily_streak_stops_at_first_gap() {
        // today, -1, -2, then a hole at -3, then -4 and -5.
        let dates = vec![
            today(),
            today() - Duration::days(1),
            today() - Duration::days(2),
            today() - Duration::days(4),
            today() - Duration::days(5),
        ];
        assert_eq!(calculate_streak(Frequency::Daily, &dates, today()), 3);
    }

    #[test]
    fn daily_missing_today_does_not_zero_streak() {
        let dates = vec![
            today() - Duration::days(1),
            today() - Duration::days(2),
            today() - Duration::days(3),
        ];
        assert_eq!(calculate_streak(Frequency::Daily, &dates, today()), 3);
    }

    #[test]
    fn daily_stale_history_is_no_streak() {
        let dates = vec![today() - Duration::days(3), today() - Duration::days(4)];
        assert_eq!(calculate_streak(Frequency::Daily, &dates, today()), 0);
    }

    #[test]
    fn daily_duplicate_dates_count_once() {
        let dates = vec![today(), today(), today() - Duration::days(1)];
        assert_eq!(calculate_streak(Frequency::Daily, &dates, today()), 2);
    }

    #[test]
    fn weekly_consecutive_weeks_count() {
        let dates = vec![
            today(),
            today() - Duration::days(7),
            today() - Duration::days(14),
        ];
        assert_eq!(calculate_streak(Frequency::Weekly, &dates, today()), 3);
    }

    #[test]
    fn weekly_missing_current_week_does_not_zero_streak() {
        let dates = vec![today() - Duration::days(7), today() - Duration::days(14)];
        assert_eq!(calculate_streak(Frequency::Weekly, &dates, today()), 2);
    }

    #[test]
    fn weekly_one_completion_per_week_is_enough() {
        // Two completions inside the current week still count as one week.
        let dates = vec![d(2025, 6, 16), d(2025, 6, 18), d(2025, 6, 11)];
        assert_eq!(calculate_streak(Frequency::Weekly, &dates, today()), 2);
    }

    #[test]
    fn weekly_streak_spans_year_boundary() {
        // 2026-01-01 is a Thursday in ISO week 1 of 2026; the walker rolls
        // over to week 52 of 2025 (Dec 22-28), then week 51.
        let today = d(2026, 1, 1);
        let dates = vec![d(2026, 1, 1), d(2025, 12, 23), d(2025, 12, 17)];
        assert_eq!(calculate_streak(Frequency::Weekly, &dates, today), 3);
    }

    #[test]
    fn weekly_rollover_assumes_52_weeks_skipping_week_53() {
        // 2020 had 53 ISO weeks. Walking back from week 1 of 2021 lands on
        // (2020, 52), so a completion keyed (2020, 53) is never visited and
        // the streak stops at 2 despite the weeks being contiguous. This is
        // the documented behavior, not an accident.
        let today = d(2021, 1, 11); // Monday, ISO week 2 of 2021
        let dates = vec![
            d(2021, 1, 11), // (2021, 2)
            d(2021, 1, 5),  // (2021, 1)
            d(2020, 12, 30), // (2020, 53) — unreachable by the walker
        ];
        assert_eq!(calculate_streak(Frequency::Weekly, &dates, today), 2);
    }

    #[test]
    fn monthly_total_counts_matching_year_month_only() {
        let dates = vec![
            d(2025, 6, 1),
            d(2025, 6, 15),
            d(2025, 5, 31),
            d(2024, 6, 10),
        ];
        let totals = period_totals(&dates, 2025, 6, 25);
        assert_eq!(totals.monthly_total, 2);
    }

    #[test]
    fn week_bounds_anchor_to_january_first() {
        // Jan 1 2025 is a Wednesday (weekday 2), so week 1 starts on the
        // prior Monday, Dec 30 2024.
        assert_eq!(
            week_bounds(2025, 1),
            Some((d(2024, 12, 30), d(2025, 1, 5)))
        );
        assert_eq!(week_bounds(2025, 2), Some((d(2025, 1, 6), d(2025, 1, 12))));
    }

    #[test]
    fn week_bounds_rejects_window_past_calendar_end() {
        // A query-supplied week count can push the window beyond chrono's
        // date range; that must come back as None, not a panic.
        assert_eq!(week_bounds(2025, 4_000_000_000), None);
        assert_eq!(week_bounds(262142, u32::MAX), None);
    }

    #[test]
    fn period_totals_with_out_of_range_week_is_zero() {
        let dates = vec![d(2025, 6, 16), d(2025, 6, 18)];
        let totals = period_totals(&dates, 2025, 6, 4_000_000_000);
        assert_eq!(totals.weekly_total, 0);
        assert_eq!(totals.monthly_total, 2);
    }

    #[test]
    fn weekly_total_counts_window_inclusively() {
        // Week 25 of 2025 under the Jan-1 anchor: Jun 16 - Jun 22.
        let dates = vec![d(2025, 6, 16), d(2025, 6, 22), d(2025, 6, 23)];
        let totals = period_totals(&dates, 2025, 6, 25);
        assert_eq!(totals.weekly_total, 2);
    }

    #[test]
    fn current_week_bounds_are_monday_anchored() {
        assert_eq!(current_week_bounds(today()), (d(2025, 6, 16), d(2025, 6, 22)));
        // A Monday is its own week start.
        assert_eq!(
            current_week_bounds(d(2025, 6, 16)),
            (d(2025, 6, 16), d(2025, 6, 22))
        );
    }

    #[test]
    fn recomputation_is_idempotent() {
        let dates = vec![today(), today() - Duration::days(1)];
        let first = calculate_streak(Frequency::Daily, &dates, today());
        let second = calculate_streak(Frequency::Daily, &dates, today());
        assert_eq!(first, second);
        assert_eq!(
            period_totals(&dates, 2025, 6, 25),
            period_totals(&dates, 2025, 6, 25)
        );
    }
}
