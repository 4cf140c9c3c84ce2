//! Deterministic posting-calendar planning.
//!
//! Given a weekly cadence and a horizon in months, produces the ordered
//! list of dates a creator should publish on. Pure date arithmetic: the
//! same inputs always yield the same schedule, so re-running a plan never
//! silently drifts. De-duplication against already-booked dates is the
//! store's job, not the planner's.

use chrono::{Datelike, Duration, Local, Months, NaiveDate};

use crate::constants::{DEFAULT_PLAN_MONTHS, DEFAULT_VIDEOS_PER_WEEK};

/// A request to plan the posting calendar.
///
/// `videos_per_week` must already be validated into 1..=7 before this is
/// built (the CLI argument parser enforces the range); the planner itself
/// neither clamps nor checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRequest {
    pub videos_per_week: u32,
    pub plan_months: u32,
    pub reference_date: NaiveDate,
}

impl Default for PlanRequest {
    fn default() -> Self {
        PlanRequest {
            videos_per_week: DEFAULT_VIDEOS_PER_WEEK,
            plan_months: DEFAULT_PLAN_MONTHS,
            reference_date: Local::now().date_naive(),
        }
    }
}

impl PlanRequest {
    /// Last date of the scheduling window: the reference date advanced by
    /// `plan_months` calendar months, clamped to the end of the target
    /// month when the day-of-month doesn't exist there.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.reference_date
            .checked_add_months(Months::new(self.plan_months))
    }

    pub fn slot_dates(&self) -> Vec<NaiveDate> {
        compute_slot_dates(self.videos_per_week, self.plan_months, self.reference_date)
    }
}

/// Compute the posting dates for `plan_months` months after `reference`.
///
/// Scheduling starts the day after `reference` (never same-day) and ends
/// `plan_months` calendar months after it (month overflow clamps to the
/// last valid day: Jan 31 + 1 month = Feb 28/29). Weeks are aligned to
/// the first Monday on or after the start; within each week the
/// `videos_per_week` slots fall at day offsets `floor(i * 7 / n)`, which
/// spreads them evenly across the week (n=2 → Mon/Thu, n=3 → Mon/Wed/Fri,
/// n=7 → daily). The final week may yield fewer slots when the horizon
/// ends mid-week; dates past the horizon are never emitted.
pub fn compute_slot_dates(
    videos_per_week: u32,
    plan_months: u32,
    reference: NaiveDate,
) -> Vec<NaiveDate> {
    let start = reference + Duration::days(1);

    let Some(end) = reference.checked_add_months(Months::new(plan_months)) else {
        return Vec::new();
    };

    // Align to the next Monday on or after `start` (0 days if already
    // Monday, 1 if Sunday, otherwise 8 - ISO weekday number).
    let days_until_monday = (7 - i64::from(start.weekday().num_days_from_monday())) % 7;
    let mut cursor = start + Duration::days(days_until_monday);

    let mut dates = Vec::new();
    while cursor <= end {
        for i in 0..videos_per_week {
            let day_offset = i64::from(i * 7 / videos_per_week);
            let slot = cursor + Duration::days(day_offset);
            if slot <= end {
                dates.push(slot);
            }
        }
        cursor = cursor + Duration::days(7);
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_per_week_one_month_reference_scenario() {
        // 2024-01-01 is a Monday, so start (Jan 2) is a Tuesday and the
        // first aligned Monday is Jan 8. Offsets {0, 3} per week, capped
        // at end = 2024-02-01.
        let dates = compute_slot_dates(2, 1, date(2024, 1, 1));
        let expected: Vec<NaiveDate> = [
            (2024, 1, 8),
            (2024, 1, 11),
            (2024, 1, 15),
            (2024, 1, 18),
            (2024, 1, 22),
            (2024, 1, 25),
            (2024, 1, 29),
            (2024, 2, 1),
        ]
        .iter()
        .map(|&(y, m, d)| date(y, m, d))
        .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_all_dates_inside_window() {
        let reference = date(2024, 3, 15);
        for videos_per_week in 1..=7 {
            for plan_months in 1..=3 {
                let end = reference
                    .checked_add_months(Months::new(plan_months))
                    .unwrap();
                for slot in compute_slot_dates(videos_per_week, plan_months, reference) {
                    assert!(slot > reference, "{slot} not after reference");
                    assert!(slot <= end, "{slot} past horizon {end}");
                }
            }
        }
    }

    #[test]
    fn test_output_is_sorted_without_duplicates() {
        for videos_per_week in 1..=7 {
            let dates = compute_slot_dates(videos_per_week, 2, date(2024, 5, 9));
            for pair in dates.windows(2) {
                assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_daily_cadence_covers_every_day() {
        // 2024-06-30 is a Sunday, so start = July 1 is already a Monday
        // and the schedule has no alignment gap: every day of the window
        // appears exactly once.
        let reference = date(2024, 6, 30);
        let dates = compute_slot_dates(7, 1, reference);
        let end = date(2024, 7, 30);

        let mut expected = Vec::new();
        let mut day = date(2024, 7, 1);
        while day <= end {
            expected.push(day);
            day = day + Duration::days(1);
        }
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_days_before_first_monday_are_skipped() {
        // Start falls mid-week: the partial week before the first aligned
        // Monday gets no slots even at daily cadence.
        let dates = compute_slot_dates(7, 1, date(2024, 1, 1));
        assert_eq!(dates.first(), Some(&date(2024, 1, 8)));
    }

    #[test]
    fn test_weekly_cadence_lands_on_mondays() {
        let dates = compute_slot_dates(1, 2, date(2024, 4, 3));
        assert!(!dates.is_empty());
        for slot in &dates {
            assert_eq!(slot.weekday(), chrono::Weekday::Mon);
        }
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(7));
        }
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let a = compute_slot_dates(3, 2, date(2024, 8, 14));
        let b = compute_slot_dates(3, 2, date(2024, 8, 14));
        assert_eq!(a, b);
    }

    #[test]
    fn test_partial_final_week() {
        // 2024-01-06 is a Saturday: end = 2024-02-06 (Tuesday) falls
        // between the final week's offsets {0, 3}, so that week yields
        // only the Monday slot.
        let dates = compute_slot_dates(2, 1, date(2024, 1, 6));
        assert_eq!(dates.last(), Some(&date(2024, 2, 5)));
        let in_final_week = dates.iter().filter(|d| **d >= date(2024, 2, 5)).count();
        assert_eq!(in_final_week, 1);
    }

    #[test]
    fn test_no_runway_yields_empty() {
        // Zero months of horizon: end = reference < start.
        let dates = compute_slot_dates(2, 0, date(2024, 1, 1));
        assert!(dates.is_empty());
    }

    #[test]
    fn test_month_end_clamps_to_last_valid_day() {
        // Jan 31 + 1 month clamps to the end of February.
        let dates = compute_slot_dates(7, 1, date(2024, 1, 31));
        assert_eq!(dates.last(), Some(&date(2024, 2, 29)));

        let dates = compute_slot_dates(7, 1, date(2023, 1, 31));
        assert_eq!(dates.last(), Some(&date(2023, 2, 28)));
    }

    #[test]
    fn test_three_per_week_offsets() {
        // n=3 → offsets {0, 2, 4}: Monday, Wednesday, Friday.
        let dates = compute_slot_dates(3, 1, date(2024, 6, 30));
        assert_eq!(dates[0], date(2024, 7, 1));
        assert_eq!(dates[1], date(2024, 7, 3));
        assert_eq!(dates[2], date(2024, 7, 5));
    }
}
