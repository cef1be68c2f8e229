use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FinboardError;
use crate::loans::amortization::MONTHS_PER_YEAR;
use crate::FinboardResult;

/// Deadlines this many days away or fewer (but still in the future) raise an alert.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Where a loan's payoff deadline sits relative to the evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineStatus {
    /// Deadline has passed.
    Overdue,
    /// Deadline is the evaluation date itself.
    DueToday,
    /// Within the alert window: 1..=30 days away.
    Upcoming,
    /// More than 30 days away.
    OnTrack,
}

impl DeadlineStatus {
    /// Only upcoming deadlines alert; overdue and due-today loans are
    /// classified but stay silent.
    pub fn raises_alert(&self) -> bool {
        matches!(self, DeadlineStatus::Upcoming)
    }
}

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Add whole calendar months. Month-end dates clamp (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(start: NaiveDate, months: u32) -> FinboardResult<NaiveDate> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| {
            FinboardError::DateError(format!("{start} + {months} months is out of calendar range"))
        })
}

/// Payoff date for a loan originated on `start`, using calendar-year addition.
///
/// A Feb 29 origination lands on Feb 28 in non-leap years.
pub fn payoff_date_from(start: NaiveDate, term_years: u32) -> FinboardResult<NaiveDate> {
    if term_years == 0 {
        return Err(FinboardError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    let months = term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        FinboardError::DateError(format!("Term of {term_years} years is out of calendar range"))
    })?;
    add_months(start, months)
}

/// Payoff date for a loan originated today.
pub fn payoff_date(term_years: u32) -> FinboardResult<NaiveDate> {
    payoff_date_from(today(), term_years)
}

/// Signed whole days from `today` to `deadline`; negative once it has passed.
pub fn days_until_from(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

pub fn days_until(deadline: NaiveDate) -> i64 {
    days_until_from(deadline, today())
}

pub fn classify_deadline(days_until: i64) -> DeadlineStatus {
    match days_until {
        d if d < 0 => DeadlineStatus::Overdue,
        0 => DeadlineStatus::DueToday,
        d if d <= UPCOMING_WINDOW_DAYS => DeadlineStatus::Upcoming,
        _ => DeadlineStatus::OnTrack,
    }
}

/// Upcoming-deadline alert policy: `0 < days_until <= 30`.
pub fn is_upcoming(days_until: i64) -> bool {
    days_until > 0 && days_until <= UPCOMING_WINDOW_DAYS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineInput {
    pub deadline: NaiveDate,
    /// Evaluation date; defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineAssessment {
    pub deadline: NaiveDate,
    pub as_of: NaiveDate,
    pub days_until: i64,
    pub status: DeadlineStatus,
    pub is_upcoming: bool,
}

pub fn assess_deadline(input: &DeadlineInput) -> DeadlineAssessment {
    let as_of = input.as_of.unwrap_or_else(today);
    let days = days_until_from(input.deadline, as_of);
    DeadlineAssessment {
        deadline: input.deadline,
        as_of,
        days_until: days,
        status: classify_deadline(days),
        is_upcoming: is_upcoming(days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_payoff_date_calendar_years() {
        assert_eq!(payoff_date_from(date(2024, 7, 26), 10).unwrap(), date(2034, 7, 26));
    }

    #[test]
    fn test_payoff_date_from_leap_day_clamps_to_feb_28() {
        assert_eq!(payoff_date_from(date(2024, 2, 29), 1).unwrap(), date(2025, 2, 28));
        // Four years on, the leap day exists again
        assert_eq!(payoff_date_from(date(2024, 2, 29), 4).unwrap(), date(2028, 2, 29));
    }

    #[test]
    fn test_payoff_date_rejects_zero_term() {
        assert!(matches!(
            payoff_date_from(date(2024, 1, 1), 0),
            Err(FinboardError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_payoff_date_out_of_range() {
        assert!(matches!(
            payoff_date_from(date(2024, 1, 1), 300_000),
            Err(FinboardError::DateError(_))
        ));
    }

    #[test]
    fn test_days_until_signed() {
        let today = date(2026, 10, 19);
        assert_eq!(days_until_from(date(2026, 11, 18), today), 30);
        assert_eq!(days_until_from(date(2026, 10, 19), today), 0);
        assert_eq!(days_until_from(date(2026, 10, 12), today), -7);
    }

    #[test]
    fn test_days_until_spans_leap_day() {
        assert_eq!(days_until_from(date(2028, 3, 1), date(2028, 2, 28)), 2);
    }

    #[test]
    fn test_alert_window_boundaries() {
        let today = date(2026, 10, 19);
        let at = |days: i64| days_until_from(today + Duration::days(days), today);

        assert!(is_upcoming(at(30)));
        assert!(is_upcoming(at(1)));
        assert!(!is_upcoming(at(31)));
        assert!(!is_upcoming(at(0)));
        assert!(!is_upcoming(at(-1)));
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify_deadline(-3), DeadlineStatus::Overdue);
        assert_eq!(classify_deadline(0), DeadlineStatus::DueToday);
        assert_eq!(classify_deadline(30), DeadlineStatus::Upcoming);
        assert_eq!(classify_deadline(31), DeadlineStatus::OnTrack);
    }

    #[test]
    fn test_overdue_and_due_today_do_not_alert() {
        assert!(!DeadlineStatus::Overdue.raises_alert());
        assert!(!DeadlineStatus::DueToday.raises_alert());
        assert!(!DeadlineStatus::OnTrack.raises_alert());
        assert!(DeadlineStatus::Upcoming.raises_alert());
    }

    #[test]
    fn test_assess_deadline_with_explicit_date() {
        let assessment = assess_deadline(&DeadlineInput {
            deadline: date(2026, 11, 1),
            as_of: Some(date(2026, 10, 19)),
        });
        assert_eq!(assessment.days_until, 13);
        assert_eq!(assessment.status, DeadlineStatus::Upcoming);
        assert!(assessment.is_upcoming);
    }
}
