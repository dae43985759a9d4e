use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::models::Frequency;

/// Computes the next due date for a recurrence rule, starting from `reference`.
///
/// Arithmetic is on calendar fields only; there is no time of day involved.
///
/// - **Daily**: the following day.
/// - **Weekdays**: the following day, skipping the weekend (Friday and
///   Saturday both land on Monday).
/// - **Weekly** / **Biweekly**: 7 / 14 days later.
/// - **Monthly**: the same day-of-month in the following month. When that day
///   does not exist the surplus days overflow into the month after, so
///   January 31st becomes March 2nd (leap year) or March 3rd.
/// - **Once**: `reference` unchanged.
///
/// Dates past the end of chrono's range saturate at `NaiveDate::MAX`.
pub fn compute_next_due(frequency: Frequency, reference: NaiveDate) -> NaiveDate {
    match frequency {
        Frequency::Daily => add_days(reference, 1),
        Frequency::Weekdays => {
            let step = match reference.weekday() {
                Weekday::Fri => 3,
                Weekday::Sat => 2,
                _ => 1,
            };
            add_days(reference, step)
        }
        Frequency::Weekly => add_days(reference, 7),
        Frequency::Biweekly => add_days(reference, 14),
        Frequency::Monthly => same_day_next_month(reference),
        Frequency::Once => reference,
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

// First of next month, then walk forward day-1 days; short months overflow.
fn same_day_next_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day() - 1))))
        .unwrap_or(NaiveDate::MAX)
}
