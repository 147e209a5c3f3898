use chrono::{Months, NaiveDate};

/// Year part of an ISO `YYYY-MM-DD` date, if present.
pub fn year_only(date: &str) -> Option<&str> {
    date.get(..4)
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
}

/// The same calendar day one month earlier, clamped to the month's end.
///
/// Used as the `primary_release_date.gte` cutoff for "latest" rows.
pub fn one_month_ago(today: NaiveDate) -> NaiveDate {
    today.checked_sub_months(Months::new(1)).unwrap_or(today)
}
