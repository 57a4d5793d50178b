use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use serde::Serialize;

const RECENT_WEEK_COUNT: usize = 8;
const RECENT_MONTH_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub display: String,
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// Club weeks run Thursday 00:00 through the following Wednesday.
pub fn week_range(date: NaiveDate) -> DateWindow {
    let weekday = date.weekday().num_days_from_sunday();
    let back = if weekday >= 4 { weekday - 4 } else { weekday + 3 };
    let start = date - Duration::days(back as i64);
    let end = start + Duration::days(6);
    DateWindow {
        start,
        end,
        display: format!("{} - {}", start.format("%b %-d"), end.format("%b %-d")),
    }
}

pub fn month_range(year: i32, month: u32) -> Option<DateWindow> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(DateWindow {
        start,
        end,
        display: start.format("%B %Y").to_string(),
    })
}

pub fn recent_weeks(today: NaiveDate) -> Vec<DateWindow> {
    (0..RECENT_WEEK_COUNT)
        .map(|i| week_range(today - Duration::weeks(i as i64)))
        .collect()
}

pub fn recent_months(today: NaiveDate) -> Vec<DateWindow> {
    (0..RECENT_MONTH_COUNT)
        .filter_map(|i| {
            let month = today.checked_sub_months(Months::new(i as u32))?;
            month_range(month.year(), month.month())
        })
        .collect()
}

// Accepts DD/MM/YY (assumed 20YY) and DD/MM/YYYY, with or without zero padding.
pub fn canonical_date(raw: &str) -> Option<String> {
    let mut parts = raw.trim().split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let year = if year < 100 { 2000 + year } else { year };
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
    Some(date.format("%Y-%m-%d").to_string())
}
