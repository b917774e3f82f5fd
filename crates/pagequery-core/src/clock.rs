use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::error::Result;
use crate::page_id::PageId;

const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

pub trait TimeSource: Send + Sync {
    /// Last modification of the page, `None` when the page has no stored revision.
    fn modification_time(&self, id: &PageId) -> Result<Option<DateTime<Utc>>>;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn resolve_date(&self, expression: &str) -> Option<DateTime<Utc>> {
        resolve_date_expression(expression, self.now())
    }
}

/// Resolves a free-form date such as `2024-05-01`, `yesterday` or
/// `3 days ago` against `now`. Returns `None` for anything unrecognised.
#[must_use]
pub fn resolve_date_expression(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(seconds) = text.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    let lower = text.to_lowercase();
    match lower.as_str() {
        "now" => Some(now),
        "today" => start_of_day(now),
        "yesterday" => start_of_day(now.checked_sub_signed(TimeDelta::try_days(1)?)?),
        "tomorrow" => start_of_day(now.checked_add_signed(TimeDelta::try_days(1)?)?),
        _ => resolve_relative(&lower, now),
    }
}

fn start_of_day(value: DateTime<Utc>) -> Option<DateTime<Utc>> {
    value
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

fn resolve_relative(lower: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let tokens = lower.split_whitespace().collect::<Vec<_>>();
    let (amount, unit, ago) = match tokens.as_slice() {
        [amount, unit] => (*amount, *unit, false),
        [amount, unit, "ago"] => (*amount, *unit, true),
        _ => return None,
    };
    if ago && amount.starts_with(['+', '-']) {
        return None;
    }
    let mut amount = amount.parse::<i64>().ok()?;
    if ago {
        amount = amount.checked_neg()?;
    }

    let unit = unit.strip_suffix('s').unwrap_or(unit);
    let delta = match unit {
        "second" | "sec" => TimeDelta::try_seconds(amount),
        "minute" | "min" => TimeDelta::try_minutes(amount),
        "hour" => TimeDelta::try_hours(amount),
        "day" => TimeDelta::try_days(amount),
        "week" => TimeDelta::try_weeks(amount),
        "month" => return shift_months(now, amount),
        "year" => return shift_months(now, amount.checked_mul(12)?),
        _ => None,
    }?;
    now.checked_add_signed(delta)
}

fn shift_months(now: DateTime<Utc>, amount: i64) -> Option<DateTime<Utc>> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount < 0 {
        now.checked_sub_months(months)
    } else {
        now.checked_add_months(months)
    }
}
