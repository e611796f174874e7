use chrono::{Local, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Years above this are read as Buddhist era (พ.ศ.) and shifted by 543.
pub const BUDDHIST_ERA_THRESHOLD: i64 = 2400;
pub const BUDDHIST_ERA_OFFSET: i64 = 543;

/// Records older than this many days count as overdue on the dashboard.
pub const OVERDUE_AFTER_DAYS: u32 = 30;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[schemars(description = "Paid within the last 15 days")]
    Low,
    #[schemars(description = "Pending for 16 to 30 days")]
    Medium,
    #[schemars(description = "Pending for 31 to 60 days")]
    High,
    #[schemars(description = "Pending for more than 60 days")]
    Critical,
}

impl Urgency {
    pub fn from_aging(aging_days: u32) -> Self {
        if aging_days > 60 {
            Urgency::Critical
        } else if aging_days > 30 {
            Urgency::High
        } else if aging_days > 15 {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current calendar day in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a day-first payment date such as `01/01/2568`, `5-3-25` or
/// `15.08.2024`.
///
/// Returns `None` for anything that does not resolve to a real calendar day.
pub fn parse_payment_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    let parts: Vec<&str> = text.split(['/', '.', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    let day = parse_leading_int(parts[0])?;
    let month = parse_leading_int(parts[1])?;
    let year = normalize_year(parse_leading_int(parts[2])?);

    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day).ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Maps Buddhist-era and two-digit years onto the Gregorian calendar.
pub fn normalize_year(year: i64) -> i64 {
    let year = if year > BUDDHIST_ERA_THRESHOLD {
        year - BUDDHIST_ERA_OFFSET
    } else {
        year
    };

    if year < 100 {
        year + 2000
    } else {
        year
    }
}

/// Signed whole days from `date` to `today`; negative for future dates.
pub fn days_between(date: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(date).num_days()
}

/// Days elapsed since the payment date, clamped at zero.
///
/// Empty or malformed dates count as zero aging.
pub fn aging_days(payment_date: &str, today: NaiveDate) -> u32 {
    match parse_payment_date(payment_date) {
        Some(date) => {
            let days = days_between(date, today);
            u32::try_from(days.max(0)).unwrap_or(u32::MAX)
        }
        None => 0,
    }
}

/// Reads the leading decimal integer of `s`, ignoring leading whitespace and
/// any trailing characters. `None` when no digit follows the optional sign.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
