//! Identifier normalization and fuzzy-ish matching rules.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

/// Strip a leading institutional prefix (case-insensitive) and surrounding
/// whitespace from a student identifier.
#[must_use]
pub fn normalize_student_id<'a>(raw: &'a str, prefix: &str) -> &'a str {
    let raw = raw.trim();
    match raw.get(..prefix.len()) {
        Some(head) if !prefix.is_empty() && head.eq_ignore_ascii_case(prefix) => {
            raw[prefix.len()..].trim()
        }
        _ => raw,
    }
}

/// Leading run of ASCII uppercase letters in a course code (`"CS4001"` → `"CS"`).
#[must_use]
pub fn department_tag(course_code: &str) -> &str {
    let end = course_code
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(course_code.len());
    &course_code[..end]
}

/// First decimal digit in a course code, or 0 when there is none.
#[must_use]
pub fn course_level(course_code: &str) -> u32 {
    course_code
        .chars()
        .find_map(|c| c.to_digit(10))
        .unwrap_or(0)
}

/// Whether an interest tag names the department (case-insensitive substring).
/// An empty department matches nothing.
#[must_use]
pub fn interest_covers_department(interest: &str, department: &str) -> bool {
    !department.is_empty() && interest.to_lowercase().contains(&department.to_lowercase())
}

/// Mutual case-insensitive containment between a project topic and an
/// interest tag. Blank inputs never match.
#[must_use]
pub fn topic_matches(topic: &str, interest: &str) -> bool {
    let topic = topic.trim().to_lowercase();
    let interest = interest.trim().to_lowercase();
    if topic.is_empty() || interest.is_empty() {
        return false;
    }
    topic.contains(&interest) || interest.contains(&topic)
}

/// How to read an all-numeric `a/b/YYYY` date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    /// US exports: `3/20/2024`.
    #[default]
    MonthFirst,
    /// UK exports: `20/03/2024`.
    DayFirst,
}

const YEAR_FIRST: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const MONTH_FIRST: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DAY_FIRST: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
];

const YEAR_FIRST_DATES: &[&str] = &["%Y/%m/%d", "%Y-%m-%d"];

impl DateOrder {
    const fn datetime_formats(self) -> &'static [&'static str] {
        match self {
            Self::MonthFirst => MONTH_FIRST,
            Self::DayFirst => DAY_FIRST,
        }
    }

    const fn date_format(self) -> &'static str {
        match self {
            Self::MonthFirst => "%m/%d/%Y",
            Self::DayFirst => "%d/%m/%Y",
        }
    }
}

/// Pick one date order for a whole column: day-first as soon as any stamp
/// only makes sense that way, month-first otherwise.
#[must_use]
pub fn detect_date_order<'a>(stamps: impl IntoIterator<Item = &'a str>) -> DateOrder {
    let day_first = stamps.into_iter().any(|raw| {
        parse_timestamp(raw, DateOrder::MonthFirst).is_none()
            && parse_timestamp(raw, DateOrder::DayFirst).is_some()
    });
    if day_first {
        DateOrder::DayFirst
    } else {
        DateOrder::MonthFirst
    }
}

/// Parse a form submission timestamp. Returns `None` when no known format fits.
///
/// Zoned values (RFC 3339 offsets, `GMT`, `GMT+1`, `UTC-05:00`) are converted
/// to UTC before the zone is dropped; a bare zone abbreviation counts as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str, order: DateOrder) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    let (bare, offset) = split_zone(raw);
    let local = YEAR_FIRST
        .iter()
        .chain(order.datetime_formats())
        .find_map(|fmt| NaiveDateTime::parse_from_str(bare, fmt).ok())
        .or_else(|| {
            YEAR_FIRST_DATES
                .iter()
                .chain(std::iter::once(&order.date_format()))
                .find_map(|fmt| {
                    NaiveDate::parse_from_str(bare, fmt)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
        })?;
    local.checked_sub_signed(TimeDelta::minutes(offset))
}

/// Split a trailing zone token (`GMT`, `GMT+1`, `UTC-05:30`) off a stamp,
/// returning the rest and the zone's offset east of UTC in minutes.
fn split_zone(raw: &str) -> (&str, i64) {
    let Some((head, zone)) = raw.rsplit_once(' ') else {
        return (raw, 0);
    };
    if zone.eq_ignore_ascii_case("am") || zone.eq_ignore_ascii_case("pm") {
        return (raw, 0);
    }
    let letters = zone
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(zone.len());
    if letters == 0 {
        return (raw, 0);
    }
    let rest = &zone[letters..];
    if rest.is_empty() {
        return (head.trim_end(), 0);
    }
    offset_minutes(rest).map_or((raw, 0), |minutes| (head.trim_end(), minutes))
}

fn offset_minutes(zone: &str) -> Option<i64> {
    let (sign, body) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    let (hours, minutes) = body.split_once(':').unwrap_or((body, "0"));
    if hours.is_empty() || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    (hours <= 14 && minutes < 60).then_some(sign * (hours * 60 + minutes))
}
