//! UTCTime and GeneralizedTime content codecs.
//!
//! - UTCTime: `YYMMDDHHMM[SS][Z|±HHMM]`, two-digit years partition at 50
//!   (`Y ≥ 50 → 1900+Y`, else `2000+Y`, the X.509 1950/2050 rule).
//! - GeneralizedTime: `YYYYMMDDHHMMSS[.fff][Z|±HHMM]`.
//!
//! A missing zone designator means local time; [`Date`] keeps that fact
//! explicit instead of guessing a timezone, and [`Date::unix_timestamp`]
//! refuses to convert such values.

use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("time string is too short")]
    TooShort,
    #[error("non-digit where a digit was expected")]
    InvalidDigit,
    #[error("invalid calendar date")]
    InvalidDate,
    #[error("invalid or trailing zone designator")]
    InvalidZone,
}

/// Zone designator of a decoded time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// `Z` suffix.
    Utc,
    /// `±HHMM` suffix; minutes east of UTC (the wall clock reads UTC + offset).
    Offset { minutes: i16 },
    /// No suffix at all.
    Local,
}

/// A wall-clock date-time as written in an ASN.1 time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    zone: Zone,
}

impl Date {
    /// Creates a UTC date, validating the field ranges.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Date> {
        if (1..=12).contains(&month)
            && (1..=31).contains(&day)
            && hour < 24
            && minute < 60
            && second < 60
        {
            Some(Date {
                year,
                month,
                day,
                hour,
                minute,
                second,
                millisecond: 0,
                zone: Zone::Utc,
            })
        } else {
            None
        }
    }

    pub fn with_millisecond(mut self, millisecond: u16) -> Option<Date> {
        if millisecond < 1000 {
            self.millisecond = millisecond;
            Some(self)
        } else {
            None
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Date {
        self.zone = zone;
        self
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Seconds since the UNIX epoch, `None` for local-time values (this
    /// codec owns no timezone database). Milliseconds are dropped.
    pub fn unix_timestamp(&self) -> Option<i64> {
        let offset_minutes = match self.zone {
            Zone::Utc => 0i64,
            Zone::Offset { minutes } => i64::from(minutes),
            Zone::Local => return None,
        };

        // days-from-civil, epoch-shifted so 1970-01-01 is day 0
        let (year, month) = (i64::from(self.year), i64::from(self.month));
        let y = if month <= 2 { year - 1 } else { year };
        let m = if month <= 2 { month + 9 } else { month - 3 };
        let days = 365 * y + y / 4 - y / 100 + y / 400 + (m * 306 + 5) / 10
            + i64::from(self.day)
            - 1
            - 719_468;
        let secs = days * 86_400
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        Some(secs - offset_minutes * 60)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Parses a UTCTime string (`YYMMDDHHMM[SS][Z|±HHMM]`).
pub fn utc_time_to_date(s: &str) -> Result<Date, DateError> {
    let b = s.as_bytes();
    if b.len() < 10 {
        return Err(DateError::TooShort);
    }

    let yy = two_digits(b, 0)?;
    let year = if yy >= 50 {
        1900 + u16::from(yy)
    } else {
        2000 + u16::from(yy)
    };
    let month = two_digits(b, 2)?;
    let day = two_digits(b, 4)?;
    let hour = two_digits(b, 6)?;
    let minute = two_digits(b, 8)?;

    let mut idx = 10;
    let second = if idx + 1 < b.len() && b[idx].is_ascii_digit() {
        idx += 2;
        two_digits(b, idx - 2)?
    } else {
        0
    };

    let zone = parse_zone(b, idx)?;
    Date::new(year, month, day, hour, minute, second)
        .map(|d| d.with_zone(zone))
        .ok_or(DateError::InvalidDate)
}

/// Parses a GeneralizedTime string (`YYYYMMDDHHMMSS[.fff][Z|±HHMM]`).
pub fn generalized_time_to_date(s: &str) -> Result<Date, DateError> {
    let b = s.as_bytes();
    if b.len() < 14 {
        return Err(DateError::TooShort);
    }

    let year = u16::from(two_digits(b, 0)?) * 100 + u16::from(two_digits(b, 2)?);
    let month = two_digits(b, 4)?;
    let day = two_digits(b, 6)?;
    let hour = two_digits(b, 8)?;
    let minute = two_digits(b, 10)?;
    let second = two_digits(b, 12)?;

    let mut idx = 14;
    let mut millisecond = 0u16;
    if idx < b.len() && b[idx] == b'.' {
        idx += 1;
        let start = idx;
        while idx < b.len() && b[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == start {
            return Err(DateError::InvalidDigit);
        }
        // only millisecond precision is carried
        let mut scale = 100u16;
        for &digit in &b[start..(start + 3).min(idx)] {
            millisecond += u16::from(digit - b'0') * scale;
            scale /= 10;
        }
    }

    let zone = parse_zone(b, idx)?;
    let date = Date::new(year, month, day, hour, minute, second).ok_or(DateError::InvalidDate)?;
    Ok(date
        .with_millisecond(millisecond)
        .ok_or(DateError::InvalidDate)?
        .with_zone(zone))
}

/// Formats a date as `YYMMDDHHMMSS` (seconds always present) plus its zone
/// designator. The wall-clock fields are written as-is; offsets are carried
/// in the suffix, not applied to the fields.
pub fn date_to_utc_time(date: &Date) -> String {
    let mut out = format!(
        "{:02}{:02}{:02}{:02}{:02}{:02}",
        date.year % 100,
        date.month,
        date.day,
        date.hour,
        date.minute,
        date.second
    );
    push_zone(&mut out, date.zone);
    out
}

/// Formats a date as `YYYYMMDDHHMMSS[.fff]` plus its zone designator.
pub fn date_to_generalized_time(date: &Date) -> String {
    let mut out = format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}",
        date.year, date.month, date.day, date.hour, date.minute, date.second
    );
    if date.millisecond != 0 {
        out.push_str(&format!(".{:03}", date.millisecond));
    }
    push_zone(&mut out, date.zone);
    out
}

fn push_zone(out: &mut String, zone: Zone) {
    match zone {
        Zone::Utc => out.push('Z'),
        Zone::Offset { minutes } => {
            let sign = if minutes < 0 { '-' } else { '+' };
            let abs = minutes.unsigned_abs();
            out.push_str(&format!("{}{:02}{:02}", sign, abs / 60, abs % 60));
        }
        Zone::Local => {}
    }
}

fn two_digits(b: &[u8], idx: usize) -> Result<u8, DateError> {
    if idx + 1 >= b.len() {
        return Err(DateError::TooShort);
    }
    let (hi, lo) = (b[idx], b[idx + 1]);
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return Err(DateError::InvalidDigit);
    }
    Ok((hi - b'0') * 10 + (lo - b'0'))
}

fn parse_zone(b: &[u8], idx: usize) -> Result<Zone, DateError> {
    if idx == b.len() {
        return Ok(Zone::Local);
    }
    match b[idx] {
        b'Z' if idx + 1 == b.len() => Ok(Zone::Utc),
        sign @ (b'+' | b'-') if idx + 5 == b.len() => {
            let hours = two_digits(b, idx + 1).map_err(|_| DateError::InvalidZone)?;
            let minutes = two_digits(b, idx + 3).map_err(|_| DateError::InvalidZone)?;
            if minutes >= 60 {
                return Err(DateError::InvalidZone);
            }
            let total = i16::from(hours) * 60 + i16::from(minutes);
            Ok(Zone::Offset {
                minutes: if sign == b'-' { -total } else { total },
            })
        }
        _ => Err(DateError::InvalidZone),
    }
}
