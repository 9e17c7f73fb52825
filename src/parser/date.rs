//! Timestamp normalization for historical Usenet dates.
//!
//! Dates in old archives come in many shapes. The forms recognized here:
//!
//! - RFC 822 style: `[Dow,] D Mon YY[YY] HH:MM[:SS] [zone]`
//! - hyphenated: `[Dow,] D-Mon-YY HH:MM[:SS] [zone]`
//! - ctime / A News: `[Dow] Mon D HH:MM[:SS] [zone] YYYY`
//! - numeric: `M/D/YY[YY] [HH:MM[:SS]]`, `YYYY-MM-DD[ T]HH:MM[:SS][zone]`
//!
//! Zones may be numeric (`-0800`, `+01:00`), `UT`/`UTC`/`GMT`/`Z`, a name
//! from the [`TimezoneTable`], a name with a glued offset (`GMT+1`), or a
//! parenthesized comment. An unknown zone name contributes no offset. Dates without a usable zone are read as UTC.
//! Two-digit years `70..=99` are 19xx, `00..=69` are 20xx.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::tables::TimezoneTable;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Converts raw date header values into Unix timestamps.
#[derive(Debug, Clone, Default)]
pub struct TimestampNormalizer {
    zones: Arc<TimezoneTable>,
}

impl TimestampNormalizer {
    pub fn new(zones: Arc<TimezoneTable>) -> Self {
        Self { zones }
    }

    /// Seconds since the epoch, or `0` when the date cannot be parsed.
    pub fn normalize(&self, raw: &str) -> i64 {
        match self.parse(raw) {
            Some(dt) => dt.timestamp(),
            None => {
                warn!(date = raw, "Couldn't parse timestamp");
                0
            }
        }
    }

    /// Best-effort parse of a raw date string.
    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let cleaned = clean_date(raw);
        if cleaned.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Some(dt) = self.parse_tokens(&cleaned) {
            return Some(dt);
        }

        debug!(date = %cleaned, "Falling back to mail-parser date grammar");
        mail_parser_date(&cleaned)
    }

    fn parse_tokens(&self, input: &str) -> Option<DateTime<Utc>> {
        let (main, comments) = split_comments(input);
        let mut fields = DateFields::default();

        for token in main
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            fields.push_token(token, &self.zones)?;
        }

        if fields.offset.is_none() {
            fields.offset = comments
                .iter()
                .find_map(|c| zone_offset(c.trim(), &self.zones));
        }

        fields.finish()
    }
}

/// Trim and collapse `--` runs, a common archival typo (`17-Jun--86`).
fn clean_date(raw: &str) -> String {
    let mut cleaned = raw.trim().to_string();
    while cleaned.contains("--") {
        cleaned = cleaned.replace("--", "-");
    }
    cleaned
}

/// Separate `(comment)` groups from the rest of the string.
fn split_comments(input: &str) -> (String, Vec<String>) {
    let mut main = String::with_capacity(input.len());
    let mut comments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                main.push(' ');
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    comments.push(std::mem::take(&mut current));
                }
            }
            _ if depth > 0 => current.push(c),
            _ => main.push(c),
        }
    }
    if !current.is_empty() {
        comments.push(current);
    }
    (main, comments)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Default)]
struct DateFields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    time: Option<(u32, u32, u32)>,
    meridiem: Option<Meridiem>,
    offset: Option<i32>,
}

impl DateFields {
    /// Classify one token. `None` means the string is not a date we know.
    fn push_token(&mut self, token: &str, zones: &TimezoneTable) -> Option<()> {
        let token = token.trim_end_matches('.');
        if token.is_empty() || token == "-" {
            return Some(());
        }
        let lower = token.to_ascii_lowercase();
        let first = token.chars().next()?;

        if first.is_ascii_alphabetic() {
            if token.chars().all(|c| c.is_ascii_alphabetic()) {
                return self.push_word(token, &lower, zones);
            }
            return self.push_adjusted_zone(token, zones);
        }

        if first == '+' || first == '-' {
            self.offset = Some(numeric_offset(token)?);
            return Some(());
        }

        if !first.is_ascii_digit() {
            return None;
        }

        if let Some((date, time)) = token.split_once(['T', 't']) {
            if date.contains('-') {
                self.push_hyphen_date(date, zones)?;
                return self.push_time(time);
            }
        }

        if token.contains(':') {
            return self.push_time(token);
        }
        if token.contains('/') {
            return self.push_slash_date(token);
        }
        if token.contains('-') {
            return self.push_hyphen_date(token, zones);
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return self.push_number(token);
        }
        if let Some(meridiem) = strip_meridiem(&lower) {
            // "3pm"
            self.meridiem = Some(meridiem.1);
            let hour: u32 = meridiem.0.parse().ok()?;
            self.time = Some((hour, 0, 0));
            return Some(());
        }
        None
    }

    fn push_word(&mut self, token: &str, lower: &str, zones: &TimezoneTable) -> Option<()> {
        if lower == "am" {
            self.meridiem = Some(Meridiem::Am);
            return Some(());
        }
        if lower == "pm" {
            self.meridiem = Some(Meridiem::Pm);
            return Some(());
        }
        if let Some(month) = month_number(lower) {
            if self.month.is_some() {
                return None;
            }
            self.month = Some(month);
            return Some(());
        }
        if is_weekday(lower) {
            return Some(());
        }
        if let Some(offset) = zone_offset(token, zones) {
            if self.offset.is_none() {
                self.offset = Some(offset);
            }
            return Some(());
        }
        if token.len() <= 5 {
            debug!(zone = token, "Unresolved timezone abbreviation");
            return Some(());
        }
        None
    }

    /// A zone name with a glued offset: `GMT+1`, `UTC-0500`, `GMT+01:00`.
    /// The offset is added to the zone's own offset.
    fn push_adjusted_zone(&mut self, token: &str, zones: &TimezoneTable) -> Option<()> {
        let pos = token.find(['+', '-'])?;
        let (name, adjust) = token.split_at(pos);
        if !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let lower = name.to_ascii_lowercase();
        if month_number(&lower).is_some() || is_weekday(&lower) {
            return None;
        }

        let base = match zone_offset(name, zones) {
            Some(base) => base,
            None if name.len() <= 5 => {
                debug!(zone = name, "Unresolved timezone abbreviation");
                0
            }
            None => return None,
        };
        let offset = base + numeric_offset(adjust)?;
        if self.offset.is_none() {
            self.offset = Some(offset);
        }
        Some(())
    }

    fn push_number(&mut self, digits: &str) -> Option<()> {
        let value: u32 = digits.parse().ok()?;
        match digits.len() {
            4 if self.year.is_none() => {
                self.year = Some(value as i32);
            }
            1 | 2 if self.day.is_none() => {
                self.day = Some(value);
            }
            1 | 2 if self.year.is_none() => {
                self.year = Some(expand_year(value));
            }
            _ => return None,
        }
        Some(())
    }

    fn push_time(&mut self, token: &str) -> Option<()> {
        let lower = token.to_ascii_lowercase();
        let (token, meridiem) = match strip_meridiem(&lower) {
            Some((rest, meridiem)) => (rest, Some(meridiem)),
            None => (lower.as_str(), None),
        };

        // Offsets glued to the time: "10:00:00+0100", "10:00:00z"
        let (clock, offset) = if let Some(clock) = token.strip_suffix('z') {
            (clock, Some(0))
        } else if let Some(pos) = token.find(['+', '-']) {
            (&token[..pos], Some(numeric_offset(&token[pos..])?))
        } else {
            (token, None)
        };

        let mut parts = clock.split(':');
        let hour: u32 = parts.next()?.parse().ok()?;
        let minute: u32 = parts.next()?.parse().ok()?;
        let second: u32 = match parts.next() {
            Some(s) => s.split('.').next()?.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() || self.time.is_some() {
            return None;
        }

        self.time = Some((hour, minute, second));
        if meridiem.is_some() {
            self.meridiem = meridiem;
        }
        if offset.is_some() {
            self.offset = offset;
        }
        Some(())
    }

    fn push_slash_date(&mut self, token: &str) -> Option<()> {
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() != 3 || self.day.is_some() || self.month.is_some() {
            return None;
        }
        let nums: Vec<u32> = parts
            .iter()
            .map(|p| p.parse().ok())
            .collect::<Option<Vec<u32>>>()?;

        let (year, month, day) = if parts[0].len() == 4 {
            (nums[0] as i32, nums[1], nums[2])
        } else if nums[0] > 12 {
            (year_from(parts[2], nums[2])?, nums[1], nums[0])
        } else {
            (year_from(parts[2], nums[2])?, nums[0], nums[1])
        };

        self.year = Some(year);
        self.month = Some(month);
        self.day = Some(day);
        Some(())
    }

    fn push_hyphen_date(&mut self, token: &str, zones: &TimezoneTable) -> Option<()> {
        let parts: Vec<&str> = token.split('-').filter(|p| !p.is_empty()).collect();
        let all_numeric = parts
            .iter()
            .all(|p| p.chars().all(|c| c.is_ascii_digit()));

        if all_numeric && parts.len() == 3 && parts[0].len() == 4 {
            self.year = Some(parts[0].parse().ok()?);
            self.month = Some(parts[1].parse().ok()?);
            self.day = Some(parts[2].parse().ok()?);
            return Some(());
        }

        for part in parts {
            self.push_token(part, zones)?;
        }
        Some(())
    }

    fn finish(self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)?;

        let (mut hour, minute, second) = self.time.unwrap_or((0, 0, 0));
        match self.meridiem {
            Some(Meridiem::Pm) if hour < 12 => hour += 12,
            Some(Meridiem::Am) if hour == 12 => hour = 0,
            _ => {}
        }
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;

        let offset = FixedOffset::east_opt(self.offset.unwrap_or(0))?;
        offset
            .from_local_datetime(&NaiveDateTime::new(date, time))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// `70..=99` → 19xx, `00..=69` → 20xx.
fn expand_year(two_digits: u32) -> i32 {
    if two_digits < 70 {
        2000 + two_digits as i32
    } else {
        1900 + two_digits as i32
    }
}

fn year_from(digits: &str, value: u32) -> Option<i32> {
    match digits.len() {
        4 => Some(value as i32),
        1 | 2 => Some(expand_year(value)),
        _ => None,
    }
}

fn month_number(lower: &str) -> Option<u32> {
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(lower))
        .map(|i| i as u32 + 1)
}

fn is_weekday(lower: &str) -> bool {
    lower.len() >= 3 && WEEKDAYS.iter().any(|name| name.starts_with(lower))
}

fn strip_meridiem(lower: &str) -> Option<(&str, Meridiem)> {
    if let Some(rest) = lower.strip_suffix("am") {
        Some((rest, Meridiem::Am))
    } else {
        lower.strip_suffix("pm").map(|rest| (rest, Meridiem::Pm))
    }
}

/// Offset in seconds for a named zone: the table first, then the universal names.
fn zone_offset(name: &str, zones: &TimezoneTable) -> Option<i32> {
    if name.is_empty() {
        return None;
    }
    if let Some(offset) = zones.offset(name) {
        return Some(offset);
    }
    match name.to_ascii_uppercase().as_str() {
        "Z" | "UT" | "UTC" | "GMT" => Some(0),
        _ => None,
    }
}

/// Parse `+HHMM`, `-HH`, `+H`, `-HMM` or `+HH:MM` into seconds east of UTC.
fn numeric_offset(token: &str) -> Option<i32> {
    let (sign, rest) = match token.as_bytes().first()? {
        b'+' => (1, &token[1..]),
        b'-' => (-1, &token[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        1 | 2 => (digits.parse().ok()?, 0),
        3 => (digits[..1].parse().ok()?, digits[1..].parse().ok()?),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Attempt to parse a date using `mail-parser`'s RFC 5322 date grammar.
///
/// The result is only kept when the clock time and any non-zero offset it
/// reports can be found in the input.
fn mail_parser_date(input: &str) -> Option<DateTime<Utc>> {
    use mail_parser::MessageParser;

    // Wrap input in a minimal message so mail-parser can parse it
    let fake_msg = format!("Date: {input}\n\n");
    let parsed = MessageParser::default().parse(fake_msg.as_bytes())?;
    let date = parsed.date()?;
    if !fallback_matches_input(input, date) {
        debug!(date = input, "Discarding mail-parser date that disagrees with the input");
        return None;
    }
    DateTime::parse_from_rfc3339(&date.to_rfc3339())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn fallback_matches_input(input: &str, date: &mail_parser::DateTime) -> bool {
    let clock = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .find_map(leading_clock);
    let clock_matches = match clock {
        Some((hour, minute)) => hour == u32::from(date.hour) && minute == u32::from(date.minute),
        None => date.hour == 0 && date.minute == 0,
    };
    if !clock_matches {
        return false;
    }

    let sign = if date.tz_before_gmt { -1 } else { 1 };
    let applied = sign * (i32::from(date.tz_hour) * 3600 + i32::from(date.tz_minute) * 60);
    applied == 0 || offsets_in(input).any(|offset| offset == applied)
}

/// `HH:MM` at the start of a token such as `10:00:00` or `9:30pm`.
fn leading_clock(token: &str) -> Option<(u32, u32)> {
    let (hour, rest) = token.split_once(':')?;
    let minute: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if hour.is_empty() || !hour.chars().all(|c| c.is_ascii_digit()) || minute.is_empty() {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

/// Every numeric offset written anywhere in the input.
fn offsets_in(input: &str) -> impl Iterator<Item = i32> + '_ {
    input.match_indices(['+', '-']).filter_map(move |(pos, _)| {
        let rest = &input[pos..];
        let end = rest[1..]
            .find(|c: char| !(c.is_ascii_digit() || c == ':'))
            .map_or(rest.len(), |i| i + 1);
        numeric_offset(&rest[..end])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TimestampNormalizer {
        TimestampNormalizer::new(Arc::new(TimezoneTable::from_entries([
            ("PST", -28800),
            ("PDT", -25200),
            ("EST", -18000),
            ("EDT", -14400),
            ("CET", 3600),
        ])))
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap().timestamp()
    }

    #[test]
    fn test_pst_from_table() {
        let ts = normalizer().normalize("1 Jan 90 12:00:00 PST");
        assert_eq!(ts, 631_224_000);
        assert_eq!(ts, utc(1990, 1, 1, 20, 0, 0));
    }

    #[test]
    fn test_unparsable_is_zero() {
        let n = normalizer();
        assert_eq!(n.normalize("garbage"), 0);
        assert_eq!(n.normalize(""), 0);
        assert_eq!(n.normalize("   "), 0);
    }

    #[test]
    fn test_rfc822_with_numeric_offset() {
        assert_eq!(
            normalizer().normalize("Thu, 04 Jan 2024 10:00:00 +0000"),
            utc(2024, 1, 4, 10, 0, 0)
        );
        assert_eq!(
            normalizer().normalize("Mon, 14 Apr 86 09:30:00 -0500"),
            utc(1986, 4, 14, 14, 30, 0)
        );
    }

    #[test]
    fn test_ctime_format() {
        assert_eq!(
            normalizer().normalize("Fri Mar  4 10:00:00 1983"),
            utc(1983, 3, 4, 10, 0, 0)
        );
        assert_eq!(
            normalizer().normalize("Thu Dec 18 13:05:04 EST 1986"),
            utc(1986, 12, 18, 18, 5, 4)
        );
    }

    #[test]
    fn test_hyphenated_with_weekday() {
        assert_eq!(
            normalizer().normalize("Mon, 10-Mar-87 13:21:43 EST"),
            utc(1987, 3, 10, 18, 21, 43)
        );
        assert_eq!(
            normalizer().normalize("Thursday, 19-Feb-87 08:39:00 GMT"),
            utc(1987, 2, 19, 8, 39, 0)
        );
    }

    #[test]
    fn test_double_dash_typo() {
        assert_eq!(
            normalizer().normalize("17-Jun--86 10:00 EDT"),
            utc(1986, 6, 17, 14, 0, 0)
        );
    }

    #[test]
    fn test_slash_dates() {
        assert_eq!(normalizer().normalize("12/18/86"), utc(1986, 12, 18, 0, 0, 0));
        assert_eq!(
            normalizer().normalize("25/12/1990 08:00"),
            utc(1990, 12, 25, 8, 0, 0)
        );
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(
            normalizer().normalize("1986-12-18 13:05:04"),
            utc(1986, 12, 18, 13, 5, 4)
        );
        assert_eq!(
            normalizer().normalize("2024-01-04T10:00:00Z"),
            utc(2024, 1, 4, 10, 0, 0)
        );
        assert_eq!(
            normalizer().normalize("1995-06-01T12:00:00+0200"),
            utc(1995, 6, 1, 10, 0, 0)
        );
    }

    #[test]
    fn test_parenthesized_zone_comment() {
        assert_eq!(
            normalizer().normalize("Sat, 5 Jan 85 12:00:00 (PST)"),
            utc(1985, 1, 5, 20, 0, 0)
        );
        // Numeric offset wins over the comment
        assert_eq!(
            normalizer().normalize("Sat, 5 Jan 85 12:00:00 -0700 (PST)"),
            utc(1985, 1, 5, 19, 0, 0)
        );
    }

    #[test]
    fn test_unknown_zone_contributes_no_offset() {
        assert_eq!(
            normalizer().normalize("1 Jan 90 12:00:00 XYZ"),
            utc(1990, 1, 1, 12, 0, 0)
        );
        let empty = TimestampNormalizer::new(Arc::new(TimezoneTable::empty()));
        assert_eq!(
            empty.normalize("1 Jan 90 12:00:00 PST"),
            utc(1990, 1, 1, 12, 0, 0)
        );
    }

    #[test]
    fn test_meridiem() {
        assert_eq!(
            normalizer().normalize("Sat, 5 Jan 85 3:04 pm PST"),
            utc(1985, 1, 5, 23, 4, 0)
        );
        assert_eq!(
            normalizer().normalize("5 Jan 85 12:30am"),
            utc(1985, 1, 5, 0, 30, 0)
        );
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(expand_year(81), 1981);
        assert_eq!(expand_year(99), 1999);
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(69), 2069);
    }

    #[test]
    fn test_numeric_offset() {
        assert_eq!(numeric_offset("+0100"), Some(3600));
        assert_eq!(numeric_offset("-0800"), Some(-28800));
        assert_eq!(numeric_offset("+05:30"), Some(19800));
        assert_eq!(numeric_offset("-5"), Some(-18000));
        assert_eq!(numeric_offset("+2500"), None);
        assert_eq!(numeric_offset("0100"), None);
    }

    #[test]
    fn test_zone_with_glued_offset() {
        let n = normalizer();
        assert_eq!(
            n.normalize("3 Jan 1990 10:00:00 GMT+1"),
            utc(1990, 1, 3, 9, 0, 0)
        );
        assert_eq!(
            n.normalize("3 Jan 1990 10:00:00 UTC-0500"),
            utc(1990, 1, 3, 15, 0, 0)
        );
        assert_eq!(
            n.normalize("Wed, 3 Jan 1990 10:00:00 GMT+0100"),
            utc(1990, 1, 3, 9, 0, 0)
        );
        assert_eq!(
            n.normalize("3 Jan 1990 10:00:00 GMT+01:00"),
            utc(1990, 1, 3, 9, 0, 0)
        );
        // Unknown short name: only the glued offset applies
        assert_eq!(
            n.normalize("3 Jan 1990 10:00:00 MET-1"),
            utc(1990, 1, 3, 11, 0, 0)
        );
        // Table zone plus adjustment
        assert_eq!(
            n.normalize("3 Jan 1990 10:00:00 CET+1"),
            utc(1990, 1, 3, 8, 0, 0)
        );
    }

    #[test]
    fn test_month_with_glued_number_is_not_a_zone() {
        let mut fields = DateFields::default();
        assert!(fields
            .push_token("Jan-05", &TimezoneTable::empty())
            .is_none());
        assert_eq!(fields.offset, None);
    }

    fn mp_date(hour: u8, minute: u8, tz_before_gmt: bool, tz_hour: u8) -> mail_parser::DateTime {
        mail_parser::DateTime {
            year: 1990,
            month: 1,
            day: 3,
            hour,
            minute,
            second: 0,
            tz_before_gmt,
            tz_hour,
            tz_minute: 0,
        }
    }

    #[test]
    fn test_fallback_rejects_lost_clock() {
        let input = "3 Jan 1990 10:00:00 GMT+1";
        assert!(!fallback_matches_input(input, &mp_date(0, 0, false, 0)));
    }

    #[test]
    fn test_fallback_rejects_invented_offset() {
        let input = "3 Jan 1990 10:00:00 MET-1";
        assert!(!fallback_matches_input(input, &mp_date(10, 0, true, 10)));
        assert!(fallback_matches_input(input, &mp_date(10, 0, true, 1)));
    }

    #[test]
    fn test_fallback_accepts_agreeing_fields() {
        assert!(fallback_matches_input(
            "Wed, 3 Jan 1990 10:00:00 +0100",
            &mp_date(10, 0, false, 1)
        ));
        assert!(fallback_matches_input("3 Jan 1990", &mp_date(0, 0, false, 0)));
        assert!(!fallback_matches_input("3 Jan 1990", &mp_date(10, 0, false, 0)));
    }

    #[test]
    fn test_offsets_in() {
        let found: Vec<i32> = offsets_in("10:00:00 GMT+1 (-0500)").collect();
        assert_eq!(found, vec![3600, -18000]);
        assert_eq!(leading_clock("9:30pm"), Some((9, 30)));
        assert_eq!(leading_clock("1990-01-03T10:00"), None);
    }

    #[test]
    fn test_invalid_calendar_date_is_zero() {
        assert_eq!(normalizer().normalize("31 Feb 90 12:00:00 GMT"), 0);
    }
}
