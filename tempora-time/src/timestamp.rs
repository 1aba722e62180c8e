use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use tempora_core::{Result, TemporalError};

/// Absolute point in time, normalised to UTC.
pub type Timestamp = DateTime<Utc>;

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%dT%H:%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a timestamp, reading zone-less input as UTC.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    parse_timestamp_with_offset(text, Utc.fix())
}

/// Parses a timestamp, reading zone-less input in `offset`.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS[.f]][±hh[:mm]]` with a space or
/// `T` separator, and a bare date (midnight).
pub fn parse_timestamp_with_offset(text: &str, offset: FixedOffset) -> Result<Timestamp> {
    let raw = text.trim();
    let malformed = || TemporalError::MalformedTimestamp(raw.to_string());
    if raw.is_empty() {
        return Err(malformed());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    // `%#z` does not accept a bare `Z`.
    let zoned = match raw.strip_suffix(&['Z', 'z'][..]) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };
    for format in ZONED_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&zoned, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(malformed)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(malformed)
}

/// Renders a timestamp in the form [`parse_timestamp`] reads back.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string()
}

/// Adds `delta`, failing instead of overflowing the representable range.
pub fn shift_timestamp(timestamp: &Timestamp, delta: Duration) -> Result<Timestamp> {
    timestamp.checked_add_signed(delta).ok_or_else(|| {
        TemporalError::TimestampOutOfRange(format!("{} + {}", format_timestamp(timestamp), delta))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test_case("2019-09-08" ; "bare date")]
    #[test_case("2019-09-08 00:00:00" ; "naive datetime")]
    #[test_case("2019-09-08T00:00:00Z" ; "rfc3339")]
    #[test_case("2019-09-08 00:00:00+00" ; "short offset")]
    #[test_case("2019-09-08 02:00:00+02:00" ; "colon offset")]
    #[test_case(" 2019-09-08 00:00 " ; "minutes only")]
    fn parses_midnight_forms(text: &str) {
        assert_eq!(parse_timestamp(text).unwrap(), utc(2019, 9, 8, 0, 0, 0));
    }

    #[test]
    fn zone_less_input_uses_offset() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let parsed = parse_timestamp_with_offset("2019-09-08 01:00:00", offset).unwrap();
        assert_eq!(parsed, utc(2019, 9, 8, 0, 0, 0));

        let explicit = parse_timestamp_with_offset("2019-09-08 01:00:00+00", offset).unwrap();
        assert_eq!(explicit, utc(2019, 9, 8, 1, 0, 0));
    }

    #[test_case("" ; "empty")]
    #[test_case("yesterday" ; "word")]
    #[test_case("2019-13-01" ; "bad month")]
    fn rejects_malformed(text: &str) {
        assert!(matches!(
            parse_timestamp(text),
            Err(TemporalError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn formatted_text_parses_back() {
        let ts = utc(2019, 9, 8, 12, 30, 5) + Duration::milliseconds(250);
        let text = format_timestamp(&ts);
        assert_eq!(text, "2019-09-08 12:30:05.250+00:00");
        assert_eq!(parse_timestamp(&text).unwrap(), ts);
    }

    #[test]
    fn shift_reports_overflow() {
        let ts = utc(2019, 9, 8, 0, 0, 0);
        assert_eq!(
            shift_timestamp(&ts, Duration::days(1)).unwrap(),
            utc(2019, 9, 9, 0, 0, 0)
        );
        assert!(matches!(
            shift_timestamp(&DateTime::<Utc>::MAX_UTC, Duration::seconds(1)),
            Err(TemporalError::TimestampOutOfRange(_))
        ));
    }
}
