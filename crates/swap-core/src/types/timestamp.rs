//! Timestamp formatting and the open-ended batch bounds.
//!
//! Batch bounds are written as `%Y-%m-%d_%H:%M:%S`, or as one of the
//! sentinels `the_beginning` / `the_end_of_time`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::errors::RecordError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";
pub const THE_BEGINNING: &str = "the_beginning";
pub const THE_END_OF_TIME: &str = "the_end_of_time";

/// Lower sentinel: 1978-02-28 12:00:00 UTC.
pub fn the_beginning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1978, 2, 28, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Upper sentinel: 2100-01-01 12:00:00 UTC.
pub fn the_end_of_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RecordError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| RecordError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}

pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a batch start bound, accepting `the_beginning`.
pub fn parse_lower_bound(value: &str) -> Result<DateTime<Utc>, RecordError> {
    if value == THE_BEGINNING {
        Ok(the_beginning())
    } else {
        parse_timestamp(value)
    }
}

/// Parse a batch end bound, accepting `the_end_of_time`.
pub fn parse_upper_bound(value: &str) -> Result<DateTime<Utc>, RecordError> {
    if value == THE_END_OF_TIME {
        Ok(the_end_of_time())
    } else {
        parse_timestamp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_format_roundtrip() {
        let t = parse_timestamp("2013-05-07_14:03:21").unwrap();
        assert_eq!(format_timestamp(&t), "2013-05-07_14:03:21");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(parse_lower_bound(THE_BEGINNING).unwrap().year(), 1978);
        assert_eq!(parse_upper_bound(THE_END_OF_TIME).unwrap().year(), 2100);
        assert!(the_beginning() < the_end_of_time());
    }

    #[test]
    fn test_bad_timestamp() {
        let err = parse_timestamp("2013-05-07 14:03:21").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp { .. }));
    }
}
