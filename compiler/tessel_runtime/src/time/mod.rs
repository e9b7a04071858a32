//! Date and timestamp codecs.
//!
//! - `std.Date`: RFC 3339 text in UTC with millisecond precision. Decode also
//!   accepts a JSON integer of epoch milliseconds.
//! - `std.Timestamp`: `"YYYY-MM-DD HH:MM:SS[.fraction]"`, read back with
//!   [`parse_timestamp`].
//! - `std.LocalDate`: `"YYYY-MM-DD"`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::codec::Codec;
use crate::json::write_json_string;
use crate::{CodecError, CodecTable, JsonValue, TimestampError, Value};

/// Largest nanosecond component.
const MAX_NANOS: u32 = 999_999_999;

/// Parse `"YYYY-MM-DD[ HH:MM:SS[.fraction]]"`.
///
/// The fraction is rounded to the nearest nanosecond. A missing time means
/// midnight. Out-of-range fields are rejected rather than rolled over.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimestampError> {
    let components: Vec<&str> = s.split(' ').collect();
    let (date, time) = match components.as_slice() {
        [date] => (*date, None),
        [date, time] => (*date, Some(*time)),
        _ => return Err(TimestampError::ExpectedDateAndTime(s.to_string())),
    };

    let invalid_date = || TimestampError::InvalidDate(date.to_string());
    let d: Vec<&str> = date.split('-').collect();
    let [yy, mm, dd] = d.as_slice() else {
        return Err(invalid_date());
    };
    let yy: i32 = yy.parse().map_err(|_| invalid_date())?;
    let mm: u32 = mm.parse().map_err(|_| invalid_date())?;
    let dd: u32 = dd.parse().map_err(|_| invalid_date())?;
    let date = NaiveDate::from_ymd_opt(yy, mm, dd).ok_or_else(invalid_date)?;

    let Some(time) = time else {
        return Ok(date.and_time(NaiveTime::MIN));
    };
    let invalid_time = || TimestampError::InvalidTime(time.to_string());
    let (hms, fraction) = match time.split_once('.') {
        Some((hms, digits)) => {
            let f: f64 = format!("0.{digits}").parse().map_err(|_| invalid_time())?;
            (hms, f)
        }
        None => (time, 0.0),
    };
    let t: Vec<&str> = hms.split(':').collect();
    let [hh, mi, ss] = t.as_slice() else {
        return Err(invalid_time());
    };
    let hh: u32 = hh.parse().map_err(|_| invalid_time())?;
    let mi: u32 = mi.parse().map_err(|_| invalid_time())?;
    let ss: u32 = ss.parse().map_err(|_| invalid_time())?;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "fraction is in [0, 1), so the product fits"
    )]
    let ns = ((fraction * 1e9).round() as u32).min(MAX_NANOS);
    let time = NaiveTime::from_hms_nano_opt(hh, mi, ss, ns).ok_or_else(invalid_time)?;
    Ok(date.and_time(time))
}

/// Inverse of [`parse_timestamp`]. The fraction is omitted when zero.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

fn expect_str<'a>(json: &'a JsonValue, expected: &'static str) -> Result<&'a str, CodecError> {
    json.as_str().ok_or_else(|| json.unexpected(expected))
}

fn mismatch(expected: &'static str, value: &Value) -> CodecError {
    CodecError::UnexpectedValue {
        expected,
        found: value.kind(),
    }
}

/// Codec for `std.Date`.
#[derive(Debug)]
pub struct DateCodec;

pub static DATE: DateCodec = DateCodec;

impl Codec for DateCodec {
    fn encode(&self, _cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        let Value::Date(dt) = value else {
            return Err(mismatch("date", value));
        };
        write_json_string(out, &dt.to_rfc3339_opts(SecondsFormat::Millis, true));
        Ok(())
    }

    fn decode(&self, _cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Number(n) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(Value::Date)
                .ok_or_else(|| CodecError::MalformedDate {
                    text: n.to_string(),
                    reason: "expected epoch milliseconds".to_string(),
                }),
            _ => {
                let text = expect_str(json, "date")?;
                DateTime::parse_from_rfc3339(text)
                    .map(|dt| Value::Date(dt.with_timezone(&Utc)))
                    .map_err(|err| CodecError::MalformedDate {
                        text: text.to_string(),
                        reason: err.to_string(),
                    })
            }
        }
    }
}

/// Codec for `std.Timestamp`.
#[derive(Debug)]
pub struct TimestampCodec;

pub static TIMESTAMP: TimestampCodec = TimestampCodec;

impl Codec for TimestampCodec {
    fn encode(&self, _cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        let Value::Timestamp(ts) = value else {
            return Err(mismatch("timestamp", value));
        };
        write_json_string(out, &format_timestamp(ts));
        Ok(())
    }

    fn decode(&self, _cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        if json.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(json, "timestamp")?;
        Ok(Value::Timestamp(parse_timestamp(text)?))
    }
}

/// Codec for `std.LocalDate`.
#[derive(Debug)]
pub struct LocalDateCodec;

pub static LOCAL_DATE: LocalDateCodec = LocalDateCodec;

impl Codec for LocalDateCodec {
    fn encode(&self, _cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        let Value::LocalDate(date) = value else {
            return Err(mismatch("local date", value));
        };
        write_json_string(out, &date.format("%Y-%m-%d").to_string());
        Ok(())
    }

    fn decode(&self, _cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        if json.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(json, "local date")?;
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Value::LocalDate)
            .map_err(|err| CodecError::MalformedDate {
                text: text.to_string(),
                reason: err.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-valid results")]
mod tests;
