use chrono::{Datelike, TimeZone, Timelike};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn ymd_hms_nano(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ns: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_nano_opt(h, mi, s, ns)
        .unwrap()
}

// ── parse_timestamp ─────────────────────────────────────────────

#[test]
fn date_only_is_midnight() {
    assert_eq!(
        parse_timestamp("2024-02-29").unwrap(),
        ymd_hms_nano(2024, 2, 29, 0, 0, 0, 0)
    );
}

#[test]
fn fraction_rounds_to_nanoseconds() {
    let ts = parse_timestamp("2001-09-09 01:46:40.5").unwrap();
    assert_eq!(ts.nanosecond(), 500_000_000);
    let ts = parse_timestamp("2001-09-09 01:46:40.0000000004").unwrap();
    assert_eq!(ts.nanosecond(), 0);
    let ts = parse_timestamp("2001-09-09 01:46:40.0000000006").unwrap();
    assert_eq!(ts.nanosecond(), 1);
}

#[test]
fn fraction_is_clamped_below_one_second() {
    let ts = parse_timestamp("2001-09-09 01:46:40.9999999999").unwrap();
    assert_eq!(ts.nanosecond(), 999_999_999);
    assert_eq!(ts.second(), 40);
}

#[test]
fn too_many_components() {
    assert_eq!(
        parse_timestamp("2024-01-01 10:00:00 UTC").unwrap_err(),
        TimestampError::ExpectedDateAndTime("2024-01-01 10:00:00 UTC".to_string())
    );
}

#[test]
fn malformed_dates() {
    for bad in ["2024-01", "2024-xx-01", "2024-02-30", "2024/01/01"] {
        assert!(
            matches!(parse_timestamp(bad), Err(TimestampError::InvalidDate(_))),
            "{bad}"
        );
    }
}

#[test]
fn malformed_times() {
    for bad in ["2024-01-01 10:00", "2024-01-01 25:00:00", "2024-01-01 10:00:00.x"] {
        assert!(
            matches!(parse_timestamp(bad), Err(TimestampError::InvalidTime(_))),
            "{bad}"
        );
    }
}

proptest! {
    #[test]
    fn format_then_parse_is_identity(
        y in 1i32..9999, mo in 1u32..=12, d in 1u32..=28,
        h in 0u32..24, mi in 0u32..60, s in 0u32..60, ns in 0u32..1_000_000_000,
    ) {
        let ts = ymd_hms_nano(y, mo, d, h, mi, s, ns);
        prop_assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }
}

// ── Codecs ──────────────────────────────────────────────────────

fn encode(codec: &dyn Codec, value: &Value) -> String {
    let mut out = String::new();
    codec.encode(&CodecTable::new(), &mut out, value).unwrap();
    out
}

fn decode(codec: &dyn Codec, text: &str) -> Result<Value, CodecError> {
    codec.decode(&CodecTable::new(), &JsonValue::parse(text)?)
}

#[test]
fn date_uses_rfc3339_millis() {
    let dt = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 0).unwrap();
    let text = encode(&DATE, &Value::Date(dt));
    assert_eq!(text, "\"2020-05-17T08:30:00.000Z\"");
    assert_eq!(decode(&DATE, &text).unwrap(), Value::Date(dt));
}

#[test]
fn date_accepts_epoch_millis_and_offsets() {
    let Value::Date(dt) = decode(&DATE, "1000").unwrap() else {
        panic!("expected date");
    };
    assert_eq!(dt.timestamp_millis(), 1000);

    let Value::Date(dt) = decode(&DATE, "\"2020-05-17T10:30:00+02:00\"").unwrap() else {
        panic!("expected date");
    };
    assert_eq!(dt.hour(), 8);
}

#[test]
fn malformed_date_text_fails() {
    assert!(matches!(
        decode(&DATE, "\"yesterday\"").unwrap_err(),
        CodecError::MalformedDate { .. }
    ));
}

#[test]
fn timestamp_codec_round_trips() {
    let ts = ymd_hms_nano(1999, 12, 31, 23, 59, 59, 120_000_000);
    let text = encode(&TIMESTAMP, &Value::Timestamp(ts));
    assert_eq!(text, "\"1999-12-31 23:59:59.120\"");
    assert_eq!(decode(&TIMESTAMP, &text).unwrap(), Value::Timestamp(ts));
}

#[test]
fn timestamp_codec_reports_parse_failure() {
    assert!(matches!(
        decode(&TIMESTAMP, "\"1999-13-01\"").unwrap_err(),
        CodecError::MalformedDate { .. }
    ));
}

#[test]
fn local_date_codec() {
    let date = NaiveDate::from_ymd_opt(2012, 1, 9).unwrap();
    let text = encode(&LOCAL_DATE, &Value::LocalDate(date));
    assert_eq!(text, "\"2012-01-09\"");
    let Value::LocalDate(back) = decode(&LOCAL_DATE, &text).unwrap() else {
        panic!("expected local date");
    };
    assert_eq!(back.day(), 9);
    assert!(decode(&LOCAL_DATE, "5").is_err());
}
