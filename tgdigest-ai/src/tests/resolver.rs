use chrono::TimeZone;
use chrono_tz::Tz;

use crate::TimeWindow;
use crate::claude::parse_time_window;

const TZ: Tz = chrono_tz::Asia::Jerusalem;

fn window(completion: &str) -> Option<TimeWindow> {
    parse_time_window(completion, TZ)
}

#[test]
fn test_parse_plain_json() {
    let parsed = window(
        r#"{"start_time": "2026-08-05T06:00:00+03:00", "end_time": "2026-08-05T12:00:00+03:00"}"#,
    )
    .unwrap();

    assert_eq!(
        parsed.start(),
        TZ.with_ymd_and_hms(2026, 8, 5, 6, 0, 0).unwrap()
    );
    assert_eq!(
        parsed.end(),
        TZ.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_parse_json_wrapped_in_prose() {
    let completion = r#"Вот временной интервал для вашего запроса:

{"start_time": "2026-08-05T06:00:00+03:00", "end_time": "2026-08-05T12:00:00+03:00"}

Надеюсь, это поможет!"#;

    assert!(window(completion).is_some());
}

#[test]
fn test_parse_converts_to_reference_timezone() {
    // 03:00 UTC is 06:00 in Jerusalem during IDT
    let parsed = window(
        r#"{"start_time": "2026-08-05T03:00:00+00:00", "end_time": "2026-08-05T09:00:00Z"}"#,
    )
    .unwrap();

    assert_eq!(parsed.start().timezone(), TZ);
    assert_eq!(
        parsed.start(),
        TZ.with_ymd_and_hms(2026, 8, 5, 6, 0, 0).unwrap()
    );
    assert_eq!(
        parsed.end(),
        TZ.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_parse_null_fields_fail_closed() {
    assert!(window(r#"{"start_time": null, "end_time": null}"#).is_none());
}

#[test]
fn test_parse_missing_field_fails_closed() {
    assert!(window(r#"{"start_time": "2026-08-05T06:00:00+03:00"}"#).is_none());
}

#[test]
fn test_parse_no_json_object_fails_closed() {
    assert!(window("Не могу определить временной интервал по этому запросу.").is_none());
}

#[test]
fn test_parse_garbage_braces_fail_closed() {
    assert!(window("{start_time: вчера, end_time: сегодня}").is_none());
}

#[test]
fn test_parse_timestamp_without_offset_fails_closed() {
    assert!(
        window(r#"{"start_time": "2026-08-05T06:00:00", "end_time": "2026-08-05T12:00:00"}"#)
            .is_none()
    );
}

#[test]
fn test_parse_reversed_range_fails_closed() {
    assert!(
        window(
            r#"{"start_time": "2026-08-05T12:00:00+03:00", "end_time": "2026-08-05T06:00:00+03:00"}"#
        )
        .is_none()
    );
}

#[test]
fn test_window_rejects_reversed_bounds() {
    let earlier = TZ.with_ymd_and_hms(2026, 8, 5, 6, 0, 0).unwrap();
    let later = TZ.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();

    assert!(TimeWindow::new(later, earlier).is_none());
    assert!(TimeWindow::new(earlier, later).is_some());
}

#[test]
fn test_window_allows_zero_length_range() {
    let instant = TZ.with_ymd_and_hms(2026, 8, 5, 6, 0, 0).unwrap();

    assert!(TimeWindow::new(instant, instant).is_some());
}
