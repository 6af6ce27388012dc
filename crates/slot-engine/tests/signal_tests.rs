//! Tests for day / time-of-day signal filtering.

use chrono::{DateTime, TimeZone, Utc, Weekday};
use chrono_tz::America::New_York;
use slot_engine::{
    filter_by_signals, filter_by_signals_at, DaySignal, SlotError, TimeOfDay, DEFAULT_TIMEZONE,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

const JAN_SLOTS: [&str; 3] = [
    "2026-01-30T08:00:00Z",
    "2026-01-30T15:00:00Z",
    "2026-01-31T09:00:00Z",
];

fn now(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

// ── No signals ──────────────────────────────────────────────────────────────

#[test]
fn no_signals_returns_all_slots_sorted() {
    let result = filter_by_signals(&JAN_SLOTS, None, None, DEFAULT_TIMEZONE);
    assert_eq!(result, JAN_SLOTS);
}

#[test]
fn no_signals_sorts_out_of_order_input() {
    let slots = [
        "2026-01-31T09:00:00Z",
        "2026-01-30T15:00:00Z",
        "2026-01-30T08:00:00Z",
    ];
    let result = filter_by_signals(&slots, None, None, DEFAULT_TIMEZONE);
    assert_eq!(result, JAN_SLOTS);
}

#[test]
fn sort_is_by_instant_not_by_text() {
    // 09:00+01:00 is 08:00Z, earlier than 08:30Z despite sorting later as text.
    let slots = ["2026-01-30T08:30:00Z", "2026-01-30T09:00:00+01:00"];
    let result = filter_by_signals(&slots, None, None, DEFAULT_TIMEZONE);
    assert_eq!(result, ["2026-01-30T09:00:00+01:00", "2026-01-30T08:30:00Z"]);
}

#[test]
fn equal_instants_keep_input_order() {
    let slots = ["2026-01-30T09:00:00+01:00", "2026-01-30T08:00:00Z"];
    let result = filter_by_signals(&slots, None, None, DEFAULT_TIMEZONE);
    assert_eq!(result, slots);
}

// ── Time-of-day ─────────────────────────────────────────────────────────────

#[test]
fn morning_excludes_afternoon_slot() {
    let result = filter_by_signals(&JAN_SLOTS, None, Some(TimeOfDay::Morning), DEFAULT_TIMEZONE);
    assert_eq!(result, ["2026-01-30T08:00:00Z", "2026-01-31T09:00:00Z"]);
}

#[test]
fn afternoon_keeps_only_afternoon_slot() {
    let result = filter_by_signals(
        &JAN_SLOTS,
        None,
        Some(TimeOfDay::Afternoon),
        DEFAULT_TIMEZONE,
    );
    assert_eq!(result, ["2026-01-30T15:00:00Z"]);
}

#[test]
fn hour_boundaries_are_half_open() {
    let slots = [
        "2026-01-30T11:59:00Z",
        "2026-01-30T12:00:00Z",
        "2026-01-30T16:59:00Z",
        "2026-01-30T17:00:00Z",
        "2026-01-30T23:59:00Z",
    ];
    let tz = DEFAULT_TIMEZONE;
    assert_eq!(
        filter_by_signals(&slots, None, Some(TimeOfDay::Morning), tz),
        ["2026-01-30T11:59:00Z"]
    );
    assert_eq!(
        filter_by_signals(&slots, None, Some(TimeOfDay::Afternoon), tz),
        ["2026-01-30T12:00:00Z", "2026-01-30T16:59:00Z"]
    );
    assert_eq!(
        filter_by_signals(&slots, None, Some(TimeOfDay::Evening), tz),
        ["2026-01-30T17:00:00Z", "2026-01-30T23:59:00Z"]
    );
}

#[test]
fn time_of_day_uses_local_summer_time() {
    // 11:30Z is 12:30 BST in June: afternoon locally, morning in UTC.
    let slots = ["2026-06-15T11:30:00Z", "2026-06-15T16:00:00Z"];
    let tz = DEFAULT_TIMEZONE;
    assert_eq!(
        filter_by_signals(&slots, None, Some(TimeOfDay::Morning), tz),
        Vec::<String>::new()
    );
    assert_eq!(
        filter_by_signals(&slots, None, Some(TimeOfDay::Afternoon), tz),
        ["2026-06-15T11:30:00Z"]
    );
    // 16:00Z is 17:00 BST.
    assert_eq!(
        filter_by_signals(&slots, None, Some(TimeOfDay::Evening), tz),
        ["2026-06-15T16:00:00Z"]
    );
}

// ── Day signals ─────────────────────────────────────────────────────────────

#[test]
fn weekday_matches_local_weekday() {
    let result = filter_by_signals(
        &JAN_SLOTS,
        Some(DaySignal::Weekday(Weekday::Fri)),
        None,
        DEFAULT_TIMEZONE,
    );
    assert_eq!(result, ["2026-01-30T08:00:00Z", "2026-01-30T15:00:00Z"]);
}

#[test]
fn weekday_is_evaluated_in_tenant_timezone() {
    // 03:00Z Saturday is still Friday 22:00 in New York.
    let slots = ["2026-01-31T03:00:00Z"];
    let friday = Some(DaySignal::Weekday(Weekday::Fri));
    let saturday = Some(DaySignal::Weekday(Weekday::Sat));

    assert_eq!(filter_by_signals(&slots, friday, None, New_York), slots);
    assert!(filter_by_signals(&slots, saturday, None, New_York).is_empty());
    assert_eq!(filter_by_signals(&slots, saturday, None, DEFAULT_TIMEZONE), slots);
}

#[test]
fn today_and_tomorrow_follow_now() {
    let now = now(2026, 1, 30, 10);
    let tz = DEFAULT_TIMEZONE;

    let today = filter_by_signals_at(&JAN_SLOTS, Some(DaySignal::Today), None, tz, now);
    assert_eq!(today, ["2026-01-30T08:00:00Z", "2026-01-30T15:00:00Z"]);

    let tomorrow = filter_by_signals_at(&JAN_SLOTS, Some(DaySignal::Tomorrow), None, tz, now);
    assert_eq!(tomorrow, ["2026-01-31T09:00:00Z"]);
}

#[test]
fn today_uses_local_date_of_now() {
    // now = 03:00Z Jan 31 = 22:00 Jan 30 in New York.
    let now = now(2026, 1, 31, 3);
    let slots = [
        "2026-01-31T04:00:00Z", // Jan 30 23:00 local
        "2026-02-01T04:00:00Z", // Jan 31 23:00 local
        "2026-02-01T05:00:00Z", // Feb 1 00:00 local
    ];

    let today = filter_by_signals_at(&slots, Some(DaySignal::Today), None, New_York, now);
    assert_eq!(today, ["2026-01-31T04:00:00Z"]);

    let tomorrow = filter_by_signals_at(&slots, Some(DaySignal::Tomorrow), None, New_York, now);
    assert_eq!(tomorrow, ["2026-02-01T04:00:00Z"]);
}

#[test]
fn tomorrow_across_month_end() {
    let now = now(2026, 2, 28, 12);
    let slots = ["2026-02-28T15:00:00Z", "2026-03-01T09:00:00Z"];
    let result = filter_by_signals_at(
        &slots,
        Some(DaySignal::Tomorrow),
        None,
        DEFAULT_TIMEZONE,
        now,
    );
    assert_eq!(result, ["2026-03-01T09:00:00Z"]);
}

#[test]
fn day_and_time_of_day_must_both_match() {
    let result = filter_by_signals(
        &JAN_SLOTS,
        Some(DaySignal::Weekday(Weekday::Fri)),
        Some(TimeOfDay::Afternoon),
        DEFAULT_TIMEZONE,
    );
    assert_eq!(result, ["2026-01-30T15:00:00Z"]);
}

// ── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn unparseable_slots_are_dropped() {
    let slots = [
        "not-a-date",
        "2026-01-30T08:00:00Z",
        "",
        "2026-13-01T00:00:00Z",
    ];
    let result = filter_by_signals(&slots, None, None, DEFAULT_TIMEZONE);
    assert_eq!(result, ["2026-01-30T08:00:00Z"]);
}

#[test]
fn offsetless_timestamp_is_treated_as_utc() {
    // In New York, 14:00 UTC is 09:00 local.
    let slots = ["2026-01-30T14:00:00"];
    let result = filter_by_signals(&slots, None, Some(TimeOfDay::Morning), New_York);
    assert_eq!(result, slots);
}

#[test]
fn explicit_offsets_are_honoured() {
    // 12:30+05:30 is 07:00Z: morning in London.
    let slots = ["2026-01-30T12:30:00+05:30", "2026-01-30T12:30:00+0000"];
    let result = filter_by_signals(&slots, None, Some(TimeOfDay::Morning), DEFAULT_TIMEZONE);
    assert_eq!(result, ["2026-01-30T12:30:00+05:30"]);
}

#[test]
fn offsets_without_seconds_or_minutes_are_honoured() {
    // 12:30+01 is 11:30Z: still morning. 13:00+00:00 is afternoon.
    let slots = [
        "2026-01-30T13:00+00:00",
        "2026-01-30T09:00Z",
        "2026-01-30T12:30:00+01",
        "2026-01-30 10:15+0000",
    ];
    let result = filter_by_signals(&slots, None, Some(TimeOfDay::Morning), DEFAULT_TIMEZONE);
    assert_eq!(
        result,
        ["2026-01-30T09:00Z", "2026-01-30 10:15+0000", "2026-01-30T12:30:00+01"]
    );
}

// ── Signal tokens ───────────────────────────────────────────────────────────

#[test]
fn day_signal_parses_names_case_insensitively() {
    assert_eq!(
        "Monday".parse::<DaySignal>().unwrap(),
        DaySignal::Weekday(Weekday::Mon)
    );
    assert_eq!(" sunday ".parse::<DaySignal>().unwrap(), DaySignal::Weekday(Weekday::Sun));
    assert_eq!("today".parse::<DaySignal>().unwrap(), DaySignal::Today);
    assert_eq!("TOMORROW".parse::<DaySignal>().unwrap(), DaySignal::Tomorrow);
}

#[test]
fn unknown_day_token_is_rejected() {
    let err = "mon".parse::<DaySignal>().unwrap_err();
    assert!(matches!(err, SlotError::InvalidDaySignal(ref s) if s == "mon"));
    assert!("wensday".parse::<DaySignal>().is_err());
}

#[test]
fn time_of_day_tokens() {
    assert_eq!("morning".parse::<TimeOfDay>().unwrap(), TimeOfDay::Morning);
    assert_eq!("Afternoon".parse::<TimeOfDay>().unwrap(), TimeOfDay::Afternoon);
    assert_eq!("evening".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
    assert!(matches!(
        "noon".parse::<TimeOfDay>(),
        Err(SlotError::InvalidTimeOfDay(_))
    ));
}

#[test]
fn signal_display_round_trips_through_from_str() {
    for token in ["monday", "friday", "today", "tomorrow"] {
        assert_eq!(token.parse::<DaySignal>().unwrap().to_string(), token);
    }
    for token in ["morning", "afternoon", "evening"] {
        assert_eq!(token.parse::<TimeOfDay>().unwrap().to_string(), token);
    }
}

#[test]
fn contrast_buckets() {
    assert_eq!(TimeOfDay::Morning.contrast(), TimeOfDay::Afternoon);
    assert_eq!(TimeOfDay::Afternoon.contrast(), TimeOfDay::Morning);
    assert_eq!(TimeOfDay::Evening.contrast(), TimeOfDay::Morning);
}

#[test]
fn of_hour_agrees_with_hour_ranges() {
    for hour in 0..24 {
        let bucket = TimeOfDay::of_hour(hour);
        assert!(bucket.hours().contains(&hour), "hour {} -> {:?}", hour, bucket);
    }
}
