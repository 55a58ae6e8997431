// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for the encoder and decoder.
//!
//! Encoding and decoding again must give back every field that is written,
//! with times truncated to the second.

use mycal_ical::{CalendarEvent, EncodeOptions, LineEnding, decode, encode};

const START: i64 = 1_736_517_600_000; // 2025-01-10T14:00:00Z
const END: i64 = 1_736_521_200_000; // 2025-01-10T15:00:00Z

fn sample() -> CalendarEvent {
    CalendarEvent {
        id: 7,
        title: "Quarterly review".to_owned(),
        description: Some("Agenda:\n1. Numbers, charts\n2. Plans".to_owned()),
        location: Some("HQ, Room 4; Floor 2".to_owned()),
        start_time: START,
        end_time: END,
        is_all_day: false,
        reminder_minutes_before: None,
    }
}

/// What a decoded copy of `event` is expected to look like.
fn expected(event: &CalendarEvent) -> CalendarEvent {
    CalendarEvent {
        id: 0,
        title: event.title.clone(),
        description: event.description.clone().filter(|s| !s.is_empty()),
        location: event.location.clone().filter(|s| !s.is_empty()),
        start_time: event.start_time.div_euclid(1000) * 1000,
        end_time: event.end_time.div_euclid(1000) * 1000,
        is_all_day: false,
        reminder_minutes_before: None,
    }
}

#[test]
fn round_trip_single_event() {
    let event = sample();
    let decoded = decode(&encode(std::slice::from_ref(&event)).unwrap());
    assert_eq!(decoded, [expected(&event)]);
}

#[test]
fn round_trip_truncates_to_seconds() {
    let event = CalendarEvent::new("precise", START + 123, END + 999);
    let decoded = decode(&encode(&[event]).unwrap());
    assert_eq!(decoded[0].start_time, START);
    assert_eq!(decoded[0].end_time, END);
}

#[test]
fn round_trip_before_epoch() {
    // 1969-12-31T23:59:58.500Z
    let event = CalendarEvent::new("old", -1_500, 0);
    let decoded = decode(&encode(&[event]).unwrap());
    assert_eq!(decoded[0].start_time, -2_000);
    assert_eq!(decoded[0].end_time, 0);
}

#[test]
fn round_trip_escaping_is_idempotent() {
    let title = "Line 1\nLine 2, with comma";
    let event = CalendarEvent::new(title, START, END);

    let ics = encode(&[event]).unwrap();
    assert!(ics.contains("SUMMARY:Line 1\\nLine 2\\, with comma\n"));

    let once = decode(&ics);
    assert_eq!(once[0].title, title);

    let twice = decode(&encode(&once).unwrap());
    assert_eq!(twice, once);
}

#[test]
fn round_trip_carriage_return_becomes_newline() {
    let event = CalendarEvent {
        description: Some("a\r\nb\rc".to_owned()),
        ..CalendarEvent::new("cr", START, END)
    };
    let decoded = decode(&encode(&[event]).unwrap());
    assert_eq!(decoded[0].description.as_deref(), Some("a\nb\nc"));
}

#[test]
fn round_trip_empty_optional_text_is_absent() {
    let event = CalendarEvent {
        description: Some(String::new()),
        location: Some(String::new()),
        ..CalendarEvent::new("empty", START, END)
    };
    let decoded = decode(&encode(&[event]).unwrap());
    assert_eq!(decoded[0].description, None);
    assert_eq!(decoded[0].location, None);
}

#[test]
fn round_trip_all_day_is_not_preserved() {
    let event = CalendarEvent {
        is_all_day: true,
        reminder_minutes_before: Some(30),
        ..CalendarEvent::new("holiday", 1_704_067_200_000, 1_704_153_600_000)
    };
    let decoded = decode(&encode(&[event]).unwrap());
    assert!(!decoded[0].is_all_day);
    assert_eq!(decoded[0].reminder_minutes_before, None);
    assert_eq!(decoded[0].start_time, 1_704_067_200_000);
}

#[test]
fn round_trip_many_events_in_order() {
    let events: Vec<_> = (1..=5)
        .map(|i| CalendarEvent {
            id: i,
            ..CalendarEvent::new(format!("event {i}"), START + i * 60_000, END + i * 60_000)
        })
        .collect();
    let decoded = decode(&encode(&events).unwrap());
    let expected: Vec<_> = events.iter().map(expected).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn round_trip_untitled_event_is_lost() {
    let events = [CalendarEvent::new("", START, END), sample()];
    let decoded = decode(&encode(&events).unwrap());
    assert_eq!(decoded, [expected(&sample())]);
}

#[test]
fn round_trip_folded_output() {
    let long = "A rather long description that goes well past the usual limit, \
                with commas, newlines\nand some non-ASCII text: café, 日本語, emoji 🎉🎉🎉";
    let event = CalendarEvent {
        description: Some(long.repeat(3)),
        location: Some("é".repeat(100)),
        ..sample()
    };

    for width in [10, 20, 75] {
        for ending in [LineEnding::Lf, LineEnding::CrLf] {
            let options = EncodeOptions::default()
                .folding(Some(width))
                .line_ending(ending);
            let ics = options
                .write_to_string(std::slice::from_ref(&event))
                .unwrap();
            for line in ics.lines() {
                assert!(line.trim_end_matches('\r').len() <= width, "{line:?}");
            }
            assert_eq!(decode(&ics), [expected(&event)], "width {width}");
        }
    }
}

#[test]
fn round_trip_with_custom_options() {
    let options = EncodeOptions::default()
        .product_id("-//Example//Test//EN")
        .uid_domain("example.org")
        .line_ending(LineEnding::CrLf);
    let ics = options.write_to_string(&[sample()]).unwrap();
    assert!(ics.contains("UID:7@example.org\r\n"));
    assert_eq!(decode(&ics), [expected(&sample())]);
}
